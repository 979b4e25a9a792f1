//! Doudizhu table renderer.
//!
//! Draws all three seats face up, the three hole cards at the top, the most
//! recent move next to the seat that played it, and a winner overlay once
//! the round settles. Hand geometry comes from the adaptive layout in
//! [`crate::layout`].

use super::{rect_px, DrawCmd};
use crate::graphics::{text_width, Color, Rect};
use crate::layout::{
    compute_hand_layout, seat_align, seat_anchor, seat_region, SeatAlign, BASE_CARD_H, BASE_CARD_W,
};
use crate::scene::{DoudizhuScene, PlayerView, Role, NO_WINNER};
use crate::surface::SurfaceSize;

const MAX_W: u32 = 800;
const MAX_H: u32 = 600;

const TABLE: Color = [6, 78, 59, 255];
const TABLE_CENTER: Color = [5, 150, 105, 255];
const CARD_BG: Color = [248, 250, 252, 255];
const LAIZI_BG: Color = [254, 243, 199, 255];
const INK: Color = [30, 41, 59, 255];
const RED: Color = [239, 68, 68, 255];
const HIGHLIGHT: Color = [251, 191, 36, 255];
const LANDLORD: Color = [245, 158, 11, 255];
const PEASANT: Color = [148, 163, 184, 255];
const WHITE: Color = [255, 255, 255, 255];
const BLACK: Color = [0, 0, 0, 255];

const HOLE_GAP: f32 = 5.0;
const MOVE_SPACING: f32 = 15.0;

pub fn commands(scene: &DoudizhuScene, box_w: u32, box_h: u32) -> (SurfaceSize, Vec<DrawCmd>) {
    let size = SurfaceSize::new(box_w.min(MAX_W), box_h.min(MAX_H));
    if size.is_empty() {
        return (SurfaceSize::new(0, 0), Vec::new());
    }
    let w = size.width as f32;
    let h = size.height as f32;

    let mut out = Vec::new();
    out.push(DrawCmd::Fill {
        rect: Rect::from_size(size.width, size.height),
        color: TABLE,
    });
    // Brighter pool of light in the middle of the table.
    out.push(DrawCmd::Blend {
        rect: rect_px(w * 0.15, h * 0.15, w * 0.7, h * 0.7),
        color: TABLE_CENTER,
        alpha: 90,
    });

    hole_cards(scene, w, &mut out);
    for player in &scene.players {
        seat(scene, player, w, h, &mut out);
    }
    winner_overlay(scene, w, h, size, &mut out);

    (size, out)
}

fn hole_cards(scene: &DoudizhuScene, w: f32, out: &mut Vec<DrawCmd>) {
    let total_w = 3.0 * BASE_CARD_W + 2.0 * HOLE_GAP;
    let start_x = w / 2.0 - total_w / 2.0;
    let y = 20.0;

    out.push(DrawCmd::Blend {
        rect: rect_px(start_x - 5.0, y - 5.0, total_w + 10.0, BASE_CARD_H + 10.0),
        color: BLACK,
        alpha: 51,
    });
    for (i, rank) in scene.hole_cards.iter().take(3).enumerate() {
        card(
            out,
            rank,
            start_x + i as f32 * (BASE_CARD_W + HOLE_GAP),
            y,
            BASE_CARD_W,
            BASE_CARD_H,
            false,
            scene.laizi.iter().any(|l| l == rank),
        );
    }

    if !scene.laizi.is_empty() {
        let label = format!("LAIZI: {}", scene.laizi.join(",").to_uppercase());
        let label_y = y + BASE_CARD_H + 8.0;
        out.push(DrawCmd::Blend {
            rect: rect_px(w / 2.0 - 120.0, label_y - 4.0, 240.0, 20.0),
            color: BLACK,
            alpha: 64,
        });
        out.push(DrawCmd::Text {
            x: (w / 2.0 - text_width(&label, 2) as f32 / 2.0).max(0.0) as u32,
            y: label_y as u32,
            text: label,
            color: HIGHLIGHT,
            scale: 2,
        });
    }
}

fn seat(scene: &DoudizhuScene, player: &PlayerView, w: f32, h: f32, out: &mut Vec<DrawCmd>) {
    let align = seat_align(player.id);
    let (ax, ay) = seat_anchor(align, w, h);

    // Avatar disc, offset away from the hand.
    let (av_x, av_y) = match align {
        SeatAlign::Left => (ax - 40.0, ay),
        SeatAlign::Right => (ax + 40.0, ay),
        SeatAlign::Bottom => (ax, ay + 50.0),
    };
    let role_color = match player.role {
        Role::Landlord => LANDLORD,
        Role::Peasant => PEASANT,
    };
    if player.is_turn {
        out.push(DrawCmd::Disc {
            cx: av_x as i32,
            cy: av_y as i32,
            radius: 22,
            color: WHITE,
        });
    }
    out.push(DrawCmd::Disc {
        cx: av_x as i32,
        cy: av_y as i32,
        radius: 20,
        color: role_color,
    });
    if player.is_turn {
        let label = "THINKING";
        out.push(DrawCmd::Text {
            x: (av_x - text_width(label, 1) as f32 / 2.0).max(0.0) as u32,
            y: (av_y + 26.0) as u32,
            text: label.into(),
            color: WHITE,
            scale: 1,
        });
    }

    let role_label = match player.role {
        Role::Landlord => "LANDLORD",
        Role::Peasant => "PEASANT",
    };
    out.push(DrawCmd::Text {
        x: (av_x - text_width(role_label, 1) as f32 / 2.0).max(0.0) as u32,
        y: (av_y - 34.0).max(0.0) as u32,
        text: role_label.into(),
        color: WHITE,
        scale: 1,
    });
    let id_label = format!("P{}", player.id);
    out.push(DrawCmd::Text {
        x: (av_x - text_width(&id_label, 2) as f32 / 2.0).max(0.0) as u32,
        y: (av_y - 5.0).max(0.0) as u32,
        text: id_label,
        color: WHITE,
        scale: 2,
    });

    hand(scene, player, align, ax, ay, w, h, out);
    last_move(scene, player, align, ax, ay, out);
}

#[allow(clippy::too_many_arguments)]
fn hand(
    scene: &DoudizhuScene,
    player: &PlayerView,
    align: SeatAlign,
    ax: f32,
    ay: f32,
    w: f32,
    h: f32,
    out: &mut Vec<DrawCmd>,
) {
    let (region_w, region_h) = seat_region(align, w, h);
    let layout = compute_hand_layout(player.hand.len(), region_w, region_h);
    if layout.is_empty() {
        return;
    }
    let (total_w, total_h) = layout.total_size();

    let (start_x, start_y) = match align {
        SeatAlign::Bottom => (ax - total_w / 2.0, ay - total_h / 2.0),
        SeatAlign::Left => (ax + 20.0, ay - total_h / 2.0),
        SeatAlign::Right => (ax - 20.0 - total_w, ay - total_h / 2.0),
    };

    for (idx, rank) in player.hand.iter().enumerate() {
        let (dx, dy) = layout.card_offset(idx);
        card(
            out,
            rank,
            start_x + dx,
            start_y + dy,
            layout.card_w,
            layout.card_h,
            false,
            scene.laizi.iter().any(|l| l == rank),
        );
    }
}

fn last_move(
    scene: &DoudizhuScene,
    player: &PlayerView,
    align: SeatAlign,
    ax: f32,
    ay: f32,
    out: &mut Vec<DrawCmd>,
) {
    if scene.last_move.player != Some(player.id as i32) || scene.last_move.cards.is_empty() {
        return;
    }
    let count = scene.last_move.cards.len();
    let move_w = (count - 1) as f32 * MOVE_SPACING + BASE_CARD_W;

    let (mx, my) = match align {
        SeatAlign::Bottom => (ax - move_w / 2.0, ay - 100.0),
        SeatAlign::Left => (ax + 150.0, ay - BASE_CARD_H / 2.0),
        SeatAlign::Right => (ax - 150.0 - move_w, ay - BASE_CARD_H / 2.0),
    };

    out.push(DrawCmd::Blend {
        rect: rect_px(mx - 5.0, my - 5.0, move_w + 10.0, BASE_CARD_H + 10.0),
        color: BLACK,
        alpha: 128,
    });
    for (idx, rank) in scene.last_move.cards.iter().enumerate() {
        card(
            out,
            rank,
            mx + idx as f32 * MOVE_SPACING,
            my,
            BASE_CARD_W,
            BASE_CARD_H,
            true,
            scene.laizi.iter().any(|l| l == rank),
        );
    }
    if !scene.last_move.kind.is_empty() {
        let label = scene.last_move.kind.to_uppercase();
        out.push(DrawCmd::Text {
            x: (mx + move_w / 2.0 - text_width(&label, 1) as f32 / 2.0).max(0.0) as u32,
            y: (my - 12.0).max(0.0) as u32,
            text: label,
            color: HIGHLIGHT,
            scale: 1,
        });
    }
}

fn winner_overlay(
    scene: &DoudizhuScene,
    w: f32,
    h: f32,
    size: SurfaceSize,
    out: &mut Vec<DrawCmd>,
) {
    if scene.winner == NO_WINNER {
        return;
    }
    let Some(winner) = usize::try_from(scene.winner)
        .ok()
        .and_then(|i| scene.players.get(i))
    else {
        return;
    };

    out.push(DrawCmd::Blend {
        rect: Rect::from_size(size.width, size.height),
        color: BLACK,
        alpha: 179,
    });
    let headline = match winner.role {
        Role::Landlord => "LANDLORD WINS!",
        Role::Peasant => "PEASANT WINS!",
    };
    out.push(DrawCmd::Text {
        x: (w / 2.0 - text_width(headline, 4) as f32 / 2.0).max(0.0) as u32,
        y: (h / 2.0 - 24.0).max(0.0) as u32,
        text: headline.into(),
        color: HIGHLIGHT,
        scale: 4,
    });
    let detail = format!("PLAYER {} TOOK THE ROUND", scene.winner);
    out.push(DrawCmd::Text {
        x: (w / 2.0 - text_width(&detail, 2) as f32 / 2.0).max(0.0) as u32,
        y: (h / 2.0 + 12.0) as u32,
        text: detail,
        color: WHITE,
        scale: 2,
    });
}

#[allow(clippy::too_many_arguments)]
fn card(
    out: &mut Vec<DrawCmd>,
    rank: &str,
    x: f32,
    y: f32,
    w: f32,
    h: f32,
    highlight: bool,
    is_laizi: bool,
) {
    out.push(DrawCmd::Fill {
        rect: rect_px(x, y, w, h),
        color: if is_laizi { LAIZI_BG } else { CARD_BG },
    });
    out.push(DrawCmd::Outline {
        rect: rect_px(x, y, w, h),
        color: if highlight { HIGHLIGHT } else { INK },
    });

    let is_red_joker = rank.eq_ignore_ascii_case("rj");
    let is_joker = is_red_joker || rank.eq_ignore_ascii_case("bj");
    let display = rank.to_uppercase();
    let ink = if is_red_joker { RED } else { INK };

    // Corner rank stays readable even when cards overlap.
    out.push(DrawCmd::Text {
        x: (x + 3.0).max(0.0) as u32,
        y: (y + 3.0).max(0.0) as u32,
        text: display.clone(),
        color: ink,
        scale: 1,
    });
    let center_scale = if w >= 34.0 && !is_joker { 2 } else { 1 };
    out.push(DrawCmd::Text {
        x: (x + w / 2.0 - text_width(&display, center_scale) as f32 / 2.0).max(0.0) as u32,
        y: (y + h / 2.0 - 3.0 * center_scale as f32).max(0.0) as u32,
        text: display,
        color: ink,
        scale: center_scale,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::LastMove;

    fn player(id: u8, role: Role, hand: &[&str], is_turn: bool) -> PlayerView {
        PlayerView {
            id,
            role,
            hand_count: hand.len(),
            hand: hand.iter().map(|s| s.to_string()).collect(),
            is_turn,
        }
    }

    fn scene() -> DoudizhuScene {
        DoudizhuScene {
            landlord: 1,
            hole_cards: vec!["3".into(), "k".into(), "rj".into()],
            laizi: vec!["3".into()],
            players: vec![
                player(0, Role::Peasant, &["3", "4", "5"], false),
                player(1, Role::Landlord, &["a", "2", "bj"], true),
                player(2, Role::Peasant, &["7", "8"], false),
            ],
            last_move: LastMove {
                player: Some(1),
                cards: vec!["a".into(), "a".into()],
                kind: "pair".into(),
            },
            winner: NO_WINNER,
        }
    }

    #[test]
    fn surface_is_capped_at_800_by_600() {
        let (size, _) = commands(&scene(), 2000, 2000);
        assert_eq!(size, SurfaceSize::new(800, 600));
        let (small, _) = commands(&scene(), 400, 300);
        assert_eq!(small, SurfaceSize::new(400, 300));
    }

    #[test]
    fn every_hand_card_gets_a_body_and_rank() {
        let (_, cmds) = commands(&scene(), 800, 600);
        let card_bodies = cmds
            .iter()
            .filter(|c| {
                matches!(c, DrawCmd::Fill { color, .. } if *color == CARD_BG || *color == LAIZI_BG)
            })
            .count();
        // 3 hole cards + 8 hand cards + 2 last-move cards.
        assert_eq!(card_bodies, 13);
    }

    #[test]
    fn laizi_cards_use_the_tinted_back() {
        let (_, cmds) = commands(&scene(), 800, 600);
        let tinted = cmds
            .iter()
            .filter(|c| matches!(c, DrawCmd::Fill { color, .. } if *color == LAIZI_BG))
            .count();
        // "3" appears in the hole cards and in player 0's hand.
        assert_eq!(tinted, 2);
    }

    #[test]
    fn last_move_is_annotated_with_its_kind() {
        let (_, cmds) = commands(&scene(), 800, 600);
        assert!(cmds
            .iter()
            .any(|c| matches!(c, DrawCmd::Text { text, .. } if text == "PAIR")));
    }

    #[test]
    fn winner_overlay_names_the_role() {
        let mut s = scene();
        s.winner = 1;
        let (_, cmds) = commands(&s, 800, 600);
        assert!(cmds
            .iter()
            .any(|c| matches!(c, DrawCmd::Text { text, .. } if text == "LANDLORD WINS!")));
    }

    #[test]
    fn out_of_range_winner_is_ignored() {
        let mut s = scene();
        s.winner = 7;
        let (_, cmds) = commands(&s, 800, 600);
        assert!(!cmds
            .iter()
            .any(|c| matches!(c, DrawCmd::Text { text, .. } if text.ends_with("WINS!"))));
    }

    #[test]
    fn out_of_range_player_id_falls_back_to_bottom_seat() {
        let mut s = scene();
        s.players.push(player(9, Role::Peasant, &["6"], false));
        let (size, cmds) = commands(&s, 800, 600);
        assert!(!size.is_empty());
        assert!(!cmds.is_empty());
    }
}

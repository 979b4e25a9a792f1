//! Tetris scene renderer: board on the left, preview and stats panel on the
//! right, sized as a fraction of the board cell.

use super::{rect_px, DrawCmd};
use crate::graphics::{Color, Rect};
use crate::scene::TetrisScene;
use crate::surface::SurfaceSize;

// Palette indexed by the backend's piece color. I O T S Z J L.
const PIECE_COLORS: [Color; 7] = [
    [0, 245, 255, 255],
    [255, 255, 0, 255],
    [168, 85, 247, 255],
    [34, 197, 94, 255],
    [239, 68, 68, 255],
    [59, 130, 246, 255],
    [249, 115, 22, 255],
];
const FALLBACK_PIECE: Color = [148, 163, 184, 255];

const BG: Color = [15, 23, 42, 255];
const BORDER: Color = [99, 102, 241, 255];
const WHITE: Color = [255, 255, 255, 255];
const BLACK: Color = [0, 0, 0, 255];
const SCORE_COLOR: Color = [34, 197, 94, 255];
const LINES_COLOR: Color = [249, 115, 22, 255];
const LEVEL_COLOR: Color = [168, 85, 247, 255];

const GHOST_ALPHA: u8 = 77;
const BEVEL_ALPHA: u8 = 77;

fn piece_color(index: i32) -> Color {
    usize::try_from(index)
        .ok()
        .and_then(|i| PIECE_COLORS.get(i).copied())
        .unwrap_or(FALLBACK_PIECE)
}

pub fn commands(scene: &TetrisScene, box_w: u32, box_h: u32) -> (SurfaceSize, Vec<DrawCmd>) {
    if scene.grid.w == 0 || scene.grid.h == 0 {
        return (SurfaceSize::new(0, 0), Vec::new());
    }

    // Size cells as if the board were eight columns wider, then paint a
    // seven-cell panel; the extra cell is breathing room inside the box.
    let cell = (box_w as f32 / (scene.grid.w + 8) as f32).min(box_h as f32 / scene.grid.h as f32);
    let board_w = scene.grid.w as f32 * cell;
    let board_h = scene.grid.h as f32 * cell;
    let size = SurfaceSize::new((board_w + cell * 7.0) as u32, board_h as u32);
    if size.is_empty() {
        return (SurfaceSize::new(0, 0), Vec::new());
    }

    let mut out = Vec::new();
    out.push(DrawCmd::Fill {
        rect: Rect::from_size(size.width, size.height),
        color: BG,
    });
    out.push(DrawCmd::Outline {
        rect: rect_px(0.0, 0.0, board_w, board_h),
        color: BORDER,
    });
    out.push(DrawCmd::Outline {
        rect: rect_px(1.0, 1.0, board_w - 2.0, board_h - 2.0),
        color: BORDER,
    });

    for x in 0..=scene.grid.w {
        out.push(DrawCmd::Blend {
            rect: rect_px(x as f32 * cell, 0.0, 1.0, board_h),
            color: WHITE,
            alpha: 13,
        });
    }
    for y in 0..=scene.grid.h {
        out.push(DrawCmd::Blend {
            rect: rect_px(0.0, y as f32 * cell, board_w, 1.0),
            color: WHITE,
            alpha: 13,
        });
    }

    // Ghost piece first so landed cells paint over it.
    let ghost_color = piece_color(scene.current_piece.color);
    for &[gx, gy] in &scene.ghost_cells {
        if gy < 0 {
            continue;
        }
        out.push(DrawCmd::Blend {
            rect: rect_px(
                gx as f32 * cell + 1.0,
                gy as f32 * cell + 1.0,
                cell - 2.0,
                cell - 2.0,
            ),
            color: ghost_color,
            alpha: GHOST_ALPHA,
        });
    }

    // The board already contains the falling piece.
    for (y, row) in scene.board.iter().enumerate().take(scene.grid.h as usize) {
        for (x, &value) in row.iter().enumerate().take(scene.grid.w as usize) {
            if value < 0 {
                continue;
            }
            let px = x as f32 * cell + 1.0;
            let py = y as f32 * cell + 1.0;
            let side = cell - 2.0;
            out.push(DrawCmd::Fill {
                rect: rect_px(px, py, side, side),
                color: piece_color(value as i32),
            });
            // Beveled edges.
            out.push(DrawCmd::Blend {
                rect: rect_px(px, py, side, 3.0),
                color: WHITE,
                alpha: BEVEL_ALPHA,
            });
            out.push(DrawCmd::Blend {
                rect: rect_px(px, py, 3.0, side),
                color: WHITE,
                alpha: BEVEL_ALPHA,
            });
            out.push(DrawCmd::Blend {
                rect: rect_px(px, py + side - 3.0, side, 3.0),
                color: BLACK,
                alpha: BEVEL_ALPHA,
            });
            out.push(DrawCmd::Blend {
                rect: rect_px(px + side - 3.0, py, 3.0, side),
                color: BLACK,
                alpha: BEVEL_ALPHA,
            });
        }
    }

    side_panel(scene, cell, board_w, &mut out);

    (size, out)
}

fn side_panel(scene: &TetrisScene, cell: f32, board_w: f32, out: &mut Vec<DrawCmd>) {
    let side_x = board_w + cell;

    out.push(DrawCmd::Blend {
        rect: rect_px(side_x, 10.0, cell * 5.0, cell * 5.0),
        color: WHITE,
        alpha: 26,
    });
    out.push(DrawCmd::Text {
        x: (side_x + 10.0) as u32,
        y: 16,
        text: "NEXT".into(),
        color: WHITE,
        scale: 2,
    });

    let next_color = piece_color(scene.next_piece.color);
    let preview = cell * 0.8;
    for &[dx, dy] in &scene.next_piece.cells {
        out.push(DrawCmd::Fill {
            rect: rect_px(
                side_x + cell + dx as f32 * preview,
                42.0 + dy as f32 * preview,
                preview - 2.0,
                preview - 2.0,
            ),
            color: next_color,
        });
    }

    if let Some(hold) = &scene.hold_piece {
        out.push(DrawCmd::Text {
            x: (side_x + 10.0) as u32,
            y: (cell * 5.0 + 18.0) as u32,
            text: format!("HOLD: {hold}"),
            color: WHITE,
            scale: 2,
        });
    }

    let stats = [
        ("SCORE", scene.score.to_string(), SCORE_COLOR, cell * 6.0),
        ("LINES", scene.lines.to_string(), LINES_COLOR, cell * 8.0),
        ("LEVEL", scene.level.to_string(), LEVEL_COLOR, cell * 10.0),
    ];
    for (label, value, color, y) in stats {
        out.push(DrawCmd::Text {
            x: (side_x + 10.0) as u32,
            y: y as u32,
            text: label.into(),
            color: WHITE,
            scale: 2,
        });
        out.push(DrawCmd::Text {
            x: (side_x + 10.0) as u32,
            y: (y + 14.0) as u32,
            text: value,
            color,
            scale: 3,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{ActivePiece, GridSize, PiecePreview};

    fn scene() -> TetrisScene {
        TetrisScene {
            grid: GridSize { w: 10, h: 20 },
            board: vec![vec![-1; 10]; 20],
            current_piece: ActivePiece {
                kind: "I".into(),
                color: 0,
                cells: vec![[4, 0], [5, 0], [6, 0], [7, 0]],
                x: 4,
                y: 0,
                rotation: 0,
            },
            ghost_cells: vec![[4, 19], [5, 19], [6, 19], [7, 19]],
            next_piece: PiecePreview {
                kind: "O".into(),
                color: 1,
                cells: vec![[0, 0], [1, 0], [0, 1], [1, 1]],
            },
            hold_piece: None,
            score: 1200,
            lines: 7,
            level: 2,
        }
    }

    #[test]
    fn surface_includes_the_side_panel() {
        let (size, _) = commands(&scene(), 540, 600);
        // cell = min(540/18, 600/20) = 30; board 300x600, panel 210.
        assert_eq!(size, SurfaceSize::new(510, 600));
    }

    #[test]
    fn ghost_cells_are_blended_not_filled() {
        let mut s = scene();
        // Landed cell in a different palette slot than the falling piece.
        s.board[19][4] = 2;
        let (_, cmds) = commands(&s, 540, 600);
        let ghost = PIECE_COLORS[0];
        let ghost_blends = cmds
            .iter()
            .filter(|c| {
                matches!(c, DrawCmd::Blend { color, alpha, .. }
                    if *color == ghost && *alpha == GHOST_ALPHA)
            })
            .count();
        assert_eq!(ghost_blends, 4);
        assert!(!cmds
            .iter()
            .any(|c| matches!(c, DrawCmd::Fill { color, .. } if *color == ghost)));
        assert!(cmds
            .iter()
            .any(|c| matches!(c, DrawCmd::Fill { color, .. } if *color == PIECE_COLORS[2])));
    }

    #[test]
    fn out_of_palette_color_falls_back() {
        assert_eq!(piece_color(-1), FALLBACK_PIECE);
        assert_eq!(piece_color(99), FALLBACK_PIECE);
        assert_eq!(piece_color(0), PIECE_COLORS[0]);
    }

    #[test]
    fn ragged_board_rows_do_not_panic() {
        let mut s = scene();
        // Backend claims 10 columns but a row is short.
        s.board[5] = vec![0, 1];
        let (size, cmds) = commands(&s, 540, 600);
        assert!(!size.is_empty());
        assert!(!cmds.is_empty());
    }

    #[test]
    fn hold_piece_adds_a_label() {
        let mut s = scene();
        s.hold_piece = Some("T".into());
        let (_, cmds) = commands(&s, 540, 600);
        assert!(cmds.iter().any(
            |c| matches!(c, DrawCmd::Text { text, .. } if text == "HOLD: T")
        ));
    }

    #[test]
    fn stats_render_label_and_value() {
        let (_, cmds) = commands(&scene(), 540, 600);
        for needle in ["SCORE", "1200", "LINES", "7", "LEVEL", "2"] {
            assert!(
                cmds.iter()
                    .any(|c| matches!(c, DrawCmd::Text { text, .. } if text == needle)),
                "missing {needle}"
            );
        }
    }
}

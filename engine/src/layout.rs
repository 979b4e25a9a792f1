//! Pure layout math: display-box sizing and the adaptive multi-row card
//! hand layout used by the Doudizhu renderer.

/// Width of the collapsible settings side panel, in CSS-ish pixels.
pub const SIDE_PANEL_W: u32 = 288;

const MIN_CONTAINER_W: u32 = 320;
const MIN_CONTAINER_H: u32 = 420;
const MAX_CONTAINER_W: u32 = 980;
const MAX_CONTAINER_H: u32 = 900;
const H_MARGIN: u32 = 80;
const V_MARGIN: u32 = 140;

pub const MIN_SCALE_PERCENT: u32 = 50;
pub const MAX_SCALE_PERCENT: u32 = 160;

/// Usable drawing box for a given viewport: viewport minus side panel and
/// margins, clamped so the canvas never collapses below a usable minimum.
pub fn container_box(viewport_w: u32, viewport_h: u32, show_panel: bool) -> (u32, u32) {
    let panel = if show_panel { SIDE_PANEL_W } else { 0 };
    let w = viewport_w
        .saturating_sub(panel + H_MARGIN)
        .clamp(MIN_CONTAINER_W, MAX_CONTAINER_W);
    let h = viewport_h
        .saturating_sub(V_MARGIN)
        .clamp(MIN_CONTAINER_H, MAX_CONTAINER_H);
    (w, h)
}

/// `floor(container * scale / 100)` on both axes.
pub fn scaled_box(container_w: u32, container_h: u32, scale_percent: u32) -> (u32, u32) {
    (
        container_w * scale_percent / 100,
        container_h * scale_percent / 100,
    )
}

pub fn clamp_scale(scale_percent: u32) -> u32 {
    scale_percent.clamp(MIN_SCALE_PERCENT, MAX_SCALE_PERCENT)
}

// Card geometry. Base sizes are tuned for readability and adapted down when
// space is tight.
pub const BASE_CARD_W: f32 = 40.0;
pub const BASE_CARD_H: f32 = 56.0;
const MIN_CARD_W: f32 = 22.0;
const MIN_CARD_H: f32 = 30.0;
const MIN_SPACING: f32 = 6.0;
const MAX_SPACING: f32 = 16.0;
const DESIRED_ROW_GAP: f32 = 8.0;
const MIN_ROW_GAP: f32 = 4.0;
const TWO_ROW_THRESHOLD: usize = 14;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandLayout {
    pub card_w: f32,
    pub card_h: f32,
    /// Horizontal step between card left edges; may be smaller than the
    /// card width, in which case cards overlap like a held fan.
    pub spacing: f32,
    pub rows: u32,
    pub cards_per_row: u32,
    pub row_gap: f32,
}

impl HandLayout {
    pub const EMPTY: HandLayout = HandLayout {
        card_w: 0.0,
        card_h: 0.0,
        spacing: 0.0,
        rows: 0,
        cards_per_row: 0,
        row_gap: 0.0,
    };

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// Occupied size of the widest row / all rows together.
    pub fn total_size(&self) -> (f32, f32) {
        if self.is_empty() {
            return (0.0, 0.0);
        }
        let w = (self.cards_per_row.saturating_sub(1)) as f32 * self.spacing + self.card_w;
        let h = self.rows as f32 * self.card_h + (self.rows - 1) as f32 * self.row_gap;
        (w, h)
    }

    /// Offset of card `idx` relative to the layout origin (top-left of the
    /// first row). Cards wrap to the second row at `cards_per_row`.
    pub fn card_offset(&self, idx: usize) -> (f32, f32) {
        let per_row = self.cards_per_row.max(1) as usize;
        let (row, col) = if self.rows == 2 && idx >= per_row {
            (1usize, idx - per_row)
        } else {
            (0usize, idx)
        };
        (
            col as f32 * self.spacing,
            row as f32 * (self.card_h + self.row_gap),
        )
    }
}

/// Lays out `count` cards inside a `(max_w, max_h)` box.
///
/// Spacing is solved first assuming the base card width, then the actual
/// card width is derived from the chosen spacing. Two guarantees beyond the
/// legacy clamps: the widest row never exceeds `max_w` (spacing drops below
/// its floor before cards would overflow) and the stacked rows never exceed
/// `max_h` (row gap shrinks first, card height second).
pub fn compute_hand_layout(count: usize, max_w: f32, max_h: f32) -> HandLayout {
    if count == 0 {
        return HandLayout::EMPTY;
    }

    let rows: u32 = if count > TWO_ROW_THRESHOLD { 2 } else { 1 };
    let cards_per_row: u32 = if rows == 2 {
        count.div_ceil(2) as u32
    } else {
        count as u32
    };

    let available_w = max_w.max(120.0);
    let gaps = (cards_per_row - 1) as f32;

    let mut spacing = if cards_per_row <= 1 {
        MAX_SPACING
    } else {
        ((available_w - BASE_CARD_W) / gaps).clamp(MIN_SPACING, MAX_SPACING)
    };

    let card_w = (available_w - spacing * gaps).clamp(MIN_CARD_W, BASE_CARD_W);

    // The width clamp can push the row past the box; overlap cards to fit.
    if cards_per_row > 1 {
        spacing = spacing.min((available_w - card_w) / gaps);
    }

    let mut card_h = (card_w * (BASE_CARD_H / BASE_CARD_W)).clamp(MIN_CARD_H, BASE_CARD_H);
    let mut row_gap = DESIRED_ROW_GAP;
    let stack_h = |card_h: f32, row_gap: f32| rows as f32 * card_h + (rows - 1) as f32 * row_gap;

    if stack_h(card_h, row_gap) > max_h {
        row_gap = MIN_ROW_GAP;
    }
    if stack_h(card_h, row_gap) > max_h {
        card_h = ((max_h - (rows - 1) as f32 * row_gap) / rows as f32).max(1.0);
    }

    HandLayout {
        card_w,
        card_h,
        spacing,
        rows,
        cards_per_row,
        row_gap,
    }
}

/// Screen position of each of the three seats around the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeatAlign {
    Left,
    Right,
    Bottom,
}

pub fn seat_align(player_id: u8) -> SeatAlign {
    match player_id {
        0 => SeatAlign::Left,
        1 => SeatAlign::Right,
        _ => SeatAlign::Bottom,
    }
}

/// Anchor point the seat's hand and avatar are arranged around.
pub fn seat_anchor(align: SeatAlign, container_w: f32, container_h: f32) -> (f32, f32) {
    match align {
        SeatAlign::Left => (80.0, container_h / 2.0),
        SeatAlign::Right => (container_w - 80.0, container_h / 2.0),
        SeatAlign::Bottom => (container_w / 2.0, container_h - 80.0),
    }
}

/// Box the seat's hand layout must fit into. The bottom seat (the agent's
/// own hand) gets the widest region.
pub fn seat_region(align: SeatAlign, container_w: f32, _container_h: f32) -> (f32, f32) {
    match align {
        SeatAlign::Bottom => ((container_w - 200.0).min(760.0).max(120.0), 140.0),
        SeatAlign::Left | SeatAlign::Right => {
            ((container_w / 2.0 - 140.0).min(360.0).max(120.0), 120.0)
        }
    }
}

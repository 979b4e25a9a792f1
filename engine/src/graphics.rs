//! CPU pixel painter.
//!
//! All functions draw into a raw RGBA byte buffer described by a
//! [`SurfaceSize`]. Everything clips against the buffer bounds, so callers
//! may pass geometry that hangs off the edge without checking first.

use crate::surface::SurfaceSize;

pub type Color = [u8; 4];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    pub fn from_size(w: u32, h: u32) -> Self {
        Self { x: 0, y: 0, w, h }
    }
}

pub fn fill_rect(frame: &mut [u8], size: SurfaceSize, rect: Rect, color: Color) {
    let Some((x0, y0, x1, y1, stride)) = clip(frame, size, rect) else {
        return;
    };

    let row_bytes = (x1 - x0) as usize * 4;
    let mut row_start = y0 as usize * stride + x0 as usize * 4;
    let [r, g, b, a] = color;
    for _ in y0..y1 {
        let row = &mut frame[row_start..row_start + row_bytes];
        for px in row.chunks_exact_mut(4) {
            px[0] = r;
            px[1] = g;
            px[2] = b;
            px[3] = a;
        }
        row_start += stride;
    }
}

/// Alpha-blends `color` over the existing content; the destination stays opaque.
pub fn blend_rect(frame: &mut [u8], size: SurfaceSize, rect: Rect, color: Color, alpha: u8) {
    if alpha == 0 {
        return;
    }
    if alpha == 255 {
        fill_rect(frame, size, rect, color);
        return;
    }
    let Some((x0, y0, x1, y1, stride)) = clip(frame, size, rect) else {
        return;
    };

    let a = alpha as u32;
    let inv = 255u32 - a;
    let row_bytes = (x1 - x0) as usize * 4;
    let mut row_start = y0 as usize * stride + x0 as usize * 4;
    for _ in y0..y1 {
        let row = &mut frame[row_start..row_start + row_bytes];
        for px in row.chunks_exact_mut(4) {
            px[0] = ((px[0] as u32 * inv + color[0] as u32 * a + 127) / 255) as u8;
            px[1] = ((px[1] as u32 * inv + color[1] as u32 * a + 127) / 255) as u8;
            px[2] = ((px[2] as u32 * inv + color[2] as u32 * a + 127) / 255) as u8;
            px[3] = 255;
        }
        row_start += stride;
    }
}

pub fn rect_outline(frame: &mut [u8], size: SurfaceSize, rect: Rect, color: Color) {
    if rect.w == 0 || rect.h == 0 {
        return;
    }
    let x1 = rect.x.saturating_add(rect.w);
    let y1 = rect.y.saturating_add(rect.h);

    fill_rect(frame, size, Rect::new(rect.x, rect.y, rect.w, 1), color);
    if rect.h > 1 {
        fill_rect(frame, size, Rect::new(rect.x, y1 - 1, rect.w, 1), color);
    }
    fill_rect(frame, size, Rect::new(rect.x, rect.y, 1, rect.h), color);
    if rect.w > 1 {
        fill_rect(frame, size, Rect::new(x1 - 1, rect.y, 1, rect.h), color);
    }
}

/// Filled disc, drawn one horizontal span per row.
pub fn fill_disc(frame: &mut [u8], size: SurfaceSize, cx: i32, cy: i32, radius: u32, color: Color) {
    let r = radius as i32;
    for dy in -r..=r {
        let span = ((r * r - dy * dy) as f32).sqrt() as i32;
        let y = cy + dy;
        if y < 0 {
            continue;
        }
        let x0 = (cx - span).max(0);
        let x1 = cx + span + 1;
        if x1 <= x0 {
            continue;
        }
        let rect = Rect::new(x0 as u32, y as u32, (x1 - x0) as u32, 1);
        fill_rect(frame, size, rect, color);
    }
}

/// Nearest-neighbor copy of a source RGBA image into a destination rect.
pub fn blit_scaled(
    frame: &mut [u8],
    size: SurfaceSize,
    src: &[u8],
    src_size: SurfaceSize,
    dst: Rect,
) {
    if src_size.is_empty() || dst.w == 0 || dst.h == 0 || src.len() < src_size.rgba_len() {
        return;
    }
    let max_x = dst.x.saturating_add(dst.w).min(size.width);
    let max_y = dst.y.saturating_add(dst.h).min(size.height);
    if dst.x >= max_x || dst.y >= max_y {
        return;
    }

    let stride = size.width as usize * 4;
    let src_stride = src_size.width as usize * 4;
    for y in dst.y..max_y {
        let sy = ((y - dst.y) as u64 * src_size.height as u64 / dst.h as u64) as usize;
        let src_row = &src[sy * src_stride..sy * src_stride + src_stride];
        let dst_row_start = y as usize * stride;
        for x in dst.x..max_x {
            let sx = ((x - dst.x) as u64 * src_size.width as u64 / dst.w as u64) as usize;
            let di = dst_row_start + x as usize * 4;
            if di + 4 <= frame.len() {
                frame[di..di + 4].copy_from_slice(&src_row[sx * 4..sx * 4 + 4]);
            }
        }
    }
}

/// Straight 1:1 copy of a source image at an offset, clipped to the target.
pub fn blit(frame: &mut [u8], size: SurfaceSize, src: &[u8], src_size: SurfaceSize, x: u32, y: u32) {
    if src_size.is_empty() || src.len() < src_size.rgba_len() {
        return;
    }
    let copy_w = src_size.width.min(size.width.saturating_sub(x)) as usize;
    let copy_h = src_size.height.min(size.height.saturating_sub(y));
    if copy_w == 0 {
        return;
    }
    let stride = size.width as usize * 4;
    let src_stride = src_size.width as usize * 4;
    for row in 0..copy_h as usize {
        let si = row * src_stride;
        let di = (y as usize + row) * stride + x as usize * 4;
        if di + copy_w * 4 <= frame.len() {
            frame[di..di + copy_w * 4].copy_from_slice(&src[si..si + copy_w * 4]);
        }
    }
}

/// `h` in degrees, `s`/`l` in `[0, 1]`.
pub fn hsl_to_rgba(h: f32, s: f32, l: f32) -> Color {
    let h = h.rem_euclid(360.0);
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - ((h / 60.0).rem_euclid(2.0) - 1.0).abs());
    let m = l - c / 2.0;
    let (r, g, b) = match h {
        h if h < 60.0 => (c, x, 0.0),
        h if h < 120.0 => (x, c, 0.0),
        h if h < 180.0 => (0.0, c, x),
        h if h < 240.0 => (0.0, x, c),
        h if h < 300.0 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    [
        ((r + m) * 255.0).round() as u8,
        ((g + m) * 255.0).round() as u8,
        ((b + m) * 255.0).round() as u8,
        255,
    ]
}

// A tiny 3x5 block font; enough for digits, card ranks and HUD labels.
pub const DEFAULT_TEXT_SCALE: u32 = 2;
const GLYPH_W: u32 = 3;
const GLYPH_H: u32 = 5;

pub fn glyph_advance_x(scale: u32) -> u32 {
    (GLYPH_W + 1) * scale.max(1)
}

pub fn text_width(text: &str, scale: u32) -> u32 {
    text.chars().count() as u32 * glyph_advance_x(scale)
}

pub fn draw_text(frame: &mut [u8], size: SurfaceSize, x: u32, y: u32, text: &str, color: Color) {
    draw_text_scaled(frame, size, x, y, text, color, DEFAULT_TEXT_SCALE);
}

pub fn draw_text_scaled(
    frame: &mut [u8],
    size: SurfaceSize,
    x: u32,
    y: u32,
    text: &str,
    color: Color,
    scale: u32,
) {
    let scale = scale.max(1);
    let adv_x = glyph_advance_x(scale);
    let adv_y = (GLYPH_H + 1) * scale;

    let mut cursor_x = x;
    let mut cursor_y = y;
    for ch in text.chars() {
        match ch {
            '\n' => {
                cursor_x = x;
                cursor_y = cursor_y.saturating_add(adv_y);
                if cursor_y >= size.height {
                    break;
                }
                continue;
            }
            ' ' => {
                cursor_x = cursor_x.saturating_add(adv_x);
                if cursor_x >= size.width {
                    break;
                }
                continue;
            }
            _ => {}
        }

        draw_char(frame, size, cursor_x, cursor_y, ch, color, scale);
        cursor_x = cursor_x.saturating_add(adv_x);
        if cursor_x >= size.width {
            break;
        }
    }
}

fn draw_char(
    frame: &mut [u8],
    size: SurfaceSize,
    x: u32,
    y: u32,
    ch: char,
    color: Color,
    scale: u32,
) {
    let rows = glyph_rows(ch);
    for (row, bits) in rows.into_iter().enumerate() {
        let py0 = y.saturating_add(row as u32 * scale);
        for col in 0..GLYPH_W {
            let mask = 1u8 << (GLYPH_W - 1 - col);
            if bits & mask == 0 {
                continue;
            }
            let px0 = x.saturating_add(col * scale);
            fill_rect(frame, size, Rect::new(px0, py0, scale, scale), color);
        }
    }
}

fn glyph_rows(ch: char) -> [u8; GLYPH_H as usize] {
    let c = ch.to_ascii_uppercase();
    match c {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b001, 0b001, 0b001],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],

        'A' => [0b010, 0b101, 0b111, 0b101, 0b101],
        'B' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'C' => [0b111, 0b100, 0b100, 0b100, 0b111],
        'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'E' => [0b111, 0b100, 0b111, 0b100, 0b111],
        'F' => [0b111, 0b100, 0b111, 0b100, 0b100],
        'G' => [0b111, 0b100, 0b101, 0b101, 0b111],
        'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'J' => [0b111, 0b001, 0b001, 0b101, 0b010],
        'K' => [0b101, 0b110, 0b100, 0b110, 0b101],
        'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'M' => [0b101, 0b111, 0b111, 0b101, 0b101],
        'N' => [0b101, 0b111, 0b111, 0b111, 0b101],
        'O' => [0b111, 0b101, 0b101, 0b101, 0b111],
        'P' => [0b111, 0b101, 0b111, 0b100, 0b100],
        'Q' => [0b111, 0b101, 0b101, 0b111, 0b001],
        'R' => [0b111, 0b101, 0b111, 0b110, 0b101],
        'S' => [0b111, 0b100, 0b111, 0b001, 0b111],
        'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'V' => [0b101, 0b101, 0b101, 0b101, 0b010],
        'W' => [0b101, 0b101, 0b111, 0b111, 0b101],
        'X' => [0b101, 0b101, 0b010, 0b101, 0b101],
        'Y' => [0b101, 0b101, 0b010, 0b010, 0b010],
        'Z' => [0b111, 0b001, 0b010, 0b100, 0b111],

        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        ',' => [0b000, 0b000, 0b000, 0b010, 0b100],
        ':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        '%' => [0b101, 0b001, 0b010, 0b100, 0b101],
        '(' => [0b010, 0b100, 0b100, 0b100, 0b010],
        ')' => [0b010, 0b001, 0b001, 0b001, 0b010],
        '!' => [0b010, 0b010, 0b010, 0b000, 0b010],
        '/' => [0b001, 0b001, 0b010, 0b100, 0b100],
        '+' => [0b000, 0b010, 0b111, 0b010, 0b000],

        _ => [0b111, 0b001, 0b010, 0b000, 0b010], // '?'
    }
}

fn clip(frame: &[u8], size: SurfaceSize, rect: Rect) -> Option<(u32, u32, u32, u32, usize)> {
    let x1 = rect.x.saturating_add(rect.w).min(size.width);
    let y1 = rect.y.saturating_add(rect.h).min(size.height);
    if rect.x >= x1 || rect.y >= y1 || frame.len() < size.rgba_len() || size.rgba_len() == 0 {
        return None;
    }
    Some((rect.x, rect.y, x1, y1, size.width as usize * 4))
}

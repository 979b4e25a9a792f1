//! Scene rendering as data.
//!
//! Each game module turns a scene snapshot into a target surface size plus a
//! flat list of [`DrawCmd`]s; [`execute`] is the only place commands touch
//! pixels. Keeping the builders pure makes the renderers testable without a
//! surface and lets callers log or diff what a frame will contain.

pub mod doudizhu;
pub mod snake;
pub mod tetris;

use serde::{Deserialize, Serialize};

use crate::graphics::{self, Color, Rect};
use crate::scene::GameScene;
use crate::surface::{Canvas, SurfaceSize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCmd {
    Fill {
        rect: Rect,
        color: Color,
    },
    Blend {
        rect: Rect,
        color: Color,
        alpha: u8,
    },
    Outline {
        rect: Rect,
        color: Color,
    },
    Disc {
        cx: i32,
        cy: i32,
        radius: u32,
        color: Color,
    },
    Text {
        x: u32,
        y: u32,
        text: String,
        color: Color,
        scale: u32,
    },
}

/// Builds the command list for any scene the backend can send.
pub fn scene_commands(scene: &GameScene, box_w: u32, box_h: u32) -> (SurfaceSize, Vec<DrawCmd>) {
    match scene {
        GameScene::Snake(s) => snake::commands(s, box_w, box_h),
        GameScene::Tetris(s) => tetris::commands(s, box_w, box_h),
        GameScene::Doudizhu(s) => doudizhu::commands(s, box_w, box_h),
    }
}

pub fn execute(frame: &mut [u8], size: SurfaceSize, commands: &[DrawCmd]) {
    for cmd in commands {
        match cmd {
            DrawCmd::Fill { rect, color } => graphics::fill_rect(frame, size, *rect, *color),
            DrawCmd::Blend { rect, color, alpha } => {
                graphics::blend_rect(frame, size, *rect, *color, *alpha)
            }
            DrawCmd::Outline { rect, color } => graphics::rect_outline(frame, size, *rect, *color),
            DrawCmd::Disc {
                cx,
                cy,
                radius,
                color,
            } => graphics::fill_disc(frame, size, *cx, *cy, *radius, *color),
            DrawCmd::Text {
                x,
                y,
                text,
                color,
                scale,
            } => graphics::draw_text_scaled(frame, size, *x, *y, text, *color, *scale),
        }
    }
}

/// Resizes the canvas to the scene's computed size and repaints it.
pub fn render_scene(canvas: &mut Canvas, scene: &GameScene, box_w: u32, box_h: u32) -> SurfaceSize {
    let (size, commands) = scene_commands(scene, box_w, box_h);
    canvas.resize(size);
    let frame_size = canvas.size();
    execute(canvas.frame_mut(), frame_size, &commands);
    size
}

/// Converts float geometry to a pixel rect, trimming the parts that fall
/// left of or above the origin so negative placement clips instead of wrapping.
pub(crate) fn rect_px(x: f32, y: f32, w: f32, h: f32) -> Rect {
    let x0 = x.max(0.0);
    let y0 = y.max(0.0);
    let w = (w - (x0 - x)).max(0.0);
    let h = (h - (y0 - y)).max(0.0);
    Rect::new(x0 as u32, y0 as u32, w.round() as u32, h.round() as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_px_trims_negative_origin() {
        let r = rect_px(-4.0, -2.0, 10.0, 6.0);
        assert_eq!(r, Rect::new(0, 0, 6, 4));
    }

    #[test]
    fn rect_px_drops_fully_negative_geometry() {
        let r = rect_px(-20.0, 0.0, 10.0, 5.0);
        assert_eq!(r.w, 0);
    }

    #[test]
    fn execute_paints_fill_then_text_without_panicking() {
        let size = SurfaceSize::new(32, 16);
        let mut frame = vec![0u8; size.rgba_len()];
        let commands = vec![
            DrawCmd::Fill {
                rect: Rect::from_size(32, 16),
                color: [10, 20, 30, 255],
            },
            DrawCmd::Text {
                x: 2,
                y: 2,
                text: "OK".into(),
                color: [255, 255, 255, 255],
                scale: 1,
            },
        ];
        execute(&mut frame, size, &commands);
        assert_eq!(&frame[0..4], &[10, 20, 30, 255]);
    }
}

//! Snake scene renderer.

use super::{rect_px, DrawCmd};
use crate::graphics::{hsl_to_rgba, Color, Rect};
use crate::scene::SnakeScene;
use crate::surface::SurfaceSize;

const BG: Color = [15, 23, 42, 255];
const GRID_LINE: Color = [255, 255, 255, 255];
const GRID_LINE_ALPHA: u8 = 20;
const FOOD: Color = [255, 0, 85, 255];
const FOOD_HIGHLIGHT: Color = [255, 153, 187, 255];
const HEAD: Color = [0, 255, 255, 255];
const EYE: Color = [0, 0, 0, 255];

pub fn commands(scene: &SnakeScene, box_w: u32, box_h: u32) -> (SurfaceSize, Vec<DrawCmd>) {
    if scene.grid.w == 0 || scene.grid.h == 0 {
        return (SurfaceSize::new(0, 0), Vec::new());
    }

    let cell = (box_w as f32 / scene.grid.w as f32).min(box_h as f32 / scene.grid.h as f32);
    let size = SurfaceSize::new(
        (scene.grid.w as f32 * cell) as u32,
        (scene.grid.h as f32 * cell) as u32,
    );
    if size.is_empty() {
        return (SurfaceSize::new(0, 0), Vec::new());
    }

    let mut out = Vec::new();
    out.push(DrawCmd::Fill {
        rect: Rect::from_size(size.width, size.height),
        color: BG,
    });

    for x in 0..=scene.grid.w {
        out.push(DrawCmd::Blend {
            rect: rect_px(x as f32 * cell, 0.0, 1.0, size.height as f32),
            color: GRID_LINE,
            alpha: GRID_LINE_ALPHA,
        });
    }
    for y in 0..=scene.grid.h {
        out.push(DrawCmd::Blend {
            rect: rect_px(0.0, y as f32 * cell, size.width as f32, 1.0),
            color: GRID_LINE,
            alpha: GRID_LINE_ALPHA,
        });
    }

    // Food with a small specular highlight.
    let fx = scene.food[0] as f32 * cell + cell / 2.0;
    let fy = scene.food[1] as f32 * cell + cell / 2.0;
    let radius = (cell / 2.0 - 2.0).max(1.0) as u32;
    out.push(DrawCmd::Disc {
        cx: fx as i32,
        cy: fy as i32,
        radius,
        color: FOOD,
    });
    out.push(DrawCmd::Disc {
        cx: (fx - cell / 6.0) as i32,
        cy: (fy - cell / 6.0) as i32,
        radius: (radius / 3).max(1),
        color: FOOD_HIGHLIGHT,
    });

    for (idx, segment) in scene.snake.iter().enumerate() {
        let x = segment[0] as f32 * cell;
        let y = segment[1] as f32 * cell;
        let side = cell - 1.0;
        if idx == 0 {
            out.push(DrawCmd::Fill {
                rect: rect_px(x + 0.5, y + 0.5, side, side),
                color: HEAD,
            });
            let eye = cell / 5.0;
            out.push(DrawCmd::Fill {
                rect: rect_px(x + cell / 4.0, y + cell / 4.0, eye, eye),
                color: EYE,
            });
            out.push(DrawCmd::Fill {
                rect: rect_px(x + cell * 3.0 / 4.0 - eye, y + cell / 4.0, eye, eye),
                color: EYE,
            });
        } else {
            // Body shifts hue along its length.
            let hue = (140 + idx * 5) % 360;
            out.push(DrawCmd::Fill {
                rect: rect_px(x + 0.5, y + 0.5, side, side),
                color: hsl_to_rgba(hue as f32, 0.8, 0.6),
            });
        }
    }

    (size, out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::GridSize;

    fn scene() -> SnakeScene {
        SnakeScene {
            grid: GridSize { w: 10, h: 10 },
            snake: vec![[5, 5], [5, 6], [5, 7]],
            food: [2, 3],
            score: 3,
            direction: 0,
        }
    }

    #[test]
    fn surface_keeps_the_grid_aspect() {
        let (size, _) = commands(&scene(), 300, 200);
        // 10x10 grid in 300x200 -> 20px cells.
        assert_eq!(size, SurfaceSize::new(200, 200));
    }

    #[test]
    fn zero_grid_produces_nothing() {
        let mut s = scene();
        s.grid = GridSize { w: 0, h: 10 };
        let (size, cmds) = commands(&s, 300, 200);
        assert!(size.is_empty());
        assert!(cmds.is_empty());
    }

    #[test]
    fn head_is_cyan_and_body_is_not() {
        let (_, cmds) = commands(&scene(), 200, 200);
        let fills: Vec<_> = cmds
            .iter()
            .filter_map(|c| match c {
                DrawCmd::Fill { rect, color } => Some((*rect, *color)),
                _ => None,
            })
            .collect();
        assert!(fills.iter().any(|&(_, color)| color == HEAD));
        // Body hue 145 at 80%/60% is green-ish, never pure cyan.
        let body_fills = fills.iter().filter(|&&(_, c)| c != HEAD && c != EYE && c != BG);
        assert!(body_fills.count() >= 2);
    }

    #[test]
    fn out_of_grid_food_still_renders_safely() {
        let mut s = scene();
        s.food = [-3, 50];
        let (size, cmds) = commands(&s, 200, 200);
        assert!(!size.is_empty());
        // Command list still built; the executor clips the disc away.
        assert!(cmds.iter().any(|c| matches!(c, DrawCmd::Disc { .. })));
    }
}

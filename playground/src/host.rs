//! Glue between the session, the tick scheduler, and the offscreen canvas.
//!
//! The host is deliberately synchronous and network-free: the event loop
//! feeds it keys, the clock, and the session's latest [`RenderView`], and it
//! answers with actions to send and a repainted canvas to present.

use std::time::{Duration, Instant};

use engine::draw::render_scene;
use engine::graphics::Rect;
use engine::layout::{clamp_scale, container_box, scaled_box};
use engine::scene::GameId;
use engine::surface::{Canvas, SurfaceSize};
use winit::event::VirtualKeyCode;

use crate::actions::{consumes_unmapped_keys, map_key};
use crate::frame::decode_frame;
use crate::scheduler::TickScheduler;
use crate::session::RenderView;
use crate::settings::PlayerSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyOutcome {
    pub action: Option<i32>,
    /// Whether the key should be withheld from other handlers.
    pub consumed: bool,
}

pub struct CanvasHost {
    canvas: Canvas,
    scheduler: TickScheduler,
    settings: PlayerSettings,
    viewport: (u32, u32),
    show_panel: bool,
}

impl CanvasHost {
    pub fn new(settings: PlayerSettings) -> Self {
        Self {
            canvas: Canvas::new(SurfaceSize::new(0, 0)),
            scheduler: TickScheduler::new(),
            settings,
            viewport: (1200, 800),
            show_panel: true,
        }
    }

    pub fn settings(&self) -> &PlayerSettings {
        &self.settings
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.viewport = (width, height);
    }

    pub fn set_show_panel(&mut self, show: bool) {
        self.show_panel = show;
    }

    pub fn scale_percent(&self) -> u32 {
        self.settings.display_scale_percent
    }

    /// Nudges the display scale, staying inside the supported range.
    pub fn adjust_scale(&mut self, delta: i32) {
        let current = self.settings.display_scale_percent as i64;
        let next = (current + delta as i64).clamp(0, u32::MAX as i64) as u32;
        self.settings.display_scale_percent = clamp_scale(next);
    }

    /// Pixel box scenes and frames are laid out against.
    pub fn display_box(&self) -> (u32, u32) {
        let (cw, ch) = container_box(self.viewport.0, self.viewport.1, self.show_panel);
        scaled_box(cw, ch, self.settings.display_scale_percent)
    }

    pub fn sync_scheduler(&mut self, active_game: Option<GameId>, now: Instant) {
        let active = active_game.map(|game| (game, self.settings.speed(game)));
        self.scheduler.sync(active, now);
    }

    pub fn poll_tick(&mut self, now: Instant) -> Option<i32> {
        self.scheduler.poll(now)
    }

    pub fn time_to_next_tick(&self, now: Instant) -> Option<Duration> {
        self.scheduler.time_to_next(now)
    }

    /// Maps a key press while a session is playing.
    pub fn handle_key(&self, game: GameId, playing: bool, key: VirtualKeyCode) -> KeyOutcome {
        if !playing {
            return KeyOutcome {
                action: None,
                consumed: false,
            };
        }
        let action = map_key(game, key);
        KeyOutcome {
            consumed: action.is_some() || consumes_unmapped_keys(game),
            action,
        }
    }

    /// Repaints the canvas from the session's latest view and returns the
    /// new canvas size.
    pub fn render(&mut self, view: &RenderView) -> SurfaceSize {
        let (box_w, box_h) = self.display_box();
        match view {
            RenderView::Scene(scene) => render_scene(&mut self.canvas, scene, box_w, box_h),
            RenderView::Frame(encoded) => {
                let target = SurfaceSize::new(box_w, box_h);
                self.canvas.resize(target);
                match decode_frame(encoded) {
                    Ok(image) => {
                        let size = self.canvas.size();
                        engine::graphics::blit_scaled(
                            self.canvas.frame_mut(),
                            size,
                            &image.rgba,
                            image.size,
                            Rect::from_size(box_w, box_h),
                        );
                    }
                    Err(err) => {
                        eprintln!("frame decode failed: {err}");
                    }
                }
                target
            }
            RenderView::Empty => {
                let target = SurfaceSize::new(box_w, box_h);
                self.canvas.resize(target);
                target
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine::scene::{GameScene, GridSize, SnakeScene};

    fn host() -> CanvasHost {
        CanvasHost::new(PlayerSettings::default())
    }

    #[test]
    fn keys_are_ignored_while_not_playing() {
        let outcome = host().handle_key(GameId::Tetris, false, VirtualKeyCode::Left);
        assert_eq!(
            outcome,
            KeyOutcome {
                action: None,
                consumed: false
            }
        );
    }

    #[test]
    fn tetris_consumes_even_unmapped_keys_while_playing() {
        let h = host();
        let mapped = h.handle_key(GameId::Tetris, true, VirtualKeyCode::Left);
        assert_eq!(mapped.action, Some(0));
        assert!(mapped.consumed);

        let unmapped = h.handle_key(GameId::Tetris, true, VirtualKeyCode::Q);
        assert_eq!(unmapped.action, None);
        assert!(unmapped.consumed);

        let snake_unmapped = h.handle_key(GameId::Snake, true, VirtualKeyCode::Q);
        assert!(!snake_unmapped.consumed);
    }

    #[test]
    fn display_box_tracks_viewport_panel_and_scale() {
        let mut h = host();
        h.set_viewport(1200, 800);
        assert_eq!(h.display_box(), (832, 660));

        h.set_show_panel(false);
        assert_eq!(h.display_box(), (980, 660));

        h.adjust_scale(-50);
        assert_eq!(h.scale_percent(), 50);
        assert_eq!(h.display_box(), (490, 330));
    }

    #[test]
    fn adjust_scale_clamps_to_supported_range() {
        let mut h = host();
        h.adjust_scale(1000);
        assert_eq!(h.scale_percent(), 160);
        h.adjust_scale(-1000);
        assert_eq!(h.scale_percent(), 50);
    }

    #[test]
    fn scheduler_only_arms_for_a_playing_tick_game() {
        let mut h = host();
        let now = Instant::now();

        h.sync_scheduler(Some(GameId::Snake), now);
        assert_eq!(h.poll_tick(now + Duration::from_millis(120)), Some(-1));

        h.sync_scheduler(None, now);
        assert_eq!(h.poll_tick(now + Duration::from_secs(10)), None);
    }

    #[test]
    fn rendering_a_scene_resizes_the_canvas() {
        let mut h = host();
        h.set_viewport(1200, 800);
        let view = RenderView::Scene(GameScene::Snake(SnakeScene {
            grid: GridSize { w: 10, h: 10 },
            snake: vec![[1, 1]],
            food: [2, 2],
            score: 0,
            direction: 0,
        }));
        let size = h.render(&view);
        // Square grid in a 832x660 box -> 66px cells.
        assert_eq!(size, SurfaceSize::new(660, 660));
        assert_eq!(h.canvas().size(), size);
    }

    #[test]
    fn empty_view_clears_to_the_display_box() {
        let mut h = host();
        h.set_viewport(1200, 800);
        let size = h.render(&RenderView::Empty);
        assert_eq!(size, SurfaceSize::new(832, 660));
        assert!(h.canvas().frame().iter().all(|&b| b == 0));
    }

    #[test]
    fn undecodable_frame_leaves_a_blank_canvas() {
        let mut h = host();
        h.set_viewport(1200, 800);
        let size = h.render(&RenderView::Frame("!!garbage!!".into()));
        assert_eq!(size, SurfaceSize::new(832, 660));
        assert!(h.canvas().frame().iter().all(|&b| b == 0));
    }
}

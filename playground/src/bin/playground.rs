use std::env;
use std::time::{Duration, Instant};

use pixels::{Pixels, SurfaceTexture};
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, Event, KeyboardInput, VirtualKeyCode, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

use engine::graphics::{draw_text, Color};
use engine::scene::GameId;
use engine::surface::SurfaceSize;
use playground::backend::{resolve_backend_url, BackendClient};
use playground::host::CanvasHost;
use playground::session::{SessionController, SessionStatus};
use playground::settings::SettingsStore;

const HUD_TEXT: Color = [226, 232, 240, 255];
const HUD_WARN: Color = [248, 113, 113, 255];
const HEALTH_POLL_INTERVAL: Duration = Duration::from_secs(5);

fn resolve_game(args: &[String]) -> GameId {
    args.iter()
        .find_map(|arg| GameId::parse(arg))
        .unwrap_or(GameId::Snake)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().skip(1).collect();
    let game = resolve_game(&args);

    let store = SettingsStore::from_env();
    let settings = store.load();

    let rt = tokio::runtime::Runtime::new()?;
    let base_url = resolve_backend_url(|k| env::var(k).ok());
    let client = BackendClient::new(base_url.clone());

    // Background health poller; the event loop only reads the latest value.
    let (health_tx, health_rx) = tokio::sync::watch::channel(false);
    {
        let probe = client.clone();
        rt.spawn(async move {
            loop {
                let up = probe.health().await;
                if health_tx.send(up).is_err() {
                    return;
                }
                tokio::time::sleep(HEALTH_POLL_INTERVAL).await;
            }
        });
    }

    let mut controller = SessionController::new(client, game);
    let mut host = CanvasHost::new(settings);

    let event_loop = EventLoop::new();
    let window = WindowBuilder::new()
        .with_title(format!("Playground - {game}"))
        .with_inner_size(PhysicalSize::new(1280u32, 800u32))
        .build(&event_loop)?;

    let window_size = window.inner_size();
    host.set_viewport(window_size.width, window_size.height);
    let surface_texture = SurfaceTexture::new(window_size.width, window_size.height, &window);
    let mut pixels = Pixels::new(window_size.width, window_size.height, surface_texture)?;
    let mut surface = SurfaceSize::new(window_size.width, window_size.height);

    println!("playground: {game} against {base_url}");
    println!("Enter starts a session, -/= changes display scale, Escape quits");

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Poll;

        match &event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    if let Err(err) = store.save(host.settings()) {
                        eprintln!("settings save failed: {err}");
                    }
                    *control_flow = ControlFlow::Exit;
                }
                WindowEvent::Resized(size) => {
                    surface = SurfaceSize::new(size.width, size.height);
                    host.set_viewport(size.width, size.height);
                    if let Err(err) = pixels.resize_surface(size.width.max(1), size.height.max(1))
                    {
                        eprintln!("surface resize failed: {err}");
                    }
                    if let Err(err) = pixels.resize_buffer(size.width.max(1), size.height.max(1)) {
                        eprintln!("buffer resize failed: {err}");
                    }
                    window.request_redraw();
                }
                WindowEvent::KeyboardInput {
                    input:
                        KeyboardInput {
                            state: ElementState::Pressed,
                            virtual_keycode: Some(key),
                            ..
                        },
                    ..
                } => match key {
                    VirtualKeyCode::Escape => {
                        if let Err(err) = store.save(host.settings()) {
                            eprintln!("settings save failed: {err}");
                        }
                        *control_flow = ControlFlow::Exit;
                    }
                    VirtualKeyCode::Return => {
                        if *health_rx.borrow() {
                            let config = host.settings().start_config(game);
                            rt.block_on(controller.start(config));
                        } else {
                            eprintln!("backend at {base_url} is not reachable");
                        }
                    }
                    VirtualKeyCode::Minus => host.adjust_scale(-10),
                    VirtualKeyCode::Equals => host.adjust_scale(10),
                    key => {
                        let outcome = host.handle_key(game, controller.is_playing(), *key);
                        if let Some(action) = outcome.action {
                            rt.block_on(controller.step(action));
                        }
                    }
                },
                _ => {}
            },
            Event::MainEventsCleared => {
                let now = Instant::now();
                let active = controller.is_playing().then_some(game);
                host.sync_scheduler(active, now);
                if let Some(action) = host.poll_tick(now) {
                    rt.block_on(controller.step(action));
                }
                window.request_redraw();
            }
            Event::RedrawRequested(_) => {
                let canvas_size = host.render(controller.view());

                let frame = pixels.frame_mut();
                frame.fill(0);
                let offset_x = surface.width.saturating_sub(canvas_size.width) / 2;
                let offset_y = surface.height.saturating_sub(canvas_size.height) / 2;
                engine::graphics::blit(
                    frame,
                    surface,
                    host.canvas().frame(),
                    canvas_size,
                    offset_x,
                    offset_y,
                );

                draw_hud(frame, surface, &controller, *health_rx.borrow(), &host);

                if let Err(err) = pixels.render() {
                    eprintln!("present failed: {err}");
                    *control_flow = ControlFlow::Exit;
                }
            }
            _ => {}
        }
    });

    #[allow(unreachable_code)]
    Ok(())
}

fn draw_hud(
    frame: &mut [u8],
    surface: SurfaceSize,
    controller: &SessionController,
    connected: bool,
    host: &CanvasHost,
) {
    let status = match controller.status() {
        SessionStatus::Idle => "PRESS ENTER TO START",
        SessionStatus::Starting => "STARTING",
        SessionStatus::Playing => "PLAYING",
        SessionStatus::Ended => "GAME OVER - ENTER RESTARTS",
    };
    draw_text(frame, surface, 8, 8, status, HUD_TEXT);

    let stats = format!(
        "STEPS {} REWARD {:.1} SCALE {}%",
        controller.step_count(),
        controller.total_reward(),
        host.scale_percent(),
    );
    draw_text(frame, surface, 8, 22, &stats, HUD_TEXT);

    if !connected {
        draw_text(frame, surface, 8, 36, "BACKEND OFFLINE", HUD_WARN);
    }
}

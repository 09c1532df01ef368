//! Orrery - animated solar system
//!
//! A sun, eight textured planets on circular orbits and a star field.
//!
//! Controls:
//! - speed slider: scale every planet's angular speed (0 halts, negative reverses)
//! - Mouse drag: Orbit camera
//! - Scroll: Zoom
//! - R: Reset view
//! - Escape: Quit

use std::time::{Duration, Instant};

use clap::Parser;
use common::{Camera3D, GraphicsContext};
use orrery::cli::CliArgs;
use orrery::orbit::Orrery;
use orrery::overlay::EguiState;
use orrery::renderer::Renderer;
use orrery::texture::TextureLoader;
use orrery::ui::{draw_controls, SpeedControl};
use orrery::viewport::apply_resize;
use orrery::{starfield, texture, OrreryConfig};
use winit::{
    event::{ElementState, Event, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::ControlFlow,
    keyboard::{KeyCode, PhysicalKey},
};

const DEFAULT_LOG_FILTER: &str = "info,wgpu_core=warn,wgpu_hal=warn,naga=warn";

struct App {
    gfx: GraphicsContext,
    renderer: Renderer,
    overlay: EguiState,
    textures: TextureLoader,
    orrery: Orrery,
    speed: SpeedControl,
    camera: Camera3D,
    home_camera: Camera3D,
    mouse_pressed: bool,
    last_mouse_pos: Option<(f64, f64)>,
    fps: f32,
}

impl App {
    fn new(gfx: GraphicsContext, config: &OrreryConfig) -> Self {
        let scene = &config.scene;

        let camera = Camera3D::new(gfx.viewport.aspect_ratio())
            .with_fov_degrees(scene.fov_degrees)
            .with_clip_planes(scene.near, scene.far)
            .at_distance(scene.camera_distance);

        let stars = starfield::generate(scene.star_count, scene.star_spread, scene.star_seed);

        // Planets start in their fallback colours until the fetches land
        let surfaces: Vec<_> = std::iter::once(scene.sun_color)
            .chain(config.planets.iter().map(|planet| planet.fallback_color))
            .map(texture::solid_color)
            .collect();
        let textures = TextureLoader::spawn(
            &config.planets,
            Duration::from_secs(scene.texture_timeout_secs),
            gfx.device.limits().max_texture_dimension_2d,
        );

        let renderer = Renderer::new(
            &gfx,
            &camera,
            &stars,
            &surfaces,
            scene.sun_radius,
            scene.sphere_segments,
        );
        let overlay = EguiState::new(&gfx);

        let orrery = Orrery::new(&config.planets, config.speed.initial);
        let speed = SpeedControl::new(&config.speed);

        Self {
            gfx,
            renderer,
            overlay,
            textures,
            orrery,
            speed,
            home_camera: camera.clone(),
            camera,
            mouse_pressed: false,
            last_mouse_pos: None,
            fps: 0.0,
        }
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        let viewport = apply_resize(
            &mut self.camera,
            &mut self.gfx,
            new_size.width,
            new_size.height,
        );
        self.renderer.resize(&self.gfx.device, viewport);
    }

    fn update(&mut self) {
        for loaded in self.textures.poll() {
            self.renderer.set_planet_surface(
                &self.gfx.device,
                &self.gfx.queue,
                loaded.planet,
                &loaded.image,
            );
        }
        self.orrery.tick();
    }

    fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        if !self.gfx.viewport.has_area() {
            return Ok(());
        }

        let output = self.gfx.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let body_count = self
            .renderer
            .update(&self.gfx.queue, &self.camera, &self.orrery);

        let mut encoder = self
            .gfx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        self.renderer.render(&mut encoder, &view, body_count);

        let fps = self.fps;
        self.overlay.paint(&self.gfx, &mut encoder, &view, |ctx| {
            draw_controls(ctx, &mut self.speed, &mut self.orrery, fps);
        });

        self.gfx.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    fn handle_key(&mut self, key: KeyCode, state: ElementState) -> bool {
        if state != ElementState::Pressed {
            return false;
        }

        match key {
            KeyCode::KeyR => {
                self.camera = Camera3D {
                    aspect_ratio: self.camera.aspect_ratio,
                    ..self.home_camera.clone()
                };
                false
            }
            KeyCode::Escape => true,
            _ => false,
        }
    }

    fn handle_mouse_move(&mut self, x: f64, y: f64) {
        if self.mouse_pressed {
            if let Some((last_x, last_y)) = self.last_mouse_pos {
                let dx = (x - last_x) as f32 * 0.01;
                let dy = (y - last_y) as f32 * 0.01;
                self.camera.orbit(-dx, dy);
            }
            self.last_mouse_pos = Some((x, y));
        }
    }

    fn handle_scroll(&mut self, delta: f32) {
        self.camera.zoom(delta * self.camera.distance * 0.1);
    }
}

fn init_logging(level: Option<&str>) {
    match level {
        Some(filter) => env_logger::Builder::new().parse_filters(filter).init(),
        None => env_logger::Builder::from_env(
            env_logger::Env::default().default_filter_or(DEFAULT_LOG_FILTER),
        )
        .init(),
    }
}

fn run(args: CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => OrreryConfig::load(path)?,
        None => OrreryConfig::default(),
    };
    config.apply_cli_overrides(&args);

    if args.dump_config {
        println!("{}", config.to_ron_string()?);
        return Ok(());
    }

    log::info!(
        "Starting orrery: {} planets, {} stars, speed factor {}",
        config.planets.len(),
        config.scene.star_count,
        config.speed.initial
    );

    let (gfx, event_loop) = pollster::block_on(GraphicsContext::new(
        &config.window.title,
        config.window.width,
        config.window.height,
    ))?;

    let mut app = App::new(gfx, &config);
    let mut frame_count = 0u32;
    let mut fps_timer = Instant::now();

    event_loop.run(move |event, elwt| {
        elwt.set_control_flow(ControlFlow::Poll);

        match event {
            Event::WindowEvent { ref event, .. } => {
                let consumed = app.overlay.on_window_event(&app.gfx, event);

                match event {
                    WindowEvent::CloseRequested => elwt.exit(),
                    WindowEvent::Resized(size) => app.resize(*size),
                    WindowEvent::RedrawRequested => {
                        app.update();
                        match app.render() {
                            Ok(_) => {}
                            Err(wgpu::SurfaceError::Lost) => app.gfx.reconfigure(),
                            Err(wgpu::SurfaceError::OutOfMemory) => {
                                log::error!("GPU out of memory");
                                elwt.exit();
                            }
                            Err(e) => log::warn!("Render error: {:?}", e),
                        }

                        frame_count += 1;
                        let elapsed = fps_timer.elapsed().as_secs_f32();
                        if elapsed >= 2.0 {
                            app.fps = frame_count as f32 / elapsed;
                            log::debug!(
                                "FPS: {:.1} | tick {} | speed {:.2}",
                                app.fps,
                                app.orrery.ticks(),
                                app.orrery.speed_factor()
                            );
                            frame_count = 0;
                            fps_timer = Instant::now();
                        }
                    }
                    _ if consumed => {}
                    WindowEvent::MouseInput { state, button, .. } => {
                        if *button == MouseButton::Left {
                            app.mouse_pressed = *state == ElementState::Pressed;
                            if !app.mouse_pressed {
                                app.last_mouse_pos = None;
                            }
                        }
                    }
                    WindowEvent::CursorMoved { position, .. } => {
                        app.handle_mouse_move(position.x, position.y);
                    }
                    WindowEvent::KeyboardInput {
                        event:
                            KeyEvent {
                                physical_key: PhysicalKey::Code(key),
                                state,
                                ..
                            },
                        ..
                    } => {
                        if app.handle_key(*key, *state) {
                            elwt.exit();
                        }
                    }
                    WindowEvent::MouseWheel { delta, .. } => {
                        let scroll = match delta {
                            MouseScrollDelta::LineDelta(_, y) => *y,
                            MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 100.0,
                        };
                        app.handle_scroll(scroll);
                    }
                    _ => {}
                }
            }
            Event::AboutToWait => {
                app.gfx.window.request_redraw();
            }
            _ => {}
        }
    })?;

    Ok(())
}

fn main() {
    let args = CliArgs::parse();
    init_logging(args.log_level.as_deref());

    if let Err(e) = run(args) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

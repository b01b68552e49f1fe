// src/app.rs

use std::sync::Arc;

use thiserror::Error;
use winit::{
    dpi::PhysicalSize,
    event::{ElementState, MouseButton, WindowEvent},
    window::Window,
};

use raycast_fov::animator::{FrameDriver, ViewMode};
use raycast_fov::config::Config;
use raycast_fov::error::{GeometryError, RaycastError};
use raycast_fov::events::{PointerEventKind, PointerEvents};
use raycast_fov::geometry::{Bounds, Point2};
use raycast_fov::scene::Scene;
use raycast_fov::settings::DisplaySettings;

use crate::clock;
use crate::rendering_lib::{Renderer, WGSL_SHADER_SOURCE};
use crate::ui::{build_ui, paint_labels, UiAction};

const RANDOM_SHAPE_COUNT: usize = 6;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to create event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),
    #[error("no compatible graphics adapter")]
    NoAdapter,
    #[error("surface reports no supported formats")]
    UnsupportedSurface,
    #[error("failed to request device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
    #[error(transparent)]
    Geometry(#[from] GeometryError),
    #[error(transparent)]
    Raycast(#[from] RaycastError),
}

pub struct RaycastApp {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    size: PhysicalSize<u32>,
    scale_factor: f64,
    renderer: Renderer,
    scene: Scene,
    settings: DisplaySettings,
    driver: FrameDriver,
    pointer_events: PointerEvents,
    dragging: bool,
    egui_ctx: egui::Context,
    egui_state: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
}

impl RaycastApp {
    pub async fn new(window: Arc<Window>, app_config: &Config) -> Result<Self, AppError> {
        let size = window.inner_size();
        let scale_factor = window.scale_factor();
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor::default());
        let surface = instance.create_surface(window.clone())?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(AppError::NoAdapter)?;
        log::info!("using adapter {:?}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::downlevel_webgl2_defaults()
                        .using_resolution(adapter.limits()),
                    label: None,
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or(AppError::UnsupportedSurface)?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .ok_or(AppError::UnsupportedSurface)?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let logical = size.to_logical::<f32>(scale_factor);
        let renderer = Renderer::new(&device, config.format, WGSL_SHADER_SOURCE, logical.width, logical.height);

        let egui_ctx = egui::Context::default();
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(scale_factor as f32),
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&device, config.format, None, 1);

        let pointer_events = PointerEvents::new();
        let mut driver = FrameDriver::new(app_config.raycast.max_ray_length)?;
        driver.set_pointer(Point2::new(logical.width as f64 / 2.0, logical.height as f64 / 2.0));
        driver.set_view(app_config.view, &pointer_events);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            size,
            scale_factor,
            renderer,
            scene: Scene::sample()?,
            settings: app_config.display,
            driver,
            pointer_events,
            dragging: false,
            egui_ctx,
            egui_state,
            egui_renderer,
        })
    }

    pub fn get_size(&self) -> PhysicalSize<u32> {
        self.size
    }

    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.size = new_size;
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    /// Scene area in logical pixels.
    fn logical_bounds(&self) -> Bounds {
        let logical = self.size.to_logical::<f64>(self.scale_factor);
        Bounds { min_x: 0.0, min_y: 0.0, max_x: logical.width, max_y: logical.height }
    }

    fn apply(&mut self, action: UiAction) {
        let result = match action {
            UiAction::SampleScene => Scene::sample().map(|scene| self.scene = scene),
            UiAction::RandomScene => {
                let area = self.logical_bounds();
                self.scene.randomize(&mut rand::thread_rng(), RANDOM_SHAPE_COUNT, area)
            }
        };
        match result {
            Ok(()) => log::debug!("scene now has {} shapes", self.scene.len()),
            Err(e) => log::warn!("could not rebuild scene: {e}"),
        }
    }

    pub fn render(&mut self, window: &Window) -> Result<(), wgpu::SurfaceError> {
        let output_texture = self.surface.get_current_texture()?;
        let view = output_texture.texture.create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Main Command Encoder"),
        });

        let area = self.logical_bounds();
        self.renderer.begin_frame();
        self.driver.tick(clock::now_nanos(), &mut self.renderer, &self.scene, &self.settings);
        self.renderer.render_frame(
            &self.device,
            &self.queue,
            &mut encoder,
            &view,
            area.width() as f32,
            area.height() as f32,
        );
        let labels = self.renderer.take_labels();

        let mut selected_view = self.driver.view();
        let mut action = None;
        let shape_count = self.scene.len();
        let raw_input = self.egui_state.take_egui_input(window);
        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            paint_labels(ctx, &labels);
            action = build_ui(ctx, &mut self.settings, &mut selected_view, shape_count);
        });
        self.egui_state.handle_platform_output(window, full_output.platform_output);
        let tris = self.egui_ctx.tessellate(full_output.shapes, full_output.pixels_per_point);
        for (id, image_delta) in &full_output.textures_delta.set {
            self.egui_renderer.update_texture(&self.device, &self.queue, *id, image_delta);
        }
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.config.width, self.config.height],
            pixels_per_point: full_output.pixels_per_point,
        };
        self.egui_renderer.update_buffers(&self.device, &self.queue, &mut encoder, &tris, &screen_descriptor);
        {
            let mut gui_render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("GUI Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations { load: wgpu::LoadOp::Load, store: wgpu::StoreOp::Store },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });
            self.egui_renderer.render(&mut gui_render_pass, &tris, &screen_descriptor);
        }
        for tex_id in &full_output.textures_delta.free {
            self.egui_renderer.free_texture(tex_id);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output_texture.present();

        if selected_view != self.driver.view() {
            self.set_view(selected_view);
        }
        if let Some(action) = action {
            self.apply(action);
        }
        Ok(())
    }

    fn set_view(&mut self, view: ViewMode) {
        log::info!("view: {}", view.label());
        self.driver.set_view(view, &self.pointer_events);
    }

    /// Returns true when the event was consumed.
    pub fn handle_window_event(&mut self, event: &WindowEvent, window: &Window) -> bool {
        if self.egui_state.on_window_event(window, event).consumed {
            return true;
        }
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                let logical = position.to_logical::<f64>(self.scale_factor);
                let kind = if self.dragging { PointerEventKind::Dragged } else { PointerEventKind::Moved };
                self.pointer_events.dispatch(kind, Point2::new(logical.x, logical.y));
                true
            }
            WindowEvent::MouseInput { state, button: MouseButton::Left, .. } => {
                self.dragging = *state == ElementState::Pressed;
                true
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                self.scale_factor = *scale_factor;
                false
            }
            _ => false,
        }
    }
}

// src/rendering_lib/renderer.rs

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use wgpu::util::DeviceExt;

use raycast_fov::canvas::Canvas;
use raycast_fov::geometry::Point2;
use raycast_fov::style::Color;
use raycast_fov::triangulate::triangulate;

use super::vertex::Vertex;

const INITIAL_VERTEX_CAPACITY: usize = 16 * 1024;
const INITIAL_INDEX_CAPACITY: usize = 48 * 1024;
const CIRCLE_SEGMENTS: u32 = 20;

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct ScreenDimensionsUniform {
    width: f32,
    height: f32,
    _padding1: f32,
    _padding2: f32,
}

/// Text queued during a frame, painted afterwards through egui.
#[derive(Clone, Debug)]
pub struct TextLabel {
    pub position: [f32; 2],
    pub text: String,
    pub size: f32,
    pub color: [f32; 4],
}

fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Collects one frame of triangles through [`Canvas`] and submits them in a single draw.
pub struct Renderer {
    render_pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    vertex_capacity: usize,
    index_capacity: usize,

    frame_vertices: Vec<Vertex>,
    frame_indices: Vec<u32>,
    labels: Vec<TextLabel>,
    clear_color: Color,
    // sRGB targets expect linear colour values from the shader.
    linear_output: bool,

    screen_uniform_buffer: wgpu::Buffer,
    screen_bind_group: wgpu::BindGroup,
}

impl Renderer {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        shader_source: &str,
        initial_screen_width: f32,
        initial_screen_height: f32,
    ) -> Self {
        let shader_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Ray Cast Shader Module"),
            source: wgpu::ShaderSource::Wgsl(shader_source.into()),
        });

        let screen_uniform_data = ScreenDimensionsUniform {
            width: initial_screen_width,
            height: initial_screen_height,
            _padding1: 0.0,
            _padding2: 0.0,
        };
        let screen_uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Screen Dimensions Uniform Buffer"),
            contents: bytemuck::bytes_of(&screen_uniform_data),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let screen_bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
            label: Some("screen_dimensions_bind_group_layout"),
        });

        let screen_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &screen_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: screen_uniform_buffer.as_entire_binding(),
            }],
            label: Some("screen_dimensions_bind_group"),
        });

        let render_pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Ray Cast Pipeline Layout"),
            bind_group_layouts: &[&screen_bind_group_layout],
            push_constant_ranges: &[],
        });

        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Ray Cast Pipeline"),
            layout: Some(&render_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader_module,
                entry_point: "vs_main",
                buffers: &[Vertex::desc()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader_module,
                entry_point: "fs_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None, // both windings appear
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
        });

        let vertex_buffer = Self::create_vertex_buffer(device, INITIAL_VERTEX_CAPACITY);
        let index_buffer = Self::create_index_buffer(device, INITIAL_INDEX_CAPACITY);

        Self {
            render_pipeline,
            vertex_buffer,
            index_buffer,
            vertex_capacity: INITIAL_VERTEX_CAPACITY,
            index_capacity: INITIAL_INDEX_CAPACITY,
            frame_vertices: Vec::with_capacity(INITIAL_VERTEX_CAPACITY),
            frame_indices: Vec::with_capacity(INITIAL_INDEX_CAPACITY),
            labels: Vec::new(),
            clear_color: Color::BLACK,
            linear_output: surface_format.is_srgb(),
            screen_uniform_buffer,
            screen_bind_group,
        }
    }

    fn create_vertex_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Frame Vertex Buffer"),
            size: (capacity * std::mem::size_of::<Vertex>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    fn create_index_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Frame Index Buffer"),
            size: (capacity * std::mem::size_of::<u32>()) as u64,
            usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    /// Drops everything queued for the previous frame.
    pub fn begin_frame(&mut self) {
        self.frame_vertices.clear();
        self.frame_indices.clear();
        self.labels.clear();
    }

    pub fn take_labels(&mut self) -> Vec<TextLabel> {
        std::mem::take(&mut self.labels)
    }

    fn output_color(&self, color: Color) -> [f32; 4] {
        let [r, g, b, a] = color.to_array();
        if self.linear_output {
            [srgb_to_linear(r), srgb_to_linear(g), srgb_to_linear(b), a]
        } else {
            [r, g, b, a]
        }
    }

    fn push_vertex(&mut self, position: Vec2, color: [f32; 4]) -> u32 {
        let index = self.frame_vertices.len() as u32;
        self.frame_vertices.push(Vertex::new(position.to_array(), color));
        index
    }

    fn push_quad(&mut self, corners: [Vec2; 4], color: [f32; 4]) {
        let base = self.frame_vertices.len() as u32;
        for corner in corners {
            self.push_vertex(corner, color);
        }
        self.frame_indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    fn grow_buffers(&mut self, device: &wgpu::Device) {
        if self.frame_vertices.len() > self.vertex_capacity {
            self.vertex_capacity = self.frame_vertices.len().next_power_of_two();
            log::debug!("growing vertex buffer to {} vertices", self.vertex_capacity);
            self.vertex_buffer = Self::create_vertex_buffer(device, self.vertex_capacity);
        }
        if self.frame_indices.len() > self.index_capacity {
            self.index_capacity = self.frame_indices.len().next_power_of_two();
            log::debug!("growing index buffer to {} indices", self.index_capacity);
            self.index_buffer = Self::create_index_buffer(device, self.index_capacity);
        }
    }

    /// Uploads the queued geometry and records the scene pass, clearing to the frame's background.
    pub fn render_frame(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        output_view: &wgpu::TextureView,
        screen_width: f32,
        screen_height: f32,
    ) {
        let screen_uniform_data = ScreenDimensionsUniform {
            width: screen_width,
            height: screen_height,
            _padding1: 0.0,
            _padding2: 0.0,
        };
        queue.write_buffer(&self.screen_uniform_buffer, 0, bytemuck::bytes_of(&screen_uniform_data));

        let has_geometry = !self.frame_vertices.is_empty() && !self.frame_indices.is_empty();
        if has_geometry {
            self.grow_buffers(device);
            queue.write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(&self.frame_vertices));
            queue.write_buffer(&self.index_buffer, 0, bytemuck::cast_slice(&self.frame_indices));
        }

        let [r, g, b, a] = self.output_color(self.clear_color);
        let clear = wgpu::Color { r: r as f64, g: g as f64, b: b as f64, a: a as f64 };

        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Scene Render Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: output_view,
                resolve_target: None,
                ops: wgpu::Operations { load: wgpu::LoadOp::Clear(clear), store: wgpu::StoreOp::Store },
            })],
            depth_stencil_attachment: None,
            occlusion_query_set: None,
            timestamp_writes: None,
        });

        if has_geometry {
            let vertex_bytes = (self.frame_vertices.len() * std::mem::size_of::<Vertex>()) as u64;
            let index_bytes = (self.frame_indices.len() * std::mem::size_of::<u32>()) as u64;
            render_pass.set_pipeline(&self.render_pipeline);
            render_pass.set_bind_group(0, &self.screen_bind_group, &[]);
            render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..vertex_bytes));
            render_pass.set_index_buffer(self.index_buffer.slice(..index_bytes), wgpu::IndexFormat::Uint32);
            render_pass.draw_indexed(0..self.frame_indices.len() as u32, 0, 0..1);
        }
    }
}

fn to_vec2(p: Point2) -> Vec2 {
    Vec2::new(p.x as f32, p.y as f32)
}

impl Canvas for Renderer {
    fn clear(&mut self, color: Color) {
        self.begin_frame();
        self.clear_color = color;
    }

    fn fill_polygon(&mut self, points: &[Point2], color: Color) {
        if points.len() < 3 {
            return;
        }
        let color = self.output_color(color);
        let base = self.frame_vertices.len() as u32;
        for p in points {
            self.push_vertex(to_vec2(*p), color);
        }
        for [a, b, c] in triangulate(points) {
            self.frame_indices
                .extend_from_slice(&[base + a as u32, base + b as u32, base + c as u32]);
        }
    }

    fn stroke_polygon(&mut self, points: &[Point2], color: Color, width: f32) {
        let n = points.len();
        if n < 2 {
            return;
        }
        for i in 0..n {
            self.line(points[i], points[(i + 1) % n], color, width);
        }
        // Round joins so thick outlines have no notches at the corners.
        if width > 1.5 {
            for p in points {
                self.fill_circle(*p, width / 2.0, color);
            }
        }
    }

    fn line(&mut self, from: Point2, to: Point2, color: Color, width: f32) {
        let (a, b) = (to_vec2(from), to_vec2(to));
        let direction = (b - a).normalize_or_zero();
        if direction == Vec2::ZERO {
            return;
        }
        let offset = direction.perp() * (width.max(1.0) / 2.0);
        let color = self.output_color(color);
        self.push_quad([a + offset, b + offset, b - offset, a - offset], color);
    }

    fn fill_circle(&mut self, center: Point2, radius: f32, color: Color) {
        let color = self.output_color(color);
        let c = to_vec2(center);
        let hub = self.push_vertex(c, color);
        for i in 0..CIRCLE_SEGMENTS {
            let angle = i as f32 * std::f32::consts::TAU / CIRCLE_SEGMENTS as f32;
            self.push_vertex(c + Vec2::from_angle(angle) * radius, color);
        }
        for i in 0..CIRCLE_SEGMENTS {
            let rim = hub + 1 + i;
            let next = hub + 1 + (i + 1) % CIRCLE_SEGMENTS;
            self.frame_indices.extend_from_slice(&[hub, rim, next]);
        }
    }

    fn text(&mut self, position: Point2, text: &str, size: f32, color: Color) {
        // egui does its own colour conversion.
        self.labels.push(TextLabel {
            position: to_vec2(position).to_array(),
            text: text.to_string(),
            size,
            color: color.to_array(),
        });
    }
}

use bytemuck::{Pod, Zeroable};
use einkdraw_core::coords::Vec2;
use einkdraw_core::paint::StrokeStyle;
use einkdraw_core::surface::RenderSnapshot;
use wgpu::util::DeviceExt;

use crate::render::{RenderCtx, RenderTarget};

use super::common::{
    premul_alpha_blend, QuadVertex, ViewportUniform, QUAD_INDICES, QUAD_VERTICES,
    VIEWPORT_UBO_SIZE,
};

/// Draws a [`RenderSnapshot`] as anti-aliased round-capped capsules.
///
/// Every polyline segment becomes one instance. Round caps on consecutive
/// segments overlap, which gives round joins for free. A single-point stroke
/// renders as a dot.
#[derive(Default)]
pub struct StrokeRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,

    bind_group_layout: Option<wgpu::BindGroupLayout>,
    bind_group: Option<wgpu::BindGroup>,
    viewport_ubo: Option<wgpu::Buffer>,

    quad_vbo: Option<wgpu::Buffer>,
    quad_ibo: Option<wgpu::Buffer>,

    instance_vbo: Option<wgpu::Buffer>,
    instance_capacity: usize,

    instances: Vec<SegmentInstance>,
    aliased: bool,
}

impl StrokeRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Soft edges (default) or hard 1-bit edges for e-ink panels.
    pub fn set_antialias(&mut self, on: bool) {
        self.aliased = !on;
    }

    pub fn antialias(&self) -> bool {
        !self.aliased
    }

    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        snapshot: &RenderSnapshot,
    ) {
        let aa_px = if self.aliased { 0.0 } else { ctx.physical_px() };
        self.instances.clear();
        build_instances(snapshot, aa_px, &mut self.instances);
        if self.instances.is_empty() || !ctx.viewport.is_valid() {
            return;
        }

        self.ensure_pipeline(ctx);
        self.ensure_static_buffers(ctx);
        self.ensure_bindings(ctx);
        self.write_viewport_uniform(ctx);
        self.ensure_instance_capacity(ctx, self.instances.len());

        let Some(instance_vbo) = self.instance_vbo.as_ref() else { return };
        ctx.queue.write_buffer(instance_vbo, 0, bytemuck::cast_slice(&self.instances));

        let Some(pipeline) = self.pipeline.as_ref() else { return };
        let Some(bind_group) = self.bind_group.as_ref() else { return };
        let Some(quad_vbo) = self.quad_vbo.as_ref() else { return };
        let Some(quad_ibo) = self.quad_ibo.as_ref() else { return };

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("einkdraw stroke pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        rpass.set_vertex_buffer(0, quad_vbo.slice(..));
        rpass.set_vertex_buffer(1, instance_vbo.slice(..));
        rpass.set_index_buffer(quad_ibo.slice(..), wgpu::IndexFormat::Uint16);
        rpass.draw_indexed(0..6, 0, 0..self.instances.len() as u32);
    }

    // ── private helpers ────────────────────────────────────────────────────

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("einkdraw stroke shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/stroke.wgsl").into()),
        });

        let bind_group_layout =
            ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("einkdraw stroke bgl"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: Some(VIEWPORT_UBO_SIZE),
                    },
                    count: None,
                }],
            });

        let pipeline_layout =
            ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("einkdraw stroke pipeline layout"),
                bind_group_layouts: &[&bind_group_layout],
                immediate_size: 0,
            });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("einkdraw stroke pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[QuadVertex::layout(), SegmentInstance::layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(premul_alpha_blend()),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        log::debug!("stroke pipeline built for {:?}", ctx.surface_format);
        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
        self.bind_group_layout = Some(bind_group_layout);
        self.bind_group = None;
        self.viewport_ubo = None;
    }

    fn ensure_bindings(&mut self, ctx: &RenderCtx<'_>) {
        if self.bind_group.is_some() && self.viewport_ubo.is_some() {
            return;
        }
        let Some(bgl) = self.bind_group_layout.as_ref() else { return };

        let viewport_ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("einkdraw stroke viewport ubo"),
            size: VIEWPORT_UBO_SIZE.get(),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("einkdraw stroke bind group"),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: viewport_ubo.as_entire_binding(),
            }],
        });

        self.viewport_ubo = Some(viewport_ubo);
        self.bind_group = Some(bind_group);
    }

    fn ensure_static_buffers(&mut self, ctx: &RenderCtx<'_>) {
        if self.quad_vbo.is_some() && self.quad_ibo.is_some() {
            return;
        }

        self.quad_vbo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("einkdraw stroke quad vbo"),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        }));
        self.quad_ibo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("einkdraw stroke quad ibo"),
            contents: bytemuck::cast_slice(&QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        }));
    }

    fn write_viewport_uniform(&mut self, ctx: &RenderCtx<'_>) {
        let Some(ubo) = self.viewport_ubo.as_ref() else { return };
        ctx.queue.write_buffer(
            ubo,
            0,
            bytemuck::bytes_of(&ViewportUniform {
                viewport: [ctx.viewport.width.max(1.0), ctx.viewport.height.max(1.0)],
                _pad: [0.0; 2],
            }),
        );
    }

    fn ensure_instance_capacity(&mut self, ctx: &RenderCtx<'_>, required: usize) {
        if required <= self.instance_capacity && self.instance_vbo.is_some() {
            return;
        }
        let new_cap = required.next_power_of_two().max(256);
        let new_size = (new_cap * std::mem::size_of::<SegmentInstance>()) as u64;
        log::debug!("stroke instance buffer grown to {new_cap}");
        self.instance_vbo = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("einkdraw stroke instance vbo"),
            size: new_size,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));
        self.instance_capacity = new_cap;
    }
}

/// Appends one capsule per segment of every stroke in `snapshot`, then the
/// predicted segment on top.
///
/// `aa_px` is the edge feather width in logical pixels; `0` gives hard edges.
pub fn build_instances(snapshot: &RenderSnapshot, aa_px: f32, out: &mut Vec<SegmentInstance>) {
    out.reserve(snapshot.segment_count());
    for stroke in &snapshot.strokes {
        push_polyline(stroke.points(), stroke.style(), aa_px, out);
    }
    if let Some(predicted) = &snapshot.predicted {
        push_polyline(predicted.segment.points(), predicted.style, aa_px, out);
    }
}

fn push_polyline(points: &[Vec2], style: StrokeStyle, aa_px: f32, out: &mut Vec<SegmentInstance>) {
    let color = style.color.to_array();
    let radius_aa = [style.radius(), aa_px];
    match points {
        [] => {}
        [dot] => out.push(SegmentInstance {
            p0: [dot.x, dot.y],
            p1: [dot.x, dot.y],
            color,
            radius_aa,
        }),
        _ => out.extend(points.windows(2).map(|w| SegmentInstance {
            p0: [w[0].x, w[0].y],
            p1: [w[1].x, w[1].y],
            color,
            radius_aa,
        })),
    }
}

// ── GPU types ─────────────────────────────────────────────────────────────

/// Instance data layout (40 bytes):
///
///  offset  0  p0         [f32; 2]   loc 1
///  offset  8  p1         [f32; 2]   loc 2
///  offset 16  color      [f32; 4]   loc 3  (premultiplied)
///  offset 32  radius_aa  [f32; 2]   loc 4  (.x = radius, .y = AA width)
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct SegmentInstance {
    pub p0: [f32; 2],
    pub p1: [f32; 2],
    pub color: [f32; 4],
    pub radius_aa: [f32; 2],
}

impl SegmentInstance {
    const ATTRS: [wgpu::VertexAttribute; 4] = wgpu::vertex_attr_array![
        1 => Float32x2, // p0
        2 => Float32x2, // p1
        3 => Float32x4, // color
        4 => Float32x2  // radius_aa
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<SegmentInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}

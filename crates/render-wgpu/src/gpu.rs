use crate::camera::Camera;
use crate::shaders;
use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};
use grove_assets::{AssetId, MeshData, Primitive};
use grove_render::{DrawItem, Lighting, SceneFrame, TerrainSurface};
use std::collections::HashMap;
use wgpu::util::DeviceExt;

const INITIAL_INSTANCES: u64 = 1024;
const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
struct Uniforms {
    view_proj: [[f32; 4]; 4],
    camera_pos: [f32; 4],
    ambient: [f32; 4],
    sun_dir: [f32; 4],
    sun_color: [f32; 4],
    point_pos: [f32; 4],
    point_color: [f32; 4],
    fog_color: [f32; 4],
    fog_range: [f32; 4],
}

impl Uniforms {
    fn new(camera: &Camera, lighting: &Lighting) -> Self {
        let l = lighting;
        Self {
            view_proj: camera.view_projection().to_cols_array_2d(),
            camera_pos: camera.position.extend(1.0).to_array(),
            ambient: [1.0, 1.0, 1.0, l.ambient],
            sun_dir: l.sun_position.normalize_or(Vec3::Y).extend(0.0).to_array(),
            sun_color: l.sun_color.to_rgba(l.sun_intensity),
            point_pos: l.point_position.extend(l.point_range.max(f32::EPSILON)).to_array(),
            point_color: l.point_color.to_rgba(l.point_intensity),
            fog_color: l.fog_color.to_rgba(1.0),
            fog_range: [l.fog_near, l.fog_far.max(l.fog_near + f32::EPSILON), 0.0, 0.0],
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
struct Vertex {
    position: [f32; 3],
    normal: [f32; 3],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
struct InstanceData {
    model_0: [f32; 4],
    model_1: [f32; 4],
    model_2: [f32; 4],
    model_3: [f32; 4],
    color: [f32; 4],
    emissive: [f32; 4],
}

impl InstanceData {
    fn new(model: Mat4, color: [f32; 4], emissive: [f32; 4]) -> Self {
        let cols = model.to_cols_array_2d();
        Self {
            model_0: cols[0],
            model_1: cols[1],
            model_2: cols[2],
            model_3: cols[3],
            color,
            emissive,
        }
    }

    fn from_item(item: &DrawItem) -> Self {
        Self::new(
            item.model,
            item.color.to_rgba(item.alpha),
            item.emissive.to_rgba(0.0),
        )
    }
}

/// Mesh a batch draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum MeshKey {
    Primitive(Primitive),
    Asset(AssetId),
}

/// A run of instances sharing one mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Batch {
    mesh: MeshKey,
    start: u32,
    count: u32,
}

/// Group items by primitive. Opaque batches come first, then one batch per
/// asset draw, then translucent batches so they blend over finished
/// geometry. Primitive batches keep first-seen order.
fn batch_items(items: &[DrawItem], assets: &[AssetDraw]) -> (Vec<InstanceData>, Vec<Batch>) {
    let mut instances = Vec::with_capacity(items.len() + assets.len());
    let mut batches = Vec::new();
    for translucent in [false, true] {
        if translucent {
            for draw in assets {
                batches.push(Batch {
                    mesh: MeshKey::Asset(draw.asset),
                    start: instances.len() as u32,
                    count: 1,
                });
                instances.push(InstanceData::new(draw.model, draw.color, [0.0; 4]));
            }
        }
        let mut order: Vec<Primitive> = Vec::new();
        let mut groups: HashMap<Primitive, Vec<InstanceData>> = HashMap::new();
        for item in items.iter().filter(|i| (i.alpha < 1.0) == translucent) {
            let group = groups.entry(item.primitive).or_insert_with(|| {
                order.push(item.primitive);
                Vec::new()
            });
            group.push(InstanceData::from_item(item));
        }
        for primitive in order {
            let group = groups.remove(&primitive).unwrap_or_default();
            batches.push(Batch {
                mesh: MeshKey::Primitive(primitive),
                start: instances.len() as u32,
                count: group.len() as u32,
            });
            instances.extend(group);
        }
    }
    (instances, batches)
}

/// Un-indexed triangle soup with one normal per face, for flat shading.
fn flat_terrain(surface: &TerrainSurface) -> Vec<Vertex> {
    let mut out = Vec::with_capacity(surface.indices.len());
    for tri in surface.indices.chunks_exact(3) {
        let [a, b, c] = [
            surface.positions[tri[0] as usize],
            surface.positions[tri[1] as usize],
            surface.positions[tri[2] as usize],
        ];
        let normal = (b - a).cross(c - a).normalize_or(Vec3::Y).to_array();
        for p in [a, b, c] {
            out.push(Vertex {
                position: p.to_array(),
                normal,
            });
        }
    }
    out
}

struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

impl GpuMesh {
    fn upload(device: &wgpu::Device, label: &str, mesh: &MeshData) -> Self {
        let vertices: Vec<Vertex> = mesh
            .positions
            .iter()
            .zip(&mesh.normals)
            .map(|(p, n)| Vertex {
                position: *p,
                normal: *n,
            })
            .collect();
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label}_vertices")),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label}_indices")),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self {
            vertex_buffer,
            index_buffer,
            index_count: mesh.indices.len() as u32,
        }
    }
}

/// An uploaded asset mesh placed in the world.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AssetDraw {
    pub asset: AssetId,
    pub model: Mat4,
    pub color: [f32; 4],
}

/// What the last frame drew.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub draw_calls: u32,
    pub instances: u32,
    pub terrain_triangles: u32,
}

/// wgpu renderer for [`SceneFrame`]s.
pub struct WgpuRenderer {
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    meshes: HashMap<Primitive, GpuMesh>,
    assets: HashMap<AssetId, GpuMesh>,
    instance_buffer: wgpu::Buffer,
    instance_capacity: u64,
    terrain_buffer: Option<wgpu::Buffer>,
    terrain_capacity: u64,
    depth_texture: wgpu::TextureView,
    surface_format: wgpu::TextureFormat,
    stats: FrameStats,
}

impl WgpuRenderer {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
    ) -> Self {
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("uniform_buffer"),
            contents: bytemuck::bytes_of(&Uniforms::new(&Camera::default(), &Lighting::default())),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("uniform_bind_group_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("uniform_bind_group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("lit_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::LIT_SHADER.into()),
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("lit_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[
                    wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<Vertex>() as u64,
                        step_mode: wgpu::VertexStepMode::Vertex,
                        attributes: &wgpu::vertex_attr_array![
                            0 => Float32x3,
                            1 => Float32x3,
                        ],
                    },
                    wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<InstanceData>() as u64,
                        step_mode: wgpu::VertexStepMode::Instance,
                        attributes: &wgpu::vertex_attr_array![
                            2 => Float32x4,
                            3 => Float32x4,
                            4 => Float32x4,
                            5 => Float32x4,
                            6 => Float32x4,
                            7 => Float32x4,
                        ],
                    },
                ],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            // Terrain is double-sided; the fragment stage flips back-face normals.
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: Default::default(),
                bias: Default::default(),
            }),
            multisample: Default::default(),
            multiview: None,
            cache: None,
        });

        let instance_buffer = Self::create_instance_buffer(device, INITIAL_INSTANCES);
        let depth_texture = Self::create_depth_texture(device, width, height);

        Self {
            pipeline,
            uniform_buffer,
            uniform_bind_group,
            meshes: HashMap::new(),
            assets: HashMap::new(),
            instance_buffer,
            instance_capacity: INITIAL_INSTANCES,
            terrain_buffer: None,
            terrain_capacity: 0,
            depth_texture,
            surface_format,
            stats: FrameStats::default(),
        }
    }

    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.depth_texture = Self::create_depth_texture(device, width, height);
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.surface_format
    }

    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    /// Upload an asset mesh so [`AssetDraw`]s can reference it.
    pub fn upload_asset(&mut self, device: &wgpu::Device, id: AssetId, mesh: &MeshData) {
        tracing::debug!(?id, triangles = mesh.triangle_count(), "uploading asset mesh");
        self.assets
            .insert(id, GpuMesh::upload(device, &format!("asset_{}", id.0), mesh));
    }

    /// Render one frame into `target`, clearing it to the fog colour.
    pub fn render(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        target: &wgpu::TextureView,
        camera: &Camera,
        frame: &SceneFrame,
        asset_draws: &[AssetDraw],
    ) {
        queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::bytes_of(&Uniforms::new(camera, &frame.lighting)),
        );

        let uploaded: Vec<AssetDraw> = asset_draws
            .iter()
            .filter(|d| self.assets.contains_key(&d.asset))
            .copied()
            .collect();
        let (mut instances, batches) = batch_items(&frame.items, &uploaded);
        for batch in &batches {
            if let MeshKey::Primitive(primitive) = batch.mesh {
                self.meshes.entry(primitive).or_insert_with(|| {
                    GpuMesh::upload(device, &primitive.name(), &primitive.mesh())
                });
            }
        }

        let terrain_vertices = frame.terrain.as_ref().map(flat_terrain);
        let terrain_instance = frame.terrain.as_ref().map(|t| {
            let index = instances.len() as u32;
            instances.push(InstanceData::new(Mat4::IDENTITY, t.color.to_rgba(1.0), [0.0; 4]));
            index..index + 1
        });

        self.ensure_instance_capacity(device, instances.len() as u64);
        if !instances.is_empty() {
            queue.write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(&instances));
        }
        if let Some(vertices) = &terrain_vertices {
            self.ensure_terrain_capacity(device, vertices.len() as u64);
            if let Some(buffer) = &self.terrain_buffer {
                queue.write_buffer(buffer, 0, bytemuck::cast_slice(vertices));
            }
        }

        let background = frame.background();
        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("render_encoder"),
        });
        let mut stats = FrameStats {
            instances: instances.len() as u32,
            ..FrameStats::default()
        };

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("main_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: target,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: background.r as f64,
                            g: background.g as f64,
                            b: background.b as f64,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });

            pass.set_pipeline(&self.pipeline);
            pass.set_bind_group(0, &self.uniform_bind_group, &[]);
            pass.set_vertex_buffer(1, self.instance_buffer.slice(..));

            if let (Some(vertices), Some(range), Some(buffer)) =
                (&terrain_vertices, terrain_instance, &self.terrain_buffer)
            {
                pass.set_vertex_buffer(0, buffer.slice(..));
                pass.draw(0..vertices.len() as u32, range);
                stats.draw_calls += 1;
                stats.terrain_triangles = vertices.len() as u32 / 3;
            }

            for batch in &batches {
                let mesh = match batch.mesh {
                    MeshKey::Primitive(primitive) => self.meshes.get(&primitive),
                    MeshKey::Asset(id) => self.assets.get(&id),
                };
                if let Some(mesh) = mesh {
                    Self::draw_batch(&mut pass, mesh, batch.start, batch.count);
                    stats.draw_calls += 1;
                }
            }
        }

        queue.submit(std::iter::once(encoder.finish()));
        self.stats = stats;
    }

    fn draw_batch(pass: &mut wgpu::RenderPass<'_>, mesh: &GpuMesh, start: u32, count: u32) {
        pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
        pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        pass.draw_indexed(0..mesh.index_count, 0, start..start + count);
    }

    fn ensure_instance_capacity(&mut self, device: &wgpu::Device, needed: u64) {
        if needed <= self.instance_capacity {
            return;
        }
        let capacity = needed.next_power_of_two();
        tracing::debug!(capacity, "growing instance buffer");
        self.instance_buffer = Self::create_instance_buffer(device, capacity);
        self.instance_capacity = capacity;
    }

    fn ensure_terrain_capacity(&mut self, device: &wgpu::Device, vertices: u64) {
        if self.terrain_buffer.is_some() && vertices <= self.terrain_capacity {
            return;
        }
        self.terrain_buffer = Some(device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("terrain_vertices"),
            size: vertices.max(3) * std::mem::size_of::<Vertex>() as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));
        self.terrain_capacity = vertices.max(3);
    }

    fn create_instance_buffer(device: &wgpu::Device, capacity: u64) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("instance_buffer"),
            size: capacity * std::mem::size_of::<InstanceData>() as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    fn create_depth_texture(
        device: &wgpu::Device,
        width: u32,
        height: u32,
    ) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("depth_texture"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&Default::default())
    }
}

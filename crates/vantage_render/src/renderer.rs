//! Scene renderer
//!
//! Owns the GPU resources nodes refer to by handle, and submits the scene:
//! for each node in sequence order, write its mvp uniform, bind its shader,
//! texture, and mesh, and issue one draw call. No batching, no instancing,
//! no sorting - the depth buffer handles visibility.
//!
//! An invalid handle means a collaborator broke its precondition; that is
//! fatal at this boundary rather than silently rendering garbage.

use bytemuck::{Pod, Zeroable};
use slotmap::SlotMap;
use vantage_core::{Camera, MeshKey, Scene, ShaderKey, TextureKey};

use crate::context::RenderContext;
use crate::mesh::{GpuMesh, MeshData, Vertex};
use crate::texture::{GpuTexture, TextureData};

/// Per-node uniform data, matching the shader's `NodeUniform`
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
struct NodeUniform {
    mvp: [[f32; 4]; 4],
}

/// A compiled shader pipeline
struct GpuShader {
    pipeline: wgpu::RenderPipeline,
}

/// Uniform buffer + bind group for one scene node slot
struct NodeBinding {
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

/// Registry of GPU resources plus the per-frame submission loop
pub struct SceneRenderer {
    meshes: SlotMap<MeshKey, GpuMesh>,
    textures: SlotMap<TextureKey, GpuTexture>,
    shaders: SlotMap<ShaderKey, GpuShader>,
    uniform_layout: wgpu::BindGroupLayout,
    texture_layout: wgpu::BindGroupLayout,
    node_bindings: Vec<NodeBinding>,
    depth_view: Option<wgpu::TextureView>,
    depth_size: (u32, u32),
}

impl SceneRenderer {
    /// Create a renderer with empty resource registries
    pub fn new(device: &wgpu::Device) -> Self {
        let uniform_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Node Uniform Layout"),
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
        });

        let texture_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Texture Layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        Self {
            meshes: SlotMap::with_key(),
            textures: SlotMap::with_key(),
            shaders: SlotMap::with_key(),
            uniform_layout,
            texture_layout,
            node_bindings: Vec::new(),
            depth_view: None,
            depth_size: (0, 0),
        }
    }

    /// Upload a mesh and return its handle
    pub fn register_mesh(&mut self, device: &wgpu::Device, data: &MeshData) -> MeshKey {
        self.meshes.insert(GpuMesh::upload(device, data))
    }

    /// Upload a texture and return its handle
    pub fn register_texture(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        data: &TextureData,
    ) -> TextureKey {
        self.textures
            .insert(GpuTexture::upload(device, queue, &self.texture_layout, data))
    }

    /// Compile a WGSL shader into a pipeline and return its handle
    pub fn register_shader(
        &mut self,
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        source: &str,
    ) -> ShaderKey {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Mesh Shader"),
            source: wgpu::ShaderSource::Wgsl(source.into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Mesh Pipeline Layout"),
            bind_group_layouts: &[&self.uniform_layout, &self.texture_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Mesh Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[Vertex::buffer_layout()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                unclipped_depth: false,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: wgpu::TextureFormat::Depth32Float,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
            cache: None,
        });

        self.shaders.insert(GpuShader { pipeline })
    }

    /// Compile the built-in textured mesh shader
    pub fn register_basic_shader(
        &mut self,
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
    ) -> ShaderKey {
        self.register_shader(device, surface_format, include_str!("shaders/mesh.wgsl"))
    }

    /// Recreate the depth texture if the surface size changed
    fn ensure_depth_texture(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        if self.depth_view.is_some() && self.depth_size == (width, height) {
            return;
        }

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Depth Texture"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Depth32Float,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });

        self.depth_view = Some(texture.create_view(&wgpu::TextureViewDescriptor::default()));
        self.depth_size = (width, height);
    }

    /// Grow the per-node binding pool to cover `count` nodes
    ///
    /// The scene is fixed-length after build, so this settles on the first
    /// frame and is a no-op afterwards.
    fn ensure_node_bindings(&mut self, device: &wgpu::Device, count: usize) {
        while self.node_bindings.len() < count {
            let buffer = device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("Node Uniform Buffer"),
                size: std::mem::size_of::<NodeUniform>() as u64,
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });

            let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("Node Uniform Bind Group"),
                layout: &self.uniform_layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: buffer.as_entire_binding(),
                }],
            });

            self.node_bindings.push(NodeBinding { buffer, bind_group });
        }
    }

    /// Render the scene: one draw call per node, in sequence order
    ///
    /// Surface errors bubble up for the caller to handle (reconfigure on
    /// `Lost`, bail out on `OutOfMemory`).
    pub fn render(
        &mut self,
        ctx: &RenderContext,
        scene: &Scene,
        camera: &Camera,
        clear_color: [f64; 4],
    ) -> Result<(), wgpu::SurfaceError> {
        self.ensure_depth_texture(&ctx.device, ctx.config.width, ctx.config.height);
        self.ensure_node_bindings(&ctx.device, scene.len());

        for (node, binding) in scene.iter().zip(&self.node_bindings) {
            let uniform = NodeUniform {
                mvp: node.mvp(camera),
            };
            ctx.queue
                .write_buffer(&binding.buffer, 0, bytemuck::bytes_of(&uniform));
        }

        let output = ctx.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Scene Encoder"),
            });

        {
            let depth_view = self.depth_view.as_ref().expect("depth texture missing");

            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: clear_color[0],
                            g: clear_color[1],
                            b: clear_color[2],
                            a: clear_color[3],
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            for (node, binding) in scene.iter().zip(&self.node_bindings) {
                let shader = self
                    .shaders
                    .get(node.shader)
                    .expect("shader handle not registered with this renderer");
                let texture = self
                    .textures
                    .get(node.texture)
                    .expect("texture handle not registered with this renderer");
                let mesh = self
                    .meshes
                    .get(node.mesh)
                    .expect("mesh handle not registered with this renderer");

                pass.set_pipeline(&shader.pipeline);
                pass.set_bind_group(0, &binding.bind_group, &[]);
                pass.set_bind_group(1, texture.bind_group(), &[]);
                pass.set_vertex_buffer(0, mesh.vertex_buffer().slice(..));

                match mesh.index_buffer() {
                    Some(indices) => {
                        pass.set_index_buffer(indices.slice(..), wgpu::IndexFormat::Uint32);
                        pass.draw_indexed(0..mesh.index_count(), 0, 0..1);
                    }
                    None => {
                        pass.draw(0..mesh.vertex_count(), 0..1);
                    }
                }
            }
        }

        ctx.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

use crate::config::GlobeConfig;
use crate::constants::GLOBE_MAX_MARKERS;
use crate::globe::lifecycle::SurfaceSize;

pub(crate) static GLOBE_WGSL: &str = include_str!("../../shaders/globe.wgsl");

/// Uniform block of `globe.wgsl`; field order and padding follow the WGSL
/// struct exactly (240 bytes).
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct GlobeUniforms {
    pub(crate) resolution: [f32; 2],
    pub(crate) phi: f32,
    pub(crate) theta: f32,
    pub(crate) dark: f32,
    pub(crate) diffuse: f32,
    pub(crate) scale: f32,
    pub(crate) map_samples: f32,
    pub(crate) map_brightness: f32,
    pub(crate) opacity: f32,
    pub(crate) marker_count: f32,
    pub(crate) _pad0: f32,
    pub(crate) base_color: [f32; 4],
    pub(crate) marker_color: [f32; 4],
    pub(crate) glow_color: [f32; 4],
    pub(crate) offset: [f32; 2],
    pub(crate) _pad1: [f32; 2],
    pub(crate) markers: [[f32; 4]; GLOBE_MAX_MARKERS],
}

impl GlobeUniforms {
    pub(crate) fn new(config: &GlobeConfig, size: SurfaceSize) -> Self {
        let rgba = |c: [f32; 3]| [c[0], c[1], c[2], 1.0];
        let mut markers = [[0.0f32; 4]; GLOBE_MAX_MARKERS];
        for (slot, m) in markers.iter_mut().zip(config.markers.iter()) {
            *slot = m.direction().extend(m.size).to_array();
        }
        Self {
            resolution: [size.width_px as f32, size.height_px as f32],
            phi: 0.0,
            theta: config.theta,
            dark: config.dark,
            diffuse: config.diffuse,
            scale: config.scale,
            map_samples: config.map_samples as f32,
            map_brightness: config.map_brightness,
            opacity: config.opacity,
            marker_count: config.markers.len().min(GLOBE_MAX_MARKERS) as f32,
            _pad0: 0.0,
            base_color: rgba(config.base_color),
            marker_color: rgba(config.marker_color),
            glow_color: rgba(config.glow_color),
            offset: config.offset,
            _pad1: [0.0; 2],
            markers,
        }
    }
}

pub(crate) struct GlobeResources {
    pub(crate) pipeline: wgpu::RenderPipeline,
    pub(crate) uniform_buffer: wgpu::Buffer,
    pub(crate) bind_group: wgpu::BindGroup,
}

pub(crate) fn create_globe_resources(
    device: &wgpu::Device,
    color_format: wgpu::TextureFormat,
) -> GlobeResources {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("globe_shader"),
        source: wgpu::ShaderSource::Wgsl(GLOBE_WGSL.into()),
    });
    let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("globe_bgl"),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
    });
    let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("globe_pl"),
        bind_group_layouts: &[&bgl],
        push_constant_ranges: &[],
    });
    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("globe_pipeline"),
        layout: Some(&pl),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_fullscreen"),
            buffers: &[],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState::default(),
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_globe"),
            targets: &[Some(wgpu::ColorTargetState {
                format: color_format,
                blend: Some(wgpu::BlendState::PREMULTIPLIED_ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    });
    let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("globe_uniforms"),
        size: std::mem::size_of::<GlobeUniforms>() as u64,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("globe_bg"),
        layout: &bgl,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: uniform_buffer.as_entire_binding(),
        }],
    });

    GlobeResources {
        pipeline,
        uniform_buffer,
        bind_group,
    }
}

use crate::config::GlobeConfig;
use crate::error::WidgetError;
use crate::globe::lifecycle::{GlobeFactory, GlobeInstance, SurfaceSize};
use crate::globe::pipeline::{create_globe_resources, GlobeResources, GlobeUniforms};
use std::rc::Rc;
use web_sys as web;

struct GpuShared {
    device: wgpu::Device,
    queue: wgpu::Queue,
}

/// Adapter and device for one globe canvas, requested once per mount.
/// Every [`GlobeRenderer`] built from it gets its own surface.
pub struct GpuContext {
    canvas: web::HtmlCanvasElement,
    instance: wgpu::Instance,
    adapter: wgpu::Adapter,
    shared: Rc<GpuShared>,
}

impl GpuContext {
    pub async fn new(canvas: &web::HtmlCanvasElement) -> Result<Self, WidgetError> {
        let instance = wgpu::Instance::default();
        let probe = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| WidgetError::Gpu(e.to_string()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&probe),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| WidgetError::Gpu("no WebGPU adapter".to_string()))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Use default limits on web to avoid passing unknown fields to older WebGPU impls
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: Some("globe_device"),
                },
                None,
            )
            .await
            .map_err(|e| WidgetError::Gpu(format!("request_device: {:?}", e)))?;
        drop(probe);
        Ok(Self {
            canvas: canvas.clone(),
            instance,
            adapter,
            shared: Rc::new(GpuShared { device, queue }),
        })
    }
}

impl GlobeFactory for GpuContext {
    type Instance = GlobeRenderer;

    fn create(
        &mut self,
        size: SurfaceSize,
        config: &GlobeConfig,
    ) -> Result<GlobeRenderer, WidgetError> {
        self.canvas.set_width(size.width_px);
        self.canvas.set_height(size.height_px);

        let surface = self
            .instance
            .create_surface(wgpu::SurfaceTarget::Canvas(self.canvas.clone()))
            .map_err(|e| WidgetError::Gpu(e.to_string()))?;
        let caps = surface.get_capabilities(&self.adapter);
        // Colors are authored in display space, so prefer a non-sRGB target.
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8Unorm | wgpu::TextureFormat::Rgba8Unorm
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| WidgetError::Gpu("surface reports no formats".to_string()))?;
        let alpha_mode = if caps
            .alpha_modes
            .contains(&wgpu::CompositeAlphaMode::PreMultiplied)
        {
            wgpu::CompositeAlphaMode::PreMultiplied
        } else {
            caps.alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto)
        };
        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width_px,
            height: size.height_px,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&self.shared.device, &surface_config);

        let resources = create_globe_resources(&self.shared.device, format);
        let uniforms = GlobeUniforms::new(config, size);
        log::info!(
            "[globe] surface {}x{} ({:?}, {:?})",
            size.width_px,
            size.height_px,
            format,
            alpha_mode
        );
        Ok(GlobeRenderer {
            surface,
            surface_config,
            shared: self.shared.clone(),
            resources,
            uniforms,
        })
    }
}

pub struct GlobeRenderer {
    surface: wgpu::Surface<'static>,
    surface_config: wgpu::SurfaceConfiguration,
    shared: Rc<GpuShared>,
    resources: GlobeResources,
    uniforms: GlobeUniforms,
}

impl GlobeInstance for GlobeRenderer {
    fn render(&mut self, phi: f32) -> Result<(), WidgetError> {
        let frame = match self.surface.get_current_texture() {
            Ok(f) => f,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface
                    .configure(&self.shared.device, &self.surface_config);
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => return Ok(()),
            Err(e) => return Err(WidgetError::Gpu(e.to_string())),
        };
        self.uniforms.phi = phi;
        self.shared.queue.write_buffer(
            &self.resources.uniform_buffer,
            0,
            bytemuck::bytes_of(&self.uniforms),
        );
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder =
            self.shared
                .device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("globe_encoder"),
                });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("globe_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_pipeline(&self.resources.pipeline);
            rpass.set_bind_group(0, &self.resources.bind_group, &[]);
            rpass.draw(0..3, 0..1);
        }
        self.shared.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }

    fn destroy(self) {
        log::info!(
            "[globe] disposing {}x{} surface",
            self.surface_config.width,
            self.surface_config.height
        );
        self.resources.uniform_buffer.destroy();
    }
}

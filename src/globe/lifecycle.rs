use crate::config::GlobeConfig;
use crate::constants::GLOBE_MAX_SURFACE_PX;
use crate::error::WidgetError;
use std::f64::consts::TAU;

/// Backing size of a globe surface. The globe is always square: its side is
/// the container's CSS width times the oversampling factor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceSize {
    pub css_width: f64,
    pub width_px: u32,
    pub height_px: u32,
}

impl SurfaceSize {
    pub fn square(container_width: f64, oversample: f64) -> Self {
        let css_width = if container_width.is_finite() {
            container_width.max(0.0)
        } else {
            0.0
        };
        let side = ((css_width * oversample).round() as u32).clamp(1, GLOBE_MAX_SURFACE_PX);
        Self {
            css_width,
            width_px: side,
            height_px: side,
        }
    }
}

/// One constructed globe renderer bound to a surface of fixed size.
pub trait GlobeInstance {
    fn render(&mut self, phi: f32) -> Result<(), WidgetError>;
    /// Release the surface and GPU resources.
    fn destroy(self);
}

/// Builds globe renderers. The configuration is handed over at every
/// construction and never changes for the lifetime of the widget.
pub trait GlobeFactory {
    type Instance: GlobeInstance;

    fn create(
        &mut self,
        size: SurfaceSize,
        config: &GlobeConfig,
    ) -> Result<Self::Instance, WidgetError>;
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GlobeRenderState {
    /// Accumulated rotation; grows without bound.
    pub phi: f64,
}

impl GlobeRenderState {
    pub fn advance(&mut self, step: f64) {
        self.phi += step;
    }

    /// Rotation handed to the renderer, reduced to `[0, 2π)` to keep f32 precision.
    pub fn render_phi(&self) -> f32 {
        self.phi.rem_euclid(TAU) as f32
    }
}

/// Mount / resize / frame / unmount sequencing for the globe.
///
/// Holds at most one instance. A resize always disposes the current instance
/// before constructing its replacement; there is no in-place resize.
pub struct GlobeLifecycle<F: GlobeFactory> {
    factory: F,
    config: GlobeConfig,
    oversample: f64,
    instance: Option<F::Instance>,
    size: Option<SurfaceSize>,
    render_state: GlobeRenderState,
    torn_down: bool,
}

impl<F: GlobeFactory> GlobeLifecycle<F> {
    pub fn new(factory: F, config: GlobeConfig, oversample: f64) -> Self {
        Self {
            factory,
            config,
            oversample,
            instance: None,
            size: None,
            render_state: GlobeRenderState::default(),
            torn_down: false,
        }
    }

    pub fn mount(&mut self, container_width: f64) -> Result<(), WidgetError> {
        if self.torn_down || self.instance.is_some() {
            return Ok(());
        }
        self.construct(container_width)
    }

    pub fn resize(&mut self, container_width: f64) -> Result<(), WidgetError> {
        if self.torn_down {
            return Ok(());
        }
        if let Some(old) = self.instance.take() {
            old.destroy();
        }
        self.construct(container_width)
    }

    /// Draw with the current angle, then advance it by one step.
    pub fn frame(&mut self) -> Result<(), WidgetError> {
        if self.torn_down {
            return Ok(());
        }
        let Some(instance) = self.instance.as_mut() else {
            return Ok(());
        };
        let phi = self.render_state.render_phi();
        self.render_state.advance(self.config.phi_step);
        instance.render(phi)
    }

    pub fn unmount(&mut self) {
        if let Some(instance) = self.instance.take() {
            instance.destroy();
        }
        self.size = None;
        self.torn_down = true;
    }

    pub fn phi(&self) -> f64 {
        self.render_state.phi
    }

    pub fn size(&self) -> Option<SurfaceSize> {
        self.size
    }

    pub fn has_instance(&self) -> bool {
        self.instance.is_some()
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }

    pub fn config(&self) -> &GlobeConfig {
        &self.config
    }

    fn construct(&mut self, container_width: f64) -> Result<(), WidgetError> {
        let size = SurfaceSize::square(container_width, self.oversample);
        match self.factory.create(size, &self.config) {
            Ok(instance) => {
                self.instance = Some(instance);
                self.size = Some(size);
                Ok(())
            }
            Err(e) => {
                self.size = None;
                Err(e)
            }
        }
    }
}

impl<F: GlobeFactory> Drop for GlobeLifecycle<F> {
    fn drop(&mut self) {
        self.unmount();
    }
}

//! WGPU device, queue and surface management

use std::sync::Arc;

use winit::{dpi::PhysicalSize, window::Window};

/// Errors raised while creating the GPU context
#[derive(Debug)]
pub enum ContextError {
    /// The window surface could not be created
    Surface(String),
    /// No adapter is compatible with the surface
    NoAdapter,
    /// The adapter refused to create a device
    Device(String),
}

impl std::fmt::Display for ContextError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContextError::Surface(msg) => write!(f, "Surface creation failed: {}", msg),
            ContextError::NoAdapter => write!(f, "No compatible GPU adapter found"),
            ContextError::Device(msg) => write!(f, "Device creation failed: {}", msg),
        }
    }
}

impl std::error::Error for ContextError {}

/// GPU state bound to a window
pub struct RenderContext {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    /// Format render targets are viewed as; always non-sRGB
    pub view_format: wgpu::TextureFormat,
    pub size: PhysicalSize<u32>,
}

impl RenderContext {
    /// Create a context, choosing the present mode from `vsync`
    pub async fn with_vsync(window: Arc<Window>, vsync: bool) -> Result<Self, ContextError> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance
            .create_surface(window)
            .map_err(|e| ContextError::Surface(e.to_string()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(ContextError::NoAdapter)?;
        log::info!("Using adapter: {}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("tetra device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::default(),
                },
                None,
            )
            .await
            .map_err(|e| ContextError::Device(e.to_string()))?;

        // Validation errors outside an error scope are logged, not fatal
        device.on_uncaptured_error(Box::new(|err| {
            log::error!("GPU error: {}", err);
        }));

        let caps = surface.get_capabilities(&adapter);
        let (format, view_format) = choose_surface_format(&caps.formats)
            .ok_or_else(|| ContextError::Surface("surface reports no formats".to_string()))?;
        let present_mode = choose_present_mode(&caps.present_modes, vsync);
        log::debug!(
            "Surface format {:?} viewed as {:?}, present mode {:?}",
            format,
            view_format,
            present_mode
        );

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode,
            alpha_mode: caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: if view_format == format {
                vec![]
            } else {
                vec![view_format]
            },
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            view_format,
            size,
        })
    }

    /// Reconfigure the surface for a new size. Zero sizes are ignored.
    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.size = new_size;
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
    }

    /// Reapply the current configuration (after a lost surface)
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    /// Width / height of the configured surface
    pub fn aspect_ratio(&self) -> f32 {
        aspect_ratio(self.config.width, self.config.height)
    }
}

/// Aspect ratio guarded against a zero height
pub fn aspect_ratio(width: u32, height: u32) -> f32 {
    width.max(1) as f32 / height.max(1) as f32
}

/// Pick the surface format and the format its views are rendered through.
///
/// Shading and the clear colour are written as-is, so the view must not
/// gamma-encode. A non-sRGB format is used directly; when the surface only
/// offers sRGB, its first format is kept and viewed through the linear variant.
pub fn choose_surface_format(
    available: &[wgpu::TextureFormat],
) -> Option<(wgpu::TextureFormat, wgpu::TextureFormat)> {
    if let Some(linear) = available.iter().copied().find(|f| !f.is_srgb()) {
        return Some((linear, linear));
    }
    let first = available.first().copied()?;
    Some((first, first.remove_srgb_suffix()))
}

/// Pick a present mode: `Fifo` for vsync, otherwise the lowest-latency
/// mode the surface offers.
pub fn choose_present_mode(available: &[wgpu::PresentMode], vsync: bool) -> wgpu::PresentMode {
    if vsync {
        return wgpu::PresentMode::Fifo;
    }
    [wgpu::PresentMode::Mailbox, wgpu::PresentMode::Immediate]
        .into_iter()
        .find(|m| available.contains(m))
        .unwrap_or(wgpu::PresentMode::Fifo)
}

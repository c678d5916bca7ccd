//! # pointview GPU
//!
//! wgpu backend for the pointview viewer: device setup and the marker
//! renderer that draws shaded triangles into a winit window surface.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use pointview_gpu::{MarkerRenderer, RenderConfig};
//!
//! async fn example(window: Arc<winit::window::Window>) -> pointview_core::Result<()> {
//!     let mut renderer = MarkerRenderer::new(window, RenderConfig::default()).await?;
//!     renderer.upload_vertices(&[]);
//!     renderer.render()?;
//!     Ok(())
//! }
//! ```

pub mod device;
pub mod renderer;

pub use device::GpuContext;
pub use renderer::{CameraUniform, MarkerRenderer, MarkerVertex, RenderConfig};

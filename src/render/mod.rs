//! Surfaces, compositing and frame encoding.

pub mod renderer;
pub mod surface;

pub use renderer::DiffRenderer;
pub use surface::Surface;

//! Rendering subsystem for drawing timeline charts.
//!
//! - Software raster surface (pixel buffer, immediate-mode ops)
//! - Text shaping and rasterization
//! - Scene rendering (the fixed layer order)
//! - Render host (shared surface, display vs. export resolution)

pub mod host;
pub mod scene;
pub mod surface;
pub mod text;

pub use host::{RenderHost, ScaledRenderer, EXPORT_SCALE_FACTOR};
pub use scene::render_scene;
pub use surface::{PixelSurface, TextAlign};
pub use text::{FontSpec, TextSystem};

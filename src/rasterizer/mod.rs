//! Terminal software rasterizer
//!
//! Features:
//! - Pinhole projection onto a fixed-width image plane
//! - Dual-basis (barycentric) coverage test per character cell
//! - Nearest-wins depth per cell, using squared distance to the camera
//! - Outline glyph on triangle edges, fill glyph inside

mod camera;
mod math;
mod types;
mod render;

pub use camera::*;
pub use math::*;
pub use types::*;
pub use render::*;

/// Width of the image plane in world units
pub const PLANE_WIDTH: f64 = 5.0;

/// Character cell width / height (8x15 px glyphs)
pub const GLYPH_ASPECT: f64 = 8.0 / 15.0;

//! Tetraspin: terminal software rasterizer
//!
//! Renders triangle meshes as ANSI-coloured glyphs:
//! - Pinhole camera with a fixed-width image plane
//! - Per-cell coverage and nearest-wins depth
//! - Outline and fill glyphs per triangle

pub mod config;
pub mod display;
pub mod input;
pub mod rasterizer;
pub mod world;

//! World module - mesh construction for the renderer
//!
//! Builders produce plain [`Scene`](crate::rasterizer::Scene) values that
//! are handed to the renderer once and owned by it afterwards.

mod mesh;

pub use mesh::*;

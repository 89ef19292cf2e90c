//! Mesh builders

use std::f64::consts::FRAC_PI_6;
use crate::rasterizer::{PaintSpec, Scene, Vec3};

/// Corners of the template tetrahedron: an equilateral base in the z = 0
/// plane (circumradius 1) and an apex above its centre
pub fn tetrahedron_template() -> [Vec3; 4] {
    let (s, c) = FRAC_PI_6.sin_cos();
    [
        Vec3::new(0.0, -1.0, 0.0),
        Vec3::new(-c, s, 0.0),
        Vec3::new(c, s, 0.0),
        Vec3::new(0.0, 0.0, (2.0f64 / 3.0).sqrt()),
    ]
}

/// Build a tetrahedron scaled by `size` and placed at `base`, one triangle
/// per face
pub fn tetrahedron(size: f64, base: Vec3, outline: PaintSpec, fill: PaintSpec) -> Scene {
    let vertices = tetrahedron_template().map(|v| v * size + base);

    let mut scene = Scene::new();
    for i in 0..4 {
        for j in (i + 1)..4 {
            for k in (j + 1)..4 {
                scene.add_triangle([vertices[i], vertices[j], vertices[k]], outline, fill);
            }
        }
    }
    scene
}

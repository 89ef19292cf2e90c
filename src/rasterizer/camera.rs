//! Pinhole camera and plane projection
//!
//! The camera looks along `forward`, with an image plane `depth` units in
//! front of the focal point. A point is projected by intersecting the line
//! from the focal point to it with that plane.

use serde::{Deserialize, Serialize};
use super::math::Vec3;
use super::types::Triangle;

/// Camera position and orientation, mutated by the driver between frames
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraState {
    pub position: Vec3,
    /// Heading in the xy plane (radians)
    pub xangle: f64,
    /// Elevation (radians)
    pub zangle: f64,
    /// Focal point to image plane distance; sets field of view
    pub depth: f64,
}

/// Orthonormal camera axes derived from the two angles
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraBasis {
    pub right: Vec3,
    pub up: Vec3,
    pub forward: Vec3,
}

/// A vertex on the image plane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projected {
    /// Screen-up coordinate (world units on the plane)
    pub y: f64,
    /// Screen-right coordinate (world units on the plane)
    pub x: f64,
    /// Squared distance from the focal point to the original vertex
    pub distance: f64,
}

impl CameraState {
    pub fn new(depth: f64) -> Self {
        Self {
            position: Vec3::ZERO,
            xangle: 0.0,
            zangle: 0.0,
            depth,
        }
    }

    pub fn basis(&self) -> CameraBasis {
        let (sx, cx) = self.xangle.sin_cos();
        let right = Vec3::new(cx, sx, 0.0);
        let up = Vec3::new(
            (-self.zangle).sin() * sx,
            self.zangle.sin() * cx,
            self.zangle.cos(),
        );
        let forward = up.cross(right);
        CameraBasis { right, up, forward }
    }

    /// Project a single point, or `None` if it lies on or behind the camera plane
    pub fn project_point(&self, basis: &CameraBasis, p: Vec3) -> Option<Projected> {
        let a = p - self.position;
        let q = a.dot(basis.forward);
        // Also rejects NaN
        if !(q > 0.0) {
            return None;
        }

        let l = self.depth / q;
        Some(Projected {
            y: a.dot(basis.up) * l,
            x: a.dot(basis.right) * l,
            distance: (self.position - p).length_squared(),
        })
    }

    /// Project all three vertices. Fails as a whole if any vertex fails.
    pub fn project(&self, triangle: &Triangle) -> Option<[Projected; 3]> {
        let basis = self.basis();
        let [a, b, c] = triangle.vertices;
        Some([
            self.project_point(&basis, a)?,
            self.project_point(&basis, b)?,
            self.project_point(&basis, c)?,
        ])
    }

    /// Strafe along the right axis
    pub fn move_lateral(&mut self, distance: f64) {
        let (s, c) = self.xangle.sin_cos();
        self.position = self.position + Vec3::new(c, s, 0.0) * distance;
    }

    /// Move along the heading, staying level
    pub fn move_forward(&mut self, distance: f64) {
        let (s, c) = self.xangle.sin_cos();
        self.position = self.position + Vec3::new(-s, c, 0.0) * distance;
    }

    /// Move along the up axis
    pub fn move_vertical(&mut self, distance: f64) {
        let (sx, cx) = self.xangle.sin_cos();
        let (sz, cz) = self.zangle.sin_cos();
        self.position = self.position + Vec3::new(-sz * sx, sz * cx, cz) * distance;
    }

    pub fn turn(&mut self, angle: f64) {
        self.xangle += angle;
    }

    pub fn tilt(&mut self, angle: f64) {
        self.zangle += angle;
    }
}

impl Default for CameraState {
    fn default() -> Self {
        Self::new(1.0)
    }
}

/// Circles the camera around a vertical axis while turning it to keep the
/// axis in view
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orbit {
    pub theta: f64,
    pub omega: f64,
    pub radius: f64,
    pub center_x: f64,
    pub center_y: f64,
}

impl Orbit {
    pub fn new(omega: f64, radius: f64, center_x: f64, center_y: f64) -> Self {
        Self {
            theta: 0.0,
            omega,
            radius,
            center_x,
            center_y,
        }
    }

    /// Advance one frame
    pub fn step(&mut self, camera: &mut CameraState) {
        camera.xangle -= self.omega;
        self.theta -= self.omega;
        let (s, c) = self.theta.sin_cos();
        camera.position.x = self.center_x + self.radius * s;
        camera.position.y = self.center_y - self.radius * c;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rasterizer::types::PaintSpec;
    use std::f64::consts::{FRAC_PI_2, PI};

    const EPS: f64 = 1e-9;

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).length_squared() < EPS
    }

    fn tri(a: Vec3, b: Vec3, c: Vec3) -> Triangle {
        Triangle::new([a, b, c], PaintSpec::OUTLINE, PaintSpec::FILL)
    }

    #[test]
    fn test_default_basis_looks_down_y() {
        let basis = CameraState::new(1.0).basis();
        assert!(close(basis.right, Vec3::new(1.0, 0.0, 0.0)));
        assert!(close(basis.up, Vec3::new(0.0, 0.0, 1.0)));
        assert!(close(basis.forward, Vec3::new(0.0, 1.0, 0.0)));
    }

    #[test]
    fn test_basis_is_orthonormal() {
        let mut cam = CameraState::new(1.0);
        cam.xangle = 0.7;
        cam.zangle = -0.3;
        let b = cam.basis();
        for v in [b.right, b.up, b.forward] {
            assert!((v.length_squared() - 1.0).abs() < EPS);
        }
        assert!(b.right.dot(b.up).abs() < EPS);
        assert!(b.right.dot(b.forward).abs() < EPS);
        assert!(b.up.dot(b.forward).abs() < EPS);
    }

    #[test]
    fn test_project_point_ahead() {
        let cam = CameraState::new(2.0);
        let basis = cam.basis();
        let p = cam.project_point(&basis, Vec3::new(1.0, 4.0, -3.0)).unwrap();
        // l = depth / q = 2 / 4
        assert!((p.x - 0.5).abs() < EPS);
        assert!((p.y + 1.5).abs() < EPS);
        assert!((p.distance - 26.0).abs() < EPS);
    }

    #[test]
    fn test_project_finite_for_triangle_in_front() {
        let mut cam = CameraState::new(3.0);
        cam.position = Vec3::new(2.0, -1.0, 0.5);
        cam.xangle = 0.2;
        let t = tri(
            Vec3::new(0.0, 10.0, 0.0),
            Vec3::new(3.0, 12.0, 1.0),
            Vec3::new(-2.0, 9.0, 2.0),
        );
        let projected = cam.project(&t).unwrap();
        for p in projected {
            assert!(p.x.is_finite() && p.y.is_finite() && p.distance.is_finite());
        }
    }

    #[test]
    fn test_project_fails_on_camera_plane() {
        let cam = CameraState::new(1.0);
        let t = tri(
            Vec3::new(0.0, 5.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 5.0, 1.0),
        );
        assert!(cam.project(&t).is_none());
    }

    #[test]
    fn test_project_fails_behind_camera() {
        let cam = CameraState::new(1.0);
        let t = tri(
            Vec3::new(0.0, 5.0, 0.0),
            Vec3::new(1.0, 5.0, 0.0),
            Vec3::new(0.0, -0.1, 1.0),
        );
        assert!(cam.project(&t).is_none());
    }

    #[test]
    fn test_move_lateral_and_forward() {
        let mut cam = CameraState::new(1.0);
        cam.move_lateral(2.0);
        assert!(close(cam.position, Vec3::new(2.0, 0.0, 0.0)));
        cam.move_forward(1.0);
        assert!(close(cam.position, Vec3::new(2.0, 1.0, 0.0)));

        cam.turn(FRAC_PI_2);
        cam.move_forward(1.0);
        assert!(close(cam.position, Vec3::new(1.0, 1.0, 0.0)));
    }

    #[test]
    fn test_move_vertical_follows_up_axis() {
        let mut cam = CameraState::new(1.0);
        cam.xangle = 0.4;
        cam.tilt(0.25);
        let up = cam.basis().up;
        cam.move_vertical(0.5);
        assert!(close(cam.position, up * 0.5));
    }

    #[test]
    fn test_orbit_step() {
        let mut cam = CameraState::new(3.0);
        cam.position.z = 4.0;
        let mut orbit = Orbit::new(PI / 2.0, 30.0, 0.0, 60.0);
        orbit.step(&mut cam);
        assert!((cam.xangle + PI / 2.0).abs() < EPS);
        assert!(close(cam.position, Vec3::new(-30.0, 60.0, 4.0)));
        orbit.step(&mut cam);
        assert!(close(cam.position, Vec3::new(0.0, 90.0, 4.0)));
    }

    #[test]
    fn test_orbit_keeps_center_ahead() {
        let mut cam = CameraState::new(3.0);
        let mut orbit = Orbit::new(0.02, 30.0, 0.0, 60.0);
        for _ in 0..100 {
            orbit.step(&mut cam);
            let to_center = Vec3::new(0.0, 60.0, 0.0) - cam.position;
            let f = cam.basis().forward;
            assert!((to_center.dot(f) - 30.0).abs() < 1e-6);
        }
    }
}

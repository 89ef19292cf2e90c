//! Core rendering functions
//! Triangle rasterization onto a character grid

use std::fmt;
use log::{debug, trace};
use super::camera::{CameraState, Projected};
use super::math::Vec2;
use super::types::{FrameCell, Scene, Triangle};
use super::{GLYPH_ASPECT, PLANE_WIDTH};

/// Character grid for software rendering, row-major, row 0 at the top
pub struct FrameBuffer {
    pub cells: Vec<FrameCell>,
    pub width: usize,
    pub height: usize,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            cells: vec![FrameCell::BLANK; width * height],
            width,
            height,
        }
    }

    pub fn clear(&mut self) {
        self.cells.fill(FrameCell::BLANK);
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&FrameCell> {
        if row < self.height && col < self.width {
            self.cells.get(row * self.width + col)
        } else {
            None
        }
    }

    /// Rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[FrameCell]> + '_ {
        // chunks() panics on zero; an empty grid has no rows anyway
        self.cells.chunks(self.width.max(1))
    }

    /// Array index of a centred coordinate (`y` up, `x` right, origin in the middle)
    fn index_of(&self, y: i64, x: i64) -> Option<usize> {
        let row = (self.height / 2) as i64 - 1 - y;
        let col = x + (self.width / 2) as i64;
        if row < 0 || col < 0 || row as usize >= self.height || col as usize >= self.width {
            return None;
        }
        Some(row as usize * self.width + col as usize)
    }
}

/// Stable index of a scene stored in a [`Renderer`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SceneHandle(usize);

/// Error type for renderer operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    SceneCapacityExhausted { capacity: usize },
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::SceneCapacityExhausted { capacity } => {
                write!(f, "Scene capacity exhausted (all {} slots in use)", capacity)
            }
        }
    }
}

impl std::error::Error for RenderError {}

/// Owns the camera, the scenes and the frame buffer they are drawn into
pub struct Renderer {
    fb: FrameBuffer,
    camera: CameraState,
    // Reserved up front and never grown past, so handles stay valid
    scenes: Vec<Scene>,
    max_scenes: usize,
}

impl Renderer {
    pub fn new(rows: usize, cols: usize, camera_depth: f64, max_scenes: usize) -> Self {
        debug!(
            "Renderer {}x{} cells, camera depth {}, {} scene slots",
            cols, rows, camera_depth, max_scenes
        );
        Self {
            fb: FrameBuffer::new(cols, rows),
            camera: CameraState::new(camera_depth),
            scenes: Vec::with_capacity(max_scenes),
            max_scenes,
        }
    }

    pub fn rows(&self) -> usize {
        self.fb.height
    }

    pub fn cols(&self) -> usize {
        self.fb.width
    }

    pub fn camera(&self) -> &CameraState {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut CameraState {
        &mut self.camera
    }

    pub fn scene_count(&self) -> usize {
        self.scenes.len()
    }

    pub fn scene_capacity(&self) -> usize {
        self.max_scenes
    }

    /// Store a scene for rendering
    pub fn add_scene(&mut self, scene: Scene) -> Result<SceneHandle, RenderError> {
        if self.scenes.len() >= self.max_scenes {
            return Err(RenderError::SceneCapacityExhausted {
                capacity: self.max_scenes,
            });
        }
        let handle = SceneHandle(self.scenes.len());
        debug!("Added scene {} ({} triangles)", handle.0, scene.len());
        self.scenes.push(scene);
        Ok(handle)
    }

    pub fn scene(&self, handle: SceneHandle) -> Option<&Scene> {
        self.scenes.get(handle.0)
    }

    pub fn scene_mut(&mut self, handle: SceneHandle) -> Option<&mut Scene> {
        self.scenes.get_mut(handle.0)
    }

    /// Clear the frame and draw every triangle of every scene into it
    pub fn render(&mut self) -> &FrameBuffer {
        self.fb.clear();

        let mut drawn = 0usize;
        let mut skipped = 0usize;
        for scene in &self.scenes {
            for triangle in scene.iter() {
                if draw_triangle(&mut self.fb, &self.camera, triangle) {
                    drawn += 1;
                } else {
                    skipped += 1;
                }
            }
        }
        trace!("Frame: {} triangles drawn, {} skipped", drawn, skipped);

        &self.fb
    }
}

/// Dual basis of a screen-space triangle: maps a point to `(c1, c2)` with
/// `p = r0 + c1 * u1 + c2 * u2`
struct DualBasis {
    r0: Vec2,
    v1: Vec2,
    v2: Vec2,
}

impl DualBasis {
    fn new(r0: Vec2, u1: Vec2, u2: Vec2) -> Self {
        Self {
            r0,
            v1: u1.reciprocal(u2),
            v2: u2.reciprocal(u1),
        }
    }

    fn coords(&self, y: i64, x: i64) -> (f64, f64) {
        let r = Vec2::new(y as f64, x as f64) - self.r0;
        (r.dot(self.v1), r.dot(self.v2))
    }

    fn contains(&self, y: i64, x: i64) -> bool {
        let (c1, c2) = self.coords(y, x);
        (0.0..=1.0).contains(&c1) && (0.0..=1.0).contains(&c2) && c1 + c2 <= 1.0
    }

    /// Covered, with at least one diagonal neighbour uncovered
    fn is_edge(&self, y: i64, x: i64) -> bool {
        [(-1, -1), (-1, 1), (1, -1), (1, 1)]
            .iter()
            .any(|&(dy, dx)| !self.contains(y + dy, x + dx))
    }
}

/// Integer cell range `lo..=hi` of a bounding box clamped to the screen half-extent
fn clamped_range(min: f64, max: f64, extent: usize) -> (i64, i64) {
    let half = extent as f64 / 2.0;
    let lo = (-half).max(min.floor()) as i64;
    let hi = (half - 1.0).min(max.ceil());
    // hi may be below lo; the caller's loop is then empty
    (lo, hi.floor() as i64)
}

/// Rasterize a single triangle. Returns false if it was skipped.
fn draw_triangle(fb: &mut FrameBuffer, camera: &CameraState, t: &Triangle) -> bool {
    let Some(mut scs) = camera.project(t) else {
        return false;
    };

    // Coincident vertices on screen: no orientation to draw
    for i in 0..3 {
        for j in (i + 1)..3 {
            if scs[i].y == scs[j].y && scs[i].x == scs[j].x {
                return false;
            }
        }
    }

    // Plane units to character cells
    let scale_x = fb.width as f64 / PLANE_WIDTH;
    let scale_y = scale_x * GLYPH_ASPECT;
    for p in scs.iter_mut() {
        p.x *= scale_x;
        p.y *= scale_y;
    }

    let ymin = scs.iter().map(|p| p.y).fold(f64::INFINITY, f64::min).floor();
    let ymax = scs.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max).ceil();
    let xmin = scs.iter().map(|p| p.x).fold(f64::INFINITY, f64::min).floor();
    let xmax = scs.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max).ceil();

    let dist0 = scs[0].distance;
    let dc1 = scs[1].distance - dist0;
    let dc2 = scs[2].distance - dist0;

    let screen = |p: &Projected| Vec2::new(p.y, p.x);
    let r0 = screen(&scs[0]);
    let basis = DualBasis::new(r0, screen(&scs[1]) - r0, screen(&scs[2]) - r0);

    let (y_lo, y_hi) = clamped_range(ymin, ymax, fb.height);
    let (x_lo, x_hi) = clamped_range(xmin, xmax, fb.width);

    for y in y_lo..=y_hi {
        for x in x_lo..=x_hi {
            let Some(idx) = fb.index_of(y, x) else {
                continue;
            };

            let (c1, c2) = basis.coords(y, x);
            let dist = dist0 + dc1 * c1 + dc2 * c2;
            // Nearer things cover farther ones
            if dist >= fb.cells[idx].distance {
                continue;
            }
            if !basis.contains(y, x) {
                continue;
            }

            let paint = if basis.is_edge(y, x) { t.outline } else { t.fill };
            fb.cells[idx] = FrameCell::painted(paint, dist);
        }
    }

    true
}

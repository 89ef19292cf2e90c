//! Core types for the rasterizer

use std::fmt;
use serde::{Deserialize, Serialize};
use super::math::Vec3;

/// ANSI foreground colour (SGR 30-37, bright 90-97)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum FgColor {
    #[default]
    None = 0,
    Black = 30,
    Red = 31,
    Green = 32,
    Yellow = 33,
    Blue = 34,
    Magenta = 35,
    Cyan = 36,
    White = 37,
    BrightBlack = 90,
    BrightRed = 91,
    BrightGreen = 92,
    BrightYellow = 93,
    BrightBlue = 94,
    BrightMagenta = 95,
    BrightCyan = 96,
    BrightWhite = 97,
}

impl FgColor {
    /// SGR parameter; 0 means "no colour"
    pub fn code(self) -> u8 {
        self as u8
    }
}

/// ANSI background colour (SGR 40-47, bright 100-107)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum BgColor {
    #[default]
    None = 0,
    Black = 40,
    Red = 41,
    Green = 42,
    Yellow = 43,
    Blue = 44,
    Magenta = 45,
    Cyan = 46,
    White = 47,
    BrightBlack = 100,
    BrightRed = 101,
    BrightGreen = 102,
    BrightYellow = 103,
    BrightBlue = 104,
    BrightMagenta = 105,
    BrightCyan = 106,
    BrightWhite = 107,
}

impl BgColor {
    /// SGR parameter; 0 means "no colour"
    pub fn code(self) -> u8 {
        self as u8
    }
}

/// What to draw in a cell: one glyph plus its colours
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaintSpec {
    pub glyph: char,
    pub fg: FgColor,
    pub bg: BgColor,
}

impl PaintSpec {
    /// Outline paint used when a mesh builder doesn't pick one
    pub const OUTLINE: PaintSpec = PaintSpec::new('*', FgColor::None, BgColor::None);
    /// Fill paint used when a mesh builder doesn't pick one
    pub const FILL: PaintSpec = PaintSpec::new(' ', FgColor::None, BgColor::None);

    pub const fn new(glyph: char, fg: FgColor, bg: BgColor) -> Self {
        Self { glyph, fg, bg }
    }

    pub const fn plain(glyph: char) -> Self {
        Self::new(glyph, FgColor::None, BgColor::None)
    }
}

/// A world-space triangle with separate paint for its outline and interior
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    pub vertices: [Vec3; 3],
    pub outline: PaintSpec,
    pub fill: PaintSpec,
}

impl Triangle {
    pub fn new(vertices: [Vec3; 3], outline: PaintSpec, fill: PaintSpec) -> Self {
        Self { vertices, outline, fill }
    }
}

/// An ordered list of triangles, handed to the renderer as one unit
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub triangles: Vec<Triangle>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_triangle(&mut self, vertices: [Vec3; 3], outline: PaintSpec, fill: PaintSpec) {
        self.triangles.push(Triangle::new(vertices, outline, fill));
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Triangle> {
        self.triangles.iter()
    }
}

/// One character cell of the frame buffer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameCell {
    pub glyph: char,
    pub fg: FgColor,
    pub bg: BgColor,
    /// Squared distance from the camera to the point that painted this cell
    pub distance: f64,
}

impl FrameCell {
    /// Blank cell; any finite distance overwrites it
    pub const BLANK: FrameCell = FrameCell {
        glyph: ' ',
        fg: FgColor::None,
        bg: BgColor::None,
        distance: f64::INFINITY,
    };

    pub fn painted(paint: PaintSpec, distance: f64) -> Self {
        Self {
            glyph: paint.glyph,
            fg: paint.fg,
            bg: paint.bg,
            distance,
        }
    }
}

impl Default for FrameCell {
    fn default() -> Self {
        Self::BLANK
    }
}

/// `ESC[<fg>[;<bg>]m<glyph>ESC[0m`
impl fmt::Display for FrameCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\x1b[{}", self.fg.code())?;
        if self.bg != BgColor::None {
            write!(f, ";{}", self.bg.code())?;
        }
        write!(f, "m{}\x1b[0m", self.glyph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_codes() {
        assert_eq!(FgColor::None.code(), 0);
        assert_eq!(FgColor::Red.code(), 31);
        assert_eq!(FgColor::BrightWhite.code(), 97);
        assert_eq!(BgColor::None.code(), 0);
        assert_eq!(BgColor::White.code(), 47);
        assert_eq!(BgColor::BrightBlack.code(), 100);
    }

    #[test]
    fn test_cell_string_fg_and_bg() {
        let cell = FrameCell::painted(PaintSpec::new('#', FgColor::Red, BgColor::White), 1.0);
        assert_eq!(cell.to_string(), "\x1b[31;47m#\x1b[0m");
    }

    #[test]
    fn test_cell_string_fg_only() {
        let cell = FrameCell::painted(PaintSpec::new('-', FgColor::BrightCyan, BgColor::None), 1.0);
        assert_eq!(cell.to_string(), "\x1b[96m-\x1b[0m");
    }

    #[test]
    fn test_cell_string_no_colour() {
        assert_eq!(FrameCell::BLANK.to_string(), "\x1b[0m \x1b[0m");
    }

    #[test]
    fn test_cell_string_bg_only() {
        let cell = FrameCell::painted(PaintSpec::new('*', FgColor::None, BgColor::Red), 1.0);
        assert_eq!(cell.to_string(), "\x1b[0;41m*\x1b[0m");
    }

    #[test]
    fn test_blank_cell_loses_to_any_finite_distance() {
        assert!(1e300 < FrameCell::default().distance);
    }

    #[test]
    fn test_scene_add_triangle() {
        let mut scene = Scene::new();
        assert!(scene.is_empty());
        scene.add_triangle(
            [Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 1.0)],
            PaintSpec::OUTLINE,
            PaintSpec::FILL,
        );
        scene.add_triangle(
            [Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 1.0)],
            PaintSpec::plain('#'),
            PaintSpec::plain('.'),
        );
        assert_eq!(scene.len(), 2);
        assert_eq!(scene.triangles[0].outline, PaintSpec::OUTLINE);
        assert_eq!(scene.triangles[0].fill.glyph, ' ');
        assert_eq!(scene.triangles[1].fill.glyph, '.');
    }
}

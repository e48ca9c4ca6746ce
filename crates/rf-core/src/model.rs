//! Region-selection data model.
//!
//! Freehand input produces [`Stroke`]s; the fill step turns a retired
//! stroke into a [`SelectionRegion`]. Coordinates are logical canvas
//! pixels (the raster's backing store), independent of zoom and CSS size.

use kurbo::{BezPath, Point, Rect};
use serde::{Deserialize, Serialize};

/// Thinnest pen the width slider allows.
pub const LINE_WIDTH_MIN: u8 = 1;
/// Thickest pen the width slider allows (also the default).
pub const LINE_WIDTH_MAX: u8 = 10;

// ─── Color ───────────────────────────────────────────────────────────────

/// An 8-bit sRGB colour with straight (non-premultiplied) alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/// Helper to parse a single hex digit.
pub fn hex_val(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl Rgba {
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse a hex colour: `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`.
    /// The leading `#` is optional.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let bytes = hex.as_bytes();
        let pair = |i: usize| -> Option<u8> { Some(hex_val(bytes[i])? << 4 | hex_val(bytes[i + 1])?) };

        match bytes.len() {
            3 | 4 => {
                let mut channels = [255u8; 4];
                for (slot, &c) in channels.iter_mut().zip(bytes) {
                    *slot = hex_val(c)? * 17;
                }
                let [r, g, b, a] = channels;
                Some(Self::new(r, g, b, a))
            }
            6 => Some(Self::new(pair(0)?, pair(2)?, pair(4)?, 255)),
            8 => Some(Self::new(pair(0)?, pair(2)?, pair(4)?, pair(6)?)),
            _ => None,
        }
    }

    /// Alpha as a CSS fraction, rounded to two decimals.
    pub fn alpha(&self) -> f64 {
        (self.a as f64 / 255.0 * 100.0).round() / 100.0
    }

    /// Emit as a CSS `rgba(r, g, b, a)` string.
    pub fn to_css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.alpha())
    }
}

// ─── Pen palette ─────────────────────────────────────────────────────────

/// The three pen colours offered next to the canvas. Each maps to a
/// half-transparent stroke colour and a lighter fill colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PenColor {
    #[default]
    Warm,
    Cool,
    Black,
}

impl PenColor {
    pub const ALL: [PenColor; 3] = [PenColor::Warm, PenColor::Cool, PenColor::Black];

    /// Stroke variant (`alpha 0.5`).
    pub const fn stroke(self) -> Rgba {
        match self {
            PenColor::Warm => Rgba::new(255, 119, 51, 128),
            PenColor::Cool => Rgba::new(51, 119, 255, 128),
            PenColor::Black => Rgba::new(0, 0, 0, 128),
        }
    }

    /// Fill variant (`alpha 0.2`).
    pub const fn fill(self) -> Rgba {
        match self {
            PenColor::Warm => Rgba::new(255, 119, 51, 51),
            PenColor::Cool => Rgba::new(51, 119, 255, 51),
            PenColor::Black => Rgba::new(0, 0, 0, 51),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PenColor::Warm => "warm",
            PenColor::Cool => "cool",
            PenColor::Black => "black",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|pen| pen.name() == name)
    }
}

// ─── Category / tool ─────────────────────────────────────────────────────

/// What the marked region is: the material step filters its catalogue by this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Door,
    #[default]
    Wall,
    Floor,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Door, Category::Wall, Category::Floor];

    pub fn name(self) -> &'static str {
        match self {
            Category::Door => "door",
            Category::Wall => "wall",
            Category::Floor => "floor",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }
}

/// The active tool determines how primary-button input is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    #[default]
    Draw,
    Fill,
}

impl Tool {
    pub fn name(self) -> &'static str {
        match self {
            Tool::Draw => "draw",
            Tool::Fill => "fill",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "draw" | "pen" => Some(Tool::Draw),
            "fill" => Some(Tool::Fill),
            _ => None,
        }
    }
}

// ─── Stroke ──────────────────────────────────────────────────────────────

/// One freehand gesture: ordered points plus the pen it was drawn with.
///
/// Points are append-only. Once a stroke is committed the session only
/// hands out shared references, so it can no longer grow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    points: Vec<Point>,
    pub width: f64,
    pub color: Rgba,
}

impl Stroke {
    pub fn new(start: Point, width: f64, color: Rgba) -> Self {
        Self {
            points: vec![start],
            width,
            color,
        }
    }

    /// Build a stroke from an existing point list (fixtures, deserialized
    /// hand-offs).
    pub fn from_points(points: Vec<Point>, width: f64, color: Rgba) -> Self {
        Self {
            points,
            width,
            color,
        }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn push(&mut self, point: Point) {
        self.points.push(point);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Whether the polyline covers any ink (needs at least one segment).
    pub fn is_drawable(&self) -> bool {
        self.points.len() >= 2
    }

    /// The point sequence as a closed polygon, implicitly joining the last
    /// point back to the first.
    pub fn closed_path(&self) -> BezPath {
        let mut path = BezPath::new();
        let mut iter = self.points.iter();
        if let Some(first) = iter.next() {
            path.move_to(*first);
            for p in iter {
                path.line_to(*p);
            }
            path.close_path();
        }
        path
    }

    /// Axis-aligned bounds of the raw points (ignores pen width).
    pub fn bounds(&self) -> Option<Rect> {
        let first = self.points.first()?;
        let seed = Rect::from_points(*first, *first);
        Some(
            self.points
                .iter()
                .skip(1)
                .fold(seed, |acc, p| acc.union_pt(*p)),
        )
    }
}

// ─── Selection region ────────────────────────────────────────────────────

/// A filled, closed area derived from exactly one retired stroke.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionRegion {
    pub path: Stroke,
    pub filled: bool,
    pub fill_color: Rgba,
    pub outline_color: Rgba,
}

impl SelectionRegion {
    /// Retire `stroke` into a filled region. The outline keeps the stroke's
    /// own colour; the fill comes from the current pen.
    pub fn from_stroke(stroke: Stroke, fill_color: Rgba) -> Self {
        let outline_color = stroke.color;
        Self {
            path: stroke,
            filled: true,
            fill_color,
            outline_color,
        }
    }
}

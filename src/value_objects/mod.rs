//! Graph value objects
//!
//! Value objects are immutable types shared by the store, the layout engine and
//! the style collaborator. They are compared by value rather than identity.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

/// Open property bag carried by nodes and edges next to their typed fields.
///
/// Values are JSON values so that arbitrary host attributes survive a
/// [`Graph::copy`](crate::Graph::copy) unchanged.
pub type Properties = IndexMap<String, serde_json::Value>;

/// A position (or force vector) in 2D layout space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position2D {
    pub x: f64,
    pub y: f64,
}

impl Position2D {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Create a new position
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Get the distance to another position
    pub fn distance_to(&self, other: &Position2D) -> f64 {
        (*other - *self).length()
    }

    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }
}

impl Default for Position2D {
    fn default() -> Self {
        Self::ZERO
    }
}

impl Add for Position2D {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl AddAssign for Position2D {
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
    }
}

impl Sub for Position2D {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

impl SubAssign for Position2D {
    fn sub_assign(&mut self, other: Self) {
        self.x -= other.x;
        self.y -= other.y;
    }
}

impl Mul<f64> for Position2D {
    type Output = Self;

    fn mul(self, scalar: f64) -> Self {
        Self::new(self.x * scalar, self.y * scalar)
    }
}

/// Axis-aligned bounding box of all node positions in layout space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Position2D,
    pub max: Position2D,
}

impl Bounds {
    /// Smallest box containing every point, or `None` for no points.
    pub fn enclosing<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Position2D>,
    {
        let mut points = points.into_iter();
        let first = points.next()?;
        let mut bounds = Self {
            min: first,
            max: first,
        };
        for p in points {
            bounds.min.x = bounds.min.x.min(p.x);
            bounds.min.y = bounds.min.y.min(p.y);
            bounds.max.x = bounds.max.x.max(p.x);
            bounds.max.y = bounds.max.y.max(p.y);
        }
        Some(bounds)
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Position2D {
        Position2D::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
        )
    }
}

/// Canvas dimensions supplied by the host on every update
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Position2D {
        Position2D::new(self.width / 2.0, self.height / 2.0)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(500.0, 500.0)
    }
}

/// Memoized whole-graph analytic stored on a node.
///
/// Structural mutation resets every node to `Uncomputed`; the next read
/// through the graph recomputes the metric for all nodes at once.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum Centrality {
    #[default]
    Uncomputed,
    Computed(f64),
}

impl Centrality {
    pub fn value(&self) -> Option<f64> {
        match self {
            Centrality::Uncomputed => None,
            Centrality::Computed(v) => Some(*v),
        }
    }

    pub fn is_computed(&self) -> bool {
        matches!(self, Centrality::Computed(_))
    }
}

/// Represents a color value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Create a new color
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create a new opaque color
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Create a color from unit-interval channels (0.0 - 1.0)
    pub fn from_unit(r: f64, g: f64, b: f64, a: f64) -> Self {
        let channel = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self::new(channel(r), channel(g), channel(b), channel(a))
    }

    /// Same color with its alpha multiplied by `alpha` (0.0 - 1.0)
    pub fn faded(&self, alpha: f64) -> Self {
        let a = (self.a as f64 * alpha.clamp(0.0, 1.0)).round() as u8;
        Self { a, ..*self }
    }

    /// Common color constants
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255, a: 255 };
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0, a: 255 };
    pub const TRANSPARENT: Color = Color { r: 0, g: 0, b: 0, a: 0 };
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test Coverage
    ///
    /// ```mermaid
    /// graph TD
    ///     VO[Value Objects] --> P2[Position2D]
    ///     VO --> B[Bounds]
    ///     VO --> V[Viewport]
    ///     VO --> CE[Centrality]
    ///     VO --> C[Color]
    /// ```

    #[test]
    fn test_position_distance() {
        let pos1 = Position2D::new(0.0, 0.0);
        let pos2 = Position2D::new(3.0, 4.0);

        assert_eq!(pos1.distance_to(&pos2), 5.0);
    }

    #[test]
    fn test_position_arithmetic() {
        let mut p = Position2D::new(1.0, 2.0) + Position2D::new(3.0, 4.0);
        assert_eq!(p, Position2D::new(4.0, 6.0));

        p -= Position2D::new(1.0, 1.0);
        assert_eq!(p * 2.0, Position2D::new(6.0, 10.0));
    }

    #[test]
    fn test_bounds_enclosing() {
        let bounds = Bounds::enclosing(vec![
            Position2D::new(-1.0, 2.0),
            Position2D::new(3.0, -4.0),
            Position2D::new(0.5, 0.5),
        ])
        .unwrap();

        assert_eq!(bounds.min, Position2D::new(-1.0, -4.0));
        assert_eq!(bounds.max, Position2D::new(3.0, 2.0));
        assert_eq!(bounds.width(), 4.0);
        assert_eq!(bounds.center(), Position2D::new(1.0, -1.0));
        assert!(Bounds::enclosing(Vec::new()).is_none());
    }

    #[test]
    fn test_centrality_transitions() {
        let mut c = Centrality::default();
        assert!(!c.is_computed());
        assert_eq!(c.value(), None);

        c = Centrality::Computed(0.25);
        assert_eq!(c.value(), Some(0.25));
    }

    #[test]
    fn test_color_from_unit() {
        let c = Color::from_unit(1.0, 0.0, 0.5, 2.0);
        assert_eq!(c, Color::new(255, 0, 128, 255));
        assert_eq!(c.faded(0.5).a, 128);
    }

    #[test]
    fn test_serialization() {
        let position = Position2D::new(1.0, 2.0);
        let serialized = serde_json::to_string(&position).unwrap();
        let deserialized: Position2D = serde_json::from_str(&serialized).unwrap();
        assert_eq!(position, deserialized);

        let c = Centrality::Computed(0.5);
        let back: Centrality = serde_json::from_str(&serde_json::to_string(&c).unwrap()).unwrap();
        assert_eq!(c, back);
    }
}

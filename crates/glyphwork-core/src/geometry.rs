//! Geometric primitives for glyph layout and drawing.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate in surface space
//! - [`Size`] - Width and height dimensions
//! - [`Bounds`] - An axis-aligned rectangle defined by minimum and maximum coordinates
//!
//! # Coordinate System
//!
//! Glyphwork uses device-pixel coordinates, consistent with SVG and the
//! bounding rectangles reported by rendering surfaces:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! Rectangles coming from callers are usually expressed as `left`, `top`,
//! `width` and `height`; [`Bounds::from_ltwh`] and the matching accessors
//! cover that vocabulary.

use serde::{Deserialize, Serialize};

/// A 2D point in surface coordinate space.
///
/// # Examples
///
/// ```
/// # use glyphwork_core::geometry::Point;
/// let p1 = Point::new(10.0, 20.0);
/// let p2 = Point::new(5.0, 5.0);
///
/// let offset = p1.sub_point(p2);
/// assert_eq!(offset.x(), 5.0);
/// assert_eq!(offset.y(), 15.0);
///
/// assert_eq!(p1.distance(Point::new(13.0, 24.0)), 5.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }

    /// Subtracts another point from this point, returning a new point
    pub fn sub_point(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    /// Euclidean distance between two points
    pub fn distance(self, other: Point) -> f32 {
        self.sub_point(other).hypot()
    }

    /// Calculates the hypotenuse (Euclidean distance from origin)
    pub fn hypot(self) -> f32 {
        self.x.hypot(self.y)
    }

    /// Linear interpolation towards `other`; `t = 0` yields `self`, `t = 1` yields `other`.
    pub fn lerp(self, other: Point, t: f32) -> Self {
        Self {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }

    /// Scales the point away from (or towards) `origin` by independent factors per axis.
    ///
    /// ```
    /// # use glyphwork_core::geometry::Point;
    /// let p = Point::new(20.0, 10.0);
    /// let scaled = p.scale_about(Point::new(10.0, 10.0), 0.5, 1.0);
    /// assert_eq!(scaled, Point::new(15.0, 10.0));
    /// ```
    pub fn scale_about(self, origin: Point, factor_x: f32, factor_y: f32) -> Self {
        Self {
            x: origin.x + (self.x - origin.x) * factor_x,
            y: origin.y + (self.y - origin.y) * factor_y,
        }
    }
}

/// Dimensions of an element with width and height
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f32 {
        self.height
    }
}

/// An axis-aligned rectangle with minimum and maximum coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    /// Creates a new bounds from a center point and a size
    pub fn new_from_center(center: Point, size: Size) -> Self {
        let half_width = size.width / 2.0;
        let half_height = size.height / 2.0;
        Self {
            min_x: center.x - half_width,
            min_y: center.y - half_height,
            max_x: center.x + half_width,
            max_y: center.y + half_height,
        }
    }

    /// Creates a new bounds from a top-left point and a size
    pub fn new_from_top_left(top_left: Point, size: Size) -> Self {
        Self {
            min_x: top_left.x,
            min_y: top_left.y,
            max_x: top_left.x + size.width,
            max_y: top_left.y + size.height,
        }
    }

    /// Creates a new bounds from `left`, `top`, `width` and `height`.
    ///
    /// ```
    /// # use glyphwork_core::geometry::Bounds;
    /// let rect = Bounds::from_ltwh(10.0, 20.0, 100.0, 50.0);
    /// assert_eq!(rect.max_x(), 110.0);
    /// assert_eq!(rect.max_y(), 70.0);
    /// ```
    pub fn from_ltwh(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self::new_from_top_left(Point::new(left, top), Size::new(width, height))
    }

    /// Smallest bounds containing every point, or `None` for an empty iterator.
    pub fn from_points(points: impl IntoIterator<Item = Point>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        let seed = Self {
            min_x: first.x,
            min_y: first.y,
            max_x: first.x,
            max_y: first.y,
        };
        Some(points.fold(seed, |acc, p| Self {
            min_x: acc.min_x.min(p.x),
            min_y: acc.min_y.min(p.y),
            max_x: acc.max_x.max(p.x),
            max_y: acc.max_y.max(p.y),
        }))
    }

    pub fn min_x(self) -> f32 {
        self.min_x
    }

    pub fn min_y(self) -> f32 {
        self.min_y
    }

    pub fn max_x(self) -> f32 {
        self.max_x
    }

    pub fn max_y(self) -> f32 {
        self.max_y
    }

    /// Left edge; same as [`Bounds::min_x`]
    pub fn left(self) -> f32 {
        self.min_x
    }

    /// Top edge; same as [`Bounds::min_y`]
    pub fn top(self) -> f32 {
        self.min_y
    }

    /// Returns the width of the bounds
    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    /// Returns the height of the bounds
    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }

    /// Returns the center point of the bounds
    pub fn center(self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Converts bounds to a Size object
    pub fn to_size(self) -> Size {
        Size {
            width: self.width(),
            height: self.height(),
        }
    }

    /// Merges two bounds into the smallest bounds containing both.
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }
}

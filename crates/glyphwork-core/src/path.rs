//! Polyline path geometry.
//!
//! [`PathGeometry`] is the point list a surface stores for each path node.
//! Curved glyph shapes (ellipses, blobs) are flattened into polylines when
//! they are created, which keeps arclength queries exact and cheap: the
//! resampling used by glyph path cloning walks straight segments only.

use std::f32::consts::TAU;

use crate::geometry::{Bounds, Point, Size};

/// An open or closed polyline.
///
/// # Examples
///
/// ```
/// use glyphwork_core::{geometry::{Point, Size}, path::PathGeometry};
///
/// let square = PathGeometry::rectangle(Point::new(5.0, 5.0), Size::new(10.0, 10.0));
/// assert_eq!(square.len(), 4);
/// assert_eq!(square.length(), 40.0);
///
/// let resampled = square.resample(8);
/// assert_eq!(resampled.len(), 8);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathGeometry {
    points: Vec<Point>,
    closed: bool,
}

impl PathGeometry {
    /// Creates a path from its points
    pub fn new(points: Vec<Point>, closed: bool) -> Self {
        Self { points, closed }
    }

    /// Closed axis-aligned rectangle, starting at the top-left corner and running clockwise.
    pub fn rectangle(center: Point, size: Size) -> Self {
        let bounds = Bounds::new_from_center(center, size);
        Self::new(
            vec![
                Point::new(bounds.min_x(), bounds.min_y()),
                Point::new(bounds.max_x(), bounds.min_y()),
                Point::new(bounds.max_x(), bounds.max_y()),
                Point::new(bounds.min_x(), bounds.max_y()),
            ],
            true,
        )
    }

    /// Closed ellipse flattened into `segments` vertices (at least 3).
    pub fn ellipse(center: Point, radius_x: f32, radius_y: f32, segments: usize) -> Self {
        let segments = segments.max(3);
        let points = (0..segments)
            .map(|i| {
                let angle = TAU * i as f32 / segments as f32;
                Point::new(
                    center.x() + radius_x * angle.cos(),
                    center.y() + radius_y * angle.sin(),
                )
            })
            .collect();
        Self::new(points, true)
    }

    /// Closed regular polygon inscribed in an ellipse, first vertex pointing up.
    pub fn regular_polygon(center: Point, radius_x: f32, radius_y: f32, sides: usize) -> Self {
        let sides = sides.max(3);
        let points = (0..sides)
            .map(|i| {
                let angle = TAU * i as f32 / sides as f32 - TAU / 4.0;
                Point::new(
                    center.x() + radius_x * angle.cos(),
                    center.y() + radius_y * angle.sin(),
                )
            })
            .collect();
        Self::new(points, true)
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Segment endpoints in drawing order, including the closing segment of closed paths.
    fn segments(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let closing = match (self.closed, self.points.first(), self.points.last()) {
            (true, Some(first), Some(last)) if self.points.len() > 1 => Some((*last, *first)),
            _ => None,
        };
        self.points
            .windows(2)
            .map(|pair| (pair[0], pair[1]))
            .chain(closing)
    }

    /// Total arclength of the path
    pub fn length(&self) -> f32 {
        self.segments().map(|(a, b)| a.distance(b)).sum()
    }

    /// Point located `offset` units along the path from its first point.
    ///
    /// Offsets are clamped to `[0, length]`. Returns `None` for empty paths.
    pub fn location_at(&self, offset: f32) -> Option<Point> {
        let first = *self.points.first()?;
        let mut remaining = offset.max(0.0);
        let mut last = first;
        for (a, b) in self.segments() {
            let segment_length = a.distance(b);
            if remaining <= segment_length {
                if segment_length == 0.0 {
                    return Some(a);
                }
                return Some(a.lerp(b, remaining / segment_length));
            }
            remaining -= segment_length;
            last = b;
        }
        Some(last)
    }

    /// Open path with `num_points` points spaced `length / num_points` apart along this path.
    ///
    /// The sample offsets are `k * length / num_points` for `k` in `0..num_points`,
    /// so a closed path is covered once without repeating its first point.
    pub fn resample(&self, num_points: usize) -> Self {
        if num_points == 0 || self.points.is_empty() {
            return Self::default();
        }
        let step = self.length() / num_points as f32;
        let points = (0..num_points)
            .filter_map(|k| self.location_at(step * k as f32))
            .collect();
        Self::new(points, false)
    }

    /// Smallest bounds containing all points
    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::from_points(self.points.iter().copied())
    }

    /// Scales every point about `origin`
    pub fn scale_about(&mut self, origin: Point, factor_x: f32, factor_y: f32) {
        for point in &mut self.points {
            *point = point.scale_about(origin, factor_x, factor_y);
        }
    }

    /// SVG path data (`d` attribute), e.g. `"M 0 0 L 10 0 L 10 10 Z"`.
    pub fn to_svg_data(&self) -> String {
        let mut data = String::new();
        for (i, point) in self.points.iter().enumerate() {
            let command = if i == 0 { "M" } else { " L" };
            data.push_str(&format!("{command} {} {}", point.x(), point.y()));
        }
        if self.closed && !self.points.is_empty() {
            data.push_str(" Z");
        }
        data
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    fn unit_square() -> PathGeometry {
        PathGeometry::rectangle(Point::new(0.5, 0.5), Size::new(1.0, 1.0))
    }

    #[test]
    fn test_rectangle_corners() {
        let rect = PathGeometry::rectangle(Point::new(50.0, 20.0), Size::new(40.0, 10.0));
        assert!(rect.is_closed());
        assert_eq!(rect.points()[0], Point::new(30.0, 15.0));
        assert_eq!(rect.points()[2], Point::new(70.0, 25.0));
    }

    #[test]
    fn test_length_open_and_closed() {
        let open = PathGeometry::new(
            vec![Point::new(0.0, 0.0), Point::new(3.0, 4.0), Point::new(3.0, 10.0)],
            false,
        );
        assert_approx_eq!(f32, open.length(), 11.0);

        assert_approx_eq!(f32, unit_square().length(), 4.0);
        assert_eq!(PathGeometry::default().length(), 0.0);
    }

    #[test]
    fn test_location_at() {
        let square = unit_square();
        assert_eq!(square.location_at(0.0), Some(Point::new(0.0, 0.0)));
        assert_eq!(square.location_at(1.5), Some(Point::new(1.0, 0.5)));
        // Closing segment runs from (0, 1) back to (0, 0)
        assert_eq!(square.location_at(3.5), Some(Point::new(0.0, 0.5)));
        // Clamped past the end
        assert_eq!(square.location_at(10.0), Some(Point::new(0.0, 0.0)));
        assert_eq!(PathGeometry::default().location_at(1.0), None);
    }

    #[test]
    fn test_resample_point_count_and_spacing() {
        let square = unit_square();
        let resampled = square.resample(8);
        assert_eq!(resampled.len(), 8);
        assert!(!resampled.is_closed());
        assert_eq!(resampled.points()[1], Point::new(0.5, 0.0));
        assert_eq!(resampled.points()[7], Point::new(0.0, 0.5));
    }

    #[test]
    fn test_resample_degenerate_inputs() {
        assert!(unit_square().resample(0).is_empty());
        assert!(PathGeometry::default().resample(10).is_empty());

        let dot = PathGeometry::new(vec![Point::new(2.0, 2.0)], false);
        let resampled = dot.resample(3);
        assert_eq!(resampled.points(), &[Point::new(2.0, 2.0); 3]);
    }

    #[test]
    fn test_ellipse_stays_on_radius() {
        let circle = PathGeometry::ellipse(Point::new(10.0, 10.0), 5.0, 5.0, 24);
        assert_eq!(circle.len(), 24);
        for point in circle.points() {
            assert_approx_eq!(f32, point.distance(Point::new(10.0, 10.0)), 5.0, epsilon = 0.001);
        }
    }

    #[test]
    fn test_regular_polygon_first_vertex_up() {
        let hexagon = PathGeometry::regular_polygon(Point::new(0.0, 0.0), 10.0, 10.0, 6);
        assert_eq!(hexagon.len(), 6);
        assert_approx_eq!(f32, hexagon.points()[0].x(), 0.0, epsilon = 0.001);
        assert_approx_eq!(f32, hexagon.points()[0].y(), -10.0, epsilon = 0.001);
    }

    #[test]
    fn test_scale_about_center() {
        let mut square = PathGeometry::rectangle(Point::new(10.0, 10.0), Size::new(20.0, 20.0));
        square.scale_about(Point::new(10.0, 10.0), 0.5, 1.0);
        let bounds = square.bounds().expect("square has points");
        assert_eq!(bounds.width(), 10.0);
        assert_eq!(bounds.height(), 20.0);
        assert_eq!(bounds.center(), Point::new(10.0, 10.0));
    }

    #[test]
    fn test_to_svg_data() {
        let line = PathGeometry::new(vec![Point::new(0.0, 0.0), Point::new(10.0, 5.0)], false);
        assert_eq!(line.to_svg_data(), "M 0 0 L 10 5");
        assert!(unit_square().to_svg_data().ends_with(" Z"));
    }
}

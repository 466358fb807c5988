//! Geometric primitives for diagram element outlines.
//!
//! This module provides the pixel-space geometric types used to describe where
//! annotated elements sit on the source diagram image.
//!
//! # Overview
//!
//! - [`Point`] - A 2D pixel coordinate on the diagram image
//! - [`Rect`] - An axis-aligned rectangle defined by two corner points
//! - [`Polygon`] - An element outline as an ordered list of vertices
//!
//! # Coordinate System
//!
//! Coordinates follow the image convention used by the annotation dumps:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! - **Origin**: Top-left corner of the image at `(0, 0)`
//! - **X-axis**: Increases rightward (positive to the right)
//! - **Y-axis**: Increases downward (positive downward)
//!
//! All coordinates are integer pixels; the dumps never use sub-pixel values.

use serde::{Deserialize, Serialize};

/// A 2D point representing a pixel position on the diagram image.
///
/// Points use `i32` coordinates. The coordinate system has origin at top-left
/// with Y increasing downward (see [module documentation](self) for details).
///
/// Serializes as a two-element array `[x, y]`, the form the annotation
/// dumps store vertices in.
///
/// # Examples
///
/// ```
/// # use scholia_core::geometry::Point;
/// let p = Point::new(140, 62);
/// assert_eq!(p.x(), 140);
/// assert_eq!(p.y(), 62);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "(i32, i32)", into = "(i32, i32)")]
pub struct Point {
    x: i32,
    y: i32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> i32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> i32 {
        self.y
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl From<Point> for (i32, i32) {
    fn from(point: Point) -> Self {
        (point.x, point.y)
    }
}

/// An axis-aligned rectangle on the diagram image.
///
/// Rectangles are stored as minimum and maximum corner points. Construction
/// normalizes the corners, so a rectangle loaded from a dump with swapped
/// corners still reports non-negative width and height.
///
/// Serializes as a two-element array of points `[[x0, y0], [x1, y1]]`.
///
/// # Examples
///
/// ```
/// # use scholia_core::geometry::{Point, Rect};
/// let rect = Rect::from_corners(Point::new(10, 20), Point::new(110, 80));
/// assert_eq!(rect.width(), 100);
/// assert_eq!(rect.height(), 60);
/// assert!(rect.contains(Point::new(50, 50)));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "(Point, Point)", into = "(Point, Point)")]
pub struct Rect {
    min: Point,
    max: Point,
}

impl Rect {
    /// Creates a rectangle from two opposite corners, normalizing their order.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            min: Point::new(a.x.min(b.x), a.y.min(b.y)),
            max: Point::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// Returns the top-left corner of the rectangle
    pub fn min(self) -> Point {
        self.min
    }

    /// Returns the bottom-right corner of the rectangle
    pub fn max(self) -> Point {
        self.max
    }

    /// Returns the width of the rectangle in pixels
    pub fn width(self) -> i32 {
        self.max.x - self.min.x
    }

    /// Returns the height of the rectangle in pixels
    pub fn height(self) -> i32 {
        self.max.y - self.min.y
    }

    /// Returns the center point of the rectangle.
    ///
    /// Integer division rounds toward the top-left corner.
    pub fn center(self) -> Point {
        Point::new(
            self.min.x + self.width() / 2,
            self.min.y + self.height() / 2,
        )
    }

    /// Checks whether a point lies within the rectangle (edges inclusive)
    pub fn contains(self, point: Point) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Merges two rectangles to create a larger rectangle that contains both
    pub fn merge(self, other: Self) -> Self {
        Self {
            min: Point::new(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            max: Point::new(self.max.x.max(other.max.x), self.max.y.max(other.max.y)),
        }
    }
}

impl From<(Point, Point)> for Rect {
    fn from((a, b): (Point, Point)) -> Self {
        Self::from_corners(a, b)
    }
}

impl From<Rect> for (Point, Point) {
    fn from(rect: Rect) -> Self {
        (rect.min, rect.max)
    }
}

/// An element outline as an ordered list of vertices.
///
/// Polygons describe the traced outline of blobs and arrows. Text blocks and
/// the image constant use [`Rect`] instead.
///
/// Serializes transparently as an array of points `[[x, y], ...]`.
///
/// # Examples
///
/// ```
/// # use scholia_core::geometry::{Point, Polygon, Rect};
/// let outline = Polygon::new(vec![
///     Point::new(0, 0),
///     Point::new(40, 0),
///     Point::new(40, 30),
///     Point::new(0, 30),
/// ]);
/// assert_eq!(outline.len(), 4);
/// assert_eq!(
///     outline.bounding_rect(),
///     Some(Rect::from_corners(Point::new(0, 0), Point::new(40, 30))),
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Polygon(Vec<Point>);

impl Polygon {
    /// Creates a polygon from an ordered list of vertices
    pub fn new(points: Vec<Point>) -> Self {
        Self(points)
    }

    /// Returns the vertices of the polygon
    pub fn points(&self) -> &[Point] {
        &self.0
    }

    /// Returns the number of vertices
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the polygon has no vertices
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Computes the smallest rectangle containing every vertex.
    ///
    /// Returns `None` for an empty polygon.
    pub fn bounding_rect(&self) -> Option<Rect> {
        let first = *self.0.first()?;
        let rect = self
            .0
            .iter()
            .skip(1)
            .fold(Rect::from_corners(first, first), |rect, &point| {
                rect.merge(Rect::from_corners(point, point))
            });
        Some(rect)
    }

    /// Computes the arithmetic mean of the vertices.
    ///
    /// Returns `None` for an empty polygon. This is the vertex centroid, not
    /// the area centroid; it matches how the annotation tooling positions
    /// element labels.
    pub fn centroid(&self) -> Option<Point> {
        if self.0.is_empty() {
            return None;
        }
        let (sum_x, sum_y) = self
            .0
            .iter()
            .fold((0i64, 0i64), |(sx, sy), p| (sx + p.x as i64, sy + p.y as i64));
        let n = self.0.len() as i64;
        Some(Point::new((sum_x / n) as i32, (sum_y / n) as i32))
    }
}

impl From<Vec<(i32, i32)>> for Polygon {
    fn from(points: Vec<(i32, i32)>) -> Self {
        Self(points.into_iter().map(Point::from).collect())
    }
}

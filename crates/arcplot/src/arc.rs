use crate::angular::Span;
use crate::FULL_CIRCLE;
use serde::Serialize;
use std::f64::consts::FRAC_PI_2;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Unit direction for a chart angle (0 at 12 o'clock, clockwise, y pointing down).
    pub fn direction(angle: f64) -> Self {
        Self::new(angle.sin(), -angle.cos())
    }

    pub fn scale(self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }

    pub fn distance_from_origin(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Chart angle of this point relative to the origin, in `[0, 2π)`.
    pub fn angle(&self) -> f64 {
        self.x.atan2(-self.y).rem_euclid(FULL_CIRCLE)
    }
}

/// A circular sector with an inner cutout, centered on the chart origin.
///
/// Angles follow the chart convention: radians, clockwise, starting at 12 o'clock. A
/// renderer working in the usual "0 at 3 o'clock" convention can use [`Self::screen_angles`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AnnularSector {
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
}

impl AnnularSector {
    pub fn new(inner_radius: f64, outer_radius: f64, span: Span) -> Self {
        Self {
            inner_radius,
            outer_radius,
            start_angle: span.start,
            end_angle: span.end,
        }
    }

    pub fn span(&self) -> Span {
        Span::new(self.start_angle, self.end_angle)
    }

    pub fn screen_angles(&self) -> (f64, f64) {
        (self.start_angle - FRAC_PI_2, self.end_angle - FRAC_PI_2)
    }

    /// Middle of the sector, halfway between the radii and the angles.
    pub fn centroid(&self) -> Point {
        let r = (self.inner_radius + self.outer_radius) / 2.0;
        Point::direction((self.start_angle + self.end_angle) / 2.0).scale(r)
    }

    pub fn contains(&self, point: Point) -> bool {
        let dist = point.distance_from_origin();
        let (lo, hi) = if self.inner_radius <= self.outer_radius {
            (self.inner_radius, self.outer_radius)
        } else {
            (self.outer_radius, self.inner_radius)
        };
        (lo..=hi).contains(&dist) && self.span().contains(point.angle())
    }
}

/// Direction vectors used to draw the leader line from a category's base to its label.
///
/// Both are unit vectors; the renderer scales `inner` by the inner radius and `outer` by the
/// label radius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AnnotationAnchor {
    pub inner: Point,
    pub outer: Point,
}

impl AnnotationAnchor {
    pub fn at(angle: f64) -> Self {
        Self {
            inner: Point::direction(angle),
            outer: Point::direction(angle),
        }
    }

    /// Whether the label sits on the right half of the chart.
    pub fn faces_right(&self) -> bool {
        self.outer.x > 0.0
    }

    /// Whether the label sits on the lower half of the chart.
    pub fn faces_down(&self) -> bool {
        self.outer.y > 0.0
    }
}

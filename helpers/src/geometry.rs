use approx::ulps_eq;
use serde::{Deserialize, Serialize};

// 2D ----------------------------------------------------------------------------------------------
#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default)]
pub struct Point2d {
    pub x: f64,
    pub y: f64,
}

impl Point2d {
    pub fn as_vector2d(&self) -> Vector2d {
        Vector2d {
            dx: self.x,
            dy: self.y,
        }
    }
    /// rotate returns the point rotated by angle (rad, counter-clockwise) around the origin.
    pub fn rotate(&self, angle: f64) -> Point2d {
        let (sin, cos) = angle.sin_cos();
        Point2d {
            x: self.x * cos - self.y * sin,
            y: self.x * sin + self.y * cos,
        }
    }
}

impl PartialEq for Point2d {
    fn eq(&self, other: &Self) -> bool {
        ulps_eq!(self.x, other.x) && ulps_eq!(self.y, other.y)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Vector2d {
    pub dx: f64,
    pub dy: f64,
}

impl Vector2d {
    pub fn sub(&self, other: &Self) -> Vector2d {
        Vector2d {
            dx: self.dx - other.dx,
            dy: self.dy - other.dy,
        }
    }
    pub fn abs(&self) -> f64 {
        (self.dx.powf(2.0) + self.dy.powf(2.0)).sqrt()
    }
}

impl PartialEq for Vector2d {
    fn eq(&self, other: &Self) -> bool {
        ulps_eq!(self.dx, other.dx) && ulps_eq!(self.dy, other.dy)
    }
}

/// rotate applies the 2D rotation matrix [[cos, -sin], [sin, cos]] for the given angle (rad) to
/// all points.
pub fn rotate(points: &[Point2d], angle: f64) -> Vec<Point2d> {
    points.iter().map(|p| p.rotate(angle)).collect()
}

/// bounding_box returns [x_min, x_max, y_min, y_max] of the given points, None if there are none.
pub fn bounding_box(points: &[Point2d]) -> Option<[f64; 4]> {
    let first = points.first()?;

    Some(points.iter().fold(
        [first.x, first.x, first.y, first.y],
        |[x_min, x_max, y_min, y_max], p| {
            [x_min.min(p.x), x_max.max(p.x), y_min.min(p.y), y_max.max(p.y)]
        },
    ))
}

//! Geometry primitives and numeric validation.
//!
//! All coordinates are SVG user units (pixels). Points are `glam::DVec2`;
//! bounding boxes are axis-aligned and expand point by point.

use std::fmt;

use glam::{DVec2, dvec2};

/// A point in pixel space.
pub type Point = DVec2;

/// Error type for invalid numeric values
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericError {
    /// Value is NaN
    NaN,
    /// Value is infinite
    Infinite,
    /// Value is zero when non-zero required
    Zero,
    /// Value is negative when positive required
    Negative,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::NaN => write!(f, "value is NaN"),
            NumericError::Infinite => write!(f, "value is infinite"),
            NumericError::Zero => write!(f, "value is zero"),
            NumericError::Negative => write!(f, "value is negative"),
        }
    }
}

impl std::error::Error for NumericError {}

/// Accept any finite value (sign unchecked).
#[inline]
pub fn check_finite(val: f64) -> Result<f64, NumericError> {
    if val.is_nan() {
        Err(NumericError::NaN)
    } else if val.is_infinite() {
        Err(NumericError::Infinite)
    } else {
        Ok(val)
    }
}

/// Accept finite values `>= 0`.
#[inline]
pub fn check_non_negative(val: f64) -> Result<f64, NumericError> {
    let val = check_finite(val)?;
    if val < 0.0 {
        Err(NumericError::Negative)
    } else {
        Ok(val)
    }
}

/// Accept finite values `> 0`.
#[inline]
pub fn check_positive(val: f64) -> Result<f64, NumericError> {
    let val = check_non_negative(val)?;
    if val == 0.0 {
        Err(NumericError::Zero)
    } else {
        Ok(val)
    }
}

/// 2D size
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Size {
    pub w: f64,
    pub h: f64,
}

impl Size {
    pub fn new(w: f64, h: f64) -> Self {
        Size { w, h }
    }
}

/// Axis-aligned bounding box
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BBox {
    pub min: Point,
    pub max: Point,
}

impl Default for BBox {
    fn default() -> Self {
        Self::new()
    }
}

impl BBox {
    /// Create an empty bounding box (will expand on first point)
    pub fn new() -> Self {
        BBox {
            min: dvec2(f64::MAX, f64::MAX),
            max: dvec2(f64::MIN, f64::MIN),
        }
    }

    /// Box with its top-left corner at `origin`.
    pub fn from_origin_size(origin: Point, size: Size) -> Self {
        BBox {
            min: origin,
            max: origin + dvec2(size.w, size.h),
        }
    }

    /// Check if the bbox is empty (never expanded)
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }

    /// Expand to include a point
    pub fn expand_point(&mut self, p: Point) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn size(&self) -> Size {
        Size {
            w: self.width(),
            h: self.height(),
        }
    }

    /// Bottom edge, or `fallback` for an empty box.
    pub fn bottom_or(&self, fallback: f64) -> f64 {
        if self.is_empty() { fallback } else { self.max.y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_finite_rejects_nan_and_infinity() {
        assert_eq!(check_finite(f64::NAN), Err(NumericError::NaN));
        assert_eq!(check_finite(f64::INFINITY), Err(NumericError::Infinite));
        assert_eq!(check_finite(f64::NEG_INFINITY), Err(NumericError::Infinite));
        assert_eq!(check_finite(-3.0), Ok(-3.0));
    }

    #[test]
    fn check_positive_rejects_zero_and_negative() {
        assert_eq!(check_positive(0.0), Err(NumericError::Zero));
        assert_eq!(check_positive(-1.0), Err(NumericError::Negative));
        assert_eq!(check_positive(2.5), Ok(2.5));
        assert_eq!(check_non_negative(0.0), Ok(0.0));
    }

    #[test]
    fn bbox_new_is_empty() {
        let bb = BBox::new();
        assert!(bb.is_empty());
        assert_eq!(bb.bottom_or(12.0), 12.0);
    }

    #[test]
    fn bbox_expand_point() {
        let mut bb = BBox::new();
        bb.expand_point(dvec2(1.0, 2.0));
        bb.expand_point(dvec2(3.0, 4.0));

        assert!(!bb.is_empty());
        assert_eq!(bb.min, dvec2(1.0, 2.0));
        assert_eq!(bb.max, dvec2(3.0, 4.0));
    }

    #[test]
    fn bbox_width_height_bottom() {
        let bb = BBox::from_origin_size(dvec2(0.0, 10.0), Size::new(4.0, 6.0));
        assert_eq!(bb.width(), 4.0);
        assert_eq!(bb.height(), 6.0);
        assert_eq!(bb.bottom_or(0.0), 16.0);
    }
}

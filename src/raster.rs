//! Rasterization boundary.
//!
//! The core only emits markup whose `viewBox` matches the request size. A
//! [`Rasterizer`] turns that markup into a bitmap of the target pixel size;
//! scaling and background compositing are its business.

use crate::config::TimelineRequest;
use crate::errors::RenderError;

/// Output bitmap size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RasterTarget {
    pub width: u32,
    pub height: u32,
}

impl RasterTarget {
    /// `width × pixelRatio` by `height × pixelRatio`, rounded.
    pub fn for_request(request: &TimelineRequest) -> Result<Self, RenderError> {
        let width = scaled(request.width, request.pixel_ratio);
        let height = scaled(request.height, request.pixel_ratio);
        if width == 0 || height == 0 {
            return Err(RenderError::RasterSize { width, height });
        }
        Ok(RasterTarget { width, height })
    }

    /// Horizontal and vertical scale from document units to pixels.
    pub fn scale_from(&self, doc_width: f64, doc_height: f64) -> (f64, f64) {
        (
            self.width as f64 / doc_width,
            self.height as f64 / doc_height,
        )
    }
}

fn scaled(len: f64, ratio: f64) -> u32 {
    let px = (len * ratio).round();
    if px.is_finite() && px > 0.0 {
        px.min(u32::MAX as f64) as u32
    } else {
        0
    }
}

/// Turns SVG markup into encoded image bytes (PNG for the bundled backend).
pub trait Rasterizer {
    fn rasterize(&self, svg: &str, target: RasterTarget) -> Result<Vec<u8>, RenderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_scales_by_pixel_ratio() {
        let req = TimelineRequest {
            pixel_ratio: 2.0,
            ..Default::default()
        };
        assert_eq!(
            RasterTarget::for_request(&req).unwrap(),
            RasterTarget {
                width: 1600,
                height: 560
            }
        );
    }

    #[test]
    fn fractional_ratio_rounds() {
        let req = TimelineRequest {
            pixel_ratio: 1.5,
            width: 333.0,
            ..Default::default()
        };
        let target = RasterTarget::for_request(&req).unwrap();
        assert_eq!(target.width, 500);
        assert_eq!(target.height, 420);
        assert_eq!(target.scale_from(333.0, 280.0).1, 1.5);
    }

    #[test]
    fn vanishing_target_is_rejected() {
        let req = TimelineRequest {
            pixel_ratio: 0.001,
            ..Default::default()
        };
        assert!(matches!(
            RasterTarget::for_request(&req),
            Err(RenderError::RasterSize { width: 1, height: 0 })
        ));
    }
}

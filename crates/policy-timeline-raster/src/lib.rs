//! PNG output for policy-timeline charts, backed by resvg.
//!
//! ```no_run
//! use policy_timeline::{TimelineRequest, render_png};
//! use policy_timeline_raster::ResvgRasterizer;
//!
//! let png = render_png(&TimelineRequest::default(), &ResvgRasterizer::with_system_fonts())?;
//! # Ok::<(), miette::Report>(())
//! ```

use policy_timeline::{RasterTarget, Rasterizer, RenderError};

/// Renders chart markup with usvg/resvg onto a white pixmap.
#[derive(Default)]
pub struct ResvgRasterizer {
    options: usvg::Options<'static>,
}

impl ResvgRasterizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rasterizer that can draw text with the fonts installed on the host.
    pub fn with_system_fonts() -> Self {
        let mut options = usvg::Options::default();
        options.fontdb_mut().load_system_fonts();
        ResvgRasterizer { options }
    }
}

impl Rasterizer for ResvgRasterizer {
    fn rasterize(&self, svg: &str, target: RasterTarget) -> Result<Vec<u8>, RenderError> {
        let tree = usvg::Tree::from_str(svg, &self.options).map_err(raster_error)?;

        let size = tree.size();
        let sx = target.width as f32 / size.width();
        let sy = target.height as f32 / size.height();

        let mut pixmap =
            tiny_skia::Pixmap::new(target.width, target.height).ok_or(RenderError::RasterSize {
                width: target.width,
                height: target.height,
            })?;
        pixmap.fill(tiny_skia::Color::WHITE);

        let transform = tiny_skia::Transform::from_scale(sx, sy);
        resvg::render(&tree, transform, &mut pixmap.as_mut());

        pixmap.encode_png().map_err(raster_error)
    }
}

fn raster_error(err: impl std::fmt::Display) -> RenderError {
    RenderError::Raster {
        message: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use policy_timeline::{TimelineRequest, render_png, render_svg};

    #[test]
    fn png_has_scaled_dimensions() {
        let req = TimelineRequest {
            pixel_ratio: 2.0,
            ..Default::default()
        };
        let png = render_png(&req, &ResvgRasterizer::new()).unwrap();
        let pixmap = tiny_skia::Pixmap::decode_png(&png).unwrap();
        assert_eq!((pixmap.width(), pixmap.height()), (1600, 560));
    }

    #[test]
    fn background_is_painted() {
        let svg = render_svg(&TimelineRequest::default()).unwrap();
        let png = ResvgRasterizer::new()
            .rasterize(&svg, RasterTarget { width: 80, height: 28 })
            .unwrap();
        let pixmap = tiny_skia::Pixmap::decode_png(&png).unwrap();
        // top-left corner is the #f8f9fa background rect
        let corner = pixmap.pixel(0, 0).unwrap();
        assert_eq!((corner.red(), corner.green(), corner.blue()), (0xf8, 0xf9, 0xfa));
    }

    #[test]
    fn malformed_markup_is_a_raster_error() {
        let err = ResvgRasterizer::new()
            .rasterize("<svg", RasterTarget { width: 10, height: 10 })
            .unwrap_err();
        assert!(matches!(err, RenderError::Raster { .. }));
    }
}

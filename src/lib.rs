//! Layout and path-geometry engine for insurance policy timeline diagrams.
//!
//! A [`TimelineRequest`] carries the milestones and the layout parameters.
//! [`render_svg`] solves the step layout, builds the header and axis paths and
//! serializes a self-contained SVG document. [`render_png`] hands the same
//! markup to a [`Rasterizer`].
//!
//! ```
//! use policy_timeline::{TimelineRequest, render_svg};
//!
//! let svg = render_svg(&TimelineRequest::default()).unwrap();
//! assert!(svg.contains(r#"viewBox="0 0 800 280""#));
//! ```

pub mod benefit;
pub mod config;
pub mod errors;
pub mod i18n;
mod log;
pub mod model;
pub mod raster;
pub mod render;
pub mod types;

pub use benefit::{BenefitRecord, BenefitTable};
pub use config::{LayoutParams, TimelineRequest};
pub use errors::{ConfigError, LayoutError, RenderError};
pub use i18n::{BuiltinCatalog, Localization};
pub use model::{ChartVariant, HeaderType, Milestone, TransitionCategory, ZigzagTrigger};
pub use raster::{RasterTarget, Rasterizer};
pub use render::{RenderedChart, render_chart};

/// Milestones drawn when a request carries no data.
pub fn default_milestones() -> Vec<Milestone> {
    vec![
        Milestone::new("1", "1"),
        Milestone::new("5", "5"),
        Milestone::new("10", "10"),
        Milestone::new("A60", "A60").major(),
        Milestone::new("A90", "A90")
            .major()
            .with_value("150,000")
            .last_payment(),
    ]
}

/// Render `request` to an SVG string using the builtin catalog.
pub fn render_svg(request: &TimelineRequest) -> Result<String, miette::Report> {
    Ok(render_chart(request, &BuiltinCatalog)?.to_svg())
}

/// Parse a JSON request and render it to SVG.
pub fn render_svg_json(json: &str) -> Result<String, miette::Report> {
    let request = TimelineRequest::from_json(json)?;
    render_svg(&request)
}

/// Render `request` and rasterize it at `width × pixelRatio` by
/// `height × pixelRatio`.
pub fn render_png(
    request: &TimelineRequest,
    rasterizer: &dyn Rasterizer,
) -> Result<Vec<u8>, miette::Report> {
    let svg = render_svg(request)?;
    let target = RasterTarget::for_request(request)?;
    crate::log::debug!(width = target.width, height = target.height, "rasterizing");
    Ok(rasterizer.rasterize(&svg, target)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct Recorder {
        seen: Cell<Option<RasterTarget>>,
    }

    impl Rasterizer for Recorder {
        fn rasterize(&self, svg: &str, target: RasterTarget) -> Result<Vec<u8>, RenderError> {
            self.seen.set(Some(target));
            Ok(svg.as_bytes().to_vec())
        }
    }

    #[test]
    fn default_milestones_are_drawn_for_missing_data() {
        let empty = TimelineRequest::default().with_data(Vec::new());
        assert_eq!(
            render_svg(&empty).unwrap(),
            render_svg(&TimelineRequest::default()).unwrap()
        );
    }

    #[test]
    fn default_milestones_have_no_callouts() {
        let chart = render_chart(&TimelineRequest::default(), &BuiltinCatalog).unwrap();
        assert!(chart.layout.steps.iter().all(|s| s.apex().is_none()));
        assert_eq!(default_milestones().iter().filter(|m| m.major).count(), 2);
    }

    #[test]
    fn json_entry_point() {
        let svg = render_svg_json(r#"{"lang": "en", "width": 600}"#).unwrap();
        assert!(svg.contains(r#"viewBox="0 0 600 280""#));
        assert!(svg.contains("End of Year"));
    }

    #[test]
    fn json_errors_are_config_errors() {
        let err = render_svg_json(r#"{"headerType": 1}"#).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::InvalidHeaderType { value: 1 })
        ));
        assert_eq!(
            err.code().map(|c| c.to_string()).as_deref(),
            Some("policy_timeline::config::invalid_header_type")
        );

        let err = render_svg_json("{").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::Json(_))
        ));
    }

    #[test]
    fn png_receives_markup_and_scaled_target() {
        let recorder = Recorder {
            seen: Cell::new(None),
        };
        let req = TimelineRequest {
            pixel_ratio: 2.0,
            ..Default::default()
        };
        let bytes = render_png(&req, &recorder).unwrap();
        assert_eq!(bytes, render_svg(&req).unwrap().into_bytes());
        assert_eq!(
            recorder.seen.get(),
            Some(RasterTarget {
                width: 1600,
                height: 560
            })
        );
    }
}

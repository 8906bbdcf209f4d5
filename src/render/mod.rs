//! Timeline chart rendering
//!
//! This module is organized into submodules:
//! - `defaults`: Default sizes and settings
//! - `geometry`: Yield-height table and arrowhead geometry
//! - `layout`: Step layout solver (lengths and x positions)
//! - `path_builder`: Axis, zigzag, warp, callout and premium path data
//! - `header`: Header variants above the axis
//! - `text`: Word wrapping
//! - `svg`: Element tree and serializer
//!
//! The pipeline runs once per request: solve the steps, lay out the header,
//! place the axis below the header, then assemble the element tree.

pub mod defaults;
pub mod geometry;
pub mod header;
pub mod layout;
pub mod path_builder;
pub mod svg;
pub mod text;

use glam::dvec2;

use crate::config::{LayoutParams, TimelineRequest};
use crate::i18n::{self, Localization, Texts};
use crate::model::{ChartVariant, YearToken};
use crate::types::Point;

use geometry::{YIELD_HEIGHTS, YieldHeightTable};
use header::{HeaderContext, HeaderLayout, layout_header};
use layout::{Step, StepLayout, StepSolver};
use path_builder::{AxisStyle, callout_path, premium_indicator, premium_target, slope_path};
use svg::{Circle, Document, Group, Marker, Path, Rect, Text, escape_text};

/// Everything produced by one render.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedChart {
    pub document: Document,
    pub layout: StepLayout,
    pub header: HeaderLayout,
    /// Origin of the axis group in document coordinates.
    pub axis_origin: Point,
}

impl RenderedChart {
    pub fn to_svg(&self) -> String {
        self.document.to_svg()
    }
}

/// Render `request` using `catalog` for captions.
pub fn render_chart(
    request: &TimelineRequest,
    catalog: &dyn Localization,
) -> Result<RenderedChart, miette::Report> {
    ChartRenderer::new(request, catalog, &YIELD_HEIGHTS).render()
}

/// Holds the read-only inputs of one render.
pub struct ChartRenderer<'a> {
    request: &'a TimelineRequest,
    texts: Texts<'a>,
    yields: &'a YieldHeightTable,
}

impl<'a> ChartRenderer<'a> {
    pub fn new(
        request: &'a TimelineRequest,
        catalog: &'a dyn Localization,
        yields: &'a YieldHeightTable,
    ) -> Self {
        ChartRenderer {
            request,
            texts: catalog.texts(&request.lang),
            yields,
        }
    }

    fn params(&self) -> &'a LayoutParams {
        &self.request.layout
    }

    pub fn render(&self) -> Result<RenderedChart, miette::Report> {
        let req = self.request;
        req.validate()?;

        let milestones = req.milestones();
        let solver = StepSolver {
            params: self.params(),
            yields: self.yields,
            benefits: &req.benefits,
            variant: req.chart_variant,
            issue_age: req.issue_age,
        };
        let layout = solver.solve(&milestones, req.layout_width())?;

        let header = self.header(&layout)?;
        let axis_origin = dvec2(req.margin_horizontal, self.axis_y(&header, &layout));
        crate::log::debug!(
            axis_x = axis_origin.x,
            axis_y = axis_origin.y,
            steps = layout.steps.len(),
            "axis placed"
        );

        let mut doc = Document::new(req.width, req.height);
        doc.markers.push(self.arrow_marker());
        doc.push(Rect::new(0.0, 0.0, req.width, req.height).fill(&self.params().background));
        doc.extend(header.elements.iter().cloned());
        doc.push(self.axis_label(axis_origin.y));
        doc.push(self.axis_group(&layout, axis_origin));

        Ok(RenderedChart {
            document: doc,
            layout,
            header,
            axis_origin,
        })
    }

    fn header(&self, layout: &StepLayout) -> Result<HeaderLayout, miette::Report> {
        let req = self.request;
        let p = self.params();
        let substitution = req.sa_substitution();
        let statement = i18n::coverage_statement(&self.texts, substitution.as_ref(), req.sa_template)?;
        let divides = if req.header_type.uses_divides() {
            layout.divide_positions()
        } else {
            Vec::new()
        };
        let ctx = HeaderContext {
            params: p,
            origin: dvec2(req.margin_horizontal, p.top_padding),
            layout_width: req.layout_width(),
            statement: &statement,
            remark: req.show_remark.then(|| self.texts.get(i18n::REMARK)),
            divides: &divides,
            color: &req.color,
        };
        Ok(layout_header(req.header_type, &ctx))
    }

    /// Baseline of the axis: below the header, leaving room for the tallest
    /// callout label and for the premium indicator.
    fn axis_y(&self, header: &HeaderLayout, layout: &StepLayout) -> f64 {
        let p = self.params();
        let callouts = layout
            .steps
            .iter()
            .map(Step::callout_height)
            .fold(0.0, f64::max)
            + p.arrow_padding
            + p.amount_font_size;
        let premium = p.premium_offset + p.arrow_padding + p.premium_font_size;
        header.bbox.bottom_or(p.top_padding) + p.header_gap + callouts.max(premium)
    }

    fn arrow_marker(&self) -> Marker {
        let m = &self.params().marker;
        Marker {
            id: defaults::ARROW_MARKER_ID.to_string(),
            ref_x: m.ref_x,
            ref_y: m.ref_y,
            width: m.width,
            height: m.height,
            path: m.path.clone(),
            fill: self.request.color.clone(),
        }
    }

    fn text(&self, pos: Point, size: f64, content: &str) -> Text {
        let p = self.params();
        Text::new(pos, size, escape_text(content))
            .family(&p.font_family)
            .fill(&p.text_color)
    }

    fn axis_label(&self, axis_y: f64) -> Text {
        let p = self.params();
        self.text(
            dvec2(p.axis_label_offset, axis_y),
            p.message_font_size,
            self.texts.get(i18n::X_AXIS_LABEL),
        )
        .weight(600)
        .rotate(-90.0)
    }

    fn axis_group(&self, layout: &StepLayout, origin: Point) -> Group {
        let req = self.request;
        let p = self.params();
        let mut group = Group::at(origin);

        let trigger = req.zigzag_trigger();
        let style = AxisStyle {
            params: p,
            trigger: &trigger,
            max_amplitude: req.zigzag_max_amplitude,
            nominal_gap: layout.elastic_length,
        };
        group.push(
            Path::new(style.axis_path(&layout.steps))
                .stroke(&req.color, p.stroke_width)
                .round(),
        );

        if req.chart_variant == ChartVariant::Mc {
            if let Some(slope) = slope_path(&layout.steps) {
                group.push(
                    Path::new(slope)
                        .stroke(&req.color, 1.0)
                        .dashed(defaults::SLOPE_DASH),
                );
            }
        }

        for step in &layout.steps {
            self.push_callout(&mut group, step);
        }
        for step in &layout.steps {
            group.push(Circle {
                cx: step.x,
                cy: 0.0,
                r: p.year_marker_radius,
                fill: req.dot_fill.clone(),
                stroke: Some(req.color.clone()),
                stroke_width: Some(defaults::DOT_STROKE_WIDTH),
            });
            self.push_year_label(&mut group, step);
        }
        self.push_premium(&mut group, &layout.steps);
        group
    }

    fn push_callout(&self, group: &mut Group, step: &Step) {
        let Some(coords) = step.line_coords else {
            return;
        };
        let p = self.params();
        let [anchor, apex] = coords;
        if anchor != apex {
            group.push(
                Path::new(callout_path(coords))
                    .stroke(&self.request.color, defaults::CALLOUT_STROKE_WIDTH)
                    .marker_end(defaults::ARROW_MARKER_ID),
            );
        }
        if let Some(label) = step.amount_label.as_deref().filter(|l| !l.is_empty()) {
            group.push(
                self.text(dvec2(apex.x, apex.y - p.arrow_padding), p.amount_font_size, label)
                    .weight(700),
            );
        }
    }

    fn push_year_label(&self, group: &mut Group, step: &Step) {
        let p = self.params();
        let m = &step.milestone;
        let (display, is_age) = match (&m.year, &m.label) {
            (Some(year), _) => (YearToken::display(year), m.is_age()),
            (None, Some(label)) => (label.clone(), false),
            (None, None) => return,
        };

        if is_age {
            group.push(self.text(
                dvec2(step.x, p.year_padding),
                p.at_age_font_size,
                self.texts.get(i18n::AT_AGE),
            ));
            group.push(self.text(
                dvec2(step.x, p.year_padding + p.at_age_offset),
                p.year_font_size,
                &display,
            ));
        } else {
            group.push(self.text(dvec2(step.x, p.year_padding), p.year_font_size, &display));
        }
    }

    fn push_premium(&self, group: &mut Group, steps: &[Step]) {
        let Some(target) = premium_target(steps) else {
            return;
        };
        let p = self.params();
        let indicator = premium_indicator(target.x, p);

        group.push(Path::new(indicator.shaft).stroke(&self.request.color, p.stroke_width));
        group.push(Path::new(indicator.head).fill(defaults::ARROWHEAD_FILL));
        if let Some(value) = target.milestone.value.as_deref().filter(|v| !v.is_empty()) {
            group.push(
                self.text(indicator.value_anchor, p.premium_font_size, value)
                    .weight(700),
            );
        }
        group.push(self.text(
            indicator.caption_anchor,
            p.year_font_size,
            self.texts.get(i18n::PREMIUM_END),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{ConfigError, LayoutError};
    use crate::i18n::BuiltinCatalog;
    use crate::model::{Milestone, TransitionCategory};

    fn render(req: &TimelineRequest) -> RenderedChart {
        render_chart(req, &BuiltinCatalog).unwrap()
    }

    #[test]
    fn test_default_request_renders() {
        let chart = render(&TimelineRequest::default());
        let svg = chart.to_svg();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r#"viewBox="0 0 800 280""#));
        assert_eq!(chart.layout.steps.len(), crate::default_milestones().len());
        assert_eq!(chart.axis_origin.x, 40.0);
    }

    #[test]
    fn test_axis_sits_below_header() {
        let chart = render(&TimelineRequest::default());
        let p = LayoutParams::default();
        let expected = chart.header.bbox.max.y + p.header_gap + (110.0 + 6.0 + 16.0);
        assert_eq!(chart.axis_origin.y, expected);
    }

    #[test]
    fn test_tall_callouts_push_axis_down() {
        let req = TimelineRequest::default().with_data(vec![
            Milestone::new("a", "1").with_level(11),
            Milestone::new("b", "2"),
        ]);
        let chart = render(&req);
        let expected = chart.header.bbox.max.y + 10.0 + (185.0 + 6.0 + 12.0);
        assert_eq!(chart.axis_origin.y, expected);
    }

    #[test]
    fn test_layout_errors_are_reported() {
        let req = TimelineRequest::default().with_data(vec![
            Milestone::new("a", "1").with_next(TransitionCategory::Small),
            Milestone::new("b", "2"),
        ]);
        let err = render_chart(&req, &BuiltinCatalog).unwrap_err();
        assert_eq!(
            err.downcast_ref::<LayoutError>(),
            Some(&LayoutError::NoElasticMilestones)
        );
    }

    #[test]
    fn test_config_errors_are_reported() {
        let req = TimelineRequest {
            pixel_ratio: 0.0,
            ..Default::default()
        };
        let err = render_chart(&req, &BuiltinCatalog).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::InvalidParameter { name: "pixelRatio", .. })
        ));
    }

    #[test]
    fn test_user_text_is_escaped() {
        let req = TimelineRequest {
            lang: "en".into(),
            ..Default::default()
        }
        .with_data(vec![
            Milestone::new("a", "1").with_level(0).with_amount_label("<1 & 2>"),
            Milestone::new("b", "2").with_value("A&B").last_payment(),
        ]);
        let svg = render(&req).to_svg();
        assert!(svg.contains("&lt;1 &amp; 2&gt;"));
        assert!(svg.contains(">A&amp;B</text>"));
        assert!(roxmltree::Document::parse(&svg).is_ok());
    }

    #[test]
    fn test_mc_variant_draws_slope() {
        let req = TimelineRequest {
            chart_variant: ChartVariant::Mc,
            ..Default::default()
        }
        .with_data(vec![
            Milestone::new("a", "1").with_level(0).with_amount_label("10"),
            Milestone::new("b", "2").with_level(3).with_amount_label("20"),
            Milestone::new("c", "3"),
        ]);
        let svg = render(&req).to_svg();
        assert!(svg.contains(r#"d="M 0 -20 L 360 -65""#));
        assert!(svg.contains(defaults::SLOPE_DASH));
    }

    #[test]
    fn test_level_99_has_label_but_no_callout_line() {
        let req = TimelineRequest::default().with_data(vec![
            Milestone::new("a", "1").with_level(99).with_amount_label("x"),
            Milestone::new("b", "2"),
        ]);
        let chart = render(&req);
        let svg = chart.to_svg();
        assert!(!svg.contains(r#"d="M 0 0 L 0 0""#));
        assert!(svg.contains(r#"<text x="0" y="-6""#));
    }
}

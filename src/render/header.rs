//! Header variants: the coverage-statement box above the axis.
//!
//! Each variant lays itself out inside the layout area and reports the box it
//! occupied. The axis is placed below that box, so every variant honors the
//! same contract regardless of what it draws.
//!
//! Only the statement header (type 0) has a fully defined arrangement. Types
//! 2 and 4 draw their configured message box; types 3 and 5 also mark the
//! divide positions with dashed split lines.

use enum_dispatch::enum_dispatch;
use glam::dvec2;

use crate::config::{LayoutParams, MessageBoxGeometry};
use crate::model::HeaderType;
use crate::types::{BBox, Point, Size};

use super::defaults;
use super::path_builder::PathData;
use super::svg::{Element, Path, Rect, Text, escape_text};
use super::text::wrap_text;

/// Inputs shared by every header variant.
#[derive(Debug, Clone, Copy)]
pub struct HeaderContext<'a> {
    pub params: &'a LayoutParams,
    /// Top-left of the layout area in document coordinates.
    pub origin: Point,
    pub layout_width: f64,
    /// Coverage statement, unescaped.
    pub statement: &'a str,
    /// Remark caption, when the remark is shown.
    pub remark: Option<&'a str>,
    /// Divide positions, relative to `origin.x`.
    pub divides: &'a [f64],
    pub color: &'a str,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct HeaderLayout {
    pub bbox: BBox,
    /// Wrapped statement lines, top to bottom.
    pub lines: Vec<String>,
    pub elements: Vec<Element>,
}

#[enum_dispatch]
pub trait HeaderBuilder {
    fn layout(&self, ctx: &HeaderContext<'_>) -> HeaderLayout;
}

#[enum_dispatch(HeaderBuilder)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderVariant {
    Statement(StatementHeader),
    Boxed(BoxHeader),
    Divided(DividedHeader),
}

impl From<HeaderType> for HeaderVariant {
    fn from(ty: HeaderType) -> Self {
        match ty {
            HeaderType::Statement => StatementHeader.into(),
            HeaderType::Left => BoxHeader { side: Side::Left }.into(),
            HeaderType::Right => BoxHeader { side: Side::Right }.into(),
            HeaderType::DividedCenter => DividedHeader { plain: false }.into(),
            HeaderType::DividedPlain => DividedHeader { plain: true }.into(),
        }
    }
}

/// Lay out the header for `ty`.
pub fn layout_header(ty: HeaderType, ctx: &HeaderContext<'_>) -> HeaderLayout {
    let layout = HeaderVariant::from(ty).layout(ctx);
    crate::log::debug!(
        header_type = ty.selector(),
        top = layout.bbox.min.y,
        bottom = layout.bbox.max.y,
        lines = layout.lines.len(),
        "header laid out"
    );
    layout
}

// ============================================================================
// Type 0
// ============================================================================

/// Centered, word-wrapped statement flanked by outward arrows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatementHeader;

impl HeaderBuilder for StatementHeader {
    fn layout(&self, ctx: &HeaderContext<'_>) -> HeaderLayout {
        let p = ctx.params;
        let font = p.message_font_size;
        let box_w = p.message_boxes.center.width.min(ctx.layout_width);
        let box_x = ctx.origin.x + (ctx.layout_width - box_w) / 2.0;
        let box_y = ctx.origin.y + p.message_boxes.center.y;

        let lines = wrap_text(ctx.statement, box_w, font);
        let box_h = lines.len() as f64 * font * defaults::LINE_HEIGHT;
        let mid_y = box_y + box_h / 2.0;

        let mut bbox = BBox::from_origin_size(dvec2(box_x, box_y), Size::new(box_w, box_h));
        let mut elements: Vec<Element> = Vec::with_capacity(lines.len() + 3);

        for (i, line) in lines.iter().enumerate() {
            let baseline = box_y + font * (defaults::LINE_HEIGHT * i as f64 + 1.0);
            elements.push(
                Text::new(dvec2(box_x + box_w / 2.0, baseline), font, escape_text(line))
                    .family(&p.font_family)
                    .fill(&p.text_color)
                    .into(),
            );
        }

        if !lines.is_empty() {
            let left_edge = ctx.origin.x;
            let right_edge = ctx.origin.x + ctx.layout_width;
            let arrows = [
                (box_x - p.arrow_padding, left_edge),
                (box_x + box_w + p.arrow_padding, right_edge),
            ];
            for (from, to) in arrows {
                if (to - from).abs() <= p.marker.width {
                    continue;
                }
                elements.push(flank_arrow(ctx, dvec2(from, mid_y), dvec2(to, mid_y)));
                bbox.expand_point(dvec2(to, mid_y));
            }
        }

        if let Some(remark) = ctx.remark.filter(|r| !r.is_empty()) {
            let x = ctx.origin.x - font / 2.0;
            let half_len = remark.chars().count() as f64 * font * defaults::CHAR_WIDTH_RATIO / 2.0;
            elements.push(
                Text::new(dvec2(x, mid_y), font, escape_text(remark))
                    .family(&p.font_family)
                    .fill(&p.text_color)
                    .rotate(-90.0)
                    .into(),
            );
            bbox.expand_point(dvec2(x - font, mid_y - half_len));
            bbox.expand_point(dvec2(x, mid_y + half_len));
        }

        HeaderLayout {
            bbox,
            lines,
            elements,
        }
    }
}

fn flank_arrow(ctx: &HeaderContext<'_>, from: Point, to: Point) -> Element {
    let mut d = PathData::new();
    d.move_to(from).line_to(to);
    Path::new(d)
        .stroke(ctx.color, ctx.params.stroke_width / 2.0)
        .marker_end(defaults::ARROW_MARKER_ID)
        .into()
}

// ============================================================================
// Types 2 and 4
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// A message box at the configured left or right geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoxHeader {
    pub side: Side,
}

impl HeaderBuilder for BoxHeader {
    fn layout(&self, ctx: &HeaderContext<'_>) -> HeaderLayout {
        let boxes = &ctx.params.message_boxes;
        let geometry = match self.side {
            Side::Left => boxes.left,
            Side::Right => boxes.right,
        };
        let (bbox, rect) = message_box(ctx, geometry);
        HeaderLayout {
            bbox,
            lines: Vec::new(),
            elements: vec![rect],
        }
    }
}

// ============================================================================
// Types 3 and 5
// ============================================================================

/// A message box split at the divide positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DividedHeader {
    /// Type 5 uses the plain geometry, type 3 the centered one.
    pub plain: bool,
}

impl HeaderBuilder for DividedHeader {
    fn layout(&self, ctx: &HeaderContext<'_>) -> HeaderLayout {
        let boxes = &ctx.params.message_boxes;
        let geometry = if self.plain {
            boxes.plain
        } else {
            boxes.center
        };
        let (bbox, rect) = message_box(ctx, geometry);
        let mut elements = vec![rect];

        for &divide in ctx.divides {
            let x = ctx.origin.x + divide;
            if x <= bbox.min.x || x >= bbox.max.x {
                continue;
            }
            let mut d = PathData::new();
            d.move_to(dvec2(x, bbox.min.y)).line_to(dvec2(x, bbox.max.y));
            elements.push(
                Path::new(d)
                    .stroke(ctx.color, 1.0)
                    .dashed(defaults::DIVIDE_DASH)
                    .into(),
            );
        }

        HeaderLayout {
            bbox,
            lines: Vec::new(),
            elements,
        }
    }
}

fn message_box(ctx: &HeaderContext<'_>, g: MessageBoxGeometry) -> (BBox, Element) {
    let origin = ctx.origin + dvec2(g.x, g.y);
    let bbox = BBox::from_origin_size(origin, Size::new(g.width, g.height));
    let rect = Rect::new(origin.x, origin.y, g.width, g.height)
        .stroke(defaults::BOX_STROKE, 1.0)
        .into();
    (bbox, rect)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::text::char_budget;

    fn ctx<'a>(params: &'a LayoutParams, statement: &'a str, divides: &'a [f64]) -> HeaderContext<'a> {
        HeaderContext {
            params,
            origin: dvec2(40.0, 10.0),
            layout_width: 720.0,
            statement,
            remark: None,
            divides,
            color: "#2c8592",
        }
    }

    #[test]
    fn test_statement_box_is_centered() {
        let params = LayoutParams::default();
        let layout = layout_header(HeaderType::Statement, &ctx(&params, "short text", &[]));

        // 560 wide box centered in 720 starting at x = 40
        assert_eq!(layout.lines, vec!["short text"]);
        assert_eq!(layout.bbox.min.y, 10.0);
        assert_eq!(layout.bbox.max.y, 10.0 + 14.0 * 1.2);
        assert_eq!(layout.bbox.min.x, 40.0);
        assert_eq!(layout.bbox.max.x, 760.0);

        let svg: Vec<String> = layout.elements.iter().map(ToString::to_string).collect();
        assert!(svg[0].starts_with(r#"<text x="400" y="24""#));
        assert_eq!(svg.iter().filter(|e| e.contains("marker-end")).count(), 2);
    }

    #[test]
    fn test_statement_wraps_to_box_width() {
        let params = LayoutParams::default();
        let statement = "word ".repeat(39);
        let layout = layout_header(HeaderType::Statement, &ctx(&params, &statement, &[]));

        let budget = char_budget(560.0, params.message_font_size);
        assert_eq!(budget, 66);
        assert_eq!(layout.lines.len(), 3);
        assert!(layout.lines.iter().all(|l| l.chars().count() <= budget));
        assert!((layout.bbox.height() - 3.0 * 14.0 * 1.2).abs() < 1e-9);
    }

    #[test]
    fn test_statement_box_never_wider_than_layout() {
        let params = LayoutParams::default();
        let mut c = ctx(&params, "a b c", &[]);
        c.layout_width = 300.0;
        let layout = layout_header(HeaderType::Statement, &c);
        assert_eq!(layout.bbox.min.x, 40.0);
        assert_eq!(layout.bbox.width(), 300.0);
        // no room left for the flanking arrows
        assert!(layout.elements.iter().all(|e| !e.to_string().contains("marker-end")));
    }

    #[test]
    fn test_remark_is_rotated_on_the_left() {
        let params = LayoutParams::default();
        let mut c = ctx(&params, "statement", &[]);
        c.remark = Some("Remark");
        let layout = layout_header(HeaderType::Statement, &c);
        let remark = layout
            .elements
            .iter()
            .map(ToString::to_string)
            .find(|e| e.contains("rotate(-90"))
            .unwrap();
        assert!(remark.contains(">Remark</text>"));
        assert!(layout.bbox.min.x < 40.0);
    }

    #[test]
    fn test_empty_statement_has_no_lines() {
        let params = LayoutParams::default();
        let layout = layout_header(HeaderType::Statement, &ctx(&params, "", &[]));
        assert!(layout.lines.is_empty());
        assert_eq!(layout.bbox.height(), 0.0);
        assert!(layout.elements.is_empty());
    }

    #[test]
    fn test_side_boxes_use_configured_geometry() {
        let params = LayoutParams::default();
        let left = layout_header(HeaderType::Left, &ctx(&params, "x", &[]));
        let right = layout_header(HeaderType::Right, &ctx(&params, "x", &[]));

        assert_eq!(left.bbox.min, dvec2(40.0, 10.0));
        assert_eq!(left.bbox.size(), Size::new(300.0, 44.0));
        assert_eq!(right.bbox.min, dvec2(460.0, 10.0));
        assert_eq!(left.elements.len(), 1);
    }

    #[test]
    fn test_divided_headers_split_at_divides() {
        let params = LayoutParams::default();
        let divides = [200.0, 400.0];

        let center = layout_header(HeaderType::DividedCenter, &ctx(&params, "x", &divides));
        let dashed = center
            .elements
            .iter()
            .filter(|e| e.to_string().contains("stroke-dasharray"))
            .count();
        assert_eq!(dashed, 2);
        assert_eq!(center.bbox.min.x, 120.0);

        // a divide outside the box is skipped
        let plain = layout_header(HeaderType::DividedPlain, &ctx(&params, "x", &[0.0, 400.0]));
        assert_eq!(plain.elements.len(), 2);
        assert_eq!(plain.bbox.width(), 720.0);
    }

    #[test]
    fn test_variant_dispatch() {
        assert_eq!(
            HeaderVariant::from(HeaderType::DividedPlain),
            HeaderVariant::Divided(DividedHeader { plain: true })
        );
        assert_eq!(
            HeaderVariant::from(HeaderType::Statement),
            HeaderVariant::Statement(StatementHeader)
        );
    }
}

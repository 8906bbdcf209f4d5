//! SVG element tree and serializer
//!
//! The tree is retained-mode and flat apart from [`Group`], which shifts its
//! children into a local coordinate system. Serialization is a single
//! structural walk: every coordinate must already be final.
//!
//! Numbers are written with Rust's shortest round-trip `f64` formatting, so
//! parsing an attribute back yields the exact value that was laid out.

use std::fmt::{self, Display};

use crate::types::Point;

pub const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Lossless number formatting for attributes and path data.
#[derive(Debug, Clone, Copy)]
pub struct Num(pub f64);

impl Display for Num {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // "-0" parses fine but reads badly
        let v = if self.0 == 0.0 { 0.0 } else { self.0 };
        write!(f, "{v}")
    }
}

/// Escape text content for use inside an element.
pub fn escape_text(s: &str) -> String {
    escape(s, false)
}

fn escape_attr(s: &str) -> String {
    escape(s, true)
}

fn escape(s: &str, quotes: bool) -> String {
    let mut out = String::with_capacity(s.len());
    let mut start = 0;
    for (i, b) in s.bytes().enumerate() {
        let esc = match b {
            b'&' => "&amp;",
            b'<' => "&lt;",
            b'>' => "&gt;",
            b'"' if quotes => "&quot;",
            _ => continue,
        };
        out.push_str(&s[start..i]);
        out.push_str(esc);
        start = i + 1;
    }
    out.push_str(&s[start..]);
    out
}

/// Writes ` name="value"` pairs.
struct Attrs<'a, 'b> {
    f: &'a mut fmt::Formatter<'b>,
}

impl Attrs<'_, '_> {
    fn num(&mut self, name: &str, value: f64) -> fmt::Result {
        write!(self.f, " {name}=\"{}\"", Num(value))
    }

    fn str(&mut self, name: &str, value: &str) -> fmt::Result {
        write!(self.f, " {name}=\"{}\"", escape_attr(value))
    }

    fn opt_str(&mut self, name: &str, value: Option<&str>) -> fmt::Result {
        match value {
            Some(v) => self.str(name, v),
            None => Ok(()),
        }
    }

    fn opt_num(&mut self, name: &str, value: Option<f64>) -> fmt::Result {
        match value {
            Some(v) => self.num(name, v),
            None => Ok(()),
        }
    }
}

// ============================================================================
// Elements
// ============================================================================

/// Arrowhead glyph definition, referenced as `url(#id)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub id: String,
    pub ref_x: f64,
    pub ref_y: f64,
    pub width: f64,
    pub height: f64,
    pub path: String,
    pub fill: String,
}

impl Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<marker")?;
        let mut a = Attrs { f: &mut *f };
        a.str("id", &self.id)?;
        a.num("markerWidth", self.width)?;
        a.num("markerHeight", self.height)?;
        a.num("refX", self.ref_x)?;
        a.num("refY", self.ref_y)?;
        a.str("orient", "auto")?;
        a.str("markerUnits", "userSpaceOnUse")?;
        f.write_str("><path")?;
        let mut a = Attrs { f: &mut *f };
        a.str("d", &self.path)?;
        a.str("fill", &self.fill)?;
        f.write_str("/></marker>")
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Path {
    pub d: String,
    pub stroke: Option<String>,
    pub stroke_width: Option<f64>,
    pub fill: Option<String>,
    pub marker_start: Option<String>,
    pub marker_end: Option<String>,
    pub dasharray: Option<String>,
    pub round: bool,
}

impl Path {
    pub fn new(d: impl Into<String>) -> Self {
        Path {
            d: d.into(),
            ..Default::default()
        }
    }

    pub fn stroke(mut self, color: &str, width: f64) -> Self {
        self.stroke = Some(color.to_string());
        self.stroke_width = Some(width);
        self
    }

    pub fn fill(mut self, color: &str) -> Self {
        self.fill = Some(color.to_string());
        self
    }

    pub fn marker_start(mut self, id: &str) -> Self {
        self.marker_start = Some(id.to_string());
        self
    }

    pub fn marker_end(mut self, id: &str) -> Self {
        self.marker_end = Some(id.to_string());
        self
    }

    pub fn dashed(mut self, pattern: &str) -> Self {
        self.dasharray = Some(pattern.to_string());
        self
    }

    /// Round line caps and joins.
    pub fn round(mut self) -> Self {
        self.round = true;
        self
    }
}

impl Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<path")?;
        let mut a = Attrs { f: &mut *f };
        a.str("d", &self.d)?;
        a.str("fill", self.fill.as_deref().unwrap_or("none"))?;
        a.opt_str("stroke", self.stroke.as_deref())?;
        a.opt_num("stroke-width", self.stroke_width)?;
        a.opt_str("stroke-dasharray", self.dasharray.as_deref())?;
        if self.round {
            a.str("stroke-linecap", "round")?;
            a.str("stroke-linejoin", "round")?;
        }
        if let Some(id) = &self.marker_start {
            a.str("marker-start", &format!("url(#{id})"))?;
        }
        if let Some(id) = &self.marker_end {
            a.str("marker-end", &format!("url(#{id})"))?;
        }
        f.write_str("/>")
    }
}

/// A text run centered on `(x, y)`. `content` is written verbatim; escape it
/// with [`escape_text`].
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    pub x: f64,
    pub y: f64,
    pub content: String,
    pub font_family: Option<String>,
    pub font_size: f64,
    pub weight: Option<u16>,
    pub fill: Option<String>,
    /// Rotation in degrees about `(x, y)`.
    pub rotate: Option<f64>,
}

impl Text {
    pub fn new(pos: Point, font_size: f64, content: impl Into<String>) -> Self {
        Text {
            x: pos.x,
            y: pos.y,
            content: content.into(),
            font_family: None,
            font_size,
            weight: None,
            fill: None,
            rotate: None,
        }
    }

    pub fn family(mut self, family: &str) -> Self {
        self.font_family = Some(family.to_string());
        self
    }

    pub fn weight(mut self, weight: u16) -> Self {
        self.weight = Some(weight);
        self
    }

    pub fn fill(mut self, color: &str) -> Self {
        self.fill = Some(color.to_string());
        self
    }

    pub fn rotate(mut self, degrees: f64) -> Self {
        self.rotate = Some(degrees);
        self
    }
}

impl Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<text")?;
        let mut a = Attrs { f: &mut *f };
        a.num("x", self.x)?;
        a.num("y", self.y)?;
        a.opt_str("font-family", self.font_family.as_deref())?;
        a.num("font-size", self.font_size)?;
        a.str("text-anchor", "middle")?;
        if let Some(weight) = self.weight {
            a.str("font-weight", &weight.to_string())?;
        }
        a.opt_str("fill", self.fill.as_deref())?;
        if let Some(deg) = self.rotate {
            let transform = format!("rotate({} {} {})", Num(deg), Num(self.x), Num(self.y));
            a.str("transform", &transform)?;
        }
        write!(f, ">{}</text>", self.content)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: Option<String>,
    pub stroke: Option<String>,
    pub stroke_width: Option<f64>,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Rect {
            x,
            y,
            width,
            height,
            ..Default::default()
        }
    }

    pub fn fill(mut self, color: &str) -> Self {
        self.fill = Some(color.to_string());
        self
    }

    pub fn stroke(mut self, color: &str, width: f64) -> Self {
        self.stroke = Some(color.to_string());
        self.stroke_width = Some(width);
        self
    }
}

impl Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<rect")?;
        let mut a = Attrs { f: &mut *f };
        a.num("x", self.x)?;
        a.num("y", self.y)?;
        a.num("width", self.width)?;
        a.num("height", self.height)?;
        a.str("fill", self.fill.as_deref().unwrap_or("none"))?;
        a.opt_str("stroke", self.stroke.as_deref())?;
        a.opt_num("stroke-width", self.stroke_width)?;
        f.write_str("/>")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    pub cx: f64,
    pub cy: f64,
    pub r: f64,
    pub fill: String,
    pub stroke: Option<String>,
    pub stroke_width: Option<f64>,
}

impl Display for Circle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<circle")?;
        let mut a = Attrs { f: &mut *f };
        a.num("cx", self.cx)?;
        a.num("cy", self.cy)?;
        a.num("r", self.r)?;
        a.str("fill", &self.fill)?;
        a.opt_str("stroke", self.stroke.as_deref())?;
        a.opt_num("stroke-width", self.stroke_width)?;
        f.write_str("/>")
    }
}

/// Children drawn in a coordinate system whose origin is `origin`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Group {
    pub origin: Point,
    pub children: Vec<Element>,
}

impl Group {
    pub fn at(origin: Point) -> Self {
        Group {
            origin,
            children: Vec::new(),
        }
    }

    pub fn push(&mut self, element: impl Into<Element>) {
        self.children.push(element.into());
    }
}

impl Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<g transform=\"translate({} {})\">",
            Num(self.origin.x),
            Num(self.origin.y)
        )?;
        for child in &self.children {
            write!(f, "{child}")?;
        }
        f.write_str("</g>")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Path(Path),
    Text(Text),
    Rect(Rect),
    Circle(Circle),
    Group(Group),
}

impl Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Element::Path(e) => Display::fmt(e, f),
            Element::Text(e) => Display::fmt(e, f),
            Element::Rect(e) => Display::fmt(e, f),
            Element::Circle(e) => Display::fmt(e, f),
            Element::Group(e) => Display::fmt(e, f),
        }
    }
}

macro_rules! element_from {
    ($($ty:ident),*) => {
        $(impl From<$ty> for Element {
            fn from(e: $ty) -> Self {
                Element::$ty(e)
            }
        })*
    };
}

element_from!(Path, Text, Rect, Circle, Group);

/// Root canvas: defs plus a flat child list.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub width: f64,
    pub height: f64,
    pub markers: Vec<Marker>,
    pub children: Vec<Element>,
}

impl Document {
    pub fn new(width: f64, height: f64) -> Self {
        Document {
            width,
            height,
            markers: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn push(&mut self, element: impl Into<Element>) {
        self.children.push(element.into());
    }

    pub fn extend(&mut self, elements: impl IntoIterator<Item = Element>) {
        self.children.extend(elements);
    }

    /// Serialize to a standalone SVG string.
    pub fn to_svg(&self) -> String {
        self.to_string()
    }
}

impl Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<svg xmlns=\"{SVG_NS}\" viewBox=\"0 0 {w} {h}\" width=\"{w}\" height=\"{h}\">",
            w = Num(self.width),
            h = Num(self.height)
        )?;
        if !self.markers.is_empty() {
            f.write_str("<defs>")?;
            for marker in &self.markers {
                write!(f, "{marker}")?;
            }
            f.write_str("</defs>")?;
        }
        for child in &self.children {
            write!(f, "{child}")?;
        }
        f.write_str("</svg>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::dvec2;

    #[test]
    fn test_num_is_lossless() {
        assert_eq!(Num(180.0).to_string(), "180");
        assert_eq!(Num(-0.0).to_string(), "0");
        assert_eq!(Num(0.1 + 0.2).to_string(), "0.30000000000000004");
        let v = 720.0 / 7.0;
        assert_eq!(Num(v).to_string().parse::<f64>().unwrap(), v);
    }

    #[test]
    fn test_escape_text() {
        assert_eq!(escape_text("A & B <c>"), "A &amp; B &lt;c&gt;");
        assert_eq!(escape_text("ครบอายุ"), "ครบอายุ");
    }

    #[test]
    fn test_escape_keeps_multibyte_runs() {
        assert_eq!(escape_attr("ก\"&ข"), "ก&quot;&amp;ข");
        assert_eq!(escape_text("ก\"&ข>"), "ก\"&amp;ข&gt;");
    }

    #[test]
    fn test_path_serialization() {
        let path = Path::new("M 0 0 L 10 -5")
            .stroke("#2c8592", 1.5)
            .marker_end("arrow")
            .dashed("4 3");
        insta::assert_snapshot!(path.to_string(), @r##"<path d="M 0 0 L 10 -5" fill="none" stroke="#2c8592" stroke-width="1.5" stroke-dasharray="4 3" marker-end="url(#arrow)"/>"##);
    }

    #[test]
    fn test_double_headed_path() {
        let path = Path::new("M 0 0 L 100 0")
            .stroke("#333", 1.0)
            .marker_start("arrow")
            .marker_end("arrow");
        let svg = path.to_string();
        assert!(svg.contains(r##"marker-start="url(#arrow)" marker-end="url(#arrow)""##));
    }

    #[test]
    fn test_rotated_text() {
        let text = Text::new(dvec2(15.0, 120.5), 14.0, "End of Year")
            .weight(600)
            .rotate(-90.0);
        insta::assert_snapshot!(text.to_string(), @r#"<text x="15" y="120.5" font-size="14" text-anchor="middle" font-weight="600" transform="rotate(-90 15 120.5)">End of Year</text>"#);
    }

    #[test]
    fn test_attribute_values_are_escaped() {
        let rect = Rect::new(0.0, 0.0, 1.0, 1.0).fill("a\"b&c");
        assert!(rect.to_string().contains(r#"fill="a&quot;b&amp;c""#));
    }

    #[test]
    fn test_document_structure() {
        let mut doc = Document::new(800.0, 280.0);
        doc.markers.push(Marker {
            id: "arrow".into(),
            ref_x: 6.0,
            ref_y: 3.0,
            width: 6.0,
            height: 6.0,
            path: "M0,0 L6,3 L0,6 Z".into(),
            fill: "#2c8592".into(),
        });
        let mut group = Group::at(dvec2(40.0, 150.0));
        group.push(Circle {
            cx: 0.0,
            cy: 0.0,
            r: 8.0,
            fill: "#c9e04a".into(),
            stroke: None,
            stroke_width: None,
        });
        doc.push(group);

        let svg = doc.to_svg();
        assert!(svg.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 800 280""#));
        assert!(svg.contains(r#"<defs><marker id="arrow""#));
        assert!(svg.contains(
            r##"<g transform="translate(40 150)"><circle cx="0" cy="0" r="8" fill="#c9e04a"/></g>"##
        ));
        assert!(svg.ends_with("</svg>"));

        let parsed = roxmltree::Document::parse(&svg).unwrap();
        assert_eq!(parsed.root_element().tag_name().name(), "svg");
    }
}

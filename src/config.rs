//! Request and layout configuration.
//!
//! Every field has a default, so an empty JSON object is a valid request.
//! Numeric fields are checked by [`TimelineRequest::validate`] before any
//! layout runs.

use std::borrow::Cow;
use std::collections::BTreeSet;

use serde::Deserialize;
use serde_json::Value;

use crate::benefit::{BenefitTable, format_grouped};
use crate::errors::ConfigError;
use crate::i18n::{SA_TEMPLATES, SaSubstitution};
use crate::model::{ChartVariant, HeaderType, Milestone, TransitionCategory, ZigzagTrigger};
use crate::render::defaults;
use crate::types::{check_finite, check_non_negative, check_positive};

/// Arrowhead marker definition.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MarkerGeometry {
    pub ref_x: f64,
    pub ref_y: f64,
    pub width: f64,
    pub height: f64,
    pub path: String,
}

impl Default for MarkerGeometry {
    fn default() -> Self {
        MarkerGeometry {
            ref_x: defaults::MARKER_REF_X,
            ref_y: defaults::MARKER_REF_Y,
            width: defaults::MARKER_WIDTH,
            height: defaults::MARKER_HEIGHT,
            path: defaults::MARKER_PATH.to_string(),
        }
    }
}

/// Message box placement, relative to the top-left of the layout area.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageBoxGeometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl MessageBoxGeometry {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        MessageBoxGeometry {
            x,
            y,
            width,
            height,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MessageBoxes {
    pub left: MessageBoxGeometry,
    pub right: MessageBoxGeometry,
    pub center: MessageBoxGeometry,
    pub plain: MessageBoxGeometry,
}

impl Default for MessageBoxes {
    fn default() -> Self {
        MessageBoxes {
            left: MessageBoxGeometry::new(0.0, 0.0, 300.0, 44.0),
            right: MessageBoxGeometry::new(420.0, 0.0, 300.0, 44.0),
            center: MessageBoxGeometry::new(80.0, 0.0, 560.0, 44.0),
            plain: MessageBoxGeometry::new(0.0, 0.0, 720.0, 44.0),
        }
    }
}

/// Named layout constants.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutParams {
    pub small_gap: f64,
    pub warp_gap: f64,
    pub warp_space: f64,
    pub warp_height: f64,
    pub marker: MarkerGeometry,
    pub stroke_width: f64,
    pub message_font_size: f64,
    pub year_font_size: f64,
    pub at_age_font_size: f64,
    pub premium_font_size: f64,
    pub amount_font_size: f64,
    pub arrow_padding: f64,
    pub year_padding: f64,
    pub at_age_offset: f64,
    pub premium_offset: f64,
    pub premium_caption_offset: f64,
    pub axis_label_offset: f64,
    pub year_marker_radius: f64,
    pub message_boxes: MessageBoxes,
    pub top_padding: f64,
    pub header_gap: f64,
    pub font_family: String,
    pub background: String,
    pub text_color: String,
}

impl Default for LayoutParams {
    fn default() -> Self {
        LayoutParams {
            small_gap: defaults::SMALL_GAP,
            warp_gap: defaults::WARP_GAP,
            warp_space: defaults::WARP_SPACE,
            warp_height: defaults::WARP_HEIGHT,
            marker: MarkerGeometry::default(),
            stroke_width: defaults::STROKE_WIDTH,
            message_font_size: defaults::MESSAGE_FONT_SIZE,
            year_font_size: defaults::YEAR_FONT_SIZE,
            at_age_font_size: defaults::AT_AGE_FONT_SIZE,
            premium_font_size: defaults::PREMIUM_FONT_SIZE,
            amount_font_size: defaults::AMOUNT_FONT_SIZE,
            arrow_padding: defaults::ARROW_PADDING,
            year_padding: defaults::YEAR_PADDING,
            at_age_offset: defaults::AT_AGE_OFFSET,
            premium_offset: defaults::PREMIUM_OFFSET,
            premium_caption_offset: defaults::PREMIUM_CAPTION_OFFSET,
            axis_label_offset: defaults::AXIS_LABEL_OFFSET,
            year_marker_radius: defaults::YEAR_MARKER_RADIUS,
            message_boxes: MessageBoxes::default(),
            top_padding: defaults::TOP_PADDING,
            header_gap: defaults::HEADER_GAP,
            font_family: defaults::FONT_FAMILY.to_string(),
            background: defaults::BACKGROUND.to_string(),
            text_color: defaults::TEXT_COLOR.to_string(),
        }
    }
}

impl LayoutParams {
    /// Pixel length of a warp-category gap.
    pub fn warp_length(&self) -> f64 {
        self.warp_gap + self.warp_space
    }

    /// Smallest `premiumOffset` whose shaft still reaches down to the
    /// arrowhead: marker radius, padding, then the head itself.
    pub fn min_premium_offset(&self) -> f64 {
        self.year_marker_radius + self.arrow_padding + defaults::PREMIUM_HEAD_LENGTH
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("smallGap", self.small_gap),
            ("warpGap", self.warp_gap),
            ("warpSpace", self.warp_space),
            ("marker.width", self.marker.width),
            ("marker.height", self.marker.height),
            ("strokeWidth", self.stroke_width),
            ("messageFontSize", self.message_font_size),
            ("yearFontSize", self.year_font_size),
            ("atAgeFontSize", self.at_age_font_size),
            ("premiumFontSize", self.premium_font_size),
            ("amountFontSize", self.amount_font_size),
            ("messageBoxes.left.width", self.message_boxes.left.width),
            ("messageBoxes.right.width", self.message_boxes.right.width),
            ("messageBoxes.center.width", self.message_boxes.center.width),
            ("messageBoxes.plain.width", self.message_boxes.plain.width),
        ];
        for (name, value) in positive {
            check_positive(value).map_err(ConfigError::param(name))?;
        }

        let non_negative = [
            ("warpHeight", self.warp_height),
            ("arrowPadding", self.arrow_padding),
            ("yearPadding", self.year_padding),
            ("atAgeOffset", self.at_age_offset),
            ("premiumOffset", self.premium_offset),
            ("premiumCaptionOffset", self.premium_caption_offset),
            ("axisLabelOffset", self.axis_label_offset),
            ("yearMarkerRadius", self.year_marker_radius),
            ("topPadding", self.top_padding),
            ("headerGap", self.header_gap),
            ("messageBoxes.left.height", self.message_boxes.left.height),
            ("messageBoxes.right.height", self.message_boxes.right.height),
            ("messageBoxes.center.height", self.message_boxes.center.height),
            ("messageBoxes.plain.height", self.message_boxes.plain.height),
        ];
        for (name, value) in non_negative {
            check_non_negative(value).map_err(ConfigError::param(name))?;
        }

        let finite = [
            ("marker.refX", self.marker.ref_x),
            ("marker.refY", self.marker.ref_y),
            ("messageBoxes.left.x", self.message_boxes.left.x),
            ("messageBoxes.left.y", self.message_boxes.left.y),
            ("messageBoxes.right.x", self.message_boxes.right.x),
            ("messageBoxes.right.y", self.message_boxes.right.y),
            ("messageBoxes.center.x", self.message_boxes.center.x),
            ("messageBoxes.center.y", self.message_boxes.center.y),
            ("messageBoxes.plain.x", self.message_boxes.plain.x),
            ("messageBoxes.plain.y", self.message_boxes.plain.y),
        ];
        for (name, value) in finite {
            check_finite(value).map_err(ConfigError::param(name))?;
        }

        if self.warp_space <= self.warp_gap {
            return Err(ConfigError::WarpSpanTooShort {
                warp_gap: self.warp_gap,
                warp_space: self.warp_space,
            });
        }
        if self.premium_offset < self.min_premium_offset() {
            return Err(ConfigError::PremiumOffsetTooShort {
                offset: self.premium_offset,
                min: self.min_premium_offset(),
            });
        }
        Ok(())
    }
}

/// A complete render request.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TimelineRequest {
    /// Milestones; absent or empty selects the default set.
    pub data: Option<Vec<Milestone>>,
    pub width: f64,
    pub height: f64,
    pub margin_horizontal: f64,
    pub color: String,
    pub dot_fill: String,
    pub lang: String,
    pub zigzag_max_amplitude: f64,
    pub zigzag: ZigzagTrigger,
    /// Shorthand for `zigzag: {"indices": [...]}`; wins when present.
    pub zigzag_at_indices: Option<BTreeSet<usize>>,
    pub pixel_ratio: f64,
    pub header_type: HeaderType,
    pub chart_variant: ChartVariant,
    pub show_remark: bool,
    pub issue_age: i32,
    pub sum_assured: Option<f64>,
    pub sa_template: usize,
    pub benefits: BenefitTable,
    pub layout: LayoutParams,
}

impl Default for TimelineRequest {
    fn default() -> Self {
        TimelineRequest {
            data: None,
            width: defaults::WIDTH,
            height: defaults::HEIGHT,
            margin_horizontal: defaults::MARGIN_HORIZONTAL,
            color: defaults::COLOR.to_string(),
            dot_fill: defaults::DOT_FILL.to_string(),
            lang: defaults::LANG.to_string(),
            zigzag_max_amplitude: defaults::ZIGZAG_MAX_AMPLITUDE,
            zigzag: ZigzagTrigger::default(),
            zigzag_at_indices: None,
            pixel_ratio: defaults::PIXEL_RATIO,
            header_type: HeaderType::default(),
            chart_variant: ChartVariant::default(),
            show_remark: false,
            issue_age: 0,
            sum_assured: None,
            sa_template: 0,
            benefits: BenefitTable::default(),
            layout: LayoutParams::default(),
        }
    }
}

impl TimelineRequest {
    /// Parse a JSON request.
    ///
    /// Integer selectors are checked before the typed decode so an unknown
    /// header type or transition category is reported as itself rather than
    /// as a generic JSON error.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let value: Value = serde_json::from_str(json)?;
        check_selectors(&value)?;
        Ok(serde_json::from_value(value)?)
    }

    pub fn with_data(mut self, data: Vec<Milestone>) -> Self {
        self.data = Some(data);
        self
    }

    /// Width available to the axis once both margins are removed.
    pub fn layout_width(&self) -> f64 {
        self.width - 2.0 * self.margin_horizontal
    }

    pub fn milestones(&self) -> Cow<'_, [Milestone]> {
        match &self.data {
            Some(data) if !data.is_empty() => Cow::Borrowed(data),
            _ => Cow::Owned(crate::default_milestones()),
        }
    }

    pub fn zigzag_trigger(&self) -> Cow<'_, ZigzagTrigger> {
        match &self.zigzag_at_indices {
            Some(indices) => Cow::Owned(ZigzagTrigger::Indices(indices.clone())),
            None => Cow::Borrowed(&self.zigzag),
        }
    }

    pub fn sa_substitution(&self) -> Option<SaSubstitution> {
        self.sum_assured.map(|amount| SaSubstitution {
            formatted_amount: format_grouped(amount),
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_positive(self.width).map_err(ConfigError::param("width"))?;
        check_positive(self.height).map_err(ConfigError::param("height"))?;
        check_non_negative(self.margin_horizontal)
            .map_err(ConfigError::param("marginHorizontal"))?;
        check_positive(self.layout_width()).map_err(ConfigError::param("layoutWidth"))?;
        check_non_negative(self.zigzag_max_amplitude)
            .map_err(ConfigError::param("zigzagMaxAmplitude"))?;
        check_positive(self.pixel_ratio).map_err(ConfigError::param("pixelRatio"))?;

        if let Some(amount) = self.sum_assured {
            check_non_negative(amount).map_err(ConfigError::param("sumAssured"))?;
            if self.sa_template >= SA_TEMPLATES.len() {
                return Err(ConfigError::UnknownTemplate {
                    index: self.sa_template,
                    count: SA_TEMPLATES.len(),
                });
            }
        }

        self.layout.validate()
    }
}

fn check_selectors(request: &Value) -> Result<(), ConfigError> {
    if let Some(selector) = request.get("headerType").and_then(Value::as_i64) {
        HeaderType::try_from(selector)?;
    }
    let milestones = request.get("data").and_then(Value::as_array);
    for milestone in milestones.into_iter().flatten() {
        for key in ["next", "transitionCategory"] {
            if let Some(category) = milestone.get(key).and_then(Value::as_i64) {
                TransitionCategory::try_from(category)?;
            }
        }
    }
    Ok(())
}

//! Default sizes and settings (all in pixels)

pub const WIDTH: f64 = 800.0;
pub const HEIGHT: f64 = 280.0;
pub const MARGIN_HORIZONTAL: f64 = 40.0;
pub const COLOR: &str = "#2c8592";
pub const DOT_FILL: &str = "#c9e04a";
pub const LANG: &str = "th";
pub const ZIGZAG_MAX_AMPLITUDE: f64 = 20.0;
pub const PIXEL_RATIO: f64 = 1.0;

pub const SMALL_GAP: f64 = 40.0;
pub const WARP_GAP: f64 = 20.0;
pub const WARP_SPACE: f64 = 60.0;
pub const WARP_HEIGHT: f64 = 10.0;

pub const MARKER_REF_X: f64 = 6.0;
pub const MARKER_REF_Y: f64 = 3.0;
pub const MARKER_WIDTH: f64 = 6.0;
pub const MARKER_HEIGHT: f64 = 6.0;
pub const MARKER_PATH: &str = "M0,0 L6,3 L0,6 Z";
pub const ARROW_MARKER_ID: &str = "arrow";

pub const STROKE_WIDTH: f64 = 3.0;
pub const DOT_STROKE_WIDTH: f64 = 2.0;
pub const CALLOUT_STROKE_WIDTH: f64 = 1.5;

pub const MESSAGE_FONT_SIZE: f64 = 14.0;
pub const YEAR_FONT_SIZE: f64 = 12.0;
pub const AT_AGE_FONT_SIZE: f64 = 10.0;
pub const PREMIUM_FONT_SIZE: f64 = 16.0;
pub const AMOUNT_FONT_SIZE: f64 = 12.0;
pub const LINE_HEIGHT: f64 = 1.2;

pub const ARROW_PADDING: f64 = 6.0;
pub const YEAR_PADDING: f64 = 25.0;
pub const AT_AGE_OFFSET: f64 = 15.0;
pub const PREMIUM_OFFSET: f64 = 110.0;
pub const PREMIUM_CAPTION_OFFSET: f64 = 60.0;
pub const PREMIUM_HEAD_LENGTH: f64 = 8.0;
pub const PREMIUM_HEAD_HALF_WIDTH: f64 = 6.0;
pub const AXIS_LABEL_OFFSET: f64 = 15.0;
pub const YEAR_MARKER_RADIUS: f64 = 8.0;

pub const TOP_PADDING: f64 = 10.0;
pub const HEADER_GAP: f64 = 10.0;

pub const FONT_FAMILY: &str = "THSarabun, Tahoma, sans-serif";
pub const BACKGROUND: &str = "#f8f9fa";
pub const TEXT_COLOR: &str = "#333";
pub const ARROWHEAD_FILL: &str = "#1b1b1b";
pub const BOX_STROKE: &str = "#666";
pub const SLOPE_DASH: &str = "4 3";
pub const DIVIDE_DASH: &str = "3 3";

/// Average glyph width as a fraction of the font size.
pub const CHAR_WIDTH_RATIO: f64 = 0.6;
/// Cap on the zigzag amplitude relative to the nominal inter-point gap.
pub const ZIGZAG_GAP_RATIO: f64 = 0.4;

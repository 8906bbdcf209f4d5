//! Path-data construction for the axis and its decorations.
//!
//! All coordinates are local to the axis group: the axis runs along `y = 0`
//! from `x = 0` and "up" is negative y.
//!
//! # Segment decorations
//!
//! Segment `i` joins step `i - 1` to step `i`. It is drawn as
//!
//! - a **warp** when step `i - 1` has the warp transition category: a straight
//!   run of `warpGap`, a detour reaching `-warpHeight` and `+warpHeight` at the
//!   25% and 75% marks of the remaining span, and a closing run of `warpGap`;
//! - a **zigzag** when the [`ZigzagTrigger`] selects the segment;
//! - a straight line otherwise.

use std::fmt::{self, Display, Write};

use glam::dvec2;

use crate::config::LayoutParams;
use crate::model::{TransitionCategory, ZigzagTrigger};
use crate::types::Point;

use super::defaults;
use super::geometry::arrowhead;
use super::layout::Step;
use super::svg::Num;

/// Accumulates `M`/`L`/`Z` commands.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathData {
    d: String,
}

impl PathData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(&mut self, p: Point) -> &mut Self {
        self.command('M', p)
    }

    pub fn line_to(&mut self, p: Point) -> &mut Self {
        self.command('L', p)
    }

    pub fn close(&mut self) -> &mut Self {
        self.d.push_str(" Z");
        self
    }

    fn command(&mut self, cmd: char, p: Point) -> &mut Self {
        if !self.d.is_empty() {
            self.d.push(' ');
        }
        // Writing into a String cannot fail.
        let _ = write!(self.d, "{cmd} {} {}", Num(p.x), Num(p.y));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.d.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.d
    }

    pub fn into_string(self) -> String {
        self.d
    }
}

impl Display for PathData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.d)
    }
}

impl From<PathData> for String {
    fn from(path: PathData) -> Self {
        path.d
    }
}

// ============================================================================
// Axis
// ============================================================================

/// The seven points of a zigzag from `x0` to `x1`, the first being the end of
/// the leading straight run.
///
/// `max_amplitude = min(configured, nominal_gap * 0.4)` caps both the straight
/// leaders and the vertical excursion, so the decoration shrinks with the
/// segment and never exceeds the cap.
pub fn zigzag_points(x0: f64, x1: f64, nominal_gap: f64, configured_max: f64) -> [Point; 7] {
    let max_amp = configured_max.min(nominal_gap * defaults::ZIGZAG_GAP_RATIO).max(0.0);
    let segment = x1 - x0;
    let straight = max_amp.min(segment / 6.0).max(0.0);
    let amp_x = (segment - 2.0 * straight).max(0.0) / 6.0;
    let amp_y = amp_x.min(max_amp);

    let start = x0 + straight;
    [
        dvec2(start, 0.0),
        dvec2(start + amp_x, -amp_y),
        dvec2(start + 2.0 * amp_x, 0.0),
        dvec2(start + 3.0 * amp_x, amp_y),
        dvec2(start + 4.0 * amp_x, 0.0),
        dvec2(x1 - straight, 0.0),
        dvec2(x1, 0.0),
    ]
}

/// The five points of a warp detour from `x0` to `x1`.
pub fn warp_points(x0: f64, x1: f64, warp_gap: f64, warp_height: f64) -> [Point; 5] {
    let span = (x1 - x0 - 2.0 * warp_gap).max(0.0);
    let start = x0 + warp_gap;
    [
        dvec2(start, 0.0),
        dvec2(start + 0.25 * span, -warp_height),
        dvec2(start + 0.75 * span, warp_height),
        dvec2(start + span, 0.0),
        dvec2(x1, 0.0),
    ]
}

/// What a segment is drawn as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    Straight,
    Zigzag,
    Warp,
}

/// Axis path settings for one render.
#[derive(Debug, Clone, Copy)]
pub struct AxisStyle<'a> {
    pub params: &'a LayoutParams,
    pub trigger: &'a ZigzagTrigger,
    pub max_amplitude: f64,
    /// Nominal inter-point gap used for the 40% amplitude cap.
    pub nominal_gap: f64,
}

impl AxisStyle<'_> {
    pub fn segment_kind(&self, segment: usize, left: &Step, right: &Step) -> SegmentKind {
        if left.milestone.next == TransitionCategory::Warp {
            SegmentKind::Warp
        } else if self
            .trigger
            .applies(segment, &left.milestone, &right.milestone)
        {
            SegmentKind::Zigzag
        } else {
            SegmentKind::Straight
        }
    }

    /// The connecting axis path through every step.
    pub fn axis_path(&self, steps: &[Step]) -> PathData {
        let mut path = PathData::new();
        let Some(first) = steps.first() else {
            return path;
        };
        path.move_to(dvec2(first.x, 0.0));

        for (segment, pair) in steps.windows(2).enumerate().map(|(i, w)| (i + 1, w)) {
            let (left, right) = (&pair[0], &pair[1]);
            match self.segment_kind(segment, left, right) {
                SegmentKind::Warp => {
                    let points =
                        warp_points(left.x, right.x, self.params.warp_gap, self.params.warp_height);
                    for p in points {
                        path.line_to(p);
                    }
                }
                SegmentKind::Zigzag => {
                    let points =
                        zigzag_points(left.x, right.x, self.nominal_gap, self.max_amplitude);
                    for p in points {
                        path.line_to(p);
                    }
                }
                SegmentKind::Straight => {
                    path.line_to(dvec2(right.x, 0.0));
                }
            }
        }
        path
    }
}

// ============================================================================
// Callouts and indicators
// ============================================================================

/// Straight callout from the axis anchor to the apex.
pub fn callout_path([anchor, apex]: [Point; 2]) -> PathData {
    let mut path = PathData::new();
    path.move_to(anchor).line_to(apex);
    path
}

/// Dashed slope through consecutive callout apexes (MC charts).
pub fn slope_path(steps: &[Step]) -> Option<PathData> {
    let apexes: Vec<Point> = steps.iter().filter_map(Step::apex).collect();
    if apexes.len() < 2 {
        return None;
    }
    let mut path = PathData::new();
    path.move_to(apexes[0]);
    for &p in &apexes[1..] {
        path.line_to(p);
    }
    Some(path)
}

/// Geometry of the premium-payment-finished indicator.
#[derive(Debug, Clone, PartialEq)]
pub struct PremiumIndicator {
    pub x: f64,
    pub shaft: PathData,
    pub head: PathData,
    /// Baseline of the value text above the shaft.
    pub value_anchor: Point,
    /// Baseline of the caption below the milestone.
    pub caption_anchor: Point,
}

/// The step carrying the premium-end indicator: the first one flagged
/// `lastPayment`, else the final step.
pub fn premium_target(steps: &[Step]) -> Option<&Step> {
    steps
        .iter()
        .find(|s| s.milestone.last_payment)
        .or_else(|| steps.last())
}

pub fn premium_indicator(x: f64, params: &LayoutParams) -> PremiumIndicator {
    let tip = dvec2(x, -(params.year_marker_radius + params.arrow_padding));
    let base_y = tip.y - defaults::PREMIUM_HEAD_LENGTH;

    let mut shaft = PathData::new();
    shaft
        .move_to(dvec2(x, -params.premium_offset))
        .line_to(dvec2(x, base_y));

    let mut head = PathData::new();
    if let Some([tip, a, b]) = arrowhead(
        tip,
        dvec2(0.0, 1.0),
        defaults::PREMIUM_HEAD_LENGTH,
        defaults::PREMIUM_HEAD_HALF_WIDTH,
    ) {
        head.move_to(a).line_to(b).line_to(tip).close();
    }

    PremiumIndicator {
        x,
        shaft,
        head,
        value_anchor: dvec2(x, -params.premium_offset - params.arrow_padding),
        caption_anchor: dvec2(x, params.premium_caption_offset),
    }
}

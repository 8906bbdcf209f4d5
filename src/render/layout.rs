//! Step layout solver.
//!
//! Partitions the layout width across milestones by transition category and
//! assigns x positions by forward accumulation:
//!
//! ```text
//! elastic = (width - c0 * smallGap - c2 * (warpGap + warpSpace)) / c1
//! x[0] = 0,  x[i + 1] = x[i] + length[i]
//! ```
//!
//! Categories are counted over the non-terminal milestones only; the last
//! milestone has nothing after it and its length is zero. The last elastic
//! step absorbs the floating-point remainder so the lengths sum to the width.

use glam::dvec2;

use crate::benefit::{BenefitTable, format_grouped};
use crate::config::LayoutParams;
use crate::errors::LayoutError;
use crate::model::{ChartVariant, Milestone, TransitionCategory};
use crate::types::Point;

use super::geometry::YieldHeightTable;

/// A milestone with its solved geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub milestone: Milestone,
    pub index: usize,
    /// Pixel width to the next milestone.
    pub length: f64,
    pub x: f64,
    /// Set for every milestone except the last.
    pub next_x: Option<f64>,
    /// Axis anchor and callout apex, for milestones with a real level.
    pub line_coords: Option<[Point; 2]>,
    pub amount_label: Option<String>,
}

impl Step {
    /// Callout apex, if the step has one.
    pub fn apex(&self) -> Option<Point> {
        self.line_coords.map(|[_, apex]| apex)
    }

    /// Height of the callout above the axis (zero without one).
    pub fn callout_height(&self) -> f64 {
        self.line_coords.map_or(0.0, |[anchor, apex]| anchor.y - apex.y)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StepLayout {
    pub steps: Vec<Step>,
    /// Solved length of one elastic gap (0 when none was needed).
    pub elastic_length: f64,
    pub width: f64,
}

impl StepLayout {
    pub fn total_length(&self) -> f64 {
        self.steps.iter().map(|s| s.length).sum()
    }

    /// Divide positions: x of the first two milestones flagged `divideSa`.
    pub fn divide_positions(&self) -> Vec<f64> {
        self.steps
            .iter()
            .filter(|s| s.milestone.divide_sa)
            .take(2)
            .map(|s| s.x)
            .collect()
    }
}

/// Solver inputs that stay fixed for one render.
#[derive(Debug, Clone, Copy)]
pub struct StepSolver<'a> {
    pub params: &'a LayoutParams,
    pub yields: &'a YieldHeightTable,
    pub benefits: &'a BenefitTable,
    pub variant: ChartVariant,
    pub issue_age: i32,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct CategoryCounts {
    small: usize,
    elastic: usize,
    warp: usize,
}

impl StepSolver<'_> {
    pub fn solve(&self, milestones: &[Milestone], width: f64) -> Result<StepLayout, LayoutError> {
        let lengths = self.lengths(milestones, width)?;
        let elastic_length = lengths.elastic;

        let mut steps = Vec::with_capacity(milestones.len());
        let mut x = 0.0;
        for (index, (milestone, &length)) in milestones.iter().zip(&lengths.per_step).enumerate() {
            let terminal = index + 1 == milestones.len();
            let next_x = (!terminal).then_some(x + length);
            steps.push(Step {
                milestone: milestone.clone(),
                index,
                length,
                x,
                next_x,
                line_coords: self.line_coords(milestone, x),
                amount_label: self.amount_label(milestone),
            });
            x += length;
        }

        Ok(StepLayout {
            steps,
            elastic_length,
            width,
        })
    }

    fn lengths(&self, milestones: &[Milestone], width: f64) -> Result<Lengths, LayoutError> {
        match milestones.len() {
            0 => {
                return Ok(Lengths {
                    per_step: Vec::new(),
                    elastic: 0.0,
                });
            }
            1 => {
                return Ok(Lengths {
                    per_step: vec![width],
                    elastic: 0.0,
                });
            }
            _ => {}
        }

        let gaps = &milestones[..milestones.len() - 1];
        let counts = gaps.iter().fold(CategoryCounts::default(), |mut c, m| {
            match m.next {
                TransitionCategory::Small => c.small += 1,
                TransitionCategory::Elastic => c.elastic += 1,
                TransitionCategory::Warp => c.warp += 1,
            }
            c
        });

        if counts.elastic == 0 {
            return Err(LayoutError::NoElasticMilestones);
        }

        let fixed = counts.small as f64 * self.params.small_gap
            + counts.warp as f64 * self.params.warp_length();
        let elastic = (width - fixed) / counts.elastic as f64;
        if elastic.is_nan() || elastic <= 0.0 {
            return Err(LayoutError::InfeasibleWidth { width, fixed });
        }

        crate::log::debug!(
            small = counts.small,
            elastic = counts.elastic,
            warp = counts.warp,
            elastic_length = elastic,
            "solved step lengths"
        );

        let mut per_step: Vec<f64> = gaps
            .iter()
            .map(|m| match m.next {
                TransitionCategory::Small => self.params.small_gap,
                TransitionCategory::Elastic => elastic,
                TransitionCategory::Warp => self.params.warp_length(),
            })
            .collect();
        per_step.push(0.0);

        if let Some(last) = gaps
            .iter()
            .rposition(|m| m.next == TransitionCategory::Elastic)
        {
            let others: f64 = per_step
                .iter()
                .enumerate()
                .filter(|&(i, _)| i != last)
                .map(|(_, len)| len)
                .sum();
            per_step[last] = width - others;
        }

        Ok(Lengths { per_step, elastic })
    }

    fn line_coords(&self, milestone: &Milestone, x: f64) -> Option<[Point; 2]> {
        let level = milestone.callout_level()?;
        match self.yields.height(level) {
            Some(height) => Some([dvec2(x, 0.0), dvec2(x, -height)]),
            None => {
                crate::log::debug!(id = %milestone.id, level, "level has no yield height");
                None
            }
        }
    }

    fn amount_label(&self, milestone: &Milestone) -> Option<String> {
        match self.variant {
            ChartVariant::Mc => milestone.amount_label.clone(),
            ChartVariant::Standard => self
                .lookup_amount(milestone)
                .or_else(|| milestone.amount_label.clone()),
        }
    }

    fn lookup_amount(&self, milestone: &Milestone) -> Option<String> {
        let Some(token) = milestone.year_token() else {
            crate::log::debug!(id = %milestone.id, year = ?milestone.year, "unparseable year token");
            return None;
        };
        let Some(year) = token.policy_year(self.issue_age) else {
            crate::log::debug!(id = %milestone.id, issue_age = self.issue_age, "policy year out of range");
            return None;
        };
        match self.benefits.lookup(year) {
            Some(record) => Some(format_grouped(record.cash_benefit)),
            None => {
                if !self.benefits.is_empty() {
                    crate::log::debug!(id = %milestone.id, year, "no benefit record");
                }
                None
            }
        }
    }
}

struct Lengths {
    per_step: Vec<f64>,
    elastic: f64,
}

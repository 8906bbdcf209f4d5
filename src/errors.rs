//! Error types with diagnostics using miette
//!
//! Layout and configuration failures are rejections: the pipeline never
//! emits partially-computed coordinates.

use miette::Diagnostic;
use thiserror::Error;

use crate::types::NumericError;

// ============================================================================
// Configuration Errors
// ============================================================================

/// Errors raised while validating a request before layout starts
#[derive(Error, Diagnostic, Debug)]
pub enum ConfigError {
    #[error("invalid header type: {value}")]
    #[diagnostic(
        code(policy_timeline::config::invalid_header_type),
        help("supported header types are 0, 2, 3, 4 and 5")
    )]
    InvalidHeaderType { value: i64 },

    #[error("invalid transition category: {value}")]
    #[diagnostic(
        code(policy_timeline::config::invalid_transition),
        help("0 = small gap, 1 = elastic gap, 2 = warp")
    )]
    InvalidTransition { value: i64 },

    #[error("invalid parameter `{name}`: {reason}")]
    #[diagnostic(code(policy_timeline::config::invalid_parameter))]
    InvalidParameter {
        name: &'static str,
        reason: NumericError,
    },

    #[error("warp space ({warp_space}) must exceed warp gap ({warp_gap})")]
    #[diagnostic(
        code(policy_timeline::config::warp_span_too_short),
        help("the warp detour is drawn between two straight runs of `warpGap`")
    )]
    WarpSpanTooShort { warp_gap: f64, warp_space: f64 },

    #[error("premium offset ({offset}) must be at least {min}")]
    #[diagnostic(
        code(policy_timeline::config::premium_offset_too_short),
        help("the premium shaft must reach the arrowhead above the year marker")
    )]
    PremiumOffsetTooShort { offset: f64, min: f64 },

    #[error("sum-assured template index {index} out of range")]
    #[diagnostic(
        code(policy_timeline::config::unknown_template),
        help("only {count} templates exist")
    )]
    UnknownTemplate { index: usize, count: usize },

    #[error("benefit table has {count} lists, at most {max} are supported")]
    #[diagnostic(code(policy_timeline::config::too_many_benefit_lists))]
    TooManyBenefitLists { count: usize, max: usize },

    #[error("malformed request JSON: {0}")]
    #[diagnostic(code(policy_timeline::config::json))]
    Json(#[from] serde_json::Error),
}

impl ConfigError {
    pub(crate) fn param(name: &'static str) -> impl FnOnce(NumericError) -> ConfigError {
        move |reason| ConfigError::InvalidParameter { name, reason }
    }
}

// ============================================================================
// Layout Errors
// ============================================================================

/// Errors raised by the step layout solver
#[derive(Error, Diagnostic, Debug, PartialEq)]
pub enum LayoutError {
    #[error("no elastic-gap milestone to absorb the remaining width")]
    #[diagnostic(
        code(policy_timeline::layout::no_elastic_milestones),
        help("mark at least one non-terminal milestone with transition category 1")
    )]
    NoElasticMilestones,

    #[error("fixed gaps need {fixed}px but the layout is only {width}px wide")]
    #[diagnostic(code(policy_timeline::layout::infeasible_width))]
    InfeasibleWidth { width: f64, fixed: f64 },
}

// ============================================================================
// Render Errors
// ============================================================================

/// Errors raised while producing output
#[derive(Error, Diagnostic, Debug)]
pub enum RenderError {
    #[error("rasterization failed: {message}")]
    #[diagnostic(code(policy_timeline::render::raster))]
    Raster { message: String },

    #[error("invalid raster size {width}x{height}")]
    #[diagnostic(code(policy_timeline::render::raster_size))]
    RasterSize { width: u32, height: u32 },
}

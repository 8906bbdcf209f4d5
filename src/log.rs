//! Logging shims for the layout pipeline.
//!
//! With the `tracing` feature the solver, header builder and chart assembler
//! report through `tracing` (`debug!` for computed geometry, `warn!` for
//! fallbacks such as an unknown language tag). Without it every call site
//! compiles away.

#[cfg(feature = "tracing")]
pub use tracing::{debug, warn};

#[cfg(not(feature = "tracing"))]
#[macro_export]
#[doc(hidden)]
macro_rules! __timeline_debug {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
#[macro_export]
#[doc(hidden)]
macro_rules! __timeline_warn {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
pub use crate::{__timeline_debug as debug, __timeline_warn as warn};

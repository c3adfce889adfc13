//! Output formatting utilities
//!
//! This module provides the per-item status formatter and the transfer
//! spinner. All listing and status lines go to stdout; fatal errors go to
//! stderr.

mod formatter;
mod progress;

pub use formatter::Formatter;
pub use progress::Spinner;

/// Output configuration derived from CLI flags
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputConfig {
    /// Disable colored output
    pub no_color: bool,
    /// Disable the transfer spinner
    pub no_progress: bool,
    /// Suppress non-error output
    pub quiet: bool,
}

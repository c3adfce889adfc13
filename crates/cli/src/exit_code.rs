//! Exit code definitions for the ncup CLI

/// Exit codes for the ncup CLI application.
///
/// These codes follow a consistent convention to allow scripts and automation
/// to handle different error scenarios appropriately. Recoverable per-item
/// conditions (missing source, existing remote entry, missing listed path)
/// are reported and skipped; they never show up as an exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Operation completed successfully
    Success = 0,

    /// General/unspecified error
    GeneralError = 1,

    /// User input error: invalid arguments, malformed or incomplete config
    UsageError = 2,

    /// Network or unrecognized server error
    NetworkError = 3,

    /// Authentication or permission failure
    AuthError = 4,

    /// Remote path does not exist
    NotFound = 5,

    /// Remote entry already exists
    Conflict = 6,
}

impl ExitCode {
    /// Convert exit code to i32 for use with std::process::exit
    #[inline]
    pub const fn as_i32(self) -> i32 {
        self as i32
    }

    /// Map a propagated core error onto its exit code
    pub const fn from_error(error: &ncup_core::Error) -> Self {
        match error.exit_code() {
            2 => Self::UsageError,
            3 => Self::NetworkError,
            4 => Self::AuthError,
            5 => Self::NotFound,
            6 => Self::Conflict,
            _ => Self::GeneralError,
        }
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code.as_i32()
    }
}

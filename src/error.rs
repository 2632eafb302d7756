//! Crate-wide error type.
//!
//! Every fallible operation returns `Result<_, AppError>`. The exit code is
//! what the `npi` binary terminates with:
//!
//! - `2` invalid input (flags, environment, scenario files, profile text, ranges)
//! - `3` degenerate model input (empty / zero-sum profiles, oversized initial cases)
//! - `4` numerical or output failure

/// Exit code for malformed caller input.
pub const EXIT_INPUT: u8 = 2;
/// Exit code for inputs the model refuses to evaluate.
pub const EXIT_DOMAIN: u8 = 3;
/// Exit code for numerical failures and output errors.
pub const EXIT_NUMERIC: u8 = 4;

#[derive(Clone, PartialEq, Eq)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn input(message: impl Into<String>) -> Self {
        Self::new(EXIT_INPUT, message)
    }

    pub fn domain(message: impl Into<String>) -> Self {
        Self::new(EXIT_DOMAIN, message)
    }

    pub fn numeric(message: impl Into<String>) -> Self {
        Self::new(EXIT_NUMERIC, message)
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_domain(&self) -> bool {
        self.exit_code == EXIT_DOMAIN
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

//! Error types.
//!
//! - `AnalysisError` is returned by the analysis stages (tally, reference model,
//!   degeneracy estimation). Each variant names one failure class and carries the
//!   offending value.
//! - `AppError` is what the binary sees: a message plus a process exit code.

use thiserror::Error;

use crate::domain::CellKey;

/// Fatal conditions raised by the analysis pipeline.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    /// A vote record is missing its group identifier or vote value.
    #[error("Missing required field `{field}` on line {line}")]
    MissingField { line: usize, field: String },

    /// No vote records (or no groups) were supplied.
    #[error("No vote records supplied; no distribution can be fit")]
    EmptyInput,

    /// The reference success probability lies outside `[0, 1]`.
    #[error("Invalid success probability {0}: must lie in [0, 1]")]
    InvalidProbability(f64),

    /// A group with zero recorded votes (or more yes votes than votes).
    #[error("Group '{name}' has an invalid tally: zero votes or yes-count above size")]
    EmptyGroup { name: String },

    /// A table cell with zero votes per group.
    #[error("Cell {key} has zero votes per group")]
    EmptyCell { key: CellKey },

    /// Fewer than two usable mode ratios, so the supremum is undefined.
    ///
    /// A mode cell with zero expected count has no ratio, so `ratios` can be
    /// smaller than the number of modes.
    #[error("Insufficient modes for supremum estimation: {ratios} usable mode ratios, need at least 2")]
    InsufficientModes { ratios: usize },
}

#[derive(Clone)]
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

    pub fn exit_code(&self) -> u8 {
        self.exit_code
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

impl From<AnalysisError> for AppError {
    fn from(err: AnalysisError) -> Self {
        let exit_code = match err {
            AnalysisError::MissingField { .. }
            | AnalysisError::EmptyInput
            | AnalysisError::InvalidProbability(_)
            | AnalysisError::EmptyGroup { .. }
            | AnalysisError::EmptyCell { .. } => 2,
            AnalysisError::InsufficientModes { .. } => 3,
        };
        AppError::new(exit_code, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insufficient_modes_maps_to_exit_code_3() {
        let err: AppError = AnalysisError::InsufficientModes { ratios: 1 }.into();
        assert_eq!(err.exit_code(), 3);
        assert!(err.to_string().contains("1 usable mode ratios"));
    }

    #[test]
    fn input_errors_map_to_exit_code_2() {
        let err: AppError = AnalysisError::MissingField {
            line: 7,
            field: "Vote".to_string(),
        }
        .into();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("line 7"));
    }
}

use thiserror::Error;

/// Errors raised by the layout engine.
///
/// Every variant is a configuration-class error: the call is aborted and no
/// partial layout is returned. A term that merely does not fit is NOT an error;
/// it is reported in `LayoutResult::unplaced`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("Invalid canvas: width and height must be positive, got {width}x{height}")]
    InvalidCanvas { width: f32, height: f32 },

    #[error("Invalid font size range: min {min} / max {max}")]
    InvertedFontSizeRange { min: f32, max: f32 },

    #[error("Invalid layout config: {0}")]
    InvalidConfig(String),

    #[error("Invalid term at index {index}: {reason}")]
    InvalidTerm { index: usize, reason: String },
}

impl LayoutError {
    /// True for errors the caller must treat as a malformed request (all of them today).
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            LayoutError::InvalidCanvas { .. }
                | LayoutError::InvertedFontSizeRange { .. }
                | LayoutError::InvalidConfig(_)
                | LayoutError::InvalidTerm { .. }
        )
    }
}

/// Application-level error type for the scheduler and the command-line front end.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),

    #[error("Input error: {0}")]
    Input(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Process exit code for the command-line front end. Logging is left to the caller.
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::Layout(_) => 2,
            AppError::Input(_) | AppError::Json(_) => 3,
            AppError::Io(_) => 4,
            AppError::Internal(_) => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_layout_errors_are_configuration_errors() {
        let errors = [
            LayoutError::InvalidCanvas {
                width: 0.0,
                height: 300.0,
            },
            LayoutError::InvertedFontSizeRange {
                min: 40.0,
                max: 10.0,
            },
            LayoutError::InvalidConfig("padding must be >= 0".to_string()),
            LayoutError::InvalidTerm {
                index: 3,
                reason: "empty text".to_string(),
            },
        ];
        assert!(errors.iter().all(LayoutError::is_configuration));
    }

    #[test]
    fn test_layout_error_message_names_dimensions() {
        let err = LayoutError::InvalidCanvas {
            width: 0.0,
            height: 300.0,
        };
        assert!(err.to_string().contains("0x300"));
    }

    #[test]
    fn test_app_error_exit_codes_distinguish_kinds() {
        let layout = AppError::from(LayoutError::InvalidConfig("x".to_string()));
        let input = AppError::Input("no terms".to_string());
        assert_eq!(layout.exit_code(), 2);
        assert_eq!(input.exit_code(), 3);
    }

    #[test]
    fn test_internal_error_exit_code() {
        let err = AppError::from(anyhow::anyhow!("layout worker panicked"));
        assert_eq!(err.exit_code(), 1);
        assert_eq!(err.to_string(), "Internal error: layout worker panicked");
    }
}

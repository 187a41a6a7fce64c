use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Resource error: {0}")]
    ResourceLoad(String),

    #[error("Runtime init error: {0}")]
    RuntimeInit(String),

    #[error("Evaluation error: {0}")]
    Evaluation(String),

    #[error("Selection '{0}' arrived before the runtime was ready")]
    StaleSelection(String),
}

/// Convenience type alias for Results with AppError
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let app_err: AppError = io_err.into();
        assert!(matches!(app_err, AppError::Io(_)));
        assert!(app_err.to_string().contains("file not found"));
    }

    #[test]
    fn test_error_display() {
        let err = AppError::ResourceLoad("themes/missing.json".to_string());
        assert_eq!(err.to_string(), "Resource error: themes/missing.json");

        let err = AppError::Evaluation("unknown region 'Atlantis'".to_string());
        assert_eq!(err.to_string(), "Evaluation error: unknown region 'Atlantis'");

        let err = AppError::StaleSelection("Asia".to_string());
        assert!(err.to_string().contains("Asia"));
        assert!(err.to_string().contains("before the runtime was ready"));
    }
}

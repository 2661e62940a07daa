use thiserror::Error;

/// Error types for the analytics engine
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("business context has not been configured")]
    ContextMissing,
}

/// Result type for analysis operations
pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Errors that can occur across revmate.
///
/// Each variant wraps a specific error domain. Library crates use this type
/// directly; the binary crate converts to `miette` diagnostics at the
/// boundary.
///
/// # Examples
///
/// ```
/// use revmate_core::RevmateError;
///
/// let err = RevmateError::Repository("cannot resolve HEAD".into());
/// assert!(err.to_string().contains("cannot resolve HEAD"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum RevmateError {
    /// Filesystem I/O failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or missing configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// The repository, a revision, or an object could not be read.
    #[error("repository error: {0}")]
    Repository(String),

    /// The backend could not produce a diff for a tree pair.
    #[error("diff error: {0}")]
    Diff(String),

    /// A caller violated a function's contract.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// JSON serialization / deserialization failure.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML deserialization failure.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

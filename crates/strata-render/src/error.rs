/// Errors reported by batcher construction and the process-wide instance.
///
/// Per-frame operations never fail; running out of transient storage is
/// handled by wrapping and splitting instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchError {
    /// The descriptor cannot produce a working batcher.
    InvalidConfig { reason: String },

    /// `global::initialize` was called while an instance already exists.
    AlreadyInitialized,

    /// The process-wide instance was used before `global::initialize`.
    NotInitialized,
}

impl std::fmt::Display for BatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BatchError::InvalidConfig { reason } => {
                write!(f, "Invalid render batcher configuration: {}", reason)
            }
            BatchError::AlreadyInitialized => write!(f, "Render batcher is already initialized"),
            BatchError::NotInitialized => write!(f, "Render batcher is not initialized"),
        }
    }
}

impl std::error::Error for BatchError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = BatchError::InvalidConfig {
            reason: "capacity too small".to_string(),
        };
        assert!(err.to_string().contains("capacity too small"));
        assert_eq!(BatchError::NotInitialized.to_string(), "Render batcher is not initialized");
    }
}

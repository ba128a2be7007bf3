use thiserror::Error;

/// Result alias for `hypercommon`.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by scoring and experiment primitives.
///
/// Hypergraph construction never produces this type: the only runtime failure
/// there is the caller's predicate, whose error is returned as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Input was empty.
    #[error("empty input provided")]
    EmptyInput,

    /// Pair universe is smaller than the pairs actually observed.
    #[error(
        "total_pairs ({total_pairs}) is smaller than the {observed} observed pair keys; \
         wrong universe size?"
    )]
    InconsistentUniverse {
        /// Declared number of unordered pairs.
        total_pairs: usize,
        /// Distinct pairs seen across both partitions.
        observed: usize,
    },

    /// Invalid parameter value.
    #[error("invalid parameter '{name}': {message}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Error message.
        message: String,
    },
}

#[cfg_attr(not(feature = "experiments"), allow(dead_code))]
impl Error {
    pub(crate) fn invalid(name: &'static str, message: impl Into<String>) -> Self {
        Error::InvalidParameter {
            name,
            message: message.into(),
        }
    }
}

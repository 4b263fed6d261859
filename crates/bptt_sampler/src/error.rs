//! src/error.rs
//!
//! Error taxonomy for the BPTT samplers.
//!
//! Construction is the only fallible step. Exhaustion of a sampler is not an
//! error: iterators simply return `None`.

use thiserror::Error;

/// Errors raised while constructing a sampler or validating its configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SamplerError {
    /// A constructor argument is outside its accepted domain.
    #[error("invalid argument `{name}`: {reason}")]
    InvalidArgument { name: &'static str, reason: String },
}

pub type Result<T> = std::result::Result<T, SamplerError>;

impl SamplerError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }
}

/// Returns `InvalidArgument` for `name` unless `value >= 1`.
pub(crate) fn ensure_positive(name: &'static str, value: usize) -> Result<()> {
    if value == 0 {
        return Err(SamplerError::invalid(
            name,
            format!("{name} must be >= 1, but got {name}={value}"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero() {
        let err = ensure_positive("batch_size", 0).unwrap_err();
        assert_eq!(
            err,
            SamplerError::InvalidArgument {
                name: "batch_size",
                reason: "batch_size must be >= 1, but got batch_size=0".to_string(),
            }
        );
        assert!(err.to_string().starts_with("invalid argument `batch_size`"));
    }

    #[test]
    fn accepts_positive() {
        assert!(ensure_positive("bptt_length", 1).is_ok());
    }
}

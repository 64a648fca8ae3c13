//! Error handling for the pricing engine

/// Pricing engine error type.
///
/// The message is surfaced to the caller verbatim; the variant tells the
/// caller whether the request itself was rejected or the computation failed
/// internally, so nobody has to parse message text to branch.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PricingError {
    /// The request failed validation (unknown state code, labor hours out
    /// of range). Never fatal; the caller reports the message as-is.
    #[error("{0}")]
    Validation(String),

    /// Arithmetic failed mid-computation (e.g. decimal overflow). Treated
    /// by callers the same as a validation rejection: no retry, no
    /// partial output.
    #[error("{0}")]
    Computation(String),
}

impl PricingError {
    /// Stable machine-readable kind, used by the error response DTO.
    pub fn kind(&self) -> &'static str {
        match self {
            PricingError::Validation(_) => "validation_error",
            PricingError::Computation(_) => "computation_error",
        }
    }
}

pub type Result<T> = std::result::Result<T, PricingError>;

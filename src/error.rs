use std::fmt;

/// Error type for the numerical core
///
/// All variants are deterministic precondition violations, detected locally
/// and surfaced to the caller immediately. None of the routines downgrade a
/// failure to `NaN` or `Inf`.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Invalid grid bounds, section count or other bad configuration value
    InvalidConfiguration(String),
    /// A zero-spread distribution (geometric standard deviation of one),
    /// which is a Dirac limit and must be special-cased by the caller
    DegenerateDistribution,
    /// A target size outside the representable range of section centers
    OutOfRange { value: f64, min: f64, max: f64 },
    /// A kernel blend that would under- or overflow the floating-point
    /// representation
    NumericOverflow(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidConfiguration(msg) => {
                write!(f, "invalid configuration: {}", msg)
            }
            Error::DegenerateDistribution => {
                write!(
                    f,
                    "degenerate distribution: geometric standard deviation is one"
                )
            }
            Error::OutOfRange { value, min, max } => {
                write!(
                    f,
                    "target size {} lies outside the section center range [{}, {}]",
                    value, min, max
                )
            }
            Error::NumericOverflow(msg) => {
                write!(f, "numeric overflow: {}", msg)
            }
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;

use thiserror::Error;

/// Errors returned by the clustering engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// More clusters were requested than there are values to fill them, or
    /// zero clusters were requested for values that are not all identical.
    #[error("cannot generate {requested} clusters from {available} values")]
    InvalidClusterCount { requested: usize, available: usize },

    /// The input contains a NaN or an infinity.
    #[error("value at index {index} is not finite")]
    NonFiniteValue { index: usize },

    /// A cluster size could not be represented in the value type.
    ///
    /// Never raised for `f32` or `f64`, whose `NumCast` from `usize` always
    /// succeeds. A user-defined `Float` with a narrower range can fail that
    /// cast, and the engine reports it here instead of unwrapping.
    #[error("cluster size {count} is not representable in the value type")]
    NumericConversion { count: usize },
}

pub type Result<T> = std::result::Result<T, Error>;

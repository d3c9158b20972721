//! Quanta Core - Fundamental types
//!
//! This crate provides the types shared by every Quanta crate:
//! - `Fraction`: nearest low-denominator approximation of a decimal
//! - number helpers: singular/whole checks, rounding and formatting
//! - `QuantaError`: structured errors for callers outside the engine

mod number;
mod fraction;
mod error;

pub use number::{
    create_normal, format_number, is_singular, is_whole, round_half_up, EPSILON, WHOLE_TOLERANCE,
};
pub use fraction::Fraction;
pub use error::{codes, QuantaError};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{Fraction, QuantaError, EPSILON};
    pub use crate::error::codes;
}

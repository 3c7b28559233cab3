//! Core infrastructure: error handling, shared types, constants, and the
//! classifier trait seam.

pub mod constants;
pub mod error;
pub mod traits;
pub mod types;

pub use constants::*;
pub use error::{Result, SleepStageError};
pub use traits::BinaryClassifier;
pub use types::*;

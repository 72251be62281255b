//! Typed error definitions for the pack calculator.
//!
//! Only local validation lives here. Transport and server failures belong to
//! `packcalc-client`, which wraps [`ValidationError`] in its own error type.
//! All errors are designed to be:
//!
//! - **Serializable** for handing to a UI layer via serde
//! - **Displayable** as the user-visible message via Display
//! - **Matchable** for error handling logic via enum variants

mod validation;

pub use validation::ValidationError;

/// Standard Result type using ValidationError.
pub type Result<T> = std::result::Result<T, ValidationError>;

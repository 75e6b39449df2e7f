//! Result type alias for SemAn
//!
//! This module provides a convenient Result type alias that uses SemanError
//! as the error type.

use super::errors::SemanError;

/// Result type alias for SemAn operations
///
/// # Examples
///
/// ```
/// use seman::domain::result::Result;
/// use seman::domain::errors::SemanError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(SemanError::Schema("object node without fields".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, SemanError>;

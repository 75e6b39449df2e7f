//! Domain types shared across SemAn.
//!
//! The domain layer provides the error hierarchy ([`SemanError`]) and the
//! [`Result`] alias used by every fallible constructor and loader.
//!
//! # Error Handling
//!
//! ```rust
//! use seman::domain::{Result, SemanError};
//!
//! fn example() -> Result<()> {
//!     let _schema = seman::schema::load_schema("schema.json")?;
//!     Ok(())
//! }
//! # let _ = example();
//! ```

pub mod errors;
pub mod result;

pub use errors::SemanError;
pub use result::Result;

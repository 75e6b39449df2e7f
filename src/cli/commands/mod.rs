//! CLI command implementations
//!
//! Each command returns its process exit code: 0 on success, 2 for
//! configuration or schema errors, 5 for fatal errors.

pub mod anonymize;
pub mod demo;
pub mod init;
pub mod presets;
pub mod validate;

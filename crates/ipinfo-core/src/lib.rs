//! # ipinfo-core - Core Domain Types
//!
//! Foundation crate for the IP information panel. Provides the configuration
//! record, the pipeline result handed to the presentation layer, error
//! handling and logging setup.
//!
//! This crate has **zero internal dependencies** -- it only depends on external
//! crates (serde, serde_json, thiserror, tracing).
//!
//! ## Public API
//!
//! ### Domain Types (`types`)
//! - [`Configuration`] - The validated panel record (enabled, field selection, token)
//! - [`FieldGroup`] - Coarse field category (`isp`, `loc`, `co`)
//! - [`FieldSelection`] - Ordered per-group field keys chosen by the user
//! - [`PipelineResult`] - Tagged outcome of one acquisition run
//! - [`FetchError`] - Rate limit or malformed upstream response
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Custom error enum with `fatal` classification
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//! - [`ResultExt`] - Extension trait for adding error context
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use ipinfo_core::prelude::*;
//! ```

pub mod error;
pub mod logging;
pub mod prelude;
pub mod types;

// Re-export commonly used types at crate root for convenience
pub use error::{Error, Result, ResultExt};
pub use types::{
    resolve_path, Configuration, FetchError, FieldGroup, FieldSelection, GeolocationPayload,
    PipelineResult,
};

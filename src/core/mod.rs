//! Core storage layer
//!
//! - [`error`] - Error types and per-frame resolution failures
//! - [`handle`] - Row and field handles
//! - [`allocator`] - Row handle allocation and liveness tracking
//! - [`value`] - Type tokens and the value codec
//! - [`registry`] - Name ↔ field handle binding
//! - [`oracle`] - The attribute store itself
//! - [`field`] - Typed and untyped field accessors
//! - [`host`] - Cursor hosts
//! - [`schema`] - Schema declaration and generic row management
//! - [`config`] - Configuration and builder
//! - [`shared`] - Thread-safe wrapper

pub mod allocator;
pub mod config;
pub mod error;
pub mod field;
pub mod handle;
pub mod host;
pub mod oracle;
pub mod registry;
pub mod schema;
pub mod shared;
pub mod value;

pub use config::{DoubleDeletePolicy, OracleBuilder, OracleConfig, MAX_ROW_CAPACITY};
pub use error::{ErrorCategory, OracleError, ResolutionFailure, ResolutionReason, Result};
pub use field::{BoundField, FieldOps, TrackField};
pub use handle::{FieldHandle, RowHandle};
pub use host::Host;
pub use oracle::{OracleCore, OracleStats, RowView, RowViewMut};
pub use registry::{FieldDescriptor, FieldRegistry, FieldRole};
pub use schema::{Container, FieldContainer, MissingField, Schema, SchemaBuilder, SchemaCore};
pub use shared::SharedOracle;
pub use value::{FieldValue, TypeToken};

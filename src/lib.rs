//! # Track Oracle - Generic Attribute Store for Tracks and Frames
//!
//! `track-oracle` stores arbitrary typed attributes on rows of a single shared
//! row/column space. Tracks and frames are both rows; which fields they carry
//! is decided by whoever declares a schema, not by the store:
//!
//! - **Sparse columns**: a row only pays for the fields actually set on it
//! - **Shared field identity**: the same `(name, type)` always maps to the same column
//! - **Cursor accessors**: schemas move one cursor, every field follows it
//! - **After-the-fact composition**: new schemas attach fields to rows created by others
//!
//! ## Quick Start
//!
//! ```rust
//! use track_oracle::{OracleCore, Result, Schema, SchemaBuilder, SchemaCore, TrackField};
//!
//! struct Detections {
//!     core: SchemaCore,
//!     label: TrackField<String>,
//!     score: TrackField<f64>,
//! }
//!
//! impl Detections {
//!     fn new(oracle: &mut OracleCore) -> Result<Self> {
//!         let mut b = SchemaBuilder::new(oracle, "detections");
//!         let label = b.track_field("label")?;
//!         let score = b.frame_field("score")?;
//!         Ok(Detections { core: b.finish(), label, score })
//!     }
//! }
//!
//! impl Schema for Detections {
//!     fn core(&self) -> &SchemaCore {
//!         &self.core
//!     }
//! }
//!
//! # fn main() -> Result<()> {
//! let mut oracle = OracleCore::new();
//! let det = Detections::new(&mut oracle)?;
//!
//! let track = det.create_track(&mut oracle);
//! det.label.set(&mut oracle, "vehicle".to_string())?;
//!
//! det.create_frame(&mut oracle, track)?;
//! det.score.set(&mut oracle, 0.93)?;
//!
//! assert_eq!(det.label.get_at(&oracle, track)?.as_deref(), Some("vehicle"));
//! assert!(det.is_complete(&oracle, track)?);
//! # Ok(())
//! # }
//! ```
//!
//! ## Configuration
//!
//! ```rust
//! use track_oracle::{DoubleDeletePolicy, OracleBuilder, OracleError};
//!
//! let mut oracle = OracleBuilder::new()
//!     .row_capacity(4096)
//!     .double_delete(DoubleDeletePolicy::Error)
//!     .build()
//!     .unwrap();
//!
//! let row = oracle.create_row();
//! oracle.delete_row(row).unwrap();
//! assert!(matches!(oracle.delete_row(row), Err(OracleError::DoubleDelete(_))));
//! ```

pub mod core;
pub mod schemas;

pub use crate::core::{
    BoundField, Container, DoubleDeletePolicy, ErrorCategory, FieldContainer, FieldDescriptor,
    FieldHandle, FieldOps, FieldRegistry, FieldRole, FieldValue, Host, MissingField,
    OracleBuilder, OracleConfig, OracleCore, OracleError, OracleStats, ResolutionFailure,
    ResolutionReason, Result, RowHandle, RowView, RowViewMut, Schema, SchemaBuilder, SchemaCore,
    SharedOracle, TrackField, TypeToken,
};

pub use crate::schemas::{
    ApixSchema, AttachReport, BoundingBox, FileFormat, FileFormatSchema, GeoCoord, GeoFallback,
    GeoSource, Kw18Schema, ScorableGeoSchema,
};

//! Bundled schemas
//!
//! Small, concrete schemas for the formats most track sets come from, and
//! the geocoordinate schema that composes on top of them.

pub mod apix;
pub mod file_format;
pub mod kw18;
pub mod scorable_geo;
pub mod types;

pub use apix::ApixSchema;
pub use file_format::{FileFormat, FileFormatSchema};
pub use kw18::Kw18Schema;
pub use scorable_geo::{AttachReport, GeoFallback, GeoSource, ScorableGeoSchema};
pub use types::{BoundingBox, GeoCoord};

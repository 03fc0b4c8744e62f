//! Schema composition
//!
//! A schema is a named bundle of track-level and frame-level fields. It owns
//! no storage: building one registers its fields with the oracle (reusing any
//! handle another schema already created for the same name and type) and
//! binds every accessor to the schema's [`Host`].
//!
//! Concrete schemas hold their typed [`TrackField`]s as struct members and
//! implement [`Schema`] by exposing the [`SchemaCore`] produced by
//! [`SchemaBuilder`]. Everything else (cursor control, row creation,
//! completeness checks, copy/clone/remove) comes from the trait's provided
//! methods, which walk the untyped [`FieldContainer`]s.
//!
//! ```
//! use track_oracle::{OracleCore, Schema, SchemaBuilder, SchemaCore, TrackField, Result};
//!
//! struct Speeds {
//!     core: SchemaCore,
//!     label: TrackField<String>,
//!     speed: TrackField<f64>,
//! }
//!
//! impl Speeds {
//!     fn new(oracle: &mut OracleCore) -> Result<Self> {
//!         let mut b = SchemaBuilder::new(oracle, "speeds");
//!         let label = b.track_field("label")?;
//!         let speed = b.frame_field("speed")?;
//!         Ok(Speeds { core: b.finish(), label, speed })
//!     }
//! }
//!
//! impl Schema for Speeds {
//!     fn core(&self) -> &SchemaCore {
//!         &self.core
//!     }
//! }
//!
//! let mut oracle = OracleCore::new();
//! let s = Speeds::new(&mut oracle)?;
//! let track = s.create_track(&mut oracle);
//! s.label.set(&mut oracle, "car".to_string())?;
//! s.create_frame(&mut oracle, track)?;
//! s.speed.set(&mut oracle, 13.0)?;
//! assert!(s.is_complete(&oracle, track)?);
//! # Ok::<(), track_oracle::OracleError>(())
//! ```

use crate::core::error::Result;
use crate::core::field::{FieldOps, TrackField};
use crate::core::handle::{FieldHandle, RowHandle};
use crate::core::host::Host;
use crate::core::oracle::OracleCore;
use crate::core::registry::{FieldDescriptor, FieldRole};
use crate::core::value::FieldValue;
use std::fmt;
use tracing::{debug, info};

/// Which container a field belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Container {
    Track,
    Frame,
}

impl fmt::Display for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Container::Track => f.write_str("track"),
            Container::Frame => f.write_str("frame"),
        }
    }
}

/// Ordered, type-erased list of the fields a schema declared in one container
#[derive(Debug, Default)]
pub struct FieldContainer {
    fields: Vec<Box<dyn FieldOps>>,
}

impl FieldContainer {
    fn push(&mut self, field: Box<dyn FieldOps>) {
        if !self.contains(field.handle()) {
            self.fields.push(field);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn FieldOps> {
        self.fields.iter().map(|f| f.as_ref())
    }

    pub fn handles(&self) -> Vec<FieldHandle> {
        self.fields.iter().map(|f| f.handle()).collect()
    }

    pub fn contains(&self, handle: FieldHandle) -> bool {
        self.fields.iter().any(|f| f.handle() == handle)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Copy every field's value from `src` to `dst`; absent values are skipped
    pub fn copy_all(&self, oracle: &mut OracleCore, src: RowHandle, dst: RowHandle) -> Result<()> {
        for field in &self.fields {
            field.copy_value(oracle, src, dst)?;
        }
        Ok(())
    }

    /// Remove every field's value from `row`; returns how many were present
    pub fn remove_all(&self, oracle: &mut OracleCore, row: RowHandle) -> Result<usize> {
        let mut removed = 0;
        for field in &self.fields {
            if field.remove_at_row(oracle, row)? {
                removed += 1;
            }
        }
        Ok(removed)
    }

    /// Fields with no value at `row`
    pub fn missing_at(&self, oracle: &OracleCore, row: RowHandle) -> Result<Vec<&dyn FieldOps>> {
        let mut missing = Vec::new();
        for field in &self.fields {
            if !field.exists_at(oracle, row)? {
                missing.push(field.as_ref());
            }
        }
        Ok(missing)
    }
}

impl Clone for FieldContainer {
    fn clone(&self) -> Self {
        FieldContainer {
            fields: self.fields.iter().map(|f| f.clone_unbound()).collect(),
        }
    }
}

/// A declared field with no value on some row of a track
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingField {
    pub container: Container,
    pub field: FieldHandle,
    pub name: String,
    pub row: RowHandle,
}

/// State shared by every schema: its name, host, and field containers
#[derive(Debug)]
pub struct SchemaCore {
    name: String,
    host: Host,
    track: FieldContainer,
    frame: FieldContainer,
}

impl SchemaCore {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn host(&self) -> &Host {
        &self.host
    }

    pub fn track_fields(&self) -> &FieldContainer {
        &self.track
    }

    pub fn frame_fields(&self) -> &FieldContainer {
        &self.frame
    }

    /// Same fields, fresh host
    ///
    /// Typed accessors held by the concrete schema must be rebound to the
    /// returned core's host with [`TrackField::rebound`].
    pub fn duplicate(&self) -> SchemaCore {
        SchemaCore {
            name: self.name.clone(),
            host: Host::new(),
            track: self.track.clone(),
            frame: self.frame.clone(),
        }
    }
}

/// Declares a schema's fields against an oracle
pub struct SchemaBuilder<'o> {
    oracle: &'o mut OracleCore,
    core: SchemaCore,
}

impl<'o> SchemaBuilder<'o> {
    pub fn new(oracle: &'o mut OracleCore, name: impl Into<String>) -> Self {
        SchemaBuilder {
            oracle,
            core: SchemaCore {
                name: name.into(),
                host: Host::new(),
                track: FieldContainer::default(),
                frame: FieldContainer::default(),
            },
        }
    }

    /// Declare a field in `container`, returning an accessor bound to the schema's host
    pub fn add_field<T: FieldValue>(
        &mut self,
        container: Container,
        name: &str,
    ) -> Result<TrackField<T>> {
        self.add_described(container, FieldDescriptor::of::<T>(name))
    }

    pub fn add_described<T: FieldValue>(
        &mut self,
        container: Container,
        descriptor: FieldDescriptor,
    ) -> Result<TrackField<T>> {
        let mut field = TrackField::<T>::register_described(self.oracle, descriptor)?;
        field.bind(&self.core.host);
        debug!(
            "Schema '{}' declared {} field '{}' ({})",
            self.core.name,
            container,
            field.name(),
            field.handle()
        );
        let erased = Box::new(field.clone());
        match container {
            Container::Track => self.core.track.push(erased),
            Container::Frame => self.core.frame.push(erased),
        }
        Ok(field)
    }

    pub fn track_field<T: FieldValue>(&mut self, name: &str) -> Result<TrackField<T>> {
        self.add_field(Container::Track, name)
    }

    pub fn frame_field<T: FieldValue>(&mut self, name: &str) -> Result<TrackField<T>> {
        self.add_field(Container::Frame, name)
    }

    /// Declare a field with an agreed cross-format meaning
    pub fn well_known<T: FieldValue>(
        &mut self,
        container: Container,
        name: &str,
        description: &str,
    ) -> Result<TrackField<T>> {
        self.add_described(
            container,
            FieldDescriptor::of::<T>(name)
                .with_description(description)
                .with_role(FieldRole::WellKnown),
        )
    }

    pub fn finish(self) -> SchemaCore {
        info!(
            "Schema '{}' ready ({} track, {} frame field(s))",
            self.core.name,
            self.core.track.len(),
            self.core.frame.len()
        );
        self.core
    }
}

/// Behaviour shared by every schema
pub trait Schema {
    fn core(&self) -> &SchemaCore;

    fn schema_name(&self) -> &str {
        self.core().name()
    }

    fn host(&self) -> &Host {
        self.core().host()
    }

    /// Point every field of this schema at `row`
    fn set_cursor(&self, row: RowHandle) {
        self.core().host().set_cursor(row);
    }

    fn get_cursor(&self) -> Option<RowHandle> {
        self.core().host().get_cursor()
    }

    fn track_fields(&self) -> &FieldContainer {
        self.core().track_fields()
    }

    fn frame_fields(&self) -> &FieldContainer {
        self.core().frame_fields()
    }

    /// Whether this schema declares `field` in either container
    fn contains_field(&self, field: FieldHandle) -> bool {
        self.track_fields().contains(field) || self.frame_fields().contains(field)
    }

    /// Create a track row and move the cursor onto it
    fn create_track(&self, oracle: &mut OracleCore) -> RowHandle {
        let track = oracle.create_row();
        self.set_cursor(track);
        track
    }

    /// Create a frame row owned by `track` and move the cursor onto it
    fn create_frame(&self, oracle: &mut OracleCore, track: RowHandle) -> Result<RowHandle> {
        oracle.check_row(track)?;
        let frame = oracle.create_row();
        if let Err(e) = oracle.add_frame(track, frame) {
            oracle.delete_row(frame)?;
            return Err(e);
        }
        self.set_cursor(frame);
        Ok(frame)
    }

    /// Declared fields absent on `track` or on any of its frames
    fn missing_fields(&self, oracle: &OracleCore, track: RowHandle) -> Result<Vec<MissingField>> {
        let mut missing = Vec::new();
        for field in self.track_fields().missing_at(oracle, track)? {
            missing.push(MissingField {
                container: Container::Track,
                field: field.handle(),
                name: field.name().to_string(),
                row: track,
            });
        }
        for &frame in oracle.frames(track)? {
            for field in self.frame_fields().missing_at(oracle, frame)? {
                missing.push(MissingField {
                    container: Container::Frame,
                    field: field.handle(),
                    name: field.name().to_string(),
                    row: frame,
                });
            }
        }
        Ok(missing)
    }

    fn is_complete(&self, oracle: &OracleCore, track: RowHandle) -> Result<bool> {
        Ok(self.missing_fields(oracle, track)?.is_empty())
    }

    /// Copy this schema's track-level values from `src` to `dst`
    fn copy_track_fields(&self, oracle: &mut OracleCore, src: RowHandle, dst: RowHandle) -> Result<()> {
        self.track_fields().copy_all(oracle, src, dst)
    }

    /// Copy this schema's frame-level values from `src` to `dst`
    fn copy_frame_fields(&self, oracle: &mut OracleCore, src: RowHandle, dst: RowHandle) -> Result<()> {
        self.frame_fields().copy_all(oracle, src, dst)
    }

    /// New track carrying this schema's values from `src`, with cloned frames
    fn clone_track(&self, oracle: &mut OracleCore, src: RowHandle) -> Result<RowHandle> {
        let frames = oracle.frames(src)?.to_vec();
        let dst = oracle.create_row();
        self.copy_track_fields(oracle, src, dst)?;
        for frame in frames {
            let copy = oracle.create_row();
            self.copy_frame_fields(oracle, frame, copy)?;
            oracle.add_frame(dst, copy)?;
        }
        debug!("Cloned track {} to {} via schema '{}'", src, dst, self.schema_name());
        Ok(dst)
    }

    /// Delete `track` and all its frames
    ///
    /// Rows are deleted outright, so values from other schemas go with them.
    fn remove_track(&self, oracle: &mut OracleCore, track: RowHandle) -> Result<()> {
        let frames = oracle.frames(track)?.to_vec();
        for frame in &frames {
            oracle.delete_row(*frame)?;
        }
        oracle.delete_row(track)?;
        debug!("Removed track {} and {} frame(s)", track, frames.len());
        Ok(())
    }

    /// Strip this schema's values from `track` and its frames, keeping the rows
    fn strip_track(&self, oracle: &mut OracleCore, track: RowHandle) -> Result<usize> {
        let mut removed = self.track_fields().remove_all(oracle, track)?;
        let frames = oracle.frames(track)?.to_vec();
        for frame in frames {
            removed += self.frame_fields().remove_all(oracle, frame)?;
        }
        Ok(removed)
    }
}

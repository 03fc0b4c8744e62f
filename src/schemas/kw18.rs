//! KW18 track schema
//!
//! Track-level external id plus the per-frame columns a KW18 reader fills:
//! frame number, timestamp, image box, and world coordinates.

use crate::core::{
    Container, OracleCore, Result, RowHandle, Schema, SchemaBuilder, SchemaCore, TrackField,
};
use crate::schemas::types::BoundingBox;

pub const EXTERNAL_ID: &str = "external_id";
pub const FRAME_NUMBER: &str = "frame_number";
pub const TIMESTAMP_USECS: &str = "timestamp_usecs";
pub const BOUNDING_BOX: &str = "bounding_box";
pub const WORLD_X: &str = "world_x";
pub const WORLD_Y: &str = "world_y";

pub struct Kw18Schema {
    core: SchemaCore,
    pub external_id: TrackField<u64>,
    pub frame_number: TrackField<u64>,
    pub timestamp_usecs: TrackField<u64>,
    pub bounding_box: TrackField<BoundingBox>,
    pub world_x: TrackField<f64>,
    pub world_y: TrackField<f64>,
}

impl Kw18Schema {
    pub fn new(oracle: &mut OracleCore) -> Result<Self> {
        let mut b = SchemaBuilder::new(oracle, "kw18");
        let external_id =
            b.well_known(Container::Track, EXTERNAL_ID, "track id assigned by the source")?;
        let frame_number =
            b.well_known(Container::Frame, FRAME_NUMBER, "frame index in the source video")?;
        let timestamp_usecs = b.well_known(
            Container::Frame,
            TIMESTAMP_USECS,
            "frame time in microseconds since the epoch",
        )?;
        let bounding_box =
            b.well_known(Container::Frame, BOUNDING_BOX, "image-space box in pixels")?;
        let world_x = b.frame_field(WORLD_X)?;
        let world_y = b.frame_field(WORLD_Y)?;
        Ok(Kw18Schema {
            core: b.finish(),
            external_id,
            frame_number,
            timestamp_usecs,
            bounding_box,
            world_x,
            world_y,
        })
    }

    /// Track whose external id is `id`, if any
    pub fn find_track(&self, oracle: &OracleCore, id: u64) -> Result<Option<RowHandle>> {
        self.external_id.lookup(oracle, &id)
    }

    /// Frame of `track` with the given frame number, if any
    pub fn find_frame(
        &self,
        oracle: &OracleCore,
        track: RowHandle,
        frame_number: u64,
    ) -> Result<Option<RowHandle>> {
        for &frame in oracle.frames(track)? {
            if self.frame_number.get_at(oracle, frame)? == Some(frame_number) {
                return Ok(Some(frame));
            }
        }
        Ok(None)
    }
}

impl Clone for Kw18Schema {
    fn clone(&self) -> Self {
        let core = self.core.duplicate();
        let host = core.host().clone();
        Kw18Schema {
            external_id: self.external_id.rebound(&host),
            frame_number: self.frame_number.rebound(&host),
            timestamp_usecs: self.timestamp_usecs.rebound(&host),
            bounding_box: self.bounding_box.rebound(&host),
            world_x: self.world_x.rebound(&host),
            world_y: self.world_y.rebound(&host),
            core,
        }
    }
}

impl Schema for Kw18Schema {
    fn core(&self) -> &SchemaCore {
        &self.core
    }
}

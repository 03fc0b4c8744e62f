//! APIX schema: per-frame platform latitude/longitude

use crate::core::{Container, OracleCore, Result, Schema, SchemaBuilder, SchemaCore, TrackField};

pub const LATITUDE: &str = "apix_latitude";
pub const LONGITUDE: &str = "apix_longitude";

pub struct ApixSchema {
    core: SchemaCore,
    pub latitude: TrackField<f64>,
    pub longitude: TrackField<f64>,
}

impl ApixSchema {
    pub fn new(oracle: &mut OracleCore) -> Result<Self> {
        let mut b = SchemaBuilder::new(oracle, "apix");
        let latitude = b.well_known(Container::Frame, LATITUDE, "WGS84 latitude, degrees")?;
        let longitude = b.well_known(Container::Frame, LONGITUDE, "WGS84 longitude, degrees")?;
        Ok(ApixSchema {
            core: b.finish(),
            latitude,
            longitude,
        })
    }
}

impl Schema for ApixSchema {
    fn core(&self) -> &SchemaCore {
        &self.core
    }
}

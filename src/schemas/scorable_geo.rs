//! Geocoordinates attached after the fact to tracks from any reader
//!
//! [`ScorableGeoSchema::set_from_tracklist`] walks a track set, picks a
//! coordinate source per track from its recorded [`FileFormat`], and writes
//! a [`GeoCoord`] onto every frame. Frames that cannot be resolved are
//! collected into the [`AttachReport`] instead of stopping the walk.

use crate::core::{
    Container, OracleCore, OracleError, ResolutionFailure, ResolutionReason, Result, RowHandle,
    Schema, SchemaBuilder, SchemaCore, TrackField,
};
use crate::schemas::apix;
use crate::schemas::file_format::{FileFormat, SOURCE_FORMAT};
use crate::schemas::kw18;
use crate::schemas::types::GeoCoord;
use tracing::{error, info, warn};

pub const GEO_COORD: &str = "geo_coord";

/// User-named fields consulted for tracks whose format has no coordinate fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeoFallback {
    pub lon_field: String,
    pub lat_field: String,
}

impl GeoFallback {
    pub fn new(lon_field: impl Into<String>, lat_field: impl Into<String>) -> Self {
        GeoFallback {
            lon_field: lon_field.into(),
            lat_field: lat_field.into(),
        }
    }
}

/// Where a track's frame coordinates come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeoSource {
    /// KW18 world coordinates (`world_x` = longitude, `world_y` = latitude)
    Kw18,
    /// APIX platform latitude/longitude
    Apix,
    /// Arbitrary user-named `f64` fields
    Generic { lon: String, lat: String },
}

impl GeoSource {
    pub fn for_format(format: FileFormat, fallback: &GeoFallback) -> Self {
        match format {
            FileFormat::Kw18 => GeoSource::Kw18,
            FileFormat::Apix => GeoSource::Apix,
            _ => GeoSource::Generic {
                lon: fallback.lon_field.clone(),
                lat: fallback.lat_field.clone(),
            },
        }
    }

    /// Longitude and latitude field names
    fn field_pair(&self) -> (&str, &str) {
        match self {
            GeoSource::Kw18 => (kw18::WORLD_X, kw18::WORLD_Y),
            GeoSource::Apix => (apix::LONGITUDE, apix::LATITUDE),
            GeoSource::Generic { lon, lat } => (lon.as_str(), lat.as_str()),
        }
    }

    /// Field names consulted, longitude first
    pub fn field_names(&self) -> Vec<String> {
        let (lon, lat) = self.field_pair();
        vec![lon.to_string(), lat.to_string()]
    }
}

/// Outcome of one [`ScorableGeoSchema::set_from_tracklist`] call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttachReport {
    pub tracks: usize,
    pub frames: usize,
    pub attached: usize,
    /// At least one frame was resolved through the [`GeoFallback`] fields
    pub used_fallback: bool,
    pub failures: Vec<ResolutionFailure>,
}

impl AttachReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn failures_for(&self, track: RowHandle) -> impl Iterator<Item = &ResolutionFailure> {
        self.failures.iter().filter(move |f| f.track == track)
    }

    /// `Err(OracleError::Unresolved)` if any frame failed
    pub fn into_result(self) -> Result<Self> {
        match self.failures.first() {
            None => Ok(self),
            Some(first) => Err(OracleError::Unresolved {
                count: self.failures.len(),
                first: Box::new(first.clone()),
            }),
        }
    }
}

type SourceFields = std::result::Result<(TrackField<f64>, TrackField<f64>), ResolutionReason>;

/// Coordinate fields per source, looked up on first use within one attach call
#[derive(Default)]
struct SourceCache {
    kw18: Option<SourceFields>,
    apix: Option<SourceFields>,
    generic: Option<SourceFields>,
}

impl SourceCache {
    fn fields(&mut self, oracle: &OracleCore, source: &GeoSource) -> Result<SourceFields> {
        let slot = match source {
            GeoSource::Kw18 => &mut self.kw18,
            GeoSource::Apix => &mut self.apix,
            GeoSource::Generic { .. } => &mut self.generic,
        };
        let resolved = match slot.take() {
            Some(resolved) => resolved,
            None => {
                let resolved = resolve_source(oracle, source)?;
                match (&resolved, source) {
                    (Ok(_), GeoSource::Generic { lon, lat }) => info!(
                        "Using field '{}' for longitude and '{}' for latitude",
                        lon, lat
                    ),
                    (Ok(_), _) => {}
                    (Err(reason), _) => warn!("Geo source fields unusable: {}", reason),
                }
                resolved
            }
        };
        *slot = Some(resolved.clone());
        Ok(resolved)
    }
}

pub struct ScorableGeoSchema {
    core: SchemaCore,
    pub geo_coord: TrackField<GeoCoord>,
}

impl ScorableGeoSchema {
    pub fn new(oracle: &mut OracleCore) -> Result<Self> {
        let mut b = SchemaBuilder::new(oracle, "scorable_geo");
        let geo_coord = b.well_known(
            Container::Frame,
            GEO_COORD,
            "frame geocoordinate used for scoring",
        )?;
        Ok(ScorableGeoSchema {
            core: b.finish(),
            geo_coord,
        })
    }

    /// Attach a [`GeoCoord`] to every frame of every track in `tracks`
    ///
    /// Only fields already in the oracle are read; nothing is registered.
    /// Errors only for stale track handles or storage failures; frames with
    /// no usable source are reported in [`AttachReport::failures`].
    pub fn set_from_tracklist(
        &self,
        oracle: &mut OracleCore,
        tracks: &[RowHandle],
        fallback: &GeoFallback,
    ) -> Result<AttachReport> {
        let validate = oracle.config().validate_coordinates;
        let format_field = match TrackField::<FileFormat>::existing(oracle, SOURCE_FORMAT) {
            Ok(field) => field,
            Err(OracleError::TypeConflict { existing, .. }) => {
                warn!(
                    "Field '{}' holds {} values; treating every track as {}",
                    SOURCE_FORMAT,
                    existing,
                    FileFormat::Unknown
                );
                None
            }
            Err(e) => return Err(e),
        };

        let mut sources = SourceCache::default();
        let mut report = AttachReport::default();

        for &track in tracks {
            oracle.check_row(track)?;
            let format = match &format_field {
                Some(field) => field.get_at(oracle, track)?.unwrap_or_default(),
                None => FileFormat::Unknown,
            };
            let source = GeoSource::for_format(format, fallback);
            let fields = sources.fields(oracle, &source)?;
            let frames = oracle.frames(track)?.to_vec();
            report.tracks += 1;

            for (frame_index, &frame) in frames.iter().enumerate() {
                report.frames += 1;
                let values = match &fields {
                    Ok((lon, lat)) => Ok((lon.get_at(oracle, frame)?, lat.get_at(oracle, frame)?)),
                    Err(reason) => Err(reason.clone()),
                };

                let outcome = values.and_then(|pair| match pair {
                    (Some(longitude), Some(latitude)) => {
                        let coord = GeoCoord::new(latitude, longitude);
                        if validate && !coord.is_valid() {
                            Err(ResolutionReason::OutOfRange {
                                latitude,
                                longitude,
                            })
                        } else {
                            Ok(coord)
                        }
                    }
                    _ => Err(ResolutionReason::NoSourceField {
                        tried: source.field_names(),
                    }),
                });

                match outcome {
                    Ok(coord) => {
                        self.geo_coord.set_at(oracle, frame, coord)?;
                        report.attached += 1;
                        if matches!(source, GeoSource::Generic { .. }) {
                            report.used_fallback = true;
                        }
                    }
                    Err(reason) => {
                        let failure = ResolutionFailure {
                            track,
                            frame,
                            frame_index,
                            format: format.to_string(),
                            reason,
                        };
                        error!("Geo attach failed: {}", failure);
                        report.failures.push(failure);
                    }
                }
            }
        }

        info!(
            "Geo attach: {} track(s), {}/{} frame(s) attached, {} failure(s)",
            report.tracks,
            report.attached,
            report.frames,
            report.failures.len()
        );
        Ok(report)
    }
}

/// Look up a source's longitude/latitude fields by name without registering them
fn resolve_source(oracle: &OracleCore, source: &GeoSource) -> Result<SourceFields> {
    let lookup = |name: &str| -> Result<std::result::Result<TrackField<f64>, ResolutionReason>> {
        match TrackField::<f64>::existing(oracle, name) {
            Ok(Some(field)) => Ok(Ok(field)),
            Ok(None) => Ok(Err(ResolutionReason::NoSourceField {
                tried: source.field_names(),
            })),
            Err(OracleError::TypeConflict { existing, .. }) => {
                Ok(Err(ResolutionReason::SourceTypeConflict {
                    name: name.to_string(),
                    found: existing,
                }))
            }
            Err(e) => Err(e),
        }
    };
    let (lon_name, lat_name) = source.field_pair();
    let lon = match lookup(lon_name)? {
        Ok(field) => field,
        Err(reason) => return Ok(Err(reason)),
    };
    let lat = match lookup(lat_name)? {
        Ok(field) => field,
        Err(reason) => return Ok(Err(reason)),
    };
    Ok(Ok((lon, lat)))
}

impl Clone for ScorableGeoSchema {
    fn clone(&self) -> Self {
        let core = self.core.duplicate();
        let geo_coord = self.geo_coord.rebound(core.host());
        ScorableGeoSchema { core, geo_coord }
    }
}

impl Schema for ScorableGeoSchema {
    fn core(&self) -> &SchemaCore {
        &self.core
    }
}

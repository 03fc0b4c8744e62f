//! Source-format bookkeeping for tracks
//!
//! Readers tag every track they create with the format it came from, so
//! later code can pick format-specific fields without guessing.

use crate::core::{
    Container, FieldDescriptor, FieldRole, OracleCore, Result, RowHandle, Schema, SchemaBuilder,
    SchemaCore, TrackField,
};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const SOURCE_FORMAT: &str = "source_format";
pub const SOURCE_FILE: &str = "source_file";

/// File formats a track can originate from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FileFormat {
    #[default]
    Unknown,
    Kw18,
    Apix,
    Kpf,
    Vatic,
    MitreXml,
    CommsXml,
    Csv,
}

impl FileFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileFormat::Unknown => "unknown",
            FileFormat::Kw18 => "kw18",
            FileFormat::Apix => "apix",
            FileFormat::Kpf => "kpf",
            FileFormat::Vatic => "vatic",
            FileFormat::MitreXml => "mitre_xml",
            FileFormat::CommsXml => "comms_xml",
            FileFormat::Csv => "csv",
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Track-level source format and file name
pub struct FileFormatSchema {
    core: SchemaCore,
    pub source_format: TrackField<FileFormat>,
    pub source_file: TrackField<String>,
}

impl FileFormatSchema {
    pub fn new(oracle: &mut OracleCore) -> Result<Self> {
        let mut b = SchemaBuilder::new(oracle, "file_format");
        let source_format = b.add_described(
            Container::Track,
            FieldDescriptor::of::<FileFormat>(SOURCE_FORMAT)
                .with_description("format the track was read from")
                .with_role(FieldRole::System),
        )?;
        let source_file = b.add_described(
            Container::Track,
            FieldDescriptor::of::<String>(SOURCE_FILE)
                .with_description("path of the file the track was read from")
                .with_role(FieldRole::System),
        )?;
        Ok(FileFormatSchema {
            core: b.finish(),
            source_format,
            source_file,
        })
    }

    /// Format recorded for `track`, [`FileFormat::Unknown`] if none
    pub fn format_of(&self, oracle: &OracleCore, track: RowHandle) -> Result<FileFormat> {
        Ok(self.source_format.get_at(oracle, track)?.unwrap_or_default())
    }

    pub fn record_source(
        &self,
        oracle: &mut OracleCore,
        track: RowHandle,
        format: FileFormat,
        file: Option<&str>,
    ) -> Result<()> {
        self.source_format.set_at(oracle, track, format)?;
        if let Some(file) = file {
            self.source_file.set_at(oracle, track, file.to_string())?;
        }
        Ok(())
    }
}

impl Schema for FileFormatSchema {
    fn core(&self) -> &SchemaCore {
        &self.core
    }
}

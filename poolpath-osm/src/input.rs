//! Loading street data from the supported input formats.

use crate::error::ImportError;
use crate::osm::*;
use clap::ValueEnum;
use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::info;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum InputFormat {
  /// Cached `{"wayNodes": [...], "ways": [...]}` JSON, or an array of those.
  Elements,
  /// Raw Overpass API JSON response.
  Overpass,
  /// OpenStreetMap protocol buffer extract.
  Pbf,
}

impl InputFormat {
  /// `*.pbf` is a PBF extract, `*.overpass.json` an Overpass response and any
  /// other `*.json` cached element data.
  pub fn from_path(path: &Path) -> Option<InputFormat> {
    let name = path.file_name()?.to_str()?.to_ascii_lowercase();
    if name.ends_with(".pbf") {
      Some(InputFormat::Pbf)
    } else if name.ends_with(".overpass.json") {
      Some(InputFormat::Overpass)
    } else if name.ends_with(".json") {
      Some(InputFormat::Elements)
    } else {
      None
    }
  }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ElementsFile {
  One(ElementData),
  Many(Vec<ElementData>),
}

pub fn parse_elements<R: Read>(reader: R) -> Result<ElementData, ImportError> {
  Ok(match serde_json::from_reader(reader)? {
    ElementsFile::One(data) => data,
    ElementsFile::Many(parts) => parts.into_iter().collect(),
  })
}

pub fn parse_overpass<R: Read>(reader: R) -> Result<ElementData, ImportError> {
  let response: OverpassResponse = serde_json::from_reader(reader)?;
  Ok(response.into_element_data())
}

/// Reads street data, inferring the format from the file name when `format` is `None`.
pub fn read_input(path: &Path, format: Option<InputFormat>) -> Result<ElementData, ImportError> {
  let format = match format.or_else(|| InputFormat::from_path(path)) {
    Some(format) => format,
    None => return Err(ImportError::UnknownFormat(path.to_path_buf())),
  };

  let data = match format {
    InputFormat::Pbf => read_pbf_file(path)?,
    InputFormat::Elements | InputFormat::Overpass => {
      let file = File::open(path).map_err(|source| ImportError::Io {
        path: path.to_path_buf(),
        source,
      })?;
      let reader = BufReader::new(file);
      if format == InputFormat::Elements {
        parse_elements(reader)?
      } else {
        parse_overpass(reader)?
      }
    }
  };

  info!(
    path = %path.display(),
    ?format,
    nodes = data.way_nodes.len(),
    ways = data.ways.len(),
    "read street data"
  );
  Ok(data)
}

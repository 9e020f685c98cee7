use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use log::{debug, info};
use serde_json::Value;

use crate::coordinates::CoordinateTree;
use crate::error::ConvertError;
use crate::transform::Transform;

/// Counters reported after a document has been converted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionSummary {
    pub features: usize,
    pub positions: usize,
    /// Features whose `geometry` is `null`.
    pub unlocated: usize,
}

/// Reads and parses a GeoJSON document. A document that parses to an empty or
/// falsy value (`null`, `false`, `0`, `""`, `[]`, `{}`) is rejected.
pub fn read_document(path: &Path) -> Result<Value, ConvertError> {
    info!("Loading file: {}", path.display());
    let text = fs::read_to_string(path).map_err(|source| ConvertError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let document: Value = serde_json::from_str(&text).map_err(|source| ConvertError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    if is_falsy(&document) {
        return Err(ConvertError::EmptyDocument {
            path: path.to_path_buf(),
        });
    }
    Ok(document)
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty() || s == "0",
        Value::Array(items) => items.is_empty(),
        Value::Object(members) => members.is_empty(),
    }
}

/// Returns a copy of `document` in which every feature's
/// `geometry.coordinates` has been run through `transform`. Everything else is
/// carried over untouched.
pub fn convert_document(
    document: &Value,
    transform: &Transform,
) -> Result<(Value, ConversionSummary), ConvertError> {
    let mut converted = document.clone();
    let features = converted
        .get_mut("features")
        .and_then(Value::as_array_mut)
        .ok_or(ConvertError::MissingFeatures)?;

    info!("Found {} features in document", features.len());
    let mut summary = ConversionSummary::default();

    for (index, feature) in features.iter_mut().enumerate() {
        let geometry = match feature.get_mut("geometry") {
            Some(Value::Null) => {
                debug!("Feature {} has no geometry, leaving it as is", index);
                summary.unlocated += 1;
                continue;
            }
            Some(geometry) => geometry,
            None => {
                return Err(ConvertError::MalformedGeometry {
                    feature: index,
                    reason: "missing 'geometry' member".to_string(),
                })
            }
        };

        let coordinates = geometry
            .get_mut("coordinates")
            .ok_or_else(|| ConvertError::MalformedGeometry {
                feature: index,
                reason: "missing 'coordinates' member".to_string(),
            })?;

        let tree = CoordinateTree::from_json(coordinates).map_err(|err| {
            ConvertError::MalformedGeometry {
                feature: index,
                reason: err.to_string(),
            }
        })?;
        let result = transform
            .apply(&tree)
            .map_err(|source| ConvertError::Projection {
                feature: index,
                source,
            })?;

        debug!(
            "Feature {}: {} positions at depth {}",
            index,
            tree.pair_count(),
            tree.depth()
        );
        summary.features += 1;
        summary.positions += tree.pair_count();
        *coordinates = result.to_json();
    }

    Ok((converted, summary))
}

/// Pretty-prints `document` to `path`, replacing any existing file and
/// creating missing parent directories.
pub fn write_document(path: &Path, document: &Value) -> Result<(), ConvertError> {
    let write_err = |source: io::Error| ConvertError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_err)?;
    }

    let file = File::create(path).map_err(write_err)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, document)
        .map_err(io::Error::from)
        .map_err(write_err)?;
    writer.flush().map_err(write_err)?;

    info!("Written {}", path.display());
    Ok(())
}

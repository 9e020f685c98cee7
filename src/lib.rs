use std::path::Path;

use log::info;

pub mod coordinates;
pub mod document;
pub mod error;
pub mod projection;
pub mod transform;

pub use coordinates::{CoordinateTree, Position};
pub use document::ConversionSummary;
pub use error::{ConvertError, GeometryError, ProjectionError};
pub use projection::{Projector, TransverseMercator, LKS94};
pub use transform::Transform;

/// Reads `input`, transforms every geometry and writes the result to `output`.
///
/// The document is converted completely in memory before anything is written,
/// so a failure at any stage leaves `output` untouched.
pub fn convert_file(
    input: &Path,
    output: &Path,
    transform: &Transform,
) -> Result<ConversionSummary, ConvertError> {
    let document = document::read_document(input)?;
    let (converted, summary) = document::convert_document(&document, transform)?;
    document::write_document(output, &converted)?;

    info!(
        "Converted {} positions in {} features ({} without geometry)",
        summary.positions, summary.features, summary.unlocated
    );
    Ok(summary)
}

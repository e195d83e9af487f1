use std::io::Write;
use std::path::Path;

use atomicwrites::{AtomicFile, OverwriteBehavior};
use serde::{Deserialize, Serialize};

use crate::collection::FigureService;
use crate::error::{PersistenceError, Result};
use crate::figure::Figure;
use crate::registry::FigureRegistry;
use crate::render::raster::to_png;
use crate::render::svg::to_svg;
use crate::render::{RasterOptions, SvgOptions};

use super::{from_json_str, to_json_string, ImportOptions, LoadReport};

/// Output formats selectable by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentFormat {
    /// Editable JSON document.
    Json,
    /// Presentation-only vector export.
    Svg,
    /// Presentation-only raster export.
    Png,
}

impl DocumentFormat {
    /// Matches a file extension, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::UnsupportedFormat`] for any other
    /// extension.
    pub fn from_extension(ext: &str) -> std::result::Result<Self, PersistenceError> {
        match ext.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "svg" => Ok(Self::Svg),
            "png" => Ok(Self::Png),
            _ => Err(PersistenceError::UnsupportedFormat(ext.to_owned())),
        }
    }

    /// Picks the format from the extension of `path`.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::UnsupportedFormat`] if the path has no
    /// known extension.
    pub fn from_path(path: &Path) -> std::result::Result<Self, PersistenceError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| PersistenceError::UnsupportedFormat(path.display().to_string()))?;
        Self::from_extension(ext)
    }

    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Svg => "svg",
            Self::Png => "png",
        }
    }
}

/// Page setup for the export formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    pub svg: SvgOptions,
    pub raster: RasterOptions,
}

/// Replaces the file at `path` with `bytes` in one rename.
fn write_atomic(path: &Path, bytes: &[u8]) -> std::result::Result<(), PersistenceError> {
    AtomicFile::new(path, OverwriteBehavior::AllowOverwrite)
        .write(|f| f.write_all(bytes))
        .map_err(|err| match err {
            atomicwrites::Error::Internal(e) | atomicwrites::Error::User(e) => {
                PersistenceError::io(path, e)
            }
        })
}

/// Writes the figures as a JSON document.
///
/// # Errors
///
/// Returns an error if a figure type is unregistered or the write fails;
/// an existing file is left intact in that case.
pub fn save<'a>(
    path: impl AsRef<Path>,
    figures: impl IntoIterator<Item = &'a Figure>,
    registry: &FigureRegistry,
) -> Result<()> {
    let path = path.as_ref();
    let json = to_json_string(figures, registry)?;
    write_atomic(path, json.as_bytes())?;
    tracing::info!(path = %path.display(), "document saved");
    Ok(())
}

/// Reads a JSON document and adds its figures to `service`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the document is rejected.
pub fn load(
    path: impl AsRef<Path>,
    service: &mut FigureService,
    options: &ImportOptions,
) -> Result<LoadReport> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|e| PersistenceError::io(path, e))?;
    let report = from_json_str(&json, service, options)?;
    tracing::info!(path = %path.display(), added = report.added.len(), "document read");
    Ok(report)
}

/// Writes the collection's figures in the requested format.
///
/// # Errors
///
/// Returns an error if serialization, rendering or the write fails.
pub fn save_as(
    path: impl AsRef<Path>,
    format: DocumentFormat,
    service: &FigureService,
    options: &ExportOptions,
) -> Result<()> {
    let path = path.as_ref();
    let figures = service.snapshot();
    match format {
        DocumentFormat::Json => return save(path, &figures, service.registry()),
        DocumentFormat::Svg => {
            let svg = to_svg(&figures, &options.svg);
            write_atomic(path, svg.as_bytes())?;
        }
        DocumentFormat::Png => {
            let png = to_png(&figures, &options.raster)?;
            write_atomic(path, &png)?;
        }
    }
    tracing::info!(path = %path.display(), ?format, figures = figures.len(), "drawing exported");
    Ok(())
}

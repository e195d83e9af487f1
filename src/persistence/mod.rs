//! Document codec: figures to JSON and back, plus file export.
//!
//! Writing is strict and driven by the registry schema. Reading is
//! permissive per field: malformed entries and parameters are dropped and
//! reported, and only a non-array top level fails outright.

mod document;
mod file;

pub use document::{Document, FigureEntry, ParameterMap, PointEntry};
pub use file::{load, save, save_as, DocumentFormat, ExportOptions};

use std::fmt;

use serde_json::{Map, Value};

use crate::collection::FigureService;
use crate::error::{PersistenceError, Result};
use crate::figure::{Color, Figure, FigureId};
use crate::math::Point2;
use crate::registry::{FigureRegistry, ParameterSet};

/// How a load treats entries that cannot be turned into figures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportOptions {
    /// Skip failing entries with a warning instead of aborting the load.
    pub skip_invalid: bool,
}

impl ImportOptions {
    /// Any failing entry aborts the load and nothing is added.
    #[must_use]
    pub fn strict() -> Self {
        Self { skip_invalid: false }
    }

    #[must_use]
    pub fn skip_invalid() -> Self {
        Self { skip_invalid: true }
    }
}

/// Something that was dropped while reading a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadWarning {
    /// Position of the entry in the top-level array.
    pub index: usize,
    pub message: String,
}

impl fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "entry {}: {}", self.index, self.message)
    }
}

/// Outcome of a successful load.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    /// IDs of the added figures, in document order.
    pub added: Vec<FigureId>,
    pub warnings: Vec<LoadWarning>,
}

/// Converts figures into document entries following the registry schema.
///
/// # Errors
///
/// Returns an error if a figure's type is not registered or its definition
/// is invalid, since such an entry could not be read back.
pub fn serialize<'a>(
    figures: impl IntoIterator<Item = &'a Figure>,
    registry: &FigureRegistry,
) -> Result<Document> {
    figures
        .into_iter()
        .map(|figure| -> Result<FigureEntry> {
            figure.validate()?;
            let mut point_parameters = ParameterMap::new();
            for name in registry.point_parameter_names(figure.name())? {
                point_parameters.push(*name, PointEntry::from(figure.point_parameter(name)));
            }
            let mut double_parameters = ParameterMap::new();
            for name in registry.scalar_parameter_names(figure.name())? {
                double_parameters.push(*name, figure.scalar_parameter(name));
            }
            Ok(FigureEntry {
                name: figure.name().to_owned(),
                point_parameters,
                double_parameters,
                color: figure.color(),
            })
        })
        .collect()
}

/// Serializes figures as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if a figure's type is not registered or its definition
/// is invalid.
pub fn to_json_string<'a>(
    figures: impl IntoIterator<Item = &'a Figure>,
    registry: &FigureRegistry,
) -> Result<String> {
    let document = serialize(figures, registry)?;
    Ok(serde_json::to_string_pretty(&document).map_err(PersistenceError::from)?)
}

/// Builds figures from a parsed document and adds them to `service`.
///
/// # Errors
///
/// Returns [`PersistenceError::InvalidDocument`] if the top level is not an
/// array. In strict mode the first construction error is returned and the
/// collection is left unchanged.
pub fn deserialize(
    value: &Value,
    service: &mut FigureService,
    options: &ImportOptions,
) -> Result<LoadReport> {
    let Some(items) = value.as_array() else {
        return Err(PersistenceError::InvalidDocument(
            "top-level value must be an array".to_owned(),
        )
        .into());
    };

    let mut warnings = Vec::new();
    let mut figures = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let Some(entry) = read_entry(index, item, &mut warnings) else {
            continue;
        };
        match service.create(&entry.name, &entry.params) {
            Ok(figure) => figures.push(figure.with_color(entry.color)),
            Err(err) if options.skip_invalid => {
                tracing::warn!(index, figure = %entry.name, error = %err, "skipping invalid entry");
                warnings.push(LoadWarning {
                    index,
                    message: err.to_string(),
                });
            }
            Err(err) => {
                tracing::warn!(index, figure = %entry.name, error = %err, "document rejected");
                return Err(err);
            }
        }
    }

    let added = service.add_all(figures)?;
    tracing::info!(added = added.len(), warnings = warnings.len(), "document loaded");
    Ok(LoadReport { added, warnings })
}

/// Parses JSON text and loads it into `service`.
///
/// # Errors
///
/// Returns an error if the text is not JSON, or as [`deserialize`].
pub fn from_json_str(
    json: &str,
    service: &mut FigureService,
    options: &ImportOptions,
) -> Result<LoadReport> {
    let value: Value = serde_json::from_str(json).map_err(PersistenceError::from)?;
    deserialize(&value, service, options)
}

struct RawEntry {
    name: String,
    params: ParameterSet,
    color: Color,
}

fn read_entry(index: usize, item: &Value, warnings: &mut Vec<LoadWarning>) -> Option<RawEntry> {
    let mut warn = |message: String| {
        tracing::warn!(index, %message, "document entry");
        warnings.push(LoadWarning { index, message });
    };

    let Some(obj) = item.as_object() else {
        warn("entry is not an object; skipped".to_owned());
        return None;
    };
    let Some(name) = obj.get("Name").and_then(Value::as_str) else {
        warn("entry has no string Name; skipped".to_owned());
        return None;
    };

    let mut params = ParameterSet::new();
    for (key, value) in section(obj, "PointParameters") {
        match read_point(value) {
            Some(p) => params.insert_point(key.as_str(), p),
            None => warn(format!("point parameter {key} is malformed; dropped")),
        }
    }
    for (key, value) in section(obj, "DoubleParameters") {
        match value.as_f64() {
            Some(v) => params.insert_scalar(key.as_str(), v),
            None => warn(format!("scalar parameter {key} is not a number; dropped")),
        }
    }

    let color = obj
        .get("Color")
        .and_then(Value::as_u64)
        .and_then(|c| u32::try_from(c).ok())
        .map_or(Color::BLACK, Color);

    Some(RawEntry {
        name: name.to_owned(),
        params,
        color,
    })
}

fn section<'a>(obj: &'a Map<String, Value>, key: &str) -> impl Iterator<Item = (&'a String, &'a Value)> {
    obj.get(key).and_then(Value::as_object).into_iter().flatten()
}

fn read_point(value: &Value) -> Option<Point2> {
    let obj = value.as_object()?;
    let x = obj.get("X")?.as_f64()?;
    let y = obj.get("Y")?.as_f64()?;
    Some(Point2::new(x, y))
}

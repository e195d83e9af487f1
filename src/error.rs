use std::path::PathBuf;

use thiserror::Error;

use crate::figure::FigureId;

/// Top-level error type for the figura engine.
#[derive(Debug, Error)]
pub enum FiguraError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Collection(#[from] CollectionError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

impl FiguraError {
    /// Returns `true` for construction errors caused by a missing parameter.
    #[must_use]
    pub fn is_missing_parameter(&self) -> bool {
        matches!(
            self,
            FiguraError::Registry(RegistryError::MissingParameter { .. })
        )
    }
}

/// Errors raised while looking up figure types or constructing figures.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("unknown figure type: {name}")]
    UnknownType { name: String },

    #[error("figure type {figure} requires parameter {parameter}")]
    MissingParameter {
        figure: &'static str,
        parameter: &'static str,
    },

    #[error("invalid value for parameter {parameter} of {figure}: {reason}")]
    InvalidParameter {
        figure: &'static str,
        parameter: String,
        reason: String,
    },
}

/// Errors related to the geometric definition of a figure.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("non-finite coordinate in {0}")]
    NonFinite(&'static str),
}

/// Errors raised by the figure collection service.
#[derive(Debug, Error)]
pub enum CollectionError {
    #[error("figure {0} is not in the collection")]
    NullFigure(FigureId),

    #[error("figure {id} is invalid: {reason}")]
    InvalidFigure { id: FigureId, reason: String },
}

/// Errors related to saving, loading and exporting documents.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("invalid document: {0}")]
    InvalidDocument(String),

    #[error("IO error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("export failed: {0}")]
    Export(String),

    #[error("unsupported document format: {0}")]
    UnsupportedFormat(String),
}

impl PersistenceError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Convenience type alias for results using [`FiguraError`].
pub type Result<T> = std::result::Result<T, FiguraError>;

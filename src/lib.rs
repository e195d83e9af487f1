pub mod collection;
pub mod config;
pub mod error;
pub mod figure;
pub mod math;
pub mod operations;
pub mod persistence;
pub mod registry;
pub mod render;

pub use collection::{CollectionEvent, FigureService, SubscriptionId};
pub use config::EditorConfig;
pub use error::{FiguraError, Result};
pub use figure::{Figure, FigureId, ScaleOutcome, Shape};
pub use registry::{FigureRegistry, ParameterSet};

pub mod config;
pub mod core;
pub mod error;
pub mod host;
pub mod panel;
pub mod runtime;
pub mod state;
pub mod template;
pub mod ui;

pub use config::{DockConfig, DockSide, RosterConfig};
pub use crate::core::schema::{FieldType, Schema, SchemaNode};
pub use crate::core::value::TrackerValue;
pub use crate::core::value_path::ValuePath;
pub use error::{ConfigError, DockError, PathError, RenderError, ScriptError, StoreError};
pub use host::{DockHost, Regeneration, StyleHandle, TrackerStore};
pub use panel::{DockPanel, RefreshOutcome};
pub use runtime::event::{DockAction, DockEvent, EditKey};
pub use template::{TemplateAssets, TemplateRenderer};

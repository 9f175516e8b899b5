use std::path::PathBuf;

/// Address problems detected while building or parsing a `ValuePath`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    #[error("path is empty")]
    Empty,
    /// Map keys containing the `.` separator cannot be addressed.
    #[error("key {key:?} contains the path separator '.' and cannot be addressed")]
    UnsupportedKey { key: String },
}

/// Failures reported by the external tracker store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("tracker save failed: {0}")]
    Save(String),
    #[error("tracker regeneration failed: {0}")]
    Regenerate(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScriptError {
    #[error("script evaluation failed: {0}")]
    Evaluate(String),
    #[error("script must evaluate to a function or an object, got {0}")]
    Shape(String),
    #[error("script {hook} hook failed: {message}")]
    Hook { hook: &'static str, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("template render failed: {0}")]
pub struct RenderError(pub String);

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("parsing JSON config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors surfaced by `DockPanel`. Only violations of the external store
/// contract propagate; everything else degrades in place.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DockError {
    #[error(transparent)]
    Store(#[from] StoreError),
}

//! Parse and load plugin configuration.

use std::{fs, path::Path};

use serde_json::error::Category;
use tracing::debug;

use crate::{Error, PluginConfig, error::excerpt_at, plugin::RawConfig};

/// Parse a config from `source`. `path` is only used for error reporting.
pub fn load_from_str(source: &str, path: Option<&Path>) -> Result<PluginConfig, Error> {
    let path_buf = path.map(Path::to_path_buf);
    let raw: RawConfig = serde_json::from_str(source).map_err(|e| match e.classify() {
        Category::Data => Error::Validation {
            path: path_buf.clone(),
            line: Some(e.line()),
            message: e.to_string(),
        },
        Category::Io | Category::Syntax | Category::Eof => Error::Parse {
            path: path_buf.clone(),
            line: e.line(),
            col: e.column(),
            message: e.to_string(),
            excerpt: excerpt_at(source, e.line(), e.column()),
        },
    })?;
    raw.resolve().map_err(|message| Error::Validation {
        path: path_buf,
        line: None,
        message,
    })
}

/// Load and validate the config file at `path`.
pub fn load_from_path(path: &Path) -> Result<PluginConfig, Error> {
    let source = fs::read_to_string(path).map_err(|e| Error::Read {
        path: Some(path.to_path_buf()),
        message: e.to_string(),
    })?;
    let cfg = load_from_str(&source, Some(path))?;
    debug!(path = %path.display(), hotkey = cfg.descriptor(), "loaded_config");
    Ok(cfg)
}

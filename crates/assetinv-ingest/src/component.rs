//! Report component hook for the asset inventory

use crate::{AssetInventory, RenderContext};
use assetinv_common::config::{ComponentConfig, DEFAULT_COMPONENT_NAME};
use serde_json::{Map, Value};
use std::path::PathBuf;
use tracing::{error, warn};

/// The asset inventory section of a report.
///
/// Layout fields are carried for the host renderer; only `assets_file` is
/// read by `preprocess`.
#[derive(Debug, Clone)]
pub struct AssetInventoryComponent {
    /// Display name
    pub name: String,
    /// Optional summary text
    pub summary: Option<String>,
    /// Uploaded asset scan export
    pub assets_file: Option<PathBuf>,
    /// Start on a new page
    pub page_break_before: bool,
    /// Render the title
    pub show_title: bool,
}

impl Default for AssetInventoryComponent {
    fn default() -> Self {
        Self {
            name: String::from(DEFAULT_COMPONENT_NAME),
            summary: None,
            assets_file: None,
            page_break_before: false,
            show_title: true,
        }
    }
}

impl From<&ComponentConfig> for AssetInventoryComponent {
    fn from(config: &ComponentConfig) -> Self {
        Self {
            name: config.name.clone(),
            summary: config.summary.clone(),
            assets_file: config.assets_file.as_ref().map(PathBuf::from),
            page_break_before: config.page_break_before,
            show_title: config.show_title,
        }
    }
}

impl AssetInventoryComponent {
    pub fn new(assets_file: impl Into<PathBuf>) -> Self {
        Self {
            assets_file: Some(assets_file.into()),
            ..Default::default()
        }
    }

    /// Build the render context for this component, empty on any failure
    pub fn render_context(&self) -> RenderContext {
        match &self.assets_file {
            Some(path) => AssetInventory::render_context_from_file(path),
            None => {
                warn!("Component '{}' has no assets file, rendering empty", self.name);
                RenderContext::empty()
            }
        }
    }

    /// Fill `assets` and `stats` in the report's render context.
    ///
    /// Never fails: a missing or unreadable source leaves both keys as
    /// empty arrays. Other keys of the context are left alone.
    pub fn preprocess(&self, context: &mut Map<String, Value>) {
        let rendered = self.render_context();

        let (assets, stats) = match (
            serde_json::to_value(&rendered.assets),
            serde_json::to_value(&rendered.stats),
        ) {
            (Ok(assets), Ok(stats)) => (assets, stats),
            (Err(e), _) | (_, Err(e)) => {
                error!("Failed to serialize asset inventory context: {}", e);
                (Value::Array(Vec::new()), Value::Array(Vec::new()))
            }
        };

        context.insert(String::from("assets"), assets);
        context.insert(String::from("stats"), stats);
    }
}

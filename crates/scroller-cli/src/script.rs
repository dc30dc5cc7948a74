//! Page scripts: a simulated page plus the triggers and resizes to play on it

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use scroller_core::SimulatedPage;

#[derive(Debug, Clone, Deserialize)]
pub struct PageScript {
    pub viewport_height: f64,
    pub document_height: f64,
    #[serde(default)]
    pub scroll_x: f64,
    #[serde(default)]
    pub scroll_y: f64,
    /// Whether the page can schedule per-frame callbacks
    #[serde(default = "default_true")]
    pub frames: bool,
    #[serde(default, rename = "region")]
    pub regions: Vec<RegionSpec>,
    #[serde(default, rename = "step")]
    pub steps: Vec<StepSpec>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegionSpec {
    pub name: String,
    pub top: f64,
    #[serde(default)]
    pub height: f64,
}

/// One script step. Exactly one of `trigger`, `resize` or `frames` is expected.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StepSpec {
    /// Region to scroll to
    pub trigger: Option<String>,
    /// Duration override for `trigger`, as the trigger element would carry it
    pub duration: Option<RawDuration>,
    pub resize: Option<ResizeSpec>,
    /// Deliver up to this many pending frames
    pub frames: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawDuration {
    Number(f64),
    Text(String),
}

impl RawDuration {
    pub fn as_raw(&self) -> String {
        match self {
            RawDuration::Number(ms) => ms.to_string(),
            RawDuration::Text(text) => text.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResizeSpec {
    pub viewport_height: Option<f64>,
    pub document_height: Option<f64>,
    /// New absolute tops by region name
    #[serde(default)]
    pub moves: BTreeMap<String, f64>,
}

fn default_true() -> bool {
    true
}

impl PageScript {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Invalid page script")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_toml_str(&content)
    }

    /// Build the simulated page for this script, tagged with `attribute`
    pub fn page(&self, attribute: &str) -> SimulatedPage {
        use scroller_core::Document;

        let mut page = SimulatedPage::new(self.viewport_height, self.document_height)
            .with_attribute(attribute);
        for region in &self.regions {
            page.add_region(&region.name, region.top, region.height);
        }
        page.set_frames_supported(self.frames);
        page.set_scroll_offset(self.scroll_x, self.scroll_y);
        page.clear_writes();
        page
    }
}

impl ResizeSpec {
    pub fn apply(&self, page: &mut SimulatedPage) {
        if let Some(height) = self.viewport_height {
            page.set_viewport_height(height);
        }
        if let Some(height) = self.document_height {
            page.set_document_height(height);
        }
        for (name, top) in &self.moves {
            if !page.move_region(name, *top) {
                tracing::warn!("Resize moves unknown region '{}'", name);
            }
        }
    }
}

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::input::{InputError, require_file};
use crate::panels::PanelError;

/// Master lists a resolved panel id must appear in: panel id to bed region id,
/// and panel id to gene list id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelRegistry {
    #[serde(default)]
    pub bed_regions: BTreeMap<String, String>,
    #[serde(default)]
    pub gene_lists: BTreeMap<String, String>,
}

impl PanelRegistry {
    pub fn load_json(path: &Path) -> Result<Self, PanelError> {
        require_file(path)?;
        let text = fs::read_to_string(path).map_err(InputError::from)?;
        serde_json::from_str(&text).map_err(|source| PanelError::Registry {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Registry with one entry per `*.bed` file in `folder`, both ids equal to
    /// the file stem.
    pub fn from_bed_folder(folder: &Path) -> Result<Self, PanelError> {
        if !folder.is_dir() {
            return Err(InputError::MissingInputFile(folder.to_path_buf()).into());
        }
        let mut registry = PanelRegistry::default();
        for entry in fs::read_dir(folder).map_err(InputError::from)? {
            let path = entry.map_err(InputError::from)?.path();
            if !path.extension().is_some_and(|ext| ext == "bed") {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            registry.insert(stem, stem, stem);
        }
        info!(
            "panel registry derived from {}: {} panels",
            folder.display(),
            registry.bed_regions.len()
        );
        Ok(registry)
    }

    pub fn insert(&mut self, panel_id: &str, bed_region: &str, gene_list: &str) {
        self.bed_regions
            .insert(panel_id.to_string(), bed_region.to_string());
        self.gene_lists
            .insert(panel_id.to_string(), gene_list.to_string());
    }

    pub fn bed_region(&self, panel_id: &str) -> Option<&str> {
        self.bed_regions.get(panel_id).map(String::as_str)
    }

    pub fn gene_list(&self, panel_id: &str) -> Option<&str> {
        self.gene_lists.get(panel_id).map(String::as_str)
    }

    pub fn ensure_known(&self, panel_id: &str) -> Result<(), PanelError> {
        let unknown = |registry| PanelError::UnknownPanel {
            panel_id: panel_id.to_string(),
            registry,
        };
        if self.bed_region(panel_id).is_none() {
            return Err(unknown("bed region"));
        }
        if self.gene_list(panel_id).is_none() {
            return Err(unknown("gene list"));
        }
        Ok(())
    }
}

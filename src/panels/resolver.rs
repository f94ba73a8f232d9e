use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::input::panel_bed::load_panel_bed;
use crate::input::require_file;
use crate::input::sample_sheet::SampleSheet;
use crate::panels::registry::PanelRegistry;
use crate::panels::{PanelError, PanelTarget};

pub const PANEL_PREFIX: &str = "CGL";

#[derive(Debug, Clone)]
pub struct ResolvedPanel {
    pub sample: String,
    pub run_name: String,
    pub ordinal: usize,
    pub panel_id: String,
    pub bed_path: PathBuf,
    pub target: PanelTarget,
}

/// Position of `fragment` among the samples packed into `run_name`.
///
/// A combined run looks like `NGS25-0001_0002-AB`: the second dash field holds
/// the `_`-joined sample numbers and the trailing dash field belongs to the last
/// one, so the run expands to `["0001", "0002-AB"]`. The fragment is matched by
/// its last dash token, or its last two when it has more than two. A key that
/// matches no token exactly is matched against the token carrying it as a
/// `-`-suffix.
pub fn sample_ordinal(fragment: &str, run_name: &str) -> Result<usize, PanelError> {
    if fragment == run_name {
        return Ok(0);
    }
    let not_in_run = || PanelError::SampleNotInRun {
        fragment: fragment.to_string(),
        run_name: run_name.to_string(),
    };

    let key = fragment_key(fragment);
    let tokens = run_sample_tokens(run_name).ok_or_else(not_in_run)?;
    if let Some(idx) = tokens.iter().position(|t| *t == key) {
        return Ok(idx);
    }
    let suffix = format!("-{key}");
    tokens
        .iter()
        .position(|t| t.ends_with(&suffix))
        .ok_or_else(not_in_run)
}

fn fragment_key(fragment: &str) -> String {
    let parts: Vec<&str> = fragment.split('-').collect();
    if parts.len() > 2 {
        parts[parts.len() - 2..].join("-")
    } else {
        parts[parts.len() - 1].to_string()
    }
}

pub fn run_sample_tokens(run_name: &str) -> Option<Vec<String>> {
    let parts: Vec<&str> = run_name.split('-').collect();
    if parts.len() < 2 {
        return None;
    }
    let mut tokens: Vec<String> = parts[1].split('_').map(str::to_string).collect();
    if let Some(last) = tokens.last_mut() {
        last.push('-');
        last.push_str(parts[parts.len() - 1]);
    }
    Some(tokens)
}

/// Restores the `CGL` prefix that combined panel lists drop after the first token.
pub fn normalize_panel_id(panel_spec: &str, token: &str) -> String {
    if !token.contains(PANEL_PREFIX) && panel_spec.starts_with(PANEL_PREFIX) {
        format!("{PANEL_PREFIX}{token}")
    } else {
        token.to_string()
    }
}

pub fn select_panel_id(
    panel_spec: &str,
    ordinal: usize,
    run_name: &str,
) -> Result<String, PanelError> {
    let token = panel_spec
        .split('_')
        .nth(ordinal)
        .ok_or_else(|| PanelError::OrdinalOutOfRange {
            run_name: run_name.to_string(),
            ordinal,
            panel_spec: panel_spec.to_string(),
        })?;
    Ok(normalize_panel_id(panel_spec, token.trim()))
}

pub struct PanelResolver<'a> {
    sheet: &'a SampleSheet,
    registry: &'a PanelRegistry,
    bed_folder: &'a Path,
}

impl<'a> PanelResolver<'a> {
    pub fn new(sheet: &'a SampleSheet, registry: &'a PanelRegistry, bed_folder: &'a Path) -> Self {
        Self {
            sheet,
            registry,
            bed_folder,
        }
    }

    /// Ordinal and registry-checked panel id for one sample of a run, without
    /// touching the panel definition file.
    pub fn resolve_panel_id(
        &self,
        fragment: &str,
        run_name: &str,
    ) -> Result<(usize, String), PanelError> {
        let record = self
            .sheet
            .get(run_name)
            .ok_or_else(|| PanelError::UnknownSample(run_name.to_string()))?;
        let ordinal = sample_ordinal(fragment, run_name)?;
        let panel_id = select_panel_id(&record.panel_spec, ordinal, run_name)?;
        self.registry.ensure_known(&panel_id)?;
        debug!(
            "sample {fragment} is #{ordinal} of run {run_name}; panel spec {} ({} panels) -> {panel_id}",
            record.panel_spec,
            record.panel_tokens().len()
        );
        Ok((ordinal, panel_id))
    }

    pub fn bed_path(&self, panel_id: &str) -> PathBuf {
        self.bed_folder.join(format!("{panel_id}.bed"))
    }

    pub fn resolve(&self, fragment: &str, run_name: &str) -> Result<ResolvedPanel, PanelError> {
        let (ordinal, panel_id) = self.resolve_panel_id(fragment, run_name)?;
        let bed_path = self.bed_path(&panel_id);
        require_file(&bed_path)?;
        let exons = load_panel_bed(&bed_path, &panel_id)?;
        info!(
            "resolved panel {panel_id} for {fragment}: {} exons from {}",
            exons.len(),
            bed_path.display()
        );
        Ok(ResolvedPanel {
            sample: fragment.to_string(),
            run_name: run_name.to_string(),
            ordinal,
            panel_id: panel_id.clone(),
            bed_path,
            target: PanelTarget { panel_id, exons },
        })
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/panels/resolver.rs"]
mod tests;

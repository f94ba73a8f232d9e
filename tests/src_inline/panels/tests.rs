use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use super::registry::PanelRegistry;
use super::{PanelError, PanelTarget};
use crate::model::records::ExonRecord;

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("kira_panelcov_panels_{}_{}", std::process::id(), id));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_file(path: &Path, contents: &str) {
    let mut f = BufWriter::new(File::create(path).unwrap());
    f.write_all(contents.as_bytes()).unwrap();
}

fn exon(chrom: &str, gene: &str) -> ExonRecord {
    ExonRecord {
        chrom: chrom.to_string(),
        start: 0,
        end: 10,
        exon_id: format!("{gene}_ex"),
        gene: gene.to_string(),
        panel: "P".to_string(),
    }
}

#[test]
fn test_target_genes_first_seen_order() {
    let target = PanelTarget {
        panel_id: "P".to_string(),
        exons: vec![
            exon("chr2", "TP53"),
            exon("chr1", "BRCA1"),
            exon("chr2", "TP53"),
            exon("chrX", "AR"),
        ],
    };
    assert_eq!(target.genes(), vec!["TP53", "BRCA1", "AR"]);
    let chroms: Vec<String> = target.chromosomes().into_iter().collect();
    assert_eq!(chroms, vec!["chr1", "chr2", "chrX"]);
}

#[test]
fn test_registry_json_round_trip_and_lookup() {
    let dir = make_temp_dir();
    let path = dir.join("registry.json");
    write_file(
        &path,
        r#"{"bed_regions": {"CGL1": "cgl1_v3", "CGL2": "cgl2_v1"}, "gene_lists": {"CGL1": "GL-1"}}"#,
    );
    let registry = PanelRegistry::load_json(&path).unwrap();
    assert_eq!(registry.bed_region("CGL1"), Some("cgl1_v3"));
    assert_eq!(registry.gene_list("CGL1"), Some("GL-1"));
    assert!(registry.ensure_known("CGL1").is_ok());
    assert!(matches!(
        registry.ensure_known("CGL2"),
        Err(PanelError::UnknownPanel {
            registry: "gene list",
            ..
        })
    ));
    assert!(matches!(
        registry.ensure_known("CGL3"),
        Err(PanelError::UnknownPanel {
            registry: "bed region",
            ..
        })
    ));
}

#[test]
fn test_registry_json_invalid() {
    let dir = make_temp_dir();
    let path = dir.join("registry.json");
    write_file(&path, "{not json");
    assert!(matches!(
        PanelRegistry::load_json(&path),
        Err(PanelError::Registry { .. })
    ));
}

#[test]
fn test_registry_from_bed_folder() {
    let dir = make_temp_dir();
    write_file(&dir.join("CGL1.bed"), "");
    write_file(&dir.join("CGL12.bed"), "");
    write_file(&dir.join("notes.txt"), "");
    let registry = PanelRegistry::from_bed_folder(&dir).unwrap();
    let ids: Vec<&String> = registry.bed_regions.keys().collect();
    assert_eq!(ids, vec!["CGL1", "CGL12"]);
    assert!(registry.ensure_known("CGL12").is_ok());
    assert!(registry.ensure_known("notes").is_err());
}

#[test]
fn test_registry_from_missing_folder() {
    let dir = make_temp_dir().join("absent");
    assert!(matches!(
        PanelRegistry::from_bed_folder(&dir),
        Err(PanelError::Input(_))
    ));
}

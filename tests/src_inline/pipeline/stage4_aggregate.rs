use super::*;

fn frag(length: u64, depth: f64) -> Fragment {
    Fragment { length, depth }
}

fn accumulators(entries: &[(&str, &[Fragment])]) -> GeneAccumulators {
    let mut acc = GeneAccumulators::default();
    for (gene, fragments) in entries {
        acc.extend(gene, fragments);
    }
    acc
}

#[test]
fn test_gene_aggregate_independent_of_exon_order() {
    let exon1: &[Fragment] = &[frag(100, 30.0), frag(50, 8.0)];
    let exon2: &[Fragment] = &[frag(200, 120.0)];
    let exon3: &[Fragment] = &[frag(25, 0.0), frag(75, 19.0)];

    let forward = accumulators(&[("G", exon1), ("G", exon2), ("G", exon3)]);
    let reverse = accumulators(&[("G", exon3), ("G", exon2), ("G", exon1)]);

    let a = aggregate_gene(forward.fragments("G"));
    let b = aggregate_gene(reverse.fragments("G"));
    assert_eq!(a, b);
    assert_eq!(run_stage4("P", &forward).genes[0].stat, a);
}

#[test]
fn test_panel_aggregate_independent_of_gene_order() {
    let a: &[Fragment] = &[frag(100, 30.0), frag(10, 2.0)];
    let b: &[Fragment] = &[frag(40, 55.0)];
    let c: &[Fragment] = &[frag(300, 101.0)];

    let p1 = aggregate_panel([a, b, c]);
    let p2 = aggregate_panel([c, a, b]);
    assert_eq!(p1, p2);

    let s1 = run_stage4("P", &accumulators(&[("A", a), ("B", b), ("C", c)]));
    let s2 = run_stage4("P", &accumulators(&[("C", c), ("B", b), ("A", a)]));
    assert_eq!(s1.panel.stat, s2.panel.stat);
    assert_eq!(s1.panel.stat, p1);
}

#[test]
fn test_zero_weight_gene_excluded() {
    let covered: &[Fragment] = &[frag(100, 30.0), frag(100, 5.0)];
    let empty: &[Fragment] = &[];
    let zero_length: &[Fragment] = &[frag(0, 40.0)];

    let with = run_stage4(
        "CGL1",
        &accumulators(&[("EMPTY", empty), ("A", covered), ("ZERO", zero_length)]),
    );
    let without = run_stage4("CGL1", &accumulators(&[("A", covered)]));

    assert_eq!(with.panel.stat, without.panel.stat);
    assert_eq!(with.genes.len(), 1);
    assert_eq!(with.genes[0].gene, "A");
    assert_eq!(with.uncovered_genes, vec!["EMPTY".to_string(), "ZERO".to_string()]);
    assert_eq!(with.panel.n_genes, 1);
    assert_eq!(aggregate_panel([empty, covered]), aggregate_panel([covered]));
}

#[test]
fn test_panel_without_coverage_is_zero() {
    let empty: &[Fragment] = &[];
    let out = run_stage4("CGL9", &accumulators(&[("A", empty), ("B", empty)]));
    assert!(out.genes.is_empty());
    assert_eq!(out.panel.stat, CoverageStat::zero());
    assert_eq!(out.panel.panel_id, "CGL9");
}

#[test]
fn test_panel_stat_weights_by_bases() {
    let a: &[Fragment] = &[frag(300, 40.0)];
    let b: &[Fragment] = &[frag(100, 0.0)];
    let out = run_stage4("P", &accumulators(&[("A", a), ("B", b)]));
    assert!((out.panel.stat.avg_depth - 30.0).abs() < 1e-12);
    assert!((out.panel.stat.pct_gt_0x - 0.75).abs() < 1e-12);
    assert!((out.panel.stat.pct_ge_20x - 0.75).abs() < 1e-12);
    assert_eq!(out.panel.stat.pct_ge_50x, 0.0);
}

#[test]
fn test_fractional_depths_independent_of_order() {
    let a: &[Fragment] = &[frag(1, 0.1)];
    let b: &[Fragment] = &[frag(1, 0.2)];
    let c: &[Fragment] = &[frag(1, 0.3), frag(3, 17.25)];

    assert_eq!(aggregate_panel([a, b, c]), aggregate_panel([c, b, a]));
    assert_eq!(aggregate_panel([a, b, c]), aggregate_panel([b, c, a]));

    let forward = run_stage4("P", &accumulators(&[("G", a), ("G", b), ("G", c)]));
    let reverse = run_stage4("P", &accumulators(&[("G", c), ("G", b), ("G", a)]));
    assert_eq!(forward.genes[0].stat, reverse.genes[0].stat);
    assert_eq!(forward.panel.stat, reverse.panel.stat);
    assert!((forward.panel.stat.avg_depth - (0.6 + 3.0 * 17.25) / 6.0).abs() < 1e-12);
}

#[test]
fn test_panel_without_genes() {
    let acc = GeneAccumulators::default();
    assert!(acc.is_empty());
    let out = run_stage4("CGL0", &acc);
    assert!(out.genes.is_empty());
    assert!(out.uncovered_genes.is_empty());
    assert_eq!(out.panel.stat, CoverageStat::zero());
}

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use taxlog_core::{ChangeKind, Snapshot, SnapshotIndex, TaxonId};
use taxlog_history::{ChangeEvent, Changelog, ChangelogBuilder, ChangelogEmitter, HistoryStore};

const SAMPLE_CSV: &str = "\
taxid,version,change,change-value,name,rank,lineage,lineage-taxids
1,2019-01-01,NEW,,root,no rank,,
2,2019-01-01,NEW,,Bacteria,superkingdom,root,1
2,2019-02-01,ABSORB,7,Bacteria,superkingdom,root,1
7,2019-02-01,MERGE,2,,,,
100,2019-01-01,NEW,,Foo bar,species,root;Bacteria,1;2
100,2019-02-01,DELETE,,Foo bar,species,root;Bacteria,1;2
100,2019-03-01,REUSE_DEL,,Foo baz,species,root;Bacteria,1;2
";

fn sample_changelog() -> Changelog {
    let base = || {
        Snapshot::new()
            .with_taxon(1, &[], "no rank", "root")
            .with_taxon(2, &[1], "superkingdom", "Bacteria")
    };

    let mut builder = ChangelogBuilder::new();
    builder
        .ingest(
            "2019-01-01",
            base().with_taxon(100, &[1, 2], "species", "Foo bar"),
        )
        .unwrap();
    builder
        .ingest("2019-02-01", base().with_deleted(100).with_merge(7, 2))
        .unwrap();
    builder
        .ingest(
            "2019-03-01",
            base().with_taxon(100, &[1, 2], "species", "Foo baz"),
        )
        .unwrap();
    builder.finish()
}

#[test]
fn test_csv_output() {
    let changelog = sample_changelog();
    let mut out = Vec::new();

    let written = ChangelogEmitter::new(&changelog).write(&mut out).unwrap();
    assert_eq!(written, 7);
    assert_eq!(String::from_utf8(out).unwrap(), SAMPLE_CSV);
}

#[test]
fn test_tab_delimiter() {
    let changelog = sample_changelog();
    let mut out = Vec::new();

    ChangelogEmitter::new(&changelog)
        .with_delimiter(b'\t')
        .write(&mut out)
        .unwrap();

    let text = String::from_utf8(out).unwrap();
    assert_eq!(text, SAMPLE_CSV.replace(',', "\t"));
    let merge_row = text.lines().find(|line| line.contains("\tMERGE\t")).unwrap();
    assert_eq!(merge_row, "7\t2019-02-01\tMERGE\t2\t\t\t\t");
}

#[test]
fn test_empty_changelog_still_has_header() {
    let changelog = ChangelogBuilder::new().finish();
    let mut out = Vec::new();

    let written = ChangelogEmitter::new(&changelog).write(&mut out).unwrap();
    assert_eq!(written, 0);
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "taxid,version,change,change-value,name,rank,lineage,lineage-taxids\n"
    );
}

#[test]
fn test_rows_resolve_names_in_data_snapshot() {
    let changelog = sample_changelog();
    let rows: Vec<_> = ChangelogEmitter::new(&changelog)
        .rows()
        .filter(|row| row.taxid == TaxonId(100))
        .collect();

    assert_eq!(rows.len(), 3);
    // DELETE describes the taxon as it was last seen
    assert_eq!(rows[1].change, ChangeKind::Delete);
    assert_eq!(rows[1].version, "2019-02-01");
    assert_eq!(rows[1].name, "Foo bar");
    assert_eq!(rows[2].name, "Foo baz");
}

#[test]
fn test_quoting_of_delimiter_in_names() {
    let mut builder = ChangelogBuilder::new();
    builder
        .ingest(
            "2020-01-01",
            Snapshot::new().with_taxon(1, &[], "no rank", "root, of all"),
        )
        .unwrap();
    let changelog = builder.finish();

    let mut out = Vec::new();
    ChangelogEmitter::new(&changelog).write(&mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("1,2020-01-01,NEW,,\"root, of all\",no rank,,"));
}

const KINDS: [ChangeKind; 11] = ChangeKind::ALL;

proptest! {
    #[test]
    fn sorted_histories_follow_snapshot_then_kind(
        events in prop::collection::vec((0u32..6, 0usize..KINDS.len()), 1..40)
    ) {
        let mut store = HistoryStore::new();
        for &(snapshot, kind) in &events {
            store.append(
                TaxonId(42),
                ChangeEvent::placeholder(SnapshotIndex(snapshot), KINDS[kind]),
            );
        }
        store.sort_histories();

        let history = store.history(TaxonId(42)).unwrap();
        prop_assert_eq!(history.len(), events.len());
        for pair in history.windows(2) {
            prop_assert!(
                (pair[0].snapshot, pair[0].kind.ordinal())
                    <= (pair[1].snapshot, pair[1].kind.ordinal())
            );
        }
    }
}

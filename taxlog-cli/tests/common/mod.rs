#![allow(dead_code)]

use anyhow::Result;
use assert_cmd::Command;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// One snapshot's dump files, as plain text
pub struct DumpFixture {
    pub nodes: String,
    pub names: String,
    pub delnodes: String,
    pub merged: String,
}

impl DumpFixture {
    /// Build from (taxid, parent, rank, name) rows plus deleted ids and
    /// (from, to) merges
    pub fn new(taxa: &[(u32, u32, &str, &str)], deleted: &[u32], merged: &[(u32, u32)]) -> Self {
        let mut nodes = String::new();
        let mut names = String::new();
        for (taxid, parent, rank, name) in taxa {
            nodes.push_str(&format!("{}\t|\t{}\t|\t{}\t|\t\t|\n", taxid, parent, rank));
            names.push_str(&format!("{}\t|\t{}\t|\t\t|\tscientific name\t|\n", taxid, name));
            names.push_str(&format!("{}\t|\t{} (synonym)\t|\t\t|\tsynonym\t|\n", taxid, name));
        }

        Self {
            nodes,
            names,
            delnodes: deleted.iter().map(|id| format!("{}\t|\n", id)).collect(),
            merged: merged
                .iter()
                .map(|(from, to)| format!("{}\t|\t{}\t|\n", from, to))
                .collect(),
        }
    }
}

/// The three-snapshot archive used by most tests: 100 is deleted in the
/// second snapshot and reused in the third; 7 is merged into 2.
pub fn standard_archive() -> Vec<(&'static str, DumpFixture)> {
    let base = [(1, 1, "no rank", "root"), (2, 1, "superkingdom", "Bacteria")];
    let with_100 = |name: &'static str| {
        let mut taxa = base.to_vec();
        taxa.push((100, 2, "species", name));
        taxa
    };

    vec![
        ("2019-01-01", DumpFixture::new(&with_100("Foo bar"), &[], &[])),
        ("2019-02-01", DumpFixture::new(&base, &[100], &[(7, 2)])),
        ("2019-03-01", DumpFixture::new(&with_100("Foo baz"), &[], &[])),
    ]
}

pub const STANDARD_CHANGELOG: &str = "\
taxid,version,change,change-value,name,rank,lineage,lineage-taxids
1,2019-01-01,NEW,,root,no rank,,
2,2019-01-01,NEW,,Bacteria,superkingdom,root,1
2,2019-02-01,ABSORB,7,Bacteria,superkingdom,root,1
7,2019-02-01,MERGE,2,,,,
100,2019-01-01,NEW,,Foo bar,species,root;Bacteria,1;2
100,2019-02-01,DELETE,,Foo bar,species,root;Bacteria,1;2
100,2019-03-01,REUSE_DEL,,Foo baz,species,root;Bacteria,1;2
";

pub fn write_gz(path: &Path, content: &str) -> Result<()> {
    let mut encoder = GzEncoder::new(fs::File::create(path)?, Compression::fast());
    encoder.write_all(content.as_bytes())?;
    encoder.finish()?;
    Ok(())
}

/// Test environment with an archive directory, an output directory and an
/// isolated TAXLOG_HOME
pub struct TestEnvironment {
    pub temp_dir: TempDir,
    pub archive_dir: PathBuf,
    pub output_dir: PathBuf,
    pub home_dir: PathBuf,
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let archive_dir = temp_dir.path().join("archive");
        let output_dir = temp_dir.path().join("output");
        let home_dir = temp_dir.path().join("home");

        fs::create_dir_all(&archive_dir)?;
        fs::create_dir_all(&output_dir)?;
        fs::create_dir_all(&home_dir)?;

        Ok(Self {
            temp_dir,
            archive_dir,
            output_dir,
            home_dir,
        })
    }

    /// Environment pre-populated with [`standard_archive`]
    pub fn with_standard_archive() -> Result<Self> {
        let env = Self::new()?;
        for (label, fixture) in standard_archive() {
            env.add_snapshot(label, &fixture)?;
        }
        Ok(env)
    }

    pub fn add_snapshot(&self, label: &str, fixture: &DumpFixture) -> Result<PathBuf> {
        let dir = self.archive_dir.join(label);
        fs::create_dir_all(&dir)?;
        fs::write(dir.join("nodes.dmp"), &fixture.nodes)?;
        fs::write(dir.join("names.dmp"), &fixture.names)?;
        fs::write(dir.join("delnodes.dmp"), &fixture.delnodes)?;
        fs::write(dir.join("merged.dmp"), &fixture.merged)?;
        Ok(dir)
    }

    /// Replace a plain dump file of `label` with its gzipped form
    pub fn gzip_file(&self, label: &str, file: &str) -> Result<()> {
        let plain = self.archive_dir.join(label).join(file);
        let content = fs::read_to_string(&plain)?;
        write_gz(&plain.with_file_name(format!("{}.gz", file)), &content)?;
        fs::remove_file(plain)?;
        Ok(())
    }

    pub fn output_path(&self, name: &str) -> PathBuf {
        self.output_dir.join(name)
    }

    pub fn write_home_config(&self, content: &str) -> Result<PathBuf> {
        let path = self.home_dir.join("config.toml");
        fs::write(&path, content)?;
        Ok(path)
    }

    /// `taxlog` command isolated from the user's home and log settings
    pub fn cmd(&self) -> Command {
        let mut cmd = taxlog_cmd();
        cmd.env("TAXLOG_HOME", &self.home_dir)
            .env_remove("RUST_LOG")
            .env_remove("TAXLOG_LOG");
        cmd
    }
}

pub fn taxlog_cmd() -> Command {
    Command::cargo_bin("taxlog").unwrap()
}

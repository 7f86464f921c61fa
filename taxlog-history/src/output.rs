//! Output destinations for the changelog

use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::File;
use std::io::{self, BufWriter, Stdout, Write};
use std::path::{Path, PathBuf};
use taxlog_core::{TaxlogError, TaxlogResult};

/// Where the changelog goes: stdout, a plain file, or a gzip file chosen by
/// a `.gz` extension
#[derive(Debug)]
pub enum OutputSink {
    Stdout(BufWriter<Stdout>),
    File(BufWriter<File>),
    Gzip(GzEncoder<BufWriter<File>>),
}

impl OutputSink {
    /// Open `path`, or stdout when it is `None` or `-`
    pub fn open(path: Option<&Path>) -> TaxlogResult<Self> {
        let path = match path {
            None => return Ok(Self::stdout()),
            Some(p) if p == Path::new("-") => return Ok(Self::stdout()),
            Some(p) => p,
        };

        let file = File::create(path).map_err(|e| {
            TaxlogError::Output(format!("Failed to create {}: {}", path.display(), e))
        })?;
        let writer = BufWriter::new(file);

        if is_gzip_path(path) {
            Ok(OutputSink::Gzip(GzEncoder::new(writer, Compression::default())))
        } else {
            Ok(OutputSink::File(writer))
        }
    }

    fn stdout() -> Self {
        OutputSink::Stdout(BufWriter::new(io::stdout()))
    }

    /// Flush everything, completing the gzip trailer if any
    pub fn finish(self) -> TaxlogResult<()> {
        match self {
            OutputSink::Stdout(mut w) => w.flush()?,
            OutputSink::File(mut w) => w.flush()?,
            OutputSink::Gzip(encoder) => encoder.finish()?.flush()?,
        }
        Ok(())
    }
}

impl Write for OutputSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            OutputSink::Stdout(w) => w.write(buf),
            OutputSink::File(w) => w.write(buf),
            OutputSink::Gzip(w) => w.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            OutputSink::Stdout(w) => w.flush(),
            OutputSink::File(w) => w.flush(),
            OutputSink::Gzip(w) => w.flush(),
        }
    }
}

fn is_gzip_path(path: &Path) -> bool {
    path.extension().map(|ext| ext == "gz").unwrap_or(false)
}

/// Display name for logs
pub fn describe(path: Option<&PathBuf>) -> String {
    match path {
        Some(p) if p.as_os_str() != "-" => p.display().to_string(),
        _ => "stdout".to_string(),
    }
}

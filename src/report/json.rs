// JSON sinks - write the finished report to a file or stdout

use super::{ReportSink, TestRun};
use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use crate::time;

/// Writes the report once, to `<dir>/<prefix>-<timestamp>.json`.
pub struct JsonFileSink {
    output_dir: PathBuf,
    file_prefix: String,
    pretty: bool,
}

impl JsonFileSink {
    pub fn new(output_dir: impl Into<PathBuf>, file_prefix: impl Into<String>) -> Self {
        Self {
            output_dir: output_dir.into(),
            file_prefix: file_prefix.into(),
            pretty: true,
        }
    }

    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// File name for a report written at `stamp`
    pub fn file_name(&self, stamp: &str) -> String {
        format!("{}-{}.json", self.file_prefix, stamp)
    }

    fn target_path(&self) -> PathBuf {
        self.output_dir.join(self.file_name(&time::now_file_stamp()))
    }
}

impl ReportSink for JsonFileSink {
    fn persist(&self, report: &TestRun) -> Result<String> {
        fs::create_dir_all(&self.output_dir).with_context(|| {
            format!(
                "Failed to create report directory: {}",
                self.output_dir.display()
            )
        })?;

        let path = self.target_path();
        let file = File::create(&path)
            .with_context(|| format!("Failed to create JSON report file: {}", path.display()))?;
        let mut writer = BufWriter::new(file);

        write_json(&mut writer, report, self.pretty)?;
        writer
            .flush()
            .with_context(|| format!("Failed to write JSON report file: {}", path.display()))?;

        Ok(path.display().to_string())
    }
}

/// Writes the report to standard output.
pub struct StdoutSink {
    pretty: bool,
}

impl StdoutSink {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl ReportSink for StdoutSink {
    fn persist(&self, report: &TestRun) -> Result<String> {
        let mut stdout = io::stdout().lock();
        write_json(&mut stdout, report, self.pretty)?;
        writeln!(stdout).context("Failed to write report to stdout")?;
        stdout.flush().context("Failed to write report to stdout")?;
        Ok("stdout".to_string())
    }
}

fn write_json<W: Write>(writer: W, report: &TestRun, pretty: bool) -> Result<()> {
    let written = if pretty {
        serde_json::to_writer_pretty(writer, report)
    } else {
        serde_json::to_writer(writer, report)
    };
    written.context("Failed to serialize test run to JSON")
}

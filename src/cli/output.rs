// Output formatting for CLI

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;
use std::fmt::Display;
use std::io::Write;
use std::path::Path;

use tune_transporter::transfer::Transfer;
use tune_transporter::TrackMetadata;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON
    #[default]
    Pretty,
    /// Compact JSON
    Json,
    /// Key-value pairs
    KeyValue,
    /// Table format
    Table,
}

/// Tags of one file as printed by `read`
#[derive(Serialize)]
struct TrackReport<'a> {
    file: String,
    #[serde(flatten)]
    metadata: &'a TrackMetadata,
}

impl TrackReport<'_> {
    /// Label and display value of every field, in output order
    fn rows(&self) -> [(&'static str, String); 7] {
        let metadata = self.metadata;
        [
            ("file", self.file.clone()),
            ("title", metadata.title.clone()),
            ("album_artist", metadata.album_artist.clone()),
            ("album", metadata.album.clone()),
            ("track_number", metadata.track_number.to_string()),
            ("disc_number", metadata.disc_number.to_string()),
            ("disc_total", metadata.disc_total.to_string()),
        ]
    }
}

/// Writes track reports and progress lines
pub struct OutputFormatter {
    format: OutputFormat,
    quiet: bool,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat, quiet: bool) -> Self {
        Self { format, quiet }
    }

    /// Write the tags of `file` in the configured format
    pub fn write_track(
        &self,
        file: &Path,
        metadata: &TrackMetadata,
        writer: &mut impl Write,
    ) -> Result<()> {
        let report = TrackReport {
            file: file.display().to_string(),
            metadata,
        };

        match self.format {
            OutputFormat::Pretty => writeln!(writer, "{}", serde_json::to_string_pretty(&report)?)?,
            OutputFormat::Json => writeln!(writer, "{}", serde_json::to_string(&report)?)?,
            OutputFormat::KeyValue => {
                for (label, value) in report.rows() {
                    writeln!(writer, "{label}={value}")?;
                }
            }
            OutputFormat::Table => {
                let rows = report.rows();
                let width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
                let rule = "-".repeat(width + 2 + report.file.len().max(20));

                writeln!(writer, "{rule}")?;
                for (label, value) in rows {
                    writeln!(writer, "{label:<width$}  {value}")?;
                }
                writeln!(writer, "{rule}")?;
            }
        }
        Ok(())
    }

    /// Report a finished (or, on a dry run, planned) move
    pub fn moved(&self, transfer: &Transfer, dry_run: bool) {
        if self.quiet {
            return;
        }
        let marker = if dry_run { "~" } else { "✓" };
        println!(
            "{marker} {} -> {}",
            transfer.source.display(),
            transfer.target.display()
        );
    }

    /// Report a failure; shown even in quiet mode
    pub fn failed(&self, error: impl Display) {
        eprintln!("✗ {error}");
    }

    /// Progress and summary lines
    pub fn note(&self, message: impl Display) {
        if !self.quiet {
            println!("  {message}");
        }
    }
}

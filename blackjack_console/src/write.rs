use blackjack_lib::{SessionSummary, TableRules};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// A struct for collecting a finished session and the table it was played at into something that serializes to JSON
#[derive(Serialize)]
struct SessionReport<'a> {
    rules: &'a TableRules,
    seed: Option<u64>,
    summary: &'a SessionSummary,
}

/// A public function to take in `summary` and the `rules` it was played under and write them as JSON to a writer
pub fn write_summary(
    summary: &SessionSummary,
    rules: &TableRules,
    seed: Option<u64>,
    mut writer: impl Write,
) -> std::io::Result<()> {
    let report = SessionReport {
        rules,
        seed,
        summary,
    };
    serde_json::to_writer_pretty(&mut writer, &report)?;
    writeln!(writer)?;
    writer.flush()
}

/// Creates (or truncates) the file at `path` and writes the JSON summary to it.
pub fn write_summary_file<P: AsRef<Path>>(
    path: P,
    summary: &SessionSummary,
    rules: &TableRules,
    seed: Option<u64>,
) -> std::io::Result<()> {
    let file = File::create(path)?;
    write_summary(summary, rules, seed, BufWriter::new(file))
}

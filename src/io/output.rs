use crate::classify::StatsReport;
use crate::errors::Result;
use std::io::Write;

/// How a report is printed. Fixed per build through cargo features.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// `Label: count`, one per line
    Lines,
    /// One summary sentence
    Narrative,
    /// Tab-separated rows for pasting into a spreadsheet
    Table,
    /// Pretty-printed JSON of the whole report
    Json,
}

impl OutputFormat {
    /// The format selected when the binary was built.
    pub const fn build_default() -> Self {
        if cfg!(feature = "render-json") {
            OutputFormat::Json
        } else if cfg!(feature = "render-table") {
            OutputFormat::Table
        } else if cfg!(feature = "render-narrative") {
            OutputFormat::Narrative
        } else {
            OutputFormat::Lines
        }
    }
}

pub trait OutputWriter {
    fn write_report(&mut self, report: &StatsReport) -> Result<()>;
}

pub struct LinesWriter<W: Write> {
    writer: W,
}

impl<W: Write> LinesWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for LinesWriter<W> {
    fn write_report(&mut self, report: &StatsReport) -> Result<()> {
        for (label, value) in report.metrics() {
            writeln!(self.writer, "{label}: {value}")?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

pub struct NarrativeWriter<W: Write> {
    writer: W,
}

impl<W: Write> NarrativeWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for NarrativeWriter<W> {
    fn write_report(&mut self, report: &StatsReport) -> Result<()> {
        writeln!(self.writer, "{}", narrative_sentence(report))?;
        self.writer.flush()?;
        Ok(())
    }
}

fn narrative_sentence(report: &StatsReport) -> String {
    // "ctor out of capacity alerts accounted for 2, incidents for 1, ..."
    let clauses: Vec<String> = report
        .lines
        .iter()
        .enumerate()
        .map(|(i, l)| {
            let verb = if i == 0 { "accounted for" } else { "for" };
            format!("{} {verb} {}", narrative_label(&l.label), l.value)
        })
        .collect();

    let opening = format!(
        "Of the {} alerts paged to {}",
        report.total, report.policy_name
    );

    match clauses.as_slice() {
        [] => format!("{opening}."),
        [only] => format!("{opening}, {only}."),
        [first, second] => format!("{opening}, {first} and {second}."),
        [head @ .., last] => format!("{opening}, {}, and {last}.", head.join(", ")),
    }
}

fn narrative_label(label: &str) -> String {
    label
        .strip_prefix("Total ")
        .unwrap_or(label)
        .to_lowercase()
}

pub struct TableWriter<W: Write> {
    writer: W,
}

impl<W: Write> TableWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for TableWriter<W> {
    fn write_report(&mut self, report: &StatsReport) -> Result<()> {
        let mut table = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .from_writer(&mut self.writer);

        table
            .write_record(["Metric", "Count"])
            .map_err(std::io::Error::from)?;
        for (label, value) in report.metrics() {
            table
                .write_record([label, value.to_string().as_str()])
                .map_err(std::io::Error::from)?;
        }
        table.flush()?;
        Ok(())
    }
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_report(&mut self, report: &StatsReport) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, report).map_err(std::io::Error::from)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

pub fn create_writer<'a, W: Write + 'a>(
    format: OutputFormat,
    writer: W,
) -> Box<dyn OutputWriter + 'a> {
    match format {
        OutputFormat::Lines => Box::new(LinesWriter::new(writer)),
        OutputFormat::Narrative => Box::new(NarrativeWriter::new(writer)),
        OutputFormat::Table => Box::new(TableWriter::new(writer)),
        OutputFormat::Json => Box::new(JsonWriter::new(writer)),
    }
}

/// Render a report into a string, mostly for tests and callers that
/// post-process output.
pub fn render_to_string(report: &StatsReport, format: OutputFormat) -> Result<String> {
    let mut buffer = Vec::new();
    create_writer(format, &mut buffer).write_report(report)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

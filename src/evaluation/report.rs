use crate::classifiers::Prediction;
use crate::core::Label;
use crate::core::instance_header::InstanceHeader;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::File;
use std::io::{Error, Write};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    Json,
}

/// Outcome of one test record. `index` is the record's position in the
/// source dataset, so a holdout window starting at 4000 reports 4000 first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReportLine {
    pub index: usize,
    pub expected: Label,
    pub predicted: Prediction,
}

impl ReportLine {
    pub fn is_right(&self) -> bool {
        self.predicted == Prediction::Class(self.expected)
    }
}

/// Per-record verdicts of a holdout run plus the closing accuracy line.
#[derive(Debug, Clone)]
pub struct AccuracyReport {
    header: InstanceHeader,
    lines: Vec<ReportLine>,
    right: usize,
}

impl AccuracyReport {
    pub fn new(header: InstanceHeader) -> Self {
        Self {
            header,
            lines: Vec::new(),
            right: 0,
        }
    }

    pub fn record(&mut self, index: usize, expected: Label, predicted: Prediction) {
        let line = ReportLine {
            index,
            expected,
            predicted,
        };
        if line.is_right() {
            self.right += 1;
        }
        self.lines.push(line);
    }

    pub fn lines(&self) -> &[ReportLine] {
        &self.lines
    }

    pub fn total(&self) -> usize {
        self.lines.len()
    }

    pub fn right(&self) -> usize {
        self.right
    }

    pub fn wrong(&self) -> usize {
        self.total() - self.right
    }

    /// Percentage of right predictions; `0` for an empty report.
    pub fn accuracy_pct(&self) -> f64 {
        if self.lines.is_empty() {
            return 0.0;
        }
        self.right as f64 / self.total() as f64 * 100.0
    }

    pub fn render_line(&self, line: &ReportLine) -> String {
        if line.is_right() {
            format!(
                "{} is the correct prediction on {}",
                self.header.token_for_label(line.expected),
                line.index
            )
        } else {
            format!(
                "Wrong prediction on test {}: should be {}, but was {}",
                line.index,
                self.header.token_for_label(line.expected),
                line.predicted.describe(&self.header)
            )
        }
    }

    pub fn summary_line(&self) -> String {
        format!(
            "Out of {} predictions, {} are right, standing at a {}% rate of accuracy.",
            self.total(),
            self.right,
            trim_float(self.accuracy_pct())
        )
    }

    pub fn export<P: AsRef<Path>>(&self, path: P, fmt: ReportFormat) -> Result<(), Error> {
        self.export_at(path, fmt, Utc::now())
    }

    pub fn export_at<P: AsRef<Path>>(
        &self,
        path: P,
        fmt: ReportFormat,
        generated: DateTime<Utc>,
    ) -> Result<(), Error> {
        match fmt {
            ReportFormat::Text => self.export_text(path, generated),
            ReportFormat::Json => self.export_json(path, generated),
        }
    }

    fn export_text<P: AsRef<Path>>(&self, path: P, generated: DateTime<Utc>) -> Result<(), Error> {
        let mut w = File::create(path)?;
        writeln!(
            w,
            "# holdout on '{}', {}",
            self.header.relation_name(),
            generated.to_rfc3339()
        )?;
        for line in &self.lines {
            writeln!(w, "{}", self.render_line(line))?;
        }
        writeln!(w, "{}", self.summary_line())?;
        Ok(())
    }

    fn export_json<P: AsRef<Path>>(&self, path: P, generated: DateTime<Utc>) -> Result<(), Error> {
        let doc = serde_json::json!({
            "relation": self.header.relation_name(),
            "generated": generated.to_rfc3339(),
            "total": self.total(),
            "right": self.right,
            "accuracy_pct": self.accuracy_pct(),
            "lines": self.lines,
        });
        let mut w = File::create(path)?;
        serde_json::to_writer_pretty(&mut w, &doc)?;
        writeln!(w)?;
        Ok(())
    }
}

/// Up to four decimals, trailing zeros dropped: `100`, `99.875`, `33.3333`.
fn trim_float(x: f64) -> String {
    let s = format!("{x:.4}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    s.to_string()
}

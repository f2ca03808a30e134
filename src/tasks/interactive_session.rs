use crate::classifiers::Prediction;
use crate::classifiers::decision_tree::DecisionTree;
use crate::core::instance_header::InstanceHeader;
use crate::core::instances::Instance;
use crate::streams::{LineFormat, Stream, StreamError};
use crate::ui::cli::drivers::PromptDriver;
use anyhow::Result;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

const QUIT: &str = "quit";

/// How a dataset lookup judged a prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupVerdict {
    /// A record with the same values carries the predicted label.
    Confirmed,
    /// A record with the same values carries another label, or the
    /// prediction was a sentinel.
    Contradicted,
    NotFound,
}

impl Display for LookupVerdict {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            LookupVerdict::Confirmed => write!(f, "Prediction is correct."),
            LookupVerdict::Contradicted => write!(f, "Prediction is wrong."),
            LookupVerdict::NotFound => write!(f, "No match found."),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionTurn {
    pub input: String,
    pub prediction: Prediction,
    pub verdict: LookupVerdict,
}

/// Scans `dataset` from the start; the first record with the same attribute
/// values as `query` decides the verdict.
pub fn lookup(
    dataset: &mut dyn Stream,
    query: &dyn Instance,
    prediction: Prediction,
) -> Result<LookupVerdict, StreamError> {
    dataset.restart()?;
    while let Some(record) = dataset.next_instance()? {
        if !record.has_same_values_as(query) {
            continue;
        }
        return Ok(match (record.class_value(), prediction.label()) {
            (Some(actual), Some(predicted)) if actual == predicted => LookupVerdict::Confirmed,
            _ => LookupVerdict::Contradicted,
        });
    }
    Ok(LookupVerdict::NotFound)
}

/// Prompt loop: classify typed records and check them against the dataset.
pub struct InteractiveSession<'a> {
    model: &'a DecisionTree,
    dataset: &'a mut dyn Stream,
    format: LineFormat,
    header: Arc<InstanceHeader>,
}

impl<'a> InteractiveSession<'a> {
    /// Fails when `format` does not fit the model's record layout.
    pub fn new(
        model: &'a DecisionTree,
        dataset: &'a mut dyn Stream,
        format: LineFormat,
    ) -> Result<Self, StreamError> {
        let header = Arc::new(model.header().clone());
        format.validate(&header)?;
        Ok(Self {
            model,
            dataset,
            format,
            header,
        })
    }

    /// Classifies one typed record and looks it up. `turn` numbers errors.
    pub fn handle_line(&mut self, line: &str, turn: usize) -> Result<SessionTurn, StreamError> {
        let record = self.format.parse(&self.header, line.trim(), turn)?;
        let prediction = self.model.classify(&record);
        let verdict = lookup(&mut *self.dataset, &record, prediction)?;
        Ok(SessionTurn {
            input: line.trim().to_string(),
            prediction,
            verdict,
        })
    }

    /// Runs until the user types `quit`. Malformed records are reported
    /// and the prompt repeats.
    pub fn run<D: PromptDriver>(&mut self, driver: &D) -> Result<Vec<SessionTurn>> {
        let help = format!(
            "e.g. {} ; type {QUIT} to stop",
            self.example_line()
        );
        let mut turns = Vec::new();
        loop {
            let line = driver.ask_string("Record:", &help, "")?;
            if line.trim() == QUIT {
                break;
            }
            match self.handle_line(&line, turns.len() + 1) {
                Ok(turn) => {
                    println!(
                        "According to the tree, this record is {}.",
                        turn.prediction.describe(&self.header)
                    );
                    println!("{}", turn.verdict);
                    turns.push(turn);
                }
                Err(StreamError::Io(e)) => return Err(e.into()),
                Err(e) => eprintln!("✗ {e}"),
            }
        }
        Ok(turns)
    }

    fn example_line(&self) -> String {
        let mut tokens: Vec<String> = self
            .header
            .attributes
            .iter()
            .map(|a| a.value_at(0).unwrap_or("x").to_string())
            .collect();
        let at = self.format.class_index.min(tokens.len());
        tokens.insert(at, self.format.placeholder.clone());
        tokens.join(&self.format.delimiter.to_string())
    }
}

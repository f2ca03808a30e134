use crate::ui::cli::drivers::PromptDriver;
use crate::ui::cli::wizard::prompt_choice;
use crate::ui::types::choices::{DatasetChoice, UIChoice};
use schemars::{JsonSchema, Schema, schema_for};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use strum_macros::{Display, EnumDiscriminants, EnumIter, EnumMessage, EnumString, IntoStaticStr};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormatChoice {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TreeFormatChoice {
    #[default]
    Json,
    Dot,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct HoldoutParams {
    #[schemars(skip)]
    pub dataset: DatasetChoice,

    #[schemars(
        title = "Training Records",
        description = "Records at the start of the dataset used to build the tree",
        range(min = 1)
    )]
    pub train_size: u64,

    #[serde(default)]
    #[schemars(
        title = "Test Records",
        description = "Records after the training part to classify (None = the rest)"
    )]
    pub test_size: Option<u64>,

    #[serde(default)]
    #[schemars(
        title = "Shuffle Seed",
        description = "Shuffle the dataset in memory before splitting (None = file order)"
    )]
    pub shuffle_seed: Option<u64>,

    #[schemars(title = "Report Path", description = "Where to write the accuracy report")]
    pub report_path: String,

    #[serde(default)]
    #[schemars(title = "Report Format", description = "Plain text lines or a JSON document")]
    pub report_format: ReportFormatChoice,

    #[serde(default)]
    #[schemars(
        title = "Cache Records",
        description = "Rescan an in-memory copy instead of re-reading the file"
    )]
    pub cache_records: bool,

    #[serde(default)]
    #[schemars(title = "Verbose", description = "Print build progress")]
    pub verbose: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct InteractiveParams {
    #[schemars(skip)]
    pub dataset: DatasetChoice,

    #[serde(default)]
    #[schemars(
        title = "Training Records",
        description = "Build on the first N records only (None = all of them)"
    )]
    pub train_size: Option<u64>,

    #[serde(default)]
    #[schemars(
        title = "Cache Records",
        description = "Rescan an in-memory copy instead of re-reading the file"
    )]
    pub cache_records: bool,

    #[serde(default)]
    #[schemars(title = "Verbose", description = "Print build progress")]
    pub verbose: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ExportParams {
    #[schemars(skip)]
    pub dataset: DatasetChoice,

    #[schemars(title = "Output Path", description = "Where to write the tree")]
    pub output_path: String,

    #[serde(default)]
    #[schemars(title = "Format", description = "JSON model or Graphviz dot")]
    pub format: TreeFormatChoice,

    #[serde(default)]
    #[schemars(
        title = "Cache Records",
        description = "Rescan an in-memory copy instead of re-reading the file"
    )]
    pub cache_records: bool,

    #[serde(default)]
    #[schemars(title = "Verbose", description = "Print build progress")]
    pub verbose: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, EnumDiscriminants, PartialEq)]
#[serde(tag = "type", content = "params", rename_all = "kebab-case")]
#[strum_discriminants(name(TaskKind))]
#[strum_discriminants(derive(EnumIter, EnumString, Display, IntoStaticStr, EnumMessage))]
#[strum_discriminants(strum(serialize_all = "kebab-case"))]
pub enum TaskChoice {
    #[strum_discriminants(strum(
        message = "Evaluate Holdout",
        detailed_message = "Build on the first records, score the next ones, write a report."
    ))]
    EvaluateHoldout(HoldoutParams),

    #[strum_discriminants(strum(
        message = "Interactive",
        detailed_message = "Type records, get predictions checked against the dataset."
    ))]
    Interactive(InteractiveParams),

    #[strum_discriminants(strum(
        message = "Export Tree",
        detailed_message = "Build the tree and save it as JSON or Graphviz dot."
    ))]
    ExportTree(ExportParams),
}

impl UIChoice for TaskChoice {
    type Kind = TaskKind;

    fn schema() -> Schema {
        schema_for!(TaskChoice)
    }

    fn prompt_label() -> &'static str {
        "Choose a task:"
    }

    fn default_params(kind: Self::Kind) -> Value {
        match kind {
            TaskKind::EvaluateHoldout => json!({
                "train_size": 4000,
                "test_size": 4000,
                "shuffle_seed": null,
                "report_path": "ACCURACY",
                "report_format": "text",
                "cache_records": false,
                "verbose": false,
            }),
            TaskKind::Interactive => json!({
                "train_size": null,
                "cache_records": false,
                "verbose": false,
            }),
            TaskKind::ExportTree => json!({
                "output_path": "tree.json",
                "format": "json",
                "cache_records": false,
                "verbose": false,
            }),
        }
    }

    fn subprompts<D: PromptDriver>(
        driver: &D,
        _kind: Self::Kind,
    ) -> anyhow::Result<Option<Map<String, Value>>> {
        let dataset = prompt_choice::<DatasetChoice, _>(driver)?;
        let mut m = Map::new();
        m.insert("dataset".into(), serde_json::to_value(dataset)?);
        Ok(Some(m))
    }

    fn from_parts(kind: Self::Kind, params: Value) -> anyhow::Result<Self> {
        Ok(match kind {
            TaskKind::EvaluateHoldout => TaskChoice::EvaluateHoldout(serde_json::from_value(params)?),
            TaskKind::Interactive => TaskChoice::Interactive(serde_json::from_value(params)?),
            TaskKind::ExportTree => TaskChoice::ExportTree(serde_json::from_value(params)?),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_file_round_trips() {
        let text = r#"{
            "type": "evaluate-holdout",
            "params": {
                "dataset": { "type": "delimited-file", "params": { "path": "m.data" } },
                "train_size": 4000,
                "test_size": 4000,
                "report_path": "ACCURACY"
            }
        }"#;
        let choice: TaskChoice = serde_json::from_str(text).unwrap();
        let TaskChoice::EvaluateHoldout(p) = &choice else {
            panic!("wrong task");
        };
        assert_eq!(p.train_size, 4000);
        assert_eq!(p.report_format, ReportFormatChoice::Text);
        assert_eq!(p.shuffle_seed, None);

        let again: TaskChoice =
            serde_json::from_value(serde_json::to_value(&choice).unwrap()).unwrap();
        assert_eq!(again, choice);
    }

    #[test]
    fn export_format_is_lowercase() {
        let v = serde_json::to_value(TreeFormatChoice::Dot).unwrap();
        assert_eq!(v, "dot");
    }
}

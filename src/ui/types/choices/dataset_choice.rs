use crate::ui::types::choices::UIChoice;
use schemars::{JsonSchema, Schema, schema_for};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::PathBuf;
use strum_macros::{Display, EnumDiscriminants, EnumIter, EnumMessage, EnumString, IntoStaticStr};

fn default_delimiter() -> char {
    ','
}
fn default_positive() -> String {
    "e".into()
}
fn default_negative() -> String {
    "p".into()
}
fn default_placeholder() -> String {
    "?".into()
}
fn default_num_attributes() -> usize {
    22
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct DelimitedFileParameters {
    #[schemars(
        with = "String",
        title = "Dataset Path",
        description = "Path to a delimited text file, one record per line",
        extend("format" = "path", "x-file" = true, "x-must-exist" = true)
    )]
    pub path: PathBuf,

    #[serde(default = "default_num_attributes")]
    #[schemars(
        title = "Attributes",
        description = "Number of attribute columns, class column excluded",
        range(min = 1),
        default = "default_num_attributes"
    )]
    pub num_attributes: usize,

    #[serde(default)]
    #[schemars(
        title = "Class Index",
        description = "Zero-based column holding the class token",
        range(min = 0)
    )]
    pub class_index: usize,

    #[serde(default = "default_delimiter")]
    #[schemars(
        title = "Delimiter",
        description = "Single character separating columns",
        default = "default_delimiter"
    )]
    pub delimiter: char,

    #[serde(default = "default_positive")]
    #[schemars(
        title = "Positive Label",
        description = "Class token of the positive label",
        default = "default_positive"
    )]
    pub positive_label: String,

    #[serde(default = "default_negative")]
    #[schemars(
        title = "Negative Label",
        description = "Class token of the negative label",
        default = "default_negative"
    )]
    pub negative_label: String,

    #[serde(default = "default_placeholder")]
    #[schemars(
        title = "Placeholder",
        description = "Class token marking an unlabelled record",
        default = "default_placeholder"
    )]
    pub placeholder: String,

    #[serde(default)]
    #[schemars(
        title = "Offset",
        description = "Records to skip at the start of the file"
    )]
    pub offset: usize,

    #[serde(default)]
    #[schemars(
        title = "Limit",
        description = "Read at most this many records (None = to the end)"
    )]
    pub limit: Option<usize>,
}

impl Default for DelimitedFileParameters {
    fn default() -> Self {
        Self {
            path: PathBuf::new(),
            num_attributes: default_num_attributes(),
            class_index: 0,
            delimiter: default_delimiter(),
            positive_label: default_positive(),
            negative_label: default_negative(),
            placeholder: default_placeholder(),
            offset: 0,
            limit: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, EnumDiscriminants, PartialEq)]
#[serde(tag = "type", content = "params", rename_all = "kebab-case")]
#[strum_discriminants(name(DatasetKind))]
#[strum_discriminants(derive(EnumIter, EnumString, Display, IntoStaticStr, EnumMessage))]
#[strum_discriminants(strum(serialize_all = "kebab-case"))]
pub enum DatasetChoice {
    #[strum_discriminants(strum(
        message = "Delimited File",
        detailed_message = "Headerless text file, one labelled record per line."
    ))]
    DelimitedFile(DelimitedFileParameters),
}

impl UIChoice for DatasetChoice {
    type Kind = DatasetKind;

    fn schema() -> Schema {
        schema_for!(DatasetChoice)
    }

    fn prompt_label() -> &'static str {
        "Choose a dataset:"
    }

    fn default_params(kind: Self::Kind) -> Value {
        match kind {
            DatasetKind::DelimitedFile => {
                serde_json::to_value(DelimitedFileParameters::default()).unwrap_or(Value::Null)
            }
        }
    }
}

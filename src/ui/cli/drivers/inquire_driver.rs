use crate::ui::cli::drivers::PromptDriver;
use anyhow::Result;
use inquire::{Confirm, CustomType, Select, Text, validator::Validation};

/// Terminal prompts.
pub struct InquireDriver;

impl PromptDriver for InquireDriver {
    fn ask_bool(&self, title: &str, help: &str, default: bool) -> Result<bool> {
        Ok(Confirm::new(title)
            .with_default(default)
            .with_help_message(help)
            .prompt()?)
    }

    fn ask_string(&self, title: &str, help: &str, default: &str) -> Result<String> {
        Ok(Text::new(title)
            .with_initial_value(default)
            .with_help_message(help)
            .prompt()?)
    }

    fn ask_u64(
        &self,
        title: &str,
        help: &str,
        default: u64,
        min: Option<u64>,
        max: Option<u64>,
    ) -> Result<u64> {
        let mut q = CustomType::<u64>::new(title)
            .with_default(default)
            .with_help_message(help);

        if min.is_some() || max.is_some() {
            q = q.with_validator(move |x: &u64| {
                let message = match (min, max) {
                    (Some(lo), Some(hi)) if *x < lo || *x > hi => {
                        Some(format!("Must be between {lo} and {hi}"))
                    }
                    (Some(lo), None) if *x < lo => Some(format!("Must be ≥ {lo}")),
                    (None, Some(hi)) if *x > hi => Some(format!("Must be ≤ {hi}")),
                    _ => None,
                };
                Ok(match message {
                    Some(m) => Validation::Invalid(m.into()),
                    None => Validation::Valid,
                })
            });
        }

        Ok(q.prompt()?)
    }

    fn ask_select(
        &self,
        title: &str,
        help: &str,
        options: &[String],
        default: usize,
    ) -> Result<usize> {
        let mut q = Select::new(title, options.to_vec()).with_starting_cursor(default);
        if !help.is_empty() {
            q = q.with_help_message(help);
        }
        Ok(q.raw_prompt()?.index)
    }
}

use crate::ui::cli::drivers::PromptDriver;
use anyhow::{Context, Result, bail};
use std::cell::RefCell;
use std::collections::VecDeque;

/// Answers prompts from a fixed script; an empty answer takes the default.
#[derive(Default)]
pub struct ScriptedDriver {
    answers: RefCell<VecDeque<String>>,
    asked: RefCell<Vec<String>>,
}

impl ScriptedDriver {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: RefCell::new(answers.into_iter().map(Into::into).collect()),
            asked: RefCell::new(Vec::new()),
        }
    }

    /// Titles of every prompt shown so far.
    pub fn asked(&self) -> Vec<String> {
        self.asked.borrow().clone()
    }

    pub fn remaining(&self) -> usize {
        self.answers.borrow().len()
    }

    fn next(&self, title: &str) -> Result<String> {
        self.asked.borrow_mut().push(title.to_string());
        match self.answers.borrow_mut().pop_front() {
            Some(answer) => Ok(answer),
            None => bail!("script exhausted at prompt '{title}'"),
        }
    }
}

impl PromptDriver for ScriptedDriver {
    fn ask_bool(&self, title: &str, _help: &str, default: bool) -> Result<bool> {
        let answer = self.next(title)?;
        Ok(match answer.trim() {
            "" => default,
            "y" | "yes" | "true" => true,
            "n" | "no" | "false" => false,
            other => bail!("not a yes/no answer: {other}"),
        })
    }

    fn ask_string(&self, title: &str, _help: &str, default: &str) -> Result<String> {
        let answer = self.next(title)?;
        Ok(if answer.is_empty() {
            default.to_string()
        } else {
            answer
        })
    }

    fn ask_u64(
        &self,
        title: &str,
        _help: &str,
        default: u64,
        min: Option<u64>,
        max: Option<u64>,
    ) -> Result<u64> {
        let answer = self.next(title)?;
        let n = if answer.trim().is_empty() {
            default
        } else {
            answer
                .trim()
                .parse()
                .with_context(|| format!("invalid integer for {title}"))?
        };
        if min.is_some_and(|lo| n < lo) || max.is_some_and(|hi| n > hi) {
            bail!("{n} is out of range for {title}");
        }
        Ok(n)
    }

    fn ask_select(
        &self,
        title: &str,
        _help: &str,
        options: &[String],
        default: usize,
    ) -> Result<usize> {
        let answer = self.next(title)?;
        if answer.is_empty() {
            return Ok(default);
        }
        options
            .iter()
            .position(|o| *o == answer || o.starts_with(&answer))
            .with_context(|| format!("'{answer}' is not an option of {title}"))
    }
}

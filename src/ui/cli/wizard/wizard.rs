use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use strum::{EnumMessage, IntoEnumIterator};

use crate::ui::cli::drivers::PromptDriver;
use crate::ui::types::choices::{FieldKind, FieldSpec, UIChoice, schema_for, specs_for_kind};

const DIM_ITALIC: &str = "\x1b[2m\x1b[3m";
const RESET: &str = "\x1b[0m";

fn kind_items<K>() -> Vec<(K, String)>
where
    K: Copy + Into<&'static str> + EnumMessage + IntoEnumIterator,
{
    K::iter()
        .map(|k| {
            let label = k.get_message().unwrap_or_else(|| k.into());
            let desc = k.get_detailed_message().unwrap_or("");
            let text = if desc.is_empty() {
                label.to_string()
            } else {
                format!("{label}  {DIM_ITALIC}{desc}{RESET}")
            };
            (k, text)
        })
        .collect()
}

/// Walks the user through one choice enum: pick a kind, answer one prompt
/// per schema field, then any nested choices the kind asks for.
pub fn prompt_choice<C: UIChoice, D: PromptDriver>(driver: &D) -> Result<C> {
    let (kinds, texts): (Vec<C::Kind>, Vec<String>) = kind_items::<C::Kind>().into_iter().unzip();
    let picked = driver.ask_select(
        C::prompt_label(),
        C::prompt_help().unwrap_or(""),
        &texts,
        0,
    )?;
    let choice_kind = *kinds.get(picked).context("selection out of range")?;

    let key: &'static str = choice_kind.into();
    let schema = schema_for::<C>();
    let specs = specs_for_kind(&schema, key)?;

    let defaults = C::default_params(choice_kind);

    let mut params = Map::new();
    for s in specs {
        let init = s.default.clone().or_else(|| defaults.get(&s.name).cloned());
        if let Some(val) = prompt_field(driver, &s, init)? {
            params.insert(s.name.clone(), val);
        }
    }

    if let Some(extra) = C::subprompts(driver, choice_kind)? {
        params.extend(extra);
    }
    C::from_parts(choice_kind, Value::Object(params))
}

fn prompt_field<D: PromptDriver>(
    driver: &D,
    s: &FieldSpec,
    init: Option<Value>,
) -> Result<Option<Value>> {
    let help = s.description.as_deref().unwrap_or("");

    let is_optional_integer =
        !s.required && s.kind == FieldKind::Integer && matches!(init, None | Some(Value::Null));
    if is_optional_integer {
        let answer = driver.ask_string(&s.title, &format!("{help}\n(leave blank for none)"), "")?;
        let answer = answer.trim();
        if answer.is_empty() {
            return Ok(None);
        }
        let n: u64 = answer
            .parse()
            .with_context(|| format!("invalid integer for {}", s.title))?;
        return Ok(Some(Value::from(n)));
    }

    Ok(Some(match s.kind {
        FieldKind::Boolean => {
            let def = init.and_then(|v| v.as_bool()).unwrap_or(false);
            Value::Bool(driver.ask_bool(&s.title, help, def)?)
        }
        FieldKind::String if !s.options.is_empty() => {
            let def = init
                .as_ref()
                .and_then(|v| v.as_str())
                .and_then(|d| s.options.iter().position(|o| o == d))
                .unwrap_or(0);
            let idx = driver.ask_select(&s.title, help, &s.options, def)?;
            let picked = s.options.get(idx).context("selection out of range")?;
            Value::String(picked.clone())
        }
        FieldKind::String => {
            let def = init
                .and_then(|v| v.as_str().map(|s| s.to_string()))
                .unwrap_or_default();
            let answered = if s.name == "path" {
                let more_help = if help.is_empty() {
                    "Please type the path of an existing file"
                } else {
                    help
                };
                let pb = prompt_path_until_ok(driver, &s.title, more_help, &def, true, true, &[])?;
                pb.to_string_lossy().into_owned()
            } else {
                driver.ask_string(&s.title, help, &def)?
            };
            Value::String(answered)
        }
        FieldKind::Integer => {
            let def = init.and_then(|v| v.as_u64()).unwrap_or(0);
            Value::from(driver.ask_u64(&s.title, help, def, s.min, s.max)?)
        }
    }))
}

fn validate_path_str(
    input: &str,
    must_exist: bool,
    must_be_file: bool,
    allowed_exts: &[&str],
) -> Result<(), String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err("Path cannot be empty".into());
    }
    let p = Path::new(trimmed);

    if must_exist && !p.exists() {
        return Err(format!("Path does not exist: {}", p.display()));
    }
    if must_be_file && p.exists() && !p.is_file() {
        return Err("Expected a file path, not a directory".into());
    }
    if !allowed_exts.is_empty() {
        match p.extension().and_then(|e| e.to_str()) {
            Some(ext) if allowed_exts.iter().any(|e| e.eq_ignore_ascii_case(ext)) => {}
            _ => return Err(format!("Expected a .{} file", allowed_exts.join(" / ."))),
        }
    }
    Ok(())
}

fn prompt_path_until_ok<D: PromptDriver>(
    driver: &D,
    title: &str,
    help: &str,
    default: &str,
    must_exist: bool,
    must_be_file: bool,
    allowed_exts: &[&str],
) -> Result<PathBuf> {
    loop {
        let answer = driver.ask_string(title, help, default)?;
        match validate_path_str(&answer, must_exist, must_be_file, allowed_exts) {
            Ok(()) => return Ok(PathBuf::from(answer.trim())),
            Err(msg) => {
                eprintln!("✗ {}", msg);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedDriver;
    use crate::ui::types::choices::{DatasetChoice, TaskChoice, TreeFormatChoice};
    use tempfile::NamedTempFile;

    #[test]
    fn path_validation() {
        let tf = NamedTempFile::new().unwrap();
        let p = tf.path().to_string_lossy().into_owned();
        assert!(validate_path_str(&p, true, true, &[]).is_ok());
        assert!(validate_path_str("  ", true, true, &[]).is_err());
        assert!(validate_path_str("/definitely/not/here", true, true, &[]).is_err());
        assert!(validate_path_str(&p, true, true, &["data"]).is_err());
    }

    #[test]
    fn export_task_through_the_wizard() {
        let tf = NamedTempFile::new().unwrap();
        let data = tf.path().to_string_lossy().into_owned();

        // Prompts follow schema property order; blank answers take defaults.
        let driver = ScriptedDriver::new([
            "Export Tree".to_string(),
            "out.dot".into(),
            "dot".into(),
            "".into(),
            "y".into(),
            "Delimited File".into(),
            "/not/a/file".into(),
            data.clone(),
            "3".into(),
            "".into(),
            "".into(),
            "".into(),
            "".into(),
            "".into(),
            "".into(),
            "".into(),
        ]);
        let choice = prompt_choice::<TaskChoice, _>(&driver).unwrap();
        assert_eq!(driver.remaining(), 0);

        let TaskChoice::ExportTree(p) = choice else {
            panic!("wrong task");
        };
        assert_eq!(p.output_path, "out.dot");
        assert_eq!(p.format, TreeFormatChoice::Dot);
        assert!(!p.cache_records);
        assert!(p.verbose);

        let DatasetChoice::DelimitedFile(d) = p.dataset;
        assert_eq!(d.path.to_string_lossy(), data);
        assert_eq!(d.num_attributes, 3);
        assert_eq!(d.delimiter, ',');
        assert_eq!(d.limit, None);
    }
}

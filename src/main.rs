use anyhow::Result;
use arbor::ui::cli::drivers::InquireDriver;
use arbor::ui::cli::wizard::prompt_choice;
use arbor::ui::cli::{execute_task, load_task};
use arbor::ui::types::choices::TaskChoice;
use std::process::ExitCode;

fn run() -> Result<()> {
    let driver = InquireDriver;
    let choice = match std::env::args().nth(1) {
        Some(path) => load_task(path)?,
        None => prompt_choice::<TaskChoice, _>(&driver)?,
    };
    execute_task(choice, &driver)
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

use crate::classifiers::decision_tree::{DecisionTree, TreeOptions};
use crate::evaluation::{
    BasicClassificationEvaluator, BasicEstimator, PerformanceEvaluator, ReportFormat,
};
use crate::streams::Stream;
use crate::tasks::{ExportFormat, HoldoutEvaluator, InteractiveSession, export_tree, shuffled_split};
use crate::ui::cli::drivers::PromptDriver;
use crate::ui::types::build::{build_stream, build_window, line_format};
use crate::ui::types::choices::{
    DatasetChoice, ExportParams, HoldoutParams, InteractiveParams, ReportFormatChoice, TaskChoice,
    TreeFormatChoice,
};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Reads a task configuration written as JSON.
pub fn load_task<P: AsRef<Path>>(path: P) -> Result<TaskChoice> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .with_context(|| format!("cannot read config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("invalid config {}", path.display()))
}

pub fn execute_task<D: PromptDriver>(choice: TaskChoice, driver: &D) -> Result<()> {
    match choice {
        TaskChoice::EvaluateHoldout(p) => run_holdout(p),
        TaskChoice::Interactive(p) => run_interactive(p, driver),
        TaskChoice::ExportTree(p) => run_export(p),
    }
}

fn dataset_offset(choice: &DatasetChoice) -> usize {
    match choice {
        DatasetChoice::DelimitedFile(p) => p.offset,
    }
}

fn run_holdout(p: HoldoutParams) -> Result<()> {
    let options = TreeOptions {
        cache_records: p.cache_records,
        verbose: p.verbose,
    };
    let train_size = p.train_size as usize;
    let test_size = p.test_size.map(|n| n as usize);

    let (train, test): (Box<dyn Stream>, Box<dyn Stream>) = match p.shuffle_seed {
        Some(seed) => {
            let mut all = build_stream(&p.dataset)?;
            let (train, test) = shuffled_split(&mut all, train_size, test_size, Some(seed))?;
            (Box::new(train), Box::new(test))
        }
        None => (
            Box::new(build_window(&p.dataset, 0, Some(train_size))?),
            Box::new(build_window(&p.dataset, train_size, test_size)?),
        ),
    };
    let first_test_index = dataset_offset(&p.dataset) + train_size;

    println!("Building the tree on {train_size} records...");
    let evaluator: Box<dyn PerformanceEvaluator> =
        Box::new(BasicClassificationEvaluator::<BasicEstimator>::new());
    let mut holdout = HoldoutEvaluator::new(train, test, evaluator, options, first_test_index);
    let report = holdout.run().context("holdout evaluation failed")?;

    let fmt = match p.report_format {
        ReportFormatChoice::Text => ReportFormat::Text,
        ReportFormatChoice::Json => ReportFormat::Json,
    };
    report
        .export(&p.report_path, fmt)
        .with_context(|| format!("cannot write report {}", p.report_path))?;
    println!("{}", report.summary_line());
    println!("Report written to {}", p.report_path);

    for m in holdout.evaluator().performance() {
        println!("  {:<14} {:.4}", m.name, m.value);
    }
    Ok(())
}

fn run_interactive<D: PromptDriver>(p: InteractiveParams, driver: &D) -> Result<()> {
    let options = TreeOptions {
        cache_records: p.cache_records,
        verbose: p.verbose,
    };
    let mut train = build_window(&p.dataset, 0, p.train_size.map(|n| n as usize))?;
    let tree = DecisionTree::build_with(&mut train, options).context("tree build failed")?;
    println!(
        "Tree ready: {} nodes, depth {}.",
        tree.node_count(),
        tree.depth()
    );
    println!("Type a record to classify it and check it against the dataset.");

    let mut dataset = build_stream(&p.dataset)?;
    let format = line_format(&p.dataset)?;
    let turns = InteractiveSession::new(&tree, &mut dataset, format)?.run(driver)?;
    println!("{} record(s) checked.", turns.len());
    Ok(())
}

fn run_export(p: ExportParams) -> Result<()> {
    let options = TreeOptions {
        cache_records: p.cache_records,
        verbose: p.verbose,
    };
    let mut stream = build_stream(&p.dataset)?;
    let tree = DecisionTree::build_with(&mut stream, options).context("tree build failed")?;
    let fmt = match p.format {
        TreeFormatChoice::Json => ExportFormat::Json,
        TreeFormatChoice::Dot => ExportFormat::Dot,
    };
    export_tree(&tree, &p.output_path, fmt)
        .with_context(|| format!("cannot write {}", p.output_path))?;
    println!(
        "Wrote {} ({} nodes, depth {}).",
        p.output_path,
        tree.node_count(),
        tree.depth()
    );
    if p.verbose {
        for (path, prediction) in tree.leaf_paths() {
            println!(
                "  {} -> {}",
                path.describe(tree.header()),
                prediction.describe(tree.header())
            );
        }
    }
    Ok(())
}

//! Eval command - run labeled cases and print metrics

use crate::config::ProjectConfig;
use crate::eval::{load_cases, run_evaluation, EvalReport};
use crate::pipeline::RuleBasedModel;
use anyhow::Result;
use console::style;
use std::path::Path;

pub(super) fn run(config: &ProjectConfig, cases_path: &Path, json: bool) -> Result<()> {
    let cases = load_cases(cases_path)?;
    let model = RuleBasedModel::new().with_weights(config.scoring.weights);
    let report = run_evaluation(&model, &cases)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

fn print_report(report: &EvalReport) {
    println!("\n{}\n", style("Evaluation").bold());
    println!("  Cases:               {}", report.n);
    println!("  Risk level accuracy: {:.3}", report.risk_level_accuracy);
    println!("  Category precision:  {:.3}", report.category_precision);
    println!("  Category recall:     {:.3}", report.category_recall);
    println!("  Category F1:         {:.3}", report.category_f1);

    if report.mismatches.is_empty() {
        println!("\n{} No mismatches", style("✓").green());
        return;
    }

    println!(
        "\n{} {} mismatches",
        style("✗").red(),
        report.mismatches.len()
    );
    for m in &report.mismatches {
        println!(
            "  {} {}  level {} (expected {})  categories [{}] (expected [{}])  {}",
            style(&m.id).bold(),
            m.title,
            m.pred_risk_level,
            m.exp_risk_level,
            m.pred_categories.join(", "),
            m.exp_categories.join(", "),
            style(&m.run_id).dim()
        );
    }
}

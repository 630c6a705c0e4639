//! Text (terminal) reporter with colors and formatting

use crate::models::{AnalysisResult, Severity};
use anyhow::Result;

/// Severity colors
fn severity_color(severity: &Severity) -> &'static str {
    match severity {
        Severity::Critical => "\x1b[31m", // Red
        Severity::High => "\x1b[91m",     // Light red
        Severity::Medium => "\x1b[33m",   // Yellow
        Severity::Low => "\x1b[34m",      // Blue
    }
}

/// Reset ANSI color
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

/// Severity tag
fn severity_tag(severity: &Severity) -> &'static str {
    match severity {
        Severity::Critical => "[C]",
        Severity::High => "[H]",
        Severity::Medium => "[M]",
        Severity::Low => "[L]",
    }
}

/// Render a result as formatted terminal output
pub fn render(result: &AnalysisResult) -> Result<String> {
    let mut out = String::new();
    let level = result.summary.risk_level;
    let level_c = severity_color(&level);

    // Header
    out.push_str(&format!("\n{BOLD}Contract Risk Analysis{RESET}  {DIM}{}{RESET}\n", result.run_id));
    out.push_str(&format!(
        "{DIM}──────────────────────────────────────{RESET}\n"
    ));
    out.push_str(&format!(
        "{BOLD}{}{RESET}  {DIM}({}, {} chars){RESET}\n",
        result.contract.title, result.contract.source_type, result.contract.text_length
    ));
    out.push_str(&format!(
        "Score: {BOLD}{}/100{RESET}  Level: {level_c}{BOLD}{}{RESET}  Findings: {}\n\n",
        result.summary.overall_risk_score,
        level,
        result.findings.len()
    ));

    // Findings
    out.push_str(&format!("{BOLD}FINDINGS{RESET}\n"));
    for finding in &result.findings {
        let sev_c = severity_color(&finding.severity());
        out.push_str(&format!(
            "  {sev_c}{}{RESET} {BOLD}{}{RESET} {} {DIM}(confidence {:.2}){RESET}\n",
            severity_tag(&finding.severity()),
            finding.finding_id(),
            finding.category(),
            finding.confidence().value()
        ));
        out.push_str(&format!("      {}\n", finding.risk_statement()));
        for ev in finding.evidence() {
            out.push_str(&format!(
                "      {DIM}{}:{RESET} \"{}\"\n",
                ev.clause_ref, ev.snippet
            ));
        }
        out.push_str(&format!("      → {}\n", finding.recommendation()));
        if let Some(redline) = finding.proposed_redline() {
            out.push_str(&format!("      {DIM}Redline:{RESET} {}\n", redline));
        }
    }
    out.push('\n');

    // Scoring breakdown
    let scoring = &result.scoring;
    out.push_str(&format!(
        "{BOLD}SCORING{RESET} {DIM}{}{RESET}\n",
        scoring.method
    ));
    for item in &scoring.items {
        out.push_str(&format!(
            "  {:<8} {:<9} {:>3} × {:.2} = {:>6.2}\n",
            item.finding_id, item.severity, item.weight, item.confidence, item.points
        ));
    }
    out.push_str(&format!(
        "  {DIM}total {:.2} / 150 → {}{RESET}\n",
        scoring.total_points, scoring.normalized_score_0_100
    ));
    let weights = Severity::ALL
        .iter()
        .map(|s| format!("{}={}", s, scoring.weights.weight(*s)))
        .collect::<Vec<_>>()
        .join(" ");
    out.push_str(&format!("  {DIM}weights {}{RESET}\n\n", weights));

    // Features
    out.push_str(&format!(
        "{BOLD}FEATURES{RESET} {DIM}v{}{RESET}\n",
        result.features.version
    ));
    for feature in &result.features.features {
        let flagged = feature.value().as_bool() == Some(true);
        let (c, r) = if flagged { (BOLD, RESET) } else { ("", "") };
        out.push_str(&format!(
            "  {c}{} = {}{r} {DIM}({}){RESET}\n",
            feature.name(),
            feature.value(),
            feature.dtype().as_str()
        ));
    }
    out.push('\n');

    // Audit trail
    out.push_str(&format!("{BOLD}AUDIT{RESET}\n"));
    for event in &result.audit {
        let details = event
            .details
            .as_ref()
            .map(|d| d.to_string())
            .unwrap_or_default();
        out.push_str(&format!(
            "  {DIM}{}{RESET} {:<20} {}\n",
            event.ts, event.event, details
        ));
    }

    Ok(out)
}

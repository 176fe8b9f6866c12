//! Report and verdict rendering.

use console::style;
use spotaudit_analysis::AuditReport;
use spotaudit_core::models::{Issue, LocationVerdict, Severity};
use std::collections::BTreeMap;
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct KindRow {
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "Issues")]
    count: usize,
    #[tabled(rename = "Severity")]
    severity: String,
}

pub fn render_report(report: &AuditReport) {
    println!("{}", style("Coordinate audit").bold());
    println!("Records scanned: {}", report.records_scanned);
    println!();

    if report.is_clean() {
        println!("{}", style("No issues found").green().bold());
        return;
    }

    println!("{}", Table::new(summary_rows(report)));
    println!();

    for issue in &report.issues {
        render_issue(issue);
    }

    println!();
    println!(
        "{} issues: {} structural, {} advisory",
        style(report.issues.len()).bold(),
        report.structural_count(),
        report.advisory_count()
    );
}

fn summary_rows(report: &AuditReport) -> Vec<KindRow> {
    let mut counts: BTreeMap<&'static str, (usize, Severity)> = BTreeMap::new();
    for issue in &report.issues {
        counts.entry(issue.kind.label()).or_insert((0, issue.severity)).0 += 1;
    }

    counts
        .into_iter()
        .map(|(label, (count, severity))| KindRow {
            kind: label.to_string(),
            count,
            severity: format!("{:?}", severity).to_lowercase(),
        })
        .collect()
}

fn render_issue(issue: &Issue) {
    let marker = match issue.severity {
        Severity::Structural => style("✗").red().bold(),
        Severity::Advisory => style("!").yellow().bold(),
    };
    println!("{} [{}] {}", marker, issue.kind.label(), issue.message);
    for record in &issue.records {
        println!("    {}", record);
    }
}

pub fn render_verdict(verdict: &LocationVerdict) {
    if verdict.is_valid {
        println!("{}", style("Coordinate verified").green().bold());
    } else {
        println!("{}", style("Coordinate rejected").red().bold());
    }

    if !verdict.place_name.is_empty() {
        println!("Place: {} ({})", verdict.place_name, verdict.place_type);
    }
    if verdict.is_valid {
        let water = if verdict.is_near_water {
            style("yes").green().to_string()
        } else {
            style("uncertain").yellow().to_string()
        };
        println!("Near water: {}", water);
    }
    for warning in &verdict.warnings {
        println!("{} {}", style("!").yellow().bold(), warning);
    }
    if !verdict.details.is_empty() {
        println!("{}", style(&verdict.details).dim());
    }
}

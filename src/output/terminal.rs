// Colored terminal output for flagged comment clusters.

use std::collections::BTreeSet;

use colored::Colorize;

use crate::detect::DuplicateReport;

/// Display the flagged clusters, or the success state when none were found.
pub fn display_duplicate_report(report: &DuplicateReport) {
    if report.is_empty() {
        println!("\n{}", "No suspicious behavior detected.".green());
        return;
    }

    println!(
        "\n{}",
        format!("=== Suspicious comment clusters ({}) ===", report.len()).bold()
    );

    for (i, (text, authors)) in report.iter().enumerate() {
        let preview = super::truncate_chars(text, 120);
        let joined = authors
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");

        println!("\n  {}. \"{}\"", i + 1, preview);
        println!("     {} {}", "Posted by:".dimmed(), joined.yellow());
    }

    let flagged_accounts: BTreeSet<&String> = report.values().flatten().collect();
    println!(
        "\n  {} {} distinct account(s) across {} cluster(s)",
        "!".red().bold(),
        flagged_accounts.len(),
        report.len()
    );
}

/// One-line run summary printed after detection.
pub fn display_run_summary(comments_analyzed: usize, flagged_clusters: usize) {
    println!("\n{}", "Analysis complete.".bold());
    println!("  Comments analyzed: {comments_analyzed}");
    println!("  Flagged clusters:  {flagged_clusters}");
}

//! Console output formatter for council results

use colored::Colorize;
use council_domain::CouncilOutcome;

/// Formats council outcomes for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete council outcome
    pub fn format(outcome: &CouncilOutcome) -> String {
        let mut output = String::new();

        // Header
        output.push_str(&Self::header("AI Council Results"));
        output.push('\n');

        output.push_str(&format!("{} {}\n\n", "Query:".cyan().bold(), outcome.query));
        output.push_str(&format!(
            "{} {}\n\n",
            "Panel:".cyan().bold(),
            outcome.panel.join(", ")
        ));

        // Phase 1: Candidate responses
        output.push_str(&Self::section_header("Candidate Responses"));
        for response in &outcome.responses {
            output.push_str(&format!(
                "\n{}\n{}\n",
                format!("-- {} ({}) --", response.response_id, response.model_id)
                    .yellow()
                    .bold(),
                response.text
            ));
        }

        // Consensus table
        output.push_str(&Self::section_header("Consensus"));
        for (response_id, average) in &outcome.averages {
            let marker = if *response_id == outcome.winner {
                "*".green().bold().to_string()
            } else {
                " ".to_string()
            };
            output.push_str(&format!("  {} {}  {:.3}\n", marker, response_id, average));
        }

        // Audit summary
        output.push_str(&Self::section_header("Audit"));
        match &outcome.audit {
            Some(report) => {
                if report.flags.is_empty() {
                    output.push_str("  No anomalies flagged\n");
                }
                for flag in &report.flags {
                    output.push_str(&format!(
                        "  {} {} [{}]: {}\n",
                        "!".red().bold(),
                        flag.scorer_id,
                        flag.severity,
                        flag.issue
                    ));
                }
                if !report.drops.is_empty() {
                    output.push_str(&format!(
                        "  Dropped scorers: {}\n",
                        report.drops.join(", ")
                    ));
                }
                if !report.explanation.is_empty() {
                    output.push_str(&format!("  {}\n", report.explanation.dimmed()));
                }
            }
            None => {
                output.push_str(&format!(
                    "  {}\n",
                    "Audit output unusable; scores are uncorrected".yellow()
                ));
            }
        }

        // Winner
        output.push_str(&Self::section_header("Winning Response"));
        if let Some(winner) = outcome.winning_response() {
            output.push_str(&format!(
                "\n{}\n\n{}\n",
                format!("{} ({})", winner.response_id, winner.model_id)
                    .green()
                    .bold(),
                winner.text
            ));
        }

        output.push_str(&Self::footer());
        output
    }

    /// Format as JSON
    pub fn format_json(outcome: &CouncilOutcome) -> String {
        serde_json::to_string_pretty(outcome).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format the winning response only (concise output)
    pub fn format_winner_only(outcome: &CouncilOutcome) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{}\n\n",
            "=== AI Council Verdict ===".cyan().bold()
        ));
        output.push_str(&format!("{} {}\n\n", "Q:".bold(), outcome.query));

        if let Some(winner) = outcome.winning_response() {
            output.push_str(&format!(
                "{} {} (average {:.3})\n\n",
                "Winner:".dimmed(),
                winner.response_id,
                outcome.averages.get(&outcome.winner).copied().unwrap_or(0.0)
            ));
            output.push_str(&winner.text);
            output.push('\n');
        }

        output
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

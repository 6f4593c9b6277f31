//! Report rendering: summary table or JSON.

use comfy_table::presets::UTF8_FULL;
use comfy_table::Table;
use mfaprint_core::{ScanReport, TargetOutcome};

/// JSON mode: a mapping from URL to `{providers, debug_info}`.
///
/// Duplicate input URLs collapse onto one key here (last one wins); the
/// text table keeps every outcome.
pub fn render_json(report: &ScanReport) -> serde_json::Result<String> {
    let mut map = serde_json::Map::new();

    for outcome in report.iter() {
        map.insert(
            outcome.url.clone(),
            serde_json::json!({
                "providers": outcome.detected_providers,
                "debug_info": {
                    "status": outcome.debug.status,
                    "headers": outcome.debug.headers,
                    "script_urls": outcome.debug.script_urls,
                    "errors": outcome.debug.errors,
                },
            }),
        );
    }

    serde_json::to_string_pretty(&serde_json::Value::Object(map))
}

/// Text mode: summary table, plus a per-target breakdown when verbose.
pub fn print_text(report: &ScanReport, verbose: bool) {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["URL", "Detected Providers", "Status"]);

    for outcome in report.iter() {
        table.add_row(vec![
            outcome.url.clone(),
            providers_column(outcome),
            status_column(outcome).to_string(),
        ]);
    }

    println!("{table}");

    if verbose {
        print_breakdown(report);
    }
}

fn providers_column(outcome: &TargetOutcome) -> String {
    if outcome.detected_providers.is_empty() {
        "None".to_string()
    } else {
        outcome
            .detected_providers
            .iter()
            .cloned()
            .collect::<Vec<_>>()
            .join(", ")
    }
}

fn status_column(outcome: &TargetOutcome) -> &'static str {
    if outcome.is_success() {
        "Success"
    } else {
        "Failed"
    }
}

fn print_breakdown(report: &ScanReport) {
    println!("\nVerbose output:");

    for outcome in report.iter() {
        println!("\nURL: {}", outcome.url);
        match outcome.debug.status {
            Some(status) => println!("Status: {status}"),
            None => println!("Status: N/A"),
        }

        if !outcome.debug.headers.is_empty() {
            println!("Headers:");
            for (name, value) in &outcome.debug.headers {
                println!("  {name}: {value}");
            }
        }

        if !outcome.debug.script_urls.is_empty() {
            println!("Script URLs:");
            for url in &outcome.debug.script_urls {
                println!("  {url}");
            }
        }

        if !outcome.debug.errors.is_empty() {
            println!("Errors:");
            for error in &outcome.debug.errors {
                println!("  {error}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report() -> ScanReport {
        let mut success = TargetOutcome::new("https://login.example.com");
        success.detected_providers.insert("Duo".to_string());
        success.detected_providers.insert("Okta".to_string());
        success.debug.status = Some(200);

        let mut failed = TargetOutcome::new("https://slow.example.com");
        failed.record_error("timeout while processing https://slow.example.com");

        ScanReport {
            outcomes: vec![success, failed],
        }
    }

    #[test]
    fn test_json_shape() {
        let rendered = render_json(&sample_report()).expect("render json");
        let value: serde_json::Value = serde_json::from_str(&rendered).expect("valid json");

        let success = &value["https://login.example.com"];
        assert_eq!(success["providers"], serde_json::json!(["Duo", "Okta"]));
        assert_eq!(success["debug_info"]["status"], 200);

        let failed = &value["https://slow.example.com"];
        assert_eq!(failed["providers"], serde_json::json!([]));
        assert_eq!(
            failed["debug_info"]["errors"][0],
            "timeout while processing https://slow.example.com"
        );
    }

    #[test]
    fn test_providers_column_joins_or_none() {
        let report = sample_report();
        assert_eq!(providers_column(&report.outcomes[0]), "Duo, Okta");
        assert_eq!(providers_column(&report.outcomes[1]), "None");
    }

    #[test]
    fn test_status_column_reflects_errors() {
        let report = sample_report();
        assert_eq!(status_column(&report.outcomes[0]), "Success");
        assert_eq!(status_column(&report.outcomes[1]), "Failed");
    }
}

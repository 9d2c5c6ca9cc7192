use colored::Colorize;
use serde_json::Value;
use tabled::builder::Builder;
use tabled::settings::Style;

use polysync_core::model::{PolicyGroup, PolicyGroupSummary};
use polysync_core::sync::Summary;

use crate::cli::OutputFormat;

pub fn print_value(value: &Value) {
    println!("{}", serde_json::to_string_pretty(value).unwrap());
}

pub fn print_error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

pub fn print_groups(groups: &[PolicyGroupSummary], format: OutputFormat) {
    match format {
        OutputFormat::Json => print_value(&serde_json::to_value(groups).unwrap()),
        OutputFormat::Table => {
            if groups.is_empty() {
                println!("No eligible policy groups.");
                return;
            }
            let mut builder = Builder::default();
            builder.push_record(["Group", "Enabled Packs"]);
            for group in groups {
                let packs = group.num_enabled_policy_packs.to_string();
                builder.push_record([group.name.as_str(), packs.as_str()]);
            }
            let table = builder.build().with(Style::rounded()).to_string();
            println!("{table}");
        }
    }
}

pub fn print_group_packs(name: &str, group: &PolicyGroup, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_value(&serde_json::to_value(group).unwrap()),
        OutputFormat::Table => {
            println!("{}: {}", "Group".cyan(), name);
            if group.applied_policy_packs.is_empty() {
                println!("No applied policy packs.");
                return;
            }
            let mut builder = Builder::default();
            builder.push_record(["Pack", "Display Name", "Version Tag"]);
            for pack in &group.applied_policy_packs {
                builder.push_record([
                    pack.name.as_str(),
                    pack.display_name.as_deref().unwrap_or("-"),
                    pack.version_tag.as_deref().unwrap_or("-"),
                ]);
            }
            let table = builder.build().with(Style::rounded()).to_string();
            println!("{table}");
        }
    }
}

pub fn print_summary(summary: &Summary) {
    let marker = if summary.failed.is_empty() {
        "✓".green()
    } else {
        "✗".red()
    };
    println!(
        "{} {} groups processed: {} updated, {} skipped, {} failed",
        marker,
        summary.processed(),
        summary.submitted.len(),
        summary.skipped.len(),
        summary.failed.len()
    );
    if !summary.submitted.is_empty() {
        println!("  {}: {}", "updated".green(), summary.submitted.join(", "));
    }
    if !summary.failed.is_empty() {
        println!("  {}: {}", "failed".red(), summary.failed.join(", "));
    }
}

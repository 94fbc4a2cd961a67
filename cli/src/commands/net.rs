use std::time::{Duration, Instant};

use anyhow::Context;
use colored::*;
use hwprobe_common::config::Config;
use hwprobe_common::error::GatherError;
use hwprobe_common::network::interface::InterfaceRecord;
use hwprobe_common::network::inventory::InventoryResult;
use hwprobe_core::InventoryAggregator;
use tracing::info_span;

use crate::mprint;
use crate::terminal::{colors, network_fmt, print, spinner};

/// Gathers a fresh inventory, with a spinner unless output is quieted.
pub fn gather(cfg: &Config) -> anyhow::Result<InventoryResult> {
    let span = info_span!("inventory");
    let _guard = span.enter();

    if cfg.quiet == 0 {
        spinner::start_probe_spinner();
    }
    let result = InventoryAggregator::from_config(cfg)
        .on_interface(Box::new(spinner::report_probe_progress))
        .gather();
    spinner::finish();

    listing_context(result)
}

fn listing_context(result: Result<InventoryResult, GatherError>) -> anyhow::Result<InventoryResult> {
    result.context("failed to list network interfaces from the OS")
}

pub fn net(cfg: &Config) -> anyhow::Result<()> {
    let start_time: Instant = Instant::now();
    let inventory: InventoryResult = gather(cfg)?;

    if inventory.interfaces.is_empty() {
        print::header("zero interfaces found", cfg.quiet);
        print::no_results();
        return Ok(());
    }

    print::header("network interfaces", cfg.quiet);
    print_interfaces(&inventory.interfaces, cfg);
    print_summary(&inventory.interfaces, start_time.elapsed(), cfg);
    Ok(())
}

fn print_interfaces(records: &[InterfaceRecord], cfg: &Config) {
    for (idx, record) in records.iter().enumerate() {
        match cfg.quiet {
            2 => print::print_status(&record.name),
            _ => network_fmt::print_interface(record, idx),
        }
        if cfg.quiet < 2 && idx + 1 != records.len() {
            mprint!();
        }
    }
}

fn print_summary(records: &[InterfaceRecord], total_time: Duration, cfg: &Config) {
    let physical = records.iter().filter(|r| r.topology.is_physical).count();
    let with_issues = records.iter().filter(|r| !r.issues.is_empty()).count();

    let count: ColoredString = format!("{} interfaces", records.len()).bold().green();
    let physical: ColoredString = format!("{physical} physical").bold().green();
    let total_time: ColoredString = format!("{:.2}s", total_time.as_secs_f64()).bold().yellow();
    let mut output: String = format!("Probe Complete: {count} ({physical}) in {total_time}");
    if with_issues > 0 {
        let issues = format!("{with_issues} with issues").color(colors::WARNING);
        output = format!("{output}, {issues}");
    }

    match cfg.quiet {
        0 => {
            print::fat_separator();
            print::centerln(&output);
        }
        _ => {
            mprint!();
            print::print_status(output);
        }
    }
}

use std::path::Path;

use serde::Serialize;

use crate::cli::report::{format_quarterly, format_trace};
use crate::cli::wants_json;
use crate::error::Result;
use crate::locator::StrategyChoice;
use crate::models::{ExtractionTrace, QuarterlyReport};
use crate::quarterly::{load_quarterly, ExtractOptions, ValueMode};
use crate::settings::{load_settings, Settings};

#[derive(Serialize)]
struct Traced<'a> {
    report: &'a QuarterlyReport,
    trace: &'a ExtractionTrace,
}

fn options(settings: &Settings, strategy: Option<StrategyChoice>, sum_span: bool) -> ExtractOptions {
    ExtractOptions {
        layout: settings.layout.clone(),
        strategy: strategy.unwrap_or(settings.strategy),
        value_mode: if sum_span {
            ValueMode::SpanSum
        } else {
            ValueMode::TotalColumn
        },
    }
}

pub fn run(
    file: &Path,
    json: bool,
    trace: bool,
    strategy: Option<StrategyChoice>,
    sum_span: bool,
) -> Result<()> {
    let settings = load_settings();
    let opts = options(&settings, strategy, sum_span);
    let (report, diagnostics) = load_quarterly(file, &opts)?;

    if wants_json(json, &settings) {
        let out = if trace {
            serde_json::to_string_pretty(&Traced {
                report: &report,
                trace: &diagnostics,
            })?
        } else {
            serde_json::to_string_pretty(&report)?
        };
        println!("{out}");
    } else {
        println!("{}", format_quarterly(&report));
        if trace {
            println!("\n{}", format_trace(&diagnostics));
        }
    }
    Ok(())
}

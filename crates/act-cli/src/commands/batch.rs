//! Batch command - render every act matched by a glob.
//!
//! Documents are named after their input file (`a.txt` -> `a.md`), so acts
//! sharing a date never overwrite each other.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, warn};

use act_core::format::{format_amount, format_money, DATE_FORMAT};
use act_core::models::act::ActRecord;
use act_core::models::config::RenderFormat;
use act_core::parser::{ActParser, RuleActParser};
use act_core::render::{renderer_for, DocumentRenderer, RenderedDocument};

use super::render::DocumentFormat;

const SUMMARY_FILE: &str = "summary.csv";

#[derive(Args)]
pub struct BatchArgs {
    /// Glob of act text files, e.g. "acts/*.txt"
    #[arg(required = true)]
    pattern: String,

    /// Output directory (default: from config)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Document format (default: from config)
    #[arg(short, long, value_enum)]
    format: Option<DocumentFormat>,

    /// Write summary.csv with one row per act next to the documents
    #[arg(long)]
    summary: bool,

    /// Keep going when an act fails to parse or render
    #[arg(long = "continue-on-error")]
    keep_going: bool,
}

enum Outcome {
    Rendered {
        act: ActRecord,
        document: PathBuf,
        skipped: usize,
    },
    Failed(String),
}

struct FileReport {
    input: PathBuf,
    outcome: Outcome,
    elapsed: Duration,
}

/// One row of summary.csv.
#[derive(Serialize)]
struct SummaryRow<'a> {
    file: String,
    date: Option<String>,
    object: Option<&'a str>,
    items: Option<usize>,
    total: Option<String>,
    skipped_lines: Option<usize>,
    document: Option<String>,
    error: Option<&'a str>,
    elapsed_ms: u64,
}

impl<'a> From<&'a FileReport> for SummaryRow<'a> {
    fn from(report: &'a FileReport) -> Self {
        let mut row = SummaryRow {
            file: report.input.display().to_string(),
            date: None,
            object: None,
            items: None,
            total: None,
            skipped_lines: None,
            document: None,
            error: None,
            elapsed_ms: report.elapsed.as_millis() as u64,
        };
        match &report.outcome {
            Outcome::Rendered {
                act,
                document,
                skipped,
            } => {
                row.date = Some(act.date().format(DATE_FORMAT).to_string());
                row.object = Some(act.object_name());
                row.items = Some(act.items().len());
                row.total = Some(format_money(act.total()));
                row.skipped_lines = Some(*skipped);
                row.document = Some(document.display().to_string());
            }
            Outcome::Failed(message) => row.error = Some(message.as_str()),
        }
        row
    }
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let mut config = super::load_config(config_path)?;
    if let Some(output_dir) = args.output_dir {
        config.render.output_dir = output_dir;
    }
    let format = args.format.map(RenderFormat::from).unwrap_or(config.render.format);
    let output_dir = config.render.output_dir.clone();

    let mut inputs = Vec::new();
    for entry in glob::glob(&args.pattern)? {
        match entry {
            Ok(path) if path.is_file() => inputs.push(path),
            Ok(_) => {}
            Err(e) => warn!("skipping unreadable path: {}", e),
        }
    }
    if inputs.is_empty() {
        anyhow::bail!("No act files match {}", args.pattern);
    }
    fs::create_dir_all(&output_dir)?;

    let parser = RuleActParser::from_config(&config);
    let renderer = renderer_for(format, &config.render);

    let progress = ProgressBar::new(inputs.len() as u64);
    progress.set_style(
        ProgressStyle::with_template("{spinner:.green} {wide_msg} {pos}/{len} [{bar:30.cyan/blue}]")?
            .progress_chars("#>-"),
    );

    let mut reports = Vec::with_capacity(inputs.len());
    for input in inputs {
        progress.set_message(input.display().to_string());
        let started = Instant::now();

        let outcome = match render_act_file(&input, &parser, renderer.as_ref(), &output_dir) {
            Ok((act, document, skipped)) => {
                debug!("{} -> {}", input.display(), document.display());
                Outcome::Rendered {
                    act,
                    document,
                    skipped,
                }
            }
            Err(e) if args.keep_going => {
                progress.println(format!("{} {}: {}", style("✗").red(), input.display(), e));
                Outcome::Failed(e.to_string())
            }
            Err(e) => {
                progress.abandon();
                anyhow::bail!("{}: {}", input.display(), e);
            }
        };

        reports.push(FileReport {
            input,
            outcome,
            elapsed: started.elapsed(),
        });
        progress.inc(1);
    }
    progress.finish_and_clear();

    if args.summary {
        let path = output_dir.join(SUMMARY_FILE);
        write_summary(&path, &reports)?;
        println!("{} Summary: {}", style("✓").green(), path.display());
    }

    let rendered: Vec<&ActRecord> = reports
        .iter()
        .filter_map(|report| match &report.outcome {
            Outcome::Rendered { act, .. } => Some(act),
            Outcome::Failed(_) => None,
        })
        .collect();
    let grand_total: Decimal = rendered.iter().map(|act| act.total()).sum();

    println!(
        "{} Acts in {}: {} successful, {} failed",
        style("✓").green(),
        output_dir.display(),
        rendered.len(),
        reports.len() - rendered.len()
    );
    println!(
        "   Total billed: {} {}",
        format_amount(grand_total),
        config.render.currency_symbol
    );

    Ok(())
}

/// Parse one act file and write its document under `output_dir`.
fn render_act_file(
    input: &Path,
    parser: &RuleActParser,
    renderer: &dyn DocumentRenderer,
    output_dir: &Path,
) -> anyhow::Result<(ActRecord, PathBuf, usize)> {
    let parsed = parser.parse(&fs::read_to_string(input)?)?;

    let stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("act");
    let document = RenderedDocument {
        filename: format!("{}.{}", stem, renderer.extension()),
        bytes: renderer.render(&parsed.act)?,
    };
    let written = document.write_to(output_dir)?;

    Ok((parsed.act, written, parsed.skipped.len()))
}

fn write_summary(path: &Path, reports: &[FileReport]) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for report in reports {
        writer.serialize(SummaryRow::from(report))?;
    }
    writer.flush()?;
    Ok(())
}

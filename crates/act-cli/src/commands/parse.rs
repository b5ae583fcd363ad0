//! Parse command - check an act and show how it was understood.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::info;

use act_core::format::{render_canonical, PreviewFormatter};
use act_core::parser::{ActParser, RuleActParser};

use super::{load_config, parse_failure, read_input, report_warnings};

/// Arguments for the parse command.
#[derive(Args)]
pub struct ParseArgs {
    /// Act text file, or `-` for stdin
    #[arg(required = true)]
    input: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "preview")]
    format: ParseFormat,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Fail when any line was skipped or dropped as a duplicate
    #[arg(long)]
    strict: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum ParseFormat {
    /// Preview table as shown before confirmation
    Preview,
    /// Canonical act text
    Canonical,
    /// Parsed act with skipped lines, as JSON
    Json,
}

pub async fn run(args: ParseArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let text = read_input(&args.input)?;

    let parser = RuleActParser::from_config(&config);
    let parsed = parser.parse(&text).map_err(parse_failure)?;
    report_warnings(&parsed);

    if args.strict && !parsed.is_clean() {
        anyhow::bail!(
            "{} lines skipped, {} duplicates dropped",
            parsed.skipped.len(),
            parsed.duplicates.len()
        );
    }

    let output = match args.format {
        ParseFormat::Preview => PreviewFormatter::from_config(&config.render).render(&parsed.act),
        ParseFormat::Canonical => render_canonical(&parsed.act),
        ParseFormat::Json => serde_json::to_string_pretty(&parsed)?,
    };

    if let Some(output_path) = &args.output {
        fs::write(output_path, format!("{}\n", output))?;
        info!("Wrote {}", output_path.display());
        eprintln!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    Ok(())
}

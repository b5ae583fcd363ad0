//! Render command - turn one act into a document.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use console::style;

use act_core::models::config::RenderFormat;
use act_core::parser::{ActParser, RuleActParser};
use act_core::render::{render_document, renderer_for};

use super::{load_config, parse_failure, read_input, report_warnings};

/// Arguments for the render command.
#[derive(Args)]
pub struct RenderArgs {
    /// Act text file, or `-` for stdin
    #[arg(required = true)]
    input: PathBuf,

    /// Document format (default: from config)
    #[arg(short, long, value_enum)]
    format: Option<DocumentFormat>,

    /// Output directory (default: from config)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Text template with {date}, {object}, {total} and {items}
    #[arg(short, long)]
    template: Option<PathBuf>,

    /// Write the document to stdout instead of a file
    #[arg(long)]
    stdout: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum DocumentFormat {
    /// Markdown text document
    Text,
    /// CSV table
    Csv,
    /// JSON document
    Json,
}

impl From<DocumentFormat> for RenderFormat {
    fn from(format: DocumentFormat) -> Self {
        match format {
            DocumentFormat::Text => RenderFormat::Text,
            DocumentFormat::Csv => RenderFormat::Csv,
            DocumentFormat::Json => RenderFormat::Json,
        }
    }
}

pub async fn run(args: RenderArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let mut config = load_config(config_path)?;
    if let Some(template) = args.template {
        config.render.template = Some(template);
    }
    if let Some(output_dir) = args.output_dir {
        config.render.output_dir = output_dir;
    }
    let format = args.format.map(RenderFormat::from).unwrap_or(config.render.format);

    let text = read_input(&args.input)?;
    let parsed = RuleActParser::from_config(&config)
        .parse(&text)
        .map_err(parse_failure)?;
    report_warnings(&parsed);

    let renderer = renderer_for(format, &config.render);
    let document = render_document(renderer.as_ref(), &parsed.act)?;

    if args.stdout {
        let mut stdout = std::io::stdout();
        stdout.write_all(&document.bytes)?;
        stdout.flush()?;
    } else {
        let path = document.write_to(&config.render.output_dir)?;
        println!("{} Document saved to {}", style("✓").green(), path.display());
    }

    Ok(())
}

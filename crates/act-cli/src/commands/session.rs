//! Interactive command - the submit / preview / confirm cycle on a terminal.
//!
//! Act text is typed line by line; a blank line submits it. Commands:
//! - `/new` - start over with a new act
//! - `/confirm` - render the previewed act
//! - `/edit` - go back to input and send a corrected act
//! - `/cancel` - drop the pending act
//! - `/help` - show usage
//! - `/quit`, `/exit`, `/q` - leave

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Args;
use console::style;

use act_core::error::{ActError, ParseError, SessionError, HEADER_TEMPLATE, ITEM_TEMPLATE};
use act_core::format::PreviewFormatter;
use act_core::models::config::{ActConfig, RenderFormat};
use act_core::parser::RuleActParser;
use act_core::render::{render_document, renderer_for};
use act_core::session::{SessionState, SessionStore, UserId};

use super::render::DocumentFormat;
use super::{load_config, report_warnings};

/// The terminal has a single user.
const LOCAL_USER: UserId = 0;

/// Arguments for the interactive command.
#[derive(Args)]
pub struct InteractiveArgs {
    /// Output directory (default: from config)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Document format (default: from config)
    #[arg(short, long, value_enum)]
    format: Option<DocumentFormat>,
}

/// Input line variants.
#[derive(Debug, Clone, PartialEq)]
pub enum ReplCommand {
    New,
    Confirm,
    Edit,
    Cancel,
    Help,
    Quit,
    /// Unknown command (will show help)
    Unknown(String),
    /// A line of act text
    Text(String),
    /// Blank line: submit the buffered text
    Submit,
}

impl ReplCommand {
    /// Parse one input line.
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();

        if trimmed.is_empty() {
            return ReplCommand::Submit;
        }

        // "#АКТ ..." is act text, only "/..." is a command
        if trimmed.starts_with('/') {
            match trimmed.to_lowercase().as_str() {
                "/new" => ReplCommand::New,
                "/confirm" => ReplCommand::Confirm,
                "/edit" => ReplCommand::Edit,
                "/cancel" => ReplCommand::Cancel,
                "/help" => ReplCommand::Help,
                "/quit" | "/exit" | "/q" => ReplCommand::Quit,
                _ => ReplCommand::Unknown(trimmed.to_string()),
            }
        } else {
            ReplCommand::Text(trimmed.to_string())
        }
    }
}

struct Repl {
    store: SessionStore,
    parser: RuleActParser,
    preview: PreviewFormatter,
    config: ActConfig,
    format: RenderFormat,
    buffer: Vec<String>,
}

impl Repl {
    fn new(config: ActConfig, format: RenderFormat) -> Self {
        Self {
            store: SessionStore::new(),
            parser: RuleActParser::from_config(&config),
            preview: PreviewFormatter::from_config(&config.render),
            config,
            format,
            buffer: Vec::new(),
        }
    }

    fn start_new(&mut self) {
        self.buffer.clear();
        self.store.begin(LOCAL_USER);
        println!("Send the act text, then an empty line:");
        println!("  {}", HEADER_TEMPLATE);
        println!("  {}", ITEM_TEMPLATE);
    }

    fn submit(&mut self) {
        if self.buffer.is_empty() {
            return;
        }
        let text = self.buffer.join("\n");
        self.buffer.clear();

        // Text is a new act even without /new
        if self.store.state(LOCAL_USER) == SessionState::Idle {
            self.store.begin(LOCAL_USER);
        }

        match self.store.submit(LOCAL_USER, &text, &self.parser) {
            Ok(parsed) => {
                report_warnings(&parsed);
                println!("{}", self.preview.render(&parsed.act));
                println!();
                println!("/confirm to render, /edit to change");
            }
            Err(SessionError::Parse(err)) => print_parse_error(&err),
            Err(err) => eprintln!("{} {}", style("✗").red(), err),
        }
    }

    fn confirm(&mut self) {
        let renderer = renderer_for(self.format, &self.config.render);
        let output_dir = &self.config.render.output_dir;

        let result = self.store.confirm_with(LOCAL_USER, |act| {
            let document = render_document(renderer.as_ref(), act)?;
            Ok::<_, ActError>(document.write_to(output_dir)?)
        });

        match result {
            Ok(path) => println!("{} Document saved to {}", style("✓").green(), path.display()),
            Err(err) => {
                eprintln!("{} {}", style("✗").red(), err);
                if self.store.pending_act(LOCAL_USER).is_some() {
                    eprintln!("The act is kept, /confirm to retry.");
                }
            }
        }
    }

    fn edit(&mut self) {
        match self.store.request_edit(LOCAL_USER) {
            Ok(()) => println!("Send the corrected act text, then an empty line."),
            Err(err) => eprintln!("{} {}", style("✗").red(), err),
        }
    }

    fn cancel(&mut self) {
        self.buffer.clear();
        self.store.reset(LOCAL_USER);
        println!("Cancelled.");
    }
}

pub async fn run(args: InteractiveArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let mut config = load_config(config_path)?;
    if let Some(output_dir) = args.output_dir {
        config.render.output_dir = output_dir;
    }
    let format = args.format.map(RenderFormat::from).unwrap_or(config.render.format);

    let stdin = io::stdin();
    let mut stderr = io::stderr();
    let mut repl = Repl::new(config, format);

    eprintln!("act interactive mode");
    eprintln!("Type /help for commands, /quit to exit\n");
    repl.start_new();

    loop {
        eprint!("> ");
        stderr.flush()?;

        let mut input = String::new();
        if stdin.lock().read_line(&mut input)? == 0 {
            // EOF submits whatever is buffered
            repl.submit();
            break;
        }

        match ReplCommand::parse(&input) {
            ReplCommand::Text(line) => repl.buffer.push(line),
            ReplCommand::Submit => repl.submit(),
            ReplCommand::New => repl.start_new(),
            ReplCommand::Confirm => repl.confirm(),
            ReplCommand::Edit => repl.edit(),
            ReplCommand::Cancel => repl.cancel(),
            ReplCommand::Help => print_help(),
            ReplCommand::Quit => break,
            ReplCommand::Unknown(cmd) => {
                eprintln!("Unknown command: {}", cmd);
                print_help();
            }
        }
    }

    Ok(())
}

fn print_parse_error(err: &ParseError) {
    eprintln!("{} {}", style("✗").red(), err);
    eprintln!("{}", err.hint());
}

fn print_help() {
    eprintln!("Commands:");
    eprintln!("  /new      start a new act");
    eprintln!("  /confirm  render the previewed act");
    eprintln!("  /edit     send a corrected act");
    eprintln!("  /cancel   drop the pending act");
    eprintln!("  /quit     exit");
    eprintln!("Act text is submitted with an empty line.");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands() {
        assert_eq!(ReplCommand::parse("/new"), ReplCommand::New);
        assert_eq!(ReplCommand::parse("  /CONFIRM \n"), ReplCommand::Confirm);
        assert_eq!(ReplCommand::parse("/edit"), ReplCommand::Edit);
        assert_eq!(ReplCommand::parse("/cancel"), ReplCommand::Cancel);
        assert_eq!(ReplCommand::parse("/q"), ReplCommand::Quit);
        assert_eq!(
            ReplCommand::parse("/foo"),
            ReplCommand::Unknown("/foo".to_string())
        );
    }

    #[test]
    fn parses_act_text_and_blank_lines() {
        assert_eq!(
            ReplCommand::parse("#АКТ 12.05.2024 | Объект: Офис\n"),
            ReplCommand::Text("#АКТ 12.05.2024 | Объект: Офис".to_string())
        );
        assert_eq!(
            ReplCommand::parse("Монтаж 2 x 3 м / 2 × 100"),
            ReplCommand::Text("Монтаж 2 x 3 м / 2 × 100".to_string())
        );
        assert_eq!(ReplCommand::parse("   \n"), ReplCommand::Submit);
    }
}

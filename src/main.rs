//! Harvest CLI - resolve entity declarations into ordered source files
//!
//! Usage: harvest [--json] [-v...] [--config PATH] <COMMAND>
//!
//! Commands:
//!   resolve  Print the ordered files for a declaration
//!   closure  Print the ordered dependency closure
//!   cat      Concatenate the ordered files

use anyhow::Result;
use clap::Parser;
use is_terminal::IsTerminal;

use harvest::config::{Config, ConfigWarning, Verbosity};
use harvest::domain::value_objects::CancelToken;
use harvest::presentation::{Cli, Commands};

mod commands;
mod ui;

use commands::CommandContext;
use ui::json::{emit_event, events::*};

fn main() {
    let cli = Cli::parse();
    let json = cli.json;
    let command = command_name(&cli.command);

    if let Err(err) = run(cli) {
        if json {
            // stdout may be closed; the exit code still reports failure
            let _ = emit_event(&ErrorEvent::new(
                command,
                commands::error_code(&err),
                format!("{:#}", err),
            ));
        } else {
            eprintln!("Error: {:#}", err);
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let (config, warnings) = load_config(&cli)?;
    init_logging(config.output.verbosity.raised_by(cli.verbose));
    report_config_warnings(cli.json, command_name(&cli.command), &warnings)?;

    let cancel = CancelToken::new();
    let handler_token = cancel.clone();
    if let Err(e) = ctrlc::set_handler(move || handler_token.cancel()) {
        log::debug!("could not install Ctrl-C handler: {}", e);
    }

    let ctx = CommandContext {
        json: cli.json,
        config,
        cancel,
    };

    match &cli.command {
        Commands::Resolve(args) => commands::cmd_resolve(&ctx, args),
        Commands::Closure(args) => commands::cmd_closure(&ctx, args),
        Commands::Cat { args, output } => commands::cmd_cat(&ctx, args, output.as_deref()),
    }
}

fn load_config(cli: &Cli) -> Result<(Config, Vec<ConfigWarning>)> {
    match &cli.config {
        Some(path) => {
            let (config, warnings) = Config::load_with_warnings(path)?;
            Ok((config.with_env_overrides(), warnings))
        }
        None => {
            let project_root = std::env::current_dir()?;
            Ok(Config::load_or_default(Some(&project_root))?)
        }
    }
}

fn init_logging(verbosity: Verbosity) {
    let style = if std::io::stderr().is_terminal() {
        env_logger::WriteStyle::Auto
    } else {
        env_logger::WriteStyle::Never
    };
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(verbosity.level_filter())
        .write_style(style)
        .format_timestamp(None)
        .format_target(false)
        .target(env_logger::Target::Stderr);
    // RUST_LOG wins over config and flags
    builder.parse_default_env();
    builder.init();
}

fn report_config_warnings(json: bool, command: &str, warnings: &[ConfigWarning]) -> Result<()> {
    for w in warnings {
        let mut message = format!("unknown config key '{}' in {}", w.key, w.file.display());
        if let Some(line) = w.line {
            message.push_str(&format!(":{}", line));
        }
        if let Some(suggestion) = &w.suggestion {
            message.push_str(&format!(" (did you mean '{}'?)", suggestion));
        }

        if json {
            emit_event(&WarningEvent::new(command, message))?;
        } else {
            log::warn!("{}", message);
        }
    }
    Ok(())
}

fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Resolve(_) => "resolve",
        Commands::Closure(_) => "closure",
        Commands::Cat { .. } => "cat",
    }
}

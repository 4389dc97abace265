// FILE: crates/cli/src/main.rs

use anyhow::{Context, Result};
use auralis_core::{AppError, ErrorSeverity};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use console::style;
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;
mod player;

fn build_cli() -> Command {
    Command::new("auralis")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Auralis Contributors")
        .about("Audiobook library and player")
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .value_name("DIR")
                .help("Directory holding the library records")
                .value_parser(value_parser!(PathBuf))
                .global(true),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("DIR")
                .help("Directory containing config.toml")
                .value_parser(value_parser!(PathBuf))
                .global(true),
        )
        .subcommand(Command::new("list").about("List the books in the library"))
        .subcommand(
            Command::new("play")
                .about("Play a book for a while on the simulated player")
                .arg(Arg::new("id").value_name("BOOK_ID").help("Book to play (defaults to the last played one)"))
                .arg(
                    Arg::new("files")
                        .long("files")
                        .value_name("PATH")
                        .help("Local audio files to add for this session")
                        .num_args(1..)
                        .value_parser(value_parser!(PathBuf)),
                )
                .arg(
                    Arg::new("speed")
                        .short('s')
                        .long("speed")
                        .value_name("RATE")
                        .help("Playback speed: 0.75, 1.0, 1.25, 1.5 or 2.0")
                        .value_parser(value_parser!(f32)),
                )
                .arg(
                    Arg::new("sleep")
                        .long("sleep")
                        .value_name("MINUTES")
                        .help("Sleep timer in minutes")
                        .value_parser(value_parser!(u32)),
                )
                .arg(
                    Arg::new("seconds")
                        .short('n')
                        .long("seconds")
                        .value_name("N")
                        .help("Wall-clock seconds to keep playing")
                        .default_value("10")
                        .value_parser(value_parser!(u64)),
                )
                .arg(
                    Arg::new("volume")
                        .long("volume")
                        .value_name("PERCENT")
                        .help("Volume from 0 to 100")
                        .value_parser(value_parser!(u8).range(0..=100)),
                )
                .arg(Arg::new("mute").long("mute").help("Start muted").action(ArgAction::SetTrue)),
        )
        .subcommand(
            Command::new("remove")
                .about("Remove a book from the library")
                .arg(Arg::new("id").required(true).value_name("BOOK_ID").help("Book to remove"))
                .arg(Arg::new("yes").short('y').long("yes").help("Skip confirmation prompt").action(ArgAction::SetTrue)),
        )
        .subcommand(
            Command::new("insight")
                .about("Generate a short synopsis of a book")
                .arg(Arg::new("id").value_name("BOOK_ID").help("Book to analyse (defaults to the last played one)")),
        )
        .subcommand(Command::new("config").about("Show the resolved configuration"))
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let matches = build_cli().get_matches();

    match run(&matches).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err);
            ExitCode::FAILURE
        }
    }
}

async fn run(matches: &ArgMatches) -> Result<()> {
    let env = commands::Environment::resolve(
        matches.get_one::<PathBuf>("config").cloned(),
        matches.get_one::<PathBuf>("data-dir").cloned(),
    )
    .context("Failed to resolve configuration")?;

    match matches.subcommand() {
        Some(("list", _)) => commands::list_books(&env),
        Some(("play", sub_matches)) => player::play(&env, sub_matches).await,
        Some(("remove", sub_matches)) => commands::remove_book(&env, sub_matches),
        Some(("insight", sub_matches)) => commands::show_insight(&env, sub_matches).await,
        Some(("config", _)) => commands::show_config(&env),
        _ => {
            build_cli().print_help()?;
            Ok(())
        }
    }
}

/// Prints the user-facing message of domain errors, the full chain otherwise
fn report_error(err: &anyhow::Error) {
    match err.downcast_ref::<AppError>() {
        Some(app_err) => {
            match app_err.severity() {
                ErrorSeverity::Silent => log::debug!("{:#}", err),
                ErrorSeverity::Visible => log::error!("{:#}", err),
            }
            eprintln!("{} {}", style("✗").red().bold(), app_err.user_message());
        }
        None => eprintln!("{} {:#}", style("✗").red().bold(), err),
    }
}

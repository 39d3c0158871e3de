mod app;
mod cli;
mod command;
mod config;
mod consts;
mod difficulty;
mod game;
mod game_loop;
mod input;
mod logging;
mod render;
use crate::app::{App, TerminalConsole};
use crate::cli::{Arguments, Command, USAGE};
use crate::config::Config;
use crate::game::Bounds;
use anyhow::Context;
use std::io::{self, ErrorKind};
use std::process::ExitCode;

fn main() -> ExitCode {
    match Command::from_env() {
        Ok(Command::Run(args)) => exit_with(run(args)),
        Ok(Command::Help) => {
            print!("{USAGE}");
            ExitCode::SUCCESS
        }
        Ok(Command::Version) => {
            println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("termsnake: {e}");
            eprintln!("Run `termsnake --help` for usage information");
            ExitCode::from(2)
        }
    }
}

fn run(args: Arguments) -> anyhow::Result<()> {
    let config = match args.config {
        Some(ref path) => Config::load(path, false),
        None => Config::default_path().and_then(|path| Config::load(&path, true)),
    }
    .context("failed to load configuration")?;
    logging::init(&config.logging)?;
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "termsnake starting");
    let bounds = Bounds::new(
        args.width.unwrap_or(config.grid.width()),
        args.height.unwrap_or(config.grid.height()),
    )?;
    let stdin = io::stdin();
    App::new(stdin.lock(), io::stdout(), bounds).run(&mut TerminalConsole)?;
    tracing::info!("termsnake exiting");
    Ok(())
}

fn exit_with(r: anyhow::Result<()>) -> ExitCode {
    match r {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if is_broken_pipe(&e) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("termsnake failed: {e:#}");
            eprintln!("termsnake: {e:#}");
            ExitCode::from(2)
        }
    }
}

fn is_broken_pipe(e: &anyhow::Error) -> bool {
    e.downcast_ref::<io::Error>()
        .is_some_and(|e| e.kind() == ErrorKind::BrokenPipe)
}

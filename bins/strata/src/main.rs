mod args;

use std::io::{self, BufRead, Write};

use anyhow::Context;
use clap::Parser;
use strata_buffer::PriorityBuffer;
use strata_config::StrataConfig;
use strata_menu::render::{Contents, MENU, Prompt};
use strata_menu::{Action, Input, Session, execute};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::args::Args;

const CAPACITY: usize = 8;
const DEFAULT_CONFIG: &str = "strata.toml";
const CLEAR: &str = "\x1b[2J\x1b[H";

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = match &args.config {
        Some(path) => StrataConfig::load(path.as_str())
            .with_context(|| format!("loading config from {path}"))?,
        None => StrataConfig::load_or_default(DEFAULT_CONFIG)
            .with_context(|| format!("loading config from {DEFAULT_CONFIG}"))?,
    };

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .with_context(|| format!("invalid log level '{}'", config.log_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .init();

    info!(
        capacity = CAPACITY,
        overflow = ?config.overflow,
        start_priority = %config.start_priority,
        "strata starting"
    );

    let mut buffer = PriorityBuffer::<u8, CAPACITY>::with_policy(config.overflow);
    run(&mut buffer, &config, io::stdin().lock(), io::stdout().lock())?;

    info!("strata stopped");
    Ok(())
}

fn run<const CAP: usize>(
    buffer: &mut PriorityBuffer<u8, CAP>,
    config: &StrataConfig,
    mut input: impl BufRead,
    mut out: impl Write,
) -> anyhow::Result<()> {
    let mut session = Session::new(config.start_priority);
    let mut status = String::new();
    let mut line = String::new();

    while !session.is_done() {
        if !session.awaits_input() {
            let (next, command) = session.step(Input::Blank);
            session = next;
            if let Some(command) = command {
                status = execute(command, buffer).to_string();
            }
            continue;
        }

        if config.clear_screen {
            write!(out, "{CLEAR}")?;
        }
        writeln!(out, "{MENU}\n\n{}\n", Contents(buffer))?;
        if !status.is_empty() {
            writeln!(out, "{status}")?;
        }
        write!(out, "{}", Prompt(&session))?;
        out.flush()?;

        line.clear();
        let read = input.read_line(&mut line).context("reading operator input")?;
        let classified = if read == 0 {
            Input::Action(Action::Quit)
        } else {
            Input::classify(&line)
        };

        let (next, command) = session.step(classified);
        status = match command {
            Some(command) => execute(command, buffer).to_string(),
            None if next == session => format!("unrecognised input '{}'", line.trim()),
            None => String::new(),
        };
        session = next;
    }

    writeln!(out, "\nQuitting!")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_buffer::Priority;

    fn script(lines: &str) -> (PriorityBuffer<u8, 4>, String) {
        let config = StrataConfig {
            clear_screen: false,
            ..StrataConfig::default()
        };
        let mut buffer = PriorityBuffer::<u8, 4>::new();
        let mut out = Vec::new();
        run(&mut buffer, &config, lines.as_bytes(), &mut out).unwrap();
        (buffer, String::from_utf8(out).unwrap())
    }

    #[test]
    fn scripted_run_inserts_and_retrieves() {
        let (buffer, out) = script("1\n2\ni\nhigh\n9\ng\nq\n");
        assert!(out.contains("inserted 9 at HIGH"));
        assert!(out.contains("retrieved 9 (HIGH)"));
        assert!(out.ends_with("Quitting!\n"));
        let rest: Vec<_> = buffer.iter().map(|(p, v)| (p, *v)).collect();
        assert_eq!(rest, [(Priority::Low, 1), (Priority::Low, 2)]);
    }

    #[test]
    fn end_of_input_quits() {
        let (buffer, out) = script("5\n");
        assert_eq!(buffer.len(), 1);
        assert!(out.ends_with("Quitting!\n"));
    }

    #[test]
    fn junk_is_reported_and_ignored() {
        let (buffer, out) = script("bogus\nr\n");
        assert!(out.contains("unrecognised input 'bogus'"));
        assert!(out.contains("buffer cleared"));
        assert!(buffer.is_empty());
    }
}

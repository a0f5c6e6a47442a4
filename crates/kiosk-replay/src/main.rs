//! kiosk-replay - Run a scripted event sequence through the kiosk shell
//!
//! Feeds each `[[step]]` of a TOML script to the shell through a calloop
//! channel, against a headless host, and prints every command the shell
//! issued in response. Nothing is rendered.
//!
//! # Usage
//!
//! ```sh
//! kiosk-replay demos/two-outputs.toml
//! kiosk-replay --json --config kiosk.toml script.toml
//! ```
//!
//! Logging follows `RUST_LOG` (default `info`).

mod script;

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use calloop::channel::{self, Event};
use calloop::{EventLoop, LoopSignal};
use kiosk_shell::headless::{HeadlessHost, HostCommand};
use kiosk_shell::{Config, Shell};
use serde::Serialize;

use crate::script::{Labels, Script, Step};

/// How host commands are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Human,
    JsonLines,
}

struct Args {
    script: PathBuf,
    config: Option<PathBuf>,
    format: OutputFormat,
}

fn parse_args(args: &[String]) -> Result<Args> {
    let mut script = None;
    let mut config = None;
    let mut format = OutputFormat::Human;

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--json" => format = OutputFormat::JsonLines,
            "--config" => {
                let path = iter.next().context("missing path after --config")?;
                config = Some(PathBuf::from(path));
            }
            flag if flag.starts_with("--") => bail!("unknown option: {flag}"),
            path => {
                if script.replace(PathBuf::from(path)).is_some() {
                    bail!("only one script can be replayed at a time");
                }
            }
        }
    }

    let script = script.context("usage: kiosk-replay [--json] [--config PATH] SCRIPT")?;
    Ok(Args { script, config, format })
}

/// One printed command, tagged with the step that caused it
#[derive(Serialize)]
struct Record<'a> {
    step: usize,
    #[serde(flatten)]
    command: &'a HostCommand,
}

/// Event loop state
struct Replay {
    shell: Shell,
    host: HeadlessHost,
    labels: Labels,
    format: OutputFormat,
    steps_run: usize,
    failure: Option<anyhow::Error>,
    signal: LoopSignal,
}

impl Replay {
    fn run_step(&mut self, step: Step) {
        self.steps_run += 1;
        if let Err(e) = self.apply(&step) {
            tracing::error!(step = self.steps_run, ?step, error = %e, "replay stopped");
            self.failure = Some(e.context(format!("step {}", self.steps_run)));
            self.signal.stop();
        }
    }

    fn apply(&mut self, step: &Step) -> Result<()> {
        let event = self.labels.resolve(step)?;
        tracing::debug!(step = self.steps_run, ?event, "applying");

        match self.shell.dispatch(&mut self.host, event) {
            Ok(dispatched) => self.labels.bind(dispatched),
            Err(e) => {
                // The shell already dropped the event; keep replaying
                tracing::warn!(step = self.steps_run, error = %e, "event dropped");
                self.labels.abandon();
            }
        }

        for command in self.host.take_commands() {
            self.print(&command)?;
        }
        Ok(())
    }

    fn print(&self, command: &HostCommand) -> Result<()> {
        match self.format {
            OutputFormat::Human => println!("[{:>3}] {}", self.steps_run, command),
            OutputFormat::JsonLines => {
                let record = Record {
                    step: self.steps_run,
                    command,
                };
                println!("{}", serde_json::to_string(&record)?);
            }
        }
        Ok(())
    }
}

fn main() -> Result<()> {
    setup_logging();

    let args: Vec<String> = env::args().collect();
    let args = parse_args(&args)?;

    let config = match &args.config {
        Some(path) => Config::from_path(path).with_context(|| format!("failed to load {}", path.display()))?,
        None => Config::load(),
    };
    let script = Script::from_path(&args.script)?;
    tracing::info!(script = ?args.script, steps = script.steps.len(), "starting replay");

    let mut event_loop: EventLoop<Replay> = EventLoop::try_new()?;
    let (sender, steps) = channel::channel::<Step>();

    event_loop
        .handle()
        .insert_source(steps, |event, _, replay| match event {
            Event::Msg(step) => replay.run_step(step),
            Event::Closed => replay.signal.stop(),
        })
        .map_err(|e| anyhow!("failed to insert script source: {e}"))?;

    for step in script.steps {
        sender.send(step).map_err(|_| anyhow!("replay loop closed early"))?;
    }
    drop(sender);

    let mut replay = Replay {
        shell: Shell::new(config),
        host: HeadlessHost::new(),
        labels: Labels::new(),
        format: args.format,
        steps_run: 0,
        failure: None,
        signal: event_loop.get_signal(),
    };

    event_loop.run(None::<Duration>, &mut replay, |_| {})?;

    if let Some(e) = replay.failure {
        return Err(e);
    }
    tracing::info!(
        steps = replay.steps_run,
        windows = replay.shell.window_count(),
        outputs = replay.shell.outputs().len(),
        "replay finished"
    );
    Ok(())
}

fn setup_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // Respect NO_COLOR environment variable for testing
    let use_ansi = std::env::var("NO_COLOR").is_err();

    // Commands go to stdout, logs to stderr
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_line_number(true)
                .with_ansi(use_ansi),
        )
        .with(filter)
        .init();
}

use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use apiboard_core::{update, AppState, CallBudget, FetchStatus, Msg, WidgetId};
use board_logging::{board_info, board_warn};
use clap::Parser;

use super::cli::Cli;
use super::commands::{self, Command, HELP};
use super::effects::EffectRunner;
use super::logging;
use super::render;

const TICK_INTERVAL: Duration = Duration::from_millis(250);

/// Everything the main loop reacts to, from any thread.
pub enum Input {
    Msg(Msg),
    Command(Command),
    StdinClosed,
}

pub fn run_app() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    logging::initialize(cli.log_destination(), cli.log_level());

    let (input_tx, input_rx) = mpsc::channel::<Input>();
    let runner = EffectRunner::new(cli.client_config(), input_tx.clone())?;
    let state = AppState::new().with_translation_budget(CallBudget::hourly(cli.translation_limit));
    let mut session = Session { state, runner };

    spawn_ticker(input_tx.clone());
    if !cli.once {
        println!("{HELP}");
        spawn_stdin_reader(input_tx);
    } else {
        drop(input_tx);
    }

    session.dispatch(Msg::Mounted);
    let mut mode = LoopMode {
        once: cli.once,
        stdin_closed: false,
    };

    while let Ok(input) = input_rx.recv() {
        match input {
            Input::Msg(msg) => {
                let is_tick = matches!(msg, Msg::Tick { .. });
                session.dispatch(msg);
                if is_tick && mode.renders_on_tick() && session.state.consume_dirty() {
                    print_dashboard(&session.state);
                }
            }
            Input::Command(Command::Dispatch(msgs)) => {
                let current_text = session.state.view().translation.text;
                if let Some(hint) = commands::missing_text_hint(&msgs, &current_text) {
                    eprintln!("{hint}");
                }
                for msg in msgs {
                    session.dispatch(msg);
                }
            }
            Input::Command(Command::Show) => {
                print_dashboard(&session.state);
                session.state.consume_dirty();
            }
            Input::Command(Command::Help) => println!("{HELP}"),
            Input::Command(Command::Quit) => {
                board_info!("leaving on user request");
                return Ok(ExitCode::SUCCESS);
            }
            Input::StdinClosed => {
                board_info!("stdin closed; waiting for in-flight requests");
                mode.stdin_closed = true;
            }
        }

        if let Some(outcome) = mode.finish(&session.state) {
            print_dashboard(&session.state);
            return Ok(outcome.exit_code());
        }
    }

    Ok(ExitCode::SUCCESS)
}

struct Session {
    state: AppState,
    runner: EffectRunner,
}

impl Session {
    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        self.runner.enqueue(effects);
    }
}

/// How the main loop ends: `--once` and closed stdin both wait for every
/// widget to settle, print a final dashboard and exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LoopMode {
    once: bool,
    stdin_closed: bool,
}

impl LoopMode {
    fn renders_on_tick(self) -> bool {
        !self.once && !self.stdin_closed
    }

    fn finish(self, state: &AppState) -> Option<Outcome> {
        if (self.once || self.stdin_closed) && state.is_settled() {
            Some(Outcome::of(state))
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Clean,
    /// At least one widget ended its cycle in error.
    WidgetErrors,
}

impl Outcome {
    fn of(state: &AppState) -> Self {
        let view = state.view();
        let statuses = [
            view.advice.status,
            view.cats.categories.status,
            view.cats.images.status,
            view.translation.result.status,
            view.launch.record.status,
        ];
        if statuses.contains(&FetchStatus::Error) {
            Outcome::WidgetErrors
        } else {
            Outcome::Clean
        }
    }

    fn exit_code(self) -> ExitCode {
        match self {
            Outcome::Clean => ExitCode::SUCCESS,
            Outcome::WidgetErrors => ExitCode::FAILURE,
        }
    }
}

fn print_dashboard(state: &AppState) {
    let mut stdout = io::stdout().lock();
    let _ = stdout.write_all(render::render(&state.view()).as_bytes());
    let _ = stdout.flush();
}

// Background tick: advances the budget clock and coalesces rendering.
fn spawn_ticker(input_tx: mpsc::Sender<Input>) {
    thread::spawn(move || {
        while input_tx
            .send(Input::Msg(Msg::Tick {
                now: Instant::now(),
            }))
            .is_ok()
        {
            thread::sleep(TICK_INTERVAL);
        }
    });
}

fn spawn_stdin_reader(input_tx: mpsc::Sender<Input>) {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    board_warn!("stdin read failed: {}", err);
                    break;
                }
            };
            match commands::parse(&line) {
                Ok(Some(command)) => {
                    if input_tx.send(Input::Command(command)).is_err() {
                        return;
                    }
                }
                Ok(None) => {}
                Err(err) => eprintln!("{err}"),
            }
        }
        let _ = input_tx.send(Input::StdinClosed);
    });
}

//! Interactive terminal front end for the screening experiment.
//!
//! Reads one command per line from stdin and redraws the current screen after
//! every accepted event.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use skyguard::analytics::aggregate;
use skyguard::constants::EXPORT_FILE_NAME;
use skyguard::display;
use skyguard::export::save_csv;
use skyguard::session::{Event, Phase, Response, Session};
use skyguard::types::Mode;

#[derive(Parser, Debug)]
#[command(name = "skyguard", version, about = "SkyGuard baggage screening experiment")]
struct Args {
    /// RNG seed (default: random)
    #[arg(long)]
    seed: Option<u64>,

    /// CSV export path
    #[arg(long, default_value = EXPORT_FILE_NAME)]
    output: PathBuf,
}

enum Command {
    Event(Event),
    Download,
    Quit,
}

fn parse_command(phase: Phase, line: &str) -> Option<Command> {
    let cmd = match (phase, line.trim()) {
        (_, "q") => Command::Quit,
        (Phase::Menu, "m") => Command::Event(Event::Start(Mode::Manual)),
        (Phase::Menu, "a") => Command::Event(Event::Start(Mode::AiAssist)),
        (Phase::Menu, "v") => Command::Event(Event::RunVerification),
        (Phase::ActiveTrial, "c") => Command::Event(Event::ClearBag),
        (Phase::ActiveTrial, "r") => Command::Event(Event::ReportThreat),
        (Phase::Complete, "d") => Command::Download,
        (Phase::Complete, "m") => Command::Event(Event::ReturnToMenu),
        _ => return None,
    };
    Some(cmd)
}

fn render(session: &Session) -> String {
    let mut out = format!("\n{}\n\n", display::title());
    match session.phase() {
        Phase::Menu => {
            out.push_str(&display::briefing());
            out.push('\n');
            let archived = display::menu_analytics(&aggregate(session.archive(), 0));
            if !archived.is_empty() {
                out.push_str(&archived);
                out.push('\n');
            }
            out.push_str(&display::menu_controls());
        }
        Phase::ActiveTrial => {
            out.push_str(&display::progress_bar(&session.progress(), 20));
            out.push_str("\n\n");
            if let Some(trial) = session.current_trial() {
                out.push_str(&display::bag_view(trial));
                out.push_str("\n\n");
                out.push_str(&display::advisor_panel(session.mode(), trial));
                out.push_str("\n\n");
            }
            out.push_str(&display::trial_controls());
            out.push('\n');
        }
        Phase::Complete => {
            out.push_str(&display::session_report(&aggregate(
                &session.all_records(),
                session.score(),
            )));
            out.push('\n');
            out.push_str(&display::complete_controls());
            out.push('\n');
        }
    }
    out
}

fn main() {
    skyguard::env_config::init_tracing("warn");
    let args = Args::parse();
    skyguard::env_config::init_rayon_threads_lenient();

    let mut session = match args.seed {
        Some(seed) => Session::new(seed),
        None => Session::from_entropy(),
    };
    info!(seed = session.seed(), "starting skyguard");

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut lines = stdin.lock().lines();

    loop {
        print!("{}> ", render(&session));
        if let Err(e) = stdout.flush() {
            error!("failed to write output: {e}");
            break;
        }

        let line = match lines.next() {
            Some(Ok(line)) => line,
            Some(Err(e)) => {
                error!("failed to read input: {e}");
                break;
            }
            None => break,
        };

        let Some(command) = parse_command(session.phase(), &line) else {
            println!("Unrecognised input: {:?}", line.trim());
            continue;
        };

        match command {
            Command::Quit => break,
            Command::Download => match save_csv(&session.all_records(), &args.output) {
                Ok(()) => println!("Saved {}", args.output.display()),
                Err(e) => error!("{e}"),
            },
            Command::Event(event) => match session.handle(event) {
                Ok(Response::Verified(report)) => println!("\n{}", report.summary()),
                Ok(Response::Decided {
                    finished: true, ..
                }) => info!(score = session.score(), "all bags screened"),
                Ok(_) => {}
                Err(e) => error!("{e}"),
            },
        }
    }
}

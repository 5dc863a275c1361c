//! Goethe Coach CLI
//!
//! Main entry point for the interactive German coaching session.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use coach_core::{
    ChatOracle, Config, ExercisePrompt, Feedback, Frontend, Mode, ModeSession, Result as CoreResult,
    SessionContext, SessionStats, UserInput,
};
use coach_report::{json::JsonGenerator, ExamSummary, MarkdownGenerator, SessionReport, VocabSummary};
use tracing_subscriber::EnvFilter;

/// Modes in menu order; the menu number is the index plus one.
const MENU_MODES: [Mode; 5] = [
    Mode::Vocabulary,
    Mode::Listening,
    Mode::Reading,
    Mode::Writing,
    Mode::Speaking,
];

/// Goethe Coach - Interactive German Language Trainer
///
/// Drives vocabulary drills and Goethe B2/C1 exam practice through a
/// chat-completion service. Requires `OPENAI_API_KEY` in the environment
/// or a `.env` file in the working directory.
#[derive(Parser, Debug)]
#[command(name = "coach")]
#[command(version, about, long_about = None)]
struct Args {
    /// Output directory for session reports (written on exit)
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    // A .env file is optional; a missing one is not an error.
    let _ = dotenvy::dotenv();

    // Initialize tracing subscriber with appropriate filter
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if args.verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!("Goethe Coach starting");

    match run_coach(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(1)
        }
    }
}

/// Runs the coaching session.
///
/// 1. Load and validate configuration (fatal before the first prompt)
/// 2. Loop: show the mode menu, run the chosen mode
/// 3. On exit: print the session summary and write reports
async fn run_coach(args: Args) -> anyhow::Result<()> {
    let config = Config::from_env().map_err(|e| anyhow::anyhow!("{e}"))?;
    tracing::debug!(config = ?config, "Configuration loaded");

    let oracle = ChatOracle::new(&config);
    let mut frontend = StdioFrontend::new();
    let mut context = SessionContext::new();
    let started = std::time::Instant::now();

    println!("Willkommen beim Goethe Coach!");
    println!("Dein persönlicher Deutsch-Trainer für Wortschatz und Prüfungstraining.");

    loop {
        let Some(mode) = read_menu_selection(&mut frontend)? else {
            break;
        };

        let mut session = ModeSession::new(&oracle, &mut frontend, &mut context);
        if let Err(e) = session.run(mode).await {
            if e.is_fatal() {
                return Err(anyhow::anyhow!("{e}"));
            }
            // Transient oracle failures abort the iteration, not the
            // session; the learner lands back on the menu.
            tracing::warn!(error = %e, "Mode aborted");
            println!();
            println!("Es gab ein Problem mit dem Sprachdienst: {e}");
        }
    }

    println!();
    println!("Tschüss! Viel Erfolg bei der Prüfung!");

    let stats = context.snapshot();
    print_summary(&stats, started.elapsed().as_secs());

    if let Some(output_dir) = args.output_dir {
        generate_reports(&stats, started.elapsed().as_secs(), Path::new(&output_dir))?;
    }

    Ok(())
}

/// Shows the top-level menu and reads one selection.
///
/// Returns `None` when the learner chose to leave (menu item 0 or the
/// quit sentinel).
fn read_menu_selection(frontend: &mut StdioFrontend) -> anyhow::Result<Option<Mode>> {
    loop {
        println!();
        println!("Was möchtest du üben?");
        for (index, mode) in MENU_MODES.iter().enumerate() {
            println!("  {}) {mode}", index + 1);
        }
        println!("  0) Beenden");

        match frontend.read_input("Auswahl: ")? {
            UserInput::Quit => return Ok(None),
            UserInput::Answer(raw) => match raw.trim() {
                "0" => return Ok(None),
                selection => {
                    if let Some(mode) = selection
                        .parse::<usize>()
                        .ok()
                        .and_then(|n| n.checked_sub(1))
                        .and_then(|i| MENU_MODES.get(i))
                    {
                        return Ok(Some(*mode));
                    }
                    println!("Ungültige Auswahl: '{selection}'");
                }
            },
        }
    }
}

/// Prints the end-of-session summary.
fn print_summary(stats: &SessionStats, duration_seconds: u64) {
    println!();
    println!("=== Sitzungsübersicht ===");
    println!(
        "Dauer: {}m {:02}s",
        duration_seconds / 60,
        duration_seconds % 60
    );
    println!("Wortschatz-Übungen: {}", stats.vocab.total);
    if stats.vocab.total > 0 {
        println!("  Richtig: {}", stats.vocab.correct);
        println!("  Teilweise richtig: {}", stats.vocab.partial);
        println!("  Falsch: {}", stats.vocab.incorrect);
    }
    println!("Prüfungsübungen: {}", stats.exam.total());
    if stats.exam.total() > 0 {
        println!("  Hören: {}", stats.exam.listening);
        println!("  Lesen: {}", stats.exam.reading);
        println!("  Schreiben: {}", stats.exam.writing);
        println!("  Sprechen: {}", stats.exam.speaking);
    }
}

/// Writes Markdown and JSON reports into the output directory.
fn generate_reports(
    stats: &SessionStats,
    duration_seconds: u64,
    output_dir: &Path,
) -> anyhow::Result<()> {
    println!();
    println!("Berichte werden erstellt...");

    let report = SessionReport::new(
        VocabSummary {
            total: stats.vocab.total,
            correct: stats.vocab.correct,
            partial: stats.vocab.partial,
            incorrect: stats.vocab.incorrect,
        },
        ExamSummary {
            listening: stats.exam.listening,
            reading: stats.exam.reading,
            writing: stats.exam.writing,
            speaking: stats.exam.speaking,
        },
        duration_seconds,
    );

    std::fs::create_dir_all(output_dir)?;

    let md_path = PathBuf::from(output_dir).join("coach-report.md");
    std::fs::write(&md_path, MarkdownGenerator::new(&report).generate())?;
    println!("  Markdown-Bericht: {}", md_path.display());

    let json_path = PathBuf::from(output_dir).join("coach-report.json");
    JsonGenerator::new(&report).write_to_file(&json_path, true)?;
    println!("  JSON-Bericht: {}", json_path.display());

    Ok(())
}

// ============================================================================
// StdioFrontend
// ============================================================================

/// Terminal frontend reading from stdin and writing to stdout.
struct StdioFrontend {
    stdin: std::io::Stdin,
}

impl StdioFrontend {
    fn new() -> Self {
        Self {
            stdin: std::io::stdin(),
        }
    }

    /// Prints a prompt and reads one line, without the trailing newline.
    /// Returns `None` when stdin is closed.
    fn read_line(&mut self, prompt: &str) -> std::io::Result<Option<String>> {
        print!("{prompt}");
        std::io::stdout().flush()?;

        let mut line = String::new();
        let bytes = self.stdin.lock().read_line(&mut line)?;
        if bytes == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
    }

    fn read_input(&mut self, prompt: &str) -> CoreResult<UserInput> {
        match self.read_line(prompt)? {
            Some(line) => Ok(UserInput::parse(&line)),
            // Closed stdin ends the session like an explicit quit.
            None => Ok(UserInput::Quit),
        }
    }
}

impl Frontend for StdioFrontend {
    fn show_message(&mut self, text: &str) {
        println!("{text}");
    }

    fn show_task(&mut self, prompt: &ExercisePrompt) {
        println!();
        println!("--- {} ({}) ---", prompt.kind.label(), prompt.level);
        println!("{}", prompt.rendered_text);
    }

    fn show_feedback(&mut self, feedback: &Feedback) {
        println!();
        println!("{}", feedback.raw_text);
        println!();
    }

    fn read_answer(&mut self) -> CoreResult<UserInput> {
        self.read_input("Deine Antwort (oder q zum Beenden): ")
    }

    fn read_level(&mut self, mode: Mode) -> CoreResult<UserInput> {
        let prompt = if mode.is_vocabulary() {
            "Niveau (A1–C1): "
        } else {
            "Niveau (B2 oder C1): "
        };
        self.read_input(prompt)
    }

    fn read_direction(&mut self) -> CoreResult<UserInput> {
        println!("Richtung:");
        println!("  1) Deutsch → Englisch");
        println!("  2) Englisch → Deutsch");
        self.read_input("Auswahl: ")
    }
}

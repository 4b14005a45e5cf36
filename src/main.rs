use clap::Parser;
use rusqlite::Connection;

use nettwin::crew::{self, CrewConfig, builtin};
use nettwin::orchestrate::{self, HostOrchestrator, KickoffInputs};
use nettwin::{challenge, logbook, paths};

#[derive(Parser)]
#[command(
    name = "nettwin",
    about = "Digital twin recon pipeline: run the crew, log command output, generate challenges"
)]
struct Cli {
    /// Generate challenges from the logged records instead of running the pipeline
    #[arg(long)]
    challenges: bool,

    /// Show storage and crew resolution details
    #[arg(short, long)]
    verbose: bool,
}

fn debug_enabled() -> bool {
    std::env::var("NETTWIN_DEBUG").is_ok_and(|v| !v.is_empty() && v != "0")
}

fn open_logbook(verbose: bool) -> anyhow::Result<Connection> {
    let path = paths::db_path()
        .ok_or_else(|| anyhow::anyhow!("no usable data directory; set NETTWIN_DB_PATH"))?;
    if verbose {
        eprintln!("[nettwin] logbook: {}", path.display());
    }
    logbook::open_db(&path)
}

fn load_crew(verbose: bool) -> anyhow::Result<CrewConfig> {
    if let Some(path) = paths::crew_path() {
        let crew = crew::try_load_crew(&path)?
            .ok_or_else(|| anyhow::anyhow!("crew file not found: {}", path.display()))?;
        if verbose {
            eprintln!("[nettwin] crew: {}", path.display());
        }
        return Ok(crew);
    }
    if verbose {
        eprintln!("[nettwin] crew: built-in digital twin");
    }
    Ok(builtin::digital_twin())
}

fn cmd_challenges(cli: &Cli) -> anyhow::Result<i32> {
    let conn = open_logbook(cli.verbose)?;
    let records = logbook::read_all(&conn)?;
    let challenges = challenge::generate(&records);

    if debug_enabled() {
        eprintln!(
            "[nettwin] {} record(s), {} without a matching rule",
            records.len(),
            records.len() - challenges.len()
        );
    }

    if challenges.is_empty() {
        eprintln!("[nettwin] no challenges: the logbook has no matching records");
        return Ok(0);
    }
    for (i, text) in challenges.iter().enumerate() {
        println!("Challenge {}: {}", i + 1, text);
    }
    Ok(0)
}

fn cmd_kickoff(cli: &Cli) -> anyhow::Result<i32> {
    let crew = load_crew(cli.verbose)?;
    crew.validate()?;
    let conn = open_logbook(cli.verbose)?;

    let mut inputs = KickoffInputs::new();
    inputs.insert("topic".to_string(), builtin::DEFAULT_TOPIC.to_string());

    let orch = HostOrchestrator {
        verbose: cli.verbose,
    };
    let result = orchestrate::run_pipeline(&orch, &crew, &inputs, &conn)?;
    println!("{result}");
    Ok(0)
}

fn main() {
    let cli = Cli::parse();
    let run = if cli.challenges {
        cmd_challenges(&cli)
    } else {
        cmd_kickoff(&cli)
    };
    let exit_code = run.unwrap_or_else(|e| {
        eprintln!("[nettwin] error: {e:#}");
        1
    });
    std::process::exit(exit_code);
}

use anyhow::{Context, Result, bail};
use clap::Parser;
use crossterm::{
    event,
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use logsift::{
    app,
    record::{LogRecord, parse_records},
    source::{CommandSource, RawLogSource},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, IsTerminal, Read};
use std::panic;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(
    name = "logsift",
    version,
    about = "Interactive viewer for line-delimited JSON logs"
)]
struct Args {
    /// fetch logs for this workflow instead of reading pasted input
    #[arg(long)]
    workflow: Option<String>,

    /// command used to fetch workflow logs; {workflow} is substituted
    #[arg(long, default_value = "argo-fetch-logs {workflow}")]
    fetch_cmd: String,

    /// write debug logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.log_file.as_deref())?;

    // resolve raw input before the terminal enters raw mode; a slow
    // fetch stalls startup, never the event loop
    let records = preload_records(&args)?;

    let mut terminal = setup_terminal()?;

    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));

    let app_result = app::start(&mut terminal, records);

    restore_terminal()?;

    app_result
}

/// records from the remote fetch path or a piped stdin; None launches
/// the interactive paste mode
fn preload_records(args: &Args) -> Result<Option<Vec<LogRecord>>> {
    let raw = if let Some(workflow) = &args.workflow {
        let source = CommandSource::new(&args.fetch_cmd);
        Some(
            source
                .fetch(workflow)
                .with_context(|| format!("failed to fetch logs for workflow {workflow}"))?,
        )
    } else if !io::stdin().is_terminal() {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read piped input")?;
        Some(buffer)
    } else {
        None
    };

    let Some(text) = raw else {
        return Ok(None);
    };

    let outcome = parse_records(&text);
    if outcome.records.is_empty() {
        bail!("no valid logs found in input");
    }
    log::debug!(
        "preloaded {} records ({} lines skipped)",
        outcome.records.len(),
        outcome.skipped
    );
    Ok(Some(outcome.records))
}

fn init_logger(path: Option<&std::path::Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    simplelog::WriteLogger::init(log::LevelFilter::Debug, simplelog::Config::default(), file)?;
    Ok(())
}

fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    // alternate screen keeps the user's shell history intact;
    // bracketed paste lets multi-line pastes land in the input buffer
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend)
}

fn restore_terminal() -> io::Result<()> {
    let mut stdout = io::stdout();

    execute!(stdout, DisableBracketedPaste, LeaveAlternateScreen)?;

    while event::poll(Duration::from_millis(0))? {
        let _ = event::read()?;
    }

    disable_raw_mode()?;

    Ok(())
}

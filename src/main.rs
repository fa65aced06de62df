mod app;
mod domain;
mod input;
mod logging;
mod persistence;
mod report;
mod ui;

use anyhow::{Context, Result};
use app::AppState;
use clap::{Parser, Subcommand};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use domain::Category;
use persistence::{ensure_data_dir, init_local_data_dir, FileStore};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{error, info};

/// Event poll timeout for the TUI loop
const POLL_INTERVAL: Duration = Duration::from_millis(250);

#[derive(Parser)]
#[command(name = "daystreak")]
#[command(about = "A small terminal habit tracker with daily streaks", long_about = None)]
struct Cli {
    /// Data directory (defaults to a local .daystreak, then ~/.daystreak)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a local .daystreak directory in the current directory
    Init,
    /// Add a task for today
    Add {
        /// Task name
        name: String,
        /// Category: health, study, leisure, work or other
        #[arg(short, long, default_value = "other", value_parser = parse_category)]
        tag: Category,
    },
    /// Mark a task done, or undo it (1-based, as shown by `list`)
    Toggle {
        index: usize,
        /// Completion date (YYYY-MM-DD format). Defaults to today.
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Show today's tasks
    List,
    /// Finish the day: update the streak and clear the list
    Finish,
    /// Export tasks, activities and streak as JSON
    Save {
        /// Output file. Defaults to ./settings.json
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show per-category statistics
    Stats {
        /// Write a markdown report to this file instead of printing
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Record a completed activity
    Log {
        #[arg(short, long, value_parser = parse_category)]
        tag: Category,
        /// Date (YYYY-MM-DD format). Defaults to today.
        #[arg(short, long)]
        date: Option<String>,
    },
}

fn parse_category(s: &str) -> Result<Category, String> {
    Category::from_tag(s).ok_or_else(|| {
        format!("unknown category '{}' (expected health, study, leisure, work or other)", s)
    })
}

fn parse_date(s: &str) -> Result<chrono::NaiveDate> {
    chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| anyhow::anyhow!("Invalid date format. Use YYYY-MM-DD: {}", e))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Init must not resolve (and create) the global directory first
    if let Some(Commands::Init) = cli.command {
        return init_here();
    }

    let data_dir = ensure_data_dir(cli.data_dir.as_deref())?;
    if let Err(e) = logging::init_logging(&data_dir) {
        eprintln!("Warning: logging disabled: {:#}", e);
    }
    info!(dir = %data_dir.display(), "using data directory");

    let mut app = AppState::new(Box::new(FileStore::new(&data_dir)));

    let result = match cli.command {
        None => run_tui(&mut app),
        Some(command) => run_command(&mut app, command),
    };

    if let Err(e) = &result {
        error!(error = %e, "command failed");
    }
    result
}

fn init_here() -> Result<()> {
    let current_dir = std::env::current_dir().context("Could not determine current directory")?;
    let dir = init_local_data_dir(&current_dir)?;
    println!("Initialized daystreak directory: {}", dir.display());
    println!();
    println!("daystreak will now use this local directory for its data.");
    Ok(())
}

fn run_command(app: &mut AppState, command: Commands) -> Result<()> {
    match command {
        Commands::Init => init_here()?,
        Commands::Add { name, tag } => {
            let task = app.add_task(&name, tag)?;
            app.save()?;
            println!("Added task {}: {} [{}]", app.tasks.len(), task.name, task.tag);
        }
        Commands::Toggle { index, date } => {
            let Some(position) = index.checked_sub(1) else {
                anyhow::bail!("Task numbers start at 1");
            };
            let task = match date {
                Some(date_str) => app.toggle_task_on(position, parse_date(&date_str)?)?,
                None => app.toggle_task(position)?,
            };
            app.save()?;
            let state = if task.completed { "done" } else { "not done" };
            println!("{} is {}", task.name, state);
        }
        Commands::List => {
            if app.tasks.is_empty() {
                println!("No tasks for today.");
            }
            for (i, task) in app.tasks.all().iter().enumerate() {
                println!("{:>2}. {} {} [{}]", i + 1, task.checkbox(), task.name, task.tag);
            }
            println!("Streak: {} days", app.streak());
        }
        Commands::Finish => {
            let outcome = app.finish_day()?;
            app.save()?;
            println!("{}", outcome.message());
            println!("Streak: {} days", outcome.streak);
            if !outcome.persisted {
                eprintln!("Warning: the streak could not be saved to disk.");
            }
        }
        Commands::Save { output } => {
            let path = app.save_snapshot(output.as_deref())?;
            println!("Snapshot saved to {}", path.display());
        }
        Commands::Stats { output } => {
            let tasks = app.tasks.all();
            match output {
                Some(path) => {
                    let today = chrono::Local::now().date_naive();
                    let path =
                        report::generate_report(tasks, &app.activities, app.streak(), today, &path)?;
                    println!("Report generated: {}", path.display());
                }
                None => print!("{}", report::render_summary(tasks, &app.activities, app.streak())),
            }
        }
        Commands::Log { tag, date } => {
            let date = match date {
                Some(date_str) => parse_date(&date_str)?,
                None => chrono::Local::now().date_naive(),
            };
            app.record_activity(date, tag);
            app.save()?;
            println!("Logged {} activity on {}", tag, date);
        }
    }
    Ok(())
}

fn run_tui(app: &mut AppState) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Save pending changes on exit
    if app.needs_save {
        if let Err(e) = app.save() {
            eprintln!("Error saving state: {}", e);
        }
    }

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut AppState) -> Result<()> {
    loop {
        terminal.draw(|f| ui::render(f, app))?;

        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events (ignore key release)
                if key.kind == KeyEventKind::Press && input::handle_key(app, key) {
                    return Ok(());
                }
            }
        }

        app.autosave();
    }
}

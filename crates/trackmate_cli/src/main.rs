//! Command-line driver over the TrackMate core.
//!
//! # Responsibility
//! - Provide a small executable to exercise the task store against a SQLite
//!   file without any UI host.
//! - Keep output deterministic and line-oriented.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use trackmate_core::{
    core_version, default_log_level, init_logging, open_storage, page_window, ping, CoreConfig,
    Filter, ListState, Notice, Preferences, SqliteStorage, StoreError, TaskId, TaskStore,
};

#[derive(Parser, Debug)]
#[command(name = "trackmate", version, about = "Single-user to-do list")]
struct Cli {
    /// SQLite file holding tasks and preferences.
    #[arg(long, env = "TRACKMATE_DB_PATH")]
    db: Option<PathBuf>,

    /// Absolute directory for rolling log files; logging is off when unset.
    #[arg(long)]
    log_dir: Option<String>,

    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print core health and version.
    Ping,
    /// List one page of tasks.
    List {
        /// all|completed|pending; defaults to the saved filter.
        #[arg(long)]
        filter: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// Add a task at the top of the list.
    Add { title: String },
    /// Flip a task between pending and completed.
    Toggle { id: String },
    /// Rename a task.
    Edit { id: String, title: String },
    /// Delete a task permanently.
    Delete { id: String },
    /// Move a task into the slot of another task.
    Move { dragged: String, target: String },
    /// Save the default filter.
    Filter { filter: String },
    /// Switch between light and dark theme.
    Theme,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        if let Err(err) = init_logging(level, log_dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), String> {
    if let Command::Ping = cli.command {
        println!("trackmate_core ping={}", ping());
        println!("trackmate_core version={}", core_version());
        return Ok(());
    }

    let path = cli
        .db
        .clone()
        .unwrap_or_else(|| std::env::temp_dir().join("trackmate.sqlite3"));
    let conn = open_storage(&path).map_err(|err| format!("cannot open {}: {err}", path.display()))?;
    let storage = SqliteStorage::try_new(&conn).map_err(|err| err.to_string())?;
    let config = CoreConfig::default();
    let mut store = TaskStore::open(&storage);

    match &cli.command {
        Command::Ping => {}
        Command::List { filter, page } => {
            let saved = Preferences::load(&storage, &config).filter();
            let filter = match filter {
                Some(raw) => parse_filter(raw)?,
                None => saved,
            };
            let mut state = ListState::new(filter);
            state.set_page(*page);
            let projected = state.refresh(store.tasks(), config.page_size());

            for task in &projected.items {
                let mark = if task.completed { 'x' } else { ' ' };
                println!("[{mark}] {}  {}", task.id, task.title);
            }
            let pages = page_window(state.page, projected.total_pages, 5)
                .map(|range| {
                    range
                        .map(|page| page.to_string())
                        .collect::<Vec<_>>()
                        .join(" ")
                })
                .unwrap_or_default();
            println!(
                "filter={} total={} page={}/{} pages=[{pages}]",
                filter.as_str(),
                projected.filtered_count,
                state.page,
                projected.total_pages
            );
        }
        Command::Add { title } => {
            let task = store.create(title).map_err(describe)?;
            println!("{}", Notice::task_added().message);
            println!("{}", task.id);
        }
        Command::Toggle { id } => {
            store.toggle(&TaskId::from(id.as_str())).map_err(describe)?;
        }
        Command::Edit { id, title } => {
            if store
                .edit(&TaskId::from(id.as_str()), title)
                .map_err(describe_edit)?
            {
                println!("{}", Notice::task_updated().message);
            }
        }
        Command::Delete { id } => {
            if store.delete(&TaskId::from(id.as_str())).map_err(describe)? {
                println!("{}", Notice::task_deleted().message);
            }
        }
        Command::Move { dragged, target } => {
            store
                .reorder(&TaskId::from(dragged.as_str()), &TaskId::from(target.as_str()))
                .map_err(describe)?;
        }
        Command::Filter { filter } => {
            let filter = parse_filter(filter)?;
            Preferences::load(&storage, &config)
                .set_filter(filter)
                .map_err(|err| err.to_string())?;
        }
        Command::Theme => {
            let theme = Preferences::load(&storage, &config)
                .toggle_theme()
                .map_err(|err| err.to_string())?;
            println!("theme={}", theme.as_str());
        }
    }
    Ok(())
}

fn parse_filter(raw: &str) -> Result<Filter, String> {
    Filter::parse(raw).ok_or_else(|| format!("unknown filter `{raw}`; expected all|completed|pending"))
}

fn describe(err: StoreError) -> String {
    Notice::for_store_error(&err).map_or_else(|| err.to_string(), |notice| notice.message)
}

fn describe_edit(err: StoreError) -> String {
    Notice::for_edit_error(&err).map_or_else(|| err.to_string(), |notice| notice.message)
}

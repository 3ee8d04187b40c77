mod tui;

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{anyhow, Result};
use clap::Parser;
use swipetodo_core::{
    parse_args, parse_due_date, Config, FileTaskStore, FilterCriteria, StatusFilter, TaskRecord,
    TaskService,
};
use tabled::settings::object::Rows;
use tabled::settings::{Color, Modify, Style};
use tabled::{Table, Tabled};
use tracing::Level;

#[derive(Parser)]
#[command(name = "swipetodo")]
#[command(about = "A single-list todo manager with drag-to-reorder", long_about = None)]
struct Cli {
    /// Directory holding tasks.json and config.json (default: ~/.swipetodo)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Emit debug logs (stderr, or swipetodo.log while the TUI is open)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Add a task (usage: add Buy milk desc:"2 litres" due:tomorrow)
    Add {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// List tasks in their saved order
    List {
        /// all, active or completed
        #[arg(short, long, default_value = "all")]
        filter: StatusFilter,
        /// Case-insensitive text search
        #[arg(short, long, default_value = "")]
        search: String,
        /// Print the filtered tasks as JSON
        #[arg(long)]
        json: bool,
    },
    /// Flip a task between active and completed
    Toggle {
        /// Task id or unique id prefix
        id: String,
    },
    /// Delete a task
    Delete {
        /// Task id or unique id prefix
        id: String,
    },
    /// Delete every completed task
    ClearCompleted,
    /// Move the task at position FROM to position TO (1-based, unfiltered list)
    Move { from: usize, to: usize },
    /// Open the Terminal User Interface
    Tui,
}

#[derive(Tabled)]
struct ListRow {
    #[tabled(rename = "#")]
    position: usize,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "St")]
    status: &'static str,
    #[tabled(rename = "Task")]
    text: String,
    #[tabled(rename = "Due")]
    due: String,
}

impl ListRow {
    fn new(position: usize, task: &TaskRecord) -> Self {
        Self {
            position,
            id: task.short_id(),
            status: if task.completed { "✔" } else { "☐" },
            text: task.text.clone(),
            due: task
                .due_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "-".to_string()),
        }
    }
}

fn init_logging(cli: &Cli, config: &Config) -> Result<()> {
    if !cli.verbose {
        return Ok(());
    }
    let builder = tracing_subscriber::fmt().with_max_level(Level::DEBUG);

    let runs_tui = matches!(cli.command, None | Some(Commands::Tui));
    if runs_tui {
        // stderr belongs to the terminal UI
        std::fs::create_dir_all(&config.data_dir)?;
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(config.log_path())?;
        builder.with_ansi(false).with_writer(Mutex::new(file)).init();
    } else {
        builder.with_writer(std::io::stderr).init();
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.data_dir.clone())?;
    init_logging(&cli, &config)?;

    let store = FileTaskStore::new(&config.data_dir)?;
    let mut service = TaskService::load(store)?;

    match cli.command {
        Some(Commands::Add { args }) => {
            let parsed = parse_args(&args);

            let due = match parsed.metadata.get("due") {
                Some(d) => match parse_due_date(d) {
                    Ok(date) => Some(date),
                    Err(e) => {
                        println!("Warning: Invalid due date '{}': {}", d, e);
                        None
                    }
                },
                None => None,
            };
            let description = parsed.metadata.get("description").cloned();

            match service.add(&parsed.text, description, due)? {
                Some(task) => {
                    println!("Task added: {} (ID: {})", task.text, task.short_id());
                    if let Some(d) = task.due_date {
                        println!("  Due: {}", d);
                    }
                    if let Some(desc) = &task.description {
                        println!("  Description: {}", desc);
                    }
                }
                None => println!("Nothing to add: task text is empty."),
            }
        }
        Some(Commands::List { filter, search, json }) => {
            let criteria = FilterCriteria::new(filter, search);
            let view = service.view(&criteria);

            if json {
                println!("{}", serde_json::to_string_pretty(&view)?);
                return Ok(());
            }

            if view.is_empty() {
                println!("{}. {}.", criteria.empty_message(), criteria.empty_hint());
            } else {
                let list = service.list();
                let rows: Vec<ListRow> = view
                    .iter()
                    .map(|task| {
                        let position = list.position(&task.id).map(|p| p + 1).unwrap_or_default();
                        ListRow::new(position, task)
                    })
                    .collect();
                let mut table = Table::new(rows);
                table
                    .with(Style::modern())
                    .with(Modify::new(Rows::first()).with(Color::FG_CYAN));
                println!("{}", table);
            }
            println!("{} items left", service.count_active());
        }
        Some(Commands::Toggle { id }) => {
            let id = service.resolve_id(&id)?;
            let completed = service.toggle(&id)?;
            let state = if completed { "completed" } else { "active" };
            println!("Task {} is now {}.", &id.to_string()[..8], state);
        }
        Some(Commands::Delete { id }) => {
            let id = service.resolve_id(&id)?;
            let removed = service.delete(&id)?;
            println!("Task deleted: {}", removed.text);
        }
        Some(Commands::ClearCompleted) => {
            let removed = service.clear_completed()?;
            println!("Cleared {} completed task(s). {} items left.", removed, service.count_active());
        }
        Some(Commands::Move { from, to }) => {
            if from == 0 || to == 0 {
                return Err(anyhow!("Positions start at 1"));
            }
            service.reorder(from - 1, to - 1)?;
            println!("Moved task from position {} to {}.", from, to);
        }
        Some(Commands::Tui) | None => {
            tui::run(service, &config)?;
        }
    }
    Ok(())
}

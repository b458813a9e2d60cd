mod app;
mod config;
mod domain;
mod error;
mod gateway;
mod input;
mod logging;
mod notifications;
mod session;
mod task_list;
mod ticker;
mod timer;
mod ui;

use anyhow::{Context, Result};
use app::AppState;
use clap::{Parser, Subcommand};
use config::Config;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use domain::{Priority, Status, SuggestionRequest, Task, UpdateSubtaskDto};
use gateway::{Gateway, HttpGateway};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::rc::Rc;
use ticker::Ticker;
use tracing::info;

#[derive(Parser)]
#[command(name = "focusup")]
#[command(about = "Terminal client for the FocusUp task API, with a focus timer", long_about = None)]
struct Cli {
    /// API base URL (overrides config.json and FOCUSUP_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a local .focusup directory in the current directory
    Init,
    /// List tasks, optionally filtered by the server
    List {
        /// Status label: pendiente, "en progreso", completada
        #[arg(short, long)]
        status: Option<String>,
        /// Priority label: Alta, Media, Baja
        #[arg(short, long)]
        priority: Option<String>,
    },
    /// Show one task with its subtasks
    Show { id: String },
    /// Show one subtask
    Subtask { id: String },
    /// List subtasks
    Subtasks {
        #[arg(short, long)]
        status: Option<String>,
    },
    /// Change a task's status
    Status { id: String, status: String },
    /// Change a subtask's status
    SubtaskStatus { id: String, status: String },
    /// Ask the AI endpoint for subtask ideas
    Suggest {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        #[arg(long, default_value = "Media")]
        priority: String,
    },
    /// Link a subtask to a task
    Link { task: String, subtask: String },
    /// Remove the subtask relation from a task
    Unlink { task: String },
    /// Delete a task
    Delete { id: String },
}

fn parse_status(label: &str) -> Result<Status> {
    Status::from_label(label).ok_or_else(|| error::ClientError::InvalidStatus(label.to_string()).into())
}

fn parse_priority(label: &str) -> Result<Priority> {
    Priority::from_label(label)
        .with_context(|| format!("Invalid priority: {} (expected Alta, Media or Baja)", label))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(Commands::Init) = cli.command {
        let dir = config::init_local_dir()?;
        println!("Initialized focusup directory: {}", dir.display());
        println!();
        println!("Edit {} to point at your API.", dir.join("config.json").display());
        println!("Run 'focusup' to start.");
        return Ok(());
    }

    let config = config::resolve(cli.api_url)?;
    let gateway: Rc<dyn Gateway> = Rc::new(HttpGateway::new(&config.api_url, config.request_timeout())?);

    match cli.command {
        None => {
            logging::init_file_logging(&config::log_file()?, &config.log_level)?;
            run_tui(gateway, &config)
        }
        Some(command) => {
            logging::init_stderr_logging("warn");
            run_command(gateway.as_ref(), command)
        }
    }
}

fn print_task(task: &Task) {
    println!(
        "{}  [{}] [{}]  {}",
        task.id,
        task.priority.label(),
        task.status.label(),
        task.title
    );
}

fn run_command(gateway: &dyn Gateway, command: Commands) -> Result<()> {
    match command {
        Commands::Init => {}
        Commands::List { status, priority } => {
            let tasks = match (status, priority) {
                (Some(s), _) => gateway.tasks_by_status(parse_status(&s)?)?,
                (None, Some(p)) => gateway.tasks_by_priority(parse_priority(&p)?)?,
                (None, None) => gateway.list_tasks()?,
            };
            if tasks.is_empty() {
                println!("No tasks.");
            }
            tasks.iter().for_each(print_task);
        }
        Commands::Show { id } => {
            let task = gateway.get_task(&id)?;
            print_task(&task);
            println!();
            println!("{}", task.description);
            for subtask in &task.subtasks {
                println!("  - {} [{}] {}", subtask.id, subtask.status.label(), subtask.title);
            }
        }
        Commands::Subtask { id } => {
            let subtask = gateway.get_subtask(&id)?;
            println!("{}  [{}]  {}", subtask.id, subtask.status.label(), subtask.title);
            if let Some(description) = &subtask.description {
                println!();
                println!("{}", description);
            }
        }
        Commands::Subtasks { status } => {
            let subtasks = match status {
                Some(s) => gateway.subtasks_by_status(parse_status(&s)?)?,
                None => gateway.list_subtasks()?,
            };
            for subtask in &subtasks {
                println!("{}  [{}]  {}", subtask.id, subtask.status.label(), subtask.title);
            }
        }
        Commands::Status { id, status } => {
            let task = gateway.update_task(&id, &domain::UpdateTaskDto::status_only(parse_status(&status)?))?;
            print_task(&task);
        }
        Commands::SubtaskStatus { id, status } => {
            let patch = UpdateSubtaskDto {
                status: Some(parse_status(&status)?),
                ..UpdateSubtaskDto::default()
            };
            let subtask = gateway.update_subtask(&id, &patch)?;
            println!("{}  [{}]  {}", subtask.id, subtask.status.label(), subtask.title);
        }
        Commands::Suggest {
            title,
            description,
            priority,
        } => {
            let suggestions = gateway.suggest_subtasks(&SuggestionRequest {
                title,
                description,
                priority: parse_priority(&priority)?,
            })?;
            for suggestion in &suggestions {
                println!("- {}: {}", suggestion.title, suggestion.description);
            }
        }
        Commands::Link { task, subtask } => {
            gateway.link_subtask(&task, &subtask)?;
            println!("Linked {} to {}", subtask, task);
        }
        Commands::Unlink { task } => {
            gateway.unlink_subtask(&task)?;
            println!("Unlinked subtask from {}", task);
        }
        Commands::Delete { id } => {
            gateway.delete_task(&id)?;
            println!("Deleted {}", id);
        }
    }
    Ok(())
}

fn run_tui(gateway: Rc<dyn Gateway>, config: &Config) -> Result<()> {
    info!(api_url = %config.api_url, "Starting focusup");

    let mut app = AppState::new(gateway, config.timer());
    app.reload();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &result {
        eprintln!("Error: {}", err);
    }
    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut AppState) -> Result<()> {
    let poll_rate = ticker::tick_duration();
    // Dropped on return, which stops the tick thread
    let seconds = Ticker::seconds();

    loop {
        terminal.draw(|f| ui::render(f, app))?;

        if event::poll(poll_rate)? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events (ignore key release)
                if key.kind == KeyEventKind::Press && input::handle_key(app, key)? {
                    return Ok(());
                }
            }
        }

        // Ticks that piled up during a slow request are replayed here
        app.on_seconds(seconds.drain());
    }
}

//! Terminal front-end for TaskPilot.
//!
//! # Responsibility
//! - Drive `AppController` from one-shot subcommands.
//! - Print the rendered panel state instead of drawing a window.

use clap::{Parser, Subcommand};
use log::info;
use std::process::ExitCode;
use std::time::{Duration, Instant};
use taskpilot_core::app::NotificationLevel;
use taskpilot_core::view::{ViewItem, ViewKey};
use taskpilot_core::{init_logging, AppConfig, AppController, Importance, Panel, RecordId};

/// Upper bound on how long an AI subcommand waits for its worker.
const AI_WAIT: Duration = Duration::from_secs(120);

#[derive(Parser, Debug)]
#[command(name = "taskpilot", version, about = "Tasks, lists and AI study help")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print core linkage and version.
    Ping,
    /// Show the tasks panel.
    #[command(alias = "t")]
    Tasks,
    /// Show the lists panel.
    #[command(alias = "l")]
    Lists,
    AddTask {
        name: String,
        #[arg(long, short, default_value = "media", value_parser = parse_importance)]
        importance: Importance,
        #[arg(long, short, default_value = "")]
        notes: String,
    },
    /// Create a list; each element argument becomes one line.
    AddList {
        title: String,
        elements: Vec<String>,
    },
    Toggle {
        id: RecordId,
    },
    DeleteTask {
        id: RecordId,
    },
    DeleteList {
        id: RecordId,
    },
    Details {
        id: RecordId,
    },
    /// Ask the AI for a study topic.
    Topic,
    /// Ask the AI to summarize current activity.
    Analyze,
}

fn parse_importance(value: &str) -> Result<Importance, String> {
    Importance::parse(value).ok_or_else(|| format!("unknown importance `{value}`"))
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("configuration error: {err}");
            return ExitCode::FAILURE;
        }
    };
    if let Err(err) = init_logging(&config.logging) {
        eprintln!("logging disabled: {err}");
    }

    let Some(command) = cli.command else {
        print_probe();
        return ExitCode::SUCCESS;
    };
    if matches!(command, Commands::Ping) {
        print_probe();
        return ExitCode::SUCCESS;
    }

    let mut app = AppController::from_config(&config);
    if !app.schema_report().is_complete() {
        eprintln!("warning: some tables could not be created; see logs");
    }

    let name = command_name(&command);
    let ok = run(&mut app, command);
    info!(
        "event=cli_command module=cli status={} command={name}",
        if ok { "ok" } else { "error" }
    );
    print_banner(&app);
    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Ping => "ping",
        Commands::Tasks => "tasks",
        Commands::Lists => "lists",
        Commands::AddTask { .. } => "add-task",
        Commands::AddList { .. } => "add-list",
        Commands::Toggle { .. } => "toggle",
        Commands::DeleteTask { .. } => "delete-task",
        Commands::DeleteList { .. } => "delete-list",
        Commands::Details { .. } => "details",
        Commands::Topic => "topic",
        Commands::Analyze => "analyze",
    }
}

fn print_probe() {
    println!("taskpilot_core ping={}", taskpilot_core::ping());
    println!("taskpilot_core version={}", taskpilot_core::core_version());
}

fn run(app: &mut AppController, command: Commands) -> bool {
    match command {
        Commands::Ping => true,
        Commands::Tasks => {
            app.show_panel(Panel::Tasks);
            print_view(app, ViewKey::Tasks);
            true
        }
        Commands::Lists => {
            app.show_panel(Panel::Lists);
            print_view(app, ViewKey::Lists);
            true
        }
        Commands::AddTask {
            name,
            importance,
            notes,
        } => app.add_task(&name, importance, &notes),
        Commands::AddList { title, elements } => app.add_list(&title, &elements.join("\n")),
        Commands::Toggle { id } => {
            let ok = app.toggle_task(id);
            if ok {
                print_view(app, ViewKey::Tasks);
            }
            ok
        }
        Commands::DeleteTask { id } => app.delete_task(id),
        Commands::DeleteList { id } => app.delete_list(id),
        Commands::Details { id } => match app.open_task_details(id) {
            Some(details) => {
                println!("{}", details.name);
                println!("  importance: {}", details.importance);
                println!("  created:    {}", details.created_at);
                println!("  notes:      {}", details.notes);
                true
            }
            None => false,
        },
        Commands::Topic => {
            app.request_study_topic();
            println!("{}", app.state().study_topic);
            app.wait_for_events(AI_WAIT);
            println!("{}", app.state().study_topic);
            true
        }
        Commands::Analyze => {
            app.show_panel(Panel::AiAnalysis);
            app.request_analysis();
            println!("{}", app.state().analysis_text);
            app.wait_for_events(AI_WAIT);
            println!("{}", app.state().analysis_text);
            true
        }
    }
}

fn print_view(app: &AppController, view: ViewKey) {
    for item in app.state().views.items(view) {
        match item {
            ViewItem::Task(row) => {
                let mark = if row.completed { "x" } else { " " };
                let importance = row
                    .importance
                    .map(|importance| format!(" ({})", importance.label()))
                    .unwrap_or_default();
                println!("[{mark}] #{} {}{importance}", row.id, row.name);
            }
            ViewItem::List(card) => {
                println!("#{} {}", card.id, card.title);
                if let Some(placeholder) = card.placeholder {
                    println!("  {placeholder}");
                }
                for element in &card.elements {
                    println!("  - {element}");
                }
            }
            ViewItem::Placeholder(text) => println!("{text}"),
        }
    }
}

fn print_banner(app: &AppController) {
    let Some(notification) = app.state().banner.visible(Instant::now()) else {
        return;
    };
    match notification.level {
        NotificationLevel::Error => eprintln!("error: {}", notification.message),
        NotificationLevel::Success | NotificationLevel::Info => {
            println!("{}", notification.message)
        }
    }
}

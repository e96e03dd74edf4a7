mod domain;
mod error;
mod persistence;
mod repo;
mod splitter;
mod timeline;
mod today;

use anyhow::Result;
use chrono::{DateTime, Local, NaiveTime, TimeZone};
use clap::{Parser, Subcommand};
use persistence::{database_file, init_local_dir, Store};
use repo::TaskRepository;
use timeline::{render_timeline, render_today, DEFAULT_BAR_WIDTH};

#[derive(Parser)]
#[command(name = "timecut")]
#[command(about = "A task timeline manager with sub-task cutting and a daily focus list", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a local .timecut directory in the current directory
    Init,
    /// Create a project
    Project {
        /// Project title
        title: String,
        /// Display color (hex)
        #[arg(short, long, default_value = domain::DEFAULT_COLOR)]
        color: String,
    },
    /// Create a main task
    Add {
        /// Task title
        title: String,
        /// Start time as HH:MM today. Defaults to now.
        #[arg(long)]
        at: Option<String>,
        /// Longer description
        #[arg(short, long)]
        description: Option<String>,
        /// Project id (unique prefix accepted)
        #[arg(short, long)]
        project: Option<String>,
        /// Owner id
        #[arg(short, long, default_value = "local")]
        user: String,
    },
    /// Create a sub-task under a main task
    Sub {
        /// Main task id (unique prefix accepted)
        task: String,
        /// Sub-task title
        title: String,
        /// Estimated time in minutes
        #[arg(short, long)]
        estimate: i64,
        /// Timeline rank; defaults to the end of the task
        #[arg(short, long)]
        order: Option<f64>,
        /// Longer description
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Split a sub-task into two parts at the given minute offset
    Cut {
        /// Sub-task id (unique prefix accepted)
        sub_task: String,
        /// Minutes kept by the first part
        minutes: i64,
    },
    /// Pull a sub-task into the daily focus list
    Focus {
        /// Sub-task id (unique prefix accepted)
        sub_task: String,
    },
    /// Return a sub-task from the focus list to its timeline
    Unfocus {
        /// Sub-task id (unique prefix accepted)
        sub_task: String,
        /// Owning main task id (unique prefix accepted)
        task: String,
    },
    /// Show the timeline and the daily focus list
    List {
        /// Owner id
        #[arg(short, long, default_value = "local")]
        user: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Commands::Init = cli.command {
        let data_dir = init_local_dir()?;
        println!("Initialized timecut directory: {}", data_dir.display());
        println!();
        println!("Timecut will now use this local directory for task storage.");
        return Ok(());
    }

    let mut repo = TaskRepository::new(Store::open(database_file()?)?);

    match cli.command {
        Commands::Init => unreachable!(),
        Commands::Project { title, color } => {
            let project = repo.create_project(title, color)?;
            println!("Created project {}  {}", short_id(&project.id), project.title);
        }
        Commands::Add {
            title,
            at,
            description,
            project,
            user,
        } => {
            let project_id = match project {
                Some(prefix) => Some(repo.resolve_project(&prefix)?.id),
                None => None,
            };
            let view =
                repo.create_main_task(title, description, parse_start_time(at)?, project_id, user)?;
            println!("Created task {}  {}", short_id(&view.task.id), view.task.title);
        }
        Commands::Sub {
            task,
            title,
            estimate,
            order,
            description,
        } => {
            let main_task = repo.resolve_main_task(&task)?;
            let order = order.unwrap_or_else(|| {
                // Append after the current last sub-task
                repo.list_main_tasks(&main_task.user_id)
                    .ok()
                    .and_then(|views| {
                        views
                            .into_iter()
                            .find(|v| v.task.id == main_task.id)
                            .and_then(|v| v.sub_tasks.last().map(|st| st.order.floor() + 1.0))
                    })
                    .unwrap_or(1.0)
            });
            let sub = repo.create_sub_task(title, description, estimate, main_task.id, order)?;
            println!(
                "Created sub-task {}  {} · {}",
                short_id(&sub.id),
                sub.title,
                timeline::format_minutes(sub.estimated_time)
            );
        }
        Commands::Cut { sub_task, minutes } => {
            let sub = repo.resolve_sub_task(&sub_task)?;
            let outcome = splitter::cut(&mut repo, sub.id, minutes)?;
            println!(
                "Cut {} into {} ({}) and {} ({})",
                short_id(&sub.id),
                outcome.updated_original.title,
                timeline::format_minutes(outcome.updated_original.estimated_time),
                outcome.new_sub_task.title,
                timeline::format_minutes(outcome.new_sub_task.estimated_time)
            );
        }
        Commands::Focus { sub_task } => {
            let sub = repo.resolve_sub_task(&sub_task)?;
            let updated = today::promote(&mut repo, sub.id)?;
            println!(
                "Focused {}  {} (rank {})",
                short_id(&updated.id),
                updated.title,
                updated.today_order.unwrap_or(0)
            );
        }
        Commands::Unfocus { sub_task, task } => {
            let sub = repo.resolve_sub_task(&sub_task)?;
            let main_task = repo.resolve_main_task(&task)?;
            let updated = today::demote(&mut repo, sub.id, main_task.id)?;
            println!("Unfocused {}  {}", short_id(&updated.id), updated.title);
        }
        Commands::List { user } => {
            let views = repo.list_main_tasks(&user)?;
            print!("{}", render_timeline(&views, DEFAULT_BAR_WIDTH));
            print!("{}", render_today(&views));
        }
    }

    Ok(())
}

fn short_id(id: &uuid::Uuid) -> String {
    id.to_string()[..8].to_string()
}

/// Parse an optional HH:MM into today at that time; default to now
fn parse_start_time(at: Option<String>) -> Result<DateTime<Local>> {
    match at {
        None => Ok(Local::now()),
        Some(s) => {
            let time = NaiveTime::parse_from_str(&s, "%H:%M")
                .map_err(|e| anyhow::anyhow!("Invalid time format. Use HH:MM: {}", e))?;
            let today = Local::now().date_naive();
            Local
                .from_local_datetime(&today.and_time(time))
                .single()
                .ok_or_else(|| anyhow::anyhow!("Ambiguous local time: {}", s))
        }
    }
}

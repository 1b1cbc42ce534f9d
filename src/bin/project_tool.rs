use anyhow::{Context, Result, anyhow, bail};
use chrono::{Days, Local};
use clap::{Parser, Subcommand, ValueEnum};
use project_tracker::{
    FileProjectStore, ListParams, ProjectInput, ProjectService,
    validation::{FormMode, validate_dates},
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "project-tool")]
#[command(about = "Developer tooling for the project tracker store")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Insert sample projects into a snapshot file.
    Seed {
        #[arg(long, default_value = "data/projects.json")]
        path: PathBuf,
        #[arg(long, default_value_t = 12)]
        count: u32,
    },
    /// Print one listing page as JSON.
    List {
        #[arg(long, default_value = "data/projects.json")]
        path: PathBuf,
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        limit: Option<u32>,
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        sort_field: Option<String>,
        #[arg(long)]
        sort_direction: Option<String>,
    },
    /// Run the form date checks on a start/end pair.
    CheckDates {
        #[arg(long)]
        start: String,
        #[arg(long)]
        end: String,
        #[arg(long, value_enum, default_value_t = Mode::Create)]
        mode: Mode,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    Create,
    Edit,
}

impl From<Mode> for FormMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Create => FormMode::Create,
            Mode::Edit => FormMode::Edit,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Seed { path, count } => seed(path, count).await,
        Command::List {
            path,
            page,
            limit,
            search,
            sort_field,
            sort_direction,
        } => {
            let params = ListParams {
                page: page.map(|value| value.to_string()),
                limit: limit.map(|value| value.to_string()),
                search,
                sort_field,
                sort_direction,
            };
            list(path, &params).await
        }
        Command::CheckDates { start, end, mode } => check_dates(&start, &end, mode.into()),
    }
}

fn open_service(path: &PathBuf) -> Result<ProjectService> {
    let store = FileProjectStore::open(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    Ok(ProjectService::new(Arc::new(store)))
}

async fn seed(path: PathBuf, count: u32) -> Result<()> {
    let service = open_service(&path)?;
    let today = Local::now().date_naive();

    let mut created = 0;
    for index in 1..=count {
        let start = today
            .checked_add_days(Days::new(u64::from(index) * 7))
            .ok_or_else(|| anyhow!("start date out of range"))?;
        let end = start
            .checked_add_days(Days::new(30))
            .ok_or_else(|| anyhow!("end date out of range"))?;

        let input = ProjectInput::new(
            format!("Sample project {index}"),
            format!("SEED-{index:04}"),
            format!("Seeded project number {index}"),
            start.to_string(),
            end.to_string(),
        );

        match service.create(&input).await {
            Ok(project) => {
                created += 1;
                println!("created {} ({})", project.eid, project.id);
            }
            Err(err) => println!("skipped {}: {err}", input.eid),
        }
    }

    println!("{created} project(s) written to {}", path.display());
    Ok(())
}

async fn list(path: PathBuf, params: &ListParams) -> Result<()> {
    let service = open_service(&path)?;
    let page = service.list(params).await?;
    println!("{}", serde_json::to_string_pretty(&page)?);
    Ok(())
}

fn check_dates(start: &str, end: &str, mode: FormMode) -> Result<()> {
    let errors = validate_dates(mode, start, end);
    if errors.is_empty() {
        println!("dates are valid");
        return Ok(());
    }

    for (field, message) in &errors {
        println!("{field}: {message}");
    }
    bail!("{} date problem(s) found", errors.len())
}

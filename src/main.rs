use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::time::Instant;

use clap::{Args, Parser, Subcommand};
use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use ratatui::DefaultTerminal;
use tokio_util::sync::CancellationToken;

use lessonplan::api::LessonPlanClient;
use lessonplan::app::App;
use lessonplan::config::{Config, load_config};
use lessonplan::lesson::GradeLevel;
use lessonplan::suggestions::{Category, SuggestionCoordinator};

const LOG_ENV: &str = "LESSONPLAN_LOG";

#[derive(Parser, Debug)]
#[command(
    name = "lessonplan",
    version,
    about = "Plan lessons from a topic and grade level with suggested outcomes and tags"
)]
struct Cli {
    /// Config file [default: <config dir>/lessonplan/config.toml]
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    /// Base URL of the lesson plan service
    #[arg(long, value_name = "URL", global = true)]
    api_url: Option<String>,

    /// Quiet period after typing before suggestions are fetched
    #[arg(long, value_name = "MS")]
    debounce_ms: Option<u64>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate one lesson plan and print it to stdout
    Generate(GenerateArgs),
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Lesson topic
    #[arg(long, default_value = "")]
    topic: String,

    /// Grade level, e.g. "Middle School" [default: from config]
    #[arg(long, value_parser = parse_grade)]
    grade: Option<GradeLevel>,

    /// Learning outcome to include (repeatable)
    #[arg(long = "outcome", value_name = "TEXT")]
    outcomes: Vec<String>,

    /// Disambiguation tag to include (repeatable)
    #[arg(long = "tag", value_name = "TEXT")]
    tags: Vec<String>,

    /// Extra notes for the plan
    #[arg(long)]
    notes: Option<String>,

    /// Reference document to attach
    #[arg(long, value_name = "PATH")]
    document: Option<PathBuf>,
}

fn parse_grade(value: &str) -> Result<GradeLevel, String> {
    GradeLevel::from_label(value).ok_or_else(|| {
        let labels: Vec<&str> = GradeLevel::ALL.iter().map(|g| g.label()).collect();
        format!("expected one of: {}", labels.join(", "))
    })
}

fn main() -> Result<()> {
    // Install color-eyre panic hook for better error messages
    color_eyre::install()?;

    let cli = Cli::parse();
    init_logging();

    let loaded = load_config(cli.config.as_deref());
    let mut config = loaded.config;
    if let Some(url) = &cli.api_url {
        config.service.base_url = url.clone();
    }
    if let Some(ms) = cli.debounce_ms {
        config.suggestions.debounce_ms = ms;
    }

    match cli.command {
        Some(Command::Generate(args)) => {
            if let Some(warning) = &loaded.warning {
                eprintln!("warning: {}", warning);
            }
            generate(&config, args)
        }
        None => {
            let app = App::new(config, loaded.warning);

            // Initialize terminal (handles raw mode, alternate screen, etc.)
            let terminal = ratatui::init();
            let result = run(terminal, app);
            ratatui::restore();

            result
        }
    }
}

fn run(mut terminal: DefaultTerminal, mut app: App) -> Result<()> {
    loop {
        terminal.draw(|frame| app.render(frame))?;
        app.handle_events()?;
        app.tick(Instant::now());

        if app.should_quit() {
            break;
        }
    }
    app.shutdown();
    Ok(())
}

/// Validate the arguments the same way the dialog does, then call the service once
fn generate(config: &Config, args: GenerateArgs) -> Result<()> {
    let now = Instant::now();
    let mut input = SuggestionCoordinator::new(
        &config.suggestions,
        args.grade.or(config.dialog.default_grade),
    );
    input.set_topic(&args.topic, now);
    for outcome in &args.outcomes {
        input.add_manual(Category::LearningOutcomes, outcome);
    }
    for tag in &args.tags {
        input.add_manual(Category::DisambiguationTags, tag);
    }
    if let Some(notes) = &args.notes {
        input.set_notes(notes);
    }
    if let Some(document) = &args.document {
        input.attach_document(&document.to_string_lossy());
    }
    let request = input.generation_request()?;

    let client = LessonPlanClient::new(&config.service)?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("Failed to start async runtime")?;
    let plan = runtime
        .block_on(client.lesson_plan(&request, &CancellationToken::new()))
        .wrap_err_with(|| format!("Failed to generate lesson plan via {}", client.base_url()))?;

    println!("{}", plan);
    Ok(())
}

/// Log to a file; the terminal belongs to the UI
///
/// Enabled when `LESSONPLAN_LOG` holds a filter (e.g. `debug`), and by
/// default in debug builds.
fn init_logging() {
    if std::env::var_os(LOG_ENV).is_none() && !cfg!(debug_assertions) {
        return;
    }
    let Some(dir) = dirs::cache_dir().map(|dir| dir.join("lessonplan")) else {
        return;
    };
    if fs::create_dir_all(&dir).is_err() {
        return;
    }
    let Ok(file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("lessonplan.log"))
    else {
        return;
    };

    let _ = env_logger::Builder::from_env(env_logger::Env::new().filter_or(LOG_ENV, "lessonplan=debug"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init();
}

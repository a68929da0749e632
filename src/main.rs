use academia_scrape::config::PortalConfig;
use academia_scrape::core::portal::Portal;
use academia_scrape::core::scrape;
use academia_scrape::model::envelope::Envelope;
use academia_scrape::utils::input::input_password_trim;
use anyhow::Context;
use clap::{Parser, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Page {
    Attendance,
    Marks,
    Timetable,
    Calendar,
    Profile,
}

#[derive(Parser)]
#[command(name = "academia")]
#[command(about = "Scrape attendance, marks, timetable and planner from the academic portal")]
struct Cli {
    /// Page to scrape
    #[arg(value_enum)]
    page: Page,

    /// Parse a saved portal response instead of fetching it
    #[arg(long)]
    file: Option<PathBuf>,

    /// Session cookie string; prompted for when absent
    #[arg(long, env = "ACADEMIA_SESSION", hide_env_values = true)]
    session: Option<String>,
}

fn print_json<T: Serialize>(data: T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(&Envelope::ok(data))?);
    Ok(())
}

fn init_logging() -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_env("ACADEMIA_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize logging: {error}"))
}

fn run_offline(page: Page, raw: &str, config: &PortalConfig) -> anyhow::Result<()> {
    match page {
        Page::Attendance => print_json(scrape::read_attendance(raw, config.target_percentage)?),
        Page::Marks => print_json(scrape::read_internal_marks(raw)?),
        Page::Timetable => print_json(scrape::read_timetable(raw)?.slots),
        Page::Calendar => print_json(scrape::read_calendar(raw)?),
        Page::Profile => print_json(scrape::read_profile(raw)?),
    }
}

async fn run_online(page: Page, portal: &Portal) -> anyhow::Result<()> {
    match page {
        Page::Attendance => print_json(portal.attendance().await?),
        Page::Marks => print_json(portal.internal_marks().await?),
        Page::Timetable => print_json(portal.timetable().await?.slots),
        Page::Calendar => print_json(portal.calendar().await?),
        Page::Profile => print_json(portal.profile().await?),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging()?;

    let config = PortalConfig::load_with_dotenv().context("loading portal configuration")?;

    if let Some(path) = &cli.file {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        return run_offline(cli.page, &raw, &config);
    }

    let session = match cli.session {
        Some(session) => session,
        None => input_password_trim("Session cookie:")?,
    };
    if session.is_empty() {
        anyhow::bail!("a session cookie is required to fetch from the portal");
    }

    let portal = Portal::new(config, &session)?;
    log::info!("session carries {} cookies", portal.cookie_count());
    run_online(cli.page, &portal).await
}

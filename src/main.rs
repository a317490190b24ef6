use clap::{Args, Parser, Subcommand};
use enrollsync::application::enrollment::{EnrollmentRequest, EnrollmentService};
use enrollsync::config::AppConfig;
use enrollsync::domain::contact::MarketingContact;
use enrollsync::domain::course::Course;
use enrollsync::infrastructure::in_memory::{InMemoryCourseStore, InMemoryEnrollmentStore};
use enrollsync::interfaces::csv::course_reader::CourseReader;
use enrollsync::logging;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// Upper bound on a marketing sync when the config sets none, so a silent
/// third-party endpoint cannot keep the process alive.
const DEFAULT_SYNC_DEADLINE: Duration = Duration::from_secs(5);

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// TOML file with promo codes, marketing channels and sync policy
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Price a course from the catalog
    Quote(CourseArgs),
    /// Push a new user to every marketing channel
    Sync(ContactArgs),
    /// Enroll a user in a course, then sync them to marketing
    Enroll {
        #[command(flatten)]
        course: CourseArgs,
        #[command(flatten)]
        contact: ContactArgs,
    },
}

#[derive(Args)]
struct CourseArgs {
    /// Course catalog CSV (id,title,base_price,list_price)
    #[arg(long)]
    catalog: PathBuf,

    /// Course id to price
    #[arg(long)]
    course: String,

    /// Promo code to apply
    #[arg(long)]
    promo: Option<String>,
}

#[derive(Args)]
struct ContactArgs {
    #[arg(long)]
    email: String,

    #[arg(long)]
    first_name: String,

    #[arg(long)]
    last_name: String,

    #[arg(long, default_value = "student")]
    role: String,

    #[arg(long)]
    phone: Option<String>,

    /// Repeatable
    #[arg(long = "tag")]
    tags: Vec<String>,
}

impl ContactArgs {
    fn into_contact(self) -> MarketingContact {
        let mut contact =
            MarketingContact::new(self.email, self.first_name, self.last_name, self.role);
        if let Some(phone) = self.phone {
            contact = contact.with_phone(phone);
        }
        self.tags
            .into_iter()
            .fold(contact, |contact, tag| contact.with_tag(tag))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = match &cli.config {
        Some(path) => AppConfig::load(path).into_diagnostic()?,
        None => AppConfig::default(),
    }
    .with_default_deadline(DEFAULT_SYNC_DEADLINE);

    match cli.command {
        Command::Quote(args) => {
            let service = build_service(&config, &args.catalog).await?;
            let quote = service
                .quote(&args.course, args.promo.as_deref())
                .await
                .into_diagnostic()?;
            print_json(&quote)?;
        }
        Command::Sync(args) => {
            let report = config.coordinator().sync_new_user(args.into_contact()).await;
            print_json(&report)?;
        }
        Command::Enroll { course, contact } => {
            let service = build_service(&config, &course.catalog).await?;
            let receipt = service
                .enroll(EnrollmentRequest {
                    course_id: course.course,
                    promo_code: course.promo,
                    contact: contact.into_contact(),
                })
                .await
                .into_diagnostic()?;

            // The enrollment stands whatever the marketing outcome, so it is
            // reported before the sync settles.
            print_json(&serde_json::json!({ "enrollment": receipt.enrollment }))?;

            let marketing = match receipt.sync.await {
                Ok(report) => serde_json::to_value(&report).into_diagnostic()?,
                Err(err) => {
                    tracing::warn!(error = %err, "marketing sync did not complete");
                    serde_json::Value::Null
                }
            };
            print_json(&serde_json::json!({ "marketing": marketing }))?;
        }
    }

    Ok(())
}

async fn build_service(config: &AppConfig, catalog: &Path) -> Result<EnrollmentService> {
    let file = File::open(catalog).into_diagnostic()?;
    let courses: Vec<Course> = CourseReader::new(file)
        .courses()
        .collect::<enrollsync::error::Result<_>>()
        .into_diagnostic()?;

    let store = InMemoryCourseStore::new();
    store.seed(courses).await.into_diagnostic()?;

    Ok(EnrollmentService::new(
        Box::new(store),
        Box::new(InMemoryEnrollmentStore::new()),
        config.promo_catalog().into_diagnostic()?,
        Arc::new(config.coordinator()),
    ))
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).into_diagnostic()?;
    println!("{rendered}");
    Ok(())
}

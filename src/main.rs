use clap::Parser;
use course_browser::app::render::{render_card, render_completed, render_sections, write_courses, CardMode};
use course_browser::app::repl::run_session;
use course_browser::config::cli::CliCommand;
use course_browser::core::filter::filter;
use course_browser::utils::{logger, validation::Validate};
use course_browser::{CatalogError, CatalogLoader, CliConfig, HttpCourseSource, Session};
use std::io::{self, Write};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let settings = match cli.settings() {
        Ok(settings) => settings,
        Err(e) => exit_with(&e),
    };

    logger::init_cli_logger(settings.verbose, settings.log_format);
    tracing::debug!("Settings: {:?}", settings);

    if let Err(e) = settings.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        exit_with(&e);
    }

    let source = HttpCourseSource::new(&settings.source)?;
    let catalog = CatalogLoader::new(source).load().await;
    if catalog.is_empty() {
        tracing::warn!("Catalog is empty; listings will show no courses");
    }
    let session = Session::new(catalog);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        CliCommand::Subjects => {
            for subject in session.catalog().subjects() {
                writeln!(out, "{}", subject)?;
            }
        }
        CliCommand::Search {
            subject,
            query,
            format,
        } => {
            let courses = filter(session.catalog().courses(), &subject, &query);
            write_courses(&mut out, &courses, format)?;
        }
        CliCommand::Show { number } => match session.catalog().find(&number) {
            Some(course) => {
                write!(out, "{}", render_card(course, true, CardMode::Catalog))?;
                writeln!(out)?;
                write!(out, "{}", render_sections(course))?;
            }
            None => exit_with(&CatalogError::UnknownCourse { number: number.clone() }),
        },
        CliCommand::Completed => {
            write!(out, "{}", render_completed(&session))?;
        }
        CliCommand::Session => {
            let stdin = io::stdin();
            let last = run_session(session, stdin.lock(), &mut out)?;
            tracing::info!(
                cart = last.cart().len(),
                needs_rating = last.needs_rating_count(),
                "Session ended"
            );
        }
    }

    out.flush()?;
    Ok(())
}

fn exit_with(error: &CatalogError) -> ! {
    eprintln!("❌ {}", error.user_friendly_message());
    eprintln!("💡 {}", error.recovery_suggestion());
    std::process::exit(if error.is_config_error() { 1 } else { 2 })
}

mod app;
mod db;
mod poster;
mod screen;
mod style;
mod subscription;
mod theme;
mod toast;
mod widgets;

use std::path::PathBuf;

use clap::Parser;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use moodvie_core::bundle::NavBundle;
use moodvie_core::config::AppConfig;
use moodvie_core::detail::MovieDetail;
use moodvie_core::error::MoodvieError;
use moodvie_core::models::UserContext;

/// Desktop movie collection.
#[derive(Debug, Parser)]
#[command(name = "moodvie", version, about)]
struct Cli {
    /// Open the movie detail screen with this navigation bundle (JSON).
    #[arg(long, value_name = "FILE")]
    bundle: Option<PathBuf>,

    /// Open the collection of this user.
    #[arg(long, required_unless_present = "bundle")]
    username: Option<String>,

    #[arg(long, default_value = "", hide_default_value = true)]
    password: String,

    /// Config file to use instead of the platform default.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

fn main() -> iced::Result {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path),
        None => AppConfig::load(),
    };
    let (config, config_error) = match config {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    let guard = init_logging(&config);
    if let Some(e) = config_error {
        tracing::warn!("Invalid config, using defaults: {e}");
    }

    let launch = match launch_from(&cli, config) {
        Ok(launch) => launch,
        Err(e) => {
            tracing::error!("Cannot start: {e}");
            eprintln!("moodvie: {e}");
            drop(guard);
            std::process::exit(2);
        }
    };

    iced::application(
        move || app::Moodvie::new(launch.clone()),
        app::Moodvie::update,
        app::Moodvie::view,
    )
    .title(app::Moodvie::title)
    .subscription(app::Moodvie::subscription)
    .theme(app::Moodvie::theme)
    .font(lucide_icons::LUCIDE_FONT_BYTES)
    .window_size((960.0, 680.0))
    .centered()
    .run()
}

/// Resolve the first screen. A bundle is activated here so that a bad one
/// stops the process before any window is built.
fn launch_from(cli: &Cli, config: AppConfig) -> Result<app::Launch, MoodvieError> {
    if let Some(path) = &cli.bundle {
        let bundle = NavBundle::load(path)?;
        let detail = MovieDetail::activate(Some(&bundle))?;
        return Ok(app::Launch {
            config,
            user: detail.user().clone(),
            detail: Some(detail),
        });
    }

    let username = cli.username.clone().unwrap_or_default();
    Ok(app::Launch {
        config,
        user: UserContext::new(username, cli.password.clone()),
        detail: None,
    })
}

/// Log to stderr and to a daily file in the data directory.
///
/// `RUST_LOG` overrides the configured filter.
fn init_logging(config: &AppConfig) -> WorkerGuard {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter));

    let file = tracing_appender::rolling::daily(AppConfig::data_dir().join("logs"), "moodvie.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(fmt::layer().with_ansi(false).with_writer(file_writer))
        .init();

    guard
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use moodvie_core::models::{CallerOrigin, MovieDetails};

    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("moodvie").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_username_or_bundle_is_required() {
        assert!(Cli::try_parse_from(["moodvie"]).is_err());
        assert_eq!(cli(&["--username", "ana"]).username.as_deref(), Some("ana"));
    }

    #[test]
    fn test_launch_without_bundle_opens_home() {
        let launch = launch_from(&cli(&["--username", "ana", "--password", "pw"]), AppConfig::default())
            .unwrap();
        assert!(launch.detail.is_none());
        assert_eq!(launch.user, UserContext::new("ana", "pw"));
    }

    #[test]
    fn test_launch_with_bundle_activates_detail() {
        let movie = MovieDetails {
            title: "Dune".into(),
            overview: String::new(),
            poster_ref: String::new(),
            rating: 8.0,
            cast: String::new(),
            genres: String::new(),
        };
        let user = UserContext::new("ana", "pw");
        let json = NavBundle::for_movie(&movie, CallerOrigin::BarcodeScanner, &user)
            .unwrap()
            .to_json()
            .unwrap();

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let launch = launch_from(&cli(&["--bundle", &path]), AppConfig::default()).unwrap();
        let detail = launch.detail.unwrap();
        assert_eq!(detail.movie().title, "Dune");
        assert_eq!(launch.user, user);
    }

    #[test]
    fn test_bundle_without_title_fails_fast() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{"movieRating":"8.0","caller":"HomeScreen"}"#)
            .unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let err = launch_from(&cli(&["--bundle", &path]), AppConfig::default()).unwrap_err();
        assert!(matches!(err, MoodvieError::Bundle(_)));
    }
}

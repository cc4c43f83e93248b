use clap::{Args, Parser, Subcommand};
use moviedb_core::commentary::{CommentaryKind, DEFAULT_LANGUAGE};

use crate::config::{DbConfig, LoadArgs};

#[derive(Debug, Parser)]
#[command(name = "moviedb", version, about = "Load and query the movie catalog")]
pub struct Cli {
    #[command(flatten)]
    pub db: DbConfig,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Load every movie document in a directory.
    Load(LoadArgs),
    /// Check that the database is reachable and the schema is in place.
    Check,
    /// Query the loaded catalog.
    Report(ReportArgs),
}

#[derive(Debug, Clone, Args)]
pub struct ReportArgs {
    /// Show everything known about one movie.
    #[arg(long, value_name = "NAME")]
    pub movie: Option<String>,

    /// Case-insensitive keyword search across commentary text.
    #[arg(long, value_name = "KEYWORD")]
    pub search: Option<String>,

    /// Movies featuring a cast member whose name contains this fragment.
    #[arg(long, value_name = "NAME")]
    pub cast: Option<String>,

    /// Commentary kind used with `--movie`, e.g. `long` or `short`.
    #[arg(long, default_value_t = CommentaryKind::default().to_string())]
    pub kind: String,

    /// Commentary language used with `--movie`.
    #[arg(long, default_value = DEFAULT_LANGUAGE)]
    pub language: String,

    /// Print results as JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

impl ReportArgs {
    /// No filter given: list the whole catalog.
    pub fn is_listing(&self) -> bool {
        self.movie.is_none() && self.search.is_none() && self.cast.is_none()
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    const URL: &str = "postgres://localhost/moviedb_test";

    #[test]
    fn load_takes_directory_argument() {
        let cli =
            Cli::try_parse_from(["moviedb", "--database-url", URL, "load", "docs"]).unwrap();
        assert_eq!(cli.db.database_url, URL);
        match cli.command {
            Command::Load(args) => assert_eq!(args.dir, PathBuf::from("docs")),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn pool_flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "moviedb",
            "--database-url",
            URL,
            "--max-connections",
            "2",
            "--acquire-timeout-secs",
            "3",
            "check",
        ])
        .unwrap();
        assert_eq!(cli.db.max_connections, 2);
        assert_eq!(cli.db.acquire_timeout().as_secs(), 3);
        assert!(matches!(cli.command, Command::Check));
    }

    #[test]
    fn report_defaults_to_listing() {
        let cli = Cli::try_parse_from(["moviedb", "--database-url", URL, "report"]).unwrap();
        let Command::Report(args) = cli.command else {
            panic!("expected report");
        };
        assert!(args.is_listing());
        assert_eq!(args.kind, "long");
        assert_eq!(args.language, DEFAULT_LANGUAGE);
        assert!(!args.json);
    }

    #[test]
    fn report_accepts_any_kind_tag() {
        let cli = Cli::try_parse_from([
            "moviedb",
            "--database-url",
            URL,
            "report",
            "--movie",
            "Safar",
            "--kind",
            "detailed",
        ])
        .unwrap();
        let Command::Report(args) = cli.command else {
            panic!("expected report");
        };
        assert_eq!(args.kind, "detailed");
        assert!(!args.is_listing());
    }

    #[test]
    fn missing_database_url_is_a_usage_error() {
        if std::env::var_os("DATABASE_URL").is_some() {
            return;
        }
        assert!(Cli::try_parse_from(["moviedb", "check"]).is_err());
    }
}

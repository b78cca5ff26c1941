use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use engine_logging::LogDestination;

#[derive(Clone, Debug, Parser)]
#[command(
    name = "gridfetch",
    version = env!("CARGO_PKG_VERSION"),
    about = "Download a list of images concurrently, then show them as a grid",
    long_about = None
)]
pub struct Cli {
    /// File with one image url per line. Defaults to the built-in list.
    #[arg(long, value_name = "FILE")]
    pub urls: Option<PathBuf>,

    /// Directory receiving `{index}.jpg`. Defaults to the per-user data dir.
    #[arg(long, value_name = "DIR")]
    pub out: Option<PathBuf>,

    /// RON settings file. Defaults to `settings.ron` next to the images.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[arg(long)]
    pub columns: Option<u32>,

    /// Width of the grid in points, used for the cell size.
    #[arg(long)]
    pub width: Option<f32>,

    /// Cap on simultaneous downloads. Unbounded when omitted.
    #[arg(long)]
    pub max_concurrent: Option<usize>,

    #[arg(long, value_enum, default_value_t = LogTarget::Terminal)]
    pub log: LogTarget,

    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogTarget {
    Terminal,
    File,
    Both,
}

impl From<LogTarget> for LogDestination {
    fn from(target: LogTarget) -> Self {
        match target {
            LogTarget::Terminal => LogDestination::Terminal,
            LogTarget::File => LogDestination::File,
            LogTarget::Both => LogDestination::Both,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_leave_everything_to_settings() {
        let cli = Cli::try_parse_from(["gridfetch"]).unwrap();
        assert!(cli.urls.is_none());
        assert!(cli.max_concurrent.is_none());
        assert_eq!(cli.log, LogTarget::Terminal);
    }

    #[test]
    fn flags_parse() {
        let cli = Cli::try_parse_from([
            "gridfetch",
            "--out",
            "/tmp/x",
            "--columns",
            "4",
            "--max-concurrent",
            "8",
            "--log",
            "both",
        ])
        .unwrap();
        assert_eq!(cli.out, Some(PathBuf::from("/tmp/x")));
        assert_eq!(cli.columns, Some(4));
        assert_eq!(cli.max_concurrent, Some(8));
        assert_eq!(LogDestination::from(cli.log), LogDestination::Both);
    }
}

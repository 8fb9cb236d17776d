use std::fmt;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use portal_core::{BasePath, HistoryMode, HostDocument, SessionDocument};
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidHistory { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidHistory { raw } => {
                write!(f, "invalid --history value: {raw} (expected memory or browser)")
            }
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--base-path <path>] [--history <memory|browser>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --base-path /");
    eprintln!("  --history memory");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  APP_BASE_URL, APP_HISTORY, RUST_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HistoryKind {
    Memory,
    Browser,
}

impl HistoryKind {
    fn parse(raw: &str) -> Result<Self, ArgsError> {
        match raw.trim() {
            "memory" => Ok(Self::Memory),
            "browser" => Ok(Self::Browser),
            _ => Err(ArgsError::InvalidHistory {
                raw: raw.to_string(),
            }),
        }
    }
}

struct Args {
    base_path: BasePath,
    history: HistoryKind,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        // Read once at startup; the value is fixed for the session.
        let mut base_path = std::env::var("APP_BASE_URL")
            .ok()
            .map_or_else(BasePath::root, |raw| BasePath::new(&raw));
        let mut history = match std::env::var("APP_HISTORY") {
            Ok(raw) => HistoryKind::parse(&raw)?,
            Err(_) => HistoryKind::Memory,
        };

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--base-path" => {
                    let value = require_value(args, "--base-path")?;
                    base_path = BasePath::new(&value);
                }
                "--history" => {
                    let value = require_value(args, "--history")?;
                    history = HistoryKind::parse(&value)?;
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self { base_path, history })
    }

    fn history_mode(&self) -> HistoryMode {
        match self.history {
            HistoryKind::Memory => HistoryMode::Memory,
            // The desktop window has no address bar of its own; the session
            // document stands in for it and the in-app address bar drives it.
            HistoryKind::Browser => {
                HistoryMode::browser(SessionDocument::new(self.base_path.join("/")))
            }
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let parsed = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let host = HostDocument::new();
    let mounted = ui::start(parsed.history_mode(), parsed.base_path.clone(), &host)?;
    let root = *mounted.root();

    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Portal")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(mounted)
        .launch(root);
    Ok(())
}

fn main() {
    init_logging();
    if let Err(err) = run() {
        tracing::error!(%err, "startup failed");
        std::process::exit(2);
    }
}

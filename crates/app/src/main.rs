use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{AppServices, StudySessionService, SubjectService, TopicService};
use storage::repository::Storage;
use ui::{App, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    UnknownArg(String),
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
        }
    }
}

impl std::error::Error for ArgsError {}

struct DesktopApp {
    services: AppServices,
}

impl UiApp for DesktopApp {
    fn subject_service(&self) -> Arc<SubjectService> {
        self.services.subject_service()
    }

    fn topic_service(&self) -> Arc<TopicService> {
        self.services.topic_service()
    }

    fn session_service(&self) -> Arc<StudySessionService> {
        self.services.session_service()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StoreChoice {
    Remote,
    Memory,
}

struct Args {
    store: StoreChoice,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app            # remote store from the environment");
    eprintln!("  cargo run -p app -- --memory  # volatile in-memory store (demo)");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  STUDY_STORE_URL  endpoint of the remote table store (PostgREST root)");
    eprintln!("  STUDY_STORE_KEY  access key for the remote table store");
    eprintln!("  RUST_LOG         log filter (e.g. info, storage=debug)");
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut store = StoreChoice::Remote;

        for arg in args {
            match arg.as_str() {
                "--memory" => store = StoreChoice::Memory,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self { store })
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    // A .env file is optional, and so is the store config itself: without
    // it every store call fails on its own, leaving the UI usable.
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut argv = std::env::args().skip(1);
    let parsed = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let storage = match parsed.store {
        StoreChoice::Remote => Storage::rest_from_env(),
        StoreChoice::Memory => Storage::in_memory(),
    };
    let services = AppServices::new(&storage);

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp { services });
    let context = build_app_context(&app);

    // Explicitly not always-on-top: some dev setups default to a modal-like
    // window otherwise.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Study Tracker")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}

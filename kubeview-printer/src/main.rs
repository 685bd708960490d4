use std::backtrace::Backtrace;
use std::panic;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing::{error, info};

use kubeview_printer::config::Settings;
use kubeview_printer::error::BoxError;
use kubeview_printer::link::PathLinkGenerator;
use kubeview_printer::manifest::FileFetcher;
use kubeview_printer::printers::{Options, Resource};
use kubeview_printer::store::MemoryStore;
use kubeview_printer::{dash_config, init_logging, print_document, shutdown_logging};

/// Prints a Kubernetes object as dashboard view components in JSON.
#[derive(Parser, Debug)]
#[command(name = "kubeview-print", version)]
struct Args {
    /// Settings file; defaults apply when omitted.
    #[arg(long, env = "KUBEVIEW_SETTINGS")]
    settings: Option<PathBuf>,

    /// Multi-document YAML of objects the printers may look up (pods, events, secrets).
    #[arg(long)]
    store: Option<PathBuf>,

    /// YAML map of image to `{manifest, configuration}`, shown on container summaries
    /// unless `image_manifests` is off.
    #[arg(long)]
    manifests: Option<PathBuf>,

    /// Object or list to print, as YAML or JSON.
    object: PathBuf,
}

fn run(args: Args) -> Result<(), BoxError> {
    let settings = match args.settings.as_deref() {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    init_logging(&settings)?;

    let default = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let bt = Backtrace::force_capture();
        error!(target: "panic", "panic: {panic_info}\n\nBacktrace:\n{bt}");
        default(panic_info);
    }));

    let store = match args.store.as_deref() {
        Some(path) => MemoryStore::from_yaml(&std::fs::read_to_string(path)?)?,
        None => MemoryStore::new(),
    };
    let fetcher = match args.manifests.as_deref() {
        Some(path) => Some(FileFetcher::from_yaml(&std::fs::read_to_string(path)?)?),
        None => None,
    };
    let options = Options::new(dash_config(&settings, Arc::new(store), fetcher), PathLinkGenerator);
    let resource = Resource::with_default_handlers(options)?;

    let input = std::fs::read_to_string(&args.object)?;
    info!(object = %args.object.display(), "printing");
    let output = print_document(&resource, &input)?;
    println!("{output}");
    Ok(())
}

fn main() -> std::process::ExitCode {
    let result = run(Args::parse());
    if let Err(e) = &result {
        error!("kubeview-print failed: {e}");
        eprintln!("error: {e}");
    }
    shutdown_logging();
    match result {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(_) => std::process::ExitCode::FAILURE,
    }
}

use std::{
    io::{self, BufRead},
    path::{Path, PathBuf},
};

mod add_company;
mod add_device;
mod classes;
mod delete;
mod init;
mod list;
mod premium;
mod reclassify;
mod terminal;

use clap::ArgAction;
use inventory::{
    domain::Hydration, ClassCatalog, Config, FactoryDataset, FileStore, Inventory,
};
use tracing::instrument;

use self::terminal::Colorize;

const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// The directory the inventory is stored in
    #[arg(short, long, default_value = ".inventory", global = true)]
    root: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        self.command
            .unwrap_or_else(|| Command::Premium(premium::Command::default()))
            .run(&self.root)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(io::stderr)
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, clap::Subcommand)]
pub enum Command {
    /// List companies with premium devices (default)
    Premium(premium::Command),

    /// List devices with their company and class
    List(list::Command),

    /// Create the inventory directory and its configuration
    Init(init::Command),

    /// Show the service class catalog
    Classes,

    /// Add a new device
    AddDevice(add_device::Command),

    /// Add a new company
    AddCompany(add_company::Command),

    /// Change the service class of a device
    Reclassify(reclassify::Command),

    /// Delete a device
    DeleteDevice(delete::Command),
}

impl Command {
    fn run(self, root: &Path) -> anyhow::Result<()> {
        match self {
            Self::Premium(command) => command.run(root)?,
            Self::List(command) => command.run(root)?,
            Self::Init(command) => command.run(root)?,
            Self::Classes => classes::run(root)?,
            Self::AddDevice(command) => command.run(root)?,
            Self::AddCompany(command) => command.run(root)?,
            Self::Reclassify(command) => command.run(root)?,
            Self::DeleteDevice(command) => command.run(root)?,
        }
        Ok(())
    }
}

fn load_config(root: &Path) -> Config {
    let path = root.join(CONFIG_FILE);
    if !path.exists() {
        return Config::default();
    }
    Config::load(&path).unwrap_or_else(|e| {
        tracing::warn!("Ignoring {}: {e}", path.display());
        Config::default()
    })
}

/// Opens and hydrates the inventory stored under `root`.
#[instrument(level = "debug")]
fn open(root: &Path) -> anyhow::Result<Inventory<FileStore>> {
    let config = load_config(root);

    let override_dataset = config
        .dataset(root)
        .map(|path| FactoryDataset::from_path(&path))
        .transpose()?;
    let dataset = override_dataset
        .as_ref()
        .unwrap_or_else(|| FactoryDataset::bundled());

    let store = FileStore::new(root.to_path_buf());
    let mut inventory =
        Inventory::new(store, ClassCatalog::from_dataset(dataset)).with_pretty(config.pretty);

    if let Hydration::Fallback(e) = inventory.hydrate(dataset) {
        eprintln!(
            "{}",
            format!("⚠️  Stored inventory was unreadable ({e}); restored factory data").warning()
        );
    }

    Ok(inventory)
}

fn prompt_to_proceed() -> io::Result<()> {
    eprint!("\nProceed? (y/N) ");
    let stdin = std::io::stdin();
    let mut line = String::new();
    stdin.lock().read_line(&mut line)?;
    if !line.trim().eq_ignore_ascii_case("y") {
        println!("Cancelled");
        std::process::exit(130);
    }
    Ok(())
}

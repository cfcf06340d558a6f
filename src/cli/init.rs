use std::path::{Path, PathBuf};

use inventory::{Config, FactoryDataset};
use tracing::instrument;

use crate::cli::{terminal::Colorize, CONFIG_FILE};

#[derive(Debug, clap::Parser)]
pub struct Command {
    /// Factory dataset to use instead of the bundled one, relative to the root
    #[arg(long, value_name = "PATH")]
    dataset: Option<PathBuf>,

    /// Write the stored snapshot as indented JSON
    #[arg(long)]
    pretty: bool,
}

impl Command {
    #[instrument]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let config_path = root.join(CONFIG_FILE);
        if config_path.exists() {
            anyhow::bail!(
                "Inventory already initialized (found existing {})",
                config_path.display()
            );
        }

        let mut config = Config::default();
        config.set_dataset(self.dataset);
        config.pretty = self.pretty;

        if let Some(path) = config.dataset(root) {
            FactoryDataset::from_path(&path)
                .map_err(|e| anyhow::anyhow!("Failed to load {}: {e}", path.display()))?;
        }

        std::fs::create_dir_all(root)
            .map_err(|e| anyhow::anyhow!("Failed to create {}: {e}", root.display()))?;
        config
            .save(&config_path)
            .map_err(|e| anyhow::anyhow!("Failed to create {CONFIG_FILE}: {e}"))?;

        let inventory = super::open(root)?;

        println!(
            "{}",
            format!("✅ Initialized inventory in {}", root.display()).success()
        );
        println!("  Created: {CONFIG_FILE}");
        println!(
            "  Loaded {} companies and {} devices",
            inventory.companies().len(),
            inventory.devices().len()
        );

        Ok(())
    }
}

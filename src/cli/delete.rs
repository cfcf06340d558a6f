use std::path::Path;

use tracing::instrument;

use crate::cli::{prompt_to_proceed, terminal::Colorize};

#[derive(Debug, clap::Parser)]
pub struct Command {
    /// The IP address of the device to delete
    ip: String,

    /// Skip confirmation prompts
    #[arg(long, short)]
    yes: bool,
}

impl Command {
    #[instrument]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let mut inventory = super::open(root)?;

        let Some(device) = inventory.device(&self.ip) else {
            println!("{}", format!("No device with IP {}", self.ip).dim());
            return Ok(());
        };

        if !self.yes {
            let company = inventory
                .company(device.company_id)
                .map_or("unknown company", |company| company.name.as_str());
            println!("Will delete {} ({}) of {company}", device.device, device.ip);
            prompt_to_proceed()?;
        }

        inventory.delete_device(&self.ip);

        println!("{}", format!("✅ Deleted device {}", self.ip).success());
        Ok(())
    }
}

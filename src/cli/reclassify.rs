use std::path::Path;

use tracing::instrument;

use crate::cli::terminal::Colorize;

#[derive(Debug, clap::Parser)]
pub struct Command {
    /// The IP address of the device
    ip: String,

    /// The id of the new service class
    class: u32,
}

impl Command {
    #[instrument]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let mut inventory = super::open(root)?;

        let Some(class) = inventory.catalog().get(self.class).cloned() else {
            anyhow::bail!("Class {} does not exist", self.class);
        };
        let Some(device) = inventory.device(&self.ip) else {
            anyhow::bail!("No device with IP {}", self.ip);
        };

        let previous = inventory
            .classes_map()
            .get(&device.class_id)
            .map_or_else(|| "unknown class".to_string(), |c| c.tier.clone());

        inventory.update_device_class(&self.ip, self.class);

        println!(
            "{}",
            format!("✅ {} reclassified: {previous} → {}", self.ip, class.tier).success()
        );
        Ok(())
    }
}

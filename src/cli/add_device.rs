use std::path::Path;

use inventory::{CompanyId, Device};
use tracing::instrument;

use crate::cli::terminal::Colorize;

#[derive(Debug, clap::Parser)]
pub struct Command {
    /// The device name (e.g. ab-abcd-a-01)
    device: String,

    /// The IPv4 address of the device
    ip: String,

    /// The id of the owning company
    #[arg(long, short)]
    company: CompanyId,

    /// The id of the service class
    #[arg(long, short = 'C', default_value_t = 1)]
    class: u32,
}

impl Command {
    #[instrument]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let mut inventory = super::open(root)?;
        let device = Device::new(self.device, self.ip, self.company, self.class);
        let label = format!("{} ({})", device.device, device.ip);

        if let Err(errors) = inventory.try_add_device(device) {
            for error in errors.iter() {
                eprintln!("{}", format!("⚠️  {error}").warning());
            }
            anyhow::bail!("Device was not added");
        }

        println!("{}", format!("✅ Added device {label}").success());
        Ok(())
    }
}

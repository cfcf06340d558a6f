use std::path::Path;

use clap::Parser;
use tracing::instrument;

use super::terminal::{is_narrow, Colorize};

#[derive(Debug, Parser, Default)]
#[command(about = "List companies with at least one premium device")]
pub struct Command {
    /// Output format (table, json)
    #[arg(long, value_name = "FORMAT", default_value = "table")]
    output: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl Command {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let inventory = super::open(root)?;
        let premium = inventory.premium_companies();

        if let OutputFormat::Json = self.output {
            println!("{}", serde_json::to_string_pretty(&premium)?);
            return Ok(());
        }

        if premium.is_empty() {
            println!("{}", "No companies with premium devices yet.".dim());
            return Ok(());
        }

        println!("Premium companies");
        println!("{}", "─────────────────".dim());

        if is_narrow() {
            for entry in &premium {
                println!("{} ({})", entry.company.name, entry.count.to_string().success());
            }
        } else {
            println!("{:<30} {:<15} {:<18} Premium", "Name", "City", "Phone");
            for entry in &premium {
                let company = entry.company;
                println!(
                    "{:<30} {:<15} {:<18} {}",
                    company.name,
                    company.city,
                    company.phone,
                    entry.count.to_string().success()
                );
            }
        }

        Ok(())
    }
}

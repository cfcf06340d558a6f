use std::path::Path;

use clap::{Parser, ValueEnum};
use inventory::{Class, CompanyId, Device, FileStore, Inventory};
use serde::Serialize;
use tracing::instrument;

use super::terminal::{is_narrow, Colorize};

const UNKNOWN_COMPANY: &str = "unknown company";
const UNKNOWN_CLASS: &str = "unknown class";

/// Command arguments for `inv list`.
#[derive(Debug, Parser)]
#[command(about = "List devices with their company and service class")]
pub struct Command {
    /// Only show devices of this company.
    #[arg(long, value_name = "ID")]
    company: Option<CompanyId>,

    /// Only show devices in a premium class.
    #[arg(long)]
    premium: bool,

    /// Output format (default: table).
    #[arg(long, value_enum, default_value_t)]
    output: OutputFormat,

    /// Suppress headers and format rows for scripting.
    #[arg(long)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Debug, Serialize)]
struct Row<'a> {
    #[serde(flatten)]
    device: &'a Device,
    company: Option<&'a str>,
    class: Option<&'a str>,
}

impl Command {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let inventory = super::open(root)?;
        let rows = self.rows(&inventory);

        match self.output {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&rows)?),
            OutputFormat::Table if self.quiet => {
                for row in &rows {
                    println!(
                        "{}\t{}\t{}\t{}",
                        row.device.ip,
                        row.device.device,
                        row.device.company_id,
                        row.device.class_id
                    );
                }
            }
            OutputFormat::Table => Self::output_table(&rows),
        }

        Ok(())
    }

    fn rows<'a>(&self, inventory: &'a Inventory<FileStore>) -> Vec<Row<'a>> {
        inventory
            .devices()
            .iter()
            .filter(|device| self.company.is_none_or(|id| device.company_id == id))
            .map(|device| {
                let class = inventory.classes_map().get(&device.class_id);
                (device, class)
            })
            .filter(|(_, class)| !self.premium || class.is_some_and(Class::is_premium))
            .map(|(device, class)| Row {
                device,
                company: inventory
                    .company(device.company_id)
                    .map(|company| company.name.as_str()),
                class: class.map(|class| class.tier.as_str()),
            })
            .collect()
    }

    fn output_table(rows: &[Row<'_>]) {
        if rows.is_empty() {
            println!("{}", "No devices found.".dim());
            return;
        }

        if is_narrow() {
            for row in rows {
                println!(
                    "{} {} ({})",
                    row.device.device,
                    row.device.ip.info(),
                    row.company.unwrap_or(UNKNOWN_COMPANY)
                );
            }
            return;
        }

        println!(
            "{:<14} {:<16} {:<30} Class",
            "Device", "IP", "Company"
        );
        for row in rows {
            let company = row.company.map_or_else(|| UNKNOWN_COMPANY.warning(), str::to_string);
            let class = row.class.map_or_else(|| UNKNOWN_CLASS.warning(), str::to_string);
            println!(
                "{:<14} {:<16} {:<30} {class}",
                row.device.device, row.device.ip, company
            );
        }
    }
}

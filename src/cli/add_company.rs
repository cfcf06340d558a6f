use std::path::Path;

use inventory::{domain::AddCompanyError, NewCompany};
use tracing::instrument;

use crate::cli::terminal::Colorize;

#[derive(Debug, clap::Parser)]
pub struct Command {
    /// The company name
    name: String,

    /// Contact phone number
    #[arg(long)]
    phone: Option<String>,

    /// City the company is based in
    #[arg(long)]
    city: Option<String>,

    /// Free-form location, such as a postal code
    #[arg(long)]
    location: Option<String>,
}

impl Command {
    #[instrument]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let mut inventory = super::open(root)?;

        let candidate = NewCompany {
            name: self.name,
            phone: self.phone,
            city: self.city,
            location: self.location,
        };

        match inventory.try_add_company(candidate) {
            Ok(id) => {
                println!("{}", format!("✅ Added company with id {id}").success());
                Ok(())
            }
            Err(AddCompanyError::Invalid(errors)) => {
                for error in errors.iter() {
                    eprintln!("{}", format!("⚠️  {error}").warning());
                }
                anyhow::bail!("Company was not added")
            }
            Err(e) => Err(e.into()),
        }
    }
}

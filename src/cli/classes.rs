use std::path::Path;

use crate::cli::terminal::Colorize;

pub fn run(root: &Path) -> anyhow::Result<()> {
    let inventory = super::open(root)?;

    println!("Service classes:");
    for class in inventory.catalog() {
        let line = format!("  {:>2}  {class}", class.id);
        if class.is_premium() {
            println!("{}", line.info());
        } else {
            println!("{line}");
        }
    }

    Ok(())
}

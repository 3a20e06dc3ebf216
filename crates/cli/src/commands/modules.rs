use anyhow::Result;
use tracing::debug;

use crate::display::print_catalog;
use crate::modules::catalog;

pub fn modules_command() -> Result<()> {
    let catalog = catalog();
    debug!("Listing {} catalog entries", catalog.len());
    print_catalog(&catalog);
    Ok(())
}

//! Install command - make the tool available on the runner's path

use anyhow::Result;
use log::info;

use crate::context::Context;
use crate::output::LogGroup;

/// Execute `setup-rome install`
///
/// A pre-installed binary is reported outside the log group.
pub fn execute_install(ctx: &Context) -> Result<()> {
    let mut installer = ctx.installer()?;
    if installer.find_existing().is_some() {
        return Ok(());
    }

    let _group = LogGroup::start(&format!("Installing {}", ctx.tool.name));
    let dir = installer.install(&ctx.selector)?;
    info!("{} is available from {}", ctx.tool.name, dir.display());

    Ok(())
}

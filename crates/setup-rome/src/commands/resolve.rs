//! Resolve command - show what would be installed

use anyhow::Result;

use crate::context::Context;
use crate::output::{LogGroup, print_text};

/// Execute `setup-rome resolve`
///
/// Prints the resolved tag and the download URL, one per line.
pub fn execute_resolve(ctx: &Context) -> Result<()> {
    let plan = {
        let _group = LogGroup::start(&format!("Resolving {} {}", ctx.tool.name, ctx.selector));
        ctx.installer()?.plan(&ctx.selector)?
    };

    print_text(&format!("tag: {}", plan.release().tag_name))?;
    print_text(&format!("url: {}", plan.artifact.download_url))?;
    if plan.resolution.is_fallback() {
        print_text("note: no prerelease found, resolved to the latest release")?;
    }

    Ok(())
}

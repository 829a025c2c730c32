//! Community page.

use anyhow::Result;
use levelup_storefront::views;

use crate::context::Context;

/// Run the community command.
pub fn run(ctx: &Context) -> Result<()> {
    let shop = ctx.open_shop()?;
    let report = shop.community_report();

    ctx.output
        .show(&report, "Comunidad Level-Up", || views::community(&report));
    Ok(())
}

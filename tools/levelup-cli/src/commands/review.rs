//! Product reviews.

use anyhow::{Context as _, Result};

use super::{ReviewArgs, ReviewCommand, WithCode};
use crate::context::Context;

/// Run the review command.
pub fn run(args: ReviewArgs, ctx: &Context) -> Result<()> {
    let mut shop = ctx.open_shop()?;

    match args.command {
        ReviewCommand::List { code } => {
            let product = shop.product(&code).coded()?;
            let reviews = shop.reviews(&code);
            if ctx.output.is_json() {
                ctx.output.json(&reviews);
                return Ok(());
            }
            ctx.output
                .header(&format!("Reseñas de {} ({})", product.name, reviews.len()));
            for review in &reviews {
                ctx.output.list_item(&format!(
                    "{} {}: {}",
                    "★".repeat(usize::from(review.rating)),
                    review.name,
                    review.text
                ));
            }
        }
        ReviewCommand::Add {
            code,
            rating,
            text,
            name,
        } => {
            let name = name
                .or_else(|| shop.current_user().map(|u| u.display_name()))
                .context("Pass --name or sign in to review")?;
            let review = shop.add_review(&code, &name, rating, &text).coded()?;
            if ctx.output.is_json() {
                ctx.output.json(&review);
                return Ok(());
            }
            ctx.output.success("Gracias por tu reseña");
        }
    }
    Ok(())
}

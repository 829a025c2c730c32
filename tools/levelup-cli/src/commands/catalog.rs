//! Catalog and product pages.

use anyhow::{Context as _, Result};
use levelup_commerce::search::CatalogQuery;
use levelup_commerce::Clp;
use levelup_storefront::{views, PageQuery};

use super::{CatalogArgs, ProductArgs, WithCode};
use crate::context::Context;

/// Run the catalog command.
pub fn run(args: CatalogArgs, ctx: &Context) -> Result<()> {
    let shop = ctx.open_shop()?;

    if args.categories {
        let categories = shop.catalog().categories();
        if ctx.output.is_json() {
            ctx.output.json(&categories);
            return Ok(());
        }
        ctx.output.header("Categorías");
        for category in categories {
            ctx.output.list_item(category);
        }
        return Ok(());
    }

    let link_category = args
        .link
        .as_deref()
        .map(PageQuery::from_link)
        .and_then(|q| q.category);

    let mut query = CatalogQuery::new().with_sort(args.sort);
    if let Some(category) = args.category.or(link_category) {
        query = query.with_category(category);
    }
    if let Some(text) = args.search {
        query = query.with_text(text);
    }
    if let Some(max) = args.max_price {
        query = query.with_max_price(Clp::new(max));
    }

    let products = shop.search(&query);
    if ctx.output.is_json() {
        ctx.output.json(&products);
        return Ok(());
    }

    ctx.output.header(&format!(
        "Catálogo: {} productos ({})",
        products.len(),
        args.sort.display_name()
    ));
    ctx.output
        .page(&views::catalog_list(&products, |p| shop.display_price(p)));
    Ok(())
}

/// Run the product command.
pub fn run_product(args: ProductArgs, ctx: &Context) -> Result<()> {
    let code = args
        .code
        .or_else(|| args.link.as_deref().and_then(|l| PageQuery::from_link(l).code))
        .context("Missing product code")?;

    let shop = ctx.open_shop()?;
    let product = shop.product(&code).coded()?;
    let price = shop.display_price(product);
    let related = shop.related(&code);
    let reviews = shop.reviews(&code);

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "product": product,
            "price": price,
            "related": related,
            "reviews": reviews,
        }));
        return Ok(());
    }

    ctx.output
        .page(&views::product_detail(product, price, &related, &reviews));
    Ok(())
}

//! Plain-text page renderers.
//!
//! Each function renders one page's content as lines of text. Styling is
//! left to the front end.

use crate::storefront::ProfileStats;
use levelup_auth::User;
use levelup_commerce::cart::CartPricing;
use levelup_commerce::catalog::{average_rating, Product, Review};
use levelup_commerce::checkout::Order;
use levelup_commerce::community::CommunityReport;
use levelup_commerce::Clp;

const DATE_FORMAT: &str = "%d-%m-%Y";
const DATE_TIME_FORMAT: &str = "%d-%m-%Y %H:%M";

/// The product grid, one product per line.
pub fn catalog_list(products: &[&Product], price: impl Fn(&Product) -> Clp) -> String {
    if products.is_empty() {
        return "No hay productos que coincidan con la búsqueda.".to_string();
    }
    let mut lines = Vec::with_capacity(products.len());
    for product in products {
        let shown = price(product);
        let mut line = format!(
            "{:<6} {:<40} {:>10}",
            product.code.as_str(),
            product.name,
            shown.display()
        );
        if shown != product.price {
            line.push_str(&format!(" (antes {})", product.price.display()));
        }
        if !product.in_stock() {
            line.push_str("  [agotado]");
        }
        lines.push(line);
    }
    lines.join("\n")
}

/// The product detail page.
pub fn product_detail(
    product: &Product,
    price: Clp,
    related: &[&Product],
    reviews: &[Review],
) -> String {
    let mut lines = vec![
        format!("{} ({})", product.name, product.code),
        format!("{}  {} {:.1}", product.category, product.stars(), product.rating),
        format!("Precio: {}", price.display()),
    ];
    if price != product.price {
        lines.push(format!("Precio normal: {}", product.price.display()));
    }
    lines.push(match product.stock {
        0 => "Sin stock".to_string(),
        n => format!("Stock: {n}"),
    });
    if !product.manufacturer.is_empty() {
        lines.push(format!("Fabricante: {}", product.manufacturer));
    }
    if !product.distributor.is_empty() {
        lines.push(format!("Distribuidor: {}", product.distributor));
    }
    if !product.description.is_empty() {
        lines.push(String::new());
        lines.push(product.description.clone());
    }
    for highlight in &product.highlights {
        lines.push(format!("  • {highlight}"));
    }

    if !related.is_empty() {
        lines.push(String::new());
        lines.push("Relacionados:".to_string());
        for p in related {
            lines.push(format!("  {} {} {}", p.code, p.name, p.price.display()));
        }
    }

    lines.push(String::new());
    match average_rating(reviews) {
        Some(avg) => lines.push(format!("Reseñas ({}, promedio {avg:.1}):", reviews.len())),
        None => lines.push("Sin reseñas todavía.".to_string()),
    }
    for review in reviews {
        lines.push(format!(
            "  {} {} ({})",
            "★".repeat(usize::from(review.rating)),
            review.name,
            review.timestamp.format(DATE_FORMAT)
        ));
        lines.push(format!("    {}", review.text));
    }
    lines.join("\n")
}

/// The cart page.
pub fn cart(pricing: &CartPricing) -> String {
    if pricing.line_items.is_empty() {
        return "Tu carrito está vacío.".to_string();
    }
    let mut lines: Vec<String> = pricing
        .line_items
        .iter()
        .map(|l| {
            format!(
                "{:<6} {:<40} {:>3} x {:>10} = {:>10}",
                l.code.as_str(),
                l.name,
                l.quantity,
                l.unit_price.display(),
                l.subtotal.display()
            )
        })
        .collect();
    lines.push(String::new());
    lines.extend(totals(pricing.subtotal, pricing.discount, pricing.total));
    lines.join("\n")
}

fn totals(subtotal: Clp, discount: Clp, total: Clp) -> Vec<String> {
    let mut lines = vec![format!("Subtotal:  {:>10}", subtotal.display())];
    if discount.is_positive() {
        lines.push(format!("Descuento: {:>10}", format!("-{}", discount.display())));
    }
    lines.push(format!("Total:     {:>10}", total.display()));
    lines
}

/// The receipt page.
pub fn receipt(order: &Order) -> String {
    let mut lines = vec![
        format!("Boleta {}", order.id),
        format!("Fecha: {}", order.timestamp.format(DATE_TIME_FORMAT)),
        format!("Cliente: {} <{}>", order.user.display_name(), order.user.email),
        String::new(),
    ];
    for item in &order.line_items {
        lines.push(format!(
            "{:<6} {:<40} {:>3} x {:>10} = {:>10}",
            item.code.as_str(),
            item.name,
            item.qty,
            item.price.display(),
            item.subtotal.display()
        ));
    }
    lines.push(String::new());
    lines.extend(totals(order.subtotal, order.discount, order.total));
    if order.user.is_duoc_affiliate {
        lines.push("Descuento DUOC aplicado.".to_string());
    }
    lines.join("\n")
}

/// The profile page.
pub fn profile(user: &User, stats: &ProfileStats) -> String {
    let mut lines = vec![
        user.display_name(),
        user.email.clone(),
        format!(
            "Fecha de nacimiento: {}",
            user.birthdate
                .map(|d| d.format(DATE_FORMAT).to_string())
                .unwrap_or_else(|| "-".to_string())
        ),
    ];
    if !user.phone.is_empty() {
        lines.push(format!("Teléfono: {}", user.phone));
    }
    if !user.address.is_empty() {
        lines.push(format!("Dirección: {}", user.address));
    }
    if !user.preferences.is_empty() {
        lines.push(format!("Preferencias: {}", user.preferences));
    }
    if stats.affiliate {
        lines.push(format!("Miembro DUOC: {:.0}% de descuento", user.discount_rate * 100.0));
    }

    lines.push(String::new());
    lines.push(format!(
        "Nivel {} con {} puntos ({} por compras, {} por referidos)",
        stats.tier.label(),
        stats.points.total(),
        stats.points.purchase,
        stats.points.referral
    ));
    if let (Some(missing), Some(next)) = (stats.points_to_next_tier, stats.tier.next()) {
        lines.push(format!("Faltan {missing} puntos para {}", next.label()));
    }
    lines.push(format!(
        "Compras: {}  Total gastado: {}  Ahorro: {}",
        stats.purchase_count,
        stats.total_spent.display(),
        stats.savings.display()
    ));
    lines.push(format!(
        "Código de referido: {} ({} registros)",
        stats.referral_code, stats.referral_registrations
    ));
    lines.join("\n")
}

/// A member's order list, in the order given.
pub fn order_history(orders: &[Order]) -> String {
    if orders.is_empty() {
        return "Aún no tienes compras.".to_string();
    }
    orders
        .iter()
        .map(|o| {
            format!(
                "{}  {}  {:>3} productos  {:>10}",
                o.id,
                o.timestamp.format(DATE_FORMAT),
                o.item_count(),
                o.total.display()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// The community page.
pub fn community(report: &CommunityReport) -> String {
    let mut lines = vec![
        format!("Ventas totales:     {}", report.orders_total.display()),
        format!("Fondo comunitario:  {}", report.community_fund.display()),
        format!("Eventos apoyados:   {}", report.supported_events),
        format!("Puntos repartidos:  {}", report.points_distributed),
        String::new(),
    ];
    if report.upcoming.is_empty() {
        lines.push("No hay eventos próximos.".to_string());
    } else {
        lines.push("Próximos eventos:".to_string());
        for event in &report.upcoming {
            lines.push(format!(
                "  {}  {} ({}) +{} pts",
                event.date.format(DATE_FORMAT),
                event.name,
                event.city,
                event.points
            ));
        }
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use levelup_commerce::catalog::Catalog;

    #[test]
    fn test_catalog_list_marks_member_price() {
        let catalog = Catalog::builtin();
        let products: Vec<&Product> = catalog.products().iter().take(2).collect();
        let text = catalog_list(&products, |p| p.price);
        assert!(text.contains("JM001"));
        assert!(!text.contains("antes"));

        let text = catalog_list(&products, |p| p.price - p.price.percentage(20));
        assert!(text.contains("antes $29.990"));
    }

    #[test]
    fn test_empty_pages() {
        assert!(catalog_list(&[], |p| p.price).contains("No hay productos"));
        assert!(cart(&CartPricing::default()).contains("vacío"));
        assert!(order_history(&[]).contains("Aún no"));
    }

    #[test]
    fn test_product_detail_shows_reviews() {
        let catalog = Catalog::builtin();
        let catan = catalog.by_code("JM001").unwrap();
        let review = Review::new("Beto", 4, "Muy bueno", chrono::Utc::now()).unwrap();
        let text = product_detail(catan, catan.price, &catalog.related("JM001", 3), &[review]);
        assert!(text.contains("Catan"));
        assert!(text.contains("Relacionados"));
        assert!(text.contains("promedio 4.0"));
        assert!(text.contains("Muy bueno"));
    }
}

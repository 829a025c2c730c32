//! Page query-string parameters.

use url::form_urlencoded;

/// Parameters the shop pages read from their URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageQuery {
    /// `cat`: catalog category.
    pub category: Option<String>,
    /// `code`: product code.
    pub code: Option<String>,
    /// `orderId`: order to show on the receipt page.
    pub order_id: Option<String>,
}

impl PageQuery {
    /// Parse a query string. A leading `?` is optional, values are
    /// percent-decoded, empty values are ignored and the first occurrence of
    /// a parameter wins.
    pub fn parse(query: &str) -> Self {
        let query = query.trim();
        let query = query.strip_prefix('?').unwrap_or(query);

        let mut page = PageQuery::default();
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            let value = value.trim();
            if value.is_empty() {
                continue;
            }
            let slot = match &*key {
                "cat" => &mut page.category,
                "code" => &mut page.code,
                "orderId" => &mut page.order_id,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.to_string());
            }
        }
        page
    }

    /// Parse the query part of a full URL or relative link.
    pub fn from_link(link: &str) -> Self {
        match link.split_once('?') {
            Some((_, query)) => Self::parse(query.split('#').next().unwrap_or_default()),
            None => Self::default(),
        }
    }
}

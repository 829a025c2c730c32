//! Community impact figures.

use crate::checkout::Order;
use crate::money::Clp;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Default share of sales set aside for the community fund, in percent.
pub const DEFAULT_COMMUNITY_RATE_PERCENT: u32 = 2;

/// A community event sponsored by the shop.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CommunityEvent {
    pub id: String,
    pub name: String,
    pub city: String,
    pub date: NaiveDate,
    /// Points awarded to attendees.
    pub points: i64,
    /// Whether the shop supports the event.
    pub supported: bool,
}

const EVENTS: &[(&str, &str, &str, (i32, u32, u32), i64)] = &[
    ("ev01", "Torneo FGC Santiago", "Santiago", (2025, 10, 5), 150),
    ("ev02", "Meetup Indie Valparaíso", "Valparaíso", (2025, 11, 10), 100),
    ("ev03", "LAN Party Concepción", "Concepción", (2025, 12, 1), 200),
    ("ev04", "Game Jam Temuco", "Temuco", (2026, 1, 18), 120),
];

/// The event calendar.
pub fn events() -> Vec<CommunityEvent> {
    EVENTS
        .iter()
        .filter_map(|&(id, name, city, (y, m, d), points)| {
            Some(CommunityEvent {
                id: id.to_string(),
                name: name.to_string(),
                city: city.to_string(),
                date: NaiveDate::from_ymd_opt(y, m, d)?,
                points,
                supported: true,
            })
        })
        .collect()
}

/// Events on or after `today`, earliest first.
pub fn upcoming_events(events: &[CommunityEvent], today: NaiveDate) -> Vec<CommunityEvent> {
    let mut upcoming: Vec<CommunityEvent> =
        events.iter().filter(|e| e.date >= today).cloned().collect();
    upcoming.sort_by_key(|e| e.date);
    upcoming
}

/// Sum of all order totals.
pub fn orders_total(orders: &[Order]) -> Clp {
    orders.iter().map(|o| o.total).sum()
}

/// Community fund for a sales total.
pub fn community_fund(total: Clp, rate_percent: u32) -> Clp {
    total.percentage(rate_percent)
}

/// Headline community figures.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CommunityReport {
    pub orders_total: Clp,
    pub community_fund: Clp,
    pub supported_events: usize,
    pub points_distributed: i64,
    pub upcoming: Vec<CommunityEvent>,
}

impl CommunityReport {
    /// Build the report. `points_distributed` comes from the member list,
    /// which this crate does not own.
    pub fn build(
        orders: &[Order],
        rate_percent: u32,
        points_distributed: i64,
        today: NaiveDate,
    ) -> Self {
        let calendar = events();
        let total = orders_total(orders);
        Self {
            orders_total: total,
            community_fund: community_fund(total, rate_percent),
            supported_events: calendar.iter().filter(|e| e.supported).count(),
            points_distributed,
            upcoming: upcoming_events(&calendar, today),
        }
    }
}

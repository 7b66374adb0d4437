//! Endpoint templates of the hospitality API, relative to the base URL.

const ROOT: &str = "/api/hospitality";

pub const LOGIN: &str = "/api/hospitality/login/";
pub const LOGOUT: &str = "/api/hospitality/logout/";
pub const MY_VENUE: &str = "/api/hospitality/venues/my-venue/";
pub const PROFILE: &str = "/api/hospitality/profile/";
pub const PROFILE_PICTURE: &str = "/api/hospitality/profile/picture/";
pub const OPERATING_HOURS: &str = "/api/hospitality/operating-hours/";
pub const BANK_DETAILS: &str = "/api/hospitality/bank-details/";
pub const ORDERS: &str = "/api/hospitality/orders/";
pub const RESERVATIONS: &str = "/api/hospitality/reservations/";
pub const PROMOTIONS: &str = "/api/hospitality/promotions/";
pub const NIGHTLIFE_EVENTS: &str = "/api/hospitality/nightlife/events/";
pub const WITHDRAWAL_REQUESTS: &str = "/api/hospitality/withdrawal-requests/";
pub const EARNINGS_SUMMARY: &str = "/api/hospitality/earnings/summary/";
pub const EARNINGS_REPORT: &str = "/api/hospitality/earnings/report/";
pub const REVIEWS: &str = "/api/hospitality/reviews/";
pub const MENU_CATEGORIES: &str = "/api/hospitality/menu-categories/";
pub const MENU_ITEMS: &str = "/api/hospitality/menu-items/";
pub const CONVERSATIONS: &str = "/api/hospitality/chat/conversations/";
pub const CHAT_UPLOAD: &str = "/api/hospitality/chat/upload/";

pub fn operating_hours_detail(id: i64) -> String { format!("{ROOT}/operating-hours/{id}/") }

pub fn order(id: i64) -> String { format!("{ROOT}/orders/{id}/") }

pub fn order_status(id: i64) -> String { format!("{ROOT}/orders/{id}/status/") }

pub fn order_items(id: i64) -> String { format!("{ROOT}/orders/{id}/items/") }

pub fn reservation(id: i64) -> String { format!("{ROOT}/reservations/{id}/") }

pub fn reservation_status(id: i64) -> String { format!("{ROOT}/reservations/{id}/status/") }

/// Banners are listed and created under the owning venue.
pub fn venue_banners(venue_id: i64) -> String { format!("{ROOT}/venues/{venue_id}/banners/") }

pub fn banner(id: i64) -> String { format!("{ROOT}/banners/{id}/") }

pub fn promotion(id: i64) -> String { format!("{ROOT}/promotions/{id}/") }

pub fn nightlife_event(id: i64) -> String { format!("{ROOT}/nightlife/events/{id}/") }

pub fn entry_types(event_id: i64) -> String {
    format!("{ROOT}/nightlife/events/{event_id}/entry-types/")
}

pub fn time_slots(event_id: i64) -> String {
    format!("{ROOT}/nightlife/events/{event_id}/time-slots/")
}

/// Earnings report for an inclusive `YYYY-MM-DD` range.
pub fn earnings_report(start_date: &str, end_date: &str) -> String {
    format!("{EARNINGS_REPORT}?start_date={start_date}&end_date={end_date}")
}

pub fn review_reply(id: i64) -> String { format!("{ROOT}/reviews/{id}/reply/") }

pub fn venue_qr_code(venue_id: i64) -> String { format!("{ROOT}/venues/{venue_id}/qr-code/") }

pub fn menu_category(id: i64) -> String { format!("{ROOT}/menu-categories/{id}/") }

pub fn menu_item(id: i64) -> String { format!("{ROOT}/menu-items/{id}/") }

pub fn conversation_messages(conversation_id: i64) -> String {
    format!("{ROOT}/chat/conversations/{conversation_id}/messages/")
}

//! Terminal renderings of the application screens
//!
//! Views own no persistent state. They are built from a session snapshot or
//! gateway results and rendered either as text or as JSON.

pub mod home;
pub mod layout;
pub mod listing;
pub mod search;

use serde_json::Value;

pub use home::HomeView;
pub use layout::Layout;
pub use listing::{BookingListing, VenueCard};
pub use search::{SearchOutcome, SearchView};

pub trait View {
    fn render_text(&self) -> String;
    fn to_json(&self) -> Value;
}

/// Whole-unit currency amount with thousands separators, e.g. `PKR 50,000`
pub fn format_price(amount: f64, currency: &str) -> String {
    let negative = amount < 0.0;
    let fixed = format!("{:.2}", amount.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let fraction = fraction.trim_end_matches('0');
    let sign = if negative { "-" } else { "" };
    if fraction.is_empty() {
        format!("{} {}{}", currency, sign, grouped)
    } else {
        format!("{} {}{}.{}", currency, sign, grouped, fraction)
    }
}

use crate::models::{Category, PropertyListing};

const THOUSAND: f64 = 1_000.0;
const CRORE: f64 = 10_000_000.0;

/// Price as shown on listing cards.
///
/// Rent is quoted in thousands per month, every other category in crore.
pub fn format_price(price: Option<f64>, category: Category) -> String {
    match price.filter(|price| price.is_finite()) {
        None => "Price on request".to_string(),
        Some(price) if category.is_recurring() => {
            format!("{}k BDT/mo", group_thousands(price / THOUSAND))
        }
        Some(price) => format!("{} Cr BDT", group_thousands(price / CRORE)),
    }
}

pub fn listing_price(listing: &PropertyListing) -> String {
    format_price(listing.price, listing.category)
}

/// At most two decimals, trailing zeros dropped, commas between thousands
fn group_thousands(value: f64) -> String {
    let text = format!("{:.2}", value.abs());
    let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), ""));
    let fraction = fraction.trim_end_matches('0');

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 && text != "0.00" { "-" } else { "" };
    if fraction.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{fraction}")
    }
}

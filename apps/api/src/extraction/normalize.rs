//! Normalizer: canonical forms for contact entities and date tokens.

use chrono::{Month, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::extraction::entities::ContactEntities;

pub const PRESENT: &str = "Present";

static NUMERIC_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,2})[-/](\d{1,2})[-/](\d{4})$").unwrap());

static MONTH_YEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Za-z]{3,})\.?\s+(\d{4})$").unwrap());

pub fn normalize(entities: &ContactEntities) -> ContactEntities {
    ContactEntities {
        name: entities.name.as_deref().map(title_case),
        email: entities.email.as_deref().map(|e| e.trim().to_lowercase()),
        phone: entities.phone.as_deref().map(phone_digits),
        location: entities.location.as_deref().map(|l| l.trim().to_string()),
        linkedin: entities.linkedin.as_deref().map(with_scheme),
        github: entities.github.as_deref().map(with_scheme),
        website: entities.website.as_deref().map(with_scheme),
    }
}

/// Per-word title case. Internal capitals are lost ("McDonald" → "Mcdonald").
fn title_case(name: &str) -> String {
    name.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Digits only, keeping a leading `+`.
fn phone_digits(phone: &str) -> String {
    let phone = phone.trim();
    let mut out = String::with_capacity(phone.len());
    if phone.starts_with('+') {
        out.push('+');
    }
    out.extend(phone.chars().filter(char::is_ascii_digit));
    out
}

fn with_scheme(url: &str) -> String {
    let url = url.trim();
    if url.starts_with("http") {
        url.to_string()
    } else {
        format!("https://{url}")
    }
}

/// Canonical form of a date token: `Present`, `YYYY-MM-DD`, `YYYY-MM` or
/// `YYYY`. Tokens that don't parse are returned unchanged.
pub fn normalize_date(raw: &str) -> String {
    let token = raw.trim();

    if token.eq_ignore_ascii_case("present") || token.eq_ignore_ascii_case("current") {
        return PRESENT.to_string();
    }

    if let Some(caps) = NUMERIC_DATE.captures(token) {
        let parsed = (
            caps[3].parse::<i32>(),
            caps[1].parse::<u32>(),
            caps[2].parse::<u32>(),
        );
        if let (Ok(year), Ok(month), Ok(day)) = parsed {
            if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
                return date.format("%Y-%m-%d").to_string();
            }
        }
        return token.to_string();
    }

    if let Some(caps) = MONTH_YEAR.captures(token) {
        let prefix = caps[1].get(..3).unwrap_or_default();
        if let Ok(month) = prefix.parse::<Month>() {
            return format!("{}-{:02}", &caps[2], month.number_from_month());
        }
        return token.to_string();
    }

    // Bare years are already canonical.
    token.to_string()
}

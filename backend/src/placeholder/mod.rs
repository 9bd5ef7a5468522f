//! Placeholder values for the transactional columns of the import file.
//!
//! The review-collector import schema requires an email, a reference, a
//! customer name and a transaction date per row. The catalog has none of
//! these, so they are synthesized by a [`PlaceholderSource`]:
//!
//! - [`RandomPlaceholders`] - a fresh random email, UUID and recent date per row
//! - [`FixedPlaceholders`] - the same literal values on every row

use chrono::{Days, Local, NaiveDate};
use rand::rngs::ThreadRng;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Domains used for random email addresses.
pub const EMAIL_DOMAINS: [&str; 4] = ["example.com", "test.com", "mail.com", "demo.org"];

/// Date format of the `transactionDate` column.
pub const TRANSACTION_DATE_FORMAT: &str = "%d.%m.%Y";

pub const MOCK_FIRST_NAME: &str = "MockFirstName";
pub const MOCK_LAST_NAME: &str = "MockLastName";

pub const FIXED_EMAIL: &str = "update_gtin@trustedshops.com";
pub const FIXED_MARKER: &str = "GTIN_UPDATE";
pub const FIXED_TRANSACTION_DATE: &str = "20.09.2024";

/// How many days back a random transaction date may lie.
const MAX_DAYS_BACK: u64 = 365;

/// How identity and transaction columns are filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentityMode {
    /// Random email, reference and date per row
    #[default]
    Random,
    /// Fixed literal placeholders on every row
    Fixed,
}

impl fmt::Display for IdentityMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdentityMode::Random => f.write_str("random"),
            IdentityMode::Fixed => f.write_str("fixed"),
        }
    }
}

impl FromStr for IdentityMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "random" => Ok(IdentityMode::Random),
            "fixed" | "fixed-placeholder" => Ok(IdentityMode::Fixed),
            other => Err(format!("unknown identity mode '{}' (expected random or fixed)", other)),
        }
    }
}

/// Supplies the synthesized columns, one call per output row.
pub trait PlaceholderSource {
    fn email(&mut self) -> String;
    fn reference(&mut self) -> String;
    fn first_name(&mut self) -> String;
    fn last_name(&mut self) -> String;
    /// Formatted `DD.MM.YYYY`
    fn transaction_date(&mut self) -> String;
}

/// Build the source for an identity mode.
pub fn placeholder_source(mode: IdentityMode) -> Box<dyn PlaceholderSource> {
    match mode {
        IdentityMode::Random => Box::new(RandomPlaceholders::new()),
        IdentityMode::Fixed => Box::new(FixedPlaceholders),
    }
}

// =============================================================================
// Random
// =============================================================================

/// Random placeholders drawn from `rng`, dated relative to `today`.
pub struct RandomPlaceholders<R: Rng = ThreadRng> {
    rng: R,
    today: NaiveDate,
}

impl RandomPlaceholders<ThreadRng> {
    pub fn new() -> Self {
        Self::with_rng(rand::rng(), Local::now().date_naive())
    }
}

impl Default for RandomPlaceholders<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> RandomPlaceholders<R> {
    pub fn with_rng(rng: R, today: NaiveDate) -> Self {
        Self { rng, today }
    }
}

impl<R: Rng> PlaceholderSource for RandomPlaceholders<R> {
    fn email(&mut self) -> String {
        random_email(&mut self.rng)
    }

    fn reference(&mut self) -> String {
        random_reference(&mut self.rng)
    }

    fn first_name(&mut self) -> String {
        MOCK_FIRST_NAME.to_string()
    }

    fn last_name(&mut self) -> String {
        MOCK_LAST_NAME.to_string()
    }

    fn transaction_date(&mut self) -> String {
        random_transaction_date(&mut self.rng, self.today)
    }
}

/// Random address: 5-10 lowercase letters at one of [`EMAIL_DOMAINS`].
pub fn random_email<R: Rng>(rng: &mut R) -> String {
    let len = rng.random_range(5..=10);
    let local: String = (0..len).map(|_| rng.random_range(b'a'..=b'z') as char).collect();
    let domain = EMAIL_DOMAINS[rng.random_range(0..EMAIL_DOMAINS.len())];
    format!("{}@{}", local, domain)
}

/// Random version-4 UUID in its 36-character hyphenated form.
pub fn random_reference<R: Rng>(rng: &mut R) -> String {
    uuid::Builder::from_random_bytes(rng.random())
        .into_uuid()
        .hyphenated()
        .to_string()
}

/// Random date between `today - 365 days` and `today`, as `DD.MM.YYYY`.
pub fn random_transaction_date<R: Rng>(rng: &mut R, today: NaiveDate) -> String {
    let days_back = rng.random_range(0..=MAX_DAYS_BACK);
    today
        .checked_sub_days(Days::new(days_back))
        .unwrap_or(today)
        .format(TRANSACTION_DATE_FORMAT)
        .to_string()
}

// =============================================================================
// Fixed
// =============================================================================

/// Literal placeholders, identical on every row.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedPlaceholders;

impl PlaceholderSource for FixedPlaceholders {
    fn email(&mut self) -> String {
        FIXED_EMAIL.to_string()
    }

    fn reference(&mut self) -> String {
        FIXED_MARKER.to_string()
    }

    fn first_name(&mut self) -> String {
        FIXED_MARKER.to_string()
    }

    fn last_name(&mut self) -> String {
        FIXED_MARKER.to_string()
    }

    fn transaction_date(&mut self) -> String {
        FIXED_TRANSACTION_DATE.to_string()
    }
}

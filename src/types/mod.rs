//! Domain and wire types.
//!
//! - [`outcome`] - The YES/NO outcome tag
//! - [`market`] - Kalshi market wire records and the ZEST market record
//! - [`activity`] - Wallet and bet activity history entries

pub mod activity;
pub mod market;
pub mod outcome;

pub use activity::{Activity, ActivityKind};
pub use market::{Category, KalshiMarket, Market, MarketStatus};
pub use outcome::Outcome;

/// Price in cents (0-100 for binary contracts)
///
/// - 1 = R$0,01 (1% implied probability)
/// - 100 = R$1,00 (certain outcome)
///
/// Zero only appears in a quote whose price rounded down to nothing.
pub type Price = u8;

/// Money in integer cents
///
/// Signed so that profit and loss share the type with stakes and payouts.
pub type Cents = i64;

/// Timestamp in milliseconds since Unix epoch
pub type TimestampMs = u64;

/// Current wall-clock time in milliseconds since Unix epoch
pub(crate) fn now_ms() -> TimestampMs {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as TimestampMs)
        .unwrap_or(0)
}

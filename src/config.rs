//! Client and display configuration.
//!
//! This module provides the [`Config`] struct for choosing the Kalshi
//! environment that markets are read from, plus the small enumerations the
//! render layer consumes ([`Locale`], [`Theme`]).

use std::time::Duration;

/// Default number of markets requested per page
pub const DEFAULT_PAGE_LIMIT: u32 = 100;

/// Largest page Kalshi accepts for market listings
pub const MAX_PAGE_LIMIT: u32 = 1000;

/// API environment (production or demo)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    /// Production environment
    #[default]
    Production,
    /// Demo environment
    Demo,
}

impl Environment {
    /// Get the base URL for REST API
    pub fn rest_base_url(&self) -> &'static str {
        match self {
            Environment::Production => "https://api.elections.kalshi.com/trade-api/v2",
            Environment::Demo => "https://demo-api.kalshi.co/trade-api/v2",
        }
    }
}

/// Display locale used when rendering money and percentages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    /// Brazilian Portuguese: `1.234,56`
    #[default]
    PtBr,
}

impl Locale {
    /// Thousands separator
    pub const fn group_separator(self) -> char {
        match self {
            Locale::PtBr => '.',
        }
    }

    /// Decimal separator
    pub const fn decimal_separator(self) -> char {
        match self {
            Locale::PtBr => ',',
        }
    }

    /// Currency symbol placed before amounts
    pub const fn currency_symbol(self) -> &'static str {
        match self {
            Locale::PtBr => "R$",
        }
    }
}

/// Colour theme selected by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    /// Light background
    #[default]
    Light,
    /// Dark background
    Dark,
}

impl Theme {
    /// The other theme
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Configuration for the market-data client and render boundary
///
/// # Example
///
/// ```rust
/// use zest_markets::Config;
/// use zest_markets::config::{Environment, Theme};
///
/// let config = Config::new()
///     .with_environment(Environment::Demo)
///     .with_timeout(std::time::Duration::from_secs(30))
///     .with_theme(Theme::Dark);
///
/// assert!(config.rest_base_url().contains("demo"));
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// API environment
    environment: Environment,

    /// HTTP request timeout
    timeout: Duration,

    /// Markets requested per page
    page_limit: u32,

    /// Display locale
    locale: Locale,

    /// Display theme
    theme: Theme,
}

impl Config {
    /// Create a configuration with production defaults
    pub fn new() -> Self {
        Self {
            environment: Environment::default(),
            timeout: Duration::from_secs(10),
            page_limit: DEFAULT_PAGE_LIMIT,
            locale: Locale::default(),
            theme: Theme::default(),
        }
    }

    /// Set the API environment (production or demo)
    #[must_use]
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Set the HTTP request timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the default page size, clamped to `1..=1000`
    #[must_use]
    pub fn with_page_limit(mut self, page_limit: u32) -> Self {
        self.page_limit = page_limit.clamp(1, MAX_PAGE_LIMIT);
        self
    }

    /// Set the display locale
    #[must_use]
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    /// Set the display theme
    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Get the environment
    pub fn environment(&self) -> Environment {
        self.environment
    }

    /// Get the REST API base URL
    pub fn rest_base_url(&self) -> &'static str {
        self.environment.rest_base_url()
    }

    /// Get the timeout duration
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Get the default page size
    pub fn page_limit(&self) -> u32 {
        self.page_limit
    }

    /// Get the display locale
    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Get the display theme
    pub fn theme(&self) -> Theme {
        self.theme
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

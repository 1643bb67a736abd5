//! Asset Builder DSL
//!
//! # Examples
//!
//! ```ignore
//! use finproj_core::config::AssetBuilder;
//!
//! let house = AssetBuilder::new("House")
//!     .start("2018-01-01")
//!     .value(250_000.0)
//!     .growth("3")
//!     .purchase_price(200_000.0)
//!     .liability("Joe(CGT)")
//!     .category("Property");
//! ```

use crate::model::Asset;

/// Builder for an asset definition
#[derive(Debug, Clone)]
pub struct AssetBuilder {
    pub(crate) asset: Asset,
}

impl AssetBuilder {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            asset: Asset {
                name: name.into(),
                growth: "0".to_string(),
                ..Default::default()
            },
        }
    }

    /// Start date: a literal date or a trigger name
    #[must_use]
    pub fn start(mut self, date: impl Into<String>) -> Self {
        self.asset.start = date.into();
        self
    }

    #[must_use]
    pub fn value(mut self, value: f64) -> Self {
        self.asset.value = value;
        self
    }

    /// Annual growth in percent, or the name of a setting
    #[must_use]
    pub fn growth(mut self, growth: impl Into<String>) -> Self {
        self.asset.growth = growth.into();
        self
    }

    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.asset.category = category.into();
        self
    }

    #[must_use]
    pub fn liability(mut self, liability: impl Into<String>) -> Self {
        self.asset.liability = liability.into();
        self
    }

    #[must_use]
    pub fn purchase_price(mut self, price: f64) -> Self {
        self.asset.purchase_price = Some(price);
        self
    }

    /// Grow at the stated rate only, ignoring CPI
    #[must_use]
    pub fn cpi_immune(mut self) -> Self {
        self.asset.cpi_immune = true;
        self
    }

    #[must_use]
    pub fn build(self) -> Asset {
        self.asset
    }
}

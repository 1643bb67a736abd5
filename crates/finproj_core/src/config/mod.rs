//! Model construction
//!
//! Models are normally loaded from YAML or JSON files. For tests,
//! benchmarks and programmatic use, the builder DSL produces the same
//! [`ModelData`](crate::model::ModelData) without writing any text by hand:
//!
//! ```ignore
//! use finproj_core::config::{AssetBuilder, ModelBuilder};
//!
//! let model = ModelBuilder::new()
//!     .view_range("2018-01-01", "2030-01-01")
//!     .asset(AssetBuilder::new("Cash").start("2018-01-01").value(1_000.0))
//!     .build();
//! ```

pub mod asset_builder;
pub mod builder;
pub mod cash_flow_builder;
pub mod transaction_builder;

pub use asset_builder::AssetBuilder;
pub use builder::ModelBuilder;
pub use cash_flow_builder::CashFlowBuilder;
pub use transaction_builder::TransactionBuilder;

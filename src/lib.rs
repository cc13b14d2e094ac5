// Sales Representation - Core Library
// Monthly compensation of territory-based sales representatives

pub mod config;
pub mod entities;
pub mod error;
pub mod month;

// Re-export commonly used types
pub use config::{CompensationConfig, TerritoryConfig};
pub use entities::{
    Representative, SalaryBreakdown, SharedTerritory, Territory, TerritoryRegistry, MAX_PERCENTAGE,
};
pub use error::{CompensationError, CompensationResult};
pub use month::{MonthIndex, MONTHS_PER_YEAR};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Entity Models
//
// Each entity has:
// - Stable identity (numeric id) that NEVER changes
// - Mutable values validated on every write
//
// Representatives point at a shared Territory; the territory is owned by
// the registry (or the caller), never by a representative.

pub mod representative;
pub mod territory;

pub use representative::{Representative, SalaryBreakdown, MAX_PERCENTAGE};
pub use territory::{
    read_territory, write_territory, SharedTerritory, Territory, TerritoryRegistry,
};

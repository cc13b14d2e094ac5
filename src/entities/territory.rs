// 🗺️ Territory Entity - geographic sales zone + meal allowance
//
// "A territory is SHARED, representatives only point at it"
//
// Problem solved:
// - Many representatives work the same territory
// - Changing the territory's meal allowance must reach all of them
// - Salaries read the allowance at computation time, never a cached copy

use crate::config::CompensationConfig;
use crate::error::{ensure_non_negative, CompensationError, CompensationResult};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Shared handle on a territory (many representatives, one territory)
pub type SharedTerritory = Arc<RwLock<Territory>>;

// ============================================================================
// TERRITORY ENTITY
// ============================================================================

/// Territory Entity
///
/// Identity: numeric id (never changes)
/// Values: name, meal allowance (allowance can change)
#[derive(Debug, Clone, PartialEq)]
pub struct Territory {
    id: u32,
    name: String,
    /// Meal allowance paid every month to representatives of this territory
    meal_allowance: f64,
}

impl Territory {
    /// Create a territory with no meal allowance yet
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Territory {
            id,
            name: name.into(),
            meal_allowance: 0.0,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn meal_allowance(&self) -> f64 {
        self.meal_allowance
    }

    /// Update the meal allowance (positive or zero)
    pub fn set_meal_allowance(&mut self, meal_allowance: f64) -> CompensationResult<()> {
        ensure_non_negative("meal_allowance", meal_allowance)?;
        self.meal_allowance = meal_allowance;
        Ok(())
    }

    /// Wrap into a handle that can be handed to many representatives
    pub fn shared(self) -> SharedTerritory {
        Arc::new(RwLock::new(self))
    }

    /// Check if a string designates this territory (case-insensitive name)
    pub fn matches(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.trim().to_lowercase()
    }
}

/// Read a shared territory, turning a poisoned lock into InvalidState
pub fn read_territory(
    territory: &SharedTerritory,
) -> CompensationResult<RwLockReadGuard<'_, Territory>> {
    territory.read().map_err(|_| poisoned_territory())
}

/// Write a shared territory, turning a poisoned lock into InvalidState
pub fn write_territory(
    territory: &SharedTerritory,
) -> CompensationResult<RwLockWriteGuard<'_, Territory>> {
    territory.write().map_err(|_| poisoned_territory())
}

fn poisoned_territory() -> CompensationError {
    CompensationError::InvalidState("territory is unavailable (poisoned lock)".to_string())
}

fn poisoned_registry() -> CompensationError {
    CompensationError::InvalidState("territory registry is unavailable (poisoned lock)".to_string())
}

// ============================================================================
// TERRITORY REGISTRY
// ============================================================================

/// Registry of all known territories
///
/// Holds one shared handle per territory id. Representatives are given
/// clones of these handles, so updates made through the registry are seen
/// by every representative of the territory.
///
/// A poisoned lock (registry or territory) is reported as InvalidState by
/// every lookup, never as "not found".
pub struct TerritoryRegistry {
    territories: Arc<RwLock<Vec<SharedTerritory>>>,
}

impl TerritoryRegistry {
    /// Create new empty registry
    pub fn new() -> Self {
        TerritoryRegistry {
            territories: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Build a registry from the configured territory catalogue
    pub fn from_config(config: &CompensationConfig) -> CompensationResult<Self> {
        let mut registry = TerritoryRegistry::new();
        for entry in &config.territories {
            let mut territory = Territory::new(entry.id, entry.name.clone());
            territory.set_meal_allowance(entry.meal_allowance)?;
            registry.register(territory)?;
        }
        tracing::debug!(
            count = config.territories.len(),
            "territory registry loaded from config"
        );
        Ok(registry)
    }

    /// Register a territory and get back its shared handle
    ///
    /// Ids are unique: registering the same id twice is rejected.
    pub fn register(&mut self, territory: Territory) -> CompensationResult<SharedTerritory> {
        let mut territories = self.territories.write().map_err(|_| poisoned_registry())?;

        for existing in territories.iter() {
            if read_territory(existing)?.id() == territory.id() {
                return Err(CompensationError::invalid_argument(
                    "territory_id",
                    format!("territory {} is already registered", territory.id()),
                ));
            }
        }

        let handle = territory.shared();
        territories.push(Arc::clone(&handle));
        Ok(handle)
    }

    /// Find the first territory satisfying `predicate`
    fn find<F>(&self, predicate: F) -> CompensationResult<Option<SharedTerritory>>
    where
        F: Fn(&Territory) -> bool,
    {
        let territories = self.territories.read().map_err(|_| poisoned_registry())?;
        for territory in territories.iter() {
            if predicate(&*read_territory(territory)?) {
                return Ok(Some(Arc::clone(territory)));
            }
        }
        Ok(None)
    }

    /// Find territory by id
    pub fn find_by_id(&self, id: u32) -> CompensationResult<Option<SharedTerritory>> {
        self.find(|t| t.id() == id)
    }

    /// Find territory by name (exact match, case-insensitive)
    pub fn find_by_name(&self, name: &str) -> CompensationResult<Option<SharedTerritory>> {
        self.find(|t| t.matches(name))
    }

    /// Snapshot of all territories, sorted by id
    pub fn all_territories(&self) -> CompensationResult<Vec<Territory>> {
        let territories = self.territories.read().map_err(|_| poisoned_registry())?;
        let mut snapshot = Vec::with_capacity(territories.len());
        for territory in territories.iter() {
            snapshot.push(read_territory(territory)?.clone());
        }
        snapshot.sort_by_key(|t| t.id());
        Ok(snapshot)
    }

    pub fn count(&self) -> CompensationResult<usize> {
        self.territories
            .read()
            .map(|t| t.len())
            .map_err(|_| poisoned_registry())
    }

    /// Update the meal allowance of a registered territory
    pub fn set_meal_allowance(&self, id: u32, meal_allowance: f64) -> CompensationResult<()> {
        let territory = self.find_by_id(id)?.ok_or_else(|| {
            CompensationError::invalid_argument(
                "territory_id",
                format!("territory {} not found", id),
            )
        })?;
        write_territory(&territory)?.set_meal_allowance(meal_allowance)?;
        tracing::debug!(territory_id = id, meal_allowance, "meal allowance updated");
        Ok(())
    }
}

impl Default for TerritoryRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TerritoryConfig;

    #[test]
    fn test_territory_creation() {
        let territory = Territory::new(1, "Occitanie");

        assert_eq!(territory.id(), 1);
        assert_eq!(territory.name(), "Occitanie");
        assert_eq!(territory.meal_allowance(), 0.0);
    }

    #[test]
    fn test_set_meal_allowance() {
        let mut territory = Territory::new(1, "Occitanie");
        territory.set_meal_allowance(200.0).unwrap();
        assert_eq!(territory.meal_allowance(), 200.0);
    }

    #[test]
    fn test_negative_meal_allowance_rejected() {
        let mut territory = Territory::new(1, "Occitanie");
        territory.set_meal_allowance(150.0).unwrap();

        let err = territory.set_meal_allowance(-1.0).unwrap_err();
        assert!(err.is_invalid_argument());
        // Unchanged on failure
        assert_eq!(territory.meal_allowance(), 150.0);
    }

    #[test]
    fn test_territory_matches() {
        let territory = Territory::new(2, "Bretagne");
        assert!(territory.matches("bretagne"));
        assert!(territory.matches(" BRETAGNE "));
        assert!(!territory.matches("Normandie"));
    }

    #[test]
    fn test_registry_register_and_find() {
        let mut registry = TerritoryRegistry::new();
        registry.register(Territory::new(1, "Occitanie")).unwrap();
        registry.register(Territory::new(2, "Bretagne")).unwrap();

        assert_eq!(registry.count().unwrap(), 2);

        let found = registry.find_by_id(2).unwrap().unwrap();
        assert_eq!(found.read().unwrap().name(), "Bretagne");

        let found = registry.find_by_name("occitanie").unwrap().unwrap();
        assert_eq!(found.read().unwrap().id(), 1);

        assert!(registry.find_by_id(99).unwrap().is_none());
        assert!(registry.find_by_name("Alsace").unwrap().is_none());
    }

    #[test]
    fn test_registry_duplicate_id_rejected() {
        let mut registry = TerritoryRegistry::new();
        registry.register(Territory::new(1, "Occitanie")).unwrap();

        let err = registry.register(Territory::new(1, "Other")).unwrap_err();
        assert!(err.is_invalid_argument());
        assert_eq!(registry.count().unwrap(), 1);
    }

    #[test]
    fn test_registry_handles_are_shared() {
        let mut registry = TerritoryRegistry::new();
        let handle = registry.register(Territory::new(1, "Occitanie")).unwrap();

        registry.set_meal_allowance(1, 250.0).unwrap();

        // Same territory behind both handles
        assert_eq!(handle.read().unwrap().meal_allowance(), 250.0);
        assert!(Arc::ptr_eq(&handle, &registry.find_by_id(1).unwrap().unwrap()));
    }

    #[test]
    fn test_registry_set_meal_allowance_unknown_id() {
        let registry = TerritoryRegistry::new();
        let err = registry.set_meal_allowance(42, 10.0).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_all_territories_sorted_by_id() {
        let mut registry = TerritoryRegistry::new();
        registry.register(Territory::new(3, "Normandie")).unwrap();
        registry.register(Territory::new(1, "Occitanie")).unwrap();
        registry.register(Territory::new(2, "Bretagne")).unwrap();

        let ids: Vec<u32> = registry
            .all_territories()
            .unwrap()
            .iter()
            .map(|t| t.id())
            .collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_registry_from_config() {
        let config = CompensationConfig {
            default_fixed_salary: 0.0,
            territories: vec![
                TerritoryConfig {
                    id: 1,
                    name: "Occitanie".to_string(),
                    meal_allowance: 200.0,
                },
                TerritoryConfig {
                    id: 2,
                    name: "Bretagne".to_string(),
                    meal_allowance: 180.0,
                },
            ],
        };

        let registry = TerritoryRegistry::from_config(&config).unwrap();
        assert_eq!(registry.count().unwrap(), 2);

        let bretagne = registry.find_by_id(2).unwrap().unwrap();
        assert_eq!(bretagne.read().unwrap().meal_allowance(), 180.0);
    }

    #[test]
    fn test_poisoned_territory_is_invalid_state() {
        let territory = Territory::new(1, "Occitanie").shared();

        let poisoner = Arc::clone(&territory);
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.write().unwrap();
            panic!("poison the territory lock");
        })
        .join();

        let err = read_territory(&territory).unwrap_err();
        assert!(err.is_invalid_state());
    }

    #[test]
    fn test_poisoned_registered_territory_is_invalid_state() {
        let mut registry = TerritoryRegistry::new();
        let handle = registry.register(Territory::new(1, "Occitanie")).unwrap();
        registry.register(Territory::new(2, "Bretagne")).unwrap();

        let _ = std::thread::spawn(move || {
            let _guard = handle.write().unwrap();
            panic!("poison the territory lock");
        })
        .join();

        // Registered but unusable: not a missing territory
        assert!(registry.find_by_id(1).unwrap_err().is_invalid_state());
        assert!(registry.find_by_name("Occitanie").unwrap_err().is_invalid_state());
        assert!(registry.all_territories().unwrap_err().is_invalid_state());

        let err = registry.set_meal_allowance(1, 300.0).unwrap_err();
        assert!(err.is_invalid_state(), "unexpected error: {:?}", err);

        assert_eq!(registry.count().unwrap(), 2);
    }
}

use crate::domain::model::{ProfessionEntry, OTHER};
use std::collections::HashMap;

/// Maps profession ids to category labels.
#[derive(Debug, Clone, Default)]
pub struct CategoryResolver {
    index: HashMap<i64, String>,
}

impl CategoryResolver {
    /// Builds the id index once. When an id appears more than once the first
    /// entry wins, matching a front-to-back scan.
    pub fn new(professions: &[ProfessionEntry]) -> Self {
        let mut index = HashMap::with_capacity(professions.len());
        for entry in professions {
            index
                .entry(entry.profession_id)
                .or_insert_with(|| entry.category.clone());
        }
        tracing::debug!("Indexed {} profession ids", index.len());
        Self { index }
    }

    pub fn resolve(&self, id: i64) -> &str {
        self.index.get(&id).map(String::as_str).unwrap_or(OTHER)
    }

    /// Resolves a raw cell; anything that is not an integer is unresolved.
    pub fn resolve_raw(&self, raw_id: &str) -> &str {
        match raw_id.parse::<i64>() {
            Ok(id) => self.resolve(id),
            Err(_) => {
                tracing::debug!("Profession id '{}' is not an integer", raw_id);
                OTHER
            }
        }
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

/// Linear-scan lookup without an index.
pub fn resolve_category(professions: &[ProfessionEntry], id: i64) -> &str {
    professions
        .iter()
        .find(|entry| entry.profession_id == id)
        .map(|entry| entry.category.as_str())
        .unwrap_or(OTHER)
}

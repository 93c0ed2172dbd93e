//! DetailedDropsResult - Collection and coin attribution for one crop

use crate::breakdown::Breakdown;
use serde::Serialize;

/// Expected collection and NPC income for one crop
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DetailedDropsResult {
    collection: f64,
    npc_coins: f64,
    fortune: f64,
    coin_sources: Breakdown,
    other_collection: Breakdown,
}

impl DetailedDropsResult {
    /// An empty result computed at the given fortune
    pub fn with_fortune(fortune: f64) -> Self {
        DetailedDropsResult {
            fortune,
            ..DetailedDropsResult::default()
        }
    }

    /// Total collection gained
    pub fn collection(&self) -> f64 {
        self.collection
    }

    /// Total NPC coins, always the sum of the coin sources
    pub fn npc_coins(&self) -> f64 {
        self.npc_coins
    }

    /// Effective fortune used
    pub fn fortune(&self) -> f64 {
        self.fortune
    }

    /// NPC coins per source
    pub fn coin_sources(&self) -> &Breakdown {
        &self.coin_sources
    }

    /// Collection units per source
    pub fn other_collection(&self) -> &Breakdown {
        &self.other_collection
    }

    pub(crate) fn set_collection(&mut self, collection: f64) {
        self.collection = collection;
    }

    pub(crate) fn add_collection(&mut self, amount: f64) {
        self.collection += amount;
    }

    pub(crate) fn set_coin_source(&mut self, label: impl Into<String>, coins: f64) {
        self.coin_sources.set(label, coins);
        self.npc_coins = self.coin_sources.total();
    }

    pub(crate) fn other_collection_mut(&mut self) -> &mut Breakdown {
        &mut self.other_collection
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_npc_coins_follow_coin_sources() {
        let mut result = DetailedDropsResult::with_fortune(100.0);
        result.set_coin_source("Collection", 600.0);
        result.set_coin_source("Bountiful", 40.0);
        assert!((result.npc_coins() - 640.0).abs() < f64::EPSILON);

        result.set_coin_source("Collection", 300.0);
        assert!((result.npc_coins() - 340.0).abs() < f64::EPSILON);
        assert!((result.fortune() - 100.0).abs() < f64::EPSILON);
    }
}

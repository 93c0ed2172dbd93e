//! Breakdown - Ordered label → value attribution

use indexmap::IndexMap;
use serde::Serialize;

/// Labeled contributions in insertion order.
///
/// Labels are unique: setting an existing label overwrites its value in place,
/// keeping the position where the label first appeared.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Breakdown {
    entries: IndexMap<String, f64>,
}

impl Breakdown {
    /// Create an empty breakdown
    pub fn new() -> Self {
        Breakdown::default()
    }

    /// Set a label's value, overwriting any previous value
    pub fn set(&mut self, label: impl Into<String>, value: f64) {
        self.entries.insert(label.into(), value);
    }

    /// Value for a label
    pub fn get(&self, label: &str) -> Option<f64> {
        self.entries.get(label).copied()
    }

    /// Whether a label is present
    pub fn contains(&self, label: &str) -> bool {
        self.entries.contains_key(label)
    }

    /// Rename a label in place. Returns false when `from` is absent.
    ///
    /// An existing entry named `to` is replaced.
    pub fn rename(&mut self, from: &str, to: impl Into<String>) -> bool {
        let to = to.into();
        if from == to {
            return self.contains(from);
        }
        if !self.contains(from) {
            return false;
        }
        self.entries.shift_remove(&to);
        match self.entries.shift_remove_full(from) {
            Some((index, _, value)) => {
                self.entries.shift_insert(index, to, value);
                true
            }
            None => false,
        }
    }

    /// Sum of every entry, in insertion order
    pub fn total(&self) -> f64 {
        self.entries.values().sum()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(l, v)| (l.as_str(), *v))
    }

    /// Labels in insertion order
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_overwrites_in_place() {
        let mut breakdown = Breakdown::new();
        breakdown.set("Turbo", 25.0);
        breakdown.set("Harvesting", 75.0);
        breakdown.set("Turbo", 10.0);

        let labels: Vec<&str> = breakdown.labels().collect();
        assert_eq!(labels, vec!["Turbo", "Harvesting"]);
        assert_eq!(breakdown.get("Turbo"), Some(10.0));
        assert!((breakdown.total() - 85.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_rename_keeps_position() {
        let mut breakdown = Breakdown::new();
        breakdown.set("Normal", 100.0);
        breakdown.set("Mushroom", 20.0);
        breakdown.set("Collection", 100.0);

        assert!(breakdown.rename("Mushroom", "Mooshroom"));
        let labels: Vec<&str> = breakdown.labels().collect();
        assert_eq!(labels, vec!["Normal", "Mooshroom", "Collection"]);
        assert!(!breakdown.rename("Missing", "Other"));
    }

    #[test]
    fn test_rename_replaces_existing_target() {
        let mut breakdown = Breakdown::new();
        breakdown.set("A", 1.0);
        breakdown.set("B", 2.0);
        breakdown.set("C", 3.0);

        assert!(breakdown.rename("C", "A"));
        let entries: Vec<(&str, f64)> = breakdown.iter().collect();
        assert_eq!(entries, vec![("B", 2.0), ("A", 3.0)]);
    }

    #[test]
    fn test_rename_to_same_label() {
        let mut breakdown = Breakdown::new();
        breakdown.set("A", 1.0);
        breakdown.set("B", 2.0);

        assert!(breakdown.rename("A", "A"));
        let entries: Vec<(&str, f64)> = breakdown.iter().collect();
        assert_eq!(entries, vec![("A", 1.0), ("B", 2.0)]);
    }

    #[test]
    fn test_serializes_in_order() {
        let mut breakdown = Breakdown::new();
        breakdown.set("Tool Bonus", 50.0);
        breakdown.set("Blessed", 20.0);
        let json = serde_json::to_string(&breakdown).unwrap();
        assert_eq!(json, r#"{"Tool Bonus":50.0,"Blessed":20.0}"#);
    }
}

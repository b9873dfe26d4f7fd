use serde::ser::{Serialize, SerializeMap, Serializer};

/// Counts keyed by rule key, in rule declaration order.
///
/// Values are signed: derived counts subtract overlapping categories and a
/// malformed taxonomy or unusual export can push them below zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountTable {
    entries: Vec<(String, i64)>,
}

impl CountTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: i64) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<i64> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| *v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for CountTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_keeps_declaration_order() {
        let mut table = CountTable::new();
        table.insert("b", 2);
        table.insert("a", 1);
        table.insert("b", 5);

        let entries: Vec<_> = table.iter().collect();
        assert_eq!(entries, vec![("b", 5), ("a", 1)]);
        assert_eq!(table.get("a"), Some(1));
        assert_eq!(table.get("c"), None);
    }

    #[test]
    fn test_serializes_as_ordered_map() {
        let mut table = CountTable::new();
        table.insert("went_down", 3);
        table.insert("allocators", 1);
        assert_eq!(
            serde_json::to_string(&table).unwrap(),
            r#"{"went_down":3,"allocators":1}"#
        );
    }
}

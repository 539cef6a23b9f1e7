//! Insertion-ordered keyed aggregates.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Count / impounded / revenue totals for one key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bucket {
    pub key: String,
    pub count: u64,
    pub impounded_count: u64,
    pub revenue: f64,
}

/// Keyed buckets that remember first-seen order.
///
/// Iteration order is the order keys were first recorded; it drives the
/// first-seen tie-break used by the top-performer selections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Bucket>", into = "Vec<Bucket>")]
pub struct Buckets {
    entries: Vec<Bucket>,
    index: HashMap<String, usize>,
}

impl Buckets {
    pub fn record(&mut self, key: &str, impounded: bool, revenue: f64) {
        let pos = match self.index.get(key) {
            Some(pos) => *pos,
            None => {
                self.entries.push(Bucket {
                    key: key.to_string(),
                    ..Default::default()
                });
                self.index.insert(key.to_string(), self.entries.len() - 1);
                self.entries.len() - 1
            }
        };

        let b = &mut self.entries[pos];
        b.count += 1;
        if impounded {
            b.impounded_count += 1;
        }
        b.revenue += revenue;
    }

    pub fn get(&self, key: &str) -> Option<&Bucket> {
        self.index.get(key).map(|pos| &self.entries[*pos])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Bucket> {
        self.entries.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|b| b.key.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_count(&self) -> u64 {
        self.entries.iter().map(|b| b.count).sum()
    }

    /// First bucket (in insertion order) with the strictly greatest metric
    /// among those accepted by `filter`.
    pub fn first_max_by<F, M>(&self, filter: F, metric: M) -> Option<&Bucket>
    where
        F: Fn(&Bucket) -> bool,
        M: Fn(&Bucket) -> f64,
    {
        let mut best: Option<(&Bucket, f64)> = None;

        for b in self.entries.iter().filter(|b| filter(b)) {
            let m = metric(b);
            match best {
                Some((_, top)) if m <= top => {}
                _ => best = Some((b, m)),
            }
        }

        best.map(|(b, _)| b)
    }
}

impl From<Vec<Bucket>> for Buckets {
    fn from(entries: Vec<Bucket>) -> Self {
        let mut out = Buckets::default();
        for b in entries {
            match out.index.get(&b.key) {
                Some(pos) => {
                    let existing = &mut out.entries[*pos];
                    existing.count += b.count;
                    existing.impounded_count += b.impounded_count;
                    existing.revenue += b.revenue;
                }
                None => {
                    out.index.insert(b.key.clone(), out.entries.len());
                    out.entries.push(b);
                }
            }
        }
        out
    }
}

impl From<Buckets> for Vec<Bucket> {
    fn from(b: Buckets) -> Self {
        b.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_first_seen_order() {
        let mut b = Buckets::default();
        b.record("b", false, 1.0);
        b.record("a", true, 2.0);
        b.record("b", true, 3.0);

        assert_eq!(b.keys().collect::<Vec<_>>(), vec!["b", "a"]);
        let first = b.get("b").unwrap();
        assert_eq!((first.count, first.impounded_count, first.revenue), (2, 1, 4.0));
        assert_eq!(b.total_count(), 3);
    }

    #[test]
    fn ties_go_to_first_seen() {
        let mut b = Buckets::default();
        b.record("x", false, 5.0);
        b.record("y", false, 5.0);
        let top = b.first_max_by(|_| true, |b| b.revenue).unwrap();
        assert_eq!(top.key, "x");

        let none = b.first_max_by(|_| false, |b| b.revenue);
        assert!(none.is_none());
    }

    #[test]
    fn serializes_as_ordered_list() {
        let mut b = Buckets::default();
        b.record("z", false, 0.0);
        b.record("a", false, 10.0);

        let json = serde_json::to_string(&b).unwrap();
        assert!(json.starts_with(r#"[{"key":"z""#));

        let back: Buckets = serde_json::from_str(&json).unwrap();
        assert_eq!(back, b);
    }
}

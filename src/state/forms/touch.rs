//! Tracks which fields the user has left at least once

use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TouchTracker {
    touched: BTreeSet<String>,
}

impl TouchTracker {
    /// Record or clear a touch mark. Returns true when the field just became touched.
    pub fn set(&mut self, name: &str, touched: bool) -> bool {
        if touched {
            self.touched.insert(name.to_string())
        } else {
            self.touched.remove(name);
            false
        }
    }

    pub fn is_touched(&self, name: &str) -> bool {
        self.touched.contains(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.touched.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_touch_reports_transition() {
        let mut tracker = TouchTracker::default();
        assert!(tracker.set("title", true));
        assert!(!tracker.set("title", true));
        assert!(tracker.is_touched("title"));
    }

    #[test]
    fn test_untouch() {
        let mut tracker = TouchTracker::default();
        tracker.set("title", true);
        tracker.set("title", false);
        assert!(!tracker.is_touched("title"));
        assert_eq!(tracker.iter().count(), 0);
    }

    #[test]
    fn test_iter_sorted() {
        let mut tracker = TouchTracker::default();
        tracker.set("b", true);
        tracker.set("a", true);
        assert_eq!(tracker.iter().collect::<Vec<_>>(), ["a", "b"]);
    }
}

//! Insertion-ordered issue container.

use super::{Issue, Priority};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("index {index} out of range for {len} issues")]
/// Returned by [`Issues::get`] for an index outside `0..len`.
pub struct OutOfRange {
    pub index: usize,
    pub len: usize,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
/// Per-priority counts used by printers and exit-code decisions.
pub struct Summary {
    pub high: usize,
    pub normal: usize,
    pub low: usize,
    pub total: usize,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
/// Issues in the order a parser encountered them. No deduplication.
pub struct Issues {
    items: Vec<Issue>,
}

impl Issues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, issue: Issue) {
        self.items.push(issue);
    }

    pub fn add_all<I>(&mut self, issues: I)
    where
        I: IntoIterator<Item = Issue>,
    {
        self.items.extend(issues);
    }

    /// Move every issue of `other` to the end of this container.
    pub fn append(&mut self, mut other: Issues) {
        self.items.append(&mut other.items);
    }

    pub fn get(&self, index: usize) -> Result<&Issue, OutOfRange> {
        self.items.get(index).ok_or(OutOfRange {
            index,
            len: self.items.len(),
        })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Issue> {
        self.items.iter()
    }

    /// Copy the issues accepted by `pred` into a new container, keeping order.
    pub fn filter<P>(&self, mut pred: P) -> Issues
    where
        P: FnMut(&Issue) -> bool,
    {
        self.items.iter().filter(|i| pred(i)).cloned().collect()
    }

    pub fn with_priority(&self, priority: Priority) -> Issues {
        self.filter(|i| i.priority() == priority)
    }

    pub fn summary(&self) -> Summary {
        let mut summary = Summary {
            total: self.items.len(),
            ..Summary::default()
        };
        for issue in &self.items {
            match issue.priority() {
                Priority::High => summary.high += 1,
                Priority::Normal => summary.normal += 1,
                Priority::Low => summary.low += 1,
            }
        }
        summary
    }
}

impl FromIterator<Issue> for Issues {
    fn from_iter<T: IntoIterator<Item = Issue>>(iter: T) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl Extend<Issue> for Issues {
    fn extend<T: IntoIterator<Item = Issue>>(&mut self, iter: T) {
        self.items.extend(iter);
    }
}

impl IntoIterator for Issues {
    type Item = Issue;
    type IntoIter = std::vec::IntoIter<Issue>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a Issues {
    type Item = &'a Issue;
    type IntoIter = std::slice::Iter<'a, Issue>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::IssueBuilder;

    fn issue(msg: &str, priority: Priority) -> Issue {
        IssueBuilder::new()
            .set_message(msg)
            .set_priority(priority)
            .build()
    }

    #[test]
    fn test_preserves_insertion_order_and_count() {
        let mut issues = Issues::new();
        issues.add(issue("b", Priority::Normal));
        issues.add_all(vec![issue("a", Priority::Low), issue("c", Priority::High)]);
        assert_eq!(issues.len(), 3);
        let msgs: Vec<&str> = issues.iter().map(|i| i.message()).collect();
        assert_eq!(msgs, vec!["b", "a", "c"]);
        // Iteration is restartable
        assert_eq!(issues.iter().count(), 3);
        assert_eq!((&issues).into_iter().count(), 3);
    }

    #[test]
    fn test_does_not_deduplicate() {
        let mut issues = Issues::new();
        issues.add(issue("same", Priority::Normal));
        issues.add(issue("same", Priority::Normal));
        assert_eq!(issues.len(), 2);
    }

    #[test]
    fn test_get_out_of_range() {
        let mut issues = Issues::new();
        assert_eq!(issues.get(0), Err(OutOfRange { index: 0, len: 0 }));
        issues.add(issue("x", Priority::Normal));
        assert_eq!(issues.get(0).unwrap().message(), "x");
        let err = issues.get(1).unwrap_err();
        assert_eq!(err.to_string(), "index 1 out of range for 1 issues");
    }

    #[test]
    fn test_filter_and_summary() {
        let issues: Issues = vec![
            issue("1", Priority::High),
            issue("2", Priority::Low),
            issue("3", Priority::High),
            issue("4", Priority::Normal),
        ]
        .into_iter()
        .collect();
        let high = issues.with_priority(Priority::High);
        let msgs: Vec<&str> = high.iter().map(|i| i.message()).collect();
        assert_eq!(msgs, vec!["1", "3"]);
        assert_eq!(
            issues.summary(),
            Summary {
                high: 2,
                normal: 1,
                low: 1,
                total: 4
            }
        );
    }

    #[test]
    fn test_append_keeps_order() {
        let mut first: Issues = vec![issue("a", Priority::Normal)].into_iter().collect();
        let second: Issues = vec![issue("b", Priority::Normal)].into_iter().collect();
        first.append(second);
        let msgs: Vec<String> = first.into_iter().map(|i| i.message().to_string()).collect();
        assert_eq!(msgs, vec!["a", "b"]);
    }
}

//! First-digit-text scan.
//!
//! # Invariants
//!
//! - **Terminates on cycles**: every node is visited at most once (identity
//!   visited set), so work is bounded by the number of distinct reachable
//!   nodes.
//! - **No recursion**: an explicit work stack bounds native stack depth.
//! - **Deterministic order**: links are pushed child, next sibling, prev
//!   sibling; the stack pops them in reverse. Repeated scans of an unchanged
//!   graph return the same node.

use std::collections::HashSet;

use crate::NodeTree;

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// What a digit scan found.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScanOutcome {
    /// No reachable node carries text with a decimal digit.
    NotFound,
    /// A digit-bearing node was found but its digit run does not fit a `u32`.
    Unparseable { raw: String },
    /// The first digit run of the first digit-bearing node. `0` here is a
    /// genuine reading, not a sentinel.
    Parsed { value: u32, raw: String },
}

impl ScanOutcome {
    pub fn value(&self) -> Option<u32> {
        match self {
            ScanOutcome::Parsed { value, .. } => Some(*value),
            _ => None,
        }
    }

    /// Collapse to the legacy sentinel: not-found and unparseable both read as 0.
    pub fn value_or_zero(&self) -> u32 {
        self.value().unwrap_or(0)
    }

    pub fn raw(&self) -> Option<&str> {
        match self {
            ScanOutcome::NotFound => None,
            ScanOutcome::Unparseable { raw } | ScanOutcome::Parsed { raw, .. } => Some(raw),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScanReport {
    pub outcome: ScanOutcome,
    /// Distinct nodes inspected before the scan stopped.
    pub visited: usize,
}

// ---------------------------------------------------------------------------
// Scan
// ---------------------------------------------------------------------------

/// Walk the graph from `root` and parse the first digit-bearing text found.
pub fn scan_first_digits<T: NodeTree>(tree: &T, root: T::Node) -> ScanReport {
    let mut visited: HashSet<T::Node> = HashSet::new();
    let mut stack: Vec<T::Node> = vec![root];

    while let Some(node) = stack.pop() {
        if !visited.insert(node) {
            continue;
        }

        if let Some(text) = tree.text(node) {
            if let Some(run) = extract_digit_run(text) {
                let outcome = match run.parse::<u32>() {
                    Ok(value) => ScanOutcome::Parsed {
                        value,
                        raw: text.to_string(),
                    },
                    Err(_) => ScanOutcome::Unparseable {
                        raw: text.to_string(),
                    },
                };
                return ScanReport {
                    outcome,
                    visited: visited.len(),
                };
            }
        }

        let links = [
            tree.child(node),
            tree.next_sibling(node),
            tree.prev_sibling(node),
        ];
        stack.extend(links.into_iter().flatten().filter(|n| !visited.contains(n)));
    }

    ScanReport {
        outcome: ScanOutcome::NotFound,
        visited: visited.len(),
    }
}

/// First maximal run of ASCII digits in `text`, if any.
pub fn extract_digit_run(text: &str) -> Option<&str> {
    let start = text.find(|c: char| c.is_ascii_digit())?;
    let rest = text.get(start..)?;
    let len = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    rest.get(..len)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NodeGraph;

    #[test]
    fn digit_run_is_first_maximal_run() {
        assert_eq!(extract_digit_run("Physical 245"), Some("245"));
        assert_eq!(extract_digit_run("12 of 40"), Some("12"));
        assert_eq!(extract_digit_run("  0"), Some("0"));
        assert_eq!(extract_digit_run("none"), None);
        assert_eq!(extract_digit_run(""), None);
    }

    #[test]
    fn overflowing_run_is_unparseable_not_zero() {
        let mut g = NodeGraph::new();
        let root = g.add_node(Some("99999999999999"));
        let report = scan_first_digits(&g, root);
        assert!(matches!(report.outcome, ScanOutcome::Unparseable { .. }));
        assert_eq!(report.outcome.value(), None);
        assert_eq!(report.outcome.value_or_zero(), 0);
    }

    #[test]
    fn genuine_zero_is_parsed() {
        let mut g = NodeGraph::new();
        let root = g.add_node(Some("0"));
        let report = scan_first_digits(&g, root);
        assert_eq!(report.outcome.value(), Some(0));
        assert_eq!(report.outcome.raw(), Some("0"));
    }

    #[test]
    fn empty_subtree_is_not_found() {
        let mut g = NodeGraph::new();
        let root = g.add_node(None);
        let child = g.add_node(Some("   "));
        g.set_child(root, child);
        let report = scan_first_digits(&g, root);
        assert_eq!(report.outcome, ScanOutcome::NotFound);
        assert_eq!(report.visited, 2);
    }
}

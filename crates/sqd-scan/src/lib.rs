//! sqd-scan
//!
//! Iterative digit scan over an opaque, possibly-cyclic node graph.
//!
//! External UI trees expose `child` / `next sibling` / `prev sibling` links
//! with no acyclicity guarantee. This crate walks them with an explicit work
//! stack and a visited set keyed by node identity, so a scan always
//! terminates and never recurses.
//!
//! - [`NodeTree`] is the read-only capability a sampler implements over its
//!   own graph; [`NodeGraph`] is an arena implementation used by replay
//!   fixtures and tests.
//! - [`scan_first_digits`] returns a tri-state [`ScanOutcome`] so "no digit
//!   text found" and "parse failed" stay distinguishable from a legitimate 0.
//! - [`read_required_attributes`] applies the scan to the three requirement
//!   subtrees and folds the result into a typed [`sqd_model::Sample`].

mod graph;
mod reader;
mod scanner;

pub use graph::{NodeGraph, NodeId};
pub use reader::{read_required_attributes, AttributeRoots};
pub use scanner::{extract_digit_run, scan_first_digits, ScanOutcome, ScanReport};

/// Read-only view of an external node graph.
///
/// Node handles are opaque and compared by identity only. Implementations
/// must not assume the links form a tree.
pub trait NodeTree {
    type Node: Copy + Eq + std::hash::Hash;

    fn child(&self, node: Self::Node) -> Option<Self::Node>;
    fn next_sibling(&self, node: Self::Node) -> Option<Self::Node>;
    fn prev_sibling(&self, node: Self::Node) -> Option<Self::Node>;

    /// Text payload of the node, if it carries any.
    fn text(&self, node: Self::Node) -> Option<&str>;
}

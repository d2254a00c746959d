use sqd_model::{Attributes, Sample, Unavailable};
use tracing::debug;

use crate::{scan_first_digits, NodeTree, ScanOutcome};

/// Entry points of the three requirement subtrees on the mission surface.
/// `None` means the sampler could not resolve that component.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AttributeRoots<N> {
    pub physical: Option<N>,
    pub mental: Option<N>,
    pub tactical: Option<N>,
}

/// Read the required-attribute triple off a mission surface.
///
/// Unavailable when the surface is hidden, a component root is missing, or
/// none of the three subtrees yields a non-zero value. A subtree that yields
/// nothing contributes 0 when another subtree produced a value.
pub fn read_required_attributes<T: NodeTree>(
    tree: &T,
    visible: bool,
    roots: &AttributeRoots<T::Node>,
) -> Sample<Attributes> {
    if !visible {
        return Sample::Unavailable(Unavailable::NotVisible);
    }
    let (Some(p), Some(m), Some(t)) = (roots.physical, roots.mental, roots.tactical) else {
        return Sample::Unavailable(Unavailable::NotVisible);
    };

    let physical = read_component(tree, p, "physical");
    let mental = read_component(tree, m, "mental");
    let tactical = read_component(tree, t, "tactical");

    let attrs = Attributes::new(
        physical.value_or_zero(),
        mental.value_or_zero(),
        tactical.value_or_zero(),
    );
    if attrs.is_zero() {
        return Sample::Unavailable(Unavailable::NoReadableDigits);
    }
    Sample::Available(attrs)
}

fn read_component<T: NodeTree>(tree: &T, root: T::Node, label: &str) -> ScanOutcome {
    let report = scan_first_digits(tree, root);
    debug!(
        component = label,
        parsed = ?report.outcome.value(),
        raw = report.outcome.raw().unwrap_or(""),
        visited = report.visited,
        "required attribute component scanned"
    );
    report.outcome
}

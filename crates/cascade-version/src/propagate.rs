use cascade_core::BumpType;
use tracing::{debug, trace};

use crate::aggregate::Aggregation;
use crate::graph::PackageGraph;

/// Final bump per package after propagation reached a fixed point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Propagation {
    pub severities: Vec<BumpType>,
    /// Number of full passes, including the last one that changed nothing.
    pub passes: usize,
}

/// Iterates to convergence over an immutable graph.
///
/// Each pass first raises every dependent of a bumped package to at least
/// `Patch`, then unifies every linked group to the largest bump among its
/// members. Severities only grow and are bounded by `Major`, so the loop
/// stops after at most `3 * n + 1` passes, cycles included. Pinned packages
/// stay at `None`. A package without an initial severity starts at `None`.
#[must_use]
pub fn propagate(graph: &PackageGraph<'_>, initial: &Aggregation) -> Propagation {
    let mut severities: Vec<BumpType> = graph
        .ids()
        .map(|id| {
            if graph.is_pinned(id) {
                BumpType::None
            } else {
                initial.severities.get(id.index()).copied().unwrap_or_default()
            }
        })
        .collect();

    let mut passes = 0;
    loop {
        passes += 1;
        let mut changed = false;

        for id in graph.ids() {
            if severities[id.index()].is_none() {
                continue;
            }
            for &dependent in graph.dependents(id) {
                if graph.is_pinned(dependent) {
                    continue;
                }
                let slot = &mut severities[dependent.index()];
                if slot.is_none() {
                    trace!(
                        package = %graph.descriptor(dependent).name,
                        dependency = %graph.descriptor(id).name,
                        "raised to patch by dependency"
                    );
                    *slot = BumpType::Patch;
                    changed = true;
                }
            }
        }

        for group in graph.linked_groups() {
            let max = group
                .iter()
                .map(|id| severities[id.index()])
                .max()
                .unwrap_or_default();
            for id in group {
                let slot = &mut severities[id.index()];
                if *slot < max {
                    *slot = max;
                    changed = true;
                }
            }
        }

        if !changed {
            break;
        }
    }

    debug!(passes, packages = graph.len(), "propagation reached a fixed point");

    Propagation { severities, passes }
}

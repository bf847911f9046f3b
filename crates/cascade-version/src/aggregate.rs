use std::collections::BTreeSet;

use cascade_core::{BumpType, ChangeRecord};
use tracing::{debug, warn};

use crate::graph::PackageGraph;

/// Initial bump per package, indexed by [`PackageId`](crate::PackageId).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aggregation {
    pub severities: Vec<BumpType>,
    /// Ids of the records that mention each package, in record order.
    pub contributions: Vec<Vec<String>>,
    /// Package names referenced by records but absent from the graph, sorted.
    pub unknown_packages: Vec<String>,
}

impl Aggregation {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.severities.iter().all(|s| s.is_none())
    }
}

/// Merges all requests into one bump per package by taking the maximum.
///
/// Conflicting requests for the same package are not an error. Names that
/// are not in the graph are collected and otherwise ignored. Requests for
/// pinned (ignored) packages are dropped.
#[must_use]
pub fn aggregate_severities(graph: &PackageGraph<'_>, records: &[ChangeRecord]) -> Aggregation {
    let mut severities = vec![BumpType::None; graph.len()];
    let mut contributions: Vec<Vec<String>> = vec![Vec::new(); graph.len()];
    let mut unknown = BTreeSet::new();

    for record in records {
        for release in &record.releases {
            let Some(id) = graph.id(&release.name) else {
                unknown.insert(release.name.clone());
                continue;
            };

            if graph.is_pinned(id) {
                debug!(package = %release.name, record = %record.id, "request for ignored package dropped");
                continue;
            }

            let slot = &mut severities[id.index()];
            *slot = (*slot).max(release.bump_type);

            let ids = &mut contributions[id.index()];
            if !ids.contains(&record.id) {
                ids.push(record.id.clone());
            }
        }
    }

    for name in &unknown {
        warn!(package = %name, "change record references unknown package");
    }

    Aggregation {
        severities,
        contributions,
        unknown_packages: unknown.into_iter().collect(),
    }
}

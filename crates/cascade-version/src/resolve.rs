use cascade_core::{BumpType, ChangeRecord, PackageDescriptor};
use semver::Version;
use serde::Serialize;
use tracing::info;

use crate::aggregate::aggregate_severities;
use crate::bump::bump_version;
use crate::graph::{LinkedGroup, PackageGraph};
use crate::propagate::propagate;

/// One package that will be released.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedBump {
    pub name: String,
    pub old_version: Version,
    pub new_version: Version,
    pub bump_type: BumpType,
    /// Ids of the change records that explicitly mention this package.
    pub change_records: Vec<String>,
    /// Internal dependencies that are released in the same run.
    pub updated_dependencies: Vec<String>,
}

impl ResolvedBump {
    /// True when the package is only released because of a dependency or a
    /// linked group, without a record of its own.
    #[must_use]
    pub fn is_propagated_only(&self) -> bool {
        self.change_records.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Resolution {
    /// Released packages, in descriptor order.
    pub releases: Vec<ResolvedBump>,
    /// Package names referenced by records but not part of the repository.
    pub unknown_packages: Vec<String>,
}

impl Resolution {
    /// An empty resolution means there is nothing to release.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.releases.is_empty()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ResolvedBump> {
        self.releases.iter().find(|r| r.name == name)
    }
}

/// Computes the new version of every package affected by `records`.
#[must_use]
pub fn resolve_versions(
    descriptors: &[PackageDescriptor],
    linked_groups: &[LinkedGroup],
    records: &[ChangeRecord],
) -> Resolution {
    resolve_versions_with(descriptors, linked_groups, records, &[] as &[String])
}

/// Same as [`resolve_versions`], with packages in `ignore` never released.
#[must_use]
pub fn resolve_versions_with<S: AsRef<str>>(
    descriptors: &[PackageDescriptor],
    linked_groups: &[LinkedGroup],
    records: &[ChangeRecord],
    ignore: &[S],
) -> Resolution {
    let graph = PackageGraph::build(descriptors, linked_groups).with_ignored(ignore);
    let aggregation = aggregate_severities(&graph, records);

    if aggregation.is_empty() {
        return Resolution {
            releases: Vec::new(),
            unknown_packages: aggregation.unknown_packages,
        };
    }

    let propagation = propagate(&graph, &aggregation);
    let severities = &propagation.severities;

    let releases: Vec<ResolvedBump> = graph
        .ids()
        .filter(|id| !severities[id.index()].is_none())
        .map(|id| {
            let descriptor = graph.descriptor(id);
            let bump_type = severities[id.index()];
            let updated_dependencies = graph
                .dependencies(id)
                .iter()
                .filter(|dep| !severities[dep.index()].is_none())
                .map(|dep| graph.descriptor(*dep).name.clone())
                .collect();

            ResolvedBump {
                name: descriptor.name.clone(),
                old_version: descriptor.version.clone(),
                new_version: bump_version(&descriptor.version, bump_type),
                bump_type,
                change_records: aggregation.contributions[id.index()].clone(),
                updated_dependencies,
            }
        })
        .collect();

    info!(
        releases = releases.len(),
        passes = propagation.passes,
        "resolved package versions"
    );

    Resolution {
        releases,
        unknown_packages: aggregation.unknown_packages,
    }
}

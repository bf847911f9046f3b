use std::collections::HashMap;

use cascade_core::PackageDescriptor;
use tracing::warn;

/// Stable index of a package inside a [`PackageGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PackageId(usize);

impl PackageId {
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Names of packages that always receive the same bump.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkedGroup {
    members: Vec<String>,
}

impl LinkedGroup {
    pub fn new<I, S>(members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            members: members.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn members(&self) -> &[String] {
        &self.members
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.members.iter().any(|m| m == name)
    }
}

/// Immutable view of the packages of one resolution run.
///
/// Packages are stored in descriptor order and addressed by [`PackageId`].
/// Edges are kept in reverse (dependency -> dependents) because bumps flow
/// from a dependency to the packages using it.
#[derive(Debug)]
pub struct PackageGraph<'a> {
    packages: Vec<&'a PackageDescriptor>,
    index: HashMap<&'a str, PackageId>,
    dependencies: Vec<Vec<PackageId>>,
    dependents: Vec<Vec<PackageId>>,
    linked_groups: Vec<Vec<PackageId>>,
    pinned: Vec<bool>,
}

impl<'a> PackageGraph<'a> {
    /// Builds the graph. Dependencies on names outside `descriptors` are
    /// external and dropped, as are self-edges and linked-group names that
    /// are not packages. A repeated package name keeps its first descriptor.
    #[must_use]
    pub fn build(descriptors: &'a [PackageDescriptor], linked_groups: &[LinkedGroup]) -> Self {
        let mut packages = Vec::with_capacity(descriptors.len());
        let mut index = HashMap::with_capacity(descriptors.len());

        for descriptor in descriptors {
            if index.contains_key(descriptor.name.as_str()) {
                warn!(package = %descriptor.name, "duplicate package descriptor ignored");
                continue;
            }
            index.insert(descriptor.name.as_str(), PackageId(packages.len()));
            packages.push(descriptor);
        }

        let mut dependencies = vec![Vec::new(); packages.len()];
        let mut dependents = vec![Vec::new(); packages.len()];

        for (position, descriptor) in packages.iter().enumerate() {
            let id = PackageId(position);
            for name in &descriptor.dependencies {
                let Some(&dependency) = index.get(name.as_str()) else {
                    continue;
                };
                if dependency == id {
                    continue;
                }
                dependencies[id.0].push(dependency);
                dependents[dependency.0].push(id);
            }
        }

        let mut graph = Self {
            pinned: vec![false; packages.len()],
            packages,
            index,
            dependencies,
            dependents,
            linked_groups: Vec::new(),
        };
        graph.linked_groups = linked_groups
            .iter()
            .map(|group| graph.group_ids(group))
            .filter(|ids| ids.len() > 1)
            .collect();
        graph
    }

    /// Pins the named packages at no bump: they are never released, neither
    /// by request nor by propagation, and are removed from linked groups.
    #[must_use]
    pub fn with_ignored<S: AsRef<str>>(mut self, ignored: &[S]) -> Self {
        for name in ignored {
            if let Some(id) = self.id(name.as_ref()) {
                self.pinned[id.0] = true;
            }
        }
        let pinned = &self.pinned;
        for group in &mut self.linked_groups {
            group.retain(|id| !pinned[id.0]);
        }
        self.linked_groups.retain(|group| group.len() > 1);
        self
    }

    fn group_ids(&self, group: &LinkedGroup) -> Vec<PackageId> {
        let mut ids: Vec<PackageId> = group
            .members()
            .iter()
            .filter_map(|name| self.id(name))
            .collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.packages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    #[must_use]
    pub fn id(&self, name: &str) -> Option<PackageId> {
        self.index.get(name).copied()
    }

    pub fn ids(&self) -> impl Iterator<Item = PackageId> {
        (0..self.packages.len()).map(PackageId)
    }

    #[must_use]
    pub fn descriptor(&self, id: PackageId) -> &'a PackageDescriptor {
        self.packages[id.0]
    }

    /// Internal packages that `id` depends on.
    #[must_use]
    pub fn dependencies(&self, id: PackageId) -> &[PackageId] {
        &self.dependencies[id.0]
    }

    /// Internal packages that depend on `id`.
    #[must_use]
    pub fn dependents(&self, id: PackageId) -> &[PackageId] {
        &self.dependents[id.0]
    }

    #[must_use]
    pub fn linked_groups(&self) -> &[Vec<PackageId>] {
        &self.linked_groups
    }

    #[must_use]
    pub fn is_pinned(&self, id: PackageId) -> bool {
        self.pinned[id.0]
    }
}

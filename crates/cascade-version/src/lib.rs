//! Version resolution for a multi-package repository.
//!
//! The pipeline is pure and runs in four steps: build a [`PackageGraph`],
//! [`aggregate_severities`] from change records, [`propagate`] bumps to
//! dependents and linked groups until nothing changes, then apply
//! [`bump_version`] to every package that ended above [`BumpType::None`].
//! [`resolve_versions`] runs all of them.
//!
//! [`BumpType::None`]: cascade_core::BumpType::None

mod aggregate;
mod bump;
mod graph;
mod propagate;
mod resolve;

pub use aggregate::{Aggregation, aggregate_severities};
pub use bump::{bump_version, max_bump_type};
pub use graph::{LinkedGroup, PackageGraph, PackageId};
pub use propagate::{Propagation, propagate};
pub use resolve::{Resolution, ResolvedBump, resolve_versions, resolve_versions_with};

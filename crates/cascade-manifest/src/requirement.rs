use semver::Version;

const KEPT_OPERATORS: [&str; 4] = [">=", "^", "~", "="];

/// New requirement string for a dependency on a package released as
/// `new_version`.
///
/// A single comparator keeps its operator (`^`, `~`, `=`, `>=` or none).
/// Anything else (ranges, wildcards, upper bounds) is replaced by the plain
/// version, which cargo reads as a caret requirement.
#[must_use]
pub fn rewrite_requirement(old: &str, new_version: &Version) -> String {
    let old = old.trim();

    if old.contains(',') || old.contains('*') {
        return new_version.to_string();
    }

    let operator = KEPT_OPERATORS
        .iter()
        .find(|op| old.starts_with(*op))
        .copied()
        .unwrap_or_default();

    if operator.is_empty() && old.starts_with(['<', '>']) {
        return new_version.to_string();
    }

    format!("{operator}{new_version}")
}

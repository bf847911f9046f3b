use std::fmt::Write;

use chrono::NaiveDate;
use semver::Version;

use cascade_core::BumpType;

use crate::entry::{ChangelogEntry, VersionRelease};

const SECTION_ORDER: [BumpType; 3] = [BumpType::Major, BumpType::Minor, BumpType::Patch];

const LINKED_ONLY_NOTE: &str = "Version bump to stay in step with linked packages";

#[must_use]
pub fn new_changelog(title: &str) -> String {
    format!("# {title}\n")
}

fn section_title(bump_type: BumpType) -> &'static str {
    match bump_type {
        BumpType::Major => "Major Changes",
        BumpType::Minor => "Minor Changes",
        BumpType::Patch | BumpType::None => "Patch Changes",
    }
}

fn push_entry(output: &mut String, entry: &ChangelogEntry) {
    let mut lines = entry.description.trim().lines();
    let first = lines.next().unwrap_or_default();
    let _ = write!(output, "\n- {}: {first}", entry.record_id);
    for line in lines {
        if line.is_empty() {
            output.push('\n');
        } else {
            let _ = write!(output, "\n  {line}");
        }
    }
}

/// Renders the `### ... Changes` sections of a release, most severe first.
///
/// Dependency updates are listed under patch changes next to change record
/// entries. Without any entry they go under the release's own bump type, so
/// a linked-group member raised past patch keeps a matching section. A
/// release with neither gets a single note under its bump type.
#[must_use]
pub fn format_entries(release: &VersionRelease) -> String {
    let mut output = String::new();
    let release_section = release.bump_type.max(BumpType::Patch);
    let dependency_section = if release.entries.is_empty() {
        release_section
    } else {
        BumpType::Patch
    };

    for bump_type in SECTION_ORDER {
        let entries: Vec<_> = release
            .entries
            .iter()
            .filter(|e| e.bump_type.max(BumpType::Patch) == bump_type)
            .collect();
        let dependencies =
            bump_type == dependency_section && !release.updated_dependencies.is_empty();
        let linked_note = release.entries.is_empty()
            && release.updated_dependencies.is_empty()
            && release_section == bump_type;

        if entries.is_empty() && !dependencies && !linked_note {
            continue;
        }

        let _ = writeln!(output, "\n### {}", section_title(bump_type));
        for entry in entries {
            push_entry(&mut output, entry);
        }
        if dependencies {
            output.push_str("\n- Updated dependencies");
            for update in &release.updated_dependencies {
                let _ = write!(output, "\n  - {}@{}", update.name, update.version);
            }
        }
        if linked_note {
            let _ = write!(output, "\n- {LINKED_ONLY_NOTE}");
        }
        output.push('\n');
    }

    output
}

#[must_use]
pub fn format_version_header(package: Option<&str>, version: &Version, date: NaiveDate) -> String {
    match package {
        Some(package) => format!("## {package}@{version} - {date}"),
        None => format!("## {version} - {date}"),
    }
}

#[must_use]
pub fn format_version_release(release: &VersionRelease) -> String {
    let mut output =
        format_version_header(release.package.as_deref(), &release.version, release.date);
    output.push('\n');
    output.push_str(&format_entries(release));
    output
}

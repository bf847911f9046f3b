use indexmap::IndexMap;

use cascade_core::{BumpType, ChangeRecord};

use crate::error::{FormatError, ValidationError};
use crate::parse::FRONT_MATTER_DELIMITER;

/// Renders a change record in the on-disk front matter format. The record id
/// is not part of the content; it is the file name.
#[must_use = "serialization result should be handled"]
pub fn serialize_change_record(record: &ChangeRecord) -> Result<String, FormatError> {
    if record.releases.is_empty() {
        return Err(ValidationError::NoReleases.into());
    }

    if let Some(release) = record.releases.iter().find(|r| r.bump_type.is_none()) {
        return Err(ValidationError::NoneBump {
            package: release.name.clone(),
        }
        .into());
    }

    let releases_map: IndexMap<&str, BumpType> = record
        .releases
        .iter()
        .map(|r| (r.name.as_str(), r.bump_type))
        .collect();

    let yaml = serde_yml::to_string(&releases_map)?;

    let mut output = String::new();
    output.push_str(FRONT_MATTER_DELIMITER);
    output.push('\n');
    output.push_str(&yaml);
    if !yaml.ends_with('\n') {
        output.push('\n');
    }
    output.push_str(FRONT_MATTER_DELIMITER);
    output.push('\n');

    if !record.summary.is_empty() {
        output.push_str(&record.summary);
        output.push('\n');
    }

    Ok(output)
}

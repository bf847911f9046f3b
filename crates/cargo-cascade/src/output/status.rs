use cascade_operations::operations::StatusOutput;
use cascade_version::ResolvedBump;

pub(crate) trait StatusFormatter {
    fn format_status(&self, output: &StatusOutput) -> String;
}

pub(crate) struct PlainTextStatusFormatter;

impl PlainTextStatusFormatter {
    fn format_records(output: &mut String, status: &StatusOutput) {
        output.push_str(&format!(
            "Pending change records: {}\n",
            status.change_records.len()
        ));
        for record in &status.change_records {
            output.push_str(&format!("  {}\n", record.id));
        }
    }

    fn format_releases(output: &mut String, status: &StatusOutput) {
        if status.releases.is_empty() {
            output.push_str("\nNo packages will be released.\n");
            return;
        }

        output.push_str("\nPlanned releases:\n");
        for release in &status.releases {
            output.push_str(&format!(
                "  {}: {} -> {} ({}{})\n",
                release.name,
                release.old_version,
                release.new_version,
                release.bump_type,
                Self::reason(release)
            ));
            for (record_id, bump) in status.requests_for(&release.name) {
                output.push_str(&format!("    {record_id}: {bump}\n"));
            }
        }
    }

    /// Why a package without its own records is released anyway.
    fn reason(release: &ResolvedBump) -> String {
        if !release.is_propagated_only() {
            String::new()
        } else if release.updated_dependencies.is_empty() {
            ", linked".to_string()
        } else {
            format!(", dependencies: {}", release.updated_dependencies.join(", "))
        }
    }

    fn format_unchanged_packages(output: &mut String, status: &StatusOutput) {
        if status.unchanged_packages.is_empty() {
            return;
        }

        output.push_str("\nUnchanged packages:\n");
        for name in &status.unchanged_packages {
            output.push_str(&format!("  {name}\n"));
        }
    }

    fn format_unknown_packages(output: &mut String, status: &StatusOutput) {
        if status.unknown_packages.is_empty() {
            return;
        }

        output.push_str("\nWarning: change records mention unknown packages:\n");
        for name in &status.unknown_packages {
            output.push_str(&format!("  {name}\n"));
        }
    }
}

impl StatusFormatter for PlainTextStatusFormatter {
    fn format_status(&self, status: &StatusOutput) -> String {
        let mut output = String::new();

        if status.change_records.is_empty() {
            output.push_str("No pending change records.\n");
            return output;
        }

        Self::format_records(&mut output, status);
        Self::format_releases(&mut output, status);
        Self::format_unchanged_packages(&mut output, status);
        Self::format_unknown_packages(&mut output, status);

        output
    }
}

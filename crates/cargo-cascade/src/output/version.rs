use std::path::Path;

use cascade_operations::operations::{VersionOutcome, VersionOutput};

pub(crate) const NOTHING_TO_RELEASE: &str = "No unreleased changesets found, exiting.";

pub(crate) fn format_outcome(outcome: &VersionOutcome, root: &Path) -> String {
    match outcome {
        VersionOutcome::NoChangesets => format!("{NOTHING_TO_RELEASE}\n"),
        VersionOutcome::DryRun(output) => {
            let mut text = String::from("Dry run, nothing was written.\n\n");
            format_releases(&mut text, output);
            format_paths(&mut text, "Manifests to update", &output.manifests, root);
            text
        }
        VersionOutcome::Executed(output) => {
            let mut text = String::new();
            format_releases(&mut text, output);
            format_paths(&mut text, "Updated manifests", &output.manifests, root);
            format_changelogs(&mut text, output, root);
            format_paths(
                &mut text,
                "Removed change records",
                &output.removed_records,
                root,
            );
            format_git(&mut text, output);
            text
        }
    }
}

fn format_releases(text: &mut String, output: &VersionOutput) {
    text.push_str("Releases:\n");
    for release in &output.releases {
        text.push_str(&format!(
            "  {}: {} -> {} ({})\n",
            release.name, release.old_version, release.new_version, release.bump_type
        ));
    }
}

fn format_paths(text: &mut String, title: &str, paths: &[impl AsRef<Path>], root: &Path) {
    if paths.is_empty() {
        return;
    }

    text.push_str(&format!("\n{title}:\n"));
    for path in paths {
        text.push_str(&format!("  {}\n", display_relative(path.as_ref(), root)));
    }
}

fn format_changelogs(text: &mut String, output: &VersionOutput, root: &Path) {
    if output.changelogs.is_empty() {
        return;
    }

    text.push_str("\nChangelogs:\n");
    for changelog in &output.changelogs {
        let action = if changelog.created { "created" } else { "updated" };
        text.push_str(&format!(
            "  {} ({action})\n",
            display_relative(&changelog.path, root)
        ));
    }
}

fn format_git(text: &mut String, output: &VersionOutput) {
    let Some(git) = &output.git else {
        return;
    };

    if let Some(commit) = &git.commit {
        let short_sha = commit.sha.get(..7).unwrap_or(&commit.sha);
        text.push_str(&format!("\nCommitted {short_sha}\n"));
    }
    for tag in &git.tags {
        text.push_str(&format!("Tagged {}\n", tag.name));
    }
}

fn display_relative(path: &Path, root: &Path) -> String {
    path.strip_prefix(root).unwrap_or(path).display().to_string()
}

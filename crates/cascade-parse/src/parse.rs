use indexmap::IndexMap;
use serde::Deserialize;
use serde_with::{MapPreventDuplicates, serde_as};

use cascade_core::{BumpType, ChangeRecord, PackageRelease};

use crate::error::{FormatError, FrontMatterError, ValidationError};

pub(crate) const FRONT_MATTER_DELIMITER: &str = "---";

const MAX_INPUT_SIZE: usize = 100 * 1024 * 1024;

/// Package to bump mapping from the YAML header, in file order.
#[serde_as]
#[derive(Deserialize)]
struct FrontMatter {
    #[serde(flatten)]
    #[serde_as(as = "MapPreventDuplicates<_, _>")]
    bumps: IndexMap<String, BumpType>,
}

impl FrontMatter {
    fn into_releases(self) -> Result<Vec<PackageRelease>, ValidationError> {
        if self.bumps.is_empty() {
            return Err(ValidationError::NoReleases);
        }

        self.bumps
            .into_iter()
            .map(|(package, bump_type)| {
                if bump_type.is_none() {
                    Err(ValidationError::NoneBump { package })
                } else {
                    Ok(PackageRelease::new(package, bump_type))
                }
            })
            .collect()
    }
}

struct Sections<'a> {
    front_matter: &'a str,
    body: &'a str,
}

fn is_delimiter(line: &str) -> bool {
    line.trim_end() == FRONT_MATTER_DELIMITER
}

/// Splits on the first two lines that consist of `---` alone. Later `---`
/// lines (markdown rules) stay in the body.
fn split_sections(content: &str) -> Result<Sections<'_>, FrontMatterError> {
    let content = content.trim_start();
    let mut lines = content.split_inclusive('\n');

    let opening = lines
        .next()
        .filter(|line| is_delimiter(line))
        .ok_or(FrontMatterError::MissingOpeningDelimiter)?;

    let start = opening.len();
    let mut offset = start;
    for line in lines {
        if is_delimiter(line) {
            let front_matter = &content[start..offset];
            if front_matter.trim().is_empty() {
                return Err(FrontMatterError::EmptyFrontMatter);
            }
            return Ok(Sections {
                front_matter,
                body: &content[offset + line.len()..],
            });
        }
        offset += line.len();
    }

    Err(FrontMatterError::MissingClosingDelimiter)
}

/// Parses a change record file. The `id` is usually the file stem and is
/// carried through unchanged.
#[must_use = "parsing result should be handled"]
pub fn parse_change_record(id: &str, content: &str) -> Result<ChangeRecord, FormatError> {
    if content.len() > MAX_INPUT_SIZE {
        return Err(ValidationError::InputTooLarge {
            max_bytes: MAX_INPUT_SIZE,
        }
        .into());
    }

    let sections = split_sections(content)?;
    let front_matter: FrontMatter = serde_yml::from_str(sections.front_matter)?;
    let releases = front_matter.into_releases()?;

    Ok(ChangeRecord::new(id, releases, sections.body.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn release(name: &str, bump_type: BumpType) -> PackageRelease {
        PackageRelease::new(name, bump_type)
    }

    #[test]
    fn record_carries_id_releases_and_summary() {
        let content = "---\ncore: minor\n\"app-cli\": patch\n---\n\nAdd streaming reads.\n";

        let record = parse_change_record("brave-blue-fox", content).expect("should parse");

        assert_eq!(
            record,
            ChangeRecord::new(
                "brave-blue-fox",
                vec![release("core", BumpType::Minor), release("app-cli", BumpType::Patch)],
                "Add streaming reads.",
            )
        );
    }

    #[test]
    fn releases_keep_file_order() {
        let content = "---\nzeta: patch\nalpha: major\nmid: minor\n---\n";

        let record = parse_change_record("order", content).expect("should parse");

        let names: Vec<_> = record.releases.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["zeta", "alpha", "mid"]);
        assert!(record.summary.is_empty());
    }

    #[test]
    fn markdown_rule_in_summary_is_not_a_delimiter() {
        let content = "---\ncore: patch\n---\nIntro\n\n---\n\nOutro\n";

        let record = parse_change_record("rule", content).expect("should parse");

        assert_eq!(record.releases.len(), 1);
        assert_eq!(record.summary, "Intro\n\n---\n\nOutro");
    }

    #[test]
    fn leading_blank_lines_and_crlf_are_accepted() {
        let content = "\r\n\r\n---\r\ncore: major\r\n---\r\nDrop the old API.\r\n";

        let record = parse_change_record("crlf", content).expect("should parse");

        assert_eq!(record.releases, vec![release("core", BumpType::Major)]);
        assert_eq!(record.summary, "Drop the old API.");
    }

    #[test]
    fn none_bump_is_rejected_with_package_name() {
        let content = "---\ncore: patch\ndocs: none\n---\nSkip docs.\n";

        let err = parse_change_record("skip", content).expect_err("none is not a release");

        assert!(matches!(
            err,
            FormatError::Validation(ValidationError::NoneBump { ref package }) if package == "docs"
        ));
    }

    #[test]
    fn duplicate_package_is_rejected() {
        let content = "---\ncore: major\ncore: patch\n---\n";

        let err = parse_change_record("dup", content).expect_err("duplicates are ambiguous");

        assert!(matches!(err, FormatError::Yaml(_)));
        assert!(err.to_string().contains("duplicate"), "got: {err}");
    }

    #[test]
    fn malformed_records_report_the_problem() {
        let cases = [
            ("core: patch\n---\n", "opening delimiter"),
            ("--- core: patch\n---\n", "opening delimiter"),
            ("---\ncore: patch\nNo closing line\n", "closing delimiter"),
            ("---\n\n---\nBody\n", "empty"),
            ("---\n{}\n---\n", "at least one release"),
            ("---\ncore: huge\n---\n", "YAML"),
        ];

        for (content, expected) in cases {
            let err = parse_change_record("bad", content).expect_err(content);
            assert!(
                err.to_string().contains(expected),
                "{content:?}: expected {expected:?} in {err}"
            );
        }
    }

    #[test]
    fn oversized_input_is_rejected_before_parsing() {
        let mut content = String::from("---\ncore: patch\n---\n");
        content.push_str(&"x".repeat(MAX_INPUT_SIZE));

        let err = parse_change_record("big", &content).expect_err("should exceed limit");

        assert!(matches!(
            err,
            FormatError::Validation(ValidationError::InputTooLarge { max_bytes }) if max_bytes == MAX_INPUT_SIZE
        ));
    }

    #[test]
    fn written_record_reads_back_unchanged() {
        let original = ChangeRecord::new(
            "quiet-green-owl",
            vec![release("web", BumpType::Patch), release("core", BumpType::Major)],
            "Rename the config loader.\n\nCallers must migrate.",
        );

        let written = crate::serialize_change_record(&original).expect("should serialize");
        let read = parse_change_record("quiet-green-owl", &written).expect("should parse");

        assert_eq!(read, original);
    }
}

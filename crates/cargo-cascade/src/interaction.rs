use std::fs;
use std::io::Write as _;
use std::process::Command;

use cascade_core::{BumpType, PackageDescriptor};
use cascade_operations::traits::{
    BumpSelection, DescriptionInput, InteractionProvider, PackageSelection,
};
use cascade_operations::{OperationError, Result};
use dialoguer::{Input, MultiSelect, Select};

const BUMP_CHOICES: [(BumpType, &str); 3] = [
    (BumpType::Patch, "patch - Bug fixes (backwards compatible)"),
    (BumpType::Minor, "minor - New features (backwards compatible)"),
    (BumpType::Major, "major - Breaking changes"),
];

const EDITOR_TEMPLATE: &str =
    "\n# Describe the change above.\n# Lines starting with # are ignored.\n";

fn prompt_error(error: dialoguer::Error) -> OperationError {
    match error {
        dialoguer::Error::IO(source) => OperationError::Interaction { source },
    }
}

/// Prompts on the terminal for anything the command line left out.
pub struct TerminalInteractionProvider {
    use_editor: bool,
}

impl TerminalInteractionProvider {
    #[must_use]
    pub fn new(use_editor: bool) -> Self {
        Self { use_editor }
    }
}

impl InteractionProvider for TerminalInteractionProvider {
    fn select_packages(&self, available: &[PackageDescriptor]) -> Result<PackageSelection> {
        let items: Vec<String> = available
            .iter()
            .map(|p| format!("{} ({})", p.name, p.version))
            .collect();

        let selection = MultiSelect::new()
            .with_prompt("Select packages to include in the change record")
            .items(&items)
            .interact_opt()
            .map_err(prompt_error)?;

        Ok(match selection {
            Some(indices) => PackageSelection::Selected(
                indices
                    .into_iter()
                    .filter_map(|i| available.get(i).cloned())
                    .collect(),
            ),
            None => PackageSelection::Cancelled,
        })
    }

    fn select_bump_type(&self, package_name: &str) -> Result<BumpSelection> {
        let labels: Vec<&str> = BUMP_CHOICES.iter().map(|(_, label)| *label).collect();

        let selection = Select::new()
            .with_prompt(format!("Select bump type for '{package_name}'"))
            .items(&labels)
            .default(0)
            .interact_opt()
            .map_err(prompt_error)?;

        Ok(selection
            .and_then(|i| BUMP_CHOICES.get(i))
            .map_or(BumpSelection::Cancelled, |(bump, _)| {
                BumpSelection::Selected(*bump)
            }))
    }

    fn get_description(&self) -> Result<DescriptionInput> {
        if self.use_editor {
            return description_from_editor();
        }

        let description: String = Input::new()
            .with_prompt("Summary")
            .allow_empty(true)
            .interact_text()
            .map_err(prompt_error)?;

        if description.trim().is_empty() {
            return Ok(DescriptionInput::Cancelled);
        }
        Ok(DescriptionInput::Provided(description))
    }
}

fn description_from_editor() -> Result<DescriptionInput> {
    let io_error = |source: std::io::Error| OperationError::Interaction { source };
    let editor = std::env::var("VISUAL")
        .or_else(|_| std::env::var("EDITOR"))
        .unwrap_or_else(|_| "vi".to_string());

    let mut file = tempfile::Builder::new()
        .prefix("cascade-")
        .suffix(".md")
        .tempfile()
        .map_err(io_error)?;
    file.write_all(EDITOR_TEMPLATE.as_bytes()).map_err(io_error)?;
    file.flush().map_err(io_error)?;

    let status = Command::new(&editor)
        .arg(file.path())
        .status()
        .map_err(io_error)?;
    if !status.success() {
        return Err(io_error(std::io::Error::other(format!(
            "editor '{editor}' exited with {status}"
        ))));
    }

    let content = fs::read_to_string(file.path()).map_err(io_error)?;
    Ok(DescriptionInput::Provided(strip_comment_lines(&content)))
}

fn strip_comment_lines(content: &str) -> String {
    content
        .lines()
        .filter(|line| !line.starts_with('#'))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Used when no terminal is attached: every missing input is an error.
pub struct NonInteractiveProvider;

impl InteractionProvider for NonInteractiveProvider {
    fn select_packages(&self, _available: &[PackageDescriptor]) -> Result<PackageSelection> {
        Err(OperationError::InteractionRequired)
    }

    fn select_bump_type(&self, package_name: &str) -> Result<BumpSelection> {
        Err(OperationError::MissingBumpType {
            package_name: package_name.to_string(),
        })
    }

    fn get_description(&self) -> Result<DescriptionInput> {
        Err(OperationError::InteractionRequired)
    }
}

use std::path::{Path, PathBuf};

use cascade_core::PackageDescriptor;
use cascade_project::{
    CargoProject, ConfigError, ProjectError, ProjectKind, discover_project, ensure_changeset_dir,
    load_config,
};
use tempfile::TempDir;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn project_with_manifest(content: &str) -> anyhow::Result<TempDir> {
    let dir = tempfile::tempdir()?;
    std::fs::write(dir.path().join("Cargo.toml"), content)?;
    Ok(dir)
}

fn package<'a>(project: &'a CargoProject, name: &str) -> &'a PackageDescriptor {
    project
        .package(name)
        .unwrap_or_else(|| panic!("package '{name}' should be discovered"))
}

fn names(project: &CargoProject) -> Vec<&str> {
    project.packages.iter().map(|p| p.name.as_str()).collect()
}

#[test]
fn virtual_workspace_lists_members_with_inherited_versions() -> anyhow::Result<()> {
    let root = fixture("virtual_workspace");

    let project = discover_project(&root)?;

    assert_eq!(project.kind, ProjectKind::VirtualWorkspace);
    assert_eq!(project.root, root.canonicalize()?);
    assert_eq!(names(&project), vec!["crate-a", "crate-b"]);
    assert_eq!(package(&project, "crate-a").version.to_string(), "1.0.0");
    assert_eq!(package(&project, "crate-b").version.to_string(), "2.0.0");
    Ok(())
}

#[test]
fn discovery_from_a_member_finds_the_workspace_root() -> anyhow::Result<()> {
    for (start, root) in [
        ("virtual_workspace/crates/crate_a", "virtual_workspace"),
        ("nested/packages/inner", "nested"),
    ] {
        let project = discover_project(&fixture(start))?;

        assert_eq!(project.kind, ProjectKind::VirtualWorkspace, "{start}");
        assert_eq!(project.root, fixture(root).canonicalize()?, "{start}");
    }
    Ok(())
}

#[test]
fn workspace_root_package_is_listed_with_members() -> anyhow::Result<()> {
    let project = discover_project(&fixture("root_package_workspace"))?;

    assert_eq!(project.kind, ProjectKind::WorkspaceWithRoot);
    assert_eq!(package(&project, "root-pkg").version.to_string(), "0.1.0");
    assert_eq!(package(&project, "member").version.to_string(), "0.2.0");
    assert_eq!(
        package(&project, "member").manifest_path(),
        project.root.join("crates/member/Cargo.toml")
    );
    Ok(())
}

#[test]
fn standalone_package_is_a_single_package_project() -> anyhow::Result<()> {
    let dir = project_with_manifest("[package]\nname = \"single\"\nversion = \"3.0.0\"\n")?;

    let project = discover_project(dir.path())?;

    assert_eq!(project.kind, ProjectKind::SinglePackage);
    assert_eq!(names(&project), vec!["single"]);
    assert_eq!(project.packages[0].version.to_string(), "3.0.0");
    Ok(())
}

#[test]
fn excluded_members_are_skipped() -> anyhow::Result<()> {
    let project = discover_project(&fixture("workspace_with_exclude"))?;

    assert_eq!(names(&project), vec!["included"]);
    Ok(())
}

#[test]
fn internal_dependencies_are_recorded() -> anyhow::Result<()> {
    let project = discover_project(&fixture("dependency_chain"))?;

    assert_eq!(names(&project), vec!["app", "core", "util"]);

    let app = package(&project, "app");
    assert!(app.dependencies.contains("core"));
    assert!(app.dependencies.contains("util"));
    assert!(app.dependencies.contains("serde"));
    assert!(!app.dependencies.contains("test-helpers"));

    let util = package(&project, "util");
    assert_eq!(util.dependencies.iter().collect::<Vec<_>>(), vec!["core"]);
    Ok(())
}

#[test]
fn inherited_renamed_dependency_links_to_the_real_package() -> anyhow::Result<()> {
    let dir = project_with_manifest(
        "[workspace]\nmembers = [\"crates/*\"]\n\n\
         [workspace.dependencies]\n\
         engine = { package = \"core\", path = \"crates/core\", version = \"1.0.0\" }\n",
    )?;
    for (name, extra) in [
        ("core", ""),
        ("app", "\n[dependencies]\nengine = { workspace = true }\n"),
    ] {
        let member = dir.path().join("crates").join(name);
        std::fs::create_dir_all(&member)?;
        std::fs::write(
            member.join("Cargo.toml"),
            format!("[package]\nname = \"{name}\"\nversion = \"1.0.0\"\n{extra}"),
        )?;
    }

    let project = discover_project(dir.path())?;

    let app = package(&project, "app");
    assert!(app.dependencies.contains("core"));
    assert!(!app.dependencies.contains("engine"));
    Ok(())
}

#[test]
fn workspace_metadata_configures_cascade() -> anyhow::Result<()> {
    let project = discover_project(&fixture("dependency_chain"))?;

    let config = load_config(&project)?;

    assert_eq!(config.linked(), &[vec!["core".to_string(), "util".to_string()]]);
    assert!(config.commit());
    assert!(!config.tags());
    Ok(())
}

#[test]
fn linked_group_naming_an_unknown_package_is_rejected() -> anyhow::Result<()> {
    let dir = project_with_manifest(
        "[package]\nname = \"single\"\nversion = \"1.0.0\"\n\n\
         [package.metadata.cascade]\nlinked = [[\"single\", \"missing\"]]\n",
    )?;
    let project = discover_project(dir.path())?;

    let result = load_config(&project);

    assert!(matches!(
        result,
        Err(ProjectError::InvalidConfig {
            source: ConfigError::UnknownPackage { ref package, .. },
            ..
        }) if package == "missing"
    ));
    Ok(())
}

#[test]
fn changeset_dir_is_created_once() -> anyhow::Result<()> {
    let dir = project_with_manifest("[package]\nname = \"single\"\nversion = \"1.0.0\"\n")?;
    let project = discover_project(dir.path())?;
    let config = load_config(&project)?;

    let first = ensure_changeset_dir(&project, &config)?;
    let second = ensure_changeset_dir(&project, &config)?;

    assert_eq!(first, project.root.join(".changeset"));
    assert_eq!(first, second);
    assert!(first.is_dir());
    Ok(())
}

#[test]
fn missing_start_directory_is_an_error() {
    let result = discover_project(Path::new("/nonexistent/path"));

    assert!(matches!(result, Err(ProjectError::ManifestRead { .. })));
}

#[test]
fn malformed_manifests_are_reported_by_kind() -> anyhow::Result<()> {
    let not_toml = project_with_manifest("this is not valid toml {{{")?;
    assert!(matches!(
        discover_project(not_toml.path()),
        Err(ProjectError::ManifestParse { .. })
    ));

    let no_version = project_with_manifest("[package]\nname = \"no-version\"\n")?;
    assert!(matches!(
        discover_project(no_version.path()),
        Err(ProjectError::MissingField {
            field: "package.version",
            ..
        })
    ));

    let bad_version =
        project_with_manifest("[package]\nname = \"bad\"\nversion = \"not.a.version\"\n")?;
    assert!(matches!(
        discover_project(bad_version.path()),
        Err(ProjectError::InvalidVersion { version, .. }) if version == "not.a.version"
    ));

    let bad_glob = project_with_manifest("[workspace]\nmembers = [\"[invalid\"]\n")?;
    assert!(matches!(
        discover_project(bad_glob.path()),
        Err(ProjectError::GlobPattern { pattern, .. }) if pattern == "[invalid"
    ));
    Ok(())
}

// ABOUTME: Tests for build-context assembly from declared resources.
// ABOUTME: Covers the files.lst manifest and the Dockerfile-only default.

mod support;

use dockhand::Error;
use dockhand::build_context::assemble;
use support::DirLoader;

#[test]
fn defaults_to_a_single_dockerfile_without_a_manifest() {
    let root = tempfile::tempdir().unwrap();
    std::fs::create_dir(root.path().join("ctx")).unwrap();
    std::fs::write(root.path().join("ctx/Dockerfile"), "FROM scratch\n").unwrap();
    let loader = DirLoader::new(root.path());

    let context = assemble(&loader, "ctx").unwrap();

    assert!(context.path().join("Dockerfile").is_file());
    let entries = std::fs::read_dir(context.path()).unwrap().count();
    assert_eq!(entries, 1);
}

#[test]
fn manifest_lists_the_context_members() {
    let root = tempfile::tempdir().unwrap();
    std::fs::create_dir(root.path().join("ctx")).unwrap();
    std::fs::write(root.path().join("ctx/files.lst"), "Dockerfile\napp.py\n\n  \n").unwrap();
    std::fs::write(root.path().join("ctx/Dockerfile"), "FROM scratch\n").unwrap();
    std::fs::write(root.path().join("ctx/app.py"), "print()\n").unwrap();
    let loader = DirLoader::new(root.path());

    let context = assemble(&loader, "ctx").unwrap();

    assert!(context.path().join("Dockerfile").is_file());
    assert!(context.path().join("app.py").is_file());
    // The manifest itself is not part of the context.
    assert!(!context.path().join("files.lst").exists());
}

#[test]
fn missing_listed_file_is_an_error() {
    let root = tempfile::tempdir().unwrap();
    std::fs::create_dir(root.path().join("ctx")).unwrap();
    std::fs::write(root.path().join("ctx/files.lst"), "Dockerfile\nmissing.cfg\n").unwrap();
    std::fs::write(root.path().join("ctx/Dockerfile"), "FROM scratch\n").unwrap();
    let loader = DirLoader::new(root.path());

    let err = assemble(&loader, "ctx").unwrap_err();

    assert!(matches!(err, Error::Resource { path, .. } if path.ends_with("missing.cfg")));
}

#[test]
fn missing_default_dockerfile_is_an_error() {
    let root = tempfile::tempdir().unwrap();
    std::fs::create_dir(root.path().join("ctx")).unwrap();
    let loader = DirLoader::new(root.path());

    let err = assemble(&loader, "ctx").unwrap_err();

    assert!(matches!(err, Error::Resource { path, .. } if path.ends_with("Dockerfile")));
}

#[test]
fn trailing_slash_on_the_base_path_is_tolerated() {
    let root = tempfile::tempdir().unwrap();
    std::fs::create_dir(root.path().join("ctx")).unwrap();
    std::fs::write(root.path().join("ctx/Dockerfile"), "FROM scratch\n").unwrap();
    let loader = DirLoader::new(root.path());

    let context = assemble(&loader, "ctx/").unwrap();

    assert!(context.path().join("Dockerfile").is_file());
}

use srvgen::config::SerializationMode;
use srvgen::error::Error;
use srvgen::ignore::parse_ignore_file;
use srvgen::locator::{locate_templates, Applicability};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write_template(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn destinations(root: &Path) -> Vec<PathBuf> {
    let ignored = parse_ignore_file(root).unwrap();
    locate_templates(root, &ignored)
        .unwrap()
        .into_iter()
        .map(|entry| entry.destination)
        .collect()
}

#[test]
fn test_discovery_order_is_lexicographic() {
    let root = TempDir::new().unwrap();
    write_template(root.path(), "z_tpl", "");
    write_template(root.path(), "a_tpl", "");
    write_template(root.path(), "m_tpl", "");
    write_template(root.path(), "sub/b_tpl", "");
    write_template(root.path(), "not_a_template.txt", "");

    let found = destinations(root.path());
    assert_eq!(
        found,
        vec![
            PathBuf::from("a"),
            PathBuf::from("m"),
            PathBuf::from("sub/b"),
            PathBuf::from("z"),
        ]
    );
}

#[test]
fn test_discovery_is_repeatable() {
    let root = TempDir::new().unwrap();
    write_template(root.path(), "b_tpl", "");
    write_template(root.path(), "a/c_tpl", "");
    write_template(root.path(), "a/d_tpl", "");

    let ignored = parse_ignore_file(root.path()).unwrap();
    let first = locate_templates(root.path(), &ignored).unwrap();
    let second = locate_templates(root.path(), &ignored).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_suffix_stripped_from_destination() {
    let root = TempDir::new().unwrap();
    write_template(root.path(), "sub/config.toml_tpl", "");

    let ignored = parse_ignore_file(root.path()).unwrap();
    let entries = locate_templates(root.path(), &ignored).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].destination, PathBuf::from("sub/config.toml"));
    assert_eq!(entries[0].source, root.path().join("sub/config.toml_tpl"));
}

#[test]
fn test_applicability_tags() {
    let root = TempDir::new().unwrap();
    write_template(root.path(), "messages.proto_tpl", "");
    write_template(root.path(), "src/messages.rs_tpl", "");
    write_template(root.path(), "README.md_tpl", "");

    let ignored = parse_ignore_file(root.path()).unwrap();
    let entries = locate_templates(root.path(), &ignored).unwrap();

    let tag_of = |destination: &str| {
        entries
            .iter()
            .find(|entry| entry.destination == PathBuf::from(destination))
            .unwrap()
            .applicability
    };
    assert_eq!(tag_of("messages.proto"), Applicability::SchemaOnly);
    assert_eq!(tag_of("src/messages.rs"), Applicability::PlainOnly);
    assert_eq!(tag_of("README.md"), Applicability::Unconditional);
}

#[test]
fn test_inclusion_matrix() {
    let cases = [
        (Applicability::SchemaOnly, SerializationMode::Schema, true),
        (Applicability::SchemaOnly, SerializationMode::Plain, false),
        (Applicability::PlainOnly, SerializationMode::Schema, false),
        (Applicability::PlainOnly, SerializationMode::Plain, true),
        (Applicability::Unconditional, SerializationMode::Schema, true),
        (Applicability::Unconditional, SerializationMode::Plain, true),
    ];
    for (tag, mode, expected) in cases {
        assert_eq!(tag.includes(mode), expected, "{:?} under {} mode", tag, mode);
    }
}

#[test]
fn test_unreadable_root_aborts() {
    let root = TempDir::new().unwrap();
    let missing = root.path().join("missing");
    let ignored = parse_ignore_file(&missing).unwrap();

    let result = locate_templates(&missing, &ignored);
    assert!(matches!(result, Err(Error::Discovery { .. })));
}

#[test]
fn test_ignore_file_excludes_templates() {
    let root = TempDir::new().unwrap();
    write_template(root.path(), "keep_tpl", "");
    write_template(root.path(), "experimental/skip_tpl", "");
    fs::write(root.path().join(".srvgenignore"), "experimental/**\n").unwrap();

    let found = destinations(root.path());
    assert_eq!(found, vec![PathBuf::from("keep")]);
}

#[test]
fn test_bare_suffix_is_rejected() {
    let root = TempDir::new().unwrap();
    write_template(root.path(), "_tpl", "");

    let ignored = parse_ignore_file(root.path()).unwrap();
    let result = locate_templates(root.path(), &ignored);
    assert!(matches!(result, Err(Error::Validation(_))));
}

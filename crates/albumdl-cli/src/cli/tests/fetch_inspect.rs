//! Tests for fetch and inspect subcommands.

use super::parse;
use crate::cli::commands::{action_label, write_inspect};
use crate::cli::{Cli, CliCommand};
use albumdl_core::FileAction;
use clap::Parser;
use std::path::{Path, PathBuf};

#[test]
fn cli_parse_fetch() {
    match parse(&["albumdl", "fetch", "album.json"]) {
        CliCommand::Fetch { manifest, dest } => {
            assert_eq!(manifest, PathBuf::from("album.json"));
            assert!(dest.is_none());
        }
        _ => panic!("expected Fetch"),
    }
}

#[test]
fn cli_parse_fetch_dest() {
    match parse(&["albumdl", "fetch", "album.json", "--dest", "/music"]) {
        CliCommand::Fetch { dest, .. } => {
            assert_eq!(dest.as_deref(), Some(Path::new("/music")));
        }
        _ => panic!("expected Fetch with --dest"),
    }
}

#[test]
fn cli_parse_inspect() {
    match parse(&["albumdl", "inspect", "a.json", "--dest", "out"]) {
        CliCommand::Inspect { manifest, dest } => {
            assert_eq!(manifest, PathBuf::from("a.json"));
            assert_eq!(dest.as_deref(), Some(Path::new("out")));
        }
        _ => panic!("expected Inspect"),
    }
}

#[test]
fn cli_parse_global_config() {
    let cli = Cli::try_parse_from(["albumdl", "inspect", "a.json", "--config", "/etc/albumdl.toml"])
        .unwrap();
    assert_eq!(cli.config.as_deref(), Some(Path::new("/etc/albumdl.toml")));
}

#[test]
fn cli_requires_manifest() {
    assert!(Cli::try_parse_from(["albumdl", "fetch"]).is_err());
    assert!(Cli::try_parse_from(["albumdl"]).is_err());
}

#[test]
fn inspect_labels() {
    let download = FileAction::Download {
        source: "http://x/a",
        path: PathBuf::from("/m/a"),
    };
    assert_eq!(action_label(&download), "download");
    assert_eq!(
        action_label(&FileAction::SkipExisting {
            path: PathBuf::from("/m/a")
        }),
        "present"
    );
    assert_eq!(action_label(&FileAction::SkipIncomplete), "incomplete");
}

#[test]
fn inspect_lists_actions_from_manifest() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = dir.path().join("album.json");
    std::fs::write(
        &manifest,
        r#"{"title":"Live","files":[
            {"file":"http://x/a.flac","name":"a.flac"},
            {"file":"http://x/b.flac","name":"b.flac"},
            {"file":"","name":"c.flac"}
        ]}"#,
    )
    .unwrap();
    let root = dir.path().join("music");
    std::fs::create_dir_all(root.join("Live")).unwrap();
    std::fs::write(root.join("Live/b.flac"), b"have").unwrap();

    let mut out = Vec::new();
    write_inspect(&manifest, &root, &mut out).unwrap();
    let out = String::from_utf8(out).unwrap();

    assert!(out.contains(&format!("Directory: {}", root.join("Live").display())), "{out}");
    assert!(out.contains("  1  download    a.flac"), "{out}");
    assert!(out.contains("  2  present     b.flac"), "{out}");
    assert!(out.contains("  3  incomplete  c.flac"), "{out}");
    assert!(out.contains("1 of 3 file(s) to download"), "{out}");
    assert!(!root.join("Live/a.flac").exists());
}

#[test]
fn inspect_reports_unreadable_manifest() {
    let dir = tempfile::tempdir().unwrap();
    let err = write_inspect(&dir.path().join("missing.json"), dir.path(), &mut Vec::new())
        .unwrap_err();
    assert!(err.to_string().starts_with("cannot load album from"), "{err}");
}

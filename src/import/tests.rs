use super::*;
use std::fs;
use tempfile::tempdir;

fn names(paths: &[PathBuf]) -> Vec<String> {
    paths
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect()
}

#[test]
fn has_extension_is_case_insensitive_and_ignores_dots() {
    let settings = ImportSettings {
        extensions: vec![".MP3".into(), " flac ".into()],
        ..ImportSettings::default()
    };
    let exts = normalized_extensions(&settings);
    assert!(has_extension(Path::new("/tmp/a.mp3"), &exts));
    assert!(has_extension(Path::new("/tmp/a.Mp3"), &exts));
    assert!(has_extension(Path::new("/tmp/a.flac"), &exts));
    assert!(!has_extension(Path::new("/tmp/a.ogg"), &exts));
    assert!(!has_extension(Path::new("/tmp/a"), &exts));
}

#[test]
fn mime_is_derived_from_extension() {
    assert_eq!(mime_for(Path::new("x.MP3")), "audio/mpeg");
    assert_eq!(mime_for(Path::new("x.oga")), "audio/ogg");
    assert_eq!(mime_for(Path::new("x.m4a")), "audio/mp4");
    assert_eq!(mime_for(Path::new("x.mp4")), "audio/mp4");
    assert_eq!(mime_for(Path::new("x.webm")), "audio/webm");
    assert_eq!(mime_for(Path::new("x.xyz")), "");
    assert_eq!(mime_for(Path::new("noext")), "");
}

#[test]
fn every_default_extension_has_a_content_type() {
    for ext in ImportSettings::default().extensions {
        let path = PathBuf::from(format!("x.{ext}"));
        assert_ne!(mime_for(&path), "", "{ext} has no content type");
    }
}

#[test]
fn collect_picks_up_mp4_and_webm_by_default() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.mp4"), b"a").unwrap();
    fs::write(dir.path().join("b.webm"), b"b").unwrap();

    let found = collect_paths(&[dir.path().to_path_buf()], &ImportSettings::default());
    assert_eq!(names(&found), vec!["a.mp4", "b.webm"]);
}

#[test]
fn collect_filters_non_audio_and_sorts_by_name() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("b.MP3"), b"b").unwrap();
    fs::write(dir.path().join("a.ogg"), b"a").unwrap();
    fs::write(dir.path().join("c.txt"), b"ignore me").unwrap();

    let found = collect_paths(&[dir.path().to_path_buf()], &ImportSettings::default());
    assert_eq!(names(&found), vec!["a.ogg", "b.MP3"]);
}

#[test]
fn collect_keeps_explicit_files_in_argument_order() {
    let dir = tempdir().unwrap();
    let z = dir.path().join("z.mp3");
    let a = dir.path().join("a.mp3");
    let txt = dir.path().join("notes.txt");
    for p in [&z, &a, &txt] {
        fs::write(p, b"x").unwrap();
    }

    let found = collect_paths(&[z.clone(), txt, a.clone()], &ImportSettings::default());
    assert_eq!(found, vec![z, a]);
}

#[test]
fn collect_skips_hidden_unless_asked() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join(".hidden.mp3"), b"x").unwrap();
    fs::write(dir.path().join("visible.mp3"), b"x").unwrap();

    let found = collect_paths(&[dir.path().to_path_buf()], &ImportSettings::default());
    assert_eq!(names(&found), vec!["visible.mp3"]);

    let settings = ImportSettings {
        include_hidden: true,
        ..ImportSettings::default()
    };
    let found = collect_paths(&[dir.path().to_path_buf()], &settings);
    assert_eq!(names(&found), vec![".hidden.mp3", "visible.mp3"]);
}

#[test]
fn collect_respects_recursive_false() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("root.mp3"), b"x").unwrap();
    let sub = dir.path().join("sub");
    fs::create_dir_all(&sub).unwrap();
    fs::write(sub.join("child.mp3"), b"x").unwrap();

    let settings = ImportSettings {
        recursive: false,
        ..ImportSettings::default()
    };
    let found = collect_paths(&[dir.path().to_path_buf()], &settings);
    assert_eq!(names(&found), vec!["root.mp3"]);
}

#[test]
fn collect_respects_max_depth() {
    let dir = tempdir().unwrap();
    let d1 = dir.path().join("d1");
    let d2 = d1.join("d2");
    fs::create_dir_all(&d2).unwrap();
    fs::write(dir.path().join("root.mp3"), b"x").unwrap();
    fs::write(d1.join("one.mp3"), b"x").unwrap();
    fs::write(d2.join("two.mp3"), b"x").unwrap();

    // WalkDir depth counts root as 0, children as 1, grandchildren as 2...
    let settings = ImportSettings {
        max_depth: Some(2),
        ..ImportSettings::default()
    };
    let found = names(&collect_paths(&[dir.path().to_path_buf()], &settings));
    assert!(found.contains(&"root.mp3".to_string()));
    assert!(found.contains(&"one.mp3".to_string()));
    assert!(!found.contains(&"two.mp3".to_string()));
}

#[test]
fn missing_path_collects_nothing() {
    let dir = tempdir().unwrap();
    let found = collect_paths(&[dir.path().join("nope")], &ImportSettings::default());
    assert!(found.is_empty());
}

#[test]
fn unreadable_explicit_audio_file_is_still_collected() {
    let dir = tempdir().unwrap();
    let good = dir.path().join("a.mp3");
    fs::write(&good, b"x").unwrap();
    let gone = dir.path().join("gone.mp3");

    let found = collect_paths(&[good.clone(), gone.clone()], &ImportSettings::default());
    assert_eq!(found, vec![good, gone]);
}

#[test]
fn read_import_file_captures_bytes_and_metadata() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("Song.flac");
    fs::write(&path, b"fLaC-ish bytes").unwrap();

    let track = read_import_file(&path).unwrap();
    assert_eq!(track.name, "Song.flac");
    assert_eq!(track.mime_type, "audio/flac");
    assert_eq!(track.size_bytes, 14);
    assert_eq!(track.payload, b"fLaC-ish bytes");
    assert!(track.last_modified > 0);
}

#[test]
fn read_import_file_reports_io_errors_with_the_path() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("gone.mp3");

    match read_import_file(&path) {
        Err(Error::Io { path: p, .. }) => assert_eq!(p, path),
        other => panic!("expected an io error, got {other:?}"),
    }
}

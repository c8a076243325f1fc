use super::*;

#[test]
fn init_is_idempotent() {
    let first = init_fonts(&[]);
    let second = init_fonts(&[PathBuf::from("/definitely/not/a/font/dir")]);
    assert_eq!(first.is_ok(), second.is_ok());
    assert!(first.is_ok());
}

#[test]
fn missing_directory_fails_library_build() {
    let err = build_library(&[PathBuf::from("/definitely/not/a/font/dir")]).unwrap_err();
    assert!(err.contains("font directory"));
}

#[test]
fn non_font_files_are_skipped() {
    let dir = std::env::temp_dir().join(format!("audiogram-fonts-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("readme.txt"), b"not a font").unwrap();

    let mut db = fontdb::Database::new();
    load_fonts_from_dir(&mut db, &dir).unwrap();
    assert_eq!(db.len(), 0);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn query_on_empty_library_finds_nothing() {
    assert!(query_face(&fontdb::Database::new(), "Inter", 400, false).is_none());
}

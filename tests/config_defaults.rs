use test_monitor::config::Config;

#[test]
fn test_default_config_values() {
    let config = Config::default();

    assert_eq!(config.output.dir, ".");
    assert_eq!(config.output.file_prefix, "test-run");
    assert!(config.output.pretty);
    assert!(config.progress.enabled);
    assert!(config.progress.color);
}

#[test]
fn test_empty_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".testmonitorrc");
    std::fs::write(&path, "").unwrap();

    let config = Config::load_from_file(&path).unwrap();

    assert_eq!(config.output.dir, ".");
    assert_eq!(config.output.file_prefix, "test-run");
}

#[test]
fn test_load_from_file_reads_sections() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".testmonitorrc.toml");
    std::fs::write(
        &path,
        "[output]\ndir = \"reports\"\npretty = false\n\n[progress]\nenabled = false\n",
    )
    .unwrap();

    let config = Config::load_from_file(&path).unwrap();

    assert_eq!(config.output.dir, "reports");
    assert!(!config.output.pretty);
    assert!(!config.progress.enabled);
    assert!(config.progress.color);
}

#[test]
fn test_missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();

    let err = Config::load_from_file(&dir.path().join("absent")).unwrap_err();

    assert!(err.to_string().contains("failed to read config file"));
}

use pdf_booklet::*;

#[test]
fn test_default_options() {
    let options = BookletOptions::default();
    assert_eq!(options.orientation, Orientation::LeftOpen);
    assert!(options.input_file.as_os_str().is_empty());
}

#[test]
fn test_validate_requires_paths() {
    let options = BookletOptions::default();
    assert!(matches!(options.validate(), Err(BookletError::Config(_))));

    let options = BookletOptions::new("in.pdf", "", Orientation::LeftOpen);
    assert!(matches!(options.validate(), Err(BookletError::Config(_))));

    let options = BookletOptions::new("in.pdf", "out/booklet.pdf", Orientation::RightOpen);
    assert!(options.validate().is_ok());
}

#[test]
fn test_validate_rejects_output_without_file_name() {
    let options = BookletOptions::new("in.pdf", "..", Orientation::LeftOpen);
    assert!(matches!(options.validate(), Err(BookletError::Config(_))));
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_options_save_and_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("booklet.json");

    let options = BookletOptions::new("in.pdf", "out.pdf", Orientation::RightOpen);
    options.save(&path).await.unwrap();

    let loaded = BookletOptions::load(&path).await.unwrap();
    assert_eq!(loaded, options);
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_options_partial_config_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("booklet.json");
    std::fs::write(&path, r#"{ "orientation": "RightOpen" }"#).unwrap();

    let loaded = BookletOptions::load(&path).await.unwrap();
    assert_eq!(loaded.orientation, Orientation::RightOpen);
    assert!(loaded.output_file.as_os_str().is_empty());
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_options_invalid_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("booklet.json");
    std::fs::write(&path, "not json").unwrap();

    let result = BookletOptions::load(&path).await;
    assert!(matches!(result, Err(BookletError::Config(_))));
}

use super::*;

#[test]
fn empty_document_gives_defaults() {
    let cfg = CardsConfig::from_str_as("{}", DocFormat::Json).unwrap();
    assert_eq!(cfg, CardsConfig::default());
    assert_eq!(cfg.default_font_spec().family, "Roboto");
    assert_eq!(cfg.debug_outline().unwrap(), None);
}

#[test]
fn yaml_config_is_accepted() {
    let cfg = CardsConfig::from_str_as(
        "cache_dir: /tmp/cards\nimage_paths: [img, /abs/img]\ndefault_font: Inter\ndebug:\n  enable: true\n  color: red\n",
        DocFormat::Yaml,
    )
    .unwrap();
    assert_eq!(cfg.cache_dir, PathBuf::from("/tmp/cards"));
    assert_eq!(cfg.image_paths.len(), 2);
    assert_eq!(cfg.default_font, "Inter");
    assert_eq!(cfg.debug_outline().unwrap(), Some(Rgba8::new(255, 0, 0, 255)));
}

#[test]
fn unknown_fields_are_rejected() {
    let err = CardsConfig::from_str_as(r#"{"cache": "x"}"#, DocFormat::Json).unwrap_err();
    assert!(matches!(err, CardError::Serde(_)));
    let err = CardsConfig::from_str_as("debug: {colour: red}", DocFormat::Yaml).unwrap_err();
    assert!(matches!(err, CardError::Serde(_)));
}

#[test]
fn environment_overrides_directories() {
    let cfg = CardsConfig::default().with_overrides_from(|key| match key {
        ENV_CACHE_DIR => Some("/env/cache".into()),
        ENV_ICONS_DIR => Some("".into()),
        _ => None,
    });
    assert_eq!(cfg.cache_dir, PathBuf::from("/env/cache"));
    assert_eq!(cfg.icons_dir, None);
}

#[test]
fn builders_set_fields() {
    let cfg = CardsConfig::default()
        .with_cache_dir("c")
        .with_output_dir("o")
        .with_icons_dir("i")
        .with_default_font("Noto Sans")
        .with_debug("#00F");
    assert_eq!(cfg.output_dir, PathBuf::from("o"));
    assert_eq!(cfg.icons_dir, Some(PathBuf::from("i")));
    assert_eq!(cfg.debug_outline().unwrap(), Some(Rgba8::new(0, 0, 255, 255)));
}

#[test]
fn bad_debug_color_is_reported() {
    let cfg = CardsConfig::default().with_debug("not-a-color");
    assert!(matches!(cfg.debug_outline(), Err(CardError::Validation(_))));
}

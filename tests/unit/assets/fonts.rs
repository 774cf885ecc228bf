use std::collections::HashMap;
use std::sync::Mutex;

use super::*;
use crate::assets::fetch::FetchResponse;

#[derive(Default)]
struct MapFetcher {
    routes: HashMap<String, Vec<u8>>,
    log: Mutex<Vec<String>>,
}

impl MapFetcher {
    fn route(mut self, url: &str, body: impl Into<Vec<u8>>) -> Self {
        self.routes.insert(url.to_owned(), body.into());
        self
    }

    fn calls(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }
}

impl AssetFetcher for MapFetcher {
    fn fetch(&self, url: &str) -> CardResult<FetchResponse> {
        self.log.lock().unwrap().push(url.to_owned());
        Ok(match self.routes.get(url) {
            Some(body) => FetchResponse {
                status: 200,
                bytes: body.clone(),
            },
            None => FetchResponse {
                status: 404,
                bytes: Vec::new(),
            },
        })
    }
}

const API: &str = "http://fonts.test/v1/fonts";

const SEARCH: &str = r#"[{"id":"roboto","family":"Roboto","subsets":["latin","greek"],"weights":[100,300,400,500,700,900],"styles":["italic","normal"],"defSubset":"latin"}]"#;

const DETAIL: &str = r#"{"id":"roboto","family":"Roboto","subsets":["latin","greek"],"weights":[100,300,400,500,700,900],"styles":["italic","normal"],"defSubset":"latin",
"variants":{"700":{"normal":{"latin":{"url":{"ttf":"http://files.test/roboto-700.ttf","woff2":"x"}}}},
"400":{"italic":{"greek":{"url":{"ttf":"http://files.test/roboto-400i-greek.ttf"}}}}}}"#;

fn fetcher() -> Arc<MapFetcher> {
    Arc::new(
        MapFetcher::default()
            .route(&format!("{API}?family=Roboto"), SEARCH)
            .route(&format!("{API}/roboto"), DETAIL)
            .route("http://files.test/roboto-700.ttf", b"ttf-700".to_vec())
            .route("http://files.test/roboto-400i-greek.ttf", b"ttf-400i".to_vec()),
    )
}

fn temp_cache(tag: &str) -> AssetCache {
    let dir = std::env::temp_dir().join(format!("social-cards-fonts-{tag}-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    AssetCache::new(dir)
}

#[test]
fn snap_weight_picks_closest_and_first_on_ties() {
    let weights = [100, 300, 400, 500, 700, 900];
    assert_eq!(snap_weight(400, &weights), Some(400));
    assert_eq!(snap_weight(650, &weights), Some(700));
    assert_eq!(snap_weight(600, &weights), Some(500));
    assert_eq!(snap_weight(200, &weights), Some(100));
    assert_eq!(snap_weight(1000, &weights), Some(900));
    assert_eq!(snap_weight(400, &[]), None);
}

#[test]
fn remote_font_is_fetched_and_cached() {
    let cache = temp_cache("remote");
    let fetch = fetcher();
    let manager = FontManager::new(cache.clone(), fetch.clone()).with_api_base(API);

    let mut spec = FontSpec::family("Roboto");
    spec.weight = 650;
    let resolved = manager.resolve(&spec).unwrap();
    assert_eq!(resolved.weight, 700);
    assert_eq!(resolved.subset.as_deref(), Some("latin"));
    let path = resolved.path.clone().unwrap();
    assert_eq!(
        path.file_name().unwrap().to_str().unwrap(),
        "Roboto normal (latin 700).ttf"
    );
    assert_eq!(std::fs::read(&path).unwrap(), b"ttf-700");
    assert!(cache.fonts_dir().join("Roboto.json").is_file());

    let calls_before = fetch.calls().len();
    let again = manager.resolve(&spec).unwrap();
    assert_eq!(again, resolved);
    assert_eq!(fetch.calls().len(), calls_before);
    let _ = std::fs::remove_dir_all(cache.root());
}

#[test]
fn explicit_subset_and_style_select_the_variant() {
    let cache = temp_cache("variant");
    let manager = FontManager::new(cache.clone(), fetcher()).with_api_base(API);

    let mut spec = FontSpec::family("Roboto");
    spec.style = "italic".to_owned();
    spec.subset = Some("greek".to_owned());
    let resolved = manager.resolve(&spec).unwrap();
    assert_eq!(std::fs::read(resolved.path.unwrap()).unwrap(), b"ttf-400i");
    let _ = std::fs::remove_dir_all(cache.root());
}

#[test]
fn unsupported_style_or_subset_reports_the_upstream_reason() {
    let cache = temp_cache("mismatch");
    let manager = FontManager::new(cache.clone(), fetcher()).with_api_base(API);

    let mut oblique = FontSpec::family("Roboto");
    oblique.style = "oblique".to_owned();
    let err = manager.resolve(&oblique).unwrap_err();
    assert!(matches!(err, CardError::Resource(ref m) if m.contains("no oblique style")), "{err}");

    let mut cyrillic = FontSpec::family("Roboto");
    cyrillic.subset = Some("cyrillic".to_owned());
    let err = manager.resolve(&cyrillic).unwrap_err();
    assert!(matches!(err, CardError::Resource(ref m) if m.contains("no cyrillic subset")), "{err}");

    // Roboto 400 normal latin has no download in the metadata.
    let err = manager.resolve(&FontSpec::family("Roboto")).unwrap_err();
    assert!(matches!(err, CardError::Resource(ref m) if m.contains("no ttf download")), "{err}");
    let _ = std::fs::remove_dir_all(cache.root());
}

#[test]
fn unknown_family_has_no_metadata() {
    let cache = temp_cache("unknown");
    let manager = FontManager::new(cache.clone(), fetcher()).with_api_base(API);
    assert!(manager.font_info("Nope Sans").is_err());
    assert!(!cache.fonts_dir().join("Nope Sans.json").exists());
}

#[test]
fn existing_path_is_returned_as_is() {
    let cache = temp_cache("given");
    let file = cache.root().join("mine.ttf");
    cache.write_atomic(&file, b"x").unwrap();
    let fetch = fetcher();
    let manager = FontManager::new(cache.clone(), fetch.clone()).with_api_base(API);

    let mut spec = FontSpec::family("Whatever");
    spec.path = Some(file.clone());
    assert_eq!(manager.resolve(&spec).unwrap().path, Some(file));
    assert!(fetch.calls().is_empty());
    let _ = std::fs::remove_dir_all(cache.root());
}

use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;
use crate::assets::fetch::FetchResponse;
use crate::assets::svg_raster::svg_to_png;
use crate::foundation::core::Size;
use crate::foundation::error::CardResult;

struct CountingFetcher {
    calls: AtomicUsize,
    status: u16,
}

impl CountingFetcher {
    fn new(status: u16) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            status,
        })
    }
}

impl AssetFetcher for CountingFetcher {
    fn fetch(&self, _url: &str) -> CardResult<FetchResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(FetchResponse {
            status: self.status,
            bytes: b"not really a png".to_vec(),
        })
    }
}

fn temp_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("social-cards-resolve-{tag}-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn url_is_downloaded_once() {
    let dir = temp_dir("url");
    let fetcher = CountingFetcher::new(200);
    let resolver = ImageResolver::new(AssetCache::new(dir.join("cache")), fetcher.clone());

    let first = resolver
        .resolve_image("https://example.com/img/logo", &dir)
        .unwrap();
    let second = resolver
        .resolve_image("https://example.com/img/logo", &dir)
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
    assert_eq!(std::fs::read_dir(dir.join("cache/images")).unwrap().count(), 1);
    assert_eq!(std::fs::read(&first).unwrap(), b"not really a png");
    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn non_200_status_omits_the_image() {
    let dir = temp_dir("404");
    let fetcher = CountingFetcher::new(404);
    let resolver = ImageResolver::new(AssetCache::new(dir.join("cache")), fetcher.clone());

    assert!(resolver.resolve_image("https://example.com/missing.png", &dir).is_none());
    assert!(!dir.join("cache/images").exists());
    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn url_cache_name_encodes_path_and_adds_png() {
    assert_eq!(
        url_cache_name("https://example.com/a/b").as_deref(),
        Some("%2Fa%2Fb.png")
    );
    assert_eq!(
        url_cache_name("https://example.com/pic.jpg?size=2").as_deref(),
        Some("%2Fpic.jpg")
    );
    assert_eq!(url_cache_name("not a url"), None);
}

#[test]
fn lookup_order_prefers_the_document_directory() {
    let dir = temp_dir("order");
    let doc = dir.join("doc");
    let extra = dir.join("extra");
    let icons = dir.join("icons");
    for d in [&doc, &extra, &icons] {
        std::fs::create_dir_all(d).unwrap();
    }
    std::fs::write(doc.join("a.png"), b"doc").unwrap();
    std::fs::write(extra.join("a.png"), b"extra").unwrap();
    std::fs::write(extra.join("b.png"), b"extra").unwrap();
    std::fs::write(icons.join("b.png"), b"icon").unwrap();
    std::fs::write(icons.join("c.png"), b"icon").unwrap();

    let resolver = ImageResolver::new(
        AssetCache::new(dir.join("cache")),
        Arc::new(crate::assets::fetch::OfflineFetcher),
    )
    .with_search_paths([extra.clone()])
    .with_icons_dir(&icons);

    assert_eq!(resolver.resolve_image("a.png", &doc), Some(doc.join("a.png")));
    assert_eq!(resolver.resolve_image("b.png", &doc), Some(extra.join("b.png")));
    assert_eq!(resolver.resolve_image("c.png", &doc), Some(icons.join("c.png")));
    assert_eq!(resolver.resolve_image("d.png", &doc), None);
    assert_eq!(resolver.resolve_image("  ", &doc), None);
    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn suffixless_reference_is_an_svg_icon() {
    let dir = temp_dir("suffix");
    let icons = dir.join("icons");
    std::fs::create_dir_all(icons.join("material")).unwrap();
    std::fs::write(icons.join("material/star.svg"), STAR_SVG).unwrap();

    let cache = AssetCache::new(dir.join("cache"));
    let resolver = ImageResolver::new(cache.clone(), Arc::new(crate::assets::fetch::OfflineFetcher))
        .with_icons_dir(&icons);

    let first = resolver.resolve_image("material/star", &dir).unwrap();
    let second = resolver.resolve_image("material/star", &dir).unwrap();
    assert_eq!(first, icons.join("material/star.svg"));
    assert_eq!(first, second);

    let size = Size::new(24, 24);
    assert!(!svg_to_png(&first, &cache, size).unwrap().hit);
    assert!(svg_to_png(&second, &cache, size).unwrap().hit);
    assert_eq!(std::fs::read_dir(cache.svg_dir()).unwrap().count(), 1);
    let _ = std::fs::remove_dir_all(dir);
}

const STAR_SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24" width="24" height="24"><path d="M12 2l3 7h7l-6 4 2 8-6-5-6 5 2-8-6-4h7z"/></svg>"#;

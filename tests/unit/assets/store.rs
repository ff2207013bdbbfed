use super::*;

fn temp_dir(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!(
        "spritegen_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

#[test]
fn asset_url_trims_and_joins_segments() {
    assert_eq!(
        asset_url("https://cdn.example/sheets", &["head/heads/human/female/", "bronze.png"]),
        "https://cdn.example/sheets/head/heads/human/female/bronze.png"
    );
    assert_eq!(
        asset_url("https://cdn.example/sheets/", &["/hair/", "", "walk", "/x.png"]),
        "https://cdn.example/sheets/hair/walk/x.png"
    );
}

#[test]
fn normalize_path_slash_normalization() {
    assert_eq!(normalize_rel_path("a/b.png").unwrap(), "a/b.png");
    assert_eq!(normalize_rel_path("/a/./b.png").unwrap(), "a/b.png");
    assert_eq!(normalize_rel_path("a\\b.png").unwrap(), "a/b.png");
    assert!(normalize_rel_path("../x.png").is_err());
    assert!(normalize_rel_path("/").is_err());
}

#[tokio::test]
async fn memory_store_records_probes_in_order() {
    let mut store = MemoryAssetStore::new();
    store.insert("hair/pixie/blonde.png", vec![1, 2, 3]);

    let hit = store.url_for(&["hair/pixie", "blonde.png"]);
    let miss = store.url_for(&["hair/pixie", "black.png"]);
    assert!(!store.exists(&miss).await);
    assert!(store.exists(&hit).await);
    assert_eq!(store.probes(), vec![miss.clone(), hit.clone()]);

    assert_eq!(store.fetch(&hit).await.unwrap(), vec![1, 2, 3]);
    assert!(matches!(store.fetch(&miss).await, Err(SpriteError::Asset(_))));
    assert_eq!(store.fetches(), vec![hit, miss]);
}

#[tokio::test]
async fn local_store_maps_urls_onto_root() {
    let tmp = temp_dir("local_store");
    std::fs::create_dir_all(tmp.join("body/bodies/male")).unwrap();
    std::fs::write(tmp.join("body/bodies/male/light.png"), b"png").unwrap();

    let store = LocalAssetStore::new(&tmp);
    let url = store.url_for(&["body/bodies/male", "light.png"]);
    assert!(store.exists(&url).await);
    assert_eq!(store.fetch(&url).await.unwrap(), b"png".to_vec());

    let dir_url = store.url_for(&["body/bodies/male"]);
    assert!(!store.exists(&dir_url).await);
    assert!(!store.exists("local://assets/../secret.png").await);
    assert!(!store.exists("https://elsewhere/x.png").await);
    assert!(store.fetch("https://elsewhere/x.png").await.is_err());

    std::fs::remove_dir_all(&tmp).ok();
}

#[tokio::test]
async fn http_store_treats_transport_errors_as_missing() {
    let store = HttpAssetStore::new("http://127.0.0.1:9", Duration::from_millis(200)).unwrap();
    let url = store.url_for(&["hair", "x.png"]);
    assert_eq!(url, "http://127.0.0.1:9/hair/x.png");
    assert!(!store.exists(&url).await);
    assert!(matches!(store.fetch(&url).await, Err(SpriteError::Asset(_))));
}

#[tokio::test]
async fn configured_store_delegates() {
    let tmp = temp_dir("configured_store");
    std::fs::create_dir_all(&tmp).unwrap();
    std::fs::write(tmp.join("x.png"), b"x").unwrap();

    let store = ConfiguredStore::Local(LocalAssetStore::new(&tmp));
    assert_eq!(store.base_url(), LOCAL_BASE_URL);
    let url = store.url_for(&["x.png"]);
    assert!(store.exists(&url).await);
    assert_eq!(store.fetch(&url).await.unwrap(), b"x".to_vec());

    let remote = HttpAssetStore::new("https://cdn.example/sheets", Duration::from_secs(1)).unwrap();
    let store = ConfiguredStore::Http(remote);
    assert_eq!(store.base_url(), "https://cdn.example/sheets");

    std::fs::remove_dir_all(&tmp).ok();
}

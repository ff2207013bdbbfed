use super::*;

#[test]
fn key_is_sorted_and_keeps_empty_values() {
    let params: QueryParams = [
        ("sex", "female"),
        ("hair", ""),
        ("body", "Body_color_light"),
        ("head", "Human_female_light"),
    ]
    .into_iter()
    .collect();
    assert_eq!(
        cache_key(&params),
        "body=Body_color_light&hair=&head=Human_female_light&sex=female"
    );
}

#[test]
fn empty_value_changes_the_etag() {
    let with_empty: QueryParams = [("hat", ""), ("body", "x")].into_iter().collect();
    let without: QueryParams = [("body", "x")].into_iter().collect();
    assert_eq!(cache_key(&with_empty), "body=x&hat=");
    assert_ne!(etag(&cache_key(&with_empty)), etag(&cache_key(&without)));
}

#[test]
fn key_ignores_parameter_order() {
    let a: QueryParams = [("b", "2"), ("a", "1")].into_iter().collect();
    let b: QueryParams = [("a", "1"), ("b", "2")].into_iter().collect();
    assert_eq!(cache_key(&a), cache_key(&b));
    assert_eq!(cache_key(&QueryParams::new()), "");
}

#[test]
fn etag_is_sha256_prefix() {
    // sha256("") = e3b0c44298fc1c149afbf4c8996fb924...
    assert_eq!(etag(""), "e3b0c44298fc1c14");
    // sha256("abc") = ba7816bf8f01cfea414140de5dae2223...
    assert_eq!(etag("abc"), "ba7816bf8f01cfea");

    let tag = etag("body=Body_color_light");
    assert_eq!(tag.len(), ETAG_LEN);
    assert!(tag.chars().all(|c| c.is_ascii_hexdigit()));
    assert_ne!(tag, etag("body=Body_color_amber"));
}

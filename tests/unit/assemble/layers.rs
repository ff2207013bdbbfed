use super::*;
use crate::assets::store::{LOCAL_BASE_URL, MemoryAssetStore};

fn url(rel: &str) -> String {
    format!("{LOCAL_BASE_URL}/{rel}")
}

fn catalog() -> Catalog {
    Catalog::from_json_str(
        r#"{
        "hair_pixie": {
            "name": "Pixie",
            "type_name": "hair",
            "layer_1": {"zPos": 120, "male": "hair/pixie/adult/", "female": "hair/pixie/adult/"},
            "layer_2": {"zPos": 9, "male": "hair/pixie/bg/", "female": "hair/pixie/bg/"},
            "variants": ["dark brown", "blonde"],
            "animations": ["walk", "idle"]
        },
        "vest": {
            "name": "Vest",
            "type_name": "vest",
            "layer_1": {"zPos": 5, "female": "torso/vest/female/"},
            "layer_2": {"zPos": 60, "female": "torso/vest/wheelchair/", "custom_animation": "wheelchair"},
            "variants": ["green"]
        },
        "expression": {
            "name": "Expression",
            "type_name": "expression",
            "layer_1": {"zPos": 105, "male": "head/faces/${head}/"},
            "variants": ["happy"],
            "replace_in_path": {"head": {"Human_male_plump": "human/male_plump"}}
        },
        "shadow": {
            "name": "Shadow",
            "type_name": "shadow",
            "layer_1": {"zPos": 0, "male": "shadow/adult/", "female": "shadow/adult/"},
            "variants": ["shadow"],
            "animations": ["walk"]
        }
    }"#,
    )
    .unwrap()
}

fn params(pairs: &[(&str, &str)]) -> QueryParams {
    pairs.iter().copied().collect()
}

#[tokio::test]
async fn body_special_case_produces_single_layer() {
    let mut store = MemoryAssetStore::new();
    store.insert("body/bodies/female/lavender.png", vec![]);

    let layers = assemble_layers(
        &params(&[("body", "Body_color_lavender"), ("sex", "female")]),
        &Catalog::default(),
        AssetLocator::new(&store),
    )
    .await;

    assert_eq!(layers.len(), 1);
    let body = &layers[0];
    assert_eq!(body.z_pos, 1);
    assert_eq!(body.name, "body_female");
    assert_eq!(body.variant, "lavender");
    assert_eq!(body.file_name, url("body/bodies/female/lavender.png"));
    assert!(
        store
            .probes()
            .iter()
            .all(|p| p.starts_with(&url("body/bodies/female/")))
    );
}

#[tokio::test]
async fn none_selection_never_probes() {
    let store = MemoryAssetStore::new();
    let layers = assemble_layers(
        &params(&[("nose", "none_Big_nose"), ("hat", "none_Armet")]),
        &catalog(),
        AssetLocator::new(&store),
    )
    .await;
    assert!(layers.is_empty());
    assert!(store.probes().is_empty());
}

#[tokio::test]
async fn human_head_uses_fixed_path_and_z() {
    let mut store = MemoryAssetStore::new();
    store.insert("head/heads/human/male/bright_green.png", vec![]);

    let layers = assemble_layers(
        &params(&[("head", "Human_male_plump_bright_green")]),
        &catalog(),
        AssetLocator::new(&store),
    )
    .await;

    assert_eq!(layers.len(), 1);
    assert_eq!(layers[0].z_pos, 10);
    assert_eq!(layers[0].name, "head_male");
    assert_eq!(layers[0].variant, "bright_green");
    assert_eq!(layers[0].parent_name, None);
    assert_eq!(store.probes(), vec![url("head/heads/human/male/bright_green.png")]);
}

#[tokio::test]
async fn human_head_with_modifier_only_searches_sex_folder() {
    let store = MemoryAssetStore::new();

    let layers = assemble_layers(
        &params(&[("head", "Human_male_plump_light")]),
        &catalog(),
        AssetLocator::new(&store),
    )
    .await;

    assert!(layers.is_empty());
    let probes = store.probes();
    assert_eq!(probes.len(), 5);
    assert_eq!(probes[0], url("head/heads/human/male/light.png"));
    assert!(
        probes
            .iter()
            .all(|p| p.starts_with(&url("head/heads/human/male/")))
    );
}

#[tokio::test]
async fn generic_layers_are_refined_and_sorted_by_z() {
    let mut store = MemoryAssetStore::new();
    store.insert("body/bodies/male/light.png", vec![]);
    store.insert("hair/pixie/adult/walk/dark_brown.png", vec![]);
    store.insert("hair/pixie/bg/dark_brown.png", vec![]);

    let layers = assemble_layers(
        &params(&[("hair", "Pixie_dark_brown"), ("body", "Body_color_light")]),
        &catalog(),
        AssetLocator::new(&store),
    )
    .await;

    let summary: Vec<_> = layers.iter().map(|l| (l.name.as_str(), l.z_pos)).collect();
    assert_eq!(
        summary,
        vec![("body_male", 1), ("hair_layer_2", 9), ("hair_layer_1", 120)]
    );
    let hair = &layers[2];
    assert_eq!(hair.variant, "dark brown");
    assert_eq!(hair.parent_name.as_deref(), Some("hair"));
    assert_eq!(hair.file_name, url("hair/pixie/adult/walk/dark_brown.png"));
    assert_eq!(hair.supported_animations, vec!["walk", "idle"]);
}

#[tokio::test]
async fn custom_animation_slots_and_missing_sex_paths_are_skipped() {
    let mut store = MemoryAssetStore::new();
    store.insert("torso/vest/female/green.png", vec![]);
    store.insert("torso/vest/wheelchair/green.png", vec![]);

    let layers = assemble_layers(
        &params(&[("vest", "Vest_green"), ("sex", "teen")]),
        &catalog(),
        AssetLocator::new(&store),
    )
    .await;
    assert_eq!(layers.len(), 1);
    assert_eq!(layers[0].name, "vest_layer_1");
    assert!(
        !store
            .probes()
            .iter()
            .any(|p| p.contains("wheelchair"))
    );

    let store = MemoryAssetStore::new();
    let layers = assemble_layers(
        &params(&[("vest", "Vest_green"), ("sex", "male")]),
        &catalog(),
        AssetLocator::new(&store),
    )
    .await;
    assert!(layers.is_empty());
    assert!(store.probes().is_empty());
}

#[tokio::test]
async fn head_placeholder_is_substituted() {
    let mut store = MemoryAssetStore::new();
    store.insert("head/faces/human/male_plump/happy.png", vec![]);

    let layers = assemble_layers(
        &params(&[
            ("head", "Human_male_plump_light"),
            ("expression", "Expression_happy"),
        ]),
        &catalog(),
        AssetLocator::new(&store),
    )
    .await;

    let expr = layers
        .iter()
        .find(|l| l.name == "expression_layer_1")
        .unwrap();
    assert_eq!(expr.file_name, url("head/faces/human/male_plump/happy.png"));
}

#[tokio::test]
async fn unresolvable_parameter_is_dropped() {
    let mut store = MemoryAssetStore::new();
    store.insert("body/bodies/male/light.png", vec![]);

    let layers = assemble_layers(
        &params(&[("wings", "Bat_black"), ("body", "Body_color_light")]),
        &catalog(),
        AssetLocator::new(&store),
    )
    .await;
    assert_eq!(layers.len(), 1);
    assert_eq!(layers[0].name, "body_male");
}

#[tokio::test]
async fn shadow_layers_are_marked() {
    let mut store = MemoryAssetStore::new();
    store.insert("shadow/adult/shadow.png", vec![]);

    let layers = assemble_layers(
        &params(&[("shadow", "Shadow_shadow")]),
        &catalog(),
        AssetLocator::new(&store),
    )
    .await;
    assert_eq!(layers.len(), 1);
    assert!(layers[0].is_shadow());
    assert_eq!(layers[0].supported_animations, vec!["walk"]);
}

#[test]
fn sort_is_ascending_and_stable() {
    let layer = |name: &str, z_pos| ResolvedLayer {
        file_name: String::new(),
        z_pos,
        name: name.to_string(),
        parent_name: None,
        variant: String::new(),
        supported_animations: Vec::new(),
    };
    let mut layers = vec![layer("a", 10), layer("b", 1), layer("c", 5), layer("d", 1)];
    sort_layers(&mut layers);
    let order: Vec<_> = layers.iter().map(|l| (l.name.as_str(), l.z_pos)).collect();
    assert_eq!(order, vec![("b", 1), ("d", 1), ("c", 5), ("a", 10)]);
}

use std::collections::BTreeMap;

/// Number of layer slots a sheet definition can declare (`layer_1` .. `layer_8`).
pub const LAYER_SLOTS: usize = 8;

/// Placeholder substituted by [`SheetDefinition::head_replacement`] lookups.
pub const HEAD_PLACEHOLDER: &str = "${head}";

#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
/// One stacked image layer of a sheet definition.
pub struct LayerDefinition {
    /// Global stacking order; lower values are drawn first.
    #[serde(rename = "zPos")]
    pub z_pos: i32,
    /// Whether the layer is a mask rather than a drawable image.
    #[serde(default)]
    pub is_mask: Option<bool>,
    /// Set for layers that only apply to bespoke animation sequences.
    #[serde(default)]
    pub custom_animation: Option<String>,
    /// Sex-keyed relative asset paths (`male`, `female`, `teen`, ...).
    #[serde(flatten)]
    pub paths: BTreeMap<String, serde_json::Value>,
}

impl LayerDefinition {
    /// Relative asset path for the given sex key, if this layer declares one.
    pub fn path_for(&self, sex: &str) -> Option<&str> {
        self.paths
            .get(sex)
            .and_then(serde_json::Value::as_str)
            .filter(|p| !p.is_empty())
    }
}

#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
struct RawSheetDefinition {
    name: String,
    type_name: String,
    #[serde(default)]
    layer_1: Option<LayerDefinition>,
    #[serde(default)]
    layer_2: Option<LayerDefinition>,
    #[serde(default)]
    layer_3: Option<LayerDefinition>,
    #[serde(default)]
    layer_4: Option<LayerDefinition>,
    #[serde(default)]
    layer_5: Option<LayerDefinition>,
    #[serde(default)]
    layer_6: Option<LayerDefinition>,
    #[serde(default)]
    layer_7: Option<LayerDefinition>,
    #[serde(default)]
    layer_8: Option<LayerDefinition>,
    #[serde(default)]
    variants: Vec<String>,
    #[serde(default)]
    animations: Vec<String>,
    #[serde(default)]
    replace_in_path: Option<BTreeMap<String, BTreeMap<String, String>>>,
}

#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
#[serde(from = "RawSheetDefinition")]
/// Named, typed descriptor of a drawable component and its stacked layers.
pub struct SheetDefinition {
    /// Display name, unique within `type_name`.
    pub name: String,
    /// Semantic category such as `hair` or `shirt`.
    pub type_name: String,
    /// Layer slots in declaration order; index 0 is `layer_1`.
    pub layers: [Option<LayerDefinition>; LAYER_SLOTS],
    /// Canonical variant spellings (spaces or underscores).
    pub variants: Vec<String>,
    /// Animations this definition supports.
    pub animations: Vec<String>,
    /// Path substitution maps keyed by source parameter (only `head` is used).
    pub replace_in_path: Option<BTreeMap<String, BTreeMap<String, String>>>,
}

impl From<RawSheetDefinition> for SheetDefinition {
    fn from(raw: RawSheetDefinition) -> Self {
        Self {
            name: raw.name,
            type_name: raw.type_name,
            layers: [
                raw.layer_1,
                raw.layer_2,
                raw.layer_3,
                raw.layer_4,
                raw.layer_5,
                raw.layer_6,
                raw.layer_7,
                raw.layer_8,
            ],
            variants: raw.variants,
            animations: raw.animations,
            replace_in_path: raw.replace_in_path,
        }
    }
}

impl SheetDefinition {
    /// Present layers with their JSON key (`layer_N`), in slot order.
    pub fn layers(&self) -> impl Iterator<Item = (String, &LayerDefinition)> {
        self.layers
            .iter()
            .enumerate()
            .filter_map(|(i, l)| l.as_ref().map(|l| (format!("layer_{}", i + 1), l)))
    }

    /// Whether `variant` is one of the canonical spellings.
    pub fn has_variant(&self, variant: &str) -> bool {
        self.variants.iter().any(|v| v == variant)
    }

    /// Substitution for the `${head}` placeholder, keyed by a head identifier prefix.
    ///
    /// Returns `None` when the definition has no `head` map or the key is not listed.
    pub fn head_replacement(&self, head_key: &str) -> Option<&str> {
        self.replace_in_path
            .as_ref()?
            .get("head")?
            .get(head_key)
            .map(String::as_str)
    }

    /// Whether the definition declares a `head` substitution map at all.
    pub fn replaces_head(&self) -> bool {
        self.replace_in_path
            .as_ref()
            .is_some_and(|m| m.contains_key("head"))
    }
}

#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
/// Simplified body descriptor; kept loadable but never drawn through layers.
pub struct BodyDefinition {
    /// Display name.
    pub name: String,
    /// Free-form body options (sex list, colors, specials).
    pub options: serde_json::Value,
}

#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
#[serde(untagged)]
/// One catalog entry.
pub enum CatalogEntry {
    /// Layered sheet definition.
    Sheet(SheetDefinition),
    /// Body options descriptor.
    Body(BodyDefinition),
}

impl CatalogEntry {
    /// The sheet definition, if this entry is one.
    pub fn as_sheet(&self) -> Option<&SheetDefinition> {
        match self {
            Self::Sheet(s) => Some(s),
            Self::Body(_) => None,
        }
    }
}

#[derive(Clone, Debug, Default)]
/// Immutable, ordered catalog of entries keyed by entry identifier.
///
/// Iteration order is load order; the resolver relies on it for deterministic fallbacks.
pub struct Catalog {
    entries: Vec<(String, CatalogEntry)>,
}

impl Catalog {
    /// Build a catalog from entries in the given order.
    pub fn from_entries(entries: Vec<(String, CatalogEntry)>) -> Self {
        Self { entries }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in load order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CatalogEntry)> {
        self.entries.iter().map(|(k, e)| (k.as_str(), e))
    }

    /// Sheet definitions in load order, skipping body descriptors.
    pub fn sheets(&self) -> impl Iterator<Item = &SheetDefinition> {
        self.iter().filter_map(|(_, e)| e.as_sheet())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/catalog/model.rs"]
mod tests;

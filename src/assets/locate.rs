use crate::assets::store::AssetStore;

/// Animation folders probed, in order, when a component has no non-animated file.
pub const ANIMATION_PRIORITY: [&str; 4] = ["walk", "idle", "combat_idle", "run"];

/// Finds the first existing file for a component/variant among prioritized candidates.
///
/// Probe order is fixed so output is reproducible:
/// 1. `{path}/{variant}.png` for each spelling
/// 2. `{path}/{animation}/{variant}.png` for each animation in [`ANIMATION_PRIORITY`], then
///    each spelling
///
/// Spellings are the variant as given, then with spaces replaced by `_` (deduplicated). Probing
/// stops at the first hit.
#[derive(Debug)]
pub struct AssetLocator<'a, S> {
    store: &'a S,
}

impl<S> Clone for AssetLocator<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for AssetLocator<'_, S> {}

impl<'a, S: AssetStore> AssetLocator<'a, S> {
    /// Locate assets in `store`.
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Resolve `component_path` + `variant` to the URL of an existing asset.
    ///
    /// `supported_animations` is informational only; it does not restrict which animation
    /// folders are probed.
    pub async fn locate(
        &self,
        component_path: &str,
        variant: &str,
        supported_animations: &[String],
    ) -> Option<String> {
        let spellings = variant_spellings(variant);

        for spelling in &spellings {
            let url = self
                .store
                .url_for(&[component_path, &format!("{spelling}.png")]);
            if self.store.exists(&url).await {
                tracing::debug!(%url, "found base file");
                return Some(url);
            }
        }

        tracing::debug!(
            component_path,
            variant,
            supported = supported_animations.len(),
            "base file not found, trying animation folders"
        );

        for anim in ANIMATION_PRIORITY {
            for spelling in &spellings {
                let url = self
                    .store
                    .url_for(&[component_path, anim, &format!("{spelling}.png")]);
                if self.store.exists(&url).await {
                    tracing::debug!(%url, "found animation file");
                    return Some(url);
                }
            }
        }

        None
    }
}

/// Candidate spellings for `variant`: as given, then spaces replaced by underscores.
pub fn variant_spellings(variant: &str) -> Vec<String> {
    let mut out = vec![variant.to_string()];
    let underscored = variant.replace(' ', "_");
    if underscored != variant {
        out.push(underscored);
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/assets/locate.rs"]
mod tests;

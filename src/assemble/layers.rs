use futures_util::future::join_all;

use crate::assemble::params::{HumanHead, ParamKind, QueryParams, classify, effective_sex};
use crate::assets::locate::AssetLocator;
use crate::assets::store::AssetStore;
use crate::catalog::model::{Catalog, HEAD_PLACEHOLDER, LayerDefinition, SheetDefinition};
use crate::catalog::parse::{heuristic_parse, parse_value};

/// Stacking order of the body layer.
pub const BODY_Z_POS: i32 = 1;

/// Stacking order of a human head layer.
pub const HEAD_Z_POS: i32 = 10;

/// Parent name marking a layer as a shadow.
pub const SHADOW_PARENT: &str = "shadow";

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
/// One located asset contributing to the sheet.
pub struct ResolvedLayer {
    /// Absolute asset URL.
    pub file_name: String,
    /// Global stacking order; lower values are drawn first.
    pub z_pos: i32,
    /// Synthetic identifier, `{param}_{layer_N}` or `body_{sex}` / `head_{sex}`.
    pub name: String,
    /// Request parameter that produced the layer (catalog-driven layers only).
    pub parent_name: Option<String>,
    /// Variant used to locate the file.
    pub variant: String,
    /// Animations declared by the source definition.
    pub supported_animations: Vec<String>,
}

impl ResolvedLayer {
    /// Whether this layer is a shadow, which is drawn only for its supported animations.
    pub fn is_shadow(&self) -> bool {
        self.parent_name.as_deref() == Some(SHADOW_PARENT)
            || self.name.starts_with("shadow_")
    }

    /// Whether the layer is drawn into the `animation` band.
    pub fn draws_in(&self, animation: &str) -> bool {
        !self.is_shadow() || self.supported_animations.iter().any(|a| a == animation)
    }
}

/// Stable ascending sort by `z_pos`; equal positions keep their relative order.
pub fn sort_layers(layers: &mut [ResolvedLayer]) {
    layers.sort_by_key(|l| l.z_pos);
}

/// Turn request parameters into a z-ordered list of located layers.
///
/// Parameters resolve concurrently; results are gathered in parameter order and then stably
/// sorted by `z_pos`. Unresolvable parameters and missing assets are logged and skipped.
#[tracing::instrument(skip_all, fields(params = params.len()))]
pub async fn assemble_layers<S: AssetStore>(
    params: &QueryParams,
    catalog: &Catalog,
    locator: AssetLocator<'_, S>,
) -> Vec<ResolvedLayer> {
    let ctx = AssembleCtx {
        sex: params.sex(),
        head: params.get("head").unwrap_or(""),
        catalog,
        locator,
    };

    let per_param = join_all(params.iter().map(|(param, value)| ctx.resolve_param(param, value))).await;

    let mut layers: Vec<ResolvedLayer> = per_param.into_iter().flatten().collect();
    sort_layers(&mut layers);
    tracing::info!(count = layers.len(), "assembled layers");
    layers
}

struct AssembleCtx<'a, S> {
    sex: &'a str,
    head: &'a str,
    catalog: &'a Catalog,
    locator: AssetLocator<'a, S>,
}

impl<S: AssetStore> AssembleCtx<'_, S> {
    async fn resolve_param(&self, param: &str, value: &str) -> Vec<ResolvedLayer> {
        match classify(param, value) {
            ParamKind::Skip(reason) if reason.is_malformed() => {
                tracing::warn!(param, value, ?reason, "dropping malformed parameter");
                Vec::new()
            }
            ParamKind::Skip(reason) => {
                tracing::debug!(param, value, ?reason, "skipping parameter");
                Vec::new()
            }
            ParamKind::Body { variant } => self.resolve_body(variant).await.into_iter().collect(),
            ParamKind::HumanHead(head) => self.resolve_human_head(&head).await.into_iter().collect(),
            ParamKind::OtherHead | ParamKind::Generic => self.resolve_generic(param, value).await,
        }
    }

    async fn resolve_body(&self, variant: &str) -> Option<ResolvedLayer> {
        let path = format!("body/bodies/{}", self.sex);
        let Some(file_name) = self.locator.locate(&path, variant, &[]).await else {
            tracing::warn!(%path, variant, "no body file found");
            return None;
        };
        Some(ResolvedLayer {
            file_name,
            z_pos: BODY_Z_POS,
            name: format!("body_{}", self.sex),
            parent_name: None,
            variant: variant.to_string(),
            supported_animations: Vec::new(),
        })
    }

    async fn resolve_human_head(&self, head: &HumanHead) -> Option<ResolvedLayer> {
        let path = head.component_path();
        let Some(file_name) = self.locator.locate(&path, &head.variant, &[]).await else {
            tracing::warn!(%path, variant = %head.variant, "no head file found");
            return None;
        };
        Some(ResolvedLayer {
            file_name,
            z_pos: HEAD_Z_POS,
            name: format!("head_{}", head.sex),
            parent_name: None,
            variant: head.variant.clone(),
            supported_animations: Vec::new(),
        })
    }

    async fn resolve_generic(&self, param: &str, value: &str) -> Vec<ResolvedLayer> {
        let heuristic = heuristic_parse(value);
        let Some(def) = self.catalog.resolve(param, &heuristic.name) else {
            tracing::warn!(param, name = %heuristic.name, value, "no sheet definition found");
            return Vec::new();
        };

        let parsed = parse_value(value, Some(def));
        if parsed.name.is_empty() || parsed.variant.is_empty() {
            tracing::warn!(param, value, "could not parse name/variant");
            return Vec::new();
        }
        tracing::debug!(
            param,
            definition = %def.name,
            type_name = %def.type_name,
            variant = %parsed.variant,
            "resolved sheet definition"
        );

        let slots = def.layers().filter_map(|(key, layer)| {
            let path = self.layer_path(param, def, &key, layer)?;
            Some((key, layer, path))
        });
        let located = join_all(slots.map(|(key, layer, path)| {
            let variant = parsed.variant.as_str();
            async move {
                let found = self.locator.locate(&path, variant, &def.animations).await;
                if found.is_none() {
                    tracing::warn!(param, definition = %def.name, variant, %path, "no file found");
                }
                found.map(|file_name| ResolvedLayer {
                    file_name,
                    z_pos: layer.z_pos,
                    name: format!("{param}_{key}"),
                    parent_name: Some(param.to_string()),
                    variant: variant.to_string(),
                    supported_animations: def.animations.clone(),
                })
            }
        }))
        .await;

        located.into_iter().flatten().collect()
    }

    // Sex-specific path for one slot, with `${head}` substituted; `None` skips the slot.
    fn layer_path(
        &self,
        param: &str,
        def: &SheetDefinition,
        key: &str,
        layer: &LayerDefinition,
    ) -> Option<String> {
        if let Some(custom) = &layer.custom_animation {
            tracing::debug!(param, layer = key, %custom, "skipping custom animation layer");
            return None;
        }

        let Some(path) = layer
            .path_for(self.sex)
            .or_else(|| layer.path_for(effective_sex(self.sex)))
        else {
            tracing::debug!(param, layer = key, sex = self.sex, "no path for sex");
            return None;
        };

        if def.replaces_head() {
            let head_key = self.head.split('_').take(3).collect::<Vec<_>>().join("_");
            if let Some(replacement) = def.head_replacement(&head_key) {
                return Some(path.replace(HEAD_PLACEHOLDER, replacement));
            }
        }
        Some(path.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assemble/layers.rs"]
mod tests;

use std::{collections::HashMap, io::Cursor, sync::Arc};

use anyhow::Context;
use futures_util::future::join_all;
use image::RgbaImage;

use crate::{
    assemble::{
        layers::{ResolvedLayer, assemble_layers},
        params::QueryParams,
    },
    assets::{locate::AssetLocator, store::AssetStore},
    catalog::model::Catalog,
    foundation::error::{SpriteError, SpriteResult},
    render::{
        composite::{CellCopy, blit_cell},
        sheet::{ANIMATIONS, AnimationSpec, FRAME_SIZE, SHEET_HEIGHT, SHEET_WIDTH, animation_url},
    },
};

/// Decoded layer images of one request keyed by URL; `None` records a failed load.
type ImageMemo = HashMap<String, Option<RgbaImage>>;

/// Parameters in, PNG sprite sheet out.
///
/// Holds the shared catalog and asset store; cloning is cheap and clones share both.
pub struct SpriteGenerator<S> {
    catalog: Arc<Catalog>,
    store: Arc<S>,
}

impl<S> Clone for SpriteGenerator<S> {
    fn clone(&self) -> Self {
        Self {
            catalog: Arc::clone(&self.catalog),
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: AssetStore> SpriteGenerator<S> {
    /// Generator over a loaded catalog and the store its paths resolve against.
    pub fn new(catalog: Arc<Catalog>, store: Arc<S>) -> Self {
        Self { catalog, store }
    }

    /// The catalog requests are resolved against.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Resolve the layers for `params`.
    pub async fn layers(&self, params: &QueryParams) -> Vec<ResolvedLayer> {
        assemble_layers(params, &self.catalog, AssetLocator::new(self.store.as_ref())).await
    }

    /// Run the whole pipeline and return the encoded PNG.
    ///
    /// Missing assets only leave parts of the sheet empty; errors are reserved for failures that
    /// make the sheet itself unusable.
    #[tracing::instrument(skip_all, fields(params = params.len()))]
    pub async fn generate(&self, params: &QueryParams) -> SpriteResult<Vec<u8>> {
        let layers = self.layers(params).await;
        let sheet = composite_sheet(&layers, self.store.as_ref()).await;
        let png = encode_png(&sheet)?;
        tracing::info!(layers = layers.len(), bytes = png.len(), "generated sprite sheet");
        Ok(png)
    }
}

/// Draw every layer into every animation band of a fresh transparent sheet.
///
/// Animations are processed in table order. Within one animation the layer images load
/// concurrently, then draw serially in `z_pos` order. An image that fails to load is skipped for
/// that animation and logged; the remaining layers and animations still draw.
pub async fn composite_sheet<S: AssetStore>(layers: &[ResolvedLayer], store: &S) -> RgbaImage {
    let mut sheet = RgbaImage::new(SHEET_WIDTH, SHEET_HEIGHT);
    let mut images = ImageMemo::new();

    for anim in &ANIMATIONS {
        let drawn = draw_animation(&mut sheet, anim, layers, store, &mut images).await;
        tracing::debug!(animation = anim.name, drawn, "animation composited");
    }
    sheet
}

async fn draw_animation<S: AssetStore>(
    sheet: &mut RgbaImage,
    anim: &AnimationSpec,
    layers: &[ResolvedLayer],
    store: &S,
    images: &mut ImageMemo,
) -> usize {
    let mut plan: Vec<(&ResolvedLayer, String)> = layers
        .iter()
        .filter(|l| l.draws_in(anim.name))
        .map(|l| (l, animation_url(&l.file_name, anim.name)))
        .collect();
    plan.sort_by_key(|(l, _)| l.z_pos);

    let mut missing: Vec<String> = Vec::new();
    for (_, url) in &plan {
        if !images.contains_key(url) && !missing.contains(url) {
            missing.push(url.clone());
        }
    }
    let loaded = join_all(missing.iter().map(|url| load_image(store, url))).await;
    for (url, result) in missing.into_iter().zip(loaded) {
        let image = match result {
            Ok(image) => Some(image),
            Err(err) => {
                tracing::warn!(animation = anim.name, %url, error = %err, "layer image unavailable");
                None
            }
        };
        images.insert(url, image);
    }

    let mut drawn = 0;
    for (_, url) in &plan {
        let Some(Some(image)) = images.get(url) else {
            continue;
        };
        draw_band(sheet, image, anim);
        drawn += 1;
    }
    drawn
}

// Every (row, frame) cell of the layer image lands at the same cell of the animation band.
fn draw_band(sheet: &mut RgbaImage, image: &RgbaImage, anim: &AnimationSpec) {
    for row in 0..anim.rows {
        for frame in 0..anim.frames {
            blit_cell(
                sheet,
                image,
                CellCopy {
                    src_x: frame * FRAME_SIZE,
                    src_y: row * FRAME_SIZE,
                    dst_x: frame * FRAME_SIZE,
                    dst_y: anim.y_offset + row * FRAME_SIZE,
                    size: FRAME_SIZE,
                },
            );
        }
    }
}

async fn load_image<S: AssetStore>(store: &S, url: &str) -> SpriteResult<RgbaImage> {
    let bytes = store.fetch(url).await?;
    decode_rgba(&bytes)
}

/// Decode any supported image format into straight RGBA8.
pub fn decode_rgba(bytes: &[u8]) -> SpriteResult<RgbaImage> {
    let image = image::load_from_memory(bytes).context("decode image from memory")?;
    Ok(image.to_rgba8())
}

/// Encode the sheet as PNG.
pub fn encode_png(sheet: &RgbaImage) -> SpriteResult<Vec<u8>> {
    let mut buf = Vec::new();
    sheet
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .map_err(|e| SpriteError::render(format!("encode png: {e}")))?;
    Ok(buf)
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;

//! spritegen turns character customization parameters into a multi-animation sprite sheet.
//!
//! A request such as `body=Body_color_light&hair=Pixie_dark_brown&sex=female` goes through:
//!
//! - [`assemble_layers`]: parse each value, resolve it against the [`Catalog`], and probe the
//!   [`AssetStore`] for the matching files
//! - [`composite_sheet`]: draw every layer into every animation band of an 832x3456 canvas
//! - [`encode_png`]
//!
//! [`SpriteGenerator`] wraps the whole pipeline; [`router`] exposes it over HTTP.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assemble;
mod assets;
mod catalog;
mod foundation;
mod render;
mod server;

/// Runtime configuration.
pub mod config;

pub use crate::assemble::layers::{ResolvedLayer, assemble_layers, sort_layers};
pub use crate::assemble::params::{
    HumanHead, ParamKind, QueryParams, SkipReason, classify, effective_sex,
};
pub use crate::assets::locate::{ANIMATION_PRIORITY, AssetLocator, variant_spellings};
pub use crate::assets::store::{
    AssetStore, ConfiguredStore, HttpAssetStore, LOCAL_BASE_URL, LocalAssetStore,
    MemoryAssetStore, asset_url,
};
pub use crate::catalog::model::{
    BodyDefinition, Catalog, CatalogEntry, LayerDefinition, SheetDefinition,
};
pub use crate::catalog::parse::{ParsedValue, heuristic_parse, parse_value};
pub use crate::catalog::resolve::MatchTier;
pub use crate::config::Config;
pub use crate::foundation::error::{SpriteError, SpriteResult};
pub use crate::render::composite::{CellCopy, blit_cell, over};
pub use crate::render::pipeline::{
    SpriteGenerator, composite_sheet, decode_rgba, encode_png,
};
pub use crate::render::sheet::{
    ANIMATIONS, AnimationSpec, FRAME_SIZE, SHEET_HEIGHT, SHEET_WIDTH, animation_url,
};
pub use crate::server::cache::{cache_key, etag};
pub use crate::server::routes::{HEAD_DEFAULTS, router, serve};

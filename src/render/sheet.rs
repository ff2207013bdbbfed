//! Fixed sprite sheet layout.
//!
//! Every animation occupies a horizontal band of `rows` frame rows starting at `y_offset`; frames
//! run left to right. The canvas is as wide as the longest animation and as tall as all bands.

/// Edge length of one square frame cell, in pixels.
pub const FRAME_SIZE: u32 = 64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// One animation band of the sheet.
pub struct AnimationSpec {
    /// Animation name, also the asset folder name.
    pub name: &'static str,
    /// Frames per row.
    pub frames: u32,
    /// Rows (one per facing direction, or one for direction-less animations).
    pub rows: u32,
    /// Top edge of the band on the sheet.
    pub y_offset: u32,
}

const fn anim(name: &'static str, frames: u32, rows: u32, y_offset: u32) -> AnimationSpec {
    AnimationSpec {
        name,
        frames,
        rows,
        y_offset,
    }
}

/// Animation bands in drawing (and vertical) order.
pub const ANIMATIONS: [AnimationSpec; 15] = [
    anim("spellcast", 7, 4, 0),
    anim("thrust", 8, 4, 256),
    anim("walk", 9, 4, 512),
    anim("slash", 6, 4, 768),
    anim("shoot", 13, 4, 1024),
    anim("hurt", 6, 1, 1280),
    anim("climb", 6, 1, 1344),
    anim("idle", 2, 4, 1408),
    anim("jump", 5, 4, 1664),
    anim("sit", 3, 4, 1920),
    anim("emote", 3, 4, 2176),
    anim("run", 8, 4, 2432),
    anim("combat_idle", 2, 4, 2688),
    anim("backslash", 6, 4, 2944),
    anim("halfslash", 5, 4, 3200),
];

/// Canvas width: the longest animation's frame count times [`FRAME_SIZE`].
pub const SHEET_WIDTH: u32 = FRAME_SIZE * max_frames();

/// Canvas height: the total row count times [`FRAME_SIZE`].
pub const SHEET_HEIGHT: u32 = FRAME_SIZE * total_rows();

const fn max_frames() -> u32 {
    let mut i = 0;
    let mut max = 0;
    while i < ANIMATIONS.len() {
        if ANIMATIONS[i].frames > max {
            max = ANIMATIONS[i].frames;
        }
        i += 1;
    }
    max
}

const fn total_rows() -> u32 {
    let mut i = 0;
    let mut rows = 0;
    while i < ANIMATIONS.len() {
        rows += ANIMATIONS[i].rows;
        i += 1;
    }
    rows
}

/// Look up an animation band by name.
pub fn animation(name: &str) -> Option<&'static AnimationSpec> {
    ANIMATIONS.iter().find(|a| a.name == name)
}

/// Whether `name` is one of the sheet's animations.
pub fn is_animation(name: &str) -> bool {
    animation(name).is_some()
}

/// Point `url` at the `animation` folder.
///
/// Only the folder directly holding the file is replaced, and only when it names a known
/// animation. URLs without one (non-animated base files) are returned unchanged.
pub fn animation_url(url: &str, animation: &str) -> String {
    let Some((dir, file)) = url.rsplit_once('/') else {
        return url.to_string();
    };
    match dir.rsplit_once('/') {
        Some((parent, folder)) if is_animation(folder) => format!("{parent}/{animation}/{file}"),
        _ => url.to_string(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/sheet.rs"]
mod tests;

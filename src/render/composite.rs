use image::RgbaImage;

/// Straight (non-premultiplied) RGBA8 pixel.
pub type Rgba8 = [u8; 4];

/// Source-over for straight-alpha pixels.
///
/// Channels are weighted by their effective coverage and divided back out, so an opaque source
/// replaces the destination and a source over a transparent destination is returned unchanged.
pub fn over(dst: Rgba8, src: Rgba8) -> Rgba8 {
    let sa = u16::from(src[3]);
    if sa == 0 {
        return dst;
    }
    if sa == 255 {
        return src;
    }

    let da = mul_div255(u16::from(dst[3]), 255 - sa);
    let out_a = u32::from(sa) + u32::from(da);
    if out_a == 0 {
        return [0; 4];
    }

    let mut out = [0u8; 4];
    for i in 0..3 {
        let weighted = u32::from(src[i]) * u32::from(sa) + u32::from(dst[i]) * u32::from(da);
        out[i] = ((weighted + out_a / 2) / out_a).min(255) as u8;
    }
    out[3] = out_a.min(255) as u8;
    out
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// A square region copied from a layer image onto the sheet.
pub struct CellCopy {
    /// Left edge in the source image.
    pub src_x: u32,
    /// Top edge in the source image.
    pub src_y: u32,
    /// Left edge on the destination.
    pub dst_x: u32,
    /// Top edge on the destination.
    pub dst_y: u32,
    /// Edge length of the cell.
    pub size: u32,
}

/// Composite one cell of `src` over `dst`; the cell is clipped to both images.
pub fn blit_cell(dst: &mut RgbaImage, src: &RgbaImage, cell: CellCopy) {
    let w = cell
        .size
        .min(src.width().saturating_sub(cell.src_x))
        .min(dst.width().saturating_sub(cell.dst_x));
    let h = cell
        .size
        .min(src.height().saturating_sub(cell.src_y))
        .min(dst.height().saturating_sub(cell.dst_y));

    for y in 0..h {
        for x in 0..w {
            let s = src.get_pixel(cell.src_x + x, cell.src_y + y).0;
            if s[3] == 0 {
                continue;
            }
            let d = dst.get_pixel_mut(cell.dst_x + x, cell.dst_y + y);
            d.0 = over(d.0, s);
        }
    }
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;

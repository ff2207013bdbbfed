use super::*;

#[test]
fn over_src_alpha_0_is_noop() {
    let dst = [10, 20, 30, 40];
    assert_eq!(over(dst, [255, 255, 255, 0]), dst);
}

#[test]
fn over_src_opaque_replaces_dst() {
    assert_eq!(over([0, 0, 0, 255], [255, 0, 0, 255]), [255, 0, 0, 255]);
}

#[test]
fn over_dst_transparent_returns_src() {
    let src = [100, 110, 120, 200];
    assert_eq!(over([0, 0, 0, 0], src), src);
}

#[test]
fn over_half_alpha_on_opaque_mixes() {
    let out = over([0, 0, 255, 255], [255, 0, 0, 128]);
    assert_eq!(out, [128, 0, 127, 255]);
}

#[test]
fn blit_is_clipped_to_both_images() {
    let mut dst = RgbaImage::new(4, 4);
    let src = RgbaImage::from_pixel(3, 3, image::Rgba([9, 8, 7, 255]));

    blit_cell(
        &mut dst,
        &src,
        CellCopy {
            src_x: 1,
            src_y: 1,
            dst_x: 2,
            dst_y: 3,
            size: 64,
        },
    );

    let painted: Vec<(u32, u32)> = dst
        .enumerate_pixels()
        .filter(|(_, _, p)| p.0[3] != 0)
        .map(|(x, y, _)| (x, y))
        .collect();
    assert_eq!(painted, vec![(2, 3), (3, 3)]);
}

#[test]
fn blit_outside_source_draws_nothing() {
    let mut dst = RgbaImage::new(4, 4);
    let src = RgbaImage::from_pixel(2, 2, image::Rgba([1, 2, 3, 255]));
    blit_cell(
        &mut dst,
        &src,
        CellCopy {
            src_x: 64,
            src_y: 0,
            dst_x: 0,
            dst_y: 0,
            size: 64,
        },
    );
    assert!(dst.pixels().all(|p| p.0 == [0, 0, 0, 0]));
}

use crate::foundation::core::{Offset, Size};
use crate::foundation::math::mul_div255_u8;
use crate::render::raster::Coverage;

pub type PremulRgba8 = [u8; 4];

/// Porter-Duff source-over for premultiplied pixels.
pub fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    if src[3] == 0 {
        return dst;
    }
    if src[3] == 255 {
        return src;
    }
    let inv = 255u16 - u16::from(src[3]);
    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = add_sat_u8(src[i], mul_div255_u8(u16::from(dst[i]), inv));
    }
    out
}

/// Scale every channel of a premultiplied buffer by a coverage of the same size.
pub fn apply_coverage(rgba: &mut [u8], coverage: &Coverage) {
    for (px, &a) in rgba.chunks_exact_mut(4).zip(&coverage.alpha) {
        match a {
            255 => {}
            0 => px.fill(0),
            _ => {
                for c in px.iter_mut() {
                    *c = mul_div255_u8(u16::from(*c), u16::from(a));
                }
            }
        }
    }
}

/// Composite `src` over equal-sized `dst`.
pub fn over_in_place(dst: &mut [u8], src: &[u8]) {
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
        d.copy_from_slice(&out);
    }
}

/// Composite a `src_size` buffer over a `dst_size` buffer with its top-left at `offset`.
///
/// Parts of `src` outside `dst` (including negative offsets) are clipped.
pub fn over_at(dst: &mut [u8], dst_size: Size, src: &[u8], src_size: Size, offset: Offset) {
    let Some((x0, x1, y0, y1)) = clip_span(dst_size, src_size, offset) else {
        return;
    };
    let (dw, sw) = (dst_size.width as i64, src_size.width as i64);
    for y in y0..y1 {
        let sy = y - i64::from(offset.y);
        let d_row = ((y * dw + x0) * 4) as usize;
        let s_row = ((sy * sw + x0 - i64::from(offset.x)) * 4) as usize;
        let n = ((x1 - x0) * 4) as usize;
        over_in_place(&mut dst[d_row..d_row + n], &src[s_row..s_row + n]);
    }
}

/// Copy a coverage into a larger (or smaller) zeroed one at `offset`, clipping.
pub fn place_coverage(src: &Coverage, dst_size: Size, offset: Offset) -> Coverage {
    let mut out = Coverage::empty(dst_size);
    if let Some((x0, x1, y0, y1)) = clip_span(dst_size, src.size, offset) {
        let (dw, sw) = (dst_size.width as i64, src.size.width as i64);
        for y in y0..y1 {
            let sy = y - i64::from(offset.y);
            let d = (y * dw + x0) as usize;
            let s = (sy * sw + x0 - i64::from(offset.x)) as usize;
            let n = (x1 - x0) as usize;
            out.alpha[d..d + n].copy_from_slice(&src.alpha[s..s + n]);
        }
    }
    out
}

/// Destination rows/columns `[x0, x1) x [y0, y1)` covered by the placed source.
fn clip_span(dst: Size, src: Size, offset: Offset) -> Option<(i64, i64, i64, i64)> {
    let (ox, oy) = (i64::from(offset.x), i64::from(offset.y));
    let x0 = ox.max(0);
    let y0 = oy.max(0);
    let x1 = (ox + i64::from(src.width)).min(i64::from(dst.width));
    let y1 = (oy + i64::from(src.height)).min(i64::from(dst.height));
    (x0 < x1 && y0 < y1).then_some((x0, x1, y0, y1))
}

pub(crate) fn unpremultiply_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

fn add_sat_u8(a: u8, b: u8) -> u8 {
    a.saturating_add(b)
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;

use crate::Rgba;

/// Whether `pixel` is exact opaque black.
///
/// Any non-zero alpha counts as opaque. Near-black or anti-aliased pixels are
/// not border material, so frames must be drawn in pure black.
pub fn is_border_pixel(pixel: Rgba) -> bool {
    pixel.a != 0 && pixel.r == 0 && pixel.g == 0 && pixel.b == 0
}

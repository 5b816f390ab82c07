use crate::{Image, Rect, Rgba, SubImage};

use image::{imageops, DynamicImage, GenericImageView, ImageBuffer, Pixel};
use std::ops::Deref;

/// Sample types that widen to the 16-bit range of [`Rgba`].
pub trait Channel: Copy {
    fn widen(self) -> u16;
}

impl Channel for u8 {
    fn widen(self) -> u16 {
        u16::from(self) * 257
    }
}

impl Channel for u16 {
    fn widen(self) -> u16 {
        self
    }
}

impl Channel for f32 {
    // ceil keeps every non-zero sample non-zero
    fn widen(self) -> u16 {
        (self.clamp(0.0, 1.0) * f32::from(u16::MAX)).ceil() as u16
    }
}

// Channels are taken as stored, without premultiplying by alpha, so a
// translucent pixel with a small non-zero red value is never black.
fn to_rgba<T: Channel>(px: image::Rgba<T>) -> Rgba {
    let image::Rgba([r, g, b, a]) = px;
    Rgba::new(r.widen(), g.widen(), b.widen(), a.widen())
}

fn dimensions_rect(width: u32, height: u32) -> Rect {
    Rect::new(0, 0, width as i32, height as i32)
}

impl<P, C> Image for ImageBuffer<P, C>
where
    P: Pixel,
    P::Subpixel: Channel,
    C: Deref<Target = [P::Subpixel]>,
{
    fn bounds(&self) -> Rect {
        dimensions_rect(self.width(), self.height())
    }

    fn get(&self, x: i32, y: i32) -> Rgba {
        to_rgba(self.get_pixel(x as u32, y as u32).to_rgba())
    }
}

impl<P> SubImage for ImageBuffer<P, Vec<P::Subpixel>>
where
    P: Pixel + 'static,
    P::Subpixel: Channel,
{
    type Output = ImageBuffer<P, Vec<P::Subpixel>>;

    fn sub_image(&self, rect: Rect) -> Self::Output {
        let r = rect.intersect(Image::bounds(self));
        imageops::crop_imm(self, r.min_x as u32, r.min_y as u32, r.width(), r.height()).to_image()
    }
}

impl Image for DynamicImage {
    fn bounds(&self) -> Rect {
        dimensions_rect(self.width(), self.height())
    }

    fn get(&self, x: i32, y: i32) -> Rgba {
        match self {
            DynamicImage::ImageLuma8(buf) => Image::get(buf, x, y),
            DynamicImage::ImageLumaA8(buf) => Image::get(buf, x, y),
            DynamicImage::ImageRgb8(buf) => Image::get(buf, x, y),
            DynamicImage::ImageRgba8(buf) => Image::get(buf, x, y),
            DynamicImage::ImageLuma16(buf) => Image::get(buf, x, y),
            DynamicImage::ImageLumaA16(buf) => Image::get(buf, x, y),
            DynamicImage::ImageRgb16(buf) => Image::get(buf, x, y),
            DynamicImage::ImageRgba16(buf) => Image::get(buf, x, y),
            DynamicImage::ImageRgb32F(buf) => Image::get(buf, x, y),
            DynamicImage::ImageRgba32F(buf) => Image::get(buf, x, y),
            other => to_rgba(other.get_pixel(x as u32, y as u32)),
        }
    }
}

impl SubImage for DynamicImage {
    type Output = DynamicImage;

    fn sub_image(&self, rect: Rect) -> DynamicImage {
        let r = rect.intersect(Image::bounds(self));
        self.crop_imm(r.min_x as u32, r.min_y as u32, r.width(), r.height())
    }
}

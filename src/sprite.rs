// Copyright (c) 2026 nyansaver authors

use image::imageops::{self, FilterType};
use image::RgbaImage;

/// One decoded animation frame, packed 0xAARRGGBB.
#[derive(Clone, Debug)]
pub struct Sprite {
    pub width: usize,
    pub height: usize,
    pixels: Vec<u32>,
}

impl Sprite {
    pub fn from_rgba(img: &RgbaImage) -> Self {
        let (w, h) = (img.width() as usize, img.height() as usize);
        let mut pixels = Vec::with_capacity(w * h);
        for p in img.pixels() {
            let [r, g, b, a] = p.0;
            pixels.push((a as u32) << 24 | (r as u32) << 16 | (g as u32) << 8 | b as u32);
        }
        Self {
            width: w,
            height: h,
            pixels,
        }
    }

    #[allow(dead_code)]
    pub fn from_pixels(width: usize, height: usize, pixels: Vec<u32>) -> Self {
        debug_assert_eq!(pixels.len(), width * height);
        Self {
            width,
            height,
            pixels,
        }
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> u32 {
        self.pixels[y * self.width + x]
    }
}

pub fn sprite_set(images: &[RgbaImage]) -> Vec<Sprite> {
    images.iter().map(Sprite::from_rgba).collect()
}

/// Scale every frame to `target_w` keeping the first frame's aspect ratio.
/// Used for the full-size cat variant.
pub fn stretched_set(images: &[RgbaImage], target_w: u32) -> Vec<Sprite> {
    let Some(first) = images.first() else {
        return Vec::new();
    };
    let target_w = target_w.max(1);
    let target_h = (target_w * first.height().max(1) / first.width().max(1)).max(1);
    images
        .iter()
        .map(|img| {
            let scaled = imageops::resize(img, target_w, target_h, FilterType::Nearest);
            Sprite::from_rgba(&scaled)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_rgba_packs_argb() {
        let mut img = RgbaImage::new(1, 1);
        img.put_pixel(0, 0, image::Rgba([0x11, 0x22, 0x33, 0x44]));
        let s = Sprite::from_rgba(&img);
        assert_eq!(s.pixel(0, 0), 0x44112233);
    }

    #[test]
    fn stretched_set_keeps_aspect_ratio() {
        let images = vec![RgbaImage::new(10, 4), RgbaImage::new(10, 4)];
        let set = stretched_set(&images, 20);
        assert_eq!(set.len(), 2);
        assert_eq!(set[0].width, 20);
        assert_eq!(set[0].height, 8);
    }
}

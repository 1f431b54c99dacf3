// Copyright (c) 2026 nyansaver authors

use crate::sprite::Sprite;

/// Software render target. Pixels are 0x00RRGGBB, row-major, as expected by
/// `minifb::Window::update_with_buffer`.
#[derive(Clone, Debug)]
pub struct Surface {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u32>,
}

impl Surface {
    pub fn new(width: usize, height: usize, fill: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![fill; width * height],
        }
    }

    pub fn set_pixel(&mut self, x: i32, y: i32, color: u32) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return;
        }
        self.pixels[y * self.width + x] = color;
    }

    #[allow(dead_code)]
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<u32> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y * self.width + x])
    }

    /// Fill a rectangle, clipped to the surface. A rectangle entirely outside
    /// the surface is a no-op.
    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: u32) {
        let (mut x, mut y, mut w, mut h) = (x, y, w, h);
        let sw = self.width as i32;
        let sh = self.height as i32;

        if x + w < 0 || y + h < 0 || x > sw || y > sh {
            return;
        }

        if x + w > sw {
            w = sw - x;
        }
        if y + h > sh {
            h = sh - y;
        }
        if x < 0 {
            w += x;
            x = 0;
        }
        if y < 0 {
            h += y;
            y = 0;
        }

        for row in y..y + h {
            for col in x..x + w {
                self.pixels[row as usize * self.width + col as usize] = color;
            }
        }
    }

    /// Alpha-over blit of a sprite at (x, y), clipped to the surface.
    pub fn blit(&mut self, sprite: &Sprite, x: i32, y: i32) {
        for sy in 0..sprite.height {
            let ty = y + sy as i32;
            if ty < 0 {
                continue;
            }
            if ty >= self.height as i32 {
                break;
            }
            for sx in 0..sprite.width {
                let tx = x + sx as i32;
                if tx < 0 || tx >= self.width as i32 {
                    continue;
                }
                let src = sprite.pixel(sx, sy);
                let a = src >> 24;
                if a == 0 {
                    continue;
                }
                let idx = ty as usize * self.width + tx as usize;
                if a == 255 {
                    self.pixels[idx] = src & 0x00ff_ffff;
                } else {
                    self.pixels[idx] = blend(src, self.pixels[idx]);
                }
            }
        }
    }
}

fn blend(src: u32, dst: u32) -> u32 {
    let a = src >> 24;
    let na = 255 - a;
    let r = ((src >> 16 & 0xff) * a + (dst >> 16 & 0xff) * na) / 255;
    let g = ((src >> 8 & 0xff) * a + (dst >> 8 & 0xff) * na) / 255;
    let b = ((src & 0xff) * a + (dst & 0xff) * na) / 255;
    (r << 16) | (g << 8) | b
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(w: usize, h: usize, color: u32) -> Sprite {
        Sprite::from_pixels(w, h, vec![color; w * h])
    }

    #[test]
    fn set_pixel_out_of_bounds_is_noop() {
        let mut s = Surface::new(4, 4, 0);
        s.set_pixel(-1, 0, 0xffffff);
        s.set_pixel(0, -1, 0xffffff);
        s.set_pixel(4, 0, 0xffffff);
        s.set_pixel(0, 4, 0xffffff);
        assert!(s.pixels.iter().all(|&p| p == 0));
    }

    #[test]
    fn fill_rect_entirely_outside_is_noop() {
        let mut s = Surface::new(8, 8, 0);
        s.fill_rect(-20, 0, 10, 10, 0xffffff);
        s.fill_rect(0, -20, 10, 10, 0xffffff);
        s.fill_rect(9, 0, 10, 10, 0xffffff);
        s.fill_rect(0, 9, 10, 10, 0xffffff);
        assert!(s.pixels.iter().all(|&p| p == 0));
    }

    #[test]
    fn fill_rect_clips_to_edges() {
        let mut s = Surface::new(4, 4, 0);
        s.fill_rect(-2, -2, 4, 4, 0xabcdef);
        assert_eq!(s.get_pixel(0, 0), Some(0xabcdef));
        assert_eq!(s.get_pixel(1, 1), Some(0xabcdef));
        assert_eq!(s.get_pixel(2, 0), Some(0));
        assert_eq!(s.get_pixel(0, 2), Some(0));

        let mut s = Surface::new(4, 4, 0);
        s.fill_rect(2, 2, 10, 10, 0xabcdef);
        assert_eq!(s.get_pixel(2, 2), Some(0xabcdef));
        assert_eq!(s.get_pixel(3, 3), Some(0xabcdef));
        assert_eq!(s.get_pixel(1, 1), Some(0));
    }

    #[test]
    fn blit_skips_transparent_pixels() {
        let mut s = Surface::new(2, 1, 0x123456);
        let sprite = Sprite::from_pixels(2, 1, vec![0xff00ff00, 0x0000ff00]);
        s.blit(&sprite, 0, 0);
        assert_eq!(s.get_pixel(0, 0), Some(0x00ff00));
        assert_eq!(s.get_pixel(1, 0), Some(0x123456));
    }

    #[test]
    fn blit_clips_at_surface_edges() {
        let mut s = Surface::new(4, 4, 0);
        let sprite = solid(3, 3, 0xff0000ff);
        s.blit(&sprite, -1, -1);
        s.blit(&sprite, 3, 3);
        assert_eq!(s.get_pixel(0, 0), Some(0x0000ff));
        assert_eq!(s.get_pixel(1, 1), Some(0x0000ff));
        assert_eq!(s.get_pixel(2, 2), Some(0));
        assert_eq!(s.get_pixel(3, 3), Some(0x0000ff));
    }

    #[test]
    fn blend_mixes_half_alpha() {
        let out = blend(0x80ff0000, 0x00000000);
        let r = out >> 16 & 0xff;
        assert!((0x7e..=0x81).contains(&r));
        assert_eq!(out & 0xffff, 0);
    }
}

// Copyright (c) 2026 nyansaver authors

use crate::field::SparkleField;
use crate::sprite::Sprite;
use crate::surface::Surface;

/// Screen background, the classic deep blue.
pub const BG_COLOR: u32 = 0x0000_3366;

/// Stationary anchor for the looping cat animation. One per placement region.
#[derive(Clone, Copy, Debug)]
pub struct Cat {
    pub x: i32,
    pub y: i32,
}

/// Everything a tick touches: entity stores, the active image sets and the
/// cat's animation counter. Owned by the render loop and threaded through
/// erase/update/draw explicitly.
pub struct Scene {
    pub cats: Vec<Cat>,
    pub field: SparkleField,
    pub cat_set: Vec<Sprite>,
    pub sparkle_set: Vec<Sprite>,
    pub curr_frame: usize,
}

impl Scene {
    /// Erase last tick's footprint of every entity back to the background.
    ///
    /// The cat rectangle is padded by (6, 5) and shifted up 5px for the first
    /// two frames; the source art is unevenly sized and this covers the union
    /// of the offset and non-offset draw positions.
    pub fn erase(&self, surface: &mut Surface) {
        if let Some(img) = self.cat_set.get(self.curr_frame) {
            let dy = if self.curr_frame < 2 { 5 } else { 0 };
            for c in &self.cats {
                surface.fill_rect(
                    c.x,
                    c.y - dy,
                    img.width as i32 + 6,
                    img.height as i32 + 5,
                    BG_COLOR,
                );
            }
        }

        for s in &self.field.sparkles {
            if let Some(img) = self.sparkle_set.get(s.frame as usize) {
                surface.fill_rect(s.x, s.y, img.width as i32, img.height as i32, BG_COLOR);
            }
        }
    }

    pub fn draw_sparkles(&self, surface: &mut Surface) {
        for s in &self.field.sparkles {
            if let Some(img) = self.sparkle_set.get(s.frame as usize) {
                surface.blit(img, s.x, s.y);
            }
        }
    }

    pub fn draw_cats(&self, surface: &mut Surface) {
        if let Some(img) = self.cat_set.get(self.curr_frame) {
            let dy = if self.curr_frame < 2 { 5 } else { 0 };
            for c in &self.cats {
                surface.blit(img, c.x, c.y - dy);
            }
        }
    }

    /// Advance the cat animation cyclically; one step per tick.
    pub fn advance_cat_frame(&mut self) {
        self.curr_frame += 1;
        if self.curr_frame >= self.cat_set.len() {
            self.curr_frame = 0;
        }
    }
}

// Copyright (c) 2026 nyansaver authors

use crate::scene::Cat;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// Where cats are anchored: one region for the whole virtual screen, or one
/// per physical monitor when the topology query succeeds. Chosen once at
/// startup, never by build configuration.
#[derive(Clone, Debug)]
pub enum Placement {
    SingleRegion(Rect),
    PerMonitor(Vec<Rect>),
}

/// Monitor topology query. The minifb backend exposes no multi-display
/// layout, so this always degrades to the single-region fallback; the seam
/// stays runtime-selected for backends that can answer.
pub fn detect_monitors() -> Option<Vec<Rect>> {
    None
}

impl Placement {
    pub fn select(monitors: Option<Vec<Rect>>, screen_w: u32, screen_h: u32) -> Self {
        match monitors {
            Some(m) if !m.is_empty() => Placement::PerMonitor(m),
            _ => Placement::SingleRegion(Rect {
                x: 0,
                y: 0,
                width: screen_w,
                height: screen_h,
            }),
        }
    }

    pub fn regions(&self) -> &[Rect] {
        match self {
            Placement::SingleRegion(r) => std::slice::from_ref(r),
            Placement::PerMonitor(v) => v,
        }
    }

    /// Narrowest region width; the full-size cat is stretched relative to
    /// this so it fits on every monitor.
    pub fn min_width(&self) -> u32 {
        self.regions()
            .iter()
            .map(|r| r.width)
            .min()
            .unwrap_or(0)
    }

    /// One cat anchor per region. The full-size single-region cat hugs the
    /// left edge since it already spans most of the width; everything else is
    /// centered.
    pub fn cat_anchors(&self, sprite_w: u32, sprite_h: u32, full_size: bool) -> Vec<Cat> {
        let (sw, sh) = (sprite_w as i32, sprite_h as i32);
        self.regions()
            .iter()
            .map(|r| {
                let x = if full_size && matches!(self, Placement::SingleRegion(_)) {
                    r.x
                } else {
                    r.x + (r.width as i32 - sw) / 2
                };
                Cat {
                    x,
                    y: r.y + (r.height as i32 - sh) / 2,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_topology_falls_back_to_single_region() {
        let p = Placement::select(None, 800, 600);
        assert_eq!(
            p.regions(),
            &[Rect {
                x: 0,
                y: 0,
                width: 800,
                height: 600
            }]
        );
    }

    #[test]
    fn empty_topology_falls_back_too() {
        let p = Placement::select(Some(Vec::new()), 640, 480);
        assert!(matches!(p, Placement::SingleRegion(_)));
    }

    #[test]
    fn single_region_cat_is_centered() {
        let p = Placement::select(None, 800, 600);
        let cats = p.cat_anchors(100, 50, false);
        assert_eq!(cats.len(), 1);
        assert_eq!((cats[0].x, cats[0].y), (350, 275));
    }

    #[test]
    fn full_size_single_region_cat_hugs_left_edge() {
        let p = Placement::select(None, 800, 600);
        let cats = p.cat_anchors(720, 300, true);
        assert_eq!((cats[0].x, cats[0].y), (0, 150));
    }

    #[test]
    fn per_monitor_cats_are_centered_in_each_monitor() {
        let monitors = vec![
            Rect {
                x: 0,
                y: 0,
                width: 1920,
                height: 1080,
            },
            Rect {
                x: 1920,
                y: 0,
                width: 1280,
                height: 1024,
            },
        ];
        let p = Placement::select(Some(monitors), 3200, 1080);
        assert_eq!(p.min_width(), 1280);
        let cats = p.cat_anchors(100, 50, false);
        assert_eq!(cats.len(), 2);
        assert_eq!((cats[0].x, cats[0].y), (910, 515));
        assert_eq!((cats[1].x, cats[1].y), (1920 + 590, 487));
    }
}

// Copyright (c) 2026 nyansaver authors

use minifb::{Key, KeyRepeat, MouseMode, Window, WindowOptions};

use crate::surface::Surface;

/// The on-screen window plus the input state the scheduler polls once per
/// tick. Presentation pacing is handled by the render loop, not minifb.
pub struct Screen {
    window: Window,
    last_mouse: Option<(f32, f32)>,
}

impl Screen {
    pub fn new(
        title: &str,
        width: usize,
        height: usize,
        fullscreen: bool,
        show_cursor: bool,
    ) -> Result<Self, minifb::Error> {
        let opts = WindowOptions {
            borderless: fullscreen,
            title: !fullscreen,
            topmost: fullscreen,
            ..WindowOptions::default()
        };
        let mut window = Window::new(title, width, height, opts)?;
        window.set_target_fps(0);
        window.set_cursor_visibility(show_cursor);
        Ok(Self {
            window,
            last_mouse: None,
        })
    }

    pub fn present(&mut self, surface: &Surface) -> Result<(), minifb::Error> {
        self.window
            .update_with_buffer(&surface.pixels, surface.width, surface.height)
    }

    /// Drain this tick's input: any key press, any pointer motion since the
    /// previous poll, or a window close request ends the show. The first poll
    /// only establishes the pointer baseline.
    pub fn interrupted(&mut self) -> bool {
        if !self.window.is_open() || self.window.is_key_down(Key::Escape) {
            return true;
        }
        if !self.window.get_keys_pressed(KeyRepeat::No).is_empty() {
            return true;
        }

        let pos = self.window.get_mouse_pos(MouseMode::Pass);
        let moved = matches!((self.last_mouse, pos), (Some(a), Some(b)) if a != b);
        if pos.is_some() {
            self.last_mouse = pos;
        }
        moved
    }
}

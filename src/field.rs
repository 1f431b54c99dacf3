// Copyright (c) 2026 nyansaver authors

use rand::{
    distr::{Distribution, Uniform},
    rngs::StdRng,
    Rng, SeedableRng,
};

/// The horizontal lead-in: sparkles spawn this far past the right edge.
const SPAWN_MARGIN: i32 = 80;

/// Spawn threshold for the accumulator counter.
const SPAWN_THRESHOLD: i32 = 1000;

#[derive(Clone, Debug)]
pub struct Sparkle {
    pub x: i32,
    pub y: i32,
    pub frame: i32,
    pub frame_dir: i32,
    pub speed: i32,
    #[allow(dead_code)]
    pub layer: u8,
}

/// Sparkle store plus the stochastic spawn/update/cull machinery.
///
/// Each tick the accumulator gains a random amount in `[0, surface_h)`; every
/// 1000 accumulated points spawns one sparkle, so taller screens sparkle more.
pub struct SparkleField {
    pub sparkles: Vec<Sparkle>,
    spawn_counter: i32,

    surface_w: i32,
    surface_h: i32,
    sprite_w: i32,
    sprite_h: i32,
    bg_frames: i32,

    rng: StdRng,
    rand_gain: Uniform<i32>,
    rand_y: Uniform<i32>,
    rand_speed: Uniform<i32>,
    rand_layer: Uniform<u8>,
}

impl SparkleField {
    pub fn new(
        surface_w: usize,
        surface_h: usize,
        sprite_w: usize,
        sprite_h: usize,
        bg_frames: usize,
    ) -> Self {
        let seed = rand::rng().random();
        Self::with_seed(surface_w, surface_h, sprite_w, sprite_h, bg_frames, seed)
    }

    pub fn with_seed(
        surface_w: usize,
        surface_h: usize,
        sprite_w: usize,
        sprite_h: usize,
        bg_frames: usize,
        seed: u64,
    ) -> Self {
        let surface_w = surface_w as i32;
        let surface_h = (surface_h as i32).max(1);
        let sprite_w = sprite_w as i32;
        let sprite_h = sprite_h as i32;

        Self {
            sparkles: Vec::new(),
            spawn_counter: 0,
            surface_w,
            surface_h,
            sprite_w,
            sprite_h,
            bg_frames: bg_frames as i32,
            rng: StdRng::seed_from_u64(seed),
            rand_gain: Uniform::new(0, surface_h).expect("valid range"),
            rand_y: Uniform::new(-sprite_h, surface_h).expect("valid range"),
            rand_speed: Uniform::new_inclusive(10, 39).expect("valid range"),
            rand_layer: Uniform::new_inclusive(0, 1).expect("valid range"),
        }
    }

    /// One simulation tick: stochastic spawning, then movement, frame bounce
    /// and off-screen culling over the whole store in insertion order.
    ///
    /// The bounce condition is checked against the already advanced frame, so
    /// the animation overshoots by one step at each end before reversing.
    /// That stutter is part of the original look and is kept on purpose.
    pub fn update(&mut self) {
        self.spawn_counter += self.rand_gain.sample(&mut self.rng);
        while self.spawn_counter >= SPAWN_THRESHOLD {
            self.spawn();
            self.spawn_counter -= SPAWN_THRESHOLD;
        }

        let bg_frames = self.bg_frames;
        let sprite_w = self.sprite_w;
        self.sparkles.retain_mut(|s| {
            s.x -= s.speed;
            s.frame += s.frame_dir;
            if s.frame + 1 >= bg_frames || s.frame < 1 {
                s.frame_dir = -s.frame_dir;
            }
            !offscreen_left(s.x, sprite_w)
        });
    }

    fn spawn(&mut self) {
        self.sparkles.push(Sparkle {
            x: self.surface_w + SPAWN_MARGIN,
            y: self.rand_y.sample(&mut self.rng),
            frame: 0,
            frame_dir: 1,
            speed: self.rand_speed.sample(&mut self.rng),
            layer: self.rand_layer.sample(&mut self.rng),
        });
    }

    #[allow(dead_code)]
    pub fn spawn_counter(&self) -> i32 {
        self.spawn_counter
    }
}

/// True once a sparkle's footprint has fully cleared the left edge.
pub fn offscreen_left(x: i32, sprite_w: i32) -> bool {
    x < -sprite_w
}

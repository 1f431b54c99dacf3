// Copyright (c) 2026 nyansaver authors

use std::path::{Path, PathBuf};
use std::process;

use image::RgbaImage;

const LOC_BASE_PATH: &str = "res";
const OS_BASE_PATH: &str = "/usr/share/nyansaver";

/// Decoded resource set: cat frames, sparkle frames, optional music track.
pub struct ResourceSet {
    pub cat_frames: Vec<RgbaImage>,
    pub sparkle_frames: Vec<RgbaImage>,
    pub music: Option<PathBuf>,
}

/// Print a diagnostic and terminate. Resource errors are unrecoverable.
pub fn fatal(msg: &str) -> ! {
    eprintln!("{msg}");
    process::exit(1);
}

/// Load the named resource set, trying the local `res/` tree before the
/// system install location. Missing metadata, zero frame counts or any
/// missing frame are fatal; missing music only costs the sound.
pub fn load(set: &str) -> ResourceSet {
    let bases = [Path::new(LOC_BASE_PATH), Path::new(OS_BASE_PATH)];

    let Some(data_path) = locate(&bases, set, "data") else {
        fatal("Error opening resource data file");
    };
    let text = match std::fs::read_to_string(&data_path) {
        Ok(t) => t,
        Err(_) => fatal("Error opening resource data file"),
    };
    let Some((fg_count, bg_count)) = parse_counts(&text) else {
        fatal("Error reading resource data file.");
    };

    let cat_frames = load_frames(&bases, set, "fg", fg_count)
        .unwrap_or_else(|| fatal("Error loading foreground images."));
    let sparkle_frames = load_frames(&bases, set, "bg", bg_count)
        .unwrap_or_else(|| fatal("Error loading background images."));

    let music = locate(&bases, set, "music.ogg");

    ResourceSet {
        cat_frames,
        sparkle_frames,
        music,
    }
}

fn locate(bases: &[&Path], set: &str, file: &str) -> Option<PathBuf> {
    bases
        .iter()
        .map(|base| base.join(set).join(file))
        .find(|p| p.exists())
}

fn load_frames(bases: &[&Path], set: &str, prefix: &str, count: usize) -> Option<Vec<RgbaImage>> {
    let mut frames = Vec::with_capacity(count);
    for i in 0..count {
        let name = format!("{prefix}{i:02}.png");
        let path = locate(bases, set, &name)?;
        let img = image::open(&path).ok()?;
        frames.push(img.to_rgba8());
    }
    Some(frames)
}

/// The metadata file's first two integer lines are the foreground and
/// background frame counts. Either being absent, unparseable or zero makes
/// the set unusable.
fn parse_counts(text: &str) -> Option<(usize, usize)> {
    let mut lines = text.lines();
    let fg: usize = lines.next()?.trim().parse().ok()?;
    let bg: usize = lines.next()?.trim().parse().ok()?;
    if fg == 0 || bg == 0 {
        return None;
    }
    Some((fg, bg))
}

// Copyright (c) 2026 nyansaver authors

mod assets;
mod audio;
mod config;
mod field;
mod placement;
mod scene;
mod screen;
mod sprite;
mod surface;

use std::env;
use std::thread;
use std::time::{Duration, Instant};

use clap::builder::styling::{AnsiColor as ClapAnsiColor, Color as ClapColor};
use clap::builder::styling::{Effects as ClapEffects, Style as ClapStyle};
use clap::builder::Styles as ClapStyles;
use clap::{CommandFactory, FromArgMatches};

#[cfg(unix)]
use signal_hook::consts::{SIGHUP, SIGINT, SIGTERM};
#[cfg(unix)]
use signal_hook::iterator::Signals;

use crate::assets::fatal;
use crate::audio::Music;
use crate::config::{
    color_enabled_stdout, sanitize_argv, Args, CatSize, Config, DEFAULT_HEIGHT, DEFAULT_WIDTH,
};
use crate::field::SparkleField;
use crate::placement::Placement;
use crate::scene::{Scene, BG_COLOR};
use crate::screen::Screen;
use crate::surface::Surface;

const DEFAULT_PARAMS_USAGE: &str = "DEFAULT PARAMS USAGE:\n  nyansaver --fps 14 --resolution 800 600 --volume 128 --catsize small --data-set default";

const HELP_TEMPLATE_PLAIN: &str = "\
{before-help}{about-with-newline}
USAGE:
  {usage}

{all-args}{after-help}";

const HELP_TEMPLATE_COLOR: &str = "\
{before-help}{about-with-newline}
\x1b[1;36mUSAGE:\x1b[0m
  {usage}

{all-args}{after-help}";

/// How many warm-up simulation ticks run before the first visible frame, so
/// the screen starts already strewn with sparkles.
const PREPOPULATE_TICKS: u32 = 200;

fn build_info() -> &'static str {
    env!("NYANSAVER_BUILD")
}

fn clap_styles() -> ClapStyles {
    ClapStyles::styled()
        .header(
            ClapStyle::new()
                .effects(ClapEffects::BOLD)
                .fg_color(Some(ClapColor::Ansi(ClapAnsiColor::Cyan))),
        )
        .usage(
            ClapStyle::new()
                .effects(ClapEffects::BOLD)
                .fg_color(Some(ClapColor::Ansi(ClapAnsiColor::Green))),
        )
        .literal(ClapStyle::new().fg_color(Some(ClapColor::Ansi(ClapAnsiColor::Yellow))))
        .placeholder(ClapStyle::new().fg_color(Some(ClapColor::Ansi(ClapAnsiColor::Magenta))))
}

fn install_signal_handlers() {
    #[cfg(unix)]
    {
        if let Ok(mut signals) = Signals::new([SIGINT, SIGTERM, SIGHUP]) {
            thread::spawn(move || {
                if let Some(sig) = signals.forever().next() {
                    std::process::exit(128 + sig);
                }
            });
        }
    }

    #[cfg(windows)]
    {
        if let Err(e) = ctrlc::set_handler(|| {
            std::process::exit(130);
        }) {
            eprintln!("failed to install Ctrl-C handler: {}", e);
        }
    }
}

fn main() {
    install_signal_handlers();

    let mut cmd = Args::command();
    cmd = cmd.styles(clap_styles());
    cmd = cmd.before_help(DEFAULT_PARAMS_USAGE);
    let help_template = if color_enabled_stdout() {
        HELP_TEMPLATE_COLOR
    } else {
        HELP_TEMPLATE_PLAIN
    };
    cmd = cmd.help_template(help_template);
    cmd.build();

    let argv = sanitize_argv(env::args_os().collect());
    let matches = cmd.get_matches_from(argv);
    let args = Args::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    if args.version {
        println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        return;
    }

    if args.info {
        println!("Version: v{}", env!("CARGO_PKG_VERSION"));
        println!("Build: {}", build_info());
        let sha = env!("NYANSAVER_GIT_SHA");
        if !sha.is_empty() {
            println!("Commit: {sha}");
        }
        println!("License: {}", env!("CARGO_PKG_LICENSE"));
        println!("Source: {}", env!("CARGO_PKG_REPOSITORY"));
        return;
    }

    let config = Config::resolve(&args);

    let resources = assets::load(&config.data_set);

    let monitors = placement::detect_monitors();
    if monitors.is_none() {
        eprintln!("Multi-monitor layout unavailable; using a single placement region.");
    }

    // A zero dimension historically meant "native resolution"; without a
    // topology query the defaults stand in for it.
    let width = (if config.width == 0 { DEFAULT_WIDTH } else { config.width }) as usize;
    let height = (if config.height == 0 { DEFAULT_HEIGHT } else { config.height }) as usize;

    let placement = Placement::select(monitors, width as u32, height as u32);

    let sparkle_set = sprite::sprite_set(&resources.sparkle_frames);
    let cat_set = match config.catsize {
        CatSize::Full => {
            let target = (placement.min_width() as f32 * 0.9) as u32;
            sprite::stretched_set(&resources.cat_frames, target)
        }
        CatSize::Small => sprite::sprite_set(&resources.cat_frames),
    };

    // The loader guarantees both sets are non-empty.
    let cats = placement.cat_anchors(
        cat_set[0].width as u32,
        cat_set[0].height as u32,
        config.catsize == CatSize::Full,
    );
    let field = SparkleField::new(
        width,
        height,
        sparkle_set[0].width,
        sparkle_set[0].height,
        sparkle_set.len(),
    );

    let mut scene = Scene {
        cats,
        field,
        cat_set,
        sparkle_set,
        curr_frame: 0,
    };
    let mut surface = Surface::new(width, height, BG_COLOR);

    let mut screen = match Screen::new(
        "nyansaver",
        width,
        height,
        config.fullscreen,
        config.show_cursor,
    ) {
        Ok(s) => s,
        Err(e) => fatal(&format!("Unable to create window: {e}")),
    };

    let _music = if config.sound {
        resources
            .music
            .as_deref()
            .and_then(|p| Music::start(p, config.volume))
    } else {
        None
    };

    // First present drops any stale input and fixes the pointer baseline so
    // old motion does not end the show on tick one.
    if let Err(e) = screen.present(&surface) {
        fatal(&format!("Unable to present window: {e}"));
    }
    let _ = screen.interrupted();

    for _ in 0..PREPOPULATE_TICKS {
        scene.field.update();
    }

    run(config.fps, &mut scene, &mut surface, &mut screen);
}

/// The fixed-rate render loop. Per tick: erase last frame's footprints,
/// advance the sparkle simulation, redraw, poll input, present, advance the
/// cat frame, then sleep whatever is left of the frame budget. A slow tick
/// just starts the next one late; there is no catch-up.
fn run(fps: u32, scene: &mut Scene, surface: &mut Surface, screen: &mut Screen) {
    let budget = frame_budget(fps);
    let mut running = true;

    while running {
        let tick_start = Instant::now();

        scene.erase(surface);
        scene.field.update();
        scene.draw_sparkles(surface);
        scene.draw_cats(surface);

        if screen.interrupted() {
            running = false;
        }

        if let Err(e) = screen.present(surface) {
            eprintln!("Window update failed: {e}");
            return;
        }

        scene.advance_cat_frame();

        let remaining = pace_remaining(tick_start.elapsed(), budget);
        if !remaining.is_zero() {
            thread::sleep(remaining);
        }
    }
}

/// Frame budget in whole milliseconds, 1000/FPS with integer division.
fn frame_budget(fps: u32) -> Duration {
    Duration::from_millis(u64::from(1000 / fps.max(1)))
}

fn pace_remaining(elapsed: Duration, budget: Duration) -> Duration {
    budget.saturating_sub(elapsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_budget_uses_integer_milliseconds() {
        assert_eq!(frame_budget(14), Duration::from_millis(71));
        assert_eq!(frame_budget(60), Duration::from_millis(16));
        assert_eq!(frame_budget(1), Duration::from_millis(1000));
    }

    #[test]
    fn fast_tick_sleeps_the_leftover_budget() {
        let left = pace_remaining(Duration::from_millis(10), frame_budget(14));
        assert_eq!(left, Duration::from_millis(61));
    }

    #[test]
    fn slow_tick_does_not_sleep() {
        let left = pace_remaining(Duration::from_millis(90), frame_budget(14));
        assert_eq!(left, Duration::ZERO);
    }
}

// Copyright (c) 2026 nyansaver authors

use std::ffi::OsString;
use std::io::IsTerminal;

use clap::Parser;

pub const DEFAULT_FPS: u32 = 14;
pub const DEFAULT_WIDTH: u32 = 800;
pub const DEFAULT_HEIGHT: u32 = 600;
pub const DEFAULT_VOLUME: i32 = 128;

pub fn color_enabled_stdout() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if matches!(std::env::var("CLICOLOR").ok().as_deref(), Some("0")) {
        return false;
    }
    std::io::stdout().is_terminal()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CatSize {
    Small,
    Full,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Backend {
    Hardware,
    Software,
}

#[derive(Parser, Debug, Clone)]
#[command(name = "nyansaver", version, disable_version_flag = true)]
pub struct Args {
    #[arg(
        short = 'f',
        long = "fullscreen",
        help_heading = "DISPLAY",
        help = "Enable fullscreen mode (default)"
    )]
    pub fullscreen: bool,

    #[arg(
        long = "nofullscreen",
        help_heading = "DISPLAY",
        help = "Disable fullscreen mode (shorthand: -nf)"
    )]
    pub nofullscreen: bool,

    #[arg(
        short = 'r',
        long = "resolution",
        num_args = 2,
        value_names = ["WIDTH", "HEIGHT"],
        help_heading = "DISPLAY",
        help = "Screen resolution (0 0 for full resolution; 800 600 default)"
    )]
    pub resolution: Option<Vec<String>>,

    #[arg(
        long = "fps",
        default_value = "14",
        help_heading = "DISPLAY",
        help = "Target frame rate (min 1 max 240; 14 default)"
    )]
    pub fps: String,

    #[arg(
        short = 'c',
        long = "catsize",
        default_value = "small",
        help_heading = "DISPLAY",
        help = "Cat size, either 'small' or 'full'. 'full' not officially supported"
    )]
    pub catsize: String,

    #[arg(
        long = "nocursor",
        help_heading = "DISPLAY",
        help = "Don't show the cursor (default; shorthand: -nc)"
    )]
    pub nocursor: bool,

    #[arg(
        long = "showcursor",
        visible_alias = "cursor",
        help_heading = "DISPLAY",
        help = "Show the cursor (shorthand: -sc)"
    )]
    pub showcursor: bool,

    #[arg(
        long = "hardware",
        help_heading = "DISPLAY",
        help = "Prefer hardware presentation (default; shorthand: -hw)"
    )]
    pub hardware: bool,

    #[arg(
        long = "software",
        help_heading = "DISPLAY",
        help = "Prefer software presentation (shorthand: -sw)"
    )]
    pub software: bool,

    #[arg(
        long = "nosound",
        help_heading = "SOUND",
        help = "Don't play sound (shorthand: -ns)"
    )]
    pub nosound: bool,

    #[arg(
        short = 'v',
        long = "volume",
        default_value = "128",
        help_heading = "SOUND",
        help = "Music volume, from 0 to 128"
    )]
    pub volume: String,

    #[arg(
        short = 'd',
        long = "data-set",
        default_value = "default",
        help_heading = "RESOURCES",
        help = "Use an alternate data set ('default' and 'freedom' ship with the program)"
    )]
    pub data_set: String,

    #[arg(
        long = "info",
        short = 'i',
        help_heading = "HELP",
        help = "Print version info and exit"
    )]
    pub info: bool,

    #[arg(
        long = "version",
        help_heading = "HELP",
        help = "Print version and exit"
    )]
    pub version: bool,
}

/// Resolved runtime configuration, after lenient validation. Invalid values
/// warn and fall back instead of aborting.
#[derive(Clone, Debug)]
pub struct Config {
    pub fps: u32,
    pub width: u32,
    pub height: u32,
    pub fullscreen: bool,
    pub catsize: CatSize,
    pub show_cursor: bool,
    pub sound: bool,
    pub volume: i32,
    pub data_set: String,
    pub backend: Backend,
}

impl Config {
    pub fn resolve(args: &Args) -> Self {
        let mut sound = !args.nosound;

        let volume = match args.volume.trim().parse::<i32>() {
            Ok(v) if (0..=128).contains(&v) => v,
            _ => {
                eprintln!("Arguments for Volume are not valid. Disabling sound.");
                sound = false;
                DEFAULT_VOLUME
            }
        };

        let (mut width, mut height) = (DEFAULT_WIDTH, DEFAULT_HEIGHT);
        if let Some(dims) = &args.resolution {
            match parse_resolution(dims) {
                Some((w, h)) => {
                    width = w;
                    height = h;
                }
                None => {
                    eprintln!("Arguments do not appear to be valid screen sizes. Defaulting.");
                }
            }
        }

        let fps = match args.fps.trim().parse::<u32>() {
            Ok(v) if (1..=240).contains(&v) => v,
            _ => {
                eprintln!("Argument for fps is not valid. Defaulting.");
                DEFAULT_FPS
            }
        };

        let catsize = match args.catsize.trim() {
            "full" => CatSize::Full,
            "small" => CatSize::Small,
            other => {
                eprintln!(
                    "Unrecognised scaling option: {other} - please select either 'full' or 'small' cat size."
                );
                CatSize::Small
            }
        };

        let backend = if args.software && !args.hardware {
            Backend::Software
        } else {
            Backend::Hardware
        };

        Config {
            fps,
            width,
            height,
            fullscreen: args.fullscreen || !args.nofullscreen,
            catsize,
            show_cursor: args.showcursor && !args.nocursor,
            sound,
            volume,
            data_set: args.data_set.clone(),
            backend,
        }
    }
}

fn parse_resolution(dims: &[String]) -> Option<(u32, u32)> {
    if dims.len() != 2 {
        return None;
    }
    let w: u32 = dims[0].trim().parse().ok()?;
    let h: u32 = dims[1].trim().parse().ok()?;
    if w < 10000 && h < 5000 {
        Some((w, h))
    } else {
        None
    }
}

/// Pre-parse argv pass: rewrite the historical multi-character short flags to
/// their long forms and drop anything unrecognised with a warning, so a stray
/// flag never kills a screensaver.
pub fn sanitize_argv(argv: Vec<OsString>) -> Vec<OsString> {
    let mut out: Vec<OsString> = Vec::with_capacity(argv.len());
    let mut it = argv.into_iter();
    if let Some(exe) = it.next() {
        out.push(exe);
    }

    let rest: Vec<String> = it.map(|a| a.to_string_lossy().into_owned()).collect();
    let mut i = 0;
    while i < rest.len() {
        let arg = rewrite_alias(&rest[i]);
        let name = arg.split('=').next().unwrap_or("").to_owned();
        let has_inline_value = arg.contains('=');

        if value_count(&name) > 0 {
            if has_inline_value {
                out.push(arg.into());
                i += 1;
            } else if i + value_count(&name) < rest.len() {
                out.push(arg.into());
                for v in &rest[i + 1..=i + value_count(&name)] {
                    out.push(v.clone().into());
                }
                i += value_count(&name) + 1;
            } else {
                eprintln!("Unrecognised option: {}", rest[i]);
                i += 1;
            }
            continue;
        }

        if is_known_flag(&name) && !has_inline_value {
            out.push(arg.into());
        } else {
            eprintln!("Unrecognised option: {}", rest[i]);
        }
        i += 1;
    }
    out
}

fn rewrite_alias(arg: &str) -> String {
    match arg {
        "-nf" => "--nofullscreen",
        "-nc" => "--nocursor",
        "-sc" => "--showcursor",
        "-ns" => "--nosound",
        "-hw" => "--hardware",
        "-sw" => "--software",
        other => other,
    }
    .to_string()
}

fn value_count(name: &str) -> usize {
    match name {
        "-r" | "--resolution" => 2,
        "--fps" | "-c" | "--catsize" | "-v" | "--volume" | "-d" | "--data-set" => 1,
        _ => 0,
    }
}

fn is_known_flag(name: &str) -> bool {
    matches!(
        name,
        "-f" | "--fullscreen"
            | "--nofullscreen"
            | "--nocursor"
            | "--showcursor"
            | "--cursor"
            | "--hardware"
            | "--software"
            | "--nosound"
            | "-h"
            | "--help"
            | "-i"
            | "--info"
            | "--version"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_args() -> Args {
        Args {
            fullscreen: false,
            nofullscreen: false,
            resolution: None,
            fps: "14".into(),
            catsize: "small".into(),
            nocursor: false,
            showcursor: false,
            hardware: false,
            software: false,
            nosound: false,
            volume: "128".into(),
            data_set: "default".into(),
            info: false,
            version: false,
        }
    }

    fn argv(parts: &[&str]) -> Vec<OsString> {
        std::iter::once("nyansaver")
            .chain(parts.iter().copied())
            .map(OsString::from)
            .collect()
    }

    fn strings(argv: Vec<OsString>) -> Vec<String> {
        argv.iter()
            .map(|s| s.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn out_of_range_volume_disables_sound_and_keeps_resolution() {
        let mut args = base_args();
        args.volume = "200".into();
        let cfg = Config::resolve(&args);
        assert!(!cfg.sound);
        assert_eq!((cfg.width, cfg.height), (800, 600));
    }

    #[test]
    fn malformed_resolution_warns_and_keeps_default() {
        let mut args = base_args();
        args.resolution = Some(vec!["potato".into(), "600".into()]);
        let cfg = Config::resolve(&args);
        assert_eq!((cfg.width, cfg.height), (800, 600));

        args.resolution = Some(vec!["12000".into(), "600".into()]);
        let cfg = Config::resolve(&args);
        assert_eq!((cfg.width, cfg.height), (800, 600));
    }

    #[test]
    fn valid_resolution_is_applied() {
        let mut args = base_args();
        args.resolution = Some(vec!["1024".into(), "768".into()]);
        let cfg = Config::resolve(&args);
        assert_eq!((cfg.width, cfg.height), (1024, 768));
    }

    #[test]
    fn unknown_catsize_keyword_keeps_small() {
        let mut args = base_args();
        args.catsize = "enormous".into();
        assert_eq!(Config::resolve(&args).catsize, CatSize::Small);

        args.catsize = "full".into();
        assert_eq!(Config::resolve(&args).catsize, CatSize::Full);
    }

    #[test]
    fn bad_fps_falls_back_to_default() {
        let mut args = base_args();
        args.fps = "0".into();
        assert_eq!(Config::resolve(&args).fps, DEFAULT_FPS);
        args.fps = "lots".into();
        assert_eq!(Config::resolve(&args).fps, DEFAULT_FPS);
        args.fps = "30".into();
        assert_eq!(Config::resolve(&args).fps, 30);
    }

    #[test]
    fn nofullscreen_wins_over_default_fullscreen() {
        assert!(Config::resolve(&base_args()).fullscreen);
        let mut args = base_args();
        args.nofullscreen = true;
        assert!(!Config::resolve(&args).fullscreen);
    }

    #[test]
    fn sanitize_rewrites_legacy_shorthands() {
        let out = strings(sanitize_argv(argv(&["-nf", "-ns", "-hw"])));
        assert_eq!(
            out,
            vec!["nyansaver", "--nofullscreen", "--nosound", "--hardware"]
        );
    }

    #[test]
    fn sanitize_drops_unknown_flags_but_keeps_valued_args() {
        let out = strings(sanitize_argv(argv(&[
            "--sparkle-everything",
            "-v",
            "64",
            "-r",
            "640",
            "480",
        ])));
        assert_eq!(out, vec!["nyansaver", "-v", "64", "-r", "640", "480"]);
    }

    #[test]
    fn sanitize_drops_valued_flag_missing_its_value() {
        let out = sanitize_argv(argv(&["-v"]));
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn sanitize_keeps_inline_value_form() {
        let out = strings(sanitize_argv(argv(&["--fps=30"])));
        assert_eq!(out, vec!["nyansaver", "--fps=30"]);
    }

    #[test]
    fn parsed_args_round_trip_through_clap() {
        let out = sanitize_argv(argv(&["-nf", "-v", "64", "-c", "full", "-d", "freedom"]));
        let args = Args::try_parse_from(out).unwrap();
        let cfg = Config::resolve(&args);
        assert!(!cfg.fullscreen);
        assert!(cfg.sound);
        assert_eq!(cfg.volume, 64);
        assert_eq!(cfg.catsize, CatSize::Full);
        assert_eq!(cfg.data_set, "freedom");
    }
}

// Copyright (c) 2026 nyansaver authors

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use rodio::{Decoder, OutputStream, Sink, Source};

/// Looping background music. Holding the value keeps the output stream and
/// the sink alive; dropping it stops playback at process teardown.
pub struct Music {
    _stream: OutputStream,
    _sink: Sink,
}

impl Music {
    /// Start the track on an infinite repeat at the given 0-128 volume.
    /// Every failure here is recoverable: warn once and run silent.
    pub fn start(path: &Path, volume: i32) -> Option<Self> {
        let (stream, handle) = match OutputStream::try_default() {
            Ok(v) => v,
            Err(e) => {
                eprintln!("Unable to open audio output: {e}");
                return None;
            }
        };
        let sink = match Sink::try_new(&handle) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Unable to open audio output: {e}");
                return None;
            }
        };
        let file = match File::open(path) {
            Ok(f) => f,
            Err(e) => {
                eprintln!("Unable to load Ogg file: {e}");
                return None;
            }
        };
        let source = match Decoder::new(BufReader::new(file)) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Unable to load Ogg file: {e}");
                return None;
            }
        };

        sink.set_volume(volume.clamp(0, 128) as f32 / 128.0);
        sink.append(source.repeat_infinite());

        Some(Self {
            _stream: stream,
            _sink: sink,
        })
    }
}

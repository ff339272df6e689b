//! Audio output: the `PlaybackBackend` seam and its `rodio` implementation.

use std::io::Cursor;
use std::time::Duration;

use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink};

use crate::error::{Error, Result};

pub trait PlaybackBackend {
    /// Decode `bytes` and keep them ready, paused. Replaces any loaded clip.
    fn load(&mut self, bytes: Vec<u8>) -> Result<()>;
    fn play(&mut self);
    fn stop(&mut self);
    /// Position inside the loaded clip.
    fn elapsed(&self) -> Duration;
    /// True once the loaded clip has played to its end (or nothing is loaded).
    fn is_finished(&self) -> bool;
}

impl<B: PlaybackBackend + ?Sized> PlaybackBackend for Box<B> {
    fn load(&mut self, bytes: Vec<u8>) -> Result<()> {
        (**self).load(bytes)
    }

    fn play(&mut self) {
        (**self).play()
    }

    fn stop(&mut self) {
        (**self).stop()
    }

    fn elapsed(&self) -> Duration {
        (**self).elapsed()
    }

    fn is_finished(&self) -> bool {
        (**self).is_finished()
    }
}

pub struct RodioBackend {
    stream: OutputStream,
    sink: Option<Sink>,
    volume: f32,
}

impl RodioBackend {
    pub fn open(volume: f32) -> Result<Self> {
        let mut stream = OutputStreamBuilder::open_default_stream()
            .map_err(|e| Error::NoOutputDevice(e.to_string()))?;
        // rodio logs to stderr when OutputStream is dropped, which tears the TUI.
        stream.log_on_drop(false);
        Ok(Self {
            stream,
            sink: None,
            volume,
        })
    }
}

impl PlaybackBackend for RodioBackend {
    fn load(&mut self, bytes: Vec<u8>) -> Result<()> {
        let source =
            Decoder::new(Cursor::new(bytes)).map_err(|e| Error::UnsupportedFormat(e.to_string()))?;

        self.stop();
        let sink = Sink::connect_new(self.stream.mixer());
        sink.set_volume(self.volume);
        sink.append(source);
        sink.pause();
        self.sink = Some(sink);
        Ok(())
    }

    fn play(&mut self) {
        if let Some(s) = self.sink.as_ref() {
            s.play();
        }
    }

    fn stop(&mut self) {
        if let Some(s) = self.sink.take() {
            s.stop();
        }
    }

    fn elapsed(&self) -> Duration {
        self.sink.as_ref().map_or(Duration::ZERO, Sink::get_pos)
    }

    fn is_finished(&self) -> bool {
        self.sink.as_ref().is_none_or(Sink::empty)
    }
}

/// Stand-in used when no output device could be opened: every load fails,
/// so the play key does nothing but report why.
pub struct MutedBackend {
    reason: String,
}

impl MutedBackend {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl PlaybackBackend for MutedBackend {
    fn load(&mut self, _bytes: Vec<u8>) -> Result<()> {
        Err(Error::NoOutputDevice(self.reason.clone()))
    }

    fn play(&mut self) {}

    fn stop(&mut self) {}

    fn elapsed(&self) -> Duration {
        Duration::ZERO
    }

    fn is_finished(&self) -> bool {
        true
    }
}

/// Open the default output, degrading to a `MutedBackend` when there is none.
pub fn open_backend(volume: f32) -> Box<dyn PlaybackBackend> {
    match RodioBackend::open(volume) {
        Ok(backend) => Box::new(backend),
        Err(e) => {
            log::error!("{e}; previews are muted");
            Box::new(MutedBackend::new(e.to_string()))
        }
    }
}

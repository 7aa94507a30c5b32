use std::io::{self, Write};

use crate::emulator::display::{Display, SCREEN_WIDTH};

/// Represents an output device that completed frames are handed to.
pub trait EmulatorOutput {
    fn present(&mut self, frame: &Display);
}

/// A simple output device that keeps the latest frame.
pub struct DummyOutput {
    frames: usize,
    last: Option<Display>,
}

impl DummyOutput {
    pub fn new() -> DummyOutput {
        DummyOutput {
            frames: 0,
            last: None,
        }
    }

    /// How many frames have been presented.
    pub fn frames(&self) -> usize {
        self.frames
    }

    pub fn last_frame(&self) -> Option<&Display> {
        self.last.as_ref()
    }
}

impl Default for DummyOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl EmulatorOutput for DummyOutput {
    fn present(&mut self, frame: &Display) {
        self.frames += 1;
        self.last = Some(frame.clone());
    }
}

/// Writes every frame as text, `#` for a set pixel.
pub struct TextOutput<W: Write> {
    writer: W,
}

impl<W: Write> TextOutput<W> {
    pub fn new(writer: W) -> TextOutput<W> {
        TextOutput { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_frame(&mut self, frame: &Display) -> io::Result<()> {
        write!(self.writer, "{}", frame)?;
        writeln!(self.writer, "{}", "-".repeat(SCREEN_WIDTH))?;
        self.writer.flush()
    }
}

impl<W: Write> EmulatorOutput for TextOutput<W> {
    fn present(&mut self, frame: &Display) {
        if let Err(e) = self.write_frame(frame) {
            log::warn!("Could not write frame: {}", e);
        }
    }
}

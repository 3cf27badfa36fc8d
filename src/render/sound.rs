use std::io::{self, Stderr, Write};

const BELL: &[u8] = b"\x07";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    /// One short ring
    Bite,
    /// Two rings
    Crash,
}

impl SoundCue {
    fn rings(&self) -> usize {
        match self {
            SoundCue::Bite => 1,
            SoundCue::Crash => 2,
        }
    }
}

/// Plays cues on the terminal bell
pub struct Chime<W = Stderr> {
    enabled: bool,
    sink: W,
}

impl Chime<Stderr> {
    pub fn new(enabled: bool) -> Self {
        Self::with_sink(enabled, io::stderr())
    }
}

impl<W: Write> Chime<W> {
    pub fn with_sink(enabled: bool, sink: W) -> Self {
        Self { enabled, sink }
    }

    pub fn play(&mut self, cue: SoundCue) -> io::Result<()> {
        if !self.enabled {
            return Ok(());
        }
        for _ in 0..cue.rings() {
            self.sink.write_all(BELL)?;
        }
        self.sink.flush()
    }

    pub fn sink(&self) -> &W {
        &self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cues_ring_the_bell() {
        let mut chime = Chime::with_sink(true, Vec::new());
        chime.play(SoundCue::Bite).unwrap();
        assert_eq!(chime.sink(), b"\x07");

        chime.play(SoundCue::Crash).unwrap();
        assert_eq!(chime.sink(), b"\x07\x07\x07");
    }

    #[test]
    fn test_muted_chime_is_silent() {
        let mut chime = Chime::with_sink(false, Vec::new());
        chime.play(SoundCue::Crash).unwrap();
        assert!(chime.sink().is_empty());
    }
}

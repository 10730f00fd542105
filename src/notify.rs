//! Change alerts.
//!
//! The portable alert is the terminal bell. On macOS a named system
//! sound can be played instead, and whole-body watches additionally log
//! a unified diff of the wrapped bodies.

use std::fmt;
use std::io::{self, Write};
use std::process::{Command, Stdio};
use std::str::FromStr;

use similar::TextDiff;
use tracing::debug;

use crate::error::Error;

/// Wrap width for whole-body diffs. Response bodies are often a single
/// long line; wrapping keeps hunks readable.
const WRAP_WIDTH: usize = 70;

/// A named sound under `/System/Library/Sounds`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemSound {
    Basso,
    Blow,
    Bottle,
    Frog,
    Funk,
    Glass,
    Hero,
    Morse,
    Ping,
    Pop,
    Purr,
    Sosumi,
    Submarine,
    Tink,
}

impl SystemSound {
    fn file_stem(self) -> &'static str {
        match self {
            Self::Basso => "Basso",
            Self::Blow => "Blow",
            Self::Bottle => "Bottle",
            Self::Frog => "Frog",
            Self::Funk => "Funk",
            Self::Glass => "Glass",
            Self::Hero => "Hero",
            Self::Morse => "Morse",
            Self::Ping => "Ping",
            Self::Pop => "Pop",
            Self::Purr => "Purr",
            Self::Sosumi => "Sosumi",
            Self::Submarine => "Submarine",
            Self::Tink => "Tink",
        }
    }

    /// Plays the sound through `afplay`, best effort. Playback problems
    /// are logged at debug level and never surface as errors.
    pub fn play(self) {
        let path = format!("/System/Library/Sounds/{}.aiff", self.file_stem());
        let outcome = Command::new("afplay")
            .arg(&path)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();
        match outcome {
            Ok(status) if status.success() => {}
            Ok(status) => debug!("afplay {path} exited with {status}"),
            Err(err) => debug!("afplay unavailable: {err}"),
        }
    }
}

impl FromStr for SystemSound {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.to_ascii_lowercase().as_str() {
            "basso" => Ok(Self::Basso),
            "blow" => Ok(Self::Blow),
            "bottle" => Ok(Self::Bottle),
            "frog" => Ok(Self::Frog),
            "funk" => Ok(Self::Funk),
            "glass" => Ok(Self::Glass),
            "hero" => Ok(Self::Hero),
            "morse" => Ok(Self::Morse),
            "ping" => Ok(Self::Ping),
            "pop" => Ok(Self::Pop),
            "purr" => Ok(Self::Purr),
            "sosumi" => Ok(Self::Sosumi),
            "submarine" => Ok(Self::Submarine),
            "tink" => Ok(Self::Tink),
            other => Err(Error::UnknownSound(other.to_string())),
        }
    }
}

impl fmt::Display for SystemSound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.file_stem().to_ascii_lowercase())
    }
}

/// Emits the change alert: a named sound when configured, otherwise the
/// terminal bell.
#[derive(Debug, Default)]
pub struct Notifier {
    sound: Option<SystemSound>,
}

impl Notifier {
    #[must_use]
    pub fn new(sound: Option<SystemSound>) -> Self {
        Self { sound }
    }

    /// Signals that the watched value changed.
    pub fn alert(&self) {
        match self.sound {
            Some(sound) => sound.play(),
            None => bell(),
        }
    }
}

fn bell() {
    print!("\x07");
    io::stdout().flush().ok();
}

/// Renders a unified diff between two bodies, each wrapped to
/// [`WRAP_WIDTH`] columns, with one line of context per hunk.
#[must_use]
pub fn render_diff(previous: &str, current: &str) -> String {
    let previous = wrap(previous);
    let current = wrap(current);
    let diff = TextDiff::from_lines(previous.as_str(), current.as_str());
    diff.unified_diff()
        .context_radius(1)
        .header("previous", "current")
        .to_string()
}

fn wrap(text: &str) -> String {
    textwrap::wrap(text, WRAP_WIDTH).join("\n")
}

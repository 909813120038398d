//! Optional text-to-speech binding
//!
//! Coach replies can be spoken aloud through a local synthesizer binary
//! (`say` on macOS, `espeak`/`espeak-ng` elsewhere). When no synthesizer
//! is installed the feature degrades to a one-time notice; it never
//! fails a command.

use std::process::{Command, Stdio};

/// Candidate synthesizer binaries, tried in order
const SYNTHESIZERS: &[&str] = &["say", "espeak-ng", "espeak"];

/// Handle to a detected speech synthesizer
#[derive(Debug, Clone)]
pub struct Speech {
    program: &'static str,
}

impl Speech {
    /// Detect an available synthesizer on PATH, if any
    pub fn detect() -> Option<Self> {
        SYNTHESIZERS
            .iter()
            .find(|program| {
                Command::new(**program)
                    .arg("--version")
                    .stdout(Stdio::null())
                    .stderr(Stdio::null())
                    .status()
                    .map(|s| s.success())
                    .unwrap_or(false)
            })
            .map(|program| Self { program })
    }

    /// Speak the text; failures are swallowed since speech is best-effort
    pub fn speak(&self, text: &str) {
        let _ = Command::new(self.program)
            .arg(text)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_never_panics() {
        // Detection depends on the host; either outcome is valid.
        let _ = Speech::detect();
    }
}

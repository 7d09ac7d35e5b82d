// Orca Testkit - Bare-Metal Test Image Support
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

//! Runner side of the UART protocol: free-form text terminated by EOT.

use orca_harness::SENTINEL;
use serde::Serialize;

const PASS_MARKER: &str = "Test passed!";
const FAIL_MARKER: &str = "Test failed with ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Pass,
    Fail { errors: u32 },
    /// The sentinel arrived but no verdict line preceded it.
    Unknown,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CollectError {
    #[error("Capture ended without the EOT sentinel ({0} bytes received)")]
    MissingSentinel(usize),
    #[error("{0} bytes received after the EOT sentinel")]
    TrailingBytes(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub outcome: Outcome,
    /// Everything received before the sentinel.
    pub text: String,
}

#[derive(Debug, Default)]
pub struct Collector {
    text: Vec<u8>,
    complete: bool,
    trailing: usize,
}

impl Collector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one byte. Returns true once the sentinel has been seen.
    pub fn push(&mut self, byte: u8) -> bool {
        if self.complete {
            self.trailing += 1;
        } else if byte == SENTINEL {
            tracing::debug!("Sentinel after {} bytes", self.text.len());
            self.complete = true;
        } else {
            self.text.push(byte);
        }
        self.complete
    }

    pub fn extend(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.push(byte);
        }
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.text).into_owned()
    }

    pub fn finish(self) -> Result<Report, CollectError> {
        if !self.complete {
            return Err(CollectError::MissingSentinel(self.text.len()));
        }
        if self.trailing > 0 {
            return Err(CollectError::TrailingBytes(self.trailing));
        }
        let text = self.text();
        Ok(Report {
            outcome: classify(&text),
            text,
        })
    }
}

/// Classifies by the last verdict line in `text`.
pub fn classify(text: &str) -> Outcome {
    let pass = text.rfind(PASS_MARKER);
    let fail = text.rfind(FAIL_MARKER);

    match (pass, fail) {
        (Some(p), Some(f)) if p > f => Outcome::Pass,
        (Some(_), None) => Outcome::Pass,
        (_, Some(f)) => {
            let rest = &text[f + FAIL_MARKER.len()..];
            let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
            match digits.parse() {
                Ok(errors) => Outcome::Fail { errors },
                Err(_) => Outcome::Unknown,
            }
        }
        (None, None) => Outcome::Unknown,
    }
}

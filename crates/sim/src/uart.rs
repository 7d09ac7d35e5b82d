// Orca Testkit - Bare-Metal Test Image Support
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use orca_uart::TxPort;
use std::io::{self, Write};
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

/// UART mock that reports busy for a fixed number of polls before each byte.
#[derive(Debug, Default)]
pub struct SimUart {
    busy_polls: u32,
    busy_remaining: AtomicU32,
    polls: AtomicU64,
    busy_answers: AtomicU64,
    writes: u64,
    writes_while_busy: u64,
    sink: Option<Arc<Mutex<Vec<u8>>>>,
    echo_stdout: bool,
}

impl SimUart {
    pub fn new() -> Self {
        Self::with_busy_polls(0)
    }

    pub fn with_busy_polls(busy_polls: u32) -> Self {
        Self {
            busy_polls,
            busy_remaining: AtomicU32::new(busy_polls),
            echo_stdout: true,
            ..Self::default()
        }
    }

    pub fn set_sink(&mut self, sink: Option<Arc<Mutex<Vec<u8>>>>, echo_stdout: bool) {
        self.sink = sink;
        self.echo_stdout = echo_stdout;
    }

    pub fn polls(&self) -> u64 {
        self.polls.load(Ordering::Relaxed)
    }

    /// Polls answered with "busy".
    pub fn busy_answers(&self) -> u64 {
        self.busy_answers.load(Ordering::Relaxed)
    }

    pub fn writes(&self) -> u64 {
        self.writes
    }

    /// Data writes that arrived while the port still reported busy.
    pub fn writes_while_busy(&self) -> u64 {
        self.writes_while_busy
    }

    fn push_tx(&mut self, value: u8) {
        if let Some(sink) = &self.sink {
            if let Ok(mut guard) = sink.lock() {
                guard.push(value);
            }
        }

        if self.echo_stdout {
            #[allow(unused_must_use)]
            {
                print!("{}", value as char);
                io::stdout().flush();
            }
        }
    }

    pub fn snapshot(&self) -> serde_json::Value {
        serde_json::json!({
            "busy_polls": self.busy_polls,
            "busy_remaining": self.busy_remaining.load(Ordering::Relaxed),
            "polls": self.polls(),
            "busy_answers": self.busy_answers(),
            "writes": self.writes,
            "writes_while_busy": self.writes_while_busy,
        })
    }
}

impl TxPort for SimUart {
    fn tx_busy(&self) -> bool {
        self.polls.fetch_add(1, Ordering::Relaxed);
        let busy = self
            .busy_remaining
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |n| n.checked_sub(1))
            .is_ok();
        if busy {
            self.busy_answers.fetch_add(1, Ordering::Relaxed);
        }
        busy
    }

    fn write_data(&mut self, value: u8) {
        if self.busy_remaining.load(Ordering::Relaxed) != 0 {
            tracing::warn!("UART write of {:#04x} while busy", value);
            self.writes_while_busy += 1;
        }
        tracing::trace!("UART TX {:#04x}", value);
        self.writes += 1;
        self.push_tx(value);
        self.busy_remaining.store(self.busy_polls, Ordering::Relaxed);
    }
}

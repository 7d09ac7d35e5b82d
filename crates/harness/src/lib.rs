// Orca Testkit - Bare-Metal Test Image Support
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

//! End-of-test reporting.
//!
//! A run ends by printing a message, emitting [`SENTINEL`] once, and then
//! idling forever. The test runner on the other end of the UART keys off the
//! sentinel.

#![cfg_attr(not(test), no_std)]

pub mod selftest;

use core::fmt::Write;
use orca_uart::ByteSink;

/// ASCII EOT, the completion marker for an external collector.
pub const SENTINEL: u8 = 0x04;

pub const PASS_MESSAGE: &str = "\r\nTest passed!\r\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    Fail { errors: u32 },
}

impl Verdict {
    pub fn from_errors(errors: u32) -> Self {
        if errors == 0 {
            Verdict::Pass
        } else {
            Verdict::Fail { errors }
        }
    }
}

/// One iteration of the terminal loop.
pub trait Idle {
    fn idle(&mut self);
}

/// Plain busy loop.
#[derive(Debug, Default, Clone, Copy)]
pub struct Spin;

impl Idle for Spin {
    #[inline(always)]
    fn idle(&mut self) {
        core::hint::spin_loop();
    }
}

/// Prints the message for `verdict` followed by the sentinel, and returns.
pub fn report<S: ByteSink + Write + ?Sized>(sink: &mut S, verdict: Verdict) {
    match verdict {
        Verdict::Pass => sink.send_str(PASS_MESSAGE),
        Verdict::Fail { errors } => {
            let plural = if errors == 1 { "" } else { "s" };
            // Sinks never fail; fmt errors can only come from formatting itself.
            let _ = write!(sink, "\r\nTest failed with {} error{}.\r\n", errors, plural);
        }
    }
    sink.send_byte(SENTINEL);
}

pub fn halt<I: Idle + ?Sized>(idle: &mut I) -> ! {
    loop {
        idle.idle();
    }
}

pub fn conclude<S, I>(sink: &mut S, verdict: Verdict, idle: &mut I) -> !
where
    S: ByteSink + Write + ?Sized,
    I: Idle + ?Sized,
{
    report(sink, verdict);
    halt(idle)
}

pub fn test_pass<S, I>(sink: &mut S, idle: &mut I) -> !
where
    S: ByteSink + Write + ?Sized,
    I: Idle + ?Sized,
{
    conclude(sink, Verdict::Pass, idle)
}

pub fn test_fail<S, I>(sink: &mut S, idle: &mut I) -> !
where
    S: ByteSink + Write + ?Sized,
    I: Idle + ?Sized,
{
    test_fail_with(sink, 1, idle)
}

pub fn test_fail_with<S, I>(sink: &mut S, errors: u32, idle: &mut I) -> !
where
    S: ByteSink + Write + ?Sized,
    I: Idle + ?Sized,
{
    conclude(sink, Verdict::Fail { errors }, idle)
}

//! Common utilities for tests

use flatfs::{ByteSink, Result};

pub const ORANGE: &str = "\x1b[38;5;214m";
pub const RESET: &str = "\x1b[0m";

/// Provides a macro for logging messages during tests.
/// e.g. log!("placeholder") -> println!("[test] placeholder");
#[macro_export]
macro_rules! log {
    ($msg:expr, $($arg:tt)*) => {
        println!("{}[test] {}{}", crate::common::ORANGE, format!($msg, $($arg)*), crate::common::RESET)
    };
}

/// In-memory sink recording every export it receives.
#[derive(Default)]
pub struct MemSink {
    pub written: Vec<(String, Vec<u8>)>,
}

impl ByteSink for MemSink {
    fn write(&mut self, destination: &str, data: &[u8]) -> Result<()> {
        self.written.push((destination.to_string(), data.to_vec()));
        Ok(())
    }
}

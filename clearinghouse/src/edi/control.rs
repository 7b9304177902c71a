use chrono::Utc;
use once_cell::sync::Lazy;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Control numbers are nine digits, so values wrap below this bound.
const MODULUS: u64 = 1_000_000_000;

static PROCESS_GENERATOR: Lazy<ControlNumberGenerator> = Lazy::new(ControlNumberGenerator::new);

/// Hands out 9-digit control numbers from one atomic counter.
#[derive(Debug)]
pub struct ControlNumberGenerator {
    counter: AtomicU64,
}

impl ControlNumberGenerator {
    /// Seeded from the current time plus a small random offset.
    pub fn new() -> ControlNumberGenerator {
        let millis = Utc::now().timestamp_millis().unsigned_abs();
        let offset = rand::random_range(0..1000u64);
        ControlNumberGenerator::starting_at(millis + offset)
    }

    pub fn starting_at(value: u64) -> ControlNumberGenerator {
        ControlNumberGenerator { counter: AtomicU64::new(value) }
    }

    pub fn next(&self) -> String {
        loop {
            let value = self.counter.fetch_add(1, Ordering::Relaxed) % MODULUS;
            // zero is not a usable control number
            if value != 0 {
                return format!("{:09}", value);
            }
        }
    }
}

impl Default for ControlNumberGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn next_control_number() -> String {
    PROCESS_GENERATOR.next()
}

/// The interchange, group and transaction control numbers of one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ControlNumbers {
    pub interchange: String,
    pub group: String,
    pub transaction: String,
}

impl ControlNumbers {
    pub fn generate(generator: &ControlNumberGenerator) -> ControlNumbers {
        ControlNumbers {
            interchange: generator.next(),
            group: generator.next(),
            transaction: generator.next(),
        }
    }

    /// Draws from the process-wide generator.
    pub fn next() -> ControlNumbers {
        ControlNumbers::generate(&PROCESS_GENERATOR)
    }
}

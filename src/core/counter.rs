//! Purpose: The goat: a value type that counts its horns and describes itself.
//! Exports: `Counter`.
//! Role: Leaf value type behind the Rust API, the C ABI, and the CLI.
//! Invariants: `horns` starts at 0 and only `increment` changes it.
//! Invariants: `increment` wraps at `u32::MAX` instead of panicking.
//! Invariants: `describe` is a pure read; "horn" is singular only for exactly 1.
use std::fmt;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Counter {
    horns: u32,
}

impl Counter {
    pub fn new() -> Self {
        Self { horns: 0 }
    }

    pub fn increment(&mut self) {
        self.horns = self.horns.wrapping_add(1);
    }

    pub fn horns(&self) -> u32 {
        self.horns
    }

    /// Renders `This goat has {N} horn{s}.`
    pub fn describe(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Counter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plural = if self.horns == 1 { "" } else { "s" };
        write!(f, "This goat has {} horn{plural}.", self.horns)
    }
}

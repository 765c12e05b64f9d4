//! Embedded word list
//!
//! Dictionary compiled into the binary at build time.

// Include generated word list from build script
include!(concat!(env!("OUT_DIR"), "/words.rs"));

/// Used if the embedded list is ever empty
pub const FALLBACK_WORDS: &[&str] = &[
    "APPLE", "HOUSE", "PIANO", "GHOST", "TRAIN", "SMILE", "BEACH", "CLOCK",
];

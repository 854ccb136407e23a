// Adapters layer: concrete `Page` implementations (in-memory document, browser DOM).

pub mod memory;

#[cfg(feature = "web")]
pub mod web;

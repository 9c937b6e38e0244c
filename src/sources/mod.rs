//! Source abstractions: finite ordered sequences with independent replays.

mod source;

pub use source::Source;

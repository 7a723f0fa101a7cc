// Public API exports
pub mod clock;
pub mod logging;
pub mod parser;

// Re-export main types for convenience
pub use clock::{Clock, FixedClock, SystemClock};

pub use parser::{
    DirEntry, EntryKind, ListParser, ParseError, ParserRegistry, Permissions, UnixFields,
    UnixParser,
};

/// Parse one Unix-style LIST line against the system clock
pub fn parse(raw: &str) -> Result<DirEntry, ParseError> {
    UnixParser::new().parse(raw)
}

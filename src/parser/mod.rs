mod date;
mod entry;
mod error;
mod permissions;
mod registry;
mod unix;


pub use date::resolve_modified_at;
pub use entry::{DirEntry, EntryKind};
pub use error::ParseError;
pub use permissions::Permissions;
pub use registry::ParserRegistry;
pub use unix::{UnixFields, UnixParser};

/// Core trait that all listing parsers must implement
pub trait ListParser: Send + Sync {
    /// Short identifier used in logs (e.g. "unix")
    fn name(&self) -> &'static str;

    /// Parse one raw LIST line
    ///
    /// # Arguments
    /// * `raw` - A single line of server output, untrimmed
    ///
    /// # Returns
    /// The entry, or `ParseError::NoMatch` if the line is not in this
    /// parser's format so the caller can try another parser
    fn parse(&self, raw: &str) -> Result<DirEntry, ParseError>;
}

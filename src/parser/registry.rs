use super::{DirEntry, ListParser, ParseError, UnixParser};
use tracing::trace;

/// Ordered set of listing parsers, tried first to last
pub struct ParserRegistry {
    parsers: Vec<Box<dyn ListParser>>,
}

impl ParserRegistry {
    /// Create a registry with the Unix parser installed
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register(UnixParser::new());
        registry
    }

    /// Create a registry with no parsers
    pub fn empty() -> Self {
        Self {
            parsers: Vec::new(),
        }
    }

    /// Append a parser; it is consulted after those already registered
    ///
    /// # Example
    /// ```ignore
    /// let mut registry = ParserRegistry::empty();
    /// registry.register(UnixParser::with_clock(FixedClock(now)));
    /// ```
    pub fn register(&mut self, parser: impl ListParser + 'static) {
        self.parsers.push(Box::new(parser));
    }

    /// Parse one LIST line with the first parser that recognizes it
    ///
    /// `NoMatch` from a parser moves on to the next one. Any other error
    /// stops the search and is returned as is.
    pub fn parse(&self, raw: &str) -> Result<DirEntry, ParseError> {
        for parser in &self.parsers {
            match parser.parse(raw) {
                Err(ParseError::NoMatch) => {
                    trace!(parser = parser.name(), "no match, trying next parser");
                }
                result => return result,
            }
        }

        Err(ParseError::NoMatch)
    }

    /// Get the number of registered parsers
    pub fn parser_count(&self) -> usize {
        self.parsers.len()
    }

    /// Names of registered parsers, in the order they are tried
    pub fn parser_names(&self) -> Vec<&'static str> {
        self.parsers.iter().map(|p| p.name()).collect()
    }
}

impl Default for ParserRegistry {
    fn default() -> Self {
        Self::new()
    }
}

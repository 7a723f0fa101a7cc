use super::date::resolve_modified_at;
use super::{DirEntry, EntryKind, ListParser, ParseError, Permissions};
use crate::clock::{Clock, SystemClock};
use chrono::NaiveDateTime;
use regex::Regex;
use std::sync::{Arc, LazyLock};
use tracing::{debug, trace};

/// `ls -l` long listing layout, as served by most Unix FTP daemons
///
/// Link count, owner, group and the device major number are optional. The
/// group may span several words. Names with spaces run past `name` into
/// `rest`.
static UNIX_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?x)
        ^
        (?P<type>[pbcdlfmSs-])
        (?P<perms>[r-][w-][xsStTL-][r-][w-][xsStTL-][r-][w-][xsStTL-])
        \+?\s+
        (?:(?P<links>[0-9]+)\s+)?
        (?P<owner>\S+)?\s+
        (?:(?P<group>\S+(?:\s\S+)*)\s+)?
        (?:[0-9]+,\s+)?
        (?P<size>[0-9]+)\s+
        (?P<month_day>(?:[0-9]+[-/][0-9]+[-/][0-9]+)|(?:\S+\s+\S+))\s+
        (?P<time_or_year>[0-9]+(?::[0-9]+)?)\s+
        (?P<name>\S*)(?P<rest>\s*.*)
        ",
    )
    .expect("static regex must compile")
});

static SYMLINK_ARROW_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+->(.+)$").expect("static regex must compile"));

/// Raw captures of one line matched against the Unix grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnixFields<'a> {
    pub type_char: char,
    pub perms: &'a str,
    pub links: Option<&'a str>,
    pub owner: Option<&'a str>,
    pub group: Option<&'a str>,
    pub size: &'a str,
    pub month_day: &'a str,
    pub time_or_year: &'a str,
    pub name: &'a str,
    pub rest: &'a str,
}

impl<'a> UnixFields<'a> {
    /// Match an already trimmed line; `None` if it is not Unix-shaped
    pub fn capture(line: &'a str) -> Option<Self> {
        let caps = UNIX_LINE_RE.captures(line)?;
        let field = |name: &str| caps.name(name).map(|m| m.as_str());

        Some(Self {
            type_char: field("type")?.chars().next()?,
            perms: field("perms")?,
            links: field("links"),
            owner: field("owner"),
            group: field("group"),
            size: field("size").unwrap_or_default(),
            month_day: field("month_day")?,
            time_or_year: field("time_or_year")?,
            name: field("name").unwrap_or_default(),
            rest: field("rest").unwrap_or_default(),
        })
    }

    /// Rumpus (a Mac OS FTP server) output that also fits the grammar
    ///
    /// Its folders read `drwxr-xr-x  folder  0 Nov 30 10:03 name` and its
    /// files carry a `0` where the link count would be. Neither has a group.
    pub fn is_rumpus_lookalike(&self) -> bool {
        self.group.is_none()
            && ((self.links.is_none() && self.owner == Some("folder")) || self.links == Some("0"))
    }
}

/// Parser for Unix `ls -l` style LIST lines
#[derive(Clone)]
pub struct UnixParser {
    clock: Arc<dyn Clock>,
}

impl UnixParser {
    /// Parser that resolves year-less dates against the system clock
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }

    /// Parser that resolves year-less dates against `clock`
    pub fn with_clock(clock: impl Clock + 'static) -> Self {
        Self {
            clock: Arc::new(clock),
        }
    }

    /// Parse `raw` as if the current time were `now`
    pub fn parse_at(raw: &str, now: NaiveDateTime) -> Result<DirEntry, ParseError> {
        let line = raw.trim();
        let Some(fields) = UnixFields::capture(line) else {
            trace!(line, "not a unix listing line");
            return Err(ParseError::NoMatch);
        };

        let Some(kind) = EntryKind::from_type_char(fields.type_char) else {
            debug!(type_char = %fields.type_char, "unsupported entry type");
            return Err(ParseError::NoMatch);
        };

        if fields.is_rumpus_lookalike() {
            debug!(line, "rejecting rumpus-style line");
            return Err(ParseError::NoMatch);
        }

        let Ok(size) = fields.size.parse::<u64>() else {
            debug!(size = fields.size, "size does not fit in u64");
            return Err(ParseError::NoMatch);
        };
        let modified_at = resolve_modified_at(fields.month_day, fields.time_or_year, now)?;
        let (basename, symlink_target) = split_name(fields.name, fields.rest, kind);

        Ok(DirEntry {
            kind,
            size,
            basename,
            symlink_target,
            modified_at,
            owner: fields.owner.map(str::trim).unwrap_or_default().to_string(),
            group: fields.group.map(str::trim).unwrap_or_default().to_string(),
            permissions: Permissions::from_rwx(fields.perms),
            raw_line: raw.to_string(),
        })
    }
}

impl Default for UnixParser {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for UnixParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UnixParser").finish_non_exhaustive()
    }
}

impl ListParser for UnixParser {
    fn name(&self) -> &'static str {
        "unix"
    }

    fn parse(&self, raw: &str) -> Result<DirEntry, ParseError> {
        Self::parse_at(raw, self.clock.now())
    }
}

/// Join the name with the overflow capture and peel off a symlink target
fn split_name(name: &str, rest: &str, kind: EntryKind) -> (String, Option<String>) {
    let full = format!("{}{}", name, rest);
    let full = full.trim();

    if kind != EntryKind::Symlink {
        return (full.to_string(), None);
    }

    match SYMLINK_ARROW_RE.captures(full) {
        Some(caps) => {
            let arrow_start = caps.get(0).map_or(full.len(), |m| m.start());
            let target = caps.get(1).map_or("", |m| m.as_str().trim());
            (full[..arrow_start].to_string(), Some(target.to_string()))
        }
        None => (full.to_string(), Some(String::new())),
    }
}

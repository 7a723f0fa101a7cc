use super::Permissions;
use chrono::NaiveDateTime;
use serde::Serialize;

/// A single directory entry recovered from one LIST line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirEntry {
    /// What the entry is (directory, file, link, device)
    pub kind: EntryKind,
    /// Size in bytes as reported by the server
    pub size: u64,
    /// Entry name, trimmed, interior whitespace kept
    pub basename: String,
    /// Link target; `None` unless `kind` is `Symlink`
    pub symlink_target: Option<String>,
    /// Modification time with the year resolved
    pub modified_at: NaiveDateTime,
    /// Owning user, empty when the server omits it
    pub owner: String,
    /// Owning group, empty when the server omits it
    pub group: String,
    /// Encoded rwx block
    pub permissions: Permissions,
    /// The line exactly as it was handed to the parser
    pub raw_line: String,
}

/// Classification of a directory entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    /// `d`
    Directory,
    /// `-` or `f`
    File,
    /// `l`
    Symlink,
    /// Pipes, sockets, block and character devices (`p`, `s`, `b`, `c`)
    Device,
}

impl EntryKind {
    /// Map the leading type character of an `ls -l` line to a kind
    ///
    /// Vendor letters the grammar tolerates (`m`, `S`) have no kind and
    /// yield `None`.
    pub fn from_type_char(c: char) -> Option<Self> {
        match c {
            'd' => Some(Self::Directory),
            'l' => Some(Self::Symlink),
            'f' | '-' => Some(Self::File),
            'p' | 'b' | 'c' | 's' => Some(Self::Device),
            _ => None,
        }
    }
}

impl DirEntry {
    /// Whether the entry is a directory
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    /// Whether the entry is a regular file
    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }

    /// Whether the entry is a symbolic link
    pub fn is_symlink(&self) -> bool {
        self.kind == EntryKind::Symlink
    }

    /// Whether the entry is a device, pipe or socket
    pub fn is_device(&self) -> bool {
        self.kind == EntryKind::Device
    }
}

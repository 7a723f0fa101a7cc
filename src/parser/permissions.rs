use serde::{Serialize, Serializer};
use std::fmt;

/// Lossless numeric encoding of a nine-character rwx block
///
/// Each digit is the sum of read=4, write=2, execute=1 for owner, group and
/// other. Renders (and serializes) as a three-digit string such as `"755"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Permissions {
    pub owner: u8,
    pub group: u8,
    pub other: u8,
}

impl Permissions {
    /// Encode a raw rwx block like `rwxr-sr-t`
    ///
    /// The block is consumed three characters at a time. Setuid, setgid and
    /// sticky letters count as execute. Characters outside the grammar
    /// contribute nothing.
    pub fn from_rwx(block: &str) -> Self {
        let mut digits = [0u8; 3];
        for (slot, triple) in digits.iter_mut().zip(block.as_bytes().chunks(3)) {
            *slot = triple.iter().map(|&b| bit_value(b)).sum();
        }

        Self {
            owner: digits[0],
            group: digits[1],
            other: digits[2],
        }
    }

    /// Mode bits as an integer, e.g. `0o755`
    pub fn mode(&self) -> u32 {
        (u32::from(self.owner) << 6) | (u32::from(self.group) << 3) | u32::from(self.other)
    }
}

fn bit_value(b: u8) -> u8 {
    match b {
        b'r' => 4,
        b'w' => 2,
        b'x' | b's' | b'S' | b't' | b'T' | b'L' => 1,
        _ => 0,
    }
}

impl fmt::Display for Permissions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.owner, self.group, self.other)
    }
}

impl Serialize for Permissions {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

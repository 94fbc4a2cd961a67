//! Reads network-device attributes from the kernel's class tree.
//!
//! A missing or unreadable attribute is absence of data, never an error.

use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct SysfsTree {
    root: PathBuf,
}

impl SysfsTree {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// `attr` is relative to the device entry; empty means the entry itself.
    pub fn path(&self, interface: &str, attr: &str) -> PathBuf {
        let entry = self.root.join(interface);
        if attr.is_empty() { entry } else { entry.join(attr) }
    }

    /// Trimmed contents; `None` when missing or empty.
    pub fn string(&self, interface: &str, attr: &str) -> Option<String> {
        let raw = fs::read_to_string(self.path(interface, attr)).ok()?;
        let trimmed = raw.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }

    pub fn int(&self, interface: &str, attr: &str) -> Option<i64> {
        parse_int(&self.string(interface, attr)?)
    }

    /// Sorted entry names of an attribute directory.
    pub fn dir(&self, interface: &str, attr: &str) -> Vec<String> {
        let Ok(entries) = fs::read_dir(self.path(interface, attr)) else {
            return Vec::new();
        };
        let mut names: Vec<String> = entries
            .filter_map(Result::ok)
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    pub fn link(&self, interface: &str, attr: &str) -> Option<PathBuf> {
        fs::read_link(self.path(interface, attr)).ok()
    }

    /// Final path component of a symlink target.
    pub fn link_name(&self, interface: &str, attr: &str) -> Option<String> {
        let target = self.link(interface, attr)?;
        target
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
    }
}

/// Integer with optional sign and `0x`/`0o`/`0b` prefix.
pub fn parse_int(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    let (negative, digits) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw.strip_prefix('+').unwrap_or(raw)),
    };
    let (radix, digits) = match digits.get(..2) {
        Some("0x") | Some("0X") => (16, &digits[2..]),
        Some("0o") | Some("0O") => (8, &digits[2..]),
        Some("0b") | Some("0B") => (2, &digits[2..]),
        _ => (10, digits),
    };
    let value = i64::from_str_radix(digits, radix).ok()?;
    Some(if negative { -value } else { value })
}

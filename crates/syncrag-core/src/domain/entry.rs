//! Remote entry hierarchy
//!
//! An [`Entry`] describes one filesystem object as the remote catalog knows
//! it. There are two variants:
//!
//! - [`File`] takes its name and type tag from the final segment of its path
//!   and that segment's extension.
//! - [`Directory`] takes its name from the final path segment and owns an
//!   ordered collection of child entries.
//!
//! Name and type are computed once in the constructor and have no setters.
//!
//! ## Equality
//!
//! Entries compare structurally: two values built from the same path,
//! description and version are equal, regardless of where they were created.
//! [`Directory::remove_entry`] and [`Directory::contains_entry`] rely on this
//! and match by value, not by identity. A directory's children are part of
//! its value.

use std::slice;

use serde::Serialize;

use super::errors::DomainError;

/// Type tag carried by every [`Directory`]
pub const DIRECTORY_TYPE: &str = "Directory";

fn is_separator(c: char) -> bool {
    c == '/' || c == '\\'
}

/// Final segment of `path`, or an empty string when the path ends with a
/// separator (or is empty)
fn final_segment(path: &str) -> &str {
    path.rsplit(is_separator).next().unwrap_or_default()
}

/// Extension of a file name including the leading dot.
///
/// A name whose last dot is its final character has no extension.
fn extension_of(name: &str) -> &str {
    match name.rfind('.') {
        Some(idx) if idx + 1 < name.len() => &name[idx..],
        _ => "",
    }
}

/// Case-insensitive name comparison without allocating
fn names_match(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

fn require_name(name: &str) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::empty_argument("name"));
    }
    Ok(())
}

// ============================================================================
// File
// ============================================================================

/// A remote file entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct File {
    name: String,
    path: String,
    #[serde(rename = "type")]
    entry_type: String,
    description: String,
    version: String,
}

impl File {
    /// Creates a file entry, deriving its name and type from `path`
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::MalformedIdentity`] if `path` has no non-empty
    /// final segment (empty path, bare `/`, or a trailing separator).
    pub fn new(
        path: impl Into<String>,
        description: impl Into<String>,
        version: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let path = path.into();
        let name = final_segment(&path);
        if name.is_empty() {
            return Err(DomainError::MalformedIdentity(path));
        }

        Ok(Self {
            name: name.to_string(),
            entry_type: extension_of(name).to_string(),
            path,
            description: description.into(),
            version: version.into(),
        })
    }

    /// File name including its extension
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Extension including the leading dot, or empty
    pub fn entry_type(&self) -> &str {
        &self.entry_type
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn version(&self) -> &str {
        &self.version
    }
}

// ============================================================================
// Directory
// ============================================================================

/// A remote directory entry and its ordered children
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Directory {
    name: String,
    path: String,
    description: String,
    version: String,
    entries: Vec<Entry>,
}

impl Directory {
    /// Creates an empty directory entry, deriving its name from `path`
    ///
    /// Trailing separators are ignored, so `/a/b/` is named `b`. The whole
    /// segment is kept, extension included: `/etc/conf.d` is named `conf.d`,
    /// not `conf`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::MalformedIdentity`] if no name can be derived.
    pub fn new(
        path: impl Into<String>,
        description: impl Into<String>,
        version: impl Into<String>,
    ) -> Result<Self, DomainError> {
        Self::with_entries(path, description, version, Vec::new())
    }

    /// Creates a directory entry seeded with `entries`, in iteration order
    pub fn with_entries(
        path: impl Into<String>,
        description: impl Into<String>,
        version: impl Into<String>,
        entries: impl IntoIterator<Item = Entry>,
    ) -> Result<Self, DomainError> {
        let path = path.into();
        let name = final_segment(path.trim_end_matches(is_separator));
        if name.is_empty() {
            return Err(DomainError::MalformedIdentity(path));
        }

        Ok(Self {
            name: name.to_string(),
            path,
            description: description.into(),
            version: version.into(),
            entries: entries.into_iter().collect(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Always [`DIRECTORY_TYPE`]
    pub fn entry_type(&self) -> &str {
        DIRECTORY_TYPE
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    // --- Collection ---

    /// Appends an entry after the existing children
    pub fn add_entry(&mut self, entry: impl Into<Entry>) {
        self.entries.push(entry.into());
    }

    /// Removes the first child structurally equal to `entry`
    ///
    /// Returns `true` if a child was removed. A missing entry is not an error.
    pub fn remove_entry(&mut self, entry: &Entry) -> bool {
        match self.entries.iter().position(|e| e == entry) {
            Some(idx) => {
                self.entries.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn clear_entries(&mut self) {
        self.entries.clear();
    }

    /// Returns true if some child is structurally equal to `entry`
    pub fn contains_entry(&self, entry: &Entry) -> bool {
        self.entries.contains(entry)
    }

    /// Returns true if some child has `name`, compared case-insensitively
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidArgument`] if `name` is empty or blank.
    pub fn contains_entry_named(&self, name: &str) -> Result<bool, DomainError> {
        Ok(self.get_entry(name)?.is_some())
    }

    /// First child named `name` (case-insensitive), or `None`
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidArgument`] if `name` is empty or blank.
    pub fn get_entry(&self, name: &str) -> Result<Option<&Entry>, DomainError> {
        require_name(name)?;
        Ok(self.entries.iter().find(|e| e.name_matches(name)))
    }

    /// Child at `index` in insertion order
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::OutOfRange`] if `index >= count()`.
    pub fn get_entry_at(&self, index: usize) -> Result<&Entry, DomainError> {
        self.entries.get(index).ok_or(DomainError::OutOfRange {
            index,
            len: self.entries.len(),
        })
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Children in insertion order
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn iter(&self) -> slice::Iter<'_, Entry> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a Directory {
    type Item = &'a Entry;
    type IntoIter = slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

// ============================================================================
// Entry
// ============================================================================

/// A remote file or directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Entry {
    File(File),
    Directory(Directory),
}

impl Entry {
    pub fn name(&self) -> &str {
        match self {
            Entry::File(f) => f.name(),
            Entry::Directory(d) => d.name(),
        }
    }

    pub fn path(&self) -> &str {
        match self {
            Entry::File(f) => f.path(),
            Entry::Directory(d) => d.path(),
        }
    }

    /// File extension, or [`DIRECTORY_TYPE`]
    pub fn entry_type(&self) -> &str {
        match self {
            Entry::File(f) => f.entry_type(),
            Entry::Directory(d) => d.entry_type(),
        }
    }

    pub fn description(&self) -> &str {
        match self {
            Entry::File(f) => f.description(),
            Entry::Directory(d) => d.description(),
        }
    }

    pub fn version(&self) -> &str {
        match self {
            Entry::File(f) => f.version(),
            Entry::Directory(d) => d.version(),
        }
    }

    /// True if `name` equals this entry's name, ignoring case
    pub fn name_matches(&self, name: &str) -> bool {
        names_match(self.name(), name)
    }

    pub fn is_file(&self) -> bool {
        matches!(self, Entry::File(_))
    }

    pub fn is_directory(&self) -> bool {
        matches!(self, Entry::Directory(_))
    }

    pub fn as_directory(&self) -> Option<&Directory> {
        match self {
            Entry::Directory(d) => Some(d),
            Entry::File(_) => None,
        }
    }
}

impl From<File> for Entry {
    fn from(file: File) -> Self {
        Entry::File(file)
    }
}

impl From<Directory> for Entry {
    fn from(directory: Directory) -> Self {
        Entry::Directory(directory)
    }
}

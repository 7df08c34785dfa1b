// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

use std::fmt;
use std::str::FromStr;

use crate::StageError;

/// An absolute path to a prim in a [`Stage`](crate::Stage), such as `/World/Props/Cube`.
///
/// Paths are the only stable way to refer to a prim: anything that outlives a single call into the
/// stage (an undoable command, a scene item, an observer scope) stores an [`SdfPath`] and
/// re-resolves it when needed.  The pseudo-root is spelled `/`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SdfPath(String);

impl SdfPath {
    /// The pseudo-root path `/`, parent of every top-level prim.
    pub fn absolute_root() -> Self {
        Self("/".to_owned())
    }

    /// Parses an absolute prim path.  Every component must be a valid identifier: a letter or
    /// underscore followed by letters, digits or underscores.
    pub fn new(path: &str) -> Result<Self, StageError> {
        if path == "/" {
            return Ok(Self::absolute_root());
        }
        let Some(rest) = path.strip_prefix('/') else {
            return Err(StageError::InvalidPath(path.to_owned()));
        };
        if rest.split('/').all(is_identifier) {
            Ok(Self(path.to_owned()))
        } else {
            Err(StageError::InvalidPath(path.to_owned()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_absolute_root(&self) -> bool {
        self.0 == "/"
    }

    /// The last component of the path, or the empty string for the pseudo-root.
    pub fn name(&self) -> &str {
        match self.0.rfind('/') {
            Some(index) => &self.0[index + 1..],
            None => "",
        }
    }

    /// The parent path, or `None` for the pseudo-root.
    pub fn parent(&self) -> Option<SdfPath> {
        if self.is_absolute_root() {
            return None;
        }
        match self.0.rfind('/') {
            Some(0) => Some(Self::absolute_root()),
            Some(index) => Some(Self(self.0[..index].to_owned())),
            None => None,
        }
    }

    pub fn append_child(&self, name: &str) -> Result<SdfPath, StageError> {
        if !is_identifier(name) {
            return Err(StageError::InvalidPath(format!("{}/{}", self.0, name)));
        }
        if self.is_absolute_root() {
            Ok(Self(format!("/{}", name)))
        } else {
            Ok(Self(format!("{}/{}", self.0, name)))
        }
    }

    /// Whether `prefix` is this path or one of its ancestors.  The comparison is component-wise,
    /// so `/World/Cube` does not have the prefix `/World/Cu`.
    pub fn has_prefix(&self, prefix: &SdfPath) -> bool {
        if prefix.is_absolute_root() || self == prefix {
            return true;
        }
        self.0.starts_with(&prefix.0) && self.0.as_bytes().get(prefix.0.len()) == Some(&b'/')
    }

    /// Rewrites this path from under `old_prefix` to under `new_prefix`.  Returns `None` when
    /// `old_prefix` is not a prefix of this path.
    pub fn replace_prefix(&self, old_prefix: &SdfPath, new_prefix: &SdfPath) -> Option<SdfPath> {
        if !self.has_prefix(old_prefix) {
            return None;
        }
        if old_prefix.is_absolute_root() {
            if new_prefix.is_absolute_root() || self.is_absolute_root() {
                return Some(if self.is_absolute_root() { new_prefix.clone() } else { self.clone() });
            }
            return Some(Self(format!("{}{}", new_prefix.0, self.0)));
        }
        let suffix = &self.0[old_prefix.0.len()..];
        if new_prefix.is_absolute_root() {
            if suffix.is_empty() {
                Some(Self::absolute_root())
            } else {
                Some(Self(suffix.to_owned()))
            }
        } else {
            Some(Self(format!("{}{}", new_prefix.0, suffix)))
        }
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

impl fmt::Display for SdfPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for SdfPath {
    type Err = StageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SdfPath::new(s)
    }
}


// End of File

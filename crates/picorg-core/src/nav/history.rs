//! Navigation history with back/forward support.

use std::path::{Path, PathBuf};

/// Immutable navigation history with a current path and back/forward stacks.
///
/// Every mutation returns a **new** `History` instance, following the
/// project-wide immutability convention. Pushing a new path clears the
/// forward stack (same semantics as a web browser): navigating away
/// discards any forward path. `current` is unset only before the first
/// navigation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    current: Option<PathBuf>,
    back_stack: Vec<PathBuf>,
    forward_stack: Vec<PathBuf>,
}

/// Collapses `.` components and trailing separators so that revisits of
/// the same directory spelled differently compare equal.
fn normalize(path: &Path) -> PathBuf {
    path.components().collect()
}

impl History {
    /// Creates an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current path, unset before the first navigation.
    pub fn current(&self) -> Option<&Path> {
        self.current.as_deref()
    }

    /// Navigates to `path`.
    ///
    /// The path is normalized first; pushing the current path again is a
    /// no-op. Otherwise the old current path (if any) moves onto the back
    /// stack and the forward stack is cleared. Returns a new `History`.
    pub fn push(&self, path: PathBuf) -> Self {
        let path = normalize(&path);
        if self.current.as_deref() == Some(path.as_path()) {
            return self.clone();
        }
        let mut back_stack = self.back_stack.clone();
        if let Some(current) = &self.current {
            back_stack.push(current.clone());
        }
        Self {
            current: Some(path),
            back_stack,
            forward_stack: Vec::new(),
        }
    }

    /// Goes back one step. Returns the new `History` and the path that is
    /// now current, or `None` if the back stack is empty.
    pub fn go_back(&self) -> Option<(Self, PathBuf)> {
        let mut back_stack = self.back_stack.clone();
        let target = back_stack.pop()?;
        let mut forward_stack = self.forward_stack.clone();
        if let Some(current) = &self.current {
            forward_stack.push(current.clone());
        }
        let history = Self {
            current: Some(target.clone()),
            back_stack,
            forward_stack,
        };
        Some((history, target))
    }

    /// Goes forward one step. Returns the new `History` and the path that
    /// is now current, or `None` if the forward stack is empty.
    pub fn go_forward(&self) -> Option<(Self, PathBuf)> {
        let mut forward_stack = self.forward_stack.clone();
        let target = forward_stack.pop()?;
        let mut back_stack = self.back_stack.clone();
        if let Some(current) = &self.current {
            back_stack.push(current.clone());
        }
        let history = Self {
            current: Some(target.clone()),
            back_stack,
            forward_stack,
        };
        Some((history, target))
    }

    /// Returns `true` if there is at least one entry on the back stack.
    pub fn can_go_back(&self) -> bool {
        !self.back_stack.is_empty()
    }

    /// Returns `true` if there is at least one entry on the forward stack.
    pub fn can_go_forward(&self) -> bool {
        !self.forward_stack.is_empty()
    }
}

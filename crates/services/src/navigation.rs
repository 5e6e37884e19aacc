use crate::error::SessionError;

/// Index of the currently displayed question, bounded to `[0, len - 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationCursor {
    index: usize,
    len: usize,
}

impl NavigationCursor {
    /// Cursor over a non-empty question list, starting at the first question.
    #[must_use]
    pub fn new(len: usize) -> Self {
        debug_assert!(len > 0, "payload validation rejects empty question lists");
        Self { index: 0, len }
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub fn is_first(&self) -> bool {
        self.index == 0
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        self.index + 1 >= self.len
    }

    /// Advance by one. At the last index this is a no-op, never an error.
    /// Returns whether the cursor moved.
    pub fn next(&mut self) -> bool {
        if self.is_last() {
            return false;
        }
        self.index += 1;
        true
    }

    /// Retreat by one. At index 0 this is a no-op. Returns whether the
    /// cursor moved.
    pub fn previous(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.index -= 1;
        true
    }

    /// Move directly to `index`, supporting the quick-navigation grid.
    /// Returns whether the cursor moved.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::OutOfRange` if `index` is outside `[0, len - 1]`.
    pub fn jump_to(&mut self, index: usize) -> Result<bool, SessionError> {
        if index >= self.len {
            return Err(SessionError::OutOfRange {
                index,
                len: self.len,
            });
        }
        let moved = index != self.index;
        self.index = index;
        Ok(moved)
    }
}

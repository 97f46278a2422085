//! Two-state delete confirmation: a delete request waits for a yes/no answer.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeleteConfirmation {
    #[default]
    Idle,
    PendingConfirmation(u32),
}

impl DeleteConfirmation {
    /// Ask to delete `id`. A request that is already pending is replaced.
    pub fn request(self, id: u32) -> Self {
        DeleteConfirmation::PendingConfirmation(id)
    }

    /// Accept the pending request. Returns the id to delete, if any.
    pub fn confirm(self) -> (Self, Option<u32>) {
        match self {
            DeleteConfirmation::PendingConfirmation(id) => (DeleteConfirmation::Idle, Some(id)),
            DeleteConfirmation::Idle => (DeleteConfirmation::Idle, None),
        }
    }

    pub fn cancel(self) -> Self {
        DeleteConfirmation::Idle
    }

    pub fn pending(self) -> Option<u32> {
        match self {
            DeleteConfirmation::PendingConfirmation(id) => Some(id),
            DeleteConfirmation::Idle => None,
        }
    }
}

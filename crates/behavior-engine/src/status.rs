//! Terminal status and observable outcome of a behavior.

/// The terminal result of a behavior node.
///
/// A node only ever produces one `Status`, once. While it is still waiting on
/// an event it has no status; see [`Outcome::Pending`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Status {
    /// The behavior completed successfully.
    ///
    /// For checks: the predicate held.
    /// For steps: the step reported success.
    Success,

    /// The behavior failed.
    ///
    /// This is a normal result, not an error: a check that does not hold or a
    /// step that reports `false`.
    Failure,
}

impl Status {
    /// Returns `true` if this status is `Success`.
    #[inline]
    pub fn is_success(self) -> bool {
        matches!(self, Status::Success)
    }

    /// Returns `true` if this status is `Failure`.
    #[inline]
    pub fn is_failure(self) -> bool {
        matches!(self, Status::Failure)
    }

    /// Inverts the status: Success becomes Failure and vice versa.
    #[inline]
    pub fn invert(self) -> Self {
        match self {
            Status::Success => Status::Failure,
            Status::Failure => Status::Success,
        }
    }
}

impl From<bool> for Status {
    #[inline]
    fn from(ok: bool) -> Self {
        if ok { Status::Success } else { Status::Failure }
    }
}

/// Observable state of a run.
///
/// Monotonic: once `Succeeded` or `Failed`, it never changes again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    #[default]
    Pending,
    Succeeded,
    Failed,
}

impl Outcome {
    #[inline]
    pub fn is_pending(self) -> bool {
        matches!(self, Outcome::Pending)
    }

    #[inline]
    pub fn is_terminal(self) -> bool {
        !self.is_pending()
    }

    /// The terminal status, or `None` while pending.
    #[inline]
    pub fn status(self) -> Option<Status> {
        match self {
            Outcome::Pending => None,
            Outcome::Succeeded => Some(Status::Success),
            Outcome::Failed => Some(Status::Failure),
        }
    }
}

impl From<Status> for Outcome {
    #[inline]
    fn from(status: Status) -> Self {
        match status {
            Status::Success => Outcome::Succeeded,
            Status::Failure => Outcome::Failed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_from_bool() {
        assert_eq!(Status::from(true), Status::Success);
        assert_eq!(Status::from(false), Status::Failure);
        assert_eq!(Status::Success.invert(), Status::Failure);
    }

    #[test]
    fn outcome_status_mapping() {
        assert_eq!(Outcome::Pending.status(), None);
        assert_eq!(Outcome::from(Status::Success), Outcome::Succeeded);
        assert_eq!(Outcome::from(Status::Failure).status(), Some(Status::Failure));
        assert!(Outcome::default().is_pending());
        assert!(Outcome::Failed.is_terminal());
    }
}

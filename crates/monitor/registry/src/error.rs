use thiserror::Error;

/// Errors returned by subscription operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubscriptionError {
    /// A subscriber with the same identifier is already active.
    #[error("subscriber `{id}` is already subscribed")]
    AlreadySubscribed { id: String },
}

pub type Result<T> = core::result::Result<T, Error>;

/// All possible errors that `tsid` can produce.
///
/// Parsing is deliberately not represented here: [`Tsid::decode`] signals
/// every grammar violation uniformly by returning `None`.
///
/// [`Tsid::decode`]: crate::Tsid::decode
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// [`Tsid::encode`] was asked to render a raw value with the sign bit
    /// set. Generators never produce such values; they can only be
    /// introduced via [`Tsid::from_raw`].
    ///
    /// [`Tsid::encode`]: crate::Tsid::encode
    /// [`Tsid::from_raw`]: crate::Tsid::from_raw
    #[error("tsid out of range: {raw} is negative")]
    Negative { raw: i64 },

    /// The operation failed because the generator lock was **poisoned**.
    ///
    /// This occurs when a thread panics while holding the lock. When the
    /// `parking-lot` feature is enabled, mutexes do not poison, so this
    /// variant is not available.
    #[cfg(not(feature = "parking-lot"))]
    #[error("generator lock poisoned")]
    LockPoisoned,
}

#[cfg(not(feature = "parking-lot"))]
use std::sync::{MutexGuard, PoisonError};

// Convert all poisoned lock errors to a simplified `LockPoisoned`
#[cfg(not(feature = "parking-lot"))]
impl<T> From<PoisonError<MutexGuard<'_, T>>> for Error {
    fn from(_: PoisonError<MutexGuard<'_, T>>) -> Self {
        Self::LockPoisoned
    }
}

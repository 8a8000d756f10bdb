use crate::{Error, RandSource, TimeSource, Tsid, generator::Mutex};
use std::sync::Arc;
#[cfg(feature = "tracing")]
use tracing::instrument;

/// Shared generator state: the last observed millisecond tick and the
/// rolling per-millisecond counter.
#[derive(Debug)]
struct State {
    last_millis: i64,
    counter: u8,
}

/// A lock-based TSID generator suitable for multi-threaded environments.
///
/// The generator wraps its `(last_millis, counter)` state in an
/// [`Arc<Mutex<_>>`], allowing safe shared use across threads. Cloning is
/// cheap and clones share the same state, so a cloned generator never hands
/// out a `(timestamp, counter)` pair its sibling already used.
///
/// ## Features
///
/// - ✅ Thread-safe
/// - ✅ Strictly increasing for up to 256 IDs per millisecond
/// - ✅ Constant-time, non-blocking generation (no retry loop)
///
/// ## Capacity
///
/// Exactly 256 counter values exist per millisecond. Minting more than 256
/// IDs within one millisecond silently wraps the counter; ordering among the
/// reused-counter IDs then depends only on their random bits. This is an
/// accepted, documented limit, not an error condition.
pub struct TsidGenerator<T, R>
where
    T: TimeSource,
    R: RandSource,
{
    state: Arc<Mutex<State>>,
    time: T,
    rng: R,
}

impl<T, R> Clone for TsidGenerator<T, R>
where
    T: TimeSource + Clone,
    R: RandSource + Clone,
{
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            time: self.time.clone(),
            rng: self.rng.clone(),
        }
    }
}

impl<T, R> TsidGenerator<T, R>
where
    T: TimeSource,
    R: RandSource,
{
    /// Creates a new [`TsidGenerator`] with zeroed state.
    ///
    /// The first call to [`Self::create`] observes a timestamp different
    /// from the initial zero state and starts the counter at zero.
    ///
    /// # Parameters
    ///
    /// - `time`: A [`TimeSource`] used to retrieve the current timestamp
    /// - `rng`: A [`RandSource`] used to generate the random field
    ///
    /// # Example
    ///
    /// ```
    /// use tsid::{ThreadRandom, TsidGenerator, UnixClock};
    ///
    /// let generator = TsidGenerator::new(UnixClock, ThreadRandom);
    /// let id = generator.create();
    /// assert!(id.to_raw() >= 0);
    /// ```
    pub fn new(time: T, rng: R) -> Self {
        Self {
            state: Arc::new(Mutex::new(State {
                last_millis: 0,
                counter: 0,
            })),
            time,
            rng,
        }
    }

    /// Mints a new identifier.
    ///
    /// This is the infallible counterpart to [`Self::try_create`].
    ///
    /// # Panics
    ///
    /// Panics if the lock is poisoned. For explicitly fallible behavior, use
    /// [`Self::try_create`] instead. With the `parking-lot` feature this
    /// method never panics.
    #[must_use]
    pub fn create(&self) -> Tsid {
        self.try_create().unwrap()
    }

    /// A fallible version of [`Self::create`] that returns a [`Result`].
    ///
    /// Combines the current timestamp, the per-millisecond counter, and a
    /// fresh random draw into a packed, non-negative identifier:
    ///
    /// 1. Read the clock. If the tick differs from the last observed one,
    ///    reset the counter.
    /// 2. Place the 42 low timestamp bits above bit 22, the counter byte
    ///    above two fresh random bytes, and drop the two lowest random bits
    ///    with an arithmetic right shift so the counter lands in bits 21..14.
    /// 3. OR the parts together and clear the sign bit.
    ///
    /// The random draw happens inside the critical section: it is cheap and
    /// has to be serialized with the counter anyway.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LockPoisoned`] if another thread panicked while
    /// holding the lock. With the `parking-lot` feature the error path is
    /// unreachable.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn try_create(&self) -> Result<Tsid, Error> {
        let now = self.time.current_millis();

        #[cfg(feature = "parking-lot")]
        let mut state = self.state.lock();
        #[cfg(not(feature = "parking-lot"))]
        let mut state = self.state.lock()?;

        // The counter is per millisecond, so roll back to zero on a new tick.
        if now != state.last_millis {
            state.last_millis = now;
            state.counter = 0;
        }

        let millis = (now & Tsid::TIMESTAMP_MASK) << Tsid::TIMESTAMP_SHIFT;

        // Two random bytes below the counter byte; bits 23..0 of `scratch`.
        let scratch = (i64::from(state.counter) << 16) | i64::from(self.rng.rand());
        state.counter = state.counter.wrapping_add(1);

        // Arithmetic shift drops the two lowest random bits, leaving the
        // counter in bits 21..14 and 14 random bits below it.
        let id = (millis | (scratch >> 2)) & i64::MAX;

        Ok(Tsid::from_raw(id))
    }
}

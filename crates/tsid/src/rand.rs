use rand::Rng;

/// A trait for random sources feeding the random field of generated IDs.
///
/// The draw is 16 bits wide; the packing step discards the lowest two, so 14
/// bits survive into the identifier. The bits do not need to be
/// unpredictable, but they must come from a well-seeded generator: patterned
/// output would turn counter wraps into likely collisions.
///
/// # Example
///
/// ```
/// use tsid::RandSource;
///
/// struct FixedRand;
/// impl RandSource for FixedRand {
///     fn rand(&self) -> u16 {
///         1234
///     }
/// }
///
/// let rng = FixedRand;
/// assert_eq!(rng.rand(), 1234);
/// ```
pub trait RandSource {
    /// Returns 16 fresh random bits.
    fn rand(&self) -> u16;
}

/// A [`RandSource`] backed by the thread-local RNG (`rand::rng()`).
///
/// This RNG is fast, cryptographically secure (ChaCha-based), and
/// automatically reseeded periodically from the operating system. A failure
/// to obtain entropy aborts the process; there is no recoverable error path.
#[derive(Default, Clone, Copy, Debug)]
pub struct ThreadRandom;

impl RandSource for ThreadRandom {
    fn rand(&self) -> u16 {
        rand::rng().random()
    }
}

//! Chain-agnostic token mint identity.

/// The identity of a token mint, as a fixed 32-byte key.
///
/// All 32-byte sequences are valid identities, so construction is
/// infallible. The `Ord` implementation is lexicographic and defines the
/// canonical pair ordering: a pool always stores the smaller mint as
/// token 0.
///
/// # Examples
///
/// ```
/// use basin_amm::domain::MintId;
///
/// let a = MintId::from_bytes([1u8; 32]);
/// let b = MintId::from_bytes([2u8; 32]);
/// assert!(a < b);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MintId([u8; 32]);

impl MintId {
    /// Creates a `MintId` from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the underlying 32-byte representation.
    #[must_use]
    pub const fn as_bytes(&self) -> [u8; 32] {
        self.0
    }

    /// Returns the all-zero identity.
    ///
    /// Useful as a sentinel or placeholder value; use sparingly.
    #[must_use]
    pub const fn zero() -> Self {
        Self([0u8; 32])
    }
}

//! Pool identity.

/// The identity of a pool record, as a fixed 32-byte key.
///
/// The engine never derives pool identities itself; the hosting runtime
/// supplies them (address derivation is a collaborator concern). The
/// engine only compares them, to reject positions and LP accounts that
/// belong to a different pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PoolId([u8; 32]);

impl PoolId {
    /// Creates a `PoolId` from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the underlying 32-byte representation.
    #[must_use]
    pub const fn as_bytes(&self) -> [u8; 32] {
        self.0
    }
}

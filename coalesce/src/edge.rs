// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use coalesce_error::{CoalesceError, Result};

/// Which edges of a burst or window may invoke the callable.
///
/// The empty set is not representable: a coalescer with no enabled edge would
/// never run its callable, so [`EdgePolicy::from_flags`] rejects it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EdgePolicy {
    /// Invoke on the first call of a burst or window.
    Leading,
    /// Invoke with the latest arguments once the burst or window ends.
    Trailing,
    /// Both of the above.
    Both,
}

impl EdgePolicy {
    /// Builds the policy from the two option flags.
    ///
    /// # Errors
    ///
    /// Returns [`CoalesceError::NoEdgeEnabled`] if both flags are `false`.
    pub fn from_flags(leading: bool, trailing: bool) -> Result<Self> {
        match (leading, trailing) {
            (true, true) => Ok(Self::Both),
            (true, false) => Ok(Self::Leading),
            (false, true) => Ok(Self::Trailing),
            (false, false) => Err(CoalesceError::NoEdgeEnabled),
        }
    }

    #[must_use]
    pub const fn leading(self) -> bool {
        matches!(self, Self::Leading | Self::Both)
    }

    #[must_use]
    pub const fn trailing(self) -> bool {
        matches!(self, Self::Trailing | Self::Both)
    }
}

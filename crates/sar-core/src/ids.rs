//! Strongly typed UUID identifiers.
//!
//! Lost-person instances and searches are created by independent operators,
//! so identifiers are random v4 UUIDs rather than dense indices.  All IDs are
//! `Copy + Ord + Hash` so they can key maps without ceremony.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Generate a typed ID wrapper around a `Uuid`.
macro_rules! uuid_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident;) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
        #[serde(transparent)]
        $vis struct $name(pub Uuid);

        impl $name {
            /// A fresh random identifier.
            pub fn new_v4() -> Self {
                Self(Uuid::new_v4())
            }

            /// The all-zero identifier.
            pub const NIL: $name = $name(Uuid::nil());

            #[inline]
            pub fn is_nil(self) -> bool {
                self.0.is_nil()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<Uuid> for $name {
            #[inline]
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s).map($name)
            }
        }
    };
}

uuid_id! {
    /// Identifies one lost-person instance (one active search case).
    pub struct LpiId;
}

uuid_id! {
    /// Identifies one planned or completed search.
    pub struct SearchId;
}

//! Process-unique identifiers for games, scenes and game objects

use std::sync::atomic::{AtomicU64, Ordering};

/// Global counter shared by every id type
static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Generate a new unique id
pub(crate) fn next_id() -> u64 {
    NEXT_ID.fetch_add(1, Ordering::Relaxed)
}

/// Declare a copyable id newtype backed by [`next_id`]
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(u64);

        impl $name {
            /// Allocate a fresh id
            #[must_use]
            pub(crate) fn next() -> Self {
                Self($crate::core::id::next_id())
            }

            /// Raw numeric value
            #[must_use]
            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!($prefix, "#{}"), self.0)
            }
        }
    };
}

pub(crate) use define_id;

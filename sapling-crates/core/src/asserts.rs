//! Leveled assertions for the heuristic core.
//!
//! Hot-path contracts (foreign tuple ids, monotone layers, acyclic supports) are checked with these
//! macros rather than with plain `assert!`, so that the expensive checks can be compiled out of
//! release builds while tests always run them.

#[cfg(all(not(test), not(feature = "debug-checks")))]
pub const SAPLING_ASSERT_LEVEL_DEFINITION: u8 = SAPLING_ASSERT_SIMPLE;

#[cfg(any(test, feature = "debug-checks"))]
pub const SAPLING_ASSERT_LEVEL_DEFINITION: u8 = SAPLING_ASSERT_ADVANCED;

pub const SAPLING_ASSERT_SIMPLE: u8 = 1;
pub const SAPLING_ASSERT_MODERATE: u8 = 2;
pub const SAPLING_ASSERT_ADVANCED: u8 = 3;

#[macro_export]
#[doc(hidden)]
macro_rules! sapling_assert_simple {
    ($($arg:tt)*) => {
        if $crate::asserts::SAPLING_ASSERT_LEVEL_DEFINITION >= $crate::asserts::SAPLING_ASSERT_SIMPLE {
            assert!($($arg)*);
        }
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! sapling_assert_eq_simple {
    ($($arg:tt)*) => {
        if $crate::asserts::SAPLING_ASSERT_LEVEL_DEFINITION >= $crate::asserts::SAPLING_ASSERT_SIMPLE {
            assert_eq!($($arg)*);
        }
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! sapling_assert_moderate {
    ($($arg:tt)*) => {
        if $crate::asserts::SAPLING_ASSERT_LEVEL_DEFINITION >= $crate::asserts::SAPLING_ASSERT_MODERATE {
            assert!($($arg)*);
        }
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! sapling_assert_advanced {
    ($($arg:tt)*) => {
        if $crate::asserts::SAPLING_ASSERT_LEVEL_DEFINITION >= $crate::asserts::SAPLING_ASSERT_ADVANCED {
            assert!($($arg)*);
        }
    };
}

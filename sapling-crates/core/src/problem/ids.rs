use std::fmt::Display;
use std::fmt::Formatter;

use crate::containers::StorageKey;

/// The value (object) a variable can take. Objects are identified by integers; symbolic objects
/// are numbered by whoever grounds the problem.
pub type Value = i32;

macro_rules! define_id {
    ($(#[$documentation:meta])* $name:ident, $prefix:literal) => {
        $(#[$documentation])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
        pub struct $name(pub(crate) u32);

        impl $name {
            pub fn new(id: u32) -> Self {
                $name(id)
            }

            pub fn id(self) -> u32 {
                self.0
            }
        }

        impl StorageKey for $name {
            fn index(&self) -> usize {
                self.0 as usize
            }

            fn create_from_index(index: usize) -> Self {
                $name(index as u32)
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }
    };
}

define_id!(
    /// Handle of a problem fluent; every variable has a fixed, finite set of candidate values.
    VariableId,
    "v"
);

define_id!(
    /// Handle of a ground action owned by the [`Problem`](super::Problem).
    ActionId,
    "a"
);

define_id!(
    /// Dense id of an [`Atom`](super::Atom), assigned once by the [`AtomIndex`](super::AtomIndex).
    TupleId,
    "t"
);

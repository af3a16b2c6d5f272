use std::ops::{Deref, DerefMut};

use crate::Vector;

/// Declares a struct naming the elements of an `N`-element vector, and lets vectors of that size
/// deref to it.
macro_rules! coords {
    ($name:ident, $n:literal, $($field:ident),+) => {
        #[doc = concat!("Named elements of a ", $n, "-element [`Vector`].")]
        #[repr(C)]
        #[non_exhaustive]
        pub struct $name<T> {
            $(pub $field: T,)+
        }

        impl<T> Deref for Vector<T, $n> {
            type Target = $name<T>;

            fn deref(&self) -> &$name<T> {
                // SAFETY: `Vector<T, N>` is a transparent `[T; N]`, and the `repr(C)` struct
                // consists of exactly `N` fields of type `T`, so both share size, alignment and
                // element offsets.
                unsafe { &*(self as *const Self).cast::<$name<T>>() }
            }
        }

        impl<T> DerefMut for Vector<T, $n> {
            fn deref_mut(&mut self) -> &mut $name<T> {
                // SAFETY: see `Deref`.
                unsafe { &mut *(self as *mut Self).cast::<$name<T>>() }
            }
        }
    };
}

coords!(Coords2, 2, x, y);
coords!(Coords3, 3, x, y, z);
coords!(Coords4, 4, x, y, z, w);

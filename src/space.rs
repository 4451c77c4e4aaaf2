//! Inline storage spaces.
//!
//! A space type only contributes its size and alignment: the capacity of an
//! [`InplaceFunction`](crate::InplaceFunction) is `size_of::<Space>()` and its
//! alignment is `align_of::<Space>()`. The space value itself is never
//! constructed nor dropped.
//!
//! ```
//! use core::mem::{align_of, size_of};
//! use inplace_fn::space::{Aligned, A8, S4};
//!
//! assert_eq!(size_of::<S4>(), 4 * size_of::<usize>());
//! assert_eq!(size_of::<Aligned<A8, 24>>(), 24);
//! assert_eq!(align_of::<Aligned<A8, 24>>(), 8);
//! ```

use core::mem::MaybeUninit;

/// Space of 1 `usize`
pub struct S1 {
    _inner: [usize; 1],
}

/// Space of 2 `usize`s
pub struct S2 {
    _inner: [usize; 2],
}

/// Space of 4 `usize`s
pub struct S4 {
    _inner: [usize; 4],
}

/// Space of 8 `usize`s
pub struct S8 {
    _inner: [usize; 8],
}

/// Space of 16 `usize`s
pub struct S16 {
    _inner: [usize; 16],
}

/// Space of 32 `usize`s
pub struct S32 {
    _inner: [usize; 32],
}

/// Space of 64 `usize`s
pub struct S64 {
    _inner: [usize; 64],
}

macro_rules! alignments {
    ($($name:ident => $align:literal),* $(,)?) => {$(
        #[doc = concat!("Alignment marker of ", stringify!($align), " bytes.")]
        #[repr(align($align))]
        pub struct $name;
    )*};
}

alignments! {
    A1 => 1,
    A2 => 2,
    A4 => 4,
    A8 => 8,
    A16 => 16,
    A32 => 32,
    A64 => 64,
}

/// The largest alignment a scalar type needs on mainstream targets.
pub type MaxAlign = A16;

/// Space of exactly `N` bytes aligned as `A`.
///
/// When `N` is not a multiple of the alignment the size is rounded up,
/// like any other Rust type.
#[repr(C)]
pub struct Aligned<A, const N: usize> {
    _align: [A; 0],
    _bytes: [MaybeUninit<u8>; N],
}

/// 32 bytes with [`MaxAlign`] alignment.
pub type DefaultSpace = Aligned<MaxAlign, 32>;

//! Per-type invokers and managers.
//!
//! Storing a target of type `F` selects two monomorphized functions: an
//! invoker that calls the `F` living in the storage, and a manager that
//! destroys, moves or copies it. The container only keeps the two function
//! pointers and never needs to name `F` again.

use core::marker::PhantomData;
use core::mem::{align_of, size_of};
use core::ptr;

use crate::signature::{Callable, Signature};

/// Calls the target living in the storage.
pub(crate) type Invoker<Sig> =
    unsafe fn(*mut u8, <Sig as Signature>::Args) -> <Sig as Signature>::Output;

/// Destroys, moves or copies the target living in the storage.
///
/// The first pointer is the destination, the second one the source (null for
/// destroy).
pub type Manager<Op> = unsafe fn(*mut u8, *const u8, Op);

mod sealed {
    pub trait Sealed {}

    impl Sealed for super::Copyable {}
    impl Sealed for super::MoveOnly {}
}

/// Operations of a [`Copyable`] manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyableOp {
    /// Drop the target in place.
    Destroy,
    /// Move the target from the source into the destination.
    Move,
    /// Clone the target from the source into the destination.
    Copy,
}

/// Operations of a [`MoveOnly`] manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOnlyOp {
    /// Drop the target in place.
    Destroy,
    /// Move the target from the source into the destination.
    Move,
}

/// Whether a container can be cloned.
///
/// Implemented by [`Copyable`] and [`MoveOnly`] only.
pub trait Mode: sealed::Sealed {
    /// Operation tag understood by the managers of this mode.
    type Op: Copy;

    /// Tag for dropping a target.
    const DESTROY: Self::Op;

    /// Tag for moving a target.
    const MOVE: Self::Op;
}

/// Containers in this mode implement [`Clone`]; every target must be `Clone`.
#[derive(Debug)]
pub struct Copyable;

/// Containers in this mode can only be moved; targets need not be `Clone`.
#[derive(Debug)]
pub struct MoveOnly;

impl Mode for Copyable {
    type Op = CopyableOp;

    const DESTROY: CopyableOp = CopyableOp::Destroy;
    const MOVE: CopyableOp = CopyableOp::Move;
}

impl Mode for MoveOnly {
    type Op = MoveOnlyOp;

    const DESTROY: MoveOnlyOp = MoveOnlyOp::Destroy;
    const MOVE: MoveOnlyOp = MoveOnlyOp::Move;
}

/// Provides the manager of targets of type `F` for a [`Mode`].
///
/// [`Copyable`] implements it for every `F: Clone` and [`MoveOnly`] for
/// every `F`, so storing a non-`Clone` target in a copyable container does
/// not build.
///
/// # Safety
///
/// `MANAGER` must treat both pointers as pointing to a valid, suitably aligned
/// `F` and honor each operation exactly.
pub unsafe trait Manage<F>: Mode {
    /// The manager of `F`.
    const MANAGER: Manager<Self::Op>;
}

unsafe impl<F: Clone> Manage<F> for Copyable {
    const MANAGER: Manager<CopyableOp> = manage_copyable::<F>;
}

unsafe impl<F> Manage<F> for MoveOnly {
    const MANAGER: Manager<MoveOnlyOp> = manage_move_only::<F>;
}

unsafe fn manage_move_only<F>(dst: *mut u8, src: *const u8, op: MoveOnlyOp) {
    let dst = dst.cast::<F>();
    match op {
        MoveOnlyOp::Destroy => unsafe { ptr::drop_in_place(dst) },
        // the source is vacated and must not be dropped again
        MoveOnlyOp::Move => unsafe { ptr::write(dst, ptr::read(src.cast::<F>())) },
    }
}

unsafe fn manage_copyable<F: Clone>(dst: *mut u8, src: *const u8, op: CopyableOp) {
    match op {
        CopyableOp::Copy => unsafe {
            let source = &*src.cast::<F>();
            ptr::write(dst.cast::<F>(), source.clone());
        },
        CopyableOp::Destroy => unsafe { manage_move_only::<F>(dst, src, MoveOnlyOp::Destroy) },
        CopyableOp::Move => unsafe { manage_move_only::<F>(dst, src, MoveOnlyOp::Move) },
    }
}

/// The invoker of targets of type `F`.
pub(crate) unsafe fn invoke<F, Sig>(data: *mut u8, args: Sig::Args) -> Sig::Output
where
    Sig: Signature,
    F: Callable<Sig>,
{
    let target = unsafe { &mut *data.cast::<F>() };
    target.call_with(args)
}

/// Moves or copies a target between two storages.
///
/// Bare function pointers have no manager and are copied bitwise.
///
/// # Safety
///
/// `src` must hold a live target described by `manager` and `dst` must be
/// storage able to receive it.
pub(crate) unsafe fn transfer<Sig, Op>(
    manager: Option<Manager<Op>>,
    op: Op,
    dst: *mut u8,
    src: *const u8,
) {
    match manager {
        Some(manage) => unsafe { manage(dst, src, op) },
        None => unsafe { ptr::copy_nonoverlapping(src, dst, size_of::<Sig>()) },
    }
}

/// Build-time check that a `T` can live in a `Space`.
pub(crate) struct Fits<T, Space>(PhantomData<(T, Space)>);

impl<T, Space> Fits<T, Space> {
    pub(crate) const ASSERT: () = {
        assert!(
            size_of::<T>() <= size_of::<Space>(),
            "value too big to fit in the inline space"
        );
        assert!(
            align_of::<Space>() % align_of::<T>() == 0,
            "value alignment incompatible with the inline space"
        );
    };
}

use core::any::type_name;
use core::cell::UnsafeCell;
use core::fmt;
use core::marker::PhantomData;
use core::mem::{self, align_of, size_of, MaybeUninit};
use core::ptr;

use crate::erased::{self, Copyable, CopyableOp, Fits, Invoker, Manage, Manager, Mode};
use crate::error::EmptyFunctionError;
use crate::signature::{Callable, Signature};
use crate::space::DefaultSpace;
use crate::trace::trace_op;

/// The null marker.
///
/// An [`InplaceFunction`] compares equal to `Null` iff it is empty, and
/// converting `Null` into a container yields an empty one.
///
/// ```
/// use inplace_fn::{InplaceFunction, Null};
///
/// let mut f: InplaceFunction<fn() -> u8> = InplaceFunction::new(|| 1);
/// assert!(f != Null);
///
/// f = Null.into();
/// assert!(f == Null);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Null;

/// A function wrapper storing its target inline, without allocation.
///
/// * `Sig` is the call signature, spelled as a function pointer type.
/// * `Space` sets the capacity (`size_of::<Space>()`) and alignment
///   (`align_of::<Space>()`) of the inline storage, see [`space`](crate::space).
/// * `M` is [`Copyable`] or [`MoveOnly`](crate::MoveOnly).
///
/// A target that does not fit the storage is rejected at build time.
///
/// # Example
///
/// ```
/// use inplace_fn::InplaceFunction;
/// use inplace_fn::space::S4;
///
/// let k = 5;
/// let mut f: InplaceFunction<fn(i32) -> i32, S4> = InplaceFunction::new(move |x: i32| x + k);
/// assert_eq!(f.call(3), Ok(8));
/// ```
pub struct InplaceFunction<Sig: Signature, Space = DefaultSpace, M: Mode = Copyable> {
    invoker: Option<Invoker<Sig>>,
    manager: Option<Manager<M::Op>>,
    // a target's `Clone` may mutate it through a shared reference
    space: UnsafeCell<MaybeUninit<Space>>,
    // not thread-safe: the target is neither required to be `Send` nor `Sync`
    _marker: PhantomData<(*const (), M)>,
}

impl<Sig: Signature, Space, M: Mode> InplaceFunction<Sig, Space, M> {
    /// Byte size of the inline storage.
    pub const CAPACITY: usize = size_of::<Space>();

    /// Alignment of the inline storage.
    pub const ALIGNMENT: usize = align_of::<Space>();

    /// Creates an empty function.
    ///
    /// # Example
    ///
    /// ```
    /// use inplace_fn::{EmptyFunctionError, InplaceFunction};
    ///
    /// let mut f: InplaceFunction<fn()> = InplaceFunction::empty();
    /// assert!(f.is_empty());
    /// assert_eq!(f.call(), Err(EmptyFunctionError));
    /// ```
    pub const fn empty() -> Self {
        InplaceFunction {
            invoker: None,
            manager: None,
            space: UnsafeCell::new(MaybeUninit::uninit()),
            _marker: PhantomData,
        }
    }

    /// Stores `target` inline.
    ///
    /// Fails to build if `F` is larger than the storage or its alignment does
    /// not divide the storage alignment.
    ///
    /// ```compile_fail
    /// use inplace_fn::InplaceFunction;
    /// use inplace_fn::space::S1;
    ///
    /// let table = [1usize, 2, 3];
    /// let f: InplaceFunction<fn(usize) -> usize, S1> =
    ///     InplaceFunction::new(move |i: usize| table[i]);
    /// ```
    pub fn new<F>(target: F) -> Self
    where
        F: Callable<Sig> + 'static,
        M: Manage<F>,
    {
        let mut result = Self::empty();
        result.store(target);
        result
    }

    /// Stores a bare function pointer. No manager is installed for it.
    ///
    /// # Example
    ///
    /// ```
    /// use inplace_fn::InplaceFunction;
    ///
    /// fn square(x: u32) -> u32 {
    ///     x * x
    /// }
    ///
    /// let mut f: InplaceFunction<fn(u32) -> u32> = InplaceFunction::from_fn(square);
    /// assert_eq!(f.call(9), Ok(81));
    /// ```
    pub fn from_fn(function: Sig) -> Self
    where
        Sig: Callable<Sig>,
    {
        let mut result = Self::empty();
        result.store_fn(function);
        result
    }

    /// Replaces the target, dropping the previous one first.
    pub fn set<F>(&mut self, target: F)
    where
        F: Callable<Sig> + 'static,
        M: Manage<F>,
    {
        self.clear();
        self.store(target);
    }

    /// Replaces the target with a bare function pointer, dropping the
    /// previous target first.
    pub fn set_fn(&mut self, function: Sig)
    where
        Sig: Callable<Sig>,
    {
        self.clear();
        self.store_fn(function);
    }

    /// Drops the target, if any, leaving the function empty.
    pub fn clear(&mut self) {
        self.invoker = None;
        if let Some(manage) = self.manager.take() {
            trace_op!(capacity = Self::CAPACITY, "destroy target");
            unsafe { manage(self.data_mut(), ptr::null(), M::DESTROY) }
        }
    }

    /// Returns true if a target is stored.
    #[inline]
    pub fn is_some(&self) -> bool {
        self.invoker.is_some()
    }

    /// Returns true if no target is stored.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.invoker.is_none()
    }

    /// Calls the target with an argument tuple.
    ///
    /// The per-arity `call` methods forward here.
    ///
    /// # Example
    ///
    /// ```
    /// use inplace_fn::InplaceFunction;
    ///
    /// let mut f: InplaceFunction<fn(u8, u8) -> u16> =
    ///     InplaceFunction::new(|a: u8, b: u8| u16::from(a) * u16::from(b));
    /// assert_eq!(f.call_with((16, 16)), Ok(256));
    /// ```
    #[inline]
    pub fn call_with(&mut self, args: Sig::Args) -> Result<Sig::Output, EmptyFunctionError> {
        match self.invoker {
            Some(invoker) => Ok(unsafe { invoker(self.data_mut(), args) }),
            None => Err(EmptyFunctionError),
        }
    }

    /// Moves the target out, leaving this function empty.
    ///
    /// # Example
    ///
    /// ```
    /// use inplace_fn::{EmptyFunctionError, InplaceFunction};
    ///
    /// let mut f: InplaceFunction<fn() -> u8> = InplaceFunction::new(|| 1);
    /// let mut g = f.take();
    /// assert_eq!(g.call(), Ok(1));
    /// assert_eq!(f.call(), Err(EmptyFunctionError));
    /// ```
    pub fn take(&mut self) -> Self {
        mem::replace(self, Self::empty())
    }

    /// Moves the target of `other` into this function, dropping the previous
    /// target first. `other` is left empty.
    ///
    /// `other` may have a smaller storage; a larger one, or one whose
    /// alignment does not divide this storage alignment, fails to build.
    ///
    /// ```compile_fail
    /// use inplace_fn::InplaceFunction;
    /// use inplace_fn::space::S1;
    ///
    /// let mut wide: InplaceFunction<fn()> = InplaceFunction::new(|| ());
    /// let mut narrow: InplaceFunction<fn(), S1> = InplaceFunction::empty();
    /// narrow.move_from(&mut wide);
    /// ```
    ///
    /// A wider storage with a smaller alignment is rejected as well:
    ///
    /// ```compile_fail
    /// use inplace_fn::InplaceFunction;
    /// use inplace_fn::space::{Aligned, A4, S1};
    ///
    /// let mut src: InplaceFunction<fn(), S1> = InplaceFunction::new(|| ());
    /// let mut dst: InplaceFunction<fn(), Aligned<A4, 64>> = InplaceFunction::empty();
    /// dst.move_from(&mut src);
    /// ```
    pub fn move_from<OtherSpace>(&mut self, other: &mut InplaceFunction<Sig, OtherSpace, M>) {
        let () = Fits::<OtherSpace, Space>::ASSERT;

        self.clear();
        if other.is_empty() {
            return;
        }

        trace_op!(
            from_capacity = size_of::<OtherSpace>(),
            to_capacity = Self::CAPACITY,
            "move target"
        );
        unsafe { erased::transfer::<Sig, _>(other.manager, M::MOVE, self.data_mut(), other.data()) }
        self.invoker = other.invoker.take();
        self.manager = other.manager.take();
    }

    /// Moves the target into a function with a larger storage.
    ///
    /// # Example
    ///
    /// ```
    /// use inplace_fn::InplaceFunction;
    /// use inplace_fn::space::{S2, S8};
    ///
    /// let s: InplaceFunction<fn() -> usize, S2> = InplaceFunction::new(|| 2);
    /// let mut l: InplaceFunction<fn() -> usize, S8> = s.resize();
    /// assert_eq!(l.call(), Ok(2));
    /// ```
    ///
    /// Shrinking fails to build:
    ///
    /// ```compile_fail
    /// use inplace_fn::InplaceFunction;
    /// use inplace_fn::space::{S2, S8};
    ///
    /// let l: InplaceFunction<fn() -> usize, S8> = InplaceFunction::new(|| 8);
    /// let s: InplaceFunction<fn() -> usize, S2> = l.resize();
    /// ```
    pub fn resize<ToSpace>(mut self) -> InplaceFunction<Sig, ToSpace, M> {
        let mut result = InplaceFunction::empty();
        result.move_from(&mut self);
        result
    }

    /// Exchanges the targets of two functions.
    ///
    /// # Example
    ///
    /// ```
    /// use inplace_fn::InplaceFunction;
    ///
    /// let mut a: InplaceFunction<fn() -> char> = InplaceFunction::new(|| 'a');
    /// let mut b: InplaceFunction<fn() -> char> = InplaceFunction::empty();
    /// a.swap(&mut b);
    /// assert!(a.is_empty());
    /// assert_eq!(b.call(), Ok('a'));
    /// ```
    pub fn swap(&mut self, other: &mut Self) {
        trace_op!(
            capacity = Self::CAPACITY,
            left = self.is_some(),
            right = other.is_some(),
            "swap targets"
        );

        let mut buffer = MaybeUninit::<Space>::uninit();
        let temp = buffer.as_mut_ptr().cast::<u8>();
        let (mine, theirs) = (self.is_some(), other.is_some());
        unsafe {
            if mine {
                erased::transfer::<Sig, _>(self.manager, M::MOVE, temp, self.data());
            }
            if theirs {
                erased::transfer::<Sig, _>(other.manager, M::MOVE, self.data_mut(), other.data());
            }
            if mine {
                erased::transfer::<Sig, _>(self.manager, M::MOVE, other.data_mut(), temp);
            }
        }
        mem::swap(&mut self.invoker, &mut other.invoker);
        mem::swap(&mut self.manager, &mut other.manager);
    }

    fn store<F>(&mut self, target: F)
    where
        F: Callable<Sig> + 'static,
        M: Manage<F>,
    {
        let () = Fits::<F, Space>::ASSERT;

        trace_op!(
            target_type = type_name::<F>(),
            size = size_of::<F>(),
            capacity = Self::CAPACITY,
            "store target"
        );
        unsafe { ptr::write(self.data_mut().cast::<F>(), target) }
        self.manager = Some(<M as Manage<F>>::MANAGER);
        self.invoker = Some(erased::invoke::<F, Sig>);
    }

    fn store_fn(&mut self, function: Sig)
    where
        Sig: Callable<Sig>,
    {
        let () = Fits::<Sig, Space>::ASSERT;

        trace_op!(signature = type_name::<Sig>(), "store function pointer");
        unsafe { ptr::write(self.data_mut().cast::<Sig>(), function) }
        self.manager = None;
        self.invoker = Some(erased::invoke::<Sig, Sig>);
    }

    #[inline]
    fn data(&self) -> *const u8 {
        self.space.get().cast_const().cast()
    }

    #[inline]
    fn data_mut(&mut self) -> *mut u8 {
        self.space.get().cast()
    }
}

impl<Sig: Signature, Space> InplaceFunction<Sig, Space, Copyable> {
    /// Replaces the target with a clone of the target of `other`, dropping the
    /// previous target first.
    ///
    /// `other` may have a smaller storage, under the same rules as
    /// [`move_from`](Self::move_from). If cloning the target panics, this
    /// function is left empty.
    pub fn copy_from<OtherSpace>(&mut self, other: &InplaceFunction<Sig, OtherSpace, Copyable>) {
        let () = Fits::<OtherSpace, Space>::ASSERT;

        self.clear();
        if other.is_empty() {
            return;
        }

        trace_op!(
            from_capacity = size_of::<OtherSpace>(),
            to_capacity = Self::CAPACITY,
            "copy target"
        );
        unsafe {
            erased::transfer::<Sig, _>(other.manager, CopyableOp::Copy, self.data_mut(), other.data())
        }
        self.invoker = other.invoker;
        self.manager = other.manager;
    }

    /// Clones the target into a function with a larger storage.
    ///
    /// # Example
    ///
    /// ```
    /// use inplace_fn::InplaceFunction;
    /// use inplace_fn::space::{S1, S4};
    ///
    /// let mut s: InplaceFunction<fn() -> u8, S1> = InplaceFunction::new(|| 1);
    /// let mut l: InplaceFunction<fn() -> u8, S4> = s.resize_cloned();
    /// assert_eq!(s.call(), l.call());
    /// ```
    pub fn resize_cloned<ToSpace>(&self) -> InplaceFunction<Sig, ToSpace, Copyable> {
        let mut result = InplaceFunction::empty();
        result.copy_from(self);
        result
    }
}

macro_rules! call {
    ($($arg:ident $var:ident),*) => {
        impl<Ret, $($arg,)* Space, M: Mode> InplaceFunction<fn($($arg),*) -> Ret, Space, M> {
            /// Calls the target.
            ///
            /// Returns [`EmptyFunctionError`] if no target is stored.
            #[inline]
            pub fn call(&mut self, $($var: $arg),*) -> Result<Ret, EmptyFunctionError> {
                self.call_with(($($var,)*))
            }
        }
    };
}

call!();
call!(A a);
call!(A a, B b);
call!(A a, B b, C c);
call!(A a, B b, C c, D d);
call!(A a, B b, C c, D d, E e);
call!(A a, B b, C c, D d, E e, F f);
call!(A a, B b, C c, D d, E e, F f, G g);
call!(A a, B b, C c, D d, E e, F f, G g, H h);

/// Clones the target.
///
/// Only copyable functions implement `Clone`:
///
/// ```compile_fail
/// use inplace_fn::{InplaceFunction, MoveOnly};
/// use inplace_fn::space::DefaultSpace;
///
/// let f: InplaceFunction<fn(), DefaultSpace, MoveOnly> = InplaceFunction::new(|| ());
/// let g = f.clone();
/// ```
impl<Sig: Signature, Space> Clone for InplaceFunction<Sig, Space, Copyable> {
    fn clone(&self) -> Self {
        self.resize_cloned()
    }

    fn clone_from(&mut self, source: &Self) {
        self.copy_from(source);
    }
}

impl<Sig: Signature, Space, M: Mode> Drop for InplaceFunction<Sig, Space, M> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<Sig: Signature, Space, M: Mode> Default for InplaceFunction<Sig, Space, M> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<Sig: Signature, Space, M: Mode> From<Null> for InplaceFunction<Sig, Space, M> {
    fn from(_: Null) -> Self {
        Self::empty()
    }
}

impl<Sig: Signature, Space, M: Mode> PartialEq<Null> for InplaceFunction<Sig, Space, M> {
    #[inline]
    fn eq(&self, _: &Null) -> bool {
        self.is_empty()
    }
}

impl<Sig: Signature, Space, M: Mode> PartialEq<InplaceFunction<Sig, Space, M>> for Null {
    #[inline]
    fn eq(&self, other: &InplaceFunction<Sig, Space, M>) -> bool {
        other.is_empty()
    }
}

impl<Sig: Signature, Space, M: Mode> fmt::Debug for InplaceFunction<Sig, Space, M> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("InplaceFunction")
            .field("signature", &type_name::<Sig>())
            .field("capacity", &Self::CAPACITY)
            .field("alignment", &Self::ALIGNMENT)
            .field("is_some", &self.is_some())
            .finish()
    }
}

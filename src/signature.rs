//! Call signatures.
//!
//! A signature is spelled as a function pointer type, `fn(i32) -> i32` or
//! `fn()`, and unpacks into an argument tuple and an output type.

mod sealed {
    pub trait Sealed {}
}

/// A call signature: a function pointer type taking up to eight arguments.
///
/// Argument types are fixed types; signatures generic over a lifetime, such
/// as `fn(&str) -> usize`, are not supported.
pub trait Signature: sealed::Sealed {
    /// The arguments, as a tuple.
    type Args;

    /// The return type.
    type Output;
}

/// A callable that can be stored in a container with signature `Sig`.
///
/// Every `FnMut` with a matching signature implements it. Functor types can
/// implement it directly:
///
/// ```
/// use inplace_fn::{Callable, InplaceFunction};
///
/// #[derive(Clone)]
/// struct Adder(i32);
///
/// impl Callable<fn(i32) -> i32> for Adder {
///     fn call_with(&mut self, (x,): (i32,)) -> i32 {
///         x + self.0
///     }
/// }
///
/// let mut f: InplaceFunction<fn(i32) -> i32> = InplaceFunction::new(Adder(5));
/// assert_eq!(f.call(3), Ok(8));
/// ```
pub trait Callable<Sig: Signature> {
    /// Calls with the argument tuple.
    fn call_with(&mut self, args: Sig::Args) -> Sig::Output;
}

macro_rules! signature {
    ($($arg:ident $var:ident),*) => {
        impl<Ret, $($arg),*> sealed::Sealed for fn($($arg),*) -> Ret {}

        impl<Ret, $($arg),*> Signature for fn($($arg),*) -> Ret {
            type Args = ($($arg,)*);
            type Output = Ret;
        }

        impl<Func, Ret, $($arg),*> Callable<fn($($arg),*) -> Ret> for Func
        where
            Func: FnMut($($arg),*) -> Ret,
        {
            #[inline]
            fn call_with(&mut self, ($($var,)*): ($($arg,)*)) -> Ret {
                self($($var),*)
            }
        }
    };
}

signature!();
signature!(A a);
signature!(A a, B b);
signature!(A a, B b, C c);
signature!(A a, B b, C c, D d);
signature!(A a, B b, C c, D d, E e);
signature!(A a, B b, C c, D d, E e, F f);
signature!(A a, B b, C c, D d, E e, F f, G g);
signature!(A a, B b, C c, D d, E e, F f, G g, H h);

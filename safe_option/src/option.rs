use std::cmp::Ordering;
use std::fmt;
use std::future::Future;
use std::hash::{Hash, Hasher};
use std::mem::{ManuallyDrop, MaybeUninit};
use std::ptr;

use crate::error::{unwrap_failed, UnwrapOnNoneError};
use crate::nominal::{NominalTag, NOMINAL_TAG};

/// Option type with a stable in-memory identity.
///
/// Works like `std::option::Option`, but every instance begins with the
/// [`UNIVERSAL_NOMINALITY`][crate::UNIVERSAL_NOMINALITY] marker bytes, so
/// [`is_option`][crate::is_option] can recognize instances made by a
/// different compiled copy of this crate.
///
/// The only ways to make one are [`some`][Self::some], [`none`][Self::none]
/// and the conversions built on them; the variant of an instance never
/// changes after construction.
#[repr(C)]
pub struct SOption<T> {
    nominal: NominalTag,
    is_some: bool,
    value: MaybeUninit<T>,
}

impl<T> SOption<T> {
    pub fn some(value: T) -> Self {
        Self {
            nominal: NOMINAL_TAG,
            is_some: true,
            value: MaybeUninit::new(value),
        }
    }

    pub const fn none() -> Self {
        Self {
            nominal: NOMINAL_TAG,
            is_some: false,
            value: MaybeUninit::uninit(),
        }
    }

    pub fn from_option(option: Option<T>) -> Self {
        match option {
            Some(value) => Self::some(value),
            None => Self::none(),
        }
    }

    /// `None` for a null pointer, otherwise borrows the pointee.
    ///
    /// # Safety
    ///
    /// A non-null `ptr` must point to a live `T` valid for reads for the
    /// whole lifetime `'a`.
    pub unsafe fn from_ptr<'a>(ptr: *const T) -> SOption<&'a T>
    where
        T: 'a,
    {
        if ptr.is_null() {
            SOption::none()
        } else {
            SOption::some(unsafe { &*ptr })
        }
    }

    pub fn is_some(&self) -> bool {
        self.is_some
    }

    pub fn is_none(&self) -> bool {
        !self.is_some
    }

    /// Vacuous truth: `None` satisfies any predicate about its (nonexistent)
    /// content. On `Some` this is just the predicate.
    pub fn is(&self, predicate: impl FnOnce(&T) -> bool) -> bool {
        match self.as_option_ref() {
            Some(value) => predicate(value),
            None => true,
        }
    }

    pub fn as_option_ref(&self) -> Option<&T> {
        if self.is_some {
            Some(unsafe { self.value.assume_init_ref() })
        } else {
            None
        }
    }

    pub fn as_option_mut(&mut self) -> Option<&mut T> {
        if self.is_some {
            Some(unsafe { self.value.assume_init_mut() })
        } else {
            None
        }
    }

    pub fn into_option(self) -> Option<T> {
        let this = ManuallyDrop::new(self);
        if this.is_some {
            Some(unsafe { this.value.assume_init_read() })
        } else {
            None
        }
    }

    /// Pointer to the contained value, null when `None`.
    pub fn as_ptr(&self) -> *const T {
        if self.is_some {
            self.value.as_ptr()
        } else {
            ptr::null()
        }
    }

    pub fn map<U>(self, map_fn: impl FnOnce(T) -> U) -> SOption<U> {
        match self.into_option() {
            Some(value) => SOption::some(map_fn(value)),
            None => SOption::none(),
        }
    }

    pub async fn map_async<U, F, Fut>(self, map_fn: F) -> SOption<U>
    where
        F: FnOnce(T) -> Fut,
        Fut: Future<Output = U>,
    {
        match self.into_option() {
            Some(value) => SOption::some(map_fn(value).await),
            None => SOption::none(),
        }
    }

    pub fn and<U>(self, other: SOption<U>) -> SOption<U> {
        if self.is_some {
            other
        } else {
            SOption::none()
        }
    }

    pub fn or(self, other: SOption<T>) -> SOption<T> {
        if self.is_some {
            self
        } else {
            other
        }
    }

    pub fn and_then<U>(self, and_then_fn: impl FnOnce(T) -> SOption<U>) -> SOption<U> {
        match self.into_option() {
            Some(value) => and_then_fn(value),
            None => SOption::none(),
        }
    }

    pub async fn and_then_async<U, F, Fut>(self, and_then_fn: F) -> SOption<U>
    where
        F: FnOnce(T) -> Fut,
        Fut: Future<Output = SOption<U>>,
    {
        match self.into_option() {
            Some(value) => and_then_fn(value).await,
            None => SOption::none(),
        }
    }

    pub fn or_else(self, or_else_fn: impl FnOnce() -> SOption<T>) -> SOption<T> {
        if self.is_some {
            self
        } else {
            or_else_fn()
        }
    }

    pub async fn or_else_async<F, Fut>(self, or_else_fn: F) -> SOption<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = SOption<T>>,
    {
        if self.is_some {
            self
        } else {
            or_else_fn().await
        }
    }

    pub fn filter(self, predicate: impl FnOnce(&T) -> bool) -> SOption<T> {
        match self.into_option() {
            Some(value) if predicate(&value) => SOption::some(value),
            _ => SOption::none(),
        }
    }

    pub async fn filter_async<F, Fut>(self, predicate: F) -> SOption<T>
    where
        F: FnOnce(&T) -> Fut,
        Fut: Future<Output = bool>,
    {
        match self.into_option() {
            Some(value) => {
                if predicate(&value).await {
                    SOption::some(value)
                } else {
                    SOption::none()
                }
            }
            None => SOption::none(),
        }
    }

    pub fn filter_map<U>(self, filter_map_fn: impl FnOnce(T) -> SOption<U>) -> SOption<U> {
        match self.into_option() {
            Some(value) => filter_map_fn(value),
            None => SOption::none(),
        }
    }

    pub async fn filter_map_async<U, F, Fut>(self, filter_map_fn: F) -> SOption<U>
    where
        F: FnOnce(T) -> Fut,
        Fut: Future<Output = SOption<U>>,
    {
        match self.into_option() {
            Some(value) => filter_map_fn(value).await,
            None => SOption::none(),
        }
    }

    pub fn zip<U>(self, other: SOption<U>) -> SOption<(T, U)> {
        zip(self, other)
    }

    /// Awaits the wrapped future. `None` resolves immediately without
    /// polling anything.
    pub async fn awaited(self) -> SOption<T::Output>
    where
        T: Future,
    {
        match self.into_option() {
            Some(future) => SOption::some(future.await),
            None => SOption::none(),
        }
    }

    pub fn unwrap_or(self, default: T) -> T {
        match self.into_option() {
            Some(value) => value,
            None => default,
        }
    }

    pub fn unwrap_or_else(self, else_fn: impl FnOnce() -> T) -> T {
        match self.into_option() {
            Some(value) => value,
            None => else_fn(),
        }
    }

    pub async fn unwrap_or_else_async<F, Fut>(self, else_fn: F) -> T
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        match self.into_option() {
            Some(value) => value,
            None => else_fn().await,
        }
    }

    pub fn unwrap_or_default(self) -> T
    where
        T: Default,
    {
        match self.into_option() {
            Some(value) => value,
            None => T::default(),
        }
    }

    /// # Panics
    ///
    /// Panics on `None` with an [`UnwrapOnNoneError`] payload whose
    /// `is_user_message()` is `false`.
    pub fn unwrap(self) -> T {
        match self.into_option() {
            Some(value) => value,
            None => unwrap_failed(UnwrapOnNoneError::internal(
                "called `unwrap()` on a `None` value",
            )),
        }
    }

    /// # Panics
    ///
    /// Panics on `None` with an [`UnwrapOnNoneError`] payload carrying
    /// `message`, marked as a user message.
    pub fn expect(self, message: &str) -> T {
        match self.into_option() {
            Some(value) => value,
            None => unwrap_failed(UnwrapOnNoneError::new(message)),
        }
    }

    pub fn try_unwrap(self) -> Result<T, UnwrapOnNoneError> {
        self.into_option()
            .ok_or_else(|| UnwrapOnNoneError::internal("called `try_unwrap()` on a `None` value"))
    }

    pub fn try_expect(self, message: &str) -> Result<T, UnwrapOnNoneError> {
        self.into_option()
            .ok_or_else(|| UnwrapOnNoneError::new(message))
    }

    /// Calls exactly one of the two branches and returns its result.
    pub fn map_or_else<R>(self, none_fn: impl FnOnce() -> R, some_fn: impl FnOnce(T) -> R) -> R {
        match self.into_option() {
            Some(value) => some_fn(value),
            None => none_fn(),
        }
    }
}

impl<T> SOption<SOption<T>> {
    pub fn flatten(self) -> SOption<T> {
        match self.into_option() {
            Some(inner) => inner,
            None => SOption::none(),
        }
    }
}

pub fn zip<T, U>(first: SOption<T>, second: SOption<U>) -> SOption<(T, U)> {
    match (first.into_option(), second.into_option()) {
        (Some(a), Some(b)) => SOption::some((a, b)),
        _ => SOption::none(),
    }
}

impl<T> Drop for SOption<T> {
    fn drop(&mut self) {
        if self.is_some {
            unsafe { self.value.assume_init_drop() };
        }
    }
}

impl<T> Default for SOption<T> {
    fn default() -> Self {
        Self::none()
    }
}

impl<T: Clone> Clone for SOption<T> {
    fn clone(&self) -> Self {
        match self.as_option_ref() {
            Some(value) => Self::some(value.clone()),
            None => Self::none(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for SOption<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_option_ref() {
            Some(value) => f.debug_tuple("Some").field(value).finish(),
            None => write!(f, "None"),
        }
    }
}

impl<T: PartialEq> PartialEq for SOption<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_option_ref() == other.as_option_ref()
    }
}

impl<T: Eq> Eq for SOption<T> {}

impl<T: PartialOrd> PartialOrd for SOption<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.as_option_ref().partial_cmp(&other.as_option_ref())
    }
}

impl<T: Ord> Ord for SOption<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_option_ref().cmp(&other.as_option_ref())
    }
}

impl<T: Hash> Hash for SOption<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_option_ref().hash(state);
    }
}

impl<T> From<Option<T>> for SOption<T> {
    fn from(option: Option<T>) -> Self {
        Self::from_option(option)
    }
}

impl<T> From<SOption<T>> for Option<T> {
    fn from(option: SOption<T>) -> Self {
        option.into_option()
    }
}

impl<'a, T> From<&'a SOption<T>> for SOption<&'a T> {
    fn from(option: &'a SOption<T>) -> Self {
        SOption::from_option(option.as_option_ref())
    }
}

impl<'a, T> From<&'a mut SOption<T>> for SOption<&'a mut T> {
    fn from(option: &'a mut SOption<T>) -> Self {
        SOption::from_option(option.as_option_mut())
    }
}

impl<T> From<T> for SOption<T> {
    fn from(value: T) -> Self {
        Self::some(value)
    }
}

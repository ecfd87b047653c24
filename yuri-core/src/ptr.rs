//! Type-erased pointers.
//!
//! Codecs and accessors move field memory around as one of these three
//! wrappers. They carry a lifetime but no type: every cast back to a concrete
//! `T` is `unsafe` and trusts the [`Shape`](crate::Shape) that produced the
//! pointer.

use core::{marker::PhantomData, mem::MaybeUninit, ptr::NonNull};

#[inline]
const fn erase<T>(ptr: *const T) -> NonNull<u8> {
    // SAFETY: every constructor is handed a reference or `&raw` address
    unsafe { NonNull::new_unchecked(ptr as *mut u8) }
}

#[inline]
const unsafe fn offset_by(base: NonNull<u8>, offset: usize) -> NonNull<u8> {
    unsafe { base.byte_add(offset) }
}

/// Memory reserved for a value that has not been written yet
#[derive(Debug, Clone, Copy)]
#[repr(transparent)]
pub struct PtrUninit<'mem>(NonNull<u8>, PhantomData<&'mem mut ()>);

impl<'mem> PtrUninit<'mem> {
    /// Points at the storage of `slot`
    #[inline]
    pub fn from_maybe_uninit<T>(slot: &'mem mut MaybeUninit<T>) -> Self {
        Self(erase(slot.as_mut_ptr()), PhantomData)
    }

    /// Moves `value` into the slot and hands back the now-initialized pointer
    ///
    /// # Safety
    ///
    /// The slot must be sized and aligned for `T`. Whatever was there before is
    /// overwritten without being dropped.
    #[inline]
    pub unsafe fn put<T>(self, value: T) -> PtrMut<'mem> {
        unsafe { self.0.cast::<T>().write(value) };
        PtrMut(self.0, PhantomData)
    }

    /// Treats the slot as initialized
    ///
    /// # Safety
    ///
    /// A valid value of the eventual read type must already live there.
    #[inline]
    pub unsafe fn assume_init(self) -> PtrMut<'mem> {
        PtrMut(self.0, PhantomData)
    }
}

/// Shared view of an initialized value. Never null; dangling only for
/// zero-sized types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct PtrConst<'mem>(NonNull<u8>, PhantomData<&'mem ()>);

// Only ever read through, like `&T` for `T: Sync` values in a shape.
unsafe impl Send for PtrConst<'_> {}
unsafe impl Sync for PtrConst<'_> {}

impl<'mem> PtrConst<'mem> {
    /// Erases `ptr`, which must not be null
    #[inline]
    pub const fn new<T>(ptr: *const T) -> Self {
        Self(erase(ptr), PhantomData)
    }

    /// Address of the value, for `{:p}` output
    #[inline]
    pub const fn as_byte_ptr(self) -> *const u8 {
        self.0.as_ptr()
    }

    /// Reinterprets the pointee as `&T`
    ///
    /// # Safety
    ///
    /// The pointee has to be a `T`. Nothing checks this.
    #[inline]
    pub const unsafe fn get<'borrow: 'mem, T>(self) -> &'borrow T {
        unsafe { self.0.cast::<T>().as_ref() }
    }

    /// Copies the pointee out bitwise
    ///
    /// # Safety
    ///
    /// The pointee has to be a `T`, and `T` has to tolerate bitwise copies
    /// (enum discriminants and other plain integers).
    #[inline]
    pub const unsafe fn read<T>(self) -> T {
        unsafe { self.0.cast::<T>().read() }
    }

    /// Moves `offset` bytes forward, to a field of the pointee
    ///
    /// # Safety
    ///
    /// `offset` has to come from the pointee's shape.
    #[inline]
    pub const unsafe fn field(self, offset: usize) -> Self {
        Self(unsafe { offset_by(self.0, offset) }, PhantomData)
    }
}

/// Exclusive view of an initialized value
#[derive(Clone, Copy, Debug)]
#[repr(transparent)]
pub struct PtrMut<'mem>(NonNull<u8>, PhantomData<&'mem mut ()>);

impl<'mem> PtrMut<'mem> {
    /// Erases `ptr`, usually taken with `&raw mut`
    #[inline]
    pub const fn new<T>(ptr: *mut T) -> Self {
        Self(erase(ptr), PhantomData)
    }

    /// Address of the value, for `{:p}` output
    #[inline]
    pub const fn as_byte_ptr(self) -> *const u8 {
        self.0.as_ptr()
    }

    /// Downgrades to a shared view of the same value
    #[inline]
    pub const fn as_const<'borrow: 'mem>(self) -> PtrConst<'borrow> {
        PtrConst(self.0, PhantomData)
    }

    /// Reinterprets the pointee as `&T`
    ///
    /// # Safety
    ///
    /// Same contract as [`PtrConst::get`].
    #[inline]
    pub const unsafe fn get<'borrow: 'mem, T>(self) -> &'borrow T {
        unsafe { self.as_const().get::<T>() }
    }

    /// Reinterprets the pointee as `&mut T`
    ///
    /// # Safety
    ///
    /// The pointee has to be a `T`, and the returned borrow must be the only
    /// live one into that memory.
    #[inline]
    pub const unsafe fn as_mut<'borrow: 'mem, T>(self) -> &'borrow mut T {
        unsafe { self.0.cast::<T>().as_mut() }
    }

    /// Moves `offset` bytes forward, to a field of the pointee
    ///
    /// # Safety
    ///
    /// `offset` has to come from the pointee's shape.
    #[inline]
    pub const unsafe fn field(self, offset: usize) -> Self {
        Self(unsafe { offset_by(self.0, offset) }, PhantomData)
    }
}

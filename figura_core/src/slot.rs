// Copyright 2025 the Figura Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Container slots that either own a child or only point at it.

use alloc::rc::{Rc, Weak};
use core::fmt;

/// A child held by its container.
///
/// Managed children are owned (the container keeps them alive); unmanaged
/// children are only referenced and must be kept alive by someone else.
pub(crate) enum Slot<T: ?Sized> {
    Owned(Rc<T>),
    Shared(Weak<T>),
}

impl<T: ?Sized> Slot<T> {
    pub(crate) fn new(child: &Rc<T>, managed: bool) -> Self {
        if managed {
            Self::Owned(Rc::clone(child))
        } else {
            Self::Shared(Rc::downgrade(child))
        }
    }

    /// The child, unless it was unmanaged and has since been dropped.
    pub(crate) fn get(&self) -> Option<Rc<T>> {
        match self {
            Self::Owned(rc) => Some(Rc::clone(rc)),
            Self::Shared(weak) => weak.upgrade(),
        }
    }

    pub(crate) fn points_to(&self, child: *const T) -> bool {
        let ptr = match self {
            Self::Owned(rc) => Rc::as_ptr(rc),
            Self::Shared(weak) => weak.as_ptr(),
        };
        core::ptr::addr_eq(ptr, child)
    }
}

impl<T: ?Sized> fmt::Debug for Slot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Owned(_) => f.write_str("Owned"),
            Self::Shared(weak) => write!(f, "Shared(alive: {})", weak.strong_count() > 0),
        }
    }
}

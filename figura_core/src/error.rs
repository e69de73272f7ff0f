// Copyright 2025 the Figura Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors surfaced by item tree edits.
//!
//! Drawing and event dispatch never return errors: a node that cannot be reached is
//! logged and skipped so that its siblings still draw and still see the event.

use thiserror::Error;

/// Why an item could not be attached as a sub-item.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum TreeError {
    /// The item is the target itself or one of its ancestors.
    #[error("an item cannot become a sub-item of itself or of its own descendants")]
    Cycle,
    /// The item (or the target) is borrowed elsewhere, e.g. from inside its own handler.
    #[error("item is currently borrowed and cannot be re-parented")]
    Busy,
}

// Copyright 2025 the Figura Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer input routed through figures, scales and items.

use kurbo::Point;

/// What happened to the pointer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MouseEventKind {
    /// A button went down.
    Press,
    /// A second press in quick succession.
    DoublePress,
    /// A button went up.
    Release,
    /// The pointer moved with no button held.
    Move,
    /// The pointer moved while a button was held.
    MovePressed,
}

/// Which button the event refers to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button.
    Left,
    /// Secondary button.
    Right,
    /// No button (plain moves).
    #[default]
    None,
}

/// A pointer event in figure (pixel) space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MouseEvent {
    /// Event kind.
    pub kind: MouseEventKind,
    /// Button involved, if any.
    pub button: MouseButton,
    /// Position in figure pixels.
    pub position: Point,
}

impl MouseEvent {
    /// Creates an event.
    pub fn new(kind: MouseEventKind, button: MouseButton, position: Point) -> Self {
        Self {
            kind,
            button,
            position,
        }
    }

    /// A left-button press at `position`.
    pub fn left_press(position: Point) -> Self {
        Self::new(MouseEventKind::Press, MouseButton::Left, position)
    }

    /// Returns `true` for [`MouseEventKind::Press`] and [`MouseEventKind::DoublePress`].
    pub fn is_press(&self) -> bool {
        matches!(
            self.kind,
            MouseEventKind::Press | MouseEventKind::DoublePress
        )
    }
}

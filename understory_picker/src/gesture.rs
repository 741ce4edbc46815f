// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Inbound drag events from the host's gesture recognizer.

/// Pointer moved during a vertical drag.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct DragMove {
    /// Vertical distance from the drag start, in pixels.
    pub delta_y: f64,
}

/// Pointer released.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct DragEnd {
    /// Vertical distance from the drag start, in pixels.
    pub delta_y: f64,
    /// Release velocity reported by the recognizer, in pixels per millisecond.
    pub velocity_y: f64,
    /// Option under the pointer at release, as resolved by the host's hit
    /// testing (for example [`ColumnGeometry::option_at`]).
    ///
    /// [`ColumnGeometry::option_at`]: crate::ColumnGeometry::option_at
    pub target: Option<usize>,
}

bitflags::bitflags! {
    /// What the host should do with the platform event after the controller ran.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct EventFlags: u8 {
        /// Suppress default scrolling and selection behavior.
        const PREVENT_DEFAULT  = 0b0000_0001;
        /// Stop the event from propagating further.
        const STOP_PROPAGATION = 0b0000_0010;
    }
}

impl EventFlags {
    /// Flags returned while the column owns the gesture.
    pub const CAPTURE: Self = Self::PREVENT_DEFAULT.union(Self::STOP_PROPAGATION);
}

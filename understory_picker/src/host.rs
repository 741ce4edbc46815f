// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Capabilities the controller needs from its host.

use crate::{OptionVisual, VisualChange};

/// Handle for a scheduled frame callback.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameId(pub u64);

/// Render layer, feedback and scheduling services for one column.
///
/// The controller never calls back into itself: when a requested frame fires,
/// the host calls [`PickerColumnController::on_frame`] with the id it handed
/// out. Every method runs on the host's UI thread.
///
/// [`PickerColumnController::on_frame`]: crate::PickerColumnController::on_frame
pub trait ColumnHost {
    /// Applies `visual` to option `index`. `changes` is never empty.
    fn apply_visual(&mut self, index: usize, visual: &OptionVisual, changes: VisualChange);

    /// Fires selection haptics when the index on the selection line changes.
    fn selection_haptic(&mut self);

    /// Notifies listeners that the column settled or committed a selection.
    ///
    /// Carries no payload; listeners read
    /// [`PickerColumn::selected_index`](crate::PickerColumn::selected_index).
    fn column_changed(&mut self);

    /// Schedules one callback for the next display frame.
    fn request_frame(&mut self) -> FrameId;

    /// Cancels a callback returned by [`ColumnHost::request_frame`].
    fn cancel_frame(&mut self, id: FrameId);
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_picker --heading-base-level=0

//! Understory Picker: the interaction engine behind a picker wheel column.
//!
//! A column is a vertical strip of uniformly sized options with one of them
//! resting on a selection line. This crate turns drag gestures into that
//! resting position:
//!
//! - [`ColumnGeometry`] converts between option indices and pixel offsets and
//!   resolves taps in flat layouts.
//! - [`EnabledBounds`] finds the scrollable range; disabled options at either
//!   end do not extend it.
//! - [`PickerColumnController`] follows the pointer with rubber-band
//!   resistance past the ends, coasts on released momentum one frame at a
//!   time, and always comes to rest exactly on an option boundary.
//! - [`ArcStyle`] maps offsets to per-option [`OptionTransform`]s, either a
//!   flat strip or a rotated 3D wheel (see [`PickerMode`]).
//!
//! The crate does not own a widget tree, a gesture recognizer, or a clock.
//! Hosts implement [`ColumnHost`] to receive per-option visual writes
//! (only the parts that changed, see [`VisualChange`]), haptic and change
//! notifications, and frame scheduling requests.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_picker::{
//!     ArcStyle, ColumnHost, DragEnd, DragMove, FrameId, OptionVisual, PickerColumn,
//!     PickerColumnController, PickerMode, PickerOption, VisualChange,
//! };
//!
//! #[derive(Debug, Default)]
//! struct Host {
//!     next: u64,
//!     frame: Option<FrameId>,
//!     changes: usize,
//! }
//!
//! impl ColumnHost for Host {
//!     fn apply_visual(&mut self, _index: usize, _visual: &OptionVisual, _changes: VisualChange) {}
//!     fn selection_haptic(&mut self) {}
//!     fn column_changed(&mut self) {
//!         self.changes += 1;
//!     }
//!     fn request_frame(&mut self) -> FrameId {
//!         self.next += 1;
//!         let id = FrameId(self.next);
//!         self.frame = Some(id);
//!         id
//!     }
//!     fn cancel_frame(&mut self, _id: FrameId) {
//!         self.frame = None;
//!     }
//! }
//!
//! let options = (1..=12).map(|h| PickerOption::new(h.to_string())).collect();
//! let column = PickerColumn::new("hour", options, Some(2));
//! let mut picker =
//!     PickerColumnController::new(column, ArcStyle::for_mode(PickerMode::Ios), Host::default());
//!
//! // Once layout has measured an option, the column settles on the selection.
//! picker.on_layout(34.0);
//! assert_eq!(picker.rest_offset(), -68.0);
//!
//! // Flick upwards and let momentum run until the column settles.
//! picker.on_drag_start();
//! picker.on_drag_move(DragMove { delta_y: -40.0 });
//! picker.on_drag_end(DragEnd { delta_y: -40.0, velocity_y: -0.5, target: None });
//! while let Some(id) = picker.host_mut().frame.take() {
//!     picker.on_frame(id);
//! }
//!
//! assert_eq!(picker.host().changes, 1);
//! assert_eq!(picker.rest_offset() % 34.0, 0.0);
//! assert!(picker.column().selected_index > Some(2));
//! ```
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for `kurbo`.
//! - `libm`: enables `no_std` builds that rely on `libm` for floating-point math.
//! - `tracing`: emits `tracing` events for drag start, momentum, bounce-back,
//!   taps, refreshes and settles.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod column;
mod geometry;
mod gesture;
mod host;
mod motion;
mod visual;

pub use column::{ColumnAlign, ColumnClasses, PickerColumn, PickerOption};
pub use geometry::{ColumnGeometry, EnabledBounds};
pub use gesture::{DragEnd, DragMove, EventFlags};
pub use host::{ColumnHost, FrameId};
pub use motion::{
    BOTTOM_BOUNCE_EXPONENT, BOUNCE_BACK_DURATION, Bounce, DECELERATION_FRICTION,
    MAX_PICKER_SPEED, MotionPhase, PickerColumnController, SELECT_DURATION, TOP_BOUNCE_EXPONENT,
    VELOCITY_SCALE,
};
pub use visual::{
    ARC_TRANSLATE_Z, ArcStyle, FLAT_CUTOFF_PX, OFF_SCREEN_X, OptionTransform, OptionVisual,
    PickerMode, ROTATED_CUTOFF_DEG, VisualChange,
};

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-option display transforms and the last-rendered side table.

use alloc::vec::Vec;
use core::time::Duration;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::Affine;

/// Options rotated further than this (degrees) are moved off screen.
pub const ROTATED_CUTOFF_DEG: f64 = 90.0;
/// Options translated further than this (pixels) are moved off screen.
pub const FLAT_CUTOFF_PX: f64 = 170.0;
/// Depth the rotated arc is pushed out to.
pub const ARC_TRANSLATE_Z: f64 = 90.0;
/// Horizontal translation used to park an option off screen.
pub const OFF_SCREEN_X: f64 = -9999.0;

/// Platform look of the column.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PickerMode {
    /// Flat strip with shrunken unselected options.
    #[default]
    Md,
    /// Rotated 3D wheel.
    Ios,
}

/// How option offsets turn into on-screen transforms.
///
/// Only affects rendering; motion math is identical for every style.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ArcStyle {
    /// Degrees of `rotateX` per pixel of offset. `0.0` selects flat layout.
    pub rotate_factor: f64,
    /// Scale applied to every option except the selected one.
    pub scale_factor: f64,
}

impl ArcStyle {
    /// Style used by `mode`.
    #[must_use]
    pub const fn for_mode(mode: PickerMode) -> Self {
        match mode {
            PickerMode::Md => Self {
                rotate_factor: 0.0,
                scale_factor: 0.81,
            },
            PickerMode::Ios => Self {
                rotate_factor: -0.46,
                scale_factor: 1.0,
            },
        }
    }

    /// Transform for an option `option_offset` pixels from the selection line.
    #[must_use]
    pub fn transform(&self, option_offset: f64, selected: bool) -> OptionTransform {
        let scale = if self.scale_factor != 1.0 && !selected {
            self.scale_factor
        } else {
            1.0
        };
        if self.rotate_factor != 0.0 {
            let rotate_x = option_offset * self.rotate_factor;
            if rotate_x.abs() > ROTATED_CUTOFF_DEG {
                return OptionTransform::OffScreen;
            }
            OptionTransform::Visible {
                rotate_x,
                translate_y: 0.0,
                translate_z: ARC_TRANSLATE_Z,
                scale,
            }
        } else {
            if option_offset.abs() > FLAT_CUTOFF_PX {
                return OptionTransform::OffScreen;
            }
            OptionTransform::Visible {
                rotate_x: 0.0,
                translate_y: option_offset,
                translate_z: 0.0,
                scale,
            }
        }
    }
}

impl Default for ArcStyle {
    fn default() -> Self {
        Self::for_mode(PickerMode::default())
    }
}

/// Display transform of one option.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum OptionTransform {
    /// Parked at [`OFF_SCREEN_X`]; the option is beyond the visible arc.
    OffScreen,
    /// `rotateX(rotate_x deg) translate3d(0, translate_y, translate_z) scale(scale)`.
    Visible {
        /// Rotation about the X axis, in degrees.
        rotate_x: f64,
        /// Vertical translation, in pixels.
        translate_y: f64,
        /// Depth translation, in pixels.
        translate_z: f64,
        /// Uniform scale; `1.0` when unscaled.
        scale: f64,
    },
}

impl OptionTransform {
    /// Returns `true` unless the option is parked off screen.
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        matches!(self, Self::Visible { .. })
    }

    /// Planar equivalent for 2D renderers.
    ///
    /// Returns `None` for rotated transforms, which have no affine 2D form.
    #[must_use]
    pub fn to_affine(&self) -> Option<Affine> {
        match *self {
            Self::OffScreen => Some(Affine::translate((OFF_SCREEN_X, 0.0))),
            Self::Visible {
                rotate_x,
                translate_y,
                scale,
                ..
            } if rotate_x == 0.0 => {
                Some(Affine::translate((0.0, translate_y)) * Affine::scale(scale))
            }
            Self::Visible { .. } => None,
        }
    }
}

bitflags::bitflags! {
    /// Which parts of an option's visual state changed in a write.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct VisualChange: u8 {
        /// Transition duration changed.
        const DURATION  = 0b0000_0001;
        /// Transform changed.
        const TRANSFORM = 0b0000_0010;
        /// Selected flag changed.
        const SELECTED  = 0b0000_0100;
    }
}

/// Visual state handed to the host for one option.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct OptionVisual {
    /// Display transform.
    pub transform: OptionTransform,
    /// Transition duration; zero means apply immediately.
    pub duration: Duration,
    /// Whether this option sits on the selection line.
    pub selected: bool,
}

/// Last state written for each option, used to skip redundant writes.
#[derive(Clone, Debug, Default)]
pub(crate) struct RenderCache {
    entries: Vec<Option<OptionVisual>>,
}

impl RenderCache {
    pub(crate) fn with_len(len: usize) -> Self {
        let mut cache = Self::default();
        cache.resize(len);
        cache
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Matches the cache to a new option count, forgetting every entry.
    pub(crate) fn resize(&mut self, len: usize) {
        self.entries.clear();
        self.entries.resize(len, None);
    }

    /// Records `next` for `index` and reports what differs from the last write.
    pub(crate) fn diff(&mut self, index: usize, next: OptionVisual) -> VisualChange {
        let slot = &mut self.entries[index];
        let changes = match *slot {
            None => VisualChange::all(),
            Some(ref prev) => {
                let mut changes = VisualChange::empty();
                if prev.duration != next.duration {
                    changes |= VisualChange::DURATION;
                }
                if prev.transform != next.transform {
                    changes |= VisualChange::TRANSFORM;
                }
                if prev.selected != next.selected {
                    changes |= VisualChange::SELECTED;
                }
                changes
            }
        };
        *slot = Some(next);
        changes
    }
}

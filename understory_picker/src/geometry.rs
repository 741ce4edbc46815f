// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Index/offset conversion for a column of uniformly sized options.
//!
//! Offsets follow the picker convention: the column rests at `0.0` when the
//! first option sits on the selection line and moves towards negative values
//! as later options scroll into place, so option `i` rests at `-(i * height)`.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Point, Rect};

use crate::PickerOption;

/// Geometry of a column whose options all share the same measured height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnGeometry {
    option_height: f64,
    len: usize,
}

impl ColumnGeometry {
    /// Creates geometry for `len` options, each `option_height` pixels tall.
    ///
    /// A height of `0.0` is allowed here so hosts can construct a column before
    /// layout; every conversion asserts that the height has been measured.
    #[must_use]
    pub fn new(option_height: f64, len: usize) -> Self {
        debug_assert!(
            option_height.is_finite(),
            "option height must be finite; got {option_height:?}"
        );
        Self { option_height, len }
    }

    /// Returns the measured option height.
    #[must_use]
    pub const fn option_height(&self) -> f64 {
        self.option_height
    }

    /// Returns the number of options.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the column has no options.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns `true` once a usable option height has been measured.
    #[must_use]
    pub fn is_measured(&self) -> bool {
        self.option_height.is_finite() && self.option_height > 0.0
    }

    pub(crate) fn assert_measured(&self) {
        assert!(
            self.is_measured(),
            "option height must be measured (> 0) before motion; got {}",
            self.option_height
        );
    }

    /// Rest offset that places option `index` on the selection line.
    #[must_use]
    pub fn offset_for_index(&self, index: usize) -> f64 {
        -(index as f64 * self.option_height)
    }

    /// Nearest option for `offset`, clamped into `0..len`.
    ///
    /// Rounds to the nearest option; never extrapolates past either end.
    ///
    /// # Panics
    ///
    /// Panics if the option height has not been measured.
    #[must_use]
    pub fn index_for_offset(&self, offset: f64) -> usize {
        self.assert_measured();
        let ratio = (offset.abs() / self.option_height).round();
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "ratio is non-negative and clamped to the last index"
        )]
        let index = ratio as usize;
        index.min(self.len.saturating_sub(1))
    }

    /// Returns the option boundary `offset` is locked onto, if any.
    ///
    /// An offset counts as aligned when it lies within half a pixel of a
    /// multiple of the option height, which is what rounding it to whole
    /// pixels would show.
    #[must_use]
    pub fn aligned_offset(&self, offset: f64) -> Option<f64> {
        self.assert_measured();
        let boundary = (offset / self.option_height).round() * self.option_height;
        ((offset - boundary).abs() <= 0.5).then_some(boundary)
    }

    /// Bounds of option `index` in flat, column-local coordinates.
    ///
    /// The selection line's top edge is `y = 0` and the column has scrolled to
    /// `offset`. Rotated layouts do not map to axis-aligned rects; hosts using
    /// them resolve taps with their own hit testing.
    #[must_use]
    pub fn option_rect(&self, index: usize, offset: f64, width: f64) -> Rect {
        let top = index as f64 * self.option_height + offset;
        Rect::new(0.0, top, width.max(0.0), top + self.option_height)
    }

    /// Resolves a column-local pointer position to the option under it.
    #[must_use]
    pub fn option_at(&self, point: Point, offset: f64, width: f64) -> Option<usize> {
        if self.is_empty() || !self.is_measured() {
            return None;
        }
        let relative = point.y - offset;
        if relative < 0.0 {
            return None;
        }
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "relative is non-negative and range-checked below"
        )]
        let index = (relative / self.option_height).floor() as usize;
        (index < self.len && self.option_rect(index, offset, width).contains(point))
            .then_some(index)
    }
}

/// Smallest and largest indices of enabled options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnabledBounds {
    /// First enabled index.
    pub min: usize,
    /// Last enabled index.
    pub max: usize,
}

impl EnabledBounds {
    /// Scans `options` once for the first and last enabled entries.
    ///
    /// When nothing is enabled the result is `(len - 1, 0)`: the scan's
    /// starting values survive untouched and the range comes out inverted.
    /// See [`EnabledBounds::is_inverted`].
    #[must_use]
    pub fn scan(options: &[PickerOption]) -> Self {
        let mut bounds = Self {
            min: options.len().saturating_sub(1),
            max: 0,
        };
        for (i, option) in options.iter().enumerate() {
            if !option.disabled {
                bounds.min = bounds.min.min(i);
                bounds.max = bounds.max.max(i);
            }
        }
        bounds
    }

    /// Returns `true` for the degenerate all-disabled result.
    #[must_use]
    pub const fn is_inverted(&self) -> bool {
        self.min > self.max
    }

    /// Clamps `index` into the range.
    ///
    /// Applies the upper bound first and then the lower one, so an inverted
    /// range resolves to `min` instead of panicking the way [`Ord::clamp`] would.
    #[must_use]
    pub fn clamp(&self, index: usize) -> usize {
        index.min(self.max).max(self.min)
    }
}

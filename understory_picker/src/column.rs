// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Column and option data supplied by the host.

use alloc::string::String;
use alloc::vec::Vec;

/// A single selectable entry in a column.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PickerOption {
    /// Label shown to the user.
    pub text: String,
    /// Host-defined value reported for this option, if any.
    pub value: Option<String>,
    /// Disabled options render but never bound scrolling or accept taps.
    pub disabled: bool,
}

impl PickerOption {
    /// Creates an enabled option with the given label.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            value: None,
            disabled: false,
        }
    }

    /// Sets the reported value.
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Marks the option as disabled.
    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }
}

/// Horizontal alignment of option labels.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ColumnAlign {
    /// Labels hug the leading edge.
    Left,
    /// Labels are centered.
    #[default]
    Center,
    /// Labels hug the trailing edge.
    Right,
}

bitflags::bitflags! {
    /// Style classes a host applies to the column container.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ColumnClasses: u8 {
        /// Always present: `picker-col`.
        const PICKER_COL = 0b0000_0001;
        /// `picker-opts-left`.
        const OPTS_LEFT  = 0b0000_0010;
        /// `picker-opts-right`.
        const OPTS_RIGHT = 0b0000_0100;
    }
}

/// An ordered list of options plus the committed selection.
///
/// Widths and affixes are display hints passed through to the host untouched.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PickerColumn {
    /// Host-facing column name.
    pub name: String,
    /// Options in display order.
    pub options: Vec<PickerOption>,
    /// Option currently on the selection line.
    pub selected_index: Option<usize>,
    /// Last index written by a visual update.
    pub prev_selected: Option<usize>,
    /// Label alignment.
    pub align: ColumnAlign,
    /// Text shown before the options.
    pub prefix: Option<String>,
    /// Text shown after the options.
    pub suffix: Option<String>,
    /// Maximum width of the whole column.
    pub column_width: Option<String>,
    /// Maximum width of the options strip.
    pub options_width: Option<String>,
    /// Width of the prefix label.
    pub prefix_width: Option<String>,
    /// Width of the suffix label.
    pub suffix_width: Option<String>,
}

impl PickerColumn {
    /// Creates a column with `options` and an initial selection.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        options: Vec<PickerOption>,
        selected_index: Option<usize>,
    ) -> Self {
        Self {
            name: name.into(),
            options,
            selected_index,
            ..Self::default()
        }
    }

    /// The option on the selection line, if any.
    #[must_use]
    pub fn selected(&self) -> Option<&PickerOption> {
        self.selected_index.and_then(|i| self.options.get(i))
    }

    /// Container classes implied by the alignment.
    #[must_use]
    pub fn host_classes(&self) -> ColumnClasses {
        let mut classes = ColumnClasses::PICKER_COL;
        match self.align {
            ColumnAlign::Left => classes |= ColumnClasses::OPTS_LEFT,
            ColumnAlign::Right => classes |= ColumnClasses::OPTS_RIGHT,
            ColumnAlign::Center => {}
        }
        classes
    }
}

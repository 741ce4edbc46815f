// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag, momentum and snap state machine for a single column.

use alloc::vec::Vec;
use core::time::Duration;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use crate::visual::RenderCache;
use crate::{
    ArcStyle, ColumnGeometry, ColumnHost, DragEnd, DragMove, EnabledBounds, EventFlags, FrameId,
    OptionVisual, PickerColumn, PickerOption,
};

/// Fraction of velocity kept after each frame of momentum.
pub const DECELERATION_FRICTION: f64 = 0.97;
/// Fastest momentum, in pixels per frame.
pub const MAX_PICKER_SPEED: f64 = 60.0;
/// Converts recognizer velocity (pixels per millisecond) to pixels per frame.
pub const VELOCITY_SCALE: f64 = 17.0;
/// Rubber-band exponent past the first enabled option.
pub const TOP_BOUNCE_EXPONENT: f64 = 0.8;
/// Rubber-band exponent past the last enabled option.
pub const BOTTOM_BOUNCE_EXPONENT: f64 = 0.9;
/// Transition used when a released over-scroll springs back.
pub const BOUNCE_BACK_DURATION: Duration = Duration::from_millis(100);
/// Transition used for taps and refreshes.
pub const SELECT_DURATION: Duration = Duration::from_millis(150);

/// Which end of the list the current drag has been pulled past.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Bounce {
    /// Inside the scrollable range.
    #[default]
    None,
    /// Pulled down past the first enabled option.
    OverTop,
    /// Pulled up past the last enabled option.
    OverBottom,
}

/// What the column is doing right now.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum MotionPhase {
    /// At rest on an option boundary.
    #[default]
    Idle,
    /// Following the pointer.
    Dragging,
    /// Coasting on released momentum, one step per frame.
    Decelerating,
}

/// Interaction engine for one picker column.
///
/// Consumes drag events, runs momentum one frame at a time, and keeps the
/// column's selection in sync with what is on the selection line. Everything
/// observable goes through the owned [`ColumnHost`].
///
/// Offsets are in pixels and never positive at rest: option `i` rests at
/// `-(i * option_height)`. Between drags the rest offset stays within the
/// enabled range and, once idle, on an exact option boundary.
#[derive(Debug)]
pub struct PickerColumnController<H: ColumnHost> {
    column: PickerColumn,
    style: ArcStyle,
    host: H,
    option_height: f64,

    /// Last committed offset; drags are measured from here.
    rest_offset: f64,
    /// Last rendered offset, including transient drag frames.
    offset: f64,
    /// Pixels per frame.
    velocity: f64,
    min_offset: f64,
    max_offset: f64,
    bounce: Bounce,
    phase: MotionPhase,

    last_index: Option<usize>,
    pending_frame: Option<FrameId>,
    cache: RenderCache,
}

impl<H: ColumnHost> PickerColumnController<H> {
    /// Creates a controller for `column`.
    ///
    /// Nothing is rendered until [`on_layout`](Self::on_layout) supplies the
    /// measured option height.
    #[must_use]
    pub fn new(column: PickerColumn, style: ArcStyle, host: H) -> Self {
        let cache = RenderCache::with_len(column.options.len());
        Self {
            column,
            style,
            host,
            option_height: 0.0,
            rest_offset: 0.0,
            offset: 0.0,
            velocity: 0.0,
            min_offset: 0.0,
            max_offset: 0.0,
            bounce: Bounce::None,
            phase: MotionPhase::Idle,
            last_index: None,
            pending_frame: None,
            cache,
        }
    }

    /// Returns the column data.
    #[must_use]
    pub fn column(&self) -> &PickerColumn {
        &self.column
    }

    /// Returns the host.
    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Returns the host mutably.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Consumes the controller, returning the column and host.
    pub fn into_parts(self) -> (PickerColumn, H) {
        (self.column, self.host)
    }

    /// Returns the display style.
    #[must_use]
    pub const fn style(&self) -> ArcStyle {
        self.style
    }

    /// Geometry for the current options and measured height.
    #[must_use]
    pub fn geometry(&self) -> ColumnGeometry {
        ColumnGeometry::new(self.option_height, self.column.options.len())
    }

    /// Last committed offset.
    #[must_use]
    pub const fn rest_offset(&self) -> f64 {
        self.rest_offset
    }

    /// Last rendered offset.
    #[must_use]
    pub const fn offset(&self) -> f64 {
        self.offset
    }

    /// Current momentum, in pixels per frame.
    #[must_use]
    pub const fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Scrollable range as `(min_offset, max_offset)`, refreshed on drag start.
    ///
    /// `min_offset` belongs to the first enabled option and is the larger value.
    #[must_use]
    pub const fn offset_bounds(&self) -> (f64, f64) {
        (self.min_offset, self.max_offset)
    }

    /// Over-scroll state of the current drag.
    #[must_use]
    pub const fn bounce(&self) -> Bounce {
        self.bounce
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> MotionPhase {
        self.phase
    }

    /// Returns `true` while a frame callback is outstanding.
    #[must_use]
    pub const fn has_pending_frame(&self) -> bool {
        self.pending_frame.is_some()
    }

    /// Supplies the measured option height and settles on the selection.
    ///
    /// # Panics
    ///
    /// Panics if `option_height` is not a positive, finite number.
    pub fn on_layout(&mut self, option_height: f64) {
        assert!(
            option_height.is_finite() && option_height > 0.0,
            "option height must be measured (> 0); got {option_height}"
        );
        if self.option_height != option_height && self.column.prev_selected.is_some() {
            // Offsets rendered at the old height are stale.
            self.column.prev_selected = None;
        }
        self.option_height = option_height;
        self.refresh();
    }

    /// Replaces the options and re-settles within the new enabled range.
    pub fn set_options(&mut self, options: Vec<PickerOption>) {
        self.column.options = options;
        self.cache.resize(self.column.options.len());
        // Every option needs a fresh write, even if the selection survives.
        self.column.prev_selected = None;
        self.refresh();
    }

    /// Starts a drag.
    ///
    /// Cancels any momentum in flight and captures the enabled range.
    ///
    /// # Panics
    ///
    /// Panics if the option height has not been measured.
    pub fn on_drag_start(&mut self) -> EventFlags {
        let geometry = self.geometry();
        geometry.assert_measured();
        self.cancel_pending_frame();

        let bounds = EnabledBounds::scan(&self.column.options);
        self.min_offset = geometry.offset_for_index(bounds.min);
        self.max_offset = geometry.offset_for_index(bounds.max);
        self.velocity = 0.0;
        self.bounce = Bounce::None;
        self.phase = MotionPhase::Dragging;
        #[cfg(feature = "tracing")]
        tracing::debug!(
            min_offset = self.min_offset,
            max_offset = self.max_offset,
            rest_offset = self.rest_offset,
            "picker drag start"
        );
        EventFlags::CAPTURE
    }

    /// Follows the pointer, rubber-banding past either end of the range.
    ///
    /// Renders immediately without committing the offset.
    pub fn on_drag_move(&mut self, event: DragMove) -> EventFlags {
        debug_assert!(
            event.delta_y.is_finite(),
            "drag delta must be finite; got {}",
            event.delta_y
        );
        let candidate = self.rest_offset + event.delta_y;
        let offset = if candidate > self.min_offset {
            self.bounce = Bounce::OverTop;
            self.min_offset + (candidate - self.min_offset).powf(TOP_BOUNCE_EXPONENT)
        } else if candidate < self.max_offset {
            self.bounce = Bounce::OverBottom;
            candidate + (self.max_offset - candidate).powf(BOTTOM_BOUNCE_EXPONENT)
        } else {
            self.bounce = Bounce::None;
            candidate
        };
        self.update_visuals(offset, Duration::ZERO, false);
        EventFlags::CAPTURE
    }

    /// Ends a drag: springs back, commits a tap, or hands off to momentum.
    ///
    /// # Panics
    ///
    /// Panics if a tap resolves to an index outside the option list.
    pub fn on_drag_end(&mut self, event: DragEnd) -> EventFlags {
        if self.column.options.is_empty() {
            self.velocity = 0.0;
            self.bounce = Bounce::None;
            self.phase = MotionPhase::Idle;
            return EventFlags::empty();
        }
        match self.bounce {
            Bounce::OverTop => {
                self.spring_back(self.min_offset);
                return EventFlags::empty();
            }
            Bounce::OverBottom => {
                self.spring_back(self.max_offset);
                return EventFlags::empty();
            }
            Bounce::None => {}
        }

        debug_assert!(
            event.velocity_y.is_finite(),
            "release velocity must be finite; got {}",
            event.velocity_y
        );
        self.velocity =
            (event.velocity_y * VELOCITY_SCALE).clamp(-MAX_PICKER_SPEED, MAX_PICKER_SPEED);

        if self.velocity == 0.0 && event.delta_y == 0.0 {
            self.phase = MotionPhase::Idle;
            match event.target {
                Some(index)
                    if self
                        .column
                        .options
                        .get(index)
                        .is_some_and(|option| option.disabled) =>
                {
                    #[cfg(feature = "tracing")]
                    tracing::trace!(index, "ignoring tap on disabled option");
                    self.update_visuals(self.rest_offset, SELECT_DURATION, true);
                }
                Some(index) => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(index, "picker tap");
                    self.select_index(index, SELECT_DURATION);
                }
                // Drop whatever transient frame the drag left on screen.
                None => self.update_visuals(self.rest_offset, SELECT_DURATION, true),
            }
        } else {
            self.rest_offset = self.clamp_to_range(self.rest_offset + event.delta_y);
            self.phase = MotionPhase::Decelerating;
            #[cfg(feature = "tracing")]
            tracing::debug!(
                velocity = self.velocity,
                rest_offset = self.rest_offset,
                "picker momentum start"
            );
            self.decelerate();
        }
        EventFlags::empty()
    }

    /// Runs one momentum step for a frame requested through the host.
    ///
    /// Ids that were cancelled or superseded are ignored.
    pub fn on_frame(&mut self, id: FrameId) {
        if self.pending_frame != Some(id) {
            #[cfg(feature = "tracing")]
            tracing::trace!(?id, "ignoring stale picker frame");
            return;
        }
        self.pending_frame = None;
        self.decelerate();
    }

    /// Commits option `index`, animating over `duration`.
    ///
    /// Always emits [`ColumnHost::column_changed`], even when `index` is
    /// already selected.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range or the option height is unmeasured.
    pub fn select_index(&mut self, index: usize, duration: Duration) {
        let geometry = self.geometry();
        assert!(
            index < geometry.len(),
            "option index {index} out of range for {} options",
            geometry.len()
        );
        geometry.assert_measured();

        self.velocity = 0.0;
        self.bounce = Bounce::None;
        self.phase = MotionPhase::Idle;
        self.cancel_pending_frame();
        self.update_visuals(geometry.offset_for_index(index), duration, true);
        self.host.column_changed();
    }

    /// Clamps the selection into the enabled range, animating only if the
    /// clamped index differs from the last rendered one.
    ///
    /// Does nothing until the option height is known.
    pub fn refresh(&mut self) {
        let geometry = self.geometry();
        if geometry.is_empty() {
            self.column.selected_index = None;
            self.column.prev_selected = None;
            return;
        }
        if !geometry.is_measured() {
            return;
        }

        let bounds = EnabledBounds::scan(&self.column.options);
        let selected = bounds.clamp(self.column.selected_index.unwrap_or(0));
        self.column.selected_index = Some(selected);
        if self.column.prev_selected != Some(selected) {
            #[cfg(feature = "tracing")]
            tracing::debug!(selected, "picker refresh re-settle");
            self.cancel_pending_frame();
            self.velocity = 0.0;
            self.bounce = Bounce::None;
            self.phase = MotionPhase::Idle;
            self.update_visuals(geometry.offset_for_index(selected), SELECT_DURATION, true);
        }
    }

    /// One step of momentum. Schedules the next step or settles.
    fn decelerate(&mut self) {
        let geometry = self.geometry();
        if self.velocity != 0.0 {
            self.velocity *= DECELERATION_FRICTION;
            self.velocity = if self.velocity > 0.0 {
                self.velocity.max(1.0)
            } else {
                self.velocity.min(-1.0)
            };

            let mut offset = self.rest_offset + self.velocity;
            if offset > self.min_offset {
                offset = self.min_offset;
                self.velocity = 0.0;
            } else if offset < self.max_offset {
                offset = self.max_offset;
                self.velocity = 0.0;
            }

            let locked = if self.velocity.abs() <= 1.0 {
                geometry.aligned_offset(offset)
            } else {
                None
            };
            if let Some(boundary) = locked {
                offset = boundary;
                self.velocity = 0.0;
            }
            self.update_visuals(offset, Duration::ZERO, true);

            if locked.is_some() {
                self.settle();
            } else {
                self.schedule_frame();
            }
        } else if let Some(boundary) = geometry.aligned_offset(self.rest_offset) {
            self.update_visuals(boundary, Duration::ZERO, true);
            self.settle();
        } else {
            // Stopped between options: creep toward the nearer boundary.
            let height = geometry.option_height();
            let remainder = (self.rest_offset % height).abs();
            self.velocity = if remainder > height / 2.0 { -1.0 } else { 1.0 };
            self.decelerate();
        }
    }

    fn spring_back(&mut self, offset: f64) {
        #[cfg(feature = "tracing")]
        tracing::debug!(offset, "picker bounce back");
        self.velocity = 0.0;
        self.bounce = Bounce::None;
        self.update_visuals(offset, BOUNCE_BACK_DURATION, true);
        self.settle();
    }

    fn settle(&mut self) {
        self.velocity = 0.0;
        self.phase = MotionPhase::Idle;
        #[cfg(feature = "tracing")]
        tracing::debug!(
            offset = self.rest_offset,
            selected = ?self.column.selected_index,
            "picker settled"
        );
        self.host.column_changed();
    }

    /// Clamps into `[max_offset, min_offset]`, checking the top bound first so
    /// an inverted all-disabled range still resolves.
    fn clamp_to_range(&self, offset: f64) -> f64 {
        if offset > self.min_offset {
            self.min_offset
        } else if offset < self.max_offset {
            self.max_offset
        } else {
            offset
        }
    }

    fn schedule_frame(&mut self) {
        debug_assert!(
            self.pending_frame.is_none(),
            "at most one picker frame may be pending"
        );
        self.pending_frame = Some(self.host.request_frame());
    }

    fn cancel_pending_frame(&mut self) {
        if let Some(id) = self.pending_frame.take() {
            self.host.cancel_frame(id);
        }
    }

    /// Renders every option for `offset`, writing only what changed.
    ///
    /// `commit` persists `offset` as the new rest offset.
    fn update_visuals(&mut self, offset: f64, duration: Duration, commit: bool) {
        self.offset = offset;
        if commit {
            self.rest_offset = offset;
        }

        let geometry = self.geometry();
        if geometry.is_empty() {
            self.column.selected_index = None;
            self.column.prev_selected = None;
            return;
        }
        if self.cache.len() != geometry.len() {
            self.cache.resize(geometry.len());
        }

        let selected = geometry.index_for_offset(offset);
        self.column.selected_index = Some(selected);
        for index in 0..geometry.len() {
            let is_selected = index == selected;
            let visual = OptionVisual {
                transform: self.style.transform(
                    index as f64 * geometry.option_height() + offset,
                    is_selected,
                ),
                duration,
                selected: is_selected,
            };
            let changes = self.cache.diff(index, visual);
            if !changes.is_empty() {
                self.host.apply_visual(index, &visual, changes);
            }
        }
        self.column.prev_selected = Some(selected);

        match self.last_index {
            // The first render only records where the column starts.
            None => self.last_index = Some(selected),
            Some(last) if last != selected => {
                self.last_index = Some(selected);
                self.host.selection_haptic();
            }
            Some(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;
    use core::time::Duration;

    use super::{Bounce, MotionPhase, PickerColumnController, SELECT_DURATION};
    use crate::{
        ArcStyle, ColumnHost, DragEnd, DragMove, EventFlags, FrameId, OptionVisual,
        PickerColumn, PickerOption, VisualChange,
    };

    #[derive(Debug, Default)]
    struct RecordingHost {
        writes: Vec<(usize, OptionVisual, VisualChange)>,
        haptics: usize,
        changes: usize,
        next_frame: u64,
        pending: Option<FrameId>,
        cancelled: Vec<FrameId>,
    }

    impl ColumnHost for RecordingHost {
        fn apply_visual(&mut self, index: usize, visual: &OptionVisual, changes: VisualChange) {
            assert!(!changes.is_empty(), "empty writes must be skipped");
            self.writes.push((index, *visual, changes));
        }

        fn selection_haptic(&mut self) {
            self.haptics += 1;
        }

        fn column_changed(&mut self) {
            self.changes += 1;
        }

        fn request_frame(&mut self) -> FrameId {
            assert!(self.pending.is_none(), "only one frame may be pending");
            self.next_frame += 1;
            let id = FrameId(self.next_frame);
            self.pending = Some(id);
            id
        }

        fn cancel_frame(&mut self, id: FrameId) {
            if self.pending == Some(id) {
                self.pending = None;
            }
            self.cancelled.push(id);
        }
    }

    fn options(len: usize) -> Vec<PickerOption> {
        (0..len)
            .map(|i| PickerOption::new(alloc::format!("{i}")))
            .collect()
    }

    fn column(len: usize, selected: usize) -> PickerColumn {
        PickerColumn::new("test", options(len), Some(selected))
    }

    fn controller(column: PickerColumn) -> PickerColumnController<RecordingHost> {
        let mut controller =
            PickerColumnController::new(column, ArcStyle::default(), RecordingHost::default());
        controller.on_layout(34.0);
        controller
    }

    fn pump(controller: &mut PickerColumnController<RecordingHost>) -> usize {
        let mut frames = 0;
        while let Some(id) = controller.host_mut().pending.take() {
            controller.on_frame(id);
            frames += 1;
            assert!(frames < 1000, "momentum did not settle");
        }
        frames
    }

    fn drag(
        controller: &mut PickerColumnController<RecordingHost>,
        delta_y: f64,
        velocity_y: f64,
        target: Option<usize>,
    ) {
        controller.on_drag_start();
        controller.on_drag_move(DragMove { delta_y });
        controller.on_drag_end(DragEnd {
            delta_y,
            velocity_y,
            target,
        });
    }

    #[test]
    fn layout_settles_on_initial_selection() {
        let controller = controller(column(5, 2));
        assert_eq!(controller.rest_offset(), -68.0);
        assert_eq!(controller.column().selected_index, Some(2));
        assert_eq!(controller.column().prev_selected, Some(2));
        // The first render seeds haptics and emits nothing.
        assert_eq!(controller.host().haptics, 0);
        assert_eq!(controller.host().changes, 0);
        assert_eq!(controller.host().writes.len(), 5);
    }

    #[test]
    fn drag_one_option_and_release_without_velocity() {
        let mut controller = controller(column(5, 2));
        assert_eq!(controller.on_drag_start(), EventFlags::CAPTURE);
        controller.on_drag_move(DragMove { delta_y: -34.0 });
        assert_eq!(controller.offset(), -102.0);
        assert_eq!(controller.rest_offset(), -68.0);
        assert_eq!(controller.host().haptics, 1);

        controller.on_drag_end(DragEnd {
            delta_y: -34.0,
            velocity_y: 0.0,
            target: None,
        });
        assert_eq!(controller.rest_offset(), -102.0);
        assert_eq!(controller.column().selected_index, Some(3));
        assert_eq!(controller.host().changes, 1);
        assert_eq!(controller.phase(), MotionPhase::Idle);
        assert!(!controller.has_pending_frame());
    }

    #[test]
    fn tap_commits_target_over_select_duration() {
        let mut controller = controller(column(5, 2));
        drag(&mut controller, 0.0, 0.0, Some(0));
        assert_eq!(controller.column().selected_index, Some(0));
        assert_eq!(controller.rest_offset(), 0.0);
        assert_eq!(controller.host().changes, 1);
        let (_, visual, _) = controller
            .host()
            .writes
            .iter()
            .rev()
            .find(|(index, ..)| *index == 0)
            .copied()
            .unwrap();
        assert!(visual.selected);
        assert_eq!(visual.duration, SELECT_DURATION);
    }

    #[test]
    fn tap_without_target_or_on_disabled_option_is_ignored() {
        let mut options = options(4);
        options[3].disabled = true;
        let mut controller = controller(PickerColumn::new("test", options, Some(1)));
        drag(&mut controller, 0.0, 0.0, None);
        drag(&mut controller, 0.0, 0.0, Some(3));
        assert_eq!(controller.column().selected_index, Some(1));
        assert_eq!(controller.host().changes, 0);
    }

    #[test]
    fn momentum_settles_on_a_boundary_with_one_change() {
        let mut controller = controller(column(20, 2));
        drag(&mut controller, -10.0, -1.0, None);
        assert_eq!(controller.phase(), MotionPhase::Decelerating);
        assert!(pump(&mut controller) > 0);

        let rest = controller.rest_offset();
        assert_eq!(rest % 34.0, 0.0);
        assert!(rest < -68.0, "a downward flick moves to later options");
        assert_eq!(controller.host().changes, 1);
        assert_eq!(controller.phase(), MotionPhase::Idle);
        assert_eq!(controller.velocity(), 0.0);
        assert_eq!(
            controller.column().selected_index,
            Some(controller.geometry().index_for_offset(rest))
        );
    }

    #[test]
    fn momentum_stops_at_the_last_enabled_option() {
        let mut controller = controller(column(5, 1));
        drag(&mut controller, -10.0, -5.0, None);
        pump(&mut controller);
        assert_eq!(controller.rest_offset(), -136.0);
        assert_eq!(controller.column().selected_index, Some(4));
        assert_eq!(controller.host().changes, 1);
    }

    #[test]
    fn release_between_options_creeps_to_the_nearer_one() {
        let mut controller = controller(column(5, 2));
        // -68 - 50 = -118, 16px past option 3.
        drag(&mut controller, -50.0, 0.0, None);
        pump(&mut controller);
        assert_eq!(controller.rest_offset(), -102.0);
        assert_eq!(controller.column().selected_index, Some(3));

        // -102 - 28 = -130, 6px short of option 4.
        drag(&mut controller, -28.0, 0.0, None);
        pump(&mut controller);
        assert_eq!(controller.rest_offset(), -136.0);
        assert_eq!(controller.host().changes, 2);
    }

    #[test]
    fn rubber_band_past_the_top_springs_back() {
        let mut controller = controller(column(5, 0));
        controller.on_drag_start();
        controller.on_drag_move(DragMove { delta_y: 50.0 });
        let damped = controller.offset();
        assert!(damped > 0.0 && damped < 50.0, "damped offset {damped}");
        assert!((damped - 50.0_f64.powf(0.8)).abs() < 1e-9);
        assert_eq!(controller.bounce(), Bounce::OverTop);

        controller.on_drag_end(DragEnd {
            delta_y: 50.0,
            velocity_y: 2.0,
            target: None,
        });
        assert_eq!(controller.rest_offset(), 0.0);
        assert_eq!(controller.bounce(), Bounce::None);
        assert_eq!(controller.host().changes, 1);
        let (_, visual, _) = *controller.host().writes.last().unwrap();
        assert_eq!(visual.duration, Duration::from_millis(100));
    }

    #[test]
    fn rubber_band_past_the_bottom_springs_back() {
        let mut controller = controller(column(5, 4));
        controller.on_drag_start();
        controller.on_drag_move(DragMove { delta_y: -50.0 });
        let damped = controller.offset();
        assert!(damped < -136.0 && damped > -186.0, "damped offset {damped}");
        assert_eq!(controller.bounce(), Bounce::OverBottom);

        controller.on_drag_end(DragEnd {
            delta_y: -50.0,
            velocity_y: -2.0,
            target: None,
        });
        assert_eq!(controller.rest_offset(), -136.0);
        assert_eq!(controller.column().selected_index, Some(4));
        assert_eq!(controller.host().changes, 1);
    }

    #[test]
    fn disabled_ends_narrow_the_range() {
        let mut options = options(5);
        options[0].disabled = true;
        options[4].disabled = true;
        let mut controller = controller(PickerColumn::new("test", options, Some(0)));
        // Refresh already clamped the selection to the first enabled option.
        assert_eq!(controller.column().selected_index, Some(1));
        controller.on_drag_start();
        assert_eq!(controller.offset_bounds(), (-34.0, -102.0));

        controller.on_drag_move(DragMove { delta_y: 20.0 });
        assert_eq!(controller.bounce(), Bounce::OverTop);
        assert!(controller.offset() > -34.0 && controller.offset() < -14.0);
    }

    #[test]
    fn shrinking_options_clamps_selection() {
        let mut controller = controller(column(5, 4));
        controller.set_options(options(3));
        assert_eq!(controller.column().selected_index, Some(2));
        assert_eq!(controller.rest_offset(), -68.0);
        assert_eq!(controller.host().changes, 0);
        let (index, visual, _) = *controller.host().writes.last().unwrap();
        assert!(index < 3);
        assert_eq!(visual.duration, SELECT_DURATION);
    }

    #[test]
    fn growing_options_writes_every_new_option() {
        let mut controller = controller(column(3, 1));
        controller.host_mut().writes.clear();
        controller.set_options(options(5));

        assert_eq!(controller.column().selected_index, Some(1));
        assert_eq!(controller.rest_offset(), -34.0);
        let written: Vec<_> = controller
            .host()
            .writes
            .iter()
            .map(|(index, ..)| *index)
            .collect();
        assert_eq!(written, [0, 1, 2, 3, 4]);
        let (_, visual, changes) = controller.host().writes[1];
        assert!(visual.selected);
        assert_eq!(changes, VisualChange::all());
        assert_eq!(controller.host().changes, 0);
        assert_eq!(controller.host().haptics, 0);
    }

    #[test]
    fn release_in_place_restores_the_rest_frame() {
        let mut controller = controller(column(5, 2));
        controller.on_drag_start();
        controller.on_drag_move(DragMove { delta_y: -20.0 });
        assert_eq!(controller.column().selected_index, Some(3));

        controller.on_drag_end(DragEnd {
            delta_y: 0.0,
            velocity_y: 0.0,
            target: None,
        });
        assert_eq!(controller.offset(), -68.0);
        assert_eq!(controller.rest_offset(), -68.0);
        assert_eq!(controller.column().selected_index, Some(2));
        assert_eq!(controller.phase(), MotionPhase::Idle);
        assert_eq!(controller.host().changes, 0);
        let (_, visual, _) = *controller.host().writes.last().unwrap();
        assert_eq!(visual.duration, SELECT_DURATION);
    }

    #[test]
    fn all_disabled_column_never_panics() {
        let options: Vec<_> = options(3).into_iter().map(PickerOption::disabled).collect();
        let mut controller = controller(PickerColumn::new("test", options, Some(1)));
        // The inverted range clamps every index to the last option.
        assert_eq!(controller.column().selected_index, Some(2));

        controller.on_drag_start();
        assert_eq!(controller.offset_bounds(), (-68.0, 0.0));
        controller.on_drag_move(DragMove { delta_y: -10.0 });
        controller.on_drag_end(DragEnd {
            delta_y: -10.0,
            velocity_y: -1.0,
            target: None,
        });
        pump(&mut controller);
        assert_eq!(controller.phase(), MotionPhase::Idle);
        assert!(!controller.has_pending_frame());
        assert_eq!(controller.rest_offset() % 34.0, 0.0);
        assert!(controller.column().selected_index.is_some_and(|i| i < 3));

        controller.refresh();
        assert_eq!(controller.column().selected_index, Some(2));
        assert_eq!(controller.rest_offset(), -68.0);
    }

    #[test]
    fn drag_start_cancels_pending_momentum() {
        let mut controller = controller(column(20, 2));
        drag(&mut controller, -10.0, -2.0, None);
        let stale = controller.host().pending.unwrap();
        let rest = controller.rest_offset();

        controller.on_drag_start();
        assert!(!controller.has_pending_frame());
        assert_eq!(controller.host().cancelled, [stale]);

        controller.on_frame(stale);
        assert_eq!(controller.rest_offset(), rest);
        assert_eq!(controller.host().changes, 0);
    }

    #[test]
    fn select_index_always_emits() {
        let mut controller = controller(column(5, 2));
        controller.select_index(2, SELECT_DURATION);
        controller.select_index(2, SELECT_DURATION);
        assert_eq!(controller.host().changes, 2);
        assert_eq!(controller.host().haptics, 0);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn select_index_out_of_range_panics() {
        let mut controller = controller(column(5, 2));
        controller.select_index(5, SELECT_DURATION);
    }

    #[test]
    fn unchanged_frames_write_nothing() {
        let mut controller = controller(column(5, 2));
        controller.on_drag_start();
        controller.on_drag_move(DragMove { delta_y: 0.0 });
        let after_first = controller.host().writes.len();
        assert!(
            controller.host().writes[5..]
                .iter()
                .all(|(_, _, changes)| *changes == VisualChange::DURATION)
        );
        controller.on_drag_move(DragMove { delta_y: 0.0 });
        assert_eq!(controller.host().writes.len(), after_first);
    }

    #[test]
    fn haptics_fire_once_per_index_transition() {
        let mut controller = controller(column(5, 0));
        controller.on_drag_start();
        for step in 1..=10_u8 {
            controller.on_drag_move(DragMove {
                delta_y: -(f64::from(step) * 6.8),
            });
        }
        // Swept from option 0 to option 2.
        assert_eq!(controller.column().selected_index, Some(2));
        assert_eq!(controller.host().haptics, 2);
    }

    #[test]
    fn empty_column_is_inert() {
        let mut controller = controller(PickerColumn::default());
        assert_eq!(controller.column().selected_index, None);
        drag(&mut controller, -30.0, -1.0, None);
        pump(&mut controller);
        assert_eq!(controller.column().selected_index, None);
        assert_eq!(controller.phase(), MotionPhase::Idle);
        assert!(!controller.has_pending_frame());
        assert!(controller.host().writes.is_empty());
        assert_eq!(controller.host().changes, 0);
        assert_eq!(controller.host().haptics, 0);
    }

    #[test]
    #[should_panic(expected = "option height must be measured")]
    fn drag_before_layout_panics() {
        let mut controller = PickerColumnController::new(
            column(3, 0),
            ArcStyle::default(),
            RecordingHost::default(),
        );
        controller.on_drag_start();
    }
}

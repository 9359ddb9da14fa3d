//! Carousel engine: a single continuous offset over a horizontal strip of
//! chips, with center detection, snap animation, and an explicit gesture
//! state machine.
//!
//! All geometry is in terminal columns. The edge padding is sized so the
//! first and last chips can reach the viewport center, which keeps
//! `jump_to(i, false)` followed by reading `selected` an exact round trip
//! for every index.

use serde::{Deserialize, Serialize};

/// Chip footprint in columns.
pub const CHIP_WIDTH: f32 = 10.0;
pub const CHIP_GAP: f32 = 2.0;
/// A chip closer than this to the viewport center gets the center highlight.
pub const CENTER_EPSILON: f32 = 2.5;
/// Wheel-to-offset scaling carried over from the source carousel.
pub const WHEEL_SCALE: f32 = 0.8;
/// Columns one wheel notch contributes before scaling.
pub const WHEEL_NOTCH: f32 = 4.0;
/// Quiet period after the last wheel event before snapping to the nearest chip.
pub const WHEEL_QUIET_MS: u32 = 140;
pub const SNAP_ANIMATION_MS: u32 = 320;
/// Main-loop tick granularity; animation frames and the wheel debounce run on it.
pub const TICK_MS: u32 = 30;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Motion {
    Idle,
    Dragging {
        grab_x: f32,
        grab_offset: f32,
        moved: bool,
    },
    Animating {
        from: f32,
        to: f32,
        elapsed_ms: u32,
    },
}

/// What releasing the pointer resolved to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragOutcome {
    /// Release after movement: snapped toward the chip nearest center.
    Snapped,
    /// Press and release without movement on a chip.
    Clicked(usize),
    /// No drag was in progress.
    Ignored,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CarouselState {
    /// Track translation, clamped to `[-max_offset, 0]`.
    pub offset: f32,
    /// Index of the chip nearest the viewport center. Derived from `offset`.
    pub selected: usize,
    pub motion: Motion,
    pub viewport: f32,
    pub count: usize,
    /// Countdown to the debounced wheel snap.
    pub wheel_quiet_ms: Option<u32>,
}

impl CarouselState {
    pub fn new(count: usize, viewport: f32) -> Self {
        let mut carousel = Self {
            offset: 0.0,
            selected: 0,
            motion: Motion::Idle,
            viewport,
            count,
            wheel_quiet_ms: None,
        };
        carousel.set_offset(0.0);
        carousel
    }

    pub fn stride() -> f32 {
        CHIP_WIDTH + CHIP_GAP
    }

    /// Padding on both track ends, sized so every chip can be centered.
    pub fn edge_padding(&self) -> f32 {
        ((self.viewport - CHIP_WIDTH) / 2.0).max(0.0)
    }

    pub fn content_width(&self) -> f32 {
        if self.count == 0 {
            return 0.0;
        }
        2.0 * self.edge_padding()
            + self.count as f32 * CHIP_WIDTH
            + (self.count - 1) as f32 * CHIP_GAP
    }

    pub fn max_offset(&self) -> f32 {
        (self.content_width() - self.viewport).max(0.0)
    }

    /// Chip center in track coordinates.
    pub fn chip_center(&self, index: usize) -> f32 {
        self.edge_padding() + index as f32 * Self::stride() + CHIP_WIDTH / 2.0
    }

    /// Chip center in viewport coordinates at the current offset.
    pub fn chip_view_center(&self, index: usize) -> f32 {
        self.chip_center(index) + self.offset
    }

    pub fn is_centered(&self, index: usize) -> bool {
        (self.chip_view_center(index) - self.viewport / 2.0).abs() < CENTER_EPSILON
    }

    /// Entry id of the selected chip (ids are 1-based catalog positions).
    pub fn selected_id(&self) -> u16 {
        self.selected as u16 + 1
    }

    /// The offset that centers `index`, before clamping.
    fn offset_for(&self, index: usize) -> f32 {
        self.viewport / 2.0 - self.chip_center(index)
    }

    fn clamp_offset(&self, x: f32) -> f32 {
        x.clamp(-self.max_offset(), 0.0)
    }

    /// Clamp and apply an offset, then re-derive the selected chip.
    /// Returns whether the selection changed.
    pub fn set_offset(&mut self, x: f32) -> bool {
        self.offset = self.clamp_offset(x);
        let nearest = self.nearest_index();
        if nearest != self.selected {
            self.selected = nearest;
            return true;
        }
        false
    }

    // Nearest-chip scan over every chip center. O(count) per offset update,
    // which is fine at catalog scale; ties keep the lowest index.
    fn nearest_index(&self) -> usize {
        let center = self.viewport / 2.0;
        let mut best = 0usize;
        let mut best_distance = f32::INFINITY;
        for index in 0..self.count {
            let distance = (self.chip_view_center(index) - center).abs();
            if distance < best_distance {
                best_distance = distance;
                best = index;
            }
        }
        best
    }

    /// The chip under a viewport x position, if any.
    pub fn chip_at(&self, view_x: f32) -> Option<usize> {
        if self.count == 0 {
            return None;
        }
        let track_x = view_x - self.offset - self.edge_padding();
        if track_x < 0.0 {
            return None;
        }
        let index = (track_x / Self::stride()) as usize;
        let within_chip = track_x - index as f32 * Self::stride() < CHIP_WIDTH;
        (index < self.count && within_chip).then_some(index)
    }

    /// Center a chip, immediately or through the 320ms eased snap.
    pub fn jump_to(&mut self, index: usize, animate: bool) {
        if self.count == 0 {
            return;
        }
        let index = index.min(self.count - 1);
        let target = self.clamp_offset(self.offset_for(index));
        if animate && (target - self.offset).abs() > f32::EPSILON {
            self.motion = Motion::Animating {
                from: self.offset,
                to: target,
                elapsed_ms: 0,
            };
        } else {
            self.motion = Motion::Idle;
            self.set_offset(target);
        }
    }

    /// Start tracking a drag. Cancels any snap animation or pending wheel snap.
    pub fn drag_start(&mut self, x: f32) {
        self.wheel_quiet_ms = None;
        self.motion = Motion::Dragging {
            grab_x: x,
            grab_offset: self.offset,
            moved: false,
        };
    }

    /// 1:1 pointer tracking while dragging; ignored otherwise.
    pub fn drag_move(&mut self, x: f32) -> bool {
        let Motion::Dragging {
            grab_x,
            grab_offset,
            moved,
        } = self.motion
        else {
            return false;
        };
        if !moved && (x - grab_x).abs() >= 1.0 {
            self.motion = Motion::Dragging {
                grab_x,
                grab_offset,
                moved: true,
            };
        }
        self.set_offset(grab_offset + (x - grab_x))
    }

    /// End a drag: a stationary press resolves to a chip click, anything else
    /// snaps to whichever chip is nearest center.
    pub fn drag_end(&mut self) -> DragOutcome {
        let Motion::Dragging { grab_x, moved, .. } = self.motion else {
            return DragOutcome::Ignored;
        };
        self.motion = Motion::Idle;
        if !moved {
            if let Some(index) = self.chip_at(grab_x) {
                return DragOutcome::Clicked(index);
            }
        }
        self.jump_to(self.selected, true);
        DragOutcome::Snapped
    }

    /// Apply one wheel event. Ignored while dragging; cancels a running snap.
    pub fn wheel(&mut self, delta: f32) -> bool {
        if matches!(self.motion, Motion::Dragging { .. }) {
            return false;
        }
        self.motion = Motion::Idle;
        let changed = self.set_offset(self.offset - delta * WHEEL_SCALE);
        self.wheel_quiet_ms = Some(WHEEL_QUIET_MS);
        changed
    }

    /// Viewport resize: re-center the currently selected chip.
    pub fn set_viewport(&mut self, viewport: f32) {
        self.viewport = viewport;
        self.wheel_quiet_ms = None;
        let selected = self.selected;
        self.jump_to(selected, false);
    }

    /// Advance animation and debounce clocks by `ms`. Returns whether
    /// anything visible changed.
    pub fn tick(&mut self, ms: u32) -> bool {
        let mut changed = false;

        if let Motion::Animating {
            from,
            to,
            elapsed_ms,
        } = self.motion
        {
            let elapsed_ms = elapsed_ms + ms;
            let t = (elapsed_ms as f32 / SNAP_ANIMATION_MS as f32).min(1.0);
            if t >= 1.0 {
                // Land exactly on the target.
                self.set_offset(to);
                self.motion = Motion::Idle;
            } else {
                self.set_offset(from + (to - from) * ease_out_cubic(t));
                self.motion = Motion::Animating {
                    from,
                    to,
                    elapsed_ms,
                };
            }
            changed = true;
        }

        if let Some(quiet) = self.wheel_quiet_ms {
            let quiet = quiet.saturating_sub(ms);
            if quiet == 0 {
                self.wheel_quiet_ms = None;
                if matches!(self.motion, Motion::Idle) {
                    self.jump_to(self.selected, true);
                    changed = true;
                }
            } else {
                self.wheel_quiet_ms = Some(quiet);
            }
        }

        changed
    }
}

fn ease_out_cubic(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(3)
}

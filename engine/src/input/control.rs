//! Control Snapshot
//!
//! The per-frame boolean intent set every gameplay system reads. Device code
//! (keyboard, touch joystick, scripted playback) only has to produce a
//! [`ControlState`]; nothing downstream sees raw key events.

/// Boolean intents for a single frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControlState {
    pub forward: bool,
    pub backward: bool,
    pub leftward: bool,
    pub rightward: bool,
    pub jump: bool,
    pub interact: bool,
}

impl ControlState {
    /// A snapshot with every intent released.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the forward/backward movement direction (-1, 0, or 1).
    pub fn forward_axis(&self) -> i32 {
        (self.forward as i32) - (self.backward as i32)
    }

    /// Get the left/right movement direction (-1, 0, or 1).
    pub fn right_axis(&self) -> i32 {
        (self.rightward as i32) - (self.leftward as i32)
    }

    /// Check if any of the four directional intents is held.
    pub fn any_directional(&self) -> bool {
        self.forward || self.backward || self.leftward || self.rightward
    }

    pub fn with_forward(mut self) -> Self {
        self.forward = true;
        self
    }

    pub fn with_backward(mut self) -> Self {
        self.backward = true;
        self
    }

    pub fn with_leftward(mut self) -> Self {
        self.leftward = true;
        self
    }

    pub fn with_rightward(mut self) -> Self {
        self.rightward = true;
        self
    }

    pub fn with_jump(mut self) -> Self {
        self.jump = true;
        self
    }

    pub fn with_interact(mut self) -> Self {
        self.interact = true;
        self
    }
}

/// Anything that can be polled once per frame for a [`ControlState`].
///
/// Implementations are responsible for debouncing their raw device events.
pub trait ControlSource {
    fn control_state(&mut self) -> ControlState;
}

/// One segment of a scripted input timeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScriptedSegment {
    /// Session time (seconds) at which this segment becomes active
    pub start: f32,
    /// Intents held for the duration of the segment
    pub state: ControlState,
}

/// Replays a fixed timeline of control states.
///
/// The active segment is the last one whose `start` is not after the current
/// clock. Before the first segment, and after [`ScriptedControls::advance`] has
/// been called with no segments at all, every intent reads as released.
#[derive(Debug, Clone, Default)]
pub struct ScriptedControls {
    segments: Vec<ScriptedSegment>,
    clock: f32,
}

impl ScriptedControls {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a segment. Segments are kept sorted by start time.
    pub fn then_at(mut self, start: f32, state: ControlState) -> Self {
        self.push(start, state);
        self
    }

    pub fn push(&mut self, start: f32, state: ControlState) {
        let index = self.segments.partition_point(|s| s.start <= start);
        self.segments.insert(index, ScriptedSegment { start, state });
    }

    /// Move the playback clock forward.
    pub fn advance(&mut self, dt: f32) {
        self.clock += dt.max(0.0);
    }

    pub fn clock(&self) -> f32 {
        self.clock
    }

    /// Time at which the last segment starts, or zero for an empty script.
    pub fn last_start(&self) -> f32 {
        self.segments.last().map_or(0.0, |s| s.start)
    }

    pub fn state_at(&self, time: f32) -> ControlState {
        self.segments
            .iter()
            .rev()
            .find(|s| s.start <= time)
            .map(|s| s.state)
            .unwrap_or_default()
    }
}

impl ControlSource for ScriptedControls {
    fn control_state(&mut self) -> ControlState {
        self.state_at(self.clock)
    }
}

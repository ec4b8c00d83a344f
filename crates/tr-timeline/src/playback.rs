//! A playback cursor over the creation-relative slider range.

use log::debug;

use tr_core::{Minute, ReplayConfig, ShiftClock, TrResult, format_stamp, parse_stamp};
use tr_sim::SimulationData;

/// Cursor over `[min_slider_val, max_slider_val]`, starting at the minimum.
///
/// The cursor never leaves its range: every move clamps.
#[derive(Clone, Debug)]
pub struct Playback {
    clock:   ShiftClock,
    min:     Minute,
    max:     Minute,
    current: Minute,
    step:    u32,
    skip:    u32,
}

impl Playback {
    /// `advance` moves `playback_step_minutes`; `skip_forward` moves
    /// `slot_minutes`.
    pub fn new(data: &SimulationData, config: &ReplayConfig) -> Self {
        Self {
            clock:   data.clock(),
            min:     data.min_slider_val,
            max:     data.max_slider_val,
            current: data.min_slider_val,
            step:    config.playback_step_minutes,
            skip:    config.slot_minutes,
        }
    }

    #[inline]
    pub fn current(&self) -> Minute {
        self.current
    }

    pub fn bounds(&self) -> (Minute, Minute) {
        (self.min, self.max)
    }

    pub fn is_finished(&self) -> bool {
        self.current >= self.max
    }

    /// One playback tick.  Returns `true` once the cursor sits on the maximum.
    pub fn advance(&mut self) -> bool {
        self.move_by(self.step)
    }

    /// Jump one slot ahead.  Returns `true` once the cursor sits on the maximum.
    pub fn skip_forward(&mut self) -> bool {
        self.move_by(self.skip)
    }

    /// Set the cursor to `minute`, clamped to the range.
    pub fn set(&mut self, minute: Minute) -> Minute {
        self.current = minute.clamp(self.min, self.max);
        self.current
    }

    /// Jump to a `YYYY-MM-DD HH:MM` stamp.  Unparseable text leaves the cursor
    /// where it was.
    pub fn seek(&mut self, stamp: &str) -> TrResult<Minute> {
        let target = self.clock.minute_of(parse_stamp(stamp)?);
        let landed = self.set(target);
        if landed != target {
            debug!("seek to {target} clamped to {landed}");
        }
        Ok(landed)
    }

    /// The cursor as a `YYYY-MM-DD HH:MM` wall-clock stamp.
    pub fn clock_text(&self) -> String {
        format_stamp(self.clock.at(self.current))
    }

    fn move_by(&mut self, minutes: u32) -> bool {
        self.set(self.current.offset(minutes));
        self.is_finished()
    }
}

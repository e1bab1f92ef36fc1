/// Self-care action tiles and their timer-driven state machine
///
/// Each tile is in exactly one of Idle, Running or Completed. Instant tiles
/// complete on tap; timed tiles run a countdown (or the 4-7-8 breathing
/// cadence) and complete when it elapses naturally - there is no cancel.
/// Exactly one action-recorded event fires per completion, never one per
/// tick. The meal tile only toggles an informational tip and never reaches
/// Completed.
///
/// The board is advanced by discrete `tick_second` calls from the host's
/// timer; the scheduling primitive itself lives outside this crate.

/// Seconds for the walk countdown
pub const WALK_SECS: u32 = 300;
/// Seconds for the rest countdown
pub const REST_SECS: u32 = 1200;
/// Total length of a breathing session
pub const BREATHING_SESSION_SECS: u32 = 120;

/// Phases of the 4-7-8 breathing cadence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreathPhase {
    Inhale,
    Hold,
    Exhale,
}

impl BreathPhase {
    /// Length of this phase in seconds
    pub fn duration_secs(&self) -> u32 {
        match self {
            BreathPhase::Inhale => 4,
            BreathPhase::Hold => 7,
            BreathPhase::Exhale => 8,
        }
    }

    fn next(&self) -> BreathPhase {
        match self {
            BreathPhase::Inhale => BreathPhase::Hold,
            BreathPhase::Hold => BreathPhase::Exhale,
            BreathPhase::Exhale => BreathPhase::Inhale,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BreathPhase::Inhale => "Inhale",
            BreathPhase::Hold => "Hold",
            BreathPhase::Exhale => "Exhale",
        }
    }
}

/// Repeating inhale/hold/exhale cadence capped at a fixed session length
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreathingGuide {
    elapsed_secs: u32,
    phase: BreathPhase,
    phase_remaining: u32,
}

impl BreathingGuide {
    fn new() -> Self {
        Self {
            elapsed_secs: 0,
            phase: BreathPhase::Inhale,
            phase_remaining: BreathPhase::Inhale.duration_secs(),
        }
    }

    /// Advance one second; true once the session length is reached
    fn tick_second(&mut self) -> bool {
        self.elapsed_secs += 1;
        if self.elapsed_secs >= BREATHING_SESSION_SECS {
            return true;
        }
        self.phase_remaining -= 1;
        if self.phase_remaining == 0 {
            self.phase = self.phase.next();
            self.phase_remaining = self.phase.duration_secs();
        }
        false
    }

    pub fn phase(&self) -> BreathPhase {
        self.phase
    }

    /// Seconds left in the current phase, for the guide display
    pub fn phase_remaining_secs(&self) -> u32 {
        self.phase_remaining
    }

    pub fn remaining_secs(&self) -> u32 {
        BREATHING_SESSION_SECS.saturating_sub(self.elapsed_secs)
    }
}

/// What a tile does when tapped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileKind {
    /// Completes immediately on tap
    Instant,
    /// Runs a plain countdown of the given length
    Timed(u32),
    /// 4-7-8 breathing cadence
    Breathing,
    /// Toggles an informational tip, never completes
    Tip,
}

/// Static description of one tile
#[derive(Debug, Clone, Copy)]
pub struct TileSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: TileKind,
}

/// The fixed set of tiles the surface renders, in display order
pub const TILES: &[TileSpec] = &[
    TileSpec { key: "water", label: "Drink Water", kind: TileKind::Instant },
    TileSpec { key: "walk", label: "5-min Walk", kind: TileKind::Timed(WALK_SECS) },
    TileSpec { key: "meal", label: "Have a Meal", kind: TileKind::Tip },
    TileSpec { key: "breathing", label: "Breathing", kind: TileKind::Breathing },
    TileSpec { key: "beverage", label: "Beverage Break", kind: TileKind::Instant },
    TileSpec { key: "rest", label: "Rest — 20 min", kind: TileKind::Timed(REST_SECS) },
];

/// Current state of one tile
#[derive(Debug, Clone, PartialEq)]
pub enum TileState {
    Idle,
    /// Plain countdown with seconds remaining
    Counting { remaining_secs: u32 },
    /// Breathing session in progress
    Breathing(BreathingGuide),
    Completed,
}

impl TileState {
    pub fn is_running(&self) -> bool {
        matches!(self, TileState::Counting { .. } | TileState::Breathing(_))
    }
}

/// Result of tapping a tile
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TapOutcome {
    /// Instant tile completed; record an action of this type
    Recorded(&'static str),
    /// Timed tile entered Running
    TimerStarted,
    /// Tip tile toggled; payload is the new open state
    TipToggled(bool),
    /// Tap on a Running or Completed tile, or an unknown key
    Ignored,
}

/// The whole action board: one state per tile plus the tip flag
#[derive(Debug)]
pub struct ActionBoard {
    states: Vec<(&'static str, TileState)>,
    tip_open: bool,
}

impl Default for ActionBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionBoard {
    pub fn new() -> Self {
        Self {
            states: TILES.iter().map(|t| (t.key, TileState::Idle)).collect(),
            tip_open: false,
        }
    }

    fn spec(key: &str) -> Option<&'static TileSpec> {
        TILES.iter().find(|t| t.key == key)
    }

    fn state_mut(&mut self, key: &str) -> Option<&mut TileState> {
        self.states
            .iter_mut()
            .find(|(k, _)| *k == key)
            .map(|(_, s)| s)
    }

    /// Current state of a tile, Idle for unknown keys
    pub fn state(&self, key: &str) -> &TileState {
        self.states
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, s)| s)
            .unwrap_or(&TileState::Idle)
    }

    /// Whether the meal tip is currently shown
    pub fn tip_open(&self) -> bool {
        self.tip_open
    }

    /// Handle a tap on the tile with the given key
    ///
    /// Taps on Completed tiles are no-ops; taps on Running tiles are ignored
    /// because a tile cannot re-enter Running while a timer is live.
    pub fn tap(&mut self, key: &str) -> TapOutcome {
        let Some(spec) = Self::spec(key) else {
            return TapOutcome::Ignored;
        };

        if spec.kind == TileKind::Tip {
            self.tip_open = !self.tip_open;
            return TapOutcome::TipToggled(self.tip_open);
        }

        match self.state_mut(spec.key) {
            Some(state) if *state == TileState::Idle => match spec.kind {
                TileKind::Instant => {
                    *state = TileState::Completed;
                    tracing::debug!("Self-care tile '{}' completed instantly", spec.key);
                    TapOutcome::Recorded(spec.key)
                }
                TileKind::Timed(secs) => {
                    *state = TileState::Counting { remaining_secs: secs };
                    TapOutcome::TimerStarted
                }
                _ => {
                    *state = TileState::Breathing(BreathingGuide::new());
                    TapOutcome::TimerStarted
                }
            },
            _ => TapOutcome::Ignored,
        }
    }

    /// Advance all running timers by one second
    ///
    /// Returns the keys of tiles that completed on this tick, each of which
    /// should fire exactly one action-recorded event.
    pub fn tick_second(&mut self) -> Vec<&'static str> {
        let mut completed = Vec::new();

        for (key, state) in &mut self.states {
            let done = match state {
                TileState::Counting { remaining_secs } => {
                    *remaining_secs = remaining_secs.saturating_sub(1);
                    *remaining_secs == 0
                }
                TileState::Breathing(guide) => guide.tick_second(),
                _ => false,
            };
            if done {
                *state = TileState::Completed;
                tracing::debug!("Self-care tile '{}' completed after its timer", key);
                completed.push(*key);
            }
        }

        completed
    }

    /// Advance by a whole number of seconds, collecting all completions
    pub fn tick(&mut self, seconds: u32) -> Vec<&'static str> {
        let mut completed = Vec::new();
        for _ in 0..seconds {
            completed.extend(self.tick_second());
        }
        completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instant_tile_completes_once_and_ignores_repeat_taps() {
        let mut board = ActionBoard::new();

        assert_eq!(board.tap("water"), TapOutcome::Recorded("water"));
        assert_eq!(*board.state("water"), TileState::Completed);

        // Second tap fires no additional event
        assert_eq!(board.tap("water"), TapOutcome::Ignored);
    }

    #[test]
    fn timed_tile_fires_one_event_after_the_full_duration() {
        let mut board = ActionBoard::new();
        assert_eq!(board.tap("walk"), TapOutcome::TimerStarted);
        assert!(board.state("walk").is_running());

        // No event on intermediate ticks
        let before = board.tick(WALK_SECS - 1);
        assert!(before.is_empty());

        let done = board.tick_second();
        assert_eq!(done, vec!["walk"]);
        assert_eq!(*board.state("walk"), TileState::Completed);

        // Further ticks fire nothing
        assert!(board.tick(10).is_empty());
    }

    #[test]
    fn running_tile_ignores_taps() {
        let mut board = ActionBoard::new();
        board.tap("rest");
        assert_eq!(board.tap("rest"), TapOutcome::Ignored);
        assert!(board.state("rest").is_running());
    }

    #[test]
    fn breathing_cycles_phases_in_4_7_8_order() {
        let mut board = ActionBoard::new();
        board.tap("breathing");

        let phase_at = |board: &ActionBoard| match board.state("breathing") {
            TileState::Breathing(g) => g.phase(),
            _ => panic!("not breathing"),
        };

        assert_eq!(phase_at(&board), BreathPhase::Inhale);
        board.tick(4);
        assert_eq!(phase_at(&board), BreathPhase::Hold);
        board.tick(7);
        assert_eq!(phase_at(&board), BreathPhase::Exhale);
        board.tick(8);
        // Cadence wraps back around
        assert_eq!(phase_at(&board), BreathPhase::Inhale);
    }

    #[test]
    fn breathing_session_completes_at_the_cap() {
        let mut board = ActionBoard::new();
        board.tap("breathing");

        let events = board.tick(BREATHING_SESSION_SECS);
        assert_eq!(events, vec!["breathing"]);
        assert_eq!(*board.state("breathing"), TileState::Completed);
    }

    #[test]
    fn meal_tile_toggles_the_tip_and_never_completes() {
        let mut board = ActionBoard::new();

        assert_eq!(board.tap("meal"), TapOutcome::TipToggled(true));
        assert_eq!(board.tap("meal"), TapOutcome::TipToggled(false));
        assert_eq!(*board.state("meal"), TileState::Idle);
    }

    #[test]
    fn unknown_key_is_ignored() {
        let mut board = ActionBoard::new();
        assert_eq!(board.tap("yoga"), TapOutcome::Ignored);
    }

    #[test]
    fn independent_timers_advance_together() {
        let mut board = ActionBoard::new();
        board.tap("walk");
        board.tap("breathing");

        let mut all: Vec<&str> = Vec::new();
        for _ in 0..WALK_SECS {
            all.extend(board.tick_second());
        }

        // Breathing (120s) completes first, then walk (300s)
        assert_eq!(all, vec!["breathing", "walk"]);
    }
}

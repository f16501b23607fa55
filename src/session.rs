//! Per-session bookkeeping shared by both games: which game is selected, the
//! current level, the level clock, and the completion-time table.
//!
//! ## Messages
//!
//! [`LoadLevelRequest`] is the only way to (re)load a level.  Each game module
//! registers a reader that despawns every [`LevelEntity`], resets its own
//! per-level stats, and spawns the new layout.

use bevy::prelude::*;

use crate::constants::MAX_LEVEL;

/// Which mini-game is running.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectedGame {
    /// Push the box into the goal.
    #[default]
    Platform,
    /// Knock the goal box off its tower.
    Slingshot,
}

impl SelectedGame {
    pub fn label(self) -> &'static str {
        match self {
            SelectedGame::Platform => "PLATFORM PUSH",
            SelectedGame::Slingshot => "SLINGSHOT",
        }
    }
}

/// Current level, 1-based.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentLevel(pub u8);

impl Default for CurrentLevel {
    fn default() -> Self {
        Self(1)
    }
}

impl CurrentLevel {
    pub fn is_last(self) -> bool {
        self.0 >= MAX_LEVEL
    }
}

/// Request to load `level` of the selected game.  Levels above the last wrap
/// to 1.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadLevelRequest {
    pub level: u8,
}

/// Tags every entity spawned for a level so a reload can despawn them all.
#[derive(Component, Debug, Clone, Copy)]
pub struct LevelEntity;

/// Seconds since the level was loaded.  Stops when the level is won or lost.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct LevelClock {
    pub elapsed: f32,
    pub running: bool,
}

impl LevelClock {
    pub fn restart(&mut self) {
        self.elapsed = 0.0;
        self.running = true;
    }

    pub fn stop(&mut self) -> f32 {
        self.running = false;
        self.elapsed
    }

    pub fn tick(&mut self, dt: f32) {
        if self.running {
            self.elapsed += dt;
        }
    }

    /// Elapsed time rounded to one decimal, as displayed and recorded.
    pub fn rounded(&self) -> f32 {
        round_tenths(self.elapsed)
    }
}

#[inline]
pub fn round_tenths(secs: f32) -> f32 {
    (secs * 10.0).round() / 10.0
}

/// Completion times per level: the most recent run and the best run.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct LevelTimes {
    pub recent: [Option<f32>; MAX_LEVEL as usize],
    pub best: [Option<f32>; MAX_LEVEL as usize],
}

impl LevelTimes {
    /// Record a completion.  Out-of-range levels are ignored.
    pub fn record(&mut self, level: u8, secs: f32) {
        let Some(i) = Self::slot(level) else {
            return;
        };
        self.recent[i] = Some(secs);
        self.best[i] = Some(match self.best[i] {
            Some(best) => best.min(secs),
            None => secs,
        });
    }

    /// Clear the most-recent times.  Best times survive a restart.
    pub fn clear(&mut self) {
        self.recent = [None; MAX_LEVEL as usize];
    }

    pub fn recent(&self, level: u8) -> Option<f32> {
        Self::slot(level).and_then(|i| self.recent[i])
    }

    pub fn best(&self, level: u8) -> Option<f32> {
        Self::slot(level).and_then(|i| self.best[i])
    }

    /// Sum of the most-recent times; missing levels count as zero.
    pub fn total(&self) -> f32 {
        self.recent.iter().flatten().sum()
    }

    /// `"12.3s"` or `"--"`.
    pub fn format_recent(&self, level: u8) -> String {
        format_time(self.recent(level))
    }

    /// Finished-dialog row: `"Level 2:  18.0s  (best 14.2s)"`.  The best
    /// time is only shown when it beats the most recent one.
    pub fn summary_row(&self, level: u8) -> String {
        let row = format!("Level {level}:  {}", self.format_recent(level));
        match (self.recent(level), self.best(level)) {
            (Some(recent), Some(best)) if best < recent => {
                format!("{row}  (best {})", format_time(Some(best)))
            }
            _ => row,
        }
    }

    /// `"--"` while the total is zero.
    pub fn format_total(&self) -> String {
        let total = self.total();
        if total > 0.0 {
            format!("{total:.1}s")
        } else {
            "--".to_string()
        }
    }

    fn slot(level: u8) -> Option<usize> {
        (1..=MAX_LEVEL)
            .contains(&level)
            .then(|| (level - 1) as usize)
    }
}

pub fn format_time(time: Option<f32>) -> String {
    match time {
        Some(t) => format!("{t:.1}s"),
        None => "--".to_string(),
    }
}

/// Lines shown in the win / game-over dialog, written by the game that ended
/// the level.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct LevelSummary {
    pub lines: Vec<String>,
}

/// Advance the level clock while playing.
pub fn level_clock_system(time: Res<Time>, mut clock: ResMut<LevelClock>) {
    clock.tick(time.delta_secs());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_keeps_recent_and_best() {
        let mut times = LevelTimes::default();
        times.record(2, 14.2);
        times.record(2, 18.0);
        assert_eq!(times.recent(2), Some(18.0));
        assert_eq!(times.best(2), Some(14.2));
    }

    #[test]
    fn out_of_range_levels_are_ignored() {
        let mut times = LevelTimes::default();
        times.record(0, 3.0);
        times.record(4, 3.0);
        assert_eq!(times, LevelTimes::default());
    }

    #[test]
    fn total_skips_missing_levels() {
        let mut times = LevelTimes::default();
        assert_eq!(times.format_total(), "--");
        times.record(1, 10.5);
        times.record(3, 4.5);
        assert_eq!(times.total(), 15.0);
        assert_eq!(times.format_total(), "15.0s");
        assert_eq!(times.format_recent(2), "--");
        assert_eq!(times.format_recent(1), "10.5s");
    }

    #[test]
    fn clear_forgets_recent_but_not_best() {
        let mut times = LevelTimes::default();
        times.record(1, 9.0);
        times.clear();
        assert_eq!(times.recent(1), None);
        assert_eq!(times.best(1), Some(9.0));
    }

    #[test]
    fn summary_row_shows_an_older_best() {
        let mut times = LevelTimes::default();
        assert_eq!(times.summary_row(1), "Level 1:  --");
        times.record(2, 14.2);
        assert_eq!(times.summary_row(2), "Level 2:  14.2s");
        times.record(2, 18.0);
        assert_eq!(times.summary_row(2), "Level 2:  18.0s  (best 14.2s)");
    }

    #[test]
    fn clock_only_advances_while_running() {
        let mut clock = LevelClock::default();
        clock.tick(1.0);
        assert_eq!(clock.elapsed, 0.0);
        clock.restart();
        clock.tick(1.24);
        assert_eq!(clock.rounded(), 1.2);
        let stopped_at = clock.stop();
        clock.tick(5.0);
        assert_eq!(clock.elapsed, stopped_at);
    }

    #[test]
    fn last_level_detection() {
        assert!(!CurrentLevel(2).is_last());
        assert!(CurrentLevel(3).is_last());
    }
}

use std::time::{Duration, Instant};

use crate::game::Lifecycle;

/// Play time and game count for the header line
///
/// The clock only runs while a session is in the Playing state.
pub struct GameMetrics {
    pub elapsed_time: Duration,
    pub games_played: u32,
    running_since: Option<Instant>,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            elapsed_time: Duration::ZERO,
            games_played: 0,
            running_since: None,
        }
    }

    /// Start or stop the clock to follow the session lifecycle
    pub fn track(&mut self, lifecycle: Lifecycle) {
        self.track_at(lifecycle, Instant::now());
    }

    fn track_at(&mut self, lifecycle: Lifecycle, now: Instant) {
        let playing = lifecycle == Lifecycle::Playing;
        match (playing, self.running_since) {
            (true, None) => self.running_since = Some(now),
            (false, Some(since)) => {
                self.elapsed_time += now.saturating_duration_since(since);
                self.running_since = None;
            }
            _ => {}
        }
    }

    /// Total play time including the current stretch
    pub fn elapsed(&self) -> Duration {
        self.elapsed_at(Instant::now())
    }

    fn elapsed_at(&self, now: Instant) -> Duration {
        match self.running_since {
            Some(since) => self.elapsed_time + now.saturating_duration_since(since),
            None => self.elapsed_time,
        }
    }

    /// A fresh session replaced the old one
    pub fn on_reset(&mut self) {
        self.elapsed_time = Duration::ZERO;
        self.running_since = None;
    }

    pub fn on_game_over(&mut self) {
        self.games_played += 1;
    }

    pub fn format_time(&self) -> String {
        format_duration(self.elapsed())
    }
}

fn format_duration(elapsed: Duration) -> String {
    let total_secs = elapsed.as_secs();
    let minutes = total_secs / 60;
    let seconds = total_secs % 60;
    format!("{:02}:{:02}", minutes, seconds)
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}

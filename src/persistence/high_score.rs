use tracing::{info, warn};

use super::store::HighScoreStore;

/// In-memory best score backed by a store
///
/// Store failures never reach the game: a failed read starts from 0 and a
/// failed write only loses the on-disk copy.
pub struct HighScore {
    best: u32,
    store: Box<dyn HighScoreStore>,
}

impl HighScore {
    /// Seed the in-memory value from the store
    pub fn load(store: Box<dyn HighScoreStore>) -> Self {
        let best = match store.read() {
            Ok(score) => score,
            Err(err) => {
                warn!(error = %err, "failed to read high score, starting from 0");
                0
            }
        };

        Self { best, store }
    }

    pub fn get(&self) -> u32 {
        self.best
    }

    /// Offer a final score; persists and returns true if it beats the best
    pub fn record(&mut self, score: u32) -> bool {
        if score <= self.best {
            return false;
        }

        self.best = score;
        info!(score, "new high score");
        if let Err(err) = self.store.write(score) {
            warn!(error = %err, score, "failed to persist high score");
        }
        true
    }
}

impl std::fmt::Debug for HighScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HighScore").field("best", &self.best).finish()
    }
}

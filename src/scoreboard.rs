use chrono::{DateTime, Local};

/// High score for this run of the program. Nothing is written to disk.
#[derive(Clone, Debug, Default)]
pub struct Scoreboard {
    best: u32,
    set_at: Option<DateTime<Local>>,
    games_played: u32,
}

impl Scoreboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a finished game, returning true if it beat the best score.
    pub fn record(&mut self, score: u32) -> bool {
        self.record_at(score, Local::now())
    }

    fn record_at(&mut self, score: u32, when: DateTime<Local>) -> bool {
        self.games_played += 1;
        if score > self.best {
            self.best = score;
            self.set_at = Some(when);
            true
        } else {
            false
        }
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    pub fn set_at(&self) -> Option<DateTime<Local>> {
        self.set_at
    }

    pub fn games_played(&self) -> u32 {
        self.games_played
    }
}

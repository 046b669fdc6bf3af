use std::time::Duration;

use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::clock::Ticker;
use crate::config::{Difficulty, GameConfig, SpeedPolicy};
use crate::game::{Collision, Game, StepOutcome};
use crate::grid::Direction;

/// Counts down to the start of play: shows the number while it is positive,
/// then "GO!" for one more tick.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct Countdown {
    remaining: u32,
}

impl Countdown {
    fn new(from: u32) -> Self {
        Countdown { remaining: from }
    }

    pub fn label(&self) -> String {
        if self.remaining > 0 {
            self.remaining.to_string()
        } else {
            "GO!".to_string()
        }
    }

    /// Returns true once the countdown has run out.
    fn tick(&mut self) -> bool {
        match self.remaining.checked_sub(1) {
            Some(remaining) => {
                self.remaining = remaining;
                false
            }
            None => true,
        }
    }
}

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Ending {
    Crashed(Collision),
    BoardFilled,
}

impl Ending {
    pub fn describe(self) -> &'static str {
        match self {
            Ending::Crashed(collision) => collision.describe(),
            Ending::BoardFilled => "filled the board",
        }
    }
}

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum GameState {
    Countdown(Countdown),
    Running,
    GameOver(Ending),
}

#[derive(PartialEq, Eq, Clone, Debug)]
pub enum SessionEvent {
    CountdownTick(String),
    Started,
    Ate { score: u32 },
    SpeedChanged(Duration),
    Ended { ending: Ending, score: u32 },
}

/// A run of games at one difficulty: drives the countdown and game clocks
/// and feeds ticks into the current [`Game`].
pub struct Session {
    config: GameConfig,
    difficulty: Difficulty,
    speed: SpeedPolicy,
    game: Game,
    state: GameState,
    game_clock: Ticker,
    countdown_clock: Ticker,
    rng: StdRng,
}

impl Session {
    pub fn new(config: &GameConfig, difficulty: Difficulty) -> Self {
        Self::with_rng(config, difficulty, StdRng::from_entropy())
    }

    pub fn with_rng(config: &GameConfig, difficulty: Difficulty, mut rng: StdRng) -> Self {
        let speed = config.speed_policy(difficulty);
        let game = Game::with_rng(config, StdRng::seed_from_u64(rng.gen()));
        let mut session = Session {
            config: config.clone(),
            difficulty,
            speed,
            game,
            state: GameState::Countdown(Countdown::new(config.countdown_from)),
            game_clock: Ticker::new(speed.base()),
            countdown_clock: Ticker::new(config.countdown_interval()),
            rng,
        };
        session.begin_countdown();
        session
    }

    /// Throws the current game away and counts down into a fresh one.
    pub fn restart(&mut self) {
        self.game = Game::with_rng(&self.config, StdRng::seed_from_u64(self.rng.gen()));
        self.begin_countdown();
    }

    fn begin_countdown(&mut self) {
        info!("new {} game, counting down", self.difficulty.name());
        self.game_clock.stop();
        self.game_clock.set_interval(self.speed.base());
        self.state = GameState::Countdown(Countdown::new(self.config.countdown_from));
        self.countdown_clock.start();
    }

    /// Stops both clocks, e.g. when leaving for the menu.
    pub fn stop(&mut self) {
        self.game_clock.stop();
        self.countdown_clock.stop();
    }

    /// Input is only taken while the snake is actually moving.
    pub fn change_direction(&mut self, direction: Direction) -> bool {
        self.state == GameState::Running && self.game.change_direction(direction)
    }

    pub fn update(&mut self, dt: Duration) -> Vec<SessionEvent> {
        let mut events = Vec::new();

        // Game clock first, so the tick that starts play doesn't also move.
        if self.game_clock.poll(dt) && self.state == GameState::Running {
            self.tick(&mut events);
        }

        if self.countdown_clock.poll(dt) {
            if let GameState::Countdown(countdown) = &mut self.state {
                if countdown.tick() {
                    self.countdown_clock.stop();
                    self.state = GameState::Running;
                    self.game_clock.start();
                    info!("go");
                    events.push(SessionEvent::Started);
                } else {
                    debug!("countdown {}", countdown.label());
                    events.push(SessionEvent::CountdownTick(countdown.label()));
                }
            }
        }

        events
    }

    fn tick(&mut self, events: &mut Vec<SessionEvent>) {
        match self.game.step() {
            StepOutcome::Moved => {}
            StepOutcome::Ate { score } => {
                events.push(SessionEvent::Ate { score });
                let interval = self.speed.interval_for(score);
                if interval != self.game_clock.interval() {
                    debug!("speed up to {:?} per tick", interval);
                    self.game_clock.set_interval(interval);
                    events.push(SessionEvent::SpeedChanged(interval));
                }
            }
            StepOutcome::Collided(collision) => self.finish(Ending::Crashed(collision), events),
            StepOutcome::BoardFilled => self.finish(Ending::BoardFilled, events),
        }
    }

    fn finish(&mut self, ending: Ending, events: &mut Vec<SessionEvent>) {
        self.game_clock.stop();
        self.state = GameState::GameOver(ending);
        let score = self.game.score();
        info!("game over: snake {} with score {}", ending.describe(), score);
        events.push(SessionEvent::Ended { ending, score });
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn tick_interval(&self) -> Duration {
        self.game_clock.interval()
    }
}

use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::body::Body;
use crate::config::GameConfig;
use crate::grid::{Cell, Direction};

/// Random draws before falling back to enumerating the free cells.
const MAX_RANDOM_FOOD_TRIES: usize = 64;

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Collision {
    Wall,
    SelfBite,
}

impl Collision {
    pub fn describe(self) -> &'static str {
        match self {
            Collision::Wall => "hit the wall",
            Collision::SelfBite => "bit itself",
        }
    }
}

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum StepOutcome {
    Moved,
    Ate { score: u32 },
    Collided(Collision),
    /// The snake covers every cell, there is nowhere left for food.
    BoardFilled,
}

/// What the renderer needs for one frame.
pub struct Snapshot<'a> {
    pub body: &'a Body,
    pub food: Cell,
    pub score: u32,
}

/// One round of play: the snake, its food and the score on a bounded grid.
pub struct Game {
    cols: i16,
    rows: i16,
    reward: u32,
    body: Body,
    direction: Direction,
    pending_direction: Option<Direction>,
    food: Cell,
    score: u32,
    rng: StdRng,
}

impl Game {
    pub fn new(config: &GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// `config` must have passed [`GameConfig::validate`], which guarantees
    /// the starting snake fits and leaves room for food.
    pub fn with_rng(config: &GameConfig, rng: StdRng) -> Self {
        let head = Cell::new(config.cols / 2, config.rows / 2);
        let mut game = Game {
            cols: config.cols,
            rows: config.rows,
            reward: config.food_reward,
            body: Body::new(head, config.initial_length),
            direction: Direction::Right,
            pending_direction: None,
            food: head,
            score: 0,
            rng,
        };
        game.food = game
            .place_food()
            .expect("validated config leaves a free cell for food");
        game
    }

    /// Queues a turn for the next tick. A turn that would send the head
    /// straight back into the segment behind it is ignored.
    pub fn change_direction(&mut self, direction: Direction) -> bool {
        if self.body.neck() == Some(self.body.head() + direction) {
            return false;
        }
        self.pending_direction = Some(direction);
        true
    }

    /// Advances the snake one cell and resolves whatever it ran into.
    pub fn step(&mut self) -> StepOutcome {
        if let Some(direction) = self.pending_direction.take() {
            self.direction = direction;
        }

        let head = self.body.advance(self.direction);

        if let Some(collision) = self.collision() {
            return StepOutcome::Collided(collision);
        }
        if head != self.food {
            return StepOutcome::Moved;
        }

        self.body.request_growth();
        self.score = self.score.saturating_add(self.reward);

        match self.place_food() {
            Some(food) => {
                self.food = food;
                StepOutcome::Ate { score: self.score }
            }
            None => StepOutcome::BoardFilled,
        }
    }

    pub fn collision(&self) -> Option<Collision> {
        if !self.body.head().is_within(self.cols, self.rows) {
            Some(Collision::Wall)
        } else if self.body.bites_itself() {
            Some(Collision::SelfBite)
        } else {
            None
        }
    }

    /// Picks a uniformly random cell off the body, or `None` when the body
    /// already covers the whole grid.
    fn place_food(&mut self) -> Option<Cell> {
        let total = self.cols as usize * self.rows as usize;
        if self.body.len() >= total {
            return None;
        }

        for _ in 0..MAX_RANDOM_FOOD_TRIES {
            let cell = Cell::new(
                self.rng.gen_range(0..self.cols),
                self.rng.gen_range(0..self.rows),
            );
            if !self.body.contains(cell) {
                debug!("food placed at ({}, {})", cell.x, cell.y);
                return Some(cell);
            }
        }

        // Crowded board: draw from the free cells directly.
        let free: Vec<Cell> = (0..self.rows)
            .flat_map(|y| (0..self.cols).map(move |x| Cell::new(x, y)))
            .filter(|&cell| !self.body.contains(cell))
            .collect();
        let cell = free.choose(&mut self.rng).copied();
        if let Some(cell) = cell {
            debug!("food placed at ({}, {}) from {} free cells", cell.x, cell.y, free.len());
        }
        cell
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            body: &self.body,
            food: self.food,
            score: self.score,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    pub fn food(&self) -> Cell {
        self.food
    }

    #[cfg(test)]
    pub(crate) fn set_food(&mut self, cell: Cell) {
        self.food = cell;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(cols: i16, rows: i16, initial_length: usize) -> GameConfig {
        GameConfig {
            cols,
            rows,
            initial_length,
            ..GameConfig::default()
        }
    }

    fn seeded(config: &GameConfig, seed: u64) -> Game {
        Game::with_rng(config, StdRng::seed_from_u64(seed))
    }

    /// Puts food somewhere the snake won't reach during a short test.
    fn park_food(game: &mut Game) {
        game.food = Cell::new(0, 0);
    }

    #[test]
    fn starts_centered_moving_right() {
        let game = seeded(&config(10, 10, 3), 1);
        let cells: Vec<Cell> = game.body().iter().copied().collect();
        assert_eq!(cells, vec![Cell::new(5, 5), Cell::new(4, 5), Cell::new(3, 5)]);
        assert_eq!(game.direction(), Direction::Right);
        assert_eq!(game.score(), 0);
        assert!(!game.body().contains(game.food()));
    }

    #[test]
    fn one_step_moves_head_and_drops_tail() {
        let mut game = seeded(&config(10, 10, 3), 2);
        park_food(&mut game);

        assert_eq!(game.step(), StepOutcome::Moved);
        let cells: Vec<Cell> = game.body().iter().copied().collect();
        assert_eq!(cells, vec![Cell::new(6, 5), Cell::new(5, 5), Cell::new(4, 5)]);
    }

    #[test]
    fn running_off_the_right_edge_is_a_wall_collision() {
        let mut game = seeded(&config(10, 10, 3), 3);
        park_food(&mut game);

        for _ in 0..4 {
            assert_eq!(game.step(), StepOutcome::Moved);
        }
        assert_eq!(game.body().head(), Cell::new(9, 5));
        assert_eq!(game.step(), StepOutcome::Collided(Collision::Wall));
        assert_eq!(game.body().head(), Cell::new(10, 5));
    }

    #[test]
    fn running_off_the_left_edge_is_a_wall_collision() {
        let mut game = seeded(&config(10, 10, 1), 4);
        park_food(&mut game);
        game.body = Body::new(Cell::new(0, 5), 1);

        assert!(game.change_direction(Direction::Left));
        assert_eq!(game.step(), StepOutcome::Collided(Collision::Wall));
        assert_eq!(game.body().head(), Cell::new(-1, 5));
    }

    #[test]
    fn turning_back_into_the_neck_is_ignored() {
        let mut game = seeded(&config(10, 10, 3), 5);
        park_food(&mut game);

        assert!(!game.change_direction(Direction::Left));
        game.step();
        assert_eq!(game.direction(), Direction::Right);
        assert_eq!(game.body().head(), Cell::new(6, 5));
    }

    #[test]
    fn same_direction_request_is_accepted() {
        let mut game = seeded(&config(10, 10, 3), 6);
        assert!(game.change_direction(Direction::Right));
    }

    #[test]
    fn two_quick_turns_cannot_assemble_a_reversal() {
        let mut game = seeded(&config(10, 10, 3), 7);
        park_food(&mut game);

        assert!(game.change_direction(Direction::Up));
        // Still checked against the real neck, so Left is refused.
        assert!(!game.change_direction(Direction::Left));
        game.step();
        assert_eq!(game.direction(), Direction::Up);
        assert_eq!(game.body().head(), Cell::new(5, 4));
    }

    #[test]
    fn only_the_latest_turn_is_consumed_per_tick() {
        let mut game = seeded(&config(10, 10, 3), 8);
        park_food(&mut game);

        game.change_direction(Direction::Up);
        game.change_direction(Direction::Down);
        game.step();
        assert_eq!(game.direction(), Direction::Down);
        assert_eq!(game.body().head(), Cell::new(5, 6));
    }

    #[test]
    fn eating_scores_once_and_grows_on_the_next_step() {
        let mut game = seeded(&config(10, 10, 3), 9);
        game.food = Cell::new(6, 5);

        assert_eq!(game.step(), StepOutcome::Ate { score: 5 });
        assert_eq!(game.body().len(), 3);
        assert!(game.body().is_growing());
        assert!(!game.body().contains(game.food()));

        park_food(&mut game);
        assert_eq!(game.step(), StepOutcome::Moved);
        assert_eq!(game.body().len(), 4);
        assert_eq!(game.score(), 5);

        game.step();
        assert_eq!(game.body().len(), 4);
        assert_eq!(game.score(), 5);
    }

    #[test]
    fn turning_into_the_own_body_is_a_self_collision() {
        let mut game = seeded(&config(20, 20, 5), 10);
        park_food(&mut game);

        game.change_direction(Direction::Down);
        game.step();
        game.change_direction(Direction::Left);
        game.step();
        game.change_direction(Direction::Up);
        assert_eq!(game.step(), StepOutcome::Collided(Collision::SelfBite));
    }

    #[test]
    fn chasing_the_tail_is_safe_without_growth() {
        // A 4-long snake circling a 2x2 block always steps into the cell its
        // tail just left.
        let mut game = seeded(&config(10, 10, 4), 11);
        park_food(&mut game);
        game.body = Body::new(Cell::new(5, 5), 4);
        for dir in [Direction::Down, Direction::Left, Direction::Up] {
            game.change_direction(dir);
            game.step();
        }
        let before: Vec<Cell> = game.body().iter().copied().collect();
        assert_eq!(game.collision(), None);

        game.change_direction(Direction::Right);
        assert_eq!(game.step(), StepOutcome::Moved);
        assert_eq!(game.body().head(), before[3]);
    }

    #[test]
    fn filling_the_board_ends_the_round() {
        let mut game = seeded(&config(2, 2, 2), 12);
        game.food = Cell::new(1, 0);

        game.change_direction(Direction::Up);
        assert_eq!(game.step(), StepOutcome::Ate { score: 5 });

        game.food = Cell::new(0, 0);
        game.change_direction(Direction::Left);
        assert_eq!(game.step(), StepOutcome::Ate { score: 10 });
        assert_eq!(game.food(), Cell::new(0, 1));

        game.change_direction(Direction::Down);
        assert_eq!(game.step(), StepOutcome::BoardFilled);
        assert_eq!(game.body().len(), 4);
    }

    #[test]
    fn crowded_board_still_finds_the_last_free_cell() {
        let mut game = seeded(&config(2, 2, 2), 13);
        game.body = Body::new(Cell::new(1, 1), 2);
        game.body.request_growth();
        game.body.advance(Direction::Up);
        // Body now (1,0),(1,1),(0,1): only (0,0) is free.
        for _ in 0..20 {
            assert_eq!(game.place_food(), Some(Cell::new(0, 0)));
        }
    }

    #[test]
    fn random_play_keeps_the_invariants() {
        let cfg = config(12, 9, 3);
        let directions = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];
        let mut driver = StdRng::seed_from_u64(99);
        let mut game = seeded(&cfg, 100);

        for _ in 0..5_000 {
            if driver.gen_bool(0.3) {
                game.change_direction(*directions.choose(&mut driver).unwrap());
            }

            let len_before = game.body().len();
            let growing = game.body().is_growing();
            let score_before = game.score();
            let dir_before = game.direction();

            let outcome = game.step();

            assert!(!game.direction().is_opposite(dir_before) || len_before == 1);
            let expected_len = if growing { len_before + 1 } else { len_before };
            assert_eq!(game.body().len(), expected_len);

            match outcome {
                StepOutcome::Moved => {
                    assert_eq!(game.score(), score_before);
                    assert!(!game.body().contains(game.food()));
                }
                StepOutcome::Ate { score } => {
                    assert_eq!(score, score_before + cfg.food_reward);
                    assert!(!game.body().contains(game.food()));
                }
                StepOutcome::Collided(_) | StepOutcome::BoardFilled => {
                    game = seeded(&cfg, u64::from(driver.gen::<u32>()));
                }
            }
        }
    }
}

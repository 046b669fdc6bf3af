use std::f32::consts::PI;

use ggez::mint::Point2;
use ggez::{graphics, Context, GameResult};

use snake_arcade::config::Difficulty;
use snake_arcade::grid::{Cell, Direction};
use snake_arcade::session::{GameState, Session};

use crate::app::{App, GAME_OVER_ITEMS, MAIN_MENU_ITEMS};

pub const BACKGROUND_COLOR: graphics::Color = graphics::Color::new(0.0, 0.0, 0.0, 1.0);
const STATS_COLOR: graphics::Color = graphics::Color::new(0.25, 0.25, 0.25, 1.0);
const SNAKE_OUTLINE: graphics::Color = graphics::Color::new(0.0, 0.59, 0.0, 1.0);
const SNAKE_FILL: graphics::Color = graphics::Color::new(0.0, 0.78, 0.0, 1.0);
const SNAKE_HEAD_FILL: graphics::Color = graphics::Color::new(0.3, 0.9, 0.3, 1.0);
const FOOD_COLOR: graphics::Color = graphics::Color::new(0.7, 0.0, 0.0, 1.0);
const FOOD_SHINE: graphics::Color = graphics::Color::new(1.0, 0.69, 0.69, 1.0);
const COUNTDOWN_COLOR: graphics::Color = graphics::Color::new(1.0, 1.0, 0.0, 0.7);
const GAME_OVER_COLOR: graphics::Color = graphics::Color::new(0.7, 0.0, 0.0, 1.0);

const INSTRUCTIONS: &str = "Use Arrow Keys or WASD to move.\n\
Avoid hitting yourself or the wall.\n\
Choose Restart or Main Menu after Game Over.";

fn centered_text(
    canvas: &mut graphics::Canvas,
    text: &str,
    scale: f32,
    center: Point2<f32>,
    color: graphics::Color,
) {
    let mut text = graphics::Text::new(text);
    text.set_scale(scale)
        .set_layout(graphics::TextLayout::center());
    canvas.draw(
        &text,
        graphics::DrawParam::default().dest(center).color(color),
    );
}

fn selection_color(selected: bool) -> graphics::Color {
    if selected {
        graphics::Color::GREEN
    } else {
        graphics::Color::WHITE
    }
}

impl App {
    fn screen_width(&self) -> f32 {
        self.config.board_width()
    }

    fn screen_height(&self) -> f32 {
        self.config.board_height() + self.config.stats_height
    }

    fn center_x(&self) -> f32 {
        self.screen_width() / 2.0
    }

    /// Top-left pixel of a board cell.
    fn cell_origin(&self, cell: Cell) -> Point2<f32> {
        Point2 {
            x: cell.x as f32 * self.config.cell_size,
            y: self.config.stats_height + cell.y as f32 * self.config.cell_size,
        }
    }

    pub(crate) fn draw_main_menu(&self, canvas: &mut graphics::Canvas) {
        let x = self.center_x();
        centered_text(canvas, "SNAKE GAME", 48.0, Point2 { x, y: 60.0 }, graphics::Color::WHITE);

        for (i, item) in MAIN_MENU_ITEMS.iter().enumerate() {
            centered_text(
                canvas,
                item,
                32.0,
                Point2 {
                    x,
                    y: 165.0 + i as f32 * 70.0,
                },
                selection_color(i == self.menu_selection),
            );
        }

        centered_text(
            canvas,
            INSTRUCTIONS,
            18.0,
            Point2 { x, y: 420.0 },
            graphics::Color::WHITE,
        );

        if let Some(set_at) = self.scoreboard.set_at() {
            let best = format!(
                "Best this session: {} (set at {})",
                self.scoreboard.best(),
                set_at.format("%H:%M:%S")
            );
            centered_text(
                canvas,
                &best,
                20.0,
                Point2 {
                    x,
                    y: self.screen_height() - 50.0,
                },
                graphics::Color::YELLOW,
            );
        }
    }

    pub(crate) fn draw_difficulty_menu(&self, canvas: &mut graphics::Canvas) {
        let x = self.center_x();
        centered_text(canvas, "Select Difficulty", 40.0, Point2 { x, y: 60.0 }, graphics::Color::WHITE);

        for (i, difficulty) in Difficulty::ALL.iter().enumerate() {
            let base = self.config.difficulties.base_interval(*difficulty);
            let label = format!("{} ({} ms per move)", difficulty.name(), base.as_millis());
            centered_text(
                canvas,
                &label,
                28.0,
                Point2 {
                    x,
                    y: 160.0 + i as f32 * 60.0,
                },
                selection_color(i == self.difficulty_selection),
            );
        }

        let cancel = Difficulty::ALL.len();
        centered_text(
            canvas,
            "Cancel",
            28.0,
            Point2 {
                x,
                y: 160.0 + cancel as f32 * 60.0,
            },
            selection_color(self.difficulty_selection == cancel),
        );

        centered_text(
            canvas,
            "Press ESC to return",
            20.0,
            Point2 {
                x,
                y: self.screen_height() - 50.0,
            },
            graphics::Color::YELLOW,
        );
    }

    pub(crate) fn draw_credits(&self, canvas: &mut graphics::Canvas) {
        let x = self.center_x();
        centered_text(canvas, "Credits", 40.0, Point2 { x, y: 60.0 }, graphics::Color::WHITE);
        centered_text(
            canvas,
            "Snake\nwritten in Rust with ggez",
            26.0,
            Point2 {
                x,
                y: self.screen_height() / 2.0,
            },
            graphics::Color::WHITE,
        );
        centered_text(
            canvas,
            "Press ENTER or ESC to return",
            20.0,
            Point2 {
                x,
                y: self.screen_height() - 50.0,
            },
            graphics::Color::YELLOW,
        );
    }

    pub(crate) fn draw_session(
        &self,
        ctx: &mut Context,
        canvas: &mut graphics::Canvas,
        session: &Session,
    ) -> GameResult {
        self.draw_stats_bar(ctx, canvas, session)?;

        let board = graphics::Rect::new(
            0.0,
            self.config.stats_height,
            self.config.board_width(),
            self.config.board_height(),
        );
        canvas.draw(
            &graphics::Mesh::new_rectangle(
                ctx,
                graphics::DrawMode::stroke(2.0),
                board,
                graphics::Color::WHITE,
            )?,
            graphics::DrawParam::default(),
        );

        let board_center = Point2 {
            x: self.center_x(),
            y: self.config.stats_height + self.config.board_height() / 2.0,
        };

        match session.state() {
            GameState::Countdown(countdown) => {
                self.draw_board(ctx, canvas, session)?;
                centered_text(canvas, &countdown.label(), 80.0, board_center, COUNTDOWN_COLOR);
            }
            GameState::Running => self.draw_board(ctx, canvas, session)?,
            GameState::GameOver(ending) => {
                centered_text(
                    canvas,
                    "GAME OVER",
                    46.0,
                    Point2 {
                        x: board_center.x,
                        y: board_center.y - 110.0,
                    },
                    GAME_OVER_COLOR,
                );

                let mut summary = format!(
                    "Your snake {}. Score: {}",
                    ending.describe(),
                    session.game().score()
                );
                if self.new_best {
                    summary.push_str("\nNew high score!");
                }
                centered_text(
                    canvas,
                    &summary,
                    22.0,
                    Point2 {
                        x: board_center.x,
                        y: board_center.y - 50.0,
                    },
                    graphics::Color::WHITE,
                );

                for (i, item) in GAME_OVER_ITEMS.iter().enumerate() {
                    centered_text(
                        canvas,
                        item,
                        26.0,
                        Point2 {
                            x: board_center.x,
                            y: board_center.y + 20.0 + i as f32 * 50.0,
                        },
                        selection_color(i == self.game_over_selection),
                    );
                }
            }
        }

        Ok(())
    }

    fn draw_stats_bar(
        &self,
        ctx: &mut Context,
        canvas: &mut graphics::Canvas,
        session: &Session,
    ) -> GameResult {
        let bar = graphics::Rect::new(0.0, 0.0, self.screen_width(), self.config.stats_height);
        canvas.draw(
            &graphics::Mesh::new_rectangle(ctx, graphics::DrawMode::fill(), bar, STATS_COLOR)?,
            graphics::DrawParam::default(),
        );

        let y = self.config.stats_height / 2.0;
        let score = graphics::Text::new(format!("Score: {}", session.game().score()));
        canvas.draw(
            &score,
            graphics::DrawParam::default()
                .dest(Point2 { x: 8.0, y: y - 8.0 })
                .color(graphics::Color::WHITE),
        );

        let info = format!(
            "{} | {} ms",
            session.difficulty().name(),
            session.tick_interval().as_millis()
        );
        centered_text(canvas, &info, 16.0, Point2 { x: self.center_x(), y }, graphics::Color::WHITE);

        let high = graphics::Text::new(format!("High Score: {}", self.scoreboard.best()));
        canvas.draw(
            &high,
            graphics::DrawParam::default()
                .dest(Point2 {
                    x: self.screen_width() - 180.0,
                    y: y - 8.0,
                })
                .color(graphics::Color::WHITE),
        );

        Ok(())
    }

    fn draw_board(
        &self,
        ctx: &mut Context,
        canvas: &mut graphics::Canvas,
        session: &Session,
    ) -> GameResult {
        let snapshot = session.game().snapshot();
        let size = self.config.cell_size;

        for (i, cell) in snapshot.body.iter().enumerate() {
            if !cell.is_within(self.config.cols, self.config.rows) {
                continue;
            }
            let origin = self.cell_origin(*cell);
            let outer = graphics::Rect::new(origin.x, origin.y, size, size);
            let inner = graphics::Rect::new(origin.x + 2.0, origin.y + 2.0, size - 4.0, size - 4.0);
            let fill = if i == 0 { SNAKE_HEAD_FILL } else { SNAKE_FILL };

            canvas.draw(
                &graphics::Mesh::new_rectangle(ctx, graphics::DrawMode::fill(), outer, SNAKE_OUTLINE)?,
                graphics::DrawParam::default(),
            );
            canvas.draw(
                &graphics::Mesh::new_rectangle(ctx, graphics::DrawMode::fill(), inner, fill)?,
                graphics::DrawParam::default(),
            );
        }

        self.draw_eyes(ctx, canvas, snapshot.body.head(), session.game().direction())?;

        // Food pulses gently.
        let origin = self.cell_origin(snapshot.food);
        let pulse = 1.0 + (self.food_animation * PI).sin() * 0.1;
        let radius = (size / 2.0 - 3.0) * pulse;
        let center = Point2 {
            x: origin.x + size / 2.0,
            y: origin.y + size / 2.0,
        };
        canvas.draw(
            &graphics::Mesh::new_circle(ctx, graphics::DrawMode::fill(), center, radius, 0.1, FOOD_COLOR)?,
            graphics::DrawParam::default(),
        );
        let shine = Point2 {
            x: center.x - radius / 3.0,
            y: center.y - radius / 3.0,
        };
        canvas.draw(
            &graphics::Mesh::new_circle(ctx, graphics::DrawMode::fill(), shine, radius / 5.0, 0.1, FOOD_SHINE)?,
            graphics::DrawParam::default(),
        );

        Ok(())
    }

    fn draw_eyes(
        &self,
        ctx: &mut Context,
        canvas: &mut graphics::Canvas,
        head: Cell,
        direction: Direction,
    ) -> GameResult {
        if !head.is_within(self.config.cols, self.config.rows) {
            return Ok(());
        }

        let size = self.config.cell_size;
        let origin = self.cell_origin(head);
        let (dx, dy) = direction.delta();
        let center = Point2 {
            x: origin.x + size / 2.0 + dx as f32 * size / 5.0,
            y: origin.y + size / 2.0 + dy as f32 * size / 5.0,
        };
        // Eyes sit side by side across the direction of travel.
        let spread = size / 5.0;
        for side in [-1.0, 1.0] {
            let eye = Point2 {
                x: center.x + dy as f32 * spread * side,
                y: center.y + dx as f32 * spread * side,
            };
            canvas.draw(
                &graphics::Mesh::new_circle(
                    ctx,
                    graphics::DrawMode::fill(),
                    eye,
                    size / 10.0,
                    0.1,
                    graphics::Color::BLACK,
                )?,
                graphics::DrawParam::default(),
            );
        }

        Ok(())
    }
}

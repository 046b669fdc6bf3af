use std::f32::consts::PI;

use ggez::audio::{self, SoundSource};
use ggez::event::EventHandler;
use ggez::input::keyboard::{KeyCode, KeyInput};
use ggez::{graphics, Context, GameResult};
use log::{info, warn};

use snake_arcade::config::{Difficulty, GameConfig};
use snake_arcade::grid::Direction;
use snake_arcade::scoreboard::Scoreboard;
use snake_arcade::session::{GameState, Session, SessionEvent};

pub const MAIN_MENU_ITEMS: [&str; 3] = ["Start Game", "Credits", "Quit"];
pub const GAME_OVER_ITEMS: [&str; 2] = ["Restart", "Main Menu"];
/// Difficulties plus a trailing "Cancel" entry.
pub const DIFFICULTY_ENTRIES: usize = Difficulty::ALL.len() + 1;

#[derive(PartialEq, Clone, Copy, Debug)]
pub enum MenuState {
    Main,
    Difficulty,
    Credits,
}

pub enum Screen {
    Menu(MenuState),
    Playing(Session),
}

struct Sounds {
    eat: Option<audio::Source>,
    game_over: Option<audio::Source>,
}

impl Sounds {
    fn load(ctx: &mut Context) -> Self {
        Sounds {
            eat: load_sound(ctx, "/eat.wav"),
            game_over: load_sound(ctx, "/game_over.wav"),
        }
    }
}

fn load_sound(ctx: &mut Context, path: &str) -> Option<audio::Source> {
    match audio::Source::new(ctx, path) {
        Ok(source) => Some(source),
        Err(e) => {
            warn!("sound {} unavailable, continuing without it: {}", path, e);
            None
        }
    }
}

fn play(ctx: &mut Context, sound: &mut Option<audio::Source>) -> GameResult {
    if let Some(source) = sound {
        source.play_detached(ctx)?;
    }
    Ok(())
}

fn direction_for(keycode: KeyCode) -> Option<Direction> {
    match keycode {
        KeyCode::Up | KeyCode::W => Some(Direction::Up),
        KeyCode::Down | KeyCode::S => Some(Direction::Down),
        KeyCode::Left | KeyCode::A => Some(Direction::Left),
        KeyCode::Right | KeyCode::D => Some(Direction::Right),
        _ => None,
    }
}

fn wrap_prev(selection: usize, len: usize) -> usize {
    selection.checked_sub(1).unwrap_or(len - 1)
}

fn wrap_next(selection: usize, len: usize) -> usize {
    (selection + 1) % len
}

pub struct App {
    pub(crate) config: GameConfig,
    pub(crate) screen: Screen,
    pub(crate) menu_selection: usize,
    pub(crate) difficulty_selection: usize,
    pub(crate) game_over_selection: usize,
    pub(crate) scoreboard: Scoreboard,
    pub(crate) new_best: bool,
    pub(crate) food_animation: f32,
    sounds: Sounds,
}

impl App {
    pub fn new(ctx: &mut Context, config: GameConfig) -> Self {
        App {
            config,
            screen: Screen::Menu(MenuState::Main),
            menu_selection: 0,
            difficulty_selection: 1,
            game_over_selection: 0,
            scoreboard: Scoreboard::new(),
            new_best: false,
            food_animation: 0.0,
            sounds: Sounds::load(ctx),
        }
    }

    fn start(&mut self, difficulty: Difficulty) {
        info!("starting a {} session", difficulty.name());
        self.new_best = false;
        self.game_over_selection = 0;
        self.screen = Screen::Playing(Session::new(&self.config, difficulty));
    }

    fn to_main_menu(&mut self) {
        if let Screen::Playing(session) = &mut self.screen {
            session.stop();
        }
        self.menu_selection = 0;
        self.screen = Screen::Menu(MenuState::Main);
    }

    fn menu_key(&mut self, ctx: &mut Context, menu: MenuState, keycode: KeyCode) {
        match menu {
            MenuState::Main => match keycode {
                KeyCode::Up | KeyCode::W => {
                    self.menu_selection = wrap_prev(self.menu_selection, MAIN_MENU_ITEMS.len());
                }
                KeyCode::Down | KeyCode::S => {
                    self.menu_selection = wrap_next(self.menu_selection, MAIN_MENU_ITEMS.len());
                }
                KeyCode::Return => match self.menu_selection {
                    0 => {
                        self.difficulty_selection = 1;
                        self.screen = Screen::Menu(MenuState::Difficulty);
                    }
                    1 => self.screen = Screen::Menu(MenuState::Credits),
                    _ => {
                        info!("quit from menu after {} games", self.scoreboard.games_played());
                        ctx.request_quit();
                    }
                },
                _ => {}
            },
            MenuState::Difficulty => match keycode {
                KeyCode::Up | KeyCode::W => {
                    self.difficulty_selection =
                        wrap_prev(self.difficulty_selection, DIFFICULTY_ENTRIES);
                }
                KeyCode::Down | KeyCode::S => {
                    self.difficulty_selection =
                        wrap_next(self.difficulty_selection, DIFFICULTY_ENTRIES);
                }
                KeyCode::Return => match Difficulty::ALL.get(self.difficulty_selection) {
                    Some(&difficulty) => self.start(difficulty),
                    None => self.screen = Screen::Menu(MenuState::Main),
                },
                KeyCode::Escape => self.screen = Screen::Menu(MenuState::Main),
                _ => {}
            },
            MenuState::Credits => {
                if matches!(keycode, KeyCode::Escape | KeyCode::Return) {
                    self.screen = Screen::Menu(MenuState::Main);
                }
            }
        }
    }

    fn playing_key(&mut self, keycode: KeyCode) {
        if keycode == KeyCode::Escape {
            info!("left the game for the menu");
            self.to_main_menu();
            return;
        }

        let Screen::Playing(session) = &mut self.screen else {
            return;
        };

        match session.state() {
            GameState::Countdown(_) => {}
            GameState::Running => {
                if let Some(direction) = direction_for(keycode) {
                    session.change_direction(direction);
                }
            }
            GameState::GameOver(_) => {
                let restart = match keycode {
                    KeyCode::Up | KeyCode::Down | KeyCode::W | KeyCode::S => {
                        self.game_over_selection =
                            wrap_next(self.game_over_selection, GAME_OVER_ITEMS.len());
                        None
                    }
                    KeyCode::Return => Some(self.game_over_selection == 0),
                    KeyCode::R => Some(true),
                    KeyCode::M => Some(false),
                    _ => None,
                };
                match restart {
                    Some(true) => {
                        session.restart();
                        self.new_best = false;
                        self.game_over_selection = 0;
                    }
                    Some(false) => self.to_main_menu(),
                    None => {}
                }
            }
        }
    }
}

impl EventHandler for App {
    fn update(&mut self, ctx: &mut Context) -> GameResult {
        let dt = ctx.time.delta();
        self.food_animation = (self.food_animation + dt.as_secs_f32()) % (2.0 * PI);

        let Screen::Playing(session) = &mut self.screen else {
            return Ok(());
        };

        for event in session.update(dt) {
            match event {
                SessionEvent::Ate { .. } => play(ctx, &mut self.sounds.eat)?,
                SessionEvent::Ended { score, .. } => {
                    self.game_over_selection = 0;
                    self.new_best = self.scoreboard.record(score);
                    if self.new_best {
                        info!("new high score: {}", score);
                    }
                    play(ctx, &mut self.sounds.game_over)?;
                }
                _ => {}
            }
        }

        Ok(())
    }

    fn draw(&mut self, ctx: &mut Context) -> GameResult {
        let mut canvas = graphics::Canvas::from_frame(ctx, crate::draw::BACKGROUND_COLOR);

        match &self.screen {
            Screen::Menu(MenuState::Main) => self.draw_main_menu(&mut canvas),
            Screen::Menu(MenuState::Difficulty) => self.draw_difficulty_menu(&mut canvas),
            Screen::Menu(MenuState::Credits) => self.draw_credits(&mut canvas),
            Screen::Playing(session) => self.draw_session(ctx, &mut canvas, session)?,
        }

        canvas.finish(ctx)?;
        Ok(())
    }

    fn key_down_event(&mut self, ctx: &mut Context, input: KeyInput, _repeat: bool) -> GameResult {
        let Some(keycode) = input.keycode else {
            return Ok(());
        };

        match self.screen {
            Screen::Menu(menu) => self.menu_key(ctx, menu, keycode),
            Screen::Playing(_) => self.playing_key(keycode),
        }
        Ok(())
    }
}

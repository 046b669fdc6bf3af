//! Snake game core: the body model, step rules, clocks and session flow.
//! The ggez front end in `main.rs` only renders this state and feeds input.

pub mod body;
pub mod clock;
pub mod config;
pub mod game;
pub mod grid;
pub mod scoreboard;
pub mod session;

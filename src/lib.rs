pub mod api;
pub mod blueprint;
pub mod game;
pub mod lobby;

pub mod achievements;
pub mod economy;
pub mod factories;
pub mod format;
pub mod game;
pub mod prestige;
pub mod resources;
pub mod upgrades;

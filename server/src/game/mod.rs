pub mod battle;
pub mod card;
pub mod inventory;
pub mod progression;
pub mod roster;
pub mod starter;
pub mod stats;
pub mod types;

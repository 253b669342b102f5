pub mod auth;
pub mod cards;
pub mod health;
pub mod inventory;
pub mod routes;
pub mod team;

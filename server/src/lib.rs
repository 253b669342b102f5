pub mod cache;
pub mod config;
pub mod db;
pub mod error;
pub mod game;
pub mod http;

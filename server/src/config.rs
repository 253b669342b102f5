//! Runtime configuration for the puckdeck server.

use once_cell::sync::Lazy;
use std::{env, path::PathBuf};

#[derive(Debug)]
pub struct Settings {
    /// Address the HTTP server binds to.
    pub server_addr: String,
    /// Optional JSON catalogue replacing the built-in templates.
    pub catalog_path: Option<PathBuf>,
    /// Contract length of a freshly acquired card.
    pub new_card_games: i32,
    /// Renewals a freshly acquired card may use.
    pub new_card_renewals: i32,
}

impl Settings {
    fn from_env() -> Self {
        let server_addr = env::var("SERVER_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".into());

        let catalog_path = env::var("CATALOG_PATH").ok().map(PathBuf::from);

        let new_card_games = env::var("NEW_CARD_GAMES")
            .ok()
            .and_then(|v| v.parse::<i32>().ok())
            .unwrap_or(20);

        let new_card_renewals = env::var("NEW_CARD_RENEWALS")
            .ok()
            .and_then(|v| v.parse::<i32>().ok())
            .unwrap_or(5);

        Settings {
            server_addr,
            catalog_path,
            new_card_games,
            new_card_renewals,
        }
    }
}

static SETTINGS: Lazy<Settings> = Lazy::new(Settings::from_env);

pub fn settings() -> &'static Settings {
    &SETTINGS
}

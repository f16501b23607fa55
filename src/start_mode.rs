//! `ENERGYLAB_START=<platform|slingshot>[:<level>]` skips the main menu and
//! drops straight into a level.

use bevy::prelude::*;

use crate::error::{GameError, GameResult};
use crate::levels::normalize_level;
use crate::session::{LoadLevelRequest, SelectedGame};

pub const START_ENV_VAR: &str = "ENERGYLAB_START";

/// Parse a start spec such as `slingshot:2`.  The level defaults to 1 and
/// levels past the last wrap to 1.
pub fn parse_start_spec(spec: &str) -> GameResult<(SelectedGame, u8)> {
    let invalid = || GameError::InvalidStartSpec {
        spec: spec.to_string(),
    };
    let trimmed = spec.trim();
    let (game, level) = match trimmed.split_once(':') {
        Some((game, level)) => (game, Some(level)),
        None => (trimmed, None),
    };

    let game = match game.to_ascii_lowercase().as_str() {
        "platform" | "platforms" => SelectedGame::Platform,
        "slingshot" => SelectedGame::Slingshot,
        _ => return Err(invalid()),
    };
    let level = match level {
        Some(raw) => raw.trim().parse::<u8>().map_err(|_| invalid())?,
        None => 1,
    };
    let level = normalize_level(level).map_err(|_| invalid())?;
    Ok((game, level))
}

/// Select `game` and request `level` on the first frame.  The load handler
/// moves the app into `Playing`.
pub fn configure_start_mode(app: &mut App, game: SelectedGame, level: u8) {
    app.insert_resource(game).add_systems(
        Startup,
        move |mut requests: MessageWriter<LoadLevelRequest>| {
            requests.write(LoadLevelRequest { level });
        },
    );
    info!("Starting directly in {} level {level}", game.label());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_game_name_starts_at_level_one() {
        assert_eq!(
            parse_start_spec("platform").unwrap(),
            (SelectedGame::Platform, 1)
        );
        assert_eq!(
            parse_start_spec(" Slingshot ").unwrap(),
            (SelectedGame::Slingshot, 1)
        );
    }

    #[test]
    fn explicit_level_is_honoured() {
        assert_eq!(
            parse_start_spec("slingshot:3").unwrap(),
            (SelectedGame::Slingshot, 3)
        );
    }

    #[test]
    fn level_past_the_last_wraps() {
        assert_eq!(
            parse_start_spec("platform:4").unwrap(),
            (SelectedGame::Platform, 1)
        );
    }

    #[test]
    fn malformed_specs_are_rejected() {
        for spec in ["", "pinball", "platform:", "slingshot:x", "platform:0"] {
            assert!(
                matches!(
                    parse_start_spec(spec),
                    Err(GameError::InvalidStartSpec { .. })
                ),
                "{spec:?} should be rejected"
            );
        }
    }
}

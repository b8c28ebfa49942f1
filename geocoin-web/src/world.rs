//! World settings baked into the bundle.

use geocoin_game::WorldConfig;

const WORLD_JSON: &str = include_str!("../static/world.json");

/// Parse the embedded world settings, falling back to the defaults.
#[must_use]
pub fn embedded_config() -> WorldConfig {
    parse_or_default(WORLD_JSON)
}

fn parse_or_default(json: &str) -> WorldConfig {
    WorldConfig::from_json(json).unwrap_or_else(|err| {
        log::warn!("embedded world config rejected, using defaults: {err}");
        WorldConfig::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_config_is_valid() {
        let cfg = embedded_config();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.neighborhood_radius, 8);
    }

    #[test]
    fn broken_config_falls_back() {
        assert_eq!(parse_or_default("{"), WorldConfig::default());
        assert_eq!(
            parse_or_default(r#"{"spawn_probability": 3.0}"#),
            WorldConfig::default()
        );
    }
}

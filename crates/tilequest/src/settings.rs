//! World configuration files

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use tq_core::WorldConfig;

/// Read a JSON `WorldConfig`, or the defaults when no file is given
///
/// Missing fields keep their default values.
pub fn load_config(path: Option<&Path>) -> Result<WorldConfig> {
    let Some(path) = path else {
        return Ok(WorldConfig::default());
    };
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    parse_config(&raw).with_context(|| format!("invalid config {}", path.display()))
}

pub fn parse_config(raw: &str) -> Result<WorldConfig> {
    let config: WorldConfig = serde_json::from_str(raw)?;
    let view = config.view;
    if view.width <= 0 || view.height <= 0 {
        bail!("view must be at least 1x1, got {}x{}", view.width, view.height);
    }
    if view.view_limit < 0 {
        bail!("view_limit must not be negative, got {}", view.view_limit);
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tq_core::{ATTACK_COOLDOWN_MS, VIEW_LIMIT, ViewConfig};

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = parse_config(r#"{ "view": { "width": 12 }, "spawn_cooldown_ms": 500 }"#)
            .unwrap();
        assert_eq!(config.view.width, 12);
        assert_eq!(config.view.height, ViewConfig::default().height);
        assert_eq!(config.view.view_limit, VIEW_LIMIT);
        assert_eq!(config.spawn_cooldown_ms, 500);
        assert_eq!(config.attack_cooldown_ms, ATTACK_COOLDOWN_MS);
    }

    #[test]
    fn test_empty_view_rejected() {
        let err = parse_config(r#"{ "view": { "width": 0, "height": 4 } }"#).unwrap_err();
        assert!(err.to_string().contains("0x4"), "{err}");
        assert!(parse_config("not json").is_err());
    }

    #[test]
    fn test_missing_file_is_defaults_or_error() {
        assert_eq!(load_config(None).unwrap(), WorldConfig::default());

        let dir = tempfile::tempdir().unwrap();
        let err = load_config(Some(&dir.path().join("world.json"))).unwrap_err();
        assert!(err.to_string().contains("world.json"), "{err}");
    }
}

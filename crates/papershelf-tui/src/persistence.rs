use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use papershelf_core::ThemeMode;

/// UI state kept between runs. Only the display mode for now.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct UiState {
    theme: Option<String>,
}

/// `<config_dir>/papershelf/state.toml`.
pub fn state_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("papershelf").join("state.toml"))
}

/// Saved display mode, if any. Unreadable state counts as none.
pub fn load_theme(path: &Path) -> Option<ThemeMode> {
    let content = std::fs::read_to_string(path).ok()?;
    let state: UiState = toml::from_str(&content).ok()?;
    state.theme.as_deref().and_then(ThemeMode::parse)
}

pub fn save_theme(path: &Path, mode: ThemeMode) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    let state = UiState {
        theme: Some(mode.as_str().to_string()),
    };
    let content = toml::to_string_pretty(&state)?;
    std::fs::write(path, content).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

/// Interpret `COLORFGBG` (`"fg;bg"` or `"fg;default;bg"`): backgrounds 7, 15
/// and the bright range 9..=15 read as a light terminal.
pub fn colorfgbg_is_light(value: &str) -> Option<bool> {
    let bg: u8 = value.rsplit(';').next()?.trim().parse().ok()?;
    Some(bg == 7 || bg >= 9)
}

/// CLI flag, then the saved toggle, then configuration, then the terminal
/// background, then dark.
pub fn resolve_theme(
    cli: Option<ThemeMode>,
    saved: Option<ThemeMode>,
    configured: Option<ThemeMode>,
    colorfgbg: Option<&str>,
) -> ThemeMode {
    cli.or(saved)
        .or(configured)
        .or_else(|| {
            colorfgbg
                .and_then(colorfgbg_is_light)
                .map(|light| if light { ThemeMode::Light } else { ThemeMode::Dark })
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("state.toml");
        assert_eq!(load_theme(&path), None);
        save_theme(&path, ThemeMode::Light).unwrap();
        assert_eq!(load_theme(&path), Some(ThemeMode::Light));
        save_theme(&path, ThemeMode::Dark).unwrap();
        assert_eq!(load_theme(&path), Some(ThemeMode::Dark));
    }

    #[test]
    fn test_garbage_state_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.toml");
        std::fs::write(&path, "theme = 3").unwrap();
        assert_eq!(load_theme(&path), None);
    }

    #[test]
    fn test_colorfgbg() {
        assert_eq!(colorfgbg_is_light("0;15"), Some(true));
        assert_eq!(colorfgbg_is_light("0;7"), Some(true));
        assert_eq!(colorfgbg_is_light("15;default;0"), Some(false));
        assert_eq!(colorfgbg_is_light("15;8"), Some(false));
        assert_eq!(colorfgbg_is_light("nonsense"), None);
    }

    #[test]
    fn test_resolution_order() {
        use ThemeMode::*;
        assert_eq!(resolve_theme(Some(Light), Some(Dark), Some(Dark), None), Light);
        assert_eq!(resolve_theme(None, Some(Light), Some(Dark), Some("0;0")), Light);
        assert_eq!(resolve_theme(None, None, Some(Light), Some("0;0")), Light);
        assert_eq!(resolve_theme(None, None, None, Some("0;15")), Light);
        assert_eq!(resolve_theme(None, None, None, None), Dark);
    }
}

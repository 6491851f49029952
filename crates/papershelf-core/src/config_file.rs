use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::loader::DataSource;
use crate::palette::ThemeMode;

pub const DEFAULT_SOURCE: &str = "./data.json";
pub const DEFAULT_TITLE: &str = "PFE \u{00b7} Recent Papers";
pub const DEFAULT_SUBTITLE: &str = "Curated research for our project";
pub const DEFAULT_DEBOUNCE_MS: u64 = 200;
pub const DEFAULT_FPS: u32 = 30;

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigFile {
    pub site: Option<SiteConfig>,
    pub data: Option<DataConfig>,
    pub display: Option<DisplayConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SiteConfig {
    pub title: Option<String>,
    pub subtitle: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataConfig {
    pub source: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub theme: Option<String>,
    pub debounce_ms: Option<u64>,
    pub fps: Option<u32>,
}

/// Platform config directory path: `<config_dir>/papershelf/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("papershelf").join("config.toml"))
}

/// Load config by cascading CWD `.papershelf.toml` over platform config.
/// CWD values override platform values.
pub fn load_config() -> ConfigFile {
    let platform = config_path().and_then(|p| load_from_path(&p));
    let cwd = load_from_path(Path::new(".papershelf.toml"));

    match (platform, cwd) {
        (None, None) => ConfigFile::default(),
        (Some(p), None) => p,
        (None, Some(c)) => c,
        (Some(p), Some(c)) => merge(p, c),
    }
}

/// Missing files are silent; a file that does not parse is logged and ignored.
pub fn load_from_path(path: &Path) -> Option<ConfigFile> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable config file");
            None
        }
    }
}

/// Merge two configs: `overlay` values take precedence over `base`.
pub fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    let (bs, os) = (base.site.unwrap_or_default(), overlay.site.unwrap_or_default());
    let (bd, od) = (base.data.unwrap_or_default(), overlay.data.unwrap_or_default());
    let (bv, ov) = (
        base.display.unwrap_or_default(),
        overlay.display.unwrap_or_default(),
    );
    ConfigFile {
        site: Some(SiteConfig {
            title: os.title.or(bs.title),
            subtitle: os.subtitle.or(bs.subtitle),
        }),
        data: Some(DataConfig {
            source: od.source.or(bd.source),
        }),
        display: Some(DisplayConfig {
            theme: ov.theme.or(bv.theme),
            debounce_ms: ov.debounce_ms.or(bv.debounce_ms),
            fps: ov.fps.or(bv.fps),
        }),
    }
}

/// Fully resolved settings after applying defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub title: String,
    pub subtitle: String,
    pub source: DataSource,
    /// Theme explicitly configured; `None` defers to the saved preference.
    pub theme: Option<ThemeMode>,
    pub debounce_ms: u64,
    pub fps: u32,
}

/// Environment overrides (`PAPERSHELF_DATA`, `PAPERSHELF_THEME`).
#[derive(Debug, Clone, Default)]
pub struct EnvOverrides {
    pub data: Option<String>,
    pub theme: Option<String>,
}

impl EnvOverrides {
    pub fn from_env() -> Self {
        Self {
            data: std::env::var("PAPERSHELF_DATA").ok().filter(|s| !s.is_empty()),
            theme: std::env::var("PAPERSHELF_THEME").ok().filter(|s| !s.is_empty()),
        }
    }
}

impl Settings {
    /// Environment over file over defaults.
    pub fn resolve(file: &ConfigFile, env: &EnvOverrides) -> Self {
        let site = file.site.clone().unwrap_or_default();
        let data = file.data.clone().unwrap_or_default();
        let display = file.display.clone().unwrap_or_default();

        let source = env
            .data
            .clone()
            .or(data.source)
            .unwrap_or_else(|| DEFAULT_SOURCE.to_string());
        let theme = env
            .theme
            .as_deref()
            .and_then(ThemeMode::parse)
            .or_else(|| display.theme.as_deref().and_then(ThemeMode::parse));

        Self {
            title: site.title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            subtitle: site.subtitle.unwrap_or_else(|| DEFAULT_SUBTITLE.to_string()),
            source: DataSource::parse(&source),
            theme,
            debounce_ms: display.debounce_ms.unwrap_or(DEFAULT_DEBOUNCE_MS),
            fps: display.fps.unwrap_or(DEFAULT_FPS).clamp(1, 120),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = Settings::resolve(&ConfigFile::default(), &EnvOverrides::default());
        assert_eq!(s.title, DEFAULT_TITLE);
        assert_eq!(s.subtitle, DEFAULT_SUBTITLE);
        assert_eq!(s.source, DataSource::File(PathBuf::from("./data.json")));
        assert_eq!(s.theme, None);
        assert_eq!(s.debounce_ms, 200);
        assert_eq!(s.fps, 30);
    }

    #[test]
    fn test_merge_overlay_wins_field_by_field() {
        let base: ConfigFile = toml::from_str(
            r#"
            [site]
            title = "Base"
            subtitle = "Base sub"
            [display]
            fps = 10
            "#,
        )
        .unwrap();
        let overlay: ConfigFile = toml::from_str(
            r#"
            [site]
            title = "Local"
            [display]
            theme = "light"
            "#,
        )
        .unwrap();
        let merged = merge(base, overlay);
        let site = merged.site.unwrap();
        assert_eq!(site.title.as_deref(), Some("Local"));
        assert_eq!(site.subtitle.as_deref(), Some("Base sub"));
        let display = merged.display.unwrap();
        assert_eq!(display.fps, Some(10));
        assert_eq!(display.theme.as_deref(), Some("light"));
    }

    #[test]
    fn test_env_overrides_file() {
        let file: ConfigFile = toml::from_str(
            r#"
            [data]
            source = "papers.json"
            [display]
            theme = "light"
            "#,
        )
        .unwrap();
        let env = EnvOverrides {
            data: Some("https://example.org/papers.json".into()),
            theme: Some("dark".into()),
        };
        let s = Settings::resolve(&file, &env);
        assert_eq!(
            s.source,
            DataSource::Url("https://example.org/papers.json".into())
        );
        assert_eq!(s.theme, Some(ThemeMode::Dark));
    }

    #[test]
    fn test_unknown_theme_is_ignored() {
        let env = EnvOverrides {
            data: None,
            theme: Some("sepia".into()),
        };
        let s = Settings::resolve(&ConfigFile::default(), &env);
        assert_eq!(s.theme, None);
    }

    #[test]
    fn test_load_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[display]\ndebounce_ms = 50\n").unwrap();
        let config = load_from_path(&path).unwrap();
        assert_eq!(config.display.unwrap().debounce_ms, Some(50));

        std::fs::write(&path, "not = [valid").unwrap();
        assert!(load_from_path(&path).is_none());
        assert!(load_from_path(&dir.path().join("missing.toml")).is_none());
    }
}

use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub path: String,
}

/// Конфигурация по умолчанию, вшитая в бинарник
const DEFAULT_CONFIG: &str = r#"
[database]
path = "target/db/store.db"
"#;

/// Читает config.toml рядом с исполняемым файлом, затем в текущей
/// директории; если файла нет нигде, берёт вшитую конфигурацию.
pub fn load_config() -> anyhow::Result<Config> {
    for dir in candidate_dirs() {
        let config_path = dir.join("config.toml");
        if config_path.exists() {
            tracing::info!("Loading config from: {}", config_path.display());
            let contents = std::fs::read_to_string(&config_path)?;
            return Ok(toml::from_str(&contents)?);
        }
    }

    tracing::info!("Using default embedded configuration");
    Ok(toml::from_str(DEFAULT_CONFIG)?)
}

fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    if let Some(exe_dir) = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(Path::to_path_buf))
    {
        dirs.push(exe_dir);
    }
    if let Ok(cwd) = std::env::current_dir() {
        dirs.push(cwd);
    }
    dirs
}

/// Путь к файлу базы. Относительный путь считается от директории
/// исполняемого файла, абсолютный используется как есть.
pub fn get_database_path(config: &Config) -> anyhow::Result<PathBuf> {
    let db_path = Path::new(&config.database.path);
    if db_path.is_absolute() {
        return Ok(db_path.to_path_buf());
    }

    if let Some(exe_dir) = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(Path::to_path_buf))
    {
        return Ok(exe_dir.join(db_path));
    }
    Ok(db_path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_parses() {
        let config: Config = toml::from_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.database.path, "target/db/store.db");
    }

    #[test]
    fn explicit_config_overrides_database_path() {
        let config: Config = toml::from_str("[database]\npath = \"/tmp/other.db\"").unwrap();
        assert_eq!(config.database.path, "/tmp/other.db");
    }

    #[test]
    fn absolute_database_path_passes_through() {
        let config = Config {
            database: DatabaseConfig {
                path: "/var/lib/store/store.db".into(),
            },
        };
        let resolved = get_database_path(&config).unwrap();
        assert_eq!(resolved, PathBuf::from("/var/lib/store/store.db"));
    }
}

use std::collections::HashMap;
use std::fmt::Display;
use std::path::{Path, PathBuf};

use santa_rs::algorithm::{AssignmentOptions, SolverKind};
use santa_rs::{CostModifiers, HistoryRecord};
use serde::Deserialize;

use crate::data_type::{DataType, FormatError};

// 設定ファイルに書ける項目
const CONFIG_FILE_OPTIONS: [&str; 12] = [
    "participants",
    "exclusionGroups",
    "blackLists",
    "modifiers",
    "data",
    "dryRun",
    "ignoreHistory",
    "quiet",
    "random",
    "seed",
    "id",
    "solver",
];

#[derive(Debug)]
pub enum ConfigError {
    Io(PathBuf, std::io::Error),
    UnsupportedFormat(PathBuf),
    Parse(PathBuf, FormatError),
    NotAnObject(PathBuf),
    UnknownOption(PathBuf, String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(path, e) => write!(f, "Cannot read config file {}: {e}", path.display()),
            Self::UnsupportedFormat(path) => write!(
                f,
                "{}: unsupported format. Format must be json or yaml.",
                path.display()
            ),
            Self::Parse(path, e) => write!(f, "Invalid config file {}: {e}", path.display()),
            Self::NotAnObject(path) => {
                write!(f, "Config file {} must contain an object", path.display())
            }
            Self::UnknownOption(path, key) => write!(
                f,
                "Unknown options found in config file {}: {key}",
                path.display()
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(_, e) => Some(e),
            Self::Parse(_, e) => Some(e),
            _ => None,
        }
    }
}

/// 設定ファイルとコマンドライン引数の共通の形。None は未指定
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConfigFile {
    pub participants: Option<Vec<String>>,
    pub exclusion_groups: Option<Vec<Vec<String>>>,
    pub black_lists: Option<HashMap<String, Vec<String>>>,
    pub modifiers: Option<CostModifiers>,
    pub data: Option<PathBuf>,
    pub dry_run: Option<bool>,
    pub ignore_history: Option<bool>,
    pub quiet: Option<bool>,
    pub random: Option<bool>,
    pub seed: Option<u64>,
    pub id: Option<String>,
    pub solver: Option<SolverKind>,
}

impl ConfigFile {
    // other で指定された項目が優先される
    pub fn merge(self, other: Self) -> Self {
        Self {
            participants: other.participants.or(self.participants),
            exclusion_groups: other.exclusion_groups.or(self.exclusion_groups),
            black_lists: other.black_lists.or(self.black_lists),
            modifiers: other.modifiers.or(self.modifiers),
            data: other.data.or(self.data),
            dry_run: other.dry_run.or(self.dry_run),
            ignore_history: other.ignore_history.or(self.ignore_history),
            quiet: other.quiet.or(self.quiet),
            random: other.random.or(self.random),
            seed: other.seed.or(self.seed),
            id: other.id.or(self.id),
            solver: other.solver.or(self.solver),
        }
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run.unwrap_or(false)
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet.unwrap_or(false)
    }

    pub fn ignores_history(&self) -> bool {
        self.ignore_history.unwrap_or(false)
    }

    pub fn to_options(&self, history: Vec<HistoryRecord>) -> AssignmentOptions {
        let mut options = AssignmentOptions {
            participants: self.participants.clone(),
            history,
            exclusion_groups: self.exclusion_groups.clone().unwrap_or_default(),
            black_lists: self.black_lists.clone().unwrap_or_default(),
            modifiers: self.modifiers.clone().unwrap_or_default(),
            seed: self.seed,
            solver: self.solver.unwrap_or_default(),
            ..Default::default()
        };
        if let Some(random) = self.random {
            options.randomize = random;
        }
        options
    }
}

// 形式は拡張子で決める。YAML も一度 JSON の値にしてから読む
pub fn parse(path: &Path, data: &str) -> Result<ConfigFile, ConfigError> {
    let Some(data_type) = DataType::from_path(path) else {
        return Err(ConfigError::UnsupportedFormat(path.to_path_buf()));
    };

    let value: serde_json::Value = data_type
        .deserialize(data)
        .map_err(|e| ConfigError::Parse(path.to_path_buf(), e))?;
    let Some(object) = value.as_object() else {
        return Err(ConfigError::NotAnObject(path.to_path_buf()));
    };

    if let Some(key) = object
        .keys()
        .find(|key| !CONFIG_FILE_OPTIONS.contains(&key.as_str()))
    {
        return Err(ConfigError::UnknownOption(path.to_path_buf(), key.clone()));
    }

    let mut config: ConfigFile = serde_json::from_value(value)
        .map_err(|e| ConfigError::Parse(path.to_path_buf(), FormatError::Json(e)))?;

    // 履歴ファイルは設定ファイルのあるディレクトリからの相対パス
    if let Some(data) = &config.data {
        if data.is_relative() {
            let directory = path.parent().unwrap_or(Path::new(""));
            config.data = Some(directory.join(data));
        }
    }

    Ok(config)
}

pub async fn load(path: &Path) -> Result<ConfigFile, ConfigError> {
    let data = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
    let config = parse(path, &data)?;
    log::debug!("Loaded config file {}", path.display());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use santa_rs::algorithm::SolverKind;

    use super::{ConfigError, ConfigFile};

    #[test]
    fn simple() {
        let config = super::parse(
            Path::new("config.json"),
            r#"{"ignoreHistory": true, "participants": ["jo", "bar"], "solver": "hungarian"}"#,
        )
        .unwrap();

        assert_eq!(config.ignore_history, Some(true));
        assert_eq!(
            config.participants,
            Some(vec!["jo".to_string(), "bar".to_string()])
        );
        assert_eq!(config.solver, Some(SolverKind::Hungarian));
        assert_eq!(config.data, None);
    }

    #[test]
    fn unknown_option() {
        let result = super::parse(
            Path::new("./config.json"),
            r#"{"invalidOpt": "unknown property"}"#,
        );
        let Err(ConfigError::UnknownOption(_, key)) = &result else {
            panic!();
        };
        assert_eq!(key, "invalidOpt");
        assert_eq!(
            result.unwrap_err().to_string(),
            "Unknown options found in config file ./config.json: invalidOpt"
        );
    }

    #[test]
    fn yaml() {
        let config = super::parse(
            Path::new("path/to/config.yml"),
            "participants:\n  - jo\n  - bar\nexclusionGroups:\n  - [jo, anna]\nrandom: false\ndata: history.yaml\n",
        )
        .unwrap();

        assert_eq!(
            config.participants,
            Some(vec!["jo".to_string(), "bar".to_string()])
        );
        assert_eq!(
            config.exclusion_groups,
            Some(vec![vec!["jo".to_string(), "anna".to_string()]])
        );
        assert_eq!(config.random, Some(false));
        assert_eq!(config.data, Some(PathBuf::from("path/to/history.yaml")));

        let result = super::parse(Path::new("config.yaml"), "invalidOpt: 1\n");
        assert!(matches!(result, Err(ConfigError::UnknownOption(_, _))));
    }

    #[test]
    fn unsupported_format() {
        let result = super::parse(Path::new("config.toml"), "{}");
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }

    #[test]
    fn not_an_object() {
        let result = super::parse(Path::new("config.json"), "[]");
        assert!(matches!(result, Err(ConfigError::NotAnObject(_))));
    }

    #[test]
    fn relative_data_path() {
        let config = super::parse(
            Path::new("path/to/config/config.json"),
            r#"{"data": "../history.json"}"#,
        )
        .unwrap();
        assert_eq!(
            config.data,
            Some(PathBuf::from("path/to/config/../history.json"))
        );

        let config = super::parse(
            Path::new("path/to/config/config.json"),
            r#"{"data": "/tmp/history.json"}"#,
        )
        .unwrap();
        assert_eq!(config.data, Some(PathBuf::from("/tmp/history.json")));
    }

    #[test]
    fn merge() {
        let file = ConfigFile {
            participants: Some(vec!["a".to_string()]),
            random: Some(true),
            data: Some(PathBuf::from("history.json")),
            ..Default::default()
        };
        let cli = ConfigFile {
            participants: Some(vec!["b".to_string()]),
            random: Some(false),
            ..Default::default()
        };
        let config = file.merge(cli);

        assert_eq!(config.participants, Some(vec!["b".to_string()]));
        assert_eq!(config.random, Some(false));
        assert_eq!(config.data, Some(PathBuf::from("history.json")));

        let options = config.to_options(Vec::new());
        assert!(!options.randomize);
        assert_eq!(options.solver, SolverKind::BranchAndBound);
    }

    #[tokio::test]
    async fn load() {
        let path = std::env::temp_dir().join(format!("{}.json", uuid::Uuid::new_v4()));
        tokio::fs::write(&path, r#"{"quiet": true, "seed": 3}"#)
            .await
            .unwrap();

        let config = super::load(&path).await.unwrap();
        tokio::fs::remove_file(&path).await.unwrap();

        assert!(config.is_quiet());
        assert_eq!(config.seed, Some(3));
        assert_eq!(config.to_options(Vec::new()).seed, Some(3));
    }

    #[tokio::test]
    async fn load_yaml() {
        let path = std::env::temp_dir().join(format!("{}.yaml", uuid::Uuid::new_v4()));
        tokio::fs::write(&path, "ignoreHistory: true\nsolver: hungarian\n")
            .await
            .unwrap();

        let config = super::load(&path).await.unwrap();
        tokio::fs::remove_file(&path).await.unwrap();

        assert!(config.ignores_history());
        assert_eq!(config.solver, Some(SolverKind::Hungarian));
    }

    #[tokio::test]
    async fn load_missing() {
        let path = std::env::temp_dir().join(format!("{}.json", uuid::Uuid::new_v4()));
        assert!(matches!(
            super::load(&path).await,
            Err(ConfigError::Io(_, _))
        ));
    }
}

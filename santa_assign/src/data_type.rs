use std::fmt::Display;
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

// 設定ファイル、履歴ファイル、出力で使える形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum DataType {
    Json,
    Yaml,
}

#[derive(Debug)]
pub enum FormatError {
    Json(serde_json::Error),
    Yaml(serde_yaml::Error),
}

impl Display for FormatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(e) => write!(f, "{e}"),
            Self::Yaml(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for FormatError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json(e) => Some(e),
            Self::Yaml(e) => Some(e),
        }
    }
}

impl From<serde_json::Error> for FormatError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

impl From<serde_yaml::Error> for FormatError {
    fn from(e: serde_yaml::Error) -> Self {
        Self::Yaml(e)
    }
}

impl DataType {
    // 拡張子で判断する。対応していなければ None
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|x| x.to_str()) {
            Some("json") => Some(Self::Json),
            Some("yaml") | Some("yml") => Some(Self::Yaml),
            _ => None,
        }
    }

    pub fn deserialize<T: DeserializeOwned>(&self, data: &str) -> Result<T, FormatError> {
        match self {
            Self::Json => Ok(serde_json::from_str(data)?),
            Self::Yaml => Ok(serde_yaml::from_str(data)?),
        }
    }

    pub fn serialize<T: Serialize>(&self, value: &T) -> Result<String, FormatError> {
        match self {
            Self::Json => Ok(serde_json::to_string_pretty(value)?),
            Self::Yaml => Ok(serde_yaml::to_string(value)?),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::path::Path;

    use super::DataType;

    #[test]
    fn from_path() {
        assert_eq!(
            DataType::from_path(Path::new("a/history.json")),
            Some(DataType::Json)
        );
        assert_eq!(
            DataType::from_path(Path::new("config.yaml")),
            Some(DataType::Yaml)
        );
        assert_eq!(DataType::from_path(Path::new("config.yml")), Some(DataType::Yaml));
        assert_eq!(DataType::from_path(Path::new("config.toml")), None);
        assert_eq!(DataType::from_path(Path::new("history")), None);
    }

    #[test]
    fn same_value_in_both_formats() {
        let value = BTreeMap::from([("jo".to_string(), "anna".to_string())]);
        for data_type in [DataType::Json, DataType::Yaml] {
            let data = data_type.serialize(&value).unwrap();
            let actual: BTreeMap<String, String> = data_type.deserialize(&data).unwrap();
            assert_eq!(actual, value);
        }

        let actual: BTreeMap<String, String> = DataType::Yaml.deserialize("jo: anna\n").unwrap();
        assert_eq!(actual, value);
        assert!(DataType::Json.deserialize::<BTreeMap<String, String>>("jo: anna").is_err());
    }
}

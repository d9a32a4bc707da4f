use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use santa_rs::algorithm::Assignment;
use santa_rs::HistoryRecord;
use serde::{Deserialize, Serialize};

use crate::data_type::{DataType, FormatError};

#[derive(Debug)]
pub enum HistoryError {
    UnsupportedFormat(PathBuf),
    Io(PathBuf, std::io::Error),
    Parse(PathBuf, FormatError),
    DuplicateId(String),
}

impl Display for HistoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedFormat(path) => write!(
                f,
                "{}: unsupported format. Format must be json or yaml.",
                path.display()
            ),
            Self::Io(path, e) => write!(f, "Cannot access {}: {e}", path.display()),
            Self::Parse(path, e) => write!(f, "Invalid data file {}: {e}", path.display()),
            Self::DuplicateId(id) => write!(f, "Identifier \"{id}\" already exists in data file."),
        }
    }
}

impl std::error::Error for HistoryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(_, e) => Some(e),
            Self::Parse(_, e) => Some(e),
            _ => None,
        }
    }
}

/// 履歴に残す日付。古いファイルには ISO 8601 の文字列で入っている
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HistoryDate {
    // UNIX 時間（秒）
    Unix(u64),
    Text(String),
}

impl Default for HistoryDate {
    fn default() -> Self {
        Self::Unix(0)
    }
}

/// 履歴ファイルの 1 要素
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,

    #[serde(default)]
    pub date: HistoryDate,

    pub santas: HistoryRecord,
}

// 対応しているのは JSON と YAML
pub fn check_data_type(path: &Path) -> Result<DataType, HistoryError> {
    DataType::from_path(path).ok_or_else(|| HistoryError::UnsupportedFormat(path.to_path_buf()))
}

// ファイルがなければ空の履歴
pub async fn load_history(path: &Path) -> Result<Vec<HistoryEntry>, HistoryError> {
    let data_type = check_data_type(path)?;

    let data = match tokio::fs::read_to_string(path).await {
        Ok(data) => data,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            log::debug!("{} does not exist yet", path.display());
            return Ok(Vec::new());
        }
        Err(e) => return Err(HistoryError::Io(path.to_path_buf(), e)),
    };

    data_type
        .deserialize(&data)
        .map_err(|e| HistoryError::Parse(path.to_path_buf(), e))
}

pub async fn save_history(path: &Path, history: &[HistoryEntry]) -> Result<(), HistoryError> {
    let data_type = check_data_type(path)?;

    let data = data_type
        .serialize(&history)
        .map_err(|e| HistoryError::Parse(path.to_path_buf(), e))?;
    tokio::fs::write(path, data)
        .await
        .map_err(|e| HistoryError::Io(path.to_path_buf(), e))
}

pub fn does_id_exist(id: &str, history: &[HistoryEntry]) -> bool {
    history.iter().any(|entry| entry.id == id)
}

// id がなければ UUID を振る
pub fn new_entry(id: Option<String>, assignment: &Assignment) -> HistoryEntry {
    let id = id.unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
    let date = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|x| x.as_secs())
        .unwrap_or_default();

    HistoryEntry {
        id,
        date: HistoryDate::Unix(date),
        santas: assignment.to_history_record(),
    }
}

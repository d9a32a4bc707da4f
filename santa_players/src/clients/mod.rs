use std::path::PathBuf;

pub trait IClient {
    fn fetch(&mut self) -> Result<String, Box<dyn std::error::Error>>;
}

// 決まったデータを返すクライアント
#[derive(Default)]
pub struct SampleClient;

impl IClient for SampleClient {
    // 常に成功する
    fn fetch(&mut self) -> Result<String, Box<dyn std::error::Error>> {
        let data = include_str!("sample.csv");
        Ok(data.to_string())
    }
}

// ローカルの CSV ファイルを読むクライアント
pub struct FileClient {
    path: PathBuf,
}

impl FileClient {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl IClient for FileClient {
    fn fetch(&mut self) -> Result<String, Box<dyn std::error::Error>> {
        log::info!("Reading roster from {}", self.path.display());
        let data = std::fs::read_to_string(&self.path)?;
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::{FileClient, IClient, SampleClient};

    #[test]
    fn sample() {
        let data = SampleClient.fetch().unwrap();
        let roster = crate::deserialize(&data).unwrap();
        assert!(!roster.participants().is_empty());
    }

    #[test]
    fn missing_file() {
        let mut client = FileClient::new("this/file/does/not/exist.csv");
        assert!(client.fetch().is_err());
    }
}

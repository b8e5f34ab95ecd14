use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::debug;

use crate::error::LoadError;
use crate::models::bank::QuestionBank;
use crate::models::loaders::{parse_bank, QuestionLoader, SourceFormat};

/// 从本地 CSV / TOML 文件加载题库
#[derive(Debug, Clone)]
pub struct FileLoader {
    path: PathBuf,
    format: SourceFormat,
}

impl FileLoader {
    /// 根据扩展名判断格式
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let format = SourceFormat::from_location(&path.to_string_lossy());
        Self { path, format }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl QuestionLoader for FileLoader {
    fn describe(&self) -> String {
        format!("本地文件 {}", self.path.display())
    }

    async fn load(&self) -> Result<QuestionBank, LoadError> {
        let content = fs::read_to_string(&self.path)
            .await
            .map_err(|e| LoadError::unreachable(self.path.display().to_string(), e))?;

        debug!("读取 {} 字节: {}", content.len(), self.path.display());

        parse_bank(&content, self.format)
    }
}

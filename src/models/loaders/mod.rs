//! 题库加载器
//!
//! 会话只依赖 [`QuestionBank`]，不关心数据来自哪里：
//! - `StaticLoader` - 内置数据或任意文本
//! - `FileLoader` - 本地 CSV / TOML 文件
//! - `RemoteLoader` - 通过 HTTP 下载 CSV / TOML
//!
//! 具体使用哪一个由配置决定（见 [`crate::config::Config::loader`]）。

pub mod csv_loader;
pub mod file_loader;
pub mod remote_loader;
pub mod static_loader;
pub mod toml_loader;

use std::future::Future;

use tracing::info;

use crate::error::LoadError;
use crate::models::bank::QuestionBank;

pub use file_loader::FileLoader;
pub use remote_loader::RemoteLoader;
pub use static_loader::StaticLoader;

/// 题库文本格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Csv,
    Toml,
}

impl SourceFormat {
    /// 根据文件名或 URL 的扩展名判断格式，默认 CSV
    pub fn from_location(location: &str) -> Self {
        let path = location
            .split(['?', '#'])
            .next()
            .unwrap_or(location)
            .to_ascii_lowercase();
        if path.ends_with(".toml") {
            SourceFormat::Toml
        } else {
            SourceFormat::Csv
        }
    }
}

/// 把文本解析、校验成题库
pub fn parse_bank(text: &str, format: SourceFormat) -> Result<QuestionBank, LoadError> {
    let rows = match format {
        SourceFormat::Csv => csv_loader::parse_csv(text)?,
        SourceFormat::Toml => toml_loader::parse_toml(text)?,
    };

    let questions = rows
        .into_iter()
        .map(|(row, raw)| raw.validate(row))
        .collect::<Result<Vec<_>, _>>()?;

    QuestionBank::new(questions)
}

/// 题库加载能力
pub trait QuestionLoader {
    /// 数据来源描述（用于日志和错误信息）
    fn describe(&self) -> String;

    /// 加载题库，只在会话开始前调用一次
    fn load(&self) -> impl Future<Output = Result<QuestionBank, LoadError>> + Send;
}

/// 按配置选择的加载器
#[derive(Debug, Clone)]
pub enum Loader {
    Static(StaticLoader),
    File(FileLoader),
    Remote(RemoteLoader),
}

impl QuestionLoader for Loader {
    fn describe(&self) -> String {
        match self {
            Loader::Static(l) => l.describe(),
            Loader::File(l) => l.describe(),
            Loader::Remote(l) => l.describe(),
        }
    }

    async fn load(&self) -> Result<QuestionBank, LoadError> {
        info!("📁 正在加载题库: {}", self.describe());
        let bank = match self {
            Loader::Static(l) => l.load().await?,
            Loader::File(l) => l.load().await?,
            Loader::Remote(l) => l.load().await?,
        };
        info!("✓ 成功加载 {} 个题目", bank.size());
        Ok(bank)
    }
}

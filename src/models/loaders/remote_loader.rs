use std::time::Duration;

use tracing::{debug, warn};

use crate::error::LoadError;
use crate::models::bank::QuestionBank;
use crate::models::loaders::{parse_bank, QuestionLoader, SourceFormat};

/// 默认请求超时
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// 通过 HTTP GET 下载题库（例如 GitHub raw 文件）
///
/// 网络错误、超时和非 2xx 状态都返回 `SourceUnreachable`，不会用其他数据代替。
#[derive(Debug, Clone)]
pub struct RemoteLoader {
    url: String,
    timeout: Duration,
    format: SourceFormat,
}

impl RemoteLoader {
    pub fn new(url: impl Into<String>) -> Self {
        let url = url.into();
        let format = SourceFormat::from_location(&url);
        Self {
            url,
            timeout: DEFAULT_TIMEOUT,
            format,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn fetch(&self) -> Result<String, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(self.timeout).build()?;

        let response = client.get(&self.url).send().await?.error_for_status()?;
        debug!("题库下载完成: {} ({})", self.url, response.status());

        response.text().await
    }
}

impl QuestionLoader for RemoteLoader {
    fn describe(&self) -> String {
        format!("远程地址 {}", self.url)
    }

    async fn load(&self) -> Result<QuestionBank, LoadError> {
        let content = self.fetch().await.map_err(|e| {
            warn!("⚠️ 无法从 {} 下载题库: {}", self.url, e);
            LoadError::unreachable(self.url.clone(), e)
        })?;

        parse_bank(&content, self.format)
    }
}

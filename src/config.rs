use std::str::FromStr;
use std::time::Duration;

use crate::error::ConfigError;
use crate::models::{FileLoader, Loader, RemoteLoader, StaticLoader};

/// 题库来源
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceKind {
    /// 程序内置数据
    Embedded,
    /// 本地文件
    File,
    /// 远程地址
    Remote,
}

impl FromStr for SourceKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "embedded" | "local" | "static" => Ok(SourceKind::Embedded),
            "file" => Ok(SourceKind::File),
            "remote" | "github" => Ok(SourceKind::Remote),
            _ => Err(ConfigError::EnvVarParseFailed {
                var_name: "QUIZ_SOURCE".to_string(),
                value: s.to_string(),
                expected_type: "embedded | file | remote".to_string(),
            }),
        }
    }
}

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 题库来源
    pub source: SourceKind,
    /// 本地题库文件（.csv / .toml）
    pub quiz_file: Option<String>,
    /// 远程题库地址
    pub remote_url: String,
    /// 远程请求超时（秒）
    pub remote_timeout_secs: u64,
    /// 远程/文件加载失败时是否改用内置题库
    pub fallback_to_embedded: bool,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: SourceKind::Embedded,
            quiz_file: None,
            remote_url:
                "https://raw.githubusercontent.com/tuusuario/tu_repo/main/preguntas_psicologia.csv"
                    .to_string(),
            remote_timeout_secs: 10,
            fallback_to_embedded: false,
            verbose_logging: false,
        }
    }
}

impl Config {
    /// 从环境变量读取配置
    ///
    /// 未设置（或为空）的项使用默认值；设置了但无法解析的项返回
    /// `EnvVarParseFailed`，不会悄悄改用默认值。
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// 从任意键值来源读取配置
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let default = Self::default();
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let source = parse_var(var("QUIZ_SOURCE"), "QUIZ_SOURCE", "embedded | file | remote")?;
        let timeout = parse_var(var("REMOTE_TIMEOUT_SECS"), "REMOTE_TIMEOUT_SECS", "u64")?;
        let fallback = parse_var(var("QUIZ_FALLBACK_EMBEDDED"), "QUIZ_FALLBACK_EMBEDDED", "bool")?;
        let verbose = parse_var(var("VERBOSE_LOGGING"), "VERBOSE_LOGGING", "bool")?;

        Ok(Self {
            source: source.unwrap_or(default.source),
            quiz_file: var("QUIZ_FILE"),
            remote_url: var("QUIZ_REMOTE_URL").unwrap_or(default.remote_url),
            remote_timeout_secs: timeout.unwrap_or(default.remote_timeout_secs),
            fallback_to_embedded: fallback.unwrap_or(default.fallback_to_embedded),
            verbose_logging: verbose.unwrap_or(default.verbose_logging),
        })
    }

    /// 检查配置是否完整
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.source {
            SourceKind::File if self.quiz_file.is_none() => Err(ConfigError::Missing {
                var_name: "QUIZ_FILE".to_string(),
            }),
            SourceKind::Remote if self.remote_url.trim().is_empty() => Err(ConfigError::Missing {
                var_name: "QUIZ_REMOTE_URL".to_string(),
            }),
            _ => Ok(()),
        }
    }

    /// 按配置创建题库加载器
    pub fn loader(&self) -> Result<Loader, ConfigError> {
        self.validate()?;

        let loader = match self.source {
            SourceKind::Embedded => Loader::Static(StaticLoader::embedded()),
            SourceKind::File => {
                let path = self.quiz_file.as_deref().ok_or_else(|| ConfigError::Missing {
                    var_name: "QUIZ_FILE".to_string(),
                })?;
                Loader::File(FileLoader::new(path))
            }
            SourceKind::Remote => Loader::Remote(
                RemoteLoader::new(self.remote_url.trim())
                    .with_timeout(Duration::from_secs(self.remote_timeout_secs)),
            ),
        };

        Ok(loader)
    }
}

/// 解析一个可选的配置值
fn parse_var<T: FromStr>(
    value: Option<String>,
    var_name: &str,
    expected_type: &str,
) -> Result<Option<T>, ConfigError> {
    value
        .map(|v| {
            v.trim()
                .parse()
                .map_err(|_| ConfigError::EnvVarParseFailed {
                    var_name: var_name.to_string(),
                    value: v.clone(),
                    expected_type: expected_type.to_string(),
                })
        })
        .transpose()
}

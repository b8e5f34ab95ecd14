use thiserror::Error;

use crate::session::SessionState;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 题库加载错误
    #[error("题库加载错误: {0}")]
    Load(#[from] LoadError),
    /// 状态转换错误
    #[error("状态转换错误: {0}")]
    Transition(#[from] TransitionError),
    /// 索引越界
    #[error(transparent)]
    IndexOutOfRange(#[from] IndexOutOfRange),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// 题库加载错误
///
/// 任何一种都会中止会话的创建，调用方可以整体重试 `load`。
#[derive(Debug, Error)]
pub enum LoadError {
    /// 行缺少必需的列或字段不合法（`row` 从 1 开始，表头记为 0）
    #[error("第 {row} 行格式错误: {reason}")]
    MalformedRow { row: usize, reason: String },
    /// 两行使用了同一个 id
    #[error("题目 id 重复: {id}")]
    DuplicateId { id: u32 },
    /// 正确答案不在选项中
    #[error("题目 {id} 的正确答案 '{answer}' 不在选项中")]
    CorrectAnswerNotInOptions { id: u32, answer: String },
    /// 没有任何有效题目
    #[error("题库为空")]
    EmptyBank,
    /// 数据源无法访问（网络、HTTP 状态或本地文件读取失败）
    #[error("无法访问题库来源 ({location}): {source}")]
    SourceUnreachable {
        location: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl LoadError {
    /// 创建行格式错误
    pub fn malformed(row: usize, reason: impl Into<String>) -> Self {
        LoadError::MalformedRow {
            row,
            reason: reason.into(),
        }
    }

    /// 创建数据源不可达错误
    pub fn unreachable(
        location: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        LoadError::SourceUnreachable {
            location: location.into(),
            source: Box::new(source),
        }
    }

    /// 是否为数据源不可达（可以换一个来源重试）
    pub fn is_unreachable(&self) -> bool {
        matches!(self, LoadError::SourceUnreachable { .. })
    }
}

/// 用户动作，用于错误信息和日志
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Submit,
    Advance,
    FinishEarly,
    Result,
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Action::Submit => "提交答案",
            Action::Advance => "下一题",
            Action::FinishEarly => "查看最终结果",
            Action::Result => "获取结果",
        };
        f.write_str(name)
    }
}

/// 状态转换错误
///
/// 返回这些错误时会话保持调用前的状态不变。
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TransitionError {
    /// 选择不在当前题目的选项中
    #[error("无效的选项: '{choice}'")]
    InvalidChoice { choice: String },
    /// 当前题目已经作答（第一次提交有效）
    #[error("第 {index} 题已经作答")]
    AlreadyAnswered { index: usize },
    /// 当前状态不允许该动作
    #[error("当前状态 {state} 不允许执行: {action}")]
    InvalidTransition { action: Action, state: SessionState },
    /// 题库访问越界
    #[error(transparent)]
    OutOfRange(#[from] IndexOutOfRange),
}

/// 索引越界
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("索引 {index} 超出范围 [0, {size})")]
pub struct IndexOutOfRange {
    pub index: usize,
    pub size: usize,
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
    /// 缺少必需的配置项
    #[error("缺少配置项 {var_name}")]
    Missing { var_name: String },
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

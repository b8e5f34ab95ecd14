//! 界面层
//!
//! 界面只读取 [`SessionSnapshot`] 并把用户操作转成 [`UserAction`]，不接触会话内部。

pub mod terminal;

use anyhow::Result;

use crate::error::TransitionError;
use crate::session::{QuizResult, SessionSnapshot};

pub use terminal::TerminalFrontend;

/// 用户操作
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    /// 提交所选选项
    Submit(String),
    /// 下一题
    Advance,
    /// 最后一题后查看最终结果
    FinishEarly,
    /// 重新开始
    Restart,
    /// 退出程序
    Quit,
}

/// 渲染器 + 事件来源
pub trait QuizFrontend {
    /// 渲染当前快照；完成时同时给出最终成绩
    fn render(&mut self, snapshot: &SessionSnapshot, result: Option<&QuizResult>) -> Result<()>;

    /// 显示转换错误（会话状态未改变）
    fn show_error(&mut self, error: &TransitionError) -> Result<()>;

    /// 等待下一个用户操作
    fn next_action(&mut self, snapshot: &SessionSnapshot) -> Result<UserAction>;
}

use serde::Serialize;

use crate::models::QuestionRecord;
use crate::session::quiz_session::SessionState;

/// 作答后的反馈
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Feedback {
    pub question_id: u32,
    /// 用户提交的选项（已去除两侧空白）
    pub choice: String,
    pub is_correct: bool,
    pub correct_answer: String,
    pub justification: String,
}

/// 会话只读快照
///
/// 界面只需要它就能完成渲染，不需要访问会话内部。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub state: SessionState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_question: Option<QuestionRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_feedback: Option<Feedback>,
    pub score: usize,
    pub total: usize,
    /// 当前是否为最后一题（界面据此显示"下一题"或"查看最终结果"）
    pub is_last_question: bool,
}

impl SessionSnapshot {
    /// 当前题目序号（从 1 开始），完成后为 `None`
    pub fn position(&self) -> Option<usize> {
        self.state.index().map(|i| i + 1)
    }

    pub fn is_completed(&self) -> bool {
        self.state == SessionState::Completed
    }
}

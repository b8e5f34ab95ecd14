use std::fmt::Display;
use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::error::{Action, TransitionError};
use crate::models::{QuestionBank, QuestionRecord};
use crate::session::scoring::QuizResult;
use crate::session::snapshot::{Feedback, SessionSnapshot};

/// 会话状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "index", rename_all = "camelCase")]
pub enum SessionState {
    /// 第 i 题等待作答
    Answering(usize),
    /// 第 i 题已作答，等待进入下一题
    Answered(usize),
    /// 全部完成
    Completed,
}

impl SessionState {
    /// 当前题目下标，完成后为 `None`
    pub fn index(self) -> Option<usize> {
        match self {
            SessionState::Answering(i) | SessionState::Answered(i) => Some(i),
            SessionState::Completed => None,
        }
    }
}

impl Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionState::Answering(i) => write!(f, "Answering({})", i),
            SessionState::Answered(i) => write!(f, "Answered({})", i),
            SessionState::Completed => write!(f, "Completed"),
        }
    }
}

/// 一次测验会话
///
/// 持有全部可变状态（位置、得分、反馈）；题库通过 `Arc` 只读共享。
/// 转换失败时状态保持不变。
#[derive(Debug, Clone)]
pub struct QuizSession {
    bank: Arc<QuestionBank>,
    state: SessionState,
    score: usize,
    last_feedback: Option<Feedback>,
}

impl QuizSession {
    /// 创建新会话，从第一题开始
    pub fn new(bank: Arc<QuestionBank>) -> Self {
        Self {
            bank,
            state: SessionState::Answering(0),
            score: 0,
            last_feedback: None,
        }
    }

    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn total(&self) -> usize {
        self.bank.size()
    }

    /// 当前下标，完成后等于题目总数
    pub fn current_index(&self) -> usize {
        self.state.index().unwrap_or_else(|| self.bank.size())
    }

    pub fn answered_current(&self) -> bool {
        matches!(self.state, SessionState::Answered(_))
    }

    pub fn is_finished(&self) -> bool {
        self.state == SessionState::Completed
    }

    pub fn last_feedback(&self) -> Option<&Feedback> {
        self.last_feedback.as_ref()
    }

    pub fn current_question(&self) -> Option<&QuestionRecord> {
        self.state.index().and_then(|i| self.bank.get(i).ok())
    }

    /// 生成当前状态的只读快照
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            state: self.state,
            current_question: self.current_question().cloned(),
            last_feedback: self.last_feedback.clone(),
            score: self.score,
            total: self.total(),
            is_last_question: self.state.index() == Some(self.total() - 1),
        }
    }

    /// 提交答案
    ///
    /// 只在 `Answering(i)` 中有效。已作答时返回 `AlreadyAnswered`（第一次提交有效），
    /// 选项不存在时返回 `InvalidChoice`，两种情况都不改变状态。
    pub fn submit_answer(&mut self, choice: &str) -> Result<SessionSnapshot, TransitionError> {
        let index = match self.state {
            SessionState::Answering(i) => i,
            SessionState::Answered(i) => {
                return Err(TransitionError::AlreadyAnswered { index: i });
            }
            SessionState::Completed => return Err(self.invalid(Action::Submit)),
        };

        let record = self.bank.get(index)?;
        let choice = choice.trim();
        if record.option_index(choice).is_none() {
            return Err(TransitionError::InvalidChoice {
                choice: choice.to_string(),
            });
        }

        let is_correct = record.is_correct(choice);
        let justification = if is_correct {
            record.correct_justification()
        } else {
            record.incorrect_justification_for(choice).unwrap_or_default()
        };

        let feedback = Feedback {
            question_id: record.id(),
            choice: choice.to_string(),
            is_correct,
            correct_answer: record.correct_answer().to_string(),
            justification: justification.to_string(),
        };

        if is_correct {
            self.score += 1;
        }
        self.last_feedback = Some(feedback);
        self.state = SessionState::Answered(index);

        debug!(
            "题目 {} 作答: '{}' -> {} (得分 {}/{})",
            record.id(),
            choice,
            if is_correct { "正确" } else { "错误" },
            self.score,
            self.total()
        );

        Ok(self.snapshot())
    }

    /// 进入下一题，最后一题之后进入 `Completed`
    pub fn advance(&mut self) -> Result<SessionSnapshot, TransitionError> {
        let SessionState::Answered(index) = self.state else {
            return Err(self.invalid(Action::Advance));
        };

        self.state = if index + 1 < self.total() {
            SessionState::Answering(index + 1)
        } else {
            SessionState::Completed
        };
        self.last_feedback = None;

        debug!("状态转换: Answered({}) -> {}", index, self.state);
        Ok(self.snapshot())
    }

    /// 最后一题作答后直接查看最终结果
    pub fn finish_early(&mut self) -> Result<SessionSnapshot, TransitionError> {
        match self.state {
            SessionState::Answered(index) if index + 1 == self.total() => {
                self.state = SessionState::Completed;
                self.last_feedback = None;
                debug!("状态转换: Answered({}) -> Completed", index);
                Ok(self.snapshot())
            }
            _ => Err(self.invalid(Action::FinishEarly)),
        }
    }

    /// 重新开始（任意状态均可）
    pub fn restart(&mut self) -> SessionSnapshot {
        debug!("重新开始: {} (得分 {}) -> Answering(0)", self.state, self.score);

        self.state = SessionState::Answering(0);
        self.score = 0;
        self.last_feedback = None;
        self.snapshot()
    }

    /// 最终成绩，只在 `Completed` 中有效
    pub fn result(&self) -> Result<QuizResult, TransitionError> {
        if !self.is_finished() {
            return Err(self.invalid(Action::Result));
        }
        Ok(QuizResult::new(self.score, self.total()))
    }

    fn invalid(&self, action: Action) -> TransitionError {
        TransitionError::InvalidTransition {
            action,
            state: self.state,
        }
    }
}

//! 测验会话 - 核心状态机
//!
//! ```text
//! Answering(0) --submit--> Answered(0) --advance--> Answering(1) ... Answered(n-1)
//!                                                                    |
//!                                          advance / finish_early    v
//!                                                                Completed
//! 任意状态 --restart--> Answering(0)
//! ```
//!
//! 会话不做任何 I/O，也不负责显示；每次转换返回一个 [`SessionSnapshot`] 供界面渲染。

pub mod quiz_session;
pub mod scoring;
pub mod snapshot;

pub use quiz_session::{QuizSession, SessionState};
pub use scoring::{QuizResult, Tier};
pub use snapshot::{Feedback, SessionSnapshot};

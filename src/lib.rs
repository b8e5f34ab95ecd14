//! # Stat Test Quiz
//!
//! 统计检验复习测验：为每个案例选择正确的统计检验，作答后立即给出解析，最后统计得分。
//!
//! ## 架构设计
//!
//! ### ① 数据层（Models）
//! - `models/` - 题目与题库，加载后不可变
//! - `models/loaders` - 内置 / 本地文件 / 远程三种加载器，按配置选择
//!
//! ### ② 核心层（Session）
//! - `session/` - 测验状态机，不做 I/O，每次转换返回快照
//! - `QuizSession` - 作答、下一题、查看结果、重新开始
//! - `scoring` - 百分比与成绩档次
//!
//! ### ③ 界面层（Frontend）
//! - `frontend/` - 渲染快照并把输入转成 `UserAction`
//! - `TerminalFrontend` - 终端实现
//!
//! ### ④ 应用层（App）
//! - `app` - 加载题库、驱动主循环
//!
//! ## 模块结构

pub mod app;
pub mod config;
pub mod error;
pub mod frontend;
pub mod models;
pub mod session;
pub mod utils;

// 重新导出常用类型
pub use app::{App, RunSummary};
pub use config::{Config, SourceKind};
pub use error::{AppError, AppResult, IndexOutOfRange, LoadError, TransitionError};
pub use frontend::{QuizFrontend, TerminalFrontend, UserAction};
pub use models::{Loader, QuestionBank, QuestionLoader, QuestionRecord};
pub use session::{Feedback, QuizResult, QuizSession, SessionSnapshot, SessionState, Tier};

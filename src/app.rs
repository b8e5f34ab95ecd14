use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::AppResult;
use crate::frontend::{QuizFrontend, UserAction};
use crate::models::{QuestionBank, QuestionLoader, StaticLoader};
use crate::session::{QuizResult, QuizSession};
use crate::utils::logging;

/// 应用主结构
#[derive(Debug)]
pub struct App {
    config: Config,
    bank: Arc<QuestionBank>,
}

/// 一次运行的统计
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RunSummary {
    /// 完成的测验次数（重新开始后再次完成会累加）
    pub attempts: usize,
    /// 最近一次完成的成绩
    pub last_result: Option<QuizResult>,
}

impl App {
    /// 初始化应用：按配置加载题库
    ///
    /// 加载失败会直接返回错误，不会创建会话。只有在配置了
    /// `fallback_to_embedded` 且错误为数据源不可达时才改用内置题库。
    pub async fn initialize(config: Config) -> AppResult<Self> {
        let loader = config.loader()?;
        logging::log_startup(&loader.describe());

        let bank = match loader.load().await {
            Ok(bank) => bank,
            Err(e) if e.is_unreachable() && config.fallback_to_embedded => {
                warn!("⚠️ {}，改用内置题库", e);
                StaticLoader::embedded().load().await?
            }
            Err(e) => return Err(e.into()),
        };

        logging::log_bank_loaded(&bank);
        Ok(Self::with_bank(config, bank))
    }

    /// 使用已加载的题库创建应用
    pub fn with_bank(config: Config, bank: QuestionBank) -> Self {
        Self {
            config,
            bank: Arc::new(bank),
        }
    }

    pub fn bank(&self) -> &Arc<QuestionBank> {
        &self.bank
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// 运行测验主循环，直到用户退出或输入结束
    pub fn run<F: QuizFrontend>(&self, frontend: &mut F) -> Result<RunSummary> {
        let mut session = QuizSession::new(Arc::clone(&self.bank));
        let mut snapshot = session.snapshot();
        let mut summary = RunSummary::default();
        let mut needs_render = true;

        info!("🚀 测验开始，共 {} 题", session.total());

        loop {
            if needs_render {
                let result = session.result().ok();
                frontend.render(&snapshot, result.as_ref())?;
                logging::log_snapshot(&snapshot);
            }

            let action = frontend.next_action(&snapshot)?;
            let was_finished = session.is_finished();

            let outcome = match action {
                UserAction::Submit(choice) => session.submit_answer(&choice),
                UserAction::Advance => session.advance(),
                UserAction::FinishEarly => session.finish_early(),
                UserAction::Restart => {
                    info!("🔁 重新开始测验");
                    Ok(session.restart())
                }
                UserAction::Quit => break,
            };

            match outcome {
                Ok(next) => {
                    snapshot = next;
                    needs_render = true;

                    if !was_finished && session.is_finished() {
                        let result = session.result()?;
                        summary.attempts += 1;
                        logging::print_final_stats(&result, summary.attempts);
                        summary.last_result = Some(result);
                    }
                }
                Err(e) => {
                    warn!("⚠️ {}", e);
                    frontend.show_error(&e)?;
                    needs_render = false;
                }
            }
        }

        info!("👋 退出，共完成 {} 次测验", summary.attempts);
        Ok(summary)
    }
}

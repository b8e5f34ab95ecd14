/// 日志工具模块
///
/// 提供日志初始化和输出的辅助函数。日志写到 stderr，stdout 留给测验界面。
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::models::QuestionBank;
use crate::session::{QuizResult, SessionSnapshot};

/// 初始化日志
///
/// 优先使用 `RUST_LOG`，否则 `verbose` 时为 debug，默认 info。
/// 重复调用不会报错（测试中常见）。
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
///
/// # 参数
/// - `source`: 题库来源描述
pub fn log_startup(source: &str) {
    info!("{}", "=".repeat(60));
    info!("📊 统计检验复习测验 - 启动");
    info!(
        "启动时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("📁 题库来源: {}", source);
    info!("{}", "=".repeat(60));
}

/// 记录题库加载信息
pub fn log_bank_loaded(bank: &QuestionBank) {
    info!("✓ 题库就绪，共 {} 题", bank.size());
    for q in bank.iter() {
        debug!("  #{} {}", q.id(), truncate_text(q.prompt(), 50));
    }
}

/// 以 JSON 记录快照（debug 级别）
pub fn log_snapshot(snapshot: &SessionSnapshot) {
    match serde_json::to_string(snapshot) {
        Ok(json) => debug!("快照: {}", json),
        Err(e) => debug!("快照序列化失败: {}", e),
    }
}

/// 打印最终统计信息
///
/// # 参数
/// - `result`: 最终成绩
/// - `attempts`: 本次运行完成的测验次数
pub fn print_final_stats(result: &QuizResult, attempts: usize) {
    info!("\n{}", "=".repeat(60));
    info!("🎯 测验完成");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 得分: {}", result);
    info!("🏷️ 档次: {}", result.tier.label());
    info!("🔁 完成次数: {}", attempts);
    info!("{}", "=".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

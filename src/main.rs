use anyhow::Result;
use stat_test_quiz::utils::logging;
use stat_test_quiz::{App, Config, TerminalFrontend};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 加载配置
    let config = Config::from_env()?;

    // 初始化日志
    logging::init(config.verbose_logging);

    // 加载题库并运行测验
    let app = App::initialize(config).await?;
    let mut frontend = TerminalFrontend::stdio();
    app.run(&mut frontend)?;

    Ok(())
}

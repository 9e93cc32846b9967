use anyhow::Result;
use qp_generator::orchestrator::App;
use qp_generator::Config;

fn main() -> Result<()> {
    // 初始化日志
    qp_generator::utils::logging::init();

    // 加载配置（qpgen.toml 可选，环境变量覆盖）
    let config = Config::load();

    // 初始化并运行应用
    App::initialize(config)?.run()?;

    Ok(())
}

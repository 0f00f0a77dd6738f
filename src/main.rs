use clap::Parser;
use commute_planner::app;
use commute_planner::utils::logger;
use commute_planner::CliConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting commute-planner");
    tracing::debug!("CLI config: {:?}", cli);

    match app::run(&cli).await {
        Ok(report) => {
            println!("{}", report);
            Ok(())
        }
        Err(e) => {
            tracing::error!(
                "❌ commute-planner failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            // 沒有輸出報告就不能以 0 結束
            std::process::exit(e.exit_code());
        }
    }
}

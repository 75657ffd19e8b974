use clap::Parser;
use taxpayer_desk::app::commands::{self, OutputSpec};
use taxpayer_desk::config::cli::Command;
use taxpayer_desk::config::LogFormat;
use taxpayer_desk::core::form::FormField;
use taxpayer_desk::utils::error::DeskError;
use taxpayer_desk::utils::logger;
use taxpayer_desk::{CliConfig, HttpRecordService, Shell, TableView, TaxPayerController};

fn report_and_exit(e: &DeskError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    std::process::exit(e.exit_code());
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 合併命令列與設定檔
    let settings = match cli.settings() {
        Ok(settings) => settings,
        Err(e) => {
            logger::init_logger(LogFormat::Compact, cli.verbose);
            report_and_exit(&e);
        }
    };

    // 初始化日誌
    logger::init_logger(settings.log_format, settings.verbose);

    tracing::info!("🚀 Starting taxpayer-desk against {}", settings.endpoint);
    tracing::debug!("Effective settings: {:?}", settings);

    let service = match HttpRecordService::from_config(&settings) {
        Ok(service) => service,
        Err(e) => report_and_exit(&e),
    };
    let mut controller = TaxPayerController::new(service);
    let mut view = TableView::new(settings.page_size);
    let mut stdout = std::io::stdout();

    let result = match cli.command.unwrap_or(Command::Shell) {
        Command::List(args) => {
            commands::list(&mut controller, &mut view, &OutputSpec::from(&args.output), &mut stdout).await
        }
        Command::Add(args) => {
            let spec = OutputSpec::from(&args.output);
            let values = [
                (FormField::Tid, args.tid),
                (FormField::FirstName, args.first_name),
                (FormField::LastName, args.last_name),
                (FormField::Address, args.address),
            ];
            commands::add(&mut controller, &mut view, values, &spec, &mut stdout).await
        }
        Command::Search(args) => {
            let spec = OutputSpec::from(&args.output);
            commands::search(&mut controller, &mut view, &args.tid, &spec, &mut stdout).await
        }
        Command::Shell => {
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            let mut shell = Shell::new(controller, view);
            shell.run(stdin, &mut stdout).await
        }
    };

    if let Err(e) = result {
        report_and_exit(&e);
    }

    Ok(())
}

use clap::Parser;
use resume_intake::core::{FileOutcome, Publisher};
use resume_intake::utils::{logger, validation::Validate};
use resume_intake::{
    CliConfig, DocumentReader, GitPublisher, IntakeConfig, IntakeEngine, IntakePipeline,
    NoopPublisher,
};

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting resume-intake");
    tracing::debug!("CLI config: {:?}", cli);

    // 載入並驗證配置
    let config = match IntakeConfig::from_cli(&cli).and_then(|c| c.validate().map(|_| c)) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    let publisher: Box<dyn Publisher> = if config.publish_enabled && !cli.dry_run {
        Box::new(
            GitPublisher::new(config.repo_root.clone())
                .with_message_template(config.commit_message.clone()),
        )
    } else {
        Box::new(NoopPublisher)
    };

    let pipeline = IntakePipeline::new(config, DocumentReader, publisher);
    let engine = IntakeEngine::new(pipeline).with_dry_run(cli.dry_run);

    match engine.run().await {
        Ok(report) => {
            for outcome in &report.outcomes {
                match outcome {
                    FileOutcome::Previewed { file, role, skills } => {
                        println!("  {} -> {} [{}]", file, role, skills.join(", "));
                    }
                    FileOutcome::Failed { file, reason } => {
                        println!("✘ {}: {}", file, reason);
                    }
                    FileOutcome::Ingested { .. } => {}
                }
            }

            if report.dry_run {
                let ready = report.outcomes.len() - report.failed_count();
                println!("Dry run: {} resume(s) would be uploaded", ready);
            } else {
                println!("✔ {} resume(s) uploaded", report.added);
            }
            if report.failed_count() > 0 {
                println!("✘ {} resume(s) failed", report.failed_count());
            }
            if let Some(publish) = &report.publish {
                for step in publish.failed_steps() {
                    eprintln!("⚠ git {} failed (exit code {:?})", step.name, step.exit_code);
                }
            }
        }
        Err(e) => {
            tracing::error!(
                "❌ Intake failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = e.exit_code();
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }
}

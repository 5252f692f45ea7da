use clap::{CommandFactory, Parser};
use ratsit_query::domain::model::OutputTargets;
use ratsit_query::utils::{logger, validation::Validate};
use ratsit_query::{
    CliConfig, LocalStorage, LookupEngine, LookupError, LookupPipeline, ReqwestFetcher,
    SiteResolver, TracingObserver,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if std::env::args_os().len() < 2 {
        CliConfig::command().print_help()?;
        return Ok(());
    }

    let config = CliConfig::parse();
    logger::init_cli_logger(config.verbose);

    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    match run(&config).await {
        Ok(targets) => {
            tracing::info!(
                "✅ Done. Results in '{}', failed queries in '{}'",
                targets.resolved,
                targets.failed
            );
            Ok(())
        }
        Err(e) => {
            tracing::error!("❌ {}", e);
            tracing::error!("💡 {}", e.recovery_suggestion());
            eprintln!("❌ {}", e);
            std::process::exit(e.exit_code());
        }
    }
}

async fn run(config: &CliConfig) -> Result<OutputTargets, LookupError> {
    config.validate()?;
    let site = config.load_site_config()?;

    let fetcher = ReqwestFetcher::new(&site.http)?;
    let resolver = SiteResolver::new(fetcher, &site)?;
    let pipeline = LookupPipeline::new(LocalStorage::default(), resolver, TracingObserver, config);

    LookupEngine::new(pipeline).run().await
}

use anyhow::Result;
use std::sync::Arc;
use token_swap::{
    config::AppConfig,
    feed::{HttpPriceFeed, PriceFeed, StaticPriceFeed},
    ledger::BalanceLedger,
    session::{SubmitOutcome, SwapSession},
    settings::SwapSettings,
    swap::SimulatedExecutor,
    utils,
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    utils::init_logging();

    let config = AppConfig::load()?;
    tracing::info!(
        feed = %config.price_feed_url,
        submit_delay_ms = config.submit_delay.as_millis() as u64,
        "[INIT] token-swap starting"
    );

    // Collaborators ------------------------------------------------------
    let feed: Box<dyn PriceFeed> = match &config.price_feed_file {
        Some(path) => {
            let body = tokio::fs::read_to_string(path).await?;
            Box::new(StaticPriceFeed::from_json(&body)?)
        }
        None => Box::new(HttpPriceFeed::new(
            config.price_feed_url.clone(),
            config.feed_timeout,
        )?),
    };
    let executor = SimulatedExecutor::new(config.submit_delay, config.submit_should_fail);

    let mut settings = SwapSettings::default();
    settings.set_slippage(config.slippage_pct)?;

    let mut session =
        SwapSession::new(BalanceLedger::demo(), Arc::new(executor)).with_settings(settings);

    if let Err(e) = session.start(feed.as_ref()).await {
        tracing::error!(error = %e, "[INIT] {}", session.api_error().unwrap_or_default());
        return Err(e.into());
    }
    tracing::info!(tokens = ?session.catalog().symbols(), "[INIT] catalog ready");

    // Edits --------------------------------------------------------------
    if let Some(symbol) = config.swap_from.as_deref() {
        session.select_source(Some(symbol))?;
    }
    if let Some(symbol) = config.swap_to.as_deref() {
        session.select_dest(Some(symbol))?;
    }
    let Some(amount) = config.swap_amount.as_deref() else {
        tracing::info!("[INIT] SWAP_AMOUNT not set, nothing to submit");
        return Ok(());
    };
    session.set_source_amount(amount)?;

    tracing::info!(
        source = session.source().map(|t| t.symbol.as_str()).unwrap_or_default(),
        dest = session.dest().map(|t| t.symbol.as_str()).unwrap_or_default(),
        amount = session.source_amount(),
        dest_amount = session.dest_amount(),
        rate = %session.rate_display().unwrap_or_default(),
        balance = session.source_balance(),
        slippage_pct = session.settings().slippage_pct(),
        "[QUOTE] current form"
    );

    // Submit -------------------------------------------------------------
    match session.submit().await? {
        SubmitOutcome::Rejected(outcome) => {
            tracing::warn!(violations = ?outcome.messages(), "[SUBMIT] swap rejected");
        }
        SubmitOutcome::Settled => {
            tracing::info!("[SUBMIT] Swap executed successfully!");
        }
        SubmitOutcome::Failed => {
            tracing::warn!(
                error = session.submit_error().unwrap_or_default(),
                "[SUBMIT] swap failed"
            );
        }
    }

    Ok(())
}

//! Swap form session: fetch, edit, validate, submit, settle or fail.
//!
//! All pricing and validation run synchronously inside the mutating call
//! that triggered them. Only the price fetch and the submission suspend, and
//! each is gated by the current phase so at most one is in flight.

use crate::catalog::PriceCatalog;
use crate::errors::{AppError, Result};
use crate::feed::PriceFeed;
use crate::ledger::BalanceLedger;
use crate::models::{SwapQuote, SwapRequest, TokenQuote};
use crate::settings::SwapSettings;
use crate::swap::{self, SwapExecutor, ValidationOutcome};
use crate::utils::parse_amount;
use bigdecimal::BigDecimal;
use chrono::Utc;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const API_ERROR_MESSAGE: &str = "Failed to load token prices. Please refresh the page.";
pub const SUBMIT_ERROR_MESSAGE: &str = "Swap failed. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Price feed failed; terminal for the session.
    Api,
    /// Submission failed; the form stays usable.
    Submit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    Fetching,
    Ready,
    Editing,
    Validating,
    Submitting,
    Settled,
    Failed(FailureKind),
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionPhase::Idle => "idle",
            SessionPhase::Fetching => "fetching",
            SessionPhase::Ready => "ready",
            SessionPhase::Editing => "editing",
            SessionPhase::Validating => "validating",
            SessionPhase::Submitting => "submitting",
            SessionPhase::Settled => "settled",
            SessionPhase::Failed(FailureKind::Api) => "failed (api)",
            SessionPhase::Failed(FailureKind::Submit) => "failed (submit)",
        };
        f.write_str(name)
    }
}

/// Result of the validation step of a submission.
#[derive(Debug, Clone, PartialEq)]
pub enum Admission {
    /// Violations found; nothing was sent.
    Rejected(ValidationOutcome),
    /// Session is now `Submitting` with this request.
    Accepted(SwapRequest),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Rejected(ValidationOutcome),
    Settled,
    Failed,
}

pub struct SwapSession {
    phase: SessionPhase,
    ledger: BalanceLedger,
    executor: Arc<dyn SwapExecutor>,
    settings: SwapSettings,
    settings_open: bool,

    catalog: PriceCatalog,
    source: Option<TokenQuote>,
    dest: Option<TokenQuote>,
    source_amount: String,
    dest_amount: String,
    quote: Option<SwapQuote>,

    violations: ValidationOutcome,
    api_error: Option<String>,
    submit_error: Option<String>,
    success: bool,
}

impl SwapSession {
    pub fn new(ledger: BalanceLedger, executor: Arc<dyn SwapExecutor>) -> Self {
        Self {
            phase: SessionPhase::Idle,
            ledger,
            executor,
            settings: SwapSettings::default(),
            settings_open: false,
            catalog: PriceCatalog::default(),
            source: None,
            dest: None,
            source_amount: String::new(),
            dest_amount: String::new(),
            quote: None,
            violations: ValidationOutcome::default(),
            api_error: None,
            submit_error: None,
            success: false,
        }
    }

    pub fn with_settings(mut self, settings: SwapSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Load prices once. Only valid from `Idle`; a failing feed leaves the
    /// session in `Failed(Api)` for good.
    pub async fn start(&mut self, feed: &dyn PriceFeed) -> Result<()> {
        if self.phase != SessionPhase::Idle {
            return Err(self.invalid("start"));
        }
        self.transition(SessionPhase::Fetching);

        match feed.fetch().await {
            Ok(raw) => {
                self.catalog = PriceCatalog::build(raw);
                let (source, dest) = self.catalog.default_pair();
                self.source = source;
                self.dest = dest;
                self.recompute();
                info!(
                    tokens = self.catalog.len(),
                    source = self.source_symbol().unwrap_or_default(),
                    dest = self.dest_symbol().unwrap_or_default(),
                    "[SESSION] prices loaded"
                );
                self.transition(SessionPhase::Ready);
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "[SESSION] price fetch failed");
                self.api_error = Some(API_ERROR_MESSAGE.to_string());
                self.transition(SessionPhase::Failed(FailureKind::Api));
                Err(e)
            }
        }
    }

    // ---------- edits ----------

    pub fn set_source_amount(&mut self, text: impl Into<String>) -> Result<()> {
        self.ensure_editable("edit the amount")?;
        self.source_amount = text.into();
        self.after_edit();
        Ok(())
    }

    /// Select the source token by symbol; `None` clears the selection.
    pub fn select_source(&mut self, symbol: Option<&str>) -> Result<()> {
        self.ensure_editable("select a token")?;
        self.source = self.resolve(symbol)?;
        self.after_edit();
        Ok(())
    }

    /// Select the destination token by symbol; `None` clears the selection.
    pub fn select_dest(&mut self, symbol: Option<&str>) -> Result<()> {
        self.ensure_editable("select a token")?;
        self.dest = self.resolve(symbol)?;
        self.after_edit();
        Ok(())
    }

    /// Exchange tokens and displayed amounts as one step.
    ///
    /// Amounts are moved verbatim, not re-priced, so applying this twice
    /// restores the previous form exactly. The quote mirrors the swapped
    /// form; the next edit re-prices.
    pub fn swap_direction(&mut self) -> Result<()> {
        self.ensure_editable("swap direction")?;
        std::mem::swap(&mut self.source, &mut self.dest);
        std::mem::swap(&mut self.source_amount, &mut self.dest_amount);
        self.quote = self.mirrored_quote();
        self.submit_error = None;
        self.success = false;
        self.transition(SessionPhase::Editing);
        Ok(())
    }

    // ---------- settings ----------

    pub fn open_settings(&mut self) {
        self.settings_open = true;
    }

    pub fn close_settings(&mut self) {
        self.settings_open = false;
    }

    pub fn set_slippage(&mut self, value: f64) -> Result<()> {
        self.settings.set_slippage(value)
    }

    pub fn set_slippage_text(&mut self, text: &str) -> Result<()> {
        self.settings.set_slippage_text(text)
    }

    // ---------- submission ----------

    /// Validate the current form and, if clean, enter `Submitting`.
    pub fn begin_submit(&mut self) -> Result<Admission> {
        match self.phase {
            SessionPhase::Submitting => return Err(AppError::SubmissionInFlight),
            SessionPhase::Idle
            | SessionPhase::Fetching
            | SessionPhase::Validating
            | SessionPhase::Failed(FailureKind::Api) => return Err(self.invalid("submit")),
            _ => {}
        }

        self.transition(SessionPhase::Validating);
        let request = self.request();
        let outcome = swap::validate(&request, &self.ledger);

        if !outcome.is_empty() {
            debug!(violations = ?outcome.messages(), "[SESSION] submission rejected");
            self.violations = outcome.clone();
            self.transition(SessionPhase::Editing);
            return Ok(Admission::Rejected(outcome));
        }

        self.violations = ValidationOutcome::default();
        self.submit_error = None;
        self.success = false;
        self.transition(SessionPhase::Submitting);
        Ok(Admission::Accepted(request))
    }

    /// Record the result of the in-flight submission.
    pub fn finish_submit(&mut self, result: Result<()>) -> Result<SubmitOutcome> {
        if self.phase != SessionPhase::Submitting {
            return Err(self.invalid("finish a submission"));
        }

        match result {
            Ok(()) => {
                info!(
                    source = self.source_symbol().unwrap_or_default(),
                    dest = self.dest_symbol().unwrap_or_default(),
                    amount = %self.source_amount,
                    "[SUBMIT] swap settled"
                );
                self.success = true;
                self.source_amount.clear();
                self.dest_amount.clear();
                self.quote = None;
                self.transition(SessionPhase::Settled);
                Ok(SubmitOutcome::Settled)
            }
            Err(e) => {
                warn!(error = %e, "[SUBMIT] swap failed");
                self.submit_error = Some(SUBMIT_ERROR_MESSAGE.to_string());
                self.transition(SessionPhase::Failed(FailureKind::Submit));
                Ok(SubmitOutcome::Failed)
            }
        }
    }

    /// Validate, execute through the injected executor, and settle.
    pub async fn submit(&mut self) -> Result<SubmitOutcome> {
        match self.begin_submit()? {
            Admission::Rejected(outcome) => Ok(SubmitOutcome::Rejected(outcome)),
            Admission::Accepted(request) => {
                let executor = Arc::clone(&self.executor);
                let result = executor.execute(&request).await;
                self.finish_submit(result)
            }
        }
    }

    // ---------- read side ----------

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn catalog(&self) -> &PriceCatalog {
        &self.catalog
    }

    pub fn source(&self) -> Option<&TokenQuote> {
        self.source.as_ref()
    }

    pub fn dest(&self) -> Option<&TokenQuote> {
        self.dest.as_ref()
    }

    pub fn source_amount(&self) -> &str {
        &self.source_amount
    }

    pub fn dest_amount(&self) -> &str {
        &self.dest_amount
    }

    pub fn quote(&self) -> Option<&SwapQuote> {
        self.quote.as_ref()
    }

    /// Violations from the last submission attempt.
    pub fn violations(&self) -> &ValidationOutcome {
        &self.violations
    }

    pub fn request(&self) -> SwapRequest {
        SwapRequest {
            source_token: self.source.clone(),
            dest_token: self.dest.clone(),
            source_amount: self.source_amount.clone(),
        }
    }

    pub fn exchange_rate(&self) -> f64 {
        swap::exchange_rate(self.source.as_ref(), self.dest.as_ref())
    }

    /// e.g. `1 ETH = 1662.525253 USDC`, once both amounts are filled in.
    pub fn rate_display(&self) -> Option<String> {
        let (source, dest) = (self.source.as_ref()?, self.dest.as_ref()?);
        if self.source_amount.is_empty() || self.dest_amount.is_empty() {
            return None;
        }
        Some(format!(
            "1 {} = {} {}",
            source.symbol,
            swap::format_rate(self.exchange_rate()),
            dest.symbol
        ))
    }

    pub fn api_error(&self) -> Option<&str> {
        self.api_error.as_deref()
    }

    pub fn submit_error(&self) -> Option<&str> {
        self.submit_error.as_deref()
    }

    pub fn success(&self) -> bool {
        self.success
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, SessionPhase::Idle | SessionPhase::Fetching)
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == SessionPhase::Submitting
    }

    pub fn form_visible(&self) -> bool {
        !self.is_loading()
            && self.api_error.is_none()
            && self.source.is_some()
            && self.dest.is_some()
    }

    pub fn can_submit(&self) -> bool {
        self.form_visible()
            && !self.is_submitting()
            && !self.source_amount.is_empty()
            && !self.dest_amount.is_empty()
            && self.violations.is_empty()
    }

    pub fn source_balance(&self) -> f64 {
        self.source_symbol()
            .map(|s| self.ledger.display_balance(s))
            .unwrap_or(0.0)
    }

    pub fn dest_balance(&self) -> f64 {
        self.dest_symbol()
            .map(|s| self.ledger.display_balance(s))
            .unwrap_or(0.0)
    }

    pub fn settings(&self) -> &SwapSettings {
        &self.settings
    }

    pub fn settings_open(&self) -> bool {
        self.settings_open
    }

    // ---------- internals ----------

    fn source_symbol(&self) -> Option<&str> {
        self.source.as_ref().map(|t| t.symbol.as_str())
    }

    fn dest_symbol(&self) -> Option<&str> {
        self.dest.as_ref().map(|t| t.symbol.as_str())
    }

    fn ensure_editable(&self, action: &'static str) -> Result<()> {
        match self.phase {
            SessionPhase::Submitting => Err(AppError::SubmissionInFlight),
            SessionPhase::Idle
            | SessionPhase::Fetching
            | SessionPhase::Validating
            | SessionPhase::Failed(FailureKind::Api) => Err(self.invalid(action)),
            _ => Ok(()),
        }
    }

    fn resolve(&self, symbol: Option<&str>) -> Result<Option<TokenQuote>> {
        match symbol {
            None => Ok(None),
            Some(s) => self
                .catalog
                .get(s)
                .cloned()
                .map(Some)
                .ok_or_else(|| AppError::UnknownToken(s.to_string())),
        }
    }

    fn after_edit(&mut self) {
        self.violations = ValidationOutcome::default();
        self.submit_error = None;
        self.success = false;
        self.recompute();
        self.transition(SessionPhase::Editing);
    }

    fn recompute(&mut self) {
        self.quote = swap::quote(self.source.as_ref(), self.dest.as_ref(), &self.source_amount);
        self.dest_amount = self
            .quote
            .as_ref()
            .map(SwapQuote::dest_amount_text)
            .unwrap_or_default();
    }

    /// Quote for the current form taking the destination text as given.
    fn mirrored_quote(&self) -> Option<SwapQuote> {
        let (source, dest) = (self.source.as_ref()?, self.dest.as_ref()?);
        if !parse_amount(&self.source_amount).is_some_and(|a| a > 0.0) {
            return None;
        }
        let dest_amount = BigDecimal::from_str(self.dest_amount.trim()).ok()?;
        Some(SwapQuote {
            rate: swap::exchange_rate(Some(source), Some(dest)),
            dest_amount,
            computed_at: Utc::now(),
        })
    }

    fn transition(&mut self, next: SessionPhase) {
        if self.phase != next {
            debug!(from = %self.phase, to = %next, "[SESSION] transition");
        }
        self.phase = next;
    }

    fn invalid(&self, action: &'static str) -> AppError {
        AppError::InvalidTransition {
            phase: self.phase.to_string(),
            action,
        }
    }
}

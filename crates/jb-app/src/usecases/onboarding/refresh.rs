use std::sync::Arc;

use tracing::{debug, info_span, warn, Instrument};

use jb_core::auth::AuthSession;
use jb_core::onboarding::OnboardingSignals;
use jb_core::ports::OnboardingSignalPort;

use super::OnboardingContext;

/// Use case for reloading the onboarding signals after an auth change.
pub struct RefreshOnboardingSignals {
    port: Arc<dyn OnboardingSignalPort>,
    context: Arc<OnboardingContext>,
}

impl RefreshOnboardingSignals {
    pub fn new(port: Arc<dyn OnboardingSignalPort>, context: Arc<OnboardingContext>) -> Self {
        Self { port, context }
    }

    /// Fetch signals for the settled, authenticated user in `auth`.
    ///
    /// Anything else (signed out, errored, still loading) resets the signals
    /// to unknown.
    pub async fn execute(&self, auth: &AuthSession) -> OnboardingSignals {
        let user_id = match (auth.is_authenticated, auth.is_loading, auth.user_id()) {
            (true, false, Some(user_id)) => user_id.to_string(),
            _ => {
                self.context.replace(OnboardingSignals::unknown());
                return OnboardingSignals::unknown();
            }
        };

        let span = info_span!("usecase.onboarding.refresh", user_id = %user_id);
        async {
            let signals = match self.port.fetch_onboarding_signals(&user_id).await {
                Ok(signals) => {
                    debug!(settled = signals.is_settled(), "onboarding signals loaded");
                    signals
                }
                Err(err) => {
                    warn!(error = %err, "onboarding signals fetch failed");
                    OnboardingSignals::unknown()
                }
            };
            self.context.replace(signals.clone());
            signals
        }
        .instrument(span)
        .await
    }

    pub async fn invalidate(&self, user_id: &str) -> anyhow::Result<()> {
        self.port.invalidate_cache(user_id).await
    }
}

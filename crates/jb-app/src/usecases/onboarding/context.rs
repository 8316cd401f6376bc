use tokio::sync::watch;
use tracing::debug;

use jb_core::onboarding::OnboardingSignals;

use crate::usecases::internal::MountGuard;

/// Latest onboarding signals, shared with readers through a `watch` channel.
pub struct OnboardingContext {
    signals: watch::Sender<OnboardingSignals>,
    mount: MountGuard,
}

impl OnboardingContext {
    pub fn new(mount: MountGuard) -> Self {
        let (signals, _) = watch::channel(OnboardingSignals::unknown());
        Self { signals, mount }
    }

    pub fn snapshot(&self) -> OnboardingSignals {
        self.signals.borrow().clone()
    }

    /// Drop signals that were fetched for someone other than `user_id`.
    ///
    /// Returns `true` when the stored signals were reset to unknown.
    pub fn forget_unless_for(&self, user_id: &str) -> bool {
        let stale = {
            let current = self.signals.borrow();
            current.user_record.is_some() && current.record_for(Some(user_id)).is_none()
        };
        stale && self.replace(OnboardingSignals::unknown())
    }

    /// Returns `false` when unmounted and the update was dropped.
    pub fn replace(&self, signals: OnboardingSignals) -> bool {
        if !self.mount.is_mounted() {
            debug!("onboarding update after unmount dropped");
            return false;
        }
        self.signals.send_replace(signals);
        true
    }
}

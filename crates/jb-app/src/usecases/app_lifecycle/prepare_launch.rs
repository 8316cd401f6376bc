use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, info_span, warn, Instrument};

use jb_core::launch::{ColdStartPolicy, LaunchKind, Platform, SessionMarker};
use jb_core::ports::{ClockPort, KeyValueStorePort};
use jb_core::storage_keys::{NAVIGATION_STATE_KEY, SESSION_ID_KEY, SPLASH_SHOWN_KEY};

use crate::usecases::internal::BestEffortWriter;

/// Decisions taken at launch, before any screen renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LaunchPlan {
    pub kind: LaunchKind,
    pub show_splash: bool,
    /// Serialized navigation tree to restore, if any.
    pub restored_navigation: Option<String>,
}

/// Use case for classifying the launch and restoring navigation.
///
/// Never fails: unreadable markers count as absent, and a missing or
/// malformed navigation snapshot means a fresh tree.
pub struct PrepareLaunch {
    store: Arc<dyn KeyValueStorePort>,
    clock: Arc<dyn ClockPort>,
    policy: ColdStartPolicy,
    platform: Platform,
    best_effort: BestEffortWriter,
}

impl PrepareLaunch {
    pub fn new(
        store: Arc<dyn KeyValueStorePort>,
        clock: Arc<dyn ClockPort>,
        policy: ColdStartPolicy,
        platform: Platform,
    ) -> Self {
        Self {
            best_effort: BestEffortWriter::new(store.clone()),
            store,
            clock,
            policy,
            platform,
        }
    }

    pub async fn execute(&self, deep_link: Option<&str>) -> LaunchPlan {
        let span = info_span!("usecase.app_lifecycle.prepare_launch", platform = ?self.platform);
        async {
            let now_ms = self.clock.now_ms();
            let marker = self.read_marker().await;
            let kind = self.policy.classify(marker.app_session_id, now_ms);
            let show_splash = self.policy.should_show_splash(&marker, now_ms);

            if show_splash {
                self.best_effort
                    .write(SESSION_ID_KEY, &now_ms.to_string())
                    .await;
                self.best_effort.write(SPLASH_SHOWN_KEY, "true").await;
            }

            let restored_navigation = if self.platform.restores_navigation() && deep_link.is_none() {
                self.read_navigation().await
            } else {
                debug!(deep_link = ?deep_link, "navigation restore skipped");
                None
            };

            info!(
                kind = ?kind,
                show_splash,
                restored = restored_navigation.is_some(),
                "launch prepared"
            );
            LaunchPlan {
                kind,
                show_splash,
                restored_navigation,
            }
        }
        .instrument(span)
        .await
    }

    async fn read_marker(&self) -> SessionMarker {
        let session_id = self.read_optional(SESSION_ID_KEY).await;
        let splash_shown = self.read_optional(SPLASH_SHOWN_KEY).await;
        SessionMarker::from_stored(session_id.as_deref(), splash_shown.as_deref())
    }

    async fn read_navigation(&self) -> Option<String> {
        let raw = self.read_optional(NAVIGATION_STATE_KEY).await?;
        match serde_json::from_str::<serde_json::Value>(&raw) {
            Ok(_) => Some(raw),
            Err(err) => {
                warn!(error = %err, "stored navigation state is malformed, starting fresh");
                None
            }
        }
    }

    async fn read_optional(&self, key: &str) -> Option<String> {
        match self.store.get(key).await {
            Ok(value) => value,
            Err(err) => {
                warn!(key, error = %err, "launch marker read failed");
                None
            }
        }
    }
}

mod common;

use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use common::{ana, session_json, Harness};

use jb_app::RecoveryOutcome;
use jb_core::navigation::Route;
use jb_core::recovery::{RecoveryPhase, RecoveryPolicy, RecoveryState, RecoveryTrigger};
use jb_core::storage_keys::{MODE_PREFERENCE_KEY, SESSION_DATA_KEY};
use jb_infra::InMemoryKeyValueStore;

fn signed_in_store() -> InMemoryKeyValueStore {
    InMemoryKeyValueStore::with_entries([
        (SESSION_DATA_KEY.to_string(), session_json(&ana())),
        (MODE_PREFERENCE_KEY.to_string(), "worker".to_string()),
    ])
}

#[tokio::test(start_paused = true)]
async fn three_failed_cycles_escalate_to_forced_logout() {
    let (harness, signals) = Harness::stuck(signed_in_store(), RecoveryPolicy::default());
    let runtime = harness.mount().await;
    assert_eq!(runtime.route(), Route::OnboardingLoading);
    assert_eq!(harness.store.session_reads(), 1);

    for attempt in 1..=3 {
        assert_eq!(
            runtime.run_recovery().await,
            RecoveryOutcome::CycleCompleted { attempt }
        );
        assert_eq!(runtime.recovery_state().attempts, attempt);
    }
    assert_eq!(harness.store.session_reads(), 4);

    // Fourth detection: no fourth check_auth_status, straight to logout.
    assert_eq!(
        runtime.run_recovery().await,
        RecoveryOutcome::ForcedLogout { attempts: 3 }
    );
    assert_eq!(harness.store.session_reads(), 4);
    assert_eq!(*harness.prompt.confirmations.lock().unwrap(), vec![3]);
    assert_eq!(signals.invalidations.load(Ordering::SeqCst), 3);

    assert!(!runtime.auth_session().is_authenticated);
    assert!(!runtime.is_mounted());
    assert!(!harness.memory.contains(SESSION_DATA_KEY).await);
    assert!(!harness.memory.contains(MODE_PREFERENCE_KEY).await);

    let fresh = runtime.remount().await;
    assert_eq!(fresh.recovery_state(), RecoveryState::default());
    assert_eq!(fresh.route(), Route::Auth);
}

#[tokio::test(start_paused = true)]
async fn each_cycle_waits_the_settle_delay() {
    let (harness, _signals) = Harness::stuck(signed_in_store(), RecoveryPolicy::default());
    let runtime = harness.mount().await;

    let started = tokio::time::Instant::now();
    runtime.run_recovery().await;
    assert!(started.elapsed() >= Duration::from_millis(2000));
}

#[tokio::test(start_paused = true)]
async fn attempts_never_decrease_or_pass_the_cap() {
    let (harness, _signals) = Harness::stuck(signed_in_store(), RecoveryPolicy::default());
    let runtime = harness.mount().await;

    let mut last = 0;
    for _ in 0..6 {
        runtime.run_recovery().await;
        let state = runtime.recovery_state();
        assert!(state.attempts >= last);
        assert!(state.attempts <= 3);
        last = state.attempts;
    }
    assert_eq!(runtime.recovery_state().phase, RecoveryPhase::Exhausted);
    assert_eq!(runtime.recovery_state().attempts, 3);
    assert_eq!(harness.prompt.confirmations.lock().unwrap().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn drive_recovery_runs_until_escalation() {
    let (harness, _signals) = Harness::stuck(signed_in_store(), RecoveryPolicy::default());
    let runtime = harness.mount().await;

    assert_eq!(
        runtime.drive_recovery().await,
        RecoveryOutcome::ForcedLogout { attempts: 3 }
    );
    assert_eq!(harness.store.session_reads(), 4);
}

#[tokio::test(start_paused = true)]
async fn first_attempt_only_holds_after_one_cycle() {
    let policy = RecoveryPolicy {
        trigger: RecoveryTrigger::FirstAttemptOnly,
        ..RecoveryPolicy::default()
    };
    let (harness, _signals) = Harness::stuck(signed_in_store(), policy);
    let runtime = harness.mount().await;

    assert_eq!(
        runtime.drive_recovery().await,
        RecoveryOutcome::CycleCompleted { attempt: 1 }
    );
    assert_eq!(runtime.run_recovery().await, RecoveryOutcome::Idle);

    assert_eq!(runtime.recovery_state().attempts, 1);
    assert!(runtime.auth_session().is_authenticated);
    assert!(harness.prompt.confirmations.lock().unwrap().is_empty());
    assert_eq!(runtime.route(), Route::OnboardingLoading);
}

#[tokio::test(start_paused = true)]
async fn logout_during_recovery_still_signs_out() {
    let (harness, _signals) = Harness::stuck(signed_in_store(), RecoveryPolicy::default());
    let runtime = Arc::new(harness.mount().await);

    let recovering = {
        let runtime = runtime.clone();
        tokio::spawn(async move { runtime.run_recovery().await })
    };
    while !runtime.recovery_state().is_recovering() {
        tokio::task::yield_now().await;
    }

    let auth = runtime.logout().await;
    assert!(!auth.is_authenticated);

    assert_eq!(
        recovering.await.unwrap(),
        RecoveryOutcome::CycleCompleted { attempt: 1 }
    );
    assert!(!runtime.auth_session().is_authenticated);
    assert!(!harness.memory.contains(SESSION_DATA_KEY).await);
    assert!(!harness.memory.contains(MODE_PREFERENCE_KEY).await);

    // Signed out is consistent: nothing left to recover.
    assert_eq!(runtime.run_recovery().await, RecoveryOutcome::Idle);
    assert_eq!(runtime.recovery_state().phase, RecoveryPhase::Idle);
}

#[tokio::test(start_paused = true)]
async fn settled_session_needs_no_recovery() {
    let harness = Harness::new(signed_in_store(), RecoveryPolicy::default());
    let runtime = harness.mount().await;

    assert_eq!(runtime.route(), Route::CitySelection);
    assert_eq!(runtime.drive_recovery().await, RecoveryOutcome::Idle);
    assert_eq!(harness.store.session_reads(), 1);
}

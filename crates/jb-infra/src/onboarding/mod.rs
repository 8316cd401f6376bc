mod stored_signals;

pub use stored_signals::StoredOnboardingSignalSource;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("read `{key}` failed: {reason}")]
    Read { key: String, reason: String },

    #[error("write `{key}` failed: {reason}")]
    Write { key: String, reason: String },

    #[error("remove {keys:?} failed: {reason}")]
    Remove { keys: Vec<String>, reason: String },

    #[error("stored value under `{key}` is malformed: {reason}")]
    Parse { key: String, reason: String },
}

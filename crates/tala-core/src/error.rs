#[derive(Debug, thiserror::Error)]
pub enum OrchestratorError {
    #[error("translation orchestrator has stopped")]
    Closed,
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("settings storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("settings record is malformed: {0}")]
    Serde(#[from] serde_json::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("no shortcut with id `{0}`")]
    UnknownShortcut(String),
}

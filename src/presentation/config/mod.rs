mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    DatabaseSettings, LoggingSettings, RetrySettings, ServerSettings, Settings, SettingsError,
    StorageSettings, TranscriptionProviderSetting, TranscriptionSettings,
};

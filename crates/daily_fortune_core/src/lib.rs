pub mod catalog;
pub mod domain;
pub mod ports;
pub mod store;

pub use catalog::FortuneCatalog;
pub use domain::{
    BackupMetadata, DailyFortune, FortuneRecord, FortuneStats, HistoryEntry, UserState,
    BACKUP_FORMAT_VERSION,
};
pub use ports::{
    BackupOutcome, BackupStore, Clock, PortError, PortResult, StoredBackup, UserStateRepository,
};
pub use store::{FortuneError, FortuneHistoryStore, FortuneResult};

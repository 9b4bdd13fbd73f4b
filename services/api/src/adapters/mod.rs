pub mod backup;
pub mod catalog;
pub mod clock;
pub mod device;
pub mod json_file;
pub mod state_file;

pub use backup::DirectoryBackupStore;
pub use catalog::JsonCatalogLoader;
pub use clock::SystemClock;
pub use device::device_id;
pub use state_file::JsonStateFile;

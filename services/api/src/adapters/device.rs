//! services/api/src/adapters/device.rs
//!
//! Derives a stable, non-unique device identifier from host information.

use fnv::FnvHasher;
use std::hash::Hasher;

/// 16 lowercase hex characters derived from the OS, device name and CPU architecture.
pub fn device_id() -> String {
    let system_info = format!(
        "{}-{}-{}",
        std::env::consts::OS,
        whoami::devicename(),
        std::env::consts::ARCH
    );
    hash_system_info(&system_info)
}

fn hash_system_info(system_info: &str) -> String {
    let mut hasher = FnvHasher::default();
    hasher.write(system_info.as_bytes());
    format!("{:016x}", hasher.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn device_id_is_stable_hex() {
        let id = device_id();
        assert_eq!(id.len(), 16);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        assert_eq!(id, device_id());
    }

    #[test]
    fn hash_is_fnv1a_and_zero_padded() {
        assert_eq!(hash_system_info(""), "cbf29ce484222325");
        assert_ne!(hash_system_info("linux-a-x86_64"), hash_system_info("linux-b-x86_64"));
    }
}

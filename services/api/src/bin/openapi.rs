//! services/api/src/bin/openapi.rs
//!
//! Writes the OpenAPI document for the fortune API.
//!
//! ```text
//! openapi              # ./openapi.json
//! openapi PATH         # any other target file
//! ```

use api_lib::{error::ApiError, web::write_openapi};
use std::path::PathBuf;

fn main() -> Result<(), ApiError> {
    let path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("openapi.json"));
    write_openapi(&path)?;
    println!("✅ OpenAPI document written to {}", path.display());
    Ok(())
}

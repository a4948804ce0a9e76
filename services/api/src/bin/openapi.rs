//! services/api/src/bin/openapi.rs
//!
//! Writes the OpenAPI document of the purchase API to disk.
//! Usage: `openapi [OUTPUT]`, where OUTPUT defaults to `openapi.json`.

use purchase_api_lib::web::rest::ApiDoc;
use std::path::{Path, PathBuf};
use utoipa::OpenApi;

const DEFAULT_OUTPUT: &str = "openapi.json";

fn write_openapi(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let document = ApiDoc::openapi().to_pretty_json()?;
    std::fs::write(path, document)?;
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let output = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));

    write_openapi(&output)?;
    println!("OpenAPI document written to {}", output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_a_document_listing_the_order_routes() {
        let path = std::env::temp_dir()
            .join(format!("purchase-openapi-{}.json", std::process::id()));

        write_openapi(&path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();

        let json: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert!(json["paths"]["/orders"]["post"].is_object());
        assert!(json["paths"]["/orders/state"]["get"].is_object());
        assert!(json["paths"]["/orders/acknowledgment/dismiss"]["post"].is_object());
    }
}

//! Catalog fetching
//!
//! The directory and home pages read the same static JSON document.

use contracts::domain::a001_resource_catalog::{Catalog, LoadError};
use gloo_net::http::Request;

/// Default location of the catalog document.
pub const DEFAULT_CATALOG_URL: &str = "/data/resource-categories.json";

/// Fetch, validate and calibrate the catalog at `url`.
///
/// One GET per call; the caller owns retry.
pub async fn fetch_catalog(url: &str) -> Result<Catalog, LoadError> {
    log::debug!("Loading resource catalog: {}", url);

    let response = Request::get(url)
        .header("Cache-Control", "no-cache")
        .send()
        .await
        .map_err(LoadError::network)?;

    let status = response.status();
    let ok = response.ok();
    let status_text = response.status_text();
    let body = if ok {
        response.text().await.map_err(LoadError::network)?
    } else {
        String::new()
    };
    let catalog = catalog_from_response(status, ok, &status_text, &body)?;

    log::info!(
        "Resource catalog loaded: {} categories, {} resources",
        catalog.categories().len(),
        catalog.total_resources()
    );
    Ok(catalog)
}

/// Map a finished response to the catalog: non-2xx is `Http`, a body
/// without the expected shape is `Schema`.
pub fn catalog_from_response(
    status: u16,
    ok: bool,
    status_text: &str,
    body: &str,
) -> Result<Catalog, LoadError> {
    if !ok {
        return Err(LoadError::http(status, status_text));
    }
    Catalog::from_json(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_error_is_http_error() {
        let err = catalog_from_response(500, false, "Internal Server Error", "").unwrap_err();
        assert_eq!(
            err,
            LoadError::Http {
                status: 500,
                cause: "Internal Server Error".into()
            }
        );
    }

    #[test]
    fn test_non_json_body_is_schema_error() {
        let err = catalog_from_response(200, true, "OK", "<html>维护中</html>").unwrap_err();
        assert!(matches!(err, LoadError::Schema { .. }));
    }

    #[test]
    fn test_valid_body_loads() {
        let catalog = catalog_from_response(
            200,
            true,
            "OK",
            r#"{"categories": [{"id": "toolbox", "resources": [{"name": "JSON Formatter"}]}]}"#,
        )
        .unwrap();
        assert_eq!(catalog.total_resources(), 1);
        assert!(catalog.contains("toolbox"));
    }
}

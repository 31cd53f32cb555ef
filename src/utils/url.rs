//! URL utilities for consistent URL handling

use url::Url;

/// URL utilities for consistent URL handling
pub struct UrlUtils;

impl UrlUtils {
    /// Parse a URL and make sure it can be fetched over HTTP(S)
    pub fn parse_http(url: &str) -> Result<Url, String> {
        let parsed = Url::parse(url.trim()).map_err(|e| format!("Invalid URL '{url}': {e}"))?;
        match parsed.scheme() {
            "http" | "https" => Ok(parsed),
            scheme => Err(format!("Unsupported URL scheme '{scheme}' in '{url}'")),
        }
    }

    /// Obfuscate credentials in URLs before they reach the logs
    pub fn obfuscate_credentials(url: &str) -> String {
        match Url::parse(url) {
            Ok(mut parsed) if !parsed.username().is_empty() || parsed.password().is_some() => {
                let _ = parsed.set_username("***");
                let _ = parsed.set_password(Some("***"));
                parsed.to_string()
            }
            _ => url.to_string(),
        }
    }
}

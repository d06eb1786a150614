//! Page metadata readers.
//!
//! The server renders per-page configuration as `<meta>` tags; the hydrating
//! client reads them back here. Requires a browser environment; on the
//! server these always return `None`.

/// Read the `content` attribute of the named `<meta>` tag.
pub fn read(name: &str) -> Option<String> {
    #[cfg(feature = "hydrate")]
    {
        let selector = format!("meta[name='{name}']");
        web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.query_selector(&selector).ok().flatten())
            .and_then(|el| el.get_attribute("content"))
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = name;
        None
    }
}

/// CSRF token for the live channel handshake.
pub fn csrf_token() -> Option<String> {
    read("csrf-token")
}

/// Publishable payment credential for this deployment.
pub fn payment_key() -> Option<String> {
    read("payment-key")
}

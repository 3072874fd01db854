use std::io::Read;

use rp_core::error::CoreError;

use crate::image::{SourceImage, decode_bytes};

/// Marqueurs de schéma qui font traiter l'entrée comme une URL.
pub const URL_MARKERS: &[&str] = &["https://", "http://"];

/// `true` if the input contains an HTTP(S) scheme marker.
///
/// # Example
/// ```
/// use rp_source::fetch::is_url;
/// assert!(is_url("https://example.org/cat.gif"));
/// assert!(!is_url("/home/me/cat.gif"));
/// ```
#[must_use]
pub fn is_url(input: &str) -> bool {
    URL_MARKERS.iter().any(|m| input.contains(m))
}

/// GET bloquant, corps entier en mémoire. Pas de timeout, pas de retry.
///
/// # Errors
/// Returns [`CoreError::Network`] on transport failure or an error status.
pub fn fetch_bytes(url: &str) -> Result<Vec<u8>, CoreError> {
    let network_error = |reason: String| CoreError::Network {
        url: url.to_string(),
        reason,
    };
    log::info!("Téléchargement de {url}");
    let resp = ureq::get(url)
        .call()
        .map_err(|e| network_error(e.to_string()))?;
    let mut bytes = Vec::new();
    resp.into_body()
        .into_reader()
        .read_to_end(&mut bytes)
        .map_err(|e| network_error(e.to_string()))?;
    log::debug!("{url} : {} octets reçus", bytes.len());
    Ok(bytes)
}

/// Fetch then decode.
///
/// # Errors
/// Returns [`CoreError::Network`] if the fetch fails or the body does not decode.
pub fn fetch_image(url: &str) -> Result<SourceImage, CoreError> {
    let bytes = fetch_bytes(url)?;
    decode_fetched(&bytes, url)
}

/// Décode un corps HTTP déjà reçu. Des octets qui ne sont pas une image
/// sont une erreur réseau : le serveur n'a pas renvoyé d'image.
///
/// # Errors
/// Returns [`CoreError::Network`] if `bytes` is not a supported image.
pub fn decode_fetched(bytes: &[u8], url: &str) -> Result<SourceImage, CoreError> {
    decode_bytes(bytes, url).map_err(|e| CoreError::Network {
        url: url.to_string(),
        reason: e.to_string(),
    })
}

use thiserror::Error;

/// Errors originating from the rendering pipeline.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Invalid configuration value or structure.
    #[error("Configuration invalide : {0}")]
    Config(String),

    /// Bytes could not be decoded as a supported image.
    #[error("Impossible de décoder {source_name} : {reason}")]
    Decode {
        /// Path or URL the bytes came from.
        source_name: String,
        /// Decoder message.
        reason: String,
    },

    /// Fetching a remote image failed.
    #[error("Échec du téléchargement de {url} : {reason}")]
    Network {
        /// Requested URL.
        url: String,
        /// Transport or status message.
        reason: String,
    },

    /// Flattening transparent pixels failed. Recovered by the caller.
    #[error("Conversion RGBA impossible : {0}")]
    Transparency(String),

    /// Invalid width/height dimensions.
    #[error("Dimensions invalides : {width}×{height}")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },

    /// Filesystem error on input or output.
    #[error("Erreur d'E/S sur {path} : {source}")]
    Io {
        /// Path involved.
        path: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

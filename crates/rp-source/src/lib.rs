/// Image sources for rampart: decoding, remote fetch, transparency and resize.

pub mod image;
pub mod resize;
pub mod transparency;

#[cfg(feature = "url-source")]
pub mod fetch;

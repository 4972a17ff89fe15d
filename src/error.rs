//! Crate-level error types.

use std::fmt;

/// Errors produced by the shade-gallery crate.
///
/// Frame-time operations (camera, culling, navigation, blur) never fail;
/// only construction-time inputs are fallible.
#[derive(Debug)]
pub enum GalleryError {
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Height map with unusable dimensions or sample count.
    HeightMap(String),
    /// Vertex data whose layout cannot hold a position.
    VertexLayout {
        /// Bytes per vertex as declared by the caller.
        stride: usize,
        /// Length of the supplied byte buffer.
        len: usize,
    },
}

impl fmt::Display for GalleryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::HeightMap(msg) => write!(f, "height map error: {msg}"),
            Self::VertexLayout { stride, len } => write!(
                f,
                "invalid vertex layout: stride {stride} with {len} bytes"
            ),
        }
    }
}

impl std::error::Error for GalleryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for GalleryError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;

    #[test]
    fn io_errors_expose_source() {
        let err = GalleryError::from(std::io::Error::other("disk gone"));
        assert!(err.source().is_some());
        assert!(err.to_string().contains("disk gone"));
    }

    #[test]
    fn vertex_layout_message_names_stride() {
        let err = GalleryError::VertexLayout { stride: 8, len: 16 };
        assert_eq!(
            err.to_string(),
            "invalid vertex layout: stride 8 with 16 bytes"
        );
        assert!(err.source().is_none());
    }
}

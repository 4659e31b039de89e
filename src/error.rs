use std::path::PathBuf;

/// Everything that can abort a conversion. None of these are recovered from:
/// a conversion either produces a complete document or nothing.
#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    #[error("could not open file: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("{} is not UTF-8 encoded; re-save the document as UTF-8", path.display())]
    Encoding { path: PathBuf },

    #[error("Malformed XML: {0}")]
    Parse(#[from] roxmltree::Error),

    #[error("<{tag}> is missing required attribute '{attribute}'")]
    MissingAttribute { tag: String, attribute: String },

    #[error("<{tag}> attribute '{attribute}' has invalid value '{value}': expected a positive integer")]
    InvalidFormat {
        tag: String,
        attribute: String,
        value: String,
    },

    #[error("Cannot align an empty {what} list")]
    EmptyList { what: &'static str },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ConversionError {
    pub fn missing_attribute(tag: &str, attribute: &str) -> Self {
        ConversionError::MissingAttribute {
            tag: tag.to_string(),
            attribute: attribute.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ConversionError>;

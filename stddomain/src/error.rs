use stddomain_codec::CodecError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// Byte input that isn't UTF-8.
    #[error("domain is not valid UTF-8: {0}")]
    InvalidInput(#[from] std::str::Utf8Error),

    /// A label the codec refused to convert.
    #[error(transparent)]
    Encoding(#[from] CodecError),
}

#[derive(thiserror::Error, Debug)]
pub enum OpenError {
    #[error("source does not advertise a {0} property")]
    MissingProperty(&'static str),

    #[error("{0} must be a positive integer")]
    ZeroProperty(&'static str),

    #[error("bits_per_sample must be one of 8, 16, 24 or 32, got {0}")]
    UnsupportedBitDepth(u32),
}

/// I/O failure reported by the source backend during read or close.
#[derive(thiserror::Error, Debug)]
#[error("source I/O failure: {0}")]
pub struct SourceError(#[from] pub std::io::Error);

#[derive(thiserror::Error, Debug)]
pub enum FormatError {
    #[error("buffer of {len} bytes is not a whole number of {bytes_per_sample}-byte samples")]
    MisalignedSamples { len: usize, bytes_per_sample: usize },

    #[error("source returned {len} bytes, not a whole number of {bytes_per_frame}-byte frames")]
    MisalignedFrames { len: usize, bytes_per_frame: usize },

    #[error("unsupported bit depth {0} for sample conversion")]
    UnsupportedBitDepth(u32),
}

#[derive(thiserror::Error, Debug)]
pub enum ReadError {
    #[error("source read failed: {0}")]
    Source(#[from] SourceError),

    #[error("malformed sample data: {0}")]
    Format(#[from] FormatError),
}

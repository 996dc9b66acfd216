//! Stream format description and discovery.

use std::fmt;

use crate::process::source::DescribedSource;
use crate::utils::errors::OpenError;

/// Bit depths the codec and reader accept.
pub const SUPPORTED_BIT_DEPTHS: [u32; 4] = [8, 16, 24, 32];

/// Immutable description of a PCM stream, fixed at open time.
///
/// Raw byte streams carry no self-describing metadata, so the caller
/// supplies this struct alongside the stream. Managed sources advertise
/// their parameters instead and are described via [`StreamFormat::discover`],
/// which always yields signed little-endian since such backends hand over
/// canonical bytes; `big_endian` and `is_signed` are only meaningful for the
/// raw-stream backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamFormat {
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Number of interleaved channels per frame.
    pub channel_count: usize,
    /// Width of a single sample. Must be one of [`SUPPORTED_BIT_DEPTHS`].
    pub bits_per_sample: u32,
    /// Samples are stored most significant byte first.
    pub big_endian: bool,
    /// Samples are two's-complement; unsigned samples are re-biased on decode.
    pub is_signed: bool,
}

impl StreamFormat {
    /// Creates a signed little-endian format, the common case for raw streams.
    pub fn new(sample_rate: u32, channel_count: usize, bits_per_sample: u32) -> Self {
        Self {
            sample_rate,
            channel_count,
            bits_per_sample,
            big_endian: false,
            is_signed: true,
        }
    }

    /// Queries a managed source for its advertised format.
    ///
    /// Every property must be present and positive, and the bit depth
    /// supported, or the open fails.
    pub fn discover<S: DescribedSource>(source: &S) -> Result<Self, OpenError> {
        let sample_rate = require(source.sample_rate(), "sample_rate")?;
        let channels = require(source.channels(), "channels")?;
        let bits_per_sample = require(source.bits_per_sample(), "bits_per_sample")?;

        let format = Self {
            sample_rate,
            channel_count: channels as usize,
            bits_per_sample,
            big_endian: false,
            is_signed: true,
        };
        format.validate()?;

        Ok(format)
    }

    pub fn validate(&self) -> Result<(), OpenError> {
        if self.sample_rate == 0 {
            return Err(OpenError::ZeroProperty("sample_rate"));
        }
        if self.channel_count == 0 {
            return Err(OpenError::ZeroProperty("channels"));
        }
        if !SUPPORTED_BIT_DEPTHS.contains(&self.bits_per_sample) {
            return Err(OpenError::UnsupportedBitDepth(self.bits_per_sample));
        }
        Ok(())
    }

    pub fn bytes_per_sample(&self) -> usize {
        (self.bits_per_sample / 8) as usize
    }

    /// Byte width of one frame, i.e. one sample per channel.
    pub fn bytes_per_frame(&self) -> usize {
        self.bytes_per_sample() * self.channel_count
    }

    /// Exact byte count covering `frames` whole frames.
    pub fn byte_count(&self, frames: usize) -> usize {
        frames * self.bytes_per_frame()
    }
}

impl fmt::Display for StreamFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} Hz, {} ch, {}-bit {} {}",
            self.sample_rate,
            self.channel_count,
            self.bits_per_sample,
            if self.big_endian { "BE" } else { "LE" },
            if self.is_signed { "signed" } else { "unsigned" },
        )
    }
}

fn require(value: Option<u32>, property: &'static str) -> Result<u32, OpenError> {
    match value {
        None => Err(OpenError::MissingProperty(property)),
        Some(0) => Err(OpenError::ZeroProperty(property)),
        Some(value) => Ok(value),
    }
}

#[test]
fn validate_rejects_bad_formats() {
    assert!(StreamFormat::new(44_100, 2, 16).validate().is_ok());

    let zero_rate = StreamFormat::new(0, 2, 16);
    assert!(matches!(
        zero_rate.validate(),
        Err(OpenError::ZeroProperty("sample_rate"))
    ));

    let zero_channels = StreamFormat::new(44_100, 0, 16);
    assert!(matches!(
        zero_channels.validate(),
        Err(OpenError::ZeroProperty("channels"))
    ));

    let odd_depth = StreamFormat::new(44_100, 2, 12);
    assert!(matches!(
        odd_depth.validate(),
        Err(OpenError::UnsupportedBitDepth(12))
    ));
}

#[test]
fn frame_geometry() {
    let format = StreamFormat::new(48_000, 6, 24);
    assert_eq!(format.bytes_per_sample(), 3);
    assert_eq!(format.bytes_per_frame(), 18);
    assert_eq!(format.byte_count(40), 720);
    assert_eq!(format.to_string(), "48000 Hz, 6 ch, 24-bit LE signed");
}

//! Source capability contract and backend adapters.
//!
//! A reader pulls bytes through the [`Source`] trait and never sees the
//! backend behind it. Two backends are supported: managed sources that can
//! describe their own stream parameters ([`DescribedSource`]), and plain
//! byte streams wrapped in [`RawSource`] with a caller-supplied format.

use std::io;
use std::io::Read;

use crate::utils::errors::SourceError;

/// Capability contract every PCM byte source must satisfy.
///
/// A source has single-owner semantics: once handed to a reader it must not
/// be used elsewhere until the reader's close releases it.
pub trait Source {
    /// Reads up to `byte_count` bytes from the source.
    ///
    /// Returning fewer bytes than requested signals end-of-stream and is not
    /// a failure on its own; a zero-length result means the stream is
    /// exhausted. Fails only on genuine I/O failure.
    fn read(&mut self, byte_count: usize) -> Result<Vec<u8>, SourceError>;

    /// Releases the underlying backend.
    fn close(&mut self) -> Result<(), SourceError>;
}

/// A source that advertises its own stream parameters.
///
/// Managed backends (decoders, capture handles) implement this on top of
/// [`Source`] and are opened with
/// [`PcmReader::open`](crate::process::reader::PcmReader::open), which
/// validates every advertised property. A missing property (`None`) fails
/// the open. Data handed over by a managed source is always canonical
/// signed little-endian.
pub trait DescribedSource: Source {
    /// Sample rate in Hz.
    fn sample_rate(&self) -> Option<u32>;

    /// Number of interleaved channels.
    fn channels(&self) -> Option<u32>;

    /// Width of a single sample in bits.
    fn bits_per_sample(&self) -> Option<u32>;
}

/// Raw-stream backend over any [`Read`] implementation.
///
/// Plain byte streams carry no self-describing metadata, so readers over
/// this adapter take an explicit
/// [`StreamFormat`](crate::structs::format::StreamFormat).
#[derive(Debug)]
pub struct RawSource<R: Read> {
    reader: R,
}

impl<R: Read> RawSource<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Consumes the adapter and hands back the inner reader.
    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: Read> Source for RawSource<R> {
    /// Fills the requested count from the inner reader, looping over short
    /// reads until the stream runs dry.
    fn read(&mut self, byte_count: usize) -> Result<Vec<u8>, SourceError> {
        let mut buffer = vec![0u8; byte_count];
        let mut filled = 0;

        while filled < byte_count {
            match self.reader.read(&mut buffer[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(SourceError::from(e)),
            }
        }

        buffer.truncate(filled);
        Ok(buffer)
    }

    /// Plain streams are released when the inner reader drops.
    fn close(&mut self) -> Result<(), SourceError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Hands out one byte per read call.
    struct TrickleReader {
        data: Vec<u8>,
        position: usize,
    }

    impl Read for TrickleReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.position == self.data.len() || buf.is_empty() {
                return Ok(0);
            }
            buf[0] = self.data[self.position];
            self.position += 1;
            Ok(1)
        }
    }

    #[test]
    fn fills_request_across_short_reads() -> anyhow::Result<()> {
        let mut source = RawSource::new(TrickleReader {
            data: vec![1, 2, 3, 4, 5],
            position: 0,
        });

        assert_eq!(source.read(4)?, [1, 2, 3, 4]);
        // Stream runs dry mid-request.
        assert_eq!(source.read(4)?, [5]);
        assert!(source.read(4)?.is_empty());
        Ok(())
    }
}

//! PCM frame reading over an arbitrary byte source.

use log::{debug, warn};

use crate::process::codec;
use crate::process::source::{DescribedSource, Source};
use crate::structs::channels::ChannelBuffers;
use crate::structs::format::StreamFormat;
use crate::utils::callbacks::CallbackRegistry;
use crate::utils::errors::{FormatError, OpenError, ReadError, SourceError};

/// Pulls PCM frames from a byte source and fans the chunk bytes out to
/// registered observers.
///
/// Every successful [`read`](PcmReader::read) runs a fixed pipeline: request
/// the exact byte count from the source, decode into canonical signed
/// 32-bit samples, deinterleave into the caller's per-channel buffers,
/// re-encode as signed little-endian and dispatch that normalized buffer to
/// every registered callback, most recently registered first.
///
/// The reader owns its source exclusively. [`close`](PcmReader::close)
/// consumes the reader, so reading after close or closing twice is a
/// compile error rather than a runtime contract.
///
/// Reads are synchronous and blocking; callbacks run on the caller's stack.
/// A reader holds no internal lock, so concurrent use from multiple threads
/// requires external synchronization.
///
/// # Example
///
/// ```rust
/// use std::io::Cursor;
///
/// use pcmread::process::reader::PcmReader;
/// use pcmread::process::source::RawSource;
/// use pcmread::structs::channels::ChannelBuffers;
/// use pcmread::structs::format::StreamFormat;
///
/// let pcm = [0x01u8, 0x00, 0xFF, 0xFF]; // one stereo 16-bit frame
/// let format = StreamFormat::new(44_100, 2, 16);
/// let mut reader = PcmReader::with_format(RawSource::new(Cursor::new(pcm)), format)?;
///
/// let mut channels = ChannelBuffers::new(2);
/// let frames = reader.read(1, &mut channels)?;
/// assert_eq!(frames, 1);
/// assert_eq!(channels.channel(0), [1]);
/// assert_eq!(channels.channel(1), [-1]);
///
/// reader.close()?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct PcmReader<S: Source> {
    format: StreamFormat,
    source: S,
    callbacks: CallbackRegistry,
}

impl<S: DescribedSource> PcmReader<S> {
    /// Opens a reader over a managed source, discovering its format.
    ///
    /// Fails when the source leaves a property unadvertised, reports a
    /// non-positive value, or uses an unsupported bit depth.
    pub fn open(source: S) -> Result<Self, OpenError> {
        let format = StreamFormat::discover(&source)?;
        debug!("opened reader over described source: {format}");

        Ok(Self {
            format,
            source,
            callbacks: CallbackRegistry::new(),
        })
    }
}

impl<S: Source> PcmReader<S> {
    /// Opens a reader over a raw byte stream with a caller-supplied format.
    pub fn with_format(source: S, format: StreamFormat) -> Result<Self, OpenError> {
        format.validate()?;
        debug!("opened reader over raw stream: {format}");

        Ok(Self {
            format,
            source,
            callbacks: CallbackRegistry::new(),
        })
    }

    pub fn format(&self) -> &StreamFormat {
        &self.format
    }

    /// Registers an observer of the normalized byte form of every chunk.
    ///
    /// Handlers run synchronously on each successful read, most recently
    /// registered first. Any context the handler needs lives in its capture.
    pub fn add_callback<F>(&mut self, handler: F)
    where
        F: FnMut(&[u8]) + 'static,
    {
        self.callbacks.register(handler);
    }

    /// Reads up to `frame_count` frames into `channels` and returns the
    /// number of frames actually read.
    ///
    /// A short return from the source truncates the effective frame count;
    /// zero means end-of-stream. Requesting zero frames resets `channels`
    /// empty without touching the source or the callbacks.
    ///
    /// On failure `channels` is left untouched, never partially populated.
    pub fn read(
        &mut self,
        frame_count: usize,
        channels: &mut ChannelBuffers,
    ) -> Result<usize, ReadError> {
        let channel_count = self.format.channel_count;
        if frame_count == 0 {
            channels.reset(channel_count);
            return Ok(0);
        }

        let byte_count = self.format.byte_count(frame_count);
        let raw = self.source.read(byte_count)?;

        let bytes_per_frame = self.format.bytes_per_frame();
        if raw.len() % bytes_per_frame != 0 {
            return Err(FormatError::MisalignedFrames {
                len: raw.len(),
                bytes_per_frame,
            }
            .into());
        }

        let frames_read = raw.len() / bytes_per_frame;
        if frames_read < frame_count {
            debug!("end of stream, read {frames_read} of {frame_count} requested frames");
        }

        let samples = codec::decode_samples(
            &raw,
            self.format.bits_per_sample,
            self.format.big_endian,
            self.format.is_signed,
        )?;

        channels.reset(channel_count);
        for frame in samples.chunks_exact(channel_count) {
            for (channel, &sample) in frame.iter().enumerate() {
                channels.append(channel, sample);
            }
        }

        let normalized = codec::encode_samples(&samples, self.format.bits_per_sample);
        self.callbacks.dispatch(&normalized);

        Ok(frames_read)
    }

    /// Closes the source and releases the reader.
    ///
    /// Teardown always completes: the callback chain is freed and the
    /// reader dropped even when the source's close fails, and that failure
    /// is propagated to the caller.
    pub fn close(mut self) -> Result<(), SourceError> {
        let result = self.source.close();
        if let Err(err) = &result {
            warn!("source close failed: {err}");
        }
        self.callbacks.clear();

        result
    }
}

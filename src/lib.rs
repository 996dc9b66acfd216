#![doc = include_str!("../README.md")]
//!
//! ## Technical Overview
//!
//! Every read follows one fixed pipeline, whichever backend feeds it:
//!
//! 1. The reader asks the source for the exact byte count covering the
//!    requested frames. A short return truncates the effective frame count;
//!    zero bytes means end-of-stream.
//! 2. The sample codec decodes those bytes into canonical samples: signed
//!    integers sign-extended into 32 bits, whatever the source depth,
//!    endianness or signedness.
//! 3. The samples are deinterleaved into the caller's per-channel buffers,
//!    channel 0 first within each frame.
//! 4. The canonical samples are re-encoded as signed little-endian and that
//!    normalized buffer is dispatched to every registered callback, so
//!    observers never need to know the original encoding.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::io::Cursor;
//!
//! use pcmread::process::reader::PcmReader;
//! use pcmread::process::source::RawSource;
//! use pcmread::structs::channels::ChannelBuffers;
//! use pcmread::structs::format::StreamFormat;
//!
//! // Two stereo 16-bit frames of little-endian signed PCM.
//! let pcm = [0x01u8, 0x00, 0xFF, 0xFF, 0x02, 0x00, 0xFE, 0xFF];
//! let format = StreamFormat::new(44_100, 2, 16);
//! let mut reader = PcmReader::with_format(RawSource::new(Cursor::new(pcm)), format)?;
//!
//! // Observe the byte stream, e.g. to accumulate a checksum.
//! reader.add_callback(|chunk| println!("chunk of {} bytes", chunk.len()));
//!
//! let mut channels = ChannelBuffers::new(2);
//! while reader.read(4096, &mut channels)? > 0 {
//!     assert_eq!(channels.channel(0).len(), channels.channel(1).len());
//! }
//!
//! reader.close()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

/// PCM frame processing.
///
/// 1. **Source adapters** ([`process::source`]): the backend boundary
///    isolating managed sources from raw byte streams.
/// 2. **Sample codec** ([`process::codec`]): conversion between packed
///    sample bytes and canonical signed 32-bit samples.
/// 3. **Frame reading** ([`process::reader`]): the per-read pipeline of
///    acquisition, normalization, deinterleaving and fan-out.
pub mod process;

/// Data structures describing PCM streams.
///
/// - **Stream format** ([`structs::format`]): immutable parameters fixed at
///   open time, with validation and discovery.
/// - **Channel buffers** ([`structs::channels`]): caller-owned per-channel
///   sample storage repopulated on every read.
pub mod structs;

/// Utility functions and supporting infrastructure.
///
/// - **Error handling** ([`utils::errors`]): error types per pipeline stage.
/// - **Callback registry** ([`utils::callbacks`]): ordered chunk observer
///   fan-out.
pub mod utils;

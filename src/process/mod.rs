//! PCM frame processing pipeline.

/// Sample format conversion.
///
/// Provides [`decode_samples`](codec::decode_samples) and
/// [`encode_samples`](codec::encode_samples) for moving between packed
/// sample bytes and the canonical signed 32-bit representation.
pub mod codec;

/// Frame acquisition and fan-out.
///
/// Provides the [`PcmReader`](reader::PcmReader) orchestrating source,
/// codec and callback registry on every read.
pub mod reader;

/// Backend boundary.
///
/// Provides the [`Source`](source::Source) capability contract, the
/// self-describing [`DescribedSource`](source::DescribedSource) extension
/// and the [`RawSource`](source::RawSource) byte-stream adapter.
pub mod source;

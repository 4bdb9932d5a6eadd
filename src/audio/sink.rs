//! Building `rodio` sinks from in-memory sources.

use std::io::Cursor;
use std::time::Duration;

use rodio::decoder::DecoderError;
use rodio::{Decoder, OutputStream, Sink, Source};

use super::types::EngineSource;

/// Decode `source` into a paused `Sink`. Also returns the total duration
/// when the container reports one.
pub(super) fn create_sink(
    stream: &OutputStream,
    source: EngineSource,
) -> Result<(Sink, Option<Duration>), DecoderError> {
    let decoder = Decoder::new(Cursor::new(source.bytes))?;
    let total = decoder.total_duration();

    let sink = Sink::connect_new(stream.mixer());
    sink.append(decoder);
    sink.pause();
    Ok((sink, total))
}

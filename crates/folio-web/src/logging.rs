#![forbid(unsafe_code)]

//! `tracing` output routed to a line-oriented sink (the browser console on
//! wasm). Timestamps are disabled: `SystemTime` is unavailable on
//! `wasm32-unknown-unknown`.

use std::io;

use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;

/// Buffers formatted bytes and hands complete lines to `sink`.
pub struct LineSink {
    buf: Vec<u8>,
    sink: fn(&str),
}

impl LineSink {
    #[must_use]
    pub fn new(sink: fn(&str)) -> Self {
        Self {
            buf: Vec::new(),
            sink,
        }
    }

    fn emit_complete_lines(&mut self) {
        while let Some(pos) = self.buf.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = self.buf.drain(..=pos).collect();
            let text = String::from_utf8_lossy(&line[..line.len() - 1]);
            (self.sink)(&text);
        }
    }
}

impl io::Write for LineSink {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(bytes);
        self.emit_complete_lines();
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.emit_complete_lines();
        if !self.buf.is_empty() {
            let rest = std::mem::take(&mut self.buf);
            (self.sink)(&String::from_utf8_lossy(&rest));
        }
        Ok(())
    }
}

impl Drop for LineSink {
    fn drop(&mut self) {
        let _ = io::Write::flush(self);
    }
}

/// `MakeWriter` producing a fresh [`LineSink`] per event.
#[derive(Clone, Copy)]
pub struct SinkWriter(pub fn(&str));

impl<'a> MakeWriter<'a> for SinkWriter {
    type Writer = LineSink;

    fn make_writer(&'a self) -> Self::Writer {
        LineSink::new(self.0)
    }
}

/// Default verbosity: `DEBUG` in debug builds, `INFO` otherwise.
#[must_use]
pub const fn default_level() -> Level {
    if cfg!(debug_assertions) {
        Level::DEBUG
    } else {
        Level::INFO
    }
}

/// Install the global fmt subscriber. Returns `false` if one was already set.
pub fn install(sink: fn(&str), level: Level) -> bool {
    tracing_subscriber::fmt()
        .with_writer(SinkWriter(sink))
        .with_max_level(level)
        .without_time()
        .with_target(true)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::io::Write as _;

    thread_local! {
        static LINES: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
    }

    fn collect(line: &str) {
        LINES.with(|l| l.borrow_mut().push(line.to_owned()));
    }

    fn drain() -> Vec<String> {
        LINES.with(|l| std::mem::take(&mut *l.borrow_mut()))
    }

    #[test]
    fn splits_on_newlines_and_flushes_tail_on_drop() {
        drain();
        {
            let mut sink = LineSink::new(collect);
            sink.write_all(b"first\nsec").unwrap();
            sink.write_all(b"ond\ntail").unwrap();
            assert_eq!(drain(), vec!["first", "second"]);
        }
        assert_eq!(drain(), vec!["tail"]);
    }

    #[test]
    fn fmt_subscriber_writes_through_sink() {
        drain();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(SinkWriter(collect))
            .with_max_level(Level::INFO)
            .without_time()
            .finish();
        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(target: "folio.test", "hello console");
            tracing::debug!(target: "folio.test", "filtered out");
        });
        let lines = drain();
        assert_eq!(lines.len(), 1, "{lines:?}");
        assert!(lines[0].contains("hello console"));
        assert!(lines[0].contains("folio.test"));
    }
}

//! Transfer metrics and the reporting stream decorator

use crate::client::BodyStream;
use std::io::Read;
use std::sync::Arc;
use std::time::Duration;

/// Snapshot handed to the metrics callback after each read.
///
/// `total_bytes` is the byte count of the one read that just completed, not a
/// running total. `total_time` is the duration from request dispatch to
/// response-header receipt, measured once at open time; every invocation for
/// a given stream carries the same value. Both quirks are part of the
/// contract.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Metrics {
    /// Bytes returned by this read (0 at end of stream or on a failed read).
    pub total_bytes: u64,
    /// Time until response headers arrived, fixed for the stream's lifetime.
    pub total_time: Duration,
}

/// Per-read callback. Invoked synchronously on the reading thread, so it
/// should return quickly.
pub type MetricsCallback = Arc<dyn Fn(Metrics) + Send + Sync>;

/// Decorator over a response body that reports a [`Metrics`] record to the
/// callback after every read. Reads and closes are delegated unaltered.
pub struct MetricsReader {
    body: Box<dyn BodyStream>,
    callback: Option<MetricsCallback>,
    total_time: Duration,
}

impl MetricsReader {
    pub(crate) fn new(
        body: Box<dyn BodyStream>,
        callback: Option<MetricsCallback>,
        total_time: Duration,
    ) -> Self {
        Self {
            body,
            callback,
            total_time,
        }
    }

    /// Time from request dispatch to response-header receipt.
    #[must_use]
    pub const fn total_time(&self) -> Duration {
        self.total_time
    }
}

impl std::fmt::Debug for MetricsReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetricsReader")
            .field("total_time", &self.total_time)
            .finish_non_exhaustive()
    }
}

impl Read for MetricsReader {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let result = self.body.read(buf);

        if let Some(callback) = &self.callback {
            callback(Metrics {
                total_bytes: result.as_ref().map_or(0, |n| *n as u64),
                total_time: self.total_time,
            });
        }

        result
    }
}

impl BodyStream for MetricsReader {
    fn close(&mut self) -> std::io::Result<()> {
        self.body.close()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::io;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Stream that serves a fixed schedule of reads, then end-of-stream.
    struct ScriptedStream {
        chunks: VecDeque<io::Result<Vec<u8>>>,
        closes: Arc<AtomicUsize>,
        close_result: Option<io::Error>,
    }

    impl ScriptedStream {
        fn new(chunks: Vec<io::Result<Vec<u8>>>) -> Self {
            Self {
                chunks: chunks.into_iter().collect(),
                closes: Arc::new(AtomicUsize::new(0)),
                close_result: None,
            }
        }
    }

    impl Read for ScriptedStream {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            match self.chunks.pop_front() {
                Some(Ok(mut chunk)) => {
                    let n = chunk.len().min(buf.len());
                    buf[..n].copy_from_slice(&chunk[..n]);
                    if n < chunk.len() {
                        self.chunks.push_front(Ok(chunk.split_off(n)));
                    }
                    Ok(n)
                }
                Some(Err(e)) => Err(e),
                None => Ok(0),
            }
        }
    }

    impl BodyStream for ScriptedStream {
        fn close(&mut self) -> io::Result<()> {
            self.closes.fetch_add(1, Ordering::SeqCst);
            match self.close_result.take() {
                Some(e) => Err(e),
                None => Ok(()),
            }
        }
    }

    fn recording_callback() -> (MetricsCallback, Arc<Mutex<Vec<Metrics>>>) {
        let records = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&records);
        let callback: MetricsCallback = Arc::new(move |m| sink.lock().unwrap().push(m));
        (callback, records)
    }

    #[test]
    fn test_callback_fires_per_read_with_fixed_time() {
        let stream = ScriptedStream::new(vec![Ok(vec![1u8; 5]), Ok(vec![2u8; 3])]);
        let (callback, records) = recording_callback();
        let total_time = Duration::from_millis(125);
        let mut reader = MetricsReader::new(Box::new(stream), Some(callback), total_time);

        let mut buf = [0u8; 64];
        assert_eq!(reader.read(&mut buf).unwrap(), 5);
        assert_eq!(reader.read(&mut buf).unwrap(), 3);
        // End of stream still reports.
        assert_eq!(reader.read(&mut buf).unwrap(), 0);

        let records = records.lock().unwrap();
        assert_eq!(
            *records,
            vec![
                Metrics { total_bytes: 5, total_time },
                Metrics { total_bytes: 3, total_time },
                Metrics { total_bytes: 0, total_time },
            ]
        );
    }

    #[test]
    fn test_failed_read_reports_zero_and_passes_error_through() {
        let stream = ScriptedStream::new(vec![Err(io::Error::new(
            io::ErrorKind::ConnectionReset,
            "reset",
        ))]);
        let (callback, records) = recording_callback();
        let mut reader =
            MetricsReader::new(Box::new(stream), Some(callback), Duration::from_millis(1));

        let mut buf = [0u8; 8];
        let err = reader.read(&mut buf).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::ConnectionReset);

        let records = records.lock().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].total_bytes, 0);
    }

    #[test]
    fn test_close_delegates_once_without_reporting() {
        let mut stream = ScriptedStream::new(vec![]);
        stream.close_result = Some(io::Error::other("close failed"));
        let closes = Arc::clone(&stream.closes);
        let (callback, records) = recording_callback();
        let mut reader =
            MetricsReader::new(Box::new(stream), Some(callback), Duration::ZERO);

        let err = reader.close().unwrap_err();
        assert_eq!(err.to_string(), "close failed");
        assert_eq!(closes.load(Ordering::SeqCst), 1);
        assert!(records.lock().unwrap().is_empty());
    }

    #[test]
    fn test_no_callback_is_plain_passthrough() {
        let stream = ScriptedStream::new(vec![Ok(b"hello".to_vec()), Ok(b" world".to_vec())]);
        let mut reader = MetricsReader::new(Box::new(stream), None, Duration::ZERO);

        let mut out = Vec::new();
        reader.read_to_end(&mut out).unwrap();
        assert_eq!(out, b"hello world");
    }
}

use std::{fmt, sync::Arc};

use futures_util::{Stream, StreamExt};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace, warn};

use crate::{
    ExecError,
    logs::{
        frame::{LogRecord, frame_chunk, short_execution_id},
        sink::LogSink,
    },
};

/// Counters for a finished log stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogStreamStats {
    /// Chunks received from the source.
    pub chunks: u64,
    /// Records handed to the sink.
    pub emitted: u64,
    /// Chunks that were blank after framing.
    pub dropped: u64,
    /// Whether the stream stopped because of cancellation.
    pub cancelled: bool,
}

/// Forward a container's output to `sink` until the source ends.
///
/// Each chunk is one logical line: it is decoded, trimmed and stripped of a
/// leading timestamp, then emitted as `[<short id>] <text>`. Blank chunks are
/// dropped. Chunks are never joined or split.
///
/// Returns when the source is exhausted or `cancel` fires. A source error
/// stops the stream and is returned as [`ExecError::LogSource`].
pub async fn stream_container_logs<S, B, E>(
    source: S,
    sink: &dyn LogSink,
    execution_name: &str,
    cancel: &CancellationToken,
) -> Result<LogStreamStats, ExecError>
where
    S: Stream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
    E: fmt::Display,
{
    let execution = short_execution_id(execution_name).to_string();
    let mut stats = LogStreamStats::default();
    tokio::pin!(source);

    trace!(execution = %execution, name = execution_name, "log stream attached");

    loop {
        let next = tokio::select! {
            biased;
            _ = cancel.cancelled() => None,
            next = source.next() => Some(next),
        };

        let Some(next) = next else {
            debug!(execution = %execution, emitted = stats.emitted, "log stream cancelled");
            stats.cancelled = true;
            return Ok(stats);
        };

        match next {
            Some(Ok(chunk)) => {
                stats.chunks += 1;
                match frame_chunk(chunk.as_ref()) {
                    Some(message) => {
                        sink.emit(&LogRecord {
                            execution: execution.clone(),
                            message,
                        });
                        stats.emitted += 1;
                    }
                    None => stats.dropped += 1,
                }
            }
            Some(Err(err)) => {
                warn!(execution = %execution, error = %err, "log source failed");
                return Err(ExecError::LogSource {
                    execution: execution_name.to_string(),
                    reason: err.to_string(),
                });
            }
            None => {
                debug!(
                    execution = %execution,
                    chunks = stats.chunks,
                    emitted = stats.emitted,
                    "log stream ended"
                );
                return Ok(stats);
            }
        }
    }
}

/// Handle to a log stream running on its own task.
#[derive(Debug)]
pub struct LogStreamHandle {
    execution: String,
    cancel: CancellationToken,
    task: JoinHandle<Result<LogStreamStats, ExecError>>,
}

impl LogStreamHandle {
    /// Full execution name the stream was started for.
    pub fn execution(&self) -> &str {
        &self.execution
    }

    /// Stop forwarding; the task finishes with `cancelled = true`.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the stream to drain (or stop) and return its outcome.
    pub async fn join(self) -> Result<LogStreamStats, ExecError> {
        let Self {
            execution, task, ..
        } = self;
        task.await.map_err(|e| ExecError::TaskAborted {
            execution,
            reason: e.to_string(),
        })?
    }
}

/// Run [`stream_container_logs`] for one execution on a dedicated tokio task.
///
/// Streams share no state; start one per execution.
pub fn spawn_log_stream<S, B, E>(
    source: S,
    sink: Arc<dyn LogSink>,
    execution_name: impl Into<String>,
    cancel: CancellationToken,
) -> LogStreamHandle
where
    S: Stream<Item = Result<B, E>> + Send + 'static,
    B: AsRef<[u8]> + Send + 'static,
    E: fmt::Display + Send + 'static,
{
    let execution = execution_name.into();
    let task = {
        let execution = execution.clone();
        let cancel = cancel.clone();
        tokio::spawn(async move {
            stream_container_logs(source, sink.as_ref(), &execution, &cancel).await
        })
    };

    LogStreamHandle {
        execution,
        cancel,
        task,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use futures_util::stream;
    use tokio::sync::mpsc;

    use super::*;

    #[derive(Default)]
    struct RecordingSink(Mutex<Vec<String>>);

    impl RecordingSink {
        fn lines(&self) -> Vec<String> {
            self.0.lock().unwrap().clone()
        }
    }

    impl LogSink for RecordingSink {
        fn emit(&self, record: &LogRecord) {
            self.0.lock().unwrap().push(record.to_string());
        }
    }

    fn chunks(items: &[&str]) -> impl Stream<Item = Result<Vec<u8>, String>> {
        stream::iter(
            items
                .iter()
                .map(|c| Ok(c.as_bytes().to_vec()))
                .collect::<Vec<_>>(),
        )
    }

    #[tokio::test]
    async fn timestamped_line_is_tagged_with_short_id() {
        let sink = RecordingSink::default();
        let cancel = CancellationToken::new();

        let stats = stream_container_logs(
            chunks(&["2024-01-15T10:30:00.123Z   hello world  "]),
            &sink,
            "grp/run-7",
            &cancel,
        )
        .await
        .unwrap();

        assert_eq!(sink.lines(), vec!["[run-7] hello world"]);
        assert_eq!(
            stats,
            LogStreamStats {
                chunks: 1,
                emitted: 1,
                dropped: 0,
                cancelled: false
            }
        );
    }

    #[tokio::test]
    async fn whitespace_chunks_emit_nothing() {
        let sink = RecordingSink::default();
        let cancel = CancellationToken::new();

        let stats =
            stream_container_logs(chunks(&["   ", "\n", "\t \r\n"]), &sink, "run-1", &cancel)
                .await
                .unwrap();

        assert!(sink.lines().is_empty());
        assert_eq!(stats.chunks, 3);
        assert_eq!(stats.dropped, 3);
    }

    #[tokio::test]
    async fn chunks_are_forwarded_in_order_without_reassembly() {
        let sink = RecordingSink::default();
        let cancel = CancellationToken::new();

        stream_container_logs(
            chunks(&["first\n", "partial ", "line\n", "", "last"]),
            &sink,
            "nightly/exec-3",
            &cancel,
        )
        .await
        .unwrap();

        assert_eq!(
            sink.lines(),
            vec![
                "[exec-3] first",
                "[exec-3] partial",
                "[exec-3] line",
                "[exec-3] last"
            ]
        );
    }

    #[tokio::test]
    async fn source_error_stops_stream() {
        let sink = RecordingSink::default();
        let cancel = CancellationToken::new();
        let source = stream::iter(vec![
            Ok(b"before".to_vec()),
            Err("connection reset".to_string()),
            Ok(b"after".to_vec()),
        ]);

        let err = stream_container_logs(source, &sink, "grp/run-9", &cancel)
            .await
            .unwrap_err();

        assert_eq!(sink.lines(), vec!["[run-9] before"]);
        match err {
            ExecError::LogSource { execution, reason } => {
                assert_eq!(execution, "grp/run-9");
                assert_eq!(reason, "connection reset");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn cancelled_token_stops_pending_stream() {
        let sink = RecordingSink::default();
        let cancel = CancellationToken::new();
        cancel.cancel();

        let stats = stream_container_logs(
            stream::pending::<Result<Vec<u8>, String>>(),
            &sink,
            "run-1",
            &cancel,
        )
        .await
        .unwrap();

        assert!(stats.cancelled);
        assert_eq!(stats.chunks, 0);
    }

    #[tokio::test]
    async fn spawned_stream_drains_until_source_closes() {
        let sink = Arc::new(RecordingSink::default());
        let (tx, rx) = mpsc::unbounded_channel::<Result<Vec<u8>, String>>();
        let source = stream::unfold(rx, |mut rx| async move {
            rx.recv().await.map(|item| (item, rx))
        });

        let handle = spawn_log_stream(
            source,
            sink.clone() as Arc<dyn LogSink>,
            "batch/run-11",
            CancellationToken::new(),
        );
        assert_eq!(handle.execution(), "batch/run-11");

        tx.send(Ok(b"2024-06-01T00:00:00.5Z starting".to_vec())).unwrap();
        tx.send(Ok(b"done".to_vec())).unwrap();
        drop(tx);

        let stats = handle.join().await.unwrap();
        assert_eq!(stats.emitted, 2);
        assert_eq!(sink.lines(), vec!["[run-11] starting", "[run-11] done"]);
    }

    #[tokio::test]
    async fn spawned_stream_can_be_cancelled() {
        let sink = Arc::new(RecordingSink::default());
        let handle = spawn_log_stream(
            stream::pending::<Result<Vec<u8>, String>>(),
            sink as Arc<dyn LogSink>,
            "run-5",
            CancellationToken::new(),
        );

        handle.cancel();
        let stats = handle.join().await.unwrap();
        assert!(stats.cancelled);
    }
}

// SPDX-License-Identifier: MIT OR Apache-2.0
//! Continuous draining of one child output pipe into memory.

use subproc_core::{Encoding, StreamKind, SubprocessError, decode};
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Size of each read from the pipe.
const CHUNK_SIZE: usize = 8 * 1024;

/// A live collector: a background task appending everything read from one
/// pipe end to a buffer it owns exclusively.
///
/// The buffer only becomes visible through [`finish`](Self::finish), after
/// the pipe has reported end-of-stream.
#[derive(Debug)]
pub struct StreamCollector {
    kind: StreamKind,
    task: JoinHandle<Vec<u8>>,
}

impl StreamCollector {
    /// Start draining `reader` on a new task. Must be called from within a
    /// tokio runtime.
    pub fn attach<R>(kind: StreamKind, reader: R) -> Self
    where
        R: AsyncRead + Unpin + Send + 'static,
    {
        Self {
            kind,
            task: tokio::spawn(drain(kind, reader)),
        }
    }

    /// Which stream this collector drains.
    pub fn kind(&self) -> StreamKind {
        self.kind
    }

    /// Wait for end-of-stream and take the frozen buffer.
    pub async fn finish(self) -> CapturedStream {
        let bytes = match self.task.await {
            Ok(bytes) => bytes,
            Err(err) if err.is_panic() => std::panic::resume_unwind(err.into_panic()),
            Err(err) => {
                warn!(target: "subproc.collector", stream = %self.kind, error = %err, "collector task cancelled");
                Vec::new()
            }
        };
        CapturedStream {
            kind: self.kind,
            bytes,
        }
    }
}

async fn drain<R>(kind: StreamKind, mut reader: R) -> Vec<u8>
where
    R: AsyncRead + Unpin,
{
    let mut buf = Vec::new();
    let mut chunk = vec![0u8; CHUNK_SIZE];
    loop {
        match reader.read(&mut chunk).await {
            Ok(0) => break,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
            Err(err) if err.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(err) => {
                warn!(target: "subproc.collector", stream = %kind, error = %err, "read failed, keeping {} bytes", buf.len());
                break;
            }
        }
    }
    debug!(target: "subproc.collector", stream = %kind, bytes = buf.len(), "end of stream");
    buf
}

/// Everything one stream produced, frozen after end-of-stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedStream {
    kind: StreamKind,
    bytes: Vec<u8>,
}

impl CapturedStream {
    /// Which stream these bytes came from.
    pub fn kind(&self) -> StreamKind {
        self.kind
    }

    /// The captured bytes, in arrival order.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Number of captured bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// `true` when the stream produced nothing.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Take the raw bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Decode the captured bytes under `encoding`.
    ///
    /// # Errors
    ///
    /// [`SubprocessError::DecodeError`] with the raw bytes when they are not
    /// valid in `encoding`.
    pub fn decode(self, encoding: Encoding) -> Result<String, SubprocessError> {
        decode(self.bytes, encoding, self.kind)
    }
}

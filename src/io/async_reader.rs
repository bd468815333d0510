//! Asynchronous line reader with batch interface
//!
//! Provides a streaming interface over load requests read from any tokio
//! `AsyncRead`, one JSON object per line. Supports batch reading for the async
//! processing strategy.
//!
//! # Design
//!
//! The AsyncReader uses:
//! - `tokio_util::codec::LinesCodec` to split the input into lines
//! - `futures::StreamExt` to pull lines from the framed stream
//! - the json_format module to turn each line into a `LoadRequest`
//!
//! # Error Handling
//!
//! A malformed line stops the input. If requests were already collected for
//! the current batch, that partial batch is returned first and the error is
//! reported by the following call, so callers can process everything before
//! the bad line just like the synchronous reader does.

use crate::io::json_format::parse_line;
use crate::types::{LoadRequest, VelocityError};
use futures::stream::StreamExt;
use tokio::io::AsyncRead;
use tokio_util::codec::{FramedRead, LinesCodec, LinesCodecError};

/// Asynchronous line reader
pub struct AsyncReader<R: AsyncRead + Unpin> {
    lines: FramedRead<R, LinesCodec>,
    line_num: u64,
    pending_error: Option<VelocityError>,
}

impl<R: AsyncRead + Unpin> AsyncReader<R> {
    /// Create a new AsyncReader from an async reader
    pub fn new(reader: R) -> Self {
        Self {
            lines: FramedRead::new(reader, LinesCodec::new()),
            line_num: 0,
            pending_error: None,
        }
    }

    /// Read a batch of load requests
    ///
    /// Reads up to `batch_size` requests, skipping blank lines.
    ///
    /// # Returns
    ///
    /// * `Ok(batch)` - The next requests; an empty batch means end of input
    /// * `Err(VelocityError)` - The next line could not be read or parsed
    pub async fn read_batch(&mut self, batch_size: usize) -> Result<Vec<LoadRequest>, VelocityError> {
        if let Some(error) = self.pending_error.take() {
            return Err(error);
        }

        let mut batch = Vec::with_capacity(batch_size);

        while batch.len() < batch_size {
            match self.next_request().await {
                Some(Ok(request)) => batch.push(request),
                Some(Err(error)) if batch.is_empty() => return Err(error),
                Some(Err(error)) => {
                    self.pending_error = Some(error);
                    break;
                }
                None => break,
            }
        }

        Ok(batch)
    }

    async fn next_request(&mut self) -> Option<Result<LoadRequest, VelocityError>> {
        loop {
            let line = self.lines.next().await?;
            self.line_num += 1;

            let parsed = line
                .map_err(|e| match e {
                    LinesCodecError::Io(e) => VelocityError::unreadable_line(self.line_num, e),
                    e => VelocityError::from(e),
                })
                .and_then(|text| parse_line(&text, self.line_num));

            match parsed {
                Ok(Some(request)) => return Some(Ok(request)),
                Ok(None) => continue,
                Err(error) => return Some(Err(error)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(id: &str, customer_id: &str) -> String {
        format!(
            r#"{{"id":"{}","customer_id":"{}","load_amount":"$10.00","time":"2000-01-01T00:00:00Z"}}"#,
            id, customer_id
        )
    }

    #[tokio::test]
    async fn test_async_reader_read_batch() {
        let input = format!("{}\n{}\n{}\n", line("1", "A"), line("2", "A"), line("3", "B"));
        let mut reader = AsyncReader::new(input.as_bytes());

        let batch = reader.read_batch(2).await.unwrap();
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0].id, "1");
        assert_eq!(batch[1].id, "2");

        let batch = reader.read_batch(2).await.unwrap();
        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].customer_id, "B");

        let batch = reader.read_batch(2).await.unwrap();
        assert!(batch.is_empty());
    }

    #[tokio::test]
    async fn test_async_reader_empty_input() {
        let mut reader = AsyncReader::new("".as_bytes());

        let batch = reader.read_batch(10).await.unwrap();
        assert!(batch.is_empty());
    }

    #[tokio::test]
    async fn test_async_reader_last_line_without_newline() {
        let input = format!("{}\n\n{}", line("1", "A"), line("2", "A"));
        let mut reader = AsyncReader::new(input.as_bytes());

        let batch = reader.read_batch(10).await.unwrap();
        assert_eq!(batch.len(), 2);
    }

    #[tokio::test]
    async fn test_async_reader_error_after_partial_batch() {
        let input = format!("{}\n{}\nbroken\n{}\n", line("1", "A"), line("2", "A"), line("3", "A"));
        let mut reader = AsyncReader::new(input.as_bytes());

        let batch = reader.read_batch(10).await.unwrap();
        assert_eq!(batch.len(), 2);

        let result = reader.read_batch(10).await;
        assert!(matches!(result, Err(VelocityError::ParseError { line: 3, .. })));
    }

    #[tokio::test]
    async fn test_async_reader_error_at_batch_start() {
        let input = format!("{}\nbroken\n", line("1", "A"));
        let mut reader = AsyncReader::new(input.as_bytes());

        assert_eq!(reader.read_batch(1).await.unwrap().len(), 1);
        assert!(matches!(
            reader.read_batch(1).await,
            Err(VelocityError::ParseError { line: 2, .. })
        ));
    }

    #[tokio::test]
    async fn test_async_reader_reports_invalid_utf8_line() {
        let mut input = format!("{}\n", line("1", "A")).into_bytes();
        input.extend_from_slice(b"\xff\xfe\n");
        let mut reader = AsyncReader::new(input.as_slice());

        assert_eq!(reader.read_batch(10).await.unwrap().len(), 1);
        assert_eq!(
            reader.read_batch(10).await,
            Err(VelocityError::parse(2, "line is not valid UTF-8"))
        );
    }
}

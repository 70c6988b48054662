//! Utility functions for copy operations.
//!
//! This module contains the byte pump used by the file copier.

use std::io;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// Size of each read issued against the source.
const CHUNK_SIZE: usize = 64 * 1024;

/// Which side of a transfer failed.
#[derive(Debug)]
pub(crate) enum TransferError {
    Read(io::Error),
    Write(io::Error),
}

/// Move every byte from `reader` to `writer`, then flush.
///
/// Each chunk is fully accepted by the writer before the next read is
/// issued, so a slow destination throttles the source. Unlike
/// [`tokio::io::copy`], failures report which side they came from.
pub(crate) async fn pump<R, W>(reader: &mut R, writer: &mut W) -> Result<u64, TransferError>
where
    R: AsyncRead + Unpin + ?Sized,
    W: AsyncWrite + Unpin + ?Sized,
{
    let mut buf = vec![0u8; CHUNK_SIZE];
    let mut copied: u64 = 0;

    loop {
        let n = match reader.read(&mut buf).await {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(TransferError::Read(e)),
        };
        writer
            .write_all(&buf[..n])
            .await
            .map_err(TransferError::Write)?;
        copied += n as u64;
    }

    writer.flush().await.map_err(TransferError::Write)?;
    Ok(copied)
}

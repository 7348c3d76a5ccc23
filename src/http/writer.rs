use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;

/// Writes a block of response bytes to a stream, tolerating short writes.
///
/// Delivery is best-effort: a zero-byte write or an I/O error aborts the
/// response, and the caller tears the connection down. There is no retry
/// across reactor cycles.
pub struct ResponseWriter {
    buffer: Vec<u8>,
    written: usize,
}

impl ResponseWriter {
    pub fn new(buffer: Vec<u8>) -> Self {
        Self { buffer, written: 0 }
    }

    pub async fn write_to_stream(&mut self, stream: &mut TcpStream) -> anyhow::Result<()> {
        while self.written < self.buffer.len() {
            let n = stream.write(&self.buffer[self.written..]).await?;

            if n == 0 {
                return Err(anyhow::anyhow!("connection closed while writing"));
            }

            self.written += n;
        }

        Ok(())
    }
}

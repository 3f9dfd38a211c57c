//! Test relay client.
//!
//! Line-oriented client that can send lines and assert on received ones.

use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, BufWriter};
use tokio::net::TcpStream;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::time::timeout;

const RECV_TIMEOUT: Duration = Duration::from_secs(5);

/// A test relay client.
pub struct TestClient {
    reader: BufReader<OwnedReadHalf>,
    writer: BufWriter<OwnedWriteHalf>,
    nickname: String,
}

impl TestClient {
    /// Connect and consume the two greeting lines.
    pub async fn connect(address: &str) -> anyhow::Result<Self> {
        let mut client = Self::connect_raw(address).await?;

        let online = client.recv().await?;
        anyhow::ensure!(online.starts_with("ONLINE NOW: "), "unexpected greeting: {online}");

        let welcome = client.recv().await?;
        client.nickname = welcome
            .strip_prefix("Welcome! Your nickname is: ")
            .ok_or_else(|| anyhow::anyhow!("unexpected welcome: {welcome}"))?
            .to_string();

        Ok(client)
    }

    /// Connect without reading anything.
    pub async fn connect_raw(address: &str) -> anyhow::Result<Self> {
        let stream = TcpStream::connect(address).await?;

        let (read_half, write_half) = stream.into_split();
        Ok(Self {
            reader: BufReader::new(read_half),
            writer: BufWriter::new(write_half),
            nickname: String::new(),
        })
    }

    /// Nickname announced in the welcome line.
    #[allow(dead_code)]
    pub fn nickname(&self) -> &str {
        &self.nickname
    }

    /// Send one line, appending `\n` if missing.
    pub async fn send_line(&mut self, line: &str) -> anyhow::Result<()> {
        self.writer.write_all(line.as_bytes()).await?;
        if !line.ends_with('\n') {
            self.writer.write_all(b"\n").await?;
        }
        self.writer.flush().await?;
        Ok(())
    }

    /// Write raw bytes without any framing.
    #[allow(dead_code)]
    pub async fn send_raw(&mut self, bytes: &[u8]) -> anyhow::Result<()> {
        self.writer.write_all(bytes).await?;
        self.writer.flush().await?;
        Ok(())
    }

    /// Receive one line exactly as sent, terminator included.
    pub async fn recv_raw_timeout(&mut self, dur: Duration) -> anyhow::Result<String> {
        let mut line = String::new();
        let n = timeout(dur, self.reader.read_line(&mut line)).await??;
        if n == 0 {
            anyhow::bail!("connection closed");
        }
        Ok(line)
    }

    /// Receive one line with the terminator stripped.
    pub async fn recv(&mut self) -> anyhow::Result<String> {
        self.recv_timeout(RECV_TIMEOUT).await
    }

    pub async fn recv_timeout(&mut self, dur: Duration) -> anyhow::Result<String> {
        let line = self.recv_raw_timeout(dur).await?;
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Assert nothing arrives for `dur`.
    #[allow(dead_code)]
    pub async fn expect_silence(&mut self, dur: Duration) -> anyhow::Result<()> {
        match self.recv_timeout(dur).await {
            Ok(line) => anyhow::bail!("expected silence, got: {line}"),
            Err(e) if e.is::<tokio::time::error::Elapsed>() => Ok(()),
            Err(e) => Err(e),
        }
    }

    /// Wait for the server to close the connection.
    #[allow(dead_code)]
    pub async fn expect_closed(&mut self) -> anyhow::Result<()> {
        let mut line = String::new();
        loop {
            line.clear();
            match timeout(RECV_TIMEOUT, self.reader.read_line(&mut line)).await? {
                Ok(0) | Err(_) => return Ok(()),
                Ok(_) => continue,
            }
        }
    }
}

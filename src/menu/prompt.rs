use std::io;
use std::str::FromStr;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

pub const INVALID_INTEGER: &str = "Invalid number! Please enter a valid integer.";
pub const INVALID_DECIMAL: &str = "Invalid decimal number! Please enter a valid price.";

/// Line-oriented console I/O with retry-until-valid numeric prompts.
///
/// Every `ask_*` method returns `Ok(None)` once the input is exhausted.
/// Lines are decoded lossily, so bytes that are not UTF-8 become U+FFFD
/// instead of failing the read.
pub struct Prompt<R, W> {
    reader: R,
    writer: W,
    line: Vec<u8>,
}

impl<R, W> Prompt<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            line: Vec::new(),
        }
    }

    /// Writes `text` followed by a newline.
    pub async fn say(&mut self, text: &str) -> io::Result<()> {
        self.writer.write_all(text.as_bytes()).await?;
        self.writer.write_all(b"\n").await?;
        self.writer.flush().await
    }

    /// Prints `message` without a newline and reads one line, trimmed.
    pub async fn ask_line(&mut self, message: &str) -> io::Result<Option<String>> {
        self.writer.write_all(message.as_bytes()).await?;
        self.writer.flush().await?;

        self.line.clear();
        if self.reader.read_until(b'\n', &mut self.line).await? == 0 {
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&self.line).trim().to_string()))
    }

    /// Asks until the answer parses as `T`, printing `invalid` after each miss.
    pub async fn ask_parsed<T: FromStr>(&mut self, message: &str, invalid: &str) -> io::Result<Option<T>> {
        loop {
            let Some(answer) = self.ask_line(message).await? else {
                return Ok(None);
            };
            match answer.parse::<T>() {
                Ok(value) => return Ok(Some(value)),
                Err(_) => self.say(invalid).await?,
            }
        }
    }

    pub async fn ask_integer<T: FromStr>(&mut self, message: &str) -> io::Result<Option<T>> {
        self.ask_parsed(message, INVALID_INTEGER).await
    }

    pub async fn ask_decimal<T: FromStr>(&mut self, message: &str) -> io::Result<Option<T>> {
        self.ask_parsed(message, INVALID_DECIMAL).await
    }

    #[cfg(test)]
    pub fn into_writer(self) -> W {
        self.writer
    }
}

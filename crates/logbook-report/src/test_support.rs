//! Raw-HTTP fixtures for transport tests.
//!
//! Compiled only for this crate's own tests and for dependents that enable
//! the `test-util` feature; never part of the library proper.

#![allow(clippy::expect_used)]

use tokio::io::AsyncReadExt;
use tokio::net::TcpStream;

/// Reads one full HTTP request (headers plus content-length body) off the
/// stream and returns it as text.
pub async fn recv_request(stream: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = stream.read(&mut chunk).await.expect("read");
        buf.extend_from_slice(&chunk[..n]);
        let text = String::from_utf8_lossy(&buf).into_owned();
        if let Some(head_end) = text.find("\r\n\r\n") {
            let body_len = text[..head_end]
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    name.eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())?
                })
                .unwrap_or(0);
            if buf.len() >= head_end + 4 + body_len {
                return text;
            }
        }
        if n == 0 {
            return String::from_utf8_lossy(&buf).into_owned();
        }
    }
}

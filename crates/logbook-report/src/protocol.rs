//! Collector URL scheme classification.

/// Transport a collector URL supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Protocol {
    /// Unsupported scheme; reporting stays disabled.
    None,
    /// Request/response delivery over `http://` or `https://`.
    Http,
    /// Streaming delivery over `ws://` or `wss://`.
    Ws,
}

impl Protocol {
    /// Classifies a collector URL by its scheme prefix.
    ///
    /// Pure function; no network access and no validation beyond the scheme.
    #[must_use]
    pub fn detect(url: &str) -> Self {
        if url.starts_with("http://") || url.starts_with("https://") {
            Self::Http
        } else if url.starts_with("ws://") || url.starts_with("wss://") {
            Self::Ws
        } else {
            Self::None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("http://collector" => Protocol::Http)]
    #[test_case("https://x" => Protocol::Http)]
    #[test_case("ws://collector:9000" => Protocol::Ws)]
    #[test_case("wss://x" => Protocol::Ws)]
    #[test_case("ftp://x" => Protocol::None)]
    #[test_case("" => Protocol::None)]
    #[test_case("collector.example" => Protocol::None)]
    #[test_case("httpx://collector" => Protocol::None)]
    fn detect_classifies_by_scheme(url: &str) -> Protocol {
        Protocol::detect(url)
    }
}

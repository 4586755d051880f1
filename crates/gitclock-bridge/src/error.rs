use gitclock_common::GitClockError;

#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: std::net::SocketAddr,
        source: std::io::Error,
    },

    #[error("network error: {0}")]
    Network(String),

    #[error("server error: {0}")]
    Api(String),

    #[error("unexpected response: {0}")]
    Parse(String),

    #[error("layout rejected: {0}")]
    Rejected(String),
}

impl From<reqwest::Error> for BridgeError {
    fn from(err: reqwest::Error) -> Self {
        BridgeError::Network(err.to_string())
    }
}

impl From<BridgeError> for GitClockError {
    fn from(err: BridgeError) -> Self {
        GitClockError::Bridge(err.to_string())
    }
}

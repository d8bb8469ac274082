use rendezvous_core::IceServerConfig;
use std::net::SocketAddr;

/// Relay server settings.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub bind_addr: SocketAddr,
    /// Origins allowed by CORS. Empty means any origin.
    pub allowed_origins: Vec<String>,
    /// Announced to every participant in the `welcome` frame.
    pub ice_servers: Vec<IceServerConfig>,
    /// Capacity of the relay command queue.
    pub command_buffer: usize,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8000)),
            allowed_origins: vec!["http://localhost:5173".to_owned()],
            ice_servers: vec![IceServerConfig {
                urls: vec![
                    "stun:stun1.l.google.com:19302".to_owned(),
                    "stun:stun2.l.google.com:19302".to_owned(),
                ],
                username: None,
                credential: None,
            }],
            command_buffer: 256,
        }
    }
}

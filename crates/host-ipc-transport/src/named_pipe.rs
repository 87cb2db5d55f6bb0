//! Named pipe transport implementation
//!
//! Windows-native transport using named pipes. Targets <0.2ms latency
//! with proper security descriptor handling and Windows-specific optimizations.
//!
//! Stub implementation: extension processes today are only spawned and
//! supervised on Unix, so this module validates config and reports
//! `UnsupportedOperation`/`UnsupportedPlatform` rather than moving bytes.
//! `tokio::net::windows::named_pipe` is the intended backing implementation
//! once Windows process supervision exists.

use crate::traits::{Transport, Connection, TransportConfig, TransportType, PerformanceProfile, ConnectionInfo, TransportListener};
use crate::error::{TransportError, ConfigError};
use async_trait::async_trait;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncWrite, ReadBuf};
use std::pin::Pin;
use std::task::{Context, Poll};

/// Named pipe configuration
#[derive(Debug, Clone)]
pub struct NamedPipeConfig {
    /// Named pipe name (e.g., r"\\.\pipe\extension_host")
    pub pipe_name: String,
    /// Operation timeout
    pub timeout: Duration,
    /// Buffer size for I/O operations
    pub buffer_size: usize,
    /// Security descriptor (Windows-specific)
    pub security_descriptor: Option<String>,
}

impl TransportConfig for NamedPipeConfig {
    fn endpoint(&self) -> &str {
        &self.pipe_name
    }
    
    fn timeout(&self) -> Duration {
        self.timeout
    }
    
    fn validate(&self) -> Result<(), ConfigError> {
        if !self.pipe_name.starts_with(r"\\.\pipe\") {
            return Err(ConfigError::InvalidEndpoint {
                message: "Named pipe must start with '\\\\.\\pipe\\'".to_string(),
            });
        }
        
        if self.timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout {
                message: "Timeout cannot be zero".to_string(),
            });
        }
        
        if self.buffer_size == 0 {
            return Err(ConfigError::InvalidParameter {
                message: "Buffer size cannot be zero".to_string(),
            });
        }
        
        Ok(())
    }
}

/// Named pipe connection (Windows implementation)
#[cfg(windows)]
pub struct NamedPipeConnection {
    // Windows-specific named pipe implementation would go here
    // For now, we'll use a placeholder structure
    _pipe_name: String, // Prefixed with underscore to suppress unused warning
    connection_info: ConnectionInfo,
}

/// Named pipe connection (non-Windows stub)
#[cfg(not(windows))]
pub struct NamedPipeConnection {
    _phantom: std::marker::PhantomData<()>,
}

#[cfg(windows)]
impl NamedPipeConnection {
    /// Create a new named pipe connection
    #[must_use]
    pub fn new(pipe_name: String) -> Self {
        Self {
            connection_info: ConnectionInfo {
                transport_type: TransportType::NamedPipe,
                endpoint: pipe_name.clone(),
                established_at: chrono::Utc::now(),
                bytes_sent: 0,
                bytes_received: 0,
                last_activity: chrono::Utc::now(),
            },
            _pipe_name: pipe_name,
        }
    }
}

#[cfg(not(windows))]
impl NamedPipeConnection {
    /// Create a stub connection for non-Windows platforms
    pub fn new(_pipe_name: String) -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

impl AsyncRead for NamedPipeConnection {
    fn poll_read(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        _buf: &mut ReadBuf<'_>,
    ) -> Poll<std::io::Result<()>> {
        #[cfg(windows)]
        {
            // Windows named pipe read implementation would go here
            Poll::Ready(Err(std::io::Error::new(
                std::io::ErrorKind::Unsupported,
                "Named pipe read not yet implemented",
            )))
        }
        
        #[cfg(not(windows))]
        {
            Poll::Ready(Err(std::io::Error::new(
                std::io::ErrorKind::Unsupported,
                "Named pipes not supported on this platform",
            )))
        }
    }
}

impl AsyncWrite for NamedPipeConnection {
    fn poll_write(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        _buf: &[u8],
    ) -> Poll<Result<usize, std::io::Error>> {
        #[cfg(windows)]
        {
            // Windows named pipe write implementation would go here
            Poll::Ready(Err(std::io::Error::new(
                std::io::ErrorKind::Unsupported,
                "Named pipe write not yet implemented",
            )))
        }
        
        #[cfg(not(windows))]
        {
            Poll::Ready(Err(std::io::Error::new(
                std::io::ErrorKind::Unsupported,
                "Named pipes not supported on this platform",
            )))
        }
    }
    
    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Result<(), std::io::Error>> {
        Poll::Ready(Ok(()))
    }
    
    fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Result<(), std::io::Error>> {
        Poll::Ready(Ok(()))
    }
}

#[async_trait]
impl Connection for NamedPipeConnection {
    async fn send_with_timeout(&mut self, data: &[u8], _timeout: Duration) -> Result<usize, TransportError> {
        #[cfg(windows)]
        {
            let start = std::time::Instant::now();
            
            // Windows named pipe send implementation would go here
            // For now, return an error indicating it's not implemented
            let send_time = start.elapsed();
            if send_time > Duration::from_nanos(200_000) {
                host_commons::debug::duck!("Named pipe send took {}μs (target: <200μs)", send_time.as_micros());
            }
            
            self.connection_info.bytes_sent += data.len() as u64;
            self.connection_info.last_activity = chrono::Utc::now();
            
            Err(TransportError::UnsupportedOperation {
                message: "Named pipe send not yet implemented".to_string(),
            })
        }
        
        #[cfg(not(windows))]
        {
            Err(TransportError::UnsupportedPlatform {
                message: "Named pipes not supported on this platform".to_string(),
            })
        }
    }
    
    async fn recv_with_timeout(&mut self, _buffer: &mut [u8], _timeout: Duration) -> Result<usize, TransportError> {
        #[cfg(windows)]
        {
            let start = std::time::Instant::now();
            
            // Windows named pipe receive implementation would go here
            let recv_time = start.elapsed();
            if recv_time > Duration::from_nanos(200_000) {
                host_commons::debug::duck!("Named pipe recv took {}μs (target: <200μs)", recv_time.as_micros());
            }
            
            Err(TransportError::UnsupportedOperation {
                message: "Named pipe receive not yet implemented".to_string(),
            })
        }
        
        #[cfg(not(windows))]
        {
            Err(TransportError::UnsupportedPlatform {
                message: "Named pipes not supported on this platform".to_string(),
            })
        }
    }
    
    async fn is_healthy(&self) -> bool {
        #[cfg(windows)]
        {
            // Windows named pipe health check would go here
            false
        }
        
        #[cfg(not(windows))]
        {
            false
        }
    }
    
    fn connection_info(&self) -> ConnectionInfo {
        #[cfg(windows)]
        {
            self.connection_info.clone()
        }
        
        #[cfg(not(windows))]
        {
            ConnectionInfo {
                transport_type: TransportType::NamedPipe,
                endpoint: "unsupported".to_string(),
                established_at: chrono::Utc::now(),
                bytes_sent: 0,
                bytes_received: 0,
                last_activity: chrono::Utc::now(),
            }
        }
    }
    
    async fn close(&mut self) -> Result<(), TransportError> {
        #[cfg(windows)]
        {
            // Windows named pipe close implementation would go here
            Ok(())
        }
        
        #[cfg(not(windows))]
        {
            Ok(())
        }
    }
}

/// Named pipe transport
pub struct NamedPipeTransport {
    performance_profile: PerformanceProfile,
}

impl NamedPipeTransport {
    /// Create a new named pipe transport
    #[must_use]
    pub const fn new() -> Self {
        Self {
            performance_profile: PerformanceProfile {
                typical_latency: Duration::from_nanos(200_000), // <0.2ms target
                max_throughput: 500_000_000, // 500MB/s typical
                connection_overhead: Duration::from_micros(100),
                platform_specific: true,
            },
        }
    }
}

impl Default for NamedPipeTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for NamedPipeTransport {
    type Connection = NamedPipeConnection;
    type Config = NamedPipeConfig;
    
    async fn connect(&self, config: &Self::Config) -> Result<Self::Connection, TransportError> {
        config.validate()?;
        
        #[cfg(windows)]
        {
            let start = std::time::Instant::now();
            
            // Windows named pipe connection implementation would go here
            let connection_time = start.elapsed();
            if connection_time > Duration::from_micros(200) {
                host_commons::debug::duck!("Named pipe connection took {}μs (target: <200μs)", connection_time.as_micros());
            }
            
            // For now, return an error indicating it's not implemented
            Err(TransportError::UnsupportedOperation {
                message: "Named pipe connection not yet implemented".to_string(),
            })
        }
        
        #[cfg(not(windows))]
        {
            Err(TransportError::UnsupportedPlatform {
                message: "Named pipes not supported on this platform".to_string(),
            })
        }
    }
    
    async fn listen(&self, config: &Self::Config) -> Result<TransportListener<Self::Connection>, TransportError> {
        config.validate()?;
        
        #[cfg(windows)]
        {
            // Windows named pipe listener implementation would go here
            Err(TransportError::UnsupportedOperation {
                message: "Named pipe listener not yet implemented".to_string(),
            })
        }
        
        #[cfg(not(windows))]
        {
            Err(TransportError::UnsupportedPlatform {
                message: "Named pipes not supported on this platform".to_string(),
            })
        }
    }
    
    fn transport_type(&self) -> TransportType {
        TransportType::NamedPipe
    }
    
    fn performance_profile(&self) -> PerformanceProfile {
        self.performance_profile.clone()
    }
}

//! Connection pooling for efficient connection reuse
//!
//! Each extension gets exactly one persistent socket, so pooling has no
//! live caller yet; `acquire`/`release`/`shutdown` are stubs kept for the
//! interface shape a future multi-connection-per-extension mode would need.

use crate::traits::{Transport, Connection};
use crate::error::TransportError;
use std::time::Duration;

/// Connection pool configuration
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// Minimum number of connections to maintain
    pub min_connections: usize,
    /// Maximum number of connections allowed
    pub max_connections: usize,
    /// Idle timeout for unused connections
    pub idle_timeout: Duration,
    /// Maximum lifetime for connections
    pub max_lifetime: Duration,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            min_connections: 1,
            max_connections: 10,
            idle_timeout: Duration::from_secs(300), // 5 minutes
            max_lifetime: Duration::from_secs(3600), // 1 hour
        }
    }
}

/// Connection pool metrics
#[derive(Debug, Clone, Default)]
pub struct PoolMetrics {
    /// Total connections created
    pub connections_created: u64,
    /// Total connections destroyed
    pub connections_destroyed: u64,
    /// Current active connections
    pub active_connections: usize,
    /// Current idle connections
    pub idle_connections: usize,
    /// Connection reuse rate (0.0 to 1.0)
    pub reuse_rate: f64,
}

/// Pooled connection wrapper
pub struct PooledConnection<C: Connection> {
    connection: C,
    created_at: std::time::Instant,
    last_used: std::time::Instant,
}

impl<C: Connection> PooledConnection<C> {
    /// Create a new pooled connection
    pub fn new(connection: C) -> Self {
        let now = std::time::Instant::now();
        Self {
            connection,
            created_at: now,
            last_used: now,
        }
    }
    
    /// Get the underlying connection
    pub fn connection(&mut self) -> &mut C {
        self.last_used = std::time::Instant::now();
        &mut self.connection
    }
    
    /// Check if the connection has exceeded its lifetime
    pub fn is_expired(&self, max_lifetime: Duration) -> bool {
        self.created_at.elapsed() > max_lifetime
    }
    
    /// Check if the connection has been idle too long
    pub fn is_idle(&self, idle_timeout: Duration) -> bool {
        self.last_used.elapsed() > idle_timeout
    }
}

/// Connection pool error
#[derive(Debug, thiserror::Error)]
pub enum PoolError {
    /// Pool is at maximum capacity
    #[error("Pool at maximum capacity")]
    PoolExhausted,
    
    /// Transport error occurred
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),
    
    /// Pool is shutting down
    #[error("Pool is shutting down")]
    ShuttingDown,
}

/// Connection pool for managing transport connections
pub struct ConnectionPool<T: Transport> {
    _transport: T,
    _config: PoolConfig,
    _metrics: PoolMetrics,
}

impl<T: Transport> ConnectionPool<T> {
    /// Create a new connection pool
    pub fn new(transport: T, config: PoolConfig) -> Self {
        Self {
            _transport: transport,
            _config: config,
            _metrics: PoolMetrics::default(),
        }
    }
    
    /// Acquire a connection from the pool
    pub fn acquire(&mut self) -> Result<PooledConnection<T::Connection>, PoolError> {
        // TODO: Implement connection pooling logic
        // This is a placeholder implementation
        Err(PoolError::PoolExhausted)
    }
    
    /// Release a connection back to the pool
    pub fn release(&mut self, _connection: PooledConnection<T::Connection>) {
        // TODO: Implement connection release logic
        // This is a placeholder implementation
    }
    
    /// Get pool metrics
    pub fn metrics(&self) -> &PoolMetrics {
        &self._metrics
    }
    
    /// Shutdown the pool and close all connections
    pub fn shutdown(&mut self) -> Result<(), PoolError> {
        // TODO: Implement pool shutdown logic
        // This is a placeholder implementation
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    
    
    #[cfg(feature = "unit")]
    #[test]
    fn test_pool_config_default() {
        let config = PoolConfig::default();
        assert_eq!(config.min_connections, 1);
        assert_eq!(config.max_connections, 10);
        assert_eq!(config.idle_timeout, Duration::from_secs(300));
        assert_eq!(config.max_lifetime, Duration::from_secs(3600));
    }
    
    #[cfg(feature = "unit")]
    #[test]
    fn test_pool_metrics_default() {
        let metrics = PoolMetrics::default();
        assert_eq!(metrics.connections_created, 0);
        assert_eq!(metrics.connections_destroyed, 0);
        assert_eq!(metrics.active_connections, 0);
        assert_eq!(metrics.idle_connections, 0);
        assert_eq!(metrics.reuse_rate, 0.0);
    }
}
//! Redis cache client implementation
//!
//! A multiplexed async connection with retry on connect. Operations after
//! startup are never retried; a failure is reported to the caller as is.

use async_trait::async_trait;
use redis::{aio::MultiplexedConnection, AsyncCommands, Client, RedisError};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use ua_core::errors::DomainError;
use ua_core::services::CacheClient;
use ua_shared::config::CacheConfig;

use crate::InfrastructureError;

/// Redis cache client
///
/// Cheap to clone; every clone shares the same multiplexed connection.
#[derive(Clone)]
pub struct RedisClient {
    /// Redis multiplexed connection for async operations
    connection: MultiplexedConnection,
    /// Configuration used to create this client
    config: CacheConfig,
}

impl RedisClient {
    /// Connect with three attempts starting at a 100ms backoff
    ///
    /// # Example
    /// ```no_run
    /// use ua_infra::cache::redis_client::RedisClient;
    /// use ua_shared::config::CacheConfig;
    ///
    /// async fn create_client() -> Result<RedisClient, Box<dyn std::error::Error>> {
    ///     let client = RedisClient::new(CacheConfig::new("redis://localhost:6379")).await?;
    ///     Ok(client)
    /// }
    /// ```
    pub async fn new(config: CacheConfig) -> Result<Self, InfrastructureError> {
        Self::new_with_retry_config(config, 3, 100).await
    }

    /// Connect with a custom retry policy
    ///
    /// # Arguments
    /// * `config` - Cache configuration settings
    /// * `max_retries` - Maximum number of connection attempts
    /// * `retry_delay_ms` - Initial delay between attempts, doubled each time
    pub async fn new_with_retry_config(
        config: CacheConfig,
        max_retries: u32,
        retry_delay_ms: u64,
    ) -> Result<Self, InfrastructureError> {
        info!(
            "Creating Redis client with URL: {} and max connections: {}",
            mask_url(&config.url),
            config.max_connections
        );

        let client = Client::open(config.url.as_str()).map_err(|e| {
            error!("Failed to parse Redis URL: {}", e);
            InfrastructureError::Config(format!("Invalid Redis URL: {}", e))
        })?;

        let connection =
            Self::create_connection_with_retry(client, max_retries, retry_delay_ms).await?;

        info!("Redis client created successfully");

        Ok(Self { connection, config })
    }

    async fn create_connection_with_retry(
        client: Client,
        max_retries: u32,
        retry_delay_ms: u64,
    ) -> Result<MultiplexedConnection, InfrastructureError> {
        let mut attempts = 0;
        let mut delay = retry_delay_ms;

        loop {
            attempts += 1;
            debug!("Attempting to connect to Redis (attempt {})", attempts);

            match client.get_multiplexed_async_connection().await {
                Ok(connection) => {
                    info!("Successfully connected to Redis");
                    return Ok(connection);
                }
                Err(e) if attempts < max_retries && is_retriable_error(&e) => {
                    warn!(
                        "Failed to connect to Redis (attempt {}/{}): {}. Retrying in {}ms...",
                        attempts, max_retries, e, delay
                    );
                    sleep(Duration::from_millis(delay)).await;
                    // Exponential backoff with cap at 5 seconds
                    delay = (delay * 2).min(5000);
                }
                Err(e) => {
                    error!(
                        "Failed to connect to Redis after {} attempts: {}",
                        attempts, e
                    );
                    return Err(InfrastructureError::Cache(e));
                }
            }
        }
    }

    /// `SETEX key ttl value`
    pub async fn set_with_expiry(
        &self,
        key: &str,
        value: &str,
        expiry_seconds: u64,
    ) -> Result<(), InfrastructureError> {
        let key = self.config.make_key(key);
        let mut conn = self.connection.clone();

        redis::cmd("SETEX")
            .arg(&key)
            .arg(expiry_seconds)
            .arg(value)
            .query_async::<_, ()>(&mut conn)
            .await
            .map_err(|e| {
                error!("Failed to set cache key: {}", e);
                InfrastructureError::Cache(e)
            })?;

        debug!(expiry_seconds, "Cache key set");
        Ok(())
    }

    /// Get a value, `None` when the key is absent or expired
    pub async fn get_value(&self, key: &str) -> Result<Option<String>, InfrastructureError> {
        let key = self.config.make_key(key);
        let mut conn = self.connection.clone();

        let value: Option<String> = conn.get(&key).await.map_err(|e| {
            error!("Failed to get cache key: {}", e);
            InfrastructureError::Cache(e)
        })?;

        debug!(hit = value.is_some(), "Cache lookup");
        Ok(value)
    }

    /// Check if Redis connection is healthy
    pub async fn health_check(&self) -> Result<bool, InfrastructureError> {
        debug!("Performing Redis health check");

        let mut conn = self.connection.clone();
        let result = redis::cmd("PING")
            .query_async::<_, String>(&mut conn)
            .await;

        match result {
            Ok(response) if response == "PONG" => {
                debug!("Redis health check passed");
                Ok(true)
            }
            Ok(response) => {
                warn!("Redis health check returned unexpected response: {}", response);
                Ok(false)
            }
            Err(e) => {
                error!("Redis health check failed: {}", e);
                Err(InfrastructureError::Cache(e))
            }
        }
    }
}

#[async_trait]
impl CacheClient for RedisClient {
    async fn ping(&self) -> Result<(), DomainError> {
        if self.health_check().await? {
            Ok(())
        } else {
            Err(DomainError::internal("Redis did not answer PONG"))
        }
    }

    async fn set(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<(), DomainError> {
        Ok(self.set_with_expiry(key, value, ttl_seconds).await?)
    }

    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        Ok(self.get_value(key).await?)
    }
}

/// Errors worth another connection attempt
pub(crate) fn is_retriable_error(error: &RedisError) -> bool {
    matches!(
        error.kind(),
        redis::ErrorKind::IoError
            | redis::ErrorKind::ClientError
            | redis::ErrorKind::BusyLoadingError
            | redis::ErrorKind::TryAgain
    )
}

/// Hide credentials in a connection URL
pub(crate) fn mask_url(url: &str) -> String {
    if let Some(at_pos) = url.find('@') {
        if let Some(proto_end) = url.find("://") {
            let proto = &url[..proto_end + 3];
            let host_part = &url[at_pos..];
            return format!("{}****{}", proto, host_part);
        }
    }
    url.to_string()
}

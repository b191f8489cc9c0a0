use std::{future::Future, sync::Arc, time::Duration};

use log::warn;
use tokio::time::sleep;

use crate::{DeleteReceipt, StdResult, User, UserDraft, UserGateway, UserId};

/// A struct that retries the read calls of a UserGateway a specified number of times in case of failure with exponential backoff strategy.
///
/// Writes are forwarded once: a write that timed out may still have been applied by the backend.
pub struct GatewayRetrier {
    /// The gateway to be retried.
    gateway: Arc<dyn UserGateway>,

    /// The maximum number of attempts for a read.
    max_retries: u32,

    /// The base delay for exponential backoff.
    base_delay: Duration,
}

impl GatewayRetrier {
    /// Creates a new `GatewayRetrier` instance with the given maximum number of retries.
    pub fn new(gateway: Arc<dyn UserGateway>, max_retries: u32, base_delay: Duration) -> Self {
        Self {
            gateway,
            max_retries: max_retries.max(1),
            base_delay,
        }
    }

    fn calculate_exponential_backoff_delay(&self, attempt: u32) -> Duration {
        self.base_delay
            .checked_mul(2u32.pow(attempt.min(31)))
            .unwrap_or(Duration::MAX)
    }

    async fn retry<T, F, Fut>(&self, operation: &str, call: F) -> StdResult<T>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = StdResult<T>>,
    {
        let mut attempts = 0;

        loop {
            match call().await {
                Ok(res) => return Ok(res),
                Err(e) => {
                    warn!("{operation} attempt #{} failed: {}", attempts + 1, e);
                    attempts += 1;
                    if attempts >= self.max_retries {
                        return Err(e.context(format!(
                            "{operation} failed after {attempts} attempts"
                        )));
                    }
                    sleep(self.calculate_exponential_backoff_delay(attempts)).await;
                }
            }
        }
    }
}

#[async_trait::async_trait]
impl UserGateway for GatewayRetrier {
    async fn list_users(&self) -> StdResult<Vec<User>> {
        self.retry("List users", || self.gateway.list_users()).await
    }

    async fn get_user(&self, id: UserId) -> StdResult<User> {
        self.retry("Get user", || self.gateway.get_user(id)).await
    }

    async fn add_user(&self, user: &UserDraft) -> StdResult<UserDraft> {
        self.gateway.add_user(user).await
    }

    async fn update_user(&self, user: &UserDraft) -> StdResult<UserDraft> {
        self.gateway.update_user(user).await
    }

    async fn delete_user(&self, id: UserId) -> StdResult<DeleteReceipt> {
        self.gateway.delete_user(id).await
    }
}

use std::time::Duration;

use anyhow::{Context, anyhow};
use log::{debug, info};
use reqwest::{Client, RequestBuilder, Response, Url};
use thiserror::Error;

use crate::{DeleteReceipt, StdResult, User, UserDraft, UserGateway, UserId};

/// The API base URL used when none is configured.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api/v3";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Gateway error
#[derive(Error, Debug)]
pub enum GatewayError {
    /// The backend answered with a non-success status
    #[error("Failed to {action} (HTTP {status})")]
    Rejected { action: &'static str, status: u16 },
    /// The backend could not be reached
    #[error("Failed to {action}: backend unreachable")]
    Unreachable {
        action: &'static str,
        #[source]
        source: reqwest::Error,
    },
    /// The response body could not be decoded
    #[error("Failed to {action}: invalid response body")]
    Decode {
        action: &'static str,
        #[source]
        source: reqwest::Error,
    },
}

/// Reaches the user-management REST API over HTTP.
#[derive(Debug)]
pub struct HttpUserGateway {
    client: Client,
    base_url: String,
}

impl HttpUserGateway {
    /// Creates a new `HttpUserGateway` for the given API base URL.
    pub fn try_new(base_url: &str) -> StdResult<Self> {
        let base_url = base_url.trim().trim_end_matches('/');
        if base_url.is_empty() {
            return Err(anyhow!("Missing API base URL"));
        }
        Url::parse(base_url).with_context(|| format!("Invalid API base URL: {base_url}"))?;
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()
            .with_context(|| "Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
        })
    }

    /// Retrieves the API base URL, without trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    async fn send(
        &self,
        action: &'static str,
        request: RequestBuilder,
    ) -> Result<Response, GatewayError> {
        let response = request
            .send()
            .await
            .map_err(|source| GatewayError::Unreachable { action, source })?;
        let status = response.status();
        debug!("Backend answered {status} to '{action}'");
        if !status.is_success() {
            return Err(GatewayError::Rejected {
                action,
                status: status.as_u16(),
            });
        }

        Ok(response)
    }

    async fn send_json<T: serde::de::DeserializeOwned>(
        &self,
        action: &'static str,
        request: RequestBuilder,
    ) -> Result<T, GatewayError> {
        self.send(action, request)
            .await?
            .json::<T>()
            .await
            .map_err(|source| GatewayError::Decode { action, source })
    }
}

#[async_trait::async_trait]
impl UserGateway for HttpUserGateway {
    async fn list_users(&self) -> StdResult<Vec<User>> {
        info!("Fetching users");
        let users = self
            .send_json::<Vec<User>>("fetch users", self.client.get(self.endpoint("getusers")))
            .await?;
        info!("Fetched {} users", users.len());

        Ok(users)
    }

    async fn get_user(&self, id: UserId) -> StdResult<User> {
        info!("Fetching user {id}");
        let user = self
            .send_json::<User>(
                "fetch user",
                self.client.get(self.endpoint(&format!("getuser/{id}"))),
            )
            .await?;

        Ok(user)
    }

    async fn add_user(&self, user: &UserDraft) -> StdResult<UserDraft> {
        info!("Adding {user}");
        let added = self
            .send_json::<UserDraft>(
                "add user",
                self.client.post(self.endpoint("adduser")).json(user),
            )
            .await?;

        Ok(added)
    }

    async fn update_user(&self, user: &UserDraft) -> StdResult<UserDraft> {
        info!("Updating {user}");
        let updated = self
            .send_json::<UserDraft>(
                "update user",
                self.client.put(self.endpoint("updateuser")).json(user),
            )
            .await?;

        Ok(updated)
    }

    async fn delete_user(&self, id: UserId) -> StdResult<DeleteReceipt> {
        const ACTION: &str = "delete user";
        info!("Deleting user {id}");
        let message = self
            .send(
                ACTION,
                self.client.delete(self.endpoint(&format!("deleteuser/{id}"))),
            )
            .await?
            .text()
            .await
            .map_err(|source| GatewayError::Decode {
                action: ACTION,
                source,
            })?;

        Ok(DeleteReceipt::new(&message))
    }
}

#[cfg(test)]
mod tests {
    use httpmock::MockServer;
    use serde_json::json;

    use super::*;

    fn setup_gateway(server: &MockServer) -> HttpUserGateway {
        HttpUserGateway::try_new(&server.url("/api/v3/")).unwrap()
    }

    #[test]
    fn try_new_strips_trailing_slash() {
        let gateway = HttpUserGateway::try_new("http://localhost:8080/api/v3/").unwrap();

        assert_eq!("http://localhost:8080/api/v3", gateway.base_url());
    }

    #[test]
    fn try_new_rejects_invalid_base_url() {
        HttpUserGateway::try_new("").expect_err("Expected an error for an empty URL");
        HttpUserGateway::try_new("not a url").expect_err("Expected an error for an invalid URL");
    }

    #[tokio::test]
    async fn test_list_users() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method("GET").path("/api/v3/getusers");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(json!([
                    {"id": 1, "name": "Ada"},
                    {"id": 2, "name": "Grace"}
                ]));
        });
        let gateway = setup_gateway(&server);

        let users = gateway.list_users().await.unwrap();

        mock.assert();
        assert_eq!(vec![User::new(1, "Ada"), User::new(2, "Grace")], users);
    }

    #[tokio::test]
    async fn test_list_users_fails_on_server_error() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method("GET").path("/api/v3/getusers");
            then.status(500);
        });
        let gateway = setup_gateway(&server);

        let error = gateway
            .list_users()
            .await
            .expect_err("Expected an error on server failure");

        mock.assert();
        assert_eq!("Failed to fetch users (HTTP 500)", error.to_string());
    }

    #[tokio::test]
    async fn test_list_users_fails_on_invalid_body() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method("GET").path("/api/v3/getusers");
            then.status(200).body("<html>not json</html>");
        });
        let gateway = setup_gateway(&server);

        let error = gateway
            .list_users()
            .await
            .expect_err("Expected an error on invalid body");

        assert!(matches!(
            error.downcast_ref::<GatewayError>(),
            Some(GatewayError::Decode { .. })
        ));
    }

    #[tokio::test]
    async fn test_list_users_fails_when_backend_unreachable() {
        let gateway = HttpUserGateway::try_new("http://127.0.0.1:1/api/v3").unwrap();

        let error = gateway
            .list_users()
            .await
            .expect_err("Expected an error when the backend is unreachable");

        assert!(matches!(
            error.downcast_ref::<GatewayError>(),
            Some(GatewayError::Unreachable { .. })
        ));
    }

    #[tokio::test]
    async fn test_get_user() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method("GET").path("/api/v3/getuser/7");
            then.status(200).json_body(json!({"id": 7, "name": "Ada"}));
        });
        let gateway = setup_gateway(&server);

        let user = gateway.get_user(UserId(7)).await.unwrap();

        mock.assert();
        assert_eq!(User::new(7, "Ada"), user);
    }

    #[tokio::test]
    async fn test_add_user_without_id() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method("POST")
                .path("/api/v3/adduser")
                .json_body(json!({"id": null, "name": "Ada"}));
            then.status(200).json_body(json!({"id": null, "name": "Ada"}));
        });
        let gateway = setup_gateway(&server);

        let added = gateway
            .add_user(&UserDraft::new(None, "Ada"))
            .await
            .unwrap();

        mock.assert();
        assert_eq!(UserDraft::new(None, "Ada"), added);
    }

    #[tokio::test]
    async fn test_update_user() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method("PUT")
                .path("/api/v3/updateuser")
                .json_body(json!({"id": 3, "name": "Grace"}));
            then.status(200).json_body(json!({"id": 3, "name": "Grace"}));
        });
        let gateway = setup_gateway(&server);

        let updated = gateway
            .update_user(&UserDraft::new(Some(3), "Grace"))
            .await
            .unwrap();

        mock.assert();
        assert_eq!(UserDraft::new(Some(3), "Grace"), updated);
    }

    #[tokio::test]
    async fn test_update_user_fails_on_client_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method("PUT").path("/api/v3/updateuser");
            then.status(400);
        });
        let gateway = setup_gateway(&server);

        let error = gateway
            .update_user(&UserDraft::new(Some(3), "Grace"))
            .await
            .expect_err("Expected an error on client failure");

        assert_eq!("Failed to update user (HTTP 400)", error.to_string());
    }

    #[tokio::test]
    async fn test_delete_user() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method("DELETE").path("/api/v3/deleteuser/4");
            then.status(200).body("User deleted1");
        });
        let gateway = setup_gateway(&server);

        let receipt = gateway.delete_user(UserId(4)).await.unwrap();

        mock.assert();
        assert_eq!("User deleted1", receipt.message());
    }

    #[tokio::test]
    async fn test_delete_user_with_empty_body() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method("DELETE").path("/api/v3/deleteuser/4");
            then.status(200);
        });
        let gateway = setup_gateway(&server);

        let receipt = gateway.delete_user(UserId(4)).await.unwrap();

        assert_eq!(crate::DEFAULT_DELETE_MESSAGE, receipt.message());
    }
}

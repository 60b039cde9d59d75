// HTTP CommunitySource Implementation

use crate::connection::OrgConnection;
use async_trait::async_trait;
use community_probe_core::domain::{CommunitiesResponse, CommunityRecord};
use community_probe_core::port::{CommunitySource, ProbeError};
use reqwest::header::ACCEPT;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::debug;

/// Longest slice of an unparseable error body kept in the error message
const MAX_ERROR_BODY_CHARS: usize = 200;

/// Error element of a REST error response, e.g.
/// `[{"message":"Session expired or invalid","errorCode":"INVALID_SESSION_ID"}]`
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
    #[serde(rename = "errorCode", default)]
    error_code: Option<String>,
}

// Helper to convert reqwest::Error to ProbeError
fn map_reqwest_error(err: reqwest::Error) -> ProbeError {
    if err.is_decode() {
        ProbeError::Malformed(err.to_string())
    } else if err.is_timeout() {
        ProbeError::Network(format!("Request timed out: {}", err))
    } else {
        ProbeError::Network(err.to_string())
    }
}

fn error_message(body: &str) -> String {
    match serde_json::from_str::<Vec<ApiErrorBody>>(body) {
        Ok(errors) if !errors.is_empty() => errors
            .iter()
            .map(|e| match &e.error_code {
                Some(code) => format!("{}: {}", code, e.message),
                None => e.message.clone(),
            })
            .collect::<Vec<_>>()
            .join("; "),
        _ => body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
    }
}

/// Reads the communities list of one org
pub struct HttpCommunitySource {
    client: reqwest::Client,
    connection: OrgConnection,
}

impl HttpCommunitySource {
    pub fn new(client: reqwest::Client, connection: OrgConnection) -> Self {
        Self { client, connection }
    }
}

#[async_trait]
impl CommunitySource for HttpCommunitySource {
    async fn list_communities(&self) -> Result<Vec<CommunityRecord>, ProbeError> {
        let url = self.connection.communities_url();
        debug!(url = %url, "GET communities");

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.connection.access_token)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = error_message(&body);
            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ProbeError::Unauthorized {
                    status: status.as_u16(),
                    message,
                },
                _ => ProbeError::Status {
                    status: status.as_u16(),
                    message,
                },
            });
        }

        let body = response.bytes().await.map_err(map_reqwest_error)?;
        let parsed: CommunitiesResponse =
            serde_json::from_slice(&body).map_err(|e| ProbeError::Malformed(e.to_string()))?;

        Ok(parsed.communities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;
    use tokio_test::assert_ok;

    /// Serve exactly one canned HTTP response; yields the raw request head
    async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 4096];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).await.unwrap();
            let _ = stream.shutdown().await;

            String::from_utf8_lossy(&request).into_owned()
        });

        (format!("http://{}", addr), handle)
    }

    fn source_for(instance_url: String) -> HttpCommunitySource {
        let connection = OrgConnection {
            username: "admin@acme.example".to_string(),
            org_id: None,
            instance_url,
            access_token: "00Dxx!token".to_string(),
            api_version: "59.0".to_string(),
        };
        // Loopback test servers must not go through an ambient proxy
        let client = reqwest::Client::builder()
            .no_proxy()
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();
        HttpCommunitySource::new(client, connection)
    }

    #[tokio::test]
    async fn test_lists_communities() {
        let (url, server) = serve_once(
            "200 OK",
            r#"{"communities":[{"name":"cde","id":"0DB1","siteAsContainerEnabled":true},{"name":"xyz","id":"0DB2","siteAsContainerEnabled":false}],"total":2}"#,
        )
        .await;

        let records = assert_ok!(source_for(url).list_communities().await);
        assert_eq!(
            records,
            vec![
                CommunityRecord::new("cde", "0DB1", true),
                CommunityRecord::new("xyz", "0DB2", false),
            ]
        );

        let request = server.await.unwrap();
        assert!(request.starts_with("GET /services/data/v59.0/connect/communities/ HTTP/1.1"));
        assert!(request
            .to_ascii_lowercase()
            .contains("authorization: bearer 00dxx!token"));
    }

    #[tokio::test]
    async fn test_unauthorized_maps_to_unauthorized() {
        let (url, server) = serve_once(
            "401 Unauthorized",
            r#"[{"message":"Session expired or invalid","errorCode":"INVALID_SESSION_ID"}]"#,
        )
        .await;

        let err = source_for(url).list_communities().await.unwrap_err();
        assert_eq!(
            err,
            ProbeError::Unauthorized {
                status: 401,
                message: "INVALID_SESSION_ID: Session expired or invalid".to_string(),
            }
        );
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_server_error_maps_to_status() {
        let (url, server) = serve_once("503 Service Unavailable", "upstream busy").await;

        let err = source_for(url).list_communities().await.unwrap_err();
        assert_eq!(
            err,
            ProbeError::Status {
                status: 503,
                message: "upstream busy".to_string(),
            }
        );
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_malformed_payload() {
        let (url, server) = serve_once("200 OK", r#"{"items":[]}"#).await;

        let err = source_for(url).list_communities().await.unwrap_err();
        assert!(matches!(err, ProbeError::Malformed(_)));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_connection_refused_maps_to_network() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = source_for(format!("http://{}", addr))
            .list_communities()
            .await
            .unwrap_err();
        assert!(matches!(err, ProbeError::Network(_)));
    }

    #[test]
    fn test_error_message_truncates_unstructured_body() {
        let body = "x".repeat(500);
        assert_eq!(error_message(&body).len(), MAX_ERROR_BODY_CHARS);
    }
}

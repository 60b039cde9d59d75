//! Loopback org server for end-to-end tests
//!
//! Serves a scripted sequence of HTTP responses, one per connection. Once the
//! script runs out, the last response is repeated.

#![allow(dead_code)]

use community_probe_core::application::ExistenceProbe;
use community_probe_infra_http::{HttpCommunitySource, OrgConnection};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

#[derive(Clone)]
pub struct Reply {
    pub status: &'static str,
    pub body: String,
}

impl Reply {
    pub fn communities(entries: &[(&str, bool)]) -> Self {
        let communities: Vec<_> = entries
            .iter()
            .enumerate()
            .map(|(i, (name, enabled))| {
                serde_json::json!({
                    "name": name,
                    "id": format!("0DB00000000000{}", i),
                    "siteAsContainerEnabled": enabled,
                })
            })
            .collect();
        Self {
            status: "200 OK",
            body: serde_json::json!({ "communities": communities }).to_string(),
        }
    }

    pub fn error(status: &'static str, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
        }
    }
}

pub struct OrgServer {
    pub url: String,
    requests: Arc<AtomicUsize>,
}

impl OrgServer {
    pub async fn start(script: Vec<Reply>) -> Self {
        assert!(!script.is_empty(), "script needs at least one reply");

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        let requests = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&requests);

        tokio::spawn(async move {
            loop {
                let Ok((mut stream, _)) = listener.accept().await else {
                    break;
                };
                let n = counter.fetch_add(1, Ordering::SeqCst);
                let reply = script.get(n).unwrap_or(&script[script.len() - 1]).clone();

                tokio::spawn(async move {
                    let mut head = Vec::new();
                    let mut buf = [0u8; 4096];
                    while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                        match stream.read(&mut buf).await {
                            Ok(0) | Err(_) => return,
                            Ok(n) => head.extend_from_slice(&buf[..n]),
                        }
                    }
                    let response = format!(
                        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                        reply.status,
                        reply.body.len(),
                        reply.body
                    );
                    let _ = stream.write_all(response.as_bytes()).await;
                    let _ = stream.shutdown().await;
                });
            }
        });

        Self { url, requests }
    }

    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    pub fn probe(&self) -> ExistenceProbe {
        let connection = OrgConnection {
            username: "admin@acme.example".to_string(),
            org_id: Some("00Dxx0000000000".to_string()),
            instance_url: self.url.clone(),
            access_token: "00Dxx!token".to_string(),
            api_version: "59.0".to_string(),
        };
        // Loopback servers must not go through an ambient proxy
        let client = reqwest::Client::builder()
            .no_proxy()
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();
        ExistenceProbe::new(Arc::new(HttpCommunitySource::new(client, connection)))
    }
}

//! Server Config

use std::time::Duration;

use clap::Args;

/// Server runtime network settings.
#[derive(Debug, Args)]
pub struct ServerRuntimeConfig {
    /// Server host address
    #[arg(short = 'H', long, env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Server port
    #[arg(short, long, env = "SERVER_PORT", default_value = "8680")]
    pub port: u16,

    /// Maximum seconds a request may run before the server answers 503
    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value = "30")]
    pub request_timeout_secs: u64,
}

impl ServerRuntimeConfig {
    /// Get the socket address for binding.
    #[must_use]
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// The per-request timeout bound.
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use salvo::{prelude::*, test::TestClient, timeout::Timeout};
    use testresult::TestResult;

    use super::*;

    #[test]
    fn timeout_converts_to_a_duration() {
        let config = ServerRuntimeConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            request_timeout_secs: 30,
        };

        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }

    #[handler]
    async fn stall() -> &'static str {
        tokio::time::sleep(Duration::from_secs(5)).await;

        "done"
    }

    #[tokio::test]
    async fn test_requests_past_the_bound_are_cut_off() -> TestResult {
        let config = ServerRuntimeConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            request_timeout_secs: 0,
        };

        let service = Service::new(
            Router::new()
                .hoop(Timeout::new(config.request_timeout()))
                .push(Router::with_path("slow").get(stall)),
        );

        let res = TestClient::get("http://example.com/slow").send(&service).await;

        assert_eq!(res.status_code, Some(StatusCode::SERVICE_UNAVAILABLE));

        Ok(())
    }
}


use std::sync::LazyLock;
use std::time::Duration;

/// Timeout applied to every notification request
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// User-Agent sent with every request
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Global HTTP client instance
///
/// Initialized lazily on first access and shared by all providers so
/// connections to the same server are pooled.
///
/// # Example
/// ```ignore
/// use crate::external::client::{HTTP_CLIENT, REQUEST_TIMEOUT};
///
/// let response = HTTP_CLIENT
///     .post("https://ntfy.sh/alerts")
///     .timeout(REQUEST_TIMEOUT)
///     .body("disk almost full")
///     .send()
///     .await?;
/// ```
pub static HTTP_CLIENT: LazyLock<reqwest::Client> = LazyLock::new(|| {
    build_client().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Falling back to default HTTP client");
        reqwest::Client::new()
    })
});

fn build_client() -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        // Timeouts
        .timeout(REQUEST_TIMEOUT)
        .connect_timeout(Duration::from_secs(5))
        // Connection pooling
        .pool_max_idle_per_host(4)
        .pool_idle_timeout(Duration::from_secs(90))
        .user_agent(USER_AGENT)
        .build()
}

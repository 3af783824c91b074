//! Transport helpers shared by the HTTP-backed AI providers.

use std::future::Future;
use std::time::Duration;

use reqwest::{Response, StatusCode};
use tokio::time::sleep;

use crate::ports::AIError;

/// Runs `attempt` until it succeeds, fails with a non-retryable error, or
/// `max_retries` retries have been spent. Backoff doubles from one second.
pub(crate) async fn with_backoff<T, F, Fut>(
    provider: &str,
    max_retries: u32,
    mut attempt: F,
) -> Result<T, AIError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, AIError>>,
{
    let mut retry_count = 0;
    loop {
        match attempt().await {
            Ok(value) => return Ok(value),
            Err(err) if err.is_retryable() && retry_count < max_retries => {
                let delay = Duration::from_secs(1 << retry_count);
                tracing::warn!(
                    provider,
                    error = %err,
                    retry_count,
                    delay_secs = delay.as_secs(),
                    "AI request failed, backing off"
                );
                sleep(delay).await;
                retry_count += 1;
            }
            Err(err) => return Err(err),
        }
    }
}

/// Maps a reqwest send failure onto the provider error taxonomy.
pub(crate) fn transport_error(err: reqwest::Error, timeout: Duration) -> AIError {
    if err.is_timeout() {
        AIError::Timeout {
            timeout_secs: timeout.as_secs() as u32,
        }
    } else if err.is_connect() {
        AIError::network(format!("Connection failed: {}", err))
    } else {
        AIError::network(err.to_string())
    }
}

/// Passes successful responses through and turns error statuses into `AIError`.
pub(crate) async fn check_status(
    response: Response,
    default_retry_after: u32,
) -> Result<Response, AIError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(status_error(status, &body, default_retry_after))
}

pub(crate) fn status_error(status: StatusCode, body: &str, default_retry_after: u32) -> AIError {
    match status.as_u16() {
        401 | 403 => AIError::AuthenticationFailed,
        429 if body.contains("insufficient_quota") => AIError::quota_exceeded(body),
        429 => AIError::rate_limited(parse_retry_after(body).unwrap_or(default_retry_after)),
        400 => AIError::InvalidRequest(body.to_string()),
        500..=599 => AIError::unavailable(format!("Server error {}: {}", status, body)),
        _ => AIError::network(format!("Unexpected status {}: {}", status, body)),
    }
}

/// Extracts N from "... try again in Ns ..." in a JSON error message.
fn parse_retry_after(body: &str) -> Option<u32> {
    let parsed: serde_json::Value = serde_json::from_str(body).ok()?;
    let message = parsed.get("error")?.get("message")?.as_str()?;
    let rest = &message[message.find("try again in ")? + "try again in ".len()..];
    let end = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
    rest[..end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn retry_after_is_read_from_message() {
        let body = r#"{"error":{"message":"Rate limit exceeded. Please try again in 20s."}}"#;
        assert_eq!(parse_retry_after(body), Some(20));
        assert_eq!(parse_retry_after(r#"{"error":{"message":"slow down"}}"#), None);
        assert_eq!(parse_retry_after("not json"), None);
    }

    #[test]
    fn statuses_map_to_errors() {
        assert!(matches!(
            status_error(StatusCode::UNAUTHORIZED, "", 30),
            AIError::AuthenticationFailed
        ));
        assert!(matches!(
            status_error(StatusCode::TOO_MANY_REQUESTS, "{}", 30),
            AIError::RateLimited { retry_after_secs: 30 }
        ));
        assert!(matches!(
            status_error(
                StatusCode::TOO_MANY_REQUESTS,
                r#"{"error":{"code":"insufficient_quota"}}"#,
                30
            ),
            AIError::QuotaExceeded(_)
        ));
        assert!(status_error(StatusCode::BAD_GATEWAY, "", 30).is_retryable());
        assert!(!status_error(StatusCode::BAD_REQUEST, "bad", 30).is_retryable());
    }

    #[tokio::test(start_paused = true)]
    async fn backoff_retries_retryable_errors() {
        let attempts = AtomicU32::new(0);
        let counter = &attempts;
        let result = with_backoff("test", 3, || async move {
            if counter.fetch_add(1, Ordering::SeqCst) < 2 {
                Err(AIError::unavailable("busy"))
            } else {
                Ok("done")
            }
        })
        .await;

        assert_eq!(result.unwrap(), "done");
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn backoff_gives_up_after_max_retries() {
        let attempts = AtomicU32::new(0);
        let counter = &attempts;
        let result: Result<(), _> = with_backoff("test", 2, || async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Err(AIError::network("reset"))
        })
        .await;

        assert!(matches!(result, Err(AIError::Network(_))));
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn backoff_does_not_retry_permanent_errors() {
        let attempts = AtomicU32::new(0);
        let counter = &attempts;
        let result: Result<(), _> = with_backoff("test", 5, || async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Err(AIError::AuthenticationFailed)
        })
        .await;

        assert!(result.is_err());
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }
}

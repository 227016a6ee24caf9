//! Client execution logic with reconnection support.

use tsudoi_server::domain::DisplayName;

use crate::{
    error::ClientError,
    policy::{
        MAX_RECONNECT_ATTEMPTS, failures_after, reconnect_delay, should_attempt_reconnect,
        should_exit_immediately,
    },
    session::run_client_session,
    ui::spawn_line_reader,
};

/// Run the WebSocket client with reconnection logic
///
/// The username is validated with the same rules the relay applies before any
/// connection is attempted.
pub async fn run_client(url: String, username: String) -> Result<(), ClientError> {
    let username = DisplayName::new(username)
        .map_err(|e| ClientError::InvalidUsername(e.to_string()))?;
    let username = username.as_str();

    let mut input_rx = spawn_line_reader(username);
    let mut failures = 0;

    loop {
        tracing::info!("Connecting to {} as '{}'", url, username);

        let error = match run_client_session(&url, username, &mut input_rx).await {
            Ok(()) => {
                tracing::info!("Client session ended normally");
                return Ok(());
            }
            Err(e) => e,
        };

        if should_exit_immediately(&error) {
            return Err(error);
        }

        tracing::warn!("{}", error);
        failures = failures_after(&error, failures);

        if !should_attempt_reconnect(&error, failures, MAX_RECONNECT_ATTEMPTS) {
            tracing::error!(
                "Failed to reconnect after {} attempts. Exiting.",
                MAX_RECONNECT_ATTEMPTS
            );
            return Err(error);
        }

        let delay = reconnect_delay(failures);
        tracing::info!(
            "Reconnecting in {:?}... (attempt {}/{})",
            delay,
            failures,
            MAX_RECONNECT_ATTEMPTS
        );
        tokio::time::sleep(delay).await;
    }
}

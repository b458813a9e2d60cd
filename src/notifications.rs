/// Desktop notifications for the focus timer
/// Currently only implements macOS notifications

#[cfg(target_os = "macos")]
use std::process::Command;

use crate::timer::{Phase, TimerConfig};

/// Title and body announcing the end of `ended`
pub fn phase_message(ended: Phase, config: &TimerConfig) -> (String, String) {
    match ended {
        Phase::Work => (
            "FocusUp - Focus session done".to_string(),
            format!("Nice work! Take a {} minute break.", config.break_minutes),
        ),
        Phase::Break => (
            "FocusUp - Break over".to_string(),
            format!("Back to work: {} minutes of focus.", config.work_minutes),
        ),
    }
}

/// Send a notification when a timer phase ends
pub fn notify_phase_complete(ended: Phase, config: &TimerConfig) {
    let (title, body) = phase_message(ended, config);

    #[cfg(target_os = "macos")]
    {
        let script = format!(
            r#"display notification "{}" with title "{}""#,
            body.replace('"', "\\\""),
            title.replace('"', "\\\"")
        );

        if let Err(e) = Command::new("osascript").arg("-e").arg(&script).output() {
            tracing::debug!(error = %e, "Notification failed");
        }
    }

    #[cfg(not(target_os = "macos"))]
    {
        tracing::debug!(%title, %body, "Phase complete");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_messages_mention_next_duration() {
        let config = TimerConfig {
            work_minutes: 50,
            break_minutes: 10,
        };

        let (title, body) = phase_message(Phase::Work, &config);
        assert!(title.contains("Focus session done"));
        assert!(body.contains("10 minute break"));

        let (title, body) = phase_message(Phase::Break, &config);
        assert!(title.contains("Break over"));
        assert!(body.contains("50 minutes"));
    }
}

use crate::error::Result;
use crate::input::{Action, InputEvent, Phase};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Instant;

/// Input event with the time it was applied
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoggedEvent {
    /// Milliseconds since the log was created
    pub timestamp_ms: u64,
    pub event: InputEvent,
}

/// Record of every key event applied during a session
pub struct InputLog {
    start_time: Instant,
    events: Vec<LoggedEvent>,
}

impl Default for InputLog {
    fn default() -> Self {
        Self::new()
    }
}

impl InputLog {
    pub fn new() -> Self {
        InputLog {
            start_time: Instant::now(),
            events: Vec::new(),
        }
    }

    /// Log an event with the current timestamp
    pub fn record(&mut self, event: InputEvent) {
        let timestamp_ms = self.start_time.elapsed().as_millis() as u64;
        self.events.push(LoggedEvent {
            timestamp_ms,
            event,
        });
    }

    pub fn events(&self) -> &[LoggedEvent] {
        &self.events
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.events)?)
    }

    /// Save log to a JSON file
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Read a saved log back
    pub fn load_events(path: impl AsRef<Path>) -> Result<Vec<LoggedEvent>> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Get summary statistics
    pub fn summary(&self) -> String {
        let presses = |action: Action| {
            self.events
                .iter()
                .filter(|logged| logged.event.action == action && logged.event.phase == Phase::Press)
                .count()
        };

        let duration = self.events.last().map(|last| last.timestamp_ms).unwrap_or(0);

        format!(
            "Session Duration: {}ms\n\
             Total Events: {}\n\
             Presses: {} forward, {} backward, {} left, {} right",
            duration,
            self.events.len(),
            presses(Action::MoveForward),
            presses(Action::MoveBackward),
            presses(Action::TurnLeft),
            presses(Action::TurnRight),
        )
    }
}

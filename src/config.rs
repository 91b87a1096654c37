use std::time::Duration;

/// Environment variable naming a file to append debug logs to.
pub const LOG_ENV: &str = "TERMFIREWORKS_LOG";

/// Fixed tuning for a run. Only tests construct anything but the default.
#[derive(Debug, Clone)]
pub struct Settings {
    pub max_concurrent: usize,
    pub spawn_probability: f64, // Per frame, while under the cap
    pub frame_interval: Duration,
    pub min_rows: usize,
    pub min_cols: usize,
    pub warning_pause: Duration, // How long the too-small notice stays up
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_concurrent: 8,
            spawn_probability: 0.1,
            frame_interval: Duration::from_millis(100),
            min_rows: 20,
            min_cols: 50,
            warning_pause: Duration::from_secs(2),
        }
    }
}

impl Settings {
    pub fn too_small_message(&self) -> String {
        format!(
            "Window too small! Please resize to at least {}x{}.",
            self.min_rows, self.min_cols
        )
    }
}

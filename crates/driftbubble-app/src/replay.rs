//! Headless replay of scripted widget events.

use std::path::Path;

use driftbubble_core::{
    AnimationId, ConfigError, FloatingWidget, HostCall, RecordingHost, WidgetConfig, WidgetEvent,
};
use thiserror::Error;

/// Replay errors.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Script parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

pub type ReplayResult<T> = Result<T, ReplayError>;

/// Drives a widget against a recording host whose animations finish as soon
/// as they are requested.
pub struct Replay {
    widget: FloatingWidget<RecordingHost>,
    /// Number of recorded calls already scanned for animation requests.
    scanned: usize,
}

impl Replay {
    pub fn new(host: RecordingHost, config: &WidgetConfig) -> Self {
        Self {
            widget: FloatingWidget::new(host, config),
            scanned: 0,
        }
    }

    pub fn widget(&self) -> &FloatingWidget<RecordingHost> {
        &self.widget
    }

    /// Feed one event, then complete every animation it started.
    pub fn step(&mut self, event: WidgetEvent) {
        log::debug!("Replaying {:?}", event);
        self.widget.handle_event(event);
        self.complete_animations();
    }

    /// Complete requests in issue order until none are outstanding.
    /// Completions may issue follow-up requests, such as a bounds correction.
    fn complete_animations(&mut self) {
        loop {
            let issued: Vec<AnimationId> = self.widget.host().calls()[self.scanned..]
                .iter()
                .filter_map(|call| match call {
                    HostCall::Animate(request) => Some(request.id),
                    _ => None,
                })
                .collect();
            self.scanned = self.widget.host().calls().len();
            if issued.is_empty() {
                return;
            }
            for id in issued {
                self.widget.handle_event(WidgetEvent::AnimationComplete { id });
            }
        }
    }

    /// Drain the host calls recorded so far.
    pub fn take_calls(&mut self) -> Vec<HostCall> {
        self.scanned = 0;
        self.widget.host_mut().take_calls()
    }
}

/// Parse a JSON array of events.
pub fn parse_script(json: &str) -> ReplayResult<Vec<WidgetEvent>> {
    Ok(serde_json::from_str(json)?)
}

/// Replay `events` from a fresh widget and return every host call made.
pub fn run_script(events: &[WidgetEvent], config: &WidgetConfig) -> Vec<HostCall> {
    let mut replay = Replay::new(RecordingHost::default(), config);
    for event in events {
        replay.step(*event);
    }
    log::info!("Replayed {} events, final state {:?}", events.len(), replay.widget().state());
    replay.take_calls()
}

/// Load a script and an optional config from disk and replay it.
pub fn run_script_file(script: &Path, config: Option<&Path>) -> ReplayResult<Vec<HostCall>> {
    let config = match config {
        Some(path) => WidgetConfig::load(path)?,
        None => WidgetConfig::default(),
    };
    let events = parse_script(&std::fs::read_to_string(script)?)?;
    Ok(run_script(&events, &config))
}

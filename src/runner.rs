use std::time::Duration;

use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, info, warn};

use crate::controller::{ControlChange, ControlState, Controller, Debouncer};
use crate::fetcher::{FetchError, Fetcher, RetryPolicy};
use crate::output::View;

pub const DEFAULT_URL: &str = "https://dujour.squiz.cloud/developer-challenge/data";

#[derive(Clone, Debug)]
pub struct Options {
    pub url: String,
    pub attempts: u32,
    pub timeout_seconds: u64,
    pub debounce_ms: u64,
    pub controls: ControlState,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            attempts: 3,
            timeout_seconds: 5,
            debounce_ms: 300,
            controls: ControlState::default(),
        }
    }
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("invalid URL: {url}")]
    InvalidUrl { url: String },

    #[error("invalid attempts {value}, expected at least 1")]
    InvalidAttempts { value: u32 },

    #[error("invalid timeout {value}s, expected at least 1")]
    InvalidTimeout { value: u64 },

    #[error("failed to load records: {source}")]
    Fetch {
        #[from]
        source: FetchError,
    },

    #[error("failed to read control input: {source}")]
    Input {
        #[source]
        source: std::io::Error,
    },
}

#[derive(Clone, Debug)]
pub struct Runner {
    options: Options,
    fetcher: Fetcher,
}

impl Runner {
    pub fn new(options: Options) -> Result<Self, RunnerError> {
        let url = options.url.trim();
        match reqwest::Url::parse(url) {
            Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {}
            _ => {
                return Err(RunnerError::InvalidUrl {
                    url: options.url.clone(),
                })
            }
        }
        if options.attempts == 0 {
            return Err(RunnerError::InvalidAttempts {
                value: options.attempts,
            });
        }
        if options.timeout_seconds == 0 {
            return Err(RunnerError::InvalidTimeout {
                value: options.timeout_seconds,
            });
        }
        let fetcher = Fetcher::new(RetryPolicy {
            attempts: options.attempts,
            timeout: Duration::from_secs(options.timeout_seconds),
        })?;
        Ok(Self { options, fetcher })
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Fetches the records and returns a controller in the ready phase.
    pub async fn start(&self) -> Result<Controller, RunnerError> {
        let mut controller = Controller::new(self.options.controls.clone());
        controller
            .initialize(&self.fetcher, self.options.url.trim())
            .await?;
        Ok(controller)
    }

    /// Reads control changes line by line and re-renders after each quiet
    /// window. Returns the number of renders performed.
    ///
    /// `quit` or `exit` ends the session; at end of input a pending render
    /// still runs once its window has passed.
    pub async fn drive<R, F>(
        &self,
        controller: &mut Controller,
        input: R,
        mut on_render: F,
    ) -> Result<usize, RunnerError>
    where
        R: AsyncBufRead + Unpin,
        F: FnMut(&View),
    {
        let mut debouncer = Debouncer::new(Duration::from_millis(self.options.debounce_ms));
        let mut lines = input.lines();
        let mut input_open = true;
        let mut renders = 0;

        loop {
            tokio::select! {
                line = lines.next_line(), if input_open => {
                    match line.map_err(|e| RunnerError::Input { source: e })? {
                        Some(line) => {
                            let trimmed = line.trim();
                            if trimmed.is_empty() {
                                continue;
                            }
                            if trimmed.eq_ignore_ascii_case("quit") || trimmed.eq_ignore_ascii_case("exit") {
                                debouncer.cancel();
                                break;
                            }
                            match ControlChange::parse(trimmed) {
                                Ok(change) => {
                                    controller.apply_change(change);
                                    debouncer.trigger();
                                }
                                Err(e) => warn!(input = trimmed, error = %e, "ignoring control input"),
                            }
                        }
                        None => {
                            debug!("control input closed");
                            input_open = false;
                        }
                    }
                }
                _ = debouncer.fired(), if debouncer.is_pending() => {
                    if let Some(view) = controller.refresh() {
                        renders += 1;
                        on_render(view);
                    }
                }
                else => break,
            }
        }

        info!(renders, "session finished");
        Ok(renders)
    }
}

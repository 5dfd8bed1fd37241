//! Backend connection model - manages the rules-engine process lifecycle.
//!
//! The rules engine is an external program speaking line-delimited JSON on
//! stdin/stdout. This model owns the process and the transport:
//! - Process I/O runs on OS threads (reader/writer)
//! - A GPUI background task polls the event channel, parses lines, and
//!   emits typed events (replies and push updates) to observers
//!
//! Nothing here interprets game state; that is the game model's job.

use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

use anyhow::{Context as _, Result};
use gpui::{AsyncApp, Context, EventEmitter, Task, WeakEntity};
use tracing::{debug, info, warn};

use crate::domain::protocol::{self, Incoming, Reply};
use crate::domain::{BoardSnapshot, Outgoing};

/// Messages sent from the reader thread to the model
#[derive(Debug)]
enum TransportEvent {
    /// A raw line from the backend
    Line(String),
    /// Backend process exited
    Exited,
    /// Error occurred while reading
    Error(String),
}

/// Events emitted to observers on the main thread
#[derive(Debug, Clone)]
pub enum BackendEvent {
    /// An answer to a request, correlated by id
    Reply(Reply),
    /// An unsolicited snapshot delivery
    Update(BoardSnapshot),
    /// The backend process is gone
    Exited,
}

/// The backend model - owns the engine process and its transport
pub struct BackendModel {
    /// Whether the backend process is currently running
    running: bool,
    /// Channel receiver for transport events (polled by background task)
    event_receiver: Option<Receiver<TransportEvent>>,
    /// Channel sender for request lines to the writer thread
    line_sender: Option<Sender<String>>,
    /// Handle to the backend process
    process: Option<Child>,
    /// Background polling task (kept alive while the backend is running)
    _poll_task: Option<Task<()>>,
}

impl EventEmitter<BackendEvent> for BackendModel {}

impl BackendModel {
    pub fn new() -> Self {
        Self {
            running: false,
            event_receiver: None,
            line_sender: None,
            process: None,
            _poll_task: None,
        }
    }

    /// Check if the backend process is currently running
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Start the backend process.
    ///
    /// Must be called from a Context<BackendModel> to spawn the background
    /// polling task.
    pub fn start(&mut self, program: &Path, cx: &mut Context<Self>) -> Result<()> {
        if self.running {
            return Ok(());
        }

        info!(backend = %program.display(), "starting backend");

        let mut child = Command::new(program)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .with_context(|| format!("failed to start backend `{}`", program.display()))?;

        let stdin = child.stdin.take().context("failed to open backend stdin")?;
        let stdout = child.stdout.take().context("failed to open backend stdout")?;

        let (event_tx, event_rx) = mpsc::channel::<TransportEvent>();
        let (line_tx, line_rx) = mpsc::channel::<String>();

        // Reader thread (OS thread for blocking I/O)
        let event_tx_clone = event_tx.clone();
        thread::spawn(move || {
            let reader = BufReader::new(stdout);
            for line in reader.lines() {
                match line {
                    Ok(text) => {
                        if event_tx_clone.send(TransportEvent::Line(text)).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        let _ = event_tx_clone.send(TransportEvent::Error(e.to_string()));
                        break;
                    }
                }
            }
            let _ = event_tx_clone.send(TransportEvent::Exited);
        });

        // Writer thread (OS thread for blocking I/O)
        thread::spawn(move || {
            let mut writer = stdin;
            while let Ok(line) = line_rx.recv() {
                if writeln!(writer, "{}", line).is_err() {
                    break;
                }
                if writer.flush().is_err() {
                    break;
                }
            }
        });

        self.process = Some(child);
        self.event_receiver = Some(event_rx);
        self.line_sender = Some(line_tx);
        self.running = true;

        // Background polling task that pushes events to observers
        let poll_task = cx.spawn(
            async move |weak_entity: WeakEntity<BackendModel>, cx: &mut AsyncApp| {
                Self::run_event_loop(weak_entity, cx).await;
            },
        );
        self._poll_task = Some(poll_task);

        Ok(())
    }

    /// Queue one request line for the writer thread.
    pub fn send(&self, outgoing: &Outgoing) {
        let line = match protocol::encode_line(outgoing.id, &outgoing.command) {
            Ok(line) => line,
            Err(error) => {
                warn!(%error, "failed to encode request");
                return;
            }
        };

        debug!(id = outgoing.id, %line, "sending request");
        if let Some(tx) = &self.line_sender {
            let _ = tx.send(line);
        }
    }

    /// Background event loop that polls the channel and updates the model
    async fn run_event_loop(weak_entity: WeakEntity<BackendModel>, cx: &mut AsyncApp) {
        const POLL_INTERVAL: Duration = Duration::from_millis(16); // ~60fps

        loop {
            // Small delay to avoid busy-waiting
            cx.background_executor().timer(POLL_INTERVAL).await;

            // Try to update the entity - if it's gone, exit the loop
            let should_continue = weak_entity.update(cx, |backend, cx| {
                if !backend.running {
                    return false;
                }

                let had_events = backend.drain_events(cx);
                if had_events {
                    cx.notify();
                }

                true
            });

            match should_continue {
                Ok(true) => continue,
                _ => break, // Backend stopped or entity dropped
            }
        }
    }

    /// Drain and dispatch all pending transport events.
    /// Returns true if any events were processed.
    fn drain_events(&mut self, cx: &mut Context<Self>) -> bool {
        let events: Vec<TransportEvent> = match &self.event_receiver {
            Some(rx) => {
                let mut collected = Vec::new();
                while let Ok(event) = rx.try_recv() {
                    collected.push(event);
                }
                collected
            }
            None => return false,
        };

        if events.is_empty() {
            return false;
        }

        for event in events {
            match event {
                TransportEvent::Line(line) => {
                    if line.trim().is_empty() {
                        continue;
                    }
                    match protocol::parse_line(&line) {
                        Ok(Incoming::Reply(reply)) => {
                            debug!(id = reply.id, "reply received");
                            cx.emit(BackendEvent::Reply(reply));
                        }
                        Ok(Incoming::Push(push)) => {
                            debug!(event = %push.event, "push received");
                            cx.emit(BackendEvent::Update(push.board));
                        }
                        Err(error) => {
                            warn!(%error, %line, "dropping malformed backend line");
                        }
                    }
                }
                TransportEvent::Exited => {
                    info!("backend exited");
                    self.running = false;
                    cx.emit(BackendEvent::Exited);
                }
                TransportEvent::Error(e) => {
                    warn!(error = %e, "backend read failed");
                }
            }
        }

        true
    }

    /// Stop the backend process
    pub fn stop(&mut self) {
        if !self.running {
            return;
        }

        // Close the channels (this makes the polling loop exit)
        self.line_sender = None;
        self.event_receiver = None;
        self._poll_task = None;

        // Kill the process if it's still running
        if let Some(mut child) = self.process.take() {
            let _ = child.kill();
            let _ = child.wait();
        }

        self.running = false;
        info!("backend stopped");
    }
}

impl Default for BackendModel {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for BackendModel {
    fn drop(&mut self) {
        self.stop();
    }
}

//! The event loop that owns the controller.
//!
//! Push frames, fetch completions, and user commands arrive over channels
//! and each is applied as one state update. After every update pending
//! fetches are dispatched and the renderer redraws.

mod commands;
mod fetcher;
mod render;

#[cfg(test)]
mod tests;

pub use commands::{CommandError, UserCommand, HELP};
pub use render::HeadlessRenderer;

use std::sync::Arc;

use fetcher::FetchCompletion;
use mosaic_client::{decode_directory, ConversationApi, PushClient, PushEvent};
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::controller::AppController;

pub struct Runtime {
    controller: AppController,
    api: Arc<dyn ConversationApi>,
    push: Option<PushClient>,
    push_rx: mpsc::Receiver<PushEvent>,
    fetch_tx: mpsc::Sender<FetchCompletion>,
    fetch_rx: mpsc::Receiver<FetchCompletion>,
    renderer: HeadlessRenderer,
}

impl Runtime {
    pub fn new(
        controller: AppController,
        api: Arc<dyn ConversationApi>,
        push: Option<PushClient>,
        push_rx: mpsc::Receiver<PushEvent>,
        renderer: HeadlessRenderer,
    ) -> Self {
        let (fetch_tx, fetch_rx) = mpsc::channel(64);
        Self {
            controller,
            api,
            push,
            push_rx,
            fetch_tx,
            fetch_rx,
            renderer,
        }
    }

    /// Fetch the conversation directory once. Failure leaves the list
    /// empty; conversations still become known through live events.
    pub async fn load_directory(&mut self) {
        let body = match self.api.fetch_conversation_list().await {
            Ok(body) => body,
            Err(e) => {
                warn!(error = %e, "Could not fetch conversation directory");
                return;
            }
        };
        match decode_directory(&body) {
            Ok(summaries) => self.controller.seed_directory(summaries),
            Err(e) => warn!(error = %e, "Dropping conversation directory"),
        }
        self.after_update();
    }

    /// Run until `Quit`, the end of the command stream, or Ctrl-C.
    /// Returns the controller for inspection.
    pub async fn run(mut self, mut commands: mpsc::Receiver<UserCommand>) -> AppController {
        self.after_update();

        loop {
            tokio::select! {
                Some(event) = self.push_rx.recv() => self.handle_push(event),
                Some(done) = self.fetch_rx.recv() => {
                    self.controller.on_fetch_completed(done.ticket, done.result);
                }
                command = commands.recv() => match command {
                    Some(UserCommand::Quit) | None => break,
                    Some(command) => self.handle_command(command).await,
                },
                _ = tokio::signal::ctrl_c() => {
                    info!("Interrupted");
                    break;
                }
            }
            self.after_update();
        }

        if let Some(push) = &self.push {
            push.disconnect().await;
        }
        info!("Event loop stopped");
        self.controller
    }

    fn handle_push(&mut self, event: PushEvent) {
        match event {
            PushEvent::Frame(frame) => {
                // Decode failures are logged by the controller.
                let _ = self.controller.on_live_event_frame(&frame);
            }
            PushEvent::Connected => info!("Push channel connected"),
            PushEvent::Disconnected => info!("Push channel disconnected"),
            PushEvent::Error(e) => warn!(error = %e, "Push channel error"),
        }
    }

    async fn handle_command(&mut self, command: UserCommand) {
        match command {
            UserCommand::Open(id) => self.controller.open_conversation(id),
            UserCommand::Close(id) => {
                if !self.controller.close_conversation(&id) {
                    self.renderer.line(&format!("{id} is not open"));
                }
            }
            UserCommand::Layout(tree) => {
                if let Err(e) = self.controller.on_user_layout_edit(tree) {
                    self.renderer.line(&format!("layout rejected: {e}"));
                }
            }
            UserCommand::Send {
                conversation_id,
                text,
            } => {
                let Some(message) = self.controller.send_message(&conversation_id, &text) else {
                    return;
                };
                match &self.push {
                    Some(push) => push.send_message(&message).await,
                    None => warn!(conversation_id = %conversation_id, "No push channel; message dropped"),
                }
            }
            UserCommand::Retry(id) => self.controller.retry_conversation(&id),
            UserCommand::List => {
                let entries = self.controller.conversation_list();
                self.renderer.print_list(&entries);
            }
            UserCommand::Quit => {}
        }
    }

    /// Dispatch queued fetches, redraw, and feed the windows' visible
    /// counts back as render ticks. Ticks can queue more fetches.
    fn after_update(&mut self) {
        let ticks = self.renderer.render(&self.controller);
        for (id, visible) in ticks {
            self.controller.on_render_tick(&id, visible);
        }
        let requests = self.controller.drain_fetch_requests();
        if !requests.is_empty() {
            fetcher::spawn_fetches(&self.api, requests, &self.fetch_tx);
        }
    }
}


//! Headless text renderer.
//!
//! Redraws after the controller publishes notifications and reports how
//! many events each redrawn window shows, which drives history pagination.

use std::collections::BTreeSet;
use std::io::Write;

use chrono::{DateTime, Utc};
use mosaic_common::{AppEvent, ConversationId, Timestamp};
use mosaic_sync::ConversationLog;
use mosaic_tiling::{Direction, PaneNode};
use tokio::sync::broadcast::{self, error::TryRecvError};
use tracing::{debug, warn};

use crate::controller::{AppController, ConversationEntry};

/// Events shown per window.
const WINDOW_ROWS: usize = 20;

pub struct HeadlessRenderer {
    events: broadcast::Receiver<AppEvent>,
    out: Box<dyn Write + Send>,
}

impl HeadlessRenderer {
    pub fn new(events: broadcast::Receiver<AppEvent>, out: Box<dyn Write + Send>) -> Self {
        Self { events, out }
    }

    /// Drain pending notifications and redraw if any arrived. Returns the
    /// visible event count of every window whose content changed.
    pub fn render(&mut self, controller: &AppController) -> Vec<(ConversationId, usize)> {
        let mut redraw = false;
        let mut changed: BTreeSet<ConversationId> = BTreeSet::new();
        loop {
            match self.events.try_recv() {
                Ok(AppEvent::LayoutChanged) => {
                    redraw = true;
                    changed.extend(controller.layout().leaves());
                }
                Ok(AppEvent::LogUpdated(id)) => {
                    redraw = true;
                    changed.insert(id);
                }
                Ok(AppEvent::Notice(text)) => {
                    self.line(&format!("! {text}"));
                }
                Ok(AppEvent::DirectoryLoaded(count)) => {
                    self.line(&format!("{count} conversations available"));
                }
                Ok(_) => redraw = true,
                Err(TryRecvError::Lagged(skipped)) => {
                    debug!(skipped, "Renderer lagged; redrawing everything");
                    redraw = true;
                    changed.extend(controller.layout().leaves());
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }

        if !redraw {
            return Vec::new();
        }
        self.draw(controller);

        let placed = controller.layout().list_placed_conversations();
        changed
            .into_iter()
            .filter(|id| placed.contains(id))
            .map(|id| {
                let visible = controller
                    .log(&id)
                    .map_or(0, |log| log.len().min(WINDOW_ROWS));
                (id, visible)
            })
            .collect()
    }

    pub fn print_list(&mut self, entries: &[ConversationEntry]) {
        if entries.is_empty() {
            self.line("no conversations");
            return;
        }
        for entry in entries {
            let marker = if entry.open { '*' } else { ' ' };
            self.line(&format!(
                "{marker} {:<24} {:<32} {:>8}  {}",
                entry.id.as_str(),
                entry.display_name,
                format_time(entry.last_modified),
                entry.load_state
            ));
        }
    }

    pub fn line(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{text}") {
            warn!(error = %e, "Failed to write output");
        }
    }

    fn draw(&mut self, controller: &AppController) {
        let layout = match controller.layout().root() {
            Some(root) => describe(root),
            None => "(no open conversations)".to_string(),
        };
        self.line(&format!("== layout: {layout}"));

        for id in controller.layout().leaves() {
            match controller.log(&id) {
                Some(log) => self.draw_window(log),
                None => self.line(&format!("[{id}] (unknown)")),
            }
        }
        let _ = self.out.flush();
    }

    fn draw_window(&mut self, log: &ConversationLog) {
        self.line(&format!(
            "[{}] {} ({} events)",
            log.conversation_id(),
            log.load_state(),
            log.len()
        ));
        let events = log.events();
        let start = events.len().saturating_sub(WINDOW_ROWS);
        for event in &events[start..] {
            self.line(&format!("  {}  {}", format_time(event.timestamp), event.content));
        }
    }
}

/// One-line description of a pane tree, e.g. `c1 | (c3 / c2)`.
pub(crate) fn describe(node: &PaneNode) -> String {
    match node {
        PaneNode::Leaf { conversation_id } => conversation_id.to_string(),
        PaneNode::Split {
            direction,
            first,
            second,
            ..
        } => {
            let sep = match direction {
                Direction::Row => "|",
                Direction::Column => "/",
            };
            format!("({} {sep} {})", describe(first), describe(second))
        }
    }
}

pub(crate) fn format_time(timestamp: Timestamp) -> String {
    i64::try_from(timestamp)
        .ok()
        .and_then(DateTime::<Utc>::from_timestamp_micros)
        .map(|t| t.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "--:--:--".to_string())
}

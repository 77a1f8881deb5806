// SPDX-License-Identifier: MPL-2.0
//! Headless display policy for published messages.
//!
//! The `Stack` is what a renderer keeps between frames: it drops duplicate
//! messages when uniqueness is on, filters by reference id, limits how many
//! messages are visible at once, and expires messages whose ttl elapsed.
//! Drawing the stack is left to the renderer.

use crate::bus::MessageSink;
use crate::config::GrowlConfig;
use crate::notification::Message;
use std::collections::VecDeque;
use std::time::Instant;

/// Unique identifier for an entry in a stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryId(u64);

/// A message held by the stack.
#[derive(Debug, Clone)]
pub struct Entry {
    id: EntryId,
    message: Message,
    /// When the entry became visible. Queued entries start their ttl on promotion.
    shown_at: Option<Instant>,
}

impl Entry {
    #[must_use]
    pub fn id(&self) -> EntryId {
        self.id
    }

    #[must_use]
    pub fn message(&self) -> &Message {
        &self.message
    }

    fn is_expired(&self, now: Instant) -> bool {
        match (self.shown_at, self.message.ttl_duration()) {
            (Some(shown_at), Some(ttl)) => now.saturating_duration_since(shown_at) >= ttl,
            _ => false,
        }
    }

    fn same_content(&self, message: &Message) -> bool {
        self.message.text() == message.text() && self.message.severity() == message.severity()
    }
}

/// Visible and queued messages for one renderer.
#[derive(Debug, Default)]
pub struct Stack {
    /// Currently visible entries (newest first).
    visible: VecDeque<Entry>,
    /// Entries waiting for a free slot.
    queue: VecDeque<Entry>,
    only_unique: bool,
    inline: bool,
    limit: Option<usize>,
    reference: Option<u64>,
    next_id: u64,
}

impl Stack {
    /// Creates an empty stack using the display policy from `config`.
    #[must_use]
    pub fn new(config: &GrowlConfig) -> Self {
        Self {
            only_unique: config.only_unique_messages,
            inline: config.inline_messages,
            limit: config.limit_messages,
            ..Self::default()
        }
    }

    /// Accept only messages tagged with `reference_id`.
    #[must_use]
    pub fn with_reference(mut self, reference_id: u64) -> Self {
        self.reference = Some(reference_id);
        self
    }

    /// Whether the renderer should draw this stack inline.
    #[must_use]
    pub fn is_inline(&self) -> bool {
        self.inline
    }

    /// Adds a message. Returns `None` if it was filtered out or is a duplicate.
    pub fn push(&mut self, message: Message) -> Option<EntryId> {
        self.push_at(message, Instant::now())
    }

    pub fn push_at(&mut self, message: Message, now: Instant) -> Option<EntryId> {
        if let Some(reference) = self.reference {
            if message.reference_id() != reference {
                return None;
            }
        }

        if self.only_unique
            && self
                .visible
                .iter()
                .chain(self.queue.iter())
                .any(|entry| entry.same_content(&message))
        {
            log::trace!("skipping duplicate {} message {:?}", message.severity(), message.text());
            return None;
        }

        let mut entry = Entry {
            id: self.next_entry_id(),
            message,
            shown_at: None,
        };
        let id = entry.id;

        if self.has_room() {
            entry.shown_at = Some(now);
            self.visible.push_front(entry);
        } else {
            self.queue.push_back(entry);
        }
        Some(id)
    }

    /// Dismisses an entry by its ID.
    ///
    /// Returns `true` if the entry was found and removed.
    pub fn dismiss(&mut self, id: EntryId) -> bool {
        self.dismiss_at(id, Instant::now())
    }

    fn dismiss_at(&mut self, id: EntryId, now: Instant) -> bool {
        if let Some(pos) = self.visible.iter().position(|e| e.id == id) {
            self.visible.remove(pos);
            self.promote_from_queue(now);
            return true;
        }

        if let Some(pos) = self.queue.iter().position(|e| e.id == id) {
            self.queue.remove(pos);
            return true;
        }

        false
    }

    /// Removes visible entries whose ttl has elapsed.
    ///
    /// Should be called periodically (e.g., every 100-500ms).
    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    pub fn tick_at(&mut self, now: Instant) {
        let expired: Vec<EntryId> = self
            .visible
            .iter()
            .filter(|e| e.is_expired(now))
            .map(Entry::id)
            .collect();

        for id in expired {
            self.dismiss_at(id, now);
        }
    }

    pub fn visible(&self) -> impl Iterator<Item = &Entry> {
        self.visible.iter()
    }

    #[must_use]
    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    #[must_use]
    pub fn queued_count(&self) -> usize {
        self.queue.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.visible.is_empty() && self.queue.is_empty()
    }

    pub fn clear(&mut self) {
        self.visible.clear();
        self.queue.clear();
    }

    fn next_entry_id(&mut self) -> EntryId {
        let id = EntryId(self.next_id);
        self.next_id += 1;
        id
    }

    fn has_room(&self) -> bool {
        self.limit.is_none_or(|limit| self.visible.len() < limit)
    }

    fn promote_from_queue(&mut self, now: Instant) {
        while self.has_room() {
            let Some(mut entry) = self.queue.pop_front() else {
                break;
            };
            entry.shown_at = Some(now);
            self.visible.push_front(entry);
        }
    }
}

impl MessageSink for Stack {
    fn accept(&mut self, message: &Message) {
        self.push(message.clone());
    }
}

//! In-flight upload bookkeeping.
//!
//! Each upload is keyed by file name. Registering a name that is already in
//! flight cancels the earlier request, so at most one upload per name is live.
//! Tickets carry a generation number: once an entry is cancelled or replaced,
//! its ticket stops being current and any late progress or completion for it
//! is ignored.

use std::collections::HashMap;

/// Anything that can abort an in-flight upload.
pub trait CancelUpload {
    fn cancel(&self);
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadTicket {
    pub file_name: String,
    generation: u64,
}

struct PendingUpload<H> {
    generation: u64,
    handle: H,
}

pub struct UploadTracker<H> {
    pending: HashMap<String, PendingUpload<H>>,
    next_generation: u64,
}

impl<H> Default for UploadTracker<H> {
    fn default() -> Self {
        Self {
            pending: HashMap::new(),
            next_generation: 0,
        }
    }
}

impl<H: CancelUpload> UploadTracker<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand out the ticket the next `register` call will return for a name.
    ///
    /// Upload callbacks need the ticket before the request (and so the
    /// handle) exists.
    pub fn reserve(&mut self, file_name: &str) -> UploadTicket {
        self.next_generation += 1;
        UploadTicket {
            file_name: file_name.to_string(),
            generation: self.next_generation,
        }
    }

    /// Store `handle` under the ticket's name, cancelling any upload it displaces.
    pub fn register(&mut self, ticket: &UploadTicket, handle: H) {
        let previous = self.pending.insert(
            ticket.file_name.clone(),
            PendingUpload {
                generation: ticket.generation,
                handle,
            },
        );
        if let Some(prev) = previous {
            log::debug!("Replacing in-flight upload of {}", ticket.file_name);
            prev.handle.cancel();
        }
    }

    /// Cancel the upload for `file_name` if one is in flight and forget it.
    /// Returns whether anything was cancelled.
    pub fn cancel_and_forget(&mut self, file_name: &str) -> bool {
        match self.pending.remove(file_name) {
            Some(entry) => {
                entry.handle.cancel();
                true
            }
            None => false,
        }
    }

    pub fn is_current(&self, ticket: &UploadTicket) -> bool {
        self.pending
            .get(&ticket.file_name)
            .is_some_and(|e| e.generation == ticket.generation)
    }

    /// Remove a finished upload without cancelling it. Stale tickets are
    /// ignored so a newer upload of the same name stays tracked.
    pub fn complete(&mut self, ticket: &UploadTicket) -> Option<H> {
        if !self.is_current(ticket) {
            return None;
        }
        self.pending.remove(&ticket.file_name).map(|e| e.handle)
    }
}

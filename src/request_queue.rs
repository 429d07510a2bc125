use std::collections::{vec_deque, VecDeque};

use crate::song::SongRequest;

/// Result of trying to queue a request
#[derive(Debug, PartialEq)]
#[must_use]
pub enum EnqueueOutcome {
    Queued,
    /// the same singer already has the same song queued, the request is handed back
    Duplicate(SongRequest),
}

/// FIFO of pending requests, never holding two equal requests
#[derive(Debug, Default)]
pub struct RequestQueue {
    requests: VecDeque<SongRequest>,
}

impl RequestQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, request: &SongRequest) -> bool {
        self.requests.contains(request)
    }

    pub fn enqueue(&mut self, request: SongRequest) -> EnqueueOutcome {
        if self.contains(&request) {
            return EnqueueOutcome::Duplicate(request);
        }
        self.requests.push_back(request);
        EnqueueOutcome::Queued
    }

    /// Takes the request at the head, `None` when nothing is queued.
    pub fn dequeue(&mut self) -> Option<SongRequest> {
        self.requests.pop_front()
    }

    pub fn size(&self) -> usize {
        self.requests.len()
    }

    pub fn iter(&self) -> vec_deque::Iter<'_, SongRequest> {
        self.requests.iter()
    }
}

//! Provides a queue of sample batches that worker threads pull their
//! work from. The queue itself is not changed after creation, we
//! simply work through it with an atomic counter to track the index
//! of the next batch to work on.

use std::sync::atomic::{AtomicUsize, Ordering};

/// A contiguous run of samples. The batch index doubles as the
/// stream selector of the generator that draws the batch, so results
/// do not depend on which thread picks the batch up.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Batch {
    pub index: usize,
    pub start: u64,
    pub len: u64,
}

/// The queue of batches to be worked on shared immutably between worker threads.
pub struct BatchQueue {
    batches: Vec<Batch>,
    /// Index of the next batch to be worked on
    next: AtomicUsize,
}

impl BatchQueue {
    /// Split *total* samples into batches of at most *batch_size*.
    pub fn new(total: u64, batch_size: u64) -> BatchQueue {
        let batch_size = batch_size.max(1);
        let mut batches: Vec<Batch> = Vec::new();
        let mut start: u64 = 0;
        while start < total {
            let len = batch_size.min(total - start);
            batches.push(Batch {
                index: batches.len(),
                start,
                len,
            });
            start += len;
        }
        BatchQueue {
            batches,
            next: AtomicUsize::new(0),
        }
    }
    /// Get an iterator to work through the queue
    pub fn iter(&self) -> BatchQueueIterator {
        BatchQueueIterator { queue: self }
    }
    /// Get the next batch in the queue or None if the queue is finished
    pub fn next(&self) -> Option<Batch> {
        let i = self.next.fetch_add(1, Ordering::AcqRel);
        self.batches.get(i).copied()
    }
    /// Get the length of the queue
    pub fn len(&self) -> usize {
        self.batches.len()
    }
    /// Check if the queue is empty
    pub fn is_empty(&self) -> bool {
        self.next.load(Ordering::Acquire) >= self.batches.len()
    }
}

/// Iterator to work through the queue safely
pub struct BatchQueueIterator<'a> {
    queue: &'a BatchQueue,
}

impl<'a> Iterator for BatchQueueIterator<'a> {
    type Item = Batch;
    fn next(&mut self) -> Option<Batch> {
        self.queue.next()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn batches_cover_the_total() {
        let queue = BatchQueue::new(1050, 100);
        assert_eq!(queue.len(), 11);
        let batches: Vec<Batch> = queue.iter().collect();
        assert_eq!(batches.len(), 11);
        assert_eq!(batches.iter().map(|b| b.len).sum::<u64>(), 1050);
        assert_eq!(batches[10].start, 1000);
        assert_eq!(batches[10].len, 50);
        assert!(queue.is_empty());
        assert_eq!(queue.next(), None);
    }

    #[test]
    fn empty_queue() {
        let queue = BatchQueue::new(0, 100);
        assert_eq!(queue.len(), 0);
        assert!(queue.is_empty());
    }
}

//! Bounded command queue between threads and the tick loop.
//!
//! Producers on any thread or interrupt push with [`Sender::try_send`]; the
//! tick loop drains with [`Receiver::try_receive`]. Every access runs inside
//! a `critical-section`, the storage is a fixed `heapless::Deque`.

use core::cell::RefCell;

use critical_section::Mutex;
use heapless::Deque;

/// The queue was full; the rejected value is handed back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrySendError<T>(pub T);

/// The queue was empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TryReceiveError;

/// Fixed-capacity queue shared through critical sections.
pub struct Channel<T, const SIZE: usize> {
    queue: Mutex<RefCell<Deque<T, SIZE>>>,
}

impl<T, const SIZE: usize> Channel<T, SIZE> {
    pub const fn new() -> Self {
        Self {
            queue: Mutex::new(RefCell::new(Deque::new())),
        }
    }

    /// Producer handle; any number may exist.
    pub const fn sender(&self) -> Sender<'_, T, SIZE> {
        Sender { channel: self }
    }

    /// Consumer handle, meant for the tick loop.
    pub const fn receiver(&self) -> Receiver<'_, T, SIZE> {
        Receiver { channel: self }
    }

    pub fn try_send(&self, value: T) -> Result<(), TrySendError<T>> {
        critical_section::with(|cs| {
            self.queue
                .borrow(cs)
                .borrow_mut()
                .push_back(value)
                .map_err(TrySendError)
        })
    }

    pub fn try_receive(&self) -> Result<T, TryReceiveError> {
        critical_section::with(|cs| {
            self.queue
                .borrow(cs)
                .borrow_mut()
                .pop_front()
                .ok_or(TryReceiveError)
        })
    }

    /// Number of queued values
    pub fn len(&self) -> usize {
        critical_section::with(|cs| self.queue.borrow(cs).borrow().len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop everything still queued
    pub fn clear(&self) {
        critical_section::with(|cs| self.queue.borrow(cs).borrow_mut().clear());
    }
}

impl<T, const SIZE: usize> Default for Channel<T, SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Copy)]
pub struct Sender<'a, T, const SIZE: usize> {
    channel: &'a Channel<T, SIZE>,
}

impl<T, const SIZE: usize> Sender<'_, T, SIZE> {
    /// Queue `value`, handing it back when the queue is full.
    pub fn try_send(&self, value: T) -> Result<(), TrySendError<T>> {
        self.channel.try_send(value)
    }
}

#[derive(Clone, Copy)]
pub struct Receiver<'a, T, const SIZE: usize> {
    channel: &'a Channel<T, SIZE>,
}

impl<T, const SIZE: usize> Receiver<'_, T, SIZE> {
    pub fn try_receive(&self) -> Result<T, TryReceiveError> {
        self.channel.try_receive()
    }

    pub fn is_empty(&self) -> bool {
        self.channel.is_empty()
    }
}

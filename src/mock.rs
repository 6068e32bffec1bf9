//! Recording I2C bus and delay for host tests.
//!
//! Both halves push into one shared event log, so tests can check that the
//! settling delay sits between a command write and its reply read.

extern crate std;

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::vec::Vec;

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{ErrorKind, ErrorType, I2c, NoAcknowledgeSource, Operation};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Write { addr: u8, data: Vec<u8> },
    Read { addr: u8, len: usize },
    DelayNs(u32),
}

#[derive(Debug, Default)]
struct State {
    events: Vec<Event>,
    replies: VecDeque<Vec<u8>>,
    present: Vec<u8>,
    fail_with: Option<ErrorKind>,
}

/// Handle shared by [`MockI2c`] and [`MockDelay`].
#[derive(Debug, Clone, Default)]
pub struct Bus(Rc<RefCell<State>>);

impl Bus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn i2c(&self) -> MockI2c {
        MockI2c(self.clone())
    }

    pub fn delay(&self) -> MockDelay {
        MockDelay(self.clone())
    }

    /// Queue the bytes returned by the next read.
    pub fn reply(&self, bytes: &[u8]) {
        self.0.borrow_mut().replies.push_back(bytes.to_vec());
    }

    /// Queue a 4-byte big-endian delta reply.
    pub fn reply_delta(&self, delta: i32) {
        self.reply(&delta.to_be_bytes());
    }

    /// Addresses that acknowledge; all others NACK.
    pub fn set_present(&self, addrs: &[u8]) {
        self.0.borrow_mut().present = addrs.to_vec();
    }

    /// Make every subsequent operation fail with `kind`.
    pub fn fail_with(&self, kind: ErrorKind) {
        self.0.borrow_mut().fail_with = Some(kind);
    }

    pub fn events(&self) -> Vec<Event> {
        self.0.borrow().events.clone()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().events.clear();
    }

    /// Events excluding delays.
    pub fn transfers(&self) -> Vec<Event> {
        self.events()
            .into_iter()
            .filter(|e| !matches!(e, Event::DelayNs(_)))
            .collect()
    }

    /// Total delay requested, in nanoseconds.
    pub fn delayed_ns(&self) -> u64 {
        self.events()
            .iter()
            .map(|e| match e {
                Event::DelayNs(ns) => u64::from(*ns),
                _ => 0,
            })
            .sum()
    }
}

pub struct MockI2c(Bus);

impl ErrorType for MockI2c {
    type Error = ErrorKind;
}

impl I2c for MockI2c {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        let mut state = self.0 .0.borrow_mut();

        if let Some(kind) = state.fail_with {
            return Err(kind);
        }
        if !state.present.is_empty() && !state.present.contains(&address) {
            return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
        }

        for op in operations.iter_mut() {
            match op {
                Operation::Write(data) => state.events.push(Event::Write {
                    addr: address,
                    data: data.to_vec(),
                }),
                Operation::Read(buf) => {
                    state.events.push(Event::Read {
                        addr: address,
                        len: buf.len(),
                    });
                    let reply = state.replies.pop_front().unwrap_or_default();
                    for (dst, src) in buf.iter_mut().zip(reply.iter()) {
                        *dst = *src;
                    }
                }
            }
        }
        Ok(())
    }
}

pub struct MockDelay(Bus);

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.0 .0.borrow_mut().events.push(Event::DelayNs(ns));
    }
}

#[cfg(feature = "async")]
impl embedded_hal_async::i2c::I2c for MockI2c {
    async fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        I2c::transaction(self, address, operations)
    }
}

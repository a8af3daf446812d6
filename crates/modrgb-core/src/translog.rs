//! Transaction log and a recording transport for diagnostics.

use std::fmt;
use std::io;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::bus::Bus;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transaction {
    Command { address: u8, opcode: u8 },
    Block { address: u8, opcode: u8, data: Vec<u8> },
    WriteRegister { address: u8, opcode: u8, value: u8 },
    ReadRegister { address: u8, opcode: u8 },
}

impl Transaction {
    pub fn address(&self) -> u8 {
        match self {
            Transaction::Command { address, .. }
            | Transaction::Block { address, .. }
            | Transaction::WriteRegister { address, .. }
            | Transaction::ReadRegister { address, .. } => *address,
        }
    }

    pub fn opcode(&self) -> u8 {
        match self {
            Transaction::Command { opcode, .. }
            | Transaction::Block { opcode, .. }
            | Transaction::WriteRegister { opcode, .. }
            | Transaction::ReadRegister { opcode, .. } => *opcode,
        }
    }

    pub fn is_write(&self) -> bool {
        !matches!(self, Transaction::ReadRegister { .. })
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transaction::Command { address, opcode } => {
                write!(f, "[{address:02X}] CMD {opcode:02X}")
            }
            Transaction::Block { address, opcode, data } => {
                write!(f, "[{address:02X}] BLK {opcode:02X} {}", hex::encode_upper(data))
            }
            Transaction::WriteRegister { address, opcode, value } => {
                write!(f, "[{address:02X}] WR  {opcode:02X} {value:02X}")
            }
            Transaction::ReadRegister { address, opcode } => {
                write!(f, "[{address:02X}] RD  {opcode:02X}")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Written,
    Read(u8),
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: u64,
    pub transaction: Transaction,
    pub outcome: Outcome,
}

/// Bounded log of bus transactions; the oldest entries are dropped first.
pub struct TransactionLog {
    entries: Vec<LogEntry>,
    max_entries: usize,
}

impl TransactionLog {
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: Vec::new(),
            max_entries,
        }
    }

    pub fn push(&mut self, transaction: Transaction, outcome: Outcome) {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or_default();

        self.entries.push(LogEntry {
            timestamp,
            transaction,
            outcome,
        });

        if self.entries.len() > self.max_entries {
            self.entries.remove(0);
        }
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn transactions(&self) -> impl Iterator<Item = &Transaction> {
        self.entries.iter().map(|e| &e.transaction)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn to_text(&self, show_timestamp: bool) -> String {
        let mut result = String::new();
        for entry in &self.entries {
            if show_timestamp {
                let secs = entry.timestamp / 1000;
                let millis = entry.timestamp % 1000;
                let hours = (secs / 3600) % 24;
                let minutes = (secs / 60) % 60;
                let seconds = secs % 60;
                result.push_str(&format!("[{hours:02}:{minutes:02}:{seconds:02}.{millis:03}] "));
            }
            result.push_str(&entry.transaction.to_string());
            match &entry.outcome {
                Outcome::Written => {}
                Outcome::Read(value) => result.push_str(&format!(" -> {value:02X}")),
                Outcome::Failed(e) => result.push_str(&format!(" !! {e}")),
            }
            result.push('\n');
        }
        result
    }
}

/// Forwards to another transport and logs every transaction.
pub struct RecordingBus<B> {
    inner: B,
    log: TransactionLog,
}

impl<B: Bus> RecordingBus<B> {
    pub fn new(inner: B, max_entries: usize) -> Self {
        Self {
            inner,
            log: TransactionLog::new(max_entries),
        }
    }

    pub fn log(&self) -> &TransactionLog {
        &self.log
    }

    pub fn log_mut(&mut self) -> &mut TransactionLog {
        &mut self.log
    }

    pub fn inner(&self) -> &B {
        &self.inner
    }

    pub fn into_inner(self) -> B {
        self.inner
    }

    fn record<T>(
        &mut self,
        transaction: Transaction,
        result: io::Result<T>,
        outcome: impl FnOnce(&T) -> Outcome,
    ) -> io::Result<T> {
        let outcome = match &result {
            Ok(value) => outcome(value),
            Err(e) => Outcome::Failed(e.to_string()),
        };
        log::trace!("{transaction} {outcome:?}");
        self.log.push(transaction, outcome);
        result
    }
}

impl<B: Bus> Bus for RecordingBus<B> {
    fn write_command(&mut self, address: u8, opcode: u8) -> io::Result<()> {
        let result = self.inner.write_command(address, opcode);
        self.record(Transaction::Command { address, opcode }, result, |_| Outcome::Written)
    }

    fn write_block(&mut self, address: u8, opcode: u8, data: &[u8]) -> io::Result<()> {
        let result = self.inner.write_block(address, opcode, data);
        let transaction = Transaction::Block {
            address,
            opcode,
            data: data.to_vec(),
        };
        self.record(transaction, result, |_| Outcome::Written)
    }

    fn write_register(&mut self, address: u8, opcode: u8, value: u8) -> io::Result<()> {
        let result = self.inner.write_register(address, opcode, value);
        let transaction = Transaction::WriteRegister {
            address,
            opcode,
            value,
        };
        self.record(transaction, result, |_| Outcome::Written)
    }

    fn read_register(&mut self, address: u8, opcode: u8) -> io::Result<u8> {
        let result = self.inner.read_register(address, opcode);
        self.record(Transaction::ReadRegister { address, opcode }, result, |v| Outcome::Read(*v))
    }
}

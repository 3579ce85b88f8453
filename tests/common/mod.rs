#![allow(dead_code)]

use chrono::NaiveDateTime;
use fintrack::domain::error::FinanceError;
use fintrack::domain::transaction::{
    parse_timestamp, NewTransaction, Transaction, DEFAULT_CATEGORIES,
};
use fintrack::ports::clock_port::Clock;
use fintrack::ports::store_port::TransactionStore;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::sync::Mutex;

/// In-memory store that relies on the trait's default aggregation methods.
pub struct MockStore {
    pub transactions: RefCell<Vec<Transaction>>,
    pub categories: RefCell<Vec<String>>,
    pub times: RefCell<VecDeque<NaiveDateTime>>,
    pub fail_with: Option<String>,
    next_id: Cell<i64>,
}

impl MockStore {
    pub fn new() -> Self {
        Self {
            transactions: RefCell::new(Vec::new()),
            categories: RefCell::new(DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect()),
            times: RefCell::new(VecDeque::new()),
            fail_with: None,
            next_id: Cell::new(1),
        }
    }

    /// Timestamps handed out to successive inserts.
    pub fn with_times(self, times: &[&str]) -> Self {
        self.times
            .borrow_mut()
            .extend(times.iter().map(|t| ts(t)));
        self
    }

    pub fn failing(mut self, reason: &str) -> Self {
        self.fail_with = Some(reason.to_string());
        self
    }

    fn check(&self) -> Result<(), FinanceError> {
        match &self.fail_with {
            Some(reason) => Err(FinanceError::Database {
                reason: reason.clone(),
            }),
            None => Ok(()),
        }
    }
}

impl TransactionStore for MockStore {
    fn insert(&self, new: &NewTransaction) -> Result<Transaction, FinanceError> {
        self.check()?;
        let timestamp = self
            .times
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| ts("2024-01-01 12:00:00"));
        let id = self.next_id.get();
        self.next_id.set(id + 1);

        let tx = Transaction {
            id,
            timestamp,
            kind: new.kind,
            category: new.category.clone(),
            amount: new.amount,
            note: new.note.clone(),
        };
        self.transactions.borrow_mut().push(tx.clone());

        let mut categories = self.categories.borrow_mut();
        if !categories.contains(&new.category) {
            categories.push(new.category.clone());
        }
        Ok(tx)
    }

    fn list_all(&self) -> Result<Vec<Transaction>, FinanceError> {
        self.check()?;
        let mut all = self.transactions.borrow().clone();
        all.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
        Ok(all)
    }

    fn list_categories(&self) -> Result<Vec<String>, FinanceError> {
        self.check()?;
        Ok(self.categories.borrow().clone())
    }
}

/// Clock that returns queued times in order, then repeats the last one.
pub struct QueueClock {
    times: Mutex<VecDeque<NaiveDateTime>>,
    last: Mutex<NaiveDateTime>,
}

impl QueueClock {
    pub fn new(times: &[&str]) -> Self {
        Self {
            times: Mutex::new(times.iter().map(|t| ts(t)).collect()),
            last: Mutex::new(ts("2024-01-01 00:00:00")),
        }
    }
}

impl Clock for QueueClock {
    fn now(&self) -> NaiveDateTime {
        let mut last = self.last.lock().unwrap();
        if let Some(next) = self.times.lock().unwrap().pop_front() {
            *last = next;
        }
        *last
    }
}

pub fn ts(s: &str) -> NaiveDateTime {
    parse_timestamp(s).unwrap()
}

pub fn new_tx(kind: fintrack::domain::transaction::Kind, category: &str, amount: f64) -> NewTransaction {
    NewTransaction {
        kind,
        category: category.to_string(),
        amount,
        note: None,
    }
}

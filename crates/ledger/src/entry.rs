//! Transaction entries.
//!
//! An [`Entry`] is one posting line of a double-entry transaction: an amount
//! debited or credited to a leaf account. Amounts are always positive; the
//! side is carried by [`Direction`].
//!
//! A set of entries is balanced when the debit total equals the credit total.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{AccountId, LedgerError, Money, ResultLedger};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    Debit,
    Credit,
}

impl Direction {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debit => "DEBIT",
            Self::Credit => "CREDIT",
        }
    }

    /// One-character label used on entry rows (借 / 贷).
    pub const fn label(self) -> &'static str {
        match self {
            Self::Debit => "借",
            Self::Credit => "贷",
        }
    }

    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Debit => Self::Credit,
            Self::Credit => Self::Debit,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub account_id: AccountId,
    pub direction: Direction,
    pub amount: Money,
    pub memo: Option<String>,
}

impl Entry {
    pub fn debit(account_id: AccountId, amount: Money) -> Self {
        Self {
            account_id,
            direction: Direction::Debit,
            amount,
            memo: None,
        }
    }

    pub fn credit(account_id: AccountId, amount: Money) -> Self {
        Self {
            account_id,
            direction: Direction::Credit,
            amount,
            memo: None,
        }
    }
}

/// Debit and credit totals of a set of entries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Totals {
    pub debit: Money,
    pub credit: Money,
}

impl Totals {
    /// Adds `amount` on the `direction` side.
    pub fn add(&mut self, direction: Direction, amount: Money) -> ResultLedger<()> {
        let side = match direction {
            Direction::Debit => &mut self.debit,
            Direction::Credit => &mut self.credit,
        };
        *side = side
            .checked_add(amount)
            .ok_or_else(|| LedgerError::InvalidAmount("total too large".to_string()))?;
        Ok(())
    }

    pub fn of(entries: &[Entry]) -> ResultLedger<Self> {
        let mut totals = Self::default();
        for entry in entries {
            totals.add(entry.direction, entry.amount)?;
        }
        Ok(totals)
    }

    pub fn is_balanced(&self) -> bool {
        self.debit == self.credit
    }

    /// Fails with [`LedgerError::Unbalanced`] unless both sides are equal.
    pub fn ensure_balanced(&self) -> ResultLedger<()> {
        if !self.is_balanced() {
            return Err(LedgerError::Unbalanced {
                debit: self.debit,
                credit: self.credit,
            });
        }
        Ok(())
    }
}

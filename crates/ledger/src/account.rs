//! Ledger accounts and the roles they play in a quick-mode transaction.
//!
//! Accounts arrive from the directory as a flat list; the hierarchy is implied
//! by `parent_id` and rebuilt by [`AccountCatalog`](crate::AccountCatalog).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{AccountId, LedgerError};

/// Fixed classification of a ledger account.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AccountType {
    Asset,
    Liability,
    Equity,
    Income,
    Expense,
}

impl AccountType {
    pub const ALL: [AccountType; 5] = [
        Self::Asset,
        Self::Liability,
        Self::Equity,
        Self::Income,
        Self::Expense,
    ];

    /// Canonical code used by the service.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asset => "ASSET",
            Self::Liability => "LIABILITY",
            Self::Equity => "EQUITY",
            Self::Income => "INCOME",
            Self::Expense => "EXPENSE",
        }
    }

    /// Section heading shown above a group of accounts.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Asset => "资产",
            Self::Liability => "负债",
            Self::Equity => "权益",
            Self::Income => "收入",
            Self::Expense => "支出",
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for AccountType {
    type Error = LedgerError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_uppercase().as_str() {
            "ASSET" => Ok(Self::Asset),
            "LIABILITY" => Ok(Self::Liability),
            "EQUITY" => Ok(Self::Equity),
            "INCOME" => Ok(Self::Income),
            "EXPENSE" => Ok(Self::Expense),
            other => Err(LedgerError::UnknownAccountType(other.to_string())),
        }
    }
}

impl std::str::FromStr for AccountType {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub name: String,
    /// Service-provided path label (e.g. `Expenses:Food`), when available.
    pub full_name: Option<String>,
    pub account_type: AccountType,
    pub icon: Option<String>,
    pub parent_id: Option<AccountId>,
}

impl Account {
    pub fn new(id: impl Into<AccountId>, name: impl Into<String>, account_type: AccountType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            full_name: None,
            account_type,
            icon: None,
            parent_id: None,
        }
    }

    #[must_use]
    pub fn with_parent(mut self, parent_id: impl Into<AccountId>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    /// True for asset and liability accounts, the ones money is held in.
    pub fn is_funding(&self) -> bool {
        matches!(
            self.account_type,
            AccountType::Asset | AccountType::Liability
        )
    }
}

/// Slot an account is selected into.
///
/// Quick modes have two named slots each; advanced mode has one slot per
/// entry row, identified by its index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountRole {
    Expense,
    Pay,
    Income,
    Deposit,
    From,
    To,
    Entry(usize),
}

const FUNDING: &[AccountType] = &[AccountType::Asset, AccountType::Liability];

impl AccountRole {
    /// Account types the picker for this role offers. Empty means "any type".
    pub const fn type_filter(self) -> &'static [AccountType] {
        match self {
            Self::Expense => &[AccountType::Expense],
            Self::Income => &[AccountType::Income],
            Self::Pay | Self::Deposit | Self::From | Self::To => FUNDING,
            Self::Entry(_) => &[],
        }
    }

    pub fn accepts(self, account_type: AccountType) -> bool {
        let filter = self.type_filter();
        filter.is_empty() || filter.contains(&account_type)
    }

    /// Picker row label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Expense => "支出科目",
            Self::Pay => "付款账户",
            Self::Income => "收入科目",
            Self::Deposit => "收款账户",
            Self::From => "转出账户",
            Self::To => "转入账户",
            Self::Entry(_) => "分录科目",
        }
    }
}

impl fmt::Display for AccountRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expense => f.write_str("expense"),
            Self::Pay => f.write_str("pay"),
            Self::Income => f.write_str("income"),
            Self::Deposit => f.write_str("deposit"),
            Self::From => f.write_str("from"),
            Self::To => f.write_str("to"),
            Self::Entry(index) => write!(f, "entry #{}", index + 1),
        }
    }
}

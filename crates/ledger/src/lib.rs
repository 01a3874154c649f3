//! Double-entry transaction core of the bookkeeping client.
//!
//! Two pieces carry the logic:
//!
//! - the account catalog ([`AccountCatalog`], [`resolve_leaf_accounts`]),
//!   which picks the leaf accounts a transaction may post to;
//! - the transaction builder ([`TransactionForm`], [`build_entries`]), which
//!   turns the user's intent into balanced debit/credit [`Entry`] lines or
//!   the first [`LedgerError`] that blocks submission.
//!
//! Remote collaborators are reached through [`AccountDirectory`] and
//! [`TransactionSink`]; nothing in this crate performs I/O itself.

pub use account::{Account, AccountRole, AccountType};
pub use builder::{Draft, build_advanced, build_entries, build_quick};
pub use catalog::{AccountCatalog, AccountGroup, group_by_type, resolve_leaf_accounts};
pub use date::{date_parts, format_transaction_date, month_range, parse_transaction_date};
pub use description::auto_description;
pub use draft::{AdvancedEntries, BalanceStatus, EntryRow, Mode, QuickSelection, TransactionForm};
pub use entry::{Direction, Entry, Totals};
pub use error::{ErrorKind, LedgerError};
pub use ids::{AccountId, BookId, TagId};
pub use money::Money;
pub use submit::{AccountDirectory, BookSession, Submitter, TransactionSink};
pub use tags::TagSelection;
pub use transaction::{CreatedTransaction, Transaction};

mod account;
mod builder;
mod catalog;
mod date;
mod description;
mod draft;
mod entry;
mod error;
mod ids;
mod money;
mod submit;
mod tags;
mod transaction;

type ResultLedger<T> = Result<T, LedgerError>;

//! In-progress transaction form.
//!
//! The form is created fresh for each editing session, mutated by user input
//! and reset after a successful submission. It is never persisted.
//!
//! Quick modes keep their two account slots in a [`QuickSelection`] whose
//! shape always matches the current mode, so ids picked for one quick mode
//! never leak into another. Advanced entries live beside it and survive mode
//! switches untouched.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    AccountCatalog, AccountId, AccountRole, BookId, Direction, LedgerError, Money, ResultLedger,
    TagSelection, Totals, Transaction,
    builder::{self, Draft},
    date, description,
};

/// Entry-form mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    #[default]
    Expense,
    Income,
    Transfer,
    Advanced,
}

impl Mode {
    pub const ALL: [Mode; 4] = [Self::Expense, Self::Income, Self::Transfer, Self::Advanced];

    pub const fn is_quick(self) -> bool {
        !matches!(self, Self::Advanced)
    }

    /// Tab label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Expense => "支出",
            Self::Income => "收入",
            Self::Transfer => "转账",
            Self::Advanced => "高级",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Expense => "expense",
            Self::Income => "income",
            Self::Transfer => "transfer",
            Self::Advanced => "advanced",
        })
    }
}

/// Account slots of a quick mode.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuickSelection {
    Expense {
        expense: Option<AccountId>,
        pay: Option<AccountId>,
    },
    Income {
        income: Option<AccountId>,
        deposit: Option<AccountId>,
    },
    Transfer {
        from: Option<AccountId>,
        to: Option<AccountId>,
    },
}

impl Default for QuickSelection {
    fn default() -> Self {
        Self::Expense {
            expense: None,
            pay: None,
        }
    }
}

impl QuickSelection {
    /// Empty selection shaped for `mode`; `None` for advanced mode.
    pub fn for_mode(mode: Mode) -> Option<Self> {
        match mode {
            Mode::Expense => Some(Self::default()),
            Mode::Income => Some(Self::Income {
                income: None,
                deposit: None,
            }),
            Mode::Transfer => Some(Self::Transfer {
                from: None,
                to: None,
            }),
            Mode::Advanced => None,
        }
    }

    pub fn mode(&self) -> Mode {
        match self {
            Self::Expense { .. } => Mode::Expense,
            Self::Income { .. } => Mode::Income,
            Self::Transfer { .. } => Mode::Transfer,
        }
    }

    /// Both slots in display order, with their current selection.
    pub fn slots(&self) -> [(AccountRole, Option<&AccountId>); 2] {
        match self {
            Self::Expense { expense, pay } => [
                (AccountRole::Expense, expense.as_ref()),
                (AccountRole::Pay, pay.as_ref()),
            ],
            Self::Income { income, deposit } => [
                (AccountRole::Income, income.as_ref()),
                (AccountRole::Deposit, deposit.as_ref()),
            ],
            Self::Transfer { from, to } => [
                (AccountRole::From, from.as_ref()),
                (AccountRole::To, to.as_ref()),
            ],
        }
    }

    pub fn get(&self, role: AccountRole) -> Option<&AccountId> {
        self.slots()
            .into_iter()
            .find_map(|(slot, id)| (slot == role).then_some(id).flatten())
    }

    fn slot_mut(&mut self, role: AccountRole) -> Option<&mut Option<AccountId>> {
        match (self, role) {
            (Self::Expense { expense, .. }, AccountRole::Expense) => Some(expense),
            (Self::Expense { pay, .. }, AccountRole::Pay) => Some(pay),
            (Self::Income { income, .. }, AccountRole::Income) => Some(income),
            (Self::Income { deposit, .. }, AccountRole::Deposit) => Some(deposit),
            (Self::Transfer { from, .. }, AccountRole::From) => Some(from),
            (Self::Transfer { to, .. }, AccountRole::To) => Some(to),
            _ => None,
        }
    }

    pub fn has_role(&self, role: AccountRole) -> bool {
        self.slots().iter().any(|(slot, _)| *slot == role)
    }
}

/// One editable line of an advanced-mode transaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntryRow {
    /// Stable row identity across insertions and removals.
    pub key: Uuid,
    pub account_id: Option<AccountId>,
    pub direction: Direction,
    /// Raw amount text as typed.
    pub amount: String,
    pub memo: String,
}

impl EntryRow {
    pub fn new(direction: Direction) -> Self {
        Self {
            key: Uuid::new_v4(),
            account_id: None,
            direction,
            amount: String::new(),
            memo: String::new(),
        }
    }

    pub fn toggle_direction(&mut self) {
        self.direction = self.direction.opposite();
    }
}

/// Live debit/credit totals of the advanced rows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BalanceStatus {
    pub debit: Money,
    pub credit: Money,
    /// True only when some row has an amount and both sides are equal.
    pub balanced: bool,
}

impl BalanceStatus {
    /// Debit minus credit, or `None` when it does not fit.
    pub fn difference(&self) -> Option<Money> {
        self.debit.checked_sub(self.credit)
    }
}

/// Advanced-mode entry rows; never fewer than two.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdvancedEntries {
    rows: Vec<EntryRow>,
}

impl Default for AdvancedEntries {
    fn default() -> Self {
        Self {
            rows: vec![EntryRow::new(Direction::Debit), EntryRow::new(Direction::Credit)],
        }
    }
}

impl AdvancedEntries {
    pub const MIN_ROWS: usize = 2;

    pub fn rows(&self) -> &[EntryRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row_mut(&mut self, index: usize) -> Option<&mut EntryRow> {
        self.rows.get_mut(index)
    }

    /// Appends an empty debit row and returns its key.
    pub fn add_row(&mut self) -> Uuid {
        let row = EntryRow::new(Direction::Debit);
        let key = row.key;
        self.rows.push(row);
        key
    }

    /// Removes the row at `index`, returning it (`None` if out of range).
    ///
    /// # Errors
    ///
    /// [`LedgerError::MinimumEntries`] when only two rows are left; the rows
    /// are left as they were.
    pub fn remove_row(&mut self, index: usize) -> ResultLedger<Option<EntryRow>> {
        if self.rows.len() <= Self::MIN_ROWS {
            return Err(LedgerError::MinimumEntries);
        }
        if index >= self.rows.len() {
            return Ok(None);
        }
        Ok(Some(self.rows.remove(index)))
    }

    /// Recomputes the balance indicator.
    ///
    /// Unparsable amounts count as zero here; they are only rejected when the
    /// transaction is built.
    pub fn balance(&self) -> BalanceStatus {
        let mut totals = Totals::default();
        let mut overflow = false;
        for row in &self.rows {
            let amount = row.amount.parse::<Money>().unwrap_or(Money::ZERO);
            overflow |= totals.add(row.direction, amount).is_err();
        }
        let any_amount = self.rows.iter().any(|row| !row.amount.trim().is_empty());
        BalanceStatus {
            debit: totals.debit,
            credit: totals.credit,
            balanced: any_amount && !overflow && totals.is_balanced(),
        }
    }
}

impl From<Vec<EntryRow>> for AdvancedEntries {
    /// Pads with empty rows up to the two-row minimum.
    fn from(mut rows: Vec<EntryRow>) -> Self {
        while rows.len() < Self::MIN_ROWS {
            let direction = match rows.len() {
                0 => Direction::Debit,
                _ => Direction::Credit,
            };
            rows.push(EntryRow::new(direction));
        }
        Self { rows }
    }
}

/// The whole transaction form of one editing session.
#[derive(Clone, Debug)]
pub struct TransactionForm {
    pub book_id: Option<BookId>,
    pub date: NaiveDateTime,
    pub description: String,
    /// Quick-mode amount text as typed.
    pub amount: String,
    pub tags: TagSelection,
    mode: Mode,
    quick: QuickSelection,
    advanced: AdvancedEntries,
}

impl TransactionForm {
    pub fn new(date: NaiveDateTime) -> Self {
        Self {
            book_id: None,
            date,
            description: String::new(),
            amount: String::new(),
            tags: TagSelection::default(),
            mode: Mode::default(),
            quick: QuickSelection::default(),
            advanced: AdvancedEntries::default(),
        }
    }

    #[must_use]
    pub fn with_book(mut self, book_id: BookId) -> Self {
        self.book_id = Some(book_id);
        self
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Switches mode.
    ///
    /// Entering a different quick mode starts that mode's slots empty.
    /// Advanced rows are kept whatever the switch.
    pub fn set_mode(&mut self, mode: Mode) {
        if let Some(fresh) = QuickSelection::for_mode(mode)
            && self.quick.mode() != mode
        {
            self.quick = fresh;
        }
        self.mode = mode;
    }

    pub fn quick(&self) -> &QuickSelection {
        &self.quick
    }

    pub fn advanced(&self) -> &AdvancedEntries {
        &self.advanced
    }

    pub fn advanced_mut(&mut self) -> &mut AdvancedEntries {
        &mut self.advanced
    }

    /// Parses and sets the transaction date.
    pub fn set_date(&mut self, input: &str) -> ResultLedger<()> {
        self.date = date::parse_transaction_date(input)?;
        Ok(())
    }

    /// Puts account `id` into `role`.
    ///
    /// # Errors
    ///
    /// [`LedgerError::IneligibleAccount`] when the role does not exist in the
    /// current mode, or the account is unknown, not a leaf, or of a type the
    /// role does not accept.
    pub fn select_account(
        &mut self,
        role: AccountRole,
        id: &AccountId,
        catalog: &AccountCatalog,
    ) -> ResultLedger<()> {
        let ineligible = || LedgerError::IneligibleAccount {
            role,
            account: id.clone(),
        };
        let account = catalog.get(id).ok_or_else(ineligible)?;
        if !catalog.is_leaf(id) || !role.accepts(account.account_type) {
            return Err(ineligible());
        }
        let slot = self.slot_mut(role).ok_or_else(ineligible)?;
        *slot = Some(id.clone());
        Ok(())
    }

    /// Empties `role`; a role absent from the current mode is ignored.
    pub fn clear_account(&mut self, role: AccountRole) {
        if let Some(slot) = self.slot_mut(role) {
            *slot = None;
        }
    }

    fn slot_mut(&mut self, role: AccountRole) -> Option<&mut Option<AccountId>> {
        match (self.mode, role) {
            (Mode::Advanced, AccountRole::Entry(index)) => self
                .advanced
                .row_mut(index)
                .map(|row| &mut row.account_id),
            (Mode::Advanced, _) | (_, AccountRole::Entry(_)) => None,
            _ => self.quick.slot_mut(role),
        }
    }

    /// Read-only view of what the current mode builds from.
    pub fn draft(&self) -> Draft<'_> {
        match self.mode {
            Mode::Advanced => Draft::Advanced(self.advanced.rows()),
            _ => Draft::Quick {
                amount: &self.amount,
                selection: &self.quick,
            },
        }
    }

    /// The description that will be submitted: the typed one, or a generated
    /// label when left blank.
    pub fn effective_description(&self, catalog: &AccountCatalog) -> String {
        match self.description.trim() {
            "" => description::auto_description(self.mode, &self.quick, catalog),
            typed => typed.to_string(),
        }
    }

    /// Builds the balanced transaction, or the first validation failure.
    pub fn build(&self, catalog: &AccountCatalog) -> ResultLedger<Transaction> {
        let entries = builder::build_entries(self.book_id.as_ref(), self.draft())?;
        let book_id = self.book_id.clone().ok_or(LedgerError::NoBook)?;
        Ok(Transaction {
            book_id,
            date: self.date,
            description: self.effective_description(catalog),
            tag_ids: self.tags.ids().to_vec(),
            entries,
        })
    }

    /// Clears what the user entered after a successful submission.
    ///
    /// Book, mode and date stay as they are.
    pub fn reset(&mut self) {
        self.description.clear();
        self.amount.clear();
        self.tags.clear();
        self.quick = QuickSelection::for_mode(self.quick.mode()).unwrap_or_default();
        self.advanced = AdvancedEntries::default();
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::{Account, AccountType};

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn catalog() -> AccountCatalog {
        AccountCatalog::new(vec![
            Account::new(1_i64, "Expenses", AccountType::Expense),
            Account::new(2_i64, "Food", AccountType::Expense).with_parent(1_i64),
            Account::new(5_i64, "Card", AccountType::Liability),
            Account::new(6_i64, "Cash", AccountType::Asset),
            Account::new(9_i64, "Salary", AccountType::Income),
        ])
        .unwrap()
    }

    #[test]
    fn select_enforces_role_type_and_leafness() {
        let catalog = catalog();
        let mut form = TransactionForm::new(now());

        form.select_account(AccountRole::Expense, &AccountId::from(2_i64), &catalog)
            .unwrap();
        assert_eq!(form.quick().get(AccountRole::Expense), Some(&AccountId::from(2_i64)));

        // Parent account.
        assert!(form
            .select_account(AccountRole::Expense, &AccountId::from(1_i64), &catalog)
            .is_err());
        // Wrong type for the role.
        assert!(form
            .select_account(AccountRole::Pay, &AccountId::from(9_i64), &catalog)
            .is_err());
        // Role of another mode.
        assert!(matches!(
            form.select_account(AccountRole::Deposit, &AccountId::from(6_i64), &catalog),
            Err(LedgerError::IneligibleAccount { role: AccountRole::Deposit, .. })
        ));
        // Unknown id.
        assert!(form
            .select_account(AccountRole::Pay, &AccountId::from(404_i64), &catalog)
            .is_err());
    }

    #[test]
    fn switching_quick_modes_drops_stale_slots() {
        let catalog = catalog();
        let mut form = TransactionForm::new(now());
        form.select_account(AccountRole::Pay, &AccountId::from(5_i64), &catalog)
            .unwrap();

        form.set_mode(Mode::Transfer);
        assert_eq!(form.quick().mode(), Mode::Transfer);
        assert!(form.quick().slots().iter().all(|(_, id)| id.is_none()));

        form.set_mode(Mode::Expense);
        assert_eq!(form.quick().get(AccountRole::Pay), None);
    }

    #[test]
    fn advanced_rows_survive_mode_switches() {
        let catalog = catalog();
        let mut form = TransactionForm::new(now());
        form.set_mode(Mode::Advanced);
        form.select_account(AccountRole::Entry(0), &AccountId::from(2_i64), &catalog)
            .unwrap();
        form.advanced_mut().row_mut(0).unwrap().amount = "10".to_string();
        form.advanced_mut().add_row();

        form.set_mode(Mode::Income);
        form.set_mode(Mode::Advanced);
        assert_eq!(form.advanced().len(), 3);
        assert_eq!(
            form.advanced().rows()[0].account_id,
            Some(AccountId::from(2_i64))
        );
    }

    #[test]
    fn entry_roles_only_exist_in_advanced_mode() {
        let catalog = catalog();
        let mut form = TransactionForm::new(now());
        assert!(form
            .select_account(AccountRole::Entry(0), &AccountId::from(2_i64), &catalog)
            .is_err());
        form.set_mode(Mode::Advanced);
        assert!(form
            .select_account(AccountRole::Entry(7), &AccountId::from(2_i64), &catalog)
            .is_err());
        assert!(form
            .select_account(AccountRole::Expense, &AccountId::from(2_i64), &catalog)
            .is_err());
    }

    #[test]
    fn rows_never_drop_below_two() {
        let mut entries = AdvancedEntries::default();
        assert_eq!(entries.remove_row(0), Err(LedgerError::MinimumEntries));
        assert_eq!(entries.len(), 2);

        let key = entries.add_row();
        assert_eq!(entries.rows()[2].direction, Direction::Debit);
        entries.add_row();
        assert_eq!(entries.remove_row(9), Ok(None));
        let removed = entries.remove_row(2).unwrap().unwrap();
        assert_eq!(removed.key, key);
        entries.remove_row(2).unwrap();
        assert_eq!(entries.remove_row(1), Err(LedgerError::MinimumEntries));
    }

    #[test]
    fn empty_rows_never_show_balanced() {
        let mut entries = AdvancedEntries::default();
        let status = entries.balance();
        assert_eq!(status.debit, Money::ZERO);
        assert!(!status.balanced);

        entries.row_mut(0).unwrap().amount = "100".to_string();
        assert!(!entries.balance().balanced);
        entries.row_mut(1).unwrap().amount = "100.00".to_string();
        assert!(entries.balance().balanced);

        entries.row_mut(1).unwrap().amount = "abc".to_string();
        let status = entries.balance();
        assert_eq!(status.credit, Money::ZERO);
        assert_eq!(status.difference(), Some(Money::new(10_000)));
        assert!(!status.balanced);
    }

    #[test]
    fn extreme_signed_amounts_do_not_overflow_the_indicator() {
        let mut entries = AdvancedEntries::default();
        entries.row_mut(0).unwrap().amount = "92233720368547758".to_string();
        entries.row_mut(1).unwrap().amount = "-92233720368547758".to_string();
        let status = entries.balance();
        assert_eq!(status.difference(), None);
        assert!(!status.balanced);
    }

    #[test]
    fn toggling_direction_moves_amount_between_sides() {
        let mut entries = AdvancedEntries::default();
        entries.row_mut(0).unwrap().amount = "5".to_string();
        entries.row_mut(1).unwrap().amount = "5".to_string();
        entries.row_mut(1).unwrap().toggle_direction();
        let status = entries.balance();
        assert_eq!(status.debit, Money::new(1_000));
        assert!(!status.balanced);
    }

    #[test]
    fn reset_keeps_book_mode_and_date() {
        let catalog = catalog();
        let mut form = TransactionForm::new(now()).with_book(BookId::from(1_i64));
        form.set_mode(Mode::Income);
        form.amount = "3".to_string();
        form.description = "bonus".to_string();
        form.tags.toggle(crate::TagId::from(4_i64));
        form.select_account(AccountRole::Income, &AccountId::from(9_i64), &catalog)
            .unwrap();

        form.reset();
        assert_eq!(form.mode(), Mode::Income);
        assert_eq!(form.book_id, Some(BookId::from(1_i64)));
        assert_eq!(form.date, now());
        assert!(form.amount.is_empty() && form.description.is_empty());
        assert!(form.tags.is_empty());
        assert_eq!(form.quick().get(AccountRole::Income), None);
    }

    #[test]
    fn padding_rows_from_a_short_list() {
        let entries = AdvancedEntries::from(vec![EntryRow::new(Direction::Credit)]);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries.rows()[1].direction, Direction::Credit);
    }
}

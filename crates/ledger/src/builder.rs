//! Transaction builder.
//!
//! Turns a draft into balanced entries, or reports the first rule it breaks.
//! Rules are checked in this order:
//!
//! 1. a book is selected;
//! 2. quick modes: the amount is a positive number, then both account slots
//!    are filled;
//! 3. advanced mode: every row has an account, then every row amount is a
//!    positive number;
//! 4. advanced mode: debits equal credits.
//!
//! Everything here is pure: no I/O, no state.

use crate::{
    AccountId, AccountRole, BookId, Entry, EntryRow, LedgerError, Money, QuickSelection,
    ResultLedger, Totals, draft::AdvancedEntries,
};

/// What the current mode builds from.
#[derive(Clone, Copy, Debug)]
pub enum Draft<'a> {
    Quick {
        amount: &'a str,
        selection: &'a QuickSelection,
    },
    Advanced(&'a [EntryRow]),
}

/// Builds the entries of a draft for `book_id`.
pub fn build_entries(book_id: Option<&BookId>, draft: Draft<'_>) -> ResultLedger<Vec<Entry>> {
    if book_id.is_none() {
        return Err(LedgerError::NoBook);
    }
    match draft {
        Draft::Quick { amount, selection } => build_quick(amount, selection),
        Draft::Advanced(rows) => build_advanced(rows),
    }
}

/// Two mirrored entries for a quick mode:
///
/// | mode     | debit   | credit  |
/// |----------|---------|---------|
/// | expense  | expense | pay     |
/// | income   | deposit | income  |
/// | transfer | to      | from    |
pub fn build_quick(amount: &str, selection: &QuickSelection) -> ResultLedger<Vec<Entry>> {
    let amount = Money::parse_positive(amount)?;

    let [(first_role, first), (second_role, second)] = selection.slots();
    let first = required(first_role, first)?;
    let second = required(second_role, second)?;

    let (debit, credit) = match selection {
        QuickSelection::Expense { .. } => (first, second),
        QuickSelection::Income { .. } | QuickSelection::Transfer { .. } => (second, first),
    };
    Ok(vec![
        Entry::debit(debit, amount),
        Entry::credit(credit, amount),
    ])
}

fn required(role: AccountRole, id: Option<&AccountId>) -> ResultLedger<AccountId> {
    id.cloned().ok_or(LedgerError::MissingAccount(role))
}

/// The user's rows as entries, once every row is complete and the rows
/// balance. Amounts are normalized to cents; blank memos are dropped.
pub fn build_advanced(rows: &[EntryRow]) -> ResultLedger<Vec<Entry>> {
    if rows.len() < AdvancedEntries::MIN_ROWS {
        return Err(LedgerError::MinimumEntries);
    }

    let accounts = rows
        .iter()
        .enumerate()
        .map(|(index, row)| required(AccountRole::Entry(index), row.account_id.as_ref()))
        .collect::<ResultLedger<Vec<_>>>()?;

    let amounts = rows
        .iter()
        .enumerate()
        .map(|(index, row)| {
            Money::parse_positive(&row.amount).map_err(|err| match err {
                LedgerError::InvalidAmount(reason) => {
                    LedgerError::InvalidAmount(format!("entry #{}: {reason}", index + 1))
                }
                other => other,
            })
        })
        .collect::<ResultLedger<Vec<_>>>()?;

    let mut totals = Totals::default();
    for (row, amount) in rows.iter().zip(&amounts) {
        totals.add(row.direction, *amount)?;
    }
    totals.ensure_balanced()?;

    Ok(rows
        .iter()
        .zip(accounts)
        .zip(amounts)
        .map(|((row, account_id), amount)| Entry {
            account_id,
            direction: row.direction,
            amount,
            memo: Some(row.memo.trim())
                .filter(|memo| !memo.is_empty())
                .map(str::to_string),
        })
        .collect())
}

//! Generated descriptions for transactions submitted with a blank description.

use crate::{AccountCatalog, AccountRole, Mode, QuickSelection};

const EXPENSE_FALLBACK: &str = "日常支出";
const INCOME_FALLBACK: &str = "收入";
const TRANSFER_FALLBACK: &str = "转账";
const ADVANCED_LABEL: &str = "复式记账";

/// Label built from the names of the selected accounts.
///
/// Expense and income join the category and the funding account with ` - `,
/// transfers join source and destination with ` → `. When an account cannot
/// be resolved the category name alone is used, then a fixed label per mode.
pub fn auto_description(mode: Mode, selection: &QuickSelection, catalog: &AccountCatalog) -> String {
    let name = |role: AccountRole| {
        selection
            .get(role)
            .and_then(|id| catalog.name_of(id))
            .filter(|name| !name.is_empty())
    };

    if !mode.is_quick() || selection.mode() != mode {
        return ADVANCED_LABEL.to_string();
    }

    match selection {
        QuickSelection::Expense { .. } => {
            joined(name(AccountRole::Expense), name(AccountRole::Pay), " - ", EXPENSE_FALLBACK)
        }
        QuickSelection::Income { .. } => joined(
            name(AccountRole::Income),
            name(AccountRole::Deposit),
            " - ",
            INCOME_FALLBACK,
        ),
        QuickSelection::Transfer { .. } => match (name(AccountRole::From), name(AccountRole::To)) {
            (Some(from), Some(to)) => format!("{from} → {to}"),
            _ => TRANSFER_FALLBACK.to_string(),
        },
    }
}

fn joined(category: Option<&str>, account: Option<&str>, separator: &str, fallback: &str) -> String {
    match (category, account) {
        (Some(category), Some(account)) => format!("{category}{separator}{account}"),
        (Some(category), None) => category.to_string(),
        _ => fallback.to_string(),
    }
}

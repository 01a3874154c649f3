//! Mapping between wire types and the ledger core.

use api_types::{
    RawId,
    account::AccountView,
    transaction::{
        CreateTransactionRequest, CreateTransactionResponse, EntryDirection, EntryRequest,
    },
};
use ledger::{
    Account, AccountId, AccountType, CreatedTransaction, Direction, LedgerError, Transaction,
    date_parts,
};

pub fn account_from_view(view: AccountView) -> Result<Account, LedgerError> {
    let account_type = AccountType::try_from(view.account_type.as_str())?;
    Ok(Account {
        id: AccountId::new(view.id.to_string()),
        name: view.name,
        full_name: view.full_name.filter(|name| !name.trim().is_empty()),
        account_type,
        icon: view.icon,
        parent_id: view
            .parent_id
            .and_then(|parent| AccountId::parse(&parent.to_string())),
    })
}

pub fn accounts_from_views(views: Vec<AccountView>) -> Result<Vec<Account>, LedgerError> {
    views.into_iter().map(account_from_view).collect()
}

fn wire_direction(direction: Direction) -> EntryDirection {
    match direction {
        Direction::Debit => EntryDirection::Debit,
        Direction::Credit => EntryDirection::Credit,
    }
}

pub fn create_request(transaction: &Transaction) -> CreateTransactionRequest {
    let entries = transaction
        .entries
        .iter()
        .map(|entry| EntryRequest {
            account_id: RawId::from_text(entry.account_id.as_str()),
            direction: wire_direction(entry.direction),
            amount: entry.amount.to_string(),
            memo: entry.memo.clone(),
        })
        .collect();
    let tag_ids = (!transaction.tag_ids.is_empty()).then(|| {
        transaction
            .tag_ids
            .iter()
            .map(|id| RawId::from_text(id.as_str()))
            .collect()
    });

    CreateTransactionRequest {
        trans_date: date_parts(&transaction.date),
        description: transaction.description.clone(),
        book_id: RawId::from_text(transaction.book_id.as_str()),
        tag_ids,
        entries,
    }
}

pub fn created_transaction(response: CreateTransactionResponse) -> CreatedTransaction {
    CreatedTransaction {
        id: response.trans_id.to_string(),
        description: response.description,
    }
}

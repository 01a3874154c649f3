//! Seams to the remote service and the submission flow.
//!
//! The core owns no I/O. It reads accounts through an [`AccountDirectory`] and
//! hands finished transactions to a [`TransactionSink`]; both are implemented
//! by the caller (an HTTP client in practice, an in-memory fake in tests).

use std::{fmt::Display, future::Future};

use crate::{
    AccountCatalog, BookId, CreatedTransaction, LedgerError, ResultLedger, Transaction,
    TransactionForm,
};

/// Source of the flat account list of a book.
pub trait AccountDirectory {
    type Error: Display;

    fn accounts(
        &self,
        book_id: &BookId,
    ) -> impl Future<Output = Result<Vec<crate::Account>, Self::Error>> + Send;
}

/// Destination of built transactions.
pub trait TransactionSink {
    type Error: Display;

    fn submit(
        &self,
        transaction: &Transaction,
    ) -> impl Future<Output = Result<CreatedTransaction, Self::Error>> + Send;
}

/// Accounts of the book being edited, fetched once and read-only afterwards.
///
/// Remote changes to the account tree are not observed until the session is
/// loaded again.
#[derive(Clone, Debug)]
pub struct BookSession {
    book_id: BookId,
    catalog: AccountCatalog,
}

impl BookSession {
    pub async fn load<D: AccountDirectory>(directory: &D, book_id: BookId) -> ResultLedger<Self> {
        let accounts = directory
            .accounts(&book_id)
            .await
            .map_err(|err| LedgerError::Directory(err.to_string()))?;
        tracing::debug!("loaded {} accounts for book {book_id}", accounts.len());
        let catalog = AccountCatalog::new(accounts)?;
        Ok(Self { book_id, catalog })
    }

    pub fn from_catalog(book_id: BookId, catalog: AccountCatalog) -> Self {
        Self { book_id, catalog }
    }

    pub fn book_id(&self) -> &BookId {
        &self.book_id
    }

    pub fn catalog(&self) -> &AccountCatalog {
        &self.catalog
    }
}

/// Drives submissions of one form, one request at a time.
///
/// [`begin`](Self::begin) and [`finish`](Self::finish) split the flow for
/// event-driven callers that receive the response in a separate callback;
/// [`submit`](Self::submit) runs both around an awaited sink call. While a
/// request is in flight the submit control stays disabled: there is no
/// timeout, retry or cancellation.
#[derive(Debug, Default)]
pub struct Submitter {
    submitting: bool,
}

impl Submitter {
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Validates the form and marks a request as in flight.
    ///
    /// # Errors
    ///
    /// [`LedgerError::SubmissionInFlight`] while a previous request has not
    /// finished, or the first validation failure of the form. Neither changes
    /// the in-flight flag.
    pub fn begin(
        &mut self,
        form: &TransactionForm,
        catalog: &AccountCatalog,
    ) -> ResultLedger<Transaction> {
        if self.submitting {
            return Err(LedgerError::SubmissionInFlight);
        }
        let transaction = form.build(catalog)?;
        self.submitting = true;
        tracing::info!(
            "submitting \"{}\" to book {} ({} entries)",
            transaction.description,
            transaction.book_id,
            transaction.entries.len()
        );
        Ok(transaction)
    }

    /// Clears the in-flight flag and applies the outcome: the form is reset on
    /// success and left untouched on failure, whose message is passed through
    /// verbatim.
    pub fn finish<E: Display>(
        &mut self,
        form: &mut TransactionForm,
        outcome: Result<CreatedTransaction, E>,
    ) -> ResultLedger<CreatedTransaction> {
        self.submitting = false;
        match outcome {
            Ok(created) => {
                tracing::info!("transaction {} recorded", created.id);
                form.reset();
                Ok(created)
            }
            Err(err) => {
                tracing::warn!("transaction rejected: {err}");
                Err(LedgerError::Submission(err.to_string()))
            }
        }
    }

    pub async fn submit<S: TransactionSink>(
        &mut self,
        form: &mut TransactionForm,
        catalog: &AccountCatalog,
        sink: &S,
    ) -> ResultLedger<CreatedTransaction> {
        let transaction = self.begin(form, catalog)?;
        let outcome = sink.submit(&transaction).await;
        self.finish(form, outcome)
    }
}

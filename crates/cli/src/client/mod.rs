use api_types::{
    ResponseResult,
    account::AccountView,
    book::Book,
    stats::{AccountBalances, CategoryRank, MonthlyStatistics},
    tag::Tag,
    transaction::{
        CreateTransactionRequest, CreateTransactionResponse, TransactionDetailResult,
        TransactionQuery,
    },
};
use ledger::{Account, AccountDirectory, BookId, CreatedTransaction, Transaction, TransactionSink};
use reqwest::{RequestBuilder, Url};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::{
    convert,
    error::{AppError, Result},
};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("unauthorized: check the configured token")]
    Unauthorized,
    #[error("forbidden")]
    Forbidden,
    #[error("not found")]
    NotFound,
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Server(String),
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ClientError {
    /// Maps a failure code (HTTP status or envelope `code`) to a variant.
    fn from_code(code: i32, message: String) -> Self {
        match code {
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            409 => Self::Conflict(message),
            422 => Self::Validation(message),
            _ => Self::Server(message),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Client {
    base_url: Url,
    token: String,
    http: reqwest::Client,
}

impl Client {
    pub fn new(base_url: &str, token: &str) -> Result<Self> {
        // Endpoints are joined relative to the base, which must end with `/`.
        let base_url = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        let base_url = Url::parse(&base_url)
            .map_err(|err| AppError::Usage(format!("invalid base_url: {err}")))?;
        let http = reqwest::Client::builder()
            .user_agent(concat!("bookkeep/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            base_url,
            token: token.to_string(),
            http,
        })
    }

    fn endpoint(&self, path: &str) -> std::result::Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|err| ClientError::Server(format!("invalid base_url: {err}")))
    }

    /// Sends `request` and unwraps the response envelope.
    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> std::result::Result<T, ClientError> {
        let request = if self.token.is_empty() {
            request
        } else {
            request.bearer_auth(&self.token)
        };
        let res = request.send().await?;
        let status = res.status();
        let text = res.text().await?;
        tracing::debug!("response {status}: {} bytes", text.len());

        let envelope = serde_json::from_str::<ResponseResult<T>>(&text);
        if !status.is_success() {
            let message = envelope
                .ok()
                .map(|body| body.message)
                .filter(|message| !message.trim().is_empty())
                .unwrap_or_else(|| "请求失败".to_string());
            tracing::warn!("request failed with {status}: {message}");
            return Err(ClientError::from_code(i32::from(status.as_u16()), message));
        }

        let envelope = envelope.map_err(|err| ClientError::Decode(err.to_string()))?;
        let code = envelope.code;
        envelope.into_data().map_err(|message| {
            tracing::warn!("service answered {code}: {message}");
            ClientError::from_code(code, message)
        })
    }

    pub async fn books(&self) -> std::result::Result<Vec<Book>, ClientError> {
        let endpoint = self.endpoint("fin/books/my")?;
        tracing::debug!("GET {endpoint}");
        self.send(self.http.get(endpoint)).await
    }

    pub async fn account_views(
        &self,
        book_id: &BookId,
    ) -> std::result::Result<Vec<AccountView>, ClientError> {
        let endpoint = self.endpoint("fin/accounts")?;
        tracing::debug!("GET {endpoint} book={book_id}");
        self.send(self.http.get(endpoint).query(&[("bookId", book_id.as_str())]))
            .await
    }

    pub async fn tags(&self, book_id: &BookId) -> std::result::Result<Vec<Tag>, ClientError> {
        let endpoint = self.endpoint("fin/tags")?;
        tracing::debug!("GET {endpoint} book={book_id}");
        self.send(self.http.get(endpoint).query(&[("bookId", book_id.as_str())]))
            .await
    }

    pub async fn create_transaction(
        &self,
        payload: &CreateTransactionRequest,
    ) -> std::result::Result<CreateTransactionResponse, ClientError> {
        let endpoint = self.endpoint("fin/transactions/with-entries")?;
        tracing::debug!("POST {endpoint} ({} entries)", payload.entries.len());
        self.send(self.http.post(endpoint).json(payload)).await
    }

    pub async fn transaction_details(
        &self,
        query: &TransactionQuery,
    ) -> std::result::Result<TransactionDetailResult, ClientError> {
        let endpoint = self.endpoint("app/fin/transactions/details")?;
        tracing::debug!("GET {endpoint} book={}", query.book_id);
        self.send(self.http.get(endpoint).query(query)).await
    }

    pub async fn monthly_statistics(
        &self,
        book_id: &BookId,
        year: i32,
        month: u32,
    ) -> std::result::Result<MonthlyStatistics, ClientError> {
        let endpoint = self.endpoint("app/fin/transactions/monthly-statistics")?;
        tracing::debug!("GET {endpoint} book={book_id} {year}-{month:02}");
        let query = [
            ("bookId", book_id.to_string()),
            ("year", year.to_string()),
            ("month", month.to_string()),
        ];
        self.send(self.http.get(endpoint).query(&query)).await
    }

    pub async fn category_rank(
        &self,
        book_id: &BookId,
        kind: &str,
        year: i32,
        month: u32,
    ) -> std::result::Result<CategoryRank, ClientError> {
        let endpoint = self.endpoint("app/fin/transactions/category-rank")?;
        tracing::debug!("GET {endpoint} book={book_id} type={kind}");
        let query = [
            ("bookId", book_id.to_string()),
            ("type", kind.to_string()),
            ("year", year.to_string()),
            ("month", month.to_string()),
        ];
        self.send(self.http.get(endpoint).query(&query)).await
    }

    pub async fn account_balances(
        &self,
        book_id: &BookId,
        account_type: &str,
    ) -> std::result::Result<AccountBalances, ClientError> {
        let endpoint = self.endpoint("app/fin/transactions/account-balances")?;
        tracing::debug!("GET {endpoint} book={book_id} type={account_type}");
        let query = [("bookId", book_id.as_str()), ("accountType", account_type)];
        self.send(self.http.get(endpoint).query(&query)).await
    }
}

impl AccountDirectory for Client {
    type Error = ClientError;

    async fn accounts(&self, book_id: &BookId) -> std::result::Result<Vec<Account>, ClientError> {
        let views = self.account_views(book_id).await?;
        convert::accounts_from_views(views).map_err(|err| ClientError::Decode(err.to_string()))
    }
}

impl TransactionSink for Client {
    type Error = ClientError;

    async fn submit(
        &self,
        transaction: &Transaction,
    ) -> std::result::Result<CreatedTransaction, ClientError> {
        let payload = convert::create_request(transaction);
        let response = self.create_transaction(&payload).await?;
        Ok(convert::created_transaction(response))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_codes_are_classified() {
        assert!(matches!(
            ClientError::from_code(401, String::new()),
            ClientError::Unauthorized
        ));
        assert!(matches!(
            ClientError::from_code(422, "bad".to_string()),
            ClientError::Validation(msg) if msg == "bad"
        ));
        let err = ClientError::from_code(500, "账本不存在".to_string());
        assert_eq!(err.to_string(), "账本不存在");
    }

    #[test]
    fn endpoints_join_onto_base_path() {
        let client = Client::new("http://127.0.0.1:9000/api", "t").unwrap();
        let url = client.endpoint("fin/books/my").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:9000/api/fin/books/my");
        assert!(Client::new("not a url", "t").is_err());
    }
}

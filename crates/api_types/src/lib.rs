use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier as it travels on the wire.
///
/// The service emits ids as JSON numbers, except where a value is too large
/// for clients that parse numbers as doubles; those arrive as strings.
/// Serialization mirrors that: integers go out as numbers, anything else as a
/// string.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Number(i64),
    Text(String),
}

impl RawId {
    /// Picks the number form whenever `value` is a plain integer.
    pub fn from_text(value: &str) -> Self {
        match value.trim().parse::<i64>() {
            Ok(number) => Self::Number(number),
            Err(_) => Self::Text(value.trim().to_string()),
        }
    }
}

impl fmt::Display for RawId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(number) => write!(f, "{number}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

/// Envelope wrapping every response body.
///
/// `code == 200` means success; otherwise `message` explains the failure and
/// `data` is usually `null`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseResult<T> {
    pub code: i32,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub success: bool,
    pub data: Option<T>,
    #[serde(default)]
    pub timestamp: i64,
}

impl<T> ResponseResult<T> {
    pub const OK: i32 = 200;

    /// The payload, or the server message when the call failed.
    pub fn into_data(self) -> Result<T, String> {
        if self.code != Self::OK {
            return Err(self.failure_message());
        }
        self.data.ok_or_else(|| "empty response".to_string())
    }

    fn failure_message(&self) -> String {
        if self.message.trim().is_empty() {
            "请求失败".to_string()
        } else {
            self.message.clone()
        }
    }
}

pub mod book {
    use super::*;

    #[derive(Debug, Clone, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Book {
        pub id: RawId,
        pub name: String,
        #[serde(default)]
        pub description: Option<String>,
        #[serde(default)]
        pub owner_id: Option<RawId>,
        #[serde(default)]
        pub default_currency: Option<String>,
        #[serde(default)]
        pub cover_url: Option<String>,
        #[serde(default)]
        pub created_at: Option<String>,
        #[serde(default)]
        pub updated_at: Option<String>,
    }
}

pub mod account {
    use super::*;

    /// Account as listed by `GET /fin/accounts?bookId=`.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct AccountView {
        pub id: RawId,
        pub name: String,
        #[serde(default)]
        pub full_name: Option<String>,
        /// `ASSET`, `LIABILITY`, `EQUITY`, `INCOME` or `EXPENSE`.
        pub account_type: String,
        #[serde(default)]
        pub icon: Option<String>,
        #[serde(default)]
        pub parent_id: Option<RawId>,
        #[serde(default)]
        pub level: Option<u32>,
    }
}

pub mod tag {
    use super::*;

    #[derive(Debug, Clone, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Tag {
        pub id: RawId,
        pub tag_name: String,
        #[serde(default)]
        pub color: Option<String>,
        #[serde(default)]
        pub icon: Option<String>,
    }
}

pub mod transaction {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "UPPERCASE")]
    pub enum EntryDirection {
        Debit,
        Credit,
    }

    /// One posting line of `POST /fin/transactions/with-entries`.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct EntryRequest {
        pub account_id: RawId,
        pub direction: EntryDirection,
        /// Decimal string with exactly two fraction digits.
        pub amount: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub memo: Option<String>,
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct CreateTransactionRequest {
        /// Local date-time as `[year, month, day, hour, minute, second]`.
        pub trans_date: [i32; 6],
        pub description: String,
        pub book_id: RawId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub tag_ids: Option<Vec<RawId>>,
        pub entries: Vec<EntryRequest>,
    }

    /// Date-time as the service renders it: either an ISO string or the
    /// component array.
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(untagged)]
    pub enum WireDateTime {
        Parts(Vec<i32>),
        Text(String),
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct CreateTransactionResponse {
        pub trans_id: RawId,
        #[serde(default)]
        pub trans_date: Option<WireDateTime>,
        #[serde(default)]
        pub description: String,
    }

    /// Query of `GET /app/fin/transactions/details`.
    #[derive(Debug, Clone, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TransactionQuery {
        pub book_id: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub start_date: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub end_date: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub page_num: Option<u32>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub page_size: Option<u32>,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "UPPERCASE")]
    pub enum TransType {
        Income,
        Expense,
        Transfer,
        #[serde(other)]
        Other,
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TagInfo {
        pub tag_id: RawId,
        pub tag_name: String,
        #[serde(default)]
        pub color: Option<String>,
        #[serde(default)]
        pub icon: Option<String>,
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TransactionItem {
        pub trans_id: RawId,
        pub trans_date: WireDateTime,
        pub trans_type: TransType,
        /// Amount shown for the row; its sign is not meaningful, the type is.
        pub display_amount: f64,
        #[serde(default)]
        pub description: String,
        #[serde(default)]
        pub category_name: Option<String>,
        #[serde(default)]
        pub category_icon: Option<String>,
        #[serde(default)]
        pub target_account_name: Option<String>,
        #[serde(default)]
        pub target_account_icon: Option<String>,
        #[serde(default)]
        pub tags: Vec<TagInfo>,
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct DailyGroup {
        pub date: String,
        pub daily_income: f64,
        pub daily_expense: f64,
        pub transactions: Vec<TransactionItem>,
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TransactionDetailResult {
        pub daily_groups: Vec<DailyGroup>,
        pub total: u64,
        pub page_num: u32,
        pub page_size: u32,
    }
}

pub mod stats {
    use super::*;

    #[derive(Debug, Clone, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct MonthlyStatistics {
        pub total_income: f64,
        pub total_expense: f64,
        pub balance: f64,
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct MonthTrend {
        pub month: u32,
        pub income: f64,
        pub expense: f64,
        pub balance: f64,
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct YearlyTrend {
        pub year: i32,
        pub months: Vec<MonthTrend>,
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct CategoryItem {
        pub account_id: RawId,
        pub account_name: String,
        #[serde(default)]
        pub account_icon: Option<String>,
        pub amount: f64,
        pub percentage: f64,
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct CategoryRank {
        #[serde(rename = "type")]
        pub kind: String,
        pub total: f64,
        pub categories: Vec<CategoryItem>,
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TagStatItem {
        pub tag_id: RawId,
        pub tag_name: String,
        #[serde(default)]
        pub color: Option<String>,
        #[serde(default)]
        pub icon: Option<String>,
        pub amount: f64,
        pub count: u64,
        pub percentage: f64,
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct TagStatistics {
        pub total: f64,
        pub tags: Vec<TagStatItem>,
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct AccountBalance {
        pub account_id: RawId,
        pub account_name: String,
        #[serde(default)]
        pub account_icon: Option<String>,
        pub balance: f64,
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct AccountBalances {
        pub account_type: String,
        pub total: f64,
        pub accounts: Vec<AccountBalance>,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_accept_numbers_and_strings() {
        let small: RawId = serde_json::from_str("42").unwrap();
        let large: RawId = serde_json::from_str("\"1790000000000000001\"").unwrap();
        assert_eq!(small, RawId::Number(42));
        assert_eq!(large.to_string(), "1790000000000000001");
        assert_eq!(RawId::from_text(" 17 "), RawId::Number(17));
        assert_eq!(RawId::from_text("a-17"), RawId::Text("a-17".to_string()));
    }

    #[test]
    fn envelope_surfaces_server_message() {
        let body = r#"{"code":500,"message":"账本不存在","success":false,"data":null,"timestamp":1}"#;
        let parsed: ResponseResult<book::Book> = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.into_data().unwrap_err(), "账本不存在");

        let body = r#"{"code":401,"data":null}"#;
        let parsed: ResponseResult<book::Book> = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.into_data().unwrap_err(), "请求失败");
    }

    #[test]
    fn account_listing_parses() {
        let body = r#"{"code":200,"message":"ok","success":true,"timestamp":0,"data":[
            {"id":1,"name":"餐饮","fullName":"支出:餐饮","accountType":"EXPENSE","icon":"food","parentId":null,"level":1},
            {"id":"1790000000000000001","name":"午餐","accountType":"EXPENSE","parentId":1,"level":2}
        ]}"#;
        let parsed: ResponseResult<Vec<account::AccountView>> = serde_json::from_str(body).unwrap();
        let accounts = parsed.into_data().unwrap();
        assert_eq!(accounts.len(), 2);
        assert_eq!(accounts[1].parent_id, Some(RawId::Number(1)));
        assert_eq!(accounts[0].parent_id, None);
    }

    #[test]
    fn create_request_matches_service_shape() {
        let request = transaction::CreateTransactionRequest {
            trans_date: [2024, 3, 9, 18, 30, 0],
            description: "餐饮 - 信用卡".to_string(),
            book_id: RawId::Number(1),
            tag_ids: None,
            entries: vec![transaction::EntryRequest {
                account_id: RawId::Text("x9".to_string()),
                direction: transaction::EntryDirection::Debit,
                amount: "12.50".to_string(),
                memo: None,
            }],
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["transDate"], serde_json::json!([2024, 3, 9, 18, 30, 0]));
        assert_eq!(json["bookId"], 1);
        assert!(json.get("tagIds").is_none());
        assert_eq!(json["entries"][0]["accountId"], "x9");
        assert_eq!(json["entries"][0]["direction"], "DEBIT");
        assert!(json["entries"][0].get("memo").is_none());
    }

    #[test]
    fn unknown_trans_type_is_other() {
        let parsed: transaction::TransType = serde_json::from_str("\"OPENING\"").unwrap();
        assert_eq!(parsed, transaction::TransType::Other);
    }
}

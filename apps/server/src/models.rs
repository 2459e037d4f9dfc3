use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use papertrade_core::ledger::{Transaction, TransactionType};
use papertrade_core::users::User;
use papertrade_market_data::{NewsArticle, Quote};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub password: String,
}

/// Body of `POST /transactShares`. Field names follow the form the
/// frontend submits.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactRequest {
    pub stock_name: String,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub shares: f64,
    pub price: f64,
    pub date: Option<DateTime<Utc>>,
}

/// Public projection of a user; never carries the password hash.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountView {
    pub user: UserView,
    pub balance: f64,
    pub transactions: Vec<Transaction>,
}

/// View-model for the landing page. Market data fields are best-effort:
/// a failing provider leaves them empty instead of failing the page.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeView {
    pub user: UserView,
    pub balance: f64,
    pub quotes: Vec<Quote>,
    pub news: Vec<NewsArticle>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthPageView {
    pub page: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct WelcomeResponse {
    pub status: &'static str,
    pub message: &'static str,
}

//! JSON bodies exchanged with the finance tracker server.
//!
//! Amounts travel as plain JSON numbers and dates as `YYYY-MM-DD` strings.
//! Conversion into exact cent amounts happens on the client side.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// Decodes an optional `YYYY-MM-DD` date, treating `""` as absent.
fn optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

pub mod transaction {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub enum TransactionKind {
        Income,
        Expense,
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct TransactionView {
        pub id: i64,
        #[serde(rename = "type")]
        pub kind: TransactionKind,
        pub category_id: String,
        /// Non-negative amount in major units; the direction is carried by `type`.
        pub amount: f64,
        pub date: NaiveDate,
    }

    /// Request body for both create (`POST`) and update (`PUT`).
    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionNew {
        #[serde(rename = "type")]
        pub kind: TransactionKind,
        pub category_id: String,
        pub amount: f64,
        pub date: NaiveDate,
    }
}

pub mod category {
    use super::*;

    /// Explicit classification of a category for transaction forms.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum CategoryRole {
        Income,
        Expense,
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct CategoryView {
        pub id: String,
        pub name: String,
        pub color: String,
        /// Not sent by older servers.
        #[serde(default)]
        pub role: Option<CategoryRole>,
    }

    /// Request body for `POST /api/categories`.
    ///
    /// The server prefixes `id` with the owner's user id.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryNew {
        pub id: String,
        pub name: String,
        pub color: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryUpdate {
        pub name: String,
        pub color: String,
    }
}

pub mod goal {
    use super::*;

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct GoalView {
        pub id: i64,
        pub name: String,
        pub target_amount: f64,
        #[serde(default)]
        pub current_savings: Option<f64>,
        #[serde(default, deserialize_with = "optional_date")]
        pub deadline: Option<NaiveDate>,
    }

    /// Request body for both create (`POST`) and update (`PUT`).
    #[derive(Debug, Serialize, Deserialize)]
    pub struct GoalNew {
        pub name: String,
        pub target_amount: f64,
        pub current_savings: f64,
        pub deadline: Option<NaiveDate>,
    }
}

pub mod data {
    use super::*;

    /// Response body of `GET /api/data`.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct DataResponse {
        #[serde(default)]
        pub transactions: Vec<transaction::TransactionView>,
        #[serde(default)]
        pub categories: Vec<category::CategoryView>,
        #[serde(default)]
        pub goals: Vec<goal::GoalView>,
    }
}

pub mod user {
    use super::*;

    /// Request body for `POST /login` and `POST /register`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct Credentials {
        pub username: String,
        pub password: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct LoginResponse {
        #[serde(default)]
        pub message: Option<String>,
        pub user_id: i64,
        pub username: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RegisterResponse {
        #[serde(default)]
        pub message: Option<String>,
        pub user_id: i64,
    }
}

//! HTTP access to the finance tracker server.
//!
//! Every data call carries the caller's [`Identity`] in the `X-User-ID`
//! header. Calls are made exactly once: no retries, no caching, and no
//! timeout beyond the transport default.

use api_types::{
    category::CategoryView,
    data::DataResponse,
    goal::GoalView,
    transaction::TransactionView,
    user::{Credentials, LoginResponse, RegisterResponse},
};
use engine::{
    Category, CategoryDraft, GoalDraft, SavingsGoal, Snapshot, Transaction, TransactionDraft,
};
use reqwest::{Method, RequestBuilder, Response, Url};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use uuid::Uuid;

use crate::{
    convert,
    error::{ClientError, Result},
    identity::Identity,
};

const USER_HEADER: &str = "X-User-ID";

/// Message used when an error response has no `{"error": ...}` body.
pub const FALLBACK_ERROR: &str = "server error";

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// The three record collections exposed by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Transaction,
    Category,
    Goal,
}

impl EntityKind {
    fn collection(self) -> &'static str {
        match self {
            Self::Transaction => "api/transactions",
            Self::Category => "api/categories",
            Self::Goal => "api/goals",
        }
    }
}

#[derive(Debug, Clone)]
pub struct RemoteDataClient {
    base_url: String,
    http: reqwest::Client,
}

impl RemoteDataClient {
    pub fn new(base_url: &str) -> Result<Self> {
        Url::parse(base_url).map_err(|err| ClientError::BaseUrl(err.to_string()))?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str, identity: Option<&Identity>) -> RequestBuilder {
        tracing::debug!("{method} /{}", path.trim_start_matches('/'));
        let req = self.http.request(method, self.url(path));
        match identity {
            Some(identity) => req.header(USER_HEADER, identity.user_id.to_string()),
            None => req,
        }
    }

    /// Turns a non-success response into [`ClientError::Remote`].
    async fn check(res: Response) -> Result<Response> {
        let status = res.status();
        if status.is_success() {
            return Ok(res);
        }

        let message = match res.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => FALLBACK_ERROR.to_string(),
        };
        tracing::debug!("server answered {status}: {message}");
        Err(ClientError::Remote { status, message })
    }

    async fn send_json<TReq, TResp>(
        &self,
        method: Method,
        path: &str,
        identity: Option<&Identity>,
        body: Option<&TReq>,
    ) -> Result<TResp>
    where
        TReq: Serialize + ?Sized,
        TResp: DeserializeOwned,
    {
        let mut req = self.request(method, path, identity);
        if let Some(body) = body {
            req = req.json(body);
        }
        let res = Self::check(req.send().await?).await?;
        Ok(res.json::<TResp>().await?)
    }

    async fn send_unit(&self, method: Method, path: &str, identity: &Identity) -> Result<()> {
        let res = self.request(method, path, Some(identity)).send().await?;
        Self::check(res).await?;
        Ok(())
    }

    fn member(kind: EntityKind, id: &str) -> String {
        format!("{}/{id}", kind.collection())
    }

    /// `POST /login`: exchanges credentials for an [`Identity`].
    pub async fn login(&self, username: &str, password: &str) -> Result<Identity> {
        let body = Credentials {
            username: username.to_string(),
            password: password.to_string(),
        };
        let res: LoginResponse = self
            .send_json(Method::POST, "login", None, Some(&body))
            .await?;
        Ok(Identity::new(res.user_id, res.username))
    }

    /// `POST /register`: creates an account and returns its user id.
    pub async fn register(&self, username: &str, password: &str) -> Result<i64> {
        let body = Credentials {
            username: username.to_string(),
            password: password.to_string(),
        };
        let res: RegisterResponse = self
            .send_json(Method::POST, "register", None, Some(&body))
            .await?;
        Ok(res.user_id)
    }

    /// `GET /api/data`: every record owned by `identity`.
    pub async fn fetch_all(&self, identity: &Identity) -> Result<Snapshot> {
        let data: DataResponse = self
            .send_json::<(), _>(Method::GET, "api/data", Some(identity), None)
            .await?;
        Ok(convert::snapshot(data)?)
    }

    /// `DELETE /api/{kind}/{id}`.
    pub async fn delete(&self, identity: &Identity, kind: EntityKind, id: &str) -> Result<()> {
        self.send_unit(Method::DELETE, &Self::member(kind, id), identity)
            .await
    }

    pub async fn create_transaction(
        &self,
        identity: &Identity,
        draft: &TransactionDraft,
    ) -> Result<Transaction> {
        let view: TransactionView = self
            .send_json(
                Method::POST,
                EntityKind::Transaction.collection(),
                Some(identity),
                Some(&convert::transaction_body(draft)),
            )
            .await?;
        Ok(convert::transaction(view)?)
    }

    pub async fn update_transaction(
        &self,
        identity: &Identity,
        id: i64,
        draft: &TransactionDraft,
    ) -> Result<Transaction> {
        let view: TransactionView = self
            .send_json(
                Method::PUT,
                &Self::member(EntityKind::Transaction, &id.to_string()),
                Some(identity),
                Some(&convert::transaction_body(draft)),
            )
            .await?;
        Ok(convert::transaction(view)?)
    }

    /// Creates a category under a freshly generated key.
    ///
    /// The server prefixes the key with the user id, so the returned
    /// category's `id` differs from the key sent.
    pub async fn create_category(
        &self,
        identity: &Identity,
        draft: &CategoryDraft,
    ) -> Result<Category> {
        let key = Uuid::new_v4().simple().to_string();
        let view: CategoryView = self
            .send_json(
                Method::POST,
                EntityKind::Category.collection(),
                Some(identity),
                Some(&convert::category_body(key, draft)),
            )
            .await?;
        Ok(convert::category(view))
    }

    pub async fn update_category(
        &self,
        identity: &Identity,
        id: &str,
        draft: &CategoryDraft,
    ) -> Result<Category> {
        let view: CategoryView = self
            .send_json(
                Method::PUT,
                &Self::member(EntityKind::Category, id),
                Some(identity),
                Some(&convert::category_update_body(draft)),
            )
            .await?;
        Ok(convert::category(view))
    }

    pub async fn create_goal(&self, identity: &Identity, draft: &GoalDraft) -> Result<SavingsGoal> {
        let view: GoalView = self
            .send_json(
                Method::POST,
                EntityKind::Goal.collection(),
                Some(identity),
                Some(&convert::goal_body(draft)),
            )
            .await?;
        Ok(convert::goal(view)?)
    }

    pub async fn update_goal(
        &self,
        identity: &Identity,
        id: i64,
        draft: &GoalDraft,
    ) -> Result<SavingsGoal> {
        let view: GoalView = self
            .send_json(
                Method::PUT,
                &Self::member(EntityKind::Goal, &id.to_string()),
                Some(identity),
                Some(&convert::goal_body(draft)),
            )
            .await?;
        Ok(convert::goal(view)?)
    }
}

use std::collections::BTreeMap;
use std::collections::HashSet;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::Authenticator;
use portal_service::access::service::AccessGate;
use portal_service::config::CorsConfig;
use portal_service::domain::page::models::KpiReport;
use portal_service::domain::page::models::Page;
use portal_service::domain::page::models::PageId;
use portal_service::domain::page::models::PageName;
use portal_service::domain::page::ports::PageRepository;
use portal_service::domain::page::service::PageService;
use portal_service::domain::post::models::Post;
use portal_service::domain::post::ports::PostSource;
use portal_service::domain::user::models::AdminAccount;
use portal_service::domain::user::models::EmailAddress;
use portal_service::domain::user::models::NewUser;
use portal_service::domain::user::models::Role;
use portal_service::domain::user::models::User;
use portal_service::domain::user::models::UserId;
use portal_service::domain::user::ports::UserRepository;
use portal_service::domain::user::service::UserService;
use portal_service::inbound::http::router::create_router;
use portal_service::inbound::http::router::AppState;
use portal_service::page::errors::PageError;
use portal_service::post::errors::PostError;
use portal_service::user::errors::UserError;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "admin123";

/// Test application that spawns a real server over in-memory stores
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub authenticator: Arc<Authenticator>,
    pub users: Arc<InMemoryUserRepository>,
}

impl TestApp {
    /// Spawn the application with a posts source serving `sample_posts()`
    pub async fn spawn() -> Self {
        Self::spawn_with_posts(Arc::new(StubPostSource::Posts(sample_posts()))).await
    }

    /// Spawn the application in a background task and return TestApp
    pub async fn spawn_with_posts(post_source: Arc<dyn PostSource>) -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let authenticator = Arc::new(Authenticator::new(JWT_SECRET));
        let users = Arc::new(InMemoryUserRepository::default());
        let pages = Arc::new(InMemoryPageRepository::default());

        let user_service = Arc::new(UserService::new(
            Arc::clone(&users),
            Arc::clone(&authenticator),
        ));
        user_service
            .ensure_defaults(&AdminAccount {
                email: EmailAddress::new(ADMIN_EMAIL.to_string()).unwrap(),
                password: ADMIN_PASSWORD.to_string(),
            })
            .await
            .expect("Failed to seed default admin");

        let state = AppState {
            user_service,
            page_service: Arc::new(PageService::new(pages)),
            post_source,
            access_gate: Arc::new(AccessGate::new(
                Arc::clone(&users),
                Arc::clone(&authenticator),
            )),
        };

        let router = create_router(state, &CorsConfig::default());

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::builder()
                .build()
                .expect("Failed to create reqwest client"),
            authenticator,
            users,
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Register an account through the API
    pub async fn register(&self, email: &str, password: &str) -> reqwest::Response {
        self.post("/auth/register")
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Exchange credentials for a token through the OAuth2 form endpoint
    pub async fn login(&self, email: &str, password: &str) -> reqwest::Response {
        self.post("/auth/token")
            .form(&[("username", email), ("password", password)])
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Log in and return the access token, panicking on failure
    pub async fn token_for(&self, email: &str, password: &str) -> String {
        let response = self.login(email, password).await;
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["access_token"]
            .as_str()
            .expect("access_token missing")
            .to_string()
    }

    pub async fn admin_token(&self) -> String {
        self.token_for(ADMIN_EMAIL, ADMIN_PASSWORD).await
    }

    /// Register a plain user and return its token
    pub async fn user_token(&self, email: &str) -> String {
        let response = self.register(email, "pass_word!").await;
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
        self.token_for(email, "pass_word!").await
    }

    /// Create a page as admin and return its id
    pub async fn create_page(&self, admin_token: &str, name: &str) -> i64 {
        let response = self
            .post_authenticated("/pages", admin_token)
            .json(&serde_json::json!({ "name": name }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["data"]["id"].as_i64().expect("page id missing")
    }
}

pub fn sample_posts() -> Vec<Post> {
    vec![
        Post {
            user_id: 1,
            id: 1,
            title: "first".to_string(),
            body: "hello".to_string(),
        },
        Post {
            user_id: 1,
            id: 2,
            title: "second".to_string(),
            body: "world".to_string(),
        },
    ]
}

/// Posts source answering from memory
pub enum StubPostSource {
    Posts(Vec<Post>),
    Failing(u16),
}

#[async_trait]
impl PostSource for StubPostSource {
    async fn fetch_posts(&self) -> Result<Vec<Post>, PostError> {
        match self {
            StubPostSource::Posts(posts) => Ok(posts.clone()),
            StubPostSource::Failing(status) => Err(PostError::UpstreamStatus(*status)),
        }
    }
}

#[derive(Default)]
struct UserTable {
    roles: HashSet<Role>,
    users: Vec<User>,
}

/// User store with the same uniqueness rules as the Postgres schema
#[derive(Default)]
pub struct InMemoryUserRepository {
    table: Mutex<UserTable>,
}

impl InMemoryUserRepository {
    /// Drop a user, as if deleted out of band
    pub fn remove(&self, id: UserId) {
        self.table.lock().unwrap().users.retain(|u| u.id != id);
    }

    pub fn find_id_by_email(&self, email: &str) -> Option<UserId> {
        self.table
            .lock()
            .unwrap()
            .users
            .iter()
            .find(|u| u.email.as_str() == email)
            .map(|u| u.id)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, UserError> {
        let mut table = self.table.lock().unwrap();

        if !table.roles.contains(&user.role) {
            return Err(UserError::RoleMissing(user.role));
        }
        if table.users.iter().any(|u| u.email == user.email) {
            return Err(UserError::EmailAlreadyExists(user.email.to_string()));
        }

        let id = table.users.iter().map(|u| u.id.0).max().unwrap_or(0) + 1;
        let created = User {
            id: UserId(id),
            email: user.email,
            password_hash: user.password_hash,
            role: user.role,
        };
        table.users.push(created.clone());

        Ok(created)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserError> {
        let table = self.table.lock().unwrap();
        Ok(table.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError> {
        let table = self.table.lock().unwrap();
        Ok(table.users.iter().find(|u| &u.email == email).cloned())
    }

    async fn ensure_roles(&self, roles: &[Role]) -> Result<(), UserError> {
        self.table.lock().unwrap().roles.extend(roles.iter().copied());
        Ok(())
    }
}

struct PageRow {
    page: Page,
    visits: i64,
    total_time_seconds: i64,
}

/// Page store keeping the KPI counters next to each page
#[derive(Default)]
pub struct InMemoryPageRepository {
    rows: Mutex<BTreeMap<i64, PageRow>>,
}

#[async_trait]
impl PageRepository for InMemoryPageRepository {
    async fn create(&self, name: PageName) -> Result<Page, PageError> {
        let mut rows = self.rows.lock().unwrap();

        if rows.values().any(|r| r.page.name == name) {
            return Err(PageError::NameAlreadyExists(name.to_string()));
        }

        let id = rows.keys().next_back().copied().unwrap_or(0) + 1;
        let page = Page {
            id: PageId(id),
            name,
        };
        rows.insert(
            id,
            PageRow {
                page: page.clone(),
                visits: 0,
                total_time_seconds: 0,
            },
        );

        Ok(page)
    }

    async fn find_by_id(&self, id: PageId) -> Result<Option<Page>, PageError> {
        Ok(self.rows.lock().unwrap().get(&id.0).map(|r| r.page.clone()))
    }

    async fn increment_visits(&self, id: PageId) -> Result<Option<i64>, PageError> {
        Ok(self.rows.lock().unwrap().get_mut(&id.0).map(|r| {
            r.visits += 1;
            r.visits
        }))
    }

    async fn add_time(&self, id: PageId, seconds: i64) -> Result<Option<i64>, PageError> {
        let mut rows = self.rows.lock().unwrap();
        let Some(row) = rows.get_mut(&id.0) else {
            return Ok(None);
        };

        // Same failure as the BIGINT column overflowing
        row.total_time_seconds = row
            .total_time_seconds
            .checked_add(seconds)
            .ok_or(PageError::TotalTimeOverflow(id))?;

        Ok(Some(row.total_time_seconds))
    }

    async fn list_kpis(&self) -> Result<Vec<KpiReport>, PageError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .values()
            .map(|r| KpiReport {
                page_id: r.page.id,
                page_name: r.page.name.to_string(),
                visits: r.visits,
                total_time_seconds: r.total_time_seconds,
            })
            .collect())
    }
}

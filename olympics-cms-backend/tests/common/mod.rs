#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use axum_extra::extract::cookie::Key;
use http_body_util::BodyExt as _;
use olympics_cms_backend::{router, AppState};
use olympics_cms_config::{CollectionIds, ListingMode};
use olympics_cms_database::memory::MemoryStore;
use olympics_cms_database::{AccountService, Collection, DocumentStore};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tower::ServiceExt as _;

pub const EMAIL: &str = "admin@example.com";
pub const PASSWORD: &str = "correct horse battery staple";

pub fn collection_ids() -> CollectionIds {
    CollectionIds {
        athletes: "athletes".to_owned(),
        events: "events".to_owned(),
        tally: "tally".to_owned(),
        breaking_news: "news".to_owned(),
    }
}

pub struct Reply {
    pub status: StatusCode,
    pub location: Option<String>,
    pub body: String,
}

impl Reply {
    /// Csrf token of the first form on the page.
    pub fn csrf_token(&self) -> String {
        let marker = r#"name="csrf_token" value=""#;
        let start = self.body.find(marker).expect("page has a form") + marker.len();
        let len = self.body[start..].find('"').unwrap();
        self.body[start..start + len].to_owned()
    }

    pub fn count(&self, needle: &str) -> usize {
        self.body.matches(needle).count()
    }
}

/// A browser with its own cookies, talking to a fresh app.
pub struct Client {
    pub store: Arc<MemoryStore>,
    router: Router,
    cookies: BTreeMap<String, String>,
}

impl Client {
    pub async fn new() -> Self {
        Self::with_listing(ListingMode::FullFetch).await
    }

    pub async fn with_listing(listing: ListingMode) -> Self {
        let store = Arc::new(MemoryStore::new());
        store.add_user(EMAIL, PASSWORD).await;
        let documents: Arc<dyn DocumentStore> = store.clone();
        let accounts: Arc<dyn AccountService> = store.clone();
        let state = AppState::new(
            documents,
            accounts,
            collection_ids(),
            listing,
            Key::generate(),
        )
        .unwrap();
        Self {
            store,
            router: router(state),
            cookies: BTreeMap::new(),
        }
    }

    pub fn collection<'a, T>(&'a self, id: &'a str) -> Collection<'a, T>
    where
        T: Serialize + DeserializeOwned,
    {
        Collection::new(self.store.as_ref(), id)
    }

    async fn send(&mut self, request: axum::http::request::Builder, body: Body) -> Reply {
        let cookie = self
            .cookies
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("; ");
        let request = if cookie.is_empty() {
            request
        } else {
            request.header(header::COOKIE, cookie)
        };
        let response = self
            .router
            .clone()
            .oneshot(request.body(body).unwrap())
            .await
            .unwrap();
        for set_cookie in response.headers().get_all(header::SET_COOKIE) {
            let set_cookie = set_cookie.to_str().unwrap();
            let pair = set_cookie.split(';').next().unwrap();
            let (name, value) = pair.split_once('=').unwrap();
            if value.is_empty() {
                self.cookies.remove(name);
            } else {
                self.cookies.insert(name.to_owned(), value.to_owned());
            }
        }
        let status = response.status();
        let location = response
            .headers()
            .get(header::LOCATION)
            .map(|location| location.to_str().unwrap().to_owned());
        let body = response.into_body().collect().await.unwrap().to_bytes();
        Reply {
            status,
            location,
            body: String::from_utf8(body.to_vec()).unwrap(),
        }
    }

    pub async fn get(&mut self, uri: &str) -> Reply {
        self.send(Request::get(uri), Body::empty()).await
    }

    pub async fn post(&mut self, uri: &str, form: &[(&str, &str)]) -> Reply {
        let body = serde_urlencoded::to_string(form).unwrap();
        self.send(
            Request::post(uri).header(header::CONTENT_TYPE, "application/x-www-form-urlencoded"),
            Body::from(body),
        )
        .await
    }

    pub async fn log_in(&mut self) {
        let token = self.get("/backend/login").await.csrf_token();
        let reply = self
            .post(
                "/backend/login",
                &[
                    ("csrf_token", &token),
                    ("email", EMAIL),
                    ("password", PASSWORD),
                ],
            )
            .await;
        assert_eq!(reply.status, StatusCode::SEE_OTHER);
    }
}

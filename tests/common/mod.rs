//! A stub content API served on a local port

#![allow(dead_code)]

use axum::extract::Query;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use headless_blog::config::ApiConfig;

pub struct StubApi {
    /// Endpoint to configure the client with, e.g. `http://127.0.0.1:1234/api/v2`
    pub endpoint: String,
    /// Query parameters of every search request, in arrival order
    pub searches: Arc<Mutex<Vec<HashMap<String, String>>>>,
}

impl StubApi {
    pub fn config(&self) -> ApiConfig {
        ApiConfig {
            endpoint: self.endpoint.clone(),
            timeout_secs: 5,
            ..ApiConfig::default()
        }
    }

    /// URL of a given page, as the API would advertise it in `next_page`
    pub fn page_url(&self, page: u32) -> String {
        format!(
            "{}/documents/search?page={}&pageSize=2&ref=master-ref",
            self.endpoint, page
        )
    }
}

fn document(uid: &str, date: Option<&str>, title: &str) -> serde_json::Value {
    json!({
        "id": format!("id-{}", uid),
        "uid": uid,
        "type": "posts",
        "first_publication_date": date,
        "data": {
            "title": title,
            "subtitle": format!("{} subtitle", title),
            "author": "Joseph Oliveira"
        }
    })
}

/// Start the stub
///
/// Page 1 and 2 hold two posts each; page 2 is the last one. Any other page
/// answers 500. An `access_token` sent with a search is echoed in `next_page`.
pub async fn spawn() -> StubApi {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let endpoint = format!("http://{}/api/v2", addr);
    let searches = Arc::new(Mutex::new(Vec::new()));

    let search = {
        let endpoint = endpoint.clone();
        let searches = searches.clone();
        move |Query(params): Query<HashMap<String, String>>| {
            let endpoint = endpoint.clone();
            let searches = searches.clone();
            async move {
                let page = params.get("page").cloned().unwrap_or_else(|| "1".to_string());
                // Private repositories echo the token back in `next_page`
                let token = params
                    .get("access_token")
                    .map(|t| format!("&access_token={}", t))
                    .unwrap_or_default();
                searches.lock().unwrap().push(params);

                let next = |n: u32| {
                    format!(
                        "{}/documents/search?page={}&pageSize=2&ref=master-ref{}",
                        endpoint, n, token
                    )
                };
                let body = match page.as_str() {
                    "1" => json!({
                        "page": 1,
                        "next_page": next(2),
                        "results": [
                            document("como-utilizar-hooks", Some("2021-03-15T19:25:28+0000"), "Como utilizar Hooks"),
                            document("criando-um-app-cra-do-zero", Some("2021-03-25T19:27:35+0000"), "Criando um app CRA do zero"),
                        ]
                    }),
                    "2" => json!({
                        "page": 2,
                        "next_page": null,
                        "results": [
                            document("mapas-com-react", Some("2021-04-01T10:00:00+0000"), "Mapas com React"),
                            document("rascunho", None, "Rascunho"),
                        ]
                    }),
                    _ => {
                        return (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response();
                    }
                };
                Json(body).into_response()
            }
        }
    };

    let app = Router::new()
        .route(
            "/api/v2",
            get(|| async {
                Json(json!({
                    "refs": [
                        {"id": "master", "ref": "master-ref", "label": "Master", "isMasterRef": true}
                    ]
                }))
            }),
        )
        .route("/api/v2/documents/search", get(search))
        .route(
            "/api/v2/broken",
            get(|| async { (StatusCode::OK, "not json") }),
        );

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    StubApi { endpoint, searches }
}

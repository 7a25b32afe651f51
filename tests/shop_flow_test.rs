use reqwest::{header, redirect::Policy, Client, Response, StatusCode};
use std::sync::Arc;
use tokio::net::TcpListener;
use ubermelon::adapters::MemorySessionStore;
use ubermelon::web::{self, AppState};
use ubermelon::{AppConfig, Catalog};

const CATALOG: &str = "\
1|Watermelon|watermelon|10.00|http://example.com/watermelon.jpg|red|green|0
2|Cantaloupe|crenshaw|8.00|http://example.com/crenshaw.jpg|salmon|yellow|0
3|Honeydew|Golden Honeydew|3.25|http://example.com/honeydew.jpg|green|gold|1
";

async fn start_shop() -> String {
    let catalog = Catalog::parse(CATALOG).unwrap();
    let state: Arc<AppState> = AppState::new(&AppConfig::default(), catalog).unwrap();
    serve_state(state).await
}

async fn start_shop_with_store() -> (String, Arc<MemorySessionStore>) {
    let store = Arc::new(MemorySessionStore::new(chrono::Duration::minutes(30)));
    let catalog = Catalog::parse(CATALOG).unwrap();
    let state = AppState::with_store(&AppConfig::default(), catalog, store.clone()).unwrap();
    (serve_state(state).await, store)
}

async fn serve_state(state: Arc<AppState>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    tokio::spawn(web::serve(listener, state, std::future::pending()));

    format!("http://{}", address)
}

/// Minimal browser: keeps the session cookie and does not follow redirects.
struct Browser {
    client: Client,
    base: String,
    cookie: Option<String>,
}

impl Browser {
    fn new(base: &str) -> Self {
        Self {
            client: Client::builder().redirect(Policy::none()).build().unwrap(),
            base: base.to_string(),
            cookie: None,
        }
    }

    async fn get(&mut self, path: &str) -> Response {
        let request = self.client.get(format!("{}{}", self.base, path));
        self.send(request).await
    }

    async fn post(&mut self, path: &str) -> Response {
        let request = self.client.post(format!("{}{}", self.base, path));
        self.send(request).await
    }

    async fn send(&mut self, mut request: reqwest::RequestBuilder) -> Response {
        if let Some(cookie) = &self.cookie {
            request = request.header(header::COOKIE, cookie);
        }
        let response = request.send().await.unwrap();

        if let Some(set_cookie) = response.headers().get(header::SET_COOKIE) {
            let pair = set_cookie.to_str().unwrap().split(';').next().unwrap();
            self.cookie = Some(pair.to_string());
        }
        response
    }

    async fn page(&mut self, path: &str) -> (StatusCode, String) {
        let response = self.get(path).await;
        let status = response.status();
        (status, response.text().await.unwrap())
    }
}

fn location(response: &Response) -> &str {
    response.headers()[header::LOCATION].to_str().unwrap()
}

#[tokio::test]
async fn test_session_cookie_is_set_once_the_cart_changes() {
    let base = start_shop().await;
    let mut browser = Browser::new(&base);

    let response = browser.get("/").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(header::SET_COOKIE).is_none());

    let response = browser.get("/add_to_cart/1").await;
    let set_cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
    assert!(set_cookie.starts_with("ubermelon_session="));
    assert!(set_cookie.contains("HttpOnly"));

    // 已有 session 的請求不再重發 cookie
    let again = browser.get("/").await;
    assert!(again.headers().get(header::SET_COOKIE).is_none());
}

#[tokio::test]
async fn test_cookieless_browsing_stores_no_sessions() {
    let (base, store) = start_shop_with_store().await;

    for path in ["/", "/melons", "/melon/1", "/cart", "/login"] {
        let mut browser = Browser::new(&base);
        let response = browser.get(path).await;
        assert_eq!(response.status(), StatusCode::OK);
    }
    assert!(store.is_empty().await);

    let mut browser = Browser::new(&base);
    browser.get("/add_to_cart/2").await;
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn test_list_melons_shows_whole_catalog() {
    let base = start_shop().await;
    let mut browser = Browser::new(&base);

    let (status, body) = browser.page("/melons").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<a href=\"/melon/1\">watermelon</a> $10.00"));
    assert!(body.contains("<a href=\"/melon/2\">crenshaw</a> $8.00"));
    assert!(body.contains("<a href=\"/melon/3\">Golden Honeydew</a> $3.25"));
}

#[tokio::test]
async fn test_melon_detail() {
    let base = start_shop().await;
    let mut browser = Browser::new(&base);

    let (status, body) = browser.page("/melon/3").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<h1>Golden Honeydew</h1>"));
    assert!(body.contains("href=\"/add_to_cart/3\""));
}

#[tokio::test]
async fn test_unknown_melon_detail_is_not_found() {
    let base = start_shop().await;
    let mut browser = Browser::new(&base);

    let (status, body) = browser.page("/melon/999").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("No melon with id 999"));
}

#[tokio::test]
async fn test_non_numeric_melon_id_is_bad_request() {
    let base = start_shop().await;
    let mut browser = Browser::new(&base);

    let (status, _) = browser.page("/melon/watermelon").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_empty_cart() {
    let base = start_shop().await;
    let mut browser = Browser::new(&base);

    let (status, body) = browser.page("/cart").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Your cart is empty."));
    assert!(body.contains("Order Total: $0.00"));
}

#[tokio::test]
async fn test_add_to_cart_then_view_cart() {
    let base = start_shop().await;
    let mut browser = Browser::new(&base);

    for id in [1, 1, 2] {
        let response = browser.get(&format!("/add_to_cart/{}", id)).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/cart");
    }

    let (status, body) = browser.page("/cart").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("You added a melon to your cart! Woo!"));
    assert!(body.contains(
        "<td><a href=\"/melon/1\">watermelon</a></td><td>2</td><td>$10.00</td><td>$20.00</td>"
    ));
    assert!(body.contains(
        "<td><a href=\"/melon/2\">crenshaw</a></td><td>1</td><td>$8.00</td><td>$8.00</td>"
    ));
    assert!(body.contains("Order Total: $28.00"));
    assert!(body.find("/melon/1").unwrap() < body.find("/melon/2").unwrap());

    // flash 只顯示一次
    let (_, body) = browser.page("/cart").await;
    assert!(!body.contains("You added a melon to your cart! Woo!"));
    assert!(body.contains("Order Total: $28.00"));
}

#[tokio::test]
async fn test_carts_are_per_session() {
    let base = start_shop().await;
    let mut alice = Browser::new(&base);
    let mut bob = Browser::new(&base);

    alice.get("/add_to_cart/2").await;

    let (_, alice_cart) = alice.page("/cart").await;
    let (_, bob_cart) = bob.page("/cart").await;

    assert!(alice_cart.contains("Order Total: $8.00"));
    assert!(bob_cart.contains("Your cart is empty."));
}

#[tokio::test]
async fn test_unknown_id_in_cart_fails_cart_view() {
    let base = start_shop().await;
    let mut browser = Browser::new(&base);

    let response = browser.get("/add_to_cart/999").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let (status, body) = browser.page("/cart").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.contains("Cart refers to unknown melon id 999"));
}

#[tokio::test]
async fn test_forged_cookie_starts_fresh_session() {
    let base = start_shop().await;
    let mut browser = Browser::new(&base);
    browser.get("/add_to_cart/1").await;

    let forged = format!(
        "ubermelon_session={}.{}",
        "00000000-0000-4000-8000-000000000000",
        "00".repeat(32)
    );
    browser.cookie = Some(forged);

    let response = browser.get("/cart").await;
    assert!(response.headers().get(header::SET_COOKIE).is_none());
    let body = response.text().await.unwrap();
    assert!(body.contains("Your cart is empty."));

    let response = browser.get("/add_to_cart/2").await;
    assert!(response.headers().get(header::SET_COOKIE).is_some());
    let (_, body) = browser.page("/cart").await;
    assert!(body.contains("Order Total: $8.00"));
}

#[tokio::test]
async fn test_login_pages() {
    let base = start_shop().await;
    let mut browser = Browser::new(&base);

    let (status, body) = browser.page("/login").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<form action=\"/login\" method=\"post\">"));

    let response = browser.post("/login").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.text().await.unwrap(),
        "Oops! This needs to be implemented"
    );
}

#[tokio::test]
async fn test_checkout_redirects_with_notice() {
    let base = start_shop().await;
    let mut browser = Browser::new(&base);

    let response = browser.get("/checkout").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/melons");

    let (_, body) = browser.page("/melons").await;
    assert!(body.contains("Sorry! Checkout will be implemented in a future version."));
}

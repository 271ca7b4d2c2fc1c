use anyhow::Result;
use dex_catalog::{
    map_category, CardUseCase, CatalogClient, CatalogError, CatalogPort, CategoryVariant, ItemRef,
    ReqwestHttp,
};
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Mutex;

/// Minimal HTTP/1.1 server answering canned responses by request target.
struct StubCatalog {
    base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
    handle: tokio::task::JoinHandle<()>,
}

impl StubCatalog {
    async fn start(routes: HashMap<String, (u16, String)>) -> Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let requests = Arc::new(Mutex::new(Vec::new()));
        let routes = Arc::new(routes);

        let seen = requests.clone();
        let handle = tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                tokio::spawn(handle_request(stream, routes.clone(), seen.clone()));
            }
        });

        Ok(Self {
            base_url: format!("http://{}/api/v2", addr),
            requests,
            handle,
        })
    }

    fn client(&self) -> Result<CatalogClient> {
        let http = ReqwestHttp::new(Duration::from_secs(5), "dex_catalog-tests")?;
        Ok(CatalogClient::new(Arc::new(http), &self.base_url, "pokemon")?)
    }
}

impl Drop for StubCatalog {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn handle_request(
    mut stream: TcpStream,
    routes: Arc<HashMap<String, (u16, String)>>,
    seen: Arc<Mutex<Vec<String>>>,
) {
    let mut buf = vec![0u8; 8192];
    let mut read = 0;
    // Requests are bodiless GETs; read until the end of the headers.
    loop {
        match stream.read(&mut buf[read..]).await {
            Ok(0) | Err(_) => return,
            Ok(n) => {
                read += n;
                if buf[..read].windows(4).any(|w| w == b"\r\n\r\n") || read == buf.len() {
                    break;
                }
            }
        }
    }

    let head = String::from_utf8_lossy(&buf[..read]);
    let target = head
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("/")
        .to_string();
    seen.lock().await.push(target.clone());

    let (status, body) = routes
        .get(&target)
        .cloned()
        .unwrap_or((404, r#"{"detail":"Not found."}"#.to_string()));
    let reason = if status == 200 { "OK" } else { "Error" };
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        reason,
        body.len(),
        body
    );
    let _ = stream.write_all(response.as_bytes()).await;
    let _ = stream.shutdown().await;
}

fn detail_body(id: u32, name: &str, types: &[&str]) -> String {
    let types: Vec<_> = types
        .iter()
        .enumerate()
        .map(|(i, t)| json!({ "slot": i + 1, "type": { "name": t, "url": "https://pokeapi.co/api/v2/type/1/" } }))
        .collect();
    json!({
        "id": id,
        "name": name,
        "base_experience": 64,
        "height": 7,
        "weight": 69,
        "sprites": { "front_default": format!("https://img.test/{}.png", id) },
        "types": types
    })
    .to_string()
}

#[tokio::test]
async fn list_items_returns_results_from_upstream() -> Result<()> {
    let mut routes = HashMap::new();
    routes.insert(
        "/api/v2/pokemon?limit=20&offset=0".to_string(),
        (
            200,
            json!({ "results": [ { "name": "bulbasaur", "url": "https://pokeapi.co/api/v2/pokemon/1/" } ] })
                .to_string(),
        ),
    );
    let stub = StubCatalog::start(routes).await?;
    let client = stub.client()?;

    let items = client.list_items(20, 0).await?;

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].name, "bulbasaur");
    assert_eq!(items[0].id, Some(1));
    assert_eq!(
        *stub.requests.lock().await,
        vec!["/api/v2/pokemon?limit=20&offset=0".to_string()]
    );
    Ok(())
}

#[tokio::test]
async fn not_found_surfaces_as_remote_fetch_error() -> Result<()> {
    let stub = StubCatalog::start(HashMap::new()).await?;
    let client = stub.client()?;

    let err = client.list_first_page().await.unwrap_err();
    match &err {
        CatalogError::RemoteFetch { status, url } => {
            assert_eq!(*status, 404);
            assert!(url.ends_with("/api/v2/pokemon?limit=20&offset=0"), "{}", url);
        }
        other => panic!("expected RemoteFetch, got {:?}", other),
    }
    Ok(())
}

#[tokio::test]
async fn server_error_on_details_carries_status() -> Result<()> {
    let mut routes = HashMap::new();
    routes.insert(
        "/api/v2/pokemon/pikachu".to_string(),
        (500, "Internal Server Error".to_string()),
    );
    let stub = StubCatalog::start(routes).await?;
    let client = stub.client()?;

    let err = client.get_item_details(&ItemRef::from("pikachu")).await.unwrap_err();
    assert_eq!(err.status(), Some(500));
    Ok(())
}

#[tokio::test]
async fn details_feed_category_mapping() -> Result<()> {
    let mut routes = HashMap::new();
    routes.insert(
        "/api/v2/pokemon/6".to_string(),
        (200, detail_body(6, "charizard", &["fire", "flying"])),
    );
    let stub = StubCatalog::start(routes).await?;
    let client = stub.client()?;

    let details = client.get_item_details(&ItemRef::Id(6)).await?;
    let variants: Vec<CategoryVariant> = details
        .categories
        .iter()
        .map(|c| map_category(Some(c)))
        .collect();

    assert_eq!(details.name, "charizard");
    assert_eq!(details.image_url.as_deref(), Some("https://img.test/6.png"));
    assert_eq!(variants, vec![CategoryVariant::Fire, CategoryVariant::Flying]);
    Ok(())
}

#[tokio::test]
async fn card_page_fetches_each_detail_once() -> Result<()> {
    let mut routes = HashMap::new();
    routes.insert(
        "/api/v2/pokemon?limit=2&offset=3".to_string(),
        (
            200,
            json!({ "results": [
                { "name": "charmander", "url": "https://pokeapi.co/api/v2/pokemon/4/" },
                { "name": "charmeleon", "url": "https://pokeapi.co/api/v2/pokemon/5/" }
            ] })
            .to_string(),
        ),
    );
    routes.insert("/api/v2/pokemon/4".to_string(), (200, detail_body(4, "charmander", &["fire"])));
    routes.insert("/api/v2/pokemon/5".to_string(), (200, detail_body(5, "charmeleon", &["fire"])));
    let stub = StubCatalog::start(routes).await?;
    let use_case = CardUseCase::new(Arc::new(stub.client()?), 2);

    let cards = use_case.build_page(2, 3).await?;

    assert_eq!(cards.len(), 2);
    assert_eq!(cards[0].details.name, "charmander");
    assert_eq!(cards[1].details.name, "charmeleon");

    let mut requests = stub.requests.lock().await.clone();
    requests.sort();
    assert_eq!(
        requests,
        vec![
            "/api/v2/pokemon/4".to_string(),
            "/api/v2/pokemon/5".to_string(),
            "/api/v2/pokemon?limit=2&offset=3".to_string(),
        ]
    );
    Ok(())
}

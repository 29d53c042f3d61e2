use locale_scout::credentials::MemoryStore;
use locale_scout::providers::{IdealistaProvider, ProviderSettings};
use locale_scout::{PropertyService, SearchRequest, Source};
use serde_json::json;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Serve a single canned HTTP response; the handle yields the raw request head
async fn serve_once(status: &'static str, body: String) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();

        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }

        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();

        String::from_utf8_lossy(&request).to_string()
    });

    (base_url, handle)
}

fn service_for(base_url: String) -> PropertyService {
    let provider = IdealistaProvider::with_settings(ProviderSettings {
        base_url,
        timeout: Some(std::time::Duration::from_secs(10)),
    })
    .unwrap();
    let service = PropertyService::new(MemoryStore::new(), provider);
    service.set_credential("test-key").unwrap();
    service
}

fn request() -> SearchRequest {
    SearchRequest::new("Milano", 3000.0, 40.0, 150.0, "Bar").unwrap()
}

#[tokio::test]
async fn live_listings_are_mapped_and_request_is_well_formed() {
    let body = json!({
        "elementList": [
            {
                "propertyCode": "111",
                "address": "Corso Buenos Aires 5",
                "municipality": "Milano",
                "price": 2400.0,
                "size": 95.0,
                "hasParking": true
            },
            {
                "propertyCode": "222",
                "address": "Via Padova 80",
                "municipality": "Milano",
                "price": 1200.0,
                "size": 60.0
            }
        ]
    })
    .to_string();
    let (base_url, server) = serve_once("200 OK", body).await;

    let listings = service_for(base_url).search_properties(&request()).await;

    assert_eq!(listings.len(), 2);
    assert!(listings.iter().all(|l| l.source == Source::Idealista));
    assert_eq!(listings[0].id, "111");
    assert_eq!(listings[0].address, "Corso Buenos Aires 5, Milano");
    assert_eq!(listings[0].features, vec!["Parcheggio"]);
    assert_eq!(listings[1].features, vec!["Buona posizione", "Spazi funzionali"]);

    let head = server.await.unwrap().to_lowercase();
    assert!(head.starts_with("get /properties?"));
    assert!(head.contains("x-rapidapi-key: test-key"));
    assert!(head.contains("x-rapidapi-host: idealista2.p.rapidapi.com"));
    for param in [
        "locationname=milano",
        "maxprice=3000",
        "minsize=40",
        "maxsize=150",
        "propertytype=commercial",
        "operation=rent",
        "locale=it",
        "numpage=1",
        "maxitems=10",
    ] {
        assert!(head.contains(param), "missing {} in {}", param, head);
    }
}

#[tokio::test]
async fn missing_element_list_falls_back_to_demo_data() {
    let (base_url, server) = serve_once("200 OK", json!({ "total": 0 }).to_string()).await;

    let listings = service_for(base_url).search_properties(&request()).await;
    server.await.unwrap();

    assert_eq!(listings.len(), 3);
    assert!(listings.iter().all(|l| l.source == Source::DemoData));
    let prices: Vec<f64> = listings.iter().map(|l| l.price).collect();
    assert_eq!(prices, vec![3200.0, 3400.0, 3600.0]);
}

#[tokio::test]
async fn server_error_falls_back_to_demo_data() {
    let (base_url, server) = serve_once(
        "500 Internal Server Error",
        json!({ "message": "boom" }).to_string(),
    )
    .await;

    let listings = service_for(base_url).search_properties(&request()).await;
    server.await.unwrap();

    assert_eq!(listings.len(), 3);
    assert!(listings.iter().all(|l| l.source == Source::DemoData));
}

#[tokio::test]
async fn unreachable_provider_falls_back_to_demo_data() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let listings = service_for(base_url).search_properties(&request()).await;

    assert_eq!(listings.len(), 3);
    assert!(listings.iter().all(|l| l.source == Source::DemoData));
}

#[tokio::test]
async fn ranked_demo_results_fit_the_request() {
    let provider = IdealistaProvider::new().unwrap();
    let service = PropertyService::new(MemoryStore::new(), provider);

    for location in ["Milano Centro", "ROMA", "Torino"] {
        let request = SearchRequest::new(location, 2500.0, 100.0, 110.0, "Bar")
            .unwrap()
            .with_min_price(500.0)
            .unwrap();
        let ranked = service.search_ranked(&request).await;

        assert_eq!(ranked.len(), 3);
        for scored in &ranked {
            assert!((500.0..=2500.0).contains(&scored.listing.price));
            assert!((100.0..=110.0).contains(&scored.listing.surface));
            assert!((60..=100).contains(&scored.score));
        }
    }
}

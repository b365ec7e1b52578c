//! Integration tests for fetching typed entities against a mock API.

use playme_core::{MethodPath, PlaymeClient, QueryString, ResponseStatus};
use playme_domain::{Album, Artist, Artists, DomainError, Entity, Item, Registry, Track, Tracks};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> PlaymeClient {
    PlaymeClient::builder()
        .base_url(server.uri())
        .api_key("test_api_key")
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_fetch_track_with_nested_album_and_artist() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/track.get"))
        .and(query_param("trackCode", "3342"))
        .and(query_param("format", "json"))
        .and(query_param("apikey", "test_api_key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "response": {
                "track": {
                    "trackCode": "3342",
                    "name": "Paranoid Android",
                    "album": {"albumCode": "782378", "name": "OK Computer"},
                    "artist": {"artistCode": "421", "name": "Radiohead"}
                }
            }
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let registry = Registry::default();
    let track = Track::fetch(&client, &registry, 3342).await.unwrap();

    assert_eq!(track.name(), Some("Paranoid Android"));
    assert_eq!(track.album().and_then(Album::name), Some("OK Computer"));
    assert_eq!(track.artist().and_then(Artist::name), Some("Radiohead"));
}

#[tokio::test]
async fn test_fetch_album_api_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/album.get"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "response": {
                "error": {"code": "13000", "description": "Item not found"}
            }
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let registry = Registry::default();
    let err = Album::fetch(&client, &registry, 1).await.unwrap_err();

    match err {
        DomainError::Api { status } => {
            assert_eq!(status, ResponseStatus::new(13000));
            assert_eq!(status.to_string(), "Item not found");
        }
        other => panic!("expected an API error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unbound_entity_request() {
    let mock_server = MockServer::start().await;
    let client = client_for(&mock_server);
    let registry = Registry::default();

    let err = Item::request(&client, &registry, QueryString::new().with("a", 1))
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::Unbound("Item")));
    assert_eq!(err.to_string(), "not implemented: Item.api_method");

    let requests = mock_server.received_requests().await.unwrap();
    assert!(requests.is_empty());
}

#[tokio::test]
async fn test_search_artists_by_name() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/artist.searchByName"))
        .and(query_param("name", "Radiohead"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "response": {
                "artists": [
                    {"artist": {"artistCode": "421", "name": "Radiohead"}},
                    {"artist": {"artistCode": "977", "name": "Radiohead Tribute"}},
                    {"artist": {"artistCode": "421", "name": "Radiohead"}},
                    42
                ]
            }
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let registry = Registry::default();
    let artists = Artists::search_by_name(&client, &registry, "Radiohead")
        .await
        .unwrap();

    assert_eq!(artists.len(), 2);
    assert_eq!(artists[0].code().as_deref(), Some("421"));
    assert_eq!(artists[1].name(), Some("Radiohead Tribute"));
}

#[tokio::test]
async fn test_collection_request_with_arbitrary_method() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/album.getTracks"))
        .and(query_param("albumCode", "782378"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "response": {
                "tracks": [
                    {"track": {"name": "Airbag", "album": {"name": "OK Computer"}}},
                    {"track": {"name": "Paranoid Android", "album": {"name": "OK Computer"}}}
                ]
            }
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let registry = Registry::default();
    let method = MethodPath::new("album").extend("getTracks").unwrap();
    let tracks = Tracks::request(
        &client,
        &registry,
        &method,
        QueryString::new().with("albumCode", 782378),
    )
    .await
    .unwrap();

    assert_eq!(tracks.len(), 2);
    assert!(tracks.iter().all(|track| track.album().is_some()));
    assert_eq!(tracks.slice(1..).first().and_then(Track::name), Some("Paranoid Android"));
}

#[tokio::test]
async fn test_malformed_body_surfaces_core_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/artist.get"))
        .respond_with(ResponseTemplate::new(200).set_body_string("spam"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let registry = Registry::default();
    let err = Artist::fetch(&client, &registry, 421).await.unwrap_err();

    assert!(matches!(
        err,
        DomainError::Core(playme_core::PlaymeError::InvalidResponse)
    ));
}

//! REST transport tests against a local mock server

use pinecone_index::{
    DeleteParams, DescribeIndexStatsParams, FetchParams, Index, IndexError, OpenApiConfig,
    QueryParams, QueryResponse, QueryVector, QueryVectorInput, TransportOptions, UpdateParams,
    UpsertParams,
};
use serde_json::{json, Map, Value};
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn index_for(server: &MockServer) -> Index {
    Index::builder("movies")
        .openapi_config(
            OpenApiConfig::default()
                .with_host(server.uri())
                .with_api_key("test-key"),
        )
        .build()
        .unwrap()
}

fn object(value: Value) -> Map<String, Value> {
    value.as_object().unwrap().clone()
}

async fn last_body(server: &MockServer) -> Value {
    let requests = server.received_requests().await.unwrap();
    let request = requests.last().unwrap();
    serde_json::from_slice(&request.body).unwrap()
}

#[tokio::test]
async fn test_upsert_sends_vectors_and_api_key() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/vectors/upsert"))
        .and(header("Api-Key", "test-key"))
        .and(body_json(json!({
            "vectors": [
                {"id": "id1", "values": [1.0, 2.0], "metadata": {}},
                {"id": "id2", "values": [3.0, 4.0], "metadata": {"genre": "drama"}}
            ],
            "namespace": "films"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"upsertedCount": 2})))
        .expect(1)
        .mount(&server)
        .await;

    let index = index_for(&server);
    let response = index
        .upsert(
            UpsertParams::new(vec![
                json!(["id1", [1.0, 2.0]]),
                json!(["id2", [3.0, 4.0], {"genre": "drama"}]),
            ])
            .namespace("films"),
            TransportOptions::default(),
        )
        .await
        .unwrap();

    assert_eq!(response.upserted_count, 2);
    assert_eq!(index.metrics().request_count("upsert", true), 1);
}

#[tokio::test]
async fn test_fetch_encodes_ids_as_query_params() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/vectors/fetch"))
        .and(query_param("ids", "id1"))
        .and(query_param("ids", "id2"))
        .and(query_param("namespace", "films"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "vectors": {
                "id1": {"id": "id1", "values": [1.0, 2.0]},
                "id2": {"id": "id2", "values": [3.0, 4.0], "metadata": {"year": 1999}}
            },
            "namespace": "films"
        })))
        .mount(&server)
        .await;

    let response = index_for(&server)
        .fetch(
            FetchParams::new(["id1", "id2"]).namespace("films"),
            TransportOptions::default(),
        )
        .await
        .unwrap();

    assert_eq!(response.namespace, "films");
    assert_eq!(response.vectors.len(), 2);
    assert_eq!(response.vectors["id2"].values, vec![3.0, 4.0]);
    assert_eq!(
        response.vectors["id2"].metadata.as_ref().unwrap()["year"],
        json!(1999)
    );

    let requests = server.received_requests().await.unwrap();
    let query = requests[0].url.query().unwrap_or_default().to_string();
    assert_eq!(query, "ids=id1&ids=id2&namespace=films");
}

#[tokio::test]
async fn test_unary_query_narrows_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/query"))
        .and(body_json(json!({"vector": [0.5, 0.25], "topK": 2, "includeMetadata": true})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [],
            "matches": [
                {"id": "a", "score": 0.75, "metadata": {"genre": "drama"}},
                {"id": "b", "score": 0.5}
            ],
            "namespace": "",
            "usage": {"readUnits": 5}
        })))
        .mount(&server)
        .await;

    let response = index_for(&server)
        .query(
            QueryParams::by_vector(vec![0.5, 0.25])
                .top_k(2)
                .include_metadata(true),
            TransportOptions::default(),
        )
        .await
        .unwrap();

    let unary = response.into_unary().unwrap();
    assert_eq!(unary.matches.len(), 2);
    assert_eq!(unary.matches[0].id, "a");
    assert_eq!(unary.usage.unwrap().read_units, 5);
}

#[tokio::test]
async fn test_multi_query_narrows_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/query"))
        .and(body_json(json!({
            "queries": [
                {"values": [1.0, 2.0]},
                {"values": [3.0, 4.0], "filter": {"genre": {"$eq": "drama"}}}
            ],
            "topK": 1
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                {"matches": [{"id": "x", "score": 1.0}], "namespace": ""},
                {"matches": [], "namespace": ""}
            ],
            "matches": [],
            "namespace": ""
        })))
        .mount(&server)
        .await;

    let response = index_for(&server)
        .query(
            QueryParams::by_queries(vec![
                QueryVectorInput::from(QueryVector::new(vec![1.0, 2.0])),
                QueryVectorInput::from(json!([[3.0, 4.0], {"genre": {"$eq": "drama"}}])),
            ])
            .top_k(1),
            TransportOptions::default(),
        )
        .await
        .unwrap();

    match response {
        QueryResponse::Multi(multi) => {
            assert_eq!(multi.results.len(), 2);
            assert_eq!(multi.results[0].matches[0].id, "x");
        }
        other => panic!("expected multi-query result, got {:?}", other),
    }
}

#[tokio::test]
async fn test_delete_omits_unset_fields() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/vectors/delete"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(2)
        .mount(&server)
        .await;

    let index = index_for(&server);
    index
        .delete(DeleteParams::by_ids(["id1"]), TransportOptions::default())
        .await
        .unwrap();
    assert_eq!(last_body(&server).await, json!({"ids": ["id1"]}));

    index
        .delete(
            DeleteParams::all().namespace("films"),
            TransportOptions::default(),
        )
        .await
        .unwrap();
    assert_eq!(
        last_body(&server).await,
        json!({"deleteAll": true, "namespace": "films"})
    );
}

#[tokio::test]
async fn test_update_sends_only_given_fields() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/vectors/update"))
        .and(body_json(json!({"id": "id3", "setMetadata": {"type": "doc"}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    index_for(&server)
        .update(
            UpdateParams::new("id3").set_metadata(object(json!({"type": "doc"}))),
            TransportOptions::default(),
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_describe_index_stats_sends_empty_filter() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/describe_index_stats"))
        .and(body_json(json!({"filter": {}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "namespaces": {"": {"vectorCount": 40}, "films": {"vectorCount": 2}},
            "dimension": 8,
            "indexFullness": 0.0,
            "totalVectorCount": 42
        })))
        .mount(&server)
        .await;

    let stats = index_for(&server)
        .describe_index_stats(DescribeIndexStatsParams::new(), TransportOptions::default())
        .await
        .unwrap();

    assert_eq!(stats.dimension, 8);
    assert_eq!(stats.total_vector_count, 42);
    assert_eq!(stats.namespaces["films"].vector_count, 2);
}

#[tokio::test]
async fn test_unauthorized_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/describe_index_stats"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
        .mount(&server)
        .await;

    let index = index_for(&server);
    let err = index
        .describe_index_stats(DescribeIndexStatsParams::new(), TransportOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, IndexError::Unauthorized(ref body) if body.contains("invalid api key")));
    assert_eq!(err.status(), Some(401));
    assert_eq!(index.metrics().request_count("describe_index_stats", false), 1);
}

#[tokio::test]
async fn test_server_error_keeps_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/query"))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .mount(&server)
        .await;

    let err = index_for(&server)
        .query(QueryParams::by_id("id1").top_k(3), TransportOptions::default())
        .await
        .unwrap_err();

    match err {
        IndexError::Service { status, body } => {
            assert_eq!(status, 503);
            assert_eq!(body, "overloaded");
        }
        other => panic!("expected service error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_undecodable_body_is_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/vectors/upsert"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = index_for(&server)
        .upsert(
            UpsertParams::new(vec![("a", vec![1.0f32])]),
            TransportOptions::default(),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, IndexError::Parse(_)));
}

#[tokio::test]
async fn test_per_call_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/describe_index_stats"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"namespaces": {}, "dimension": 1}))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let err = index_for(&server)
        .describe_index_stats(
            DescribeIndexStatsParams::new(),
            TransportOptions::new().timeout(Duration::from_millis(100)),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, IndexError::Timeout(_)));
}

#[tokio::test]
async fn test_local_errors_send_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let index = index_for(&server);
    let err = index
        .delete(
            DeleteParams {
                filter: Some(object(json!({"genre": "drama"}))),
                ..DeleteParams::by_ids(["id1"])
            },
            TransportOptions::default(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, IndexError::AmbiguousRequest(_)));

    let err = index
        .upsert(UpsertParams::new(vec![json!(42)]), TransportOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, IndexError::InvalidArgument(ref msg) if msg.contains("number")));
}

#[tokio::test]
async fn test_connection_refused_is_protocol_error() {
    let index = Index::builder("movies")
        .openapi_config(OpenApiConfig::default().with_host("http://127.0.0.1:1"))
        .build()
        .unwrap();

    let err = index
        .fetch(FetchParams::new(["id1"]), TransportOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, IndexError::Protocol(_)));
}

mod common;

use common::{sample_response, searcher_with, Call, RecordingTransport};
use es_search::es_dsl::{Filter, Predicates, Query};
use es_search::{
    DocumentRequest, GaussFunction, Highlight, Locale, Messages, SearchError, SortOrder, PROXIMITY,
};
use serde_json::{json, Value};

#[test]
fn test_get_maps_hits() {
    let transport = RecordingTransport::responding(sample_response());
    let mut searcher = searcher_with(&transport);

    let mut query = Query::new();
    query.where_("login", "bob");
    searcher.set_query(&query).take(2);

    let results = searcher.get().unwrap();
    assert_eq!(results.total, json!({"value": 2, "relation": "eq"}));
    assert_eq!(results.max_score, json!(1.2));
    assert_eq!(results.documents.len(), 2);

    let first = serde_json::to_value(&results.documents[0]).unwrap();
    assert_eq!(first, json!({"id": "7", "score": 1.2, "login": "bob"}));

    let second = serde_json::to_value(&results.documents[1]).unwrap();
    assert_eq!(
        second,
        json!({
            "id": "8",
            "score": 0.4,
            "login": "alice",
            "tags": "admin",
            "sort": [0.4],
            "highlight": {"login": "<em>alice</em>"}
        })
    );

    assert_eq!(
        transport.calls(),
        vec![Call::Search(searcher.build_request(Highlight::Enabled))]
    );
}

#[test]
fn test_request_sent_for_get() {
    let transport = RecordingTransport::responding(sample_response());
    let mut searcher = searcher_with(&transport);

    let mut filter = Filter::new();
    filter.where_("active", true);
    searcher
        .set_filter(&filter)
        .order_by_value(PROXIMITY, Value::Null)
        .take(10)
        .page(1);
    searcher.get();

    let calls = transport.calls();
    let Call::Search(request) = &calls[0] else {
        panic!("expected a search call, got {:?}", calls[0]);
    };
    assert_eq!(request.index, "profiles");
    assert_eq!(
        request.body,
        json!({
            "size": 10,
            "from": 10,
            "query": {"bool": {"must": {"match_all": {}}, "filter": {"term": {"active": true}}}},
            "sort": []
        })
    );
}

#[test]
fn test_transport_failure_yields_none() {
    let transport = RecordingTransport::failing(SearchError::Transport("boom".to_string()));
    let mut searcher = searcher_with(&transport);
    searcher.set_logging(true);

    assert!(searcher.get().is_none());
    assert!(searcher.search_with_functions().is_none());
    assert!(searcher.delete().is_none());
    assert_eq!(transport.calls().len(), 3);
}

#[test]
fn test_unexpected_response_shape_yields_none() {
    let transport = RecordingTransport::responding(json!({"acknowledged": true}));
    let searcher = searcher_with(&transport);
    assert!(searcher.get().is_none());
}

#[test]
fn test_delete_by_query_never_highlights() {
    let transport = RecordingTransport::responding(json!({"deleted": 4}));
    let mut searcher = searcher_with(&transport);

    let mut query = Query::new();
    query.match_("bio", "spam");
    searcher.set_query(&query);

    assert_eq!(searcher.delete(), Some(json!({"deleted": 4})));

    let calls = transport.calls();
    let Call::DeleteByQuery(request) = &calls[0] else {
        panic!("expected delete by query, got {:?}", calls[0]);
    };
    assert_eq!(request.body, json!({"query": {"match": {"bio": "spam"}}}));
}

#[test]
fn test_get_by_id_returns_source() {
    let transport = RecordingTransport::responding(json!({
        "_index": "profiles",
        "_id": "42",
        "found": true,
        "_source": {"login": "bob"}
    }));
    let searcher = searcher_with(&transport);

    assert_eq!(searcher.get_by_id("42"), Some(json!({"login": "bob"})));
    assert_eq!(
        transport.calls(),
        vec![Call::Get(DocumentRequest {
            index: "profiles".to_string(),
            id: "42".to_string()
        })]
    );
}

#[test]
fn test_get_by_id_with_empty_source() {
    let transport = RecordingTransport::responding(json!({"_id": "42", "_source": {}}));
    assert_eq!(searcher_with(&transport).get_by_id("42"), None);

    let transport = RecordingTransport::responding(json!({"_id": "42", "found": false}));
    assert_eq!(searcher_with(&transport).get_by_id("42"), None);
}

#[test]
fn test_not_found_is_benign() {
    let transport = RecordingTransport::failing(SearchError::NotFound("GET /profiles/_doc/9".to_string()));
    let mut searcher = searcher_with(&transport);
    searcher.set_logging(true);

    assert_eq!(searcher.get_by_id("9"), None);
    assert_eq!(searcher.delete_by_id("9"), None);
    assert_eq!(transport.calls().len(), 2);
}

#[test]
fn test_empty_id_skips_transport() {
    let transport = RecordingTransport::responding(json!({"_source": {"login": "bob"}}));
    let searcher = searcher_with(&transport);

    assert_eq!(searcher.get_by_id(" "), None);
    assert_eq!(searcher.delete_by_id(""), None);
    assert!(transport.calls().is_empty());
}

#[test]
fn test_delete_by_id() {
    let transport = RecordingTransport::responding(json!({"result": "deleted"}));
    let mut searcher = searcher_with(&transport);
    searcher.change_index("archive").unwrap();

    assert_eq!(searcher.delete_by_id("3"), Some(json!({"result": "deleted"})));
    assert_eq!(
        transport.calls(),
        vec![Call::Delete(DocumentRequest {
            index: "archive".to_string(),
            id: "3".to_string()
        })]
    );
}

#[test]
fn test_search_with_functions() {
    let transport = RecordingTransport::responding(sample_response());
    let mut searcher = searcher_with(&transport);
    searcher
        .order_by("created_at", SortOrder::Desc)
        .add_gauss_function(GaussFunction::new("created_at", "now", "30d").with_weight(1.5));

    let results = searcher.search_with_functions().unwrap();
    assert_eq!(results.documents[0].id, "7");

    let calls = transport.calls();
    let Call::Search(request) = &calls[0] else {
        panic!("expected a search call, got {:?}", calls[0]);
    };
    assert_eq!(
        request.body,
        json!({
            "query": {"function_score": {
                "query": {"bool": {"must": {"match_all": {}}}},
                "functions": [{
                    "gauss": {"created_at": {"origin": "now", "scale": "30d", "decay": 0.5}},
                    "weight": 1.5
                }]
            }},
            "sort": {"created_at": "desc"}
        })
    );
}

#[test]
fn test_localized_messages_do_not_change_results() {
    let transport = RecordingTransport::failing(SearchError::Transport("down".to_string()));
    let mut searcher = searcher_with(&transport);
    searcher
        .set_messages(Messages::new(Locale::PtBr))
        .set_logging(true);

    assert_eq!(searcher.messages().locale(), Locale::PtBr);
    assert!(searcher.get().is_none());
}

#[test]
fn test_one_searcher_per_logical_query() {
    let transport = RecordingTransport::responding(sample_response());
    let mut first = searcher_with(&transport);

    let mut query = Query::new();
    query.where_("login", "bob");
    first.set_query(&query).order_by("login", SortOrder::Asc).take(5);

    let mut second = first.fresh();
    let mut other = Query::new();
    other.where_("login", "alice");
    second.set_query(&other);

    first.get();
    second.get();

    let calls = transport.calls();
    let bodies: Vec<&Value> = calls
        .iter()
        .map(|call| match call {
            Call::Search(request) => &request.body,
            other => panic!("unexpected call {:?}", other),
        })
        .collect();
    assert_eq!(bodies[0]["query"], json!({"term": {"login": "bob"}}));
    assert_eq!(bodies[0]["sort"], json!({"login": "asc"}));
    assert_eq!(bodies[1]["query"], json!({"term": {"login": "alice"}}));
    assert_eq!(bodies[1].get("sort"), None);
    assert_eq!(bodies[1]["size"], json!(5));
}

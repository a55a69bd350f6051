//! End-to-end dashboard load, refresh and publishing tests.

use crate::common::{
    FakeTransport, config, drain, kinds, pull_request_json, repos_json, route_enrichment,
    status_json,
};
use prdash::{Dashboard, DashboardConfig, DashboardError, DashboardEvent};
use serde_json::json;

/// octocat owns `a` (one open pull request) and `b` (listing fails).
fn octocat_fixture() -> std::sync::Arc<FakeTransport> {
    let transport = FakeTransport::new();
    transport.ok("/users/octocat/repos", repos_json("octocat", &["a", "b"]));
    transport.ok(
        "/repos/octocat/a/pulls",
        json!([pull_request_json("octocat", "a", 1, "2024-01-01T00:00:00Z")]),
    );
    transport.fail("/repos/octocat/b/pulls", 500);
    route_enrichment(&transport, "octocat", "a", 1, "2024-01-01T00:00:00Z");
    transport
}

#[tokio::test]
async fn test_load_publishes_aggregate_then_enrichment() {
    let transport = octocat_fixture();
    let (dashboard, mut events) =
        Dashboard::with_transport(&config(&["octocat"]), transport.clone()).unwrap();

    let summary = dashboard.load().await.unwrap();
    assert_eq!(summary.repositories, 2);
    assert_eq!(summary.pull_requests, 1);
    assert_eq!(summary.failed_repos, vec!["octocat/b".to_string()]);
    assert_eq!(summary.enrichment.len(), 1);

    let report = summary.enrichment.wait().await;
    assert_eq!(report.applied, 1);
    assert_eq!(report.dropped, 0);

    let published = drain(&mut events);
    assert_eq!(
        kinds(&published),
        vec![
            "START_LOADING",
            "ADD_PULL_REQUESTS",
            "SET_FAILED_REPOS",
            "UPDATE_PULL_REQUEST"
        ]
    );

    match &published[1] {
        DashboardEvent::AddPullRequests { pull_requests } => {
            assert_eq!(pull_requests.len(), 1);
            assert!(!pull_requests[0].is_enriched());
        }
        other => panic!("unexpected {other:?}"),
    }
    match &published[2] {
        DashboardEvent::SetFailedRepos { failed_repos } => {
            assert_eq!(failed_repos, &vec!["octocat/b".to_string()]);
        }
        other => panic!("unexpected {other:?}"),
    }
    match &published[3] {
        DashboardEvent::UpdatePullRequest { pull_request } => {
            assert_eq!(pull_request.id().to_string(), "octocat/a#1");
            assert!(pull_request.is_enriched());
        }
        other => panic!("unexpected {other:?}"),
    }

    let (pull_requests, failed) = dashboard.snapshot().await;
    assert!(pull_requests[0].is_enriched());
    assert_eq!(failed, vec!["octocat/b".to_string()]);
}

#[tokio::test]
async fn test_discovery_failure_publishes_error() {
    let transport = FakeTransport::new();
    transport.fail("/users/octocat/repos", 401);
    let (dashboard, mut events) =
        Dashboard::with_transport(&config(&["octocat"]), transport.clone()).unwrap();

    let error = dashboard.load().await.err().unwrap();
    assert!(matches!(error, DashboardError::Discovery { .. }));

    let published = drain(&mut events);
    assert_eq!(kinds(&published), vec!["START_LOADING", "SET_ERROR"]);
    assert_eq!(transport.count_ending("/pulls"), 0);
}

#[tokio::test]
async fn test_one_pull_request_failing_enrichment_does_not_affect_others() {
    let transport = FakeTransport::new();
    transport.ok("/users/octocat/repos", repos_json("octocat", &["a"]));
    transport.ok(
        "/repos/octocat/a/pulls",
        json!([
            pull_request_json("octocat", "a", 1, "2024-01-02T00:00:00Z"),
            pull_request_json("octocat", "a", 2, "2024-01-01T00:00:00Z"),
        ]),
    );
    route_enrichment(&transport, "octocat", "a", 1, "2024-01-02T00:00:00Z");
    route_enrichment(&transport, "octocat", "a", 2, "2024-01-01T00:00:00Z");
    transport.fail("/repos/octocat/a/commits/a-2-sha/status", 503);

    let (dashboard, mut events) =
        Dashboard::with_transport(&config(&["octocat"]), transport.clone()).unwrap();
    let report = dashboard.load().await.unwrap().enrichment.wait().await;
    assert_eq!(report.applied, 2);

    let updates: Vec<_> = drain(&mut events)
        .into_iter()
        .filter_map(|event| match event {
            DashboardEvent::UpdatePullRequest { pull_request } => Some(*pull_request),
            _ => None,
        })
        .collect();
    assert_eq!(updates.len(), 2);
    for pr in &updates {
        assert!(pr.is_enriched());
        assert_eq!(pr.enrichment_error.is_some(), pr.number == 2);
    }
}

#[tokio::test]
async fn test_refresh_resets_and_reloads() {
    let transport = octocat_fixture();
    let (dashboard, mut events) =
        Dashboard::with_transport(&config(&["octocat"]), transport.clone()).unwrap();

    dashboard.load().await.unwrap().enrichment.wait().await;
    // b recovers before the refresh.
    transport.ok(
        "/repos/octocat/b/pulls",
        json!([pull_request_json("octocat", "b", 9, "2024-02-01T00:00:00Z")]),
    );
    route_enrichment(&transport, "octocat", "b", 9, "2024-02-01T00:00:00Z");
    drain(&mut events);

    let summary = dashboard.refresh().await.unwrap();
    assert!(summary.failed_repos.is_empty());
    assert_eq!(summary.enrichment.wait().await.applied, 2);

    let published = drain(&mut events);
    assert_eq!(
        &kinds(&published)[..4],
        &["REFRESH", "START_LOADING", "ADD_PULL_REQUESTS", "SET_FAILED_REPOS"]
    );
    match &published[3] {
        DashboardEvent::SetFailedRepos { failed_repos } => assert!(failed_repos.is_empty()),
        other => panic!("unexpected {other:?}"),
    }

    let (pull_requests, failed) = dashboard.snapshot().await;
    let numbers: Vec<u64> = pull_requests.iter().map(|p| p.number).collect();
    assert_eq!(numbers, vec![9, 1]);
    assert!(failed.is_empty());
    assert_eq!(transport.count("/users/octocat/repos"), 2);
}

#[tokio::test]
async fn test_enrichment_from_superseded_load_is_dropped() {
    let transport = octocat_fixture();
    let gate = transport.gate("/repos/octocat/a/pulls/1");
    let (dashboard, mut events) =
        Dashboard::with_transport(&config(&["octocat"]), transport.clone()).unwrap();

    let first = dashboard.load().await.unwrap();
    // Let the first enrichment reach the gate before superseding it.
    while transport.count("/repos/octocat/a/pulls/1") == 0 {
        tokio::task::yield_now().await;
    }
    let second = dashboard.refresh().await.unwrap();
    assert!(second.generation > first.generation);
    assert_eq!(second.enrichment.wait().await.applied, 1);

    gate.notify_one();
    let stale = first.enrichment.wait().await;
    assert_eq!(stale.applied, 0);
    assert_eq!(stale.dropped, 1);

    let updates = drain(&mut events)
        .iter()
        .filter(|event| matches!(event, DashboardEvent::UpdatePullRequest { .. }))
        .count();
    assert_eq!(updates, 1);
}

#[tokio::test]
async fn test_group_by_repo_orders_published_collection() {
    let transport = FakeTransport::new();
    transport.ok("/users/octocat/repos", repos_json("octocat", &["zeta", "alpha"]));
    transport.ok(
        "/repos/octocat/zeta/pulls",
        json!([pull_request_json("octocat", "zeta", 1, "2024-03-01T00:00:00Z")]),
    );
    transport.ok(
        "/repos/octocat/alpha/pulls",
        json!([pull_request_json("octocat", "alpha", 2, "2024-01-01T00:00:00Z")]),
    );

    let config = DashboardConfig {
        group_by_repo: true,
        ..config(&["octocat"])
    };
    let (dashboard, _events) = Dashboard::with_transport(&config, transport.clone()).unwrap();
    dashboard.load().await.unwrap().enrichment.wait().await;

    let (pull_requests, _) = dashboard.snapshot().await;
    let names: Vec<&str> = pull_requests.iter().map(|p| p.repo_name()).collect();
    assert_eq!(names, vec!["alpha", "zeta"]);
}

#[tokio::test]
async fn test_configured_repos_join_discovered_ones() {
    let transport = octocat_fixture();
    transport.ok(
        "/repos/rust-lang/rust/pulls",
        json!([pull_request_json("rust-lang", "rust", 5, "2024-05-01T00:00:00Z")]),
    );
    transport.ok("/repos/rust-lang/rust/commits/rust-5-sha/status", status_json("success"));

    let config = DashboardConfig {
        repos: vec!["rust-lang/rust".to_string(), "octocat/a".to_string()],
        ..config(&["octocat"])
    };
    let (dashboard, _events) = Dashboard::with_transport(&config, transport.clone()).unwrap();
    let summary = dashboard.load().await.unwrap();

    assert_eq!(summary.repositories, 3);
    assert_eq!(summary.pull_requests, 2);
    assert_eq!(transport.count("/repos/octocat/a/pulls"), 1);
}

#[tokio::test]
async fn test_explicit_accounts_override_configured_users() {
    let transport = FakeTransport::new();
    transport.ok("/users/hubot/repos", repos_json("hubot", &[]));
    let (dashboard, _events) =
        Dashboard::with_transport(&config(&["octocat"]), transport.clone()).unwrap();

    let accounts = vec!["hubot".to_string()];
    let summary = dashboard
        .load_accounts(Some(accounts.as_slice()))
        .await
        .unwrap();

    assert_eq!(summary.pull_requests, 0);
    assert!(summary.enrichment.is_empty());
    assert_eq!(transport.count("/users/hubot/repos"), 1);
    assert_eq!(transport.count("/users/octocat/repos"), 0);
}

#[test]
fn test_invalid_configuration_is_rejected_up_front() {
    let transport = FakeTransport::new();
    let config = DashboardConfig {
        api_base_url: String::new(),
        ..config(&["octocat"])
    };
    let result = Dashboard::with_transport(&config, transport);
    assert!(matches!(result, Err(DashboardError::Config(_))));
}

#[tokio::test]
async fn test_enrichment_keeps_listed_fields_and_order() {
    let transport = FakeTransport::new();
    transport.ok("/users/octocat/repos", repos_json("octocat", &["a"]));
    transport.ok(
        "/repos/octocat/a/pulls",
        json!([
            pull_request_json("octocat", "a", 1, "2024-01-02T00:00:00Z"),
            pull_request_json("octocat", "a", 2, "2024-01-01T00:00:00Z"),
        ]),
    );
    route_enrichment(&transport, "octocat", "a", 1, "2024-01-02T00:00:00Z");
    // The detail of #2 has moved on since it was listed.
    route_enrichment(&transport, "octocat", "a", 2, "2024-01-09T00:00:00Z");

    let (dashboard, _events) =
        Dashboard::with_transport(&config(&["octocat"]), transport.clone()).unwrap();
    let report = dashboard.load().await.unwrap().enrichment.wait().await;
    assert_eq!(report.applied, 2);

    let (pull_requests, _) = dashboard.snapshot().await;
    let listed: Vec<(u64, String)> = pull_requests
        .iter()
        .map(|p| (p.number, p.updated_at.to_rfc3339()))
        .collect();
    assert_eq!(
        listed,
        vec![
            (1, "2024-01-02T00:00:00+00:00".to_string()),
            (2, "2024-01-01T00:00:00+00:00".to_string())
        ]
    );
    assert!(pull_requests.iter().all(|p| p.is_enriched()));
    for pair in pull_requests.windows(2) {
        assert!(pair[0].updated_at >= pair[1].updated_at);
    }
}

#[test]
fn test_http_dashboard_rejects_invalid_configuration() {
    let config = DashboardConfig {
        enrichment_concurrency: 0,
        ..config(&["octocat"])
    };
    let result = Dashboard::new(&config);
    assert!(matches!(result, Err(DashboardError::Config(_))));
}

mod common;

use common::load_fixture;
use kspwlo_lib::{k_shortest_paths, Algorithm, KspQuery, RenderMode, RouteSetSummary};
use serde_json::Value;

#[test]
fn summary_serialises_to_stable_json() {
    let graph = load_fixture("sample.gr");
    let routes = k_shortest_paths(&graph, Algorithm::OnePassPlus, &KspQuery::new(0, 3, 2, 0.5))
        .expect("query succeeds");
    let summary = RouteSetSummary::from_routes(&graph, &routes);

    let value: Value = serde_json::to_value(&summary).expect("serialise summary");
    assert_eq!(value["algorithm"], "opplus");
    assert_eq!(value["termination"], "completed");
    assert_eq!(value["k"], 2);

    let routes = value["routes"].as_array().expect("routes array");
    assert_eq!(routes.len(), 2);
    assert!(routes[0].get("max_overlap").is_none());
    assert_eq!(routes[1]["max_overlap"], 0.0);
    assert_eq!(routes[1]["nodes"], serde_json::json!([0, 2, 3]));
}

#[test]
fn grid_summary_reports_overlap_within_threshold() {
    let graph = load_fixture("grid.gr");
    let routes = k_shortest_paths(&graph, Algorithm::Esx, &KspQuery::new(0, 35, 4, 0.4))
        .expect("query succeeds");
    let summary = RouteSetSummary::from_routes(&graph, &routes);

    for route in &summary.routes {
        if let Some(ratio) = route.max_overlap {
            assert!(ratio <= 0.4 + 1e-9, "route {} overlaps {ratio}", route.index);
        }
    }

    let plain = summary.render(RenderMode::PlainText);
    assert!(plain.starts_with(&format!("{} of 4 paths from 0 to 35", summary.routes.len())));
    assert_eq!(
        summary.render(RenderMode::Legacy).lines().count(),
        summary.routes.len()
    );
}

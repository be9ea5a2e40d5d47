mod api;
mod config;
#[cfg(test)]
mod test_utils;
mod workers;

use anyhow::Context;
use api::{CoordinatesRequest, ShortestPathResponse, VertexPairRequest};
use clap::Parser;
use config::Config;
use poolpath::export::GraphJson;
use poolpath::route::Router;
use poolpath_osm::{build_graph, logging, read_input};
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info};
use warp::http::StatusCode;
use warp::Filter;
use workers::{RouteQuery, WorkerPool};

#[derive(Clone)]
struct AppState {
    router: Router,
    pool: WorkerPool,
    graph_json: Arc<GraphJson>,
}

impl AppState {
    fn new(router: Router, pool: WorkerPool) -> Self {
        let graph_json = Arc::new(GraphJson::from_graph(router.graph()));
        AppState {
            router,
            pool,
            graph_json,
        }
    }
}

async fn answer_route_query(
    state: &AppState,
    query: RouteQuery,
) -> warp::reply::WithStatus<warp::reply::Json> {
    let (status, response) = match state.pool.route(query).await {
        Ok(Ok(Some(route))) => (
            StatusCode::OK,
            ShortestPathResponse::from_route(&state.router, &route),
        ),
        Ok(Ok(None)) => (
            StatusCode::NOT_FOUND,
            ShortestPathResponse::failed("no route found"),
        ),
        // Engine failures were logged by the worker and count as no route
        Ok(Err(err)) => (
            StatusCode::NOT_FOUND,
            ShortestPathResponse::failed(err.to_string()),
        ),
        Err(err) => {
            error!(?query, %err, "route request was not answered");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                ShortestPathResponse::failed(err.to_string()),
            )
        }
    };
    warp::reply::with_status(warp::reply::json(&response), status)
}

async fn shortest_path_handler(
    request: VertexPairRequest,
    state: AppState,
) -> Result<impl warp::Reply, warp::Rejection> {
    info!(source = request.source_id, target = request.target_id, "shortest path request");
    let query = RouteQuery::Vertices {
        source: request.source_id,
        target: request.target_id,
    };
    Ok(answer_route_query(&state, query).await)
}

async fn shortest_path_coordinates_handler(
    request: CoordinatesRequest,
    state: AppState,
) -> Result<impl warp::Reply, warp::Rejection> {
    info!(source = ?request.source, target = ?request.target, "shortest path by coordinates request");
    let query = RouteQuery::Coordinates {
        from: request.source,
        to: request.target,
    };
    Ok(answer_route_query(&state, query).await)
}

fn routes(
    state: AppState,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    let state = warp::any().map(move || state.clone());

    let cors = warp::cors()
        .allow_any_origin()
        .allow_methods(vec!["GET", "POST"])
        .allow_header("content-type");

    let graph_api = warp::path("graph")
        .and(warp::path::end())
        .and(warp::get())
        .and(state.clone())
        .map(|state: AppState| warp::reply::json(state.graph_json.as_ref()));

    let shortest_path_api = warp::path("shortest_path")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::json())
        .and(state.clone())
        .and_then(shortest_path_handler);

    let coordinates_api = warp::path("shortest_path_coordinates")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::json())
        .and(state)
        .and_then(shortest_path_coordinates_handler);

    graph_api
        .or(shortest_path_api)
        .or(coordinates_api)
        .with(cors)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    logging::setup(&config.verbosity);

    let startup_timer = Instant::now();
    let data = read_input(&config.input, config.format)
        .with_context(|| format!("failed to read {}", config.input.display()))?;
    let (graph, summary) = build_graph(&data.ways, &data.way_nodes);
    info!(
        vertices = graph.number_of_vertices(),
        edges = graph.number_of_edges(),
        missing_nodes = summary.missing_nodes,
        elapsed = ?startup_timer.elapsed(),
        "loaded graph"
    );

    let router = Router::new(Arc::new(graph));
    let workers = config.worker_threads();
    let (pool, _handles) = WorkerPool::start(router.clone(), workers, config.queue_capacity());
    let state = AppState::new(router, pool);

    info!(bind = %config.bind, workers, "started service");
    warp::serve(routes(state)).run(config.bind).await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::street_router;
    use serde_json::{json, Value};

    fn test_state() -> AppState {
        let router = street_router();
        let (pool, _) = WorkerPool::start(router.clone(), 2, 4);
        AppState::new(router, pool)
    }

    fn body(response: &warp::http::Response<warp::hyper::body::Bytes>) -> Value {
        serde_json::from_slice(response.body()).unwrap()
    }

    #[tokio::test]
    async fn test_graph() {
        let api = routes(test_state());

        let response = warp::test::request().method("GET").path("/graph").reply(&api).await;
        assert_eq!(response.status(), StatusCode::OK);

        let graph = body(&response);
        let ids: Vec<_> = graph["vertices"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v["id"].as_i64().unwrap())
            .collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(graph["edges"][0]["id"], json!("1:2"));
        assert_eq!(graph["edges"].as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_shortest_path() {
        let api = routes(test_state());

        let response = warp::test::request()
            .method("POST")
            .path("/shortest_path")
            .json(&json!({"sourceId": 4, "targetId": 3}))
            .reply(&api)
            .await;
        assert_eq!(response.status(), StatusCode::OK);

        let answer = body(&response);
        assert_eq!(answer["error"], Value::Null);
        assert_eq!(answer["route"]["source"]["id"], json!(4));
        assert_eq!(answer["route"]["target"]["id"], json!(3));
        assert_eq!(answer["route"]["path"].as_array().unwrap().len(), 3);
        assert!(answer["cost"].as_f64().unwrap() > 0.0);
        assert!(answer["polyline"].is_string());
    }

    #[tokio::test]
    async fn test_shortest_path_coordinates() {
        let api = routes(test_state());

        let response = warp::test::request()
            .method("POST")
            .path("/shortest_path_coordinates")
            .json(&json!({
                "source": {"lat": 48.7721, "long": 9.1699},
                "target": {"lat": 48.7699, "long": 9.1701}
            }))
            .reply(&api)
            .await;
        assert_eq!(response.status(), StatusCode::OK);

        let answer = body(&response);
        assert_eq!(answer["route"]["source"]["id"], json!(3));
        assert_eq!(answer["route"]["target"]["id"], json!(1));
        assert_eq!(
            answer["route"]["path"][0],
            json!({"lat": 48.7720, "long": 9.1700})
        );
    }

    #[tokio::test]
    async fn test_no_route() {
        let api = routes(test_state());

        let unreachable = warp::test::request()
            .method("POST")
            .path("/shortest_path")
            .json(&json!({"sourceId": 1, "targetId": 6}))
            .reply(&api)
            .await;
        assert_eq!(unreachable.status(), StatusCode::NOT_FOUND);
        assert_eq!(body(&unreachable)["error"], json!("no route found"));
        assert_eq!(body(&unreachable)["route"], Value::Null);

        let unknown = warp::test::request()
            .method("POST")
            .path("/shortest_path")
            .json(&json!({"sourceId": 1, "targetId": 77}))
            .reply(&api)
            .await;
        assert_eq!(unknown.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            body(&unknown)["error"],
            json!("vertex 77 (target) was not found in graph")
        );
    }

    #[tokio::test]
    async fn test_rejected_requests() {
        let api = routes(test_state());

        let malformed = warp::test::request()
            .method("POST")
            .path("/shortest_path")
            .json(&json!({"source": 1}))
            .reply(&api)
            .await;
        assert_eq!(malformed.status(), StatusCode::BAD_REQUEST);

        let wrong_method = warp::test::request()
            .method("GET")
            .path("/shortest_path")
            .reply(&api)
            .await;
        assert_eq!(wrong_method.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}

use std::path::Path;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{HeaderValue, Method, StatusCode};
use axum::response::Html;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;

use twophase::constants::TABLES_DIR;
use twophase::error::Error;
use twophase::scramble;
use twophase::solver::{self, SolutionResult, SolverTables};

#[derive(Deserialize)]
struct SolveParams {
    scramble: String,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    scramble: String,
}

#[tokio::main]
async fn main() {
    // tables must exist before the server comes up
    let tables = match SolverTables::load(Path::new(TABLES_DIR)) {
        Ok(tables) => Arc::new(tables),
        Err(e) => {
            eprintln!("failed to load solver tables: {e}");
            eprintln!("run the table generator first: cargo run --release");
            std::process::exit(1);
        }
    };

    let cors = CorsLayer::new()
        .allow_origin("http://127.0.0.1:8080".parse::<HeaderValue>().unwrap())
        .allow_methods([Method::GET]);
    let app = Router::new()
        .route("/", get(index))
        .route("/solve", get(solve))
        .route("/scramble", get(random_scramble))
        .with_state(tables)
        .layer(cors);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:32125")
        .await
        .unwrap();
    println!("listening on http://{}", listener.local_addr().unwrap());
    axum::serve(listener, app).await.unwrap();
}

async fn index() -> Html<&'static str> {
    Html(
        "<p>Solve a scramble: http://localhost:32125/solve?scramble=<moves></p>
    Example: <a href=\"http://localhost:32125/solve?scramble=R U R' U'\">http://localhost:32125/solve?scramble=R U R' U'</a>
    <p>Get a scramble: <a href=\"http://localhost:32125/scramble\">http://localhost:32125/scramble</a></p>",
    )
}

async fn random_scramble() -> String {
    let scramble = scramble::gen_scramble(25);
    scramble::scramble_to_str(&scramble)
}

async fn solve(
    State(tables): State<Arc<SolverTables>>,
    Query(params): Query<SolveParams>,
) -> Result<Json<SolutionResult>, (StatusCode, Json<ErrorBody>)> {
    match solver::solve_with_tables(&params.scramble, &tables) {
        Ok(result) => Ok(Json(result)),
        Err(e) => {
            let status = match e {
                Error::InvalidMove => StatusCode::BAD_REQUEST,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
            Err((
                status,
                Json(ErrorBody {
                    error: format!("ERROR: {e}"),
                    scramble: params.scramble,
                }),
            ))
        }
    }
}

use axum::{
    Json, Router,
    http::StatusCode,
    routing::{get, post},
};
use box_packer::{PackError, PackRequest, PackedBox, Solver, SolverConfig};
use serde::Serialize;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

#[derive(Serialize)]
struct PackResponse {
    boxes: Vec<PackedBox>,
    box_count: usize,
    item_count: u64,
    most_items_per_box: u64,
    space_used_percent: f64,
}

fn error_status(err: &PackError) -> StatusCode {
    match err {
        PackError::ItemExceedsAllContainers { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        _ => StatusCode::BAD_REQUEST,
    }
}

async fn pack(Json(req): Json<PackRequest>) -> Result<Json<PackResponse>, (StatusCode, String)> {
    tracing::info!(
        body = serde_json::to_string(&req).unwrap_or_default(),
        "POST /pack"
    );

    let solver = Solver::new(SolverConfig::from_env());
    let solution = solver.solve(&req).map_err(|e| {
        tracing::warn!(error = %e, "packing rejected");
        (error_status(&e), e.to_string())
    })?;

    Ok(Json(PackResponse {
        box_count: solution.box_count(),
        item_count: solution.item_count(),
        most_items_per_box: solution.most_items_per_box(),
        space_used_percent: solution.space_used_percent(),
        boxes: solution.boxes,
    }))
}

#[tokio::main]
async fn main() {
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open("development.log")
        .expect("failed to open development.log");

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_target(false)
        .with_ansi(false)
        .with_max_level(Level::INFO)
        .init();

    let _sentry = std::env::var("SENTRY_DSN").ok().map(|dsn| {
        sentry::init((
            dsn,
            sentry::ClientOptions {
                release: sentry::release_name!(),
                ..Default::default()
            },
        ))
    });

    let port = std::env::var("PORT").unwrap_or_else(|_| "3001".to_string());
    let addr = format!("0.0.0.0:{port}");

    let app = Router::new()
        .route("/up", get(|| async { "ok" }))
        .route("/pack", post(pack))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        );

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    eprintln!("Listening on {addr}");
    axum::serve(listener, app).await.unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;
    use box_packer::Dimensions;

    #[test]
    fn test_error_status() {
        let exceeds = PackError::ItemExceedsAllContainers {
            name: "piano".to_string(),
            dimensions: Dimensions::new(1.0, 1.0, 1.0),
        };
        assert_eq!(error_status(&exceeds), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(error_status(&PackError::EmptyDemand), StatusCode::BAD_REQUEST);
        assert_eq!(error_status(&PackError::EmptyCatalog), StatusCode::BAD_REQUEST);
    }
}

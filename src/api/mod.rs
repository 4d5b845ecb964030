use axum::{
    Router,
    body::Bytes,
    extract::{Json, Query, rejection::QueryRejection},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use clap::Args;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use thiserror::Error;
use tokio::net::TcpListener;

use crate::core::{
    Comparison, FORMULA_LINES, Parameters, Summary, YearRecord, base_price_line, compare,
    summary_lines,
};

const INDEX_HTML: &str = include_str!("../../web/index.html");
const STYLES_CSS: &str = include_str!("../../web/styles.css");
const APP_JS: &str = include_str!("../../web/app.js");

/// Bounds of one input control, as offered by the sliders.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct InputRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub default: f64,
}

// Slack for slider values such as 0.30000000000000004.
const STEP_TOLERANCE: f64 = 1e-6;

impl InputRange {
    fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }

    fn on_step(&self, value: f64) -> bool {
        let steps = (value - self.min) / self.step;
        (steps - steps.round()).abs() <= STEP_TOLERANCE
    }
}

pub const PRICE_MULTIPLIER_RANGE: InputRange = InputRange {
    min: 0.5,
    max: 50.0,
    step: 0.1,
    default: 3.0,
};
pub const INDEXATION_RATE_RANGE: InputRange = InputRange {
    min: 0.0,
    max: 20.0,
    step: 0.1,
    default: 5.0,
};
pub const HOLDING_YEARS_RANGE: InputRange = InputRange {
    min: 1.0,
    max: 100.0,
    step: 1.0,
    default: 70.0,
};

#[derive(Debug, Error, PartialEq)]
pub enum InputError {
    #[error("{flag} must be a finite number")]
    NotFinite { flag: &'static str },

    #[error("{flag} must be between {min} and {max}")]
    OutOfRange {
        flag: &'static str,
        min: f64,
        max: f64,
    },

    #[error("{flag} must move in steps of {step} from {min}")]
    OffStep {
        flag: &'static str,
        step: f64,
        min: f64,
    },

    #[error("Invalid request payload: {0}")]
    Payload(String),
}

#[derive(Args, Debug, Clone)]
pub struct CompareArgs {
    #[arg(
        long,
        default_value_t = 3.0,
        help = "Final sell price as a multiple of the 1 crore purchase price"
    )]
    pub price_multiplier: f64,
    #[arg(
        long,
        default_value_t = 5.0,
        allow_negative_numbers = true,
        help = "Annual cost inflation index growth in percent"
    )]
    pub indexation_rate: f64,
    #[arg(long, default_value_t = 70, help = "Years between purchase and sale")]
    pub holding_years: u32,
}

impl Default for CompareArgs {
    fn default() -> Self {
        Self {
            price_multiplier: PRICE_MULTIPLIER_RANGE.default,
            indexation_rate: INDEXATION_RATE_RANGE.default,
            holding_years: HOLDING_YEARS_RANGE.default as u32,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ComparePayload {
    price_multiplier: Option<f64>,
    indexation_rate: Option<f64>,
    holding_years: Option<u32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareResponse {
    parameters: Parameters,
    base_price: f64,
    sell_price: f64,
    series: Vec<YearRecord>,
    crossover: Option<YearRecord>,
    summary: Summary,
    narrative: Vec<String>,
    formulas: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputsResponse {
    price_multiplier: InputRange,
    indexation_rate: InputRange,
    holding_years: InputRange,
    base_price_label: String,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

pub fn build_parameters(args: &CompareArgs) -> Result<Parameters, InputError> {
    check_range(
        "--price-multiplier",
        args.price_multiplier,
        PRICE_MULTIPLIER_RANGE,
    )?;
    check_range(
        "--indexation-rate",
        args.indexation_rate,
        INDEXATION_RATE_RANGE,
    )?;
    check_range(
        "--holding-years",
        f64::from(args.holding_years),
        HOLDING_YEARS_RANGE,
    )?;

    Ok(Parameters {
        price_multiplier: args.price_multiplier,
        indexation_rate: args.indexation_rate,
        holding_years: args.holding_years,
    })
}

fn check_range(flag: &'static str, value: f64, range: InputRange) -> Result<(), InputError> {
    if !value.is_finite() {
        return Err(InputError::NotFinite { flag });
    }
    if !range.contains(value) {
        return Err(InputError::OutOfRange {
            flag,
            min: range.min,
            max: range.max,
        });
    }
    if !range.on_step(value) {
        return Err(InputError::OffStep {
            flag,
            step: range.step,
            min: range.min,
        });
    }
    Ok(())
}

pub fn parameters_from_payload(payload: ComparePayload) -> Result<Parameters, InputError> {
    let mut args = CompareArgs::default();

    if let Some(v) = payload.price_multiplier {
        args.price_multiplier = v;
    }
    if let Some(v) = payload.indexation_rate {
        args.indexation_rate = v;
    }
    if let Some(v) = payload.holding_years {
        args.holding_years = v;
    }

    build_parameters(&args)
}

/// Parses a JSON request body; an empty body means "all defaults".
pub fn parameters_from_json(body: impl AsRef<[u8]>) -> Result<Parameters, InputError> {
    let body = body.as_ref();
    if body.iter().all(u8::is_ascii_whitespace) {
        return parameters_from_payload(ComparePayload::default());
    }
    let payload = serde_json::from_slice::<ComparePayload>(body)
        .map_err(|e| InputError::Payload(e.to_string()))?;
    parameters_from_payload(payload)
}

pub fn build_compare_response(comparison: &Comparison) -> CompareResponse {
    CompareResponse {
        parameters: comparison.parameters,
        base_price: comparison.base_price,
        sell_price: comparison.sell_price,
        series: comparison.series.clone(),
        crossover: comparison.crossover,
        summary: comparison.summary,
        narrative: summary_lines(&comparison.summary),
        formulas: FORMULA_LINES.to_vec(),
    }
}

pub fn build_inputs_response() -> InputsResponse {
    InputsResponse {
        price_multiplier: PRICE_MULTIPLIER_RANGE,
        indexation_rate: INDEXATION_RATE_RANGE,
        holding_years: HOLDING_YEARS_RANGE,
        base_price_label: base_price_line(),
    }
}

pub fn router() -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/index.html", get(index_handler))
        .route("/styles.css", get(styles_handler))
        .route("/app.js", get(app_js_handler))
        .route("/api/inputs", get(inputs_handler))
        .route(
            "/api/compare",
            get(compare_get_handler).post(compare_post_handler),
        )
        .fallback(not_found_handler)
}

pub async fn run_http_server(addr: SocketAddr) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    log::info!("LTCG comparison server listening on http://{addr}");
    log::info!("Local access: http://127.0.0.1:{}/", addr.port());

    axum::serve(listener, router()).await
}

async fn index_handler() -> impl IntoResponse {
    with_cache_control(Html(INDEX_HTML))
}

async fn styles_handler() -> impl IntoResponse {
    with_cache_control((
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        STYLES_CSS,
    ))
}

async fn app_js_handler() -> impl IntoResponse {
    with_cache_control((
        [(
            header::CONTENT_TYPE,
            "application/javascript; charset=utf-8",
        )],
        APP_JS,
    ))
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn inputs_handler() -> Response {
    json_response(StatusCode::OK, build_inputs_response())
}

async fn compare_get_handler(query: Result<Query<ComparePayload>, QueryRejection>) -> Response {
    let parameters = match query {
        Ok(Query(payload)) => parameters_from_payload(payload),
        Err(rejection) => Err(InputError::Payload(rejection.body_text())),
    };
    compare_handler_impl(parameters)
}

async fn compare_post_handler(body: Bytes) -> Response {
    compare_handler_impl(parameters_from_json(&body))
}

fn compare_handler_impl(parameters: Result<Parameters, InputError>) -> Response {
    let parameters = match parameters {
        Ok(parameters) => parameters,
        Err(err) => {
            log::warn!("Rejected compare request: {err}");
            return error_response(StatusCode::BAD_REQUEST, &err.to_string());
        }
    };
    log::debug!("Compare request {parameters:?}");

    let comparison = compare(&parameters);
    json_response(StatusCode::OK, build_compare_response(&comparison))
}

fn with_cache_control<R: IntoResponse>(response: R) -> Response {
    let mut response = response.into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-store"),
    );
    response
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    with_cache_control((status, Json(body)))
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

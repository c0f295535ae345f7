use axum::{
    Router,
    extract::{Json, Query},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use clap::Parser;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::net::SocketAddr;
use thiserror::Error;
use tokio::net::TcpListener;

use crate::core::{
    AffordabilityError, AffordabilityInputs, BorrowingResult, CarryingCosts, ComparisonRow,
    DEFAULT_CREDIT_SCORE, DEFAULT_DOWN_PAYMENT_PERCENT, DebtPayments, EstimateBreakdown,
    EstimateTier, IncomeSources, LoanEstimate, RateSource, RateTier, compare_across_tiers,
    pmi_rate_for, rate_tiers, solve_affordability, try_compare_across_tiers,
};

pub const DEFAULT_LOAN_TERM_YEARS: u32 = 30;
pub const LOAN_TERM_OPTIONS: [u32; 2] = [15, 30];

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct BorrowPayload {
    wages_income: Option<f64>,
    investment_income: Option<f64>,
    rental_income: Option<f64>,
    other_income: Option<f64>,

    auto_loans: Option<f64>,
    student_loans: Option<f64>,
    credit_card_payments: Option<f64>,
    alimony_payments: Option<f64>,
    rental_loans: Option<f64>,
    other_payments: Option<f64>,

    credit_score: Option<f64>,
    interest_rate: Option<f64>,
    loan_term_years: Option<u32>,
    down_payment_percent: Option<f64>,
    property_tax_yearly: Option<f64>,
    insurance_yearly: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ComparePayload {
    loan_amount: Option<f64>,
    loan_term_years: Option<u32>,
}

#[derive(Parser, Debug, Clone)]
#[command(
    name = "afford",
    about = "Conservative and aggressive mortgage affordability estimates"
)]
struct Cli {
    #[arg(long, help = "Monthly wages before tax")]
    wages_income: f64,
    #[arg(long, default_value_t = 0.0)]
    investment_income: f64,
    #[arg(long, default_value_t = 0.0)]
    rental_income: f64,
    #[arg(long, default_value_t = 0.0)]
    other_income: f64,
    #[arg(long, default_value_t = 0.0)]
    auto_loans: f64,
    #[arg(long, default_value_t = 0.0)]
    student_loans: f64,
    #[arg(long, default_value_t = 0.0)]
    credit_card_payments: f64,
    #[arg(long, default_value_t = 0.0)]
    alimony_payments: f64,
    #[arg(long, default_value_t = 0.0)]
    rental_loans: f64,
    #[arg(long, default_value_t = 0.0)]
    other_payments: f64,
    #[arg(
        long,
        default_value_t = DEFAULT_CREDIT_SCORE,
        help = "Credit score used to look up the APR when no --interest-rate is given"
    )]
    credit_score: f64,
    #[arg(long, help = "APR in percent, e.g. 6.5; overrides the credit score lookup")]
    interest_rate: Option<f64>,
    #[arg(long, default_value_t = DEFAULT_LOAN_TERM_YEARS)]
    loan_term_years: u32,
    #[arg(
        long,
        default_value_t = DEFAULT_DOWN_PAYMENT_PERCENT,
        help = "Down payment as a percent of the home price, in [0, 100)"
    )]
    down_payment_percent: f64,
    #[arg(long, default_value_t = 3252.0)]
    property_tax_yearly: f64,
    #[arg(long, default_value_t = 996.0)]
    insurance_yearly: f64,
    #[arg(long, help = "Also compare every credit tier for the aggressive loan amount")]
    compare: bool,
}

#[derive(Debug)]
struct BorrowRequest {
    inputs: AffordabilityInputs,
    costs: CarryingCosts,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EstimateResponse {
    #[serde(flatten)]
    estimate: LoanEstimate,
    breakdown: EstimateBreakdown,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BorrowResponse {
    apr: f64,
    pmi_rate: f64,
    monthly_income: f64,
    monthly_debts: f64,
    monthly_taxes_and_insurance: f64,
    down_payment_percent: f64,
    loan_term_years: u32,
    conservative: EstimateResponse,
    aggressive: EstimateResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    comparison: Option<Vec<ComparisonRow>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CompareResponse {
    loan_amount: f64,
    loan_term_years: u32,
    rows: Vec<ComparisonRow>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RatesResponse {
    rate_tiers: &'static [RateTier],
    loan_term_options: [u32; 2],
    default_credit_score: f64,
    default_loan_term_years: u32,
    default_down_payment_percent: f64,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Usage(#[from] clap::Error),

    #[error(transparent)]
    Invalid(#[from] AffordabilityError),

    #[error("Failed to render JSON: {0}")]
    Render(#[from] serde_json::Error),
}

fn build_inputs(cli: &Cli) -> Result<BorrowRequest, AffordabilityError> {
    let income = IncomeSources {
        wages: cli.wages_income,
        investment: cli.investment_income,
        rental: cli.rental_income,
        other: cli.other_income,
    };
    income.validate()?;

    let debts = DebtPayments {
        auto_loans: cli.auto_loans,
        student_loans: cli.student_loans,
        credit_cards: cli.credit_card_payments,
        alimony: cli.alimony_payments,
        rental_loans: cli.rental_loans,
        other: cli.other_payments,
    };
    debts.validate()?;

    let costs = CarryingCosts {
        property_tax_yearly: cli.property_tax_yearly,
        insurance_yearly: cli.insurance_yearly,
    };
    costs.validate()?;

    let rate = match cli.interest_rate {
        Some(apr) => RateSource::AprOverride(apr),
        None => RateSource::CreditScore(cli.credit_score),
    };

    let inputs = AffordabilityInputs {
        monthly_income: income.total(),
        monthly_debts: debts.total(),
        down_payment_percent: cli.down_payment_percent,
        rate,
        loan_term_years: cli.loan_term_years,
        monthly_taxes_and_insurance: costs.monthly_taxes_and_insurance(),
    };
    inputs.validate()?;

    Ok(BorrowRequest { inputs, costs })
}

pub fn run_cli<I, T>(args: I) -> Result<String, CliError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = Cli::try_parse_from(args)?;
    let request = build_inputs(&cli)?;
    let result = solve_affordability(&request.inputs);

    let mut response = build_borrow_response(&request, &result);
    if cli.compare {
        response.comparison = Some(compare_across_tiers(
            result.aggressive.loan_amount,
            request.inputs.loan_term_years,
        ));
    }

    Ok(serde_json::to_string_pretty(&response)?)
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = Router::new()
        .route("/api/borrow", get(borrow_get_handler).post(borrow_post_handler))
        .route(
            "/api/compare",
            get(compare_get_handler).post(compare_post_handler),
        )
        .route("/api/rates", get(rates_handler))
        .fallback(not_found_handler);

    let listener = TcpListener::bind(addr).await?;
    info!("affordability HTTP API listening on http://{addr}");
    info!("local access: http://127.0.0.1:{port}/api/borrow");

    axum::serve(listener, app).await
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn borrow_get_handler(Query(payload): Query<BorrowPayload>) -> Response {
    borrow_handler_impl(payload)
}

async fn borrow_post_handler(Json(payload): Json<BorrowPayload>) -> Response {
    borrow_handler_impl(payload)
}

fn borrow_handler_impl(payload: BorrowPayload) -> Response {
    let request = match borrow_request_from_payload(payload) {
        Ok(request) => request,
        Err(e) => {
            warn!("rejected borrow request: {e}");
            return error_response(StatusCode::BAD_REQUEST, &e.to_string());
        }
    };

    let result = solve_affordability(&request.inputs);
    json_response(StatusCode::OK, build_borrow_response(&request, &result))
}

async fn compare_get_handler(Query(payload): Query<ComparePayload>) -> Response {
    compare_handler_impl(payload)
}

async fn compare_post_handler(Json(payload): Json<ComparePayload>) -> Response {
    compare_handler_impl(payload)
}

fn compare_handler_impl(payload: ComparePayload) -> Response {
    match build_compare_response(payload) {
        Ok(response) => json_response(StatusCode::OK, response),
        Err(e) => {
            warn!("rejected compare request: {e}");
            error_response(StatusCode::BAD_REQUEST, &e.to_string())
        }
    }
}

async fn rates_handler() -> Response {
    json_response(StatusCode::OK, build_rates_response())
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-store"),
    );
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

#[cfg(test)]
fn borrow_request_from_json(json: &str) -> Result<BorrowRequest, String> {
    let payload = serde_json::from_str::<BorrowPayload>(json)
        .map_err(|e| format!("Invalid API JSON payload: {e}"))?;
    borrow_request_from_payload(payload).map_err(|e| e.to_string())
}

fn borrow_request_from_payload(payload: BorrowPayload) -> Result<BorrowRequest, AffordabilityError> {
    let mut cli = default_cli_for_api();

    if let Some(v) = payload.wages_income {
        cli.wages_income = v;
    }
    if let Some(v) = payload.investment_income {
        cli.investment_income = v;
    }
    if let Some(v) = payload.rental_income {
        cli.rental_income = v;
    }
    if let Some(v) = payload.other_income {
        cli.other_income = v;
    }

    if let Some(v) = payload.auto_loans {
        cli.auto_loans = v;
    }
    if let Some(v) = payload.student_loans {
        cli.student_loans = v;
    }
    if let Some(v) = payload.credit_card_payments {
        cli.credit_card_payments = v;
    }
    if let Some(v) = payload.alimony_payments {
        cli.alimony_payments = v;
    }
    if let Some(v) = payload.rental_loans {
        cli.rental_loans = v;
    }
    if let Some(v) = payload.other_payments {
        cli.other_payments = v;
    }

    if let Some(v) = payload.credit_score {
        cli.credit_score = v;
    }
    if payload.interest_rate.is_some() {
        cli.interest_rate = payload.interest_rate;
    }
    if let Some(v) = payload.loan_term_years {
        cli.loan_term_years = v;
    }
    if let Some(v) = payload.down_payment_percent {
        cli.down_payment_percent = v;
    }
    if let Some(v) = payload.property_tax_yearly {
        cli.property_tax_yearly = v;
    }
    if let Some(v) = payload.insurance_yearly {
        cli.insurance_yearly = v;
    }

    build_inputs(&cli)
}

fn default_cli_for_api() -> Cli {
    Cli {
        wages_income: 6_000.0,
        investment_income: 12_000.0,
        rental_income: 0.0,
        other_income: 0.0,
        auto_loans: 0.0,
        student_loans: 0.0,
        credit_card_payments: 0.0,
        alimony_payments: 0.0,
        rental_loans: 0.0,
        other_payments: 0.0,
        credit_score: DEFAULT_CREDIT_SCORE,
        interest_rate: None,
        loan_term_years: DEFAULT_LOAN_TERM_YEARS,
        down_payment_percent: DEFAULT_DOWN_PAYMENT_PERCENT,
        property_tax_yearly: 3_252.0,
        insurance_yearly: 996.0,
        compare: false,
    }
}

fn build_borrow_response(request: &BorrowRequest, result: &BorrowingResult) -> BorrowResponse {
    let inputs = &request.inputs;
    let estimate_response = |estimate: &LoanEstimate| EstimateResponse {
        estimate: *estimate,
        breakdown: EstimateBreakdown::from_estimate(
            estimate,
            request.costs,
            inputs.down_payment_percent,
        ),
    };

    BorrowResponse {
        apr: result.apr,
        pmi_rate: pmi_rate_for(inputs.down_payment_percent),
        monthly_income: inputs.monthly_income,
        monthly_debts: inputs.monthly_debts,
        monthly_taxes_and_insurance: inputs.monthly_taxes_and_insurance,
        down_payment_percent: inputs.down_payment_percent,
        loan_term_years: inputs.loan_term_years,
        conservative: estimate_response(result.estimate(EstimateTier::Conservative)),
        aggressive: estimate_response(result.estimate(EstimateTier::Aggressive)),
        comparison: None,
    }
}

fn build_compare_response(payload: ComparePayload) -> Result<CompareResponse, AffordabilityError> {
    let loan_amount = payload
        .loan_amount
        .ok_or(AffordabilityError::MissingField("loanAmount"))?;
    let loan_term_years = payload.loan_term_years.unwrap_or(DEFAULT_LOAN_TERM_YEARS);
    let rows = try_compare_across_tiers(loan_amount, loan_term_years)?;

    Ok(CompareResponse {
        loan_amount,
        loan_term_years,
        rows,
    })
}

fn build_rates_response() -> RatesResponse {
    RatesResponse {
        rate_tiers: rate_tiers(),
        loan_term_options: LOAN_TERM_OPTIONS,
        default_credit_score: DEFAULT_CREDIT_SCORE,
        default_loan_term_years: DEFAULT_LOAN_TERM_YEARS,
        default_down_payment_percent: DEFAULT_DOWN_PAYMENT_PERCENT,
    }
}

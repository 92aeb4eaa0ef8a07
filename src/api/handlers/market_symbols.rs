use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::{
    action_router::{ActionRouterInput, ActionRouterOutput},
    aggregators::AggregationWindow,
    api::error::ApiError,
    market_symbol::processor_enums::{
        GetViewInputArgs, MarketSymbolProcessorInput, MarketSymbolProcessorOutput,
    },
    market_symbol::view::MarketSymbolView,
    utils::app_config::AppConfig,
};

/// Query parameters for the market symbol view
#[derive(Debug, Deserialize)]
pub struct MarketSymbolParams {
    pub aggregation: Option<String>,
}

/// GET /MarketSymbol/{symbol} - Aggregated price history for one symbol.
/// A symbol that was never ingested yields a 200 with a null body.
pub async fn get_market_symbol(
    State(app_config): State<AppConfig>,
    Path(symbol): Path<String>,
    Query(params): Query<MarketSymbolParams>,
) -> Result<(StatusCode, Json<Option<MarketSymbolView>>), ApiError> {
    let aggregation = match params.aggregation.as_deref() {
        None => AggregationWindow::OneDay,
        Some(raw) => parse_aggregation_window(raw)?,
    };

    tracing::info!("Loading market data for: {}", symbol);

    let action = ActionRouterInput::MarketSymbols(MarketSymbolProcessorInput::GetView(
        GetViewInputArgs {
            symbol,
            aggregation,
        },
    ));

    let result = action.process(app_config).await.map_err(|e| {
        tracing::error!("Encountered exception while fetching market data: {}", e);
        ApiError::database_error("Could not fetch market data")
    })?;

    match result {
        ActionRouterOutput::MarketSymbols(MarketSymbolProcessorOutput::GetView(view)) => {
            Ok((StatusCode::OK, Json(view)))
        }
        _ => Err(ApiError::internal_error("Unexpected response type")),
    }
}

/// Parse an aggregation window from its query-string name
fn parse_aggregation_window(s: &str) -> Result<AggregationWindow, ApiError> {
    match s {
        "OneDay" => Ok(AggregationWindow::OneDay),
        "OneWeek" => Ok(AggregationWindow::OneWeek),
        "OneMonth" => Ok(AggregationWindow::OneMonth),
        "ThreeMonths" => Ok(AggregationWindow::ThreeMonths),
        "OneYear" => Ok(AggregationWindow::OneYear),
        "FiveYears" => Ok(AggregationWindow::FiveYears),
        _ => Err(ApiError::bad_request(
            "Invalid aggregation. Expected: OneDay, OneWeek, OneMonth, ThreeMonths, OneYear, or FiveYears",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_six_window_names_parse() {
        let cases = [
            ("OneDay", AggregationWindow::OneDay),
            ("OneWeek", AggregationWindow::OneWeek),
            ("OneMonth", AggregationWindow::OneMonth),
            ("ThreeMonths", AggregationWindow::ThreeMonths),
            ("OneYear", AggregationWindow::OneYear),
            ("FiveYears", AggregationWindow::FiveYears),
        ];

        for (raw, expected) in cases {
            assert_eq!(parse_aggregation_window(raw).unwrap(), expected);
        }
    }

    #[test]
    fn test_unrecognized_window_is_a_bad_request() {
        for raw in ["oneday", "TwoDays", ""] {
            assert!(matches!(
                parse_aggregation_window(raw),
                Err(ApiError::BadRequest(_))
            ));
        }
    }
}

use std::str::FromStr;

use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// Run the year-one KPI simulation over a JSON-encoded input snapshot.
///
/// Returns the full result (KPIs, warnings, errors) as JSON. Business-rule
/// violations never reject; they are reported inside the result.
#[napi]
pub fn simulate(input_json: String) -> NapiResult<String> {
    let input: medsim_core::types::SimulationInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = medsim_core::simulation::simulate(&input);
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Constant annual loan payment. Decimal strings in, decimal string out.
#[napi]
pub fn amortize_annual(principal: String, rate: String, years: String) -> NapiResult<String> {
    let principal = Decimal::from_str(&principal).map_err(to_napi_error)?;
    let rate = Decimal::from_str(&rate).map_err(to_napi_error)?;
    let years = Decimal::from_str(&years).map_err(to_napi_error)?;
    Ok(medsim_core::loan::amortize_annual(principal, rate, years).to_string())
}

/// JSON of the default input snapshot, for form initialisation.
#[napi]
pub fn default_input() -> NapiResult<String> {
    serde_json::to_string(&medsim_core::types::SimulationInput::default()).map_err(to_napi_error)
}

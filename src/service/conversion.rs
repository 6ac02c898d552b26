use crate::{
    model::{ConversionRequest, ConversionResult},
    provider::{RateProvider, UpstreamError},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
    #[error("Invalid currency pair {from}/{to}")]
    UnknownCurrency { from: String, to: String },
    #[error("Converting {amount} {from} to {to} at {rate} gives {result}")]
    NotFinite {
        from: String,
        to: String,
        amount: f64,
        rate: f64,
        result: f64,
    },
}

/// Converts with the rate served for `req.from`. No rounding is applied; a
/// result JSON can't carry (overflow, NaN) is an error.
pub async fn convert(
    req: &ConversionRequest,
    provider: &dyn RateProvider,
) -> Result<ConversionResult, ConvertError> {
    let table = provider.latest(&req.from).await?;

    let rate = table
        .rate(&req.to)
        .ok_or_else(|| ConvertError::UnknownCurrency {
            from: req.from.clone(),
            to: req.to.clone(),
        })?;

    let converted_amount = req.amount * rate;

    if !converted_amount.is_finite() {
        return Err(ConvertError::NotFinite {
            from: req.from.clone(),
            to: req.to.clone(),
            amount: req.amount,
            rate: rate,
            result: converted_amount,
        });
    }

    Ok(ConversionResult { converted_amount })
}

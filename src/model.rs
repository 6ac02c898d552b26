mod api_error;
pub use api_error::ApiError;
mod api_result;
pub use api_result::ApiResult;
mod conversion;
pub use conversion::{ConversionRequest, ConversionResult};
mod rate_table;
pub use rate_table::RateTable;

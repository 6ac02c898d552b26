pub mod conversion;
pub use conversion::ConvertError;
pub mod currencies;

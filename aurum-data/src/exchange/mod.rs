/// Binance USDⓈ-M futures kline [`MarketDataSource`](crate::source::MarketDataSource).
pub mod binance;

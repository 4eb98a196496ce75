use self::{
    kline::{BinanceKline, GetKlinesParams, GetKlinesRequest},
    parser::BinanceParser,
};
use crate::{error::DataError, instrument::InstrumentName, source::MarketDataSource};
use async_trait::async_trait;
use aurum_integration::protocol::http::{public::PublicNoHeaders, rest::client::RestClient};
use aurum_ta::candle::{Candle, Timeframe};
use std::borrow::Cow;
use tracing::debug;

/// Binance kline request & response models.
pub mod kline;

/// [`HttpParser`](aurum_integration::protocol::http::HttpParser) for Binance API errors.
pub mod parser;

/// [`BinanceFuturesClient`] default base url.
///
/// See docs: <https://developers.binance.com/docs/derivatives/usds-margined-futures/general-info>
pub const BASE_URL_BINANCE_USD_FUTURES: &str = "https://fapi.binance.com";

/// Maximum number of klines Binance USDⓈ-M returns for a single request.
pub const MAX_KLINES_LIMIT: u16 = 1500;

/// [`MarketDataSource`] backed by the public Binance USDⓈ-M futures klines endpoint.
#[derive(Debug, Clone)]
pub struct BinanceFuturesClient {
    rest_client: RestClient<'static, PublicNoHeaders, BinanceParser>,
}

impl BinanceFuturesClient {
    pub fn new<Url>(base_url: Url) -> Self
    where
        Url: Into<Cow<'static, str>>,
    {
        Self {
            rest_client: RestClient::new(base_url, PublicNoHeaders, BinanceParser),
        }
    }
}

impl Default for BinanceFuturesClient {
    fn default() -> Self {
        Self::new(BASE_URL_BINANCE_USD_FUTURES)
    }
}

#[async_trait]
impl MarketDataSource for BinanceFuturesClient {
    async fn fetch_candles(
        &self,
        instrument: &InstrumentName,
        timeframe: Timeframe,
        limit: u16,
    ) -> Result<Vec<Candle>, DataError> {
        let request = GetKlinesRequest(GetKlinesParams {
            instrument: instrument.clone(),
            interval: timeframe,
            limit: limit.min(MAX_KLINES_LIMIT),
        });

        let (klines, latency) = self.rest_client.execute(request).await?;

        debug!(
            %instrument,
            %timeframe,
            candles = klines.len(),
            duration_ms = latency.field("duration"),
            "fetched Binance klines"
        );

        Ok(klines.into_iter().map(Candle::from).collect())
    }
}

impl From<BinanceKline> for Candle {
    fn from(kline: BinanceKline) -> Self {
        Candle::new(
            kline.open_time,
            kline.open,
            kline.high,
            kline.low,
            kline.close,
            kline.volume,
        )
    }
}

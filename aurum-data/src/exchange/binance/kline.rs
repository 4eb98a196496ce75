use crate::instrument::InstrumentName;
use aurum_integration::{
    de::{datetime_utc_from_epoch_duration, extract_next},
    protocol::http::rest::RestRequest,
};
use aurum_ta::candle::Timeframe;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::borrow::Cow;

/// <https://developers.binance.com/docs/derivatives/usds-margined-futures/market-data/rest-api/Kline-Candlestick-Data>
#[derive(Debug, Clone)]
pub struct GetKlinesRequest(pub GetKlinesParams);

impl RestRequest for GetKlinesRequest {
    type Response = Vec<BinanceKline>;
    type QueryParams = GetKlinesParams;
    type Body = ();

    fn path(&self) -> Cow<'static, str> {
        Cow::Borrowed("/fapi/v1/klines")
    }

    fn method() -> reqwest::Method {
        reqwest::Method::GET
    }

    fn query_params(&self) -> Option<&Self::QueryParams> {
        Some(&self.0)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GetKlinesParams {
    #[serde(rename = "symbol")]
    pub instrument: InstrumentName,

    #[serde(rename = "interval")]
    pub interval: Timeframe,

    #[serde(rename = "limit")]
    pub limit: u16,
}

/// Binance USDⓈ-M kline.
///
/// ### Raw Payload Examples
/// ```json
/// [
///   1499040000000,      // Open time
///   "0.01634790",       // Open
///   "0.80000000",       // High
///   "0.01575800",       // Low
///   "0.01577100",       // Close
///   "148976.11427815",  // Volume
///   1499644799999,      // Close time
///   "2434.19055334",    // Quote asset volume
///   308,                // Number of trades
///   "1756.87402397",    // Taker buy base asset volume
///   "28.46694368",      // Taker buy quote asset volume
///   "17928899.62484339" // Ignore
/// ]
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct BinanceKline {
    pub open_time: DateTime<Utc>,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    pub volume: Decimal,
}

impl<'de> serde::de::Deserialize<'de> for BinanceKline {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct SeqVisitor;

        impl<'de> serde::de::Visitor<'de> for SeqVisitor {
            type Value = BinanceKline;

            fn expecting(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                formatter.write_str("BinanceKline sequence from the Binance USD-M REST API")
            }

            fn visit_seq<SeqAccessor>(
                self,
                mut seq: SeqAccessor,
            ) -> Result<Self::Value, SeqAccessor::Error>
            where
                SeqAccessor: serde::de::SeqAccess<'de>,
            {
                let open_time = extract_next::<SeqAccessor, u64>(&mut seq, "open_time")
                    .map(|millis| {
                        datetime_utc_from_epoch_duration(std::time::Duration::from_millis(millis))
                    })?;
                let open = extract_next(&mut seq, "open")?;
                let high = extract_next(&mut seq, "high")?;
                let low = extract_next(&mut seq, "low")?;
                let close = extract_next(&mut seq, "close")?;
                let volume = extract_next(&mut seq, "volume")?;

                // Ignore close time, quote volume, trade count & taker volumes
                while seq.next_element::<serde::de::IgnoredAny>()?.is_some() {}

                Ok(BinanceKline {
                    open_time,
                    open,
                    high,
                    low,
                    close,
                    volume,
                })
            }
        }

        deserializer.deserialize_seq(SeqVisitor)
    }
}

use super::BuildStrategy;
use crate::error::SocketError;

/// [`BuildStrategy`] for endpoints needing no extra headers or signature: Binance market data is
/// public, and the Telegram Bot API carries its token in the path.
#[derive(Debug, Copy, Clone)]
pub struct PublicNoHeaders;

impl BuildStrategy for PublicNoHeaders {
    fn build<Request>(
        &self,
        _: Request,
        builder: reqwest::RequestBuilder,
    ) -> Result<reqwest::Request, SocketError> {
        Ok(builder.build()?)
    }
}

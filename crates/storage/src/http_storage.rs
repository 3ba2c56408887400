//! REST client for the booking API.

use homeaudit_core::{Booking, BookingNumber};
use reqwest::{Client, ClientBuilder, StatusCode, Url};
use super::{BookingSource, StorageError, Result};
use tracing::debug;

/// Booking source backed by the booking API.
#[derive(Clone)]
pub struct HttpStorage {
    /// HTTP client
    client: Client,

    /// API base URL
    base_url: Url,
}

impl HttpStorage {
    /// Create a client for `base_url` with the given request timeout.
    pub fn new(base_url: impl AsRef<str>, timeout: std::time::Duration) -> Result<Self> {
        let base = base_url.as_ref();
        let base_url = Url::parse(base)
            .map_err(|e| StorageError::Other(format!("invalid booking API URL {:?}: {}", base, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(StorageError::Other(format!("invalid booking API URL {:?}", base)));
        }

        let client = ClientBuilder::new().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }

    /// URL of a single booking. The number is escaped as one path segment.
    pub fn booking_url(&self, number: &BookingNumber) -> Url {
        self.url_with(&["bookings", number.as_str()])
    }

    /// URL of the booking collection.
    pub fn bookings_url(&self) -> Url {
        self.url_with(&["bookings"])
    }

    fn url_with(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Checked in `new`: the base URL can take path segments
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

#[async_trait::async_trait]
impl BookingSource for HttpStorage {
    async fn load_booking(&self, number: &BookingNumber) -> Result<Option<Booking>> {
        let url = self.booking_url(number);
        debug!("Fetching booking from {}", url);

        let response = self.client.get(url).send().await?;
        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => Ok(Some(response.json().await?)),
            status => Err(StorageError::Status {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            }),
        }
    }

    async fn list_bookings(&self) -> Result<Vec<Booking>> {
        let url = self.bookings_url();
        debug!("Listing bookings from {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(StorageError::Status {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }
        Ok(response.json().await?)
    }
}

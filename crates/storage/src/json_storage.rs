//! JSON file storage implementation.
//!
//! Stores one booking per JSON file under `bookings/`.

use std::path::{Path, PathBuf};
use homeaudit_core::{Booking, BookingNumber};
use super::{BookingSource, StorageError, Result};
use tokio::fs;
use tracing::debug;

/// File-based JSON booking store.
pub struct JsonStorage {
    root: PathBuf,
}

impl JsonStorage {
    /// Open storage, creating the `bookings/` directory if needed.
    pub async fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();

        fs::create_dir_all(root.join("bookings")).await?;

        Ok(Self { root })
    }

    fn booking_path(&self, number: &BookingNumber) -> Result<PathBuf> {
        Ok(self.root.join("bookings").join(format!("{}.json", file_stem(number)?)))
    }

    /// Write a booking record, replacing any previous one.
    pub async fn save_booking(&self, booking: &Booking) -> Result<()> {
        let path = self.booking_path(&booking.booking_number)?;
        let json = serde_json::to_string_pretty(booking)?;
        fs::write(&path, json.as_bytes()).await?;

        debug!("Saved booking {}", booking.booking_number);
        Ok(())
    }
}

#[async_trait::async_trait]
impl BookingSource for JsonStorage {
    async fn load_booking(&self, number: &BookingNumber) -> Result<Option<Booking>> {
        read_json(&self.booking_path(number)?).await
    }

    async fn list_bookings(&self) -> Result<Vec<Booking>> {
        let mut bookings: Vec<Booking> = list_dir(&self.root.join("bookings")).await?;
        bookings.sort_by(|a, b| a.booking_number.cmp(&b.booking_number));
        Ok(bookings)
    }
}

fn file_stem(number: &BookingNumber) -> Result<&str> {
    let s = number.as_str();
    if s.is_empty() || s.contains('/') || s.contains('\\') || s.starts_with('.') {
        return Err(StorageError::Other(format!("invalid booking number: {:?}", s)));
    }
    Ok(s)
}

async fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    match fs::read_to_string(path).await {
        Ok(json) => {
            let value = serde_json::from_str(&json)?;
            Ok(Some(value))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

async fn list_dir<T: serde::de::DeserializeOwned>(dir: &Path) -> Result<Vec<T>> {
    let mut items = Vec::new();
    let mut rd = fs::read_dir(dir).await?;
    while let Some(entry) = rd.next_entry().await? {
        if entry.path().extension().and_then(|s| s.to_str()) != Some("json") {
            continue;
        }
        match read_json(&entry.path()).await {
            Ok(Some(item)) => items.push(item),
            Ok(None) => {}
            Err(e) => tracing::warn!("Skipping unreadable booking file {:?}: {}", entry.path(), e),
        }
    }
    Ok(items)
}

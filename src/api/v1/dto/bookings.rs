use serde::Deserialize;

/// `GET /bookings?email=` — the owner whose bookings are requested.
#[derive(Debug, Default, Deserialize)]
pub struct BookingsQuery {
    pub email: Option<String>,
}

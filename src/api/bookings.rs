use serde_json::json;
use url::form_urlencoded;

use super::client::{endpoint, GatewayClient};
use super::format::ApiResult;
use crate::models::booking::{BookingEnvelope, BookingList, Cancellation};
use crate::models::{Booking, BookingReceipt, BookingStatus, NewBooking};

impl GatewayClient {
    pub async fn create_booking(&self, booking: &NewBooking) -> ApiResult<BookingReceipt> {
        self.post("/bookings", booking).await
    }

    /// Bookings visible to the caller: their own, or those on their venues for owners
    pub async fn list_bookings(&self) -> ApiResult<Vec<Booking>> {
        self.get::<BookingList>("/bookings").await.map(|list| list.bookings)
    }

    pub async fn my_booking_requests(&self) -> ApiResult<Vec<Booking>> {
        self.get::<BookingList>("/bookings/my-requests")
            .await
            .map(|list| list.bookings)
    }

    pub async fn bookings_for_my_venues(&self, status: Option<BookingStatus>) -> ApiResult<Vec<Booking>> {
        let path = match status {
            Some(status) => {
                let query = form_urlencoded::Serializer::new(String::new())
                    .append_pair("status", status.as_str())
                    .finish();
                format!("/bookings/for-my-venues?{}", query)
            }
            None => "/bookings/for-my-venues".to_string(),
        };
        self.get::<BookingList>(&path).await.map(|list| list.bookings)
    }

    /// Returns whether the booking is now cancelled
    pub async fn cancel_booking(&self, booking_id: &str) -> ApiResult<bool> {
        self.delete::<Cancellation>(&endpoint(&["bookings", booking_id]))
            .await
            .map(|c| c.cancelled)
    }

    pub async fn update_booking_status(&self, booking_id: &str, status: BookingStatus) -> ApiResult<Booking> {
        self.patch::<BookingEnvelope, _>(&endpoint(&["bookings", booking_id]), &json!({ "status": status }))
            .await
            .map(|envelope| envelope.booking)
    }
}

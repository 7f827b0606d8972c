//! Appointment booking endpoints.

use lulu_core::BookingId;
use tracing::instrument;

use super::types::{
    AvailabilityQuery, AvailabilityResponse, Booking, CancelRequest, CreateBookingRequest,
};
use super::{ApiClient, ApiError};

impl ApiClient {
    /// Open slots for an artist type at a location on a date.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn check_availability(
        &self,
        query: &AvailabilityQuery,
    ) -> Result<AvailabilityResponse, ApiError> {
        self.get(&["bookings", "availability"], &query.to_pairs()).await
    }

    /// Book an appointment.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails, e.g. the slot was taken.
    #[instrument(skip_all, fields(service = %request.service, date = %request.appointment_date))]
    pub async fn create_booking(&self, request: &CreateBookingRequest) -> Result<Booking, ApiError> {
        self.post(&["bookings"], request).await
    }

    /// The signed-in user's bookings.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn my_bookings(&self) -> Result<Vec<Booking>, ApiError> {
        self.get(&["bookings"], &[]).await
    }

    /// A single booking.
    ///
    /// # Errors
    ///
    /// Returns an error if the booking is not found or the API request fails.
    #[instrument(skip(self), fields(booking_id = %id))]
    pub async fn booking(&self, id: &BookingId) -> Result<Booking, ApiError> {
        self.get(&["bookings", id.as_str()], &[]).await
    }

    /// Cancel a booking with a reason.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(booking_id = %id))]
    pub async fn cancel_booking(&self, id: &BookingId, reason: &str) -> Result<Booking, ApiError> {
        let request = CancelRequest {
            reason: reason.to_string(),
        };
        self.put(&["bookings", id.as_str(), "cancel"], &request).await
    }
}

//! `lulu bookings` commands.

use chrono::NaiveDate;
use clap::Args;
use lulu_core::BookingId;
use lulu_storefront::api::types::{
    Artist, AvailabilityQuery, Booking, CreateBookingRequest, TimeSlot,
};
use lulu_storefront::{Storefront, StorefrontError};

/// Appointment details for `lulu bookings create`.
#[derive(Debug, Args)]
pub struct CreateBookingArgs {
    #[arg(long)]
    service: String,
    /// Artist specialty, e.g. `lash` or `brow`
    #[arg(long)]
    artist_type: String,
    #[arg(long)]
    artist_name: String,
    #[arg(long)]
    location: String,
    /// Date as YYYY-MM-DD
    #[arg(long)]
    date: NaiveDate,
    /// Slot start, e.g. 10:00
    #[arg(long)]
    start: String,
    /// Slot end, e.g. 11:30
    #[arg(long)]
    end: String,
    #[arg(long)]
    notes: Option<String>,
}

pub async fn availability(
    storefront: &Storefront,
    date: NaiveDate,
    location: String,
    artist_type: String,
) -> Result<(), StorefrontError> {
    let query = AvailabilityQuery {
        date,
        location,
        artist_type,
    };
    let response = storefront.api().check_availability(&query).await?;

    if !response.available || response.available_slots.is_empty() {
        println!("No slots available on {date}");
        return Ok(());
    }
    for slot in response.available_slots {
        println!("{} - {}", slot.start, slot.end);
    }
    Ok(())
}

pub async fn create(storefront: &Storefront, args: CreateBookingArgs) -> Result<(), StorefrontError> {
    let request = CreateBookingRequest {
        service: args.service,
        artist: Artist {
            artist_type: args.artist_type,
            name: args.artist_name,
        },
        location: args.location,
        appointment_date: args.date,
        time_slot: TimeSlot {
            start: args.start,
            end: args.end,
        },
        notes: args.notes,
    };
    let booking = storefront.api().create_booking(&request).await?;
    println!("Booking confirmed!");
    print_booking(&booking);
    Ok(())
}

pub async fn list(storefront: &Storefront) -> Result<(), StorefrontError> {
    let bookings = storefront.api().my_bookings().await?;
    if bookings.is_empty() {
        println!("No bookings yet");
    }
    for booking in &bookings {
        print_booking(booking);
    }
    Ok(())
}

pub async fn show(storefront: &Storefront, id: &BookingId) -> Result<(), StorefrontError> {
    let booking = storefront.api().booking(id).await?;
    print_booking(&booking);
    Ok(())
}

pub async fn cancel(storefront: &Storefront, id: &BookingId, reason: &str) -> Result<(), StorefrontError> {
    let booking = storefront.api().cancel_booking(id, reason).await?;
    println!("Booking {} is now {}", booking.id, booking.status);
    Ok(())
}

fn print_booking(booking: &Booking) {
    println!(
        "{:<24} {:<10} {} {}-{}  {} with {} ({}) at {}",
        booking.id,
        booking.status,
        booking.appointment_date,
        booking.time_slot.start,
        booking.time_slot.end,
        booking.service,
        booking.artist.name,
        booking.artist.artist_type,
        booking.location
    );
}

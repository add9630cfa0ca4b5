//! CSV rendering for report downloads.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use relief_core::error::{AppError, ErrorKind};
use relief_entity::citizen::Citizen;
use relief_entity::relief::ReliefRequest;

#[derive(Serialize)]
struct ReliefRequestRow<'a> {
    id: Uuid,
    citizen_id: Uuid,
    category: &'a str,
    description: &'a str,
    district: &'a str,
    status: &'a str,
    review_note: &'a str,
    created_at: DateTime<Utc>,
}

#[derive(Serialize)]
struct CitizenRow<'a> {
    id: Uuid,
    nic: &'a str,
    full_name: &'a str,
    address: &'a str,
    phone: &'a str,
    district: &'a str,
    gn_division: &'a str,
    household_size: i32,
    status: &'a str,
    created_at: DateTime<Utc>,
}

fn write_rows<T: Serialize>(rows: impl IntoIterator<Item = T>) -> Result<Vec<u8>, AppError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer
            .serialize(row)
            .map_err(|e| AppError::with_source(ErrorKind::Serialization, "Failed to write CSV row", e))?;
    }
    writer
        .into_inner()
        .map_err(|e| AppError::with_source(ErrorKind::Serialization, "Failed to flush CSV", e.into_error()))
}

/// Render relief requests, one row each.
pub fn relief_requests_csv(requests: &[ReliefRequest]) -> Result<Vec<u8>, AppError> {
    write_rows(requests.iter().map(|r| ReliefRequestRow {
        id: r.id,
        citizen_id: r.citizen_id,
        category: r.category.as_str(),
        description: &r.description,
        district: &r.district,
        status: r.status.as_str(),
        review_note: r.review_note.as_deref().unwrap_or_default(),
        created_at: r.created_at,
    }))
}

/// Render citizens, one row each.
pub fn citizens_csv(citizens: &[Citizen]) -> Result<Vec<u8>, AppError> {
    write_rows(citizens.iter().map(|c| CitizenRow {
        id: c.id,
        nic: &c.nic,
        full_name: &c.full_name,
        address: c.address.as_deref().unwrap_or_default(),
        phone: c.phone.as_deref().unwrap_or_default(),
        district: &c.district,
        gn_division: c.gn_division.as_deref().unwrap_or_default(),
        household_size: c.household_size,
        status: c.status.as_str(),
        created_at: c.created_at,
    }))
}

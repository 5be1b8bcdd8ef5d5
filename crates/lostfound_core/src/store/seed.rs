//! Example records loaded into an empty slot.

use crate::model::item::{ItemRecord, ItemStatus};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};

struct SeedRow {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    date: (i32, u32, u32),
    location: &'static str,
    contact_info: &'static str,
    status: ItemStatus,
    created: (i32, u32, u32, u32),
}

// Newest first, matching store order.
const SEED_ROWS: &[SeedRow] = &[
    SeedRow {
        id: "seed-1",
        name: "Brown Leather Wallet",
        description: "Brown leather wallet with student ID and a library card inside.",
        date: (2024, 9, 12),
        location: "Main Library, 2nd Floor",
        contact_info: "jordan.lee@campus.edu",
        status: ItemStatus::Lost,
        created: (2024, 9, 12, 16),
    },
    SeedRow {
        id: "seed-2",
        name: "Blue Water Bottle",
        description: "Insulated blue bottle with a university sticker on the lid.",
        date: (2024, 9, 11),
        location: "Student Union Cafeteria",
        contact_info: "(555) 201-4432",
        status: ItemStatus::Found,
        created: (2024, 9, 11, 13),
    },
    SeedRow {
        id: "seed-3",
        name: "Calculus Textbook",
        description: "Stewart Calculus, 8th edition, notes in the margins.",
        date: (2024, 9, 10),
        location: "Science Building, Room 104",
        contact_info: "+1 555 310 9981",
        status: ItemStatus::Lost,
        created: (2024, 9, 10, 9),
    },
    SeedRow {
        id: "seed-4",
        name: "Car Keys",
        description: "Set of car keys with a red lanyard and a small flashlight.",
        date: (2024, 9, 9),
        location: "Parking Lot B",
        contact_info: "security@campus.edu",
        status: ItemStatus::Found,
        created: (2024, 9, 9, 18),
    },
];

/// Returns the fixed example records used when no snapshot exists.
pub fn seed_items() -> Vec<ItemRecord> {
    SEED_ROWS.iter().map(seed_record).collect()
}

fn seed_record(row: &SeedRow) -> ItemRecord {
    let (year, month, day) = row.date;
    let (c_year, c_month, c_day, c_hour) = row.created;
    ItemRecord {
        id: row.id.to_string(),
        name: row.name.to_string(),
        description: row.description.to_string(),
        date: NaiveDate::from_ymd_opt(year, month, day).expect("valid seed date"),
        location: row.location.to_string(),
        contact_info: row.contact_info.to_string(),
        status: row.status,
        resolved: false,
        date_created: seed_instant(c_year, c_month, c_day, c_hour),
    }
}

fn seed_instant(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, 0, 0)
        .single()
        .expect("valid seed timestamp")
}

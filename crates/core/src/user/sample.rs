//! Synthetic user generation for bulk inserts.
//!
//! `batchWriteItem` asks for a count of records, not record bodies, so
//! the attribute values are fabricated here. Names and addresses are
//! drawn from static pools; identifiers are freshly generated UUIDs.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::types::UserRecord;

const FIRST_NAMES: [&str; 12] = [
    "Ann", "Bruno", "Carla", "Diego", "Elena", "Felix", "Greta", "Hugo", "Iris", "Jonas", "Karen",
    "Lucas",
];

const LAST_NAMES: [&str; 10] = [
    "Alvarez", "Baker", "Costa", "Duarte", "Evans", "Ferreira", "Gomez", "Hansen", "Ivanov",
    "Juarez",
];

const STREETS: [&str; 8] = [
    "Elm St", "Oak Ave", "Maple Rd", "Cedar Ln", "Pine Dr", "Birch Way", "Willow Ct", "Laurel Pl",
];

const CITIES: [&str; 6] = [
    "Springfield",
    "Riverton",
    "Lakewood",
    "Fairview",
    "Georgetown",
    "Ashland",
];

const EMAIL_DOMAINS: [&str; 4] = ["example.com", "example.org", "mail.test", "inbox.test"];

/// Generates `count` synthetic user records, each with a unique id.
pub fn synthetic_users(count: u32) -> Vec<UserRecord> {
    let mut rng = StdRng::from_os_rng();
    (0..count).map(|_| synthetic_user(&mut rng)).collect()
}

fn synthetic_user(rng: &mut StdRng) -> UserRecord {
    let first = FIRST_NAMES[rng.random_range(0..FIRST_NAMES.len())];
    let last = LAST_NAMES[rng.random_range(0..LAST_NAMES.len())];
    let street = STREETS[rng.random_range(0..STREETS.len())];
    let city = CITIES[rng.random_range(0..CITIES.len())];
    let domain = EMAIL_DOMAINS[rng.random_range(0..EMAIL_DOMAINS.len())];

    let name = format!("{first} {last}");
    let address = format!(
        "{} {street}, {city}",
        rng.random_range(1..2000),
    );
    let email = format!(
        "{}.{}@{domain}",
        first.to_lowercase(),
        last.to_lowercase()
    );
    let phone = format!("555-{:04}", rng.random_range(100..10_000));

    UserRecord::create(name, address, email, phone)
}

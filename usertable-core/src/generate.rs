//! Synthetic user records.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use unicode_normalization::UnicodeNormalization;

use crate::record::Record;

const FIRST_NAMES: &[&str] = &[
    "Ada", "Alan", "Amara", "Beatrice", "Bruno", "Camille", "Chen", "Dario", "Elena", "Emeka",
    "Farah", "Felix", "Grace", "Hiro", "Ingrid", "Isaac", "Jonas", "Kavya", "Liam", "Lucia",
    "Mateo", "Mei", "Nadia", "Noah", "Olga", "Omar", "Priya", "Quentin", "Rosa", "Sven", "Tariq",
    "Uma", "Victor", "Wren", "Ximena", "Yusuf", "Zoe",
];

const LAST_NAMES: &[&str] = &[
    "Abbott", "Bakker", "Castillo", "Dubois", "Eriksen", "Fischer", "García", "Hughes", "Ivanova",
    "Jensen", "Kowalski", "Larsen", "Moreau", "Nakamura", "Okafor", "Petrov", "Quinn", "Rossi",
    "Schmidt", "Tanaka", "Ueda", "Varga", "Williams", "Xu", "Yamamoto", "Zimmermann",
];

const PLACES: &[(&str, &str)] = &[
    ("Amsterdam", "Netherlands"),
    ("Antwerp", "Belgium"),
    ("Austin", "United States"),
    ("Berlin", "Germany"),
    ("Bogotá", "Colombia"),
    ("Cape Town", "South Africa"),
    ("Dublin", "Ireland"),
    ("Kraków", "Poland"),
    ("Lagos", "Nigeria"),
    ("Lisbon", "Portugal"),
    ("Lyon", "France"),
    ("Melbourne", "Australia"),
    ("Montréal", "Canada"),
    ("Osaka", "Japan"),
    ("Oslo", "Norway"),
    ("Pune", "India"),
    ("Seoul", "South Korea"),
    ("Toronto", "Canada"),
    ("Valencia", "Spain"),
    ("Zürich", "Switzerland"),
];

const COMPANIES: &[&str] = &[
    "Acme Corp",
    "Blue Harbor",
    "Copperleaf",
    "Driftwood Labs",
    "Evergreen Systems",
    "Foxglove",
    "Granite Works",
    "Helix Data",
    "Ironbark",
    "Juniper & Co",
];

const EMAIL_DOMAINS: &[&str] = &["example.com", "mail.test", "inbox.dev", "post.example"];

/// Registration dates fall within this many days before now.
const REGISTRATION_WINDOW_DAYS: i64 = 5 * 365;

/// Generate `count` records with the thread-local RNG.
pub fn generate(count: usize) -> Vec<Record> {
    generate_with(&mut rand::rng(), count, Utc::now())
}

/// Generate `count` records from `rng`, registered before `now`.
///
/// The same seed and instant produce the same records.
pub fn generate_with<R: Rng>(rng: &mut R, count: usize, now: DateTime<Utc>) -> Vec<Record> {
    (0..count).map(|_| generate_one(rng, now)).collect()
}

fn generate_one<R: Rng>(rng: &mut R, now: DateTime<Utc>) -> Record {
    let first_name = pick(rng, FIRST_NAMES);
    let last_name = pick(rng, LAST_NAMES);
    let (city, country) = pick(rng, PLACES);

    let mut id_bytes = [0u8; 16];
    rng.fill(&mut id_bytes);
    let id = uuid::Builder::from_random_bytes(id_bytes).into_uuid();

    let seconds_ago = rng.random_range(0..REGISTRATION_WINDOW_DAYS * 24 * 60 * 60);
    let email = format!(
        "{}.{}{}@{}",
        ascii_lower(first_name),
        ascii_lower(last_name),
        rng.random_range(1..100),
        pick(rng, EMAIL_DOMAINS)
    );

    Record {
        id: id.to_string(),
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        email,
        phone: rng.random_bool(0.85).then(|| {
            format!(
                "+1 ({:03}) {:03}-{:04}",
                rng.random_range(200..1000),
                rng.random_range(0..1000),
                rng.random_range(0..10000)
            )
        }),
        city: city.to_string(),
        country: country.to_string(),
        company: rng
            .random_bool(0.7)
            .then(|| pick(rng, COMPANIES).to_string()),
        age: rng.random_bool(0.9).then(|| rng.random_range(18..80)),
        registered_date: now - Duration::seconds(seconds_ago),
    }
}

fn pick<'a, T, R: Rng>(rng: &mut R, items: &'a [T]) -> &'a T {
    &items[rng.random_range(0..items.len())]
}

/// Lowercase ASCII for email local parts; accented letters keep their base letter.
fn ascii_lower(value: &str) -> String {
    value
        .nfd()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

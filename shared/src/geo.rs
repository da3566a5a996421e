//! Static geographic reference tables for the location picker
//!
//! Each level is keyed by its parent's id. A lookup for an unknown key
//! falls back to the `default` entry without reporting an error.

use serde::Serialize;

use crate::types::{City, GeoPoint};

pub const DEFAULT_KEY: &str = "default";

/// A zone, country or state option
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Place {
    pub id: &'static str,
    pub name: &'static str,
}

const fn place(id: &'static str, name: &'static str) -> Place {
    Place { id, name }
}

#[derive(Debug, Clone, Copy)]
struct CitySeed {
    name: &'static str,
    country: &'static str,
    /// Degrees scaled by 10^4
    lat: i64,
    lon: i64,
}

const fn seed(name: &'static str, country: &'static str, lat: i64, lon: i64) -> CitySeed {
    CitySeed {
        name,
        country,
        lat,
        lon,
    }
}

impl CitySeed {
    fn to_city(self) -> City {
        City::new(self.name)
            .with_country(self.country)
            .with_coordinates(GeoPoint::from_scaled(self.lat, self.lon))
    }
}

type Table<T> = &'static [(&'static str, &'static [T])];

pub const ZONES: &[Place] = &[
    place("asia", "Asia"),
    place("europe", "Europe"),
    place("north_america", "North America"),
    place("south_america", "South America"),
    place("africa", "Africa"),
    place("oceania", "Oceania"),
];

const COUNTRIES: Table<Place> = &[
    ("asia", &[place("jp", "Japan"), place("in", "India"), place("th", "Thailand")]),
    ("europe", &[place("gb", "United Kingdom"), place("fr", "France"), place("de", "Germany")]),
    ("north_america", &[place("us", "United States"), place("ca", "Canada"), place("mx", "Mexico")]),
    ("south_america", &[place("br", "Brazil"), place("ar", "Argentina")]),
    ("africa", &[place("ke", "Kenya"), place("za", "South Africa"), place("eg", "Egypt")]),
    ("oceania", &[place("au", "Australia"), place("nz", "New Zealand")]),
    (DEFAULT_KEY, &[place("us", "United States"), place("gb", "United Kingdom")]),
];

const STATES: Table<Place> = &[
    ("jp", &[place("jp-tokyo", "Tokyo"), place("jp-osaka", "Osaka")]),
    ("in", &[place("in-mh", "Maharashtra"), place("in-dl", "Delhi")]),
    ("th", &[place("th-bkk", "Bangkok"), place("th-cm", "Chiang Mai")]),
    ("gb", &[place("gb-eng", "England"), place("gb-sct", "Scotland")]),
    ("fr", &[place("fr-idf", "Île-de-France"), place("fr-paca", "Provence-Alpes-Côte d'Azur")]),
    ("de", &[place("de-by", "Bavaria"), place("de-be", "Berlin")]),
    ("us", &[place("us-ny", "New York"), place("us-ca", "California"), place("us-tx", "Texas")]),
    ("ca", &[place("ca-on", "Ontario"), place("ca-bc", "British Columbia")]),
    ("mx", &[place("mx-cdmx", "Mexico City"), place("mx-jal", "Jalisco")]),
    ("br", &[place("br-sp", "São Paulo"), place("br-rj", "Rio de Janeiro")]),
    ("ar", &[place("ar-ba", "Buenos Aires")]),
    ("ke", &[place("ke-nbo", "Nairobi")]),
    ("za", &[place("za-wc", "Western Cape"), place("za-gt", "Gauteng")]),
    ("eg", &[place("eg-cai", "Cairo")]),
    ("au", &[place("au-nsw", "New South Wales"), place("au-vic", "Victoria")]),
    ("nz", &[place("nz-akl", "Auckland")]),
    (DEFAULT_KEY, &[place("capital", "Capital Region")]),
];

const CITIES: Table<CitySeed> = &[
    ("jp-tokyo", &[seed("Tokyo", "Japan", 356762, 1396503), seed("Hachioji", "Japan", 356664, 1393160)]),
    ("jp-osaka", &[seed("Osaka", "Japan", 346937, 1355023), seed("Sakai", "Japan", 345733, 1354830)]),
    ("in-mh", &[seed("Mumbai", "India", 190760, 728777), seed("Pune", "India", 185204, 738567)]),
    ("in-dl", &[seed("New Delhi", "India", 286139, 772090)]),
    ("th-bkk", &[seed("Bangkok", "Thailand", 137563, 1005018)]),
    ("th-cm", &[seed("Chiang Mai", "Thailand", 187883, 989853)]),
    ("gb-eng", &[seed("London", "United Kingdom", 515074, -1278), seed("Manchester", "United Kingdom", 534808, -22426)]),
    ("gb-sct", &[seed("Edinburgh", "United Kingdom", 559533, -31883), seed("Glasgow", "United Kingdom", 558642, -42518)]),
    ("fr-idf", &[seed("Paris", "France", 488566, 23522)]),
    ("fr-paca", &[seed("Marseille", "France", 432965, 53698), seed("Nice", "France", 437102, 72620)]),
    ("de-by", &[seed("Munich", "Germany", 481351, 115820), seed("Nuremberg", "Germany", 494521, 110767)]),
    ("de-be", &[seed("Berlin", "Germany", 525200, 134050)]),
    ("us-ny", &[seed("New York", "United States", 407128, -740060), seed("Buffalo", "United States", 428864, -788784)]),
    ("us-ca", &[seed("Los Angeles", "United States", 340522, -1182437), seed("San Francisco", "United States", 377749, -1224194)]),
    ("us-tx", &[seed("Houston", "United States", 297604, -953698), seed("Austin", "United States", 302672, -977431)]),
    ("ca-on", &[seed("Toronto", "Canada", 436532, -793832), seed("Ottawa", "Canada", 454215, -756972)]),
    ("ca-bc", &[seed("Vancouver", "Canada", 492827, -1231207)]),
    ("mx-cdmx", &[seed("Mexico City", "Mexico", 194326, -991332)]),
    ("mx-jal", &[seed("Guadalajara", "Mexico", 206597, -1033496)]),
    ("br-sp", &[seed("São Paulo", "Brazil", -235505, -466333)]),
    ("br-rj", &[seed("Rio de Janeiro", "Brazil", -229068, -431729)]),
    ("ar-ba", &[seed("Buenos Aires", "Argentina", -346037, -583816)]),
    ("ke-nbo", &[seed("Nairobi", "Kenya", -12921, 368219)]),
    ("za-wc", &[seed("Cape Town", "South Africa", -339249, 184241)]),
    ("za-gt", &[seed("Johannesburg", "South Africa", -262041, 280473)]),
    ("eg-cai", &[seed("Cairo", "Egypt", 300444, 312357)]),
    ("au-nsw", &[seed("Sydney", "Australia", -338688, 1512093)]),
    ("au-vic", &[seed("Melbourne", "Australia", -378136, 1449631)]),
    ("nz-akl", &[seed("Auckland", "New Zealand", -368485, 1747633)]),
    (
        DEFAULT_KEY,
        &[
            seed("London", "United Kingdom", 515074, -1278),
            seed("New York", "United States", 407128, -740060),
            seed("Tokyo", "Japan", 356762, 1396503),
        ],
    ),
];

fn lookup<T>(table: Table<T>, key: &str) -> &'static [T] {
    table
        .iter()
        .find(|(k, _)| *k == key)
        .or_else(|| table.iter().find(|(k, _)| *k == DEFAULT_KEY))
        .map(|(_, rows)| *rows)
        .unwrap_or(&[])
}

pub fn zones() -> &'static [Place] {
    ZONES
}

pub fn countries_for(zone: &str) -> &'static [Place] {
    lookup(COUNTRIES, zone)
}

pub fn states_for(country: &str) -> &'static [Place] {
    lookup(STATES, country)
}

pub fn cities_for(state: &str) -> Vec<City> {
    lookup(CITIES, state).iter().map(|s| s.to_city()).collect()
}

/// Resolve an option id (or display name, case-insensitively) within a list
pub fn find_place<'a>(options: &'a [Place], key: &str) -> Option<&'a Place> {
    options
        .iter()
        .find(|p| p.id == key)
        .or_else(|| options.iter().find(|p| p.name.eq_ignore_ascii_case(key)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_keys() {
        assert_eq!(countries_for("asia").len(), 3);
        assert_eq!(states_for("us")[0].name, "New York");
        let cities = cities_for("us-ny");
        assert_eq!(cities[0].name, "New York");
        assert_eq!(cities[0].country.as_deref(), Some("United States"));
        assert!(cities[0].coordinates.is_some());
    }

    #[test]
    fn test_unknown_keys_fall_back_to_default() {
        assert_eq!(countries_for("antarctica"), lookup(COUNTRIES, DEFAULT_KEY));
        assert_eq!(states_for("zz")[0].id, "capital");
        let names: Vec<_> = cities_for("capital").into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["London", "New York", "Tokyo"]);
    }

    #[test]
    fn test_every_state_has_cities() {
        for (_, states) in STATES {
            for state in *states {
                assert!(!cities_for(state.id).is_empty(), "{}", state.id);
            }
        }
    }

    #[test]
    fn test_all_reference_coordinates_valid() {
        for (_, seeds) in CITIES {
            for s in *seeds {
                let point = s.to_city().coordinates.unwrap();
                assert!(crate::validation::validate_coordinates(&point).is_ok(), "{}", s.name);
            }
        }
    }

    #[test]
    fn test_find_place_by_id_or_name() {
        let zones = zones();
        assert_eq!(find_place(zones, "europe").unwrap().name, "Europe");
        assert_eq!(find_place(zones, "north america").unwrap().id, "north_america");
        assert!(find_place(zones, "atlantis").is_none());
    }
}

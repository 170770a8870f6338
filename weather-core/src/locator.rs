use std::fmt;

use crate::model::Coordinates;

/// How a current-conditions request addresses its city.
///
/// A locator made of exactly two comma-separated floats is read as
/// coordinates; anything else is sent verbatim as a city name. A city name
/// that happens to look like `"12,34"` is therefore routed as coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum Locator {
    Name(String),
    Coordinates(Coordinates),
}

impl Locator {
    pub fn parse(input: &str) -> Self {
        let parts: Vec<&str> = input.split(',').collect();

        if let [lat, lon] = parts.as_slice() {
            if let (Ok(latitude), Ok(longitude)) =
                (lat.trim().parse::<f64>(), lon.trim().parse::<f64>())
            {
                return Locator::Coordinates(Coordinates::new(latitude, longitude));
            }
        }

        Locator::Name(input.to_string())
    }
}

impl From<Coordinates> for Locator {
    fn from(coords: Coordinates) -> Self {
        Locator::Coordinates(coords)
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::Name(name) => f.write_str(name),
            Locator::Coordinates(coords) => f.write_str(&coords.to_locator()),
        }
    }
}

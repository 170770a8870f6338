use indexmap::IndexMap;

use crate::model::CityWeather;

pub const DEFAULT_CITIES: [&str; 6] = [
    "Toronto",
    "Halifax",
    "Vancouver",
    "Edmonton",
    "St. Catharines",
    "Niagara Falls",
];

/// Case- and whitespace-insensitive identity of a tracked city.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CityKey(String);

impl CityKey {
    pub fn new(name: &str) -> Self {
        Self(name.trim().to_lowercase())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrackedCity {
    /// Name as the user entered it; used as the lookup locator.
    pub name: String,
    /// Latest snapshot, if one has been fetched.
    pub weather: Option<CityWeather>,
}

/// User-curated, ordered set of cities with their latest snapshots.
///
/// Names and snapshots live in one entry per city, so adding a tracked name
/// again replaces its snapshot instead of appending a second one.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackedCities {
    cities: IndexMap<CityKey, TrackedCity>,
}

impl Default for TrackedCities {
    fn default() -> Self {
        Self::from_names(DEFAULT_CITIES)
    }
}

impl TrackedCities {
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut cities = IndexMap::new();
        for name in names {
            let name = name.as_ref().trim();
            if name.is_empty() {
                continue;
            }
            cities.entry(CityKey::new(name)).or_insert_with(|| TrackedCity {
                name: name.to_string(),
                weather: None,
            });
        }
        Self { cities }
    }

    /// Track `name` with a fresh snapshot. Returns `true` if the city was not
    /// tracked before; an existing entry keeps its position and gets the new
    /// snapshot.
    pub fn add(&mut self, name: &str, weather: CityWeather) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }

        match self.cities.get_mut(&CityKey::new(name)) {
            Some(city) => {
                city.weather = Some(weather);
                false
            }
            None => {
                self.cities.insert(
                    CityKey::new(name),
                    TrackedCity {
                        name: name.to_string(),
                        weather: Some(weather),
                    },
                );
                true
            }
        }
    }

    /// Replace the snapshot of an already tracked city. Returns `false` if
    /// the city is not tracked.
    pub fn set_snapshot(&mut self, name: &str, weather: CityWeather) -> bool {
        match self.cities.get_mut(&CityKey::new(name)) {
            Some(city) => {
                city.weather = Some(weather);
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<TrackedCity> {
        self.cities.shift_remove(&CityKey::new(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.cities.contains_key(&CityKey::new(name))
    }

    pub fn get(&self, name: &str) -> Option<&TrackedCity> {
        self.cities.get(&CityKey::new(name))
    }

    pub fn names(&self) -> Vec<String> {
        self.cities.values().map(|c| c.name.clone()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TrackedCity> {
        self.cities.values()
    }

    /// Snapshots in list order; cities without one are skipped.
    pub fn snapshots(&self) -> impl Iterator<Item = &CityWeather> {
        self.cities.values().filter_map(|c| c.weather.as_ref())
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }
}

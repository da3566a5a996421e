//! Location hierarchy navigator
//!
//! A strictly linear drill-down: zone → country → state → city → dashboard.
//! Each state carries exactly the selections made so far, so a deeper
//! selection cannot exist without its parents and re-selecting a level
//! drops everything beneath it.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::geo::{self, Place};
use crate::types::City;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    #[error("Cannot select {requested} before completing the {current} step")]
    StepNotReached { requested: Step, current: Step },

    #[error("Cannot jump forward to {requested} from {current}")]
    ForwardJump { requested: Step, current: Step },

    #[error("Selection for {0} must not be empty")]
    EmptySelection(Step),
}

/// Navigation steps in order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Zone,
    Country,
    State,
    City,
    Dashboard,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Zone => write!(f, "zone"),
            Step::Country => write!(f, "country"),
            Step::State => write!(f, "state"),
            Step::City => write!(f, "city"),
            Step::Dashboard => write!(f, "dashboard"),
        }
    }
}

/// A chosen zone, country or state
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Selected {
    pub id: String,
    pub name: String,
}

impl Selected {
    /// Resolve a raw value against the option list. Values that are not in
    /// the list are kept as-is; their children come from the default table.
    fn resolve(options: &[Place], value: &str) -> Self {
        match geo::find_place(options, value) {
            Some(place) => Self {
                id: place.id.to_string(),
                name: place.name.to_string(),
            },
            None => Self {
                id: value.to_string(),
                name: value.to_string(),
            },
        }
    }
}

/// A user selection at one level of the hierarchy
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "level", content = "value", rename_all = "snake_case")]
pub enum Selection {
    Zone(String),
    Country(String),
    State(String),
    City(City),
}

impl Selection {
    pub fn step(&self) -> Step {
        match self {
            Selection::Zone(_) => Step::Zone,
            Selection::Country(_) => Step::Country,
            Selection::State(_) => Step::State,
            Selection::City(_) => Step::City,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum NavState {
    Zone,
    Country {
        zone: Selected,
    },
    State {
        zone: Selected,
        country: Selected,
    },
    City {
        zone: Selected,
        country: Selected,
        state: Selected,
    },
    Dashboard {
        zone: Selected,
        country: Selected,
        state: Selected,
        city: City,
    },
}

/// Flattened view of the current selections
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct GeoSelection {
    pub zone: Option<Selected>,
    pub country: Option<Selected>,
    pub state: Option<Selected>,
    pub city: Option<City>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Breadcrumb {
    pub step: Step,
    pub label: String,
    /// Completed steps can be jumped back to
    pub reachable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigator {
    state: NavState,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator {
    pub fn new() -> Self {
        Self {
            state: NavState::Zone,
        }
    }

    pub fn step(&self) -> Step {
        match self.state {
            NavState::Zone => Step::Zone,
            NavState::Country { .. } => Step::Country,
            NavState::State { .. } => Step::State,
            NavState::City { .. } => Step::City,
            NavState::Dashboard { .. } => Step::Dashboard,
        }
    }

    pub fn selection(&self) -> GeoSelection {
        match &self.state {
            NavState::Zone => GeoSelection::default(),
            NavState::Country { zone } => GeoSelection {
                zone: Some(zone.clone()),
                ..Default::default()
            },
            NavState::State { zone, country } => GeoSelection {
                zone: Some(zone.clone()),
                country: Some(country.clone()),
                ..Default::default()
            },
            NavState::City {
                zone,
                country,
                state,
            } => GeoSelection {
                zone: Some(zone.clone()),
                country: Some(country.clone()),
                state: Some(state.clone()),
                city: None,
            },
            NavState::Dashboard {
                zone,
                country,
                state,
                city,
            } => GeoSelection {
                zone: Some(zone.clone()),
                country: Some(country.clone()),
                state: Some(state.clone()),
                city: Some(city.clone()),
            },
        }
    }

    /// The selected city, once the dashboard step is reached
    pub fn city(&self) -> Option<&City> {
        match &self.state {
            NavState::Dashboard { city, .. } => Some(city),
            _ => None,
        }
    }

    /// Apply a selection. Any level up to the current step may be chosen;
    /// the navigator then sits one step past that level with deeper
    /// selections cleared.
    pub fn select(&mut self, selection: Selection) -> Result<Step, NavigationError> {
        let requested = selection.step();
        let current = self.step();
        if requested > current {
            return Err(NavigationError::StepNotReached { requested, current });
        }

        let parents = self.selection();
        self.state = match selection {
            Selection::Zone(value) => NavState::Country {
                zone: Selected::resolve(geo::zones(), non_empty(&value, Step::Zone)?),
            },
            Selection::Country(value) => {
                let zone = required(parents.zone, requested, current)?;
                let options = geo::countries_for(&zone.id);
                NavState::State {
                    country: Selected::resolve(options, non_empty(&value, Step::Country)?),
                    zone,
                }
            }
            Selection::State(value) => {
                let zone = required(parents.zone, requested, current)?;
                let country = required(parents.country, requested, current)?;
                let options = geo::states_for(&country.id);
                NavState::City {
                    state: Selected::resolve(options, non_empty(&value, Step::State)?),
                    zone,
                    country,
                }
            }
            Selection::City(city) => {
                non_empty(&city.name, Step::City)?;
                NavState::Dashboard {
                    zone: required(parents.zone, requested, current)?,
                    country: required(parents.country, requested, current)?,
                    state: required(parents.state, requested, current)?,
                    city,
                }
            }
        };

        Ok(self.step())
    }

    /// Go back one step. Returns false at the first step.
    pub fn back(&mut self) -> bool {
        let previous = match std::mem::replace(&mut self.state, NavState::Zone) {
            NavState::Zone => {
                return false;
            }
            NavState::Country { .. } => NavState::Zone,
            NavState::State { zone, .. } => NavState::Country { zone },
            NavState::City { zone, country, .. } => NavState::State { zone, country },
            NavState::Dashboard {
                zone,
                country,
                state,
                ..
            } => NavState::City {
                zone,
                country,
                state,
            },
        };
        self.state = previous;
        true
    }

    /// Breadcrumb jump to an already-completed step (or the current one)
    pub fn jump_to(&mut self, target: Step) -> Result<(), NavigationError> {
        let current = self.step();
        if target > current {
            return Err(NavigationError::ForwardJump {
                requested: target,
                current,
            });
        }
        while self.step() > target {
            self.back();
        }
        Ok(())
    }

    pub fn breadcrumbs(&self) -> Vec<Breadcrumb> {
        let current = self.step();
        let selection = self.selection();
        let label = |s: Option<&Selected>, fallback: &str| {
            s.map(|s| s.name.clone())
                .unwrap_or_else(|| fallback.to_string())
        };

        [
            (Step::Zone, label(selection.zone.as_ref(), "Zone")),
            (Step::Country, label(selection.country.as_ref(), "Country")),
            (Step::State, label(selection.state.as_ref(), "State")),
            (
                Step::City,
                selection
                    .city
                    .as_ref()
                    .map(|c| c.name.clone())
                    .unwrap_or_else(|| "City".to_string()),
            ),
        ]
        .into_iter()
        .filter(|(step, _)| *step <= current)
        .map(|(step, label)| Breadcrumb {
            step,
            label,
            reachable: step < current,
        })
        .collect()
    }

    /// Options offered at the current step
    pub fn options(&self) -> StepOptions {
        match &self.state {
            NavState::Zone => StepOptions::Places(geo::zones().to_vec()),
            NavState::Country { zone } => StepOptions::Places(geo::countries_for(&zone.id).to_vec()),
            NavState::State { country, .. } => {
                StepOptions::Places(geo::states_for(&country.id).to_vec())
            }
            NavState::City { state, .. } => StepOptions::Cities(geo::cities_for(&state.id)),
            NavState::Dashboard { .. } => StepOptions::None,
        }
    }

    /// Look up a city of the selected state by name
    pub fn find_city(&self, name: &str) -> Option<City> {
        let state = match &self.state {
            NavState::City { state, .. } | NavState::Dashboard { state, .. } => state,
            _ => return None,
        };
        geo::cities_for(&state.id)
            .into_iter()
            .find(|c| c.name.eq_ignore_ascii_case(name.trim()))
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "kind", content = "items", rename_all = "snake_case")]
pub enum StepOptions {
    Places(Vec<Place>),
    Cities(Vec<City>),
    None,
}

fn non_empty(value: &str, step: Step) -> Result<&str, NavigationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(NavigationError::EmptySelection(step))
    } else {
        Ok(trimmed)
    }
}

fn required(
    parent: Option<Selected>,
    requested: Step,
    current: Step,
) -> Result<Selected, NavigationError> {
    parent.ok_or(NavigationError::StepNotReached { requested, current })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at_dashboard() -> Navigator {
        let mut nav = Navigator::new();
        nav.select(Selection::Zone("north_america".into())).unwrap();
        nav.select(Selection::Country("us".into())).unwrap();
        nav.select(Selection::State("us-ny".into())).unwrap();
        let city = nav.find_city("New York").unwrap();
        nav.select(Selection::City(city)).unwrap();
        nav
    }

    #[test]
    fn test_linear_progression() {
        let nav = at_dashboard();
        assert_eq!(nav.step(), Step::Dashboard);
        let selection = nav.selection();
        assert_eq!(selection.zone.unwrap().name, "North America");
        assert_eq!(selection.country.unwrap().name, "United States");
        assert_eq!(selection.state.unwrap().name, "New York");
        assert_eq!(selection.city.unwrap().name, "New York");
    }

    #[test]
    fn test_find_city_from_dashboard() {
        let nav = at_dashboard();
        let city = nav.find_city("new york").unwrap();
        assert!(city.coordinates.is_some());
        assert!(nav.find_city("Gotham").is_none());
    }

    #[test]
    fn test_new_zone_clears_deeper_levels() {
        let mut nav = at_dashboard();
        nav.select(Selection::Zone("europe".into())).unwrap();
        assert_eq!(nav.step(), Step::Country);
        let selection = nav.selection();
        assert_eq!(selection.zone.unwrap().id, "europe");
        assert!(selection.country.is_none());
        assert!(selection.state.is_none());
        assert!(selection.city.is_none());
    }

    #[test]
    fn test_cannot_skip_ahead() {
        let mut nav = Navigator::new();
        let err = nav.select(Selection::State("us-ny".into())).unwrap_err();
        assert_eq!(
            err,
            NavigationError::StepNotReached {
                requested: Step::State,
                current: Step::Zone
            }
        );
        assert_eq!(nav.step(), Step::Zone);
    }

    #[test]
    fn test_empty_selection_rejected() {
        let mut nav = Navigator::new();
        assert_eq!(
            nav.select(Selection::Zone("   ".into())),
            Err(NavigationError::EmptySelection(Step::Zone))
        );
    }

    #[test]
    fn test_back_steps_one_level() {
        let mut nav = at_dashboard();
        assert!(nav.back());
        assert_eq!(nav.step(), Step::City);
        assert!(nav.selection().city.is_none());
        assert_eq!(nav.selection().state.unwrap().id, "us-ny");

        assert!(nav.back());
        assert!(nav.back());
        assert!(nav.back());
        assert_eq!(nav.step(), Step::Zone);
        assert!(!nav.back());
    }

    #[test]
    fn test_breadcrumb_jumps() {
        let mut nav = at_dashboard();
        let crumbs = nav.breadcrumbs();
        assert_eq!(crumbs.len(), 4);
        assert!(crumbs.iter().all(|c| c.reachable));

        nav.jump_to(Step::Country).unwrap();
        assert_eq!(nav.step(), Step::Country);
        assert_eq!(nav.selection().zone.unwrap().id, "north_america");

        assert_eq!(
            nav.jump_to(Step::City),
            Err(NavigationError::ForwardJump {
                requested: Step::City,
                current: Step::Country
            })
        );
    }

    #[test]
    fn test_unknown_keys_use_default_options() {
        let mut nav = Navigator::new();
        nav.select(Selection::Zone("Atlantis".into())).unwrap();
        assert_eq!(nav.selection().zone.unwrap().name, "Atlantis");
        match nav.options() {
            StepOptions::Places(places) => assert_eq!(places[0].id, "us"),
            other => panic!("unexpected options {:?}", other),
        }
    }

    #[test]
    fn test_selection_json_shape() {
        let selection: Selection =
            serde_json::from_str(r#"{"level": "country", "value": "jp"}"#).unwrap();
        assert_eq!(selection, Selection::Country("jp".into()));
    }
}

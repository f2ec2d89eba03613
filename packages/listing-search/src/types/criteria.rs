//! User search criteria.
//!
//! A [`Criteria`] is created once per pipeline run from user input and
//! read-only thereafter. The free-text preference string is always
//! present; the structured fields are optional refinements extracted
//! from it (or supplied directly by the caller).

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Amenity vocabulary understood by the search URL builder.
///
/// These are the only amenity values the structured extraction step is
/// allowed to emit; anything else a user asks for stays in the
/// free-text preferences and is handled by the scorers instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum Amenity {
    #[serde(rename = "WiFi")]
    Wifi,
    Kitchen,
    Washer,
    Dryer,
    #[serde(rename = "Free Parking")]
    FreeParking,
    Gym,
    Pool,
}

impl Amenity {
    /// The site's numeric filter code for this amenity.
    pub fn filter_code(&self) -> u32 {
        match self {
            Amenity::Wifi => 4,
            Amenity::Kitchen => 8,
            Amenity::Washer => 33,
            Amenity::Dryer => 34,
            Amenity::FreeParking => 9,
            Amenity::Gym => 15,
            Amenity::Pool => 7,
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Amenity::Wifi => "WiFi",
            Amenity::Kitchen => "Kitchen",
            Amenity::Washer => "Washer",
            Amenity::Dryer => "Dryer",
            Amenity::FreeParking => "Free Parking",
            Amenity::Gym => "Gym",
            Amenity::Pool => "Pool",
        }
    }
}

/// Guest counts by category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct GuestCounts {
    #[serde(default)]
    pub adults: Option<u32>,
    #[serde(default)]
    pub children: Option<u32>,
    #[serde(default)]
    pub infants: Option<u32>,
    #[serde(default)]
    pub pets: Option<u32>,
}

impl GuestCounts {
    /// Total guest count across all categories.
    pub fn total(&self) -> u32 {
        self.adults.unwrap_or(0)
            + self.children.unwrap_or(0)
            + self.infants.unwrap_or(0)
            + self.pets.unwrap_or(0)
    }
}

/// Immutable record of user intent for one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Criteria {
    /// The user's preferences in their own words.
    pub preferences: String,

    /// Destination the user wants to stay in.
    #[serde(default)]
    pub location: Option<String>,

    /// Check-in date.
    #[serde(default)]
    pub check_in: Option<NaiveDate>,

    /// Check-out date.
    #[serde(default)]
    pub check_out: Option<NaiveDate>,

    /// Guest counts by category.
    #[serde(default)]
    pub guests: GuestCounts,

    /// Minimum nightly price.
    #[serde(default)]
    pub price_min: Option<u32>,

    /// Maximum nightly price.
    #[serde(default)]
    pub price_max: Option<u32>,

    /// Minimum number of bedrooms.
    #[serde(default)]
    pub bedrooms: Option<u32>,

    /// Minimum number of bathrooms.
    #[serde(default)]
    pub bathrooms: Option<u32>,

    /// Requested amenities, restricted to the fixed vocabulary.
    #[serde(default)]
    pub amenities: Vec<Amenity>,
}

impl Criteria {
    /// Create criteria with only a free-text preference string.
    pub fn new(preferences: impl Into<String>) -> Self {
        Self {
            preferences: preferences.into(),
            ..Default::default()
        }
    }

    /// Set the location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Set check-in and check-out dates.
    pub fn with_dates(mut self, check_in: NaiveDate, check_out: NaiveDate) -> Self {
        self.check_in = Some(check_in);
        self.check_out = Some(check_out);
        self
    }

    /// Set guest counts.
    pub fn with_guests(mut self, guests: GuestCounts) -> Self {
        self.guests = guests;
        self
    }

    /// Set the nightly price bounds.
    pub fn with_price_range(mut self, min: Option<u32>, max: Option<u32>) -> Self {
        self.price_min = min;
        self.price_max = max;
        self
    }

    /// Set the bedroom minimum.
    pub fn with_bedrooms(mut self, bedrooms: u32) -> Self {
        self.bedrooms = Some(bedrooms);
        self
    }

    /// Set the bathroom minimum.
    pub fn with_bathrooms(mut self, bathrooms: u32) -> Self {
        self.bathrooms = Some(bathrooms);
        self
    }

    /// Add an amenity.
    pub fn with_amenity(mut self, amenity: Amenity) -> Self {
        if !self.amenities.contains(&amenity) {
            self.amenities.push(amenity);
        }
        self
    }

    /// A compact one-line rendering for prompts and logs.
    pub fn describe(&self) -> String {
        let mut parts = vec![self.preferences.clone()];
        if let Some(location) = &self.location {
            parts.push(format!("location: {}", location));
        }
        if let (Some(check_in), Some(check_out)) = (self.check_in, self.check_out) {
            parts.push(format!("dates: {} to {}", check_in, check_out));
        }
        let guests = self.guests.total();
        if guests > 0 {
            parts.push(format!("guests: {}", guests));
        }
        match (self.price_min, self.price_max) {
            (Some(min), Some(max)) => parts.push(format!("price: ${}-${}/night", min, max)),
            (None, Some(max)) => parts.push(format!("price: up to ${}/night", max)),
            (Some(min), None) => parts.push(format!("price: at least ${}/night", min)),
            (None, None) => {}
        }
        if let Some(bedrooms) = self.bedrooms {
            parts.push(format!("bedrooms: {}+", bedrooms));
        }
        if let Some(bathrooms) = self.bathrooms {
            parts.push(format!("bathrooms: {}+", bathrooms));
        }
        if !self.amenities.is_empty() {
            let labels: Vec<_> = self.amenities.iter().map(|a| a.label()).collect();
            parts.push(format!("amenities: {}", labels.join(", ")));
        }
        parts.join("; ")
    }
}

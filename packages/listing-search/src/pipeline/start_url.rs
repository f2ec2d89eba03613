//! Search start-URL construction.
//!
//! Turns structured [`Criteria`] into the listing site's search URL.
//! Every structured field maps to a query parameter; absent fields are
//! simply omitted so the site applies no filter for them.

use crate::error::{Result, SearchError};
use crate::types::criteria::Criteria;

/// Build the search start URL for the given criteria.
///
/// Requires a location; the other fields are optional refinements.
pub fn search_url(criteria: &Criteria) -> Result<String> {
    let location = criteria
        .location
        .as_deref()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .ok_or_else(|| SearchError::InvalidCriteria {
            reason: "a location is required to build the search URL".to_string(),
        })?;

    let mut url = format!(
        "https://www.airbnb.com/s/{}/homes?tab_id=home_tab\
         &refinement_paths%5B%5D=%2Fhomes\
         &price_filter_input_type=2\
         &channel=EXPLORE\
         &date_picker_type=calendar",
        location.replace(' ', "-")
    );

    if let Some(check_in) = criteria.check_in {
        url.push_str(&format!("&checkin={}", check_in.format("%Y-%m-%d")));
    }
    if let Some(check_out) = criteria.check_out {
        url.push_str(&format!("&checkout={}", check_out.format("%Y-%m-%d")));
    }
    if let Some(adults) = criteria.guests.adults.filter(|n| *n > 0) {
        url.push_str(&format!("&adults={}", adults));
    }
    if let Some(children) = criteria.guests.children.filter(|n| *n > 0) {
        url.push_str(&format!("&children={}", children));
    }
    if let Some(infants) = criteria.guests.infants.filter(|n| *n > 0) {
        url.push_str(&format!("&infants={}", infants));
    }
    if let Some(pets) = criteria.guests.pets.filter(|n| *n > 0) {
        url.push_str(&format!("&pets={}", pets));
    }

    url.push_str("&source=structured_search_input_header");
    url.push_str("&search_type=filter_change");
    url.push_str("&search_mode=regular_search");

    if let Some(price_min) = criteria.price_min {
        url.push_str(&format!("&price_min={}", price_min));
    }
    if let Some(price_max) = criteria.price_max {
        url.push_str(&format!("&price_max={}", price_max));
    }
    if let Some(bedrooms) = criteria.bedrooms {
        url.push_str(&format!("&min_bedrooms={}", bedrooms));
    }
    if let Some(bathrooms) = criteria.bathrooms {
        url.push_str(&format!("&min_bathrooms={}", bathrooms));
    }
    for amenity in &criteria.amenities {
        url.push_str(&format!("&amenities%5B%5D={}", amenity.filter_code()));
    }
    if criteria.guests.pets.filter(|n| *n > 0).is_some() {
        url.push_str("&selected_filter_order%5B%5D=pets%3A1");
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::criteria::{Amenity, GuestCounts};
    use chrono::NaiveDate;

    #[test]
    fn location_is_required() {
        let err = search_url(&Criteria::new("anything")).unwrap_err();
        assert!(matches!(err, SearchError::InvalidCriteria { .. }));
    }

    #[test]
    fn minimal_criteria_builds_base_url() {
        let url = search_url(&Criteria::new("a place").with_location("Austin")).unwrap();
        assert!(url.starts_with("https://www.airbnb.com/s/Austin/homes?"));
        assert!(!url.contains("checkin="));
        assert!(!url.contains("price_min="));
    }

    #[test]
    fn spaces_in_location_become_dashes() {
        let url = search_url(&Criteria::new("x").with_location("New York")).unwrap();
        assert!(url.contains("/s/New-York/homes"));
    }

    #[test]
    fn full_criteria_emits_all_filters() {
        let criteria = Criteria::new("family trip")
            .with_location("Austin")
            .with_dates(
                NaiveDate::from_ymd_opt(2025, 12, 20).unwrap(),
                NaiveDate::from_ymd_opt(2025, 12, 27).unwrap(),
            )
            .with_guests(GuestCounts {
                adults: Some(2),
                children: Some(1),
                infants: None,
                pets: Some(1),
            })
            .with_price_range(Some(100), Some(300))
            .with_bedrooms(2)
            .with_bathrooms(1)
            .with_amenity(Amenity::Pool)
            .with_amenity(Amenity::Wifi);

        let url = search_url(&criteria).unwrap();
        assert!(url.contains("&checkin=2025-12-20"));
        assert!(url.contains("&checkout=2025-12-27"));
        assert!(url.contains("&adults=2"));
        assert!(url.contains("&children=1"));
        assert!(!url.contains("&infants="));
        assert!(url.contains("&pets=1"));
        assert!(url.contains("&price_min=100"));
        assert!(url.contains("&price_max=300"));
        assert!(url.contains("&min_bedrooms=2"));
        assert!(url.contains("&min_bathrooms=1"));
        assert!(url.contains("&amenities%5B%5D=7"));
        assert!(url.contains("&amenities%5B%5D=4"));
        assert!(url.contains("&selected_filter_order%5B%5D=pets%3A1"));
    }
}

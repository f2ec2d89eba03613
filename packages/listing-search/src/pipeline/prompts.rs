//! LLM prompts for the search pipeline.

/// System prompt for summarizing a listing page during the fan-out.
pub const SUMMARIZE_LISTING_PROMPT: &str = "Given the text of a short-term rental listing page, \
write a summary of the contents of the page, including all details about the listing such that \
the summary will be easily ingestible for a downstream AI to analyze in terms of matching user \
preferences.";

/// System prompt for the description scorer.
pub const SCORE_DESCRIPTION_PROMPT: &str = r#"You are a validation assistant. Given user criteria and a short-term rental listing, you must:

1. Evaluate how well the listing meets the given user criteria. Consider the user's preferences as a set of desired attributes, such as location, travel dates, the number of guests, price range, number of bedrooms and bathrooms, amenities (like a kitchen, pool, or WiFi), views (like ocean or garden views), and any additional details the user may have provided.

For example:
- Location: If the user wants a rental in Paris, then listings in Paris should score higher than those outside the city.
- Travel Dates: If the user has specific check-in and check-out dates, a listing available for those dates should score higher than one that is not.
- Number of Guests: If the user needs accommodation for four guests, a listing that comfortably fits four should score higher than one that only fits two.
- Price Range: If the user sets a minimum and maximum price per night, a listing within that range should score higher than one that is too expensive or significantly cheaper than expected.
- Bedrooms and Bathrooms: A listing that meets or exceeds the requested counts should score higher than one that does not.
- Amenities: A listing providing the requested amenities should score higher than one that lacks them.
- Views: If the user requests an ocean view, listings with actual ocean views should score higher.
- Additional Details: Consider extra preferences such as proximity to landmarks, pet-friendliness, or interior style.

Keep in mind that user criteria may be vague or broad. If the user says "affordable" without a price range, consider what might be reasonable in context. If the user says "close to the beach" and the listing is within walking distance, treat that as a positive match.

2. Assign a score from 1 to 5 (5 is best) and provide a brief justification.

User criteria:
{criteria}"#;

/// System prompt for the image scorer.
pub const SCORE_IMAGES_PROMPT: &str = r#"Your task is to score a short-term rental listing based on how well the images of the listing match the user's criteria.

User's criteria:
{criteria}

You will be provided the images. Assign a score from 1 to 5, 5 being the highest, and provide a brief justification."#;

/// Prompt for synthesizing a shortlisted entry's justification.
pub const SUMMARIZE_MATCH_PROMPT: &str = r#"A short-term rental listing was evaluated against a user's preferences by two independent reviewers, one reading the listing description and one looking at its photos. Combine their findings into one short paragraph explaining why this listing suits the user. Do not mention the reviewers or the scoring process.

User's preferences:
{criteria}

Description reviewer's notes:
{description_reasoning}

Photo reviewer's notes:
{image_reasoning}"#;

/// Prompt for extracting structured criteria from free text.
pub const EXTRACT_CRITERIA_PROMPT: &str = r#"Extract the relevant fields from the user's stay preferences. Do not invent fields that are not mentioned; leave them null. Keep the user's own wording in the preferences field, minimally modified.

Field notes:
- location: where the user wants to stay
- check_in / check_out: ISO dates (YYYY-MM-DD) when mentioned
- guests: adult/children/infant/pet counts
- price_min / price_max: nightly price bounds in whole dollars
- bedrooms / bathrooms: minimum counts
- amenities: only exact matches from ["WiFi", "Kitchen", "Washer", "Dryer", "Free Parking", "Gym", "Pool"]

Preferences:
{preferences}"#;

/// Prompt for the example-query convenience endpoint.
pub const EXAMPLE_QUERY_PROMPT: &str = "Write one short, realistic example of a user describing \
the short-term rental they are looking for: a location, travel dates, a nightly budget, guest \
counts, and one or two amenity wishes. Output only the example sentence or two, no preamble.";

/// Fill the criteria into the description-scorer prompt.
pub fn format_score_description_prompt(criteria: &str) -> String {
    SCORE_DESCRIPTION_PROMPT.replace("{criteria}", criteria)
}

/// Fill the criteria into the image-scorer prompt.
pub fn format_score_images_prompt(criteria: &str) -> String {
    SCORE_IMAGES_PROMPT.replace("{criteria}", criteria)
}

/// Fill criteria and reviewer notes into the justification prompt.
pub fn format_summarize_match_prompt(
    criteria: &str,
    description_reasoning: &str,
    image_reasoning: &str,
) -> String {
    SUMMARIZE_MATCH_PROMPT
        .replace("{criteria}", criteria)
        .replace("{description_reasoning}", description_reasoning)
        .replace("{image_reasoning}", image_reasoning)
}

/// Fill the user text into the criteria-extraction prompt.
pub fn format_extract_criteria_prompt(preferences: &str) -> String {
    EXTRACT_CRITERIA_PROMPT.replace("{preferences}", preferences)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholders_are_filled() {
        let prompt = format_score_description_prompt("2BR in Austin");
        assert!(prompt.contains("2BR in Austin"));
        assert!(!prompt.contains("{criteria}"));

        let prompt = format_summarize_match_prompt("c", "d", "i");
        assert!(!prompt.contains("{description_reasoning}"));
        assert!(!prompt.contains("{image_reasoning}"));
    }
}

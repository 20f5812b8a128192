/// Provider name constants to ensure consistency across the codebase.
/// These are the names accepted on the command line and in `config.toml`.
pub const PALMARIUM_API: &str = "palmarium";
pub const WINTERCIRCUS_API: &str = "wintercircus";
pub const KOMPASS_API: &str = "kompass";

// Venue names as rendered in the location column
pub const PALMARIUM_VENUE_NAME: &str = "Palmarium, Plantentuin";
pub const WINTERCIRCUS_VENUE_NAME: &str = "Club Wintercircus";
pub const KOMPASS_VENUE_NAME: &str = "Kompass Klub";

// Listing pages each provider starts from
pub const PALMARIUM_ENDPOINT: &str = "https://www.democrazy.be/projects/palmarium/";
pub const WINTERCIRCUS_ENDPOINT: &str = "https://www.clubwintercircus.be/";
pub const KOMPASS_ENDPOINT: &str = "https://kompassklub.com/event-list/";

/// Title used for Kompass detail pages without a heading
pub const KOMPASS_MISSING_TITLE: &str = "no title found";

pub const DEFAULT_USER_AGENT: &str = concat!("nachtleven/", env!("CARGO_PKG_VERSION"));

/// Get all supported provider names, in the order they are scraped by default
pub fn get_supported_apis() -> Vec<&'static str> {
    vec![PALMARIUM_API, WINTERCIRCUS_API, KOMPASS_API]
}

/// Venue name for a provider, if the provider is known
pub fn venue_name_for(api_name: &str) -> Option<&'static str> {
    match api_name {
        PALMARIUM_API => Some(PALMARIUM_VENUE_NAME),
        WINTERCIRCUS_API => Some(WINTERCIRCUS_VENUE_NAME),
        KOMPASS_API => Some(KOMPASS_VENUE_NAME),
        _ => None,
    }
}

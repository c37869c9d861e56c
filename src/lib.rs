use serde::{Deserialize, Serialize};

pub mod cli;
pub mod description;
pub mod scrape;
pub mod week;

pub const NO_TITLE: &str = "No title found";
pub const NO_DATE: &str = "No date found";
pub const NO_TIME: &str = "No time found";
pub const NO_LOCATION: &str = "No location found";
pub const NO_LOCATION_LINK: &str = "No location link found";
pub const NO_DESCRIPTION: &str = "No description found";

/// One scraped calendar entry. Fields that could not be extracted hold a
/// sentinel string instead of being absent, so serialized records always
/// carry all seven keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub url: String,
    pub title: String,
    pub date: String,
    pub time: String,
    pub location: String,
    pub location_link: String,
    pub description: String,
}

impl Event {
    /// Placeholder record for an event page that could not be retrieved.
    pub fn failed(url: String) -> Self {
        Self {
            url,
            title: "Failed to scrape title".into(),
            date: "Failed to scrape date".into(),
            time: "Failed to scrape time".into(),
            location: "Failed to scrape location".into(),
            location_link: "Failed to scrape location link".into(),
            description: "Failed to scrape description".into(),
        }
    }
}

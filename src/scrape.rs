use std::fmt::Display;

use log::debug;
use once_cell::sync::Lazy;
use reqwest::blocking::Client;
use scraper::{Html, Selector};
use url::Url;

use crate::description::{extract_description, text_content};
use crate::{Event, NO_DATE, NO_LOCATION, NO_LOCATION_LINK, NO_TIME, NO_TITLE};

macro_rules! selector {
    ($query:expr) => {{
        static SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse($query).unwrap());
        &SELECTOR
    }};
}

pub const CALENDAR_URL: &str = "https://www.santamonica.gov/events?category=4egeeekbnhfx1xw1c1jd0jtvmv&viewMode=month&calendarView=true&dateRange=20250801-20250831";

const BASE_URL: &str = "https://www.santamonica.gov";

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

pub struct EventScraper {
    client: Client,
}

impl EventScraper {
    pub fn new() -> reqwest::Result<Self> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { client })
    }

    /// Fetches the calendar listing and every linked event page in discovery
    /// order. A failed listing fetch aborts; a failed event page becomes a
    /// sentinel-filled record and the batch continues.
    pub fn scrape(&self) -> reqwest::Result<Vec<Event>> {
        let listing = self.get(CALENDAR_URL)?;
        let links = collect_event_links(&Html::parse_document(&listing));
        println!("Found {} event links", links.len());

        Ok(scrape_links(&links, |url| self.get(url)))
    }

    fn get(&self, url: &str) -> reqwest::Result<String> {
        debug!("GET {url}");
        self.client.get(url).send()?.error_for_status()?.text()
    }
}

/// Visits each link with `fetch`, turning bodies into extracted events and
/// failures into sentinel-filled records. One bad page never stops the batch.
fn scrape_links<E: Display>(
    links: &[String],
    mut fetch: impl FnMut(&str) -> Result<String, E>,
) -> Vec<Event> {
    let mut events = Vec::with_capacity(links.len());

    for (idx, url) in links.iter().enumerate() {
        println!("Scraping event {}/{}", idx + 1, links.len());

        match fetch(url) {
            Ok(body) => {
                let event = extract_event(&Html::parse_document(&body), url);
                if idx == 0 {
                    println!("First event description: {}", event.description);
                }
                events.push(event);
            }
            Err(err) => {
                println!("Error scraping {url}: {err}");
                events.push(Event::failed(url.clone()));
            }
        }
    }

    events
}

/// Absolute event page URLs under the calendar's day cells, first-seen order,
/// deduplicated.
pub fn collect_event_links(doc: &Html) -> Vec<String> {
    static BASE: Lazy<Url> = Lazy::new(|| Url::parse(BASE_URL).unwrap());

    let mut links = Vec::new();
    for anchor in doc.select(selector!("div.calendar-day-events > a[href]")) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        let Ok(absolute) = BASE.join(href) else {
            continue;
        };

        let absolute = absolute.to_string();
        if !links.contains(&absolute) {
            links.push(absolute);
        }
    }

    links
}

/// Pulls the structured fields out of one event page. Date and time sit in
/// two fixed-position value cells of the first row column; location fields
/// sit in the second. Missing pieces become their sentinel strings.
pub fn extract_event(doc: &Html, url: &str) -> Event {
    let title = doc
        .select(selector!("h1.title"))
        .next()
        .map(text_content)
        .unwrap_or_else(|| NO_TITLE.into());

    let date = doc
        .select(selector!("div.row > div:nth-child(1) > div > div > div:nth-child(1)"))
        .next()
        .map(text_content)
        .unwrap_or_else(|| NO_DATE.into());

    let time = doc
        .select(selector!("div.row > div:nth-child(1) > div > div > div:nth-child(2)"))
        .next()
        .map(text_content)
        .unwrap_or_else(|| NO_TIME.into());

    let location_anchor = doc
        .select(selector!("div.row > div:nth-child(2) > div > div > div:nth-child(1) > a"))
        .next();

    let location_link = location_anchor
        .and_then(|anchor| anchor.value().attr("href"))
        .map(str::to_string)
        .unwrap_or_else(|| NO_LOCATION_LINK.into());

    let mut location_name = location_anchor.map(text_content).unwrap_or_default();

    // Virtual events carry no anchor; fall back to the cell's full text.
    if location_name.is_empty() {
        if let Some(cell) = doc
            .select(selector!("div.row > div:nth-child(2) > div > div > div:nth-child(1)"))
            .next()
        {
            location_name = text_content(cell);
        }
    }

    let detail_one = doc
        .select(selector!("div.row > div:nth-child(2) > div > div > div:nth-child(2)"))
        .next()
        .map(text_content)
        .unwrap_or_default();

    let detail_two = doc
        .select(selector!("div.row > div:nth-child(2) > div > div > div:nth-child(3)"))
        .next()
        .map(text_content)
        .unwrap_or_default();

    let location_parts: Vec<String> = [location_name, detail_one, detail_two]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect();

    let location = if location_parts.is_empty() {
        NO_LOCATION.to_string()
    } else {
        location_parts.join(", ")
    };

    Event {
        url: url.to_string(),
        title,
        date,
        time,
        location,
        location_link,
        description: extract_description(doc),
    }
}

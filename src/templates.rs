use askama::Template;

use crate::common::error::Result;
use crate::common::types::Event;

#[derive(Template)]
#[template(path = "events.html")]
pub struct EventsPageTemplate {
    pub events: Vec<Event>,
}

/// Render the combined events page
pub fn render_events_page(events: Vec<Event>) -> Result<String> {
    Ok(EventsPageTemplate { events }.render()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::types::EventDate;

    #[test]
    fn test_render_lists_events_with_formatted_dates() {
        let html = render_events_page(vec![Event {
            title: "Jazz <live> & more".to_string(),
            description: "Palmen en saxofoons".to_string(),
            date: EventDate::new(5, 3, 2025),
            location: "Palmarium, Plantentuin".to_string(),
        }])
        .unwrap();

        assert!(html.contains("05/03/2025"));
        assert!(html.contains("Jazz &lt;live&gt; &amp; more"));
        assert!(html.contains("Palmen en saxofoons"));
        assert!(html.contains("Palmarium, Plantentuin"));
    }

    #[test]
    fn test_render_empty_page() {
        let html = render_events_page(Vec::new()).unwrap();
        assert!(html.contains("No events found"));
    }
}

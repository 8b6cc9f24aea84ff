use chrono::{DateTime, Local};
use ratatui::widgets::ListState;

use crate::render::Container;
use crate::source::PostRecord;

pub struct App {
    /// Rendered posts; fully replaced on every refresh.
    pub container: Container,
    /// List selection state for scrolling.
    pub list_state: ListState,
    /// Whether the user has requested to quit.
    pub quit: bool,
    /// Set by input; the main loop forwards it to the poller and clears it.
    pub refresh_requested: bool,
    /// Last refresh status message.
    pub status: String,
}

impl App {
    pub fn new() -> Self {
        Self {
            container: Container::new(),
            list_state: ListState::default(),
            quit: false,
            refresh_requested: false,
            status: "Loading…".into(),
        }
    }

    /// Render a completed refresh into the container.
    pub fn show_posts(&mut self, posts: &[PostRecord], fetched_at: DateTime<Local>) {
        self.container.render_posts(posts);
        self.status = format!("Updated {}", fetched_at.format("%H:%M:%S"));

        let count = self.container.card_count();
        match self.list_state.selected() {
            _ if count == 0 => self.list_state.select(None),
            Some(i) if i >= count => self.list_state.select(Some(count - 1)),
            _ => {}
        }
    }

    pub fn request_refresh(&mut self) {
        self.refresh_requested = true;
        self.status = "Refreshing…".into();
    }

    // -- navigation ----------------------------------------------------------

    pub fn select_next(&mut self) {
        let count = self.container.card_count();
        if count == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => (i + 1).min(count - 1),
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn select_previous(&mut self) {
        if self.container.card_count() == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => i.saturating_sub(1),
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn select_first(&mut self) {
        if self.container.card_count() > 0 {
            self.list_state.select(Some(0));
        }
    }

    pub fn select_last(&mut self) {
        let count = self.container.card_count();
        if count > 0 {
            self.list_state.select(Some(count - 1));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn make_post(title: &str) -> PostRecord {
        PostRecord {
            title: Some(title.to_string()),
            ..PostRecord::default()
        }
    }

    fn sample_posts() -> Vec<PostRecord> {
        vec![make_post("First"), make_post("Second"), make_post("Third")]
    }

    fn at_noon() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    // -- construction --------------------------------------------------------

    #[test]
    fn new_app_starts_empty() {
        let app = App::new();
        assert!(app.container.nodes().is_empty());
        assert!(!app.quit);
        assert!(!app.refresh_requested);
        assert!(app.list_state.selected().is_none());
    }

    // -- show_posts ----------------------------------------------------------

    #[test]
    fn show_posts_renders_and_stamps_status() {
        let mut app = App::new();
        app.show_posts(&sample_posts(), at_noon());

        assert_eq!(app.container.card_count(), 3);
        assert_eq!(app.status, "Updated 12:00:00");
    }

    #[test]
    fn show_posts_replaces_previous_posts() {
        let mut app = App::new();
        app.show_posts(&sample_posts(), at_noon());
        app.show_posts(&[make_post("Only")], at_noon());

        let titles: Vec<_> = app.container.cards().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, ["Only"]);
    }

    #[test]
    fn show_posts_clamps_selection_to_new_length() {
        let mut app = App::new();
        app.show_posts(&sample_posts(), at_noon());
        app.select_last();

        app.show_posts(&[make_post("Only")], at_noon());
        assert_eq!(app.list_state.selected(), Some(0));
    }

    #[test]
    fn show_empty_posts_clears_selection() {
        let mut app = App::new();
        app.show_posts(&sample_posts(), at_noon());
        app.select_first();

        app.show_posts(&[], at_noon());
        assert!(app.list_state.selected().is_none());
    }

    #[test]
    fn request_refresh_sets_flag() {
        let mut app = App::new();
        app.request_refresh();
        assert!(app.refresh_requested);
        assert_eq!(app.status, "Refreshing…");
    }

    // -- navigation ----------------------------------------------------------

    #[test]
    fn navigation_on_empty_is_noop() {
        let mut app = App::new();
        app.show_posts(&[], at_noon());

        app.select_next();
        app.select_previous();
        app.select_first();
        app.select_last();
        assert!(app.list_state.selected().is_none());
    }

    #[test]
    fn select_next_starts_at_zero_then_advances() {
        let mut app = App::new();
        app.show_posts(&sample_posts(), at_noon());

        app.select_next();
        assert_eq!(app.list_state.selected(), Some(0));

        app.select_next();
        assert_eq!(app.list_state.selected(), Some(1));

        app.select_next();
        assert_eq!(app.list_state.selected(), Some(2));
    }

    #[test]
    fn select_next_clamps_at_last_card() {
        let mut app = App::new();
        app.show_posts(&sample_posts(), at_noon());

        app.select_last();
        app.select_next();
        assert_eq!(app.list_state.selected(), Some(2));
    }

    #[test]
    fn select_previous_clamps_at_zero() {
        let mut app = App::new();
        app.show_posts(&sample_posts(), at_noon());

        app.select_first();
        app.select_previous();
        assert_eq!(app.list_state.selected(), Some(0));
    }

    #[test]
    fn select_previous_moves_up() {
        let mut app = App::new();
        app.show_posts(&sample_posts(), at_noon());

        app.select_last(); // index 2
        app.select_previous();
        assert_eq!(app.list_state.selected(), Some(1));
    }
}

//! State of the synopsis view

use auralis_core::AiInsight;

/// What the insight view shows
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InsightView {
    pub open: bool,
    pub loading: bool,
    pub result: Option<AiInsight>,
    /// User-facing failure message
    pub error: Option<String>,
}

impl InsightView {
    /// Opens the view in loading state with no previous content
    pub(crate) fn start(&mut self) {
        self.open = true;
        self.loading = true;
        self.result = None;
        self.error = None;
    }

    pub(crate) fn close(&mut self) {
        self.open = false;
        self.result = None;
        self.error = None;
    }
}

/// A started synopsis request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsightTicket {
    /// Only the ticket with the latest sequence number is applied
    pub seq: u64,
    pub title: String,
    pub author: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_clears_previous_content() {
        let mut view = InsightView {
            error: Some("old".to_string()),
            result: Some(AiInsight::default()),
            ..InsightView::default()
        };
        view.start();
        assert!(view.open && view.loading);
        assert!(view.result.is_none() && view.error.is_none());
    }

    #[test]
    fn test_close_discards_content() {
        let mut view = InsightView::default();
        view.start();
        view.result = Some(AiInsight::default());
        view.close();
        assert!(!view.open);
        assert!(view.result.is_none());
    }
}

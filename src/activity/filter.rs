// Filter stage.
// Narrows an event list by type and repository, then truncates to a limit.

use std::collections::HashSet;

use crate::github::Event;

/// Allowed event types and repositories. An empty set allows everything.
#[derive(Debug, Clone, Default)]
pub struct FilterSpec {
    pub types: HashSet<String>,
    pub repos: HashSet<String>,
}

impl FilterSpec {
    pub fn new<T, R>(types: T, repos: R) -> Self
    where
        T: IntoIterator<Item = String>,
        R: IntoIterator<Item = String>,
    {
        Self {
            types: types.into_iter().collect(),
            repos: repos.into_iter().collect(),
        }
    }

    /// Whether `event` passes both the type and the repository predicate.
    pub fn matches(&self, event: &Event) -> bool {
        let type_match = self.types.is_empty() || self.types.contains(&event.event_type);
        let repo_match = self.repos.is_empty() || self.repos.contains(&event.repo.name);
        type_match && repo_match
    }
}

/// Keep the events matching `spec`, in their original order.
pub fn filter_events(events: Vec<Event>, spec: &FilterSpec) -> Vec<Event> {
    events.into_iter().filter(|e| spec.matches(e)).collect()
}

/// Filter, then keep the first `limit` matches.
pub fn select(events: Vec<Event>, spec: &FilterSpec, limit: usize) -> Vec<Event> {
    let mut selected = filter_events(events, spec);
    selected.truncate(limit);
    selected
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn feed() -> Vec<Event> {
        vec![
            Event::new("PushEvent", "a/b").with_message("one"),
            Event::new("IssuesEvent", "a/b").with_message("two"),
            Event::new("PushEvent", "c/d").with_message("three"),
            Event::new("WatchEvent", "c/d").with_message("four"),
            Event::new("PushEvent", "a/b").with_message("five"),
        ]
    }

    fn messages(events: &[Event]) -> Vec<&str> {
        events.iter().map(|e| e.message_text()).collect()
    }

    #[test]
    fn test_empty_spec_keeps_everything() {
        let out = filter_events(feed(), &FilterSpec::default());
        assert_eq!(out, feed());
    }

    #[test]
    fn test_filter_by_type_preserves_order() {
        let spec = FilterSpec::new(strings(&["PushEvent"]), vec![]);
        let out = filter_events(feed(), &spec);
        assert_eq!(messages(&out), vec!["one", "three", "five"]);
    }

    #[test]
    fn test_filter_by_repo() {
        let spec = FilterSpec::new(vec![], strings(&["c/d"]));
        let out = filter_events(feed(), &spec);
        assert_eq!(messages(&out), vec!["three", "four"]);
    }

    #[test]
    fn test_filter_by_type_and_repo() {
        let spec = FilterSpec::new(strings(&["PushEvent", "WatchEvent"]), strings(&["c/d"]));
        let out = filter_events(feed(), &spec);
        assert_eq!(messages(&out), vec!["three", "four"]);
    }

    #[test]
    fn test_no_matches() {
        let spec = FilterSpec::new(strings(&["ForkEvent"]), vec![]);
        assert!(filter_events(feed(), &spec).is_empty());
    }

    #[test]
    fn test_output_is_exactly_the_matching_subsequence() {
        let specs = [
            FilterSpec::default(),
            FilterSpec::new(strings(&["PushEvent"]), vec![]),
            FilterSpec::new(vec![], strings(&["a/b"])),
            FilterSpec::new(strings(&["IssuesEvent", "WatchEvent"]), strings(&["a/b", "c/d"])),
            FilterSpec::new(strings(&["Nope"]), strings(&["a/b"])),
        ];

        for spec in &specs {
            let out = filter_events(feed(), spec);
            assert!(out.iter().all(|e| spec.matches(e)));

            let expected: Vec<Event> = feed().into_iter().filter(|e| spec.matches(e)).collect();
            assert_eq!(out, expected);
        }
    }

    #[test]
    fn test_limit_applies_after_filter() {
        let spec = FilterSpec::new(strings(&["PushEvent"]), vec![]);
        let out = select(feed(), &spec, 2);
        assert_eq!(messages(&out), vec!["one", "three"]);
    }

    #[test]
    fn test_limit_never_exceeded() {
        for limit in 0..8 {
            let out = select(feed(), &FilterSpec::default(), limit);
            assert_eq!(out.len(), limit.min(feed().len()));
        }
    }
}

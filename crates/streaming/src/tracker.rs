use std::collections::BTreeMap;

use crate::request::Request;

#[derive(Debug, Clone)]
struct InFlight<T> {
    tag: T,
    url: String,
}

/// What to do with a completed fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Issued for the state that is still current.
    Apply { url: String },
    /// The state moved on while the fetch was in flight; drop the result.
    Stale { url: String },
    /// Never issued here, or already resolved.
    Unknown,
}

/// Guards fire-and-forget fetches against stale application.
///
/// Every fetch is tagged with the state it was issued for. Nothing is ever
/// cancelled: on completion the tag is compared with the caller's current
/// state and the result is applied only on a match.
#[derive(Debug)]
pub struct FetchTracker<T> {
    next_request: u64,
    in_flight: BTreeMap<Request, InFlight<T>>,
}

impl<T> Default for FetchTracker<T> {
    fn default() -> Self {
        Self {
            next_request: 1,
            in_flight: BTreeMap::new(),
        }
    }
}

impl<T: PartialEq> FetchTracker<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&mut self, tag: T, url: impl Into<String>) -> Request {
        let req = Request(self.next_request);
        self.next_request += 1;
        self.in_flight.insert(
            req,
            InFlight {
                tag,
                url: url.into(),
            },
        );
        req
    }

    /// Consumes the in-flight record of `req` and compares its tag.
    pub fn resolve(&mut self, req: Request, current: &T) -> Resolution {
        match self.in_flight.remove(&req) {
            Some(f) if f.tag == *current => Resolution::Apply { url: f.url },
            Some(f) => Resolution::Stale { url: f.url },
            None => Resolution::Unknown,
        }
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }
}

#[cfg(test)]
mod tests {
    use super::{FetchTracker, Resolution};

    #[test]
    fn applies_only_when_tag_still_current() {
        let mut t = FetchTracker::new();
        let a = t.issue(vec!["31"], "kab.geojson");
        let b = t.issue(vec!["32"], "kab.geojson");
        assert_eq!(t.in_flight(), 2);

        let current = vec!["32"];
        assert_eq!(
            t.resolve(a, &current),
            Resolution::Stale {
                url: "kab.geojson".into()
            }
        );
        assert_eq!(
            t.resolve(b, &current),
            Resolution::Apply {
                url: "kab.geojson".into()
            }
        );
        assert_eq!(t.in_flight(), 0);
    }

    #[test]
    fn resolving_twice_is_unknown() {
        let mut t = FetchTracker::new();
        let a = t.issue(0u8, "x");
        assert!(matches!(t.resolve(a, &0), Resolution::Apply { .. }));
        assert_eq!(t.resolve(a, &0), Resolution::Unknown);
    }

    #[test]
    fn request_ids_increase() {
        let mut t = FetchTracker::new();
        let a = t.issue((), "a");
        let b = t.issue((), "b");
        assert!(b > a);
    }
}

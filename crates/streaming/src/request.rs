/// Identifies one issued fetch in a deterministic, stable way.
///
/// Ids are handed out in increasing order by a [`crate::FetchTracker`] and
/// never reused within it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Request(pub u64);

impl std::fmt::Display for Request {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "req#{}", self.0)
    }
}

//! Outcome of a gateway lookup that never fails outward.

/// A value produced by a gateway, tagged with where it came from.
///
/// Gateways hide every upstream failure behind a documented fallback value. This enum keeps
/// the distinction visible to callers (and tests) that need to know whether they are
/// looking at real data.
#[derive(Debug, Clone, PartialEq)]
pub enum Fetched<T> {
    /// The upstream service answered and the payload decoded.
    Live(T),
    /// The upstream call failed, timed out or returned garbage; this is the fallback value.
    Fallback(T),
}

impl<T> Fetched<T> {
    pub fn is_fallback(&self) -> bool {
        matches!(self, Fetched::Fallback(_))
    }

    pub fn value(&self) -> &T {
        match self {
            Fetched::Live(value) | Fetched::Fallback(value) => value,
        }
    }

    pub fn into_inner(self) -> T {
        match self {
            Fetched::Live(value) | Fetched::Fallback(value) => value,
        }
    }
}

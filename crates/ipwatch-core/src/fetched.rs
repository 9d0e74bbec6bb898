use crate::error::FetchFailure;

/// The outcome of a monitoring wrapper call.
///
/// Always carries a structurally valid payload. `Fallback` additionally
/// carries the failure that caused the substitution, so the caller decides
/// whether to render it quietly, flag it, or treat it as an error.
#[derive(Debug, Clone, PartialEq)]
pub enum Fetched<T> {
    /// A 2xx backend response.
    Live(T),
    /// Synthesized locally because the fetch failed.
    Fallback { data: T, failure: FetchFailure },
}

impl<T> Fetched<T> {
    pub fn data(&self) -> &T {
        match self {
            Self::Live(data) | Self::Fallback { data, .. } => data,
        }
    }

    /// The payload, regardless of where it came from.
    pub fn into_inner(self) -> T {
        match self {
            Self::Live(data) | Self::Fallback { data, .. } => data,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }

    pub fn failure(&self) -> Option<&FetchFailure> {
        match self {
            Self::Live(_) => None,
            Self::Fallback { failure, .. } => Some(failure),
        }
    }

    /// Live data, or the failure. Discards the fallback payload.
    pub fn live(self) -> Result<T, FetchFailure> {
        match self {
            Self::Live(data) => Ok(data),
            Self::Fallback { failure, .. } => Err(failure),
        }
    }

}

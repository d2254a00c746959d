use std::fmt;

/// Why an external sample could not be taken.
///
/// None of these are errors: they are expected transient states and the
/// caller retries on a later event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Unavailable {
    /// The external data source is not loaded yet.
    NotLoaded,
    /// The UI surface that carries the value is not visible.
    NotVisible,
    /// The surface is visible but no readable digit content was found.
    NoReadableDigits,
}

impl fmt::Display for Unavailable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unavailable::NotLoaded => write!(f, "source data not loaded"),
            Unavailable::NotVisible => write!(f, "surface not visible"),
            Unavailable::NoReadableDigits => write!(f, "no readable digit content"),
        }
    }
}

/// Result of one read from an external sampler: a complete value or a typed
/// "not available". Never partial.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Sample<T> {
    Available(T),
    Unavailable(Unavailable),
}

impl<T> Sample<T> {
    pub fn is_available(&self) -> bool {
        matches!(self, Sample::Available(_))
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Sample::Available(v) => Some(v),
            Sample::Unavailable(_) => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Sample<U> {
        match self {
            Sample::Available(v) => Sample::Available(f(v)),
            Sample::Unavailable(why) => Sample::Unavailable(why),
        }
    }
}

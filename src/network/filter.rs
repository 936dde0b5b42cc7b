//! Include/exclude filtering of interfaces by name.
//!
//! [`NameRegexFilter`] is a plain matcher. [`FilterChain`] turns matchers
//! into a verdict: an interface is dropped if any exclude matches, and
//! otherwise kept if it matches some include (or there are no includes).
//! [`FilteredFetcher`] wraps a fetcher so the resolver only ever sees the
//! interfaces that survive the chain; address selection runs afterwards.

use regex::Regex;

use super::{FetchError, InterfaceFetcher, InterfaceSnapshot};

/// Predicate over interfaces.
pub trait InterfaceFilter: Send + Sync {
    /// Returns `true` if the interface matches this filter.
    fn matches(&self, interface: &InterfaceSnapshot) -> bool;
}

/// Excludes are checked first and always win over includes.
///
/// # Examples
///
/// ```
/// use show_my_ip::network::filter::{FilterChain, InterfaceFilter, NameRegexFilter};
/// use show_my_ip::network::InterfaceSnapshot;
///
/// let chain = FilterChain::new()
///     .exclude(NameRegexFilter::new("^docker").unwrap())
///     .include(NameRegexFilter::new("^(eth|wlan)").unwrap());
///
/// assert!(chain.matches(&InterfaceSnapshot::new("wlan0", vec![])));
/// assert!(!chain.matches(&InterfaceSnapshot::new("docker0", vec![])));
/// assert!(!chain.matches(&InterfaceSnapshot::new("tun0", vec![])));
/// ```
#[derive(Default)]
pub struct FilterChain {
    includes: Vec<Box<dyn InterfaceFilter>>,
    excludes: Vec<Box<dyn InterfaceFilter>>,
}

impl FilterChain {
    /// An empty chain keeps every interface.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an include; any one matching include is enough.
    #[must_use]
    pub fn include<F: InterfaceFilter + 'static>(mut self, filter: F) -> Self {
        self.includes.push(Box::new(filter));
        self
    }

    /// Adds an exclude.
    #[must_use]
    pub fn exclude<F: InterfaceFilter + 'static>(mut self, filter: F) -> Self {
        self.excludes.push(Box::new(filter));
        self
    }

    #[must_use]
    pub fn include_count(&self) -> usize {
        self.includes.len()
    }

    #[must_use]
    pub fn exclude_count(&self) -> usize {
        self.excludes.len()
    }

    /// True when the chain keeps everything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.includes.is_empty() && self.excludes.is_empty()
    }
}

impl InterfaceFilter for FilterChain {
    fn matches(&self, interface: &InterfaceSnapshot) -> bool {
        if self.excludes.iter().any(|f| f.matches(interface)) {
            return false;
        }

        self.includes.is_empty() || self.includes.iter().any(|f| f.matches(interface))
    }
}

impl std::fmt::Debug for FilterChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterChain")
            .field("include_count", &self.includes.len())
            .field("exclude_count", &self.excludes.len())
            .finish()
    }
}

/// Matches interfaces whose name contains a match for `pattern`.
#[derive(Debug)]
pub struct NameRegexFilter {
    pattern: Regex,
}

impl NameRegexFilter {
    /// # Errors
    ///
    /// Fails if `pattern` is not a valid regex.
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
        })
    }

    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Regex is not a const type
    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }
}

impl InterfaceFilter for NameRegexFilter {
    fn matches(&self, interface: &InterfaceSnapshot) -> bool {
        self.pattern.is_match(&interface.name)
    }
}

/// Fetcher that drops interfaces rejected by `filter`, keeping the
/// enumeration order of the rest.
#[derive(Debug)]
pub struct FilteredFetcher<F, A> {
    inner: F,
    filter: A,
}

impl<F, A> FilteredFetcher<F, A> {
    #[must_use]
    pub const fn new(inner: F, filter: A) -> Self {
        Self { inner, filter }
    }

    /// Unfiltered fetcher.
    pub const fn inner(&self) -> &F {
        &self.inner
    }

    pub const fn filter(&self) -> &A {
        &self.filter
    }
}

impl<F: InterfaceFetcher, A: InterfaceFilter> InterfaceFetcher for FilteredFetcher<F, A> {
    fn fetch(&self) -> Result<Vec<InterfaceSnapshot>, FetchError> {
        let snapshots = self.inner.fetch()?;
        Ok(snapshots
            .into_iter()
            .filter(|interface| self.filter.matches(interface))
            .collect())
    }
}

impl<T: InterfaceFilter + ?Sized> InterfaceFilter for &T {
    fn matches(&self, interface: &InterfaceSnapshot) -> bool {
        (*self).matches(interface)
    }
}

impl InterfaceFilter for Box<dyn InterfaceFilter> {
    fn matches(&self, interface: &InterfaceSnapshot) -> bool {
        self.as_ref().matches(interface)
    }
}

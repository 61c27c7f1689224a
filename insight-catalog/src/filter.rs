//! Card catalog filters.
//!
//! A [`CardFilter`] is a plain configuration object. The database layer turns
//! it into a `WHERE` clause; [`CardFilter::matches`] evaluates the same
//! predicates in memory.

use crate::types::{Card, CardType, Region, ValueError, fold_case};

/// Comparison operator for numeric card attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comparator {
    Equal,
    Greater,
    Less,
}

impl Comparator {
    pub fn all() -> &'static [Comparator] {
        &[Self::Equal, Self::Greater, Self::Less]
    }

    /// Operator symbol, also valid SQL.
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Equal => "=",
            Self::Greater => ">",
            Self::Less => "<",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Equal => "equal to",
            Self::Greater => "greater than",
            Self::Less => "lower than",
        }
    }

    pub fn compare(&self, lhs: i64, rhs: i64) -> bool {
        match self {
            Self::Equal => lhs == rhs,
            Self::Greater => lhs > rhs,
            Self::Less => lhs < rhs,
        }
    }
}

/// A single numeric predicate such as `power > 2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NumericCondition {
    pub comparator: Comparator,
    pub value: i64,
}

impl NumericCondition {
    pub fn new(comparator: Comparator, value: i64) -> Self {
        Self { comparator, value }
    }

    pub fn matches(&self, attribute: i64) -> bool {
        self.comparator.compare(attribute, self.value)
    }
}

impl std::fmt::Display for NumericCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.comparator.symbol(), self.value)
    }
}

impl std::str::FromStr for NumericCondition {
    type Err = ValueError;

    /// Parses `=3`, `>2`, `< 5`. A bare number means equality.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (comparator, rest) = match trimmed.chars().next() {
            Some('=') => (Comparator::Equal, &trimmed[1..]),
            Some('>') => (Comparator::Greater, &trimmed[1..]),
            Some('<') => (Comparator::Less, &trimmed[1..]),
            Some(_) => (Comparator::Equal, trimmed),
            None => return Err(ValueError::InvalidCondition(s.to_string())),
        };
        let value = rest
            .trim()
            .parse::<i64>()
            .map_err(|_| ValueError::InvalidCondition(s.to_string()))?;
        Ok(Self { comparator, value })
    }
}

/// Filter over the card catalog. Every provided predicate must hold.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardFilter {
    /// Case-insensitive substring of the card name.
    pub name: Option<String>,
    /// Card must be one of these types (empty = any).
    pub types: Vec<CardType>,
    /// Card must be in one of these regions (empty = any).
    pub regions: Vec<Region>,
    /// Case-insensitive substring of the effect text.
    pub effect: Option<String>,
    pub power: Vec<NumericCondition>,
    pub madness: Vec<NumericCondition>,
}

impl CardFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, pattern: impl Into<String>) -> Self {
        self.name = Some(pattern.into());
        self
    }

    pub fn with_effect(mut self, pattern: impl Into<String>) -> Self {
        self.effect = Some(pattern.into());
        self
    }

    pub fn with_type(mut self, card_type: CardType) -> Self {
        self.add_type(card_type);
        self
    }

    pub fn with_region(mut self, region: Region) -> Self {
        self.add_region(region);
        self
    }

    pub fn with_power(mut self, condition: NumericCondition) -> Self {
        self.power.push(condition);
        self
    }

    pub fn with_madness(mut self, condition: NumericCondition) -> Self {
        self.madness.push(condition);
        self
    }

    /// Add a type unless already present. Returns whether it was added.
    pub fn add_type(&mut self, card_type: CardType) -> bool {
        if self.types.contains(&card_type) {
            return false;
        }
        self.types.push(card_type);
        true
    }

    /// Add a region unless already present. Returns whether it was added.
    pub fn add_region(&mut self, region: Region) -> bool {
        if self.regions.contains(&region) {
            return false;
        }
        self.regions.push(region);
        true
    }

    /// Name pattern with surrounding whitespace removed, `None` when blank.
    pub fn name_pattern(&self) -> Option<&str> {
        non_blank(self.name.as_deref())
    }

    pub fn effect_pattern(&self) -> Option<&str> {
        non_blank(self.effect.as_deref())
    }

    /// True when no predicate is set; such a filter returns the whole catalog.
    pub fn is_empty(&self) -> bool {
        self.name_pattern().is_none()
            && self.effect_pattern().is_none()
            && self.types.is_empty()
            && self.regions.is_empty()
            && self.power.is_empty()
            && self.madness.is_empty()
    }

    pub fn matches(&self, card: &Card) -> bool {
        if let Some(pattern) = self.name_pattern() {
            if !contains_ignore_case(&card.name, pattern) {
                return false;
            }
        }
        if let Some(pattern) = self.effect_pattern() {
            if !contains_ignore_case(&card.effect, pattern) {
                return false;
            }
        }
        if !self.types.is_empty() && !self.types.contains(&card.card_type) {
            return false;
        }
        if !self.regions.is_empty() && !self.regions.contains(&card.region) {
            return false;
        }
        self.power.iter().all(|c| c.matches(card.power))
            && self
                .madness
                .iter()
                .all(|c| c.matches(card.madness.value() as i64))
    }
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    fold_case(haystack).contains(&fold_case(needle))
}

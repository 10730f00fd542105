//! Selector compilation.
//!
//! A selector string is a space-separated chain of steps, each matching
//! one level of tag ancestry: `tag`, `.class` or `#id`. The chain
//! expresses required descendant nesting order, not immediate children,
//! so `"ol li"` matches an `li` anywhere below an `ol`.

/// A single compiled step: a pure predicate over a tag name and its
/// attribute list.
///
/// # Example
///
/// ```rust
/// use pagewatch::Step;
///
/// let step = Step::parse(".cls");
/// assert!(!step.matches("div", &[("id", "uniq")]));
/// assert!(!step.matches("div", &[("class", "xxcls")]));
/// assert!(step.matches("div", &[("class", "cls another")]));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Matches when the tag name equals the token exactly.
    Tag(String),
    /// Matches when an `id` attribute value equals the token remainder.
    Id(String),
    /// Matches when the `class` attribute, split on single spaces,
    /// contains the token remainder as one element.
    Class(String),
}

impl Step {
    /// Compiles one selector token.
    #[must_use]
    pub fn parse(token: &str) -> Self {
        if let Some(id) = token.strip_prefix('#') {
            Step::Id(id.to_string())
        } else if let Some(class) = token.strip_prefix('.') {
            Step::Class(class.to_string())
        } else {
            Step::Tag(token.to_string())
        }
    }

    /// Tests the step against a tag name and its attribute pairs.
    #[must_use]
    pub fn matches(&self, tag: &str, attrs: &[(&str, &str)]) -> bool {
        match self {
            Step::Tag(name) => name == tag,
            Step::Id(id) => attrs.iter().any(|(name, value)| *name == "id" && value == id),
            Step::Class(class) => attrs.iter().any(|(name, value)| {
                *name == "class" && value.split(' ').any(|candidate| candidate == class)
            }),
        }
    }
}

/// An ordered chain of [`Step`]s compiled from a selector string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selector {
    steps: Vec<Step>,
}

impl Selector {
    /// Compiles a space-separated selector string.
    ///
    /// Empty tokens from consecutive spaces are dropped, so `"ul  li"`
    /// and `"ul li"` compile to the same chain. The empty string
    /// compiles to a zero-step chain, which is vacuously satisfied and
    /// matches the first text node of any document.
    #[must_use]
    pub fn parse(input: &str) -> Self {
        let steps = input
            .split(' ')
            .filter(|token| !token.is_empty())
            .map(Step::parse)
            .collect();
        Self { steps }
    }

    /// Number of steps in the chain.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// True for the zero-step chain.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The step at `index`, if any.
    #[must_use]
    pub fn step(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }
}

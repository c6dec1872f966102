//! Declarative message validation.
//!
//! Every message type describes its field constraints as a rule table
//! ([`Rule`]) and, where scalar predicates are not enough, a custom routine
//! that can recurse into child components. One generic engine evaluates both,
//! accumulating every violation (never fail-fast) with a dotted/bracketed
//! field path into a [`ValidationResult`].

mod result;

pub use result::{ValidationResult, Violation};

/// One declarative constraint on a message or component.
///
/// `check` returns `true` when the constraint holds.
pub struct Rule<T: ?Sized> {
    pub path: &'static str,
    pub check: fn(&T) -> bool,
    pub message: &'static str,
}

/// Collects violations while walking a component tree.
///
/// The context keeps the property-path stack; nested components scope
/// themselves with [`ValidationContext::nested`] so their violations carry
/// the full path from the message root.
pub struct ValidationContext {
    segments: Vec<String>,
    result: ValidationResult,
}

impl ValidationContext {
    fn new() -> Self {
        Self {
            segments: Vec::new(),
            result: ValidationResult::new(),
        }
    }

    /// Records a violation at `path`, relative to the current scope.
    pub fn violate(&mut self, path: &str, message: impl Into<String>) {
        let full = self.full_path(path);
        self.result.push(full, message.into());
    }

    /// Runs `f` with `segment` pushed onto the path scope.
    pub fn nested(&mut self, segment: &str, f: impl FnOnce(&mut ValidationContext)) {
        self.segments.push(segment.to_string());
        f(self);
        self.segments.pop();
    }

    fn full_path(&self, leaf: &str) -> String {
        if self.segments.is_empty() {
            return leaf.to_string();
        }
        let mut path = self.segments.join(".");
        if !leaf.is_empty() {
            path.push('.');
            path.push_str(leaf);
        }
        path
    }

    fn finish(self) -> ValidationResult {
        self.result
    }
}

/// A message or component that self-describes its constraints.
pub trait Validatable {
    /// Declarative scalar constraints, evaluated first.
    fn rules() -> &'static [Rule<Self>]
    where
        Self: Sized,
    {
        &[]
    }

    /// Constraints the rule table cannot express: cross-field checks and
    /// recursion into child components (via [`validate_component`]).
    fn validate_custom(&self, _ctx: &mut ValidationContext) {}
}

/// Applies a component's rule table and custom routine within the current
/// path scope. Composite components call this from `validate_custom` for
/// each child, wrapped in [`ValidationContext::nested`].
pub fn validate_component<T: Validatable + 'static>(component: &T, ctx: &mut ValidationContext) {
    for rule in T::rules() {
        if !(rule.check)(component) {
            ctx.violate(rule.path, rule.message);
        }
    }
    component.validate_custom(ctx);
}

/// Entry point: validates a whole message tree.
pub struct Validator;

impl Validator {
    /// Walks the message's constraint set, collecting every violation.
    pub fn validate<T: Validatable + 'static>(message: &T) -> ValidationResult {
        let mut ctx = ValidationContext::new();
        validate_component(message, &mut ctx);
        ctx.finish()
    }
}

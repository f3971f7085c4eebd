//! Location reconciliation.
//!
//! Resolves a location template against a context location. A template is
//! literal text with two wildcard forms:
//! - `*` skips forward in the context to the next occurrence of the literal
//!   that follows the asterisk
//! - `**` skips forward to the last occurrence of that literal
//!
//! # States
//! ```text
//! Copy:     '*'             → Wildcard (consume '*')
//!           T[i] == P[j]    → emit P[j], advance both
//!           T[i] != P[j]    → emit T[i..], halt
//! Wildcard: '*'             → Double (consume '*')
//!           otherwise       → Single
//! Single:   first c=T[i] in P[j..] at k → emit P[j..k], j = k, Copy
//!           not found       → emit P[j..] then T[i..], halt
//! Double:   last c=T[i] in P[j..] at k  → emit P[j..k], j = k, Copy
//!           not found       → emit T[i..], halt
//! ```
//! When either cursor runs out, the rest of the template is emitted. The
//! result is trimmed.
//!
//! # Design Decisions
//! - A literal mismatch abandons reconciliation for the rest of the template,
//!   even when a later wildcard could have resolved more
//! - Never fails: unresolved wildcards fall back to raw remainders

/// Context used when there is no current location yet.
pub const EMPTY_CONTEXT: &str = " ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Copy,
    Wildcard,
    Single,
    Double,
}

/// Resolve `template` against `context` into a concrete location.
pub fn reconcile(template: &str, context: &str) -> String {
    let t: Vec<char> = template.chars().collect();
    let p: Vec<char> = context.chars().collect();
    let mut out = String::with_capacity(template.len() + context.len());
    let (mut i, mut j) = (0, 0);
    let mut state = State::Copy;

    while i < t.len() && j < p.len() {
        match state {
            State::Copy => {
                if t[i] == '*' {
                    i += 1;
                    state = State::Wildcard;
                } else if t[i] != p[j] {
                    out.extend(&t[i..]);
                    i = t.len();
                } else {
                    out.push(p[j]);
                    i += 1;
                    j += 1;
                }
            }
            State::Wildcard => {
                if t[i] == '*' {
                    i += 1;
                    state = State::Double;
                } else {
                    state = State::Single;
                }
            }
            State::Single => match p[j..].iter().position(|&c| c == t[i]) {
                Some(offset) => {
                    let k = j + offset;
                    out.extend(&p[j..k]);
                    j = k;
                    state = State::Copy;
                }
                None => {
                    out.extend(&p[j..]);
                    out.extend(&t[i..]);
                    i = t.len();
                }
            },
            State::Double => match p[j..].iter().rposition(|&c| c == t[i]) {
                Some(offset) => {
                    let k = j + offset;
                    out.extend(&p[j..k]);
                    j = k;
                    state = State::Copy;
                }
                None => {
                    out.extend(&t[i..]);
                    i = t.len();
                }
            },
        }
    }

    out.extend(&t[i..]);
    let resolved = out.trim().to_string();
    tracing::trace!(%template, %context, %resolved, "Reconciled location");
    resolved
}

/// Resolve `template` against the current location, falling back to
/// [`EMPTY_CONTEXT`] when there is none.
pub fn reconcile_with_current(template: &str, current: &str) -> String {
    let context = if current.is_empty() {
        EMPTY_CONTEXT
    } else {
        current
    };
    reconcile(template, context)
}

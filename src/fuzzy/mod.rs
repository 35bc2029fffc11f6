// src/fuzzy/mod.rs — Fuzzy inference primitives
//
// Everything in here is a pure function of its inputs. The hero-specific
// schemas and rule tables live in `crate::evaluator`; this module only knows
// about crisp values, linguistic terms and piecewise-linear shapes.

pub mod defuzz;
pub mod membership;
pub mod rules;
pub mod variable;

pub use defuzz::{aggregate, centroid, Implication};
pub use membership::{auto_partition, MembershipFn};
pub use rules::{Connective, FiringStrength};
pub use variable::{LinguisticVariable, Term};

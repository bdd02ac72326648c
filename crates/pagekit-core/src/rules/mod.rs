pub mod invariants;
pub mod markup;
pub mod validation;

//! Noyau décimal exact
//!
//! Organisation interne :
//! - jetons.rs   : tokenisation (virgule, suites de signes, moins unaire)
//! - rpn.rs      : shunting-yard -> RPN
//! - decimal.rs  : décimal en précision arbitraire (big int + échelle)
//! - eval.rs     : pile de valeurs + pipeline complet
//! - erreur.rs   : erreurs typées
//! - reglages.rs : échelle de division, précision de puissance

pub mod decimal;
pub mod erreur;
pub mod eval;
pub mod jetons;
pub mod reglages;
pub mod rpn;

#[cfg(test)]
mod tests_scientifiques;


// API publique minimale
pub use decimal::Decimal;
pub use erreur::CalcError;
pub use eval::{eval_expression, evaluate, evaluate_with, DemarcheNoyau};
pub use reglages::Reglages;

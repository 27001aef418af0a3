//! Calculatrice RPN — noyau (bibliothèque)
//!
//! `main.rs` (UI eframe) n’est qu’un habillage : lecture de l’entrée,
//! appel à `noyau::eval_expression`, affichage du résultat ou de l’erreur.

pub mod noyau;

pub use noyau::{evaluate, evaluate_with, CalcError, Decimal, Reglages};

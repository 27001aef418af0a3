// src/noyau/erreur.rs

use thiserror::Error;

/// Erreurs du noyau.
///
/// Détectées au point d’apparition, propagées telles quelles jusqu’à `evaluate`.
/// Aucun résultat partiel.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    /// Texte numérique illisible (plusieurs points, lettres, point seul...).
    #[error("nombre invalide: '{0}'")]
    NumberFormat(String),

    /// `)` sans `(` correspondante, ou `(` jamais fermée.
    #[error("parenthèses non équilibrées")]
    UnbalancedParens,

    #[error("division par zéro")]
    DivisionByZero,

    /// Opérandes manquants, ou pile de valeurs != 1 à la fin.
    #[error("expression invalide")]
    MalformedExpression,

    /// Exposant trop long pour la précision de puissance.
    #[error("exposant hors limites: {0}")]
    ExponentOutOfRange(String),
}

//! Réglages d’évaluation (échelle de division, précision de puissance).
//!
//! Valeurs par défaut alignées sur la dernière révision du calcul :
//! - `/` : 10 chiffres après la virgule, arrondi au pair
//! - `^` : 7 chiffres significatifs (contexte “décimal 32”)

/// Échelle par défaut de la division.
pub const ECHELLE_DIVISION_DEFAUT: u32 = 10;

/// Précision (chiffres significatifs) par défaut de la puissance.
pub const PRECISION_PUISSANCE_DEFAUT: u32 = 7;

/// Garde-fou : on borne l’échelle (anti-abus / anti-gel).
pub const ECHELLE_MAX: u32 = 200;

/// Garde-fou : on borne la précision de puissance.
pub const PRECISION_MAX: u32 = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Reglages {
    pub echelle_division: u32,
    pub precision_puissance: u32,
}

impl Default for Reglages {
    fn default() -> Self {
        Self {
            echelle_division: ECHELLE_DIVISION_DEFAUT,
            precision_puissance: PRECISION_PUISSANCE_DEFAUT,
        }
    }
}

impl Reglages {
    pub fn with_echelle_division(mut self, echelle: u32) -> Self {
        self.echelle_division = echelle.min(ECHELLE_MAX);
        self
    }

    /// Une précision nulle n’a pas de sens ici : on borne à 1.
    pub fn with_precision_puissance(mut self, precision: u32) -> Self {
        self.precision_puissance = precision.clamp(1, PRECISION_MAX);
        self
    }
}

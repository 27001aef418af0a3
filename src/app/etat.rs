//! src/app/etat.rs
//!
//! État UI (sans vue, sans noyau).
//!
//! Rôle : contenir l’état de la calculatrice (entrée, résultat, erreur, réglages, démarche)
//! et offrir des opérations simples (C/CLR/AC/DEL) sans logique d’affichage.
//!
//! Contrats :
//! - Aucune évaluation ici (pas de parsing, pas d’arithmétique).
//! - Actions déterministes, sans effet de bord caché.

use calculatrice_rpn::noyau::DemarcheNoyau;
use calculatrice_rpn::Reglages;

#[derive(Clone, Debug)]
pub struct AppCalc {
    // --- entrée utilisateur ---
    pub entree: String,

    // --- sorties ---
    pub resultat: String,
    pub erreur: String,

    // --- démarche (jetons + RPN) ---
    pub demarche: DemarcheNoyau,

    // --- paramètres ---
    pub reglages: Reglages,

    // --- UX ---
    // Permet à vue.rs de redonner le focus à l’entrée après un clic sur un bouton.
    pub focus_entree: bool,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self {
            entree: String::new(),
            resultat: String::new(),
            erreur: String::new(),
            demarche: DemarcheNoyau::default(),
            reglages: Reglages::default(),
            focus_entree: true, // au lancement, on veut pouvoir taper tout de suite
        }
    }
}

impl AppCalc {
    /* ------------------------ Actions “boutons” (état seulement) ------------------------ */

    /// AC : remise à zéro totale (entrée + résultats + réglages par défaut).
    pub fn reset_total(&mut self) {
        self.entree.clear();
        self.clear_resultats();
        self.reglages = Reglages::default();
        self.focus_entree = true;
    }

    /// C : effacer seulement l’entrée (sans toucher aux résultats).
    pub fn clear_entree(&mut self) {
        self.entree.clear();
        self.focus_entree = true;
    }

    /// CLR : effacer résultat + erreur + démarche (sans toucher à l’entrée).
    pub fn clear_resultats(&mut self) {
        self.resultat.clear();
        self.erreur.clear();
        self.demarche = DemarcheNoyau::default();
        self.focus_entree = true;
    }

    /// DEL : retire le dernier caractère non blanc.
    pub fn backspace_entree(&mut self) {
        while self.entree.ends_with(' ') {
            self.entree.pop();
        }
        self.entree.pop();
        self.focus_entree = true;
    }

    /// Erreur : on CONSERVE le dernier résultat, la démarche n’est plus fiable.
    pub fn set_erreur(&mut self, msg: impl Into<String>) {
        self.erreur = msg.into();
        self.demarche = DemarcheNoyau::default();
        self.focus_entree = true;
    }

    pub fn set_resultat(&mut self, resultat: impl Into<String>, demarche: DemarcheNoyau) {
        self.erreur.clear();
        self.resultat = resultat.into();
        self.demarche = demarche;
        self.focus_entree = true;
    }

    /// Les bornes sont appliquées par `Reglages::with_*`.
    pub fn set_echelle_division(&mut self, echelle: u32) {
        self.reglages = self.reglages.with_echelle_division(echelle);
        self.focus_entree = true;
    }

    pub fn set_precision_puissance(&mut self, precision: u32) {
        self.reglages = self.reglages.with_precision_puissance(precision);
        self.focus_entree = true;
    }
}

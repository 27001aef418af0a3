//! Noyau — évaluation (pipeline réel)
//!
//! tokenize -> RPN -> pile de valeurs décimales -> résultat (zéros finaux retirés)
//!
//! Chaque appel possède ses propres piles (opérateurs, valeurs) : aucun état
//! partagé entre deux évaluations, la table de priorité est en lecture seule.

use tracing::{debug, trace};

use super::decimal::Decimal;
use super::erreur::CalcError;
use super::jetons::{format_tokens, tokenize, Tok};
use super::reglages::Reglages;
use super::rpn::to_rpn;

#[derive(Default, Clone, Debug)]
pub struct DemarcheNoyau {
    pub jetons: String,
    pub rpn: String,
}

/// API publique : évalue une expression avec les réglages par défaut.
pub fn evaluate(expr_str: &str) -> Result<Decimal, CalcError> {
    evaluate_with(expr_str, &Reglages::default())
}

/// Comme `evaluate`, avec échelle de division / précision de puissance explicites.
pub fn evaluate_with(expr_str: &str, reglages: &Reglages) -> Result<Decimal, CalcError> {
    eval_expression(expr_str, reglages).map(|(valeur, _d)| valeur)
}

/// Évalue une expression et retourne:
/// - la valeur décimale (zéros finaux retirés)
/// - la démarche (jetons, rpn) pour l’affichage
pub fn eval_expression(
    expr_str: &str,
    reglages: &Reglages,
) -> Result<(Decimal, DemarcheNoyau), CalcError> {
    debug!(expression = expr_str, "évaluation");

    // 1) Jetons
    let jetons = tokenize(expr_str);
    let jetons_txt = format_tokens(&jetons);
    trace!(jetons = %jetons_txt);

    // 2) RPN
    let rpn =
        to_rpn(&jetons).inspect_err(|e| debug!(erreur = %e, "conversion RPN refusée"))?;
    let rpn_txt = format_tokens(&rpn);
    trace!(rpn = %rpn_txt);

    // 3) Pile de valeurs
    let valeur =
        eval_rpn(&rpn, reglages).inspect_err(|e| debug!(erreur = %e, "évaluation refusée"))?;
    debug!(resultat = %valeur, "évaluation terminée");

    let d = DemarcheNoyau {
        jetons: jetons_txt,
        rpn: rpn_txt,
    };

    Ok((valeur, d))
}

/// Évalue une RPN : exactement une valeur doit rester sur la pile.
pub fn eval_rpn(rpn: &[Tok], reglages: &Reglages) -> Result<Decimal, CalcError> {
    let mut st: Vec<Decimal> = Vec::with_capacity(rpn.len());

    for tok in rpn {
        match tok {
            Tok::Num(l) => st.push(Decimal::from_litteral(&l.texte, l.negatif)?),

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Caret => {
                // premier dépilé = opérande droit
                let b = st.pop().ok_or(CalcError::MalformedExpression)?;
                let a = st.pop().ok_or(CalcError::MalformedExpression)?;
                st.push(applique(tok, &a, &b, reglages)?);
            }

            Tok::LPar | Tok::RPar => return Err(CalcError::MalformedExpression),
        }
    }

    if st.len() != 1 {
        return Err(CalcError::MalformedExpression);
    }
    st.pop()
        .map(|v| v.strip_trailing_zeros())
        .ok_or(CalcError::MalformedExpression)
}

fn applique(
    op: &Tok,
    a: &Decimal,
    b: &Decimal,
    reglages: &Reglages,
) -> Result<Decimal, CalcError> {
    match op {
        Tok::Plus => a.ajoute(b),
        Tok::Minus => a.soustrait(b),
        Tok::Star => a.multiplie(b),
        Tok::Slash => a.div_echelle(b, i64::from(reglages.echelle_division)),
        Tok::Caret => {
            // exposant tronqué à l’entier, sans erreur pour la partie fractionnaire
            let n = b.tronque_i64()?;
            a.pow_contexte(n, reglages.precision_puissance)
        }
        _ => Err(CalcError::MalformedExpression),
    }
}

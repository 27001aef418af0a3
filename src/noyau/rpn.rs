// src/noyau/rpn.rs
//
// Shunting-yard -> RPN (postfix)
// Objectif:
// - Convertir une suite de Tok en RPN, sans parenthèses
//
// Règles:
// - priorité : ^ = 3, * / = 2, + - = 1, '(' = 0 (sentinelle, jamais dépilée par un opérateur)
// - égalité de priorité => on dépile : tout est associatif à gauche, ^ compris
//   (2^3^2 = (2^3)^2 = 64)
// - ')' sans '(' => UnbalancedParens
// - '(' restée ouverte en fin d’entrée => UnbalancedParens (on refuse, on ne vide pas en sortie)

use super::erreur::CalcError;
use super::jetons::Tok;

/// Table de priorité (statique, lecture seule).
pub fn priorite(t: &Tok) -> u8 {
    match t {
        Tok::Caret => 3,
        Tok::Star | Tok::Slash => 2,
        Tok::Plus | Tok::Minus => 1,
        _ => 0,
    }
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [2, Plus, 3, Star, 4]
///   rpn:    [2, 3, 4, Star, Plus]
pub fn to_rpn(tokens: &[Tok]) -> Result<Vec<Tok>, CalcError> {
    let mut out: Vec<Tok> = Vec::with_capacity(tokens.len());
    // pile d’opérateurs : propre à cet appel
    let mut ops: Vec<Tok> = Vec::new();

    for tok in tokens.iter().cloned() {
        match tok {
            Tok::Num(_) => out.push(tok),

            Tok::LPar => ops.push(tok),

            Tok::RPar => {
                // dépile jusqu’à '(' (qui disparaît)
                loop {
                    match ops.pop() {
                        Some(Tok::LPar) => break,
                        Some(op) => out.push(op),
                        None => return Err(CalcError::UnbalancedParens),
                    }
                }
            }

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Caret => {
                let p_tok = priorite(&tok);
                while let Some(top) = ops.last() {
                    if p_tok > priorite(top) {
                        break;
                    }
                    if let Some(op) = ops.pop() {
                        out.push(op);
                    }
                }
                ops.push(tok);
            }
        }
    }

    // vide la pile ops
    while let Some(op) = ops.pop() {
        if matches!(op, Tok::LPar) {
            return Err(CalcError::UnbalancedParens);
        }
        out.push(op);
    }

    Ok(out)
}

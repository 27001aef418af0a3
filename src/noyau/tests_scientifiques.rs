//! Tests scientifiques (campagne) : propriétés + robustesse + limites contrôlées.
//!
//! But : vérifier les propriétés du pipeline sans faire chauffer la machine.
//! - budget temps global
//! - tailles bornées (profondeur, longueur)
//!
//! Notes :
//! - `/` arrondit au pair à l’échelle 10 : 1/3*3 ne revient pas à 1.
//! - `^` travaille à 7 chiffres significatifs : 2^30 perd ses derniers chiffres.

use std::time::{Duration, Instant};

use super::jetons::{format_tokens, tokenize};
use super::rpn::to_rpn;
use super::{evaluate, evaluate_with, CalcError, Reglages};

fn eval_ok(expr: &str) -> String {
    evaluate(expr)
        .unwrap_or_else(|e| panic!("expr={expr:?} err={e}"))
        .to_string()
}

fn assert_eval_eq(expr: &str, attendu: &str) {
    assert_eq!(eval_ok(expr), attendu, "expr={expr:?}");
}

/// Budget global anti-gel (scientifique + safe).
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Priorités ------------------------ */

#[test]
fn sci_priorites() {
    let rpn = to_rpn(&tokenize("2+3*4")).unwrap();
    assert_eq!(format_tokens(&rpn), "2 3 4 * +");
    assert_eval_eq("2+3*4", "14");

    // les parenthèses changent le résultat
    assert_eval_eq("(2+3)*4", "20");

    assert_eval_eq("2*3+4*5", "26");
    assert_eval_eq("2+3^2*2", "20");
    assert_eval_eq("100/10/5", "2");
}

#[test]
fn sci_moins_unaire() {
    assert_eval_eq("-5+3", "-2");
    assert_eval_eq("3-(-5)", "8");
    assert_eval_eq("---5", "-5");
    assert_eval_eq("----5", "5");
    assert_eval_eq("(-2)*(-3)", "6");
    assert_eval_eq("-2^2", "4"); // le signe appartient au littéral
}

/* ------------------------ Exactitude décimale ------------------------ */

#[test]
fn sci_addition_exacte() {
    // pas d’erreur binaire : 0.1 + 0.2 = 0.3
    assert_eval_eq("0.1+0.2", "0.3");
    assert_eval_eq("0.1+0.2-0.3", "0");
    assert_eval_eq("1.005*1000", "1005");
}

#[test]
fn sci_grands_entiers_exacts() {
    let n = "9".repeat(20);
    let attendu = format!("{}8{}1", "9".repeat(19), "0".repeat(19));
    assert_eval_eq(&format!("{n}*{n}"), &attendu);
}

#[test]
fn sci_division_arrondi_pair() {
    // 5e-11 : égalité parfaite à l’échelle 10, le chiffre pair gagne
    assert_eval_eq("0.00000000005/1", "0");
    assert_eval_eq("0.00000000015/1", "0.0000000002");
    assert_eval_eq("0.00000000025/1", "0.0000000002");
    assert_eval_eq("0.00000000035/1", "0.0000000004");
    assert_eval_eq("-0.00000000035/1", "-0.0000000004");

    // arrondi une seule fois par division, pas de retour à 1
    assert_eval_eq("1/3*3", "0.9999999999");
}

#[test]
fn sci_virgule_equivaut_au_point() {
    for (a, b) in [("2,5+1,5", "2.5+1.5"), ("1,25*4", "1.25*4"), ("10/0,5", "10/0.5")] {
        assert_eq!(evaluate(a), evaluate(b), "{a:?} vs {b:?}");
    }
    assert_eval_eq("2,5+1,5", "4");
}

#[test]
fn sci_reglages_independants() {
    let r8 = Reglages::default().with_echelle_division(8);
    let r2 = Reglages::default().with_echelle_division(2);
    assert_eq!(evaluate_with("2/3", &r8).unwrap().to_string(), "0.66666667");
    assert_eq!(evaluate_with("2/3", &r2).unwrap().to_string(), "0.67");
    assert_eq!(evaluate_with("2/3", &Reglages::default()).unwrap().to_string(), "0.6666666667");
}

/* ------------------------ Déterminisme / idempotence ------------------------ */

#[test]
fn sci_idempotence() {
    let exprs = ["1/3", "2^-3", "(1,5+2)*-4", "5/0", "(2+3", "2+"];
    for e in exprs {
        let premier = evaluate(e);
        for _ in 0..5 {
            assert_eq!(evaluate(e), premier, "expr={e:?}");
        }
    }
}

#[test]
fn sci_rpn_deterministe() {
    let jetons = tokenize("(1+2)*3^4-5/6");
    let a = format_tokens(&to_rpn(&jetons).unwrap());
    for _ in 0..5 {
        assert_eq!(format_tokens(&to_rpn(&jetons).unwrap()), a);
    }
}

#[test]
fn sci_concurrence_sans_etat_partage() {
    let exprs = ["1/7", "2^20", "(3-5)*-(2,5)", "99/(1-1)"];
    let attendus: Vec<_> = exprs.iter().map(|e| evaluate(e)).collect();

    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| s.spawn(|| exprs.iter().map(|e| evaluate(e)).collect::<Vec<_>>()))
            .collect();
        for h in handles {
            let obtenus = h.join().unwrap_or_else(|_| panic!("thread paniqué"));
            assert_eq!(obtenus, attendus);
        }
    });
}

/* ------------------------ Erreurs ------------------------ */

#[test]
fn sci_erreurs_typees() {
    assert_eq!(evaluate("5/0"), Err(CalcError::DivisionByZero));
    assert_eq!(evaluate("(2+3"), Err(CalcError::UnbalancedParens));
    assert_eq!(evaluate("((2)"), Err(CalcError::UnbalancedParens));
    assert_eq!(evaluate("   "), Err(CalcError::MalformedExpression));
    assert_eq!(evaluate("1+*2"), Err(CalcError::MalformedExpression));
    assert_eq!(evaluate("1..5"), Err(CalcError::NumberFormat("1..5".into())));
    assert_eq!(evaluate("."), Err(CalcError::NumberFormat(".".into())));
}

/* ------------------------ Stress contrôlé (sans brûler) ------------------------ */

#[test]
fn sci_stress_profondeur_parentheses() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    // piles explicites (pas de récursion) : la profondeur ne menace pas la pile système
    let profondeur = 2000;
    let expr = format!("{}1{}", "(".repeat(profondeur), "+1)".repeat(profondeur));
    budget(t0, max);

    assert_eval_eq(&expr, "2001");
    budget(t0, max);
}

#[test]
fn sci_stress_taille_somme() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let mut expr = String::new();
    for k in 0..800 {
        if k > 0 {
            expr.push_str(" + ");
        }
        expr.push_str("0,5");
    }
    budget(t0, max);

    // 800 × 0.5 = 400
    assert_eval_eq(&expr, "400");
    budget(t0, max);
}

#[test]
fn sci_stress_grand_exposant_compact() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    // 7 chiffres d’exposant : la valeur reste compacte (7 chiffres significatifs)
    let v = evaluate("1.0000001^9999999").unwrap_or_else(|e| panic!("err: {e}"));
    budget(t0, max);

    assert!(v.to_string().starts_with("2.71828"), "v={v}");
}

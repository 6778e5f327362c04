//! Tests calculs (campagne) : précédence + erreurs typées + limites contrôlées.
//!
//! But : vérifier le contrat d'évaluation sans faire chauffer la machine.
//! - tables d'expressions -> valeur attendue
//! - équivalence avec la forme entièrement parenthésée
//! - stress borné (longueur, profondeur) sous budget temps

use std::time::{Duration, Instant};

use super::eval::{eval_expression, ErreurCalc};

fn eval_ok(expr: &str) -> f64 {
    eval_expression(expr).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"))
}

fn assert_valeur(expr: &str, attendu: f64) {
    let v = eval_ok(expr);
    assert!(
        (v - attendu).abs() < 1e-9,
        "expr={expr:?} attendu={attendu} obtenu={v}"
    );
}

/// Budget global anti-gel.
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Précédence & parenthésage ------------------------ */

#[test]
fn calc_table_de_base() {
    assert_valeur("2+3", 5.0);
    assert_valeur("(1+2)*3", 9.0);
    assert_valeur("10%3", 1.0);
    assert_valeur("abs(-7)", 7.0);
    assert_valeur("round(3.14159,2)", 3.14);
    assert_valeur("sqrt(16)+sqrt(9)", 7.0);
    assert_valeur("100/4/5", 5.0);
    assert_valeur("1.5*2", 3.0);
}

#[test]
fn calc_equivalence_parenthesage() {
    // chaque expression doit valoir sa forme entièrement parenthésée
    let paires = [
        ("1+2*3-4/2", "1+(2*3)-(4/2)"),
        ("2*3%4", "(2*3)%4"),
        ("2+3%2", "2+(3%2)"),
        ("8/4*2", "(8/4)*2"),
        ("2**3*4", "(2**3)*4"),
        ("-3**2+1", "(-(3**2))+1"),
        ("10-2-3-4", "((10-2)-3)-4"),
        ("1+2**3**2", "1+(2**(3**2))"),
    ];

    for (libre, parenthesee) in paires {
        let a = eval_ok(libre);
        let b = eval_ok(parenthesee);
        assert!(
            (a - b).abs() < 1e-9,
            "{libre:?} = {a} mais {parenthesee:?} = {b}"
        );
    }
}

/* ------------------------ Erreurs typées ------------------------ */

#[test]
fn calc_erreurs_division() {
    for expr in ["5/0", "1/(3-3)", "10%0", "0**-2"] {
        assert_eq!(
            eval_expression(expr),
            Err(ErreurCalc::DivisionParZero),
            "expr={expr:?}"
        );
    }
}

#[test]
fn calc_erreurs_domaine() {
    for expr in ["sqrt(-1)", "sqrt(2-5)", "round(1, 2.5)", "9**9**9"] {
        assert!(
            matches!(eval_expression(expr), Err(ErreurCalc::Domaine(_))),
            "expr={expr:?}"
        );
    }
}

#[test]
fn calc_erreurs_syntaxe() {
    for expr in [
        "",
        "   ",
        "1+",
        "*2",
        "(1",
        "1)",
        "()",
        "1 2",
        "2(3)",
        "sqrt",
        "sqrt 9",
        "sqrt(1,2)",
        "round()",
        "foo(1)",
        "x+1",
        "1,2",
        "1..2",
    ] {
        assert!(
            matches!(eval_expression(expr), Err(ErreurCalc::Syntaxe(_))),
            "expr={expr:?}"
        );
    }
}

/* ------------------------ Division: zéro exact seulement ------------------------ */

#[test]
fn calc_division_denominateur_petit_mais_non_nul() {
    // seul un dénominateur EXACTEMENT nul est une erreur
    let v = eval_ok("1/0.0001");
    assert!((v - 10000.0).abs() < 1e-6);
}

/* ------------------------ Stress contrôlé (sans brûler) ------------------------ */

#[test]
fn calc_stress_somme_longue() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    // 80 termes (suffisant pour détecter une régression, sans exploser la pile)
    let mut expr = String::new();
    for k in 0..80 {
        if k > 0 {
            expr.push_str(" + ");
        }
        expr.push_str("0.5");
        budget(t0, max);
    }

    assert_valeur(&expr, 40.0);
}

#[test]
fn calc_stress_parentheses_imbriquees() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    // profondeur modérée : 200 niveaux
    let mut expr = String::new();
    for _ in 0..200 {
        expr.push('(');
    }
    expr.push('7');
    for _ in 0..200 {
        expr.push(')');
    }
    budget(t0, max);

    assert_valeur(&expr, 7.0);
}

#[test]
fn calc_stress_fonctions_imbriquees() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    // sqrt(sqrt(...sqrt(16)...)) : converge vers 1, reste dans le domaine
    let mut expr = "16".to_string();
    for _ in 0..40 {
        expr = format!("sqrt({expr})");
        budget(t0, max);
    }

    let v = eval_ok(&expr);
    assert!(v >= 1.0 && v < 1.1, "obtenu={v}");
}

#[test]
fn calc_garde_fou_expression_trop_longue() {
    // au-delà du plafond de jetons : erreur de syntaxe, pas de gel
    let expr = "1+".repeat(5000) + "1";
    assert!(matches!(
        eval_expression(&expr),
        Err(ErreurCalc::Syntaxe(_))
    ));
}

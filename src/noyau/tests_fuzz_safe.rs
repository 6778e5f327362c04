//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - invariant clé : une expression générée est toujours syntaxiquement
//!   valide, donc jamais d'erreur Syntaxe (seules division par zéro et
//!   hors-domaine sont attendues) ; un succès est toujours fini.
//! - le moteur (saisies aléatoires) ne panique jamais.

use std::time::{Duration, Instant};

use super::eval::{eval_expression, ErreurCalc};
use super::moteur::MoteurExpression;

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Génération d'expressions (bornée) ------------------------ */

fn gen_nombre(rng: &mut Rng) -> String {
    // petits nombres, incluant 0 (utile pour provoquer des divisions par zéro)
    let n = rng.pick(10);
    if rng.coin() {
        format!("{n}.{}", rng.pick(10))
    } else {
        format!("{n}")
    }
}

fn gen_atom(rng: &mut Rng) -> String {
    match rng.pick(4) {
        0 | 1 => gen_nombre(rng),
        2 => format!("(-{})", gen_nombre(rng)),
        _ => format!("abs(-{})", gen_nombre(rng)),
    }
}

fn gen_expr(rng: &mut Rng, depth: usize) -> String {
    if depth == 0 {
        return gen_atom(rng);
    }

    match rng.pick(10) {
        0 => gen_atom(rng),
        1 => format!("({}+{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        2 => format!("({}-{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        3 => format!("({}*{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        4 => format!("({}/{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        5 => format!("({}%{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        6 => format!("sqrt({})", gen_expr(rng, depth - 1)),
        7 => format!("abs({})", gen_expr(rng, depth - 1)),
        8 => {
            if rng.coin() {
                format!("round({})", gen_expr(rng, depth - 1))
            } else {
                format!("round({}, {})", gen_expr(rng, depth - 1), rng.pick(4))
            }
        }
        _ => {
            // puissance bornée : petit exposant entier, pas d'explosion
            format!("({})**{}", gen_atom(rng), rng.pick(3))
        }
    }
}

/// Une campagne = la suite (expression, issue) pour un seed donné.
fn campagne(seed: u64, n: usize, depth: usize) -> Vec<(String, Result<f64, ErreurCalc>)> {
    let mut rng = Rng::new(seed);
    (0..n)
        .map(|_| {
            let expr = gen_expr(&mut rng, depth);
            let issue = eval_expression(&expr);
            (expr, issue)
        })
        .collect()
}

/* ------------------------ Helper somme balancée anti pile ------------------------ */

fn somme_balancee(terme: &str, n: usize) -> String {
    let mut items: Vec<String> = (0..n).map(|_| terme.to_string()).collect();
    while items.len() > 1 {
        let mut next = Vec::new();
        let mut i = 0;
        while i < items.len() {
            if i + 1 < items.len() {
                next.push(format!("({}+{})", items[i], items[i + 1]));
                i += 2;
            } else {
                next.push(items[i].clone());
                i += 1;
            }
        }
        items = next;
    }
    items.pop().unwrap_or_else(|| "0".to_string())
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_jamais_syntaxe_ni_infini() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let mut rng = Rng::new(0xC0FFEE_u64);

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for _ in 0..200 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 4);
        match eval_expression(&expr) {
            Ok(v) => {
                assert!(v.is_finite(), "succès non fini: expr={expr:?} v={v}");
                seen_ok += 1;
            }
            Err(ErreurCalc::Syntaxe(detail)) => {
                // le générateur ne produit que des expressions bien formées
                panic!("erreur de syntaxe inattendue: expr={expr:?} ({detail})");
            }
            Err(ErreurCalc::DivisionParZero) | Err(ErreurCalc::Domaine(_)) => {
                seen_err += 1;
            }
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne "balaye" rien.
    assert!(seen_ok > 20, "trop peu de succès: {seen_ok}");
    assert!(seen_err > 0, "aucune erreur vue: fuzz trop sage");
}

#[test]
fn fuzz_safe_determinisme() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    // Même seed => mêmes expressions => mêmes issues
    let a = campagne(0xBADC0DE_u64, 80, 4);
    let b = campagne(0xBADC0DE_u64, 80, 4);
    budget(t0, max);

    assert_eq!(a, b);
}

#[test]
fn fuzz_safe_somme_balancee_anti_pile() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    let expr = somme_balancee("0.5", 800);
    budget(t0, max);

    // 800*(0.5) = 400
    let v = eval_expression(&expr).unwrap_or_else(|e| panic!("err: {e}"));
    assert!((v - 400.0).abs() < 1e-9);
}

#[test]
fn fuzz_safe_moteur_saisies_aleatoires() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    // Le pavé complet, tel que la vue l'envoie au moteur.
    const PAVE: &[&str] = &[
        "0", "1", "2", "3", "4", "5", "6", "7", "8", "9", ".", "+", "-", "*", "/", "%", "(", ")",
        ",", "sqrt(", "abs(", "round(",
    ];

    let mut rng = Rng::new(0xFEED_u64);
    let mut m = MoteurExpression::default();

    for _ in 0..2000 {
        budget(t0, max);

        match rng.pick(12) {
            0 => m.retour(),
            1 => m.bascule_signe(),
            2 => {
                m.efface();
                assert!(m.est_vide());
            }
            3 => {
                // issue libre (saisie aléatoire) : typée, jamais de panique
                let _ = m.evalue();
            }
            _ => {
                let jeton = PAVE[rng.pick(PAVE.len() as u32) as usize];
                m.ajoute(jeton);
            }
        }
    }
}

//! Noyau — évaluation (pipeline réel)
//!
//! tokenize -> RPN -> Expr -> évaluation f64 -> contrôle de finitude
//!
//! Toute erreur est typée (ErreurCalc) et récupérée ici : eval_expression
//! ne panique jamais, elle retourne une valeur ou une erreur affichable.

use std::fmt;

use super::expr::Expr;
use super::jetons::tokenize;
use super::rpn::{from_rpn, to_rpn};

/// Taxonomie des erreurs d'évaluation.
/// - Syntaxe : expression mal formée (parse, identifiant inconnu, arité...)
/// - DivisionParZero : dénominateur nul pour / ou %, ou 0 élevé à une
///   puissance négative
/// - Domaine : argument invalide (√ d'un négatif, décimales non entières,
///   résultat non représentable)
#[derive(Clone, Debug, PartialEq)]
pub enum ErreurCalc {
    Syntaxe(String),
    DivisionParZero,
    Domaine(String),
}

impl fmt::Display for ErreurCalc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErreurCalc::Syntaxe(detail) => write!(f, "expression invalide ({detail})"),
            ErreurCalc::DivisionParZero => write!(f, "division par zéro"),
            ErreurCalc::Domaine(detail) => write!(f, "hors domaine ({detail})"),
        }
    }
}

impl std::error::Error for ErreurCalc {}

/// API publique : évalue une expression texte et retourne sa valeur.
///
/// Pipeline : jetons → RPN → Expr → évaluation → contrôle de finitude.
/// Les erreurs de parse deviennent Syntaxe ; un résultat non fini
/// (dépassement f64, NaN d'une puissance fractionnaire de négatif)
/// devient Domaine plutôt que de contaminer l'affichage.
pub fn eval_expression(expr_str: &str) -> Result<f64, ErreurCalc> {
    let s = expr_str.trim();
    if s.is_empty() {
        return Err(ErreurCalc::Syntaxe("entrée vide".into()));
    }

    // 1) Jetons
    let jetons = tokenize(s).map_err(ErreurCalc::Syntaxe)?;

    // 2) RPN
    let rpn = to_rpn(&jetons).map_err(ErreurCalc::Syntaxe)?;

    // 3) AST (Expr)
    let expr = from_rpn(&rpn).map_err(ErreurCalc::Syntaxe)?;

    // 4) Évaluation
    let v = evaluer(&expr)?;

    // 5) Finitude
    if !v.is_finite() {
        return Err(ErreurCalc::Domaine("résultat non représentable".into()));
    }

    Ok(v)
}

/// Évalue l'AST en f64.
/// - / et % : dénominateur exactement nul => DivisionParZero.
/// - % "plancher" : le reste prend le signe du diviseur (10%3=1, -7%3=2).
/// - 0 ** n avec n < 0 => DivisionParZero.
/// - sqrt d'un négatif => Domaine.
/// - round : le nombre de décimales doit être une valeur entière ;
///   les égalités s'arrondissent au pair (round(2.5)=2, round(3.5)=4).
pub fn evaluer(expr: &Expr) -> Result<f64, ErreurCalc> {
    use Expr::*;

    match expr {
        Num(v) => Ok(*v),

        Neg(x) => Ok(-evaluer(x)?),

        Add(a, b) => Ok(evaluer(a)? + evaluer(b)?),
        Sub(a, b) => Ok(evaluer(a)? - evaluer(b)?),
        Mul(a, b) => Ok(evaluer(a)? * evaluer(b)?),

        Div(a, b) => {
            let d = evaluer(b)?;
            if d == 0.0 {
                return Err(ErreurCalc::DivisionParZero);
            }
            Ok(evaluer(a)? / d)
        }

        Mod(a, b) => {
            let d = evaluer(b)?;
            if d == 0.0 {
                return Err(ErreurCalc::DivisionParZero);
            }
            Ok(modulo_plancher(evaluer(a)?, d))
        }

        Pow(a, b) => {
            let base = evaluer(a)?;
            let exp = evaluer(b)?;
            if base == 0.0 && exp < 0.0 {
                return Err(ErreurCalc::DivisionParZero);
            }
            Ok(base.powf(exp))
        }

        Sqrt(x) => {
            let v = evaluer(x)?;
            if v < 0.0 {
                return Err(ErreurCalc::Domaine(
                    "racine carrée d'un nombre négatif".into(),
                ));
            }
            Ok(v.sqrt())
        }

        Abs(x) => Ok(evaluer(x)?.abs()),

        Round(x, decimales) => {
            let v = evaluer(x)?;
            match decimales {
                None => Ok(v.round_ties_even()),
                Some(d) => {
                    let nd = evaluer(d)?;
                    if nd.fract() != 0.0 {
                        return Err(ErreurCalc::Domaine(
                            "round : nombre de décimales non entier".into(),
                        ));
                    }
                    Ok(arrondi_decimales(v, nd))
                }
            }
        }
    }
}

/// Modulo "plancher" : a - b*floor(a/b), le reste suit le signe du diviseur.
fn modulo_plancher(a: f64, b: f64) -> f64 {
    a - b * (a / b).floor()
}

/// round(v, n) : arrondi au pair sur v*10^n, puis remise à l'échelle.
/// n peut être négatif (round(1234, -2) = 1200).
fn arrondi_decimales(v: f64, nd: f64) -> f64 {
    // garde-fou : au-delà de la précision f64, l'arrondi ne change rien
    let n = nd.clamp(-320.0, 320.0) as i32;
    let facteur = 10f64.powi(n);
    let agrandi = v * facteur;
    if !agrandi.is_finite() {
        return v;
    }
    agrandi.round_ties_even() / facteur
}

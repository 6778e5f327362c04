//! Noyau de calcul (sans UI)
//!
//! Organisation interne :
//! - jetons.rs  : tokenisation
//! - rpn.rs     : shunting-yard + construction Expr
//! - expr.rs    : AST restreint (arithmétique + sqrt/abs/round)
//! - eval.rs    : erreurs typées + pipeline complet
//! - format.rs  : rendu du résultat
//! - moteur.rs  : tampon d'entrée + opérations d'édition

pub mod eval;
pub mod expr;
pub mod format;
pub mod jetons;
pub mod moteur;
pub mod rpn;

#[cfg(test)]
mod tests_calculs;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use eval::{eval_expression, ErreurCalc};
pub use moteur::MoteurExpression;

// src/noyau/rpn.rs
//
// Shunting-yard -> RPN -> AST
// Objectif:
// - Convertir une suite de Tok en RPN (postfix)
// - Puis reconstruire Expr
//
// Règles:
// - Ident(name):
//    - si name ∈ {sqrt, abs, round} => fonction (postfixée en RPN avec son arité)
//    - sinon => erreur de syntaxe (aucune variable, aucun appel libre)
// - Moins unaire:
//    - si '-' arrive quand on n'attend PAS une valeur, il devient Tok::Neg,
//      un opérateur préfixe qui se contente d'être empilé (pas d'opérande
//      gauche, donc rien à dépiler). Précédence entre * et **.
// - Plus unaire: ignoré.
// - Virgule: sépare les arguments d'un appel de fonction; incrémente l'arité.
//
// NOTE:
// - Les fonctions sont traitées comme des opérateurs "collés" à leur argument
//   et sortent en RPN sous forme Tok::Func(nom, arité) à la parenthèse fermante.

use super::expr::Expr;
use super::jetons::Tok;

fn precedence(t: &Tok) -> i32 {
    match t {
        Tok::Plus | Tok::Minus => 1,
        Tok::Star | Tok::Slash | Tok::Percent => 2,
        Tok::Neg => 3,
        Tok::Puiss => 4,
        _ => 0,
    }
}

fn is_right_associative(t: &Tok) -> bool {
    matches!(t, Tok::Puiss)
}

/// Identificateurs reconnus comme fonctions.
fn is_fonction_ident(name: &str) -> bool {
    matches!(name, "sqrt" | "abs" | "round")
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Ident("abs"), LPar, Minus, Num(7), RPar]   (source: "abs(-7)")
///   rpn:    [Num(7), Neg, Func("abs", 1)]
pub fn to_rpn(tokens: &[Tok]) -> Result<Vec<Tok>, String> {
    let mut out: Vec<Tok> = Vec::new();
    let mut ops: Vec<Tok> = Vec::new();

    // Une entrée par '(' ouverte : true si c'est la parenthèse d'un appel
    // de fonction. argc suit, en parallèle, l'arité des appels ouverts.
    let mut paren_fonction: Vec<bool> = Vec::new();
    let mut argc: Vec<usize> = Vec::new();

    // "valeur" = un atome ou une expression fermée.
    // Sert à distinguer moins unaire / binaire et à rejeter "2+*3".
    let mut prev_was_value = false;

    for tok in tokens.iter().cloned() {
        match tok {
            Tok::Num(_) => {
                out.push(tok);
                prev_was_value = true;
            }

            Tok::Ident(name) => {
                if !is_fonction_ident(&name) {
                    return Err(format!("identifiant inconnu: '{name}'"));
                }
                // fonction : on la garde sur la pile (elle sortira à la ')')
                ops.push(Tok::Ident(name));
                prev_was_value = false;
            }

            Tok::LPar => {
                let est_appel = matches!(ops.last(), Some(Tok::Ident(_)));
                ops.push(tok);
                paren_fonction.push(est_appel);
                if est_appel {
                    argc.push(1);
                }
                prev_was_value = false;
            }

            Tok::Virgule => {
                if !prev_was_value {
                    return Err("virgule mal placée".into());
                }
                // dépile jusqu'à '(' (sans la retirer)
                loop {
                    match ops.last() {
                        Some(Tok::LPar) => break,
                        None => return Err("virgule hors d'un appel de fonction".into()),
                        _ => {}
                    }
                    let top = ops.pop().unwrap();
                    out.push(top);
                }
                if paren_fonction.last() != Some(&true) {
                    return Err("virgule hors d'un appel de fonction".into());
                }
                *argc.last_mut().unwrap() += 1;
                prev_was_value = false;
            }

            Tok::RPar => {
                // dépile jusqu'à '('
                loop {
                    match ops.pop() {
                        Some(Tok::LPar) => break,
                        Some(top) => out.push(top),
                        None => return Err("parenthèse fermante sans ouvrante".into()),
                    }
                }

                // si c'était la parenthèse d'un appel, la fonction sort avec son arité
                if paren_fonction.pop() == Some(true) {
                    match ops.pop() {
                        Some(Tok::Ident(name)) => {
                            let n = argc.pop().unwrap();
                            out.push(Tok::Func(name, n));
                        }
                        _ => return Err("appel de fonction mal formé".into()),
                    }
                }

                prev_was_value = true;
            }

            Tok::Plus => {
                if !prev_was_value {
                    // plus unaire : sans effet
                    continue;
                }
                depile_binaire(&mut out, &mut ops, &Tok::Plus);
                ops.push(Tok::Plus);
                prev_was_value = false;
            }

            Tok::Minus => {
                if !prev_was_value {
                    // moins unaire : opérateur préfixe, empilé tel quel
                    // (pas d'opérande gauche => rien à dépiler)
                    ops.push(Tok::Neg);
                    continue;
                }
                depile_binaire(&mut out, &mut ops, &Tok::Minus);
                ops.push(Tok::Minus);
                prev_was_value = false;
            }

            Tok::Star | Tok::Slash | Tok::Percent | Tok::Puiss => {
                if !prev_was_value {
                    return Err("opérateur mal placé".into());
                }
                depile_binaire(&mut out, &mut ops, &tok);
                ops.push(tok);
                prev_was_value = false;
            }

            Tok::Neg | Tok::Func(_, _) => {
                return Err("jeton RPN inattendu en entrée".into());
            }
        }
    }

    // vide la pile ops
    while let Some(op) = ops.pop() {
        match op {
            Tok::LPar => return Err("parenthèses non fermées".into()),
            Tok::Ident(_) => return Err("fonction sans argument".into()),
            _ => out.push(op),
        }
    }

    Ok(out)
}

/// Dépile vers la sortie tant que:
/// - on n'est pas bloqué par '('
/// - on ne traverse pas une fonction (elle reste collée à son argument)
/// - la précédence/associativité exige de sortir l'opérateur du haut
fn depile_binaire(out: &mut Vec<Tok>, ops: &mut Vec<Tok>, tok: &Tok) {
    while let Some(top) = ops.last() {
        if matches!(top, Tok::LPar) {
            break;
        }
        if matches!(top, Tok::Ident(_)) {
            break;
        }

        let p_top = precedence(top);
        let p_tok = precedence(tok);

        let doit_pop = if is_right_associative(tok) {
            p_top > p_tok
        } else {
            p_top >= p_tok
        };

        if doit_pop {
            out.push(ops.pop().unwrap());
        } else {
            break;
        }
    }
}

/// Construit une Expr à partir d'une RPN.
pub fn from_rpn(rpn: &[Tok]) -> Result<Expr, String> {
    let mut st: Vec<Expr> = Vec::new();

    for tok in rpn.iter().cloned() {
        match tok {
            Tok::Num(v) => st.push(Expr::Num(v)),

            Tok::Neg => {
                let x = st.pop().ok_or("expression invalide")?;
                st.push(Expr::Neg(Box::new(x)));
            }

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Percent | Tok::Puiss => {
                let b = st.pop().ok_or("expression invalide")?;
                let a = st.pop().ok_or("expression invalide")?;

                let e = match tok {
                    Tok::Plus => Expr::Add(Box::new(a), Box::new(b)),
                    Tok::Minus => Expr::Sub(Box::new(a), Box::new(b)),
                    Tok::Star => Expr::Mul(Box::new(a), Box::new(b)),
                    Tok::Slash => Expr::Div(Box::new(a), Box::new(b)),
                    Tok::Percent => Expr::Mod(Box::new(a), Box::new(b)),
                    Tok::Puiss => Expr::Pow(Box::new(a), Box::new(b)),
                    _ => unreachable!(),
                };

                st.push(e);
            }

            Tok::Func(name, n) => {
                let e = match (name.as_str(), n) {
                    ("sqrt", 1) => {
                        let x = st.pop().ok_or("fonction sans argument")?;
                        Expr::Sqrt(Box::new(x))
                    }
                    ("abs", 1) => {
                        let x = st.pop().ok_or("fonction sans argument")?;
                        Expr::Abs(Box::new(x))
                    }
                    ("round", 1) => {
                        let x = st.pop().ok_or("fonction sans argument")?;
                        Expr::Round(Box::new(x), None)
                    }
                    ("round", 2) => {
                        let d = st.pop().ok_or("fonction sans argument")?;
                        let x = st.pop().ok_or("fonction sans argument")?;
                        Expr::Round(Box::new(x), Some(Box::new(d)))
                    }
                    ("sqrt" | "abs", _) => {
                        return Err(format!("{name} attend exactement 1 argument"));
                    }
                    ("round", _) => {
                        return Err("round attend 1 ou 2 arguments".into());
                    }
                    _ => return Err(format!("fonction inconnue: '{name}'")),
                };
                st.push(e);
            }

            Tok::Ident(name) => return Err(format!("identifiant inconnu: '{name}'")),

            Tok::LPar | Tok::RPar | Tok::Virgule => {
                return Err("parenthèse inattendue en RPN".into());
            }
        }
    }

    if st.len() != 1 {
        return Err("expression invalide".into());
    }
    Ok(st.pop().unwrap())
}

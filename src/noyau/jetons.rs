// src/noyau/jetons.rs

/// Garde-fou : nombre maximal de jetons par expression (anti-gel).
const MAX_JETONS: usize = 4096;

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    Num(f64),

    // Identifiant [a-zA-Z_][a-zA-Z0-9_]*, normalisé en minuscules.
    // NOTE: le parse (RPN->Expr) décide si c'est une fonction connue
    // (sqrt/abs/round) ; tout autre identifiant est une erreur de syntaxe.
    Ident(String),

    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Puiss, // ** (ou ^)

    Virgule,
    LPar,
    RPar,

    // RPN seulement — jamais produits par tokenize() :
    Neg,                 // moins unaire
    Func(String, usize), // fonction appliquée + nombre d'arguments
}

/// Tokenize une chaîne en jetons.
/// Supporte:
/// - nombres flottants (ex: 12, 3.14, .5, 5.)
/// - opérateurs + - * / % ** (et ^ comme alias de **)
/// - parenthèses ( ) et virgule (arguments de fonction)
/// - identifiants [a-zA-Z_][a-zA-Z0-9_]* (normalisés en minuscules)
pub fn tokenize(s: &str) -> Result<Vec<Tok>, String> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        if out.len() > MAX_JETONS {
            return Err("expression trop longue".into());
        }

        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        // Parenthèses + virgule
        if c == '(' {
            out.push(Tok::LPar);
            i += 1;
            continue;
        }
        if c == ')' {
            out.push(Tok::RPar);
            i += 1;
            continue;
        }
        if c == ',' {
            out.push(Tok::Virgule);
            i += 1;
            continue;
        }

        // Opérateurs
        match c {
            '+' => {
                out.push(Tok::Plus);
                i += 1;
                continue;
            }
            '-' => {
                out.push(Tok::Minus);
                i += 1;
                continue;
            }
            '*' => {
                // "**" = puissance, "*" seul = multiplication
                if i + 1 < chars.len() && chars[i + 1] == '*' {
                    out.push(Tok::Puiss);
                    i += 2;
                } else {
                    out.push(Tok::Star);
                    i += 1;
                }
                continue;
            }
            '/' => {
                out.push(Tok::Slash);
                i += 1;
                continue;
            }
            '%' => {
                out.push(Tok::Percent);
                i += 1;
                continue;
            }
            '^' => {
                out.push(Tok::Puiss);
                i += 1;
                continue;
            }
            _ => {}
        }

        // Identifiants ASCII : [a-zA-Z_][a-zA-Z0-9_]*
        if c.is_ascii_alphabetic() || c == '_' {
            let start = i;
            i += 1;
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect();
            out.push(Tok::Ident(word.to_lowercase()));
            continue;
        }

        // Nombre flottant : suite de chiffres et de points (".5" et "5." acceptés).
        // Un point mal placé ("1.2.3", ".") est rejeté par le parse f64.
        if c.is_ascii_digit() || c == '.' {
            let start = i;
            while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                i += 1;
            }
            let num_str: String = chars[start..i].iter().collect();
            let v: f64 = num_str
                .parse()
                .map_err(|_| format!("nombre invalide: '{num_str}'"))?;
            out.push(Tok::Num(v));
            continue;
        }

        return Err(format!("caractère inattendu: '{c}'"));
    }

    Ok(out)
}

//! src/noyau/moteur.rs
//!
//! Moteur d'expression : le tampon d'entrée et ses opérations d'édition.
//!
//! Rôle : accumuler les saisies (chiffres, opérateurs, fonctions) dans un
//! tampon texte, puis l'évaluer via le pipeline du noyau. Aucune notion
//! d'UI ici : la vue ne fait que déclencher ces opérations et afficher.
//!
//! Contrats :
//! - Le tampon reste à tout instant le préfixe d'une expression évaluable
//!   (les parenthèses peuvent être déséquilibrées en cours de saisie ;
//!   c'est l'évaluation qui tranche).
//! - evalue() ne panique jamais : valeur ou ErreurCalc.
//! - Après un succès, le tampon contient le résultat rendu en texte, pour
//!   enchaîner les calculs ; après une erreur, il est vidé pour resaisir.

use super::eval::{eval_expression, ErreurCalc};
use super::format::format_resultat;

#[derive(Clone, Debug, Default)]
pub struct MoteurExpression {
    entree: String,

    // true juste après une évaluation réussie : la prochaine saisie d'un
    // chiffre démarre un nouveau calcul, un opérateur enchaîne.
    resultat_frais: bool,
}

impl MoteurExpression {
    /// Le tampon courant, tel qu'affiché.
    pub fn entree(&self) -> &str {
        &self.entree
    }

    pub fn est_vide(&self) -> bool {
        self.entree.is_empty()
    }

    /* ------------------------ Édition ------------------------ */

    /// Ajoute un jeton (éventuellement multi-caractères : "sqrt(", "**").
    /// Seule validation à la saisie : pas de second point dans le même
    /// nombre. Tout le reste est tranché à l'évaluation.
    pub fn ajoute(&mut self, jeton: &str) {
        if jeton.is_empty() {
            return;
        }

        if self.resultat_frais {
            // un chiffre (ou un point) démarre un nouveau calcul
            if jeton.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
                self.entree.clear();
            }
            self.resultat_frais = false;
        }

        if jeton == "." && self.nombre_courant().contains('.') {
            return;
        }

        self.entree.push_str(jeton);
    }

    /// Efface le dernier caractère. Sans effet sur un tampon vide.
    pub fn retour(&mut self) {
        self.entree.pop();
        self.resultat_frais = false;
    }

    /// Vide le tampon.
    pub fn efface(&mut self) {
        self.entree.clear();
        self.resultat_frais = false;
    }

    /// Bascule le signe du nombre en cours de saisie (la fin contiguë
    /// chiffres/point du tampon), par insertion ou retrait d'un '-' unaire.
    ///
    /// Sans nombre en cours :
    /// - tampon vide            => "-" (on démarre un nombre négatif)
    /// - tampon terminé par ')' => négation du groupe entier "-(...)",
    ///   ou dé-négation si le tampon est déjà exactement "-(...)"
    /// - '-' unaire en fin      => retiré (bascule inverse)
    /// - sinon (après opérateur, '(' ou ',') => '-' ajouté
    ///
    /// Chaque branche est sa propre inverse et laisse le tampon préfixe
    /// d'une expression évaluable.
    pub fn bascule_signe(&mut self) {
        self.resultat_frais = false;

        let nombre = self.nombre_courant();
        if !nombre.is_empty() {
            let coupe = self.entree.len() - nombre.len();
            if Self::moins_unaire_en(&self.entree, coupe) {
                self.entree.remove(coupe - 1);
            } else {
                self.entree.insert(coupe, '-');
            }
            return;
        }

        if self.entree.is_empty() {
            self.entree.push('-');
            return;
        }

        if self.entree.ends_with(')') {
            if let Some(interieur) = Self::depouille_negation(&self.entree) {
                self.entree = interieur;
            } else {
                self.entree.insert_str(0, "-(");
                self.entree.push(')');
            }
            return;
        }

        if Self::moins_unaire_en(&self.entree, self.entree.len()) {
            self.entree.pop();
            return;
        }

        self.entree.push('-');
    }

    /* ------------------------ Évaluation ------------------------ */

    /// Évalue le tampon.
    /// - Succès : le tampon devient le résultat en texte (enchaînement),
    ///   et la valeur est retournée.
    /// - Erreur : le tampon est vidé (resaisie) et l'erreur typée remonte.
    pub fn evalue(&mut self) -> Result<f64, ErreurCalc> {
        match eval_expression(&self.entree) {
            Ok(v) => {
                self.entree = format_resultat(v);
                self.resultat_frais = true;
                Ok(v)
            }
            Err(e) => {
                self.entree.clear();
                self.resultat_frais = false;
                Err(e)
            }
        }
    }

    /* ------------------------ Outils internes ------------------------ */

    /// La fin contiguë chiffres/point du tampon (le nombre en cours de
    /// saisie), éventuellement vide.
    fn nombre_courant(&self) -> &str {
        let prefixe = self
            .entree
            .trim_end_matches(|c: char| c.is_ascii_digit() || c == '.');
        &self.entree[prefixe.len()..]
    }

    /// Vrai si le caractère juste avant `pos` est un '-' unaire : en tête
    /// d'entrée, ou précédé d'un opérateur, d'une '(' ou d'une virgule.
    fn moins_unaire_en(entree: &str, pos: usize) -> bool {
        let avant = &entree[..pos];
        if !avant.ends_with('-') {
            return false;
        }
        let reste = &avant[..avant.len() - 1];
        match reste.chars().rev().find(|c| !c.is_whitespace()) {
            None => true,
            Some(c) => matches!(c, '+' | '-' | '*' | '/' | '%' | '(' | ','),
        }
    }

    /// Si l'entrée est exactement "-(X)" avec la parenthèse de tête fermée
    /// en toute fin, retourne X.
    fn depouille_negation(entree: &str) -> Option<String> {
        let interieur = entree.strip_prefix("-(")?.strip_suffix(')')?;
        let mut profondeur = 0i32;
        for c in interieur.chars() {
            match c {
                '(' => profondeur += 1,
                ')' => {
                    profondeur -= 1;
                    if profondeur < 0 {
                        return None;
                    }
                }
                _ => {}
            }
        }
        (profondeur == 0).then(|| interieur.to_string())
    }
}

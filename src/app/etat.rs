//! src/app/etat.rs
//!
//! État UI (sans vue, sans parsing).
//!
//! Rôle : contenir l'état de la calculatrice (moteur d'expression + message
//! d'erreur) et offrir les actions boutons/clavier, sans logique d'affichage.
//!
//! Contrats :
//! - Aucune évaluation ici : tout passe par le moteur (noyau).
//! - Actions déterministes, sans effet de bord caché.
//! - Toute édition efface le message d'erreur : l'utilisateur resaisit.

use crate::noyau::MoteurExpression;

#[derive(Clone, Debug, Default)]
pub struct AppCalc {
    // --- moteur (tampon d'entrée + évaluation) ---
    moteur: MoteurExpression,

    // --- sortie erreur (si la dernière évaluation a échoué) ---
    pub erreur: String,
}

impl AppCalc {
    /// Texte de l'écran principal (le tampon en cours).
    pub fn affichage(&self) -> &str {
        self.moteur.entree()
    }

    /* ------------------------ Actions boutons/clavier ------------------------ */

    /// C / Échap : tout effacer (entrée + erreur).
    pub fn efface(&mut self) {
        self.moteur.efface();
        self.erreur.clear();
    }

    /// ⌫ : retire le dernier caractère.
    pub fn retour(&mut self) {
        self.erreur.clear();
        self.moteur.retour();
    }

    /// +/- : bascule le signe du nombre en cours de saisie.
    pub fn bascule_signe(&mut self) {
        self.erreur.clear();
        self.moteur.bascule_signe();
    }

    /// Saisie d'un jeton (bouton du pavé ou frappe clavier).
    pub fn saisie(&mut self, jeton: &str) {
        self.erreur.clear();
        self.moteur.ajoute(jeton);
    }

    /// = / Entrée : évalue l'entrée courante.
    /// Entrée vide : sans effet (ce n'est pas une erreur à l'écran).
    pub fn evalue(&mut self) {
        if self.moteur.est_vide() {
            return;
        }
        match self.moteur.evalue() {
            Ok(_) => self.erreur.clear(),
            Err(e) => self.erreur = format!("Erreur : {e}"),
        }
    }
}

// src/app/vue.rs
//
// Vue (UI egui) — natif + web
// ---------------------------
// Objectifs :
// - Même AppCalc (etat.rs) pour natif + wasm
// - Clavier : chiffres/opérateurs saisissent, Entrée évalue, Backspace efface
//   (Échap est géré globalement dans app.rs)
// - Tactile : gros boutons, pavé 4 colonnes
//
// Note :
// - L'écran est un rendu pur (pas de TextEdit) : chaque action utilisateur
//   passe par une méthode de etat.rs, jamais par une édition directe du texte.

use eframe::egui;

use super::etat::AppCalc;

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        // Densité "calc"
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        self.clavier(ui);

        ui.heading("Calculatrice Simple");
        ui.add_space(6.0);

        self.ui_ecran(ui);

        ui.add_space(8.0);

        self.ui_pave(ui);

        ui.add_space(6.0);
        ui.small("Fonctions : sqrt(x), abs(x), round(x, n)");
    }

    /* ------------------------ Clavier ------------------------ */

    /// Frappe clavier -> actions d'état.
    /// On consomme les évènements texte plutôt que les touches une à une :
    /// même comportement natif + web, pas de double déclenchement.
    fn clavier(&mut self, ui: &mut egui::Ui) {
        let evenements = ui.input(|i| i.events.clone());
        for ev in evenements {
            match ev {
                egui::Event::Text(texte) => {
                    for c in texte.chars() {
                        let c = c.to_ascii_lowercase();
                        if Self::car_autorise(c) {
                            self.saisie(&c.to_string());
                        }
                    }
                }
                egui::Event::Key {
                    key: egui::Key::Enter,
                    pressed: true,
                    ..
                } => self.evalue(),
                egui::Event::Key {
                    key: egui::Key::Backspace,
                    pressed: true,
                    ..
                } => self.retour(),
                _ => {}
            }
        }
    }

    /// Caractères saisissables au clavier : le jeu de jetons du noyau
    /// (les lettres servent à taper sqrt/abs/round).
    fn car_autorise(c: char) -> bool {
        c.is_ascii_digit()
            || c.is_ascii_lowercase()
            || matches!(c, '.' | '+' | '-' | '*' | '/' | '%' | '^' | '(' | ')' | ',')
    }

    /* ------------------------ Écran ------------------------ */

    fn ui_ecran(&mut self, ui: &mut egui::Ui) {
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.set_min_width(ui.available_width());
                ui.set_min_height(2.0 * ui.text_style_height(&egui::TextStyle::Monospace));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let texte = if self.affichage().is_empty() {
                        "0"
                    } else {
                        self.affichage()
                    };
                    ui.monospace(egui::RichText::new(texte).size(24.0));
                });
            });

        if !self.erreur.is_empty() {
            ui.colored_label(ui.visuals().error_fg_color, &self.erreur);
        }
    }

    /* ------------------------ Pavé ------------------------ */

    fn ui_pave(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("pave_calculatrice")
            .num_columns(4)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                self.bouton_action(ui, "C", "Tout effacer", Action::Efface);
                self.bouton_action(ui, "⌫", "Efface le dernier caractère", Action::Retour);
                self.bouton_insert(ui, "%", "%");
                self.bouton_insert(ui, "/", "/");
                ui.end_row();

                self.bouton_insert(ui, "7", "7");
                self.bouton_insert(ui, "8", "8");
                self.bouton_insert(ui, "9", "9");
                self.bouton_insert(ui, "*", "*");
                ui.end_row();

                self.bouton_insert(ui, "4", "4");
                self.bouton_insert(ui, "5", "5");
                self.bouton_insert(ui, "6", "6");
                self.bouton_insert(ui, "-", "-");
                ui.end_row();

                self.bouton_insert(ui, "1", "1");
                self.bouton_insert(ui, "2", "2");
                self.bouton_insert(ui, "3", "3");
                self.bouton_insert(ui, "+", "+");
                ui.end_row();

                self.bouton_action(ui, "+/-", "Bascule le signe", Action::BasculeSigne);
                self.bouton_insert(ui, "0", "0");
                self.bouton_insert(ui, ".", ".");
                self.bouton_action(ui, "=", "Évalue l'expression", Action::Evalue);
                ui.end_row();

                self.bouton_insert(ui, "(", "(");
                self.bouton_insert(ui, ")", ")");
                self.bouton_insert(ui, ",", ",");
                self.bouton_insert(ui, "sqrt", "sqrt(");
                ui.end_row();

                self.bouton_insert(ui, "abs", "abs(");
                self.bouton_insert(ui, "round", "round(");
                ui.label("");
                ui.label("");
                ui.end_row();
            });
    }

    fn bouton_action(&mut self, ui: &mut egui::Ui, label: &str, tip: &str, action: Action) {
        let resp = ui
            .add_sized([56.0, 32.0], egui::Button::new(label))
            .on_hover_text(tip);

        if resp.clicked() {
            match action {
                Action::Efface => self.efface(),
                Action::Retour => self.retour(),
                Action::BasculeSigne => self.bascule_signe(),
                Action::Evalue => self.evalue(),
            }
        }
    }

    fn bouton_insert(&mut self, ui: &mut egui::Ui, label: &str, to_insert: &str) {
        let resp = ui.add_sized([56.0, 32.0], egui::Button::new(label));
        if resp.clicked() && !to_insert.is_empty() {
            self.saisie(to_insert);
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum Action {
    Efface,
    Retour,
    BasculeSigne,
    Evalue,
}

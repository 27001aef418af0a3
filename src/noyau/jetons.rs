// src/noyau/jetons.rs
//
// Tokenisation
// ------------
// Ordre des règles :
// 1) on retire tous les blancs
// 2) virgule décimale => point
// 3) repli des suites de signes (--5 => +5, ---5 => -5, +-5 => -5)
// 4) moins unaire : en tête, après '(' ou après un opérateur => porté par le littéral
//    (devant '(' : groupe entouré et multiplié par -1)
// 5) découpage : littéraux, + - * / ^, ( )
//
// Le tokenizer n’échoue jamais : un littéral illisible (1.2.3, abc) ne sera
// refusé qu’à la lecture décimale (NumberFormat).

use std::fmt;

/// Littéral numérique : texte brut + drapeau “moins unaire”.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Litteral {
    pub texte: String,
    pub negatif: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Tok {
    Num(Litteral),

    Plus,
    Minus,
    Star,
    Slash,
    Caret, // ^

    LPar,
    RPar,
}

impl Tok {
    /// Raccourci (tests, démarche).
    pub fn num(texte: &str, negatif: bool) -> Tok {
        Tok::Num(Litteral {
            texte: texte.to_string(),
            negatif,
        })
    }
}

impl fmt::Display for Tok {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tok::Num(l) if l.negatif => write!(f, "-{}", l.texte),
            Tok::Num(l) => f.write_str(&l.texte),

            Tok::Plus => f.write_str("+"),
            Tok::Minus => f.write_str("-"),
            Tok::Star => f.write_str("*"),
            Tok::Slash => f.write_str("/"),
            Tok::Caret => f.write_str("^"),

            Tok::LPar => f.write_str("("),
            Tok::RPar => f.write_str(")"),
        }
    }
}

fn is_signe(c: char) -> bool {
    c == '+' || c == '-'
}

fn is_separateur(c: char) -> bool {
    matches!(c, '+' | '-' | '*' | '/' | '^' | '(' | ')')
}

/// Règles 1 à 3 : blancs, virgule, suites de signes.
///
/// Une suite de signes se replie en un seul : '-' si le nombre de '-' est
/// impair, '+' sinon. C’est le point fixe de “-- => +” appliqué en boucle.
pub fn normalise(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .peekable();

    while let Some(c) = chars.next() {
        if !is_signe(c) {
            out.push(c);
            continue;
        }

        let mut impair = c == '-';
        while let Some(&suivant) = chars.peek() {
            if !is_signe(suivant) {
                break;
            }
            if suivant == '-' {
                impair = !impair;
            }
            chars.next();
        }
        out.push(if impair { '-' } else { '+' });
    }

    out
}

/// Tokenize une chaîne en jetons (voir règles en tête de fichier).
///
/// Moins unaire :
/// - devant un littéral => `Num { negatif: true }`
/// - devant '(' => `( -1 * ( ... ) )` : la parenthèse ajoutée se ferme avec
///   le groupe, le signe ne s’applique qu’à lui (8/-(2) = 8/(-1*(2)))
/// - devant rien d’utilisable => laissé en `Minus` (l’évaluation échouera)
///
/// Plus unaire : ignoré.
pub fn tokenize(s: &str) -> Vec<Tok> {
    let norm = normalise(s);
    let chars: Vec<char> = norm.chars().collect();
    let mut out: Vec<Tok> = Vec::new();
    let mut i: usize = 0;

    // vrai si le jeton précédent est une valeur (littéral ou ')')
    let mut prev_was_value = false;

    // profondeur des '(' de l’entrée ; une entrée par '-(' en attente de sa ')' ajoutée
    let mut profondeur: usize = 0;
    let mut fermetures: Vec<usize> = Vec::new();

    while i < chars.len() {
        let c = chars[i];

        match c {
            '(' => {
                out.push(Tok::LPar);
                profondeur += 1;
                prev_was_value = false;
                i += 1;
            }
            ')' => {
                out.push(Tok::RPar);
                profondeur = profondeur.saturating_sub(1);
                while fermetures.last() == Some(&profondeur) {
                    fermetures.pop();
                    out.push(Tok::RPar);
                }
                prev_was_value = true;
                i += 1;
            }
            '*' | '/' | '^' => {
                out.push(match c {
                    '*' => Tok::Star,
                    '/' => Tok::Slash,
                    _ => Tok::Caret,
                });
                prev_was_value = false;
                i += 1;
            }
            '+' if !prev_was_value => {
                // plus unaire : neutre
                i += 1;
            }
            '+' => {
                out.push(Tok::Plus);
                prev_was_value = false;
                i += 1;
            }
            '-' if !prev_was_value => {
                i += 1;
                match chars.get(i) {
                    Some(&n) if !is_separateur(n) => {
                        let (texte, fin) = lire_litteral(&chars, i);
                        out.push(Tok::Num(Litteral {
                            texte,
                            negatif: true,
                        }));
                        prev_was_value = true;
                        i = fin;
                    }
                    Some(&'(') => {
                        out.push(Tok::LPar);
                        out.push(Tok::num("1", true));
                        out.push(Tok::Star);
                        fermetures.push(profondeur);
                        prev_was_value = false;
                    }
                    _ => {
                        out.push(Tok::Minus);
                        prev_was_value = false;
                    }
                }
            }
            '-' => {
                out.push(Tok::Minus);
                prev_was_value = false;
                i += 1;
            }
            _ => {
                let (texte, fin) = lire_litteral(&chars, i);
                out.push(Tok::Num(Litteral {
                    texte,
                    negatif: false,
                }));
                prev_was_value = true;
                i = fin;
            }
        }
    }

    out
}

/// Suite maximale de caractères hors opérateurs/parenthèses, à partir de `debut`.
fn lire_litteral(chars: &[char], debut: usize) -> (String, usize) {
    let mut fin = debut;
    while fin < chars.len() && !is_separateur(chars[fin]) {
        fin += 1;
    }
    (chars[debut..fin].iter().collect(), fin)
}

/// Format utilitaire (debug/“démarche”) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    tokens
        .iter()
        .map(Tok::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

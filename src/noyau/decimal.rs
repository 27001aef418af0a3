// src/noyau/decimal.rs
//
// Décimal en précision arbitraire : valeur = unscaled × 10^(-scale)
// ---------------------------------------------------------------
// - scale < 0 possible après arrondi significatif (1073742 × 10^3) : la valeur
//   reste compacte, seul l’affichage écrit les zéros
// - scale toujours dans l’intervalle i32 ; au-delà => ExponentOutOfRange
// - + - * exacts
// - / à échelle fixe, arrondi au pair (half-even)
// - ^ entier sous contexte de précision (chiffres significatifs)
//
// L’égalité dérivée est structurelle : 2.50 != 2.5 (utiliser strip_trailing_zeros).

use std::cmp::Ordering;
use std::fmt;
use std::ops::Neg;
use std::str::FromStr;

use num_bigint::BigInt;
use num_traits::{One, Signed, ToPrimitive, Zero};

use super::erreur::CalcError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Decimal {
    unscaled: BigInt,
    scale: i64,
}

/* ------------------------ Outils BigInt ------------------------ */

fn pow10(n: u32) -> BigInt {
    BigInt::from(10).pow(n)
}

/// Échelle représentable (bornes i32), sinon la grandeur est hors limites.
fn echelle_bornee(scale: i64) -> Result<i64, CalcError> {
    if i32::try_from(scale).is_ok() {
        Ok(scale)
    } else {
        Err(CalcError::ExponentOutOfRange(format!("10^{}", -i128::from(scale))))
    }
}

/// Écart d’échelle en exposant de 10.
fn ecart(k: i64) -> Result<u32, CalcError> {
    u32::try_from(k).map_err(|_| CalcError::ExponentOutOfRange(format!("10^{k}")))
}

/// Nombre de chiffres décimaux de |x| (0 compte pour 1).
fn nb_chiffres(x: &BigInt) -> u32 {
    x.magnitude().to_str_radix(10).len() as u32
}

/// num / den arrondi au pair. den != 0.
fn div_arrondi_pair(num: &BigInt, den: &BigInt) -> BigInt {
    let q = num / den;
    let r = num % den;
    if r.is_zero() {
        return q;
    }

    // signe du quotient “vrai” (r != 0 donc num != 0)
    let negatif = num.is_negative() != den.is_negative();
    let pas = if negatif { -BigInt::one() } else { BigInt::one() };

    let deux_r = r.abs() * 2u32;
    match deux_r.cmp(&den.abs()) {
        Ordering::Less => q,
        Ordering::Greater => q + pas,
        Ordering::Equal => {
            if (&q % BigInt::from(2)).is_zero() {
                q
            } else {
                q + pas
            }
        }
    }
}

impl Decimal {
    pub fn zero() -> Self {
        Self {
            unscaled: BigInt::zero(),
            scale: 0,
        }
    }

    pub fn one() -> Self {
        Self {
            unscaled: BigInt::one(),
            scale: 0,
        }
    }

    /// Lit le texte d’un littéral (chiffres + au plus un point), signe séparé.
    ///
    /// Accepte `12`, `12.5`, `.5`, `5.` ; refuse le reste avec `NumberFormat`.
    pub fn from_litteral(texte: &str, negatif: bool) -> Result<Self, CalcError> {
        let invalide = || {
            CalcError::NumberFormat(if negatif {
                format!("-{texte}")
            } else {
                texte.to_string()
            })
        };

        let mut chiffres = String::with_capacity(texte.len());
        let mut point_vu = false;
        let mut scale: i64 = 0;

        for c in texte.chars() {
            match c {
                '0'..='9' => {
                    chiffres.push(c);
                    if point_vu {
                        scale += 1;
                    }
                }
                '.' if !point_vu => point_vu = true,
                _ => return Err(invalide()),
            }
        }

        if chiffres.is_empty() {
            return Err(invalide());
        }

        let mut unscaled = BigInt::parse_bytes(chiffres.as_bytes(), 10).ok_or_else(invalide)?;
        if negatif {
            unscaled = -unscaled;
        }

        Ok(Self {
            unscaled,
            scale: echelle_bornee(scale)?,
        })
    }

    pub fn is_zero(&self) -> bool {
        self.unscaled.is_zero()
    }

    pub fn scale(&self) -> i64 {
        self.scale
    }

    /// Met les deux mantisses à la même échelle.
    fn aligne(&self, other: &Decimal) -> Result<(BigInt, BigInt, i64), CalcError> {
        Ok(match self.scale.cmp(&other.scale) {
            Ordering::Equal => (self.unscaled.clone(), other.unscaled.clone(), self.scale),
            Ordering::Less => (
                &self.unscaled * pow10(ecart(other.scale - self.scale)?),
                other.unscaled.clone(),
                other.scale,
            ),
            Ordering::Greater => (
                self.unscaled.clone(),
                &other.unscaled * pow10(ecart(self.scale - other.scale)?),
                self.scale,
            ),
        })
    }

    /// Somme exacte.
    pub fn ajoute(&self, other: &Decimal) -> Result<Decimal, CalcError> {
        let (a, b, scale) = self.aligne(other)?;
        Ok(Self {
            unscaled: a + b,
            scale,
        })
    }

    /// Différence exacte.
    pub fn soustrait(&self, other: &Decimal) -> Result<Decimal, CalcError> {
        let (a, b, scale) = self.aligne(other)?;
        Ok(Self {
            unscaled: a - b,
            scale,
        })
    }

    /// Produit exact ; les échelles s’additionnent et doivent rester bornées.
    pub fn multiplie(&self, other: &Decimal) -> Result<Decimal, CalcError> {
        Ok(Self {
            unscaled: &self.unscaled * &other.unscaled,
            scale: echelle_bornee(self.scale + other.scale)?,
        })
    }

    /// Quotient à `echelle` chiffres après la virgule, arrondi au pair.
    pub fn div_echelle(&self, other: &Decimal, echelle: i64) -> Result<Decimal, CalcError> {
        if other.is_zero() {
            return Err(CalcError::DivisionByZero);
        }

        // q = self.unscaled × 10^(echelle + other.scale - self.scale) / other.unscaled
        let echelle = echelle_bornee(echelle)?;
        let k = echelle + other.scale - self.scale;
        let q = if k >= 0 {
            div_arrondi_pair(&(&self.unscaled * pow10(ecart(k)?)), &other.unscaled)
        } else {
            div_arrondi_pair(&self.unscaled, &(&other.unscaled * pow10(ecart(-k)?)))
        };

        Ok(Self {
            unscaled: q,
            scale: echelle,
        })
    }

    /// Quotient arrondi à `precision` chiffres significatifs.
    fn div_precision(&self, other: &Decimal, precision: u32) -> Result<Decimal, CalcError> {
        if other.is_zero() {
            return Err(CalcError::DivisionByZero);
        }

        // ordre de grandeur (chiffres avant la virgule) de chaque opérande
        let ent_a = nb_chiffres(&self.unscaled) as i64 - self.scale;
        let ent_b = nb_chiffres(&other.unscaled) as i64 - other.scale;
        let echelle = precision as i64 - (ent_a - ent_b) + 2;

        self.div_echelle(other, echelle)?
            .arrondi_significatif(precision)
    }

    /// Arrondi au pair à `precision` chiffres significatifs.
    pub fn arrondi_significatif(&self, precision: u32) -> Result<Decimal, CalcError> {
        let n = nb_chiffres(&self.unscaled);
        if self.is_zero() || n <= precision {
            return Ok(self.clone());
        }

        let retire = n - precision;
        Ok(Self {
            unscaled: div_arrondi_pair(&self.unscaled, &pow10(retire)),
            scale: echelle_bornee(self.scale - i64::from(retire))?,
        })
    }

    /// Puissance entière sous contexte de précision.
    ///
    /// - n = 0 => 1 (y compris 0^0)
    /// - n < 0 => 1 / x^|n| (0 => `DivisionByZero`)
    /// - |n| doit tenir en `precision` chiffres, sinon `ExponentOutOfRange`
    ///
    /// Les produits intermédiaires sont arrondis à `precision + chiffres(|n|) + 1`.
    /// Une échelle qui sort des bornes i32 donne `ExponentOutOfRange`.
    pub fn pow_contexte(&self, n: i64, precision: u32) -> Result<Decimal, CalcError> {
        if n == 0 {
            return Ok(Decimal::one());
        }

        let mag = n.unsigned_abs();
        let elength = mag.to_string().len() as u32;
        if elength > precision {
            return Err(CalcError::ExponentOutOfRange(n.to_string()));
        }
        let travail = precision + elength + 1;

        let mut acc = Decimal::one();
        let mut base = self.clone();
        let mut e = mag;

        while e > 0 {
            if (e & 1) == 1 {
                acc = acc.multiplie(&base)?.arrondi_significatif(travail)?;
            }
            e >>= 1;
            if e > 0 {
                base = base.multiplie(&base)?.arrondi_significatif(travail)?;
            }
        }

        if n < 0 {
            acc = Decimal::one().div_precision(&acc, travail)?;
        }

        acc.arrondi_significatif(precision)
    }

    /// Partie entière (troncature vers zéro) en i64, pour un exposant.
    pub fn tronque_i64(&self) -> Result<i64, CalcError> {
        let hors_limites = || CalcError::ExponentOutOfRange(self.to_string());

        // plus de décimales que de chiffres : |x| < 1
        if self.scale >= nb_chiffres(&self.unscaled) as i64 {
            return Ok(0);
        }

        let entier = if self.scale >= 0 {
            &self.unscaled / pow10(ecart(self.scale)?)
        } else {
            // i64 ne dépasse pas 19 chiffres : inutile de développer au-delà
            let ordre = nb_chiffres(&self.unscaled) as i64 - self.scale;
            if ordre > 19 {
                return Err(CalcError::ExponentOutOfRange(format!("10^{}", ordre - 1)));
            }
            &self.unscaled * pow10(ecart(-self.scale)?)
        };
        entier.to_i64().ok_or_else(hors_limites)
    }

    /// Retire les zéros après la virgule (on ne descend pas sous l’échelle 0).
    pub fn strip_trailing_zeros(&self) -> Decimal {
        if self.is_zero() {
            return Decimal::zero();
        }

        let dix = BigInt::from(10);
        let mut unscaled = self.unscaled.clone();
        let mut scale = self.scale;
        while scale > 0 && (&unscaled % &dix).is_zero() {
            unscaled /= &dix;
            scale -= 1;
        }
        Self { unscaled, scale }
    }
}

/* ------------------------ Signe ------------------------ */

impl Neg for Decimal {
    type Output = Decimal;

    fn neg(self) -> Decimal {
        Decimal {
            unscaled: -self.unscaled,
            scale: self.scale,
        }
    }
}

/* ------------------------ Texte ------------------------ */

impl FromStr for Decimal {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.strip_prefix('-') {
            Some(reste) => Decimal::from_litteral(reste, true),
            None => Decimal::from_litteral(s, false),
        }
    }
}

/// Notation simple, jamais scientifique (100 reste “100”, 1073742 × 10^3 s’écrit en entier).
impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut digits = self.unscaled.magnitude().to_str_radix(10);

        if self.scale > 0 {
            let scale = usize::try_from(self.scale).map_err(|_| fmt::Error)?;
            if digits.len() <= scale {
                digits = "0".repeat(scale + 1 - digits.len()) + &digits;
            }
            digits.insert(digits.len() - scale, '.');
        } else if self.scale < 0 && !self.is_zero() {
            let zeros = usize::try_from(-self.scale).map_err(|_| fmt::Error)?;
            digits.push_str(&"0".repeat(zeros));
        }

        if self.unscaled.is_negative() {
            write!(f, "-{digits}")
        } else {
            f.write_str(&digits)
        }
    }
}

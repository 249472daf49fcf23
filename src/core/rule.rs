// =============================================================================
// RULE — Les règles "life-like" (naissance / survie)
// =============================================================================
//
// Une règle life-like ne dépend que de deux choses :
//   - l'état courant de la cellule (vivante / morte)
//   - le nombre de voisines vivantes (0 à 8)
//
// On la note avec une rulestring : B<naissance>/S<survie>.
//   Conway   = B3/S23   (naît avec 3, survit avec 2 ou 3)
//   HighLife = B36/S23
//   Seeds    = B2/S     (aucune survie)
//
// La table de Conway :
//
//   | état    | voisines | suivant |
//   |---------|----------|---------|
//   | vivante | < 2      | morte   |
//   | vivante | 2 ou 3   | vivante |
//   | vivante | > 3      | morte   |
//   | morte   | 3        | vivante |
//   | morte   | autre    | morte   |
//
// Formats acceptés : "B3/S23", "b3/s23", "S23/B3" et l'ancienne notation
// "23/3" (survie/naissance, sans lettres).
//
// =============================================================================

use std::str::FromStr;
use serde::{Deserialize, Serialize};
use super::error::RuleError;

/// Ensembles naissance/survie indexés par le nombre de voisines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rule {
    birth: [bool; 9],
    survival: [bool; 9],
}

impl Rule {
    /// Construit une règle à partir des listes de comptes
    pub fn new(birth: &[u8], survival: &[u8]) -> Self {
        let mut rule = Rule {
            birth: [false; 9],
            survival: [false; 9],
        };
        for &n in birth.iter().filter(|&&n| n <= 8) {
            rule.birth[n as usize] = true;
        }
        for &n in survival.iter().filter(|&&n| n <= 8) {
            rule.survival[n as usize] = true;
        }
        rule
    }

    /// B3/S23
    pub fn conway() -> Self {
        Rule::new(&[3], &[2, 3])
    }

    /// B36/S23
    pub fn highlife() -> Self {
        Rule::new(&[3, 6], &[2, 3])
    }

    /// B2/S
    pub fn seeds() -> Self {
        Rule::new(&[2], &[])
    }

    /// L'état suivant d'une cellule selon son état et ses voisines vivantes.
    pub fn next_state(&self, alive: bool, live_neighbors: usize) -> bool {
        let table = if alive { &self.survival } else { &self.birth };
        table.get(live_neighbors).copied().unwrap_or(false)
    }

    pub fn is_birth(&self, live_neighbors: usize) -> bool {
        self.next_state(false, live_neighbors)
    }

    pub fn is_survival(&self, live_neighbors: usize) -> bool {
        self.next_state(true, live_neighbors)
    }
}

impl Default for Rule {
    fn default() -> Self {
        Rule::conway()
    }
}

/// "236" → {2, 3, 6}
fn parse_counts(digits: &str) -> Result<[bool; 9], RuleError> {
    let mut counts = [false; 9];
    for c in digits.chars() {
        match c.to_digit(10) {
            Some(n) if n <= 8 => counts[n as usize] = true,
            _ => return Err(RuleError::InvalidDigit(c)),
        }
    }
    Ok(counts)
}

/// Sépare la lettre de tête ('B' ou 'S') des chiffres
fn split_tag(part: &str) -> (Option<char>, &str) {
    match part.chars().next() {
        Some(c) if c.is_ascii_alphabetic() => (Some(c.to_ascii_uppercase()), &part[1..]),
        _ => (None, part),
    }
}

impl FromStr for Rule {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(RuleError::Empty);
        }
        let (left, right) = s
            .split_once('/')
            .ok_or_else(|| RuleError::MissingSeparator(s.to_string()))?;

        let (birth, survival) = match (split_tag(left.trim()), split_tag(right.trim())) {
            ((Some('B'), born), (Some('S'), kept)) => (born, kept),
            ((Some('S'), kept), (Some('B'), born)) => (born, kept),
            // Notation historique : survie/naissance
            ((None, kept), (None, born)) => (born, kept),
            _ => return Err(RuleError::Malformed(s.to_string())),
        };

        Ok(Rule {
            birth: parse_counts(birth)?,
            survival: parse_counts(survival)?,
        })
    }
}

impl TryFrom<String> for Rule {
    type Error = RuleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rule> for String {
    fn from(rule: Rule) -> Self {
        rule.to_string()
    }
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let digits = |table: &[bool; 9]| -> String {
            table
                .iter()
                .enumerate()
                .filter(|(_, on)| **on)
                .map(|(n, _)| char::from(b'0' + n as u8))
                .collect()
        };
        write!(f, "B{}/S{}", digits(&self.birth), digits(&self.survival))
    }
}

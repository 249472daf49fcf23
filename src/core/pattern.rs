// =============================================================================
// PATTERN — Les motifs finis qui ensemencent une grille infinie
// =============================================================================
//
// Une grille est une FONCTION Coord → bool, mais on la fabrique presque
// toujours à partir d'un ensemble FINI de cellules vivantes : tout ce qui
// n'est pas listé est mort. La lookup obtenue est donc totale sur toutes
// les coordonnées entières, ce qu'exige le Store.
//
// Deux formats textuels usuels :
//
//   Plaintext (.cells)          RLE
//   ------------------          ---
//   !Name: Glider               #N Glider
//   .O.                         x = 3, y = 3, rule = B3/S23
//   ..O                         bo$2bo$3o!
//   OOO
//
// En RLE : `b` = morte, `o` = vivante, `$` = fin de ligne, `!` = fin du
// motif, un entier devant une lettre répète la lettre.
//
// Le catalogue reprend les motifs classiques, normalisés pour que leur
// boîte englobante commence à l'origine.
//
// =============================================================================

use std::collections::BTreeSet;
use tracing::debug;
use super::coord::{Coord, Viewport};
use super::error::PatternError;
use super::life::Grid;
use super::rule::Rule;
use super::store::Store;

/// Plus longue répétition acceptée dans un RLE
pub const MAX_RUN: i64 = 1_000_000;

/// Un ensemble fini de cellules vivantes, avec un nom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    pub name: String,
    pub cells: BTreeSet<Coord>,
}

impl Pattern {
    /// Motif vide
    pub fn new(name: &str) -> Self {
        Pattern {
            name: name.to_string(),
            cells: BTreeSet::new(),
        }
    }

    /// Motif à partir de couples (ligne, colonne)
    pub fn from_cells<It>(name: &str, cells: It) -> Self
    where
        It: IntoIterator<Item = (i64, i64)>,
    {
        Pattern {
            name: name.to_string(),
            cells: cells.into_iter().map(Coord::from).collect(),
        }
    }

    /// Ajoute une cellule vivante
    pub fn add_cell(&mut self, coord: Coord) -> &mut Self {
        self.cells.insert(coord);
        self
    }

    /// Nombre de cellules vivantes
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, coord: &Coord) -> bool {
        self.cells.contains(coord)
    }

    /// Le même motif déplacé de (dr, dc)
    pub fn translate(&self, dr: i64, dc: i64) -> Self {
        Pattern {
            name: self.name.clone(),
            cells: self.cells.iter().map(|c| c.offset(dr, dc)).collect(),
        }
    }

    /// Le plus petit rectangle contenant toutes les cellules
    pub fn bounding_box(&self) -> Option<Viewport> {
        let first = self.cells.iter().next()?;
        let (mut top, mut bottom, mut left, mut right) = (first.row, first.row, first.col, first.col);
        for c in &self.cells {
            top = top.min(c.row);
            bottom = bottom.max(c.row);
            left = left.min(c.col);
            right = right.max(c.col);
        }
        let span = |lo: i64, hi: i64| usize::try_from(hi.abs_diff(lo)).unwrap_or(usize::MAX).saturating_add(1);
        Some(Viewport::new(top, left, span(top, bottom), span(left, right)))
    }

    /// Translation qui amène le coin haut-gauche de la boîte à l'origine
    pub fn normalized(&self) -> Self {
        match self.bounding_box() {
            Some(bbox) => self.translate(bbox.top.wrapping_neg(), bbox.left.wrapping_neg()),
            None => self.clone(),
        }
    }

    /// La grille infinie correspondante, focalisée sur l'origine.
    pub fn to_grid(&self) -> Grid {
        self.to_grid_at(Coord::ORIGIN)
    }

    /// La grille infinie correspondante, focalisée sur `focus`.
    /// Toute cellule hors du motif est morte.
    pub fn to_grid_at(&self, focus: Coord) -> Grid {
        let cells = self.cells.clone();
        Store::new(move |c: &Coord| cells.contains(c), focus)
    }

    /// Capture les cellules vivantes d'une grille dans une fenêtre
    pub fn from_grid(name: &str, grid: &Grid, viewport: &Viewport) -> Self {
        Pattern {
            name: name.to_string(),
            cells: viewport.coords().filter(|c| grid.peek(c)).collect(),
        }
    }

    /// Lit le format plaintext (.cells).
    ///
    /// Les lignes commençant par '!' sont des commentaires ; 'O' (ou '*')
    /// est vivante, '.' est morte.
    pub fn parse_plaintext(name: &str, text: &str) -> Result<Self, PatternError> {
        let mut pattern = Pattern::new(name);
        let mut row = 0i64;

        for (idx, line) in text.lines().enumerate() {
            if line.starts_with('!') {
                continue;
            }
            for (col, ch) in line.trim_end().chars().enumerate() {
                match ch {
                    'O' | 'o' | '*' => {
                        pattern.add_cell(Coord::new(row, col as i64));
                    }
                    '.' => {}
                    found => {
                        return Err(PatternError::InvalidCell {
                            line: idx + 1,
                            column: col + 1,
                            found,
                        })
                    }
                }
            }
            row += 1;
        }

        debug!(name, cells = pattern.len(), "motif plaintext chargé");
        Ok(pattern)
    }

    /// Lit le format RLE. Retourne aussi la règle si l'en-tête en donne une.
    pub fn parse_rle(name: &str, text: &str) -> Result<(Self, Option<Rule>), PatternError> {
        let mut pattern = Pattern::new(name);
        let mut rule = None;
        let mut body_started = false;
        let (mut row, mut col) = (0i64, 0i64);
        let mut count: Option<i64> = None;

        for (idx, line) in text.lines().enumerate() {
            let line_no = idx + 1;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            if !body_started && trimmed.starts_with('x') {
                rule = parse_rle_header(line_no, trimmed)?;
                body_started = true;
                continue;
            }
            body_started = true;

            for (col_idx, ch) in line.chars().enumerate() {
                let run = count.unwrap_or(1);
                match ch {
                    '0'..='9' => {
                        let digit = i64::from(ch as u8 - b'0');
                        let next = count
                            .unwrap_or(0)
                            .checked_mul(10)
                            .and_then(|n| n.checked_add(digit))
                            .filter(|&n| n <= MAX_RUN);
                        match next {
                            Some(n) => count = Some(n),
                            None => {
                                return Err(PatternError::RunTooLong {
                                    line: line_no,
                                    column: col_idx + 1,
                                })
                            }
                        }
                        continue;
                    }
                    'b' | '.' => col += run,
                    'o' | 'A' => {
                        for _ in 0..run {
                            pattern.add_cell(Coord::new(row, col));
                            col += 1;
                        }
                    }
                    '$' => {
                        row += run;
                        col = 0;
                    }
                    '!' => {
                        debug!(name, cells = pattern.len(), "motif RLE chargé");
                        return Ok((pattern, rule));
                    }
                    c if c.is_whitespace() => continue,
                    found => {
                        return Err(PatternError::InvalidCell {
                            line: line_no,
                            column: col_idx + 1,
                            found,
                        })
                    }
                }
                count = None;
            }
        }

        Err(PatternError::Unterminated)
    }
}

/// "x = 3, y = 3, rule = B3/S23"
fn parse_rle_header(line: usize, header: &str) -> Result<Option<Rule>, PatternError> {
    let mut rule = None;
    for field in header.split(',') {
        let (key, value) = field.split_once('=').ok_or_else(|| PatternError::BadHeader {
            line,
            detail: format!("'{}' sans '='", field.trim()),
        })?;
        let (key, value) = (key.trim(), value.trim());
        match key {
            "x" | "y" => {
                value.parse::<usize>().map_err(|_| PatternError::BadHeader {
                    line,
                    detail: format!("{} = '{}' n'est pas une taille", key, value),
                })?;
            }
            "rule" => rule = Some(value.parse::<Rule>()?),
            _ => {}
        }
    }
    Ok(rule)
}

impl std::fmt::Display for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({} cellules)", self.name, self.len())
    }
}

// =============================================================================
// CATALOGUE
// =============================================================================

/// Les motifs classiques.
pub fn catalog() -> Vec<Pattern> {
    vec![
        Pattern::from_cells("block", [(0, 0), (0, 1), (1, 0), (1, 1)]),
        Pattern::from_cells("blinker", [(0, 0), (0, 1), (0, 2)]),
        Pattern::from_cells("toad", [(0, 1), (0, 2), (0, 3), (1, 0), (1, 1), (1, 2)]),
        Pattern::from_cells(
            "beacon",
            [(0, 0), (0, 1), (1, 0), (1, 1), (2, 2), (2, 3), (3, 2), (3, 3)],
        ),
        Pattern::from_cells("glider", [(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)]),
        Pattern::from_cells("r-pentomino", [(0, 1), (0, 2), (1, 0), (1, 1), (2, 1)]),
        pulsar(),
    ]
}

/// Oscillateur de période 3, 48 cellules
fn pulsar() -> Pattern {
    let mut p = Pattern::new("pulsar");
    for &r in &[0i64, 5, 7, 12] {
        for &c in &[2i64, 3, 4, 8, 9, 10] {
            p.add_cell(Coord::new(r, c));
        }
    }
    for &r in &[2i64, 3, 4, 8, 9, 10] {
        for &c in &[0i64, 5, 7, 12] {
            p.add_cell(Coord::new(r, c));
        }
    }
    p
}

/// Recherche dans le catalogue, sans tenir compte de la casse ni des
/// séparateurs ("R Pentomino" = "r-pentomino").
pub fn by_name(name: &str) -> Result<Pattern, PatternError> {
    let key = |s: &str| -> String {
        s.chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect()
    };
    let wanted = key(name);
    catalog()
        .into_iter()
        .find(|p| key(&p.name) == wanted)
        .ok_or_else(|| PatternError::Unknown(name.to_string()))
}

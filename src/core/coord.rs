// =============================================================================
// COORD — Coordonnées sur une grille infinie et fenêtres finies
// =============================================================================
//
// La grille du Jeu de la Vie est NON BORNÉE : toute paire d'entiers est
// une cellule valide. Une coordonnée n'a pas d'identité propre, elle se
// compare par valeur.
//
// Le voisinage de Moore d'une cellule = ses 8 voisines :
//
//     NW  N  NE
//      W  ·  E
//     SW  S  SE
//
// L'ordre est FIXE (ligne par ligne, de gauche à droite). Il n'influence pas
// le comptage mais garantit des tests reproductibles.
//
// Les translations sont modulo 2^64 : la voisine de i64::MAX est i64::MIN.
// Le plan est donc un tore immense plutôt qu'un plan, mais toute coordonnée
// a ses 8 voisines et le pas de l'automate reste total.
//
// Une Viewport est une fenêtre rectangulaire finie posée sur la grille :
// c'est le seul moyen de borner une évaluation (rendu, population, hash).
//
// =============================================================================

use serde::{Deserialize, Serialize};

/// Une cellule de la grille : (ligne, colonne), axes orientés vers le bas
/// et vers la droite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub row: i64,
    pub col: i64,
}

impl Coord {
    pub const ORIGIN: Coord = Coord { row: 0, col: 0 };

    pub fn new(row: i64, col: i64) -> Self {
        Coord { row, col }
    }

    /// Translation de (dr, dc), avec recouvrement aux bords de i64
    pub fn offset(&self, dr: i64, dc: i64) -> Self {
        Coord {
            row: self.row.wrapping_add(dr),
            col: self.col.wrapping_add(dc),
        }
    }

    /// Les 8 voisines dans l'ordre NW, N, NE, W, E, SW, S, SE.
    pub fn neighbors(&self) -> [Coord; 8] {
        [
            self.offset(-1, -1), self.offset(-1, 0), self.offset(-1, 1),
            self.offset(0, -1),                      self.offset(0, 1),
            self.offset(1, -1),  self.offset(1, 0),  self.offset(1, 1),
        ]
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(i64, i64)> for Coord {
    fn from((row, col): (i64, i64)) -> Self {
        Coord { row, col }
    }
}

/// Fenêtre rectangulaire finie : `height` lignes à partir de `top`,
/// `width` colonnes à partir de `left`.
///
/// Une fenêtre qui déborderait de i64 est rognée à i64::MAX (exclu).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Viewport {
    pub top: i64,
    pub left: i64,
    pub height: usize,
    pub width: usize,
}

impl Viewport {
    pub fn new(top: i64, left: i64, height: usize, width: usize) -> Self {
        Viewport { top, left, height, width }
    }

    /// Carré de côté 2·radius + 1 centré sur `center`
    pub fn around(center: Coord, radius: usize) -> Self {
        let r = i64::try_from(radius).unwrap_or(i64::MAX);
        let side = radius.saturating_mul(2).saturating_add(1);
        Viewport {
            top: center.row.saturating_sub(r),
            left: center.col.saturating_sub(r),
            height: side,
            width: side,
        }
    }

    /// Première ligne hors de la fenêtre
    pub fn bottom(&self) -> i64 {
        clipped_end(self.top, self.height)
    }

    /// Première colonne hors de la fenêtre
    pub fn right(&self) -> i64 {
        clipped_end(self.left, self.width)
    }

    pub fn area(&self) -> usize {
        self.height.saturating_mul(self.width)
    }

    pub fn is_empty(&self) -> bool {
        self.area() == 0
    }

    pub fn contains(&self, coord: &Coord) -> bool {
        coord.row >= self.top
            && coord.row < self.bottom()
            && coord.col >= self.left
            && coord.col < self.right()
    }

    /// Les coordonnées d'une ligne de la fenêtre (rangée `row`, absolue)
    pub fn row(&self, row: i64) -> impl Iterator<Item = Coord> {
        (self.left..self.right()).map(move |col| Coord::new(row, col))
    }

    /// Toutes les coordonnées, ligne par ligne
    pub fn coords(&self) -> impl Iterator<Item = Coord> {
        let (left, right) = (self.left, self.right());
        (self.top..self.bottom())
            .flat_map(move |row| (left..right).map(move |col| Coord::new(row, col)))
    }
}

fn clipped_end(start: i64, len: usize) -> i64 {
    let end = i128::from(start) + len as i128;
    i64::try_from(end).unwrap_or(i64::MAX)
}

impl Default for Viewport {
    fn default() -> Self {
        Viewport::new(-1, -1, 8, 8)
    }
}

impl std::fmt::Display for Viewport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}..{}) x [{}..{})",
            self.top,
            self.bottom(),
            self.left,
            self.right()
        )
    }
}

// =============================================================================
// LIFE — Le Jeu de la Vie comme `extend` d'une règle locale
// =============================================================================
//
// Une génération est une GRILLE = Store<Coord, bool> :
//   - la lookup dit si chaque cellule du plan infini est vivante
//   - le focus est la cellule "qu'on regarde"
//
// La règle d'UNE cellule lit le focus et ses 8 voisines :
//
//   cell_rule(grille) = règle(extract, nombre de vivantes dans
//                             experiment(grille, voisines))
//
// La génération suivante est la règle appliquée PARTOUT :
//
//   step(grille) = extend(grille, cell_rule)
//
// Pas de tableau, pas de bordure, pas de double buffer : une génération est
// une valeur immuable, on peut garder la 0 et la 100 en même temps.
//
// COÛT : la lookup de la génération n appelle celle de n-1 neuf fois par
// cellule. Sans cache, interroger une cellule de la génération n coûte 9^n.
// Chaque `step` mémoïse donc sa lookup (voir memo.rs) : chaque couple
// (génération, coordonnée) n'est calculé qu'une fois.
//
// `Life` ajoute par-dessus l'historique des générations et la détection
// de cycles sur une fenêtre finie. Les empreintes déjà calculées sont
// gardées dans un anneau de CYCLE_WINDOW + 1 entrées : chaque génération
// n'est hachée qu'une fois par fenêtre observée.
//
// =============================================================================

use std::collections::hash_map::DefaultHasher;
use std::collections::VecDeque;
use std::hash::{Hash, Hasher};
use tracing::debug;
use super::coord::{Coord, Viewport};
use super::pattern::Pattern;
use super::rule::Rule;
use super::store::Store;

/// Une génération : chaque coordonnée → vivante ?
pub type Grid = Store<Coord, bool>;

/// Nombre de générations passées comparées par `Life::detect_cycle`
pub const CYCLE_WINDOW: usize = 10;

/// Le voisinage de Moore, dans l'ordre NW, N, NE, W, E, SW, S, SE.
pub fn neighbor_coordinates(coord: &Coord) -> Vec<Coord> {
    coord.neighbors().to_vec()
}

/// Nombre de voisines vivantes autour du focus
pub fn live_neighbors(grid: &Grid) -> usize {
    grid.experiment(neighbor_coordinates)
        .into_iter()
        .filter(|&alive| alive)
        .count()
}

/// L'état suivant de la cellule focalisée selon Conway (B3/S23).
pub fn cell_rule(grid: &Grid) -> bool {
    cell_rule_with(&Rule::conway(), grid)
}

/// L'état suivant de la cellule focalisée selon une règle quelconque.
pub fn cell_rule_with(rule: &Rule, grid: &Grid) -> bool {
    rule.next_state(grid.extract(), live_neighbors(grid))
}

/// La génération suivante (Conway). `grid` n'est pas modifiée.
pub fn step(grid: &Grid) -> Grid {
    grid.extend(cell_rule).memoize()
}

/// La génération suivante pour une règle quelconque.
pub fn step_with(rule: &Rule, grid: &Grid) -> Grid {
    let rule = *rule;
    grid.extend(move |local| cell_rule_with(&rule, local)).memoize()
}

/// La suite infinie grid, step(grid), step(step(grid)), ...
///
/// Paresseuse : rien n'est calculé tant qu'on n'interroge pas une cellule.
pub fn generations(grid: Grid, rule: Rule) -> impl Iterator<Item = Grid> {
    std::iter::successors(Some(grid), move |g| Some(step_with(&rule, g)))
}

/// Nombre de cellules vivantes dans une fenêtre
pub fn population(grid: &Grid, viewport: &Viewport) -> usize {
    viewport.coords().filter(|c| grid.peek(c)).count()
}

/// Empreinte d'une fenêtre : deux fenêtres identiques ont la même empreinte
pub fn fingerprint(grid: &Grid, viewport: &Viewport) -> u64 {
    let mut hasher = DefaultHasher::new();
    for c in viewport.coords() {
        grid.peek(&c).hash(&mut hasher);
    }
    hasher.finish()
}

/// Une simulation : une règle et toutes les générations déjà produites.
///
/// Les générations sont des valeurs immuables ; les garder toutes ne coûte
/// que leurs caches.
#[derive(Debug, Clone)]
pub struct Life {
    rule: Rule,
    history: Vec<Grid>,
    ring: Option<CycleRing>,
}

/// Les dernières empreintes (génération, hash) d'une fenêtre donnée
#[derive(Debug, Clone)]
struct CycleRing {
    viewport: Viewport,
    recorded: VecDeque<(usize, u64)>,
}

impl Life {
    pub fn new(grid: Grid, rule: Rule) -> Self {
        Life {
            rule,
            history: vec![grid],
            ring: None,
        }
    }

    pub fn from_pattern(pattern: &Pattern, rule: Rule) -> Self {
        debug!(pattern = %pattern, rule = %rule, "nouvelle simulation");
        Life::new(pattern.to_grid(), rule)
    }

    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    /// Numéro de la génération courante (0 = la graine)
    pub fn generation(&self) -> usize {
        self.history.len() - 1
    }

    /// La génération courante
    pub fn current(&self) -> &Grid {
        // history n'est jamais vide : `new` y place la graine
        &self.history[self.history.len() - 1]
    }

    /// Une génération passée (ou la courante)
    pub fn history(&self, generation: usize) -> Option<&Grid> {
        self.history.get(generation)
    }

    /// Calcule la génération suivante et la retourne.
    pub fn advance(&mut self) -> &Grid {
        let next = step_with(&self.rule, self.current());
        self.history.push(next);
        debug!(generation = self.generation(), "génération calculée");
        self.current()
    }

    pub fn advance_by(&mut self, n: usize) -> &Grid {
        for _ in 0..n {
            self.advance();
        }
        self.current()
    }

    pub fn population(&self, viewport: &Viewport) -> usize {
        population(self.current(), viewport)
    }

    pub fn fingerprint(&self, viewport: &Viewport) -> u64 {
        fingerprint(self.current(), viewport)
    }

    /// Si la fenêtre courante est identique à celle d'une des
    /// CYCLE_WINDOW générations précédentes, retourne la période.
    ///
    /// Changer de fenêtre vide l'anneau d'empreintes.
    pub fn detect_cycle(&mut self, viewport: &Viewport) -> Option<usize> {
        let generation = self.generation();
        if self.ring.as_ref().is_some_and(|ring| ring.viewport != *viewport) {
            debug!(viewport = %viewport, "nouvelle fenêtre, anneau vidé");
            self.ring = None;
        }
        let history = &self.history;
        let ring = self.ring.get_or_insert_with(|| CycleRing {
            viewport: *viewport,
            recorded: VecDeque::with_capacity(CYCLE_WINDOW + 1),
        });

        let next = ring.recorded.back().map_or(0, |&(g, _)| g + 1);
        for g in next.max(generation.saturating_sub(CYCLE_WINDOW))..=generation {
            ring.recorded.push_back((g, fingerprint(&history[g], viewport)));
        }
        while ring.recorded.len() > CYCLE_WINDOW + 1 {
            ring.recorded.pop_front();
        }
        // Après un saut de plus de CYCLE_WINDOW générations
        while ring.recorded.front().is_some_and(|&(g, _)| g + CYCLE_WINDOW < generation) {
            ring.recorded.pop_front();
        }

        let &(_, now) = ring.recorded.back()?;
        ring.recorded
            .iter()
            .rev()
            .skip(1)
            .find(|&&(_, hash)| hash == now)
            .map(|&(g, _)| generation - g)
    }

    /// Nombre d'empreintes gardées pour la détection de cycles
    pub fn recorded_fingerprints(&self) -> usize {
        self.ring.as_ref().map_or(0, |ring| ring.recorded.len())
    }
}

// =============================================================================
// STORE — Le comonade Store : une fonction de lookup + un focus
// =============================================================================
//
// Un Store<I, A> est une PAIRE :
//   - une fonction pure  lookup : I → A   (le "contenu" à chaque index)
//   - un index courant   focus  : I       (là où l'on regarde)
//
// ANALOGIE : une carte infinie et un curseur posé dessus. `extract` lit la
// case sous le curseur, `seek` déplace le curseur, `peek` jette un œil
// ailleurs sans bouger.
//
// STRUCTURE DE COMONADE :
//   extract   : Store<I, A> → A
//   duplicate : Store<I, A> → Store<I, Store<I, A>>
//   extend    : (Store<I, A> → B) → Store<I, A> → Store<I, B>
//
// `duplicate` est la pièce étrange : à chaque index i, il place le MÊME
// store recentré sur i. On obtient "toutes les perspectives" possibles.
// `extend(rule)` = `duplicate` puis `map(rule)` : une règle LOCALE (qui
// regarde autour du focus) devient une transformation GLOBALE.
//
// C'est exactement le pas d'un automate cellulaire : la règle d'une cellule
// appliquée à toutes les cellules à la fois.
//
// LOIS (testées plus bas) :
//   extract ∘ duplicate           = id
//   map(extract) ∘ duplicate      = id
//   map(id)                       = id
//   map(g) ∘ map(f)               = map(g ∘ f)
//
// PRÉCONDITION : lookup doit être TOTALE sur tous les index atteignables
// (par `experiment`, `peek` ou `duplicate`). Ce n'est pas vérifiable à
// l'exécution sur un domaine infini, c'est donc à l'appelant de la garantir.
//
// Aucun Store n'est jamais modifié : chaque opération en produit un nouveau,
// qui partage le lookup par Rc.
//
// =============================================================================

use std::hash::Hash;
use std::rc::Rc;
use super::memo::{CacheStats, MemoCache};

/// Fonction de lookup partagée entre un Store et ses dérivés.
pub type Lookup<I, A> = Rc<dyn Fn(&I) -> A>;

/// Conteneur focalisé : lookup totale + index courant.
///
/// Le champ `cache` n'est renseigné qu'après `memoize` ; il est partagé par
/// les `seek` et par les stores internes d'un `duplicate`, qui voient
/// exactement le même contenu.
pub struct Store<I, A> {
    lookup: Lookup<I, A>,
    cache: Option<Rc<MemoCache<I, A>>>,
    index: I,
}

impl<I, A> Store<I, A>
where
    I: Clone + 'static,
    A: 'static,
{
    /// Construit un Store à partir d'une lookup et d'un focus initial.
    pub fn new<F>(lookup: F, index: I) -> Self
    where
        F: Fn(&I) -> A + 'static,
    {
        Store {
            lookup: Rc::new(lookup),
            cache: None,
            index,
        }
    }

    /// Variante qui réutilise une lookup déjà partagée
    pub fn from_lookup(lookup: Lookup<I, A>, index: I) -> Self {
        Store {
            lookup,
            cache: None,
            index,
        }
    }

    /// Le focus courant
    pub fn pos(&self) -> &I {
        &self.index
    }

    /// La lookup sous-jacente (partagée, pas copiée)
    pub fn lookup(&self) -> Lookup<I, A> {
        Rc::clone(&self.lookup)
    }

    /// extract : la valeur sous le focus.
    pub fn extract(&self) -> A {
        (self.lookup)(&self.index)
    }

    /// La valeur à un index quelconque, sans déplacer le focus.
    pub fn peek(&self, index: &I) -> A {
        (self.lookup)(index)
    }

    /// La valeur à un index calculé depuis le focus
    pub fn peeks<F>(&self, f: F) -> A
    where
        F: FnOnce(&I) -> I,
    {
        (self.lookup)(&f(&self.index))
    }

    /// Même contenu, nouveau focus.
    pub fn seek(&self, index: I) -> Self {
        Store {
            lookup: Rc::clone(&self.lookup),
            cache: self.cache.clone(),
            index,
        }
    }

    /// Même contenu, focus déplacé par `f`
    pub fn seeks<F>(&self, f: F) -> Self
    where
        F: FnOnce(&I) -> I,
    {
        self.seek(f(&self.index))
    }

    /// mapContent : compose la lookup avec `f`, focus inchangé.
    ///
    /// Le résultat n'hérite pas du cache : son contenu est différent.
    pub fn map<B, F>(&self, f: F) -> Store<I, B>
    where
        B: 'static,
        F: Fn(A) -> B + 'static,
    {
        let lookup = self.lookup();
        Store::<I, B>::from_lookup(Rc::new(move |i: &I| f(lookup(i))), self.index.clone())
    }

    /// duplicate : à chaque index i, le store d'origine recentré sur i.
    ///
    /// Le focus externe est le focus d'origine, donc
    /// `s.duplicate().extract()` se comporte comme `s`.
    pub fn duplicate(&self) -> Store<I, Store<I, A>> {
        let lookup = Rc::clone(&self.lookup);
        let cache = self.cache.clone();
        Store::new(
            move |i: &I| Store {
                lookup: Rc::clone(&lookup),
                cache: cache.clone(),
                index: i.clone(),
            },
            self.index.clone(),
        )
    }

    /// extend (local → global) : `duplicate` puis `map(rule)`.
    ///
    /// `rule` reçoit une vue locale (un store focalisé sur i) et produit la
    /// nouvelle valeur en i.
    pub fn extend<B, F>(&self, rule: F) -> Store<I, B>
    where
        B: 'static,
        F: Fn(&Store<I, A>) -> B + 'static,
    {
        self.duplicate().map(move |local| rule(&local))
    }

    /// experiment : échantillonne le contenu aux index produits par `probe`
    /// à partir du focus, dans l'ordre de `probe`. Le focus ne bouge pas.
    pub fn experiment<F, P>(&self, probe: F) -> Vec<A>
    where
        F: FnOnce(&I) -> P,
        P: IntoIterator<Item = I>,
    {
        probe(&self.index)
            .into_iter()
            .map(|i| (self.lookup)(&i))
            .collect()
    }

    /// Statistiques du cache si le store est mémoïsé
    pub fn cache_stats(&self) -> Option<CacheStats> {
        self.cache.as_ref().map(|c| c.stats())
    }

    pub fn is_memoized(&self) -> bool {
        self.cache.is_some()
    }
}

impl<I, A> Store<I, A>
where
    I: Clone + Eq + Hash + std::fmt::Debug + 'static,
    A: Clone + 'static,
{
    /// Même contenu, mais chaque index n'est calculé qu'une fois.
    ///
    /// Le cache est neuf et appartient au store retourné (et à ses dérivés
    /// par `seek`/`duplicate`).
    pub fn memoize(&self) -> Self {
        let cache = Rc::new(MemoCache::new());
        let inner = Rc::clone(&self.lookup);
        let shared = Rc::clone(&cache);
        Store {
            lookup: Rc::new(move |i: &I| shared.get_or_compute(i, || inner(i))),
            cache: Some(cache),
            index: self.index.clone(),
        }
    }
}

impl<I: Clone, A> Clone for Store<I, A> {
    fn clone(&self) -> Self {
        Store {
            lookup: Rc::clone(&self.lookup),
            cache: self.cache.clone(),
            index: self.index.clone(),
        }
    }
}

impl<I: std::fmt::Debug, A> std::fmt::Debug for Store<I, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("index", &self.index)
            .field("cache", &self.cache.as_ref().map(|c| c.stats()))
            .finish_non_exhaustive()
    }
}

// =============================================================================
// TESTS
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    /// Store des carrés, focalisé sur 3
    fn squares() -> Store<i64, i64> {
        Store::new(|i: &i64| i * i, 3)
    }

    const SAMPLE: [i64; 7] = [-3, -1, 0, 1, 2, 7, 100];

    #[test]
    fn test_extract_and_peek() {
        let s = squares();
        assert_eq!(*s.pos(), 3);
        assert_eq!(s.extract(), 9);
        assert_eq!(s.peek(&-4), 16);
        assert_eq!(s.peeks(|i| i + 1), 16);
        // peek ne déplace pas le focus
        assert_eq!(*s.pos(), 3);
    }

    #[test]
    fn test_seek_is_a_new_value() {
        let s = squares();
        let moved = s.seek(5);
        assert_eq!(moved.extract(), 25);
        assert_eq!(s.extract(), 9);
        assert_eq!(s.seeks(|i| i * 2).extract(), 36);
    }

    #[test]
    fn test_extract_duplicate_is_identity() {
        let s = squares();
        let back = s.duplicate().extract();
        assert_eq!(back.pos(), s.pos());
        for i in SAMPLE {
            assert_eq!(back.peek(&i), s.peek(&i));
        }
    }

    #[test]
    fn test_duplicate_preserves_content() {
        let s = squares();
        let d = s.duplicate();
        assert_eq!(*d.pos(), *s.pos());
        for i in SAMPLE {
            let inner = d.peek(&i);
            assert_eq!(*inner.pos(), i);
            assert_eq!(inner.extract(), s.peek(&i));
        }
    }

    #[test]
    fn test_map_extract_duplicate_is_identity() {
        let s = squares();
        let back = s.duplicate().map(|inner| inner.extract());
        for i in SAMPLE {
            assert_eq!(back.peek(&i), s.peek(&i));
        }
    }

    #[test]
    fn test_functor_identity() {
        let s = squares();
        let same = s.map(|x| x);
        assert_eq!(same.pos(), s.pos());
        for i in SAMPLE {
            assert_eq!(same.peek(&i), s.peek(&i));
        }
    }

    #[test]
    fn test_functor_composition() {
        let s = squares();
        let f = |x: i64| x + 1;
        let g = |x: i64| x * 10;
        let chained = s.map(f).map(g);
        let composed = s.map(move |x| g(f(x)));
        for i in SAMPLE {
            assert_eq!(chained.peek(&i), composed.peek(&i));
        }
        assert_eq!(chained.extract(), 100);
    }

    #[test]
    fn test_experiment_keeps_probe_order() {
        let s = squares();
        let values = s.experiment(|&i| vec![i + 1, i - 1, i]);
        assert_eq!(values, vec![16, 4, 9]);
        assert_eq!(*s.pos(), 3);
        assert!(s.experiment(|_| Vec::new()).is_empty());
    }

    #[test]
    fn test_from_lookup_shares_content() {
        let s = squares();
        let other = Store::from_lookup(s.lookup(), 5);
        assert!(Rc::ptr_eq(&s.lookup(), &other.lookup()));
        assert_eq!(other.extract(), 25);
        assert_eq!(other.peek(&-2), s.peek(&-2));
        assert!(!other.is_memoized());

        // Même sur un store mémoïsé, la copie part sans cache
        let memo = s.memoize();
        let bare = Store::from_lookup(memo.lookup(), 2);
        assert_eq!(bare.extract(), 4);
        assert!(bare.cache_stats().is_none());
        assert_eq!(memo.cache_stats().unwrap().misses, 1);
    }

    #[test]
    fn test_extend_local_sum() {
        // Règle locale : somme du focus et de ses deux voisins
        let s = Store::new(|i: &i64| *i, 0);
        let sums = s.extend(|local| local.experiment(|&i| [i - 1, i, i + 1]).iter().sum::<i64>());
        assert_eq!(sums.extract(), 0);
        assert_eq!(sums.peek(&10), 30);
        assert_eq!(sums.peek(&-2), -6);
    }

    #[test]
    fn test_extend_matches_duplicate_then_map() {
        let s = squares();
        let rule = |local: &Store<i64, i64>| local.extract() - local.peeks(|i| i - 1);
        let extended = s.extend(rule);
        let manual = s.duplicate().map(move |local| rule(&local));
        for i in SAMPLE {
            assert_eq!(extended.peek(&i), manual.peek(&i));
        }
    }

    #[test]
    fn test_memoize_computes_each_index_once() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let s = Store::new(
            move |i: &i64| {
                counter.set(counter.get() + 1);
                i * 2
            },
            0,
        )
        .memoize();

        assert_eq!(s.peek(&7), 14);
        assert_eq!(s.peek(&7), 14);
        assert_eq!(s.seek(7).extract(), 14);
        assert_eq!(calls.get(), 1);

        let stats = s.cache_stats().unwrap();
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hits, 2);
    }

    #[test]
    fn test_duplicate_shares_cache() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let s = Store::new(
            move |i: &i64| {
                counter.set(counter.get() + 1);
                *i
            },
            0,
        )
        .memoize();

        s.peek(&3);
        let inner = s.duplicate().peek(&3);
        assert!(inner.is_memoized());
        assert_eq!(inner.extract(), 3);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_map_drops_cache() {
        let s = squares().memoize();
        assert!(s.is_memoized());
        assert!(!s.map(|x| x + 1).is_memoized());
    }
}

// =============================================================================
// MEMO — Cache explicite pour les fonctions de lookup
// =============================================================================
//
// Sans cache, la génération n est une fonction qui rappelle la génération
// n-1 neuf fois (la cellule + ses 8 voisines), qui rappelle n-2 neuf fois...
// Interroger UNE cellule coûte alors 9^n appels : explosion exponentielle.
//
// Avec un cache PAR GÉNÉRATION, chaque couple (génération, coordonnée) est
// calculé une seule fois. Le coût devient proportionnel au nombre de couples
// réellement visités.
//
// Le cache est un objet explicite, possédé par le Store qui l'utilise
// (via Rc). Pas d'état global : deux tests ne partagent jamais un cache.
//
// Mono-thread : RefCell + Cell suffisent.
//
// =============================================================================

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use tracing::trace;

/// Compteurs d'un cache : utiles en test pour vérifier qu'aucun calcul
/// n'est refait.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    /// Requêtes servies depuis le cache
    pub hits: u64,
    /// Requêtes qui ont déclenché un calcul
    pub misses: u64,
    /// Nombre de valeurs mémorisées
    pub entries: usize,
}

impl std::fmt::Display for CacheStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} entrées, {} hits, {} misses",
            self.entries, self.hits, self.misses
        )
    }
}

/// Table index → valeur déjà calculée.
pub struct MemoCache<I, A> {
    entries: RefCell<HashMap<I, A>>,
    hits: Cell<u64>,
    misses: Cell<u64>,
}

impl<I, A> MemoCache<I, A> {
    pub fn new() -> Self {
        MemoCache {
            entries: RefCell::new(HashMap::new()),
            hits: Cell::new(0),
            misses: Cell::new(0),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.get(),
            misses: self.misses.get(),
            entries: self.len(),
        }
    }

    /// Vide les valeurs et remet les compteurs à zéro
    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
        self.hits.set(0);
        self.misses.set(0);
    }
}

impl<I, A> MemoCache<I, A>
where
    I: Clone + Eq + Hash + Debug,
    A: Clone,
{
    /// Retourne la valeur mémorisée pour `key`, ou la calcule et la garde.
    ///
    /// Aucun emprunt n'est tenu pendant `compute` : un calcul qui
    /// réinterroge ce même cache ne panique pas.
    pub fn get_or_compute<F>(&self, key: &I, compute: F) -> A
    where
        F: FnOnce() -> A,
    {
        let cached = self.entries.borrow().get(key).cloned();
        if let Some(value) = cached {
            self.hits.set(self.hits.get() + 1);
            return value;
        }

        self.misses.set(self.misses.get() + 1);
        trace!(key = ?key, misses = self.misses.get(), "memo miss");
        let value = compute();
        self.entries.borrow_mut().insert(key.clone(), value.clone());
        value
    }
}

impl<I, A> Default for MemoCache<I, A> {
    fn default() -> Self {
        MemoCache::new()
    }
}

impl<I, A> std::fmt::Debug for MemoCache<I, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoCache").field("stats", &self.stats()).finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_computes_once_per_key() {
        let cache: MemoCache<i64, i64> = MemoCache::new();
        let calls = Cell::new(0);
        let square = |x: i64| {
            calls.set(calls.get() + 1);
            x * x
        };

        assert_eq!(cache.get_or_compute(&4, || square(4)), 16);
        assert_eq!(cache.get_or_compute(&4, || square(4)), 16);
        assert_eq!(cache.get_or_compute(&5, || square(5)), 25);
        assert_eq!(calls.get(), 2);

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 2);
        assert_eq!(stats.entries, 2);
    }

    #[test]
    fn test_reentrant_compute() {
        let cache: MemoCache<u32, u32> = MemoCache::new();
        // Le calcul de 2 réinterroge le cache pour 1 : pas de double emprunt
        let v = cache.get_or_compute(&2, || cache.get_or_compute(&1, || 10) + 1);
        assert_eq!(v, 11);
        assert_eq!(cache.len(), 2);
    }

    /// Tampon partagé dans lequel le subscriber de test écrit ses lignes
    #[derive(Clone, Default)]
    struct Captured(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_miss_is_traced_with_its_key() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        let cache: MemoCache<(i64, i64), bool> = MemoCache::new();
        tracing::subscriber::with_default(subscriber, || {
            cache.get_or_compute(&(3, -7), || true);
            cache.get_or_compute(&(3, -7), || true);
        });

        let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert_eq!(output.matches("memo miss").count(), 1);
        assert!(output.contains("key=(3, -7)"));
        assert!(output.contains("misses=1"));
    }

    #[test]
    fn test_clear() {
        let cache: MemoCache<u8, bool> = MemoCache::new();
        cache.get_or_compute(&1, || true);
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.stats(), CacheStats::default());
    }
}

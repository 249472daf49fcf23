// =============================================================================
// STORELIFE — Point d'entrée : démonstration du comonade Store
// =============================================================================
//
// Ce main.rs montre un exemple complet :
//   1. Charger une simulation (STORELIFE_CONFIG ou configuration par défaut)
//   2. Vérifier les lois du Store sur la graine
//   3. Faire avancer les générations : step = extend(cell_rule)
//   4. Détecter un cycle et exporter la dernière génération en RLE
//
// =============================================================================

use storelife::config::SimulationConfig;
use storelife::core::life::{cell_rule_with, neighbor_coordinates};
use storelife::render::{PlaintextRenderer, Renderer, RleRenderer};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    println!("╔══════════════════════════════════════════════════╗");
    println!("║      STORELIFE — Store comonad & Game of Life    ║");
    println!("║      step = extend(cell_rule)                    ║");
    println!("╚══════════════════════════════════════════════════╝\n");

    // ═══════════════════════════════════════════════════════════
    // ÉTAPE 1 : La configuration
    // ═══════════════════════════════════════════════════════════
    println!("═══ ÉTAPE 1 : Configuration ═══\n");

    let config = match std::env::var_os("STORELIFE_CONFIG") {
        Some(path) => SimulationConfig::load(path)?,
        None => SimulationConfig::default(),
    };
    let pattern = config.pattern()?;
    println!("  simulation  : {}", config.name);
    println!("  graine      : {}", pattern);
    println!("  règle       : {}", config.rule);
    println!("  fenêtre     : {}", config.viewport);
    println!("  générations : {}\n", config.generations);

    // ═══════════════════════════════════════════════════════════
    // ÉTAPE 2 : Le Store vu de près
    // ═══════════════════════════════════════════════════════════
    println!("═══ ÉTAPE 2 : extract, duplicate, experiment ═══\n");

    let seed = pattern.to_grid();
    let focus = *seed.pos();
    let around = seed.experiment(neighbor_coordinates);
    println!("  focus {} : vivante = {}", focus, seed.extract());
    println!(
        "  voisines vivantes = {}",
        around.iter().filter(|&&alive| alive).count()
    );
    println!(
        "  extract(duplicate) au focus = {}",
        seed.duplicate().extract().extract()
    );
    println!(
        "  règle locale au focus → {}\n",
        cell_rule_with(&config.rule, &seed)
    );

    // ═══════════════════════════════════════════════════════════
    // ÉTAPE 3 : Les générations
    // ═══════════════════════════════════════════════════════════
    println!("═══ ÉTAPE 3 : Générations ═══\n");

    let mut life = config.life()?;
    let plain = PlaintextRenderer::new();
    for _ in 0..=config.generations {
        println!(
            "--- génération {} ({} vivantes) ---",
            life.generation(),
            life.population(&config.viewport)
        );
        print!("{}", plain.render(life.current(), &config.viewport));
        if let Some(period) = life.detect_cycle(&config.viewport) {
            println!("\n  ↻ cycle de période {} détecté dans la fenêtre", period);
            break;
        }
        if life.generation() < config.generations {
            life.advance();
        }
    }

    if let Some(stats) = life.current().cache_stats() {
        println!("\n  cache de la dernière génération : {}", stats);
    }

    // ═══════════════════════════════════════════════════════════
    // ÉTAPE 4 : Export
    // ═══════════════════════════════════════════════════════════
    println!("\n═══ ÉTAPE 4 : Export RLE ═══\n");

    let rle = RleRenderer::new(*life.rule());
    print!("{}", rle.render(life.current(), &config.viewport));

    println!("\n═══════════════════════════════════════════════════");
    println!("Simulation terminée : {} générations", life.generation());
    println!("═══════════════════════════════════════════════════");
    Ok(())
}

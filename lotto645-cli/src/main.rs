mod display;
mod engine;
mod import;
mod interactive;
mod picks;

use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};

use lotto645_db::db::{count_draws, db_path, fetch_draw, fetch_last_draws, insert_draw, migrate, open_db};
use lotto645_db::models::{validate_draw, validate_numbers, Draw, POOL_SIZE};

use crate::display::{
    display_draws, display_import_summary, display_picks, display_rank_result, display_stats,
};
use crate::engine::generate::{date_seed, generate_picks};
use crate::engine::rank::best_result;
use crate::engine::{compute_stats, filter, History};
use crate::picks::{load_picks, picks_path, save_picks, PickSet};

#[derive(Parser)]
#[command(name = "lotto645", about = "Suivi et génération de grilles Lotto 6/45")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Importer l'historique des tirages depuis un fichier CSV
    Import {
        /// Chemin vers le fichier CSV
        #[arg(short, long, default_value = "assets/lotto_history.csv")]
        file: PathBuf,
    },

    /// Ajouter un tirage manuellement
    Add,

    /// Afficher le chemin de la base de données
    DbPath,

    /// Lister les derniers tirages
    List {
        /// Nombre de tirages à afficher
        #[arg(short, long, default_value = "10")]
        last: u32,
    },

    /// Afficher les statistiques (fréquences et retards)
    Stats {
        /// Fenêtre d'analyse (nombre de tirages)
        #[arg(short, long, default_value = "100")]
        window: u32,
    },

    /// Générer des grilles filtrées pour le prochain tirage
    Generate {
        /// Nombre de grilles
        #[arg(short, long, default_value = "10")]
        count: usize,

        /// Seed pour la reproductibilité (défaut : date du jour YYYYMMDD)
        #[arg(long)]
        seed: Option<u64>,

        /// Borne sur le nombre de tentatives d'échantillonnage
        #[arg(long, default_value = "10000000")]
        max_attempts: u64,
    },

    /// Vérifier les grilles enregistrées contre le tirage officiel
    Check,

    /// Mode interactif (REPL)
    Interactive,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let path = db_path();
    let conn = open_db(&path)?;
    migrate(&conn)?;

    match cli.command {
        Command::Import { file } => cmd_import(&conn, &file),
        Command::Add => cmd_add(&conn),
        Command::DbPath => {
            println!("{}", path.display());
            Ok(())
        }
        Command::List { last } => cmd_list(&conn, last),
        Command::Stats { window } => cmd_stats(&conn, window),
        Command::Generate {
            count,
            seed,
            max_attempts,
        } => cmd_generate(&conn, count, seed, max_attempts),
        Command::Check => cmd_check(&conn),
        Command::Interactive => interactive::run_interactive(&conn),
    }
}

pub(crate) fn cmd_import(conn: &lotto645_db::rusqlite::Connection, file: &PathBuf) -> Result<()> {
    let result = import::import_csv(conn, file)?;
    display_import_summary(&result);
    Ok(())
}

pub(crate) fn cmd_list(conn: &lotto645_db::rusqlite::Connection, last: u32) -> Result<()> {
    let n = count_draws(conn)?;
    if n == 0 {
        println!("Base vide. Lancez d'abord : lotto645 import");
        return Ok(());
    }
    let draws = fetch_last_draws(conn, last)?;
    display_draws(&draws);
    Ok(())
}

pub(crate) fn cmd_stats(conn: &lotto645_db::rusqlite::Connection, window: u32) -> Result<()> {
    let n = count_draws(conn)?;
    if n == 0 {
        println!("Base vide. Lancez d'abord : lotto645 import");
        return Ok(());
    }
    let effective_window = window.min(n);
    let draws = fetch_last_draws(conn, effective_window)?;

    let stats = compute_stats(&draws, POOL_SIZE);
    display_stats(&stats, effective_window);
    Ok(())
}

pub(crate) fn cmd_generate(
    conn: &lotto645_db::rusqlite::Connection,
    count: usize,
    seed: Option<u64>,
    max_attempts: u64,
) -> Result<()> {
    let n = count_draws(conn)?;
    let draws = fetch_last_draws(conn, n)?;
    let history = History::from_draws(&draws);
    match history.latest() {
        Some(last) => println!(
            "Dernier tirage connu : {} ({} combinaisons en base)",
            last.draw_no,
            history.len()
        ),
        None => println!("(Base vide : génération sans déduplication historique)"),
    }

    let effective_seed = seed.unwrap_or_else(|| {
        let ds = date_seed();
        println!("(Seed du jour : {ds})");
        ds
    });

    let target = history.next_draw_no();

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(format!(
        "Génération de {count} grilles pour le tirage {target}..."
    ));

    let generation = match generate_picks(&history, filter::passes, count, effective_seed, max_attempts) {
        Ok(g) => g,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e.into());
        }
    };

    pb.finish_with_message(format!(
        "{} grilles acceptées en {} tentatives",
        generation.picks.len(),
        generation.attempts
    ));

    let pick_set = PickSet {
        target_draw_no: generation.target_draw_no,
        generated_at: chrono::Local::now().format("%Y-%m-%d %H:%M").to_string(),
        picks: generation.picks,
    };

    save_picks(&pick_set, &picks_path())?;
    display_picks(&pick_set);
    println!("\nGrilles sauvegardées dans : {}", picks_path().display());
    Ok(())
}

pub(crate) fn cmd_check(conn: &lotto645_db::rusqlite::Connection) -> Result<()> {
    let path = picks_path();
    if !path.exists() {
        println!("Aucune grille enregistrée. Lancez d'abord : lotto645 generate");
        return Ok(());
    }
    let pick_set = load_picks(&path)?;

    match fetch_draw(conn, pick_set.target_draw_no)? {
        Some(winning) => {
            let result = best_result(&pick_set.picks, &winning);
            display_rank_result(&result, &winning);
        }
        None => {
            println!(
                "Résultat du tirage {} pas encore disponible. Mettez l'historique à jour : lotto645 import",
                pick_set.target_draw_no
            );
        }
    }
    Ok(())
}

pub(crate) fn cmd_add(conn: &lotto645_db::rusqlite::Connection) -> Result<()> {
    println!("Ajout d'un tirage manuellement\n");

    let draw_no: u32 = prompt("Numéro du tirage (ex: 1101) : ")?
        .parse()
        .context("Numéro de tirage invalide")?;

    let numbers = prompt_numbers()?;
    let bonus = prompt_bonus(&numbers)?;

    validate_draw(&numbers, bonus)?;

    let draw = Draw {
        draw_no,
        numbers,
        bonus,
    };

    println!("\nTirage à insérer :");
    display_draws(&[draw.clone()]);

    let confirm = prompt("\nConfirmer l'insertion ? (o/n) : ")?;
    if confirm.trim().to_lowercase() == "o" {
        let inserted = insert_draw(conn, &draw)?;
        if inserted {
            println!("Tirage inséré avec succès.");
        } else {
            println!("Ce tirage existe déjà (doublon ignoré).");
        }
    } else {
        println!("Insertion annulée.");
    }

    Ok(())
}

pub(crate) fn prompt(msg: &str) -> Result<String> {
    print!("{}", msg);
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .context("Erreur de lecture")?;
    Ok(input.trim().to_string())
}

fn prompt_numbers() -> Result<[u8; 6]> {
    loop {
        let input = prompt("6 numéros (séparés par des espaces, 1-45) : ")?;
        let nums: Result<Vec<u8>, _> = input.split_whitespace().map(|s| s.parse::<u8>()).collect();
        match nums {
            Ok(v) if v.len() == 6 => {
                let arr = [v[0], v[1], v[2], v[3], v[4], v[5]];
                if validate_numbers(&arr).is_ok() {
                    return Ok(arr);
                }
                println!("Numéros invalides (1-45, pas de doublons). Réessayez.");
            }
            _ => println!("Entrez exactement 6 numéros. Réessayez."),
        }
    }
}

fn prompt_bonus(numbers: &[u8; 6]) -> Result<u8> {
    loop {
        let input = prompt("Bonus (1-45, hors des 6 numéros) : ")?;
        match input.parse::<u8>() {
            Ok(b) if validate_draw(numbers, b).is_ok() => return Ok(b),
            _ => println!("Bonus invalide. Réessayez."),
        }
    }
}

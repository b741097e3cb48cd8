use anyhow::{Context, Result};
use lotto645_db::rusqlite::Connection;

use super::prompt;

#[derive(Debug, PartialEq)]
enum InteractiveCommand {
    Generate,
    Check,
    Add,
    History,
    Stats,
    Quit,
}

fn parse_command(input: &str) -> Option<InteractiveCommand> {
    match input.trim().to_lowercase().as_str() {
        "1" | "generer" | "générer" | "gen" => Some(InteractiveCommand::Generate),
        "2" | "verifier" | "vérifier" | "check" => Some(InteractiveCommand::Check),
        "3" | "ajouter" | "add" => Some(InteractiveCommand::Add),
        "4" | "historique" | "history" | "hist" => Some(InteractiveCommand::History),
        "5" | "stats" | "statistiques" => Some(InteractiveCommand::Stats),
        "6" | "quitter" | "quit" | "q" | "exit" => Some(InteractiveCommand::Quit),
        _ => None,
    }
}

fn display_menu() {
    println!();
    println!("── Mode interactif ──");
    println!("  1. generer    Générer des grilles");
    println!("  2. verifier   Vérifier les grilles enregistrées");
    println!("  3. ajouter    Ajouter un tirage");
    println!("  4. historique Derniers tirages");
    println!("  5. stats      Fréquences et retards");
    println!("  6. quitter    Quitter");
    println!();
}

fn prompt_with_default(msg: &str, default: &str) -> Result<String> {
    let input = prompt(&format!("{} [{}] : ", msg, default))?;
    if input.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(input)
    }
}

fn cmd_generate_interactive(conn: &Connection) -> Result<()> {
    let count_str = prompt_with_default("Nombre de grilles", "10")?;
    let count: usize = count_str.parse().context("Nombre invalide")?;

    let seed_str = prompt_with_default("Seed (vide = date du jour)", "")?;
    let seed: Option<u64> = if seed_str.is_empty() {
        None
    } else {
        Some(seed_str.parse().context("Seed invalide")?)
    };

    super::cmd_generate(conn, count, seed, 10_000_000)
}

fn cmd_history_interactive(conn: &Connection) -> Result<()> {
    let n_str = prompt_with_default("Nombre de tirages", "10")?;
    let n: u32 = n_str.parse().context("Nombre invalide")?;
    super::cmd_list(conn, n)
}

fn cmd_stats_interactive(conn: &Connection) -> Result<()> {
    let w_str = prompt_with_default("Fenêtre d'analyse", "100")?;
    let w: u32 = w_str.parse().context("Fenêtre invalide")?;
    super::cmd_stats(conn, w)
}

pub fn run_interactive(conn: &Connection) -> Result<()> {
    println!("Bienvenue dans le mode interactif de lotto645 !");

    loop {
        display_menu();
        let input = match prompt("> ") {
            Ok(s) => s,
            Err(_) => break, // EOF / Ctrl+D
        };

        if input.is_empty() {
            continue;
        }

        match parse_command(&input) {
            Some(InteractiveCommand::Quit) => {
                println!("Au revoir !");
                break;
            }
            Some(InteractiveCommand::Generate) => {
                if let Err(e) = cmd_generate_interactive(conn) {
                    println!("Erreur: {e:#}");
                }
            }
            Some(InteractiveCommand::Check) => {
                if let Err(e) = super::cmd_check(conn) {
                    println!("Erreur: {e:#}");
                }
            }
            Some(InteractiveCommand::Add) => {
                if let Err(e) = super::cmd_add(conn) {
                    println!("Erreur: {e:#}");
                }
            }
            Some(InteractiveCommand::History) => {
                if let Err(e) = cmd_history_interactive(conn) {
                    println!("Erreur: {e:#}");
                }
            }
            Some(InteractiveCommand::Stats) => {
                if let Err(e) = cmd_stats_interactive(conn) {
                    println!("Erreur: {e:#}");
                }
            }
            None => {
                println!("Commande inconnue : {input}");
            }
        }
    }

    Ok(())
}

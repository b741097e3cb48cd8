use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};

use lotto645_db::models::Draw;

use crate::engine::rank::RankResult;
use crate::engine::NumberStats;
use crate::import::ImportResult;
use crate::picks::PickSet;

fn format_numbers(numbers: &[u8]) -> String {
    numbers
        .iter()
        .map(|n| format!("{:2}", n))
        .collect::<Vec<_>>()
        .join(" - ")
}

pub fn display_draws(draws: &[Draw]) {
    if draws.is_empty() {
        println!("Aucun tirage à afficher.");
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Tirage", "Numéros", "Bonus"]);

    for draw in draws {
        let mut sorted = draw.numbers;
        sorted.sort();

        table.add_row(vec![
            &draw.draw_no.to_string(),
            &format_numbers(&sorted),
            &format!("{:2}", draw.bonus),
        ]);
    }

    println!("{table}");
}

pub fn display_import_summary(result: &ImportResult) {
    println!("Import terminé :");
    println!("  Total lignes lues : {}", result.total_records);
    println!("  Insérés           : {}", result.inserted);
    println!("  Doublons ignorés  : {}", result.skipped);
    if result.errors > 0 {
        println!("  Erreurs           : {}", result.errors);
    }
}

pub fn display_picks(pick_set: &PickSet) {
    println!("\n🎲 Grilles pour le tirage {}\n", pick_set.target_draw_no);

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["#", "Numéros"]);

    for (i, pick) in pick_set.picks.iter().enumerate() {
        table.add_row(vec![&format!("{}", i + 1), &format_numbers(pick)]);
    }

    println!("{table}");
}

pub fn display_stats(stats: &[NumberStats], window: u32) {
    println!("\n📊 Statistiques sur les {} derniers tirages\n", window);

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Numéro", "Fréquence", "Retard"]);

    let mut sorted = stats.to_vec();
    sorted.sort_by(|a, b| b.frequency.cmp(&a.frequency));

    for stat in &sorted {
        table.add_row(vec![
            &format!("{:2}", stat.number),
            &stat.frequency.to_string(),
            &stat.gap.to_string(),
        ]);
    }
    println!("{table}");
}

pub fn display_rank_result(result: &RankResult, winning: &Draw) {
    println!("\n🏆 Vérification du tirage {}\n", winning.draw_no);

    let mut sorted = winning.numbers;
    sorted.sort();
    println!(
        "Tirage officiel : {}  (bonus : {})",
        format_numbers(&sorted),
        winning.bonus
    );

    match result.numbers {
        Some(numbers) => {
            println!("Meilleure grille : {}", format_numbers(&numbers));
            println!("Résultat : {} ({} numéros trouvés)", result.rank, result.matched);
        }
        None => {
            println!("Résultat : {} (aucun numéro trouvé)", result.rank);
        }
    }
}
